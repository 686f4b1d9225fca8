//! WBS Tracker Frontend App
//!
//! Main application component: project picker, filters and the WBS tree.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use rolling_logger::LogBuffer;
use wbs_core::{flatten, Forest};

use crate::commands::ApiClient;
use crate::components::{FilterBar, ProjectSelector, SkippedItemsNotice, WbsTreeView};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{
    store_collapse_all, store_expand_all, store_set_items, store_set_load_error, store_set_projects, AppState,
    AppStateStoreFields,
};
use crate::tree::{filter_forest, summary, ProjectTree};

#[component]
pub fn App(config: AppConfig, logs: Option<LogBuffer>) -> impl IntoView {
    let store = Store::new(AppState::new());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let api = ApiClient::for_current_page(config.clone());
    let ctx = AppContext::new((reload_trigger, set_reload_trigger), api.clone(), config.clone(), logs);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx.clone());

    // Load projects on mount
    let preferred = config.default_project.clone();
    let projects_api = api.clone();
    Effect::new(move |_| {
        let api = projects_api.clone();
        let preferred = preferred.clone();
        spawn_local(async move {
            match api.list_projects().await {
                Ok(projects) => {
                    tracing::info!(count = projects.len(), "loaded projects");
                    store_set_projects(&store, projects, preferred.as_deref());
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to load projects");
                    store_set_load_error(&store, e.to_string());
                }
            }
        });
    });

    // Load items when project or trigger changes
    let auto_expand = config.auto_expand_on_load;
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let Some(project_id) = store.current_project().get() else {
            return;
        };
        tracing::debug!(%project_id, trigger, "loading WBS items");
        store.loading().set(true);
        let api = api.clone();
        spawn_local(async move {
            let result = api.list_wbs_items(&project_id).await;
            // a response for a project that is no longer selected is dropped
            if store.current_project().get_untracked().as_deref() != Some(project_id.as_str()) {
                tracing::debug!(%project_id, "discarding stale WBS response");
                return;
            }
            match result {
                Ok(raw) => {
                    tracing::info!(%project_id, count = raw.len(), "loaded WBS items");
                    store_set_items(&store, raw, auto_expand);
                }
                Err(e) => {
                    tracing::error!(%project_id, error = %e, "failed to load WBS items");
                    store_set_load_error(&store, e.to_string());
                }
            }
        });
    });

    // Rebuilt only when items change
    let project_tree = Memo::new(move |_| ProjectTree::build(&store.items().read()));
    let filtered = Memo::new(move |_| {
        let criteria = store.filter_input().read().to_criteria();
        project_tree.with(|tree| filter_forest(&tree.forest, &criteria, Local::now().date_naive()))
    });
    // Expand toggles only re-run this stage
    let rows = Memo::new(move |_| {
        let expand = store.expand().read();
        match &*filtered.read() {
            Some(forest) => flatten(forest, &expand),
            None => project_tree.with(|tree| flatten(&tree.forest, &expand)),
        }
    });
    let count = move || {
        let matched = filtered
            .read()
            .as_ref()
            .map(Forest::len)
            .unwrap_or_else(|| project_tree.read().forest.len());
        summary(rows.read().len(), store.items().read().len(), matched)
    };

    let reload_ctx = ctx.clone();

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"WBS Tracker"</h1>
                <ProjectSelector />
            </header>

            <main class="main-content">
                <FilterBar tree=project_tree />

                <div class="tree-toolbar">
                    <button on:click=move |_| project_tree.with_untracked(|tree| store_expand_all(&store, &tree.forest))>
                        "Expand all"
                    </button>
                    <button on:click=move |_| store_collapse_all(&store)>"Collapse all"</button>
                    <button on:click=move |_| reload_ctx.reload()>"Reload"</button>
                </div>

                {move || store.load_error().get().map(|msg| view! { <p class="load-error">{msg}</p> })}

                <SkippedItemsNotice tree=project_tree />

                <WbsTreeView rows=rows />

                <p class="item-count">{count}</p>
            </main>
        </div>
    }
}
