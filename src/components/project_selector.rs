//! Project Selector Component
//!
//! Dropdown for switching between backend projects.

use leptos::prelude::*;

use crate::store::{store_select_project, use_app_store, AppStateStoreFields};

#[component]
pub fn ProjectSelector() -> impl IntoView {
    let store = use_app_store();
    let current = move || store.current_project().get().unwrap_or_default();

    view! {
        <div class="project-selector">
            <label for="project-select">"Project"</label>
            <select
                id="project-select"
                prop:value=current
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    tracing::info!(project_id = %value, "project selected");
                    store_select_project(&store, Some(value));
                }
            >
                {move || if store.projects().read().is_empty() {
                    view! { <option value="">"No projects"</option> }.into_any()
                } else {
                    ().into_any()
                }}
                <For
                    each=move || store.projects().get()
                    key=|project| project.project_id.clone()
                    children=move |project| {
                        let id = project.project_id.clone();
                        let selected = {
                            let id = id.clone();
                            move || store.current_project().read().as_deref() == Some(id.as_str())
                        };
                        view! {
                            <option value=id selected=selected>{project.label()}</option>
                        }
                    }
                />
            </select>
        </div>
    }
}
