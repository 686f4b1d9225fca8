//! WBS Tree View Component
//!
//! Renders the flattened rows of the current project.

use leptos::prelude::*;
use wbs_core::FlatRow;

use crate::components::TreeRow;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn WbsTreeView(rows: Memo<Vec<FlatRow>>) -> impl IntoView {
    let store = use_app_store();

    let empty_message = move || {
        if store.loading().get() {
            Some("Loading…")
        } else if store.items().read().is_empty() {
            Some("No WBS items in this project")
        } else if rows.read().is_empty() {
            Some("No items match the current filters")
        } else {
            None
        }
    };

    view! {
        <div class="tree-view">
            <div class="wbs-row wbs-header">
                <span class="collapse-placeholder"></span>
                <span class="wbs-code">"Code"</span>
                <span class="wbs-name">"Task"</span>
                <span class="status-badge">"Status"</span>
                <span class="wbs-owners">"Owners"</span>
                <span class="wbs-plan">"Plan"</span>
                <span class="wbs-progress">"Progress"</span>
            </div>

            {move || empty_message().map(|msg| view! { <p class="tree-empty">{msg}</p> })}

            <For
                each=move || rows.get()
                // whole row: any field changed on reload re-renders it
                key=|row| row.clone()
                children=move |row| view! { <TreeRow row=row /> }
            />
        </div>
    }
}
