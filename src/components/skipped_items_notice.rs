//! Skipped Items Notice Component
//!
//! Summarizes data problems found while loading and building the tree,
//! with the most recent log lines for details.

use leptos::prelude::*;
use wbs_core::{ItemId, SkippedItem};

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::tree::ProjectTree;

const LOG_LINES: usize = 20;

fn describe(skipped: &SkippedItem) -> String {
    let who = skipped
        .code
        .as_deref()
        .or(skipped.item_id.as_deref())
        .unwrap_or("(unidentified)");
    format!("{who}: {}", skipped.reason)
}

fn id_list(ids: &[ItemId]) -> String {
    ids.iter().map(ItemId::as_str).collect::<Vec<_>>().join(", ")
}

#[component]
pub fn SkippedItemsNotice(tree: Memo<ProjectTree>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (show_log, set_show_log) = signal(false);

    let problems = move || {
        let mut lines: Vec<String> = store.skipped().read().iter().map(describe).collect();
        let tree = tree.read();
        let diagnostics = &tree.diagnostics;
        lines.extend(diagnostics.duplicates.iter().map(describe));
        if !diagnostics.dangling.is_empty() {
            lines.push(format!("parent not found, shown at top level: {}", id_list(&diagnostics.dangling)));
        }
        if !diagnostics.cyclic.is_empty() {
            lines.push(format!("cyclic parent reference, shown at top level: {}", id_list(&diagnostics.cyclic)));
        }
        lines
    };

    view! {
        <Show when=move || !problems().is_empty()>
            <div class="skipped-notice">
                <strong>{move || format!("{} data problem(s) in this project", problems().len())}</strong>
                <ul>
                    {move || problems().into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
                <button class="log-toggle" on:click=move |_| set_show_log.update(|v| *v = !*v)>
                    {move || if show_log.get() { "Hide log" } else { "Show log" }}
                </button>
                {
                    let ctx = ctx.clone();
                    move || show_log.get().then(|| {
                        let lines = ctx.recent_logs(LOG_LINES);
                        view! { <pre class="recent-log">{lines.join("\n")}</pre> }
                    })
                }
            </div>
        </Show>
    }
}
