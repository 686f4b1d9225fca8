//! Filter Bar Component
//!
//! Inputs for every tree filter. Free-text fields are debounced before they
//! reach the store; selects, checkboxes and dates apply immediately.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wbs_core::{FilterInput, STATUSES};

use crate::store::{use_app_store, AppStateStoreFields};
use crate::tree::ProjectTree;

const DEBOUNCE_MS: u32 = 250;

/// Text input that commits to the store after typing pauses
#[component]
fn DebouncedInput(
    placeholder: &'static str,
    /// Current committed value
    value: Signal<String>,
    on_commit: impl Fn(String) + Copy + 'static,
) -> impl IntoView {
    let (draft, set_draft) = signal(value.get_untracked());
    let generation = StoredValue::new(0u32);

    // Committed value changed elsewhere (e.g. "Clear")
    Effect::new(move |_| set_draft.set(value.get()));

    view! {
        <input
            type="text"
            placeholder=placeholder
            prop:value=move || draft.get()
            on:input=move |ev| {
                let text = event_target_value(&ev);
                set_draft.set(text.clone());
                generation.update_value(|g| *g = g.wrapping_add(1));
                let mine = generation.get_value();
                spawn_local(async move {
                    TimeoutFuture::new(DEBOUNCE_MS).await;
                    // a newer keystroke owns the commit
                    if generation.get_value() == mine {
                        on_commit(text);
                    }
                });
            }
        />
    }
}

#[component]
pub fn FilterBar(tree: Memo<ProjectTree>) -> impl IntoView {
    let store = use_app_store();
    let input = store.filter_input();

    // Parents offered by the parent filter, in tree order
    let parent_options = Memo::new(move |_| {
        tree.with(|tree| {
            tree.forest
                .depth_first()
                .into_iter()
                .filter(|node| node.has_children())
                .map(|node| (node.item.code.to_string(), format!("{} {}", node.item.code, node.item.task_name)))
                .collect::<Vec<(String, String)>>()
        })
    });

    let owner = Signal::derive(move || input.read().owner.clone());
    let code = Signal::derive(move || input.read().code.clone());

    view! {
        <div class="filter-bar">
            <select
                class="filter-status"
                prop:value=move || input.read().status.clone()
                on:change=move |ev| input.write().status = event_target_value(&ev)
            >
                <option value="">"All statuses"</option>
                {STATUSES.iter().map(|status| view! { <option value=*status>{*status}</option> }).collect_view()}
            </select>

            <DebouncedInput
                placeholder="Owner"
                value=owner
                on_commit=move |text| input.write().owner = text
            />
            <DebouncedInput
                placeholder="WBS code"
                value=code
                on_commit=move |text| input.write().code = text
            />

            <select
                class="filter-parent"
                prop:value=move || input.read().parent.clone()
                on:change=move |ev| input.write().parent = event_target_value(&ev)
            >
                <option value="">"All parents"</option>
                <For
                    each=move || parent_options.get()
                    key=|(code, label)| (code.clone(), label.clone())
                    children=move |(code, label)| view! { <option value=code>{label}</option> }
                />
            </select>

            <label class="filter-overdue">
                <input
                    type="checkbox"
                    prop:checked=move || input.read().overdue_only
                    on:change=move |ev| input.write().overdue_only = event_target_checked(&ev)
                />
                "Overdue only"
            </label>

            <input
                type="number"
                class="filter-due"
                min="0"
                placeholder="Due within days"
                prop:value=move || input.read().due_within_days.clone()
                on:input=move |ev| input.write().due_within_days = event_target_value(&ev)
            />

            <input
                type="date"
                class="filter-from"
                prop:value=move || input.read().from.clone()
                on:change=move |ev| input.write().from = event_target_value(&ev)
            />
            <span class="filter-range-sep">"–"</span>
            <input
                type="date"
                class="filter-to"
                prop:value=move || input.read().to.clone()
                on:change=move |ev| input.write().to = event_target_value(&ev)
            />

            <button
                class="filter-clear"
                disabled=move || *input.read() == FilterInput::default()
                on:click=move |_| input.set(FilterInput::default())
            >
                "Clear"
            </button>
        </div>
    }
}
