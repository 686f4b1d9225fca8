//! Tree Row Component
//!
//! One WBS item in the tree view.

use chrono::NaiveDate;
use leptos::prelude::*;
use wbs_core::{FlatRow, Schedule};

use crate::store::{store_toggle_node, use_app_store};

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
}

/// `start ~ end` of the effective plan
pub fn plan_range(schedule: &Schedule) -> String {
    format!("{} ~ {}", fmt_date(schedule.effective_start()), fmt_date(schedule.effective_end()))
}

/// Original plan, shown next to a revised one
pub fn original_range(schedule: &Schedule) -> Option<String> {
    schedule
        .has_revision()
        .then(|| format!("{} ~ {}", fmt_date(schedule.original_start), fmt_date(schedule.original_end)))
}

fn status_class(status: &str) -> &'static str {
    match status {
        "已完成" => "status-badge done",
        "進行中" => "status-badge active",
        _ => "status-badge",
    }
}

/// A single item row in the tree
#[component]
pub fn TreeRow(row: FlatRow) -> impl IntoView {
    let store = use_app_store();

    let FlatRow { item, depth, has_children, expanded } = row;
    let id = item.item_id.clone();
    let indent = depth * 24;
    let owners = item.owners().collect::<Vec<_>>().join(" / ");
    let plan = plan_range(&item.schedule);
    let original = original_range(&item.schedule);
    let row_class = if item.is_overdue { "wbs-row overdue" } else { "wbs-row" };

    view! {
        <div class=row_class style=format!("padding-left: {}px;", indent)>
            // Collapse toggle
            {if has_children {
                view! {
                    <button class="collapse-btn" on:click=move |_| store_toggle_node(&store, &id)>
                        {if expanded { "▼" } else { "▶" }}
                    </button>
                }.into_any()
            } else {
                view! { <span class="collapse-placeholder">"·"</span> }.into_any()
            }}

            <span class="wbs-code">{item.code.to_string()}</span>
            <span class="wbs-name">{item.task_name.clone()}</span>
            <span class=status_class(&item.status)>{item.status.clone()}</span>
            <span class="wbs-owners">{owners}</span>
            <span class="wbs-plan">
                {plan}
                {original.map(|range| view! { <s class="wbs-plan-original">{range}</s> })}
            </span>
            <span class="wbs-progress">{format!("{}%", item.actual_progress)}</span>
            {item.is_overdue.then(|| view! { <span class="overdue-flag">"Overdue"</span> })}
        </div>
    }
}
