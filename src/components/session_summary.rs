//! Session Summary Component
//!
//! Aggregate counts and the last-scan indicator.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn SessionSummary() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let session = ctx.session;

    let totals = move || session.with(|s| s.totals());
    let last_scan = move || session.with(|s| s.last_scan().map(str::to_string));

    view! {
        <div class="session-summary">
            <p class="item-count">
                {move || {
                    let t = totals();
                    format!("{} scanned, {} unique", t.total_quantity, t.unique_items)
                }}
            </p>
            {move || last_scan().map(|code| view! {
                <p class="last-scan">
                    <span class="last-scan-label">"Last scan: "</span>
                    <span class="last-scan-code">{code}</span>
                </p>
            })}
        </div>
    }
}
