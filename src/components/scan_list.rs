//! Scan List Component
//!
//! The session rendered newest first, or an empty-state message.

use leptos::prelude::*;

use crate::components::ScanRow;
use crate::context::AppContext;

#[component]
pub fn ScanList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let session = ctx.session;

    let is_empty = move || session.with(|s| s.session().is_empty());

    view! {
        <Show
            when=move || !is_empty()
            fallback=|| view! { <div class="empty-message">"No items scanned yet"</div> }
        >
            <ul class="scan-list">
                <For
                    each=move || session.with(|s| s.rows())
                    // Any visible change re-keys the row so it re-renders
                    key=|row| (row.item.id, row.number, row.item.quantity(), row.item.last_seen_at)
                    children=move |row| view! { <ScanRow row=row /> }
                />
            </ul>
        </Show>
    }
}
