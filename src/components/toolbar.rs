//! Toolbar Component
//!
//! Export and clear-all actions for the scan list.

use leptos::prelude::*;

use crate::components::ConfirmButton;
use crate::context::AppContext;

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let is_empty = Signal::derive(move || ctx.session.with(|s| s.session().is_empty()));

    view! {
        <div class="toolbar">
            <button class="export-btn" on:click=move |_| ctx.export_csv()>
                "Export CSV"
            </button>
            <ConfirmButton
                label="Clear all"
                prompt="Clear all scans?"
                button_class="clear-btn"
                disabled=is_empty
                on_confirm=move |_| ctx.clear_all(true)
            />
        </div>
    }
}
