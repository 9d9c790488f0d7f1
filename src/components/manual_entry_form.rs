//! Manual Entry Form Component
//!
//! Type in a code the camera cannot read. Submitted codes go through the
//! same path as camera scans, without debounce or beep.

use chrono::Utc;
use leptos::prelude::*;
use scan_core::{ScanEvent, Symbology};

use crate::context::AppContext;

#[component]
pub fn ManualEntryForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (code, set_code) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = code.get_untracked();
        let text = input.trim();
        if text.is_empty() {
            return;
        }
        ctx.record_scan(ScanEvent::new(text, Symbology::Manual, Utc::now()));
        set_code.set(String::new());
    };

    view! {
        <form class="manual-entry-form" on:submit=submit>
            <input
                type="text"
                inputmode="numeric"
                placeholder="Enter barcode manually..."
                prop:value=move || code.get()
                on:input=move |ev| set_code.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
        </form>
    }
}
