//! Scanner Panel Component
//!
//! Video feed container, scanning overlay and the start/stop toggle.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::scanner::SCANNER_ELEMENT_ID;
use crate::store::UiStateStoreFields;

#[component]
pub fn ScannerPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let ui = ctx.ui;

    let toggle = move |_| {
        if ui.scanning().get_untracked() {
            ctx.stop_scanner();
        } else {
            ctx.start_scanner();
        }
    };

    let button_label = move || {
        if ui.starting().get() {
            "Starting camera..."
        } else if ui.scanning().get() {
            "Stop scanning"
        } else {
            "Start scanning"
        }
    };

    view! {
        <section class="scanner-panel">
            <div
                class="scanner-frame"
                class:active=move || ui.scanning().get()
                class:flash=move || ui.flash().get()
            >
                <div id=SCANNER_ELEMENT_ID class="scanner-view"></div>
                <Show when=move || ui.scanning().get()>
                    <div class="scan-overlay">
                        <div class="scan-line"></div>
                    </div>
                </Show>
                <Show when=move || !ui.scanning().get() && !ui.starting().get()>
                    <div class="scanner-placeholder">"Camera is off"</div>
                </Show>
            </div>

            <button
                class=move || if ui.scanning().get() { "scan-toggle stop" } else { "scan-toggle" }
                disabled=move || ui.starting().get()
                on:click=toggle
            >
                {button_label}
            </button>

            {move || ui.camera_error().get().map(|error| view! {
                <p class="camera-error">{error}</p>
            })}
        </section>
    }
}
