//! Barcode Scanner App
//!
//! Composition root: builds the session store, scanner controller and UI
//! store, wires scans into the session and lays out the page.

use leptos::prelude::*;
use reactive_stores::Store;
use rolling_logger::LogBuffer;
use scan_core::{AppConfig, ScannerController, SessionStore};

use crate::components::{
    DiagnosticsPanel, ManualEntryForm, NoticeToast, ScanList, ScannerPanel, SessionSummary,
    Toolbar,
};
use crate::context::AppContext;
use crate::feedback::BeepFeedback;
use crate::scanner::{Html5QrcodeBackend, SCANNER_ELEMENT_ID};
use crate::storage::BrowserStorage;
use crate::store::UiState;

#[component]
pub fn App(config: AppConfig, log_buffer: Option<LogBuffer>) -> impl IntoView {
    // State
    let session = RwSignal::new(SessionStore::restore(BrowserStorage, config.storage_key.clone()));
    let ui = Store::new(UiState::default());
    let controller = ScannerController::new(
        Html5QrcodeBackend::new(SCANNER_ELEMENT_ID),
        config.scanner.clone(),
        Box::new(BeepFeedback::new(config.beep_asset.clone())),
    );

    let ctx = AppContext::new(session, ui, controller.clone(), config);
    controller.on_scan(move |event| {
        ctx.flash();
        ctx.record_scan(event);
    });

    // Provide context to all children
    provide_context(ctx);

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Barcode Scanner"</h1>
                <SessionSummary />
            </header>

            <main class="main-content">
                <ScannerPanel />
                <ManualEntryForm />
                <Toolbar />
                <ScanList />
            </main>

            {log_buffer.map(|buffer| view! { <DiagnosticsPanel buffer=buffer /> })}

            <NoticeToast />
        </div>
    }
}
