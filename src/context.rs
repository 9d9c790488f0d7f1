//! Application Context
//!
//! The explicit application state owned by `App` and provided via the
//! Leptos Context API. Components dispatch every action through it.

use std::rc::Rc;

use chrono::Utc;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use scan_core::{AppConfig, ItemId, ScanEvent, ScannerController, SessionStore};
use tracing::warn;

use crate::download;
use crate::js_error;
use crate::scanner::Html5QrcodeBackend;
use crate::storage::BrowserStorage;
use crate::store::{store_dismiss_notice, store_push_notice, NoticeKind, UiStateStoreFields, UiStore};

pub type BrowserSession = SessionStore<BrowserStorage>;
pub type Controller = Rc<ScannerController<Html5QrcodeBackend>>;

const FLASH_MS: u32 = 250;

/// App-wide state and actions
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Scan tally mirrored to localStorage
    pub session: RwSignal<BrowserSession>,
    /// Scanner / notice state
    pub ui: UiStore,
    controller: StoredValue<Controller, LocalStorage>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(
        session: RwSignal<BrowserSession>,
        ui: UiStore,
        controller: Controller,
        config: AppConfig,
    ) -> Self {
        Self {
            session,
            ui,
            controller: StoredValue::new_local(controller),
            config: StoredValue::new(config),
        }
    }

    // ========================
    // Session actions
    // ========================

    /// Camera or manual scan
    pub fn record_scan(&self, event: ScanEvent) {
        self.session.update(|s| {
            s.on_scan_event(event);
        });
    }

    pub fn change_quantity(&self, id: ItemId, delta: i64) {
        self.session.update(|s| {
            s.change_quantity(id, delta);
        });
    }

    pub fn delete_item(&self, id: ItemId) {
        self.session.update(|s| {
            s.delete_item(id);
        });
    }

    /// Only called from a confirmed prompt; `confirmed = false` is a no-op
    pub fn clear_all(&self, confirmed: bool) {
        let mut cleared = false;
        self.session.update(|s| cleared = s.clear_all(confirmed));
        if cleared {
            self.notify(NoticeKind::Info, "Scan list cleared".to_string());
        }
    }

    pub fn export_csv(&self) {
        let result = self.session.with_untracked(|s| s.export_csv(Utc::now()));
        match result {
            Ok(export) => match download::download_csv(&export) {
                Ok(()) => self.notify(
                    NoticeKind::Info,
                    format!("Exported {} items to {}", export.row_count, export.filename),
                ),
                Err(e) => {
                    let message = js_error::message(&e);
                    warn!(error = %message, "CSV download failed");
                    self.notify(NoticeKind::Error, format!("Download failed: {}", message));
                }
            },
            Err(e) => self.notify(NoticeKind::Info, e.to_string()),
        }
    }

    // ========================
    // Scanner actions
    // ========================

    pub fn start_scanner(&self) {
        let ctx = *self;
        let controller = self.controller.get_value();
        self.ui.starting().set(true);
        spawn_local(async move {
            let result = controller.start().await;
            ctx.ui.starting().set(false);
            ctx.ui.scanning().set(controller.is_scanning());
            match result {
                Ok(()) => ctx.ui.camera_error().set(None),
                Err(e) => {
                    ctx.ui.camera_error().set(Some(e.to_string()));
                    ctx.notify(NoticeKind::Error, e.to_string());
                }
            }
        });
    }

    pub fn stop_scanner(&self) {
        let ctx = *self;
        let controller = self.controller.get_value();
        spawn_local(async move {
            let result = controller.stop().await;
            ctx.ui.scanning().set(controller.is_scanning());
            if let Err(e) = result {
                ctx.notify(NoticeKind::Error, e.to_string());
            }
        });
    }

    // ========================
    // Feedback
    // ========================

    /// Toast that hides itself after the configured delay
    pub fn notify(&self, kind: NoticeKind, text: String) {
        let ui = self.ui;
        let id = store_push_notice(&ui, kind, text);
        let delay = self.config.with_value(|c| c.notice_ms);
        Timeout::new(delay, move || store_dismiss_notice(&ui, id)).forget();
    }

    /// Visual acknowledgment of a camera scan
    pub fn flash(&self) {
        let ui = self.ui;
        ui.flash().set(true);
        Timeout::new(FLASH_MS, move || ui.flash().set(false)).forget();
    }
}
