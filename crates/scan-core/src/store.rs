//! Session Store
//!
//! Owns the session, its storage mirror and the last-scan indicator.
//! Every mutation is followed by a full write of the list; write
//! failures are logged and never undo the in-memory change.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{ExportError, StorageError};
use crate::export::{self, CsvExport};
use crate::item::{ItemId, ScanEvent};
use crate::session::{ItemRow, QuantityChange, ScanOutcome, Session, SessionTotals};
use crate::storage::{self, KeyValueStorage};

#[derive(Debug)]
pub struct SessionStore<S> {
    session: Session,
    storage: S,
    key: String,
    last_scan: Option<String>,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Empty store; nothing is read from storage
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            session: Session::new(),
            storage,
            key: key.into(),
            last_scan: None,
        }
    }

    /// Load the stored list once at startup.
    /// Unreadable or corrupt storage yields an empty session.
    pub fn restore(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::new(storage, key);
        match storage::load_items(&store.storage, &store.key) {
            Ok(items) => {
                store.session = Session::from_items(items);
                info!(items = store.session.len(), "restored scan session");
            }
            Err(e) => warn!(error = %e, "could not restore scan session, starting empty"),
        }
        store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Code of the most recent scan, hidden after a clear
    pub fn last_scan(&self) -> Option<&str> {
        self.last_scan.as_deref()
    }

    pub fn rows(&self) -> Vec<ItemRow> {
        self.session.rows()
    }

    pub fn totals(&self) -> SessionTotals {
        self.session.totals()
    }

    pub fn on_scan_event(&mut self, event: ScanEvent) -> ScanOutcome {
        let outcome = self.session.record_scan(&event);
        debug!(code = %event.code, symbology = %event.symbology, ?outcome, "scan recorded");
        self.last_scan = Some(event.code);
        self.persist_or_log();
        outcome
    }

    pub fn change_quantity(&mut self, id: ItemId, delta: i64) -> QuantityChange {
        let change = self.session.change_quantity(id, delta);
        debug!(id, delta, ?change, "quantity changed");
        if change != QuantityChange::NotFound {
            self.persist_or_log();
        }
        change
    }

    /// Returns whether an item was removed
    pub fn delete_item(&mut self, id: ItemId) -> bool {
        let removed = self.session.remove(id).is_some();
        if removed {
            debug!(id, "item deleted");
            self.persist_or_log();
        }
        removed
    }

    /// Empty the session when `confirmed`; otherwise leave it untouched.
    /// Returns whether the session was cleared.
    pub fn clear_all(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        self.session.clear();
        self.last_scan = None;
        info!("scan session cleared");
        self.persist_or_log();
        true
    }

    pub fn export_csv(&self, now: DateTime<Utc>) -> Result<CsvExport, ExportError> {
        let export = export::export_csv(self.session.items(), now)?;
        info!(rows = export.row_count, file = %export.filename, "session exported");
        Ok(export)
    }

    /// Write the full list under the store key
    pub fn persist(&self) -> Result<(), StorageError> {
        storage::save_items(&self.storage, &self.key, self.session.items())
    }

    fn persist_or_log(&self) {
        if let Err(e) = self.persist() {
            warn!(error = %e, key = %self.key, "failed to persist scan session");
        }
    }
}
