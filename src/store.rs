//! UI State Store
//!
//! Scanner and notice state with field-level reactivity
//! (reactive_stores). The scan list itself lives in the session signal.

use leptos::prelude::*;
use reactive_stores::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A toast message; `id` lets a stale dismiss timer skip newer notices
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub text: String,
}

/// Transient UI state
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Camera is streaming; drives the scanning overlay
    pub scanning: bool,
    /// A start request is in flight
    pub starting: bool,
    /// Last camera failure, shown until the next successful start
    pub camera_error: Option<String>,
    pub notice: Option<Notice>,
    /// Counter for notice ids
    pub notice_seq: u32,
    /// Brief highlight after a forwarded scan
    pub flash: bool,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

// ========================
// Store Helper Functions
// ========================

/// Show a notice and return its id
pub fn store_push_notice(store: &UiStore, kind: NoticeKind, text: String) -> u32 {
    store.notice_seq().update(|seq| *seq = seq.wrapping_add(1));
    let id = store.notice_seq().get_untracked();
    store.notice().set(Some(Notice { id, kind, text }));
    id
}

/// Hide the notice only if it is still the one with `id`
pub fn store_dismiss_notice(store: &UiStore, id: u32) {
    let current = store.notice().with_untracked(|n| n.as_ref().map(|n| n.id));
    if current == Some(id) {
        store.notice().set(None);
    }
}
