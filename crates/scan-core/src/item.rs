//! Scanned Item
//!
//! One unique barcode value observed in the session, and the normalized
//! scan event that creates or bumps it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::symbology::Symbology;

/// Opaque, per-session item identifier
pub type ItemId = u32;

/// A normalized, already-debounced scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub code: String,
    pub symbology: Symbology,
    pub timestamp: DateTime<Utc>,
}

impl ScanEvent {
    pub fn new(code: impl Into<String>, symbology: Symbology, timestamp: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            symbology,
            timestamp,
        }
    }
}

/// One entry in the session tally.
///
/// `quantity` is private: it is at least 1 from construction on, and the
/// only way to lower it is [`ScannedItem::apply_delta`], which refuses to
/// go below 1 and leaves removal to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredItem")]
pub struct ScannedItem {
    pub id: ItemId,
    pub code: String,
    pub symbology: Symbology,
    quantity: u32,
    pub first_seen_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl ScannedItem {
    /// First observation of a code
    pub fn new(id: ItemId, event: &ScanEvent) -> Self {
        Self {
            id,
            code: event.code.clone(),
            symbology: event.symbology,
            quantity: 1,
            first_seen_at: event.timestamp,
            last_seen_at: event.timestamp,
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Repeat scan of the same code
    pub fn record_repeat(&mut self, at: DateTime<Utc>) {
        self.quantity = self.quantity.saturating_add(1);
        self.last_seen_at = at;
    }

    /// Add `delta` to the quantity.
    ///
    /// Returns the new quantity, or `None` (leaving the item untouched) when
    /// the result would be zero or negative.
    /// Sums past `u32::MAX` saturate.
    pub fn apply_delta(&mut self, delta: i64) -> Option<u32> {
        let next = match i64::from(self.quantity).checked_add(delta) {
            Some(next) => next,
            None if delta > 0 => i64::MAX,
            None => return None,
        };
        if next <= 0 {
            return None;
        }
        self.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        Some(self.quantity)
    }
}

/// Shape accepted from storage. Older entries may lack `quantity`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredItem {
    id: ItemId,
    code: String,
    #[serde(default)]
    symbology: Symbology,
    #[serde(default)]
    quantity: Option<u32>,
    first_seen_at: DateTime<Utc>,
    #[serde(default)]
    last_seen_at: Option<DateTime<Utc>>,
}

impl From<StoredItem> for ScannedItem {
    fn from(stored: StoredItem) -> Self {
        Self {
            id: stored.id,
            code: stored.code,
            symbology: stored.symbology,
            quantity: stored.quantity.unwrap_or(1).max(1),
            first_seen_at: stored.first_seen_at,
            last_seen_at: stored.last_seen_at.unwrap_or(stored.first_seen_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_event(code: &str) -> ScanEvent {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        ScanEvent::new(code, Symbology::Ean13, at)
    }

    #[test]
    fn test_new_item_starts_at_one() {
        let item = ScannedItem::new(7, &make_event("4006381333931"));
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.first_seen_at, item.last_seen_at);
    }

    #[test]
    fn test_apply_delta_refuses_zero() {
        let mut item = ScannedItem::new(1, &make_event("123"));
        assert_eq!(item.apply_delta(2), Some(3));
        assert_eq!(item.apply_delta(-3), None);
        assert_eq!(item.quantity(), 3);
        assert_eq!(item.apply_delta(-2), Some(1));
    }

    #[test]
    fn test_apply_delta_saturates_large_increment() {
        let mut item = ScannedItem::new(1, &make_event("123"));
        assert_eq!(item.apply_delta(i64::MAX), Some(u32::MAX));
        assert_eq!(item.apply_delta(1), Some(u32::MAX));
        assert_eq!(item.apply_delta(i64::MIN), None);
        assert_eq!(item.quantity(), u32::MAX);
    }

    #[test]
    fn test_restore_missing_quantity_defaults_to_one() {
        let json = r#"{"id":3,"code":"555","symbology":"EAN-8","firstSeenAt":"2026-10-16T09:30:00Z"}"#;
        let item: ScannedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.symbology, Symbology::Ean8);
        assert_eq!(item.last_seen_at, item.first_seen_at);
    }

    #[test]
    fn test_restore_zero_quantity_is_raised() {
        let json = r#"{"id":3,"code":"555","quantity":0,"firstSeenAt":"2026-10-16T09:30:00Z","lastSeenAt":"2026-10-16T09:31:00Z"}"#;
        let item: ScannedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.symbology, Symbology::Unknown);
    }
}
