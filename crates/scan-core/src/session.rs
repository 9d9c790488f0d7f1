//! Session
//!
//! The ordered tally of unique scanned codes, newest first.
//! Holds exactly one item per distinct code.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::item::{ItemId, ScanEvent, ScannedItem};

/// Result of recording a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// New code, inserted at the front
    Added(ItemId),
    /// Known code, quantity bumped
    Incremented { id: ItemId, quantity: u32 },
}

/// Result of a quantity change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated { id: ItemId, quantity: u32 },
    /// Quantity would have dropped to zero or below
    Removed(ItemId),
    NotFound,
}

/// One rendered row: the item and its display number.
///
/// Numbers count from the end of the list, so the first row shows the
/// highest number and the oldest unique code shows 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub number: usize,
    pub item: ScannedItem,
}

/// Aggregate counts shown above the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTotals {
    pub unique_items: usize,
    pub total_quantity: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    items: Vec<ScannedItem>,
    next_id: ItemId,
}

impl Session {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild from a stored list, keeping its order.
    /// A repeated code keeps only its first occurrence.
    pub fn from_items(items: Vec<ScannedItem>) -> Self {
        let mut seen = HashSet::new();
        let items: Vec<ScannedItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.code.clone()))
            .collect();
        let next_id = items.iter().map(|i| i.id).max().map_or(1, |max| max.saturating_add(1));
        Self { items, next_id }
    }

    pub fn items(&self) -> &[ScannedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&ScannedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&ScannedItem> {
        self.items.iter().find(|item| item.code == code)
    }

    /// Bump a known code or insert a new one at the front
    pub fn record_scan(&mut self, event: &ScanEvent) -> ScanOutcome {
        if let Some(item) = self.items.iter_mut().find(|item| item.code == event.code) {
            item.record_repeat(event.timestamp);
            return ScanOutcome::Incremented {
                id: item.id,
                quantity: item.quantity(),
            };
        }

        let id = self.allocate_id();
        self.items.insert(0, ScannedItem::new(id, event));
        ScanOutcome::Added(id)
    }

    /// Add `delta` to an item's quantity, removing it at zero or below
    pub fn change_quantity(&mut self, id: ItemId, delta: i64) -> QuantityChange {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return QuantityChange::NotFound;
        };
        match self.items[index].apply_delta(delta) {
            Some(quantity) => QuantityChange::Updated { id, quantity },
            None => {
                self.items.remove(index);
                QuantityChange::Removed(id)
            }
        }
    }

    pub fn remove(&mut self, id: ItemId) -> Option<ScannedItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn rows(&self) -> Vec<ItemRow> {
        let len = self.items.len();
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| ItemRow {
                number: len - index,
                item: item.clone(),
            })
            .collect()
    }

    pub fn totals(&self) -> SessionTotals {
        SessionTotals {
            unique_items: self.items.len(),
            total_quantity: self.items.iter().map(|i| u64::from(i.quantity())).sum(),
        }
    }

    fn allocate_id(&mut self) -> ItemId {
        // Ids stay unique even if the counter was seeded from odd storage
        while self.items.iter().any(|item| item.id == self.next_id) || self.next_id == 0 {
            self.next_id = self.next_id.wrapping_add(1);
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbology::Symbology;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap() + TimeDelta::seconds(secs)
    }

    fn make_scan(code: &str, secs: i64) -> ScanEvent {
        ScanEvent::new(code, Symbology::Ean13, at(secs))
    }

    #[test]
    fn test_new_codes_go_to_front() {
        let mut session = Session::new();
        session.record_scan(&make_scan("111", 0));
        session.record_scan(&make_scan("222", 1));
        session.record_scan(&make_scan("333", 2));

        let codes: Vec<_> = session.items().iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["333", "222", "111"]);
    }

    #[test]
    fn test_repeat_scan_increments_in_place() {
        let mut session = Session::new();
        let first = session.record_scan(&make_scan("111", 0));
        session.record_scan(&make_scan("222", 1));
        let again = session.record_scan(&make_scan("111", 5));

        let ScanOutcome::Added(id) = first else { panic!("expected Added") };
        assert_eq!(again, ScanOutcome::Incremented { id, quantity: 2 });
        assert_eq!(session.len(), 2);
        // Order follows first observation, not the latest one
        assert_eq!(session.items()[1].code, "111");
        let item = session.get(id).unwrap();
        assert_eq!(item.first_seen_at, at(0));
        assert_eq!(item.last_seen_at, at(5));
    }

    #[test]
    fn test_quantity_matches_scans_minus_decrements() {
        let mut session = Session::new();
        let codes = ["111", "222", "111", "333", "111", "222"];
        for (secs, code) in codes.iter().enumerate() {
            session.record_scan(&make_scan(code, secs as i64));
        }
        let id = session.find_by_code("111").unwrap().id;
        session.change_quantity(id, -1);

        assert_eq!(session.find_by_code("111").unwrap().quantity(), 2);
        assert_eq!(session.find_by_code("222").unwrap().quantity(), 2);
        assert_eq!(session.find_by_code("333").unwrap().quantity(), 1);
    }

    #[test]
    fn test_change_quantity_to_zero_removes() {
        let mut session = Session::new();
        session.record_scan(&make_scan("111", 0));
        session.record_scan(&make_scan("111", 3));
        let id = session.find_by_code("111").unwrap().id;

        let quantity = i64::from(session.get(id).unwrap().quantity());
        assert_eq!(session.change_quantity(id, -quantity), QuantityChange::Removed(id));
        assert!(session.is_empty());
    }

    #[test]
    fn test_change_quantity_below_zero_removes() {
        let mut session = Session::new();
        session.record_scan(&make_scan("111", 0));
        let id = session.items()[0].id;

        assert_eq!(session.change_quantity(id, -5), QuantityChange::Removed(id));
        assert!(session.get(id).is_none());
    }

    #[test]
    fn test_large_increment_keeps_item() {
        let mut session = Session::new();
        session.record_scan(&make_scan("111", 0));
        let id = session.items()[0].id;

        assert_eq!(
            session.change_quantity(id, i64::MAX),
            QuantityChange::Updated { id, quantity: u32::MAX }
        );
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_change_quantity_unknown_id() {
        let mut session = Session::new();
        session.record_scan(&make_scan("111", 0));
        assert_eq!(session.change_quantity(999, 1), QuantityChange::NotFound);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_removed_code_is_added_fresh() {
        let mut session = Session::new();
        session.record_scan(&make_scan("111", 0));
        let old_id = session.items()[0].id;
        session.remove(old_id);

        let outcome = session.record_scan(&make_scan("111", 10));
        let ScanOutcome::Added(new_id) = outcome else { panic!("expected Added") };
        assert_ne!(new_id, old_id);
        assert_eq!(session.get(new_id).unwrap().quantity(), 1);
    }

    #[test]
    fn test_rows_number_from_the_end() {
        let mut session = Session::new();
        session.record_scan(&make_scan("111", 0));
        session.record_scan(&make_scan("222", 1));
        session.record_scan(&make_scan("333", 2));

        let rows = session.rows();
        let numbered: Vec<_> = rows.iter().map(|r| (r.number, r.item.code.as_str())).collect();
        assert_eq!(numbered, vec![(3, "333"), (2, "222"), (1, "111")]);
    }

    #[test]
    fn test_totals() {
        let mut session = Session::new();
        assert_eq!(session.totals(), SessionTotals::default());

        session.record_scan(&make_scan("111", 0));
        session.record_scan(&make_scan("111", 3));
        session.record_scan(&make_scan("222", 4));
        assert_eq!(
            session.totals(),
            SessionTotals { unique_items: 2, total_quantity: 3 }
        );
    }

    #[test]
    fn test_from_items_dedupes_and_seeds_ids() {
        let a = ScannedItem::new(4, &make_scan("111", 0));
        let b = ScannedItem::new(9, &make_scan("222", 1));
        let dup = ScannedItem::new(12, &make_scan("111", 2));
        let mut session = Session::from_items(vec![b, a, dup]);

        assert_eq!(session.len(), 2);
        assert_eq!(session.find_by_code("111").unwrap().id, 4);

        let ScanOutcome::Added(id) = session.record_scan(&make_scan("333", 3)) else {
            panic!("expected Added")
        };
        assert_eq!(id, 10);
    }
}
