//! Index of active reservations per table.
//!
//! Maps `table_id` to the ids of the reservations that still hold that table
//! (anything not cancelled), in the order the reservations were added. The
//! index is built once from the reservation list and then kept in step by
//! the status synchronizer, so looking up a clicked table's bookings never
//! scans the whole list.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ReservationIndex {
    by_table: HashMap<String, Vec<String>>,
}

impl ReservationIndex {
    /// Record `reservation_id` as active on `table_id`. Duplicates are ignored.
    pub fn insert(&mut self, table_id: &str, reservation_id: &str) {
        let ids = self.by_table.entry(table_id.to_string()).or_default();
        if !ids.iter().any(|id| id == reservation_id) {
            ids.push(reservation_id.to_string());
        }
    }

    /// Drop `reservation_id` from `table_id`. Returns whether it was present.
    pub fn remove(&mut self, table_id: &str, reservation_id: &str) -> bool {
        let Some(ids) = self.by_table.get_mut(table_id) else {
            return false;
        };
        let before = ids.len();
        ids.retain(|id| id != reservation_id);
        let removed = ids.len() != before;
        if ids.is_empty() {
            self.by_table.remove(table_id);
        }
        removed
    }

    pub fn active_ids(&self, table_id: &str) -> &[String] {
        self.by_table
            .get(table_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_keep_insertion_order_per_table() {
        let mut index = ReservationIndex::default();
        index.insert("5", "1");
        index.insert("6", "3");
        index.insert("5", "7");
        assert_eq!(index.active_ids("5"), ["1".to_string(), "7".to_string()]);
        assert!(index.remove("6", "3"));
        assert!(index.active_ids("6").is_empty());
    }

    #[test]
    fn test_remove_last_id_drops_table_entry() {
        let mut index = ReservationIndex::default();
        index.insert("2", "10");
        index.insert("2", "10");
        assert_eq!(index.active_ids("2").len(), 1);
        assert!(index.remove("2", "10"));
        assert!(index.is_empty());
        assert!(!index.remove("2", "10"));
    }

    #[test]
    fn test_unknown_table_has_no_active_ids() {
        let index = ReservationIndex::default();
        assert!(index.active_ids("missing").is_empty());
    }
}
