//! Persisted order-id counter.
//!
//! Ids are never derived from row counts: a dropped or hand-deleted row would
//! otherwise hand out an id that is already taken.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Order;
use crate::error::DeskError;

use super::write_json_atomic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSequence {
    pub next_seq: u64,
}

impl Default for OrderSequence {
    fn default() -> Self {
        Self { next_seq: 1 }
    }
}

/// Load the counter. Missing or unreadable files fall back to the default;
/// `reconcile` then lifts it past every id already in use.
pub fn load(path: &Path) -> OrderSequence {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring unreadable order counter");
            OrderSequence::default()
        }),
        Err(_) => OrderSequence::default(),
    }
}

pub fn save(path: &Path, seq: OrderSequence) -> Result<(), DeskError> {
    write_json_atomic(path, &seq)
}

/// Next sequence number: never below the persisted value, never at or below
/// an id that already exists in either collection.
pub fn reconcile<'a>(persisted: u64, orders: impl IntoIterator<Item = &'a Order>) -> u64 {
    let highest = orders
        .into_iter()
        .filter_map(|o| o.order_id.seq())
        .max()
        .unwrap_or(0);
    persisted.max(highest.saturating_add(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderId;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn order(id: &str) -> Order {
        Order::create(
            OrderId::new(id),
            "Aman Traders".into(),
            "CORN".into(),
            1,
            Decimal::from(5),
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn empty_store_starts_at_one() {
        assert_eq!(reconcile(0, &[]), 1);
        assert_eq!(reconcile(1, &[]), 1);
    }

    #[test]
    fn highest_existing_id_wins() {
        let orders = vec![order("ORD2"), order("ORD9"), order("legacy")];
        assert_eq!(reconcile(3, &orders), 10);
    }

    #[test]
    fn persisted_counter_wins_over_gaps() {
        // ORD5..ORD11 were executed and then removed by hand.
        let orders = vec![order("ORD4")];
        assert_eq!(reconcile(12, &orders), 12);
    }

    #[test]
    fn load_defaults_on_missing_or_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order_seq.json");
        assert_eq!(load(&path), OrderSequence::default());

        fs::write(&path, "garbage").unwrap();
        assert_eq!(load(&path), OrderSequence::default());

        save(&path, OrderSequence { next_seq: 7 }).unwrap();
        assert_eq!(load(&path).next_seq, 7);
    }
}
