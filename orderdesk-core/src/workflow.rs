//! Order workflow: form input → pending order, pending order → executed.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::domain::{line_total, Order, OrderId};
use crate::error::DeskError;
use crate::store::OrderStore;

/// Raw entry-form values, exactly as typed or picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderInput {
    pub party: String,
    pub item: String,
    pub qty: String,
    /// Unit price override. `None` or blank uses the catalog price.
    pub price: Option<String>,
}

impl OrderInput {
    pub fn new(party: impl Into<String>, item: impl Into<String>, qty: impl Into<String>) -> Self {
        Self {
            party: party.into(),
            item: item.into(),
            qty: qty.into(),
            price: None,
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }
}

struct ValidInput {
    party: String,
    item: String,
    qty: u32,
    price: Decimal,
}

/// Validate the form, then append a new pending order and persist it.
///
/// Validation failures never consume an id or touch the store.
pub fn create_order(
    store: &mut OrderStore,
    catalog: &Catalog,
    clock: &dyn Clock,
    input: &OrderInput,
) -> Result<Order, DeskError> {
    let valid = validate(catalog, input)?;
    let order = Order::create(
        store.next_order_id(),
        valid.party,
        valid.item,
        valid.qty,
        valid.price,
        clock.now(),
    )
    .ok_or(DeskError::InvalidOrderInput)?;
    store.append_pending(order.clone())?;
    info!(
        order_id = %order.order_id,
        party = %order.party,
        item = %order.item,
        qty = order.qty.unwrap_or_default(),
        total = %order.total.unwrap_or_default(),
        "order saved as pending"
    );
    Ok(order)
}

/// Move the selected pending order to the executed collection.
pub fn execute_order(store: &mut OrderStore, selection: Option<&OrderId>) -> Result<Order, DeskError> {
    let id = selection.ok_or(DeskError::NoSelection)?;
    let order = store.move_to_executed(id)?;
    info!(order_id = %order.order_id, "order executed");
    Ok(order)
}

fn validate(catalog: &Catalog, input: &OrderInput) -> Result<ValidInput, DeskError> {
    let invalid = |reason: &str| {
        debug!(reason, "rejected order input");
        DeskError::InvalidOrderInput
    };

    let party = input.party.trim();
    if party.is_empty() || !catalog.is_party(party) {
        return Err(invalid("party"));
    }
    let item = input.item.trim();
    if item.is_empty() || !catalog.is_item(item) {
        return Err(invalid("item"));
    }

    let qty = match input.qty.trim().parse::<u32>() {
        Ok(qty) if qty > 0 => qty,
        _ => return Err(invalid("qty")),
    };

    let price = match input.price.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(text) => Decimal::from_str(text).map_err(|_| invalid("price"))?,
        None => catalog.price_of(item).map_err(|_| invalid("item"))?,
    };
    if price.is_sign_negative() && !price.is_zero() {
        return Err(invalid("price"));
    }
    if line_total(qty, price).is_none() {
        return Err(invalid("total"));
    }

    Ok(ValidInput {
        party: party.to_string(),
        item: item.to_string(),
        qty,
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: OrderInput) -> Result<ValidInput, DeskError> {
        validate(&Catalog::builtin(), &input)
    }

    #[test]
    fn catalog_price_used_by_default() {
        let valid = check(OrderInput::new("Aman Traders", "CORN", "3")).unwrap();
        assert_eq!(valid.price, Decimal::from(5));
        assert_eq!(valid.qty, 3);
    }

    #[test]
    fn blank_override_falls_back_to_catalog() {
        let valid = check(OrderInput::new("Aman Traders", "WHEAT", "1").with_price("  ")).unwrap();
        assert_eq!(valid.price, Decimal::from(45));
    }

    #[test]
    fn override_wins() {
        let valid = check(OrderInput::new("Aman Traders", "CORN", "2").with_price("4.75")).unwrap();
        assert_eq!(valid.price, Decimal::new(475, 2));
    }

    #[test]
    fn zero_price_allowed() {
        assert!(check(OrderInput::new("Aman Traders", "CORN", "2").with_price("0")).is_ok());
    }

    #[test]
    fn rejects_bad_input() {
        let cases = [
            OrderInput::new("", "CORN", "3"),
            OrderInput::new("Nobody", "CORN", "3"),
            OrderInput::new("Aman Traders", "", "3"),
            OrderInput::new("Aman Traders", "RICE", "3"),
            OrderInput::new("Aman Traders", "CORN", ""),
            OrderInput::new("Aman Traders", "CORN", "0"),
            OrderInput::new("Aman Traders", "CORN", "-2"),
            OrderInput::new("Aman Traders", "CORN", "2.5"),
            OrderInput::new("Aman Traders", "CORN", "3").with_price("-1"),
            OrderInput::new("Aman Traders", "CORN", "3").with_price("abc"),
            OrderInput::new("Aman Traders", "CORN", "10")
                .with_price("9999999999999999999999999999"),
        ];
        for input in cases {
            assert!(
                matches!(check(input.clone()), Err(DeskError::InvalidOrderInput)),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn overflowing_total_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let sheets = crate::store::SheetStore::new(dir.path(), crate::store::StoreFormat::Csv);
        let mut store = OrderStore::open(sheets.clone()).unwrap();
        let clock = crate::clock::FixedClock(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(14, 5, 7)
                .unwrap(),
        );
        let input = OrderInput::new("Aman Traders", "CORN", "10")
            .with_price("9999999999999999999999999999");

        let err = create_order(&mut store, &Catalog::builtin(), &clock, &input).unwrap_err();
        assert!(matches!(err, DeskError::InvalidOrderInput));
        assert!(store.pending().is_empty());
        assert_eq!(store.next_order_id(), OrderId::from_seq(1));
        assert!(OrderStore::open(sheets).unwrap().pending().is_empty());
    }
}
