use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::OrderId;

/// Which collection an order lives in.
///
/// Orders start `Pending` and move to `Executed` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    Pending,
    Executed,
}

impl OrderKind {
    pub fn label(self) -> &'static str {
        match self {
            OrderKind::Pending => "pending",
            OrderKind::Executed => "executed",
        }
    }
}

/// A sales order. `total` is fixed when the order is created.
///
/// Orders created here always carry every field. Orders read back from a
/// sheet may have blank Qty, Price, Total, date or time cells; those load as
/// `None` and are written back blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub party: String,
    pub item: String,
    pub qty: Option<u32>,
    pub price: Option<Decimal>,
    pub total: Option<Decimal>,
    pub order_date: Option<NaiveDate>,
    pub order_time: Option<NaiveTime>,
}

/// `qty * price`, or `None` when the product does not fit a `Decimal`.
pub fn line_total(qty: u32, price: Decimal) -> Option<Decimal> {
    Decimal::from(qty).checked_mul(price)
}

impl Order {
    /// Build a new order stamped at `at` (truncated to whole seconds).
    ///
    /// Returns `None` if `qty * price` overflows.
    pub fn create(
        order_id: OrderId,
        party: String,
        item: String,
        qty: u32,
        price: Decimal,
        at: NaiveDateTime,
    ) -> Option<Self> {
        let total = line_total(qty, price)?;
        let time = at.time();
        Some(Self {
            order_id,
            party,
            item,
            qty: Some(qty),
            price: Some(price),
            total: Some(total),
            order_date: Some(at.date()),
            order_time: Some(time.with_nanosecond(0).unwrap_or(time)),
        })
    }
}
