//! Domain types: order ids, orders, collection kinds.

pub mod ids;
pub mod order;

pub use ids::{OrderId, ORDER_ID_PREFIX};
pub use order::{line_total, Order, OrderKind};
