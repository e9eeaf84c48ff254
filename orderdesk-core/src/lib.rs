//! OrderDesk Core: catalog, order store and order workflow.
//!
//! This crate holds everything the front-ends share:
//! - Catalog of parties and items with default unit prices
//! - Order domain types (ids, orders, pending/executed kinds)
//! - Sheet store: pending and executed collections persisted as xlsx or csv
//! - Workflow: create a pending order, execute a pending order
//! - Configuration file loading

pub mod catalog;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod store;
pub mod workflow;

pub use catalog::{Catalog, CatalogItem};
pub use clock::{Clock, FixedClock, LocalClock};
pub use config::{ConfigError, DeskConfig};
pub use domain::{line_total, Order, OrderId, OrderKind};
pub use error::{DeskError, Severity};
pub use store::{write_json_atomic, OrderStore, SheetStore, StoreFormat};
pub use workflow::{create_order, execute_order, OrderInput};
