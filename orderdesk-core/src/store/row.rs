//! Sheet schema and the text-cell <-> `Order` mapping shared by both formats.

use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{Order, OrderId};
use crate::error::DeskError;

/// Canonical column headers, in file order.
pub const COLUMNS: [&str; 8] = [
    "Order Id",
    "Party",
    "Item",
    "Qty",
    "Price",
    "Total",
    "Order Date",
    "Order Time",
];

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Raw sheet contents: first row as header, the rest as text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse rows into orders.
    ///
    /// Columns are located by header name. Short rows are padded with empty
    /// cells and rows with no content at all are dropped.
    pub fn into_orders(self, path: &Path) -> Result<Vec<Order>, DeskError> {
        let index = column_index(&self.header, path)?;
        let mut orders = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let cells = index.map(|col| row.get(col).cloned().unwrap_or_default());
            // +2: one for the header, one for 1-based line numbers.
            orders.push(order_from_cells(&cells, i + 2, path)?);
        }
        Ok(orders)
    }
}

fn column_index(header: &[String], path: &Path) -> Result<[usize; 8], DeskError> {
    let mut index = [0usize; 8];
    for (slot, name) in index.iter_mut().zip(COLUMNS) {
        *slot = header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DeskError::corrupt(path, format!("missing column '{name}'")))?;
    }
    Ok(index)
}

/// Text cells for one order, in `COLUMNS` order.
pub fn order_to_cells(order: &Order) -> [String; 8] {
    [
        order.order_id.to_string(),
        order.party.clone(),
        order.item.clone(),
        order.qty.map(|q| q.to_string()).unwrap_or_default(),
        order.price.map(format_money).unwrap_or_default(),
        order.total.map(format_money).unwrap_or_default(),
        order.order_date.map(format_date).unwrap_or_default(),
        order.order_time.map(format_time).unwrap_or_default(),
    ]
}

pub fn format_money(value: Decimal) -> String {
    value.normalize().to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn order_from_cells(cells: &[String; 8], line: usize, path: &Path) -> Result<Order, DeskError> {
    let cell = move |col: usize| Cell {
        value: &cells[col],
        column: COLUMNS[col],
        line,
        path,
    };

    Ok(Order {
        order_id: OrderId::new(cells[0].trim()),
        party: cells[1].clone(),
        item: cells[2].clone(),
        qty: cell(3).parse(parse_qty)?,
        price: cell(4).parse(parse_decimal)?,
        total: cell(5).parse(parse_decimal)?,
        order_date: cell(6).parse(parse_date)?,
        order_time: cell(7).parse(parse_time)?,
    })
}

struct Cell<'a> {
    value: &'a str,
    column: &'a str,
    line: usize,
    path: &'a Path,
}

impl Cell<'_> {
    /// Blank cells load as missing; text that does not parse is corrupt.
    fn parse<T>(&self, parse: fn(&str) -> Option<T>) -> Result<Option<T>, DeskError> {
        if self.value.trim().is_empty() {
            return Ok(None);
        }
        parse(self.value).map(Some).ok_or_else(|| {
            DeskError::corrupt(
                self.path,
                format!("line {}: invalid {} '{}'", self.line, self.column, self.value),
            )
        })
    }
}

/// Accepts `3` as well as `3.0`, which other spreadsheet tools write for integers.
fn parse_qty(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(qty) = s.parse::<u32>() {
        return Some(qty);
    }
    let value = parse_decimal(s)?;
    if value.fract().is_zero() {
        value.to_u32()
    } else {
        None
    }
}

pub(super) fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|ts| ts.date())
        })
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S%.f"))
        .ok()
}
