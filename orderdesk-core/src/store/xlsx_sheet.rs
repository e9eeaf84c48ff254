//! Excel rendition of an order sheet: the first worksheet holds the table.
//!
//! Qty, Price and Total are numeric cells unless a money value has more digits
//! than a double can carry, in which case it is written as text. Date and time
//! are text. Date cells written by other tools are turned back into
//! `YYYY-MM-DD` text on read. Missing values are left as empty cells.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use chrono::Timelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::domain::Order;
use crate::error::DeskError;

use super::row::{format_date, format_money, format_time, parse_decimal, Table, COLUMNS};
use super::{commit_tmp, tmp_path};

pub fn read(path: &Path) -> Result<Table, DeskError> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: XlsxError| DeskError::corrupt(path, e))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| DeskError::corrupt(path, e))?,
        None => return Ok(Table::default()),
    };

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let header = rows.next().unwrap_or_default();
    Ok(Table {
        header,
        rows: rows.collect(),
    })
}

pub fn write(path: &Path, orders: &[Order]) -> Result<(), DeskError> {
    let tmp = tmp_path(path);
    if let Err(e) = write_workbook(&tmp, orders) {
        let _ = std::fs::remove_file(&tmp);
        return Err(DeskError::write(path, std::io::Error::other(e.to_string())));
    }
    commit_tmp(&tmp, path)
}

fn write_workbook(tmp: &Path, orders: &[Order]) -> Result<(), rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    for (i, order) in orders.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, order.order_id.as_str())?;
        sheet.write_string(row, 1, order.party.as_str())?;
        sheet.write_string(row, 2, order.item.as_str())?;
        if let Some(qty) = order.qty {
            sheet.write_number(row, 3, f64::from(qty))?;
        }
        if let Some(price) = order.price {
            write_money(sheet, row, 4, price)?;
        }
        if let Some(total) = order.total {
            write_money(sheet, row, 5, total)?;
        }
        if let Some(date) = order.order_date {
            sheet.write_string(row, 6, format_date(date))?;
        }
        if let Some(time) = order.order_time {
            sheet.write_string(row, 7, format_time(time))?;
        }
    }

    workbook.save(tmp)?;
    Ok(())
}

fn write_money(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Decimal,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    match exact_f64(value) {
        Some(f) => sheet.write_number(row, col, f)?,
        None => sheet.write_string(row, col, format_money(value))?,
    };
    Ok(())
}

/// `value` as a double, if reading the cell back yields the same decimal.
fn exact_f64(value: Decimal) -> Option<f64> {
    let f = value.to_f64()?;
    (parse_decimal(&format_number(f)) == Some(value)).then_some(f)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) if ts.time().num_seconds_from_midnight() == 0 => format_date(ts.date()),
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format_number(dt.as_f64()),
        },
        other => other.to_string(),
    }
}

/// Shortest text that reads back as the same number; integral values drop `.0`.
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{f}")
    }
}
