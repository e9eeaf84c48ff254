//! CSV rendition of an order sheet.

use std::path::Path;

use crate::domain::Order;
use crate::error::DeskError;

use super::row::{order_to_cells, Table, COLUMNS};
use super::{commit_tmp, tmp_path};

pub fn read(path: &Path) -> Result<Table, DeskError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DeskError::corrupt(path, e))?;

    let mut records = rdr.records();
    let header = match records.next() {
        Some(record) => record
            .map_err(|e| DeskError::corrupt(path, e))?
            .iter()
            .map(|cell| cell.trim_start_matches('\u{feff}').to_string())
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| DeskError::corrupt(path, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { header, rows })
}

pub fn write(path: &Path, orders: &[Order]) -> Result<(), DeskError> {
    let tmp = tmp_path(path);
    if let Err(e) = write_rows(&tmp, orders) {
        let _ = std::fs::remove_file(&tmp);
        return Err(DeskError::write(path, e.into()));
    }
    commit_tmp(&tmp, path)
}

fn write_rows(tmp: &Path, orders: &[Order]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(tmp)?;
    wtr.write_record(COLUMNS)?;
    for order in orders {
        wtr.write_record(&order_to_cells(order))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_only_file_has_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending_orders.csv");
        write(&path, &[]).unwrap();

        let table = read(&path).unwrap();
        assert_eq!(table.header, COLUMNS.map(String::from).to_vec());
        assert!(table.rows.is_empty());
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn short_rows_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending_orders.csv");
        std::fs::write(
            &path,
            "Order Id,Party,Item,Qty,Price,Total,Order Date,Order Time\n\
             ORD1,Aman Traders,CORN,3,5,15,2024-03-09,14:05:07\n\
             ,,\n",
        )
        .unwrap();

        let table = read(&path).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].len(), 3);
        let orders = table.into_orders(&path).unwrap();
        assert_eq!(orders.len(), 1);
    }
}
