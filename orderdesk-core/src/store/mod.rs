//! Sheet-backed order store.
//!
//! Layout under the data directory:
//! - `pending_orders.{xlsx,csv}`: pending collection
//! - `executed_orders.{xlsx,csv}`: executed collection
//! - `order_seq.json`: persisted id counter
//! - `execute.journal.json`: present only while an execute is in flight
//!
//! Every file is written to a `.tmp` sibling and renamed into place, so a
//! single save is all-or-nothing. Nothing guards against another process
//! editing the same files; the last save wins.

pub mod counter;
pub mod csv_sheet;
pub mod journal;
pub mod order_store;
pub mod row;
pub mod xlsx_sheet;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Order, OrderKind};
use crate::error::DeskError;

pub use order_store::OrderStore;
pub use row::COLUMNS;

/// On-disk spreadsheet format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    #[default]
    Xlsx,
    Csv,
}

impl StoreFormat {
    pub fn extension(self) -> &'static str {
        match self {
            StoreFormat::Xlsx => "xlsx",
            StoreFormat::Csv => "csv",
        }
    }
}

/// Locations and format of the two order sheets and their sidecar files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetStore {
    format: StoreFormat,
    data_dir: PathBuf,
    pending_path: PathBuf,
    executed_path: PathBuf,
}

impl SheetStore {
    /// Default file names inside `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>, format: StoreFormat) -> Self {
        let data_dir = data_dir.into();
        let ext = format.extension();
        Self {
            format,
            pending_path: data_dir.join(format!("pending_orders.{ext}")),
            executed_path: data_dir.join(format!("executed_orders.{ext}")),
            data_dir,
        }
    }

    /// Explicit file names, resolved relative to `data_dir`.
    pub fn with_files(
        data_dir: impl Into<PathBuf>,
        format: StoreFormat,
        pending_file: &Path,
        executed_file: &Path,
    ) -> Self {
        let data_dir = data_dir.into();
        Self {
            format,
            pending_path: data_dir.join(pending_file),
            executed_path: data_dir.join(executed_file),
            data_dir,
        }
    }

    pub fn format(&self) -> StoreFormat {
        self.format
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path(&self, kind: OrderKind) -> &Path {
        match kind {
            OrderKind::Pending => &self.pending_path,
            OrderKind::Executed => &self.executed_path,
        }
    }

    pub fn journal_path(&self) -> PathBuf {
        self.data_dir.join("execute.journal.json")
    }

    pub fn counter_path(&self) -> PathBuf {
        self.data_dir.join("order_seq.json")
    }

    /// Load one collection.
    ///
    /// A missing sheet is created empty (header only) and persisted right away.
    pub fn load(&self, kind: OrderKind) -> Result<Vec<Order>, DeskError> {
        let path = self.path(kind);
        if !path.exists() {
            self.save(kind, &[])?;
            info!(kind = kind.label(), path = %path.display(), "initialized empty order sheet");
            return Ok(Vec::new());
        }

        let table = match self.format {
            StoreFormat::Xlsx => xlsx_sheet::read(path)?,
            StoreFormat::Csv => csv_sheet::read(path)?,
        };
        let orders = table.into_orders(path)?;
        debug!(kind = kind.label(), count = orders.len(), "loaded order sheet");
        Ok(orders)
    }

    /// Overwrite one collection with `orders`.
    pub fn save(&self, kind: OrderKind, orders: &[Order]) -> Result<(), DeskError> {
        let path = self.path(kind);
        ensure_parent(path)?;
        match self.format {
            StoreFormat::Xlsx => xlsx_sheet::write(path, orders)?,
            StoreFormat::Csv => csv_sheet::write(path, orders)?,
        }
        debug!(kind = kind.label(), count = orders.len(), "saved order sheet");
        Ok(())
    }
}

/// `{path}.tmp`, next to the target so the final rename stays on one filesystem.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("store"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomically move a fully written temp file over `path`.
pub(crate) fn commit_tmp(tmp: &Path, path: &Path) -> Result<(), DeskError> {
    fs::rename(tmp, path).map_err(|e| {
        let _ = fs::remove_file(tmp);
        DeskError::write(path, e)
    })
}

/// Serialize `value` as pretty JSON and write it atomically to `path`,
/// creating the parent directory if needed.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), DeskError> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| DeskError::write(path, std::io::Error::other(e.to_string())))?;
    let tmp = tmp_path(path);
    fs::write(&tmp, json).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        DeskError::write(path, e)
    })?;
    commit_tmp(&tmp, path)
}

pub(crate) fn ensure_parent(path: &Path) -> Result<(), DeskError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| DeskError::write(path, e))
        }
        _ => Ok(()),
    }
}
