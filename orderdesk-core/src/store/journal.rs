//! Execute journal: records a pending → executed move while both sheets are
//! being rewritten, so a crash between the two saves can be rolled forward.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::Order;
use crate::error::DeskError;

use super::write_json_atomic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteJournal {
    /// The order being moved, exactly as it will appear in the executed sheet.
    pub order: Order,
    pub started_at: NaiveDateTime,
}

impl ExecuteJournal {
    pub fn new(order: Order) -> Self {
        Self {
            order,
            started_at: chrono::Local::now().naive_local(),
        }
    }
}

pub fn write(path: &Path, journal: &ExecuteJournal) -> Result<(), DeskError> {
    write_json_atomic(path, journal)
}

/// Read a leftover journal, if any.
pub fn read(path: &Path) -> Result<Option<ExecuteJournal>, DeskError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| DeskError::corrupt(path, e))?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| DeskError::corrupt(path, e))
}

pub fn clear(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
