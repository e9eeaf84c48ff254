//! Error taxonomy shared by the store and the workflow.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::OrderId;

/// Errors from the order store and order workflow.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Missing or malformed form input. Deliberately carries no field detail.
    #[error("Please enter valid order details")]
    InvalidOrderInput,

    #[error("Please select a pending order")]
    NoSelection,

    #[error("order {0} is not pending")]
    OrderNotFound(OrderId),

    #[error("unknown item '{0}'")]
    UnknownItem(String),

    #[error("failed to write {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt order store {}: {reason}", path.display())]
    CorruptStore { path: PathBuf, reason: String },
}

/// How a front-end should present an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Bad form input; keep the form and let the user retry.
    Input,
    /// Selection problem; warn, nothing changed.
    Warning,
    /// Persistence failure; show a modal dialog, in-memory state untouched.
    Fatal,
}

impl DeskError {
    pub fn severity(&self) -> Severity {
        match self {
            DeskError::InvalidOrderInput | DeskError::UnknownItem(_) => Severity::Input,
            DeskError::NoSelection | DeskError::OrderNotFound(_) => Severity::Warning,
            DeskError::StoreWrite { .. } | DeskError::CorruptStore { .. } => Severity::Fatal,
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        DeskError::StoreWrite {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: &Path, reason: impl std::fmt::Display) -> Self {
        DeskError::CorruptStore {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
