//! Optional TOML configuration.
//!
//! Every field has a compiled-in default, so the file may be absent or
//! contain only the keys being overridden:
//!
//! ```toml
//! data_dir = "/srv/orders"
//! format = "csv"
//!
//! [catalog]
//! parties = ["Aman Traders", "Ratan Agency"]
//!
//! [[catalog.items]]
//! name = "CORN"
//! price = "5"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::store::{SheetStore, StoreFormat};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Directory holding the order sheets and their sidecar files.
    pub data_dir: PathBuf,
    pub format: StoreFormat,
    /// Overrides `pending_orders.<ext>`.
    pub pending_file: Option<PathBuf>,
    /// Overrides `executed_orders.<ext>`.
    pub executed_file: Option<PathBuf>,
    /// Log file, relative to `data_dir` unless absolute.
    pub log_file: PathBuf,
    pub catalog: Catalog,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            format: StoreFormat::default(),
            pending_file: None,
            executed_file: None,
            log_file: PathBuf::from("orderdesk.log"),
            catalog: Catalog::builtin(),
        }
    }
}

impl DeskConfig {
    /// `<config dir>/orderdesk/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("orderdesk").join("config.toml"))
    }

    /// Load and validate `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: DeskConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let catalog = &self.catalog;
        if catalog.parties.is_empty() {
            return Err(ConfigError::Invalid("catalog has no parties".into()));
        }
        if catalog.items.is_empty() {
            return Err(ConfigError::Invalid("catalog has no items".into()));
        }
        if catalog.parties.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::Invalid("blank party name".into()));
        }

        let mut names = HashSet::new();
        for item in &catalog.items {
            if item.name.trim().is_empty() {
                return Err(ConfigError::Invalid("blank item name".into()));
            }
            if !names.insert(item.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate item '{}'", item.name)));
            }
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "negative price for item '{}'",
                    item.name
                )));
            }
        }

        let sheets = self.sheet_store();
        if sheets.path(crate::OrderKind::Pending) == sheets.path(crate::OrderKind::Executed) {
            return Err(ConfigError::Invalid(
                "pending and executed sheets must be different files".into(),
            ));
        }
        Ok(())
    }

    pub fn sheet_store(&self) -> SheetStore {
        let ext = self.format.extension();
        let pending = self
            .pending_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("pending_orders.{ext}")));
        let executed = self
            .executed_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("executed_orders.{ext}")));
        SheetStore::with_files(&self.data_dir, self.format, &pending, &executed)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }
}
