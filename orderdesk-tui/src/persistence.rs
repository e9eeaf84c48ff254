//! UI state persistence: JSON save/load across restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use orderdesk_core::write_json_atomic;

use crate::app::{AppState, Focus, Overlay};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub last_party: Option<String>,
    pub last_item: Option<String>,
    pub focus: Focus,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            last_party: None,
            last_item: None,
            focus: Focus::Form,
            welcome_dismissed: false,
        }
    }
}

/// `<config dir>/orderdesk/ui_state.json`, or the working directory when the
/// platform has no config dir.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orderdesk")
        .join("ui_state.json")
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk through a `.tmp` sibling. Creates parent
/// directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    write_json_atomic(path, state)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        last_party: app.form.party(&app.catalog).map(String::from),
        last_item: app.form.item(&app.catalog).map(String::from),
        focus: app.focus,
        welcome_dismissed: app.welcome_dismissed,
    }
}

/// Apply persisted state to AppState. Names no longer in the catalog are
/// dropped.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.form.party_idx = state
        .last_party
        .as_deref()
        .and_then(|p| app.catalog.party_index(p));
    if let Some(idx) = state
        .last_item
        .as_deref()
        .and_then(|i| app.catalog.item_index(i))
    {
        let catalog = &app.catalog;
        app.form.select_item(catalog, idx);
    }
    app.focus = state.focus;
    app.welcome_dismissed = state.welcome_dismissed;
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}
