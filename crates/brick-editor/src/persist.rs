//! Best-effort persistence through a key-value string store.
//!
//! The store itself is a collaborator (`localStorage` in the browser, an
//! in-memory map elsewhere). Reads fail closed: missing or malformed data
//! is treated as absent and logged, never propagated.
//!
//! | Key | Value |
//! |-----|-------|
//! | `legoModels` | JSON array of [`SavedModel`] |
//! | `theme` | `"dark"` or `"light"` |
//! | `grid` | JSON [`GridConfig`] |

use brick_core::config::GridConfig;
use brick_core::model::BrickRecord;
use brick_core::stats::Statistics;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MODELS_KEY: &str = "legoModels";
pub const THEME_KEY: &str = "theme";
pub const GRID_KEY: &str = "grid";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage rejected write to `{key}`: {reason}")]
    Storage { key: String, reason: String },
}

/// A string key-value store.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns [`PersistError::Storage`] when the backend refuses the write
    /// (e.g. quota exceeded).
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory store for native hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A saved snapshot of the building area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedModel {
    /// ISO-8601 save time.
    pub timestamp: String,
    pub blocks: Vec<BrickRecord>,
    pub statistics: Statistics,
}

/// Dashboard color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Read and decode a JSON value, treating anything unreadable as absent.
fn load_json<T: for<'de> Deserialize<'de>>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let text = store.load(key)?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("persist: ignoring malformed `{key}`: {e}");
            None
        }
    }
}

fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistError> {
    let text = serde_json::to_string(value).map_err(|source| PersistError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &text)
}

/// All saved models, oldest first. Malformed data reads as an empty list.
pub fn load_models(store: &dyn KeyValueStore) -> Vec<SavedModel> {
    load_json(store, MODELS_KEY).unwrap_or_default()
}

/// Append a model to the saved list. Returns the new number of models.
///
/// # Errors
/// Propagates encode or storage failures; the stored list is unchanged.
pub fn append_model(
    store: &mut dyn KeyValueStore,
    model: SavedModel,
) -> Result<usize, PersistError> {
    let mut models = load_models(store);
    models.push(model);
    save_json(store, MODELS_KEY, &models)?;
    log::debug!("persist: {} saved models", models.len());
    Ok(models.len())
}

/// Only the literal `"dark"` selects the dark theme.
pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    match store.load(THEME_KEY).as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}

pub fn save_theme(store: &mut dyn KeyValueStore, theme: Theme) -> Result<(), PersistError> {
    store.save(THEME_KEY, theme.as_str())
}

/// Stored grid settings. A zero cell size counts as malformed.
pub fn load_grid(store: &dyn KeyValueStore) -> Option<GridConfig> {
    load_json::<GridConfig>(store, GRID_KEY).filter(|g| {
        if g.cell_size == 0 {
            log::warn!("persist: ignoring grid with zero cell size");
        }
        g.cell_size > 0
    })
}

pub fn save_grid(store: &mut dyn KeyValueStore, grid: GridConfig) -> Result<(), PersistError> {
    save_json(store, GRID_KEY, &grid)
}
