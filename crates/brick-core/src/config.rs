//! Editor configuration.
//!
//! Every field has a default matching the stock building page, so a
//! partial JSON document (or none at all) yields a usable config.

use crate::model::{BASE_SIZE, BrickColor, BrickType};
use crate::parse::ParseError;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// A config that parsed but holds values the editor cannot work with.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tool size must be positive")]
    InvalidSize,
    #[error("grid cell size must be positive")]
    InvalidCellSize,
    #[error("tool color: {0}")]
    Color(#[from] ParseError),
}

/// Grid snapping settings. Changes apply to future placements and drags
/// only; bricks already placed are not re-snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub enabled: bool,
    /// Cell edge in pixels. Must be positive.
    pub cell_size: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cell_size: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryConfig {
    /// Maximum number of undo snapshots kept.
    pub depth: usize,
    /// Snapshot the scene before committing a drag, so undo restores the
    /// pre-drag position. When `false`, drags are not undoable on their own.
    pub snapshot_drags: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            depth: 50,
            snapshot_drags: true,
        }
    }
}

/// Settings applied to bricks created from the control panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolSettings {
    pub color: BrickColor,
    pub brick_type: BrickType,
    pub size: u32,
    /// Batch size for "add bricks", 1..=100.
    pub count: u32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: BrickColor::default(),
            brick_type: BrickType::TwoByTwo,
            size: BASE_SIZE,
            count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub area_width: f64,
    pub area_height: f64,
    pub grid: GridConfig,
    pub history: HistoryConfig,
    /// Activity entries retained (the dashboard shows the newest ten).
    pub activity_capacity: usize,
    pub tools: ToolSettings,
    /// Seed for batch placement; `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            area_width: 800.0,
            area_height: 600.0,
            grid: GridConfig::default(),
            history: HistoryConfig::default(),
            activity_capacity: 20,
            tools: ToolSettings::default(),
            seed: None,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a (possibly partial) JSON config.
    ///
    /// # Errors
    /// [`ConfigError::Json`] if the text is not valid JSON for this shape,
    /// otherwise whatever [`EditorConfig::validate`] rejects.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()
    }

    /// Check the values the setters would check, normalizing the tool
    /// color to `#rrggbb`.
    ///
    /// # Errors
    /// Zero tool size, zero cell size, or an unparseable tool color.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.tools.size == 0 {
            return Err(ConfigError::InvalidSize);
        }
        if self.grid.cell_size == 0 {
            return Err(ConfigError::InvalidCellSize);
        }
        self.tools.color = BrickColor::parse(self.tools.color.as_str())?;
        Ok(self)
    }

    pub fn area(&self) -> Size {
        Size::new(self.area_width, self.area_height)
    }
}
