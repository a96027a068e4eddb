pub mod config;
pub mod geometry;
pub mod id;
pub mod model;
pub mod parse;
pub mod scene;
pub mod stats;

pub use config::{ConfigError, EditorConfig, GridConfig, HistoryConfig, ToolSettings};
pub use id::BrickId;
pub use model::*;
pub use parse::ParseError;
pub use scene::Scene;
pub use stats::Statistics;

// Re-export kurbo geometry types so downstream crates share one version
pub use kurbo::{Point, Rect, Size, Vec2};
