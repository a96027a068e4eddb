//! The editor: one building area with its history, tools, and activity.
//!
//! `Editor` owns all mutable state for one building session. There are no
//! globals, so independent editors can coexist (and tests can build as
//! many as they like). Every mutation follows the same order:
//!
//! 1. snapshot the scene into history,
//! 2. mutate the scene,
//! 3. log the activity.
//!
//! Statistics are recomputed from the scene whenever they are read.

use crate::activity::{ActivityEntry, ActivityLog, Clock, DISPLAYED, FixedClock};
use crate::controller::{self, Action, InteractionController};
use crate::history::HistoryStack;
use crate::input::InputEvent;
use crate::persist::{self, KeyValueStore, PersistError, SavedModel, Theme};
use brick_core::config::{ConfigError, EditorConfig, GridConfig, ToolSettings};
use brick_core::geometry;
use brick_core::id::BrickId;
use brick_core::model::{Brick, BrickColor, BrickType};
use brick_core::parse::ParseError;
use brick_core::scene::Scene;
use brick_core::stats::Statistics;
use brick_render::chart::{self, ChartData};
use kurbo::{Point, Size};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Largest batch the "add bricks" action accepts.
pub const MAX_BATCH: u32 = 100;

/// Rejected editor input.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("brick size must be positive")]
    InvalidSize,
    #[error("grid cell size must be positive")]
    InvalidCellSize,
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A request that was valid but had nothing to act on. Shown to the user
/// as an informational message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NothingToUndo,
    NothingToClear,
    NothingToSave,
    BrickNotFound(BrickId),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToUndo => f.write_str("Nothing to undo."),
            Self::NothingToClear => f.write_str("There are no bricks to clear."),
            Self::NothingToSave => f.write_str("There are no bricks to save."),
            Self::BrickNotFound(id) => write!(f, "{id} is no longer on the building area."),
        }
    }
}

/// Result of an editor operation, telling the host what to refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Unchanged,
    /// Only the drag preview moved; redraw without touching statistics.
    Preview,
    /// The scene changed; redraw and refresh statistics.
    Changed,
    /// A no-op condition to report to the user.
    Notice(Notice),
}

impl Outcome {
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_blocks: usize,
    pub used_colors: usize,
    pub saved_models: usize,
    pub type_chart: ChartData,
    pub color_chart: ChartData,
    pub recent_activity: Vec<ActivityEntry>,
}

pub struct Editor {
    config: EditorConfig,
    scene: Scene,
    history: HistoryStack,
    controller: InteractionController,
    activity: ActivityLog,
    theme: Theme,
    rng: StdRng,
    clock: Box<dyn Clock>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::build(EditorConfig::default())
    }
}

impl Editor {
    /// Build an editor from `config` after validating it.
    ///
    /// # Errors
    /// Returns [`EditorError::Config`] for a zero tool size, a zero cell
    /// size, or an unparseable tool color.
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        Ok(Self::build(config.validate()?))
    }

    fn build(config: EditorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(entropy_seed);
        Self {
            scene: Scene::new(),
            history: HistoryStack::new(config.history.depth),
            controller: InteractionController::new(),
            activity: ActivityLog::new(config.activity_capacity),
            theme: Theme::default(),
            rng: StdRng::seed_from_u64(seed),
            clock: Box::new(FixedClock::default()),
            config,
        }
    }

    /// Use `clock` for activity and save timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ─── Read access ─────────────────────────────────────────────────────

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.config.tools
    }

    pub fn grid(&self) -> GridConfig {
        self.config.grid
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn area(&self) -> Size {
        self.config.area()
    }

    /// `true` when the building area should show its placeholder.
    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    /// Fresh statistics for the current scene.
    pub fn statistics(&self) -> Statistics {
        self.scene.statistics()
    }

    /// Bricks as they should be drawn right now: the scene, with the brick
    /// being dragged shown at its preview position.
    pub fn visible_bricks(&self) -> Vec<Brick> {
        let preview = self.controller.preview();
        self.scene
            .bricks()
            .iter()
            .map(|b| match preview {
                Some((id, at)) if id == b.id => Brick {
                    x: at.x,
                    y: at.y,
                    ..b.clone()
                },
                _ => b.clone(),
            })
            .collect()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// The brick currently being dragged, if any.
    pub fn dragged_brick(&self) -> Option<BrickId> {
        self.controller.preview().map(|(id, _)| id)
    }

    // ─── Tool settings ───────────────────────────────────────────────────

    /// Set the current color from user input (`#rgb`, `#rrggbb`, `rgb()`).
    ///
    /// # Errors
    /// Returns [`EditorError::Parse`] for unparseable colors.
    pub fn set_color(&mut self, input: &str) -> Result<(), EditorError> {
        self.config.tools.color = BrickColor::parse(input)?;
        Ok(())
    }

    pub fn set_brick_type(&mut self, designation: &str) {
        self.config.tools.brick_type = BrickType::from_designation(designation);
    }

    /// # Errors
    /// Returns [`EditorError::InvalidSize`] for zero.
    pub fn set_size(&mut self, size: u32) -> Result<(), EditorError> {
        if size == 0 {
            return Err(EditorError::InvalidSize);
        }
        self.config.tools.size = size;
        Ok(())
    }

    /// Set the batch count, clamped to `1..=100`. Returns the stored value.
    pub fn set_count(&mut self, count: u32) -> u32 {
        self.config.tools.count = count.clamp(1, MAX_BATCH);
        self.config.tools.count
    }

    pub fn increment_count(&mut self) -> u32 {
        self.set_count(self.config.tools.count.saturating_add(1))
    }

    pub fn decrement_count(&mut self) -> u32 {
        self.set_count(self.config.tools.count.saturating_sub(1))
    }

    // ─── Grid & theme ────────────────────────────────────────────────────

    /// Flip grid snapping. Existing bricks are not re-snapped.
    pub fn toggle_grid(&mut self) -> bool {
        self.config.grid.enabled = !self.config.grid.enabled;
        let state = if self.config.grid.enabled { "enabled" } else { "disabled" };
        self.record(format!("Grid snap {state}."));
        self.config.grid.enabled
    }

    /// # Errors
    /// Returns [`EditorError::InvalidCellSize`] for zero.
    pub fn set_cell_size(&mut self, cell_size: u32) -> Result<(), EditorError> {
        if cell_size == 0 {
            return Err(EditorError::InvalidCellSize);
        }
        self.config.grid.cell_size = cell_size;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Apply stored grid and theme preferences, if any.
    pub fn load_preferences(&mut self, store: &dyn KeyValueStore) {
        if let Some(grid) = persist::load_grid(store) {
            self.config.grid = grid;
        }
        self.theme = persist::load_theme(store);
    }

    /// # Errors
    /// Propagates storage failures.
    pub fn save_preferences(&self, store: &mut dyn KeyValueStore) -> Result<(), EditorError> {
        persist::save_grid(store, self.config.grid)?;
        persist::save_theme(store, self.theme)?;
        Ok(())
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Route a pointer event through the interaction controller and apply
    /// whatever it decides.
    pub fn handle_event(&mut self, event: &InputEvent) -> Outcome {
        let action = self
            .controller
            .handle(event, &self.scene, self.config.grid, self.config.area());
        match action {
            Action::None => Outcome::Unchanged,
            Action::Preview { .. } => Outcome::Preview,
            Action::Place { at } => {
                self.add_brick_at(at);
                Outcome::Changed
            }
            Action::Remove { id } => self.remove_brick(id),
            Action::Move { id, to, .. } => self.commit_move(id, to),
        }
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Add `count` bricks (clamped to `1..=100`) with the current tool
    /// settings at random grid cells. One undo step reverts the batch.
    pub fn add_bricks(&mut self, count: u32) -> SmallVec<[BrickId; 8]> {
        let count = count.clamp(1, MAX_BATCH);
        let ToolSettings {
            color,
            brick_type,
            size,
            ..
        } = self.config.tools.clone();
        let extent = geometry::scaled_size(&brick_type, size);

        self.history.snapshot(&self.scene);
        let mut ids = SmallVec::new();
        for _ in 0..count {
            let at = controller::random_position(
                &mut self.rng,
                extent,
                self.config.grid,
                self.config.area(),
            );
            ids.push(
                self.scene
                    .add_brick(brick_type.clone(), color.clone(), size, at),
            );
        }
        self.record(format!("Added {count} {brick_type} bricks."));
        ids
    }

    /// Add a batch using the stored count setting.
    pub fn add_configured_batch(&mut self) -> SmallVec<[BrickId; 8]> {
        self.add_bricks(self.config.tools.count)
    }

    /// Place one brick centered on `cursor` with the current tool settings.
    pub fn add_brick_at(&mut self, cursor: Point) -> BrickId {
        let tools = self.config.tools.clone();
        let extent = geometry::scaled_size(&tools.brick_type, tools.size);
        let at = controller::click_position(cursor, extent, self.config.grid, self.config.area());

        self.history.snapshot(&self.scene);
        let id = self
            .scene
            .add_brick(tools.brick_type.clone(), tools.color, tools.size, at);
        self.record(format!("Added a {} brick by click.", tools.brick_type));
        id
    }

    pub fn remove_brick(&mut self, id: BrickId) -> Outcome {
        if !self.scene.contains(id) {
            log::debug!("editor: remove of absent {id}");
            return Outcome::Notice(Notice::BrickNotFound(id));
        }
        self.history.snapshot(&self.scene);
        self.scene.remove_brick(id);
        self.record("Removed a brick.");
        Outcome::Changed
    }

    pub fn clear_all(&mut self) -> Outcome {
        if self.scene.is_empty() {
            return Outcome::Notice(Notice::NothingToClear);
        }
        self.controller.cancel();
        self.history.snapshot(&self.scene);
        self.scene.clear();
        self.record("Cleared all bricks.");
        Outcome::Changed
    }

    /// Restore the scene from the newest history snapshot.
    pub fn undo(&mut self) -> Outcome {
        let Some(records) = self.history.undo() else {
            return Outcome::Notice(Notice::NothingToUndo);
        };
        self.controller.cancel();
        self.scene.restore(records);
        self.record("Undid the last action.");
        Outcome::Changed
    }

    fn commit_move(&mut self, id: BrickId, to: Point) -> Outcome {
        if !self.scene.contains(id) {
            return Outcome::Notice(Notice::BrickNotFound(id));
        }
        if self.config.history.snapshot_drags {
            self.history.snapshot(&self.scene);
        }
        self.scene.move_brick(id, to);
        self.record("Moved a brick.");
        Outcome::Changed
    }

    // ─── Saved models & dashboard ────────────────────────────────────────

    /// Append the current scene to the saved models.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub fn save_model(&mut self, store: &mut dyn KeyValueStore) -> Result<Outcome, EditorError> {
        if self.scene.is_empty() {
            return Ok(Outcome::Notice(Notice::NothingToSave));
        }
        let model = SavedModel {
            timestamp: self.clock.now(),
            blocks: self.scene.records(),
            statistics: self.scene.statistics(),
        };
        persist::append_model(store, model)?;
        self.record("Saved the model.");
        Ok(Outcome::Unchanged)
    }

    pub fn saved_models(&self, store: &dyn KeyValueStore) -> Vec<SavedModel> {
        persist::load_models(store)
    }

    pub fn dashboard(&self, store: &dyn KeyValueStore) -> Dashboard {
        let stats = self.scene.statistics();
        Dashboard {
            total_blocks: stats.total_blocks,
            used_colors: stats.distinct_colors(),
            saved_models: persist::load_models(store).len(),
            type_chart: chart::type_distribution(&self.scene),
            color_chart: chart::color_distribution(&self.scene),
            recent_activity: self.activity.recent(DISPLAYED).cloned().collect(),
        }
    }

    fn record(&mut self, message: impl Into<String>) {
        let timestamp = self.clock.now();
        self.activity.push(message, timestamp);
    }
}

/// Seed for hosts that don't supply one.
#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
    use rand::Rng;
    rand::rng().random()
}

/// The browser host always passes a seed; without one, placement is
/// deterministic.
#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
    log::warn!("editor: no seed supplied, using 0");
    0
}
