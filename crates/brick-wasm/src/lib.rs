//! WASM bridge for Brick Studio: exposes the building engine to the page.
//!
//! Compiled via `wasm-pack build --target web`. The page script owns the
//! DOM and the chart library; everything stateful lives in [`BrickCanvas`].
//! Structured results cross the boundary as JSON strings.

mod storage;

use brick_core::id::BrickId;
use brick_core::model::{BrickColor, BrickType};
use brick_core::{EditorConfig, Point};
use brick_editor::{Button, Editor, EditorError, InputEvent, Outcome};
use brick_render::hit::hit_test;
use serde::Serialize;
use storage::LocalStorage;
use wasm_bindgen::prelude::*;

/// Result of an action as seen by the page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeJson {
    /// Scene changed: redraw bricks and refresh statistics.
    changed: bool,
    /// Only the drag preview moved.
    preview: bool,
    /// Informational message to show, if any.
    notice: Option<String>,
}

impl From<Outcome> for OutcomeJson {
    fn from(outcome: Outcome) -> Self {
        Self {
            changed: outcome.is_changed(),
            preview: matches!(outcome, Outcome::Preview),
            notice: match outcome {
                Outcome::Notice(n) => Some(n.to_string()),
                _ => None,
            },
        }
    }
}

/// One brick as the page draws it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrickView<'a> {
    id: BrickId,
    #[serde(rename = "type")]
    kind: &'a BrickType,
    color: &'a BrickColor,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    dragging: bool,
}

fn to_json<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("wasm: serialization failed: {e}");
        fallback.to_string()
    })
}

fn outcome_json(outcome: Outcome) -> String {
    to_json(&OutcomeJson::from(outcome), r#"{"changed":false,"preview":false,"notice":null}"#)
}

/// The main WASM-facing controller for one building area.
#[wasm_bindgen]
pub struct BrickCanvas {
    editor: Editor,
    store: LocalStorage,
}

#[wasm_bindgen]
impl BrickCanvas {
    /// Create a building area of the given size with default settings,
    /// then apply stored grid and theme preferences.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<BrickCanvas, JsError> {
        let config = EditorConfig {
            area_width: width,
            area_height: height,
            ..EditorConfig::default()
        };
        Self::build(config).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Create a building area from a (possibly partial) JSON config.
    /// Returns `undefined` if the JSON is malformed or holds invalid
    /// values (zero size, zero cell size, unparseable color).
    pub fn with_config(json: &str) -> Option<BrickCanvas> {
        let built = EditorConfig::from_json(json)
            .map_err(EditorError::from)
            .and_then(Self::build);
        match built {
            Ok(canvas) => Some(canvas),
            Err(e) => {
                log::warn!("wasm: rejected config: {e}");
                None
            }
        }
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Pointer down on the building area. `button` is the DOM
    /// `MouseEvent.button` code. Returns true if a redraw is needed.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64, button: i16) -> bool {
        let event = InputEvent::PointerDown {
            x,
            y,
            button: Button::from_dom(button),
        };
        self.editor.handle_event(&event) != Outcome::Unchanged
    }

    /// Pointer move. Returns true if the drag preview moved.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.editor.handle_event(&InputEvent::moved(x, y)) != Outcome::Unchanged
    }

    /// Pointer up. Returns `{"changed":bool,"preview":bool,"notice":...}`.
    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> String {
        outcome_json(self.editor.handle_event(&InputEvent::up(x, y)))
    }

    /// Id of the topmost brick under the pointer, for hover styling.
    pub fn brick_at(&self, x: f64, y: f64) -> Option<f64> {
        hit_test(self.editor.scene(), Point::new(x, y)).map(|id| id.raw() as f64)
    }

    pub fn is_dragging(&self) -> bool {
        self.editor.is_dragging()
    }

    // ─── Actions ─────────────────────────────────────────────────────────

    /// Add `count` bricks with the current tools. Returns how many were added.
    pub fn add_bricks(&mut self, count: u32) -> u32 {
        self.editor.add_bricks(count).len() as u32
    }

    /// Add a batch using the stored count.
    pub fn add_configured_batch(&mut self) -> u32 {
        self.editor.add_configured_batch().len() as u32
    }

    pub fn remove_brick(&mut self, id: f64) -> String {
        outcome_json(self.editor.remove_brick(BrickId::from_raw(id as u64)))
    }

    pub fn clear_all(&mut self) -> String {
        outcome_json(self.editor.clear_all())
    }

    pub fn undo(&mut self) -> String {
        outcome_json(self.editor.undo())
    }

    pub fn can_undo(&self) -> bool {
        self.editor.history().can_undo()
    }

    /// Save the current scene to `localStorage`.
    pub fn save_model(&mut self) -> String {
        match self.editor.save_model(&mut self.store) {
            Ok(outcome) => outcome_json(outcome),
            Err(e) => {
                log::error!("wasm: save failed: {e}");
                to_json(
                    &OutcomeJson {
                        changed: false,
                        preview: false,
                        notice: Some(e.to_string()),
                    },
                    "{}",
                )
            }
        }
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Returns false if the color is not `#rgb`, `#rrggbb` or `rgb(r, g, b)`.
    pub fn set_color(&mut self, color: &str) -> bool {
        self.editor.set_color(color).is_ok()
    }

    pub fn set_brick_type(&mut self, designation: &str) {
        self.editor.set_brick_type(designation);
    }

    pub fn set_size(&mut self, size: u32) -> bool {
        self.editor.set_size(size).is_ok()
    }

    pub fn set_count(&mut self, count: u32) -> u32 {
        self.editor.set_count(count)
    }

    pub fn increment_count(&mut self) -> u32 {
        self.editor.increment_count()
    }

    pub fn decrement_count(&mut self) -> u32 {
        self.editor.decrement_count()
    }

    /// Current tool settings as JSON.
    pub fn tools_json(&self) -> String {
        to_json(self.editor.tools(), "{}")
    }

    // ─── Grid & theme ────────────────────────────────────────────────────

    /// Flip grid snapping and persist it. Returns the new state.
    pub fn toggle_grid(&mut self) -> bool {
        let enabled = self.editor.toggle_grid();
        self.persist_preferences();
        enabled
    }

    pub fn set_cell_size(&mut self, cell_size: u32) -> bool {
        let ok = self.editor.set_cell_size(cell_size).is_ok();
        if ok {
            self.persist_preferences();
        }
        ok
    }

    pub fn grid_enabled(&self) -> bool {
        self.editor.grid().enabled
    }

    pub fn cell_size(&self) -> u32 {
        self.editor.grid().cell_size
    }

    /// Flip the theme and persist it. Returns `"light"` or `"dark"`.
    pub fn toggle_theme(&mut self) -> String {
        let theme = self.editor.toggle_theme();
        self.persist_preferences();
        theme.as_str().to_string()
    }

    pub fn theme(&self) -> String {
        self.editor.theme().as_str().to_string()
    }

    // ─── Views ───────────────────────────────────────────────────────────

    /// Bricks in paint order, with the dragged brick at its preview position.
    pub fn bricks_json(&self) -> String {
        let dragged = self.editor.dragged_brick();
        let bricks = self.editor.visible_bricks();
        let views: Vec<BrickView<'_>> = bricks
            .iter()
            .map(|b| {
                let extent = b.extent();
                BrickView {
                    id: b.id,
                    kind: &b.kind,
                    color: &b.color,
                    x: b.x,
                    y: b.y,
                    width: extent.width,
                    height: extent.height,
                    dragging: dragged == Some(b.id),
                }
            })
            .collect();
        to_json(&views, "[]")
    }

    /// `{"totalBlocks", "usedColors", "blockTypes"}` for the live scene.
    pub fn statistics_json(&self) -> String {
        to_json(&self.editor.statistics(), "{}")
    }

    pub fn is_empty(&self) -> bool {
        self.editor.is_empty()
    }

    /// Everything the dashboard page shows, including chart datasets.
    pub fn dashboard_json(&self) -> String {
        to_json(&self.editor.dashboard(&self.store), "{}")
    }

    pub fn saved_models_json(&self) -> String {
        to_json(&self.editor.saved_models(&self.store), "[]")
    }

    /// Newest-first activity entries.
    pub fn activity_json(&self) -> String {
        let entries: Vec<_> = self.editor.activity().recent(usize::MAX).collect();
        to_json(&entries, "[]")
    }
}

impl BrickCanvas {
    fn build(mut config: EditorConfig) -> Result<Self, EditorError> {
        console_error_panic_hook_setup();
        if config.seed.is_none() {
            config.seed = Some(random_seed());
        }
        let store = LocalStorage;
        let mut editor = Editor::new(config)?
            .with_clock(|| String::from(js_sys::Date::new_0().to_iso_string()));
        editor.load_preferences(&store);
        Ok(Self { editor, store })
    }

    fn persist_preferences(&mut self) {
        if let Err(e) = self.editor.save_preferences(&mut self.store) {
            log::warn!("wasm: preferences not saved: {e}");
        }
    }
}

/// Seed for batch placement drawn from `Math.random`.
fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (hi << 32) | lo
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Brick Studio WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
