//! Interaction controller: pointer gestures on the building area.
//!
//! Translates `InputEvent`s into `Action`s that the editor applies to the
//! scene. The controller only reads the scene (for hit testing and brick
//! extents); it never mutates it, so the editor stays in charge of
//! snapshotting history before each mutation.
//!
//! ## Gesture states
//!
//! | State | Event | Next | Action |
//! |-------|-------|------|--------|
//! | Idle | down on brick (primary) | Pressed | - |
//! | Idle | down on empty area (primary) | PressedEmpty | - |
//! | Pressed | move beyond slop | Dragging | `Preview` |
//! | Pressed | up within slop | Idle | `Remove` |
//! | Pressed | up beyond slop | Idle | `Move` (if the brick moved) |
//! | PressedEmpty | up within slop | Idle | `Place` |
//! | Dragging | move | Dragging | `Preview` |
//! | Dragging | up | Idle | `Move` (if the brick moved) |
//!
//! A press that turns into a drag is never treated as a click, so dragging
//! a brick can't remove it.

use crate::input::{Button, InputEvent};
use brick_core::config::GridConfig;
use brick_core::geometry;
use brick_core::id::BrickId;
use brick_core::scene::Scene;
use brick_render::hit::hit_test;
use kurbo::{Point, Size};
use rand::Rng;

/// Pointer travel (in pixels) below which a press still counts as a click.
pub const CLICK_SLOP: f64 = 3.0;

/// The gesture currently being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Primary button went down on a brick; not yet a drag.
    Pressed {
        id: BrickId,
        /// Pointer position at pointer-down.
        start: Point,
        /// Brick top-left at pointer-down.
        origin: Point,
    },
    /// Primary button went down on empty area.
    PressedEmpty { start: Point },
    /// A brick is being dragged. `current` is the snapped, clamped preview.
    Dragging {
        id: BrickId,
        start: Point,
        origin: Point,
        current: Point,
    },
}

/// What the editor should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    /// Click on empty area: place a brick centered on `at`.
    Place { at: Point },
    /// Click on a brick: remove it.
    Remove { id: BrickId },
    /// The drag preview moved; re-render only.
    Preview { id: BrickId, at: Point },
    /// Drag finished: commit the brick at `to`.
    Move { id: BrickId, from: Point, to: Point },
}

#[derive(Debug, Default)]
pub struct InteractionController {
    gesture: Gesture,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// The brick being dragged and its preview position.
    pub fn preview(&self) -> Option<(BrickId, Point)> {
        match self.gesture {
            Gesture::Dragging { id, current, .. } => Some((id, current)),
            _ => None,
        }
    }

    /// Abort the current gesture without producing an action.
    pub fn cancel(&mut self) {
        if self.gesture != Gesture::Idle {
            log::debug!("controller: gesture cancelled");
        }
        self.gesture = Gesture::Idle;
    }

    /// Handle one pointer event against the current scene.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        scene: &Scene,
        grid: GridConfig,
        area: Size,
    ) -> Action {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                if button != Button::Primary {
                    return Action::None;
                }
                let start = Point::new(x, y);
                self.gesture = match hit_test(scene, start).and_then(|id| scene.get(id)) {
                    Some(brick) => Gesture::Pressed {
                        id: brick.id,
                        start,
                        origin: brick.origin(),
                    },
                    None => Gesture::PressedEmpty { start },
                };
                Action::None
            }
            InputEvent::PointerMove { x, y } => {
                let p = Point::new(x, y);
                let (id, start, origin) = match self.gesture {
                    Gesture::Pressed { id, start, origin } => {
                        if (p - start).hypot() <= CLICK_SLOP {
                            return Action::None;
                        }
                        log::trace!("controller: drag start {id}");
                        (id, start, origin)
                    }
                    Gesture::Dragging {
                        id, start, origin, ..
                    } => (id, start, origin),
                    _ => return Action::None,
                };
                let Some(brick) = scene.get(id) else {
                    // Brick vanished mid-gesture (undo, clear).
                    self.gesture = Gesture::Idle;
                    return Action::None;
                };
                let current = drag_position(origin, p - start, brick.extent(), grid, area);
                self.gesture = Gesture::Dragging {
                    id,
                    start,
                    origin,
                    current,
                };
                Action::Preview { id, at: current }
            }
            InputEvent::PointerUp { x, y } => {
                let gesture = std::mem::take(&mut self.gesture);
                match gesture {
                    Gesture::Idle => Action::None,
                    Gesture::Pressed { id, start, origin } => {
                        let p = Point::new(x, y);
                        if (p - start).hypot() <= CLICK_SLOP {
                            return Action::Remove { id };
                        }
                        // Released beyond the slop with no move in between.
                        let Some(brick) = scene.get(id) else {
                            return Action::None;
                        };
                        let to = drag_position(origin, p - start, brick.extent(), grid, area);
                        if to == origin {
                            Action::None
                        } else {
                            Action::Move {
                                id,
                                from: origin,
                                to,
                            }
                        }
                    }
                    Gesture::PressedEmpty { start } => {
                        if (Point::new(x, y) - start).hypot() <= CLICK_SLOP {
                            Action::Place { at: start }
                        } else {
                            Action::None
                        }
                    }
                    Gesture::Dragging {
                        id,
                        origin,
                        current,
                        ..
                    } => {
                        if current == origin {
                            Action::None
                        } else {
                            Action::Move {
                                id,
                                from: origin,
                                to: current,
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Position of a dragged brick: pre-drag origin plus pointer delta,
/// snapped when the grid is on, then kept inside the area.
pub fn drag_position(
    origin: Point,
    delta: kurbo::Vec2,
    extent: Size,
    grid: GridConfig,
    area: Size,
) -> Point {
    let raw = origin + delta;
    let snapped = geometry::snap(raw, grid.cell_size, grid.enabled);
    geometry::clamp_to_area(snapped, extent, area)
}

/// Top-left corner for a brick placed by clicking at `cursor`.
///
/// The brick is centered on the cursor, snapped when the grid is on (or
/// floored at 0 when it is off), then kept inside the area.
pub fn click_position(cursor: Point, extent: Size, grid: GridConfig, area: Size) -> Point {
    let corner = Point::new(
        cursor.x - extent.width / 2.0,
        cursor.y - extent.height / 2.0,
    );
    let placed = if grid.enabled {
        geometry::snap(corner, grid.cell_size, true)
    } else {
        Point::new(corner.x.max(0.0), corner.y.max(0.0))
    };
    geometry::clamp_to_area(placed, extent, area)
}

/// A random grid-aligned top-left corner for batch placement.
///
/// Cells are counted with the grid cell size even when snapping is off,
/// so batch-added bricks always land on grid lines.
pub fn random_position<R: Rng + ?Sized>(
    rng: &mut R,
    extent: Size,
    grid: GridConfig,
    area: Size,
) -> Point {
    let cell = f64::from(grid.cell_size.max(1));
    let cols = geometry::cell_span(area.width, extent.width, grid.cell_size);
    let rows = geometry::cell_span(area.height, extent.height, grid.cell_size);
    let p = Point::new(
        f64::from(rng.random_range(0..cols)) * cell,
        f64::from(rng.random_range(0..rows)) * cell,
    );
    geometry::clamp_to_area(p, extent, area)
}
