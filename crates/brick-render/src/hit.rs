//! Hit testing: point → brick lookup.
//!
//! Walks the scene back-to-front (last painted = topmost) to find which
//! brick is at a given building-area position.

use brick_core::id::BrickId;
use brick_core::scene::Scene;
use kurbo::{Point, Rect};

/// Find the topmost brick at `p`. Returns `None` for empty area.
///
/// Edges are inclusive on the top/left and exclusive on the bottom/right,
/// so two bricks sharing an edge never both claim the same pixel.
pub fn hit_test(scene: &Scene, p: Point) -> Option<BrickId> {
    scene
        .bricks()
        .iter()
        .rev()
        .find(|b| contains(b.bounds(), p))
        .map(|b| b.id)
}

fn contains(bounds: Rect, p: Point) -> bool {
    p.x >= bounds.x0 && p.x < bounds.x1 && p.y >= bounds.y0 && p.y < bounds.y1
}
