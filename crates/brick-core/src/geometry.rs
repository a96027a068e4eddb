//! Brick geometry table and grid snapping.
//!
//! Everything here is pure: no scene access, no configuration lookups.
//! Callers pass the grid settings and area size they want applied.

use crate::model::{BASE_SIZE, BrickType};
use kurbo::{Point, Size};

/// Base footprint in pixels at [`BASE_SIZE`].
///
/// Unknown designations use the 2x2 footprint.
pub fn dimensions(kind: &BrickType) -> (f64, f64) {
    match kind {
        BrickType::OneByOne => (20.0, 20.0),
        BrickType::OneByTwo => (40.0, 20.0),
        BrickType::OneByFour => (80.0, 20.0),
        BrickType::TwoByTwo => (40.0, 40.0),
        BrickType::TwoByFour => (80.0, 40.0),
        BrickType::Other(_) => (40.0, 40.0),
    }
}

/// Rendered size: base footprint × `size_factor / 40`.
pub fn scaled_size(kind: &BrickType, size_factor: u32) -> Size {
    let (w, h) = dimensions(kind);
    let scale = f64::from(size_factor) / f64::from(BASE_SIZE);
    Size::new(w * scale, h * scale)
}

/// Round a single coordinate to the nearest multiple of `cell`.
///
/// Ties round toward +∞ (`-10 / 20` snaps to `0`, `10 / 20` snaps to `20`).
pub fn snap_coord(v: f64, cell: f64) -> f64 {
    let snapped = (v / cell + 0.5).floor() * cell;
    // Normalize -0.0 so snapped positions compare and print cleanly.
    if snapped == 0.0 { 0.0 } else { snapped }
}

/// Snap a point to the grid. Returns the input unchanged when disabled.
pub fn snap(p: Point, cell_size: u32, enabled: bool) -> Point {
    if !enabled || cell_size == 0 {
        return p;
    }
    let cell = f64::from(cell_size);
    Point::new(snap_coord(p.x, cell), snap_coord(p.y, cell))
}

/// Keep a brick of `extent` fully inside `area`.
///
/// When the brick is larger than the area along an axis, it is pinned to 0
/// on that axis.
pub fn clamp_to_area(p: Point, extent: Size, area: Size) -> Point {
    let max_x = area.width - extent.width;
    let max_y = area.height - extent.height;
    Point::new(p.x.min(max_x).max(0.0), p.y.min(max_y).max(0.0))
}

/// Number of whole grid cells available for a brick's top-left corner
/// along one axis, never less than one.
pub fn cell_span(area_len: f64, brick_len: f64, cell_size: u32) -> u32 {
    let cells = ((area_len - brick_len) / f64::from(cell_size.max(1))).floor();
    if cells.is_finite() && cells >= 1.0 {
        cells as u32
    } else {
        1
    }
}
