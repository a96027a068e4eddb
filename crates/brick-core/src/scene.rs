//! Scene state: the ordered list of placed bricks.
//!
//! The scene is the single source of truth for what is on the building
//! area. Insertion order is paint order (later bricks draw on top).
//! Overlapping bricks are allowed; the scene never merges or deduplicates.

use crate::id::{BrickId, IdAllocator};
use crate::model::{Brick, BrickColor, BrickRecord, BrickType};
use crate::stats::{self, Statistics};
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    bricks: Vec<Brick>,
    ids: IdAllocator,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from serialized records (e.g. a saved model).
    pub fn from_records(records: impl IntoIterator<Item = BrickRecord>) -> Self {
        let mut scene = Self::new();
        scene.restore(records);
        scene
    }

    /// Append a brick. `origin` must already be snapped and clamped.
    pub fn add_brick(
        &mut self,
        kind: BrickType,
        color: BrickColor,
        size: u32,
        origin: Point,
    ) -> BrickId {
        let id = self.ids.allocate();
        log::debug!(
            "scene: add {id} {kind} {color} size={size} at ({}, {})",
            origin.x,
            origin.y
        );
        self.bricks.push(Brick {
            id,
            kind,
            color,
            size,
            x: origin.x,
            y: origin.y,
        });
        id
    }

    /// Remove a brick by handle. Returns `None` if no such brick exists.
    pub fn remove_brick(&mut self, id: BrickId) -> Option<Brick> {
        let pos = self.bricks.iter().position(|b| b.id == id)?;
        log::debug!("scene: remove {id}");
        Some(self.bricks.remove(pos))
    }

    /// Move a brick's top-left corner. Returns `false` if the handle is absent.
    pub fn move_brick(&mut self, id: BrickId, origin: Point) -> bool {
        match self.get_mut(id) {
            Some(brick) => {
                brick.x = origin.x;
                brick.y = origin.y;
                log::trace!("scene: move {id} to ({}, {})", origin.x, origin.y);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        log::debug!("scene: clear {} bricks", self.bricks.len());
        self.bricks.clear();
    }

    /// Replace the whole scene with `records`. Restored bricks get fresh
    /// handles; previously issued handles become stale.
    pub fn restore(&mut self, records: impl IntoIterator<Item = BrickRecord>) {
        self.bricks.clear();
        for record in records {
            let id = self.ids.allocate();
            self.bricks.push(Brick {
                id,
                kind: record.kind,
                color: record.color,
                size: record.size,
                x: record.x,
                y: record.y,
            });
        }
        log::debug!("scene: restored {} bricks", self.bricks.len());
    }

    pub fn get(&self, id: BrickId) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == id)
    }

    fn get_mut(&mut self, id: BrickId) -> Option<&mut Brick> {
        self.bricks.iter_mut().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BrickId) -> bool {
        self.get(id).is_some()
    }

    /// Bricks in paint order.
    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn records(&self) -> Vec<BrickRecord> {
        self.bricks.iter().map(Brick::record).collect()
    }

    /// Recompute statistics from the current bricks.
    pub fn statistics(&self) -> Statistics {
        Statistics::tally(self.bricks.iter().map(|b| (&b.kind, &b.color)))
    }

    /// Per-color brick counts in first-placed order.
    pub fn color_counts(&self) -> Vec<(BrickColor, usize)> {
        stats::first_seen_counts(self.bricks.iter().map(|b| &b.color))
    }

    /// Per-type brick counts in first-placed order.
    pub fn type_counts(&self) -> Vec<(BrickType, usize)> {
        stats::first_seen_counts(self.bricks.iter().map(|b| &b.kind))
    }
}
