use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle for a brick placed in a [`Scene`](crate::scene::Scene).
///
/// Handles are allocated by the owning scene from a monotonic counter, so
/// two bricks with identical type/color/position still have distinct ids.
/// Ids are never reused within a scene, including across `clear()` and
/// `restore()`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrickId(u64);

impl BrickId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for BrickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "brick#{}", self.0)
    }
}

impl fmt::Display for BrickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "brick#{}", self.0)
    }
}

/// Per-scene id allocator.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub(crate) fn allocate(&mut self) -> BrickId {
        let id = BrickId(self.next);
        self.next += 1;
        id
    }
}
