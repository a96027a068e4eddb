//! Undo history: a bounded stack of serialized scene snapshots.
//!
//! Every mutating action pushes the scene *as it was before* the action.
//! Undo pops the newest snapshot and the caller restores it wholesale.
//! Snapshots are stored as MessagePack bytes so an entry can never alias
//! live scene data.
//!
//! A batch (e.g. "add 10 bricks") is one snapshot taken before the batch
//! starts, so one undo reverts the whole batch.

use brick_core::model::BrickRecord;
use brick_core::scene::Scene;
use std::collections::VecDeque;

/// Default maximum undo depth.
pub const DEFAULT_DEPTH: usize = 50;

pub struct HistoryStack {
    entries: VecDeque<Vec<u8>>,
    /// Maximum undo depth.
    max_depth: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl HistoryStack {
    pub fn new(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            entries: VecDeque::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Push the current scene. Evicts the oldest entry when over depth.
    pub fn snapshot(&mut self, scene: &Scene) {
        self.push_records(&scene.records());
    }

    pub fn push_records(&mut self, records: &[BrickRecord]) {
        match rmp_serde::to_vec_named(records) {
            Ok(bytes) => self.push_raw(bytes),
            Err(e) => log::warn!("history: snapshot of {} bricks not recorded: {e}", records.len()),
        }
    }

    fn push_raw(&mut self, bytes: Vec<u8>) {
        self.entries.push_back(bytes);
        if self.entries.len() > self.max_depth {
            self.entries.pop_front();
            log::trace!("history: evicted oldest snapshot");
        }
    }

    /// Pop the newest snapshot.
    ///
    /// Returns `None` when there is nothing to undo. An entry that no
    /// longer decodes is dropped and also reported as `None`.
    pub fn undo(&mut self) -> Option<Vec<BrickRecord>> {
        let bytes = self.entries.pop_back()?;
        match rmp_serde::from_slice(&bytes) {
            Ok(records) => Some(records),
            Err(e) => {
                log::warn!("history: discarding unreadable snapshot: {e}");
                None
            }
        }
    }

    /// Decoded snapshots, oldest first. Unreadable entries are skipped.
    pub fn snapshots(&self) -> impl Iterator<Item = Vec<BrickRecord>> + '_ {
        self.entries
            .iter()
            .filter_map(|bytes| rmp_serde::from_slice(bytes).ok())
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
