//! Aggregate statistics over a set of bricks.
//!
//! Statistics are never stored alongside the scene. Every call tallies
//! the bricks it is given from scratch, so the numbers cannot drift from
//! the scene they describe.

use crate::model::{BrickColor, BrickType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Totals shown in the control panel, the dashboard, and saved models.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_blocks: usize,
    pub used_colors: BTreeSet<BrickColor>,
    pub block_types: BTreeMap<BrickType, usize>,
}

impl Statistics {
    /// Full O(n) tally over `(type, color)` pairs.
    pub fn tally<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = (&'a BrickType, &'a BrickColor)>,
    {
        let mut stats = Self::default();
        for (kind, color) in items {
            stats.total_blocks += 1;
            stats.used_colors.insert(color.clone());
            *stats.block_types.entry(kind.clone()).or_insert(0) += 1;
        }
        stats
    }

    pub fn distinct_colors(&self) -> usize {
        self.used_colors.len()
    }

    pub fn count_of(&self, kind: &BrickType) -> usize {
        self.block_types.get(kind).copied().unwrap_or(0)
    }
}

/// Per-value counts in first-seen order (the order bricks were placed).
pub fn first_seen_counts<'a, T, I>(values: I) -> Vec<(T, usize)>
where
    T: Clone + PartialEq + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.clone(), 1)),
        }
    }
    counts
}
