//! Font size to heading level assignment.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{HeadingCandidate, HeadingLevel};

/// Assigns heading levels to candidates.
///
/// Implementations see every candidate of a document at once and return one
/// slot per candidate, in the same order. `None` drops the candidate from
/// the outline.
pub trait LevelStrategy: Send + Sync + fmt::Debug {
    fn assign(&self, candidates: &[HeadingCandidate]) -> Vec<Option<HeadingLevel>>;
}

/// What to do with candidates whose size is below the tracked tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRange {
    /// Leave them out of the outline
    #[default]
    Drop,
    /// Give them the lowest tracked level
    Demote,
}

/// Maps the largest distinct rounded sizes, in descending order, to H1, H2, H3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopSizes {
    max_levels: usize,
    out_of_range: OutOfRange,
}

impl Default for TopSizes {
    fn default() -> Self {
        Self {
            max_levels: HeadingLevel::ALL.len(),
            out_of_range: OutOfRange::Drop,
        }
    }
}

impl TopSizes {
    /// Three tiers, smaller sizes dropped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track fewer tiers. Clamped to `1..=3`.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels.clamp(1, HeadingLevel::ALL.len());
        self
    }

    /// Set the policy for sizes below the tracked tiers.
    pub fn with_out_of_range(mut self, policy: OutOfRange) -> Self {
        self.out_of_range = policy;
        self
    }

    /// Size to level map for a candidate set.
    pub fn size_map(&self, candidates: &[HeadingCandidate]) -> BTreeMap<i32, HeadingLevel> {
        let mut sizes: Vec<i32> = candidates.iter().map(|c| c.size).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.dedup();

        sizes
            .into_iter()
            .take(self.max_levels)
            .enumerate()
            .filter_map(|(i, size)| HeadingLevel::from_index(i).map(|level| (size, level)))
            .collect()
    }
}

impl LevelStrategy for TopSizes {
    fn assign(&self, candidates: &[HeadingCandidate]) -> Vec<Option<HeadingLevel>> {
        let map = self.size_map(candidates);
        let lowest = map.values().max().copied();

        candidates
            .iter()
            .map(|c| match map.get(&c.size) {
                Some(level) => Some(*level),
                None => match self.out_of_range {
                    OutOfRange::Drop => None,
                    OutOfRange::Demote => lowest,
                },
            })
            .collect()
    }
}
