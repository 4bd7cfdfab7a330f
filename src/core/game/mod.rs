//=========================================================================
// Game Mechanics
//=========================================================================
//
// Scoring table, per-play ball bookkeeping and the high score list.
//
// The dispatcher owns one GameSession and one HighScores for the whole
// run; neither is touched from any other thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

//=== Internal Dependencies ===============================================

use crate::core::event::TargetId;

//=== Module Declarations =================================================

mod high_scores;
mod session;

//=== Public API ==========================================================

pub use high_scores::HighScores;
pub use session::{DropOutcome, GameSession};

//=== ScoringTable ========================================================

/// Points awarded per target. Targets missing from the table score 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringTable {
    points: BTreeMap<TargetId, u32>,
}

impl ScoringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard midway cabinet layout.
    pub fn midway() -> Self {
        [(0, 0), (1, 50), (2, 100), (3, 150), (4, 200), (5, 250), (6, 300), (7, 300)]
            .into_iter()
            .collect()
    }

    pub fn insert(&mut self, target_id: TargetId, points: u32) -> Option<u32> {
        self.points.insert(target_id, points)
    }

    pub fn points(&self, target_id: TargetId) -> u32 {
        self.points.get(&target_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, target_id: TargetId) -> bool {
        self.points.contains_key(&target_id)
    }

    /// `(target, points)` pairs in target order.
    pub fn iter(&self) -> impl Iterator<Item = (TargetId, u32)> + '_ {
        self.points.iter().map(|(&target, &points)| (target, points))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(TargetId, u32)> for ScoringTable {
    fn from_iter<I: IntoIterator<Item = (TargetId, u32)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
