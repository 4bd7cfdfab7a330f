//=========================================================================
// High Scores
//=========================================================================
//
// Top-N final scores for the attract screen. Lives only as long as the
// process.
//
//=========================================================================

//=== HighScores ==========================================================

/// Descending list of the best final scores.
#[derive(Debug, Clone)]
pub struct HighScores {
    slots: usize,
    scores: Vec<u32>,
}

impl HighScores {
    pub fn new(slots: usize) -> Self {
        Self {
            slots,
            scores: Vec::with_capacity(slots),
        }
    }

    /// Records a final score.
    ///
    /// Returns the 1-based rank if it made the table. Ties rank below
    /// earlier entries.
    pub fn record(&mut self, score: u32) -> Option<usize> {
        if self.slots == 0 {
            return None;
        }

        let position = self.scores.partition_point(|&existing| existing >= score);
        if position >= self.slots {
            return None;
        }

        self.scores.insert(position, score);
        self.scores.truncate(self.slots);
        Some(position + 1)
    }

    /// Scores, best first.
    pub fn top(&self) -> &[u32] {
        &self.scores
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
