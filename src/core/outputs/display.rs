//=========================================================================
// Log Display
//=========================================================================
//
// Presentation that renders score frames as log lines (target "display").
// Keeps the last frame so the current screen can be inspected.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::Presentation;
use crate::core::event::TargetId;

//=== Screen ==============================================================

/// What the display is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Blank,
    Score {
        score: u32,
        target: TargetId,
        points: u32,
        bonus: Vec<u32>,
        is_final: bool,
    },
    Attract { high_scores: Vec<u32> },
}

//=== LogDisplay ==========================================================

pub struct LogDisplay {
    screen: Screen,
    frames: u64,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self {
            screen: Screen::Blank,
            frames: 0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation for LogDisplay {
    fn render_score(&mut self, score: u32, target: TargetId, points: u32, bonus: &[u32], is_final: bool) {
        if is_final {
            info!(target: "display", "==== Final Score ====");
            info!(target: "display", "{:>10}", score);
            if let Some(rank) = bonus.first() {
                info!(target: "display", "New high score! Rank #{}", rank);
            }
        } else {
            info!(target: "display", "Score {:>6}  (target {} +{})", score, target, points);
        }

        self.screen = Screen::Score {
            score,
            target,
            points,
            bonus: bonus.to_vec(),
            is_final,
        };
        self.frames += 1;
    }

    fn render_attract(&mut self, high_scores: &[u32]) {
        info!(target: "display", "==== SKEEBALL - press start ====");
        for (rank, score) in high_scores.iter().enumerate() {
            info!(target: "display", "{:>2}. {:>6}", rank + 1, score);
        }

        self.screen = Screen::Attract {
            high_scores: high_scores.to_vec(),
        };
        self.frames += 1;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
