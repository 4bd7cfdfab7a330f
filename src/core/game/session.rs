//=========================================================================
// Game Session
//=========================================================================
//
// Score and ball bookkeeping for one play of standard skeeball.
//
// Ball accounting:
// ```text
//   scoring target  ──> pending_drops += 1          (ball scored, still rolling)
//   catch-all       ──> remaining_balls -= 1
//                       pending_drops   -= 1 if > 0 (scored ball drained)
//                                        else        (ball missed every hole)
//
//   unresolved = remaining_balls - pending_drops    (never negative)
//   game over  ⇔ unresolved == 0
// ```
//
// Every ball leaves through the catch-all, downstream of the scoring
// holes. The registry polls the catch-all last, so a ball seen on a
// scoring target and the catch-all in the same sweep resolves as
// "scored, then drained".
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::ScoringTable;
use crate::core::event::TargetId;

//=== DropOutcome =========================================================

/// Result of one [`GameSession::drop_ball`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    pub score: u32,
    pub points_awarded: u32,
    pub game_over: bool,
}

//=== GameSession =========================================================

/// Scoring and ball-count state for the current play.
#[derive(Debug, Clone)]
pub struct GameSession {
    table: ScoringTable,
    catch_all: TargetId,
    balls_per_game: u32,
    score: u32,
    remaining_balls: u32,
    pending_drops: u32,
    game_over: bool,
}

impl GameSession {
    //--- Construction -----------------------------------------------------

    pub fn new(table: ScoringTable, catch_all: TargetId, balls_per_game: u32) -> Self {
        info!(target: "game", "Game setup begin.");
        let session = Self {
            table,
            catch_all,
            balls_per_game,
            score: 0,
            remaining_balls: balls_per_game,
            pending_drops: 0,
            game_over: balls_per_game == 0,
        };
        info!(target: "game", "Game setup complete.");
        session
    }

    //--- Play -------------------------------------------------------------

    /// Resets the session for a fresh play.
    pub fn start_game(&mut self) {
        self.score = 0;
        self.remaining_balls = self.balls_per_game;
        self.pending_drops = 0;
        self.game_over = self.balls_per_game == 0;
        info!(target: "game", "New game: {} balls", self.balls_per_game);
    }

    /// Records a ball crossing `target_id`.
    pub fn drop_ball(&mut self, target_id: TargetId) -> DropOutcome {
        info!(target: "game", "Process drop_ball target: {}", target_id);

        let points = self.table.points(target_id);

        if target_id == self.catch_all {
            self.drain_ball();
        } else {
            self.score_ball(target_id);
        }
        self.score = self.score.saturating_add(points);

        info!(target: "game", "Score is now {} ({})", points, self.score);
        info!(
            target: "game",
            "Remaining balls: {} ({} still draining)",
            self.remaining_balls,
            self.pending_drops
        );

        DropOutcome {
            score: self.score,
            points_awarded: points,
            game_over: self.check_game_over(),
        }
    }

    /// Re-evaluates and returns `game_over`.
    pub fn check_game_over(&mut self) -> bool {
        if !self.game_over && self.unresolved_balls() == 0 {
            self.game_over = true;
            info!(target: "game", "Game is over.");
        }
        self.game_over
    }

    //--- Internal Helpers -------------------------------------------------

    fn drain_ball(&mut self) {
        if self.remaining_balls == 0 {
            warn!(target: "game", "Catch-all fired with no balls left in play");
            return;
        }
        self.remaining_balls -= 1;
        if self.pending_drops > 0 {
            self.pending_drops -= 1;
        }
    }

    fn score_ball(&mut self, target_id: TargetId) {
        if self.unresolved_balls() == 0 {
            // Points still count; the ball itself is already accounted for.
            warn!(
                target: "game",
                "Target {} hit with every ball already accounted for",
                target_id
            );
            return;
        }
        self.pending_drops += 1;
    }

    //--- Accessors --------------------------------------------------------

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_balls(&self) -> u32 {
        self.remaining_balls
    }

    pub fn pending_drops(&self) -> u32 {
        self.pending_drops
    }

    /// Balls neither scored nor drained yet.
    pub fn unresolved_balls(&self) -> u32 {
        self.remaining_balls - self.pending_drops
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn balls_per_game(&self) -> u32 {
        self.balls_per_game
    }

    pub fn catch_all(&self) -> TargetId {
        self.catch_all
    }

    /// Points the table awards for `target_id` (0 when unknown).
    pub fn target_value(&self, target_id: TargetId) -> u32 {
        self.table.points(target_id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
