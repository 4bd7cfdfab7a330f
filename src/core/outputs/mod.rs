//=========================================================================
// Cabinet Outputs
//=========================================================================
//
// Fire-and-forget collaborators driven by the dispatcher.
//
//   Presentation  score / attract screen rendering
//   Actuator      ball-release gate
//
// Neither returns anything the dispatcher acts on; failures stay inside
// the implementation and are logged there.
//
//=========================================================================

//=== Module Declarations =================================================

mod actuator;
mod display;

//=== Public API ==========================================================

pub use actuator::{LogActuator, SysfsGate};
pub use display::{LogDisplay, Screen};

//=== Internal Dependencies ===============================================

use crate::core::event::TargetId;

//=== Presentation Trait ==================================================

/// Renders cabinet state for the player.
pub trait Presentation: Send {
    /// Shows the running (or final) score.
    ///
    /// `target`/`points` describe the most recent hit. `bonus` carries
    /// extra lines for the screen; the final render uses it for the
    /// player's high-score rank.
    fn render_score(&mut self, score: u32, target: TargetId, points: u32, bonus: &[u32], is_final: bool);

    /// Shows the idle attract screen with the best scores so far.
    fn render_attract(&mut self, high_scores: &[u32]);
}

//=== Actuator Trait ======================================================

/// Ball-release hardware. Commands are assumed to always succeed.
pub trait Actuator: Send {
    fn release_balls(&mut self);
    fn hold_balls(&mut self);
}
