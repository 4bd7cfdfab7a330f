//=========================================================================
// Cabinet Events
//=========================================================================
//
// Closed set of logical events flowing through the cabinet.
//
// Event Flow:
// ```text
//  Sensor.poll ──┐
//  Keyboard ─────┼──> EventQueue ──> Dispatcher ──> handlers
//  Timer ────────┘          ↑              │
//                           └── EndOfPlay ─┘ (synthesized)
// ```
//
// Events are immutable once created and consumed exactly once.
//
//=========================================================================

//=== Module Declarations =================================================

mod queue;

//=== Public API ==========================================================

pub use queue::EventQueue;

//=== Identifiers =========================================================

/// Logical scoring target number (0 is conventionally the catch-all).
pub type TargetId = u8;

/// Physical digital input channel index.
pub type ChannelId = u32;

//=== Event ===============================================================

/// A logical cabinet event.
///
/// Produced by sensor polling, the keyboard substitute, the timer source,
/// or the dispatcher itself (`EndOfPlay`, `PostPlayTimeout`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A ball dropped through a target.
    TargetHit { target_id: TargetId, points: u32 },

    /// The start button was pressed.
    StartPressed,

    /// Stop the main loop.
    Quit,

    /// Periodic tick that drives sensor polling.
    TimerTick,

    /// Synthesized by the play handler once the session reports game over.
    EndOfPlay,

    /// The post-play screen has been shown long enough.
    PostPlayTimeout,

    /// Raw input nobody has a binding for (kept for logging).
    Unhandled(String),
}

impl Event {
    /// Short name of the variant, without payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TargetHit { .. } => "TargetHit",
            Self::StartPressed => "StartPressed",
            Self::Quit => "Quit",
            Self::TimerTick => "TimerTick",
            Self::EndOfPlay => "EndOfPlay",
            Self::PostPlayTimeout => "PostPlayTimeout",
            Self::Unhandled(_) => "Unhandled",
        }
    }
}

//=== EventTemplate =======================================================

/// What a sensor emits when it accepts a transition.
///
/// Only input-originated events can be bound to a channel, so the
/// dispatcher-internal variants are unrepresentable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTemplate {
    Target { target_id: TargetId, points: u32 },
    Start,
}

impl EventTemplate {
    /// Builds a fresh event from this template.
    pub fn instantiate(&self) -> Event {
        match *self {
            Self::Target { target_id, points } => Event::TargetHit { target_id, points },
            Self::Start => Event::StartPressed,
        }
    }

    /// Target id carried by the template, if it is a target.
    pub fn target_id(&self) -> Option<TargetId> {
        match *self {
            Self::Target { target_id, .. } => Some(target_id),
            Self::Start => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
