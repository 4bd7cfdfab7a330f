//=========================================================================
// Operating Mode
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Mode ================================================================

/// Cabinet operating mode. Owned and changed only by the dispatcher.
///
/// ```text
///   Attract ──Start──> Play ──EndOfPlay──> PostPlay ──Timeout──> Attract
///                       ↑                      │
///                       └────────Start─────────┘
///   any ──Quit──> Shutdown
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Idle, drawing players in.
    #[default]
    Attract,

    /// A game is in progress.
    Play,

    /// Final score on screen.
    PostPlay,

    /// Terminal: the main loop has stopped.
    Shutdown,
}

impl Mode {
    /// Whether target hits are scored in this mode.
    pub fn accepts_hits(&self) -> bool {
        matches!(self, Self::Play)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Attract => "ATTRACT",
            Self::Play => "PLAY",
            Self::PostPlay => "POST_PLAY",
            Self::Shutdown => "SHUTDOWN",
        };
        f.write_str(name)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
