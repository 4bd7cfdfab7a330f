//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use skeeball::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::config::CabinetConfig;
pub use crate::engine::{Cabinet, CabinetBuilder};
pub use crate::error::{CabinetError, DispatchError};

// State machine
pub use crate::core::dispatch::{Dispatcher, Mode, TickControl};
pub use crate::core::event::{Event, EventTemplate, TargetId};

// Inputs
pub use crate::core::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::core::input::{ChannelReader, KeyCode, SimulatedChannels, SysfsGpio, TriggerRegistry};

// Game and outputs
pub use crate::core::game::{GameSession, ScoringTable};
pub use crate::core::outputs::{Actuator, Presentation};
