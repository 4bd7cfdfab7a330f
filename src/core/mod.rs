//=========================================================================
// Cabinet Core
//
// Everything that runs on the dispatcher thread.
//
// Responsibilities:
// - Turn raw channel levels into debounced events (`input`)
// - Queue events in arrival order (`event`)
// - Route events by operating mode (`dispatch`)
// - Score plays and keep the high score list (`game`)
// - Drive the display and ball gate (`outputs`)
//
// Notes:
// The core never touches a windowing library. The dev window talks to it
// only through `platform_bridge` message passing, and the hardware only
// through the `ChannelReader` / `Actuator` / `Presentation` traits.
//
//=========================================================================

pub mod clock;
pub mod dispatch;
pub mod event;
pub mod game;
pub mod input;
pub mod outputs;
pub mod platform_bridge;
