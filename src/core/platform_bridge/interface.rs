//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types.
//
// Defines the contract for communication between the dev window thread
// and the dispatcher thread.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;

//=== PlatformEvent =======================================================

/// Events sent from platform to core over the crossbeam channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// A key went down (repeats filtered on the platform side).
    Key(KeyCode),

    /// Window close requested.
    WindowClosed,
}
