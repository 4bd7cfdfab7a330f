//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the dev window (winit) with the dispatcher thread.
//
// Defines the contract between the platform implementation and core
// logic, so the cabinet runs identically with or without a window.
//
// Components:
// - `interface`: Event types crossing the thread boundary
// - `event_collector`: Core-side draining into key batches
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::EventCollector;
pub use interface::PlatformEvent;
