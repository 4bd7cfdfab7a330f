//=========================================================================
// Input System
//
// Turns raw digital input lines into debounced cabinet events.
//
// Responsibilities:
// - Sample physical (or simulated) channels through `ChannelReader`
// - Debounce each channel independently (`Sensor`)
// - Own all sensors and sweep them in registration order
//   (`TriggerRegistry`)
// - Translate dev-keyboard keys into the same events (`KeyBindings`)
//
// Flow:
// ```text
//   ChannelReader ──raw──> Sensor.poll ──Event──> TriggerRegistry.poll_all
//   KeyCode ──> KeyBindings ──> TriggerRegistry.fire / direct Event
// ```
//
// Notes:
// Every sensor's debounce state is touched only by its own `poll`; the
// registry is owned by the dispatcher and never shared across threads.
//
//=========================================================================

//=== Submodules ==========================================================

mod channel;
mod key;
mod key_bindings;
mod registry;
mod sensor;

//=== Public API ==========================================================

pub use channel::{ChannelReader, SimulatedChannels, SysfsGpio};
pub use key::KeyCode;
pub use key_bindings::{KeyAction, KeyBindings};
pub use registry::{SensorHandle, TriggerRegistry};
pub use sensor::Sensor;
