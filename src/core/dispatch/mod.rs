//=========================================================================
// Mode Dispatch
//=========================================================================
//
// The cabinet state machine.
//
// Architecture:
//   Dispatcher
//     ├─ mode: Mode                 (Attract / Play / PostPlay / Shutdown)
//     ├─ queue: EventQueue          (FIFO, drained by process_pending)
//     ├─ registry: TriggerRegistry  (polled on TimerTick)
//     ├─ session: GameSession       (scored in Play)
//     └─ display / actuator         (fire-and-forget outputs)
//
// Flow:
//   process_pending() → dispatch(event) → global handling → (mode, event)
//
//=========================================================================

//=== Module Declarations =================================================

mod dispatcher;
mod mode;

//=== Public API ==========================================================

pub use dispatcher::Dispatcher;
pub use mode::Mode;

//=== TickControl =========================================================

/// Main loop control signal returned by each dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}
