//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded draining and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → accept()/collect_frame() → keys → TickControl
//
// Bounded draining prevents a flood of key events from starving the
// timer tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, RecvError, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::dispatch::TickControl;
use crate::core::input::KeyCode;

//=== EventCollector ======================================================

const MAX_EVENTS_PER_FRAME: usize = 100;

/// Collects platform events into a batch of key presses.
pub struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    keys: Vec<KeyCode>,
}

impl EventCollector {
    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            keys: Vec::with_capacity(4),
        }
    }

    /// Channel to wait on in the main loop's `select!`.
    pub fn receiver(&self) -> &Receiver<PlatformEvent> {
        &self.receiver
    }

    /// Handles a message received by `select!`, then drains whatever else
    /// is already pending.
    ///
    /// A disconnected channel means the platform is gone.
    pub fn accept(&mut self, received: Result<PlatformEvent, RecvError>) -> TickControl {
        match received {
            Ok(event) => match self.handle_event(event) {
                TickControl::Exit => TickControl::Exit,
                TickControl::Continue => self.collect_frame(),
            },
            Err(RecvError) => {
                trace!(target: "platform", "Platform channel disconnected");
                TickControl::Exit
            }
        }
    }

    /// Drains pending platform events (bounded to prevent starvation).
    pub fn collect_frame(&mut self) -> TickControl {
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "platform", "Event backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Collected key presses, in arrival order.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Takes ownership of the collected keys, leaving an empty vec.
    pub fn take_keys(&mut self) -> Vec<KeyCode> {
        std::mem::take(&mut self.keys)
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Key(key) => {
                self.keys.push(key);
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
