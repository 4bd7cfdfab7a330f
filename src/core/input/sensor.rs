//=========================================================================
// Sensor (Debounce Engine)
//=========================================================================
//
// One physical digital input with dead-time debounce and re-arm latch.
//
// Lines are active-low: `true` is rest (open), `false` is triggered.
//
// poll(raw, now):
// ```text
//   inside window? ──yes──> suppress
//        │no
//   latched && rest? ──yes──> re-arm (clear latch, no event)
//        │no
//   closed? ──yes──> latch, stamp time, emit template event
//        │no
//   nothing
// ```
//
// A line held closed fires once per window until released. Callers rely
// on this (a jammed target keeps reporting instead of going silent).
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::event::{ChannelId, Event, EventTemplate};

//=== Sensor ==============================================================

/// Debounced digital input channel.
///
/// Created once at startup by the [`TriggerRegistry`](super::TriggerRegistry)
/// and mutated only through [`Sensor::poll`].
#[derive(Debug, Clone)]
pub struct Sensor {
    channel: ChannelId,
    name: String,
    debounce_window_ms: u64,
    template: EventTemplate,
    latched: bool,
    /// `None` until the first accepted transition.
    latch_time_ms: Option<u64>,
}

impl Sensor {
    //--- Construction -----------------------------------------------------

    pub fn new(
        name: impl Into<String>,
        channel: ChannelId,
        template: EventTemplate,
        debounce_window_ms: u64,
    ) -> Self {
        Self {
            channel,
            name: name.into(),
            debounce_window_ms,
            template,
            latched: false,
            latch_time_ms: None,
        }
    }

    //--- Polling ----------------------------------------------------------

    /// Feeds one raw sample taken at `now_ms`.
    ///
    /// Returns an event only for a new, debounced closure.
    pub fn poll(&mut self, raw_state: bool, now_ms: u64) -> Option<Event> {
        if self.in_dead_time(now_ms) {
            return None;
        }

        if self.latched && raw_state {
            trace!(target: "input", "{} re-armed at {}ms", self.name, now_ms);
            self.latched = false;
            return None;
        }

        if !raw_state {
            self.latched = true;
            self.latch_time_ms = Some(now_ms);
            debug!(target: "input", "{} (channel {}) triggered at {}ms", self.name, self.channel, now_ms);
            return Some(self.template.instantiate());
        }

        None
    }

    /// Whether `now_ms` still falls inside the window of the last accepted
    /// transition. A clock that stepped backwards counts as inside.
    fn in_dead_time(&self, now_ms: u64) -> bool {
        match self.latch_time_ms {
            Some(latched_at) => now_ms.saturating_sub(latched_at) < self.debounce_window_ms,
            None => false,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debounce_window_ms(&self) -> u64 {
        self.debounce_window_ms
    }

    pub fn template(&self) -> EventTemplate {
        self.template
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn latch_time_ms(&self) -> Option<u64> {
        self.latch_time_ms
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
