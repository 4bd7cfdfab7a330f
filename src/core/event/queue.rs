//=========================================================================
// Event Queue
//=========================================================================
//
// FIFO of pending cabinet events.
//
// Producers append at the back, the dispatcher removes from the front.
// The queue is capped: under sensor flooding the oldest event is dropped
// (and logged) instead of growing without bound.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::warn;

//=== Internal Dependencies ===============================================

use super::Event;

//=== EventQueue ==========================================================

/// Bounded FIFO of [`Event`]s with drop-oldest overflow.
pub struct EventQueue {
    events: VecDeque<Event>,
    capacity: usize,
    dropped: u64,
}

impl EventQueue {
    /// Creates an empty queue holding at most `capacity` events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Queue capacity must be positive");
        Self {
            events: VecDeque::with_capacity(capacity.min(64)),
            capacity,
            dropped: 0,
        }
    }

    /// Appends an event, evicting the oldest one when full.
    ///
    /// Returns the evicted event, if any.
    pub fn push(&mut self, event: Event) -> Option<Event> {
        let evicted = if self.events.len() >= self.capacity {
            self.dropped += 1;
            let oldest = self.events.pop_front();
            warn!(
                target: "dispatch",
                "Event queue full ({}), dropping oldest {:?} (dropped so far: {})",
                self.capacity,
                oldest,
                self.dropped
            );
            oldest
        } else {
            None
        };

        self.events.push_back(event);
        evicted
    }

    /// Appends every event in order.
    pub fn extend<I: IntoIterator<Item = Event>>(&mut self, events: I) {
        for event in events {
            self.push(event);
        }
    }

    /// Removes and returns the front event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Returns the front event without removing it.
    pub fn peek(&self) -> Option<&Event> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total number of events evicted by overflow since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Iterates the pending events front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
