//=========================================================================
// Mode Dispatcher
//=========================================================================
//
// Owns the cabinet mode and everything the mode handlers touch.
//
// Dispatch order for every event:
//   1. Shutdown guard    (dispatching after Quit is an invariant violation)
//   2. Global handling   Quit → Shutdown, TimerTick → sensor sweep
//   3. Mode routing      (mode, event) table, everything else discarded
//
// Mode table:
//   Attract   StartPressed     → play()       → Play
//   Play      TargetHit(t, p)  → hit_target() → Play (+ EndOfPlay once)
//   Play      EndOfPlay        → post_play()  → PostPlay
//   PostPlay  StartPressed     → play()       → Play
//   PostPlay  PostPlayTimeout  → attract()    → Attract
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{Mode, TickControl};
use crate::core::clock::Clock;
use crate::core::event::{Event, EventQueue, TargetId};
use crate::core::game::{GameSession, HighScores};
use crate::core::input::{KeyAction, KeyBindings, KeyCode, TriggerRegistry};
use crate::core::outputs::{Actuator, Presentation};
use crate::error::{CabinetError, DispatchError, Result};

//=== Defaults ============================================================

const DEFAULT_QUEUE_CAPACITY: usize = 256;
const DEFAULT_HIGH_SCORE_SLOTS: usize = 5;

//=== Dispatcher ==========================================================

/// The cabinet state machine.
///
/// Single owner of the [`Mode`], the [`GameSession`] and the event queue.
/// Producers (timer, keyboard) only ever append to the queue; the main
/// loop drains it with [`Dispatcher::process_pending`].
pub struct Dispatcher {
    mode: Mode,
    queue: EventQueue,
    registry: TriggerRegistry,
    bindings: KeyBindings,
    session: GameSession,
    high_scores: HighScores,
    display: Box<dyn Presentation>,
    actuator: Box<dyn Actuator>,
    clock: Box<dyn Clock>,

    /// Most recent scored hit, shown on the final screen.
    last_target: TargetId,
    last_points: u32,

    /// Set once `EndOfPlay` has been queued for the current game.
    end_of_play_queued: bool,

    post_play_timeout_ms: Option<u64>,
    post_play_deadline: Option<u64>,
}

impl Dispatcher {
    //--- Construction -----------------------------------------------------

    /// Creates a dispatcher in `Attract` mode.
    ///
    /// Key bindings default to [`KeyBindings::from_registry`].
    pub fn new(
        registry: TriggerRegistry,
        session: GameSession,
        display: Box<dyn Presentation>,
        actuator: Box<dyn Actuator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let bindings = KeyBindings::from_registry(&registry);
        Self {
            mode: Mode::Attract,
            queue: EventQueue::new(DEFAULT_QUEUE_CAPACITY),
            registry,
            bindings,
            session,
            high_scores: HighScores::new(DEFAULT_HIGH_SCORE_SLOTS),
            display,
            actuator,
            clock,
            last_target: 0,
            last_points: 0,
            end_of_play_queued: false,
            post_play_timeout_ms: None,
            post_play_deadline: None,
        }
    }

    /// Replaces the event queue with one of `capacity`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue = EventQueue::new(capacity);
        self
    }

    /// Returns to `Attract` this long after the final score is shown.
    pub fn with_post_play_timeout(mut self, timeout_ms: Option<u64>) -> Self {
        self.post_play_timeout_ms = timeout_ms;
        self
    }

    pub fn with_high_score_slots(mut self, slots: usize) -> Self {
        self.high_scores = HighScores::new(slots);
        self
    }

    //--- Producers --------------------------------------------------------

    /// Appends an event to the queue.
    pub fn enqueue(&mut self, event: Event) {
        self.queue.push(event);
    }

    /// Translates a dev-keyboard press into queued events.
    ///
    /// Bound sensor keys go through the sensor's debounce exactly like a
    /// ball; unbound keys become `Unhandled`.
    pub fn press_key(&mut self, key: KeyCode) {
        debug!(target: "input", "Event key: {:?}", key);

        let event = match self.bindings.resolve(key).cloned() {
            Some(KeyAction::Trigger(handle)) => {
                let now = self.clock.now_ms();
                self.registry.fire(handle, now)
            }
            Some(KeyAction::Emit(event)) => Some(event),
            None => Some(Event::Unhandled(format!("{:?}", key))),
        };

        if let Some(event) = event {
            self.queue.push(event);
        }
    }

    //--- Main Loop Entry --------------------------------------------------

    /// Renders the attract screen for the initial mode.
    pub fn start(&mut self) {
        info!(target: "dispatch", "{}: cabinet ready", self.mode);
        self.display.render_attract(self.high_scores.top());
    }

    /// Drains the queue, dispatching each event in order.
    ///
    /// Stops early on `Quit`. Recoverable dispatch errors are logged and
    /// the offending event discarded.
    ///
    /// # Errors
    ///
    /// [`CabinetError::UnreachableMode`] when a handler observes a mode it
    /// can never legally be in.
    pub fn process_pending(&mut self) -> Result<TickControl> {
        while let Some(event) = self.queue.pop() {
            match self.dispatch(event) {
                Ok(TickControl::Continue) => {}
                Ok(TickControl::Exit) => return Ok(TickControl::Exit),
                Err(DispatchError::InvalidEventPayload(reason)) => {
                    warn!(target: "dispatch", "{}: discarding event: {}", self.mode, reason);
                }
                Err(DispatchError::UnreachableMode(mode)) => {
                    return Err(CabinetError::UnreachableMode(mode));
                }
            }
        }
        Ok(TickControl::Continue)
    }

    /// Routes a single event.
    pub fn dispatch(&mut self, event: Event) -> std::result::Result<TickControl, DispatchError> {
        if self.mode == Mode::Shutdown {
            return Err(DispatchError::UnreachableMode(self.mode));
        }

        match event {
            Event::Quit => {
                info!(target: "dispatch", "{}: quit requested, shutting down", self.mode);
                self.mode = Mode::Shutdown;
                return Ok(TickControl::Exit);
            }
            Event::TimerTick => {
                self.on_timer_tick();
                return Ok(TickControl::Continue);
            }
            _ => {}
        }

        match (self.mode, event) {
            (Mode::Attract | Mode::PostPlay, Event::StartPressed) => self.play(),
            (mode, Event::TargetHit { target_id, points }) if mode.accepts_hits() => {
                self.hit_target(target_id, points)?
            }
            (Mode::Play, Event::EndOfPlay) => self.post_play(),
            (Mode::PostPlay, Event::PostPlayTimeout) => self.attract(),
            (Mode::Shutdown, _) => return Err(DispatchError::UnreachableMode(Mode::Shutdown)),
            (mode, event) => {
                debug!(target: "dispatch", "{}: ignoring {}", mode, event.kind());
            }
        }

        Ok(TickControl::Continue)
    }

    //--- Global Handlers --------------------------------------------------

    fn on_timer_tick(&mut self) {
        let now = self.clock.now_ms();
        self.queue.extend(self.registry.poll_all(now));

        if let Some(deadline) = self.post_play_deadline {
            if self.mode == Mode::PostPlay && now >= deadline {
                self.post_play_deadline = None;
                self.queue.push(Event::PostPlayTimeout);
            }
        }
    }

    //--- Mode Handlers ----------------------------------------------------

    fn play(&mut self) {
        info!(target: "dispatch", "{}: play triggered", self.mode);

        self.session.start_game();
        self.last_target = 0;
        self.last_points = 0;
        self.end_of_play_queued = false;
        self.post_play_deadline = None;

        self.actuator.release_balls();
        self.actuator.hold_balls();
        self.display.render_score(0, 0, 0, &[], false);

        self.mode = Mode::Play;
    }

    fn hit_target(&mut self, target_id: TargetId, points: u32) -> std::result::Result<(), DispatchError> {
        let expected = self.session.target_value(target_id);
        if points != expected {
            return Err(DispatchError::InvalidEventPayload(format!(
                "target {} carries {} points, table says {}",
                target_id, points, expected
            )));
        }

        info!(target: "dispatch", "{}: target {} hit", self.mode, target_id);
        let outcome = self.session.drop_ball(target_id);
        self.last_target = target_id;
        self.last_points = outcome.points_awarded;

        self.display
            .render_score(outcome.score, target_id, outcome.points_awarded, &[], false);

        if outcome.game_over && !self.end_of_play_queued {
            self.end_of_play_queued = true;
            self.queue.push(Event::EndOfPlay);
        }
        Ok(())
    }

    fn post_play(&mut self) {
        let score = self.session.score();
        info!(target: "dispatch", "{}: game over, final score {}", self.mode, score);

        let bonus: Vec<u32> = self
            .high_scores
            .record(score)
            .and_then(|rank| u32::try_from(rank).ok())
            .into_iter()
            .collect();

        self.display
            .render_score(score, self.last_target, self.last_points, &bonus, true);

        self.post_play_deadline = self
            .post_play_timeout_ms
            .map(|timeout| self.clock.now_ms().saturating_add(timeout));

        self.mode = Mode::PostPlay;
    }

    fn attract(&mut self) {
        info!(target: "dispatch", "{}: returning to attract", self.mode);
        self.display.render_attract(self.high_scores.top());
        self.mode = Mode::Attract;
    }

    //--- Accessors --------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn key_bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
