//=========================================================================
// Cabinet Scenarios
//=========================================================================
//
// End-to-end runs of the dispatcher against simulated channels, a manual
// clock and recording outputs.
//
//=========================================================================

use std::sync::Arc;

use parking_lot::Mutex;

use skeeball::config::TargetConfig;
use skeeball::core::clock::ManualClock;
use skeeball::core::dispatch::{Dispatcher, Mode, TickControl};
use skeeball::core::event::{ChannelId, Event, TargetId};
use skeeball::core::input::{KeyCode, SimulatedChannels};
use skeeball::core::outputs::{Actuator, Presentation};
use skeeball::{CabinetBuilder, CabinetConfig};

//=== Test Doubles ========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Score {
        score: u32,
        target: TargetId,
        points: u32,
        bonus: Vec<u32>,
        is_final: bool,
    },
    Attract(Vec<u32>),
    Release,
    Hold,
}

/// Records every output command, shared between the display and gate.
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn last_score(&self) -> Option<Call> {
        self.calls
            .lock()
            .iter()
            .rev()
            .find(|call| matches!(call, Call::Score { .. }))
            .cloned()
    }

    fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl Presentation for Recorder {
    fn render_score(&mut self, score: u32, target: TargetId, points: u32, bonus: &[u32], is_final: bool) {
        self.calls.lock().push(Call::Score {
            score,
            target,
            points,
            bonus: bonus.to_vec(),
            is_final,
        });
    }

    fn render_attract(&mut self, high_scores: &[u32]) {
        self.calls.lock().push(Call::Attract(high_scores.to_vec()));
    }
}

impl Actuator for Recorder {
    fn release_balls(&mut self) {
        self.calls.lock().push(Call::Release);
    }

    fn hold_balls(&mut self) {
        self.calls.lock().push(Call::Hold);
    }
}

//=== Rig =================================================================

const START: ChannelId = 4;
const DEBOUNCE_MS: u64 = 100;
const TICK_MS: u64 = 150;

/// Channel wired to target `id` in the rig layout.
fn channel(id: TargetId) -> ChannelId {
    10 + ChannelId::from(id)
}

struct Rig {
    dispatcher: Dispatcher,
    channels: SimulatedChannels,
    clock: ManualClock,
    outputs: Recorder,
}

impl Rig {
    fn new(balls: u32, post_play_timeout_ms: Option<u64>) -> Self {
        let targets = [(0, 0), (1, 50), (2, 100), (3, 150), (4, 200), (5, 250), (6, 300), (7, 300)]
            .into_iter()
            .map(|(id, points)| TargetConfig { id, points, channel: channel(id) })
            .collect();

        let config = CabinetConfig {
            debounce_ms: DEBOUNCE_MS,
            balls_per_game: balls,
            start_channel: Some(START),
            post_play_timeout_ms,
            targets,
            ..CabinetConfig::default()
        };
        config.validate().unwrap();

        let channels = SimulatedChannels::new();
        let clock = ManualClock::new(1_000);
        let outputs = Recorder::default();

        let mut dispatcher = CabinetBuilder::new(config)
            .with_reader(Box::new(channels.clone()))
            .with_display(Box::new(outputs.clone()))
            .with_actuator(Box::new(outputs.clone()))
            .with_clock(Box::new(clock.clone()))
            .headless(true)
            .build()
            .unwrap()
            .into_dispatcher();
        dispatcher.start();

        Self { dispatcher, channels, clock, outputs }
    }

    /// One `TimerTick` after the clock moves forward.
    fn tick(&mut self) -> TickControl {
        self.clock.advance(TICK_MS);
        self.dispatcher.enqueue(Event::TimerTick);
        self.dispatcher.process_pending().unwrap()
    }

    /// A ball crossing `channel`: closed for one sweep, then back at rest.
    fn pulse(&mut self, channel: ChannelId) {
        self.channels.close(channel);
        self.tick();
        self.channels.open(channel);
        self.tick();
    }

    fn press_start(&mut self) {
        self.pulse(START);
    }

    fn roll(&mut self, target: TargetId) {
        self.pulse(channel(target));
    }

    fn mode(&self) -> Mode {
        self.dispatcher.mode()
    }

    fn score(&self) -> u32 {
        self.dispatcher.session().score()
    }
}

//=========================================================================
// Scenarios
//=========================================================================

#[test]
fn attract_play_post_play_play() {
    let mut rig = Rig::new(3, None);
    assert_eq!(rig.mode(), Mode::Attract);
    assert_eq!(rig.outputs.calls(), vec![Call::Attract(vec![])]);
    rig.outputs.clear();

    //--- Attract → Play ---------------------------------------------------
    rig.press_start();
    assert_eq!(rig.mode(), Mode::Play);
    assert_eq!(
        rig.outputs.calls(),
        vec![
            Call::Release,
            Call::Hold,
            Call::Score { score: 0, target: 0, points: 0, bonus: vec![], is_final: false },
        ]
    );

    //--- Three balls, each scored then drained ----------------------------
    rig.roll(3);
    rig.roll(0);
    rig.roll(6);
    rig.roll(0);
    assert_eq!(rig.mode(), Mode::Play);
    assert_eq!(rig.score(), 450);

    rig.roll(1);
    assert_eq!(rig.mode(), Mode::PostPlay);
    assert_eq!(
        rig.outputs.last_score(),
        Some(Call::Score { score: 500, target: 1, points: 50, bonus: vec![1], is_final: true })
    );

    //--- Hits after the game are ignored ----------------------------------
    rig.roll(0);
    rig.roll(7);
    assert_eq!(rig.score(), 500);
    assert_eq!(rig.mode(), Mode::PostPlay);

    //--- PostPlay → Play resets the session -------------------------------
    rig.press_start();
    assert_eq!(rig.mode(), Mode::Play);
    assert_eq!(rig.score(), 0);
    assert_eq!(rig.dispatcher.session().remaining_balls(), 3);
    assert_eq!(rig.dispatcher.high_scores().top(), &[500]);
}

#[test]
fn post_play_times_out_to_attract_with_high_scores() {
    let mut rig = Rig::new(1, Some(1_000));
    rig.press_start();
    rig.roll(5);
    assert_eq!(rig.mode(), Mode::PostPlay);

    rig.tick();
    assert_eq!(rig.mode(), Mode::PostPlay);

    let mut ticks = 0;
    while rig.mode() == Mode::PostPlay && ticks < 20 {
        rig.tick();
        ticks += 1;
    }

    assert_eq!(rig.mode(), Mode::Attract);
    assert_eq!(
        rig.outputs.calls().last(),
        Some(&Call::Attract(vec![250]))
    );
}

#[test]
fn nine_scoring_drops_end_the_game_on_the_ninth() {
    let mut rig = Rig::new(9, None);
    rig.press_start();

    for ball in 1..=8 {
        rig.roll(2);
        assert_eq!(rig.mode(), Mode::Play, "game ended early on ball {}", ball);
    }
    rig.roll(2);

    assert_eq!(rig.mode(), Mode::PostPlay);
    assert_eq!(rig.score(), 900);
}

//=========================================================================
// Ordering
//=========================================================================

#[test]
fn hit_then_catch_all_with_one_ball() {
    let mut rig = Rig::new(1, None);
    rig.press_start();

    rig.dispatcher.enqueue(Event::TargetHit { target_id: 1, points: 50 });
    rig.dispatcher.enqueue(Event::TargetHit { target_id: 0, points: 0 });
    rig.dispatcher.process_pending().unwrap();

    assert_eq!(rig.mode(), Mode::PostPlay);
    assert_eq!(rig.score(), 50);
    assert_eq!(rig.dispatcher.session().remaining_balls(), 0);
    assert_eq!(rig.dispatcher.session().pending_drops(), 0);
    assert_eq!(
        rig.outputs.last_score(),
        Some(Call::Score { score: 50, target: 0, points: 0, bonus: vec![1], is_final: true })
    );
}

#[test]
fn target_and_catch_all_in_one_sweep_count_one_ball() {
    let mut rig = Rig::new(2, None);
    rig.press_start();

    rig.channels.close(channel(4));
    rig.channels.close(channel(0));
    rig.tick();

    let session = rig.dispatcher.session();
    assert_eq!(session.score(), 200);
    assert_eq!(session.remaining_balls(), 1);
    assert_eq!(session.pending_drops(), 0);
    assert_eq!(rig.mode(), Mode::Play);
}

//=========================================================================
// Gating and Errors
//=========================================================================

#[test]
fn targets_are_ignored_in_attract() {
    let mut rig = Rig::new(3, None);
    rig.roll(7);
    rig.roll(0);

    assert_eq!(rig.mode(), Mode::Attract);
    assert_eq!(rig.score(), 0);
}

#[test]
fn start_during_play_does_not_restart() {
    let mut rig = Rig::new(3, None);
    rig.press_start();
    rig.roll(3);

    rig.press_start();

    assert_eq!(rig.mode(), Mode::Play);
    assert_eq!(rig.score(), 150);
}

#[test]
fn stuck_sensor_scores_once_per_window() {
    let mut rig = Rig::new(9, None);
    rig.press_start();

    rig.channels.close(channel(1));
    for _ in 0..4 {
        rig.tick();
    }

    // Ticks are 150ms apart with a 100ms window: one hit per tick.
    assert_eq!(rig.score(), 200);
}

#[test]
fn bad_payload_is_discarded_and_play_continues() {
    let mut rig = Rig::new(3, None);
    rig.press_start();

    rig.dispatcher.enqueue(Event::TargetHit { target_id: 2, points: 5_000 });
    rig.dispatcher.enqueue(Event::TargetHit { target_id: 2, points: 100 });
    assert_eq!(rig.dispatcher.process_pending().unwrap(), TickControl::Continue);

    assert_eq!(rig.score(), 100);
    assert_eq!(rig.mode(), Mode::Play);
}

//=========================================================================
// Keyboard
//=========================================================================

#[test]
fn keyboard_plays_a_full_game() {
    let mut rig = Rig::new(1, None);

    rig.dispatcher.press_key(KeyCode::Space);
    rig.dispatcher.process_pending().unwrap();
    assert_eq!(rig.mode(), Mode::Play);

    rig.dispatcher.press_key(KeyCode::Digit7);
    rig.dispatcher.process_pending().unwrap();
    assert_eq!(rig.mode(), Mode::PostPlay);
    assert_eq!(rig.score(), 300);

    rig.dispatcher.press_key(KeyCode::Escape);
    assert_eq!(rig.dispatcher.process_pending().unwrap(), TickControl::Exit);
    assert_eq!(rig.mode(), Mode::Shutdown);
}
