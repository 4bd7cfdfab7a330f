//=========================================================================
// Cabinet Runtime
//
// Main entry point and coordinator for the cabinet.
//
// Architecture:
// ```text
//     CabinetBuilder  ──build()──>  Cabinet  ──run()──>  [Runtime]
//         │                           │
//         ├─ with_reader()            ├─ dispatcher loop (tick + select!)
//         ├─ with_display()           └─ dev window on the main thread
//         ├─ with_poll_interval()        (feature "dev-window")
//         └─ headless()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{select, tick, Receiver};
use log::info;

//=== Internal Dependencies ===============================================

use crate::config::CabinetConfig;
use crate::core::clock::{Clock, MonotonicClock};
use crate::core::dispatch::{Dispatcher, TickControl};
use crate::core::event::Event;
use crate::core::input::{ChannelReader, SysfsGpio};
use crate::core::outputs::{Actuator, LogActuator, LogDisplay, Presentation, SysfsGate};
use crate::core::platform_bridge::{EventCollector, PlatformEvent};
use crate::error::Result;

//=== CabinetBuilder ======================================================

/// Builder for configuring and constructing a [`Cabinet`].
///
/// Starts from a loaded [`CabinetConfig`]; every collaborator has a
/// production default that can be swapped out before `build()`.
///
/// # Default Collaborators
///
/// - **Reader**: [`SysfsGpio`] rooted at `config.gpio_root`
/// - **Display**: [`LogDisplay`]
/// - **Actuator**: [`SysfsGate`] when `[actuator] release_channel` is set,
///   otherwise [`LogActuator`]
/// - **Clock**: [`MonotonicClock`]
///
/// # Examples
///
/// ```no_run
/// use skeeball::{CabinetBuilder, CabinetConfig};
/// use skeeball::core::input::SimulatedChannels;
///
/// let config = CabinetConfig::load("cabinet.toml".as_ref())?;
/// CabinetBuilder::new(config)
///     .with_reader(Box::new(SimulatedChannels::new()))
///     .headless(true)
///     .build()?
///     .run()?;
/// # Ok::<(), skeeball::CabinetError>(())
/// ```
pub struct CabinetBuilder {
    config: CabinetConfig,
    reader: Option<Box<dyn ChannelReader>>,
    display: Option<Box<dyn Presentation>>,
    actuator: Option<Box<dyn Actuator>>,
    clock: Option<Box<dyn Clock>>,
    headless: bool,
}

impl CabinetBuilder {
    /// Creates a builder with production collaborators.
    pub fn new(config: CabinetConfig) -> Self {
        Self {
            config,
            reader: None,
            display: None,
            actuator: None,
            clock: None,
            headless: false,
        }
    }

    /// Replaces the raw input capability.
    pub fn with_reader(mut self, reader: Box<dyn ChannelReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn with_display(mut self, display: Box<dyn Presentation>) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_actuator(mut self, actuator: Box<dyn Actuator>) -> Self {
        self.actuator = Some(actuator);
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the `TimerTick` period.
    ///
    /// Default: `poll_interval_ms` from the config (100 ms).
    ///
    /// # Panics
    ///
    /// Panics if `interval_ms == 0`.
    pub fn with_poll_interval(mut self, interval_ms: u64) -> Self {
        assert!(interval_ms > 0, "Poll interval must be positive");
        self.config.poll_interval_ms = interval_ms;
        self
    }

    /// Sets the event queue capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Queue capacity must be positive");
        self.config.queue_capacity = capacity;
        self
    }

    /// Runs without the dev window, even when the feature is enabled.
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Registers every input and assembles the dispatcher.
    ///
    /// # Errors
    ///
    /// [`crate::CabinetError::Configuration`] if the config fails
    /// [`CabinetConfig::validate`] or an input channel is unreadable.
    pub fn build(self) -> Result<Cabinet> {
        let config = self.config;
        config.validate()?;
        info!(
            "Building cabinet (poll: {}ms, queue: {})",
            config.poll_interval_ms, config.queue_capacity
        );

        let reader: Box<dyn ChannelReader> = match self.reader {
            Some(reader) => reader,
            None => Box::new(SysfsGpio::new(&config.gpio_root)),
        };
        let display: Box<dyn Presentation> = match self.display {
            Some(display) => display,
            None => Box::new(LogDisplay::new()),
        };
        let actuator: Box<dyn Actuator> = match (self.actuator, config.actuator.release_channel) {
            (Some(actuator), _) => actuator,
            (None, Some(channel)) => Box::new(SysfsGate::new(&config.gpio_root, channel)),
            (None, None) => Box::new(LogActuator::new()),
        };
        let clock: Box<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Box::new(MonotonicClock::new()),
        };

        let registry = config.build_registry(reader)?;
        let session = config.build_session();

        let dispatcher = Dispatcher::new(registry, session, display, actuator, clock)
            .with_queue_capacity(config.queue_capacity)
            .with_post_play_timeout(config.post_play_timeout_ms)
            .with_high_score_slots(config.high_score_slots);

        Ok(Cabinet {
            dispatcher,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            headless: self.headless,
        })
    }
}

//=== Cabinet =============================================================

/// Cabinet runtime.
///
/// # Architecture
///
/// ```text
/// Cabinet
///   ├─► Dispatcher loop (worker thread with dev window, else caller)
///   │     ├─ tick(poll_interval) → TimerTick → sensor sweep
///   │     └─ PlatformEvent::Key  → press_key
///   │
///   └─► Platform (main thread, feature "dev-window")
///         └─► Window, keyboard
///
/// Communication: crossbeam channel (PlatformEvent)
/// ```
pub struct Cabinet {
    dispatcher: Dispatcher,
    poll_interval: Duration,
    headless: bool,
}

impl Cabinet {
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Gives up the runtime and returns the assembled dispatcher, for
    /// callers that drive events themselves.
    pub fn into_dispatcher(self) -> Dispatcher {
        self.dispatcher
    }

    //--- Execution --------------------------------------------------------

    /// Runs the cabinet until `Quit`.
    ///
    /// # Lifecycle (dev window)
    ///
    /// 1. Creates the platform → core channel
    /// 2. Spawns the dispatcher loop thread
    /// 3. Runs the window event loop (blocks here)
    /// 4. Window closed: channel disconnects → `Quit` → thread terminates.
    ///    `Quit` from the keyboard: thread stops, raises the shutdown flag,
    ///    window closes itself.
    ///
    /// Headless, the dispatcher loop runs on the calling thread.
    ///
    /// # Errors
    ///
    /// Fatal dispatcher errors ([`crate::CabinetError::UnreachableMode`])
    /// and platform failures.
    pub fn run(self) -> Result<()> {
        if self.headless {
            return self.run_headless();
        }
        self.run_with_window()
    }

    fn run_headless(self) -> Result<()> {
        info!("Starting cabinet (headless, tick: {:?})", self.poll_interval);
        run_dispatcher(self.dispatcher, crossbeam_channel::never(), self.poll_interval)
    }

    #[cfg(not(feature = "dev-window"))]
    fn run_with_window(self) -> Result<()> {
        log::warn!("Built without the dev-window feature, running headless");
        self.run_headless()
    }

    #[cfg(feature = "dev-window")]
    fn run_with_window(self) -> Result<()> {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;
        use std::thread;

        use crate::error::CabinetError;
        use crate::platform::Platform;

        const PLATFORM_CHANNEL_CAPACITY: usize = 128;

        info!("Starting cabinet with dev window (tick: {:?})", self.poll_interval);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx) = crossbeam_channel::bounded(PLATFORM_CHANNEL_CAPACITY);
        let shutdown = Arc::new(AtomicBool::new(false));

        //--- 2. Spawn the dispatcher thread -------------------------------
        let dispatcher = self.dispatcher;
        let poll_interval = self.poll_interval;
        let stopped = Arc::clone(&shutdown);
        let core_handle = thread::Builder::new()
            .name("dispatcher".into())
            .spawn(move || {
                let result = run_dispatcher(dispatcher, rx, poll_interval);
                stopped.store(true, Ordering::Release);
                result
            })?;

        //--- 3. Launch the platform subsystem -----------------------------
        let platform_result = Platform::new(tx, shutdown).run();
        if let Err(e) = &platform_result {
            log::error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Cleanup: wait for the dispatcher to terminate ------------
        let core_result = match core_handle.join() {
            Ok(result) => result,
            Err(e) => {
                log::error!("Dispatcher thread panicked: {:?}", e);
                Err(CabinetError::Platform("dispatcher thread panicked".into()))
            }
        };

        info!("Cabinet shutdown complete");
        core_result.and(platform_result)
    }
}

//=== Dispatcher Loop =====================================================

/// Waits for the next tick or platform message, then drains the queue.
fn run_dispatcher(
    mut dispatcher: Dispatcher,
    platform_rx: Receiver<PlatformEvent>,
    poll_interval: Duration,
) -> Result<()> {
    let ticker = tick(poll_interval);
    let mut collector = EventCollector::new(platform_rx);
    let platform = collector.receiver().clone();

    dispatcher.start();

    loop {
        let control = select! {
            recv(ticker) -> _ => {
                dispatcher.enqueue(Event::TimerTick);
                TickControl::Continue
            }
            recv(platform) -> message => collector.accept(message),
        };

        for key in collector.take_keys() {
            dispatcher.press_key(key);
        }
        if control == TickControl::Exit {
            dispatcher.enqueue(Event::Quit);
        }

        if dispatcher.process_pending()? == TickControl::Exit {
            break;
        }
    }

    info!("Dispatcher loop stopped");
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================
