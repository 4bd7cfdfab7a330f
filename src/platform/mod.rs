//=========================================================================
// Platform Subsystem
//
// Dev window that stands in for cabinet hardware. Bridges Winit keyboard
// events with the dispatcher thread via crossbeam.
//
// Architecture:
// ```text
//  Main Thread:                     Dispatcher Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │   ↓              │
//  │  key_mapper::key_press   │    │  press_key()     │
//  │   ↓                      │    │   ↓              │
//  │  PlatformEvent::Key ─────┼───>│  Dispatcher      │
//  │                          │    │                  │
//  │  about_to_wait           │    │  Quit            │
//  │   └─ shutdown flag? <────┼────┼─ sets flag       │
//  └──────────────────────────┘    └──────────────────┘
// ```
//
// Key Design Decisions:
// - **Presses are sent immediately**: no frame batching; the dispatcher
//   drains whatever arrived on its next wakeup
// - **Shutdown flag**: Quit is decided on the dispatcher thread; the
//   window polls the flag and closes itself
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Cabinet::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod key_mapper;

//=== External Crates =====================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::input::KeyCode;
use crate::core::platform_bridge::PlatformEvent;
use crate::error::{CabinetError, Result};

//=== Constants ===========================================================

/// How often the idle event loop wakes to check the shutdown flag.
const SHUTDOWN_POLL: Duration = Duration::from_millis(50);

//=== Platform ============================================================

/// Dev window and keyboard event forwarder.
///
/// Runs on the main thread and sends key presses to the dispatcher
/// thread. Closes when the window is closed or `shutdown` is raised.
///
/// This type is NOT Send/Sync once the window exists; it must remain on
/// the main thread.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Channel to the dispatcher thread.
    event_sender: Sender<PlatformEvent>,

    /// Raised by the dispatcher thread once it has stopped.
    shutdown: Arc<AtomicBool>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(event_sender: Sender<PlatformEvent>, shutdown: Arc<AtomicBool>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            event_sender,
            shutdown,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// [`CabinetError::Platform`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<()> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()
            .map_err(|e| CabinetError::Platform(format!("event loop creation failed: {}", e)))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| CabinetError::Platform(format!("event loop error: {}", e)))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Forwards one key press to the dispatcher thread.
    ///
    /// A disconnected channel means the dispatcher has already stopped;
    /// the press is dropped and the window stays up until closed.
    fn forward_key(&self, key: KeyCode) {
        trace!(target: "platform::input", "Key pressed: {:?}", key);

        if self.event_sender.send(PlatformEvent::Key(key)).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping {:?}", key);
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on startup (or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("Skeeball")
            .with_inner_size(LogicalSize::new(480, 320));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Dev window created: {}x{}",
                    window.inner_size().width,
                    window.inner_size().height
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(key) = key_mapper::key_press(key_event) {
                    self.forward_key(key);
                }
            }

            _ => {
                // Ignore: Resized, Focused, RedrawRequested, etc.
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shutdown.load(Ordering::Acquire) {
            info!(target: "platform", "Dispatcher stopped, closing window");
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + SHUTDOWN_POLL));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
