//=========================================================================
// Channel Readers
//=========================================================================
//
// Raw input capability injected into the trigger registry.
//
// Implementations:
//   SysfsGpio          Linux GPIO value files (cabinet hardware)
//   SimulatedChannels  in-memory lines (tests, headless dev mode)
//
// Both read active-low: `true` = rest, `false` = closed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::Mutex;

//=== Internal Dependencies ===============================================

use crate::core::event::ChannelId;
use crate::error::{CabinetError, Result};

//=== ChannelReader Trait =================================================

/// Reads the instantaneous state of a digital input channel.
pub trait ChannelReader: Send {
    /// Samples `channel`. `true` means the line is at rest.
    ///
    /// Mid-run failures must not be surfaced here; implementations report
    /// rest instead.
    fn read_channel(&mut self, channel: ChannelId) -> bool;

    /// Checks at startup that `channel` can be read at all.
    fn probe(&mut self, _channel: ChannelId) -> Result<()> {
        Ok(())
    }
}

//=== SysfsGpio ===========================================================

/// Reads `<root>/gpio<N>/value` files exported by the kernel GPIO sysfs
/// interface. Pins are expected to be exported as inputs with pull-ups.
pub struct SysfsGpio {
    root: PathBuf,
}

impl SysfsGpio {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn value_path(&self, channel: ChannelId) -> PathBuf {
        self.root.join(format!("gpio{}", channel)).join("value")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Parses the contents of a sysfs `value` file. Anything but `0` is rest.
fn parse_level(contents: &str) -> bool {
    contents.trim() != "0"
}

impl ChannelReader for SysfsGpio {
    fn read_channel(&mut self, channel: ChannelId) -> bool {
        match fs::read_to_string(self.value_path(channel)) {
            Ok(contents) => parse_level(&contents),
            Err(e) => {
                trace!(target: "input", "gpio{} read failed ({}), reporting rest", channel, e);
                true
            }
        }
    }

    fn probe(&mut self, channel: ChannelId) -> Result<()> {
        let path = self.value_path(channel);
        fs::read_to_string(&path).map_err(|e| {
            CabinetError::Configuration(format!(
                "input channel {} unreadable at {}: {}",
                channel,
                path.display(),
                e
            ))
        })?;
        debug!(target: "input", "gpio{} available at {}", channel, path.display());
        Ok(())
    }
}

//=== SimulatedChannels ===================================================

/// Shared in-memory input lines.
///
/// Clones share the same lines, so a test (or the keyboard substitute)
/// can hold one handle while the registry owns another. Channels that
/// were never set read as rest.
#[derive(Clone, Default)]
pub struct SimulatedChannels {
    lines: Arc<Mutex<HashMap<ChannelId, bool>>>,
}

impl SimulatedChannels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw level of `channel`.
    pub fn set(&self, channel: ChannelId, level: bool) {
        self.lines.lock().insert(channel, level);
    }

    /// Drives `channel` closed (active-low).
    pub fn close(&self, channel: ChannelId) {
        self.set(channel, false);
    }

    /// Returns `channel` to rest.
    pub fn open(&self, channel: ChannelId) {
        self.set(channel, true);
    }

    pub fn level(&self, channel: ChannelId) -> bool {
        self.lines.lock().get(&channel).copied().unwrap_or(true)
    }
}

impl ChannelReader for SimulatedChannels {
    fn read_channel(&mut self, channel: ChannelId) -> bool {
        self.level(channel)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
