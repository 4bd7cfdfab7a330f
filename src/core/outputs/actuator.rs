//=========================================================================
// Ball-Release Actuators
//=========================================================================
//
//   LogActuator  records commands in the log only (no gate hardware)
//   SysfsGate    drives a GPIO output: 1 = release, 0 = hold
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::PathBuf;

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::Actuator;
use crate::core::event::ChannelId;

//=== LogActuator =========================================================

#[derive(Debug, Default)]
pub struct LogActuator {
    released: bool,
}

impl LogActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last command was a release.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Actuator for LogActuator {
    fn release_balls(&mut self) {
        info!(target: "actuator", "Releasing balls");
        self.released = true;
    }

    fn hold_balls(&mut self) {
        info!(target: "actuator", "Holding balls");
        self.released = false;
    }
}

//=== SysfsGate ===========================================================

/// Ball gate on a GPIO output exported through sysfs.
pub struct SysfsGate {
    channel: ChannelId,
    value_path: PathBuf,
}

impl SysfsGate {
    pub fn new(root: impl Into<PathBuf>, channel: ChannelId) -> Self {
        let value_path = root.into().join(format!("gpio{}", channel)).join("value");
        Self { channel, value_path }
    }

    fn write_level(&self, level: &str) {
        if let Err(e) = fs::write(&self.value_path, level) {
            warn!(
                target: "actuator",
                "Gate write to gpio{} ({}) failed: {}",
                self.channel,
                self.value_path.display(),
                e
            );
        }
    }
}

impl Actuator for SysfsGate {
    fn release_balls(&mut self) {
        info!(target: "actuator", "Releasing balls (gpio{})", self.channel);
        self.write_level("1");
    }

    fn hold_balls(&mut self) {
        info!(target: "actuator", "Holding balls (gpio{})", self.channel);
        self.write_level("0");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
