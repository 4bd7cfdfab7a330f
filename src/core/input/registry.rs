//=========================================================================
// Trigger Registry
//=========================================================================
//
// Owns every Sensor and the raw input capability they are sampled from.
//
// Architecture:
//   register(name, channel, template) → sensors: Vec<Sensor>
//                                         ├─ by_channel: HashMap
//                                         ├─ by_name:    HashMap
//                                         └─ by_target:  HashMap
//
//   poll_all(now) → one read per sensor, registration order → Events
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::info;

//=== Internal Dependencies ===============================================

use super::channel::ChannelReader;
use super::sensor::Sensor;
use crate::core::event::{ChannelId, Event, EventTemplate, TargetId};
use crate::error::{CabinetError, Result};

//=== SensorHandle ========================================================

/// Stable reference to a registered sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorHandle(usize);

impl SensorHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

//=== TriggerRegistry =====================================================

/// Maps logical names, targets and channels to debounced sensors.
pub struct TriggerRegistry {
    reader: Box<dyn ChannelReader>,
    sensors: Vec<Sensor>,
    by_channel: HashMap<ChannelId, SensorHandle>,
    by_name: HashMap<String, SensorHandle>,
    by_target: HashMap<TargetId, SensorHandle>,
    start: Option<SensorHandle>,
    default_window_ms: u64,
}

impl TriggerRegistry {
    //--- Construction -----------------------------------------------------

    /// Creates an empty registry sampling through `reader`.
    ///
    /// `default_window_ms` applies to sensors registered with
    /// [`TriggerRegistry::register`].
    pub fn new(reader: Box<dyn ChannelReader>, default_window_ms: u64) -> Self {
        Self {
            reader,
            sensors: Vec::new(),
            by_channel: HashMap::new(),
            by_name: HashMap::new(),
            by_target: HashMap::new(),
            start: None,
            default_window_ms,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Binds a sensor to `channel` with the default debounce window.
    ///
    /// # Errors
    ///
    /// [`CabinetError::Configuration`] if the channel, name or target is
    /// already bound, or the channel cannot be read.
    pub fn register(
        &mut self,
        logical_name: &str,
        channel: ChannelId,
        template: EventTemplate,
    ) -> Result<SensorHandle> {
        self.register_with_window(logical_name, channel, template, self.default_window_ms)
    }

    /// Binds a sensor to `channel` with an explicit debounce window.
    pub fn register_with_window(
        &mut self,
        logical_name: &str,
        channel: ChannelId,
        template: EventTemplate,
        debounce_window_ms: u64,
    ) -> Result<SensorHandle> {
        if let Some(existing) = self.by_channel.get(&channel) {
            return Err(CabinetError::Configuration(format!(
                "channel {} already bound to '{}'",
                channel,
                self.sensors[existing.0].name()
            )));
        }
        if self.by_name.contains_key(logical_name) {
            return Err(CabinetError::Configuration(format!(
                "sensor name '{}' registered twice",
                logical_name
            )));
        }
        match template {
            EventTemplate::Target { target_id, .. } if self.by_target.contains_key(&target_id) => {
                return Err(CabinetError::Configuration(format!(
                    "target {} bound to more than one channel",
                    target_id
                )));
            }
            EventTemplate::Start if self.start.is_some() => {
                return Err(CabinetError::Configuration(
                    "start button bound to more than one channel".into(),
                ));
            }
            _ => {}
        }

        self.reader.probe(channel)?;

        let handle = SensorHandle(self.sensors.len());
        self.sensors.push(Sensor::new(logical_name, channel, template, debounce_window_ms));
        self.by_channel.insert(channel, handle);
        self.by_name.insert(logical_name.to_string(), handle);
        match template {
            EventTemplate::Target { target_id, .. } => {
                self.by_target.insert(target_id, handle);
            }
            EventTemplate::Start => self.start = Some(handle),
        }

        info!(
            target: "input",
            "Configuring {} on channel {} ({}ms debounce)",
            logical_name,
            channel,
            debounce_window_ms
        );
        Ok(handle)
    }

    //--- Polling ----------------------------------------------------------

    /// Sweeps every sensor once, in registration order.
    ///
    /// The returned iterator is lazy: each channel is read when the
    /// iterator reaches it. Call again for the next sweep.
    pub fn poll_all(&mut self, now_ms: u64) -> impl Iterator<Item = Event> + '_ {
        let reader = &mut self.reader;
        self.sensors.iter_mut().filter_map(move |sensor| {
            let raw = reader.read_channel(sensor.channel());
            sensor.poll(raw, now_ms)
        })
    }

    /// Feeds a synthetic closure to one sensor, through its debounce.
    ///
    /// Used by the keyboard substitute so a key press behaves exactly like
    /// a ball crossing the target.
    pub fn fire(&mut self, handle: SensorHandle, now_ms: u64) -> Option<Event> {
        self.sensors.get_mut(handle.0)?.poll(false, now_ms)
    }

    //--- Lookup -----------------------------------------------------------

    pub fn sensor(&self, handle: SensorHandle) -> Option<&Sensor> {
        self.sensors.get(handle.0)
    }

    pub fn by_name(&self, logical_name: &str) -> Option<SensorHandle> {
        self.by_name.get(logical_name).copied()
    }

    pub fn by_channel(&self, channel: ChannelId) -> Option<SensorHandle> {
        self.by_channel.get(&channel).copied()
    }

    pub fn by_target(&self, target_id: TargetId) -> Option<SensorHandle> {
        self.by_target.get(&target_id).copied()
    }

    pub fn start_button(&self) -> Option<SensorHandle> {
        self.start
    }

    /// Sensors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SensorHandle, &Sensor)> {
        self.sensors
            .iter()
            .enumerate()
            .map(|(index, sensor)| (SensorHandle(index), sensor))
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::channel::SimulatedChannels;

    fn target(target_id: TargetId, points: u32) -> EventTemplate {
        EventTemplate::Target { target_id, points }
    }

    fn registry_with(lines: &SimulatedChannels, window: u64) -> TriggerRegistry {
        TriggerRegistry::new(Box::new(lines.clone()), window)
    }

    //=====================================================================
    // Registration
    //=====================================================================

    #[test]
    fn register_assigns_sequential_handles() {
        let lines = SimulatedChannels::new();
        let mut registry = registry_with(&lines, 100);

        let a = registry.register("target 1", 10, target(1, 50)).unwrap();
        let b = registry.register("start", 4, EventTemplate::Start).unwrap();

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.by_target(1), Some(a));
        assert_eq!(registry.start_button(), Some(b));
        assert_eq!(registry.by_name("start"), Some(b));
        assert_eq!(registry.by_channel(10), Some(a));
    }

    #[test]
    fn duplicate_channel_is_configuration_error() {
        let lines = SimulatedChannels::new();
        let mut registry = registry_with(&lines, 100);
        registry.register("target 1", 10, target(1, 50)).unwrap();

        match registry.register("target 2", 10, target(2, 100)) {
            Err(CabinetError::Configuration(msg)) => assert!(msg.contains("channel 10")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
        assert_eq!(registry.len(), 1, "Failed registration must not add a sensor");
    }

    #[test]
    fn duplicate_target_is_configuration_error() {
        let lines = SimulatedChannels::new();
        let mut registry = registry_with(&lines, 100);
        registry.register("target 1", 10, target(1, 50)).unwrap();

        assert!(registry.register("target 1b", 11, target(1, 50)).is_err());
    }

    #[test]
    fn second_start_button_is_rejected() {
        let lines = SimulatedChannels::new();
        let mut registry = registry_with(&lines, 100);
        registry.register("start", 4, EventTemplate::Start).unwrap();

        assert!(registry.register("start 2", 5, EventTemplate::Start).is_err());
    }

    #[test]
    fn per_sensor_window_is_kept() {
        let lines = SimulatedChannels::new();
        let mut registry = registry_with(&lines, 100);
        let handle = registry
            .register_with_window("start", 4, EventTemplate::Start, 250)
            .unwrap();

        assert_eq!(registry.sensor(handle).unwrap().debounce_window_ms(), 250);
    }

    //=====================================================================
    // Polling
    //=====================================================================

    #[test]
    fn poll_all_returns_events_in_registration_order() {
        let lines = SimulatedChannels::new();
        let mut registry = registry_with(&lines, 100);
        registry.register("target 3", 30, target(3, 150)).unwrap();
        registry.register("target 1", 10, target(1, 50)).unwrap();
        registry.register("target 2", 20, target(2, 100)).unwrap();

        lines.close(10);
        lines.close(30);

        let events: Vec<_> = registry.poll_all(0).collect();
        assert_eq!(
            events,
            vec![
                Event::TargetHit { target_id: 3, points: 150 },
                Event::TargetHit { target_id: 1, points: 50 },
            ]
        );
    }

    #[test]
    fn poll_all_is_restartable_and_debounced() {
        let lines = SimulatedChannels::new();
        let mut registry = registry_with(&lines, 100);
        registry.register("target 1", 10, target(1, 50)).unwrap();

        lines.close(10);
        assert_eq!(registry.poll_all(0).count(), 1);
        assert_eq!(registry.poll_all(50).count(), 0, "Still inside the window");

        lines.open(10);
        assert_eq!(registry.poll_all(120).count(), 0, "Re-arm emits nothing");

        lines.close(10);
        assert_eq!(registry.poll_all(130).count(), 1);
    }

    #[test]
    fn poll_all_on_empty_registry_is_empty() {
        let lines = SimulatedChannels::new();
        let mut registry = registry_with(&lines, 100);
        assert!(registry.is_empty());
        assert_eq!(registry.poll_all(0).count(), 0);
    }

    #[test]
    fn fire_goes_through_debounce() {
        let lines = SimulatedChannels::new();
        let mut registry = registry_with(&lines, 100);
        let handle = registry.register("target 1", 10, target(1, 50)).unwrap();

        assert!(registry.fire(handle, 0).is_some());
        assert!(registry.fire(handle, 10).is_none());

        // The physical line never closed, so the next sweep re-arms it.
        assert_eq!(registry.poll_all(150).count(), 0);
        assert!(registry.fire(handle, 160).is_some());
    }

    #[test]
    fn iter_yields_registration_order() {
        let lines = SimulatedChannels::new();
        let mut registry = registry_with(&lines, 100);
        registry.register("b", 2, target(2, 100)).unwrap();
        registry.register("a", 1, target(1, 50)).unwrap();

        let names: Vec<_> = registry.iter().map(|(_, s)| s.name().to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
