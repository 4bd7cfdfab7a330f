//=========================================================================
// Key Bindings
//=========================================================================
//
// Maps dev-keyboard keys to cabinet inputs.
//
// Architecture:
//   KeyCode → HashMap → KeyAction
//                         ├─ Trigger(SensorHandle)  (debounced, like a ball)
//                         └─ Emit(Event)            (start w/o sensor, quit)
//
// Defaults derived from the registry:
//   Space       start button
//   0-9         target with that id
//   Q / Escape  quit
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::key::KeyCode;
use super::registry::{SensorHandle, TriggerRegistry};
use crate::core::event::Event;

//=== KeyAction ===========================================================

/// What a bound key does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Fire a registered sensor through its debounce.
    Trigger(SensorHandle),

    /// Enqueue an event directly.
    Emit(Event),
}

//=== KeyBindings =========================================================

/// Key → action table for the keyboard substitute.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, KeyAction>,
}

impl KeyBindings {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the default layout for the sensors in `registry`.
    ///
    /// Space emits `StartPressed` directly when no start sensor exists.
    pub fn from_registry(registry: &TriggerRegistry) -> Self {
        let mut bindings = Self::new();

        let start = match registry.start_button() {
            Some(handle) => KeyAction::Trigger(handle),
            None => KeyAction::Emit(Event::StartPressed),
        };
        bindings.bind(KeyCode::Space, start);

        for (handle, sensor) in registry.iter() {
            if let Some(key) = sensor.template().target_id().and_then(KeyCode::digit) {
                bindings.bind(key, KeyAction::Trigger(handle));
            }
        }

        bindings.bind(KeyCode::KeyQ, KeyAction::Emit(Event::Quit));
        bindings.bind(KeyCode::Escape, KeyAction::Emit(Event::Quit));
        bindings
    }

    //--- Binding API ------------------------------------------------------

    /// Binds `key`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyCode, action: KeyAction) {
        self.bindings.insert(key, action);
    }

    //--- Lookup -----------------------------------------------------------

    pub fn resolve(&self, key: KeyCode) -> Option<&KeyAction> {
        self.bindings.get(&key)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::EventTemplate;
    use crate::core::input::SimulatedChannels;

    fn registry() -> TriggerRegistry {
        let mut registry = TriggerRegistry::new(Box::new(SimulatedChannels::new()), 100);
        registry
            .register("target 0", 20, EventTemplate::Target { target_id: 0, points: 0 })
            .unwrap();
        registry
            .register("target 2", 22, EventTemplate::Target { target_id: 2, points: 100 })
            .unwrap();
        registry
    }

    #[test]
    fn digits_trigger_matching_targets() {
        let registry = registry();
        let bindings = KeyBindings::from_registry(&registry);

        assert_eq!(
            bindings.resolve(KeyCode::Digit2),
            Some(&KeyAction::Trigger(registry.by_target(2).unwrap()))
        );
        assert_eq!(
            bindings.resolve(KeyCode::Digit0),
            Some(&KeyAction::Trigger(registry.by_target(0).unwrap()))
        );
        assert_eq!(bindings.resolve(KeyCode::Digit5), None, "Unregistered target stays unbound");
    }

    #[test]
    fn space_emits_start_without_start_sensor() {
        let bindings = KeyBindings::from_registry(&registry());
        assert_eq!(
            bindings.resolve(KeyCode::Space),
            Some(&KeyAction::Emit(Event::StartPressed))
        );
    }

    #[test]
    fn space_triggers_start_sensor_when_registered() {
        let mut registry = registry();
        let start = registry.register("start", 4, EventTemplate::Start).unwrap();

        let bindings = KeyBindings::from_registry(&registry);
        assert_eq!(bindings.resolve(KeyCode::Space), Some(&KeyAction::Trigger(start)));
    }

    #[test]
    fn quit_keys_are_bound() {
        let bindings = KeyBindings::from_registry(&registry());
        assert_eq!(bindings.resolve(KeyCode::KeyQ), Some(&KeyAction::Emit(Event::Quit)));
        assert_eq!(bindings.resolve(KeyCode::Escape), Some(&KeyAction::Emit(Event::Quit)));
    }
}
