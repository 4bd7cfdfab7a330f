//=========================================================================
// Platform Key Mapper
//
// Converts Winit keyboard events to cabinet `KeyCode`s.
//
// Responsibilities:
// - Translate the keys the dev keyboard layout uses
// - Drop releases and OS auto-repeat (a held key is one press)
// - Fall back to `Unidentified` for everything else, so the dispatcher
//   still sees (and discards) the press as `Unhandled`
//
//=========================================================================

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::KeyCode as WinitKeyCode;
use winit::keyboard::PhysicalKey;

use crate::core::input::KeyCode;

//=== Key Conversion ======================================================

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Target keys ------------------------------------------------------
            Digit0 | Numpad0 => KeyCode::Digit0, Digit1 | Numpad1 => KeyCode::Digit1,
            Digit2 | Numpad2 => KeyCode::Digit2, Digit3 | Numpad3 => KeyCode::Digit3,
            Digit4 | Numpad4 => KeyCode::Digit4, Digit5 | Numpad5 => KeyCode::Digit5,
            Digit6 | Numpad6 => KeyCode::Digit6, Digit7 | Numpad7 => KeyCode::Digit7,
            Digit8 | Numpad8 => KeyCode::Digit8, Digit9 | Numpad9 => KeyCode::Digit9,

            //--- Control keys -----------------------------------------------------
            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            KeyQ => KeyCode::KeyQ,
            Escape => KeyCode::Escape,

            //--- Fallback ---------------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

//=== Press Extraction ====================================================

/// Returns the pressed key, or `None` for releases and repeats.
pub(crate) fn key_press(event: &KeyEvent) -> Option<KeyCode> {
    classify(event.physical_key, event.state, event.repeat)
}

fn classify(physical_key: PhysicalKey, state: ElementState, repeat: bool) -> Option<KeyCode> {
    if state != ElementState::Pressed || repeat {
        return None;
    }
    match physical_key {
        PhysicalKey::Code(code) => Some(KeyCode::from(code)),
        PhysicalKey::Unidentified(_) => Some(KeyCode::Unidentified),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
