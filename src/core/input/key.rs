//=========================================================================
// Key Codes
//
// Physical keyboard keys understood by the keyboard substitute.
//
// The platform layer converts its own key type (e.g. Winit) into this
// enum so the core never depends on a windowing library.
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Only keys that can be bound on the cabinet's dev keyboard are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9, one per scoring target
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Letter Keys ------------------------------------------------------

    KeyQ,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar (start button)
    Space,

    Enter,

    Escape,

    /// Any key without its own variant.
    Unidentified,
}

impl KeyCode {
    /// Number-row key for `digit`, if `digit < 10`.
    pub fn digit(digit: u8) -> Option<Self> {
        use KeyCode::*;
        const DIGITS: [KeyCode; 10] = [
            Digit0, Digit1, Digit2, Digit3, Digit4,
            Digit5, Digit6, Digit7, Digit8, Digit9,
        ];
        DIGITS.get(digit as usize).copied()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
