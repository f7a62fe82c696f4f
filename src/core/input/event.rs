//=========================================================================
// Host Input Events
//
// Defines the kinds of pointer events a host shell reports through the
// `input_updated` callback.
//
// Responsibilities:
// - Represent press / drag / release in a stable, portable way
// - Decode the raw integer codes passed across the foreign-function
//   boundary
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::os::raw::c_int;

//=== InputKind ===========================================================

/// Kind of pointer event reported by the host shell.
///
/// Only `Released` is special: it always maps to [`InputState::NONE`]
/// regardless of the coordinates that came with it.
///
/// [`InputState::NONE`]: super::InputState::NONE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Pointer pressed at the given position.
    Pressed,
    /// Pointer moved while pressed.
    Moved,
    /// Pointer released; clears the stored input.
    Released,
}

impl InputKind {
    /// Raw code used by host shells for [`InputKind::Pressed`].
    pub const RAW_PRESSED: c_int = 0;
    /// Raw code used by host shells for [`InputKind::Moved`].
    pub const RAW_MOVED: c_int = 1;
    /// Raw code used by host shells for [`InputKind::Released`].
    pub const RAW_RELEASED: c_int = 2;

    /// Decodes a raw host code. Returns `None` for unknown codes.
    pub fn from_raw(raw: c_int) -> Option<Self> {
        match raw {
            Self::RAW_PRESSED => Some(Self::Pressed),
            Self::RAW_MOVED => Some(Self::Moved),
            Self::RAW_RELEASED => Some(Self::Released),
            _ => None,
        }
    }

    /// Encodes this kind as the raw host code.
    pub fn to_raw(self) -> c_int {
        match self {
            Self::Pressed => Self::RAW_PRESSED,
            Self::Moved => Self::RAW_MOVED,
            Self::Released => Self::RAW_RELEASED,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_codes_decode() {
        assert_eq!(InputKind::from_raw(0), Some(InputKind::Pressed));
        assert_eq!(InputKind::from_raw(1), Some(InputKind::Moved));
        assert_eq!(InputKind::from_raw(2), Some(InputKind::Released));
    }

    #[test]
    fn unknown_raw_code_is_rejected() {
        assert_eq!(InputKind::from_raw(3), None);
        assert_eq!(InputKind::from_raw(-1), None);
    }

    #[test]
    fn raw_code_matches_decoding() {
        for kind in [InputKind::Pressed, InputKind::Moved, InputKind::Released] {
            assert_eq!(InputKind::from_raw(kind.to_raw()), Some(kind));
        }
    }
}
