//=========================================================================
// Game Context
//=========================================================================
//
// Per-tick snapshot handed to `Game::update`.
//
// Contains:
// - screen_width / screen_height: logical screen size
// - input_state: latest normalized pointer input
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{InputState, ScreenGeometry};

//=== GameContext =========================================================

/// Read-only view of the screen and input for one update tick.
///
/// The frame coordinator owns the only instance and replaces its input
/// state between ticks; games only ever see `&GameContext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameContext {
    screen_width: u32,
    screen_height: u32,
    input_state: InputState,
}

impl GameContext {
    /// Creates a context with no active input.
    pub(crate) fn new(geometry: &ScreenGeometry) -> Self {
        Self {
            screen_width: geometry.width(),
            screen_height: geometry.height(),
            input_state: InputState::NONE,
        }
    }

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// Latest pointer input, or [`InputState::NONE`].
    pub fn input_state(&self) -> InputState {
        self.input_state
    }

    pub(crate) fn set_input_state(&mut self, state: InputState) {
        self.input_state = state;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
