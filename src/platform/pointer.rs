//=========================================================================
// Pointer Tracker
//=========================================================================
//
// Converts winit cursor and mouse-button events into host input
// callbacks (press / drag / release).
//
// Architecture:
//   CursorMoved / MouseInput → PointerTracker → (InputKind, x, y)
//
// Stateful tracking: the cursor position is cached from CursorMoved and
// attached to button events (winit does not carry a position on them).
// Motion is only reported while the left button is held.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::{ElementState, MouseButton};

//=== Internal Dependencies ===============================================

use crate::core::input::InputKind;

/// Input callback arguments: kind and device-pixel position.
pub(crate) type PointerEvent = (InputKind, i32, i32);

//=== PointerTracker ======================================================

/// Tracks cursor position and press state across winit events.
#[derive(Debug, Default)]
pub(crate) struct PointerTracker {
    position: (f64, f64),
    pressed: bool,
}

impl PointerTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_pressed(&self) -> bool {
        self.pressed
    }

    //--- Event Processing -------------------------------------------------

    /// Caches the cursor and reports a drag if the button is held.
    pub(crate) fn cursor_moved(&mut self, x: f64, y: f64) -> Option<PointerEvent> {
        self.position = (x, y);
        self.pressed.then(|| self.event(InputKind::Moved))
    }

    /// Reports press/release of the primary button; other buttons are ignored.
    pub(crate) fn button(&mut self, button: MouseButton, state: ElementState) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }

        match state {
            ElementState::Pressed => {
                self.pressed = true;
                Some(self.event(InputKind::Pressed))
            }
            ElementState::Released if self.pressed => {
                self.pressed = false;
                Some(self.event(InputKind::Released))
            }
            ElementState::Released => None,
        }
    }

    /// Cursor left the window: treat as a release.
    pub(crate) fn cursor_left(&mut self) -> Option<PointerEvent> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;
        Some(self.event(InputKind::Released))
    }

    //--- Internal Helpers -------------------------------------------------

    fn event(&self, kind: InputKind) -> PointerEvent {
        (kind, self.position.0 as i32, self.position.1 as i32)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
