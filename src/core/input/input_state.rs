//=========================================================================
// Input State
//
// Maintains the pointer snapshot the game reads every tick, and the
// screen geometry used to turn raw host coordinates into it.
//
// Responsibilities:
// - Represent "no input" with a reserved sentinel pair
// - Convert device pixels to logical pixels (divide by scale)
// - Clamp logical coordinates to the screen bounds
//
// Notes:
// Division happens before clamping, and the clamp is against the
// unscaled logical width/height. This ordering is relied upon by
// existing games and must not be swapped.
//
//=========================================================================

//=== Internal Modules ====================================================
use super::InputKind;

//=== InputState ==========================================================

/// Latest pointer position in logical screen pixels.
///
/// Either [`InputState::NONE`] or a coordinate inside
/// `[0, width-1] × [0, height-1]` of the screen it was normalized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputState {
    pub x: i32,
    pub y: i32,
}

impl InputState {
    /// Sentinel meaning "no active input".
    pub const NONE: Self = Self { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns `true` if this is the "no input" sentinel.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::NONE
    }
}

//=== ScreenGeometry ======================================================

/// Logical screen size and the integer scale of the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    width: u32,
    height: u32,
    scale: u32,
}

impl ScreenGeometry {
    /// Creates a geometry description.
    ///
    /// # Panics
    ///
    /// Panics if any dimension or the scale is zero.
    pub fn new(width: u32, height: u32, scale: u32) -> Self {
        assert!(width > 0 && height > 0, "Screen size must be positive, got {}x{}", width, height);
        assert!(scale > 0, "Screen scale must be positive");
        Self { width, height, scale }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Size of the host surface in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        (self.width * self.scale, self.height * self.scale)
    }

    //--- normalize() ------------------------------------------------------
    //
    // Device pixels → logical pixels, then clamp to the screen.
    // Integer division truncates toward zero, so small negative raw values
    // land on 0 before the clamp even runs.
    //
    pub fn normalize(&self, kind: InputKind, cx: i32, cy: i32) -> InputState {
        if kind == InputKind::Released {
            return InputState::NONE;
        }

        let scale = self.scale as i32;
        let x = clamp_axis(cx / scale, self.width);
        let y = clamp_axis(cy / scale, self.height);
        InputState::new(x, y)
    }
}

fn clamp_axis(value: i32, extent: u32) -> i32 {
    let max = extent.min(i32::MAX as u32) as i32 - 1;
    if value < 0 {
        0
    } else if value > max {
        max
    } else {
        value
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
