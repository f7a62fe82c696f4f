//=========================================================================
// Input Model
//
// Pointer input as seen by the game: a single (x, y) pair in logical
// pixels, or a sentinel when nothing is pressed.
//
// Responsibilities:
// - Decode host event kinds (`InputKind`)
// - Hold the latest pointer snapshot (`InputState`)
// - Normalize raw host coordinates against the screen (`ScreenGeometry`)
//
// Notes:
// The stored `InputState` is owned by the frame coordinator and is only
// ever replaced inside its dispatch loop. The host side normalizes and
// sends; it never writes the stored value directly.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod event;
mod input_state;

//=== Public API ==========================================================
pub use event::InputKind;
pub use input_state::{InputState, ScreenGeometry};
