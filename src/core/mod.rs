//=========================================================================
// Core
//
// Platform-independent pieces of the shell: the game capability set,
// the input model, graphics capabilities, the frame coordinator and the
// bridge that host shells call into.
//
// Layering (leaf-first):
//   input → context → graphics → game → coordinator → platform_bridge
//
// Notes:
// Nothing in here creates windows or touches OS APIs. The desktop host
// lives in the private `platform` module; native hosts link against the
// shims in `platform_bridge::registry` instead.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod context;
pub mod coordinator;
pub mod game;
pub mod graphics;
pub mod input;
pub mod platform_bridge;
pub mod text;

//=== Public API ==========================================================

pub use context::GameContext;
pub use coordinator::{fps_ticker, handoff, FrameCoordinator};
pub use game::Game;
pub use input::{InputKind, InputState, ScreenGeometry};
