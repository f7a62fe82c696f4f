//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_shell::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Game capability set and per-tick context
pub use crate::core::context::GameContext;
pub use crate::core::game::Game;

// Input
pub use crate::core::input::{InputKind, InputState, ScreenGeometry};

// Graphics
pub use crate::core::graphics::{
    Color, GraphicsDevice, GraphicsError, RenderTarget, RgbaImage, SoftwareDevice, TextureFactory,
    TextureId,
};

// Outline text
pub use crate::core::text::{FaceOptions, FontError, OutlineFont};
