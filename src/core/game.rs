//=========================================================================
// Game Trait
//=========================================================================
//
// The capability set an embedding application supplies.
//
// Lifecycle:
//   init(textures)   once, on the host thread, before the first tick
//   update(context)  every tick, on the coordinator thread
//   draw(target)     every render request, on the host thread
//
// The game value itself is moved between the two threads, so the three
// calls never overlap.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::graphics::{GraphicsError, RenderTarget, TextureFactory};

//=== Game ================================================================

/// Game logic driven by the frame coordinator.
///
/// # Minimal Implementation
///
/// ```rust
/// # use aetheric_shell::prelude::*;
/// struct Blank;
///
/// impl Game for Blank {
///     fn update(&mut self, _context: &GameContext) {}
///
///     fn draw(&self, target: &mut dyn RenderTarget) {
///         target.clear([0, 0, 0, 255]);
///     }
/// }
/// ```
pub trait Game: Send + 'static {
    /// Called once after the graphics device is ready.
    ///
    /// Default implementation creates no resources.
    fn init(&mut self, _textures: &mut dyn TextureFactory) -> Result<(), GraphicsError> {
        Ok(())
    }

    /// Advances game logic by one tick.
    fn update(&mut self, context: &GameContext);

    /// Emits drawing commands for the current state.
    fn draw(&self, target: &mut dyn RenderTarget);
}
