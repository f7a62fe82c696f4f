//=========================================================================
// Graphics Capabilities
//=========================================================================
//
// The narrow interface the coordinator and games use to talk to a
// graphics backend.
//
// Architecture:
//   GraphicsDevice
//     ├─ init()              once, on the host thread
//     ├─ texture_factory()   handed to Game::init
//     └─ update(draw)        one render pass, invokes `draw` once
//
// Backends:
//   - `software`: CPU framebuffer (tests, headless hosts, desktop shell)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod software;

//=== External Dependencies ===============================================

pub use image::RgbaImage;
use thiserror::Error;

//=== Public API ==========================================================

pub use software::SoftwareDevice;

/// RGBA color, non-premultiplied.
pub type Color = [u8; 4];

//=== TextureId ===========================================================

/// Handle to a texture created through a [`TextureFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub(crate) usize);

//=== GraphicsError =======================================================

/// Graphics device and resource errors.
#[derive(Debug, Error)]
pub enum GraphicsError {
    /// `init` was called on a device that is already initialized.
    #[error("graphics device is already initialized")]
    AlreadyInitialized,

    /// A render pass or resource call happened before `init`.
    #[error("graphics device is not initialized")]
    NotInitialized,

    /// Texture handle does not belong to this device.
    #[error("unknown texture {0:?}")]
    UnknownTexture(TextureId),

    /// Texture with no pixels.
    #[error("texture size must be positive, got {width}x{height}")]
    EmptyTexture { width: u32, height: u32 },

    /// Presenting the frame to the host surface failed.
    #[error("surface error: {0}")]
    Surface(String),
}

//=== Capability Traits ===================================================

/// Creates textures on the active device.
pub trait TextureFactory {
    /// Uploads an image and returns a handle usable in draw calls.
    fn create_texture(&mut self, image: &RgbaImage) -> Result<TextureId, GraphicsError>;
}

/// Destination of a single render pass.
pub trait RenderTarget {
    /// Size in logical pixels.
    fn size(&self) -> (u32, u32);

    /// Fills the whole target with `color`.
    fn clear(&mut self, color: Color);

    /// Draws a texture with its top-left corner at `(x, y)`.
    ///
    /// Pixels outside the target are clipped. An unknown handle is
    /// reported as the result of the enclosing `GraphicsDevice::update`.
    fn draw_texture(&mut self, texture: TextureId, x: i32, y: i32);
}

/// A graphics backend driven by the host thread.
pub trait GraphicsDevice {
    /// One-time device setup.
    fn init(&mut self) -> Result<(), GraphicsError>;

    /// Texture creation capability for `Game::init`.
    fn texture_factory(&mut self) -> &mut dyn TextureFactory;

    /// Runs one render pass, invoking `draw` exactly once.
    fn update(&mut self, draw: &mut dyn FnMut(&mut dyn RenderTarget)) -> Result<(), GraphicsError>;
}
