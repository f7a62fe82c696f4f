//=========================================================================
// Window Device
//=========================================================================
//
// Presents the software framebuffer to a winit window.
//
// Architecture:
//   update(draw) → SoftwareDevice (logical pixels)
//                → nearest-neighbor upscale by screen scale
//                → softbuffer surface (0RGB u32) → present
//
// Lives on the host thread: softbuffer surfaces are tied to the window's
// thread on most platforms.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::num::NonZeroU32;
use std::rc::Rc;

//=== External Dependencies ===============================================

use log::{debug, warn};
use softbuffer::{Context, Surface};
use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::graphics::{GraphicsDevice, GraphicsError, RenderTarget, SoftwareDevice, TextureFactory};
use crate::core::input::ScreenGeometry;

//=== WindowDevice ========================================================

/// Software device whose frames are shown in a window.
pub(crate) struct WindowDevice {
    software: SoftwareDevice,
    geometry: ScreenGeometry,
    surface: Surface<Rc<Window>, Rc<Window>>,
    _context: Context<Rc<Window>>,
}

impl WindowDevice {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(window: Rc<Window>, geometry: ScreenGeometry) -> Result<Self, GraphicsError> {
        let context = Context::new(Rc::clone(&window)).map_err(surface_error)?;
        let surface = Surface::new(&context, window).map_err(surface_error)?;

        Ok(Self {
            software: SoftwareDevice::new(geometry.width(), geometry.height()),
            geometry,
            surface,
            _context: context,
        })
    }

    //--- Internal Helpers -------------------------------------------------

    fn present(&mut self) -> Result<(), GraphicsError> {
        let (width, _) = self.geometry.physical_size();
        let scale = self.geometry.scale();
        let framebuffer = self.software.framebuffer();

        let mut buffer = self.surface.buffer_mut().map_err(surface_error)?;
        for (index, pixel) in buffer.iter_mut().enumerate() {
            let px = index as u32 % width;
            let py = index as u32 / width;
            let [r, g, b, _] = framebuffer.get_pixel(px / scale, py / scale).0;
            *pixel = (r as u32) << 16 | (g as u32) << 8 | b as u32;
        }
        buffer.present().map_err(surface_error)
    }
}

impl GraphicsDevice for WindowDevice {
    fn init(&mut self) -> Result<(), GraphicsError> {
        self.software.init()?;

        let (width, height) = self.geometry.physical_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Err(GraphicsError::Surface(format!("invalid surface size {}x{}", width, height)));
        };
        self.surface.resize(width, height).map_err(surface_error)?;

        debug!(target: "graphics", "Window surface sized to {}x{}", width, height);
        Ok(())
    }

    fn texture_factory(&mut self) -> &mut dyn TextureFactory {
        self.software.texture_factory()
    }

    fn update(&mut self, draw: &mut dyn FnMut(&mut dyn RenderTarget)) -> Result<(), GraphicsError> {
        self.software.update(draw)?;

        // A lost surface (minimized window, compositor hiccup) only costs
        // this frame.
        if let Err(e) = self.present() {
            warn!(target: "graphics", "Frame {} not presented: {}", self.software.frame_count(), e);
        }
        Ok(())
    }
}

fn surface_error(err: softbuffer::SoftBufferError) -> GraphicsError {
    GraphicsError::Surface(err.to_string())
}
