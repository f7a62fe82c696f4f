//=========================================================================
// Software Graphics Device
//=========================================================================
//
// CPU framebuffer implementation of the graphics capabilities.
//
// Architecture:
//   SoftwareDevice
//     ├─ framebuffer: RgbaImage (logical screen size)
//     ├─ textures: Vec<RgbaImage> (indexed by TextureId)
//     └─ update(draw) → Frame { framebuffer, textures } → draw(&mut Frame)
//
// Drawing is `imageops::overlay`: source-over alpha blending, clipped at
// the framebuffer edges. Each render pass starts from opaque black.
//
//=========================================================================

//=== External Dependencies ===============================================

use image::{imageops, Rgba};
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{Color, GraphicsDevice, GraphicsError, RenderTarget, RgbaImage, TextureFactory, TextureId};

/// Color every render pass starts from.
const CLEAR_COLOR: Color = [0, 0, 0, 255];

//=== SoftwareDevice ======================================================

/// Framebuffer-backed graphics device.
#[derive(Debug)]
pub struct SoftwareDevice {
    framebuffer: RgbaImage,
    textures: Vec<RgbaImage>,
    initialized: bool,
    frame_count: u64,
}

impl SoftwareDevice {
    //--- Construction -----------------------------------------------------

    /// Creates an uninitialized device with a `width × height` framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            framebuffer: RgbaImage::new(width, height),
            textures: Vec::new(),
            initialized: false,
            frame_count: 0,
        }
    }

    //--- Accessors --------------------------------------------------------

    /// Pixels produced by the last render pass.
    pub fn framebuffer(&self) -> &RgbaImage {
        &self.framebuffer
    }

    /// Number of completed render passes.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl TextureFactory for SoftwareDevice {
    fn create_texture(&mut self, image: &RgbaImage) -> Result<TextureId, GraphicsError> {
        if !self.initialized {
            return Err(GraphicsError::NotInitialized);
        }
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(GraphicsError::EmptyTexture { width, height });
        }

        let id = TextureId(self.textures.len());
        self.textures.push(image.clone());
        debug!(target: "graphics", "Texture {:?} created ({}x{})", id, width, height);
        Ok(id)
    }
}

impl GraphicsDevice for SoftwareDevice {
    fn init(&mut self) -> Result<(), GraphicsError> {
        if self.initialized {
            return Err(GraphicsError::AlreadyInitialized);
        }
        self.initialized = true;
        debug!(
            target: "graphics",
            "Software device initialized ({}x{})",
            self.framebuffer.width(),
            self.framebuffer.height()
        );
        Ok(())
    }

    fn texture_factory(&mut self) -> &mut dyn TextureFactory {
        self
    }

    fn update(&mut self, draw: &mut dyn FnMut(&mut dyn RenderTarget)) -> Result<(), GraphicsError> {
        if !self.initialized {
            return Err(GraphicsError::NotInitialized);
        }

        let mut frame = Frame {
            pixels: &mut self.framebuffer,
            textures: &self.textures,
            error: None,
        };
        frame.clear(CLEAR_COLOR);
        draw(&mut frame);

        if let Some(err) = frame.error {
            return Err(err);
        }

        self.frame_count += 1;
        trace!(target: "graphics", "Frame {} rendered", self.frame_count);
        Ok(())
    }
}

//=== Frame ===============================================================

/// Render target for one pass over a [`SoftwareDevice`].
struct Frame<'a> {
    pixels: &'a mut RgbaImage,
    textures: &'a [RgbaImage],
    // first failure of the pass, surfaced by `update`
    error: Option<GraphicsError>,
}

impl RenderTarget for Frame<'_> {
    fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn clear(&mut self, color: Color) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba(color);
        }
    }

    fn draw_texture(&mut self, texture: TextureId, x: i32, y: i32) {
        let Some(source) = self.textures.get(texture.0) else {
            if self.error.is_none() {
                self.error = Some(GraphicsError::UnknownTexture(texture));
            }
            return;
        };

        imageops::overlay(&mut *self.pixels, source, x as i64, y as i64);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: Color) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    fn ready_device(width: u32, height: u32) -> SoftwareDevice {
        let mut device = SoftwareDevice::new(width, height);
        device.init().unwrap();
        device
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn double_init_is_rejected() {
        let mut device = SoftwareDevice::new(4, 4);
        device.init().unwrap();
        assert!(matches!(device.init(), Err(GraphicsError::AlreadyInitialized)));
    }

    #[test]
    fn update_before_init_fails() {
        let mut device = SoftwareDevice::new(4, 4);
        let result = device.update(&mut |_| {});
        assert!(matches!(result, Err(GraphicsError::NotInitialized)));
        assert_eq!(device.frame_count(), 0);
    }

    #[test]
    fn texture_before_init_fails() {
        let mut device = SoftwareDevice::new(4, 4);
        let result = device.create_texture(&solid(1, 1, [255; 4]));
        assert!(matches!(result, Err(GraphicsError::NotInitialized)));
    }

    #[test]
    fn update_invokes_draw_once() {
        let mut device = ready_device(4, 4);
        let mut calls = 0;
        device.update(&mut |_| calls += 1).unwrap();
        assert_eq!(calls, 1);
        assert_eq!(device.frame_count(), 1);
    }

    #[test]
    fn each_pass_starts_black() {
        let mut device = ready_device(2, 2);
        device.update(&mut |target| target.clear([9, 9, 9, 255])).unwrap();
        device.update(&mut |_| {}).unwrap();
        assert!(device.framebuffer().pixels().all(|p| p.0 == CLEAR_COLOR));
    }

    //=====================================================================
    // Drawing Tests
    //=====================================================================

    #[test]
    fn draws_texture_at_offset() {
        let mut device = ready_device(4, 4);
        let id = device.create_texture(&solid(2, 2, [255, 0, 0, 255])).unwrap();

        device.update(&mut |target| target.draw_texture(id, 1, 1)).unwrap();

        let fb = device.framebuffer();
        assert_eq!(fb.get_pixel(0, 0).0, CLEAR_COLOR);
        assert_eq!(fb.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(fb.get_pixel(2, 2).0, [255, 0, 0, 255]);
        assert_eq!(fb.get_pixel(3, 3).0, CLEAR_COLOR);
    }

    #[test]
    fn clips_at_edges() {
        let mut device = ready_device(3, 3);
        let id = device.create_texture(&solid(4, 4, [0, 255, 0, 255])).unwrap();

        device.update(&mut |target| target.draw_texture(id, -2, 2)).unwrap();

        let fb = device.framebuffer();
        assert_eq!(fb.get_pixel(0, 2).0, [0, 255, 0, 255]);
        assert_eq!(fb.get_pixel(1, 2).0, [0, 255, 0, 255]);
        assert_eq!(fb.get_pixel(2, 2).0, CLEAR_COLOR);
        assert_eq!(fb.get_pixel(0, 1).0, CLEAR_COLOR);
    }

    #[test]
    fn transparent_pixels_are_skipped() {
        let mut device = ready_device(1, 1);
        let id = device.create_texture(&solid(1, 1, [255, 255, 255, 0])).unwrap();
        device.update(&mut |target| target.draw_texture(id, 0, 0)).unwrap();
        assert_eq!(device.framebuffer().get_pixel(0, 0).0, CLEAR_COLOR);
    }

    #[test]
    fn translucent_texture_blends_over_black() {
        let mut device = ready_device(1, 1);
        let id = device.create_texture(&solid(1, 1, [255, 255, 255, 128])).unwrap();
        device.update(&mut |target| target.draw_texture(id, 0, 0)).unwrap();

        let [r, g, b, a] = device.framebuffer().get_pixel(0, 0).0;
        assert_eq!(a, 255, "Opaque background stays opaque");
        assert!((127..=129).contains(&r), "Half white over black is mid grey, got {}", r);
        assert_eq!((r, g), (g, b));
    }

    #[test]
    fn texture_fully_outside_is_ignored() {
        let mut device = ready_device(2, 2);
        let id = device.create_texture(&solid(2, 2, [255, 0, 0, 255])).unwrap();
        device.update(&mut |target| target.draw_texture(id, -5, 7)).unwrap();
        assert!(device.framebuffer().pixels().all(|p| p.0 == CLEAR_COLOR));
    }

    #[test]
    fn unknown_texture_fails_the_pass() {
        let mut device = ready_device(2, 2);
        let result = device.update(&mut |target| target.draw_texture(TextureId(7), 0, 0));
        assert!(matches!(result, Err(GraphicsError::UnknownTexture(TextureId(7)))));
        assert_eq!(device.frame_count(), 0);
    }

    #[test]
    fn empty_texture_is_rejected() {
        let mut device = ready_device(2, 2);
        let result = device.create_texture(&RgbaImage::new(0, 3));
        assert!(matches!(result, Err(GraphicsError::EmptyTexture { width: 0, height: 3 })));
    }
}
