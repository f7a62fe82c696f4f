//=========================================================================
// Outline Text
//=========================================================================
//
// TrueType/OpenType loading and line rasterization.
//
// Glyph outlines are scaled to a point size at a given DPI and drawn in
// white with antialiased coverage as alpha. Each glyph is rasterized into
// its own small image and composited with `imageops::overlay`, so
// clipping at the destination edges comes for free.
//
// Layout:
//   line i → baseline at line_height * (i + 1), pen starting at x = 0
//   line_height = size * dpi / 72 (one em)
//
// No hinting and no complex shaping. Characters the font has no glyph for
// are drawn as the font's `.notdef` glyph; `missing_chars` reports them.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::io;
use std::path::{Path, PathBuf};

//=== External Dependencies ===============================================

use ab_glyph::{point, Font, FontVec, GlyphId, InvalidFont, PxScale, ScaleFont};
use image::{imageops, Rgba, RgbaImage};
use log::debug;
use thiserror::Error;

/// Points per inch; a font at `dpi == 72` has one pixel per point.
const POINTS_PER_INCH: f32 = 72.0;

//=== FontError ===========================================================

/// Font loading errors.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse font: {0}")]
    Parse(#[from] InvalidFont),

    #[error("invalid face options: {0}")]
    InvalidOptions(&'static str),
}

//=== FaceOptions =========================================================

/// Size and resolution the outlines are scaled to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceOptions {
    /// Point size, default 24.
    pub size: f32,
    /// Dots per inch, default 72.
    pub dpi: f32,
}

impl Default for FaceOptions {
    fn default() -> Self {
        Self { size: 24.0, dpi: 72.0 }
    }
}

impl FaceOptions {
    /// Pixels per em for these options.
    pub fn pixels_per_em(&self) -> f32 {
        self.size * self.dpi / POINTS_PER_INCH
    }

    fn validate(&self) -> Result<(), FontError> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(FontError::InvalidOptions("size must be positive"));
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(FontError::InvalidOptions("dpi must be positive"));
        }
        Ok(())
    }
}

//=== OutlineFont =========================================================

/// A parsed font bound to one size.
#[derive(Debug)]
pub struct OutlineFont {
    font: FontVec,
    scale: PxScale,
    line_height: f32,
}

impl OutlineFont {
    //--- Loading ----------------------------------------------------------

    /// Reads and parses a font file from disk.
    pub fn open(path: impl AsRef<Path>, options: FaceOptions) -> Result<Self, FontError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::from_bytes(bytes, options)?;
        debug!(
            target: "graphics",
            "Font {} loaded ({} glyphs, {}px per em)",
            path.display(),
            font.font.glyph_count(),
            font.line_height
        );
        Ok(font)
    }

    /// Parses font data already in memory.
    pub fn from_bytes(bytes: Vec<u8>, options: FaceOptions) -> Result<Self, FontError> {
        options.validate()?;
        let font = FontVec::try_from_vec(bytes)?;

        // PxScale is relative to ascent - descent, not to the em square
        let units_per_em = font.units_per_em().ok_or(InvalidFont)?;
        let line_height = options.pixels_per_em();
        let scale = PxScale::from(line_height * font.height_unscaled() / units_per_em);

        Ok(Self {
            font,
            scale,
            line_height,
        })
    }

    //--- Layout -----------------------------------------------------------

    /// Distance between consecutive baselines in pixels.
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Characters of `text` the font has no glyph for, in first-seen order.
    ///
    /// Whitespace and control characters are never reported.
    pub fn missing_chars(&self, text: &str) -> Vec<char> {
        let mut missing = Vec::new();
        for c in text.chars() {
            if c.is_whitespace() || c.is_control() || missing.contains(&c) {
                continue;
            }
            if self.font.glyph_id(c) == GlyphId(0) {
                missing.push(c);
            }
        }
        missing
    }

    /// Horizontal advance of `text` in pixels, kerning included.
    pub fn text_width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars().filter(|c| !c.is_control()) {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                width += scaled.kern(previous, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    //--- Drawing ----------------------------------------------------------

    /// Draws `text` in white with the pen starting at `(x, baseline)`.
    pub fn draw_text(&self, dst: &mut RgbaImage, text: &str, x: f32, baseline: f32) {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = x;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars().filter(|c| !c.is_control()) {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let mut coverage =
                RgbaImage::from_pixel(bounds.width() as u32, bounds.height() as u32, Rgba([255, 255, 255, 0]));
            outlined.draw(|gx, gy, amount| {
                let alpha = (amount.clamp(0.0, 1.0) * 255.0).round() as u8;
                coverage.put_pixel(gx, gy, Rgba([255, 255, 255, alpha]));
            });

            imageops::overlay(&mut *dst, &coverage, bounds.min.x as i64, bounds.min.y as i64);
        }
    }

    /// Renders `lines` top to bottom into a transparent image.
    ///
    /// Line `i` has its baseline at `line_height * (i + 1)`; lines whose
    /// top falls below the image are skipped.
    pub fn rasterize(&self, lines: &[&str], width: u32, height: u32) -> RgbaImage {
        let mut image = RgbaImage::new(width, height);
        for (row, line) in lines.iter().enumerate() {
            let top = self.line_height * row as f32;
            if top >= height as f32 {
                break;
            }
            self.draw_text(&mut image, line, 0.0, top + self.line_height);
        }
        image
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
