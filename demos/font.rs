//=========================================================================
// Font Demo
//
// Rasterizes a fixed block of text once, then blits it every frame.
//
// Run with:
//   cargo run --example font
//
// The font is bundled at `demos/_resources/fonts/DejaVuSans.ttf` and
// rendered at 24pt / 72 DPI with one em between baselines. DejaVu Sans
// has no Japanese coverage, so those lines come out as `.notdef` boxes;
// drop a CJK font (e.g. M+ 1p) next to it and change FONT_FILE to see
// them.
//
//=========================================================================

use std::path::PathBuf;

use aetheric_shell::prelude::*;
use env_logger::{Builder, Env};
use log::{error, warn};

const SCREEN_WIDTH: u32 = 640;
const SCREEN_HEIGHT: u32 = 480;
const FONT_FILE: &str = "DejaVuSans.ttf";

const TEXT: &[&str] = &[
    "The quick brown fox jumps over the lazy dog.",
    "",
    // Opening of Sangetsuki (山月記) by Nakajima Atsushi
    "隴西の李徴は博学才穎、天宝の末年、",
    "若くして名を虎榜に連ね、",
    "ついで江南尉に補せられたが、",
    "性、狷介、自ら恃むところ頗厚く、",
    "賤吏に甘んずるを潔しとしなかった。",
];

//=== FontDemo ============================================================

struct FontDemo {
    text_image: RgbaImage,
    texture: Option<TextureId>,
}

impl Game for FontDemo {
    fn init(&mut self, textures: &mut dyn TextureFactory) -> Result<(), GraphicsError> {
        self.texture = Some(textures.create_texture(&self.text_image)?);
        Ok(())
    }

    fn update(&mut self, _context: &GameContext) {}

    fn draw(&self, target: &mut dyn RenderTarget) {
        if let Some(texture) = self.texture {
            target.draw_texture(texture, 0, 0);
        }
    }
}

fn font_path() -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "demos", "_resources", "fonts", FONT_FILE]
        .iter()
        .collect()
}

fn load_text_image() -> Result<RgbaImage, FontError> {
    let font = OutlineFont::open(font_path(), FaceOptions::default())?;

    let missing = font.missing_chars(&TEXT.concat());
    if !missing.is_empty() {
        warn!("{} has no glyphs for {} characters; they render as boxes", FONT_FILE, missing.len());
    }

    Ok(font.rasterize(TEXT, SCREEN_WIDTH, SCREEN_HEIGHT))
}

fn main() {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let text_image = match load_text_image() {
        Ok(image) => image,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let game = FontDemo {
        text_image,
        texture: None,
    };

    let result = EngineBuilder::new()
        .with_screen_size(SCREEN_WIDTH, SCREEN_HEIGHT)
        .with_scale(1)
        .with_title("Font (Aetheric Shell Demo)")
        .build()
        .run(game);

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
