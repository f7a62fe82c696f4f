//=========================================================================
// Aetheric Shell — Library Root
//
// This crate embeds a game into a callback-driven host shell and drives
// it from a single fixed-rate coordinator loop.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Expose the frame coordinator and host bridge for native hosts
// - Keep the desktop shell (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use aetheric_shell::prelude::*;
//
// struct MyGame;
//
// impl Game for MyGame {
//     fn update(&mut self, _context: &GameContext) {}
//     fn draw(&self, _target: &mut dyn RenderTarget) {}
// }
//
// fn main() {
//     EngineBuilder::new().build().run(MyGame).unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the coordinator, the host bridge and the capability
// traits. Native host integrations use it directly; desktop applications
// mostly use the top-level `Engine` facade.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit host shell (window, surface, pointer
// tracking) and is not part of the public API surface.
//
// `engine` defines the main entry point and wiring.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError};
pub use platform::PlatformError;
