//=========================================================================
// Aetheric Shell Engine
//
// Main entry point: wires a game, the frame coordinator and the desktop
// host shell together.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(game)──>  [Runtime]
//         │                          │
//         ├─ with_screen_size()      ├─ spawns coordinator thread
//         ├─ with_scale()            ├─ registers the Ui
//         ├─ with_title()            └─ runs the platform event loop,
//         └─ with_fps()                 blocks until the window closes
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::OnceCell;
use std::io;
use std::rc::Rc;

//=== External Dependencies ===============================================

use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::coordinator::{fps_ticker, handoff, FrameCoordinator};
use crate::core::game::Game;
use crate::core::input::ScreenGeometry;
use crate::core::platform_bridge::{register, unregister, ShellError, Ui};
use crate::platform::{window_device_factory, Platform, PlatformError, WindowSlot};

//=== EngineError =========================================================

/// Errors that stop [`Engine::run`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to spawn frame coordinator: {0}")]
    Spawn(#[from] io::Error),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Screen**: 640×480 logical pixels
/// - **Scale**: 1
/// - **Title**: "Aetheric Shell"
/// - **FPS**: 60 (update ticks per second)
///
/// # Examples
///
/// ```no_run
/// use aetheric_shell::prelude::*;
///
/// struct Blank;
///
/// impl Game for Blank {
///     fn update(&mut self, _context: &GameContext) {}
///     fn draw(&self, _target: &mut dyn RenderTarget) {}
/// }
///
/// EngineBuilder::new()
///     .with_screen_size(320, 240)
///     .with_scale(2)
///     .with_title("Blank")
///     .build()
///     .run(Blank)
///     .unwrap();
/// ```
pub struct EngineBuilder {
    width: u32,
    height: u32,
    scale: u32,
    title: String,
    fps: u32,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            width: 640,
            height: 480,
            scale: 1,
            title: "Aetheric Shell".to_string(),
            fps: 60,
        }
    }

    /// Sets the logical screen size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Screen size must be positive, got {}x{}", width, height);
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the integer scale between logical and device pixels.
    ///
    /// # Panics
    ///
    /// Panics if `scale == 0`.
    pub fn with_scale(mut self, scale: u32) -> Self {
        assert!(scale > 0, "Screen scale must be positive");
        self.scale = scale;
        self
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the update rate of the frame coordinator.
    ///
    /// Default: 60
    ///
    /// # Panics
    ///
    /// Panics if `fps == 0`.
    pub fn with_fps(mut self, fps: u32) -> Self {
        assert!(fps > 0, "FPS must be positive, got {}", fps);
        self.fps = fps;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine ({}x{} @ {}x, FPS: {})",
            self.width, self.height, self.scale, self.fps
        );

        Engine {
            geometry: ScreenGeometry::new(self.width, self.height, self.scale),
            title: self.title,
            fps: self.fps,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Aetheric Shell runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► FrameCoordinator (Coordinator Thread @ FPS)
///   │     └─► Game::update
///   │
///   └─► Platform (Event Loop, host thread)
///         └─► Ui: Game::init, Game::draw, WindowDevice
///
/// Communication: rendezvous channels (the game moves between threads)
/// ```
pub struct Engine {
    geometry: ScreenGeometry,
    title: String,
    fps: u32,
}

impl Engine {
    /// Runs `game` and blocks until the window is closed.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the rendezvous channels
    /// 2. Spawns the coordinator thread with a ticker at the configured FPS
    /// 3. Registers the host-side `Ui` on this thread
    /// 4. Runs the platform event loop (blocks here)
    /// 5. On exit: unregisters the `Ui` → channels disconnect → coordinator ends
    ///
    /// # Errors
    ///
    /// Fails if the coordinator thread cannot be spawned, another UI is
    /// already registered, or the event loop cannot run.
    pub fn run<G: Game>(self, game: G) -> Result<(), EngineError> {
        info!("Starting engine runtime (FPS: {})", self.fps);

        //--- 1. Create handoff channels ---------------------------------
        let (host, looped) = handoff();

        //--- 2. Spawn the frame coordinator -----------------------------
        let coordinator = FrameCoordinator::new(&self.geometry, looped).spawn(game, fps_ticker(self.fps))?;
        info!("Frame coordinator spawned");

        //--- 3. Register the host side ----------------------------------
        let window: WindowSlot = Rc::new(OnceCell::new());
        let ui = Ui::new(self.geometry, window_device_factory(Rc::clone(&window)), host);
        register(Box::new(ui))?;

        //--- 4. Launch the platform subsystem ---------------------------
        let platform = Platform::new(self.title, self.geometry, window);
        info!("Platform initialized, entering event loop");
        let result = platform.run();
        info!("Platform event loop exited");

        //--- 5. Cleanup: disconnect and wait for the coordinator ---------
        drop(unregister());
        match coordinator.join() {
            Ok(_) => info!("Coordinator thread terminated cleanly"),
            Err(e) => error!("Coordinator thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
        result.map_err(EngineError::from)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
