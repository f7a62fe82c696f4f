//=========================================================================
// Ui
//=========================================================================
//
// Host-side half of the frame handoff.
//
// Architecture:
//   host callback → Ui → HostHandoff channels → FrameCoordinator
//
// Owns the screen geometry, the graphics device (created lazily by the
// first `initialized` callback) and the host ends of the five rendezvous
// channels. Lives on the host thread for the lifetime of the process;
// dropping it disconnects the coordinator.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::interface::{halt, HostCallbacks, ShellError};
use crate::core::coordinator::HostHandoff;
use crate::core::game::Game;
use crate::core::graphics::{GraphicsDevice, GraphicsError};
use crate::core::input::{InputKind, ScreenGeometry};

//=== DeviceFactory =======================================================

/// Builds the graphics device once the host surface exists.
pub type DeviceFactory<D> = Box<dyn FnMut(&ScreenGeometry) -> Result<D, GraphicsError>>;

//=== Ui ==================================================================

/// Host-side state: geometry, device and channel ends.
pub struct Ui<G, D> {
    geometry: ScreenGeometry,
    device: Option<D>,
    device_factory: DeviceFactory<D>,
    handoff: HostHandoff<G>,
}

impl<G: Game, D: GraphicsDevice> Ui<G, D> {
    //--- Construction -----------------------------------------------------

    pub fn new<F>(geometry: ScreenGeometry, device_factory: F, handoff: HostHandoff<G>) -> Self
    where
        F: FnMut(&ScreenGeometry) -> Result<D, GraphicsError> + 'static,
    {
        Self {
            geometry,
            device: None,
            device_factory: Box::new(device_factory),
            handoff,
        }
    }

    //--- Accessors --------------------------------------------------------

    /// The graphics device, once `initialized` has run.
    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    //--- Fallible Callbacks -----------------------------------------------

    /// Creates the device, then lets the game bind its resources.
    ///
    /// If `Game::init` fails the game is dropped; the coordinator stays
    /// blocked until this `Ui` is dropped.
    pub fn try_initialized(&mut self) -> Result<(), ShellError> {
        if self.device.is_some() {
            return Err(ShellError::DeviceAlreadyInitialized);
        }

        let mut device = (self.device_factory)(&self.geometry)?;
        device.init()?;
        let device = self.device.insert(device);
        debug!(target: "bridge", "Graphics device initialized");

        let mut game = self
            .handoff
            .initializing
            .recv()
            .map_err(|_| ShellError::CoordinatorDisconnected)?;
        game.init(device.texture_factory())?;
        self.handoff
            .initialized
            .send(game)
            .map_err(|_| ShellError::CoordinatorDisconnected)?;

        info!(target: "bridge", "Game initialized on host thread");
        Ok(())
    }

    /// Borrows the game from the coordinator for one render pass.
    pub fn try_updating(&mut self) -> Result<(), ShellError> {
        let device = self.device.as_mut().ok_or(ShellError::DeviceNotInitialized)?;

        let game = self
            .handoff
            .updating
            .recv()
            .map_err(|_| ShellError::CoordinatorDisconnected)?;
        let rendered = device.update(&mut |target| game.draw(target));
        self.handoff
            .updated
            .send(game)
            .map_err(|_| ShellError::CoordinatorDisconnected)?;

        rendered?;
        Ok(())
    }

    /// Normalizes pointer input and hands it to the coordinator.
    pub fn try_input_updated(&mut self, kind: InputKind, x: i32, y: i32) -> Result<(), ShellError> {
        let state = self.geometry.normalize(kind, x, y);
        trace!(target: "bridge", "{:?} at ({}, {}) -> {:?}", kind, x, y, state);
        self.handoff
            .input
            .send(state)
            .map_err(|_| ShellError::CoordinatorDisconnected)
    }
}

//=== HostCallbacks =======================================================

impl<G: Game, D: GraphicsDevice> HostCallbacks for Ui<G, D> {
    fn initialized(&mut self) {
        if let Err(err) = self.try_initialized() {
            halt(err);
        }
    }

    fn updating(&mut self) {
        if let Err(err) = self.try_updating() {
            halt(err);
        }
    }

    fn input_updated(&mut self, kind: InputKind, x: i32, y: i32) {
        if let Err(err) = self.try_input_updated(kind, x, y) {
            halt(err);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::GameContext;
    use crate::core::coordinator::{fps_ticker, handoff, FrameCoordinator};
    use crate::core::graphics::{RenderTarget, RgbaImage, SoftwareDevice, TextureFactory, TextureId};
    use crate::core::input::InputState;
    use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
    use image::Rgba;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    //--- Test Game --------------------------------------------------------

    struct TestGame {
        seen: Sender<InputState>,
        texture: Option<TextureId>,
        updating: Arc<AtomicBool>,
        overlapped: Arc<AtomicBool>,
    }

    impl Game for TestGame {
        fn init(&mut self, textures: &mut dyn TextureFactory) -> Result<(), GraphicsError> {
            let image = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
            self.texture = Some(textures.create_texture(&image)?);
            Ok(())
        }

        fn update(&mut self, context: &GameContext) {
            self.updating.store(true, Ordering::SeqCst);
            let _ = self.seen.send(context.input_state());
            thread::sleep(Duration::from_micros(200));
            self.updating.store(false, Ordering::SeqCst);
        }

        fn draw(&self, target: &mut dyn RenderTarget) {
            if self.updating.load(Ordering::SeqCst) {
                self.overlapped.store(true, Ordering::SeqCst);
            }
            if let Some(texture) = self.texture {
                target.draw_texture(texture, 0, 0);
            }
        }
    }

    //--- Harness ----------------------------------------------------------

    struct Harness {
        ui: Ui<TestGame, SoftwareDevice>,
        seen: Receiver<InputState>,
        overlapped: Arc<AtomicBool>,
    }

    fn start(geometry: ScreenGeometry, ticker: Receiver<Instant>) -> Harness {
        let (host, looped) = handoff();
        let (seen_tx, seen) = unbounded();
        let overlapped = Arc::new(AtomicBool::new(false));
        let game = TestGame {
            seen: seen_tx,
            texture: None,
            updating: Arc::new(AtomicBool::new(false)),
            overlapped: Arc::clone(&overlapped),
        };
        FrameCoordinator::new(&geometry, looped).spawn(game, ticker).unwrap();

        let ui = Ui::new(
            geometry,
            |g: &ScreenGeometry| Ok(SoftwareDevice::new(g.width(), g.height())),
            host,
        );
        Harness { ui, seen, overlapped }
    }

    fn manual(geometry: ScreenGeometry) -> (Harness, Sender<Instant>) {
        let (ticks, ticker) = bounded(0);
        (start(geometry, ticker), ticks)
    }

    fn tick(ticks: &Sender<Instant>, seen: &Receiver<InputState>) -> InputState {
        ticks.send(Instant::now()).unwrap();
        seen.recv().unwrap()
    }

    //=====================================================================
    // Initialization Tests
    //=====================================================================

    #[test]
    fn initialized_creates_device_and_textures() {
        let (mut harness, _ticks) = manual(ScreenGeometry::new(8, 8, 1));
        assert!(harness.ui.device().is_none());

        harness.ui.initialized();

        let device = harness.ui.device().expect("device should exist");
        assert!(device.is_initialized());
        assert_eq!(device.texture_count(), 1, "Game::init should have created one texture");
    }

    #[test]
    fn second_try_initialized_is_rejected() {
        let (mut harness, _ticks) = manual(ScreenGeometry::new(8, 8, 1));
        harness.ui.try_initialized().unwrap();
        assert!(matches!(
            harness.ui.try_initialized(),
            Err(ShellError::DeviceAlreadyInitialized)
        ));
    }

    #[test]
    #[should_panic(expected = "graphics device is already initialized")]
    fn second_initialized_is_fatal() {
        let (mut harness, _ticks) = manual(ScreenGeometry::new(8, 8, 1));
        harness.ui.initialized();
        harness.ui.initialized();
    }

    #[test]
    #[should_panic(expected = "graphics device is not initialized")]
    fn updating_before_initialized_is_fatal() {
        let (mut harness, _ticks) = manual(ScreenGeometry::new(8, 8, 1));
        harness.ui.updating();
    }

    #[test]
    fn device_factory_error_is_reported() {
        let (host, _looped) = handoff::<TestGame>();
        let mut ui: Ui<TestGame, SoftwareDevice> = Ui::new(
            ScreenGeometry::new(8, 8, 1),
            |_: &ScreenGeometry| Err(GraphicsError::Surface("no surface".into())),
            host,
        );
        assert!(matches!(ui.try_initialized(), Err(ShellError::Graphics(GraphicsError::Surface(_)))));
        assert!(ui.device().is_none());
    }

    //=====================================================================
    // Rendering Tests
    //=====================================================================

    #[test]
    fn updating_runs_one_draw_pass() {
        let (mut harness, _ticks) = manual(ScreenGeometry::new(4, 4, 1));
        harness.ui.initialized();

        harness.ui.updating();
        harness.ui.updating();

        let device = harness.ui.device().unwrap();
        assert_eq!(device.frame_count(), 2);
        assert_eq!(device.framebuffer().get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(device.framebuffer().get_pixel(3, 3).0, [0, 0, 0, 255]);
    }

    #[test]
    fn draw_never_overlaps_update() {
        let mut harness = start(ScreenGeometry::new(4, 4, 1), fps_ticker(1000));
        harness.ui.initialized();

        for _ in 0..200 {
            harness.ui.updating();
            thread::sleep(Duration::from_micros(100));
        }

        assert!(harness.seen.try_iter().count() > 0, "Ticker should have driven some updates");
        assert!(!harness.overlapped.load(Ordering::SeqCst), "Draw observed a game mid-update");
    }

    //=====================================================================
    // Input Scenarios
    //=====================================================================

    #[test]
    fn press_release_press_sequence() {
        let (mut harness, ticks) = manual(ScreenGeometry::new(640, 480, 1));
        harness.ui.initialized();

        assert_eq!(tick(&ticks, &harness.seen), InputState::NONE);

        harness.ui.input_updated(InputKind::Pressed, 100, 200);
        assert_eq!(tick(&ticks, &harness.seen), InputState::new(100, 200));

        harness.ui.input_updated(InputKind::Released, 100, 200);
        assert_eq!(tick(&ticks, &harness.seen), InputState::NONE);

        harness.ui.input_updated(InputKind::Pressed, 50, 50);
        assert_eq!(tick(&ticks, &harness.seen), InputState::new(50, 50));
    }

    #[test]
    fn scaled_input_is_divided_then_clamped() {
        let (mut harness, ticks) = manual(ScreenGeometry::new(320, 240, 2));
        harness.ui.initialized();

        harness.ui.input_updated(InputKind::Moved, 700, 10);
        assert_eq!(tick(&ticks, &harness.seen), InputState::new(319, 5));
    }

    #[test]
    fn input_after_coordinator_exit_is_reported() {
        let (host, looped) = handoff::<TestGame>();
        drop(looped);
        let mut ui: Ui<TestGame, SoftwareDevice> = Ui::new(
            ScreenGeometry::new(8, 8, 1),
            |g: &ScreenGeometry| Ok(SoftwareDevice::new(g.width(), g.height())),
            host,
        );
        assert!(matches!(
            ui.try_input_updated(InputKind::Pressed, 1, 1),
            Err(ShellError::CoordinatorDisconnected)
        ));
    }
}
