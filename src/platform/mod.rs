//=========================================================================
// Platform Subsystem
//
// Desktop host shell: drives the host callbacks from a winit event loop,
// exactly as a native view would.
//
// Architecture:
// ```text
//  Main Thread (host):                   Coordinator Thread:
//  ┌───────────────────────────────┐     ┌──────────────────────┐
//  │  Winit Event Loop             │     │  FrameCoordinator    │
//  │   ↓                           │     │                      │
//  │  resumed                      │     │                      │
//  │   └─ aetheric_view_initialized│◄───►│  init rendezvous     │
//  │  CursorMoved / MouseInput     │     │                      │
//  │   └─ PointerTracker           │     │                      │
//  │       └─ ..._input_updated    │────►│  store input         │
//  │  RedrawRequested              │     │  tick → update       │
//  │   └─ aetheric_view_updating   │◄───►│  render handoff      │
//  │       └─ WindowDevice present │     │                      │
//  └───────────────────────────────┘     └──────────────────────┘
// ```
//
// Key Design Decisions:
// - **Callbacks go through the exported shims**: the desktop shell uses
//   the same entry points a native host links against
// - **Window before device**: the window is published to a shared slot
//   before `initialized` fires, so the device factory can bind to it
// - **Continuous redraw**: every RedrawRequested requests the next one,
//   so frames are paced by the compositor, updates by the ticker
// - **Main thread requirement**: winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod pointer;
mod window_device;

//=== Standard Library Imports ============================================

use std::cell::OnceCell;
use std::rc::Rc;

//=== External Crates =====================================================

use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::graphics::GraphicsError;
use crate::core::input::ScreenGeometry;
use crate::core::platform_bridge::registry::{
    aetheric_view_initialized, aetheric_view_input_updated, aetheric_view_updating,
};
use pointer::{PointerEvent, PointerTracker};
pub(crate) use window_device::WindowDevice;

//=== WindowSlot ==========================================================

/// Window published by the shell once created; read by the device factory.
pub(crate) type WindowSlot = Rc<OnceCell<Rc<Window>>>;

/// Device factory bound to the window the shell will create.
pub(crate) fn window_device_factory(
    slot: WindowSlot,
) -> impl FnMut(&ScreenGeometry) -> Result<WindowDevice, GraphicsError> {
    move |geometry| {
        let window = slot
            .get()
            .cloned()
            .ok_or_else(|| GraphicsError::Surface("host window has not been created".to_string()))?;
        WindowDevice::new(window, *geometry)
    }
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal - if the event loop can't be created, nothing runs.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

//=== Platform ============================================================

/// Window owner and host-callback driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(title, geometry, slot)`
/// 2. **Execution**: `platform.run()` - blocks in the winit event loop
/// 3. **Startup**: `resumed()` creates the window, fires `initialized`
/// 4. **Frames**: `RedrawRequested` fires `updating`
/// 5. **Shutdown**: window closed → event loop exits → `run()` returns
///
/// # Thread Safety
///
/// Not Send/Sync - it must remain on the main thread, where the
/// registered UI lives.
pub(crate) struct Platform {
    title: String,
    geometry: ScreenGeometry,
    window: WindowSlot,
    pointer: PointerTracker,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(title: String, geometry: ScreenGeometry, window: WindowSlot) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            title,
            geometry,
            window,
            pointer: PointerTracker::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn forward_pointer(&self, event: Option<PointerEvent>) {
        if let Some((kind, x, y)) = event {
            trace!(target: "platform::input", "{:?} at ({}, {})", kind, x, y);
            aetheric_view_input_updated(kind.to_raw(), x, y);
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// The window, and with it the graphics device, is created only once;
    /// later resumes are ignored.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.get().is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.geometry.physical_size();
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} (scale {})",
                    width,
                    height,
                    self.geometry.scale()
                );
                let window = Rc::new(window);
                let _ = self.window.set(Rc::clone(&window));

                aetheric_view_initialized();
                window.request_redraw();
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.pointer.cursor_moved(position.x, position.y);
                self.forward_pointer(event);
            }

            WindowEvent::CursorLeft { .. } => {
                let event = self.pointer.cursor_left();
                self.forward_pointer(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.pointer.button(button, state);
                self.forward_pointer(event);
            }

            WindowEvent::RedrawRequested => {
                aetheric_view_updating();

                if let Some(window) = self.window.get() {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Resized, Focused, keyboard, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_creation_defers_window() {
        let slot: WindowSlot = Rc::new(OnceCell::new());
        let platform = Platform::new("test".into(), ScreenGeometry::new(8, 8, 1), Rc::clone(&slot));
        assert!(platform.window.get().is_none(), "Window should be created lazily");
        assert!(!platform.pointer.is_pressed());
    }

    #[test]
    fn device_factory_requires_window() {
        let mut factory = window_device_factory(Rc::new(OnceCell::new()));
        let result = factory(&ScreenGeometry::new(8, 8, 1));
        assert!(matches!(result, Err(GraphicsError::Surface(_))));
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
