//=========================================================================
// UI Registry & Exported Shims
//=========================================================================
//
// Single registration point between a native host shell and the UI.
//
// Architecture:
//   native host ──C call──► aetheric_view_*() ──► current UI ──► Ui
//
// The shims only forward into the registered `HostCallbacks`; no game
// logic runs here. One UI may be registered per process. It is stored
// on the thread that registered it, which must be the thread the host
// fires its callbacks on. If that thread exits while still registered,
// its thread-local slot is destroyed and the process-wide flag is
// released with it.
//
// A panic raised inside an `extern "C"` shim cannot unwind into the host
// and aborts the process, which is the intended outcome for every fatal
// callback error.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::os::raw::c_int;
use std::sync::atomic::{AtomicBool, Ordering};

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::interface::{halt, HostCallbacks, ShellError};
use crate::core::input::InputKind;

//=== Registration State ==================================================

static REGISTERED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static CURRENT_UI: RefCell<Registration> = const { RefCell::new(Registration(None)) };
}

/// Thread-local slot; releases `REGISTERED` when the thread goes away.
struct Registration(Option<Box<dyn HostCallbacks>>);

impl Registration {
    fn take(&mut self) -> Option<Box<dyn HostCallbacks>> {
        let ui = self.0.take();
        if ui.is_some() {
            REGISTERED.store(false, Ordering::SeqCst);
        }
        ui
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if self.take().is_some() {
            warn!(target: "bridge", "Host thread exited with a UI still registered");
        }
    }
}

//=== Registration ========================================================

/// Registers the process-wide UI on the calling thread.
///
/// # Errors
///
/// [`ShellError::AlreadyRegistered`] if another UI is registered anywhere
/// in the process.
pub fn register(ui: Box<dyn HostCallbacks>) -> Result<(), ShellError> {
    if REGISTERED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(ShellError::AlreadyRegistered);
    }

    CURRENT_UI.with(|slot| slot.borrow_mut().0 = Some(ui));
    info!(target: "bridge", "UI registered");
    Ok(())
}

/// Removes the UI registered on the calling thread and returns it.
///
/// Returns `None` if this thread has no registration.
pub fn unregister() -> Option<Box<dyn HostCallbacks>> {
    let ui = CURRENT_UI.with(|slot| slot.borrow_mut().take());
    if ui.is_some() {
        info!(target: "bridge", "UI unregistered");
    }
    ui
}

/// Returns `true` if a UI is registered on the calling thread.
pub fn is_registered() -> bool {
    CURRENT_UI.with(|slot| slot.borrow().0.is_some())
}

fn with_current<F>(callback: F)
where
    F: FnOnce(&mut dyn HostCallbacks),
{
    CURRENT_UI.with(|slot| {
        let mut slot = slot.borrow_mut();
        match slot.0.as_deref_mut() {
            Some(ui) => callback(ui),
            None => halt(ShellError::NotRegistered),
        }
    })
}

//=== Exported Shims ======================================================

/// Host callback: the render surface is ready.
#[no_mangle]
pub extern "C" fn aetheric_view_initialized() {
    with_current(|ui| ui.initialized());
}

/// Host callback: draw a frame.
#[no_mangle]
pub extern "C" fn aetheric_view_updating() {
    with_current(|ui| ui.updating());
}

/// Host callback: pointer input in device pixels.
///
/// `kind` uses the raw codes of [`InputKind`]; unknown codes are ignored.
#[no_mangle]
pub extern "C" fn aetheric_view_input_updated(kind: c_int, x: c_int, y: c_int) {
    let Some(kind) = InputKind::from_raw(kind) else {
        warn!(target: "bridge", "Ignoring unknown input kind {}", kind);
        return;
    };
    with_current(|ui| ui.input_updated(kind, x, y));
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::GameContext;
    use crate::core::coordinator::{handoff, FrameCoordinator};
    use crate::core::game::Game;
    use crate::core::graphics::{RenderTarget, SoftwareDevice};
    use crate::core::input::{InputState, ScreenGeometry};
    use crate::core::platform_bridge::ui::Ui;
    use crossbeam_channel::{bounded, unbounded, Sender};
    use serial_test::serial;
    use std::rc::Rc;
    use std::time::Instant;

    //--- Test Callbacks ---------------------------------------------------

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Initialized,
        Updating,
        Input(InputKind, i32, i32),
    }

    struct Recorder {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl HostCallbacks for Recorder {
        fn initialized(&mut self) {
            self.calls.borrow_mut().push(Call::Initialized);
        }

        fn updating(&mut self) {
            self.calls.borrow_mut().push(Call::Updating);
        }

        fn input_updated(&mut self, kind: InputKind, x: i32, y: i32) {
            self.calls.borrow_mut().push(Call::Input(kind, x, y));
        }
    }

    fn recorder() -> (Box<dyn HostCallbacks>, Rc<RefCell<Vec<Call>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        (Box::new(Recorder { calls: Rc::clone(&calls) }), calls)
    }

    //--- Test Game --------------------------------------------------------

    /// Reports the input state every update sees.
    struct InputEcho {
        seen: Sender<InputState>,
    }

    impl Game for InputEcho {
        fn update(&mut self, context: &GameContext) {
            let _ = self.seen.send(context.input_state());
        }

        fn draw(&self, _target: &mut dyn RenderTarget) {}
    }

    //=====================================================================
    // Registration Tests
    //=====================================================================

    #[test]
    #[serial]
    fn register_and_unregister() {
        let (ui, _calls) = recorder();
        register(ui).unwrap();
        assert!(is_registered());

        assert!(unregister().is_some());
        assert!(!is_registered());
        assert!(unregister().is_none(), "Second unregister has nothing to return");
    }

    #[test]
    #[serial]
    fn second_registration_is_rejected() {
        let (first, _) = recorder();
        let (second, _) = recorder();
        register(first).unwrap();

        assert!(matches!(register(second), Err(ShellError::AlreadyRegistered)));

        unregister();
    }

    #[test]
    #[serial]
    fn registration_is_process_wide() {
        let (ui, _) = recorder();
        register(ui).unwrap();

        let other_thread = std::thread::spawn(|| {
            let (ui, _) = recorder();
            matches!(register(ui), Err(ShellError::AlreadyRegistered))
        });
        assert!(other_thread.join().unwrap(), "A second thread must not register a UI");

        unregister();
    }

    #[test]
    #[serial]
    fn exiting_thread_releases_its_registration() {
        std::thread::spawn(|| {
            let (ui, _) = recorder();
            register(ui).unwrap();
        })
        .join()
        .unwrap();

        let (ui, _) = recorder();
        assert!(register(ui).is_ok(), "Registration must not outlive its thread");
        unregister();
    }

    //=====================================================================
    // Shim Tests
    //=====================================================================

    #[test]
    #[serial]
    fn shims_forward_to_registered_ui() {
        let (ui, calls) = recorder();
        register(ui).unwrap();

        aetheric_view_initialized();
        aetheric_view_input_updated(InputKind::RAW_PRESSED, 10, 20);
        aetheric_view_updating();
        aetheric_view_input_updated(InputKind::RAW_RELEASED, 0, 0);

        unregister();
        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Initialized,
                Call::Input(InputKind::Pressed, 10, 20),
                Call::Updating,
                Call::Input(InputKind::Released, 0, 0),
            ]
        );
    }

    #[test]
    #[serial]
    fn unknown_input_kind_is_ignored() {
        let (ui, calls) = recorder();
        register(ui).unwrap();

        aetheric_view_input_updated(42, 1, 1);

        unregister();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    #[serial]
    fn shims_drive_registered_ui_through_coordinator() {
        let geometry = ScreenGeometry::new(640, 480, 1);
        let (host, looped) = handoff();
        let (ticks, ticker) = bounded(0);
        let (seen_tx, seen) = unbounded();
        let coordinator = FrameCoordinator::new(&geometry, looped)
            .spawn(InputEcho { seen: seen_tx }, ticker)
            .unwrap();
        let ui: Ui<InputEcho, SoftwareDevice> = Ui::new(
            geometry,
            |g: &ScreenGeometry| Ok(SoftwareDevice::new(g.width(), g.height())),
            host,
        );
        register(Box::new(ui)).unwrap();

        let tick = || {
            ticks.send(Instant::now()).unwrap();
            seen.recv().unwrap()
        };

        aetheric_view_initialized();
        assert_eq!(tick(), InputState::NONE);

        aetheric_view_input_updated(InputKind::RAW_PRESSED, 100, 200);
        assert_eq!(tick(), InputState::new(100, 200));

        aetheric_view_input_updated(InputKind::RAW_RELEASED, 100, 200);
        assert_eq!(tick(), InputState::NONE);

        aetheric_view_input_updated(InputKind::RAW_PRESSED, 50, 50);
        assert_eq!(tick(), InputState::new(50, 50));

        aetheric_view_updating();

        drop(unregister());
        assert!(coordinator.join().unwrap().is_some(), "Coordinator should hand the game back on shutdown");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "no UI is registered")]
    fn callback_without_registration_is_fatal() {
        with_current(|ui| ui.updating());
    }
}
