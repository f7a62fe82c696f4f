//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Host-to-core interface types (callbacks and errors).
//
// Defines the contract a host shell relies on: three callbacks fired on
// the host thread, and the errors they can hit.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::error;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::graphics::GraphicsError;
use crate::core::input::InputKind;

//=== HostCallbacks =======================================================

/// Callbacks a host shell fires on its own thread.
///
/// Each call blocks until the frame coordinator has taken part in the
/// matching handoff, then returns.
pub trait HostCallbacks {
    /// Render surface is ready. Fired exactly once.
    fn initialized(&mut self);

    /// The host wants a frame drawn.
    fn updating(&mut self);

    /// Pointer input in device pixels.
    fn input_updated(&mut self, kind: InputKind, x: i32, y: i32);
}

//=== ShellError ==========================================================

/// Host bridge errors.
///
/// None of these are recoverable from inside a callback; the callback
/// wrappers log them and halt.
#[derive(Debug, Error)]
pub enum ShellError {
    /// `initialized` fired a second time.
    #[error("graphics device is already initialized")]
    DeviceAlreadyInitialized,

    /// `updating` fired before `initialized`.
    #[error("graphics device is not initialized")]
    DeviceNotInitialized,

    /// Another UI instance is live in this process.
    #[error("a UI is already registered in this process")]
    AlreadyRegistered,

    /// A shim was called with no UI registered on the calling thread.
    #[error("no UI is registered on this thread")]
    NotRegistered,

    /// The frame coordinator is gone.
    #[error("frame coordinator disconnected")]
    CoordinatorDisconnected,

    #[error(transparent)]
    Graphics(#[from] GraphicsError),
}

//--- halt() --------------------------------------------------------------
//
// Fatal path for callback failures. Raised through an `extern "C"` shim
// the panic aborts the process.
//
pub(crate) fn halt(err: ShellError) -> ! {
    error!(target: "bridge", "Fatal host callback error: {}", err);
    panic!("{}", err);
}
