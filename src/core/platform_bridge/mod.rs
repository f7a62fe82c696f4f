//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges a host shell (native view, winit, ...) with the frame
// coordinator.
//
// This module defines the contract between host shells and core logic,
// so a host can be swapped without changing the coordinator or games.
//
// Components:
// - `interface`: callback trait and error definitions (the contract)
// - `ui`: host-side half of the handoffs
// - `registry`: single-instance registration and exported C shims
//
//=========================================================================

//=== Module Declarations =================================================

pub mod interface;
pub mod registry;
pub mod ui;

//=== Public API ==========================================================

pub use interface::{HostCallbacks, ShellError};
pub use registry::{
    aetheric_view_initialized, aetheric_view_input_updated, aetheric_view_updating, register,
    unregister,
};
pub use ui::{DeviceFactory, Ui};
