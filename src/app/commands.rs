//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (serial
//! console, maintenance button) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::config::SystemConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Hot-reload configuration (e.g. from NVS or a serial console).
    UpdateConfig(SystemConfig),

    /// Explicitly persist the current config to NVS immediately.
    SaveConfig,

    /// Maintenance reset: occupant count back to 0, sequence to idle.
    /// Used after manual recount or when the room is known to be empty.
    ResetOccupancy,
}
