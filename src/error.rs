//! Hardware-boundary error types.
//!
//! The decision engine itself is infallible — out-of-range inputs are
//! clamped, never rejected — so fallibility only surfaces at peripheral
//! bring-up (this module) and at the config port
//! ([`ConfigError`](crate::app::ports::ConfigError)).

use core::fmt;

/// Peripheral bring-up failures, carrying the raw `esp_err_t` where the
/// IDF returns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    AdcInit(i32),
    GpioConfig(i32),
    LedcInit,
    IsrInstall(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcInit(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfig(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInit => write!(f, "LEDC timer/channel config failed"),
            Self::IsrInstall(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

/// Firmware-wide `Result` alias for the init path.
pub type Result<T> = core::result::Result<T, Error>;
