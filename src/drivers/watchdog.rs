//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the device if the main loop stops draining events.  The
//! timeout is sized from the configured control-loop interval: missing
//! [`STALL_TICKS`] consecutive control ticks means the loop is wedged,
//! not merely busy with a long dust acquisition.
//!
//! The main loop must call [`Watchdog::feed`] on every iteration.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

/// Control ticks the loop may miss before the TWDT fires.
pub const STALL_TICKS: u32 = 100;

// TWDT bounds on the computed timeout.
const MIN_TIMEOUT_MS: u32 = 1_000;
const MAX_TIMEOUT_MS: u32 = 60_000;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
    timeout_ms: u32,
}

impl Watchdog {
    /// Initialise and subscribe the current task to the TWDT.
    ///
    /// `control_interval_ms` is the configured control-loop period; the
    /// watchdog fires after [`STALL_TICKS`] missed ticks (10 s at the
    /// default 100 ms interval).
    pub fn new(control_interval_ms: u32) -> Self {
        let timeout_ms = Self::stall_timeout_ms(control_interval_ms);

        #[cfg(target_os = "espidf")]
        {
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    log::warn!(
                        "TWDT reconfigure returned {} (may already be configured)",
                        ret
                    );
                }

                let ret = esp_task_wdt_add(core::ptr::null_mut());
                let subscribed = ret == ESP_OK;
                if subscribed {
                    info!(
                        "Watchdog: subscribed ({} ms timeout, panic on trigger)",
                        timeout_ms
                    );
                } else {
                    log::warn!("Watchdog: failed to subscribe ({})", ret);
                }

                Self {
                    subscribed,
                    timeout_ms,
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("Watchdog(sim): no-op ({} ms timeout)", timeout_ms);
            Self { timeout_ms }
        }
    }

    /// Timeout for a loop driven at `control_interval_ms`, clamped to
    /// what the TWDT accepts.
    fn stall_timeout_ms(control_interval_ms: u32) -> u32 {
        control_interval_ms
            .saturating_mul(STALL_TICKS)
            .clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS)
    }

    /// Configured stall window in milliseconds.
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Feed the watchdog.  Must be called at least once per stall window.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
