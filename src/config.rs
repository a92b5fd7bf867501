//! System configuration parameters
//!
//! All tunable parameters for the AirVent system.
//! Values can be overridden via NVS (non-volatile storage).

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Gas scoring thresholds (raw ADC, 0-1023 range) ---
    /// Raw gas reading below which air is considered good.
    pub gas_good_raw: u16,
    /// Raw gas reading below which air is considered moderate.
    pub gas_moderate_raw: u16,
    /// Raw gas reading at or above which the gas score pins to 100.
    pub gas_poor_raw: u16,

    // --- Dust scoring thresholds (µg/m³) ---
    /// Dust density below which air is considered good.
    pub dust_good_ug_m3: f32,
    /// Dust density below which air is considered moderate.
    pub dust_moderate_ug_m3: f32,
    /// Dust density at or above which the dust score pins to 100.
    pub dust_poor_ug_m3: f32,

    // --- Occupancy ---
    /// Milliseconds without a beam event before a stuck non-idle
    /// counting sequence is abandoned.
    pub occupancy_timeout_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Status log interval (seconds)
    pub status_log_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Gas thresholds (MQ-135, 10-bit raw)
            gas_good_raw: 300,
            gas_moderate_raw: 600,
            gas_poor_raw: 1000,

            // Dust thresholds (GP2Y1010, µg/m³)
            dust_good_ug_m3: 35.0,
            dust_moderate_ug_m3: 75.0,
            dust_poor_ug_m3: 150.0,

            // Occupancy
            occupancy_timeout_ms: 2000,

            // Timing
            control_loop_interval_ms: 100, // 10 Hz — beams need sub-second sampling
            status_log_interval_secs: 60,  // 1/min
        }
    }
}
