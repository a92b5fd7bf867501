//! Fan speed policy — AQI + occupant count → PWM duty.
//!
//! Two independent duty targets are computed (one from the AQI tiers,
//! one from the occupant count), then combined:
//!
//! - room occupied: take the larger target, but never below
//!   [`OCCUPIED_FLOOR_DUTY`] — ventilation must be effective whenever
//!   anyone is present, even if the air currently scores well.
//! - room empty: fan off, unless the AQI is at or above
//!   [`FORCED_VENT_AQI`], in which case at least
//!   [`FORCED_VENT_DUTY`] (~60%) clears the bad air before the next
//!   occupant arrives.
//!
//! An empty room with good air is the only state where the fan fully
//! stops.  The resulting duty is re-asserted to the actuator every
//! cycle, not just on change.

// ---------------------------------------------------------------------------
// Policy constants
// ---------------------------------------------------------------------------

/// AQI below this: no AQI-driven ventilation.
pub const AQI_TIER_OFF_BELOW: u8 = 30;
/// AQI below this (second tier): minimum fan speed.
pub const AQI_TIER_MIN_BELOW: u8 = 40;
/// AQI below this (third tier): low fan speed.  At or above, the duty
/// ramps linearly from [`RAMP_DUTY_LO`] to [`RAMP_DUTY_HI`].
pub const AQI_TIER_LOW_BELOW: u8 = 60;

/// Duty for the second AQI tier (minimum audible speed).
pub const MIN_FAN_SPEED: u8 = 50;
/// Duty for the third AQI tier.
pub const LOW_FAN_SPEED: u8 = 100;
/// Ramp start duty at AQI 60.
pub const RAMP_DUTY_LO: u8 = 180;
/// Ramp end duty at AQI 100.
pub const RAMP_DUTY_HI: u8 = 255;

/// Duty floor whenever at least one person is present.
pub const OCCUPIED_FLOOR_DUTY: u8 = 100;
/// Occupant count at or above which the fan runs flat out.
pub const OCCUPANCY_FULL_COUNT: u16 = 10;

/// AQI at or above which an empty room is still ventilated.
pub const FORCED_VENT_AQI: u8 = 50;
/// Minimum duty for forced empty-room ventilation (~60% of full scale).
pub const FORCED_VENT_DUTY: u8 = 155;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Duty target from the AQI tiers alone.
fn duty_from_aqi(aqi: u8) -> u8 {
    if aqi < AQI_TIER_OFF_BELOW {
        0
    } else if aqi < AQI_TIER_MIN_BELOW {
        MIN_FAN_SPEED
    } else if aqi < AQI_TIER_LOW_BELOW {
        LOW_FAN_SPEED
    } else {
        // Linear map of AQI 60..100 onto RAMP_DUTY_LO..RAMP_DUTY_HI.
        let span = u32::from(RAMP_DUTY_HI - RAMP_DUTY_LO);
        let frac = u32::from(aqi.min(100) - AQI_TIER_LOW_BELOW);
        let range = u32::from(100 - AQI_TIER_LOW_BELOW);
        (u32::from(RAMP_DUTY_LO) + frac * span / range).min(255) as u8
    }
}

/// Duty target from the occupant count alone.
fn duty_from_count(count: u16) -> u8 {
    if count == 0 {
        0
    } else if count >= OCCUPANCY_FULL_COUNT {
        255
    } else {
        // Linear map of count 1..10 onto 100..255.
        let span = 255u32 - u32::from(OCCUPIED_FLOOR_DUTY);
        let frac = u32::from(count - 1);
        let range = u32::from(OCCUPANCY_FULL_COUNT - 1);
        (u32::from(OCCUPIED_FLOOR_DUTY) + frac * span / range).min(255) as u8
    }
}

/// Compute the final fan PWM duty (0–255) for one control cycle.
pub fn compute_fan(aqi: u8, count: u16) -> u8 {
    let from_aqi = duty_from_aqi(aqi);
    if count >= 1 {
        duty_from_count(count)
            .max(from_aqi)
            .max(OCCUPIED_FLOOR_DUTY)
    } else if aqi >= FORCED_VENT_AQI {
        from_aqi.max(FORCED_VENT_DUTY)
    } else {
        0
    }
}

/// Convert a duty value to a displayable percentage.
///
/// Rounds to the nearest percent, with a floor of 1% whenever the duty
/// is nonzero — a running fan is never displayed as 0%.
pub fn duty_percent(duty: u8) -> u8 {
    let pct = ((u32::from(duty) * 100 + 127) / 255) as u8;
    if duty > 0 && pct == 0 { 1 } else { pct }
}

/// Fan output for one control cycle, ready for actuator and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FanState {
    /// PWM duty, 0 (off) – 255 (full speed).
    pub duty: u8,
    /// Rounded percentage for display/logging, 0–100.
    pub duty_percent: u8,
}

impl FanState {
    /// Evaluate the policy for one cycle.
    pub fn compute(aqi: u8, count: u16) -> Self {
        let duty = compute_fan(aqi, count);
        Self {
            duty,
            duty_percent: duty_percent(duty),
        }
    }
}
