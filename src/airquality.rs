//! Air quality scoring — sensor readings + occupancy → composite AQI.
//!
//! Each input is mapped to a 0–100 sub-score, then the sub-scores are
//! blended with fixed weights.  Gas and particulate dominate (40% each);
//! occupancy contributes 20% as a proxy for CO₂ buildup from people
//! present, not as a pollutant in its own right.
//!
//! The computation is stateless: each cycle derives the AQI purely from
//! the current [`SensorSnapshot`](crate::sensors::SensorSnapshot) and
//! occupant count.

use crate::config::SystemConfig;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Weights and condition thresholds
// ---------------------------------------------------------------------------

/// Composite weight for the gas sub-score (percent).
pub const WEIGHT_GAS: u32 = 40;
/// Composite weight for the dust sub-score (percent).
pub const WEIGHT_DUST: u32 = 40;
/// Composite weight for the occupancy sub-score (percent).
pub const WEIGHT_OCCUPANCY: u32 = 20;

/// AQI below this is labelled [`Condition::Good`].
pub const CONDITION_GOOD_BELOW: u8 = 40;
/// AQI below this (and not Good) is labelled [`Condition::Moderate`].
///
/// Note: these label thresholds are deliberately NOT the same as the fan
/// policy tiers in [`crate::control::fan`] (30/40/60).  The label is a
/// display concern; the fan reacts earlier and more finely.
pub const CONDITION_MODERATE_BELOW: u8 = 60;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Qualitative air-quality label.  The display/log layer maps this to
/// text; the core never produces display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Good,
    Moderate,
    Poor,
}

/// Derived air-quality state for one control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQuality {
    /// Composite index, 0 (clean) – 100 (worst).
    pub index: u8,
    /// Label derived from `index`.
    pub condition: Condition,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Piecewise-linear map of a raw reading onto a 0–100 score.
///
/// - below `good`:                linear 0 → 30
/// - `good` .. `moderate`:        linear 30 → 60
/// - `moderate` .. `poor`:        linear 60 → 90
/// - at or above `poor`:          pinned to 100
///
/// Shared by the gas and dust scorers with sensor-specific thresholds.
/// The result is clamped into [0, 100] so out-of-range or negative
/// inputs recover silently rather than producing a bogus score.
pub fn score(value: f32, good: f32, moderate: f32, poor: f32) -> u8 {
    let s = if value >= poor {
        100.0
    } else if value >= moderate {
        60.0 + (value - moderate) / (poor - moderate) * 30.0
    } else if value >= good {
        30.0 + (value - good) / (moderate - good) * 30.0
    } else {
        value / good * 30.0
    };
    s.clamp(0.0, 100.0).round() as u8
}

/// Three-tier occupancy sub-score.
///
/// 0 people → 0; 1–5 → 10..30 (5 per occupant); 6–10 → 36..60
/// (6 per occupant); above 10 → pinned to 100.
pub fn occupancy_score(count: u16) -> u8 {
    match count {
        0 => 0,
        1..=5 => (10 + (count - 1) * 5) as u8,
        6..=10 => (30 + (count - 5) * 6) as u8,
        _ => 100,
    }
}

/// Compute the composite AQI and condition label for one cycle.
pub fn evaluate(gas_raw: u16, dust_ug_m3: f32, count: u16, cfg: &SystemConfig) -> AirQuality {
    let gas_score = score(
        gas_raw as f32,
        cfg.gas_good_raw as f32,
        cfg.gas_moderate_raw as f32,
        cfg.gas_poor_raw as f32,
    );
    let dust_score = score(
        dust_ug_m3,
        cfg.dust_good_ug_m3,
        cfg.dust_moderate_ug_m3,
        cfg.dust_poor_ug_m3,
    );
    let occ_score = occupancy_score(count);

    let weighted = u32::from(gas_score) * WEIGHT_GAS
        + u32::from(dust_score) * WEIGHT_DUST
        + u32::from(occ_score) * WEIGHT_OCCUPANCY;
    // Round-half-up integer division by 100, then clamp.
    let index = ((weighted + 50) / 100).min(100) as u8;

    AirQuality {
        index,
        condition: condition_for(index),
    }
}

/// Map an index onto its qualitative label.
pub fn condition_for(index: u8) -> Condition {
    if index < CONDITION_GOOD_BELOW {
        Condition::Good
    } else if index < CONDITION_MODERATE_BELOW {
        Condition::Moderate
    } else {
        Condition::Poor
    }
}
