//! Fuzz target: AQI scoring + fan policy
//!
//! Feeds arbitrary sensor values and occupant counts through
//! `airquality::evaluate` and `compute_fan`, checking that:
//! - No panics for any input (including absurd dust values)
//! - The index stays within 0–100
//! - An occupied room never drops below the 100 duty floor
//!
//! cargo fuzz run fuzz_scoring

#![no_main]

use airvent::airquality;
use airvent::config::SystemConfig;
use airvent::control::fan::{compute_fan, duty_percent};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }

    let gas = u16::from_le_bytes([data[0], data[1]]);
    let count = u16::from_le_bytes([data[2], data[3]]);
    let dust_bits = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let dust = f32::from_bits(dust_bits);
    if dust.is_nan() {
        // The ADC conversion can never produce a NaN.
        return;
    }

    let cfg = SystemConfig::default();
    let aq = airquality::evaluate(gas, dust, count, &cfg);
    assert!(aq.index <= 100);

    let duty = compute_fan(aq.index, count);
    if count >= 1 {
        assert!(duty >= 100, "occupied room below floor: {}", duty);
    }

    let pct = duty_percent(duty);
    assert!(pct <= 100);
    assert!(duty == 0 || pct >= 1);
});
