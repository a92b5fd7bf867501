//! Fuzz target: `OccupancyCounter::update`
//!
//! Drives the beam state machine with arbitrary beam patterns and
//! timestamp jumps (including wraparound) and verifies:
//! - No panics under any input sequence
//! - The count never underflows (saturates at 0)
//! - The machine is always in one of the four defined phases
//!
//! cargo fuzz run fuzz_occupancy

#![no_main]

use airvent::occupancy::{OccupancyCounter, OccupancyState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    // First 4 bytes seed the starting timestamp (exercises wraparound
    // when the seed is near u32::MAX).
    let (seed, steps) = data.split_at(4);
    let mut now = u32::from_le_bytes(seed.try_into().unwrap());

    let mut counter = OccupancyCounter::new(2_000);
    let mut updates: u32 = 0;

    // Each step byte: bit 0 = beam A, bit 1 = beam B, bits 2..8 scaled
    // to a time delta of 0..=16 128 ms.
    for byte in steps {
        let a = byte & 0b01 != 0;
        let b = byte & 0b10 != 0;
        let dt = u32::from(byte >> 2) * 256;
        now = now.wrapping_add(dt);

        let count = counter.update(a, b, now);
        updates += 1;

        // One update can adjust the count by at most one.
        assert!(
            u32::from(count) <= updates,
            "count {} after {} updates",
            count,
            updates
        );
    }

    assert!(matches!(
        counter.state(),
        OccupancyState::Idle
            | OccupancyState::AFirst
            | OccupancyState::BFirst
            | OccupancyState::BothTriggered
    ));
});
