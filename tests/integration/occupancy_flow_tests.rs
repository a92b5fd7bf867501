//! Doorway crossing scenarios driven through full AppService ticks.
//!
//! The beam sequences here mirror real crossings: a person breaks one
//! beam, then both, then clears both.  Each tick is one control cycle
//! with a 100 ms cadence unless the scenario needs otherwise.

use crate::mock_hw::{LogSink, MockHardware};

use airvent::app::service::AppService;
use airvent::app::commands::AppCommand;
use airvent::config::SystemConfig;

fn make_app() -> (AppService, MockHardware, LogSink) {
    let mut app = AppService::new(SystemConfig::default());
    let hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut sink);
    (app, hw, sink)
}

/// Drive one beam pattern through one tick.
fn step(
    app: &mut AppService,
    hw: &mut MockHardware,
    sink: &mut LogSink,
    beams: (bool, bool),
    t: u32,
) {
    hw.set_beams(beams.0, beams.1);
    app.tick(hw, sink, t);
}

#[test]
fn entry_sequence_increments_and_commands_fan() {
    let (mut app, mut hw, mut sink) = make_app();

    step(&mut app, &mut hw, &mut sink, (false, false), 0);
    step(&mut app, &mut hw, &mut sink, (true, false), 100);
    assert_eq!(app.occupant_count(), 0, "count adjusts only on pairing");

    step(&mut app, &mut hw, &mut sink, (true, true), 200);
    assert_eq!(app.occupant_count(), 1);

    step(&mut app, &mut hw, &mut sink, (false, false), 300);
    assert_eq!(app.occupant_count(), 1, "release does not change count");

    // One occupant in clean air: occupied floor duty.
    assert_eq!(hw.fan_duty(), 100);
}

#[test]
fn exit_sequence_decrements_back_to_zero() {
    let (mut app, mut hw, mut sink) = make_app();

    // Entry.
    step(&mut app, &mut hw, &mut sink, (true, false), 100);
    step(&mut app, &mut hw, &mut sink, (true, true), 200);
    step(&mut app, &mut hw, &mut sink, (false, false), 300);
    assert_eq!(app.occupant_count(), 1);

    // Exit: B first, then A.
    step(&mut app, &mut hw, &mut sink, (false, true), 400);
    step(&mut app, &mut hw, &mut sink, (true, true), 500);
    step(&mut app, &mut hw, &mut sink, (false, false), 600);
    assert_eq!(app.occupant_count(), 0);

    // Room empty, air clean: fan back off.
    assert_eq!(hw.fan_duty(), 0);
}

#[test]
fn exit_from_empty_room_clamps_at_zero() {
    let (mut app, mut hw, mut sink) = make_app();

    step(&mut app, &mut hw, &mut sink, (false, true), 100);
    step(&mut app, &mut hw, &mut sink, (true, true), 200);
    step(&mut app, &mut hw, &mut sink, (false, false), 300);

    assert_eq!(app.occupant_count(), 0, "count must never underflow");
}

#[test]
fn slow_crossing_within_window_still_pairs() {
    let (mut app, mut hw, mut sink) = make_app();

    step(&mut app, &mut hw, &mut sink, (true, false), 100);
    // B breaks 1.9 s later — slow, but inside the abandon window.
    step(&mut app, &mut hw, &mut sink, (false, true), 2_000);
    assert_eq!(app.occupant_count(), 1);
}

#[test]
fn stalled_sequence_times_out_without_counting() {
    let (mut app, mut hw, mut sink) = make_app();

    // Beam A breaks and then nothing pairs within the 2000 ms abandon
    // window (e.g. someone leaned into the doorway and stepped back).
    step(&mut app, &mut hw, &mut sink, (true, false), 100);

    // A late B break must not pair with the abandoned A break — it
    // starts a fresh (exit-direction) sequence instead.
    step(&mut app, &mut hw, &mut sink, (false, true), 2_600);
    assert_eq!(app.occupant_count(), 0);

    step(&mut app, &mut hw, &mut sink, (true, true), 2_700);
    assert_eq!(app.occupant_count(), 0, "exit from empty clamps to zero");
}

#[test]
fn occupancy_change_emits_event_with_state() {
    let (mut app, mut hw, mut sink) = make_app();

    step(&mut app, &mut hw, &mut sink, (true, false), 100);
    let baseline = sink.events.len();
    step(&mut app, &mut hw, &mut sink, (true, true), 200);

    assert!(
        sink.events[baseline..]
            .iter()
            .any(|e| e.contains("OccupancyChanged")),
        "pairing must emit OccupancyChanged, got {:?}",
        &sink.events[baseline..]
    );
}

#[test]
fn reset_occupancy_command_clears_count_and_state() {
    let (mut app, mut hw, mut sink) = make_app();

    step(&mut app, &mut hw, &mut sink, (true, false), 100);
    step(&mut app, &mut hw, &mut sink, (true, true), 200);
    assert_eq!(app.occupant_count(), 1);

    app.handle_command(AppCommand::ResetOccupancy, 300);
    assert_eq!(app.occupant_count(), 0);

    // The next tick re-evaluates from a clean Idle state.
    step(&mut app, &mut hw, &mut sink, (false, false), 400);
    assert_eq!(hw.fan_duty(), 0);
}

#[test]
fn update_config_preserves_occupant_count() {
    let (mut app, mut hw, mut sink) = make_app();

    step(&mut app, &mut hw, &mut sink, (true, false), 100);
    step(&mut app, &mut hw, &mut sink, (true, true), 200);
    step(&mut app, &mut hw, &mut sink, (false, false), 300);
    assert_eq!(app.occupant_count(), 1);

    let cfg = SystemConfig {
        occupancy_timeout_ms: 5_000,
        ..Default::default()
    };
    app.handle_command(AppCommand::UpdateConfig(cfg), 400);

    assert_eq!(
        app.occupant_count(),
        1,
        "occupants do not leave because the config changed"
    );
}

#[test]
fn status_snapshot_carries_occupancy_and_fan() {
    let (mut app, mut hw, mut sink) = make_app();

    step(&mut app, &mut hw, &mut sink, (true, false), 100);
    step(&mut app, &mut hw, &mut sink, (true, true), 200);
    step(&mut app, &mut hw, &mut sink, (false, false), 300);

    let s = app.build_status(350);
    assert_eq!(s.timestamp_ms, 350);
    assert_eq!(s.occupant_count, 1);
    // Occupied floor 100/255 displays as 39%.
    assert_eq!(s.fan_duty_percent, 39);
}
