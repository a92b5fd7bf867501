//! Integration tests for the AppService → AQI → fan/LED pipeline.
//!
//! These run on the host (x86_64) and verify that a full control cycle
//! from injected sensor readings down to actuator calls works correctly
//! without any real hardware.

use crate::mock_hw::{ActuatorCall, LogSink, MockHardware, MockNvs};

use airvent::airquality::Condition;
use airvent::app::commands::AppCommand;
use airvent::app::service::AppService;
use airvent::config::SystemConfig;

fn make_app() -> (AppService, MockHardware, LogSink) {
    let config = SystemConfig::default();
    let mut app = AppService::new(config);
    let hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut sink);
    (app, hw, sink)
}

// ── Clean empty room → fan off, green LED ────────────────────

#[test]
fn clean_empty_room_keeps_fan_off() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.set_air(100, 5.0);
    app.tick(&mut hw, &mut sink, 100);

    assert_eq!(hw.fan_duty(), 0, "clean empty room must not ventilate");
    assert_eq!(app.air_quality().condition, Condition::Good);
    assert_eq!(hw.led_colour(), Some((0, 200, 60)), "LED should be green");
}

// ── Documented weighting example through the full pipeline ───

#[test]
fn moderate_gas_light_dust_empty_room() {
    let (mut app, mut hw, mut sink) = make_app();

    // gas 650 raw scores 64, dust 10 µg/m³ scores 9:
    // (64*40 + 9*40 + 0*20 + 50) / 100 = 29.
    hw.set_air(650, 10.0);
    app.tick(&mut hw, &mut sink, 100);

    assert_eq!(app.air_quality().index, 29);
    assert_eq!(app.air_quality().condition, Condition::Good);
    // AQI 29 is below the lowest fan tier and the room is empty.
    assert_eq!(hw.fan_duty(), 0);
}

// ── Poor air, occupied → ramped duty, red LED ────────────────

#[test]
fn poor_air_occupied_ramps_fan() {
    let (mut app, mut hw, mut sink) = make_app();

    // Two occupants enter (scripted beam sequences).
    hw.set_air(1100, 200.0);
    let mut t = 0;
    for _ in 0..2 {
        for (a, b) in [(true, false), (true, true), (false, false)] {
            t += 100;
            hw.set_beams(a, b);
            app.tick(&mut hw, &mut sink, t);
        }
    }
    assert_eq!(app.occupant_count(), 2);

    // gas and dust both score 100, occupancy(2) scores 15:
    // (100*40 + 100*40 + 15*20 + 50) / 100 = 83 → Poor.
    assert_eq!(app.air_quality().index, 83);
    assert_eq!(app.air_quality().condition, Condition::Poor);

    // AQI 83 maps onto the 180–255 ramp: 180 + 23*75/40 = 223, which
    // beats both the occupancy target (117) and the occupied floor.
    assert_eq!(hw.fan_duty(), 223);
    assert_eq!(app.fan_state().duty_percent, 87);
    assert_eq!(hw.led_colour(), Some((255, 30, 0)), "LED should be red");
}

// ── Empty room, poor air → forced ventilation floor ──────────

#[test]
fn empty_room_poor_air_forces_ventilation() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.set_air(1100, 200.0);
    app.tick(&mut hw, &mut sink, 100);

    // gas/dust both 100, no occupants: AQI 80 → ramp duty 217,
    // which already exceeds the 155 forced-ventilation floor.
    assert_eq!(app.air_quality().index, 80);
    assert_eq!(hw.fan_duty(), 217);
}

#[test]
fn empty_room_moderate_air_stays_off() {
    let (mut app, mut hw, mut sink) = make_app();

    // gas 700 scores 68, dust 30 scores 26:
    // (68*40 + 26*40 + 50) / 100 = 38 → below the forced-vent
    // threshold, so an empty room stays silent even though the AQI
    // tier alone would ask for MIN_FAN_SPEED.
    hw.set_air(700, 30.0);
    app.tick(&mut hw, &mut sink, 100);

    assert_eq!(app.air_quality().index, 38);
    assert_eq!(hw.fan_duty(), 0);
}

// ── Condition change emits an event ──────────────────────────

#[test]
fn condition_change_emits_event() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.set_air(100, 5.0);
    app.tick(&mut hw, &mut sink, 100);
    let baseline = sink.events.len();

    hw.set_air(1100, 200.0);
    app.tick(&mut hw, &mut sink, 200);

    let new_events = &sink.events[baseline..];
    assert!(
        new_events.iter().any(|e| e.contains("ConditionChanged")),
        "Good→Poor flip should emit ConditionChanged, got {:?}",
        new_events
    );

    // No further event while the condition holds steady.
    let baseline = sink.events.len();
    app.tick(&mut hw, &mut sink, 300);
    assert!(
        sink.events[baseline..]
            .iter()
            .all(|e| !e.contains("ConditionChanged")),
        "steady condition must not re-emit"
    );
}

// ── Outputs are re-asserted every cycle ──────────────────────

#[test]
fn outputs_asserted_every_cycle() {
    let (mut app, mut hw, mut sink) = make_app();

    for t in 1..=5u32 {
        app.tick(&mut hw, &mut sink, t * 100);
    }

    let fan_calls = hw
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::SetFanDuty { .. }))
        .count();
    let led_calls = hw
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::SetLed { .. }))
        .count();
    assert_eq!(fan_calls, 5, "fan duty is re-asserted on every tick");
    assert_eq!(led_calls, 5, "LED colour is re-asserted on every tick");
}

// ── UpdateConfig → dirty flag and debounced auto-save ────────

#[test]
fn update_config_marks_config_dirty() {
    let (mut app, _hw, _sink) = make_app();
    assert!(!app.is_config_dirty(), "should not be dirty on start");

    let new_cfg = SystemConfig {
        gas_good_raw: 250,
        ..Default::default()
    };
    app.handle_command(AppCommand::UpdateConfig(new_cfg), 1_000);

    assert!(app.is_config_dirty());
}

#[test]
fn auto_save_waits_for_debounce_window() {
    let (mut app, _hw, _sink) = make_app();
    let nvs = MockNvs::new();

    let new_cfg = SystemConfig {
        gas_good_raw: 250,
        ..Default::default()
    };
    app.handle_command(AppCommand::UpdateConfig(new_cfg), 1_000);

    assert!(!app.auto_save_if_needed(&nvs, 3_000), "inside debounce");
    assert_eq!(nvs.saves(), 0);

    assert!(app.auto_save_if_needed(&nvs, 6_001), "past debounce");
    assert_eq!(nvs.saves(), 1);
    assert!(!app.is_config_dirty());

    // Nothing further to save.
    assert!(!app.auto_save_if_needed(&nvs, 20_000));
    assert_eq!(nvs.saves(), 1);
}

#[test]
fn save_config_command_flushes_on_next_check() {
    let (mut app, _hw, _sink) = make_app();
    let nvs = MockNvs::new();

    app.handle_command(AppCommand::SaveConfig, 10_000);
    assert!(
        app.auto_save_if_needed(&nvs, 10_000),
        "explicit save bypasses the debounce wait"
    );
    assert_eq!(nvs.saves(), 1);
}

// ── Updated thresholds change scoring immediately ────────────

#[test]
fn updated_config_applies_to_next_tick() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.set_air(650, 0.0);
    app.tick(&mut hw, &mut sink, 100);
    let before = app.air_quality().index;

    // Tighten the gas thresholds: 650 raw now reads as worst-case.
    let strict = SystemConfig {
        gas_good_raw: 100,
        gas_moderate_raw: 200,
        gas_poor_raw: 300,
        ..Default::default()
    };
    app.handle_command(AppCommand::UpdateConfig(strict), 200);
    app.tick(&mut hw, &mut sink, 300);

    assert!(
        app.air_quality().index > before,
        "tightened thresholds must raise the index ({} -> {})",
        before,
        app.air_quality().index
    );
}
