//! Integration tests: AppService → occupancy/AQI → actuators.

use airvent::airquality::Condition;
use airvent::app::commands::AppCommand;
use airvent::app::ports::{ActuatorPort, ConfigError, ConfigPort, EventSink, SensorPort};
use airvent::app::service::AppService;
use airvent::config::SystemConfig;
use airvent::sensors::SensorSnapshot;

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum ActCall {
    SetFanDuty { duty: u8 },
    SetLed { r: u8, g: u8, b: u8 },
    AllOff,
}

struct MockHw {
    calls: Vec<ActCall>,
    snapshot: SensorSnapshot,
}

impl MockHw {
    fn new() -> Self {
        Self {
            calls: Vec::new(),
            snapshot: SensorSnapshot::default(),
        }
    }

    fn fan_duty(&self) -> u8 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActCall::SetFanDuty { duty } => Some(*duty),
                ActCall::AllOff => Some(0),
                _ => None,
            })
            .unwrap_or(0)
    }
}

impl SensorPort for MockHw {
    fn read_all(&mut self) -> SensorSnapshot {
        self.snapshot
    }
}

impl ActuatorPort for MockHw {
    fn set_fan_duty(&mut self, duty: u8) {
        self.calls.push(ActCall::SetFanDuty { duty });
    }
    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.calls.push(ActCall::SetLed { r, g, b });
    }
    fn all_off(&mut self) {
        self.calls.push(ActCall::AllOff);
    }
}

struct NullSink;
impl EventSink for NullSink {
    fn emit(&mut self, _event: &airvent::app::events::AppEvent) {}
}

struct FailingNvs;
impl ConfigPort for FailingNvs {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        Err(ConfigError::IoError)
    }
    fn save(&self, _config: &SystemConfig) -> Result<(), ConfigError> {
        Err(ConfigError::IoError)
    }
}

// ── Scenario: full office day ─────────────────────────────────
//
// People arrive one by one, air degrades, everyone leaves, air clears.
// Asserts the fan tracks the combined policy across the whole arc.

#[test]
fn full_day_scenario_tracks_policy() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHw::new();
    let mut sink = NullSink;
    app.start(&mut sink);

    let mut t = 0u32;
    let mut tick = |app: &mut AppService, hw: &mut MockHw, beams: (bool, bool)| {
        t += 100;
        hw.snapshot.beam_a = beams.0;
        hw.snapshot.beam_b = beams.1;
        app.tick(hw, &mut NullSink, t);
    };

    // Morning: three people enter a clean room.
    for _ in 0..3 {
        tick(&mut app, &mut hw, (true, false));
        tick(&mut app, &mut hw, (true, true));
        tick(&mut app, &mut hw, (false, false));
    }
    assert_eq!(app.occupant_count(), 3);
    // Count 3 in clean air: occupancy ramp 100 + 2*155/9 = 134.
    assert_eq!(hw.fan_duty(), 134);
    assert_eq!(app.air_quality().condition, Condition::Good);

    // Midday: air degrades around the occupants.
    hw.snapshot.gas_raw = 900;
    hw.snapshot.dust_ug_m3 = 120.0;
    tick(&mut app, &mut hw, (false, false));
    // gas 900 scores 83, dust 120 scores 78, occupancy(3) scores 20:
    // (83*40 + 78*40 + 20*20 + 50) / 100 = 68 → Poor (>= 60),
    // linear fan tier: 180 + 8*75/40 = 195.
    assert_eq!(app.air_quality().index, 68);
    assert_eq!(app.air_quality().condition, Condition::Poor);
    assert_eq!(hw.fan_duty(), 195);

    // Evening: everyone leaves, air still bad → forced ventilation.
    for _ in 0..3 {
        tick(&mut app, &mut hw, (false, true));
        tick(&mut app, &mut hw, (true, true));
        tick(&mut app, &mut hw, (false, false));
    }
    assert_eq!(app.occupant_count(), 0);
    // Without occupants the index drops to (83*40+78*40+50)/100 = 64,
    // still ≥ 50 → fan keeps running at the ramp duty.
    assert_eq!(app.air_quality().index, 64);
    assert_eq!(hw.fan_duty(), 187);

    // Night: air clears → everything off.
    hw.snapshot.gas_raw = 50;
    hw.snapshot.dust_ug_m3 = 2.0;
    tick(&mut app, &mut hw, (false, false));
    assert_eq!(hw.fan_duty(), 0);
    assert_eq!(app.air_quality().condition, Condition::Good);
}

// ── Failed auto-save keeps the dirty flag ─────────────────────

#[test]
fn failed_save_keeps_config_dirty() {
    let mut app = AppService::new(SystemConfig::default());
    app.handle_command(
        AppCommand::UpdateConfig(SystemConfig {
            gas_good_raw: 200,
            ..Default::default()
        }),
        1_000,
    );

    let nvs = FailingNvs;
    assert!(!app.auto_save_if_needed(&nvs, 10_000), "save failed");
    assert!(app.is_config_dirty(), "dirty flag survives a failed save");
}

// ── Snapshot percent never reads 0 while the fan runs ─────────

#[test]
fn running_fan_never_displays_zero_percent() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHw::new();
    let mut sink = NullSink;

    // One occupant → fan at the occupied floor.
    hw.snapshot.beam_a = true;
    app.tick(&mut hw, &mut sink, 100);
    hw.snapshot.beam_b = true;
    app.tick(&mut hw, &mut sink, 200);

    let s = app.build_status(300);
    assert!(s.fan_duty_percent > 0);
}
