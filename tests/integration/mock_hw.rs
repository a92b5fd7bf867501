//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.  Sensor readings
//! are injected per-test through public fields.

use airvent::app::ports::{ActuatorPort, ConfigError, ConfigPort, EventSink, SensorPort};
use airvent::config::SystemConfig;
use airvent::sensors::SensorSnapshot;
use std::cell::RefCell;
use std::collections::HashMap;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetFanDuty { duty: u8 },
    SetLed { r: u8, g: u8, b: u8 },
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    /// Snapshot returned by `read_all` — mutate between ticks to
    /// script a sensor scenario.
    pub snapshot: SensorSnapshot,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            snapshot: SensorSnapshot::default(),
        }
    }

    pub fn last_call(&self) -> Option<&ActuatorCall> {
        self.calls.last()
    }

    /// Most recently commanded fan duty (0 if none yet or after AllOff).
    pub fn fan_duty(&self) -> u8 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetFanDuty { duty } => Some(*duty),
                ActuatorCall::AllOff => Some(0),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Most recently commanded LED colour.
    pub fn led_colour(&self) -> Option<(u8, u8, u8)> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetLed { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        })
    }

    /// Script the doorway beams for the next tick.
    pub fn set_beams(&mut self, a: bool, b: bool) {
        self.snapshot.beam_a = a;
        self.snapshot.beam_b = b;
    }

    /// Script the air sensors for the next tick.
    pub fn set_air(&mut self, gas_raw: u16, dust_ug_m3: f32) {
        self.snapshot.gas_raw = gas_raw;
        self.snapshot.dust_ug_m3 = dust_ug_m3;
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        self.snapshot
    }
}

impl ActuatorPort for MockHardware {
    fn set_fan_duty(&mut self, duty: u8) {
        self.calls.push(ActuatorCall::SetFanDuty { duty });
    }

    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.calls.push(ActuatorCall::SetLed { r, g, b });
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── MockNvs ───────────────────────────────────────────────────

pub struct MockNvs {
    store: RefCell<HashMap<String, Vec<u8>>>,
    pub save_count: RefCell<u32>,
}

#[allow(dead_code)]
impl MockNvs {
    pub fn new() -> Self {
        Self {
            store: RefCell::new(HashMap::new()),
            save_count: RefCell::new(0),
        }
    }

    pub fn saves(&self) -> u32 {
        *self.save_count.borrow()
    }
}

impl Default for MockNvs {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPort for MockNvs {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        match self.store.borrow().get("syscfg") {
            Some(bytes) => postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted),
            None => Err(ConfigError::NotFound),
        }
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.store.borrow_mut().insert("syscfg".to_string(), bytes);
        *self.save_count.borrow_mut() += 1;
        Ok(())
    }
}

// ── LogSink ───────────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<String>,
}

impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &airvent::app::events::AppEvent) {
        self.events.push(format!("{:?}", event));
    }
}
