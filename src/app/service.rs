//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the occupancy counter and the derived air-quality
//! and fan state.  It exposes a clean, hardware-agnostic API; all I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                 │         AppService          │
//! ActuatorPort ◀──│  Occupancy · AQI · Fan      │
//!                 └────────────────────────────┘
//! ```
//!
//! One call to [`tick`](AppService::tick) is one control cycle, in fixed
//! order: read sensors → count occupancy → compute AQI → compute fan
//! duty → assert outputs.  Outputs are re-asserted every cycle whether
//! or not they changed.

use log::info;

use crate::airquality::{self, AirQuality, Condition};
use crate::config::SystemConfig;
use crate::control::fan::FanState;
use crate::occupancy::OccupancyCounter;
use crate::sensors::SensorSnapshot;

use super::commands::AppCommand;
use super::events::{AppEvent, StatusSnapshot};
use super::ports::{ActuatorPort, ConfigPort, EventSink, SensorPort};

/// Status LED colour per condition (R, G, B).
const LED_GOOD: (u8, u8, u8) = (0, 200, 60); // green
const LED_MODERATE: (u8, u8, u8) = (255, 160, 0); // amber
const LED_POOR: (u8, u8, u8) = (255, 30, 0); // red

/// Config auto-save debounce after the last change (ms).
const CONFIG_SAVE_DEBOUNCE_MS: u32 = 5_000;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    counter: OccupancyCounter,
    /// Derived state of the most recent cycle, kept for display/log
    /// consumers until the next cycle overwrites it.
    air: AirQuality,
    fan: FanState,
    last_snapshot: SensorSnapshot,
    config: SystemConfig,
    tick_count: u64,
    config_dirty: bool,
    dirty_since_ms: u32,
}

impl AppService {
    /// Construct the service from configuration.
    pub fn new(config: SystemConfig) -> Self {
        let counter = OccupancyCounter::new(config.occupancy_timeout_ms);
        Self {
            counter,
            air: AirQuality {
                index: 0,
                condition: Condition::Good,
            },
            fan: FanState::default(),
            last_snapshot: SensorSnapshot::default(),
            config,
            tick_count: 0,
            config_dirty: false,
            dirty_since_ms: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup through the sink.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("AppService started (count=0, condition=Good)");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.  `now_ms` comes from the
    /// monotonic clock adapter.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
        now_ms: u32,
    ) {
        self.tick_count += 1;
        let prev_count = self.counter.count();
        let prev_condition = self.air.condition;

        // 1. Read sensors via SensorPort.
        let snapshot = hw.read_all();
        self.last_snapshot = snapshot;

        // 2. Occupancy counting (the only stateful stage).
        let count = self
            .counter
            .update(snapshot.beam_a, snapshot.beam_b, now_ms);

        // 3. Composite AQI (stateless over snapshot + count).
        self.air = airquality::evaluate(snapshot.gas_raw, snapshot.dust_ug_m3, count, &self.config);

        // 4. Fan policy.
        self.fan = FanState::compute(self.air.index, count);

        // 5. Assert outputs every cycle (idempotent re-assertion).
        hw.set_fan_duty(self.fan.duty);
        let (r, g, b) = match self.air.condition {
            Condition::Good => LED_GOOD,
            Condition::Moderate => LED_MODERATE,
            Condition::Poor => LED_POOR,
        };
        hw.set_led(r, g, b);

        // 6. Emit change events.
        if count != prev_count {
            sink.emit(&AppEvent::OccupancyChanged {
                count,
                state: self.counter.state(),
            });
        }
        if self.air.condition != prev_condition {
            info!(
                "Condition {:?} -> {:?} (AQI {})",
                prev_condition, self.air.condition, self.air.index
            );
            sink.emit(&AppEvent::ConditionChanged {
                from: prev_condition,
                to: self.air.condition,
            });
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from serial, button, etc.).
    pub fn handle_command(&mut self, cmd: AppCommand, now_ms: u32) {
        match cmd {
            AppCommand::UpdateConfig(new_config) => {
                self.counter = OccupancyCounter::new(new_config.occupancy_timeout_ms)
                    .carrying_count(self.counter.count());
                self.config = new_config;
                self.mark_config_dirty(now_ms);
                info!("Configuration updated at runtime");
            }
            AppCommand::SaveConfig => {
                // Backdate the debounce so the next auto-save check flushes.
                self.mark_config_dirty(now_ms.wrapping_sub(CONFIG_SAVE_DEBOUNCE_MS));
                info!("Explicit config save requested");
            }
            AppCommand::ResetOccupancy => {
                self.counter.reset();
                info!("Occupancy count reset to 0");
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build the read-only status snapshot for display/log collaborators.
    pub fn build_status(&self, now_ms: u32) -> StatusSnapshot {
        StatusSnapshot {
            timestamp_ms: now_ms,
            occupant_count: self.counter.count(),
            gas_raw: self.last_snapshot.gas_raw,
            dust_ug_m3: self.last_snapshot.dust_ug_m3,
            aqi: self.air.index,
            fan_duty_percent: self.fan.duty_percent,
            condition: self.air.condition,
        }
    }

    /// Current occupant count.
    pub fn occupant_count(&self) -> u16 {
        self.counter.count()
    }

    /// Air-quality state of the most recent cycle.
    pub fn air_quality(&self) -> AirQuality {
        self.air
    }

    /// Fan output of the most recent cycle.
    pub fn fan_state(&self) -> FanState {
        self.fan
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> SystemConfig {
        self.config.clone()
    }

    // ── Config dirty-flag management ──────────────────────────

    fn mark_config_dirty(&mut self, now_ms: u32) {
        self.config_dirty = true;
        self.dirty_since_ms = now_ms;
    }

    /// Check if auto-save should trigger (debounce after last change).
    /// Returns `true` if the config was saved.
    pub fn auto_save_if_needed(&mut self, storage: &impl ConfigPort, now_ms: u32) -> bool {
        if !self.config_dirty {
            return false;
        }
        if now_ms.wrapping_sub(self.dirty_since_ms) < CONFIG_SAVE_DEBOUNCE_MS {
            return false;
        }
        match storage.save(&self.config) {
            Ok(()) => {
                self.config_dirty = false;
                info!("Config auto-saved to NVS");
                true
            }
            Err(e) => {
                log::warn!("Config auto-save failed: {}", e);
                false
            }
        }
    }

    /// Whether the config has unsaved changes.
    pub fn is_config_dirty(&self) -> bool {
        self.config_dirty
    }
}
