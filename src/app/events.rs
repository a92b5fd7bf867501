//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, drive a display,
//! etc.

use crate::airquality::Condition;
use crate::occupancy::OccupancyState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic status snapshot (logging collaborator cadence).
    Status(StatusSnapshot),

    /// The air-quality condition label changed.
    ConditionChanged { from: Condition, to: Condition },

    /// The occupant count changed (carries the new count and the
    /// machine state that produced it).
    OccupancyChanged { count: u16, state: OccupancyState },

    /// The application service has started.
    Started,
}

/// Read-only snapshot of one control cycle, for rendering and logging.
///
/// Field order is stable; the log sink persists one record per
/// invocation in exactly this order.
#[derive(Debug, Clone, Copy)]
pub struct StatusSnapshot {
    /// Monotonic timestamp of the cycle (ms since boot, wrapping).
    pub timestamp_ms: u32,
    /// Current occupant count.
    pub occupant_count: u16,
    /// Raw gas reading (0–1023).
    pub gas_raw: u16,
    /// Particulate density (µg/m³).
    pub dust_ug_m3: f32,
    /// Composite AQI (0–100).
    pub aqi: u8,
    /// Fan duty as a display percentage (0–100, never 0 while running).
    pub fan_duty_percent: u8,
    /// Qualitative condition label.
    pub condition: Condition,
}
