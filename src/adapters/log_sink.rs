//! Log-based event sink adapter — the "logging collaborator".
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! Status records keep a stable field order — timestamp, count, gas,
//! dust, AQI, fan percent, condition — so downstream log scrapers can
//! rely on it.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Status(s) => {
                info!(
                    "STATUS | t={}ms | occupants={} | gas={} | dust={:.1}ug/m3 | \
                     aqi={} | fan={}% | {:?}",
                    s.timestamp_ms,
                    s.occupant_count,
                    s.gas_raw,
                    s.dust_ug_m3,
                    s.aqi,
                    s.fan_duty_percent,
                    s.condition,
                );
            }
            AppEvent::ConditionChanged { from, to } => {
                info!("AIR   | {:?} -> {:?}", from, to);
            }
            AppEvent::OccupancyChanged { count, state } => {
                info!("OCC   | count={} ({:?})", count, state);
            }
            AppEvent::Started => {
                info!("START | control loop running");
            }
        }
    }
}
