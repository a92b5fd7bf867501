//! AirVent Firmware — Main Entry Point
//!
//! Hexagonal architecture with event-driven execution.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LogEventSink    NvsAdapter    Monotonic    │
//! │  (Sensor+Actuator)  (EventSink)     (ConfigPort)  Clock        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Occupancy · AQI · Fan policy                          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod airquality;
pub mod config;
pub mod control;
pub mod occupancy;

mod adapters;
mod app;
mod drivers;
mod error;
mod events;
mod pins;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::nvs::NvsAdapter;
use adapters::time::MonotonicClock;
use app::events::AppEvent;
use app::ports::{ConfigPort, EventSink};
use app::service::AppService;
use config::SystemConfig;
use drivers::fan::FanDriver;
use drivers::status_led::StatusLed;
use events::Event;
use sensors::{beams::BeamPair, dust::DustSensor, gas::GasSensor, SensorHub};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("AirVent v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = drivers::hw_init::init_isr_service() {
        log::error!(
            "ISR service init failed: {} — beam edges fall back to polling",
            e
        );
    }
    // ── 3. Load config from NVS (or defaults) ─────────────────
    let nvs = match NvsAdapter::new() {
        Ok(n) => n,
        Err(e) => {
            warn!(
                "NVS init failed ({}), running with defaults and no persistence",
                e
            );
            // Continue without persistence — NVS should self-heal on reboot.
            NvsAdapter::default()
        }
    };
    let config = match nvs.load() {
        Ok(cfg) => {
            info!("Config loaded from NVS");
            cfg
        }
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };

    let watchdog = drivers::watchdog::Watchdog::new(config.control_loop_interval_ms);

    drivers::hw_timer::start_timers(
        config.control_loop_interval_ms,
        config.status_log_interval_secs,
    );

    // ── 4. Construct adapters ─────────────────────────────────
    let sensor_hub = SensorHub::new(
        GasSensor::new(pins::GAS_ADC_GPIO),
        DustSensor::new(pins::DUST_ADC_GPIO, pins::DUST_LED_GPIO),
        BeamPair::new(pins::BEAM_A_GPIO, pins::BEAM_B_GPIO),
    );

    let mut hw = HardwareAdapter::new(sensor_hub, FanDriver::new(), StatusLed::new());
    let mut log_sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 5. Construct app service ──────────────────────────────
    let mut app = AppService::new(config.clone());
    app.start(&mut log_sink);

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    loop {
        // Simulate timer interrupts via sleep on non-espidf targets.
        // On real hardware, the esp_timer callbacks and beam-edge ISRs
        // feed the queue while the CPU idles.
        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(
                config.control_loop_interval_ms as u64,
            ));
            events::push_event(Event::ControlTick);
        }

        // Process all pending events.
        events::drain_events(|event| match event {
            // A beam edge is evaluated as a full control cycle so a
            // crossing mid-interval is never missed.
            Event::ControlTick | Event::BeamEdge => {
                app.tick(&mut hw, &mut log_sink, clock.now_ms());
            }

            Event::StatusLogTick => {
                let snapshot = app.build_status(clock.now_ms());
                log_sink.emit(&AppEvent::Status(snapshot));
            }

            Event::CommandReceived => {
                // Reserved for the serial console adapter; commands are
                // delivered through AppService::handle_command.
            }
        });

        // Config auto-save (debounced after last change).
        app.auto_save_if_needed(&nvs, clock.now_ms());

        // Feed watchdog on every iteration.
        watchdog.feed();

        // Idle until the next timer/ISR event.
        #[cfg(target_os = "espidf")]
        if events::queue_is_empty() {
            std::thread::sleep(std::time::Duration::from_millis(
                (config.control_loop_interval_ms / 4).max(1) as u64,
            ));
        }
    }
}
