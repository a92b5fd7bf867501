//! GP2Y1010AU0F optical dust sensor driver.
//!
//! The sensor measures scattered IR light from particulates.  A valid
//! sample requires the datasheet pulse sequence: drive the internal IR
//! LED, wait 280 µs, sample the analog output, wait a further 40 µs,
//! then switch the LED off.  The timing is fixed and must not be
//! interleaved with other work, so the whole acquisition is one scoped
//! blocking operation; an RAII guard switches the LED off on every exit
//! path.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: pulses the LED GPIO and reads ADC1_CH8.
//! On host/test: returns an injected density, no delays.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

/// Sampling delay after LED on (datasheet: 0.28 ms).
#[cfg(target_os = "espidf")]
const SAMPLE_DELAY_US: u32 = 280;
/// Settling delay between sample and LED off (datasheet: 0.04 ms).
#[cfg(target_os = "espidf")]
const SETTLE_DELAY_US: u32 = 40;

// Density injected by host tests, stored as µg/m³ × 100.
#[cfg(not(target_os = "espidf"))]
static SIM_DUST_CENTI_UG: AtomicU32 = AtomicU32::new(0);

/// Inject a dust density (µg/m³) for host-side tests.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_dust_ug_m3(ug_m3: f32) {
    SIM_DUST_CENTI_UG.store((ug_m3.max(0.0) * 100.0) as u32, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
pub struct DustReading {
    /// Particulate density, µg/m³, never negative.
    pub ug_m3: f32,
}

pub struct DustSensor {
    _adc_gpio: i32,
    _led_gpio: i32,
}

impl DustSensor {
    pub fn new(adc_gpio: i32, led_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
            _led_gpio: led_gpio,
        }
    }

    /// One scoped acquisition: LED pulse, timed sample, LED off.
    /// Blocks for ~0.32 ms on the device.
    pub fn read(&mut self) -> DustReading {
        DustReading {
            ug_m3: self.acquire(),
        }
    }

    #[cfg(target_os = "espidf")]
    fn acquire(&self) -> f32 {
        use crate::drivers::hw_init;
        use crate::pins;

        // Guard keeps the LED pulse bracketed even on early return.
        struct LedPulse;
        impl LedPulse {
            fn on() -> Self {
                // Active LOW through the datasheet RC network.
                hw_init::gpio_write(pins::DUST_LED_GPIO, false);
                Self
            }
        }
        impl Drop for LedPulse {
            fn drop(&mut self) {
                hw_init::gpio_write(pins::DUST_LED_GPIO, true);
            }
        }

        let _pulse = LedPulse::on();
        hw_init::delay_us(SAMPLE_DELAY_US);
        let raw = hw_init::adc1_read(hw_init::ADC1_CH_DUST);
        hw_init::delay_us(SETTLE_DELAY_US);
        // _pulse drops here: LED off, pulse complete.

        Self::raw_to_ug_m3(raw)
    }

    #[cfg(not(target_os = "espidf"))]
    fn acquire(&self) -> f32 {
        SIM_DUST_CENTI_UG.load(Ordering::Relaxed) as f32 / 100.0
    }

    /// Datasheet transfer curve: ~0.5 V at zero dust, 0.1 V per 100 µg/m³.
    #[allow(dead_code)] // exercised on espidf; kept under test on host
    fn raw_to_ug_m3(raw: u16) -> f32 {
        let volts = f32::from(raw) * 3.3 / 4095.0;
        ((volts - 0.5) * 1000.0).max(0.0)
    }
}
