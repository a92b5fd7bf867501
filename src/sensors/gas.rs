//! MQ-135 gas sensor driver.
//!
//! Reads the analog voltage output through an ESP32-S3 ADC channel.
//! The scoring thresholds are defined on the classic 10-bit 0–1023
//! range, so the 12-bit oneshot reading is scaled down before use.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH4 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_GAS_ADC: AtomicU16 = AtomicU16::new(0);

/// Inject a raw 10-bit gas reading for host-side tests.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gas_raw(raw: u16) {
    SIM_GAS_ADC.store(raw, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
pub struct GasReading {
    /// Raw reading on the 0–1023 scale the thresholds use.
    pub raw: u16,
}

pub struct GasSensor {
    total_reads: u32,
    _adc_gpio: i32,
}

impl GasSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            total_reads: 0,
            _adc_gpio: adc_gpio,
        }
    }

    /// MQ-series heater needs roughly a minute before readings settle.
    pub fn is_warmed_up(&self) -> bool {
        self.total_reads >= 600
    }

    pub fn read(&mut self) -> GasReading {
        self.total_reads = self.total_reads.saturating_add(1);
        GasReading {
            raw: self.read_raw_10bit(),
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_raw_10bit(&self) -> u16 {
        // 12-bit oneshot read scaled to the 10-bit threshold range.
        crate::drivers::hw_init::adc1_read(crate::drivers::hw_init::ADC1_CH_GAS) >> 2
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw_10bit(&self) -> u16 {
        SIM_GAS_ADC.load(Ordering::Relaxed).min(1023)
    }
}
