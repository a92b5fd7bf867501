//! Exhaust fan driver (4-wire PWM fan).
//!
//! Variable-speed control via LEDC PWM at 25 kHz (the Intel 4-wire fan
//! spec frequency — inaudible and compatible with stock PC fans).
//!
//! The duty written here is the final policy output; this driver is a
//! dumb actuator with no decisions of its own.  Writes are idempotent —
//! the control loop re-asserts the duty every cycle.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real LEDC channel via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanDriveState {
    Stopped,
    Running { duty: u8 },
}

pub struct FanDriver {
    state: FanDriveState,
    hw_duty: u8,
}

impl Default for FanDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FanDriver {
    pub fn new() -> Self {
        Self {
            state: FanDriveState::Stopped,
            hw_duty: 0,
        }
    }

    /// Assert the PWM duty (0 = off, 255 = full speed).
    pub fn set_duty(&mut self, duty: u8) {
        hw_init::ledc_set(hw_init::LEDC_CH_FAN, duty);
        self.hw_duty = duty;
        self.state = if duty == 0 {
            FanDriveState::Stopped
        } else {
            FanDriveState::Running { duty }
        };
    }

    pub fn stop(&mut self) {
        self.set_duty(0);
    }

    pub fn state(&self) -> FanDriveState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, FanDriveState::Stopped)
    }

    pub fn current_duty(&self) -> u8 {
        self.hw_duty
    }
}
