//! Hardware drivers — dumb actuators and one-shot peripheral setup.

pub mod fan;
pub mod hw_init;
pub mod hw_timer;
pub mod status_led;
pub mod watchdog;
