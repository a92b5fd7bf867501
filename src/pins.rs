//! GPIO / peripheral pin assignments for the AirVent main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Exhaust fan (4-wire PC fan, PWM input)
// ---------------------------------------------------------------------------

/// LEDC PWM channel output driving the fan PWM input.
pub const FAN_PWM_GPIO: i32 = 1;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// MQ-135 gas sensor — analog voltage via resistive divider.
/// ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const GAS_ADC_GPIO: i32 = 5;

/// GP2Y1010AU0F dust sensor analog output.
/// ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const DUST_ADC_GPIO: i32 = 9;

/// GP2Y1010AU0F sampling LED drive (active LOW through the datasheet
/// RC network).  Pulsed for each acquisition, never held on.
pub const DUST_LED_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// Doorway IR break-beam A (outer).  Receiver holds the line LOW while
/// the beam is intact; HIGH = beam broken.
pub const BEAM_A_GPIO: i32 = 6;
/// Doorway IR break-beam B (inner).  HIGH = beam broken.
pub const BEAM_B_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Status LED (discrete RGB, common cathode)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the fan (25 kHz — Intel 4-wire fan spec).
pub const FAN_PWM_FREQ_HZ: u32 = 25_000;
/// LEDC frequency for the RGB status LED (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
