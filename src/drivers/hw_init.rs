//! One-shot hardware peripheral initialization.
//!
//! Configures ADC channels, GPIO directions, and LEDC timers/channels
//! using raw ESP-IDF sys calls. Called once from `main()` before the
//! event loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::error::Result;

// ── ADC channel map (ADC1, ESP32-S3) ──────────────────────────

/// ADC1 channel for the MQ-135 gas sensor (GPIO 5).
pub const ADC1_CH_GAS: u32 = 4;
/// ADC1 channel for the GP2Y1010 dust sensor (GPIO 9).
pub const ADC1_CH_DUST: u32 = 8;

// ── LEDC channel map ──────────────────────────────────────────

pub const LEDC_CH_FAN: u32 = 0;
pub const LEDC_CH_LED_R: u32 = 1;
pub const LEDC_CH_LED_G: u32 = 2;
pub const LEDC_CH_LED_B: u32 = 3;

// ── Init entry points ─────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before event loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the event loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<()> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK {
        return Err(Error::AdcInit(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [ADC1_CH_GAS, ADC1_CH_DUST] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK {
            return Err(Error::AdcInit(ret));
        }
    }

    info!("hw_init: ADC1 configured (CH4=gas, CH8=dust)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<()> {
    let input_pins = [pins::BEAM_A_GPIO, pins::BEAM_B_GPIO];

    for pin in input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK {
            return Err(Error::GpioConfig(ret));
        }
    }

    info!("hw_init: beam inputs configured (any-edge interrupt)");
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::DUST_LED_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK {
        return Err(Error::GpioConfig(ret));
    }

    // Dust sampling LED idles HIGH (off — active LOW).
    unsafe { gpio_set_level(pins::DUST_LED_GPIO, 1) };

    info!("hw_init: dust LED output configured");
    Ok(())
}

// ── LEDC (PWM) ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<()> {
    // Timer 0: fan at 25 kHz.  Timer 1: RGB LED at 1 kHz.
    let timers = [
        (0u32, pins::FAN_PWM_FREQ_HZ),
        (1u32, pins::LED_PWM_FREQ_HZ),
    ];
    for (timer, freq) in timers {
        let timer_cfg = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            duty_resolution: pins::PWM_RESOLUTION_BITS,
            timer_num: timer,
            freq_hz: freq,
            clk_cfg: ledc_clk_cfg_t_LEDC_AUTO_CLK,
            deconfigure: false,
        };
        if unsafe { ledc_timer_config(&timer_cfg) } != ESP_OK {
            return Err(Error::LedcInit);
        }
    }

    let channels = [
        (LEDC_CH_FAN, pins::FAN_PWM_GPIO, 0u32),
        (LEDC_CH_LED_R, pins::LED_R_GPIO, 1),
        (LEDC_CH_LED_G, pins::LED_G_GPIO, 1),
        (LEDC_CH_LED_B, pins::LED_B_GPIO, 1),
    ];
    for (channel, gpio, timer) in channels {
        let ch_cfg = ledc_channel_config_t {
            gpio_num: gpio,
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            intr_type: ledc_intr_type_t_LEDC_INTR_DISABLE,
            timer_sel: timer,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        if unsafe { ledc_channel_config(&ch_cfg) } != ESP_OK {
            return Err(Error::LedcInit);
        }
    }

    info!("hw_init: LEDC configured (fan@25kHz, RGB@1kHz)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: LEDC channels configured once in init_ledc(); duty updates
    // are safe from the single main-loop task.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty));
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) {}

// ── GPIO helpers ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    unsafe { gpio_get_level(pin) != 0 }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    false
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

/// Busy-wait for `us` microseconds (dust sensor pulse timing).
#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    unsafe {
        esp_rom_delay_us(us);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_us(_us: u32) {}

// ── GPIO ISR service (beam edges) ─────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn beam_edge_isr(_arg: *mut core::ffi::c_void) {
    // Queue-only: the control cycle runs in the main loop.
    crate::events::push_event(crate::events::Event::BeamEdge);
}

/// Install the GPIO ISR service and hook both beam pins.
/// An edge on either beam pushes [`Event::BeamEdge`](crate::events::Event)
/// so a crossing is evaluated immediately rather than on the next
/// periodic tick.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<()> {
    unsafe {
        let ret = gpio_install_isr_service(0);
        // ESP_ERR_INVALID_STATE means already installed — acceptable.
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(Error::IsrInstall(ret));
        }

        for pin in [pins::BEAM_A_GPIO, pins::BEAM_B_GPIO] {
            let ret = gpio_isr_handler_add(pin, Some(beam_edge_isr), core::ptr::null_mut());
            if ret != ESP_OK {
                return Err(Error::IsrInstall(ret));
            }
        }
    }
    info!("hw_init: beam edge ISRs installed");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<()> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
