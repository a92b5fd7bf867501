//! Doorway IR break-beam pair.
//!
//! Each beam is an IR emitter/receiver across the door frame wired to a
//! GPIO with a pull-up: the receiver pulls the line LOW while the beam
//! is intact, so a HIGH level means the beam is broken.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads real GPIO levels via hw_init helpers.
//! On host/test: defaults to beams intact (nobody in the doorway).

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_BEAM_A: AtomicBool = AtomicBool::new(false);
#[cfg(not(target_os = "espidf"))]
static SIM_BEAM_B: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_beam_a(broken: bool) {
    SIM_BEAM_A.store(broken, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_beam_b(broken: bool) {
    SIM_BEAM_B.store(broken, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
pub struct BeamReading {
    /// Beam A currently broken.
    pub a_broken: bool,
    /// Beam B currently broken.
    pub b_broken: bool,
}

pub struct BeamPair {
    _gpio_a: i32,
    _gpio_b: i32,
    last: BeamReading,
}

impl BeamPair {
    pub fn new(gpio_a: i32, gpio_b: i32) -> Self {
        Self {
            _gpio_a: gpio_a,
            _gpio_b: gpio_b,
            last: BeamReading {
                a_broken: false,
                b_broken: false,
            },
        }
    }

    pub fn read(&mut self) -> BeamReading {
        self.last = BeamReading {
            a_broken: self.read_gpio_a(),
            b_broken: self.read_gpio_b(),
        };
        self.last
    }

    #[cfg(target_os = "espidf")]
    fn read_gpio_a(&self) -> bool {
        crate::drivers::hw_init::gpio_read(crate::pins::BEAM_A_GPIO)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_gpio_a(&self) -> bool {
        SIM_BEAM_A.load(Ordering::Relaxed)
    }

    #[cfg(target_os = "espidf")]
    fn read_gpio_b(&self) -> bool {
        crate::drivers::hw_init::gpio_read(crate::pins::BEAM_B_GPIO)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_gpio_b(&self) -> bool {
        SIM_BEAM_B.load(Ordering::Relaxed)
    }

    /// Anyone currently in the doorway (either beam broken).
    pub fn doorway_occupied(&self) -> bool {
        self.last.a_broken || self.last.b_broken
    }
}
