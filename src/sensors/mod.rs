//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`]
//! once per control cycle for the decision engine.

pub mod beams;
pub mod dust;
pub mod gas;

use beams::BeamPair;
use dust::DustSensor;
use gas::GasSensor;

/// A point-in-time snapshot of every sensor in the system.
/// Ephemeral — recomputed each cycle, never retained.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorSnapshot {
    /// Raw gas reading (0 – 1023).
    pub gas_raw: u16,
    /// Particulate density (µg/m³, never negative).
    pub dust_ug_m3: f32,
    /// Beam A currently broken.
    pub beam_a: bool,
    /// Beam B currently broken.
    pub beam_b: bool,
}

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub {
    pub gas: GasSensor,
    pub dust: DustSensor,
    pub beams: BeamPair,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(gas: GasSensor, dust: DustSensor, beams: BeamPair) -> Self {
        Self { gas, dust, beams }
    }

    /// Read every sensor and return a unified snapshot.
    ///
    /// The dust read blocks for its fixed ~0.32 ms pulse window; nothing
    /// else may interleave with it, which the single-threaded control
    /// loop guarantees.
    pub fn read_all(&mut self) -> SensorSnapshot {
        let gas = self.gas.read();
        let dust = self.dust.read();
        let beams = self.beams.read();

        SensorSnapshot {
            gas_raw: gas.raw,
            dust_ug_m3: dust.ug_m3,
            beam_a: beams.a_broken,
            beam_b: beams.b_broken,
        }
    }
}
