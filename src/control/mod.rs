//! Actuator control policies.

pub mod fan;
