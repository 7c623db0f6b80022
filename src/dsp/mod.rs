//! Signal-processing core — deterministic sample generation and envelope
//! shaping.
//!
//! All generation runs in pure Rust with no I/O during `get` (wave files are
//! decoded once at construction). The same code powers both the WASM
//! bindings and native offline rendering.

pub mod delay;
pub mod envelope;
pub mod generator;
pub mod oscillator;
pub mod renderer;
pub mod wavefile;

pub use delay::DelayedGenerator;
pub use envelope::{AdsrParams, StandardEnvelope, VolumeEnvelope};
pub use generator::{Generator, SAMPLING_RATE};
pub use oscillator::{
    ConstantGenerator, SawtoothWaveGenerator, SineWaveGenerator, SquareWaveGenerator,
};
pub use wavefile::{SampleBuffer, WaveFileGenerator};
