//! Periodic waveform generators: constant, square, sawtooth, and sine.
//!
//! The square and sawtooth waves work on an integer period of
//! `round(rate / frequency)` samples so the low-rate test fixtures used by
//! the composition layer come out exact.

use std::f64::consts::TAU;

use crate::error::GeneratorError;

use super::generator::{Generator, SAMPLING_RATE};

fn check_frequency(component: &'static str, frequency: f64) -> Result<(), GeneratorError> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(GeneratorError::InvalidParameter {
            component,
            parameter: "frequency",
            value: frequency,
        });
    }
    Ok(())
}

fn check_rate(component: &'static str, sampling_rate: u32) -> Result<(), GeneratorError> {
    if sampling_rate == 0 {
        return Err(GeneratorError::InvalidParameter {
            component,
            parameter: "sampling_rate",
            value: 0.0,
        });
    }
    Ok(())
}

/// Integer period length in samples, never shorter than one sample.
fn period_samples(frequency: f64, sampling_rate: u32) -> u64 {
    let period = (sampling_rate as f64 / frequency).round() as u64;
    period.max(1)
}

/// Emits the same value for every sample.
#[derive(Debug, Clone)]
pub struct ConstantGenerator {
    constant: f64,
}

impl ConstantGenerator {
    pub fn new(constant: f64) -> Self {
        ConstantGenerator { constant }
    }
}

impl Default for ConstantGenerator {
    fn default() -> Self {
        ConstantGenerator { constant: 1.0 }
    }
}

impl Generator for ConstantGenerator {
    fn next_sample(&mut self) -> f64 {
        self.constant
    }
}

/// Alternates +1.0 / -1.0 over a period of `round(rate / frequency)` samples.
///
/// The first half of each period is high. When the period exceeds the
/// requested sample count the output never leaves the high half and the
/// stream is constant +1.0.
#[derive(Debug, Clone)]
pub struct SquareWaveGenerator {
    period: u64,
    high_samples: u64,
    cursor: u64,
}

impl SquareWaveGenerator {
    pub fn new(frequency: f64) -> Result<Self, GeneratorError> {
        Self::with_rate(frequency, SAMPLING_RATE)
    }

    /// Two-argument form: the second argument overrides the sampling rate,
    /// shortening or stretching the period accordingly.
    pub fn with_rate(frequency: f64, sampling_rate: u32) -> Result<Self, GeneratorError> {
        check_frequency("SquareWaveGenerator", frequency)?;
        check_rate("SquareWaveGenerator", sampling_rate)?;

        let period = period_samples(frequency, sampling_rate);
        Ok(SquareWaveGenerator {
            period,
            // Odd periods put the extra sample in the high half.
            high_samples: period.div_ceil(2),
            cursor: 0,
        })
    }
}

impl Generator for SquareWaveGenerator {
    fn next_sample(&mut self) -> f64 {
        let phase = self.cursor % self.period;
        self.cursor += 1;
        if phase < self.high_samples { 1.0 } else { -1.0 }
    }
}

/// Linear ramp from -1.0 up to just below +1.0, restarting each period.
///
/// The step per sample is `2.0 / period`, so frequency 2 at rate 8 yields
/// `[-1.0, -0.5, 0.0, 0.5]` repeating.
#[derive(Debug, Clone)]
pub struct SawtoothWaveGenerator {
    period: u64,
    step: f64,
    cursor: u64,
}

impl SawtoothWaveGenerator {
    pub fn new(frequency: f64) -> Result<Self, GeneratorError> {
        Self::with_rate(frequency, SAMPLING_RATE)
    }

    pub fn with_rate(frequency: f64, sampling_rate: u32) -> Result<Self, GeneratorError> {
        check_frequency("SawtoothWaveGenerator", frequency)?;
        check_rate("SawtoothWaveGenerator", sampling_rate)?;

        let period = period_samples(frequency, sampling_rate);
        Ok(SawtoothWaveGenerator {
            period,
            step: 2.0 / period as f64,
            cursor: 0,
        })
    }
}

impl Generator for SawtoothWaveGenerator {
    fn next_sample(&mut self) -> f64 {
        let phase = self.cursor % self.period;
        self.cursor += 1;
        -1.0 + phase as f64 * self.step
    }
}

/// `sin(2π · frequency · t / rate)` sampled at the sampling rate.
#[derive(Debug, Clone)]
pub struct SineWaveGenerator {
    frequency: f64,
    sampling_rate: u32,
    cursor: u64,
}

impl SineWaveGenerator {
    pub fn new(frequency: f64) -> Result<Self, GeneratorError> {
        Self::with_rate(frequency, SAMPLING_RATE)
    }

    pub fn with_rate(frequency: f64, sampling_rate: u32) -> Result<Self, GeneratorError> {
        check_frequency("SineWaveGenerator", frequency)?;
        check_rate("SineWaveGenerator", sampling_rate)?;

        Ok(SineWaveGenerator {
            frequency,
            sampling_rate,
            cursor: 0,
        })
    }
}

impl Generator for SineWaveGenerator {
    fn next_sample(&mut self) -> f64 {
        let t = self.cursor as f64;
        self.cursor += 1;

        // Evaluate the second half-cycle through sin(x + π) = -sin(x) so
        // rounding can never push a half-period boundary sample across zero:
        // the first half is always >= 0, the second always <= 0.
        let phase = (self.frequency * t / self.sampling_rate as f64).fract();
        if phase < 0.5 {
            (TAU * phase).sin()
        } else {
            -(TAU * (phase - 0.5)).sin()
        }
    }
}
