//! Time-shifting a generator by a silent pre-roll.

use crate::error::GeneratorError;

use super::generator::{Generator, SAMPLING_RATE};

/// Emits silence for `start_time` seconds, then forwards the wrapped source.
///
/// The delay applies to when the source begins being read, not to the
/// source's internal time: once the pre-roll elapses the source's stream
/// starts at its own sample 0.
pub struct DelayedGenerator {
    source: Box<dyn Generator>,
    delay_samples: u64,
    cursor: u64,
}

impl DelayedGenerator {
    pub fn new(source: Box<dyn Generator>, start_time: f64) -> Result<Self, GeneratorError> {
        Self::with_rate(source, start_time, SAMPLING_RATE)
    }

    pub fn with_rate(
        source: Box<dyn Generator>,
        start_time: f64,
        sampling_rate: u32,
    ) -> Result<Self, GeneratorError> {
        if !start_time.is_finite() || start_time < 0.0 {
            return Err(GeneratorError::InvalidParameter {
                component: "DelayedGenerator",
                parameter: "start_time",
                value: start_time,
            });
        }
        if sampling_rate == 0 {
            return Err(GeneratorError::InvalidParameter {
                component: "DelayedGenerator",
                parameter: "sampling_rate",
                value: 0.0,
            });
        }

        Ok(DelayedGenerator {
            source,
            delay_samples: (start_time * sampling_rate as f64).round() as u64,
            cursor: 0,
        })
    }
}

impl Generator for DelayedGenerator {
    fn next_sample(&mut self) -> f64 {
        if self.cursor < self.delay_samples {
            self.cursor += 1;
            0.0
        } else {
            self.cursor += 1;
            self.source.next_sample()
        }
    }
}
