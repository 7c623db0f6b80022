//! The `Generator` capability — a lazy, continuable stream of samples.

use crate::error::GeneratorError;

/// Process-wide default sampling rate in samples per second.
pub const SAMPLING_RATE: u32 = 44_100;

/// A source of mono `f64` samples pulled one at a time.
///
/// Every generator owns a cursor that advances once per produced sample and
/// is never reset, so successive `get` calls return consecutive,
/// non-overlapping chunks of one continuous stream. Instances are
/// single-consumer: sharing one across independent streams would collide on
/// the cursor.
///
/// Envelopes implement this trait too, so a shaped generator is itself a
/// valid source for further wrapping.
pub trait Generator {
    /// Produce the next sample and advance the cursor by one.
    fn next_sample(&mut self) -> f64;

    /// Produce the next `count` samples as one buffer.
    ///
    /// Rejects `count == 0`; any positive count succeeds and advances the
    /// stream by exactly `count` samples.
    fn get(&mut self, count: usize) -> Result<Vec<f64>, GeneratorError> {
        if count == 0 {
            return Err(GeneratorError::InvalidSampleCount);
        }
        Ok((0..count).map(|_| self.next_sample()).collect())
    }
}

impl Generator for Box<dyn Generator> {
    fn next_sample(&mut self) -> f64 {
        (**self).next_sample()
    }
}
