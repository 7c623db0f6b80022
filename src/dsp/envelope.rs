//! Amplitude envelopes — gain functions applied over a source generator.
//!
//! An envelope multiplies its source's samples by a time-varying gain and is
//! itself a [`Generator`], so envelopes stack (volume scaling over an ADSR
//! contour, for example).

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

use super::generator::{Generator, SAMPLING_RATE};

/// Constant-gain envelope: every sample is scaled by `volume`.
pub struct VolumeEnvelope {
    source: Box<dyn Generator>,
    volume: f64,
}

impl VolumeEnvelope {
    pub fn new(source: Box<dyn Generator>, volume: f64) -> Result<Self, GeneratorError> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(GeneratorError::InvalidParameter {
                component: "VolumeEnvelope",
                parameter: "volume",
                value: volume,
            });
        }
        Ok(VolumeEnvelope { source, volume })
    }
}

impl Generator for VolumeEnvelope {
    fn next_sample(&mut self) -> f64 {
        self.source.next_sample() * self.volume
    }
}

/// ADSR envelope parameters. Durations are in seconds; `peak` is the gain at
/// the end of the attack ramp and `level` the gain held through sustain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdsrParams {
    pub peak: f64,
    pub level: f64,
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

/// The phase an envelope cursor position falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Attack,
    Decay,
    Sustain,
    Release,
    Silent,
}

/// Four-stage ADSR envelope with a final release to exactly zero.
///
/// The four durations are converted to fixed sample-count boundaries at
/// construction. Gain is piecewise linear over half-open phases measured
/// from the envelope's first sample:
///
/// | phase   | cursor range                 | gain                 |
/// |---------|------------------------------|----------------------|
/// | attack  | `[0, attack_end)`            | ramp `0 → peak`      |
/// | decay   | `[attack_end, decay_end)`    | ramp `peak → level`  |
/// | sustain | `[decay_end, sustain_end)`   | `level`              |
/// | release | `[sustain_end, release_end)` | ramp `level → 0`     |
/// | silent  | `[release_end, ∞)`           | `0.0`                |
///
/// A zero-duration phase is an empty interval and is skipped. The silent
/// stage is terminal: every later sample is 0.0 no matter how much more is
/// requested.
pub struct StandardEnvelope {
    source: Box<dyn Generator>,
    peak: f64,
    level: f64,
    attack_end: u64,
    decay_end: u64,
    sustain_end: u64,
    release_end: u64,
    cursor: u64,
}

impl StandardEnvelope {
    pub fn new(source: Box<dyn Generator>, params: AdsrParams) -> Result<Self, GeneratorError> {
        Self::with_rate(source, params, SAMPLING_RATE)
    }

    pub fn with_rate(
        source: Box<dyn Generator>,
        params: AdsrParams,
        sampling_rate: u32,
    ) -> Result<Self, GeneratorError> {
        let gains = [("peak", params.peak), ("level", params.level)];
        for (name, value) in gains {
            if !value.is_finite() || value < 0.0 {
                return Err(GeneratorError::InvalidParameter {
                    component: "StandardEnvelope",
                    parameter: name,
                    value,
                });
            }
        }

        let durations = [
            ("attack", params.attack),
            ("decay", params.decay),
            ("sustain", params.sustain),
            ("release", params.release),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(GeneratorError::InvalidParameter {
                    component: "StandardEnvelope",
                    parameter: name,
                    value,
                });
            }
        }

        if sampling_rate == 0 {
            return Err(GeneratorError::InvalidParameter {
                component: "StandardEnvelope",
                parameter: "sampling_rate",
                value: 0.0,
            });
        }

        let rate = sampling_rate as f64;
        let attack_end = (params.attack * rate).round() as u64;
        let decay_end = attack_end + (params.decay * rate).round() as u64;
        let sustain_end = decay_end + (params.sustain * rate).round() as u64;
        let release_end = sustain_end + (params.release * rate).round() as u64;

        Ok(StandardEnvelope {
            source,
            peak: params.peak,
            level: params.level,
            attack_end,
            decay_end,
            sustain_end,
            release_end,
            cursor: 0,
        })
    }

    /// The stage the next produced sample will fall in.
    pub fn stage(&self) -> Stage {
        self.stage_at(self.cursor)
    }

    fn stage_at(&self, t: u64) -> Stage {
        if t < self.attack_end {
            Stage::Attack
        } else if t < self.decay_end {
            Stage::Decay
        } else if t < self.sustain_end {
            Stage::Sustain
        } else if t < self.release_end {
            Stage::Release
        } else {
            Stage::Silent
        }
    }

    fn gain_at(&self, t: u64) -> f64 {
        match self.stage_at(t) {
            Stage::Attack => self.peak * t as f64 / self.attack_end as f64,
            Stage::Decay => {
                let len = (self.decay_end - self.attack_end) as f64;
                let progress = (t - self.attack_end) as f64 / len;
                self.peak + (self.level - self.peak) * progress
            }
            Stage::Sustain => self.level,
            Stage::Release => {
                let len = (self.release_end - self.sustain_end) as f64;
                let progress = (t - self.sustain_end) as f64 / len;
                self.level * (1.0 - progress)
            }
            Stage::Silent => 0.0,
        }
    }
}

impl Generator for StandardEnvelope {
    fn next_sample(&mut self) -> f64 {
        let gain = self.gain_at(self.cursor);
        self.cursor += 1;
        // The source is pulled even while silent so both cursors stay in
        // lockstep for stacked envelopes.
        self.source.next_sample() * gain
    }
}
