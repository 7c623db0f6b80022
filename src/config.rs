//! Generator configuration — the seam between the composition front end and
//! the signal core.
//!
//! The sequencer describes a sound as data (usually JSON); `build` turns the
//! description into a running generator. Each name maps to exactly one
//! constructor, and construction errors surface here rather than at `get`
//! time.

use serde::{Deserialize, Serialize};

use crate::dsp::{
    AdsrParams, ConstantGenerator, DelayedGenerator, Generator, SawtoothWaveGenerator,
    SineWaveGenerator, SquareWaveGenerator, StandardEnvelope, VolumeEnvelope,
    WaveFileGenerator,
};
use crate::error::GeneratorError;

fn default_constant() -> f64 {
    1.0
}

/// A serializable description of a generator, with envelopes nesting their
/// source description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    Constant {
        #[serde(default = "default_constant")]
        constant: f64,
    },
    SquareWave {
        frequency: f64,
        #[serde(default)]
        sampling_rate: Option<u32>,
    },
    SawtoothWave {
        frequency: f64,
        #[serde(default)]
        sampling_rate: Option<u32>,
    },
    SineWave {
        frequency: f64,
    },
    WaveFile {
        path: String,
    },
    Delayed {
        source: Box<GeneratorConfig>,
        start_time: f64,
        #[serde(default)]
        sampling_rate: Option<u32>,
    },
    Volume {
        source: Box<GeneratorConfig>,
        volume: f64,
    },
    Standard {
        source: Box<GeneratorConfig>,
        peak: f64,
        level: f64,
        attack: f64,
        decay: f64,
        sustain: f64,
        release: f64,
        #[serde(default)]
        sampling_rate: Option<u32>,
    },
}

impl GeneratorConfig {
    /// Construct the described generator, validating every parameter.
    pub fn build(&self) -> Result<Box<dyn Generator>, GeneratorError> {
        match self {
            GeneratorConfig::Constant { constant } => {
                Ok(Box::new(ConstantGenerator::new(*constant)))
            }
            GeneratorConfig::SquareWave {
                frequency,
                sampling_rate,
            } => {
                let generator = match sampling_rate {
                    Some(rate) => SquareWaveGenerator::with_rate(*frequency, *rate)?,
                    None => SquareWaveGenerator::new(*frequency)?,
                };
                Ok(Box::new(generator))
            }
            GeneratorConfig::SawtoothWave {
                frequency,
                sampling_rate,
            } => {
                let generator = match sampling_rate {
                    Some(rate) => SawtoothWaveGenerator::with_rate(*frequency, *rate)?,
                    None => SawtoothWaveGenerator::new(*frequency)?,
                };
                Ok(Box::new(generator))
            }
            GeneratorConfig::SineWave { frequency } => {
                Ok(Box::new(SineWaveGenerator::new(*frequency)?))
            }
            GeneratorConfig::WaveFile { path } => Ok(Box::new(WaveFileGenerator::new(path)?)),
            GeneratorConfig::Delayed {
                source,
                start_time,
                sampling_rate,
            } => {
                let source = source.build()?;
                let generator = match sampling_rate {
                    Some(rate) => DelayedGenerator::with_rate(source, *start_time, *rate)?,
                    None => DelayedGenerator::new(source, *start_time)?,
                };
                Ok(Box::new(generator))
            }
            GeneratorConfig::Volume { source, volume } => {
                Ok(Box::new(VolumeEnvelope::new(source.build()?, *volume)?))
            }
            GeneratorConfig::Standard {
                source,
                peak,
                level,
                attack,
                decay,
                sustain,
                release,
                sampling_rate,
            } => {
                let params = AdsrParams {
                    peak: *peak,
                    level: *level,
                    attack: *attack,
                    decay: *decay,
                    sustain: *sustain,
                    release: *release,
                };
                let source = source.build()?;
                let generator = match sampling_rate {
                    Some(rate) => StandardEnvelope::with_rate(source, params, *rate)?,
                    None => StandardEnvelope::new(source, params)?,
                };
                Ok(Box::new(generator))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_wave_from_json() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{"type": "square_wave", "frequency": 2.0, "sampling_rate": 4}"#,
        )
        .unwrap();

        let mut generator = config.build().unwrap();
        assert_eq!(generator.get(4).unwrap(), vec![1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn constant_defaults_to_unit() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"type": "constant"}"#).unwrap();
        let mut generator = config.build().unwrap();
        assert_eq!(generator.get(3).unwrap(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn nested_envelopes_from_json() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{
                "type": "volume",
                "volume": 0.33,
                "source": {"type": "constant", "constant": 1.0}
            }"#,
        )
        .unwrap();

        let mut generator = config.build().unwrap();
        assert_eq!(generator.get(64).unwrap(), vec![0.33; 64]);
    }

    #[test]
    fn standard_envelope_from_json() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{
                "type": "standard",
                "source": {"type": "constant"},
                "peak": 0.9,
                "level": 0.8,
                "attack": 0.1,
                "decay": 0.1,
                "sustain": 0.6,
                "release": 0.2,
                "sampling_rate": 20
            }"#,
        )
        .unwrap();

        let mut generator = config.build().unwrap();
        let data = generator.get(3).unwrap();
        assert!((data[0]).abs() < 1e-9);
        assert!((data[1] - 0.45).abs() < 1e-9);
        assert!((data[2] - 0.9).abs() < 1e-9);
    }

    #[test]
    fn unknown_type_rejected() {
        let result: Result<GeneratorConfig, _> =
            serde_json::from_str(r#"{"type": "theremin", "frequency": 100.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_parameter_surfaces_from_build() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"type": "sine_wave", "frequency": -5.0}"#).unwrap();
        assert!(matches!(
            config.build(),
            Err(GeneratorError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GeneratorConfig::Delayed {
            source: Box::new(GeneratorConfig::SineWave { frequency: 441.0 }),
            start_time: 0.5,
            sampling_rate: None,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: GeneratorConfig = serde_json::from_str(&json).unwrap();

        let mut a = config.build().unwrap();
        let mut b = parsed.build().unwrap();
        assert_eq!(a.get(128).unwrap(), b.get(128).unwrap());
    }
}
