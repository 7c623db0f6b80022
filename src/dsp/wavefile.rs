//! Wave-file playback — a decoded PCM buffer read out as a sample stream.
//!
//! Decoding happens once at construction. The decoded buffer is immutable
//! and can be shared across any number of generators; each generator keeps
//! its own read cursor.

use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::error::{GeneratorError, WaveFileError};

use super::generator::Generator;

/// A mono sample buffer decoded into memory.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    /// Mono f64 samples in [-1, 1].
    pub data: Vec<f64>,
    /// Native sample rate of the audio.
    pub sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(data: Vec<f64>, sample_rate: u32) -> Self {
        SampleBuffer { data, sample_rate }
    }

    /// Create from 16-bit signed PCM data.
    pub fn from_i16(pcm: &[i16], sample_rate: u32) -> Self {
        let data: Vec<f64> = pcm.iter().map(|&s| s as f64 / 32768.0).collect();
        SampleBuffer { data, sample_rate }
    }

    /// Decode a WAV file into a mono buffer.
    ///
    /// Integer and float sample formats are normalized to [-1, 1];
    /// interleaved channels are averaged down to mono.
    pub fn from_wave_file<P: AsRef<Path>>(path: P) -> Result<Self, WaveFileError> {
        let path_str = path.as_ref().display().to_string();

        let reader = hound::WavReader::open(&path).map_err(|e| match e {
            hound::Error::IoError(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                WaveFileError::NotFound { path: path_str.clone() }
            }
            other => WaveFileError::Decode {
                path: path_str.clone(),
                reason: other.to_string(),
            },
        })?;

        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let decode_err = |e: hound::Error| WaveFileError::Decode {
            path: path_str.clone(),
            reason: e.to_string(),
        };

        let interleaved: Vec<f64> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .map(|s| s.map(|v| v as f64))
                .collect::<Result<_, _>>()
                .map_err(decode_err)?,
            hound::SampleFormat::Int => {
                let full_scale = (1u32 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / full_scale))
                    .collect::<Result<_, _>>()
                    .map_err(decode_err)?
            }
        };

        let data = if channels == 1 {
            interleaved
        } else {
            interleaved
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f64>() / frame.len() as f64)
                .collect()
        };

        Ok(SampleBuffer::new(data, spec.sample_rate))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Streams a decoded wave file, then silence once the buffer is exhausted.
///
/// Over-reading never errors and the stream never loops; everything past the
/// end of the buffer is 0.0.
#[derive(Debug, Clone)]
pub struct WaveFileGenerator {
    buffer: Arc<SampleBuffer>,
    cursor: usize,
}

impl WaveFileGenerator {
    /// Decode a WAV file and stream it. Missing or unreadable files fail
    /// here, not at `get` time.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, GeneratorError> {
        let buffer = SampleBuffer::from_wave_file(path)?;
        Ok(WaveFileGenerator {
            buffer: Arc::new(buffer),
            cursor: 0,
        })
    }

    /// Stream an already-decoded buffer, sharing it with other generators.
    pub fn from_buffer(buffer: Arc<SampleBuffer>) -> Self {
        WaveFileGenerator { buffer, cursor: 0 }
    }
}

impl Generator for WaveFileGenerator {
    fn next_sample(&mut self) -> f64 {
        let sample = self.buffer.data.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor = self.cursor.saturating_add(1);
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pads_after_exhaustion() {
        let buffer = Arc::new(SampleBuffer::new(vec![0.25, -0.25, 0.5], 44100));
        let mut wav = WaveFileGenerator::from_buffer(buffer);

        let data = wav.get(6).unwrap();
        assert_eq!(data, vec![0.25, -0.25, 0.5, 0.0, 0.0, 0.0]);

        // Exhausted stream stays silent, never wraps around.
        assert_eq!(wav.get(4).unwrap(), vec![0.0; 4]);
    }

    #[test]
    fn shared_buffer_independent_cursors() {
        let buffer = Arc::new(SampleBuffer::new(vec![0.1, 0.2, 0.3, 0.4], 44100));
        let mut a = WaveFileGenerator::from_buffer(Arc::clone(&buffer));
        let mut b = WaveFileGenerator::from_buffer(Arc::clone(&buffer));

        assert_eq!(a.get(2).unwrap(), vec![0.1, 0.2]);
        // b's cursor is private, unaffected by a's reads.
        assert_eq!(b.get(4).unwrap(), vec![0.1, 0.2, 0.3, 0.4]);
        assert_eq!(a.get(2).unwrap(), vec![0.3, 0.4]);
    }

    #[test]
    fn from_i16_normalizes() {
        let buffer = SampleBuffer::from_i16(&[0, 16384, -16384, -32768], 44100);
        assert_eq!(buffer.len(), 4);
        assert!(buffer.data[0].abs() < 1e-9);
        assert!((buffer.data[1] - 0.5).abs() < 0.001);
        assert!((buffer.data[2] + 0.5).abs() < 0.001);
        assert!((buffer.data[3] + 1.0).abs() < 0.001);
    }

    #[test]
    fn missing_file_fails_at_construction() {
        let err = WaveFileGenerator::new("/nonexistent/missing.wav").unwrap_err();
        match err {
            GeneratorError::WaveFile(WaveFileError::NotFound { path }) => {
                assert!(path.contains("missing.wav"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn decodes_written_wav() {
        let path = std::env::temp_dir().join(format!(
            "wavesmith_core_decode_{}.wav",
            std::process::id()
        ));

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for &s in &[0i16, 16384, -16384, 8192] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let mut wav = WaveFileGenerator::new(&path).unwrap();
        let data = wav.get(6).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(data[0].abs() < 1e-9);
        assert!((data[1] - 0.5).abs() < 0.001);
        assert!((data[2] + 0.5).abs() < 0.001);
        assert!((data[3] - 0.25).abs() < 0.001);
        // Past the 4 written samples: silence.
        assert_eq!(data[4], 0.0);
        assert_eq!(data[5], 0.0);
    }
}
