//! Offline renderer — pulls a generator into buffers and WAV byte vectors.

use crate::error::GeneratorError;

use super::generator::Generator;

/// Pull `count` samples and narrow them to f32 for playback buffers.
pub fn render_f32(generator: &mut dyn Generator, count: usize) -> Result<Vec<f32>, GeneratorError> {
    Ok(generator.get(count)?.iter().map(|&s| s as f32).collect())
}

/// Pull `count` samples and render them as a mono 16-bit PCM WAV byte buffer.
pub fn render_wav(
    generator: &mut dyn Generator,
    count: usize,
    sample_rate: u32,
) -> Result<Vec<u8>, GeneratorError> {
    let pcm = to_pcm_i16(&generator.get(count)?);
    Ok(encode_wav(&pcm, sample_rate, 1))
}

/// Clamp f64 samples to [-1, 1] and quantize to 16-bit PCM.
pub fn to_pcm_i16(samples: &[f64]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
        .collect()
}

/// Encode interleaved i16 PCM samples to a WAV byte buffer.
fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * (bits_per_sample as u32 / 8);
    let block_align = channels * (bits_per_sample / 8);
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::generator::SAMPLING_RATE;
    use crate::dsp::oscillator::{ConstantGenerator, SineWaveGenerator};

    #[test]
    fn wav_header_valid() {
        let mut sine = SineWaveGenerator::new(440.0).unwrap();
        let wav = render_wav(&mut sine, 4410, SAMPLING_RATE).unwrap();

        // Check RIFF header
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");

        // Check sample rate
        let sr = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(sr, SAMPLING_RATE);

        // Check channels (mono)
        let ch = u16::from_le_bytes([wav[22], wav[23]]);
        assert_eq!(ch, 1);
    }

    #[test]
    fn wav_size_correct() {
        let mut silence = ConstantGenerator::new(0.0);
        let wav = render_wav(&mut silence, 22050, SAMPLING_RATE).unwrap();

        // 22050 mono samples * 2 bytes = 44100 data bytes
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size, 44100);
        assert_eq!(wav.len(), 44 + 44100);
    }

    #[test]
    fn pcm_quantization_clamps() {
        let pcm = to_pcm_i16(&[0.0, 1.0, -1.0, 2.0, -2.0]);
        assert_eq!(pcm, vec![0, 32767, -32767, 32767, -32767]);
    }

    #[test]
    fn render_f32_narrows() {
        let mut c = ConstantGenerator::new(0.25);
        let samples = render_f32(&mut c, 8).unwrap();
        assert_eq!(samples, vec![0.25f32; 8]);
    }
}
