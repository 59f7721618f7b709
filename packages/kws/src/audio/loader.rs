//! **WAV decoding → mono `f32`**
//!
//! 1. Open the file with `hound` and validate the sample format.
//! 2. Scale integer PCM to `[-1, 1)` by `2^(bits-1)`; float PCM passes through.
//! 3. Down-mix interleaved channels by averaging.
//!
//! Resampling and length fixing happen later, see [`super::fixed_length`].

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use hound::{SampleFormat, WavReader};

use crate::error::{KwsError, Result};

/// Decoded clip at its native sample rate.
#[derive(Clone, Debug, PartialEq)]
pub struct Clip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Clip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// All-zero clip, handy for synthetic data sets.
    pub fn silence(len: usize, sample_rate: u32) -> Self {
        Self::new(vec![0.0; len], sample_rate)
    }
}

/// Turns a sample path into a decoded [`Clip`].
///
/// The file system implementation is [`WavLoader`]; tests plug in an
/// in-memory map so the training core never touches real audio.
pub trait ClipLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Clip>;
}

/// [`ClipLoader`] backed by `hound`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WavLoader;

impl ClipLoader for WavLoader {
    fn load(&self, path: &Path) -> Result<Clip> {
        let file = std::fs::File::open(path).map_err(|e| KwsError::io(path, e))?;
        decode_wav(std::io::BufReader::new(file), path)
    }
}

/// Decode any WAV byte stream. `origin` is only used in error messages.
pub fn decode_wav<R: Read>(reader: R, origin: &Path) -> Result<Clip> {
    let wav_err = |source| KwsError::Wav {
        path: PathBuf::from(origin),
        source,
    };

    let wav = WavReader::new(reader).map_err(wav_err)?;
    let spec = wav.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Int if (1..=32).contains(&spec.bits_per_sample) => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
            wav.into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(wav_err)?
        }
        SampleFormat::Float if spec.bits_per_sample == 32 => wav
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(wav_err)?,
        SampleFormat::Int => {
            return Err(KwsError::UnsupportedFormat {
                kind: "int",
                bits: spec.bits_per_sample,
            });
        }
        SampleFormat::Float => {
            return Err(KwsError::UnsupportedFormat {
                kind: "float",
                bits: spec.bits_per_sample,
            });
        }
    };

    Ok(Clip::new(downmix(&interleaved, channels), spec.sample_rate))
}

/// Average interleaved frames into a single channel.
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    let inv = 1.0 / channels as f32;
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * inv)
        .collect()
}

/* --------------------------------------------------------------------- */
/*  Unit-tests                                                           */

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wav_bytes(spec: hound::WavSpec, samples: &[i16]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn int16_is_scaled_to_unit_range() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, &[0, 16384, -32768]);
        let clip = decode_wav(Cursor::new(bytes), Path::new("mem.wav")).unwrap();
        assert_eq!(clip.sample_rate, 8000);
        assert_eq!(clip.samples, vec![0.0, 0.5, -1.0]);
    }

    #[test]
    fn stereo_is_downmixed() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, &[16384, 0, -16384, -16384]);
        let clip = decode_wav(Cursor::new(bytes), Path::new("mem.wav")).unwrap();
        assert_eq!(clip.samples, vec![0.25, -0.5]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = WavLoader
            .load(Path::new("/definitely/not/here.wav"))
            .unwrap_err();
        assert!(matches!(err, KwsError::NotFound(_)));
    }

    #[test]
    fn garbage_is_a_wav_error() {
        let err = decode_wav(Cursor::new(b"not a riff".to_vec()), Path::new("x.wav")).unwrap_err();
        assert!(matches!(err, KwsError::Wav { .. }));
    }
}
