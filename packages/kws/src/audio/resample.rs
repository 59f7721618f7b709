//! Single-point mono resampler (rubato `FftFixedIn`).
//!
//! The output is aligned with the input: the resampler's output delay is
//! dropped and the result holds exactly `ceil(len · sr_out / sr_in)` samples.

use rubato::{FftFixedIn, Resampler};

use crate::error::Result;

const CHUNK: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Resample `input` from `sr_in` to `sr_out` Hz.
pub fn resample_mono(input: &[f32], sr_in: u32, sr_out: u32) -> Result<Vec<f32>> {
    if sr_in == sr_out || input.is_empty() {
        return Ok(input.to_vec());
    }

    let mut resampler =
        FftFixedIn::<f32>::new(sr_in as usize, sr_out as usize, CHUNK, SUB_CHUNKS, 1)?;

    let expected = (input.len() as u64 * sr_out as u64).div_ceil(sr_in as u64) as usize;
    let delay = resampler.output_delay();
    let wanted = delay + expected;
    let mut out = Vec::with_capacity(wanted + CHUNK);

    // Feed the clip, then zeros, until the delayed tail has been flushed out.
    let mut pos = 0;
    while out.len() < wanted {
        let need = resampler.input_frames_next();
        let mut chunk = vec![0.0f32; need];
        if pos < input.len() {
            let end = (pos + need).min(input.len());
            chunk[..end - pos].copy_from_slice(&input[pos..end]);
            pos = end;
        }
        let frames = resampler.process(&[chunk], None)?;
        out.extend_from_slice(&frames[0]);
    }

    Ok(out[delay..wanted].to_vec())
}
