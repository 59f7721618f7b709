//! Fixed one-second waveform window.
//!
//! Every clip goes through [`normalize_clip`] before feature extraction so all
//! feature tensors of a run share one shape.

use super::{Clip, resample::resample_mono};
use crate::error::Result;

/// Target of the length normalization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipWindow {
    pub sample_rate: u32,
    pub seconds: f32,
}

impl ClipWindow {
    pub const fn new(sample_rate: u32, seconds: f32) -> Self {
        Self {
            sample_rate,
            seconds,
        }
    }

    /// Exact sample count of a normalized clip.
    pub fn samples(&self) -> usize {
        (self.sample_rate as f32 * self.seconds).round() as usize
    }
}

impl Default for ClipWindow {
    fn default() -> Self {
        Self::new(
            crate::constants::CANONICAL_SAMPLE_RATE,
            crate::constants::CLIP_SECONDS,
        )
    }
}

/// Truncate to the first `target` samples or right-pad with zeros.
pub fn fit_to_length(mut samples: Vec<f32>, target: usize) -> Vec<f32> {
    samples.resize(target, 0.0);
    samples
}

/// Resample to the window's rate (when needed), then fit to its length.
pub fn normalize_clip(clip: Clip, window: &ClipWindow) -> Result<Vec<f32>> {
    let samples = if clip.sample_rate != window.sample_rate {
        resample_mono(&clip.samples, clip.sample_rate, window.sample_rate)?
    } else {
        clip.samples
    };
    Ok(fit_to_length(samples, window.samples()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_one_second_at_16k() {
        assert_eq!(ClipWindow::default().samples(), 16000);
    }

    #[test]
    fn short_clip_is_zero_padded() {
        let out = fit_to_length(vec![1.0, 2.0, 3.0], 5);
        assert_eq!(out, vec![1.0, 2.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn long_clip_keeps_its_head() {
        let out = fit_to_length((0..10).map(|v| v as f32).collect(), 4);
        assert_eq!(out, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn every_length_lands_on_target() {
        let window = ClipWindow::default();
        for len in [0usize, 1, 9_999, 16_000, 16_001, 48_000] {
            let clip = Clip::new(vec![0.25; len], 16000);
            assert_eq!(normalize_clip(clip, &window).unwrap().len(), 16000, "len {len}");
        }
    }

    #[test]
    fn foreign_rates_are_resampled_then_fitted() {
        let window = ClipWindow::default();
        for (len, sr) in [(8_000usize, 8_000u32), (22_050, 22_050), (30_000, 44_100)] {
            let clip = Clip::new(vec![0.1; len], sr);
            assert_eq!(normalize_clip(clip, &window).unwrap().len(), 16000, "sr {sr}");
        }
    }
}
