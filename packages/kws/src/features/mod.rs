//! Spectral front-ends.
//!
//! A [`FeatureExtractor`] maps one length-normalised waveform to a flattened
//! `(rows, cols)` tensor. Two are provided:
//!
//! * [`LogMelFeatures`] – 64-bin log2 Mel spectrogram, standardised per sample
//!   (binarized pipeline).
//! * [`MfccFeatures`] – 40 MFCCs over a 40-bin Mel spectrogram (reference
//!   pipeline).

mod mel;
mod mfcc;
mod normalizer;

pub use mel::MelSpectrogram;
pub use mfcc::Mfcc;
pub use normalizer::{FeatureNormalizer, mean_std};

use crate::{
    audio::ClipWindow,
    constants::{
        LOG_MEL_BINS, LOG_MEL_HOP, LOG_MEL_N_FFT, MFCC_COEFFS, MFCC_HOP, MFCC_MEL_BINS,
        MFCC_N_FFT, STANDARDIZE_EPS,
    },
    error::{KwsError, Result},
};

pub trait FeatureExtractor: Send + Sync {
    /// `(rows, cols)` of one feature tensor.
    fn shape(&self) -> (usize, usize);

    /// Flattened feature length (`rows * cols`).
    fn feature_len(&self) -> usize {
        let (rows, cols) = self.shape();
        rows * cols
    }

    /// Extract the row-major flattened features of a normalised waveform.
    fn extract(&self, waveform: &[f32]) -> Result<Vec<f32>>;
}

fn check_len(window: &ClipWindow, waveform: &[f32]) -> Result<()> {
    let expected = window.samples();
    if waveform.len() != expected {
        return Err(KwsError::ShapeMismatch {
            expected,
            got: waveform.len(),
        });
    }
    Ok(())
}

/* ───────────────────────── log-Mel ───────────────────────── */

pub struct LogMelFeatures {
    window: ClipWindow,
    mel: MelSpectrogram,
    eps: f32,
}

impl LogMelFeatures {
    pub fn new(window: ClipWindow, n_mels: usize, n_fft: usize, hop: usize, eps: f32) -> Self {
        Self {
            mel: MelSpectrogram::new(window.sample_rate, n_fft, hop, n_mels),
            window,
            eps,
        }
    }
}

impl Default for LogMelFeatures {
    fn default() -> Self {
        Self::new(
            ClipWindow::default(),
            LOG_MEL_BINS,
            LOG_MEL_N_FFT,
            LOG_MEL_HOP,
            STANDARDIZE_EPS,
        )
    }
}

impl FeatureExtractor for LogMelFeatures {
    fn shape(&self) -> (usize, usize) {
        (self.mel.n_mels(), self.mel.frames(self.window.samples()))
    }

    fn extract(&self, waveform: &[f32]) -> Result<Vec<f32>> {
        check_len(&self.window, waveform)?;
        // empty bins are floored so silence stays finite
        let mut flat: Vec<f32> = self
            .mel
            .compute(waveform)
            .into_iter()
            .flatten()
            .map(|v| v.max(f32::MIN_POSITIVE).log2())
            .collect();
        FeatureNormalizer::standardize(&mut flat, self.eps);
        Ok(flat)
    }
}

/* ───────────────────────── MFCC ───────────────────────── */

pub struct MfccFeatures {
    window: ClipWindow,
    mfcc: Mfcc,
}

impl MfccFeatures {
    pub fn new(window: ClipWindow, n_mfcc: usize, n_mels: usize, n_fft: usize, hop: usize) -> Self {
        Self {
            mfcc: Mfcc::new(window.sample_rate, n_fft, hop, n_mels, n_mfcc),
            window,
        }
    }
}

impl Default for MfccFeatures {
    fn default() -> Self {
        Self::new(
            ClipWindow::default(),
            MFCC_COEFFS,
            MFCC_MEL_BINS,
            MFCC_N_FFT,
            MFCC_HOP,
        )
    }
}

impl FeatureExtractor for MfccFeatures {
    fn shape(&self) -> (usize, usize) {
        (self.mfcc.n_mfcc(), self.mfcc.frames(self.window.samples()))
    }

    fn extract(&self, waveform: &[f32]) -> Result<Vec<f32>> {
        check_len(&self.window, waveform)?;
        Ok(self.mfcc.compute(waveform).into_iter().flatten().collect())
    }
}
