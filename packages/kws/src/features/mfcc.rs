//! Mel-frequency cepstral coefficients.
//!
//! power mel → dB (`10·log10(max(x, amin))`, clamped to `top_db` below the
//! clip's peak) → orthonormal DCT-II over the mel axis. Output is
//! `[coeff][frame]`.

use std::f64::consts::PI;

use super::MelSpectrogram;
use crate::constants::{MFCC_AMIN, MFCC_TOP_DB};

pub struct Mfcc {
    mel: MelSpectrogram,
    dct: Vec<Vec<f32>>, // [coeff][mel_bin]
}

impl Mfcc {
    pub fn new(sample_rate: u32, n_fft: usize, hop: usize, n_mels: usize, n_mfcc: usize) -> Self {
        Self {
            mel: MelSpectrogram::new(sample_rate, n_fft, hop, n_mels),
            dct: dct_ortho(n_mfcc, n_mels),
        }
    }

    pub fn n_mfcc(&self) -> usize {
        self.dct.len()
    }

    pub fn frames(&self, len: usize) -> usize {
        self.mel.frames(len)
    }

    pub fn compute(&self, signal: &[f32]) -> Vec<Vec<f32>> {
        let mut db = self.mel.compute(signal);
        power_to_db(&mut db);

        let frames = db.first().map_or(0, Vec::len);
        self.dct
            .iter()
            .map(|basis| {
                (0..frames)
                    .map(|t| basis.iter().zip(&db).map(|(b, row)| b * row[t]).sum())
                    .collect()
            })
            .collect()
    }
}

/// In-place power → decibel conversion with a `top_db` floor.
fn power_to_db(spec: &mut [Vec<f32>]) {
    let mut peak = f32::NEG_INFINITY;
    for v in spec.iter_mut().flatten() {
        *v = 10.0 * v.max(MFCC_AMIN).log10();
        peak = peak.max(*v);
    }
    let floor = peak - MFCC_TOP_DB;
    for v in spec.iter_mut().flatten() {
        *v = v.max(floor);
    }
}

/// `n_mfcc × n_mels` DCT-II basis with orthonormal scaling.
fn dct_ortho(n_mfcc: usize, n_mels: usize) -> Vec<Vec<f32>> {
    let n = n_mels as f64;
    let scale = (2.0 / n).sqrt();
    (0..n_mfcc)
        .map(|k| {
            let k_scale = if k == 0 { scale / 2f64.sqrt() } else { scale };
            (0..n_mels)
                .map(|m| ((PI / n * (m as f64 + 0.5) * k as f64).cos() * k_scale) as f32)
                .collect()
        })
        .collect()
}
