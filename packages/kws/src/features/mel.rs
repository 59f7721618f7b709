//! Power Mel spectrogram.
//!
//! Frame layout follows the torchaudio defaults the models were designed
//! around: centred frames (reflect padding of `n_fft / 2` on both sides), a
//! periodic Hann window as long as the FFT, `|X|²` power and HTK-scale
//! triangular filters spanning 0 Hz … Nyquist with no area normalisation.
//!
//! The output is `[mel_bin][frame]`, i.e. `(n_mels, frames)` row-major.

use std::{f64::consts::PI, sync::Arc};

use rustfft::{Fft, FftPlanner, num_complex::Complex32};

pub struct MelSpectrogram {
    n_fft: usize,
    hop: usize,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    filter_bank: Vec<Vec<f32>>, // [mel_bin][freq_bin]
}

impl MelSpectrogram {
    /// * `n_fft` – FFT size and window length (samples)
    /// * `hop`   – frame shift (samples)
    /// * `n_mels` – number of triangular mel filters
    pub fn new(sample_rate: u32, n_fft: usize, hop: usize, n_mels: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(n_fft);
        let window = (0..n_fft)
            .map(|n| (0.5 - 0.5 * (2.0 * PI * n as f64 / n_fft as f64).cos()) as f32)
            .collect();
        Self {
            n_fft,
            hop,
            fft,
            window,
            filter_bank: mel_filter_bank(sample_rate, n_fft / 2 + 1, n_mels),
        }
    }

    pub fn n_mels(&self) -> usize {
        self.filter_bank.len()
    }

    /// Number of frames produced for a signal of `len` samples.
    pub fn frames(&self, len: usize) -> usize {
        (len + 2 * (self.n_fft / 2) - self.n_fft) / self.hop + 1
    }

    pub fn compute(&self, signal: &[f32]) -> Vec<Vec<f32>> {
        let frames = self.frames(signal.len());
        let pad = (self.n_fft / 2) as isize;
        let n_freqs = self.n_fft / 2 + 1;

        let mut mel = vec![vec![0f32; frames]; self.n_mels()];
        let mut buf = vec![Complex32::new(0.0, 0.0); self.n_fft];
        let mut power = vec![0f32; n_freqs];

        for t in 0..frames {
            let start = (t * self.hop) as isize - pad;
            for (j, (dst, &w)) in buf.iter_mut().zip(&self.window).enumerate() {
                let x = sample_reflect(signal, start + j as isize);
                *dst = Complex32::new(x * w, 0.0);
            }
            self.fft.process(&mut buf);

            for (p, c) in power.iter_mut().zip(&buf) {
                *p = c.re * c.re + c.im * c.im;
            }
            for (row, filt) in mel.iter_mut().zip(&self.filter_bank) {
                row[t] = filt.iter().zip(&power).map(|(f, p)| f * p).sum();
            }
        }
        mel
    }
}

/// Signal value at `i` with reflect padding (edge sample not repeated).
fn sample_reflect(signal: &[f32], i: isize) -> f32 {
    let len = signal.len() as isize;
    match len {
        0 => 0.0,
        1 => signal[0],
        _ => {
            let period = 2 * (len - 1);
            let mut m = i.rem_euclid(period);
            if m >= len {
                m = period - m;
            }
            signal[m as usize]
        }
    }
}

// ---------- helpers --------------------------------------------------------

fn mel_filter_bank(sample_rate: u32, n_freqs: usize, n_mels: usize) -> Vec<Vec<f32>> {
    let nyquist = (sample_rate / 2) as f64;
    let all_freqs: Vec<f64> = (0..n_freqs)
        .map(|i| nyquist * i as f64 / (n_freqs - 1).max(1) as f64)
        .collect();

    let mel_max = hz_to_mel(nyquist);
    let f_pts: Vec<f64> = (0..n_mels + 2)
        .map(|i| mel_to_hz(mel_max * i as f64 / (n_mels + 1) as f64))
        .collect();

    (0..n_mels)
        .map(|m| {
            let (left, centre, right) = (f_pts[m], f_pts[m + 1], f_pts[m + 2]);
            all_freqs
                .iter()
                .map(|&f| {
                    let down = (f - left) / (centre - left);
                    let up = (right - f) / (right - centre);
                    down.min(up).max(0.0) as f32
                })
                .collect()
        })
        .collect()
}

#[inline]
fn hz_to_mel(f: f64) -> f64 {
    2595.0 * (1.0 + f / 700.0).log10()
}

#[inline]
fn mel_to_hz(m: f64) -> f64 {
    700.0 * (10f64.powf(m / 2595.0) - 1.0)
}
