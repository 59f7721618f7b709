/// CANONICAL_SAMPLE_RATE is the rate every clip is resampled to before feature extraction.
pub const CANONICAL_SAMPLE_RATE: u32 = 16000;

/// CLIP_SECONDS is the fixed clip duration fed to the feature extractors.
pub const CLIP_SECONDS: f32 = 1.0;

/// STANDARDIZE_EPS is added to the standard deviation during per-sample standardization.
pub const STANDARDIZE_EPS: f32 = 1e-5;

/// WAV_EXTENSION is the only audio container scanned by the data set builder.
pub(crate) const WAV_EXTENSION: &str = "wav";

// Binarized pipeline (log-Mel front-end) --------------------------------------------

/// LOG_MEL_BINS is the number of mel filters of the binarized pipeline.
pub const LOG_MEL_BINS: usize = 64;

/// LOG_MEL_N_FFT is the STFT size (and window length) of the binarized pipeline.
pub const LOG_MEL_N_FFT: usize = 400;

/// LOG_MEL_HOP is the STFT hop of the binarized pipeline.
pub const LOG_MEL_HOP: usize = 200;

/// BINARY_HIDDEN is the default hidden width of the binarized perceptron.
pub(crate) const BINARY_HIDDEN: usize = 500;

/// BINARY_DROPOUT is the dropout rate applied to the hidden activations.
pub(crate) const BINARY_DROPOUT: f32 = 0.5;

// Reference pipeline (MFCC front-end) ------------------------------------------------

/// MFCC_COEFFS is the number of cepstral coefficients of the reference pipeline.
pub const MFCC_COEFFS: usize = 40;

/// MFCC_MEL_BINS is the number of mel filters feeding the MFCC transform.
pub const MFCC_MEL_BINS: usize = 40;

/// MFCC_N_FFT is the STFT size (and window length) of the reference pipeline.
pub const MFCC_N_FFT: usize = 1024;

/// MFCC_HOP is the STFT hop of the reference pipeline.
pub const MFCC_HOP: usize = 512;

/// MFCC_TOP_DB bounds the dynamic range of the dB mel spectrogram.
pub(crate) const MFCC_TOP_DB: f32 = 80.0;

/// MFCC_AMIN is the power floor applied before converting to decibels.
pub(crate) const MFCC_AMIN: f32 = 1e-10;
