//! Per-sample feature standardisation.
//!
//! Every feature tensor is shifted by its own mean and scaled by its own
//! (unbiased) standard deviation plus a small epsilon:
//!
//! ```rust
//! use kws::features::FeatureNormalizer;
//!
//! let mut x = vec![1.0, 2.0, 3.0, 4.0];
//! FeatureNormalizer::standardize(&mut x, 1e-5);
//! assert!(x.iter().sum::<f32>().abs() < 1e-5);
//! ```
//!
//! A constant tensor has zero spread; the epsilon keeps the division finite
//! and the output collapses to zeros.

/// Mean and unbiased (N-1) standard deviation, accumulated in `f64`.
///
/// Fewer than two values have no spread: the deviation is reported as 0.
pub fn mean_std(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    if values.len() < 2 {
        return (mean as f32, 0.0);
    }
    let ss = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>();
    (mean as f32, (ss / (n - 1.0)).sqrt() as f32)
}

/// Stateless helper for per-sample standardisation.
pub struct FeatureNormalizer;

impl FeatureNormalizer {
    /// In-place `(x - mean) / (std + eps)`.
    pub fn standardize(values: &mut [f32], eps: f32) {
        let (mean, std) = mean_std(values);
        let inv = 1.0 / (std + eps);
        for v in values.iter_mut() {
            *v = (*v - mean) * inv;
        }
    }
}

/* --------------------------------------------------------------------- */
/*  Unit-tests                                                           */
