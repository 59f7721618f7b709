//! Cached feature tensors.
//!
//! Features are extracted once per run (load → resample → fixed window →
//! front-end) and kept as one `(n, feature_len)` tensor plus a `(n,)` label
//! tensor. Mini-batches are slices or gathers of those two.

use candle_core::{Device, Tensor};
use rand::{Rng, seq::SliceRandom};
#[cfg(feature = "desktop")]
use rayon::prelude::*;

use super::Sample;
use crate::{
    audio::{ClipLoader, ClipWindow, normalize_clip},
    error::{KwsError, Result},
    features::FeatureExtractor,
};

pub struct FeatureSet {
    features: Tensor,
    labels: Tensor,
    feature_len: usize,
}

impl FeatureSet {
    /// Build from already extracted rows; every row must hold `feature_len` values.
    pub fn from_rows(
        rows: Vec<Vec<f32>>,
        labels: Vec<u32>,
        feature_len: usize,
        device: &Device,
    ) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(KwsError::ShapeMismatch {
                expected: rows.len(),
                got: labels.len(),
            });
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != feature_len) {
            return Err(KwsError::ShapeMismatch {
                expected: feature_len,
                got: bad.len(),
            });
        }

        let n = rows.len();
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        Ok(Self {
            features: Tensor::from_vec(flat, (n, feature_len), device)?,
            labels: Tensor::from_vec(labels, n, device)?,
            feature_len,
        })
    }

    /// Run the whole front-end over `samples`, keeping their order.
    pub fn extract(
        samples: &[Sample],
        loader: &dyn ClipLoader,
        window: &ClipWindow,
        extractor: &dyn FeatureExtractor,
        device: &Device,
    ) -> Result<Self> {
        let featurize = |sample: &Sample| -> Result<Vec<f32>> {
            let clip = loader.load(&sample.path)?;
            let waveform = normalize_clip(clip, window)?;
            extractor.extract(&waveform)
        };

        #[cfg(feature = "desktop")]
        let rows = samples
            .par_iter()
            .map(featurize)
            .collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "desktop"))]
        let rows = samples
            .iter()
            .map(featurize)
            .collect::<Result<Vec<_>>>()?;

        let labels = samples.iter().map(|s| s.label).collect();
        Self::from_rows(rows, labels, extractor.feature_len(), device)
    }

    pub fn len(&self) -> usize {
        self.labels.dims1().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn feature_len(&self) -> usize {
        self.feature_len
    }

    pub fn features(&self) -> &Tensor {
        &self.features
    }

    pub fn labels(&self) -> &Tensor {
        &self.labels
    }

    /// Consecutive mini-batches in storage order.
    pub fn batches(&self, batch_size: usize) -> Result<Vec<(Tensor, Tensor)>> {
        let n = self.len();
        let batch_size = batch_size.max(1);
        (0..n)
            .step_by(batch_size)
            .map(|lo| {
                let len = batch_size.min(n - lo);
                Ok((
                    self.features.narrow(0, lo, len)?,
                    self.labels.narrow(0, lo, len)?,
                ))
            })
            .collect()
    }

    /// Mini-batches over a fresh random permutation.
    pub fn shuffled_batches<R: Rng + ?Sized>(
        &self,
        batch_size: usize,
        rng: &mut R,
    ) -> Result<Vec<(Tensor, Tensor)>> {
        let mut order: Vec<u32> = (0..self.len() as u32).collect();
        order.shuffle(rng);

        let device = self.features.device();
        order
            .chunks(batch_size.max(1))
            .map(|chunk| {
                let idx = Tensor::from_slice(chunk, chunk.len(), device)?;
                Ok((
                    self.features.index_select(&idx, 0)?,
                    self.labels.index_select(&idx, 0)?,
                ))
            })
            .collect()
    }
}
