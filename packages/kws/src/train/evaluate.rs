//! Top-1 accuracy on a held-out feature set.

use std::fmt;

use candle_core::{D, DType, ModuleT};

use crate::{dataset::FeatureSet, error::Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    /// `correct / total × 100`, or 0 for an empty set.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.correct as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percent())
    }
}

/// Run `model` in inference mode over every batch of `set`.
pub fn evaluate<M: ModuleT>(model: &M, set: &FeatureSet, batch_size: usize) -> Result<Accuracy> {
    let mut acc = Accuracy::default();
    for (xs, ys) in set.batches(batch_size)? {
        let predicted = model.forward_t(&xs, false)?.detach().argmax(D::Minus1)?;
        let hits = predicted
            .eq(&ys)?
            .to_dtype(DType::U32)?
            .sum_all()?
            .to_scalar::<u32>()?;
        acc.correct += hits as usize;
        acc.total += ys.dims1()?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{Device, Module, Tensor};

    /// Scores class `i` with feature `i`.
    struct Identity;

    impl Module for Identity {
        fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
            Ok(xs.clone())
        }
    }

    #[test]
    fn counts_argmax_hits() {
        let rows = vec![
            vec![0.9, 0.1, 0.0],
            vec![0.2, 0.7, 0.1],
            vec![0.1, 0.2, 0.7],
            vec![0.6, 0.3, 0.1],
        ];
        let set = FeatureSet::from_rows(rows, vec![0, 1, 2, 2], 3, &Device::Cpu).unwrap();
        let acc = evaluate(&Identity, &set, 3).unwrap();
        assert_eq!(acc, Accuracy { correct: 3, total: 4 });
        assert_eq!(acc.to_string(), "75.00%");
    }

    #[test]
    fn empty_set_is_zero_percent() {
        let set = FeatureSet::from_rows(Vec::new(), Vec::new(), 3, &Device::Cpu).unwrap();
        let acc = evaluate(&Identity, &set, 8).unwrap();
        assert_eq!(acc.total, 0);
        assert_eq!(acc.to_string(), "0.00%");
    }
}
