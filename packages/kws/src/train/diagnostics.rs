//! Per-parameter gradient statistics logged during training.

use candle_core::backprop::GradStore;
use candle_nn::VarMap;
use indexmap::IndexMap;

use crate::{error::Result, features::mean_std, nn::named_parameters};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradStats {
    pub mean: f32,
    /// Unbiased standard deviation
    pub std: f32,
}

/// Mean / std of the gradient of every parameter that received one, by name.
pub fn gradient_stats(varmap: &VarMap, grads: &GradStore) -> Result<IndexMap<String, GradStats>> {
    let mut stats = IndexMap::new();
    for (name, var) in named_parameters(varmap) {
        let Some(grad) = grads.get(&var) else {
            continue;
        };
        let values = grad.flatten_all()?.to_vec1::<f32>()?;
        let (mean, std) = mean_std(&values);
        stats.insert(name, GradStats { mean, std });
    }
    Ok(stats)
}
