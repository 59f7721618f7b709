//! Network building blocks on top of candle.

mod batch_norm;
mod binarize;
mod binary_linear;
mod binary_mlp;
mod mlp;

pub use batch_norm::BatchNorm1d;
pub use binarize::binarize;
pub use binary_linear::BinaryLinear;
pub use binary_mlp::BinaryMlp;
pub use mlp::Mlp;

use std::sync::PoisonError;

use candle_core::Var;
use candle_nn::VarMap;
use indexmap::IndexMap;

/// Every trainable variable of `varmap`, sorted by name.
pub fn named_parameters(varmap: &VarMap) -> IndexMap<String, Var> {
    let data = varmap.data().lock().unwrap_or_else(PoisonError::into_inner);
    let mut params: IndexMap<String, Var> =
        data.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    params.sort_keys();
    params
}
