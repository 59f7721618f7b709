//! Two-layer binarised classifier.

use candle_core::{Module, ModuleT, Result, Tensor};
use candle_nn::{Dropout, VarBuilder};

use super::{BatchNorm1d, BinaryLinear};
use crate::constants::BINARY_DROPOUT;

/// `BinaryLinear → BatchNorm1d → Hardtanh → Dropout → BinaryLinear`, emitting
/// raw logits. Parameters are registered as `l1.*`, `bn1.*` and `l2.*`.
#[derive(Clone)]
pub struct BinaryMlp {
    l1: BinaryLinear,
    bn1: BatchNorm1d,
    dropout: Dropout,
    l2: BinaryLinear,
}

impl BinaryMlp {
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        num_classes: usize,
        binarize_bias: bool,
        vb: VarBuilder,
    ) -> Result<Self> {
        Ok(Self {
            l1: BinaryLinear::new(input_size, hidden_size, binarize_bias, vb.pp("l1"))?,
            bn1: BatchNorm1d::new(hidden_size, vb.pp("bn1"))?,
            dropout: Dropout::new(BINARY_DROPOUT),
            l2: BinaryLinear::new(hidden_size, num_classes, binarize_bias, vb.pp("l2"))?,
        })
    }
}

impl ModuleT for BinaryMlp {
    fn forward_t(&self, xs: &Tensor, train: bool) -> Result<Tensor> {
        let xs = self.l1.forward(xs)?;
        let xs = self.bn1.forward_t(&xs, train)?;
        // hardtanh
        let xs = xs.clamp(-1f32, 1f32)?;
        let xs = self.dropout.forward(&xs, train)?;
        self.l2.forward(&xs)
    }
}
