//! Full-precision reference classifier.

use candle_core::{Module, Result, Tensor};
use candle_nn::{Linear, VarBuilder, linear, ops::log_softmax};

/// `Linear → ReLU → … → Linear → log-softmax`.
///
/// Layers are numbered like a sequential container where every ReLU takes a
/// slot, so parameters are `model.0.*`, `model.2.*`, `model.4.*`, ….
#[derive(Clone, Debug)]
pub struct Mlp {
    layers: Vec<Linear>,
}

impl Mlp {
    pub fn new(
        input_size: usize,
        hidden_sizes: &[usize],
        num_classes: usize,
        vb: VarBuilder,
    ) -> Result<Self> {
        let vb = vb.pp("model");
        let dims: Vec<usize> = std::iter::once(input_size)
            .chain(hidden_sizes.iter().copied())
            .chain(std::iter::once(num_classes))
            .collect();

        let layers = dims
            .windows(2)
            .enumerate()
            .map(|(i, w)| linear(w[0], w[1], vb.pp(2 * i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { layers })
    }
}

impl Module for Mlp {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let last = self.layers.len() - 1;
        let mut xs = xs.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            xs = layer.forward(&xs)?;
            if i < last {
                xs = xs.relu()?;
            }
        }
        log_softmax(&xs, 1)
    }
}
