//! Fully-connected layer with binarised input, weight and bias.

use candle_core::{Module, Result, Tensor};
use candle_nn::{Init, VarBuilder};

use super::binarize;

/// `y = sign(x) · sign(W)ᵀ + sign(b)`.
///
/// The real-valued `weight` (`out × in`) and `bias` (`out`) are the trainable
/// parameters; only their signs take part in the forward pass. Weights start
/// Xavier-uniform, biases at zero.
#[derive(Clone, Debug)]
pub struct BinaryLinear {
    weight: Tensor,
    bias: Tensor,
    binarize_bias: bool,
}

impl BinaryLinear {
    pub fn new(in_dim: usize, out_dim: usize, binarize_bias: bool, vb: VarBuilder) -> Result<Self> {
        let bound = (6.0 / (in_dim + out_dim) as f64).sqrt();
        let weight = vb.get_with_hints(
            (out_dim, in_dim),
            "weight",
            Init::Uniform {
                lo: -bound,
                up: bound,
            },
        )?;
        let bias = vb.get_with_hints(out_dim, "bias", Init::Const(0.0))?;
        Ok(Self {
            weight,
            bias,
            binarize_bias,
        })
    }

    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    pub fn bias(&self) -> &Tensor {
        &self.bias
    }
}

impl Module for BinaryLinear {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let w = binarize(&self.weight)?;
        let ys = binarize(xs)?.matmul(&w.t()?)?;
        let b = if self.binarize_bias {
            binarize(&self.bias)?
        } else {
            self.bias.clone()
        };
        ys.broadcast_add(&b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device, Var};
    use candle_nn::VarMap;

    #[test]
    fn weights_are_xavier_bounded_and_bias_is_zero() -> Result<()> {
        let vm = VarMap::new();
        let vb = VarBuilder::from_varmap(&vm, DType::F32, &Device::Cpu);
        let layer = BinaryLinear::new(300, 100, true, vb.pp("l"))?;

        let bound = (6.0f32 / 400.0).sqrt();
        let w = layer.weight().flatten_all()?.to_vec1::<f32>()?;
        assert!(w.iter().all(|v| v.abs() <= bound));
        assert!(layer.bias().to_vec1::<f32>()?.iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn output_is_sign_dot_product_plus_sign_bias() -> Result<()> {
        let vm = VarMap::new();
        let vb = VarBuilder::from_varmap(&vm, DType::F32, &Device::Cpu);
        let layer = BinaryLinear::new(3, 2, true, vb.pp("l"))?;
        let dev = Device::Cpu;
        for var in vm.all_vars() {
            match var.dims() {
                [2, 3] => var.set(&Tensor::new(&[[0.3f32, -0.2, 0.1], [-0.5, -0.4, 0.9]], &dev)?)?,
                [2] => var.set(&Tensor::new(&[-0.7f32, 0.0], &dev)?)?,
                _ => unreachable!(),
            }
        }
        let x = Tensor::new(&[[2.0f32, 0.5, -3.0]], &Device::Cpu)?;
        // sign(x) = [1, 1, -1]; rows of sign(W) = [1,-1,1], [-1,-1,1]
        // dot = [-1, -3]; sign(b) = [-1, 1]
        assert_eq!(layer.forward(&x)?.to_vec2::<f32>()?, [[-2.0, -2.0]]);
        Ok(())
    }

    #[test]
    fn gradients_ignore_the_sign_steps() -> Result<()> {
        let dev = Device::Cpu;
        let vm = VarMap::new();
        let vb = VarBuilder::from_varmap(&vm, DType::F32, &dev);
        let layer = BinaryLinear::new(3, 2, true, vb.pp("l"))?;
        let (w, b) = {
            let data = vm.data().lock().unwrap();
            (data["l.weight"].clone(), data["l.bias"].clone())
        };
        w.set(&Tensor::new(&[[0.3f32, -0.2, 0.1], [-0.5, -0.4, 0.9]], &dev)?)?;
        b.set(&Tensor::new(&[-0.7f32, 0.2], &dev)?)?;

        let x = Var::new(&[[2.0f32, 0.5, -3.0], [-1.0, 0.0, 4.0]], &dev)?;
        let g = Tensor::new(&[[0.5f32, -2.0], [1.0, 3.0]], &dev)?;
        let grads = (layer.forward(x.as_tensor())? * &g)?.sum_all()?.backward()?;

        // sign(x) = [[1, 1, -1], [-1, 1, 1]], sign(W) = [[1, -1, 1], [-1, -1, 1]]
        // dW = Gᵀ · sign(x)
        let gw = grads.get(&w).expect("weight gradient");
        assert_eq!(gw.to_vec2::<f32>()?, [[-0.5, 1.5, 0.5], [-5.0, 1.0, 5.0]]);
        // db = column sums of G
        let gb = grads.get(&b).expect("bias gradient");
        assert_eq!(gb.to_vec1::<f32>()?, [1.5, 1.0]);
        // dx = G · sign(W)
        let gx = grads.get(&x).expect("input gradient");
        assert_eq!(gx.to_vec2::<f32>()?, [[2.5, 1.5, -1.5], [-2.0, -4.0, 4.0]]);
        Ok(())
    }

    #[test]
    fn real_bias_is_kept_when_not_binarised() -> Result<()> {
        let vm = VarMap::new();
        let vb = VarBuilder::from_varmap(&vm, DType::F32, &Device::Cpu);
        let layer = BinaryLinear::new(4, 2, false, vb)?;
        let y = layer.forward(&Tensor::ones((1, 4), DType::F32, &Device::Cpu)?)?;
        // zero bias, every output is a sum of four ±1 terms
        for v in y.flatten_all()?.to_vec1::<f32>()? {
            assert!([-4.0, -2.0, 0.0, 2.0, 4.0].contains(&v));
        }
        Ok(())
    }
}
