//! 1-D batch normalisation over `(batch, features)` inputs.
//!
//! Training mode normalises with the batch statistics (biased variance) and
//! folds them into running estimates (unbiased variance, momentum 0.1).
//! Evaluation mode normalises with the running estimates only.

use candle_core::{DType, ModuleT, Result, Tensor, Var};
use candle_nn::{Init, VarBuilder};

const MOMENTUM: f64 = 0.1;
const EPS: f64 = 1e-5;

#[derive(Clone)]
pub struct BatchNorm1d {
    weight: Tensor,
    bias: Tensor,
    running_mean: Var,
    running_var: Var,
    momentum: f64,
    eps: f64,
}

impl BatchNorm1d {
    /// Affine `weight` / `bias` come from `vb` and are trained; the running
    /// statistics live outside the var-map and are never seen by the optimiser.
    pub fn new(features: usize, vb: VarBuilder) -> Result<Self> {
        let weight = vb.get_with_hints(features, "weight", Init::Const(1.0))?;
        let bias = vb.get_with_hints(features, "bias", Init::Const(0.0))?;
        let device = vb.device();
        Ok(Self {
            weight,
            bias,
            running_mean: Var::zeros(features, DType::F32, device)?,
            running_var: Var::ones(features, DType::F32, device)?,
            momentum: MOMENTUM,
            eps: EPS,
        })
    }

    pub fn running_mean(&self) -> &Tensor {
        self.running_mean.as_tensor()
    }

    pub fn running_var(&self) -> &Tensor {
        self.running_var.as_tensor()
    }

    fn affine(&self, xs_hat: &Tensor) -> Result<Tensor> {
        xs_hat
            .broadcast_mul(&self.weight)?
            .broadcast_add(&self.bias)
    }

    fn update_running(&self, mean: &Tensor, var: &Tensor, n: usize) -> Result<()> {
        let mean = mean.detach().squeeze(0)?;
        let unbiased = (var.detach().squeeze(0)? * (n as f64 / (n - 1) as f64))?;
        let keep = 1.0 - self.momentum;

        let new_mean = ((self.running_mean.as_tensor() * keep)? + (mean * self.momentum)?)?;
        let new_var = ((self.running_var.as_tensor() * keep)? + (unbiased * self.momentum)?)?;
        self.running_mean.set(&new_mean)?;
        self.running_var.set(&new_var)
    }
}

impl ModuleT for BatchNorm1d {
    fn forward_t(&self, xs: &Tensor, train: bool) -> Result<Tensor> {
        let (n, _) = xs.dims2()?;
        if train {
            let mean = xs.mean_keepdim(0)?;
            let centered = xs.broadcast_sub(&mean)?;
            let var = centered.sqr()?.mean_keepdim(0)?;
            let xs_hat = centered.broadcast_div(&(&var + self.eps)?.sqrt()?)?;
            if n > 1 {
                self.update_running(&mean, &var, n)?;
            }
            self.affine(&xs_hat)
        } else {
            let std = (self.running_var.as_tensor() + self.eps)?.sqrt()?;
            let xs_hat = xs
                .broadcast_sub(self.running_mean.as_tensor())?
                .broadcast_div(&std)?;
            self.affine(&xs_hat)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::Device;
    use candle_nn::VarMap;

    fn bn(features: usize) -> Result<(VarMap, BatchNorm1d)> {
        let vm = VarMap::new();
        let vb = VarBuilder::from_varmap(&vm, DType::F32, &Device::Cpu);
        let bn = BatchNorm1d::new(features, vb.pp("bn"))?;
        Ok((vm, bn))
    }

    #[test]
    fn training_output_is_standardised_per_feature() -> Result<()> {
        let (_, bn) = bn(2)?;
        let xs = Tensor::new(&[[1f32, 10.0], [3.0, 20.0], [5.0, 30.0], [7.0, 40.0]], &Device::Cpu)?;
        let ys = bn.forward_t(&xs, true)?;
        let mean = ys.mean(0)?.to_vec1::<f32>()?;
        let var = ys.sqr()?.mean(0)?.to_vec1::<f32>()?;
        for f in 0..2 {
            assert!(mean[f].abs() < 1e-5);
            assert!((var[f] - 1.0).abs() < 1e-3);
        }
        Ok(())
    }

    #[test]
    fn running_stats_follow_momentum_with_unbiased_variance() -> Result<()> {
        let (_, bn) = bn(1)?;
        let xs = Tensor::new(&[[1f32], [3.0], [5.0], [7.0]], &Device::Cpu)?;
        bn.forward_t(&xs, true)?;
        // batch mean 4, unbiased var 20/3
        let rm = bn.running_mean().to_vec1::<f32>()?[0];
        let rv = bn.running_var().to_vec1::<f32>()?[0];
        assert!((rm - 0.4).abs() < 1e-6);
        assert!((rv - (0.9 + 0.1 * 20.0 / 3.0)).abs() < 1e-5);
        Ok(())
    }

    #[test]
    fn eval_mode_uses_running_stats_and_leaves_them_alone() -> Result<()> {
        let (_, bn) = bn(1)?;
        let xs = Tensor::new(&[[2f32], [4.0]], &Device::Cpu)?;
        // fresh stats are mean 0 / var 1, so eval is ~identity
        let ys = bn.forward_t(&xs, false)?.flatten_all()?.to_vec1::<f32>()?;
        assert!((ys[0] - 2.0).abs() < 1e-4 && (ys[1] - 4.0).abs() < 1e-4);
        assert_eq!(bn.running_mean().to_vec1::<f32>()?, [0.0]);
        Ok(())
    }

    #[test]
    fn single_row_training_batch_yields_bias_and_keeps_running_stats() -> Result<()> {
        let (vm, bn) = bn(3)?;
        let bias = vm.data().lock().unwrap()["bn.bias"].clone();
        bias.set(&Tensor::new(&[0.5f32, -1.0, 2.0], &Device::Cpu)?)?;

        let xs = Tensor::new(&[[3f32, -7.0, 0.25]], &Device::Cpu)?;
        let ys = bn.forward_t(&xs, true)?;
        assert_eq!(ys.to_vec2::<f32>()?, [[0.5, -1.0, 2.0]]);
        assert_eq!(bn.running_mean().to_vec1::<f32>()?, [0.0, 0.0, 0.0]);
        assert_eq!(bn.running_var().to_vec1::<f32>()?, [1.0, 1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn only_affine_parameters_are_registered() -> Result<()> {
        let (vm, _) = bn(3)?;
        let mut names: Vec<_> = vm.data().lock().unwrap().keys().cloned().collect();
        names.sort();
        assert_eq!(names, ["bn.bias", "bn.weight"]);
        Ok(())
    }
}
