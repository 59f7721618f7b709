//! Sign binarisation with a straight-through gradient.
//!
//! Forward maps every element to `+1` when `v >= 0` and `-1` otherwise
//! (zero goes to `+1`). Backward passes the incoming gradient through
//! unchanged, so the op behaves like the identity for autograd.

use candle_core::{CpuStorage, CustomOp1, Layout, Result, Shape, Tensor, cpu_backend};

fn sign<T: PartialOrd + From<i8>>(v: T) -> T {
    if v >= T::from(0i8) { T::from(1i8) } else { T::from(-1i8) }
}

pub(crate) struct SignSte;

impl CustomOp1 for SignSte {
    fn name(&self) -> &'static str {
        "sign-ste"
    }

    fn cpu_fwd(&self, s: &CpuStorage, l: &Layout) -> Result<(CpuStorage, Shape)> {
        let storage = match s {
            CpuStorage::F32(vs) => CpuStorage::F32(cpu_backend::unary_map(vs, l, sign::<f32>)),
            CpuStorage::F64(vs) => CpuStorage::F64(cpu_backend::unary_map(vs, l, sign::<f64>)),
            _ => candle_core::bail!("sign-ste only supports f32 and f64"),
        };
        Ok((storage, l.shape().clone()))
    }

    fn bwd(&self, _arg: &Tensor, _res: &Tensor, grad_res: &Tensor) -> Result<Option<Tensor>> {
        Ok(Some(grad_res.clone()))
    }
}

/// `sign(x)` in `{-1, +1}` whose gradient is the identity.
pub fn binarize(xs: &Tensor) -> Result<Tensor> {
    xs.apply_op1(SignSte)
}

/* ---------------------------------------------------------------------- */
/*  Unit-tests                                                            */
/* ---------------------------------------------------------------------- */
