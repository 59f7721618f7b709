//! Binarized perceptron trainer (log-Mel front-end, held-out accuracy).

use candle_core::{DType, Device, ModuleT, Tensor, backprop::GradStore};
use candle_nn::{
    Optimizer, VarBuilder, VarMap, loss,
    optim::{AdamW, ParamsAdamW},
};
use log::{debug, info};
use rand::Rng;

use super::{Accuracy, evaluate, gradient_stats, seeded_rng};
use crate::{
    audio::{ClipLoader, ClipWindow},
    config::BinaryTrainConfig,
    dataset::{FeatureSet, SampleSource, Vocabulary, random_split, validate_labels},
    error::{KwsError, Result},
    features::{FeatureExtractor, LogMelFeatures},
    nn::{BinaryMlp, named_parameters},
};

/// What a finished binarized run reports.
#[derive(Clone, Debug)]
pub struct BinaryOutcome {
    pub accuracy: Accuracy,
    /// Average training loss of every epoch
    pub epoch_losses: Vec<f32>,
}

/// Forward, loss and backward on one mini-batch; returns the loss value and
/// the fresh gradient store.
pub(crate) fn forward_backward(
    model: &BinaryMlp,
    xs: &Tensor,
    ys: &Tensor,
) -> Result<(f32, GradStore)> {
    let logits = model.forward_t(xs, true)?;
    let loss = loss::cross_entropy(&logits, ys)?;
    let grads = loss.backward()?;
    Ok((f32::try_from(&loss)?, grads))
}

fn adam(varmap: &VarMap, lr: f64) -> Result<AdamW> {
    let params = ParamsAdamW {
        lr,
        weight_decay: 0.0,
        ..Default::default()
    };
    Ok(AdamW::new(varmap.all_vars(), params)?)
}

/// Full binarized run: scan, split, extract, train, evaluate.
pub fn train_binary(
    config: &BinaryTrainConfig,
    vocabulary: &Vocabulary,
    source: &dyn SampleSource,
    loader: &dyn ClipLoader,
) -> Result<BinaryOutcome> {
    let mut rng = seeded_rng(config.seed);
    let device = Device::Cpu;
    let classes = vocabulary.len();

    /* ---------- 1. Samples ---------- */

    let samples = source.list_samples(&config.dataset_dir)?;
    validate_labels(&samples, classes)?;
    let (train, test) = random_split(samples, config.train_ratio, &mut rng);
    if train.is_empty() {
        return Err(KwsError::EmptyDataset);
    }
    info!(
        "{classes} commands, {} training / {} test clips",
        train.len(),
        test.len()
    );

    /* ---------- 2. Features ---------- */

    let window = ClipWindow::default();
    let extractor = LogMelFeatures::default();
    let train_set = FeatureSet::extract(&train, loader, &window, &extractor, &device)?;
    let test_set = FeatureSet::extract(&test, loader, &window, &extractor, &device)?;
    let (rows, cols) = extractor.shape();
    debug!("log-mel features: {rows}x{cols}");

    /* ---------- 3. Model ---------- */

    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
    let model = BinaryMlp::new(
        extractor.feature_len(),
        config.hidden_size,
        classes,
        config.binarize_bias,
        vb,
    )?;
    for (name, var) in named_parameters(&varmap) {
        debug!("{name}: {:?}", var.dims());
    }
    let mut opt = adam(&varmap, config.learning_rate)?;

    /* ---------- 4. Training ---------- */

    let epoch_losses = fit(config, &model, &varmap, &mut opt, &train_set, &mut rng)?;

    /* ---------- 5. Evaluation ---------- */

    let accuracy = evaluate(&model, &test_set, config.batch_size)?;
    info!(
        "{} / {} test clips classified correctly",
        accuracy.correct, accuracy.total
    );
    Ok(BinaryOutcome {
        accuracy,
        epoch_losses,
    })
}

fn fit<R: Rng + ?Sized>(
    config: &BinaryTrainConfig,
    model: &BinaryMlp,
    varmap: &VarMap,
    opt: &mut AdamW,
    train_set: &FeatureSet,
    rng: &mut R,
) -> Result<Vec<f32>> {
    let log_every = config.log_every.max(1);
    let mut epoch_losses = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let batches = train_set.shuffled_batches(config.batch_size, rng)?;
        let steps = batches.len();
        let mut total = 0f32;

        for (i, (xs, ys)) in batches.iter().enumerate() {
            let (loss, grads) = forward_backward(model, xs, ys)?;

            if (i + 1) % log_every == 0 {
                info!(
                    "Epoch [{epoch}/{}], Step [{}/{steps}], Loss: {loss:.4}",
                    config.epochs,
                    i + 1
                );
                for (name, s) in gradient_stats(varmap, &grads)? {
                    info!("  grad {name}: mean = {:.4}, std = {:.4}", s.mean, s.std);
                }
            }

            opt.step(&grads)?;
            total += loss;
        }

        let avg = if steps == 0 { 0.0 } else { total / steps as f32 };
        info!("Epoch [{epoch}/{}], average loss: {avg:.4}", config.epochs);
        epoch_losses.push(avg);
    }
    Ok(epoch_losses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn toy_model(varmap: &VarMap) -> Result<BinaryMlp> {
        let vb = VarBuilder::from_varmap(varmap, DType::F32, &Device::Cpu);
        Ok(BinaryMlp::new(16, 8, 3, true, vb)?)
    }

    #[test]
    fn one_step_reaches_and_moves_both_binary_layers() -> Result<()> {
        let varmap = VarMap::new();
        let model = toy_model(&varmap)?;
        let mut opt = adam(&varmap, 1e-2)?;

        let xs = Tensor::randn(0f32, 1.0, (6, 16), &Device::Cpu)?;
        let ys = Tensor::new(&[0u32, 1, 2, 0, 1, 2], &Device::Cpu)?;

        let params = named_parameters(&varmap);
        let before: Vec<Vec<f32>> = ["l1.weight", "l2.weight"]
            .iter()
            .map(|n| params[*n].flatten_all()?.to_vec1::<f32>())
            .collect::<candle_core::Result<_>>()?;

        let (loss, grads) = forward_backward(&model, &xs, &ys)?;
        assert!(loss.is_finite());
        for name in ["l1.weight", "l1.bias", "l2.weight", "l2.bias"] {
            let g = grads.get(&params[name]).expect("gradient present");
            assert_eq!(g.dims(), params[name].dims());
        }
        opt.step(&grads)?;

        for (name, old) in ["l1.weight", "l2.weight"].iter().zip(before) {
            let new = params[*name].flatten_all()?.to_vec1::<f32>()?;
            assert_ne!(new, old, "{name} unchanged");
        }
        Ok(())
    }

    #[test]
    fn fit_reports_one_finite_loss_per_epoch() -> Result<()> {
        let varmap = VarMap::new();
        let model = toy_model(&varmap)?;
        let mut opt = adam(&varmap, 1e-3)?;

        let rows = (0..9).map(|i| vec![(i % 3) as f32 - 1.0; 16]).collect();
        let labels = (0..9).map(|i| i % 3).collect();
        let set = FeatureSet::from_rows(rows, labels, 16, &Device::Cpu)?;

        let config = BinaryTrainConfig {
            epochs: 2,
            batch_size: 4,
            log_every: 1,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let losses = fit(&config, &model, &varmap, &mut opt, &set, &mut rng)?;
        assert_eq!(losses.len(), 2);
        assert!(losses.iter().all(|l| l.is_finite()));
        Ok(())
    }
}
