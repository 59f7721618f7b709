//! Reference MLP trainer (MFCC front-end) with weight export.

use std::path::PathBuf;

use candle_core::{DType, Device, Module};
use candle_nn::{
    Optimizer, VarBuilder, VarMap, loss,
    optim::{AdamW, ParamsAdamW},
};
use log::{debug, info};

use super::seeded_rng;
use crate::{
    audio::{ClipLoader, ClipWindow},
    config::ReferenceTrainConfig,
    dataset::{FeatureSet, SampleSource, Vocabulary, validate_labels},
    error::{KwsError, Result},
    export::{export_text_weights, save_checkpoint},
    features::{FeatureExtractor, MfccFeatures},
    nn::{Mlp, named_parameters},
};

#[derive(Clone, Debug)]
pub struct ReferenceOutcome {
    pub epoch_losses: Vec<f32>,
    pub checkpoint: PathBuf,
    /// Text weight files, in parameter-name order
    pub exported: Vec<PathBuf>,
}

/// Train on every clip under the dataset root, then export.
pub fn train_reference(
    config: &ReferenceTrainConfig,
    vocabulary: &Vocabulary,
    source: &dyn SampleSource,
    loader: &dyn ClipLoader,
) -> Result<ReferenceOutcome> {
    let mut rng = seeded_rng(config.seed);
    let device = Device::Cpu;
    let classes = vocabulary.len();

    let samples = source.list_samples(&config.dataset_dir)?;
    validate_labels(&samples, classes)?;
    if samples.is_empty() {
        return Err(KwsError::EmptyDataset);
    }
    info!("{classes} commands, {} clips", samples.len());

    let extractor = MfccFeatures::default();
    let set = FeatureSet::extract(&samples, loader, &ClipWindow::default(), &extractor, &device)?;

    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
    let model = Mlp::new(extractor.feature_len(), &config.hidden_sizes, classes, vb)?;
    for (name, var) in named_parameters(&varmap) {
        debug!("{name}: {:?}", var.dims());
    }

    let params = ParamsAdamW {
        lr: config.learning_rate,
        weight_decay: 0.0,
        ..Default::default()
    };
    let mut opt = AdamW::new(varmap.all_vars(), params)?;

    let mut epoch_losses = Vec::with_capacity(config.epochs);
    for epoch in 1..=config.epochs {
        let batches = set.shuffled_batches(config.batch_size, &mut rng)?;
        let mut total = 0f32;
        for (xs, ys) in &batches {
            let log_probs = model.forward(xs)?;
            let loss = loss::nll(&log_probs, ys)?;
            opt.backward_step(&loss)?;
            total += f32::try_from(&loss)?;
        }
        let avg = total / batches.len().max(1) as f32;
        info!("Epoch [{epoch}/{}], Loss: {avg:.4}", config.epochs);
        epoch_losses.push(avg);
    }

    let checkpoint = config.checkpoint_path();
    std::fs::create_dir_all(&config.output_dir).map_err(|e| KwsError::io(&config.output_dir, e))?;
    save_checkpoint(&varmap, &checkpoint)?;
    info!("checkpoint saved to {}", checkpoint.display());

    let exported = export_text_weights(&varmap, &config.output_dir, config.binarized_export)?;
    for path in &exported {
        info!("weights saved to {}", path.display());
    }

    Ok(ReferenceOutcome {
        epoch_losses,
        checkpoint,
        exported,
    })
}
