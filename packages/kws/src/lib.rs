//! kws – speech-command keyword trainers
//! =====================================
//! Two batch trainers over a directory of labelled one-second clips
//! (`<root>/<keyword>/*.wav`):
//!
//! * **binarized** – log-Mel features into a two-layer perceptron whose
//!   inputs, weights and biases are sign-binarised on every forward pass
//!   through a straight-through estimator; reports held-out accuracy.
//! * **reference** – MFCC features into a floating-point MLP; exports a
//!   safetensors checkpoint and one comma-separated text file per parameter.
//!
//! Both share the data layer: [`dataset`] scanning, [`audio`] decoding and
//! length normalisation, [`features`] extraction.
#![deny(unsafe_code)]

#[cfg(feature = "accelerate")]
extern crate accelerate_src;

#[cfg(feature = "mkl")]
extern crate intel_mkl_src;

/* ────────────────────────  sub-modules  ─────────────────────────────── */
pub mod audio;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod export;
pub mod features;
pub mod nn;
pub mod train;

/* ─────────────────────────  re-exports  ─────────────────────────────── */
pub use config::{BinaryTrainConfig, ReferenceTrainConfig};
pub use error::{KwsError, Result};
pub use train::{Accuracy, BinaryOutcome, ReferenceOutcome, train_binary, train_reference};
