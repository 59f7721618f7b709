//! The two training pipelines and their shared helpers.

mod binary;
mod diagnostics;
mod evaluate;
mod reference;

pub use binary::{BinaryOutcome, train_binary};
pub use diagnostics::{GradStats, gradient_stats};
pub use evaluate::{Accuracy, evaluate};
pub use reference::{ReferenceOutcome, train_reference};

use rand::{SeedableRng, rngs::StdRng};

/// Split / shuffle generator; a fixed seed makes both reproducible.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
