//! Labelled clip datasets: vocabulary, sample indexing, splitting and the
//! cached feature tensors fed to the trainers.

mod feature_set;
mod source;
mod split;
mod vocabulary;

pub use feature_set::FeatureSet;
pub use source::{CommandDirSource, Sample, SampleSource, validate_labels};
pub use split::random_split;
pub use vocabulary::Vocabulary;
