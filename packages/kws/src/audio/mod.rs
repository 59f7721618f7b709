pub mod fixed_length;
pub mod loader;
pub mod resample;

/* handy re-exports */
pub use fixed_length::{ClipWindow, fit_to_length, normalize_clip};
pub use loader::{Clip, ClipLoader, WavLoader, decode_wav, downmix};
pub use resample::resample_mono;
