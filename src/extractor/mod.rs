//! Window-level feature extraction
//!
//! Ties the registry, generator, evaluator and overlay together for one
//! detection window, enforcing the configured feature limit and recording
//! what was produced in the run report.

mod feature_extractor;

pub use feature_extractor::FeatureExtractor;
