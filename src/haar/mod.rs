//! Haar-like feature generation and evaluation
//!
//! This module enumerates the rectangle layouts of the five Haar-like
//! feature topologies and evaluates them over an integral image.

pub mod errors;
pub mod topology;
pub mod coord;
pub mod integral;
pub mod evaluator;
pub mod window;
#[cfg(test)]
mod tests;

pub use errors::{HaarError, HaarResult};
pub use topology::{validate_feature_types, Sign, Topology, TopologyRequest, FEATURE_TYPES, MAX_RECTS};
pub use coord::{enumerate_feature_coordinates, feature_count, haar_like_feature_coord, total_feature_count, Feature, Rectangle};
pub use integral::{Accumulator, IntegralImage, IntegralValue};
pub use evaluator::{evaluate_features, evaluate_features_subset, evaluate_topology};
pub use window::Window;
