pub mod haar;
pub mod draw;
pub mod extractor;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::HaarKit;
pub use crate::extractor::FeatureExtractor;

pub use haar::{
    enumerate_feature_coordinates, evaluate_features, evaluate_features_subset, evaluate_topology,
    feature_count, haar_like_feature_coord, total_feature_count, validate_feature_types,
    Feature, HaarError, HaarResult, IntegralImage, Rectangle, Sign, Topology, TopologyRequest, Window,
};
pub use draw::{draw_haar_like_feature, DrawOptions};
