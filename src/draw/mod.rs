//! Feature visualization
//!
//! Renders Haar-like feature rectangles over an image as translucent colour
//! overlays, optionally for a random sample of the features.

mod overlay;
mod sampling;

pub use overlay::{draw_haar_like_feature, DrawOptions};
pub use sampling::sample_feature_indices;
