use image::{DynamicImage, RgbImage};
use log::{debug, info};

use crate::draw::{draw_haar_like_feature, DrawOptions};
use crate::haar::coord::{haar_like_feature_coord, total_feature_count, Feature};
use crate::haar::errors::{HaarError, HaarResult};
use crate::haar::evaluator::evaluate_topology;
use crate::haar::integral::{IntegralImage, IntegralValue};
use crate::haar::topology::{validate_feature_types, Topology, TopologyRequest};
use crate::haar::window::Window;
use crate::utils::config::DEFAULT_MAX_WINDOW_FEATURES;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Extracts feature coordinates, values and overlays for one window
pub struct FeatureExtractor<'a> {
    /// Logger for the run report
    logger: &'a Logger,
    /// Largest number of features a window may enumerate
    max_window_features: usize,
}

impl<'a> FeatureExtractor<'a> {
    /// Create a new feature extractor with the default feature limit
    ///
    /// # Arguments
    /// * `logger` - Logger for recording operations
    pub fn new(logger: &'a Logger) -> Self {
        FeatureExtractor {
            logger,
            max_window_features: DEFAULT_MAX_WINDOW_FEATURES,
        }
    }

    /// Replace the feature limit
    pub fn with_feature_limit(mut self, max_window_features: usize) -> Self {
        self.max_window_features = max_window_features;
        self
    }

    /// Number of features `topologies` yield over `window`
    ///
    /// # Errors
    /// `FeatureCountOverflow` when the count does not fit in `usize`,
    /// `FeatureLimitExceeded` when it is above the limit.
    pub fn check_feature_budget(&self, window: &Window, topologies: &[Topology]) -> HaarResult<usize> {
        let count = total_feature_count(window.width, window.height, topologies)?;
        if count > self.max_window_features {
            return Err(HaarError::FeatureLimitExceeded {
                count,
                limit: self.max_window_features,
            });
        }

        debug!("Window {} yields {} features", window, count);
        Ok(count)
    }

    /// Enumerate the coordinates of every requested feature
    ///
    /// Only the window size matters. Returns the features and the topology
    /// of each, aligned by index and concatenated in request order.
    pub fn coordinates(&self,
                       window: &Window,
                       request: &TopologyRequest<'_>) -> HaarResult<(Vec<Feature>, Vec<Topology>)> {
        let topologies = validate_feature_types(request)?;
        let count = self.check_feature_budget(window, &topologies)?;

        let mut coords = Vec::with_capacity(count);
        let mut types = Vec::with_capacity(count);
        for topology in topologies {
            let features = haar_like_feature_coord(window.width, window.height, topology);
            types.extend(std::iter::repeat(topology).take(features.len()));
            coords.extend(features);
        }

        info!("Enumerated {} features for a {}x{} window", coords.len(), window.width, window.height);
        self.logger.log(&format!("Enumerated coordinates for a {}x{} window", window.width, window.height))?;
        self.logger.log_feature_summary(&types)?;
        Ok((coords, types))
    }

    /// Evaluate every requested feature over `window`
    ///
    /// `progress` advances by one per topology.
    ///
    /// # Returns
    /// The topology of every feature and the feature values, aligned
    pub fn values<T: IntegralValue>(&self,
                                    int_image: &IntegralImage<T>,
                                    window: &Window,
                                    request: &TopologyRequest<'_>,
                                    progress: &ProgressTracker) -> HaarResult<(Vec<Topology>, Vec<T::Acc>)> {
        int_image.check_window(window.r, window.c, window.width, window.height)?;
        let topologies = validate_feature_types(request)?;
        let count = self.check_feature_budget(window, &topologies)?;

        let mut types = Vec::with_capacity(count);
        let mut values = Vec::with_capacity(count);
        for topology in topologies {
            progress.set_message(topology.name());
            let batch = evaluate_topology(int_image, window.r, window.c, window.width, window.height, topology)?;
            debug!("{}: {} values", topology, batch.len());

            types.extend(std::iter::repeat(topology).take(batch.len()));
            values.extend(batch);
            progress.increment(1);
        }
        progress.finish();

        info!("Computed {} feature values", values.len());
        self.logger.log(&format!("Evaluated window {}", window))?;
        self.logger.log_feature_summary(&types)?;
        Ok((types, values))
    }

    /// Draw the features of one topology over `image`
    pub fn overlay(&self,
                   image: &DynamicImage,
                   window: &Window,
                   topology: Topology,
                   options: &DrawOptions) -> HaarResult<RgbImage> {
        self.check_feature_budget(window, &[topology])?;
        let overlay = draw_haar_like_feature(
            image, window.r, window.c, window.width, window.height, topology, options)?;

        self.logger.log(&format!("Drew {} features over window {}", topology, window))?;
        Ok(overlay)
    }
}
