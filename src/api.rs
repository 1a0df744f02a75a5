use image::DynamicImage;
use log::info;

use crate::draw::DrawOptions;
use crate::extractor::FeatureExtractor;
use crate::haar::coord::Feature;
use crate::haar::errors::HaarResult;
use crate::haar::integral::IntegralImage;
use crate::haar::topology::{Topology, TopologyRequest};
use crate::haar::window::Window;
use crate::utils::config::{HaarConfig, OutputFormat};
use crate::utils::logger::Logger;
use crate::utils::output_utils;
use crate::utils::progress::ProgressTracker;

/// Main interface to the haarkit library
pub struct HaarKit {
    logger: Logger,
    config: HaarConfig,
}

/// Turn a list of type tokens into a request; an empty list means all types
pub fn request_from_tokens(types: &[String]) -> TopologyRequest<'_> {
    if types.is_empty() {
        TopologyRequest::All
    } else {
        TopologyRequest::from(types)
    }
}

impl HaarKit {
    /// Create a new HaarKit instance
    ///
    /// # Arguments
    /// * `report_file` - Optional path of a plain-text run report
    ///
    /// # Returns
    /// A HaarKit instance using the built-in configuration, or an error if
    /// the report file cannot be created
    pub fn new(report_file: Option<&str>) -> HaarResult<Self> {
        let logger = match report_file {
            Some(path) => Logger::new(path)?,
            None => Logger::disabled(),
        };
        Ok(HaarKit { logger, config: HaarConfig::builtin() })
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: HaarConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &HaarConfig {
        &self.config
    }

    fn extractor(&self) -> FeatureExtractor<'_> {
        FeatureExtractor::new(&self.logger).with_feature_limit(self.config.max_window_features)
    }

    /// Load an image file and compute its grayscale integral image
    pub fn load_integral_image(&self, input_path: &str) -> HaarResult<IntegralImage<i64>> {
        let image = image::open(input_path)?;
        let gray = image.to_luma8();
        info!("Loaded {} ({}x{})", input_path, gray.width(), gray.height());
        Ok(IntegralImage::from_gray(&gray))
    }

    /// Enumerate feature coordinates for a window size
    ///
    /// # Arguments
    /// * `window` - Detection window; only its size matters
    /// * `types` - Feature type tokens, empty for all types
    pub fn feature_coordinates(&self, window: &Window, types: &[String]) -> HaarResult<(Vec<Feature>, Vec<Topology>)> {
        self.extractor().coordinates(window, &request_from_tokens(types))
    }

    /// Compute feature values of an image file over one window
    ///
    /// # Returns
    /// The topology of every feature and the feature values, aligned
    pub fn feature_values(&self, input_path: &str, window: &Window, types: &[String]) -> HaarResult<(Vec<Topology>, Vec<i64>)> {
        let int_image = self.load_integral_image(input_path)?;
        let progress = ProgressTracker::hidden(0);
        self.logger.log(&format!("Input: {}", input_path))?;
        self.extractor().values(&int_image, window, &request_from_tokens(types), &progress)
    }

    /// Compute feature values and write them to a file
    ///
    /// # Arguments
    /// * `format` - Output format, the configured one when `None`
    ///
    /// # Returns
    /// Number of values written
    pub fn export_feature_values(&self,
                                 input_path: &str,
                                 output_path: &str,
                                 window: &Window,
                                 types: &[String],
                                 format: Option<OutputFormat>) -> HaarResult<usize> {
        let (feature_types, values) = self.feature_values(input_path, window, types)?;
        let format = format.unwrap_or(self.config.output_format);
        output_utils::save_feature_values(output_path, &feature_types, &values, format)?;
        self.logger.log(&format!("Saved feature values to {} ({})", output_path, format))?;
        Ok(values.len())
    }

    /// Enumerate feature coordinates and write them to a file
    pub fn export_feature_coordinates(&self,
                                      output_path: &str,
                                      window: &Window,
                                      types: &[String],
                                      format: Option<OutputFormat>) -> HaarResult<usize> {
        let (coords, feature_types) = self.feature_coordinates(window, types)?;
        let format = format.unwrap_or(self.config.output_format);
        output_utils::save_feature_coordinates(output_path, &coords, &feature_types, format)?;
        self.logger.log(&format!("Saved feature coordinates to {} ({})", output_path, format))?;
        Ok(coords.len())
    }

    /// Draw the features of one type over an image and save the result
    ///
    /// # Arguments
    /// * `input_path` - Source image
    /// * `output_path` - Where to write the overlay image
    /// * `window` - Detection window on the source image
    /// * `feature_type` - Single feature type token
    /// * `max_features` - Optional number of randomly chosen features to draw
    /// * `seed` - Optional seed for the random choice
    pub fn draw_features(&self,
                         input_path: &str,
                         output_path: &str,
                         window: &Window,
                         feature_type: &str,
                         max_features: Option<usize>,
                         seed: Option<u64>) -> HaarResult<()> {
        let topology: Topology = feature_type.parse()?;
        let image: DynamicImage = image::open(input_path)?;

        let options = DrawOptions {
            max_features,
            seed,
            ..DrawOptions::from(&self.config.draw)
        };
        let overlay = self.extractor().overlay(&image, window, topology, &options)?;
        overlay.save(output_path)?;

        info!("Saved {} overlay to {}", topology, output_path);
        self.logger.log(&format!("Drew {} features of {} onto {}", topology, input_path, output_path))?;
        Ok(())
    }
}
