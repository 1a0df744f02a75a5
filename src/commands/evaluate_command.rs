//! Feature evaluation command
//!
//! Computes every requested Haar-like feature of an image window and writes
//! the values to a file or stdout.

use std::io::{self, Write};

use clap::ArgMatches;
use log::info;

use crate::commands::command_args::CommonArgs;
use crate::commands::command_traits::Command;
use crate::haar::errors::{HaarError, HaarResult};
use crate::extractor::FeatureExtractor;
use crate::haar::integral::IntegralImage;
use crate::haar::topology::{validate_feature_types, Topology};
use crate::api::request_from_tokens;
use crate::utils::config::OutputFormat;
use crate::utils::logger::Logger;
use crate::utils::output_utils;
use crate::utils::progress::ProgressTracker;

/// Command computing feature values for one window
pub struct EvaluateCommand<'a> {
    /// Shared options
    args: CommonArgs,
    /// Whether to render a progress bar
    show_progress: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> EvaluateCommand<'a> {
    /// Create a new evaluate command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new EvaluateCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> HaarResult<Self> {
        info!("Creating new evaluate command from arguments");
        let args = CommonArgs::from_matches(args)?;

        // Binary output cannot share stdout with the progress bar
        if args.format == OutputFormat::Npy && args.output_file.is_none() {
            return Err(HaarError::GenericError(
                "The npy format needs an output file (--output)".to_string()));
        }

        // Only draw progress when the values go to a file
        let show_progress = args.output_file.is_some();

        Ok(EvaluateCommand { args, show_progress, logger })
    }

    fn write_values(&self, types: &[Topology], values: &[i64]) -> HaarResult<()> {
        match &self.args.output_file {
            Some(path) => output_utils::save_feature_values(path, types, values, self.args.format),
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                output_utils::write_feature_values(&mut handle, types, values, self.args.format)?;
                handle.flush()?;
                Ok(())
            }
        }
    }
}

impl<'a> Command for EvaluateCommand<'a> {
    fn execute(&self) -> HaarResult<()> {
        let gray = self.args.load_gray()?;
        let window = self.args.window_or_full(gray.width(), gray.height());
        info!("Evaluating {} ({}x{}) over window {}",
              self.args.input_file, gray.width(), gray.height(), window);

        let int_image = IntegralImage::from_gray(&gray);
        let request = request_from_tokens(&self.args.types);
        let n_topologies = validate_feature_types(&request)?.len() as u64;

        let progress = if self.show_progress {
            ProgressTracker::new(n_topologies, "Evaluating features")
        } else {
            ProgressTracker::hidden(n_topologies)
        };

        self.logger.log(&format!("Input: {}", self.args.input_file))?;
        let extractor = FeatureExtractor::new(self.logger)
            .with_feature_limit(self.args.config.max_window_features);
        let (types, values) = extractor.values(&int_image, &window, &request, &progress)?;

        self.write_values(&types, &values)?;
        if let Some(path) = &self.args.output_file {
            self.logger.log(&format!("Saved feature values to {} ({})", path, self.args.format))?;
        }

        Ok(())
    }
}
