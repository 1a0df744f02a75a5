//! Feature coordinate command
//!
//! Enumerates the rectangle layout of every requested feature for a window
//! size without evaluating anything.

use std::io::{self, Write};

use clap::ArgMatches;
use log::info;

use crate::commands::command_args::CommonArgs;
use crate::commands::command_traits::Command;
use crate::extractor::FeatureExtractor;
use crate::haar::errors::{HaarError, HaarResult};
use crate::api::request_from_tokens;
use crate::utils::config::OutputFormat;
use crate::utils::logger::Logger;
use crate::utils::output_utils;

/// Command writing feature coordinates
pub struct CoordsCommand<'a> {
    /// Shared options
    args: CommonArgs,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> CoordsCommand<'a> {
    /// Create a new coordinates command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> HaarResult<Self> {
        info!("Creating new coordinates command from arguments");
        let args = CommonArgs::from_matches(args)?;

        if args.format == OutputFormat::Npy && args.output_file.is_none() {
            return Err(HaarError::GenericError(
                "The npy format needs an output file (--output)".to_string()));
        }

        Ok(CoordsCommand { args, logger })
    }
}

impl<'a> Command for CoordsCommand<'a> {
    fn execute(&self) -> HaarResult<()> {
        // The image is only opened when no explicit window gives the size
        let window = match self.args.window {
            Some(window) => window,
            None => {
                let (width, height) = image::image_dimensions(&self.args.input_file)?;
                self.args.window_or_full(width, height)
            }
        };

        let extractor = FeatureExtractor::new(self.logger)
            .with_feature_limit(self.args.config.max_window_features);
        let (coords, types) = extractor.coordinates(&window, &request_from_tokens(&self.args.types))?;

        match &self.args.output_file {
            Some(path) => output_utils::save_feature_coordinates(path, &coords, &types, self.args.format)?,
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                output_utils::write_feature_coordinates(&mut handle, &coords, &types, self.args.format)?;
                handle.flush()?;
            }
        }

        if let Some(path) = &self.args.output_file {
            info!("Saved feature coordinates to {}", path);
            self.logger.log(&format!("Saved feature coordinates to {} ({})", path, self.args.format))?;
        }
        Ok(())
    }
}
