//! Feature overlay command

use clap::ArgMatches;
use log::info;

use crate::commands::command_args::CommonArgs;
use crate::commands::command_traits::Command;
use crate::draw::DrawOptions;
use crate::extractor::FeatureExtractor;
use crate::haar::errors::{HaarError, HaarResult};
use crate::haar::topology::Topology;
use crate::utils::logger::Logger;

/// Command drawing the features of one topology over the input image
pub struct DrawCommand<'a> {
    /// Shared options
    args: CommonArgs,
    /// Where to save the overlay image
    draw_file: String,
    /// The single topology to draw
    topology: Topology,
    /// Number of randomly chosen features, all when absent
    max_features: Option<usize>,
    /// Seed for the random choice
    seed: Option<u64>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> DrawCommand<'a> {
    /// Create a new draw command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new DrawCommand instance or an error when not exactly one feature
    /// type was requested
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> HaarResult<Self> {
        info!("Creating new draw command from arguments");

        let draw_file = args.get_one::<String>("draw")
            .ok_or_else(|| HaarError::GenericError("Missing overlay output path".to_string()))?
            .clone();
        let common = CommonArgs::from_matches(args)?;

        let topology = match common.types.as_slice() {
            [token] => token.parse::<Topology>()?,
            _ => return Err(HaarError::GenericError(format!(
                "Drawing needs exactly one feature type (--types), got {}", common.types.len()))),
        };

        let max_features = args.get_one::<String>("max-features")
            .map(|s| s.parse::<usize>()
                .map_err(|_| HaarError::GenericError(format!("Invalid feature count: {}", s))))
            .transpose()?;
        let seed = args.get_one::<String>("seed")
            .map(|s| s.parse::<u64>()
                .map_err(|_| HaarError::GenericError(format!("Invalid seed: {}", s))))
            .transpose()?;
        info!("Drawing {} (max features {:?}, seed {:?}) to {}", topology, max_features, seed, draw_file);

        Ok(DrawCommand {
            args: common,
            draw_file,
            topology,
            max_features,
            seed,
            logger,
        })
    }
}

impl<'a> Command for DrawCommand<'a> {
    fn execute(&self) -> HaarResult<()> {
        let image = image::open(&self.args.input_file)?;
        let window = self.args.window_or_full(image.width(), image.height());

        let options = DrawOptions {
            max_features: self.max_features,
            seed: self.seed,
            ..DrawOptions::from(&self.args.config.draw)
        };
        let extractor = FeatureExtractor::new(self.logger)
            .with_feature_limit(self.args.config.max_window_features);
        let overlay = extractor.overlay(&image, &window, self.topology, &options)?;
        overlay.save(&self.draw_file)?;

        info!("Saved overlay to {}", self.draw_file);
        self.logger.log(&format!("Saved overlay of {} to {}", self.args.input_file, self.draw_file))?;
        Ok(())
    }
}
