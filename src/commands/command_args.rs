//! Argument handling shared by all commands

use clap::ArgMatches;
use image::GrayImage;
use log::info;

use crate::haar::errors::{HaarError, HaarResult};
use crate::haar::window::Window;
use crate::utils::config::{HaarConfig, OutputFormat};
use crate::utils::window_utils::{parse_type_list, parse_window};

/// Options every command understands
#[derive(Debug, Clone)]
pub struct CommonArgs {
    /// Path to the input image
    pub input_file: String,
    /// Detection window, the whole image when absent
    pub window: Option<Window>,
    /// Requested feature type tokens, empty for all
    pub types: Vec<String>,
    /// Output file, stdout when absent
    pub output_file: Option<String>,
    /// Output format for values and coordinates
    pub format: OutputFormat,
    /// Loaded configuration
    pub config: HaarConfig,
}

impl CommonArgs {
    /// Extract the shared options from CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// The parsed options or an error
    pub fn from_matches(args: &ArgMatches) -> HaarResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| HaarError::GenericError("Missing input image".to_string()))?
            .clone();
        info!("Input image: {}", input_file);

        let window = args.get_one::<String>("window")
            .map(|s| parse_window(s))
            .transpose()?;
        info!("Window: {:?}", window);

        let types = args.get_one::<String>("types")
            .map(|s| parse_type_list(s))
            .unwrap_or_default();
        info!("Feature types: {:?}", types);

        let config = match args.get_one::<String>("config") {
            Some(path) => {
                info!("Loading configuration from {}", path);
                HaarConfig::from_file(path)?
            }
            None => HaarConfig::builtin(),
        };

        let format = match args.get_one::<String>("format") {
            Some(name) => name.parse::<OutputFormat>()?,
            None => config.output_format,
        };
        info!("Output format: {}", format);

        let output_file = args.get_one::<String>("output").cloned();

        Ok(CommonArgs {
            input_file,
            window,
            types,
            output_file,
            format,
            config,
        })
    }

    /// Load the input image as 8-bit grayscale
    pub fn load_gray(&self) -> HaarResult<GrayImage> {
        let image = image::open(&self.input_file)?;
        Ok(image.to_luma8())
    }

    /// The requested window, or one covering an image of `width x height`
    pub fn window_or_full(&self, width: u32, height: u32) -> Window {
        self.window.unwrap_or_else(|| Window::full(width as usize, height as usize))
    }
}
