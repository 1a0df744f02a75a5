//! Configuration loading
//!
//! Settings come from a TOML file with `[draw]`, `[output]` and `[limits]`
//! tables.
//! A built-in default ships with the crate; keys missing from a user file
//! fall back to those defaults.

use std::fmt;
use std::fs;
use std::str::FromStr;

use lazy_static::lazy_static;
use log::warn;

use crate::haar::errors::{HaarError, HaarResult};

lazy_static! {
    // Parse the bundled configuration once
    static ref BUILTIN_CONFIG: HaarConfig = {
        let content = include_str!("../../haarkit.toml");
        HaarConfig::from_toml_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse built-in configuration: {}", e);
            HaarConfig::default()
        })
    };
}

/// Serialization format for feature vectors and coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
    Npy,
}

impl OutputFormat {
    /// Lowercase name, as accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Npy => "npy",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = HaarError;

    fn from_str(s: &str) -> HaarResult<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "npy" => Ok(OutputFormat::Npy),
            _ => Err(HaarError::ConfigError(format!(
                "Unsupported output format '{}'. Expected csv, json or npy", s
            ))),
        }
    }
}

/// Overlay colours and opacity
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSettings {
    pub positive_color: [u8; 3],
    pub negative_color: [u8; 3],
    pub alpha: f32,
}

/// Complete haarkit configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HaarConfig {
    pub draw: DrawSettings,
    pub output_format: OutputFormat,
    /// Largest number of features a single window may enumerate
    pub max_window_features: usize,
}

/// Default for `limits.max_window_features`
pub const DEFAULT_MAX_WINDOW_FEATURES: usize = 10_000_000;

impl Default for HaarConfig {
    fn default() -> Self {
        HaarConfig {
            draw: DrawSettings {
                positive_color: [255, 0, 0],
                negative_color: [0, 255, 0],
                alpha: 0.5,
            },
            output_format: OutputFormat::Csv,
            max_window_features: DEFAULT_MAX_WINDOW_FEATURES,
        }
    }
}

impl HaarConfig {
    /// The configuration bundled with the crate
    pub fn builtin() -> HaarConfig {
        BUILTIN_CONFIG.clone()
    }

    /// Parse a configuration from TOML text
    ///
    /// # Errors
    /// `ConfigError` for malformed TOML or out-of-range values.
    pub fn from_toml_str(content: &str) -> HaarResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| HaarError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let mut config = HaarConfig::default();

        match toml_value.get("draw") {
            Some(draw) => {
                if let Some(value) = draw.get("positive_color") {
                    config.draw.positive_color = parse_color(value, "draw.positive_color")?;
                } else {
                    warn!("draw.positive_color not set, using default");
                }
                if let Some(value) = draw.get("negative_color") {
                    config.draw.negative_color = parse_color(value, "draw.negative_color")?;
                } else {
                    warn!("draw.negative_color not set, using default");
                }
                if let Some(value) = draw.get("alpha") {
                    config.draw.alpha = parse_alpha(value)?;
                } else {
                    warn!("draw.alpha not set, using default");
                }
            }
            None => warn!("No [draw] table in configuration, using defaults"),
        }

        match toml_value.get("output").and_then(|v| v.get("format")) {
            Some(value) => {
                let name = value.as_str().ok_or_else(|| {
                    HaarError::ConfigError("output.format must be a string".to_string())
                })?;
                config.output_format = name.parse()?;
            }
            None => warn!("output.format not set, using default"),
        }

        match toml_value.get("limits").and_then(|v| v.get("max_window_features")) {
            Some(value) => {
                config.max_window_features = value
                    .as_integer()
                    .and_then(|raw| usize::try_from(raw).ok())
                    .filter(|limit| *limit > 0)
                    .ok_or_else(|| HaarError::ConfigError(
                        "limits.max_window_features must be a positive integer".to_string()))?;
            }
            None => warn!("limits.max_window_features not set, using default"),
        }

        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &str) -> HaarResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

fn parse_color(value: &toml::Value, key: &str) -> HaarResult<[u8; 3]> {
    let invalid = || HaarError::ConfigError(format!(
        "{} must be an array of three integers in 0..=255", key
    ));

    let array = value.as_array().ok_or_else(invalid)?;
    if array.len() != 3 {
        return Err(invalid());
    }

    let mut color = [0u8; 3];
    for (channel, item) in color.iter_mut().zip(array) {
        let raw = item.as_integer().ok_or_else(invalid)?;
        *channel = u8::try_from(raw).map_err(|_| invalid())?;
    }
    Ok(color)
}

fn parse_alpha(value: &toml::Value) -> HaarResult<f32> {
    let alpha = value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
        .ok_or_else(|| HaarError::ConfigError("draw.alpha must be a number".to_string()))?;

    if !(0.0..=1.0).contains(&alpha) {
        return Err(HaarError::ConfigError(format!(
            "draw.alpha must be within [0, 1], got {}", alpha
        )));
    }
    Ok(alpha as f32)
}
