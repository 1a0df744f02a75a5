//! Custom error types for Haar-like feature processing

use std::fmt;
use std::io;

/// Haar feature error types
#[derive(Debug)]
pub enum HaarError {
    /// Unknown topology token, together with the accepted tokens
    InvalidTopology {
        token: String,
        valid: Vec<&'static str>,
    },
    /// Coordinate and type sequences have different lengths
    ShapeMismatch {
        coordinates: usize,
        types: usize,
    },
    /// A feature's rectangle count does not match its topology label
    RectCountMismatch {
        index: usize,
        topology: &'static str,
        expected: usize,
        found: usize,
    },
    /// Window (or a rectangle inside it) exceeds the integral image
    WindowOutOfBounds {
        r: usize,
        c: usize,
        width: usize,
        height: usize,
        rows: usize,
        cols: usize,
    },
    /// A caller-supplied rectangle lies outside the evaluated window
    RectangleOutsideWindow {
        index: usize,
        width: usize,
        height: usize,
    },
    /// Feature count of a window does not fit in `usize`
    FeatureCountOverflow {
        width: usize,
        height: usize,
        topology: &'static str,
    },
    /// Window would produce more features than the configured limit
    FeatureLimitExceeded {
        count: usize,
        limit: usize,
    },
    /// I/O error
    IoError(io::Error),
    /// Image decoding or encoding error
    ImageError(image::ImageError),
    /// Invalid configuration value
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl HaarError {
    /// Whether this error reports inconsistent coordinate/type input
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, HaarError::ShapeMismatch { .. } | HaarError::RectCountMismatch { .. })
    }

    /// Whether this error reports a window with too many features
    pub fn is_too_many_features(&self) -> bool {
        matches!(self, HaarError::FeatureCountOverflow { .. } | HaarError::FeatureLimitExceeded { .. })
    }

    /// Whether this error reports geometry exceeding the available data
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, HaarError::WindowOutOfBounds { .. } | HaarError::RectangleOutsideWindow { .. })
    }
}

impl fmt::Display for HaarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaarError::InvalidTopology { token, valid } => write!(
                f,
                "The given feature type is unknown. Got {} instead of one of {:?}",
                token, valid
            ),
            HaarError::ShapeMismatch { coordinates, types } => write!(
                f,
                "Inconsistent size between feature coordinates ({}) and feature types ({})",
                coordinates, types
            ),
            HaarError::RectCountMismatch { index, topology, expected, found } => write!(
                f,
                "Feature #{} labelled {} has {} rectangles, expected {}",
                index, topology, found, expected
            ),
            HaarError::WindowOutOfBounds { r, c, width, height, rows, cols } => write!(
                f,
                "Window at ({}, {}) of size {}x{} exceeds integral image of {}x{} (rows x cols)",
                r, c, width, height, rows, cols
            ),
            HaarError::RectangleOutsideWindow { index, width, height } => write!(
                f,
                "Feature #{} has a rectangle outside the {}x{} window",
                index, width, height
            ),
            HaarError::FeatureCountOverflow { width, height, topology } => write!(
                f,
                "Number of {} features in a {}x{} window overflows",
                topology, width, height
            ),
            HaarError::FeatureLimitExceeded { count, limit } => write!(
                f,
                "Window yields {} features, more than the limit of {}; choose a smaller --window",
                count, limit
            ),
            HaarError::IoError(e) => write!(f, "I/O error: {}", e),
            HaarError::ImageError(e) => write!(f, "Image error: {}", e),
            HaarError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            HaarError::GenericError(msg) => write!(f, "Haar error: {}", msg),
        }
    }
}

impl std::error::Error for HaarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HaarError::IoError(e) => Some(e),
            HaarError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HaarError {
    fn from(error: io::Error) -> Self {
        HaarError::IoError(error)
    }
}

impl From<image::ImageError> for HaarError {
    fn from(error: image::ImageError) -> Self {
        HaarError::ImageError(error)
    }
}

/// Result type for Haar feature operations
pub type HaarResult<T> = Result<T, HaarError>;
