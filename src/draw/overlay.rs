//! Translucent rectangle overlays for Haar-like features

use image::{DynamicImage, Rgb, RgbImage};
use log::{debug, info};

use crate::draw::sampling::sample_feature_indices;
use crate::haar::coord::{haar_like_feature_coord, Rectangle};
use crate::haar::errors::{HaarError, HaarResult};
use crate::haar::topology::{Sign, Topology};
use crate::haar::window::Window;
use crate::utils::config::DrawSettings;

/// Rendering options for [`draw_haar_like_feature`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOptions {
    /// Colour blended over positive rectangles
    pub positive_color: [u8; 3],
    /// Colour blended over negative rectangles
    pub negative_color: [u8; 3],
    /// Overlay opacity in `[0, 1]`
    pub alpha: f32,
    /// Draw only a random sample of this many features
    pub max_features: Option<usize>,
    /// Seed for the random sample
    pub seed: Option<u64>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        DrawOptions {
            positive_color: [255, 0, 0],
            negative_color: [0, 255, 0],
            alpha: 0.5,
            max_features: None,
            seed: None,
        }
    }
}

impl From<&DrawSettings> for DrawOptions {
    fn from(settings: &DrawSettings) -> Self {
        DrawOptions {
            positive_color: settings.positive_color,
            negative_color: settings.negative_color,
            alpha: settings.alpha,
            ..DrawOptions::default()
        }
    }
}

/// Draw the features of one topology over an image
///
/// The window `(r, c, width, height)` positions the generated coordinates
/// on `image`. Grayscale inputs are promoted to RGB. Overlapping features
/// blend repeatedly, so dense windows saturate towards the overlay colours.
///
/// # Errors
/// `WindowOutOfBounds` if the window leaves the image, `GenericError` for an
/// alpha outside `[0, 1]` or a sample larger than the feature set.
pub fn draw_haar_like_feature(
    image: &DynamicImage,
    r: usize,
    c: usize,
    width: usize,
    height: usize,
    topology: Topology,
    options: &DrawOptions,
) -> HaarResult<RgbImage> {
    if !(0.0..=1.0).contains(&options.alpha) {
        return Err(HaarError::GenericError(format!(
            "Overlay alpha must be within [0, 1], got {}", options.alpha
        )));
    }

    let rows = image.height() as usize;
    let cols = image.width() as usize;
    if !Window::new(r, c, width, height).fits(rows, cols) {
        return Err(HaarError::WindowOutOfBounds { r, c, width, height, rows, cols });
    }

    let coords = haar_like_feature_coord(width, height, topology);
    let feature_indices = match options.max_features {
        Some(amount) => sample_feature_indices(coords.len(), amount, options.seed)?,
        None => (0..coords.len()).collect(),
    };
    info!("Drawing {} of {} {} features", feature_indices.len(), coords.len(), topology);

    let mut output = image.to_rgb8();
    for feature_idx in feature_indices {
        for (idx_rect, rect) in coords[feature_idx].rects().iter().enumerate() {
            let color = match topology.sign(idx_rect) {
                Sign::Positive => options.positive_color,
                Sign::Negative => options.negative_color,
            };
            blend_rect(&mut output, &rect.offset(r, c), color, options.alpha);
        }
    }

    debug!("Overlay rendered on a {}x{} image", cols, rows);
    Ok(output)
}

// Alpha-blend `color` over every pixel of an image-space rectangle.
fn blend_rect(output: &mut RgbImage, rect: &Rectangle, color: [u8; 3], alpha: f32) {
    for row in rect.row0..=rect.row1 {
        for col in rect.col0..=rect.col1 {
            let pixel = output.get_pixel_mut(col as u32, row as u32);
            let Rgb(channels) = *pixel;
            let mut blended = [0u8; 3];
            for ch in 0..3 {
                let value = (1.0 - alpha) * channels[ch] as f32 + alpha * color[ch] as f32;
                blended[ch] = value.round().clamp(0.0, 255.0) as u8;
            }
            *pixel = Rgb(blended);
        }
    }
}
