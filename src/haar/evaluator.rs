//! Haar-like feature evaluation over an integral image
//!
//! A feature value is the sum of its positive rectangles minus the sum of
//! its negative rectangles, see [`Topology::sign`].

use log::debug;

use crate::haar::coord::{haar_like_feature_coord, Feature};
use crate::haar::errors::{HaarError, HaarResult};
use crate::haar::integral::{IntegralImage, IntegralValue};
use crate::haar::topology::{validate_feature_types, Sign, Topology, TopologyRequest, FEATURE_TYPES};

/// Value of a single feature of a known topology
#[inline]
fn feature_value<T: IntegralValue>(
    int_image: &IntegralImage<T>,
    r: usize,
    c: usize,
    topology: Topology,
    feature: &Feature,
) -> T::Acc {
    let mut value = T::Acc::default();
    for (idx_rect, rect) in feature.rects().iter().enumerate() {
        let sum = int_image.rect_sum(r, c, rect);
        match topology.sign(idx_rect) {
            Sign::Positive => value += sum,
            Sign::Negative => value -= sum,
        }
    }
    value
}

// Evaluate a batch of features sharing one topology. Geometry must already
// be validated against the integral image.
fn evaluate_batch<'f, T, I>(
    int_image: &IntegralImage<T>,
    r: usize,
    c: usize,
    topology: Topology,
    features: I,
) -> Vec<T::Acc>
where
    T: IntegralValue,
    I: IntoIterator<Item = &'f Feature>,
{
    features
        .into_iter()
        .map(|feature| feature_value(int_image, r, c, topology, feature))
        .collect()
}

/// Compute every feature of the requested topologies for one window
///
/// Values are concatenated in request order, then in enumeration order
/// within each topology.
///
/// # Errors
/// `InvalidTopology` for an unknown token, `WindowOutOfBounds` when the
/// window at `(r, c)` does not fit inside `int_image`.
pub fn evaluate_features<'a, T: IntegralValue>(
    int_image: &IntegralImage<T>,
    r: usize,
    c: usize,
    width: usize,
    height: usize,
    request: impl Into<TopologyRequest<'a>>,
) -> HaarResult<Vec<T::Acc>> {
    let topologies = validate_feature_types(&request.into())?;
    int_image.check_window(r, c, width, height)?;

    let mut values = Vec::new();
    for topology in topologies {
        values.extend(evaluate_topology(int_image, r, c, width, height, topology)?);
    }

    debug!("Evaluated {} features at ({}, {}) over a {}x{} window",
           values.len(), r, c, width, height);
    Ok(values)
}

/// Compute every feature of a single topology for one window
///
/// # Errors
/// `WindowOutOfBounds` when the window does not fit inside `int_image`.
pub fn evaluate_topology<T: IntegralValue>(
    int_image: &IntegralImage<T>,
    r: usize,
    c: usize,
    width: usize,
    height: usize,
    topology: Topology,
) -> HaarResult<Vec<T::Acc>> {
    int_image.check_window(r, c, width, height)?;
    let features = haar_like_feature_coord(width, height, topology);
    Ok(evaluate_batch(int_image, r, c, topology, &features))
}

// Reject anything the batch evaluator cannot index safely.
fn validate_subset(
    width: usize,
    height: usize,
    features: &[Feature],
    types: &[Topology],
) -> HaarResult<()> {
    if features.len() != types.len() {
        return Err(HaarError::ShapeMismatch {
            coordinates: features.len(),
            types: types.len(),
        });
    }

    for (index, (feature, topology)) in features.iter().zip(types).enumerate() {
        if feature.len() != topology.rect_count() {
            return Err(HaarError::RectCountMismatch {
                index,
                topology: topology.name(),
                expected: topology.rect_count(),
                found: feature.len(),
            });
        }
        if let Some(rect) = feature.rects().iter().find(|rect| !rect.is_valid()) {
            return Err(HaarError::GenericError(format!(
                "Feature #{} has an inverted rectangle {:?}", index, rect
            )));
        }
        if !feature.bounds().fits_within(width, height) {
            return Err(HaarError::RectangleOutsideWindow { index, width, height });
        }
    }

    Ok(())
}

/// Compute a caller-chosen subset of features for one window
///
/// `features` and `types` are aligned by index, typically a filtered or
/// reordered slice of [`enumerate_feature_coordinates`] output. The result
/// follows the input order, not topology order.
///
/// # Errors
/// `ShapeMismatch` when the two sequences differ in length,
/// `RectCountMismatch` when a feature does not match its label,
/// `WindowOutOfBounds` / `RectangleOutsideWindow` for geometry that does not
/// fit. Nothing is computed unless every input is valid.
///
/// [`enumerate_feature_coordinates`]: crate::haar::coord::enumerate_feature_coordinates
pub fn evaluate_features_subset<T: IntegralValue>(
    int_image: &IntegralImage<T>,
    r: usize,
    c: usize,
    width: usize,
    height: usize,
    features: &[Feature],
    types: &[Topology],
) -> HaarResult<Vec<T::Acc>> {
    validate_subset(width, height, features, types)?;
    int_image.check_window(r, c, width, height)?;

    let mut values = vec![T::Acc::default(); features.len()];
    for topology in FEATURE_TYPES {
        let indices: Vec<usize> = types
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == topology)
            .map(|(idx, _)| idx)
            .collect();
        if indices.is_empty() {
            continue;
        }

        let group = evaluate_batch(
            int_image,
            r,
            c,
            topology,
            indices.iter().map(|&idx| &features[idx]),
        );
        for (idx, value) in indices.into_iter().zip(group) {
            values[idx] = value;
        }
    }

    debug!("Evaluated a subset of {} features at ({}, {})", values.len(), r, c);
    Ok(values)
}
