use image::{GrayImage, Luma};

use super::test_utils::{brute_force, integral_of, ramp_pixels};
use crate::haar::coord::{enumerate_feature_coordinates, haar_like_feature_coord, Feature, Rectangle};
use crate::haar::errors::HaarError;
use crate::haar::evaluator::{evaluate_features, evaluate_features_subset, evaluate_topology};
use crate::haar::integral::IntegralImage;
use crate::haar::topology::{Topology, TopologyRequest, FEATURE_TYPES};

#[test]
fn test_rect_sum_matches_inclusion_exclusion() {
    let pixels: Vec<u8> = (1..=12).collect();
    let ii = integral_of(4, 3, &pixels);

    // whole image
    assert_eq!(ii.rect_sum(0, 0, &Rectangle::new(0, 0, 2, 3)), 78);
    // interior block touching neither edge: 6 + 7 + 10 + 11
    assert_eq!(ii.rect_sum(0, 0, &Rectangle::new(1, 1, 2, 2)), 34);
    // same block through a window offset
    assert_eq!(ii.rect_sum(1, 1, &Rectangle::new(0, 0, 1, 1)), 34);
    // single pixel on the first row
    assert_eq!(ii.rect_sum(0, 0, &Rectangle::new(0, 2, 0, 2)), 3);
}

#[test]
fn test_constant_image_two_rect_x_is_area_difference() {
    let pixels = vec![1u8; 25];
    let ii = integral_of(5, 5, &pixels);

    let features = haar_like_feature_coord(5, 5, Topology::TwoRectX);
    let values = evaluate_features(&ii, 0, 0, 5, 5, "type-2-x").unwrap();
    assert_eq!(values.len(), features.len());

    for (feature, value) in features.iter().zip(&values) {
        let negative = feature.rects()[0].area() as i64;
        let positive = feature.rects()[1].area() as i64;
        assert_eq!(*value, positive - negative);
        assert_eq!(*value, brute_force(&pixels, 5, 0, 0, feature, Topology::TwoRectX));
    }
}

#[test]
fn test_all_topologies_match_brute_force_on_offset_window() {
    let (img_w, img_h) = (7, 6);
    let pixels = ramp_pixels(img_w, img_h);
    let ii = integral_of(img_w, img_h, &pixels);
    let (r, c, width, height) = (1, 2, 5, 4);

    for topology in FEATURE_TYPES {
        let features = haar_like_feature_coord(width, height, topology);
        let values = evaluate_topology(&ii, r, c, width, height, topology).unwrap();
        for (feature, value) in features.iter().zip(values) {
            assert_eq!(value, brute_force(&pixels, img_w, r, c, feature, topology),
                       "{} {:?}", topology, feature);
        }
    }
}

#[test]
fn test_two_by_two_grid_uses_checkerboard_signs() {
    let pixels = [5u8, 1, 2, 7];
    let ii = integral_of(2, 2, &pixels);
    let values = evaluate_features(&ii, 0, 0, 2, 2, "type-4").unwrap();
    assert_eq!(values, vec![-5 + 1 + 2 - 7]);
}

#[test]
fn test_full_evaluation_equals_subset_of_everything() {
    let pixels = ramp_pixels(6, 6);
    let ii = integral_of(6, 6, &pixels);

    let full = evaluate_features(&ii, 1, 0, 5, 4, TopologyRequest::All).unwrap();
    let (coords, types) = enumerate_feature_coordinates(5, 4, TopologyRequest::All).unwrap();
    let subset = evaluate_features_subset(&ii, 1, 0, 5, 4, &coords, &types).unwrap();

    assert_eq!(full, subset);
}

#[test]
fn test_subset_follows_caller_order() {
    let pixels = ramp_pixels(5, 5);
    let ii = integral_of(5, 5, &pixels);
    let (coords, types) = enumerate_feature_coordinates(5, 5, TopologyRequest::All).unwrap();
    let reference = evaluate_features_subset(&ii, 0, 0, 5, 5, &coords, &types).unwrap();

    // interleave topologies: a fixed stride permutation over all features
    let n = coords.len();
    let stride = 37;
    assert_eq!(gcd(n, stride), 1);
    let permutation: Vec<usize> = (0..n).map(|i| (i * stride) % n).collect();

    let permuted_coords: Vec<Feature> = permutation.iter().map(|&i| coords[i]).collect();
    let permuted_types: Vec<Topology> = permutation.iter().map(|&i| types[i]).collect();
    let values = evaluate_features_subset(&ii, 0, 0, 5, 5, &permuted_coords, &permuted_types).unwrap();

    let expected: Vec<i64> = permutation.iter().map(|&i| reference[i]).collect();
    assert_eq!(values, expected);
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

#[test]
fn test_every_other_feature_subset() {
    let pixels = vec![1u8; 25];
    let ii = integral_of(5, 5, &pixels);

    let mut coords = Vec::new();
    let mut types = Vec::new();
    for topology in [Topology::TwoRectX, Topology::ThreeRectX] {
        let features = haar_like_feature_coord(5, 5, topology);
        for feature in features.iter().step_by(2) {
            coords.push(*feature);
            types.push(topology);
        }
    }

    let values = evaluate_features_subset(&ii, 0, 0, 5, 5, &coords, &types).unwrap();
    assert_eq!(values.len(), coords.len());
    for ((feature, topology), value) in coords.iter().zip(&types).zip(&values) {
        assert_eq!(*value, brute_force(&pixels, 5, 0, 0, feature, *topology));
    }
}

#[test]
fn test_float_image_stays_float() {
    let pixels = [0.25f32, 1.0];
    let ii: IntegralImage<f64> = IntegralImage::from_pixels(2, 1, &pixels).unwrap();
    let values: Vec<f64> = evaluate_features(&ii, 0, 0, 2, 1, "type-2-x").unwrap();
    assert_eq!(values, vec![0.75]);
}

#[test]
fn test_unsigned_integral_image_produces_signed_values() {
    let ii = IntegralImage::from_raw(1, 2, vec![9u32, 10]).unwrap();
    let values: Vec<i64> = evaluate_features(&ii, 0, 0, 2, 1, "type-2-x").unwrap();
    assert_eq!(values, vec![1 - 9]);
}

#[test]
fn test_from_gray_matches_from_pixels() {
    let pixels = ramp_pixels(4, 3);
    let mut gray = GrayImage::new(4, 3);
    for (idx, value) in pixels.iter().enumerate() {
        gray.put_pixel((idx % 4) as u32, (idx / 4) as u32, Luma([*value]));
    }

    let from_gray = IntegralImage::from_gray(&gray);
    let from_pixels = integral_of(4, 3, &pixels);
    assert_eq!(from_gray.as_slice(), from_pixels.as_slice());
}

#[test]
fn test_from_gray_handles_totals_beyond_u32() {
    // 4200 x 4100 saturated pixels sum to 4_391_100_000 > u32::MAX
    let (width, height) = (4200u32, 4100u32);
    let gray = GrayImage::from_pixel(width, height, Luma([255u8]));
    let ii = IntegralImage::from_gray(&gray);

    let whole = Rectangle::new(0, 0, height as usize - 1, width as usize - 1);
    let expected = 255i64 * width as i64 * height as i64;
    assert!(expected > u32::MAX as i64);
    assert_eq!(ii.rect_sum(0, 0, &whole), expected);

    // Bottom-right quadrant still cancels correctly through the corners
    let quadrant = Rectangle::new(2050, 2100, height as usize - 1, width as usize - 1);
    assert_eq!(ii.rect_sum(0, 0, &quadrant), 255 * 2050 * 2100);
}

#[test]
fn test_unknown_topology_is_rejected() {
    let ii = integral_of(3, 3, &[0u8; 9]);
    let result = evaluate_features(&ii, 0, 0, 3, 3, "type-5");
    assert!(matches!(result, Err(HaarError::InvalidTopology { .. })));
}

#[test]
fn test_subset_length_mismatch_is_rejected() {
    let ii = integral_of(3, 3, &[0u8; 9]);
    let coords: Vec<Feature> = haar_like_feature_coord(3, 3, Topology::TwoRectX).into_iter().take(3).collect();
    let types = vec![Topology::TwoRectX; 2];

    let err = evaluate_features_subset(&ii, 0, 0, 3, 3, &coords, &types).unwrap_err();
    assert!(matches!(err, HaarError::ShapeMismatch { coordinates: 3, types: 2 }));
    assert!(err.is_shape_mismatch());
}

#[test]
fn test_subset_label_must_match_rectangle_count() {
    let ii = integral_of(3, 3, &[0u8; 9]);
    let coords = vec![haar_like_feature_coord(3, 3, Topology::TwoRectX)[0]];

    let err = evaluate_features_subset(&ii, 0, 0, 3, 3, &coords, &[Topology::FourRect]).unwrap_err();
    assert!(matches!(err, HaarError::RectCountMismatch { index: 0, expected: 4, found: 2, .. }));
    assert!(err.is_shape_mismatch());
}

#[test]
fn test_window_outside_integral_image_is_rejected() {
    let ii = integral_of(4, 4, &[1u8; 16]);

    let full = evaluate_features(&ii, 1, 0, 4, 4, TopologyRequest::All);
    assert!(matches!(full, Err(HaarError::WindowOutOfBounds { r: 1, rows: 4, .. })));

    let (coords, types) = enumerate_feature_coordinates(3, 3, "type-2-y").unwrap();
    let subset = evaluate_features_subset(&ii, 2, 2, 3, 3, &coords, &types);
    assert!(matches!(subset, Err(ref e) if e.is_out_of_bounds()));
}

#[test]
fn test_subset_rectangle_outside_window_is_rejected() {
    let ii = integral_of(6, 6, &[1u8; 36]);
    let coords = haar_like_feature_coord(4, 4, Topology::TwoRectX);
    let types = vec![Topology::TwoRectX; coords.len()];

    let err = evaluate_features_subset(&ii, 0, 0, 3, 3, &coords, &types).unwrap_err();
    assert!(matches!(err, HaarError::RectangleOutsideWindow { width: 3, height: 3, .. }));
}

#[test]
fn test_empty_subset_yields_empty_vector() {
    let ii = integral_of(2, 2, &[1u8; 4]);
    let values = evaluate_features_subset(&ii, 0, 0, 2, 2, &[], &[]).unwrap();
    assert!(values.is_empty());
}
