use std::collections::HashSet;

use crate::haar::coord::{enumerate_feature_coordinates, feature_count, haar_like_feature_coord, total_feature_count, Feature, Rectangle};
use crate::haar::errors::HaarError;
use crate::haar::topology::{Topology, TopologyRequest, FEATURE_TYPES};

fn assert_in_window(feature: &Feature, width: usize, height: usize) {
    for rect in feature.rects() {
        assert!(rect.is_valid(), "inverted rectangle in {:?}", feature);
        assert!(rect.fits_within(width, height), "{:?} leaves the {}x{} window", feature, width, height);
    }
}

// Column-adjacent strip: shared rows, each part starts right after the previous one.
fn assert_column_strip(feature: &Feature) {
    let rects = feature.rects();
    for pair in rects.windows(2) {
        assert_eq!(pair[0].row0, pair[1].row0);
        assert_eq!(pair[0].row1, pair[1].row1);
        assert_eq!(pair[0].col1 + 1, pair[1].col0);
    }
}

fn assert_row_strip(feature: &Feature) {
    let rects = feature.rects();
    for pair in rects.windows(2) {
        assert_eq!(pair[0].col0, pair[1].col0);
        assert_eq!(pair[0].col1, pair[1].col1);
        assert_eq!(pair[0].row1 + 1, pair[1].row0);
    }
}

#[test]
fn test_two_by_two_grid_has_single_feature() {
    let features = haar_like_feature_coord(2, 2, Topology::FourRect);
    assert_eq!(features.len(), 1);
    assert_eq!(
        features[0].rects(),
        &[
            Rectangle::new(0, 0, 0, 0),
            Rectangle::new(0, 1, 0, 1),
            Rectangle::new(1, 0, 1, 0),
            Rectangle::new(1, 1, 1, 1),
        ]
    );
}

#[test]
fn test_generated_lengths_match_closed_form_counts() {
    for topology in FEATURE_TYPES {
        for width in 0..=6 {
            for height in 0..=6 {
                let features = haar_like_feature_coord(width, height, topology);
                assert_eq!(features.len(), feature_count(width, height, topology).unwrap(),
                           "{} on {}x{}", topology, width, height);
            }
        }
    }
}

#[test]
fn test_known_counts_for_five_by_five() {
    assert_eq!(feature_count(5, 5, Topology::TwoRectX).unwrap(), 300);
    assert_eq!(feature_count(5, 5, Topology::TwoRectY).unwrap(), 300);
    assert_eq!(feature_count(5, 5, Topology::ThreeRectX).unwrap(), 225);
    assert_eq!(feature_count(5, 5, Topology::FourRect).unwrap(), 400);
}

#[test]
fn test_feature_count_of_large_window() {
    // C(301, 4) * C(301, 2)
    assert_eq!(feature_count(300, 300, Topology::ThreeRectX).unwrap(), 335_246_275 * 45_150);
    assert_eq!(
        total_feature_count(5, 5, &FEATURE_TYPES).unwrap(),
        300 + 300 + 225 + 225 + 400
    );
    assert_eq!(total_feature_count(5, 5, &[]).unwrap(), 0);
}

#[test]
fn test_feature_count_overflow_is_an_error() {
    let err = feature_count(5000, 5000, Topology::ThreeRectX).unwrap_err();
    assert!(matches!(err, HaarError::FeatureCountOverflow { width: 5000, height: 5000, topology: "type-3-x" }));
    assert!(err.is_too_many_features());

    assert!(feature_count(usize::MAX, 4, Topology::TwoRectY).is_err());
    assert!(total_feature_count(usize::MAX / 2, usize::MAX / 2, &[Topology::FourRect]).is_err());
}

#[test]
fn test_horizontal_features_tile_column_strips() {
    for topology in [Topology::TwoRectX, Topology::ThreeRectX] {
        for feature in haar_like_feature_coord(6, 4, topology) {
            assert_eq!(feature.len(), topology.rect_count());
            assert_in_window(&feature, 6, 4);
            assert_column_strip(&feature);
        }
    }
}

#[test]
fn test_vertical_features_tile_row_strips() {
    for topology in [Topology::TwoRectY, Topology::ThreeRectY] {
        for feature in haar_like_feature_coord(4, 6, topology) {
            assert_eq!(feature.len(), topology.rect_count());
            assert_in_window(&feature, 4, 6);
            assert_row_strip(&feature);
        }
    }
}

#[test]
fn test_grid_features_tile_two_by_two() {
    for feature in haar_like_feature_coord(5, 4, Topology::FourRect) {
        assert_in_window(&feature, 5, 4);
        let [tl, tr, bl, br] = [feature.rects()[0], feature.rects()[1], feature.rects()[2], feature.rects()[3]];

        assert_eq!(tl.col1 + 1, tr.col0);
        assert_eq!(bl.col1 + 1, br.col0);
        assert_eq!(tl.row1 + 1, bl.row0);
        assert_eq!(tr.row1 + 1, br.row0);
        assert_eq!((tl.row0, tl.row1), (tr.row0, tr.row1));
        assert_eq!((bl.row0, bl.row1), (br.row0, br.row1));
        assert_eq!((tl.col0, tl.col1), (bl.col0, bl.col1));
        assert_eq!((tr.col0, tr.col1), (br.col0, br.col1));
    }
}

#[test]
fn test_no_duplicate_features() {
    for topology in FEATURE_TYPES {
        let features = haar_like_feature_coord(5, 5, topology);
        let unique: HashSet<Feature> = features.iter().copied().collect();
        assert_eq!(unique.len(), features.len(), "duplicates in {}", topology);
    }
}

#[test]
fn test_two_rect_x_covers_every_adjacent_pair() {
    let (width, height) = (4, 3);
    let mut rects = Vec::new();
    for row0 in 0..height {
        for row1 in row0..height {
            for col0 in 0..width {
                for col1 in col0..width {
                    rects.push(Rectangle::new(row0, col0, row1, col1));
                }
            }
        }
    }

    let mut expected = HashSet::new();
    for a in &rects {
        for b in &rects {
            if a.row0 == b.row0 && a.row1 == b.row1 && a.col1 + 1 == b.col0 {
                expected.insert(Feature::new(&[*a, *b]).unwrap());
            }
        }
    }

    let generated: HashSet<Feature> = haar_like_feature_coord(width, height, Topology::TwoRectX)
        .into_iter()
        .collect();
    assert_eq!(generated, expected);
}

#[test]
fn test_enumeration_order_starts_with_smallest_split() {
    let features = haar_like_feature_coord(3, 3, Topology::TwoRectX);
    let firsts: Vec<&[Rectangle]> = features.iter().take(3).map(|f| f.rects()).collect();

    assert_eq!(firsts[0], &[Rectangle::new(0, 0, 0, 0), Rectangle::new(0, 1, 0, 1)]);
    assert_eq!(firsts[1], &[Rectangle::new(0, 0, 0, 0), Rectangle::new(0, 1, 0, 2)]);
    assert_eq!(firsts[2], &[Rectangle::new(0, 0, 0, 1), Rectangle::new(0, 2, 0, 2)]);
}

#[test]
fn test_enumeration_is_deterministic() {
    let first = enumerate_feature_coordinates(6, 5, TopologyRequest::All).unwrap();
    let second = enumerate_feature_coordinates(6, 5, TopologyRequest::All).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_enumerate_concatenates_in_request_order() {
    let tokens = ["type-4", "type-2-y"];
    let (coords, types) = enumerate_feature_coordinates(3, 3, &tokens[..]).unwrap();

    let n_grid = feature_count(3, 3, Topology::FourRect).unwrap();
    let n_vertical = feature_count(3, 3, Topology::TwoRectY).unwrap();
    assert_eq!(coords.len(), n_grid + n_vertical);
    assert_eq!(types.len(), coords.len());
    assert!(types[..n_grid].iter().all(|t| *t == Topology::FourRect));
    assert!(types[n_grid..].iter().all(|t| *t == Topology::TwoRectY));
    assert_eq!(&coords[..n_grid], &haar_like_feature_coord(3, 3, Topology::FourRect)[..]);
}

#[test]
fn test_window_too_narrow_yields_nothing() {
    assert!(haar_like_feature_coord(1, 5, Topology::TwoRectX).is_empty());
    assert!(haar_like_feature_coord(2, 5, Topology::ThreeRectX).is_empty());
    assert!(haar_like_feature_coord(5, 1, Topology::FourRect).is_empty());
}

#[test]
fn test_enumerate_rejects_unknown_token() {
    let result = enumerate_feature_coordinates(4, 4, "type-5");
    assert!(matches!(result, Err(HaarError::InvalidTopology { .. })));
}

#[test]
fn test_feature_requires_two_to_four_rectangles() {
    let rect = Rectangle::new(0, 0, 0, 0);
    assert!(Feature::new(&[rect]).is_err());
    assert!(Feature::new(&[rect; 5]).is_err());
    assert_eq!(Feature::new(&[rect; 3]).unwrap().len(), 3);
}

#[test]
fn test_feature_bounds_span_all_parts() {
    let features = haar_like_feature_coord(4, 4, Topology::ThreeRectY);
    let last = features.last().unwrap();
    assert_eq!(last.bounds(), Rectangle::new(1, 3, 3, 3));
}
