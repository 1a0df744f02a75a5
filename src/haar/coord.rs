//! Haar-like feature coordinate generation
//!
//! Enumerates every rectangle subdivision of a detection window for a
//! topology. Coordinates are local to the window, 0-indexed and inclusive
//! on both corners. The enumeration order is part of the public contract:
//! top-left row, top-left column, total height, total width, then split
//! points ascending (row split before column split for the 2x2 grid).

use log::debug;

use crate::haar::errors::{HaarError, HaarResult};
use crate::haar::topology::{validate_feature_types, Topology, TopologyRequest, MAX_RECTS};

/// Axis-aligned rectangle with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    /// Row of the top-left corner
    pub row0: usize,
    /// Column of the top-left corner
    pub col0: usize,
    /// Row of the bottom-right corner (inclusive)
    pub row1: usize,
    /// Column of the bottom-right corner (inclusive)
    pub col1: usize,
}

impl Rectangle {
    /// Create a rectangle from its inclusive corners
    pub fn new(row0: usize, col0: usize, row1: usize, col1: usize) -> Self {
        Rectangle { row0, col0, row1, col1 }
    }

    /// Number of rows covered
    pub fn height(&self) -> usize {
        self.row1 + 1 - self.row0
    }

    /// Number of columns covered
    pub fn width(&self) -> usize {
        self.col1 + 1 - self.col0
    }

    /// Number of pixels covered
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Whether the corners are ordered
    pub fn is_valid(&self) -> bool {
        self.row0 <= self.row1 && self.col0 <= self.col1
    }

    /// Whether the rectangle fits in a `width x height` frame
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.row1 < height && self.col1 < width
    }

    /// Translate by a window offset
    pub fn offset(&self, r: usize, c: usize) -> Rectangle {
        Rectangle::new(self.row0 + r, self.col0 + c, self.row1 + r, self.col1 + c)
    }
}

/// One positioned group of 2 to 4 rectangles
///
/// Rectangles are stored inline; only the first `len` entries are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feature {
    rects: [Rectangle; MAX_RECTS],
    len: usize,
}

impl Feature {
    /// Build a feature from a rectangle list
    ///
    /// # Errors
    /// `GenericError` unless 2 to 4 rectangles are given.
    pub fn new(rects: &[Rectangle]) -> HaarResult<Self> {
        if rects.len() < 2 || rects.len() > MAX_RECTS {
            return Err(HaarError::GenericError(format!(
                "A feature needs between 2 and {} rectangles, got {}",
                MAX_RECTS,
                rects.len()
            )));
        }

        let mut stored = [Rectangle::default(); MAX_RECTS];
        stored[..rects.len()].copy_from_slice(rects);
        Ok(Feature { rects: stored, len: rects.len() })
    }

    fn two(a: Rectangle, b: Rectangle) -> Self {
        Feature { rects: [a, b, Rectangle::default(), Rectangle::default()], len: 2 }
    }

    fn three(a: Rectangle, b: Rectangle, c: Rectangle) -> Self {
        Feature { rects: [a, b, c, Rectangle::default()], len: 3 }
    }

    fn four(a: Rectangle, b: Rectangle, c: Rectangle, d: Rectangle) -> Self {
        Feature { rects: [a, b, c, d], len: 4 }
    }

    /// The rectangles of this feature, in sign order
    pub fn rects(&self) -> &[Rectangle] {
        &self.rects[..self.len]
    }

    /// Number of rectangles
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed feature
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Smallest rectangle enclosing all parts
    pub fn bounds(&self) -> Rectangle {
        let rects = self.rects();
        Rectangle {
            row0: rects.iter().map(|r| r.row0).min().unwrap_or(0),
            col0: rects.iter().map(|r| r.col0).min().unwrap_or(0),
            row1: rects.iter().map(|r| r.row1).max().unwrap_or(0),
            col1: rects.iter().map(|r| r.col1).max().unwrap_or(0),
        }
    }
}

// Minimum (rows, cols) extent of a feature of each topology.
fn min_extent(topology: Topology) -> (usize, usize) {
    match topology {
        Topology::TwoRectX => (1, 2),
        Topology::TwoRectY => (2, 1),
        Topology::ThreeRectX => (1, 3),
        Topology::ThreeRectY => (3, 1),
        Topology::FourRect => (2, 2),
    }
}

// `None` when the result does not fit in usize.
fn binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    (0..k).try_fold(1usize, |acc, i| Some(acc.checked_mul(n - i)? / (i + 1)))
}

/// Number of features [`haar_like_feature_coord`] yields
///
/// Splitting an axis of length `n` into `k` non-empty consecutive ranges at
/// any position is a choice of `k + 1` ordered boundaries among `n + 1`.
///
/// # Errors
/// `FeatureCountOverflow` when the count does not fit in `usize`.
pub fn feature_count(width: usize, height: usize, topology: Topology) -> HaarResult<usize> {
    // (boundaries along x, boundaries along y)
    let (kx, ky) = match topology {
        Topology::TwoRectX => (3, 2),
        Topology::TwoRectY => (2, 3),
        Topology::ThreeRectX => (4, 2),
        Topology::ThreeRectY => (2, 4),
        Topology::FourRect => (3, 3),
    };

    let count = width
        .checked_add(1)
        .zip(height.checked_add(1))
        .and_then(|(nx, ny)| binomial(nx, kx)?.checked_mul(binomial(ny, ky)?));

    count.ok_or(HaarError::FeatureCountOverflow {
        width,
        height,
        topology: topology.name(),
    })
}

/// Total number of features over several topologies
///
/// # Errors
/// `FeatureCountOverflow` when any count or the total does not fit in `usize`.
pub fn total_feature_count(width: usize, height: usize, topologies: &[Topology]) -> HaarResult<usize> {
    topologies.iter().try_fold(0usize, |total, topology| {
        total
            .checked_add(feature_count(width, height, *topology)?)
            .ok_or(HaarError::FeatureCountOverflow {
                width,
                height,
                topology: topology.name(),
            })
    })
}

/// Enumerate all features of one topology inside a `width x height` window
pub fn haar_like_feature_coord(width: usize, height: usize, topology: Topology) -> Vec<Feature> {
    let mut features = Vec::with_capacity(feature_count(width, height, topology).unwrap_or(0));
    let (min_h, min_w) = min_extent(topology);

    for r0 in 0..height {
        for c0 in 0..width {
            for h in min_h..=height - r0 {
                for w in min_w..=width - c0 {
                    push_subdivisions(&mut features, topology, r0, c0, r0 + h - 1, c0 + w - 1);
                }
            }
        }
    }

    debug!("Generated {} {} features for a {}x{} window",
           features.len(), topology, width, height);
    features
}

// Every split of the rectangle (r0, c0)-(r1, c1) realising the topology.
fn push_subdivisions(
    features: &mut Vec<Feature>,
    topology: Topology,
    r0: usize,
    c0: usize,
    r1: usize,
    c1: usize,
) {
    match topology {
        Topology::TwoRectX => {
            for s in c0 + 1..=c1 {
                features.push(Feature::two(
                    Rectangle::new(r0, c0, r1, s - 1),
                    Rectangle::new(r0, s, r1, c1),
                ));
            }
        }
        Topology::TwoRectY => {
            for s in r0 + 1..=r1 {
                features.push(Feature::two(
                    Rectangle::new(r0, c0, s - 1, c1),
                    Rectangle::new(s, c0, r1, c1),
                ));
            }
        }
        Topology::ThreeRectX => {
            for s1 in c0 + 1..c1 {
                for s2 in s1 + 1..=c1 {
                    features.push(Feature::three(
                        Rectangle::new(r0, c0, r1, s1 - 1),
                        Rectangle::new(r0, s1, r1, s2 - 1),
                        Rectangle::new(r0, s2, r1, c1),
                    ));
                }
            }
        }
        Topology::ThreeRectY => {
            for s1 in r0 + 1..r1 {
                for s2 in s1 + 1..=r1 {
                    features.push(Feature::three(
                        Rectangle::new(r0, c0, s1 - 1, c1),
                        Rectangle::new(s1, c0, s2 - 1, c1),
                        Rectangle::new(s2, c0, r1, c1),
                    ));
                }
            }
        }
        Topology::FourRect => {
            for sr in r0 + 1..=r1 {
                for sc in c0 + 1..=c1 {
                    features.push(Feature::four(
                        Rectangle::new(r0, c0, sr - 1, sc - 1),
                        Rectangle::new(r0, sc, sr - 1, c1),
                        Rectangle::new(sr, c0, r1, sc - 1),
                        Rectangle::new(sr, sc, r1, c1),
                    ));
                }
            }
        }
    }
}

/// Enumerate features for every requested topology
///
/// Results are concatenated in request order; the second vector holds the
/// topology of each feature, aligned by index.
///
/// # Errors
/// `InvalidTopology` if the request names an unknown token.
pub fn enumerate_feature_coordinates<'a>(
    width: usize,
    height: usize,
    request: impl Into<TopologyRequest<'a>>,
) -> HaarResult<(Vec<Feature>, Vec<Topology>)> {
    let topologies = validate_feature_types(&request.into())?;

    let mut coords = Vec::new();
    let mut types = Vec::new();
    for topology in topologies {
        let features = haar_like_feature_coord(width, height, topology);
        types.extend(std::iter::repeat(topology).take(features.len()));
        coords.extend(features);
    }

    Ok((coords, types))
}
