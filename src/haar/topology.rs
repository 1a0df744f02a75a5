//! Feature topology registry
//!
//! The five Haar-like feature layouts form a closed set. External tokens
//! (`type-2-x`, ...) are validated here once and converted to [`Topology`];
//! nothing past this module handles topology strings.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::haar::errors::{HaarError, HaarResult};

/// Rectangle layout of a Haar-like feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topology {
    /// Two rectangles side by side, split along columns
    TwoRectX,
    /// Two rectangles stacked, split along rows
    TwoRectY,
    /// Three rectangles side by side
    ThreeRectX,
    /// Three rectangles stacked
    ThreeRectY,
    /// Four rectangles in a 2x2 grid
    FourRect,
}

/// All topologies in canonical order
pub const FEATURE_TYPES: [Topology; 5] = [
    Topology::TwoRectX,
    Topology::TwoRectY,
    Topology::ThreeRectX,
    Topology::ThreeRectY,
    Topology::FourRect,
];

/// Largest number of rectangles in any feature
pub const MAX_RECTS: usize = 4;

/// Contribution of a rectangle to its feature value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Topology {
    /// External token of this topology
    pub fn name(&self) -> &'static str {
        match self {
            Topology::TwoRectX => "type-2-x",
            Topology::TwoRectY => "type-2-y",
            Topology::ThreeRectX => "type-3-x",
            Topology::ThreeRectY => "type-3-y",
            Topology::FourRect => "type-4",
        }
    }

    /// Number of rectangles making up one feature
    pub fn rect_count(&self) -> usize {
        match self {
            Topology::TwoRectX | Topology::TwoRectY => 2,
            Topology::ThreeRectX | Topology::ThreeRectY => 3,
            Topology::FourRect => MAX_RECTS,
        }
    }

    /// Sign of the rectangle at `index` within a feature
    ///
    /// Strip layouts alternate starting negative (-, +, -). The 2x2 grid is
    /// stored row-major and uses a checkerboard: top-left and bottom-right
    /// negative, top-right and bottom-left positive.
    pub fn sign(&self, index: usize) -> Sign {
        let negative = match self {
            Topology::FourRect => {
                let row_half = index / 2;
                let col_half = index % 2;
                row_half == col_half
            }
            _ => index % 2 == 0,
        };

        if negative {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    /// Accepted external tokens, in canonical order
    pub fn valid_tokens() -> Vec<&'static str> {
        FEATURE_TYPES.iter().map(|t| t.name()).collect()
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topology {
    type Err = HaarError;

    fn from_str(token: &str) -> HaarResult<Self> {
        FEATURE_TYPES
            .iter()
            .copied()
            .find(|t| t.name() == token)
            .ok_or_else(|| HaarError::InvalidTopology {
                token: token.to_string(),
                valid: Topology::valid_tokens(),
            })
    }
}

/// Which topologies a caller wants processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyRequest<'a> {
    /// All five topologies in canonical order
    All,
    /// A single external token
    One(&'a str),
    /// An ordered collection of external tokens
    Many(Vec<&'a str>),
    /// Already-validated topologies
    Typed(Vec<Topology>),
}

impl<'a> From<Option<&'a str>> for TopologyRequest<'a> {
    fn from(token: Option<&'a str>) -> Self {
        match token {
            Some(t) => TopologyRequest::One(t),
            None => TopologyRequest::All,
        }
    }
}

impl<'a> From<&'a str> for TopologyRequest<'a> {
    fn from(token: &'a str) -> Self {
        TopologyRequest::One(token)
    }
}

impl<'a> From<&'a [&'a str]> for TopologyRequest<'a> {
    fn from(tokens: &'a [&'a str]) -> Self {
        TopologyRequest::Many(tokens.to_vec())
    }
}

impl<'a> From<&'a [String]> for TopologyRequest<'a> {
    fn from(tokens: &'a [String]) -> Self {
        TopologyRequest::Many(tokens.iter().map(String::as_str).collect())
    }
}

impl From<Topology> for TopologyRequest<'_> {
    fn from(topology: Topology) -> Self {
        TopologyRequest::Typed(vec![topology])
    }
}

impl From<&[Topology]> for TopologyRequest<'_> {
    fn from(topologies: &[Topology]) -> Self {
        TopologyRequest::Typed(topologies.to_vec())
    }
}

/// Resolve a request into the ordered list of topologies to process
///
/// # Errors
/// `InvalidTopology` on the first token that is not one of the five
/// canonical names.
pub fn validate_feature_types(request: &TopologyRequest<'_>) -> HaarResult<Vec<Topology>> {
    let topologies = match request {
        TopologyRequest::All => FEATURE_TYPES.to_vec(),
        TopologyRequest::One(token) => vec![token.parse()?],
        TopologyRequest::Many(tokens) => tokens
            .iter()
            .map(|token| token.parse())
            .collect::<HaarResult<Vec<Topology>>>()?,
        TopologyRequest::Typed(topologies) => topologies.clone(),
    };

    debug!("Validated feature types: {:?}", topologies);
    Ok(topologies)
}
