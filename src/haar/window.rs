//! Detection window geometry
//!
//! A window is the sub-region of an image over which features are evaluated.
//! Coordinates are in pixels with (0, 0) at the top-left corner of the image.

use std::fmt;

/// Detection window (in pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Row of the top-left corner (pixels from top)
    pub r: usize,

    /// Column of the top-left corner (pixels from left)
    pub c: usize,

    /// Width of the window in pixels
    pub width: usize,

    /// Height of the window in pixels
    pub height: usize,
}

impl Window {
    /// Create a new window
    ///
    /// # Arguments
    /// * `r` - Row of the top-left corner
    /// * `c` - Column of the top-left corner
    /// * `width` - Width of the window in pixels
    /// * `height` - Height of the window in pixels
    pub fn new(r: usize, c: usize, width: usize, height: usize) -> Self {
        Window { r, c, width, height }
    }

    /// Window covering a whole `width x height` image
    pub fn full(width: usize, height: usize) -> Self {
        Window::new(0, 0, width, height)
    }

    /// Row immediately below the window (exclusive), `None` on overflow
    pub fn end_row(&self) -> Option<usize> {
        self.r.checked_add(self.height)
    }

    /// Column immediately right of the window (exclusive), `None` on overflow
    pub fn end_col(&self) -> Option<usize> {
        self.c.checked_add(self.width)
    }

    /// Whether the window lies inside an image of `rows x cols`
    pub fn fits(&self, rows: usize, cols: usize) -> bool {
        self.end_row()
            .zip(self.end_col())
            .map_or(false, |(end_row, end_col)| end_row <= rows && end_col <= cols)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at (r={}, c={})", self.width, self.height, self.r, self.c)
    }
}
