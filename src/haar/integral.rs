//! Integral image storage and O(1) rectangle sums
//!
//! An integral image holds, at `(r, c)`, the sum of every source pixel with
//! row <= r and column <= c. There is no zero padding row or column; lookups
//! before the first row or column are treated as zero.

use std::fmt::{Debug, Display};
use std::io::{self, Write};
use std::ops::{Add, AddAssign, Sub, SubAssign};

use byteorder::{LittleEndian, WriteBytesExt};
use image::GrayImage;

use crate::haar::coord::Rectangle;
use crate::haar::errors::{HaarError, HaarResult};

/// Numeric type in which feature values are accumulated
///
/// Integer integral images accumulate in `i64`, floating ones in `f64`, so a
/// float sum is never truncated and an integer sum never becomes a float.
pub trait Accumulator:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + Send
    + Sync
    + 'static
{
    /// NumPy dtype descriptor for little-endian storage
    const NPY_DESCR: &'static str;

    /// Write the value as little-endian bytes
    fn write_le<W: Write>(&self, writer: &mut W) -> io::Result<()>;
}

impl Accumulator for i64 {
    const NPY_DESCR: &'static str = "<i8";

    fn write_le<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i64::<LittleEndian>(*self)
    }
}

impl Accumulator for f64 {
    const NPY_DESCR: &'static str = "<f8";

    fn write_le<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_f64::<LittleEndian>(*self)
    }
}

/// Element type of an integral image
pub trait IntegralValue: Copy + Debug + Send + Sync + 'static {
    /// Accumulator for sums of this type
    type Acc: Accumulator;

    /// Convert into the accumulator domain
    fn to_acc(self) -> Self::Acc;
}

macro_rules! impl_integral_value {
    ($acc:ty => $($t:ty),+) => {
        $(
            impl IntegralValue for $t {
                type Acc = $acc;

                #[inline]
                fn to_acc(self) -> $acc {
                    self as $acc
                }
            }
        )+
    };
}

impl_integral_value!(i64 => u8, u16, u32, u64, i8, i16, i32, i64);
impl_integral_value!(f64 => f32, f64);

/// Row-major integral image
#[derive(Debug, Clone, PartialEq)]
pub struct IntegralImage<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> IntegralImage<T> {
    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw row-major values
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: IntegralValue> IntegralImage<T> {
    /// Wrap an already computed integral image
    ///
    /// # Errors
    /// `GenericError` when `data` does not hold `rows * cols` values.
    pub fn from_raw(rows: usize, cols: usize, data: Vec<T>) -> HaarResult<Self> {
        if data.len() != rows * cols {
            return Err(HaarError::GenericError(format!(
                "Integral image of {}x{} needs {} values, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        Ok(IntegralImage { rows, cols, data })
    }

    /// Value at `(row, col)` in the accumulator domain
    pub fn get(&self, row: usize, col: usize) -> Option<T::Acc> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col].to_acc())
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> T::Acc {
        self.data[row * self.cols + col].to_acc()
    }

    /// Ensure a `width x height` window at `(r, c)` lies inside the image
    ///
    /// # Errors
    /// `WindowOutOfBounds` otherwise.
    pub fn check_window(&self, r: usize, c: usize, width: usize, height: usize) -> HaarResult<()> {
        let fits = r
            .checked_add(height)
            .zip(c.checked_add(width))
            .map_or(false, |(end_r, end_c)| end_r <= self.rows && end_c <= self.cols);

        if fits {
            Ok(())
        } else {
            Err(HaarError::WindowOutOfBounds {
                r,
                c,
                width,
                height,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Sum of the source pixels inside `rect`, offset by the window origin
    ///
    /// The caller guarantees the offset rectangle lies inside the image, see
    /// [`IntegralImage::check_window`].
    #[inline]
    pub fn rect_sum(&self, r: usize, c: usize, rect: &Rectangle) -> T::Acc {
        let row0 = rect.row0 + r;
        let col0 = rect.col0 + c;
        let row1 = rect.row1 + r;
        let col1 = rect.col1 + c;

        let mut sum = self.at(row1, col1);
        if row0 > 0 {
            sum -= self.at(row0 - 1, col1);
        }
        if col0 > 0 {
            sum -= self.at(row1, col0 - 1);
        }
        if row0 > 0 && col0 > 0 {
            sum += self.at(row0 - 1, col0 - 1);
        }
        sum
    }
}

impl<A: Accumulator + IntegralValue<Acc = A>> IntegralImage<A> {
    /// Compute the integral image of a row-major pixel buffer
    ///
    /// # Errors
    /// `GenericError` when `pixels` does not hold `width * height` values.
    pub fn from_pixels<P>(width: usize, height: usize, pixels: &[P]) -> HaarResult<Self>
    where
        P: IntegralValue<Acc = A>,
    {
        if pixels.len() != width * height {
            return Err(HaarError::GenericError(format!(
                "Image of {}x{} needs {} pixels, got {}",
                width,
                height,
                width * height,
                pixels.len()
            )));
        }

        let mut data = vec![A::default(); width * height];
        for row in 0..height {
            let mut row_sum = A::default();
            for col in 0..width {
                let idx = row * width + col;
                row_sum += pixels[idx].to_acc();
                data[idx] = if row > 0 {
                    data[idx - width] + row_sum
                } else {
                    row_sum
                };
            }
        }

        Ok(IntegralImage { rows: height, cols: width, data })
    }
}

impl IntegralImage<i64> {
    /// Compute the integral image of an 8-bit grayscale image
    ///
    /// Sums are kept in `i64`, so images totalling more than `u32::MAX` are
    /// represented exactly.
    pub fn from_gray(image: &GrayImage) -> Self {
        let (w, h) = image.dimensions();
        let (width, height) = (w as usize, h as usize);
        let src_raw = image.as_raw();
        let mut data = vec![0i64; width * height];

        for y in 0..height {
            let mut row_sum = 0i64;
            for x in 0..width {
                let idx = y * width + x;
                row_sum += src_raw[idx] as i64;
                data[idx] = if y > 0 { data[idx - width] + row_sum } else { row_sum };
            }
        }

        IntegralImage { rows: height, cols: width, data }
    }
}
