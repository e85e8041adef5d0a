//! BinaryImage - Thresholded foreground/background grid
//!
//! The input type of every segmentation run. Any source value `> 0` is
//! foreground, `0` is background. Pixels are stored one byte each in
//! row-major order.
//!
//! # Ownership model
//!
//! `BinaryImage` is a plain owned buffer. Segmentation only reads it, so the
//! same image can be segmented repeatedly (or from several threads) while
//! each run keeps its own label grid.

use crate::error::{Error, Result};

/// Foreground marker used in the textual mask format
const ASCII_FOREGROUND: &[char] = &['#', '1', 'X', 'x', '*'];

/// Background marker used in the textual mask format
const ASCII_BACKGROUND: &[char] = &['.', '0', '_'];

/// A binarized image: every pixel is either foreground or background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BinaryImage {
    /// Create a new all-background image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        })
    }

    /// Create an image from a row-major byte buffer (`> 0` = foreground).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::DataLengthMismatch`] if `data` does not hold exactly
    /// `width * height` values.
    pub fn from_bytes(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let mut image = Self::new(width, height)?;
        if data.len() != image.data.len() {
            return Err(Error::DataLengthMismatch {
                expected: image.data.len(),
                actual: data.len(),
            });
        }
        for (dst, &src) in image.data.iter_mut().zip(data) {
            *dst = u8::from(src > 0);
        }
        Ok(image)
    }

    /// Create an image from a row-major boolean buffer.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BinaryImage::from_bytes`].
    pub fn from_bools(width: u32, height: u32, data: &[bool]) -> Result<Self> {
        let bytes: Vec<u8> = data.iter().map(|&b| u8::from(b)).collect();
        Self::from_bytes(width, height, &bytes)
    }

    /// Parse a textual mask: one line per row, `#` (or `1`, `X`, `*`) for
    /// foreground and `.` (or `0`, `_`) for background.
    ///
    /// Blank lines and lines starting with `;` are skipped. Trailing
    /// whitespace is ignored; all remaining rows must have the same width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] for unknown characters or ragged rows,
    /// and [`Error::InvalidDimension`] if no rows remain.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            let mut row = Vec::with_capacity(line.len());
            for c in line.chars() {
                if ASCII_FOREGROUND.contains(&c) {
                    row.push(1);
                } else if ASCII_BACKGROUND.contains(&c) {
                    row.push(0);
                } else {
                    return Err(Error::ParseError {
                        line: line_no + 1,
                        message: format!("unexpected character {:?}", c),
                    });
                }
            }
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(Error::ParseError {
                        line: line_no + 1,
                        message: format!("row width {} differs from {}", row.len(), first.len()),
                    });
                }
            }
            rows.push(row);
        }

        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let data: Vec<u8> = rows.into_iter().flatten().collect();
        Self::from_bytes(width, height, &data)
    }

    /// Get the image width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether `(x, y)` lies inside the image
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Check whether `(x, y)` is a foreground pixel.
    ///
    /// Coordinates outside the image read as background.
    #[inline]
    pub fn is_foreground(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.data[y as usize * self.width as usize + x as usize] != 0
    }

    /// Set a pixel to foreground (`true`) or background (`false`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `(x, y)` is outside the image.
    pub fn set(&mut self, x: i32, y: i32, foreground: bool) -> Result<()> {
        if !self.in_bounds(x, y) {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.data[y as usize * self.width as usize + x as usize] = u8::from(foreground);
        Ok(())
    }

    /// Count the foreground pixels
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Row-major pixel values, `1` for foreground and `0` for background
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Render the image in the textual mask format accepted by
    /// [`BinaryImage::from_ascii`].
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.data.chunks(self.width as usize) {
            out.extend(row.iter().map(|&v| if v != 0 { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}
