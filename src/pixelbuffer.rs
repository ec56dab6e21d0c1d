// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel store the carver works on.
//!
//! A `PixelBuffer` is allocated once, at the size of the source image,
//! and never resized.  Carving compacts pixels toward the origin and
//! shrinks the *logical* width or height; only the `width x height`
//! rectangle anchored at `(0, 0)` is ever valid.  Everything past it is
//! stale and every accessor refuses to read it.

use crate::errors::{CarveError, Result};
use itertools::iproduct;

/// Number of ordered color channels per pixel.
pub const DEPTH: usize = 3;

/// One pixel: three ordered channel values.
pub type Rgb = [u8; DEPTH];

#[derive(Debug, Clone)]
pub struct PixelBuffer {
    // Row stride of the backing store: the original width.
    stride: u32,
    original_height: u32,
    width: u32,
    height: u32,
    data: Vec<Rgb>,
}

impl PixelBuffer {
    /// A black buffer.  Both dimensions must be at least 1.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::from_fn(width, height, |_, _| [0; DEPTH])
    }

    /// Build a buffer by calling `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        if width < 1 || height < 1 {
            return Err(CarveError::DegenerateImage { width, height });
        }
        let data = iproduct!(0..height, 0..width)
            .map(|(y, x)| f(x, y))
            .collect();
        Ok(PixelBuffer {
            stride: width,
            original_height: height,
            width,
            height,
            data,
        })
    }

    /// Copy interleaved, row-major channel bytes (`width * height * 3`).
    pub fn from_raw(width: u32, height: u32, raw: &[u8]) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(CarveError::DegenerateImage { width, height });
        }
        let expected = width as usize * height as usize * DEPTH;
        if raw.len() != expected {
            return Err(CarveError::BufferSize {
                expected,
                actual: raw.len(),
            });
        }
        let data = raw
            .chunks_exact(DEPTH)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(PixelBuffer {
            stride: width,
            original_height: height,
            width,
            height,
            data,
        })
    }

    /// Current logical width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Current logical height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current logical `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The dimensions the buffer was allocated with.
    pub fn original_dimensions(&self) -> (u32, u32) {
        (self.stride, self.original_height)
    }

    /// The pixel at `(x, y)`, or `None` outside the logical extent.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.data[self.get_index(x, y)])
        } else {
            None
        }
    }

    /// The pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the logical extent, even when it
    /// is still inside the allocation.
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgb {
        self.data[self.checked_index(x, y)]
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the logical extent.
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Rgb) {
        let index = self.checked_index(x, y);
        self.data[index] = pixel;
    }

    /// The valid part of row `y`.
    pub fn row(&self, y: u32) -> &[Rgb] {
        let start = self.checked_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// The logical `height x width x 3` grid as interleaved bytes.
    pub fn to_raw(&self) -> Vec<u8> {
        (0..self.height)
            .flat_map(|y| self.row(y).iter())
            .flat_map(|p| p.iter().cloned())
            .collect()
    }

    // Shift every pixel right of `x` on row `y` one place left,
    // overwriting `x`.  The removed pixel lands in the last logical slot,
    // which goes stale once the width is shrunk.
    pub(crate) fn close_row_at(&mut self, x: u32, y: u32) {
        let start = self.checked_index(0, y);
        let row = &mut self.data[start..start + self.width as usize];
        row[x as usize..].rotate_left(1);
    }

    // The column-wise twin of `close_row_at`: pixels below `y` in
    // column `x` move up one place.
    pub(crate) fn close_column_at(&mut self, x: u32, y: u32) {
        for i in y..self.height - 1 {
            let (to, from) = (self.checked_index(x, i), self.checked_index(x, i + 1));
            self.data[to] = self.data[from];
        }
    }

    pub(crate) fn shrink_width(&mut self) {
        assert!(self.width > 1, "cannot shrink width below 1");
        self.width -= 1;
    }

    pub(crate) fn shrink_height(&mut self) {
        assert!(self.height > 1, "cannot shrink height below 1");
        self.height -= 1;
    }

    fn checked_index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside the {}x{} logical image",
            x,
            y,
            self.width,
            self.height
        );
        self.get_index(x, y)
    }

    // Addressing is always against the allocation stride, never the
    // logical width, so compaction never has to move whole rows.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.stride as usize) + (x as usize)
    }
}

impl PartialEq for PixelBuffer {
    /// Two buffers are equal when their logical contents are, whatever
    /// their allocations hold beyond that.
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
            && (0..self.height).all(|y| self.row(y) == other.row(y))
    }
}

impl Eq for PixelBuffer {}
