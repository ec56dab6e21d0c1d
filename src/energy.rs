// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The dual-gradient energy of a pixel is the squared color distance
//! between its left and right neighbours plus the squared color
//! distance between its upper and lower neighbours, summed over all
//! three channels.  Neighbours wrap around the image edges, so the
//! left neighbour of column 0 is the last column.  No smoothing, no
//! channel weighting.
//!
//! The field is recomputed from scratch after every seam.  Updating
//! only the columns a seam touched would be faster; it would also be
//! one more place for the field and the image to disagree.

use crate::cq;
use crate::pixelbuffer::{PixelBuffer, Rgb};
use crate::seamfinder::{energy_to_horizontal_seam, energy_to_vertical_seam, Seam, SeamFinder};
use crate::twodmap::TwoDimensionalMap;
use itertools::iproduct;
use num_traits::pow;

// Takes the channels from two pixels, maps the difference between
// each channel, squares it, and then sums them all up:
//
//        |Δ|² = (Δc0)² + (Δc1)² + (Δc2)²
//
// The difference goes through i32, which holds ±255 and its square
// with room to spare.
#[inline]
fn energy_of_pair(p1: &Rgb, p2: &Rgb) -> u32 {
    p1.iter()
        .zip(p2.iter())
        .map(|(&c1, &c2)| pow(i32::from(c1) - i32::from(c2), 2) as u32)
        .sum()
}

/// Compute the energy of every pixel in the logical extent of an
/// image.  The result has the image's current dimensions, and every
/// value is at most `6 * 255²`.
pub fn calculate_energy(image: &PixelBuffer) -> TwoDimensionalMap<u32> {
    let (width, height) = image.dimensions();
    let mut emap = TwoDimensionalMap::new(width, height);
    if width == 0 || height == 0 {
        return emap;
    }
    let (mw, mh) = (width - 1, height - 1);

    for (y, x) in iproduct!(0..height, 0..width) {
        let (leftpixel, rightpixel, uppixel, downpixel) = (
            image.get_pixel(cq!(x == 0, mw, x - 1), y),
            image.get_pixel(cq!(x >= mw, 0, x + 1), y),
            image.get_pixel(x, cq!(y == 0, mh, y - 1)),
            image.get_pixel(x, cq!(y >= mh, 0, y + 1)),
        );
        emap[(x, y)] =
            energy_of_pair(&leftpixel, &rightpixel) + energy_of_pair(&uppixel, &downpixel);
    }
    emap
}

/// The dual-gradient seam engine: holds a reference to the image and
/// builds a fresh energy field for every seam it is asked for.
pub struct DualGradient<'a> {
    image: &'a PixelBuffer,
}

impl<'a> DualGradient<'a> {
    pub fn new(image: &'a PixelBuffer) -> Self {
        DualGradient { image }
    }
}

impl<'a> SeamFinder for DualGradient<'a> {
    fn find_horizontal_seam(&self) -> Seam {
        energy_to_horizontal_seam(&calculate_energy(self.image))
    }

    fn find_vertical_seam(&self) -> Seam {
        energy_to_vertical_seam(&calculate_energy(self.image))
    }
}
