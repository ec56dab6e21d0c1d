// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The failure modes of a carving run.
//!
//! Carving is deterministic, so nothing here is worth retrying: every
//! variant is terminal for the operation that raised it and is handed
//! back to the caller rather than producing an image of the wrong size.

use crate::seamfinder::Orientation;
use failure::Fail;

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum CarveError {
    /// The source image has no pixels along at least one axis.
    #[fail(display = "image must be at least 1x1, got {}x{}", width, height)]
    DegenerateImage { width: u32, height: u32 },

    /// Raw pixel data does not match the declared dimensions.
    #[fail(display = "pixel data holds {} bytes, expected {}", actual, expected)]
    BufferSize { expected: usize, actual: usize },

    /// A requested target dimension was zero.
    #[fail(display = "target dimensions must be positive, got {}x{}", width, height)]
    InvalidTarget { width: u32, height: u32 },

    /// A seam does not have one entry per row (or column).
    #[fail(display = "{} seam has {} entries, expected {}", orientation, actual, expected)]
    SeamLength {
        orientation: Orientation,
        expected: usize,
        actual: usize,
    },

    /// A seam was handed to the removal routine for the other axis.
    #[fail(display = "expected a {} seam, got a {} seam", expected, actual)]
    SeamOrientation {
        expected: Orientation,
        actual: Orientation,
    },

    /// A seam index lies outside the current logical extent.  Only
    /// raised under the strict removal policy.
    #[fail(
        display = "{} seam index {} at position {} is outside the {}x{} image",
        orientation, index, position, width, height
    )]
    MalformedSeam {
        orientation: Orientation,
        position: usize,
        index: u32,
        width: u32,
        height: u32,
    },

    /// The axis is already a single pixel thick.
    #[fail(display = "cannot remove a {} seam from a {}x{} image", orientation, width, height)]
    Exhausted {
        orientation: Orientation,
        width: u32,
        height: u32,
    },
}

pub type Result<T> = std::result::Result<T, CarveError>;
