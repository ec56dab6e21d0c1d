// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing by seam carving.
//!
//! The image is narrowed (or shortened) one pixel at a time by cutting
//! out the connected path of pixels with the least dual-gradient
//! energy, so flat, uninteresting regions shrink while edges and
//! detail survive.

mod ternary;

pub mod dump;
pub mod energy;
pub mod errors;
pub mod flipper;
pub mod pixelbuffer;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use dump::{energy_to_image, overlay_seam};
pub use energy::{calculate_energy, DualGradient};
pub use errors::{CarveError, Result};
pub use pixelbuffer::{PixelBuffer, Rgb, DEPTH};
pub use seamcarver::{
    remove_horizontal_seam, remove_vertical_seam, seamcarve, CarveOptions, CarveOrder, Phase,
    SeamCarver, SeamObserver, SeamPolicy,
};
pub use seamfinder::{
    energy_to_horizontal_seam, energy_to_vertical_seam, EnergyGrid, Orientation, Seam, SeamFinder,
};
pub use twodmap::TwoDimensionalMap;
