// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through an energy grid.
//!
//! The search is the classic shortest-path dynamic program over the
//! implicit grid graph in which every pixel links to the three pixels
//! beneath it.  Only the vertical case is written out; horizontal seams
//! are vertical seams through a `Flipper`.

use crate::cq;
use crate::flipper::Flipper;
use crate::twodmap::{EnergyAndBackPointer, TwoDimensionalMap};
use std::fmt;

/// Which way a seam runs across the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// Top to bottom, one column index per row.  Removing it narrows
    /// the image.
    Vertical,
    /// Left to right, one row index per column.  Removing it shortens
    /// the image.
    Horizontal,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// A connected path of pixels, one per row (vertical) or one per column
/// (horizontal).  `path()[i]` is the column removed at row `i`, or the
/// row removed at column `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam {
    orientation: Orientation,
    path: Vec<u32>,
}

impl Seam {
    pub fn new(orientation: Orientation, path: Vec<u32>) -> Self {
        Seam { orientation, path }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn path(&self) -> &[u32] {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// True when neighbouring entries never differ by more than one.
    pub fn is_connected(&self) -> bool {
        self.path
            .windows(2)
            .all(|w| (i64::from(w[0]) - i64::from(w[1])).abs() <= 1)
    }

    /// Sum of the field's values along the seam.
    ///
    /// # Panics
    ///
    /// Panics if the seam leaves the field.
    pub fn total_energy(&self, field: &TwoDimensionalMap<u32>) -> u64 {
        self.path
            .iter()
            .enumerate()
            .map(|(i, &j)| {
                let i = i as u32;
                let at = cq!(self.orientation == Orientation::Vertical, (j, i), (i, j));
                u64::from(field[at])
            })
            .sum()
    }
}

/// Anything a seam can be searched through: a rectangle of per-pixel
/// energies addressed as `(x, y)`.
pub trait EnergyGrid {
    fn dimensions(&self) -> (u32, u32);
    fn energy(&self, x: u32, y: u32) -> u32;
}

impl EnergyGrid for TwoDimensionalMap<u32> {
    fn dimensions(&self) -> (u32, u32) {
        TwoDimensionalMap::dimensions(self)
    }

    fn energy(&self, x: u32, y: u32) -> u32 {
        self[(x, y)]
    }
}

/// A source of seams.  Implementors hold whatever they need (usually
/// the image) to decide where the next cut goes.
pub trait SeamFinder {
    /// The cheapest left-to-right seam.
    fn find_horizontal_seam(&self) -> Seam;

    /// The cheapest top-to-bottom seam.
    fn find_vertical_seam(&self) -> Seam;
}

// Returns one x coordinate per row.  Ties between candidate parents and
// between candidate end points go to the lowest index: `min_by_key`
// keeps the first of equal minima, and every range is scanned upward.
fn energy_to_seam<G: EnergyGrid>(grid: &G) -> Vec<u32> {
    let (width, height) = grid.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let mut target: TwoDimensionalMap<EnergyAndBackPointer> =
        TwoDimensionalMap::new(width, height);

    // The first row has nowhere to come from.
    for x in 0..width {
        target[(x, 0)].energy = u64::from(grid.energy(x, 0));
    }

    let maxwidth = width - 1;
    // Every later cell costs its own energy plus the cheapest of the
    // (up to) three cells above it.  The search never wraps at the
    // edges.
    for y in 1..height {
        for x in 0..width {
            let range = cq!(x == 0, 0, x - 1)..=cq!(x == maxwidth, maxwidth, x + 1);
            let parent_x = range
                .min_by_key(|px| target[(*px, y - 1)].energy)
                .unwrap_or(x);
            target[(x, y)] = EnergyAndBackPointer {
                energy: u64::from(grid.energy(x, y)) + target[(parent_x, y - 1)].energy,
                parent: Some(parent_x),
            };
        }
    }

    let mut seam_col = (0..width)
        .min_by_key(|x| target[(*x, height - 1)].energy)
        .unwrap_or(0);

    // Walk the parents back up to the first row, then put the seam in
    // row order.
    let mut seam = Vec::with_capacity(height as usize);
    for y in (0..height).rev() {
        seam.push(seam_col);
        if let Some(parent) = target[(seam_col, y)].parent {
            seam_col = parent;
        }
    }
    seam.reverse();
    seam
}

/// The cheapest top-to-bottom seam: for each row, the column to remove.
pub fn energy_to_vertical_seam<G: EnergyGrid>(energy: &G) -> Seam {
    Seam::new(Orientation::Vertical, energy_to_seam(energy))
}

/// The cheapest left-to-right seam: for each column, the row to remove.
pub fn energy_to_horizontal_seam<G: EnergyGrid>(energy: &G) -> Seam {
    Seam::new(
        Orientation::Horizontal,
        energy_to_seam(&Flipper { grid: energy }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    const ENERGY_DATA: [u32; 20] = [9, 9, 0, 9, 9, 9, 1, 9, 8, 9, 9, 9, 9, 9, 0, 9, 9, 9, 0, 9];

    fn grid(width: u32, height: u32, data: &[u32]) -> TwoDimensionalMap<u32> {
        TwoDimensionalMap::from_vec(width, height, data.to_vec()).unwrap()
    }

    // Deterministic noise, so failures reproduce.
    fn noise(width: u32, height: u32, seed: u64) -> TwoDimensionalMap<u32> {
        let mut state = seed;
        let data = (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                ((state >> 33) % 10) as u32
            })
            .collect();
        TwoDimensionalMap::from_vec(width, height, data).unwrap()
    }

    // Every connected top-to-bottom path, by brute force.
    fn all_vertical_paths(width: u32, height: u32) -> Vec<Seam> {
        (0..height)
            .map(|_| 0..width)
            .multi_cartesian_product()
            .map(|path| Seam::new(Orientation::Vertical, path))
            .filter(Seam::is_connected)
            .collect()
    }

    fn all_horizontal_paths(width: u32, height: u32) -> Vec<Seam> {
        (0..width)
            .map(|_| 0..height)
            .multi_cartesian_product()
            .map(|path| Seam::new(Orientation::Horizontal, path))
            .filter(Seam::is_connected)
            .collect()
    }

    #[test]
    fn energy_grid_to_vertical_seam() {
        let energies = grid(5, 4, &ENERGY_DATA);
        let seam = energy_to_vertical_seam(&energies);
        assert_eq!(seam.orientation(), Orientation::Vertical);
        assert_eq!(seam.path(), &[2, 3, 4, 3]);
        assert_eq!(seam.total_energy(&energies), 8);
    }

    #[test]
    fn energy_grid_to_horizontal_seam() {
        let energies = grid(5, 4, &ENERGY_DATA);
        let seam = energy_to_horizontal_seam(&energies);
        assert_eq!(seam.orientation(), Orientation::Horizontal);
        assert_eq!(seam.path(), &[0, 1, 0, 1, 2]);
        assert_eq!(seam.total_energy(&energies), 18);
    }

    #[test]
    fn vertical_seam_is_optimal_on_small_grids() {
        for seed in 0..25 {
            let energies = noise(4, 4, seed);
            let seam = energy_to_vertical_seam(&energies);
            assert_eq!(seam.len(), 4);
            assert!(seam.is_connected());
            let best = all_vertical_paths(4, 4)
                .iter()
                .map(|s| s.total_energy(&energies))
                .min()
                .unwrap();
            assert_eq!(seam.total_energy(&energies), best, "seed {}", seed);
        }
    }

    #[test]
    fn horizontal_seam_is_optimal_on_small_grids() {
        for seed in 0..25 {
            let energies = noise(5, 3, seed);
            let seam = energy_to_horizontal_seam(&energies);
            assert_eq!(seam.len(), 5);
            assert!(seam.is_connected());
            let best = all_horizontal_paths(5, 3)
                .iter()
                .map(|s| s.total_energy(&energies))
                .min()
                .unwrap();
            assert_eq!(seam.total_energy(&energies), best, "seed {}", seed);
        }
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let flat = grid(4, 3, &[1; 12]);
        assert_eq!(energy_to_vertical_seam(&flat).path(), &[0, 0, 0]);
        assert_eq!(energy_to_horizontal_seam(&flat).path(), &[0, 0, 0, 0]);

        // Both diagonals and the straight parent tie; the left one wins.
        let energies = grid(3, 2, &[5, 5, 5, 9, 0, 9]);
        assert_eq!(energy_to_vertical_seam(&energies).path(), &[0, 1]);
    }

    #[test]
    fn avoids_a_bright_outlier() {
        let energies = grid(3, 3, &[1, 1, 1, 1, 100, 1, 1, 1, 1]);
        let seam = energy_to_vertical_seam(&energies);
        assert_ne!(seam.path()[1], 1);
        assert_eq!(seam.path(), &[0, 0, 0]);
        let seam = energy_to_horizontal_seam(&energies);
        assert_ne!(seam.path()[1], 1);
    }

    #[test]
    fn single_row_picks_the_cheapest_pixel() {
        let energies = grid(5, 1, &[7, 3, 9, 3, 8]);
        let seam = energy_to_vertical_seam(&energies);
        assert_eq!(seam.path(), &[1]);
        assert_eq!(seam.total_energy(&energies), 3);
    }

    #[test]
    fn single_column_runs_straight_down() {
        let energies = grid(1, 4, &[7, 3, 9, 3]);
        assert_eq!(energy_to_vertical_seam(&energies).path(), &[0, 0, 0, 0]);
        assert_eq!(energy_to_horizontal_seam(&energies).path(), &[1]);
    }

    #[test]
    fn empty_grid_gives_empty_seam() {
        let energies: TwoDimensionalMap<u32> = TwoDimensionalMap::new(0, 3);
        assert!(energy_to_vertical_seam(&energies).is_empty());
    }

    #[test]
    fn connectivity_check() {
        assert!(Seam::new(Orientation::Vertical, vec![2, 3, 3, 2, 1]).is_connected());
        assert!(!Seam::new(Orientation::Vertical, vec![0, 2]).is_connected());
    }
}
