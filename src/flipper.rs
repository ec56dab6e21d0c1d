// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Energy grid dimensional flipper
//!
//! A read-only proxy over an energy grid that swaps width for height,
//! and every x for y.  A left-to-right seam through the original is a
//! top-to-bottom seam through the flipped view, so one search routine
//! serves both orientations and the two can never drift apart.

use crate::seamfinder::EnergyGrid;

pub struct Flipper<'a, G: EnergyGrid> {
    pub grid: &'a G,
}

impl<'a, G: EnergyGrid> EnergyGrid for Flipper<'a, G> {
    fn dimensions(&self) -> (u32, u32) {
        let (x, y) = self.grid.dimensions();
        (y, x)
    }

    fn energy(&self, x: u32, y: u32) -> u32 {
        self.grid.energy(y, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twodmap::TwoDimensionalMap;

    #[test]
    fn swaps_axes() {
        let map = TwoDimensionalMap::from_vec(3, 2, vec![0u32, 1, 2, 3, 4, 5]).unwrap();
        let flipped = Flipper { grid: &map };
        assert_eq!(flipped.dimensions(), (2, 3));
        assert_eq!(flipped.energy(1, 0), 3);
        assert_eq!(flipped.energy(0, 2), 2);
    }
}
