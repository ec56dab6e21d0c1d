// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// A one-line conditional expression.  Rust's `if` is already an
/// expression, but rustfmt spreads every arm across four lines, and
/// the tables of border rules (wrap at the energy edges, clamp at the
/// seam edges) read much better when each rule fits on a single line.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn picks_the_matching_arm() {
        let width = 5u32;
        let wrap = |x: u32| cq!(x == 0, width - 1, x - 1);
        assert_eq!(wrap(0), 4);
        assert_eq!(wrap(3), 2);
    }
}
