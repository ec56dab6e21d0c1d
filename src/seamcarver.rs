// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! Seam removal, and the carver that drives energy, search and removal
//! until the image reaches its target size.  Width and height are
//! carved in two strictly separate phases, one axis all the way down
//! before the other is touched.  Interleaving them could give a better
//! picture; that would be a different algorithm.

use crate::energy::DualGradient;
use crate::errors::{CarveError, Result};
use crate::pixelbuffer::PixelBuffer;
use crate::seamfinder::{Orientation, Seam, SeamFinder};
use log::{debug, trace, warn};

/// What to do with a seam index that falls outside the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SeamPolicy {
    /// Skip that row (or column) and carry on.  The index cannot come
    /// from this crate's own search, so a skip means something upstream
    /// handed over a bad seam; it is logged, not reported.
    Lenient,
    /// Refuse the whole seam before touching the image.
    Strict,
}

impl Default for SeamPolicy {
    fn default() -> Self {
        SeamPolicy::Lenient
    }
}

/// Which axis is carved first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CarveOrder {
    WidthFirst,
    HeightFirst,
}

impl Default for CarveOrder {
    fn default() -> Self {
        CarveOrder::WidthFirst
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CarveOptions {
    pub order: CarveOrder,
    pub policy: SeamPolicy,
}

// Length, orientation and (under Strict) range checks, all done before
// the first pixel moves.
fn check_seam(
    image: &PixelBuffer,
    seam: &Seam,
    orientation: Orientation,
    policy: SeamPolicy,
) -> Result<()> {
    let (width, height) = image.dimensions();
    if seam.orientation() != orientation {
        return Err(CarveError::SeamOrientation {
            expected: orientation,
            actual: seam.orientation(),
        });
    }
    let (span, limit) = match orientation {
        Orientation::Vertical => (height, width),
        Orientation::Horizontal => (width, height),
    };
    if limit <= 1 {
        return Err(CarveError::Exhausted {
            orientation,
            width,
            height,
        });
    }
    if seam.len() != span as usize {
        return Err(CarveError::SeamLength {
            orientation,
            expected: span as usize,
            actual: seam.len(),
        });
    }
    if policy == SeamPolicy::Strict {
        let bad = seam.path().iter().enumerate().find(|&(_, &i)| i >= limit);
        if let Some((position, &index)) = bad {
            return Err(CarveError::MalformedSeam {
                orientation,
                position,
                index,
                width,
                height,
            });
        }
    }
    Ok(())
}

/// Remove a vertical seam in place: on every row, the pixels right of
/// the seam slide one place left, then the logical width drops by one.
/// Nothing is reallocated.
///
/// Under `SeamPolicy::Lenient` an out-of-range index leaves its row
/// alone; that row then loses its last pixel instead.
pub fn remove_vertical_seam(
    image: &mut PixelBuffer,
    seam: &Seam,
    policy: SeamPolicy,
) -> Result<()> {
    check_seam(image, seam, Orientation::Vertical, policy)?;
    let width = image.width();
    for (y, &x) in seam.path().iter().enumerate() {
        if x >= width {
            warn!("skipping vertical seam index {} on row {} (width {})", x, y, width);
            continue;
        }
        image.close_row_at(x, y as u32);
    }
    image.shrink_width();
    Ok(())
}

/// Remove a horizontal seam in place: in every column, the pixels
/// below the seam slide one place up, then the logical height drops
/// by one.
pub fn remove_horizontal_seam(
    image: &mut PixelBuffer,
    seam: &Seam,
    policy: SeamPolicy,
) -> Result<()> {
    check_seam(image, seam, Orientation::Horizontal, policy)?;
    let height = image.height();
    for (x, &y) in seam.path().iter().enumerate() {
        if y >= height {
            warn!("skipping horizontal seam index {} on column {} (height {})", y, x, height);
            continue;
        }
        image.close_column_at(x as u32, y);
    }
    image.shrink_height();
    Ok(())
}

/// Where a carving run stands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    ReducingWidth,
    ReducingHeight,
    Done,
}

/// Read-only look at every seam just before it is cut.
pub trait SeamObserver {
    fn observe(&mut self, image: &PixelBuffer, seam: &Seam);
}

impl<F> SeamObserver for F
where
    F: FnMut(&PixelBuffer, &Seam),
{
    fn observe(&mut self, image: &PixelBuffer, seam: &Seam) {
        self(image, seam)
    }
}

/// Owns the image for the length of a carving run.  Every `step` is
/// atomic: it leaves a valid image exactly one row or column smaller,
/// so a caller can stop between any two steps.
#[derive(Debug)]
pub struct SeamCarver {
    image: PixelBuffer,
    target: (u32, u32),
    options: CarveOptions,
    phase: Phase,
}

impl SeamCarver {
    /// Prepare to carve `image` down to `newwidth x newheight`.  Targets
    /// larger than the image are clamped to it; this carver never
    /// upscales.  Zero targets are refused.
    pub fn new(image: PixelBuffer, newwidth: u32, newheight: u32) -> Result<Self> {
        Self::with_options(image, newwidth, newheight, CarveOptions::default())
    }

    pub fn with_options(
        image: PixelBuffer,
        newwidth: u32,
        newheight: u32,
        options: CarveOptions,
    ) -> Result<Self> {
        if newwidth == 0 || newheight == 0 {
            return Err(CarveError::InvalidTarget {
                width: newwidth,
                height: newheight,
            });
        }
        let (width, height) = image.dimensions();
        let target = (newwidth.min(width), newheight.min(height));
        if target != (newwidth, newheight) {
            debug!(
                "clamped target {}x{} to {}x{}",
                newwidth, newheight, target.0, target.1
            );
        }
        let mut carver = SeamCarver {
            image,
            target,
            options,
            phase: Phase::Done,
        };
        carver.phase = carver.next_phase();
        debug!(
            "carving {}x{} to {}x{}, starting in {:?}",
            width, height, target.0, target.1, carver.phase
        );
        Ok(carver)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The clamped `(width, height)` being carved toward.
    pub fn target(&self) -> (u32, u32) {
        self.target
    }

    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn into_image(self) -> PixelBuffer {
        self.image
    }

    // A width of one has no seam left to give, whatever the target.
    fn width_pending(&self) -> bool {
        let width = self.image.width();
        width > self.target.0 && width > 1
    }

    fn height_pending(&self) -> bool {
        let height = self.image.height();
        height > self.target.1 && height > 1
    }

    fn next_phase(&self) -> Phase {
        let (width, height) = (self.width_pending(), self.height_pending());
        match self.options.order {
            CarveOrder::WidthFirst if width => Phase::ReducingWidth,
            CarveOrder::HeightFirst if height => Phase::ReducingHeight,
            _ if width => Phase::ReducingWidth,
            _ if height => Phase::ReducingHeight,
            _ => Phase::Done,
        }
    }

    /// Carve a single seam and report the phase that follows.
    pub fn step(&mut self) -> Result<Phase> {
        self.step_observed(&mut |_: &PixelBuffer, _: &Seam| {})
    }

    pub fn step_observed(&mut self, observer: &mut dyn SeamObserver) -> Result<Phase> {
        let policy = self.options.policy;
        match self.phase {
            Phase::Done => return Ok(Phase::Done),
            Phase::ReducingWidth => {
                let seam = DualGradient::new(&self.image).find_vertical_seam();
                trace!("vertical seam at width {}: {:?}", self.image.width(), seam.path());
                observer.observe(&self.image, &seam);
                remove_vertical_seam(&mut self.image, &seam, policy)?;
            }
            Phase::ReducingHeight => {
                let seam = DualGradient::new(&self.image).find_horizontal_seam();
                trace!("horizontal seam at height {}: {:?}", self.image.height(), seam.path());
                observer.observe(&self.image, &seam);
                remove_horizontal_seam(&mut self.image, &seam, policy)?;
            }
        }
        let next = self.next_phase();
        if next != self.phase {
            let (width, height) = self.image.dimensions();
            debug!("{:?} -> {:?} at {}x{}", self.phase, next, width, height);
        }
        self.phase = next;
        Ok(next)
    }

    /// Carve until both dimensions reach their targets.
    pub fn carve(self) -> Result<PixelBuffer> {
        self.carve_observed(&mut |_: &PixelBuffer, _: &Seam| {})
    }

    pub fn carve_observed(mut self, observer: &mut dyn SeamObserver) -> Result<PixelBuffer> {
        let mut seams = 0usize;
        while self.phase != Phase::Done {
            self.step_observed(observer)?;
            seams += 1;
        }
        let (width, height) = self.image.dimensions();
        debug!("removed {} seams, image is now {}x{}", seams, width, height);
        Ok(self.image)
    }
}

/// Carve `image` down to `newwidth x newheight`, width first.
pub fn seamcarve(image: PixelBuffer, newwidth: u32, newheight: u32) -> Result<PixelBuffer> {
    SeamCarver::new(image, newwidth, newheight)?.carve()
}
