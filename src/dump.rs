// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Moving pixels between `image` buffers and the carver, and rendering
//! the carver's intermediate products as pictures.

use crate::cq;
use crate::errors::Result;
use crate::pixelbuffer::PixelBuffer;
use crate::seamfinder::{Orientation, Seam};
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Pixel, Rgb, RgbImage};

const SEAM_COLOR: [u8; 3] = [255, 0, 0];

impl PixelBuffer {
    /// Copy any 8-bit image into a new buffer, keeping only its color
    /// channels.
    pub fn from_image<I, P>(image: &I) -> Result<Self>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = u8> + 'static,
    {
        let (width, height) = image.dimensions();
        PixelBuffer::from_fn(width, height, |x, y| {
            let rgb = image.get_pixel(x, y).to_rgb();
            let c = rgb.channels();
            [c[0], c[1], c[2]]
        })
    }

    /// The logical extent of the buffer as an `RgbImage`.
    pub fn to_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width(), self.height(), |x, y| {
            *Rgb::from_slice(&self.get_pixel(x, y))
        })
    }
}

/// Render an energy field as greyscale, scaled so the most energetic
/// pixel is white.  A field with no energy at all renders black.
pub fn energy_to_image(energy: &TwoDimensionalMap<u32>) -> GrayImage {
    let factor = u64::from(energy.values().iter().cloned().max().unwrap_or(0));
    let (width, height) = energy.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let e = u64::from(energy[(x, y)]);
        let c = cq!(factor == 0, 0, e * 255 / factor);
        *Luma::from_slice(&[c as u8])
    })
}

/// The image with a seam painted red, one pixel either side of it
/// included so it shows up at a glance.  Indices outside the image are
/// ignored.
pub fn overlay_seam(image: &PixelBuffer, seam: &Seam) -> RgbImage {
    let mut out = image.to_image();
    let (width, height) = image.dimensions();
    let red = *Rgb::from_slice(&SEAM_COLOR);
    for (i, &j) in seam.path().iter().enumerate() {
        let i = i as u32;
        let (x, y) = cq!(seam.orientation() == Orientation::Vertical, (j, i), (i, j));
        if x >= width || y >= height {
            continue;
        }
        out.put_pixel(x, y, red);
        match seam.orientation() {
            Orientation::Vertical => {
                if x > 0 {
                    out.put_pixel(x - 1, y, red);
                }
                if x + 1 < width {
                    out.put_pixel(x + 1, y, red);
                }
            }
            Orientation::Horizontal => {
                if y > 0 {
                    out.put_pixel(x, y - 1, red);
                }
                if y + 1 < height {
                    out.put_pixel(x, y + 1, red);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::calculate_energy;
    use image::Rgba;

    #[test]
    fn image_round_trip() {
        let source: RgbImage =
            ImageBuffer::from_raw(2, 2, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]).unwrap();
        let buffer = PixelBuffer::from_image(&source).unwrap();
        assert_eq!(buffer.dimensions(), (2, 2));
        assert_eq!(buffer.get_pixel(1, 1), [10, 11, 12]);
        assert_eq!(buffer.to_image().into_raw(), source.into_raw());
    }

    #[test]
    fn alpha_is_dropped() {
        let source: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_raw(1, 1, vec![10, 20, 30, 40]).unwrap();
        let buffer = PixelBuffer::from_image(&source).unwrap();
        assert_eq!(buffer.get_pixel(0, 0), [10, 20, 30]);
    }

    #[test]
    fn to_image_uses_the_logical_extent() {
        let mut buffer = PixelBuffer::from_fn(3, 2, |x, _| [x as u8, 0, 0]).unwrap();
        buffer.close_row_at(0, 0);
        buffer.close_row_at(0, 1);
        buffer.shrink_width();
        let image = buffer.to_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.into_raw(), vec![1, 0, 0, 2, 0, 0, 1, 0, 0, 2, 0, 0]);
    }

    #[test]
    fn energy_image_scales_to_white() {
        let energy = TwoDimensionalMap::from_vec(3, 1, vec![0u32, 50, 100]).unwrap();
        assert_eq!(energy_to_image(&energy).into_raw(), vec![0, 127, 255]);

        let flat = PixelBuffer::from_fn(2, 2, |_, _| [9, 9, 9]).unwrap();
        let black = energy_to_image(&calculate_energy(&flat));
        assert!(black.into_raw().iter().all(|&c| c == 0));
    }

    #[test]
    fn overlay_paints_the_seam_and_its_neighbours() {
        let image = PixelBuffer::new(4, 2).unwrap();
        let seam = Seam::new(Orientation::Vertical, vec![0, 2]);
        let out = overlay_seam(&image, &seam);
        let reds: Vec<bool> = out.pixels().map(|p| p.channels()[0] == 255).collect();
        assert_eq!(
            reds,
            vec![true, true, false, false, false, true, true, true]
        );
    }
}
