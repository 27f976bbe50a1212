//! Turn the integrated float raster into the final 8-bit image.
//!
//! 1. Rotate back by `-angle` on the same canvas (no further extension)
//! 2. Center-crop to the source dimensions
//! 3. Quantize to 8 bits with min-max scaling

use image::{GrayImage, Luma};

use crate::raster::Raster;
use crate::transform::{crop_center, rotate, Interpolation};

/// Rotate `output` back by `-angle`, crop to `original_size` and quantize.
pub fn finish(
    output: &Raster<f32>,
    angle: f64,
    interpolation: Interpolation,
    original_size: (u32, u32),
) -> GrayImage {
    let back = rotate(output, -angle, interpolation, 0.0);
    let (width, height) = original_size;
    let cropped = crop_center(&back, width, height);
    to_gray8_scaled(&cropped)
}

/// Map the float range `[min, max]` linearly onto `0..=255`.
///
/// A flat raster (or one holding non-finite values only) maps to all zeros.
pub fn to_gray8_scaled(raster: &Raster<f32>) -> GrayImage {
    let stats = raster.stats();
    let range = stats.range();
    let scale = if range > 0.0 && range.is_finite() {
        255.0 / range
    } else {
        0.0
    };

    GrayImage::from_fn(raster.width, raster.height, |x, y| {
        let v = (raster.get(x, y) as f64 - stats.min) * scale;
        Luma([v.round().clamp(0.0, 255.0) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_spans_full_range() {
        let raster = Raster::new(3, 1, vec![-2.0f32, 0.0, 2.0]);
        let img = to_gray8_scaled(&raster);
        assert_eq!(img.as_raw(), &vec![0u8, 128, 255]);
    }

    #[test]
    fn test_flat_raster_is_black() {
        let raster = Raster::filled(4, 4, 3.25f32);
        let img = to_gray8_scaled(&raster);
        assert!(img.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_finish_crops_to_original() {
        let raster = Raster::filled(41, 37, 1.0f32);
        let img = finish(&raster, 30.0, Interpolation::Bicubic, (20, 15));
        assert_eq!(img.dimensions(), (20, 15));
    }

    #[test]
    fn test_finish_without_rotation_preserves_order() {
        #[rustfmt::skip]
        let raster = Raster::new(4, 3, vec![
            0.0f32, 0.0, 0.0, 0.0,
            0.0,   -1.0, 1.0, 0.0,
            0.0,    0.0, 0.0, 0.0,
        ]);
        // floor((4-2)/2) = 1, floor((3-1)/2) = 1
        let img = finish(&raster, 0.0, Interpolation::Bicubic, (2, 1));
        assert_eq!(img.as_raw(), &vec![0u8, 255]);
    }
}
