//! Center cropping.
//!
//! The crop window is placed with the same `floor((outer - inner) / 2)`
//! offset that [`super::extend_canvas`] uses when pasting, so extending and
//! then cropping back to the original size returns the original pixels.

use super::canvas::center_offset;
use crate::raster::{Raster, Sample};

/// Crop the centered `width` x `height` window out of `image`.
///
/// # Behavior
///
/// - Requested dimensions larger than the source are clamped to the source
/// - Same-size crop returns a copy of the source
pub fn crop_center<T: Sample>(image: &Raster<T>, width: u32, height: u32) -> Raster<T> {
    let out_width = width.min(image.width);
    let out_height = height.min(image.height);

    // Fast path: nothing to remove
    if out_width == image.width && out_height == image.height {
        return image.clone();
    }

    let left = center_offset(image.width, out_width) as usize;
    let top = center_offset(image.height, out_height);

    // Copy pixel data row by row
    let mut data = Vec::with_capacity(out_width as usize * out_height as usize);
    for y in 0..out_height {
        let row = image.row(top + y);
        data.extend_from_slice(&row[left..left + out_width as usize]);
    }

    Raster::new(out_width, out_height, data)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
