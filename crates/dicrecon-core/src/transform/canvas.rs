//! Canvas extension: paste a raster centered on a larger background canvas.

use crate::raster::{Raster, Sample};

/// Offset that centers a span of `inner` pixels inside `outer` pixels.
#[inline]
pub(crate) fn center_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}

/// Copy `image` onto a new `new_width` x `new_height` canvas filled with
/// `background`.
///
/// The original is placed at offset `floor((new - old) / 2)` on each axis.
/// Requested sizes smaller than the source are raised to the source size so
/// no content is ever clipped.
pub fn extend_canvas<T: Sample>(
    image: &Raster<T>,
    new_width: u32,
    new_height: u32,
    background: T,
) -> Raster<T> {
    let new_width = new_width.max(image.width);
    let new_height = new_height.max(image.height);
    if new_width == image.width && new_height == image.height {
        return image.clone();
    }

    let x_off = center_offset(new_width, image.width) as usize;
    let y_off = center_offset(new_height, image.height);

    let mut canvas = Raster::filled(new_width, new_height, background);
    let src_w = image.width as usize;
    for y in 0..image.height {
        let dst_row = canvas.row_mut(y + y_off);
        dst_row[x_off..x_off + src_w].copy_from_slice(image.row(y));
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32) -> Raster<u16> {
        let data = (1..=width * height).map(|v| v as u16).collect();
        Raster::new(width, height, data)
    }

    #[test]
    fn test_extend_exact_size() {
        let img = ramp(3, 2);
        let canvas = extend_canvas(&img, 7, 5, 0);
        assert_eq!(canvas.dimensions(), (7, 5));
        assert_eq!(canvas.data.len(), 35);
    }

    #[test]
    fn test_content_centered() {
        let img = ramp(3, 2);
        // offsets: floor((7-3)/2) = 2, floor((5-2)/2) = 1
        let canvas = extend_canvas(&img, 7, 5, 0);
        assert_eq!(canvas.get(2, 1), 1);
        assert_eq!(canvas.get(4, 1), 3);
        assert_eq!(canvas.get(2, 2), 4);
        assert_eq!(canvas.get(4, 2), 6);
    }

    #[test]
    fn test_background_fill() {
        let img = ramp(2, 2);
        let canvas = extend_canvas(&img, 4, 4, 0);
        let content: u16 = canvas.data.iter().filter(|&&v| v != 0).count() as u16;
        assert_eq!(content, 4);
        assert_eq!(canvas.get(0, 0), 0);
        assert_eq!(canvas.get(3, 3), 0);
    }

    #[test]
    fn test_odd_padding_floors() {
        let img = ramp(2, 2);
        // floor((5-2)/2) = 1 on both axes
        let canvas = extend_canvas(&img, 5, 5, 0);
        assert_eq!(canvas.get(1, 1), 1);
        assert_eq!(canvas.get(2, 2), 4);
        assert_eq!(canvas.get(3, 3), 0);
    }

    #[test]
    fn test_same_size_is_copy() {
        let img = ramp(4, 3);
        assert_eq!(extend_canvas(&img, 4, 3, 0), img);
    }

    #[test]
    fn test_smaller_request_never_clips() {
        let img = ramp(6, 2);
        let canvas = extend_canvas(&img, 2, 6, 0);
        assert_eq!(canvas.dimensions(), (6, 6));
        assert_eq!(canvas.get(0, 2), 1);
    }

    #[test]
    fn test_float_background() {
        let img = Raster::filled(1, 1, 2.5f32);
        let canvas = extend_canvas(&img, 3, 3, -1.0);
        assert_eq!(canvas.get(1, 1), 2.5);
        assert_eq!(canvas.get(0, 0), -1.0);
    }
}
