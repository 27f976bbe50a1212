//! Arbitrary-angle raster rotation with nearest, bilinear and bicubic
//! interpolation.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output raster,
//! we calculate which source position maps onto it and interpolate the
//! surrounding samples. Rotation is about the raster center
//! `((w - 1) / 2, (h - 1) / 2)` and is clockwise-positive in image
//! coordinates (y pointing down):
//!
//! ```text
//! src_x =  dx * cos(θ) + dy * sin(θ) + cx
//! src_y = -dx * sin(θ) + dy * cos(θ) + cy
//! ```
//!
//! Destination pixels whose source position falls outside the raster are set
//! to the background value. Inside the raster, interpolation kernels clamp
//! their taps to the edge so real samples never blend with the background.

use serde::{Deserialize, Serialize};

use super::bounds::compute_rotated_bounds;
use super::canvas::extend_canvas;
use crate::raster::{Raster, Sample};

/// Interpolation used when resampling a rotated raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Nearest neighbor (exact values, blocky edges).
    Nearest,
    /// Bilinear over the 2x2 neighborhood.
    Bilinear,
    /// Catmull-Rom bicubic over the 4x4 neighborhood.
    #[default]
    Bicubic,
}

/// Rotate `image` by `angle_degrees` (clockwise-positive) on a canvas of the
/// same size. Content leaving the canvas is clipped; uncovered pixels get
/// `background`.
pub fn rotate<T: Sample>(
    image: &Raster<T>,
    angle_degrees: f64,
    interpolation: Interpolation,
    background: T,
) -> Raster<T> {
    // Fast path: no rotation needed
    if (angle_degrees % 360.0).abs() < f64::EPSILON || image.is_empty() {
        return image.clone();
    }

    let (w, h) = (image.width, image.height);
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let cx = (w as f64 - 1.0) / 2.0;
    let cy = (h as f64 - 1.0) / 2.0;
    let (max_x, max_y) = (w as f64 - 0.5, h as f64 - 0.5);

    let mut output = Raster::filled(w, h, background);
    for dst_y in 0..h {
        let dy = dst_y as f64 - cy;
        let row = output.row_mut(dst_y);
        for (dst_x, out) in row.iter_mut().enumerate() {
            let dx = dst_x as f64 - cx;

            // Apply inverse rotation to find source coordinates
            let src_x = dx * cos + dy * sin + cx;
            let src_y = -dx * sin + dy * cos + cy;

            if src_x < -0.5 || src_x >= max_x || src_y < -0.5 || src_y >= max_y {
                continue;
            }

            *out = match interpolation {
                Interpolation::Nearest => sample_nearest(image, src_x, src_y),
                Interpolation::Bilinear => T::from_f64(sample_bilinear(image, src_x, src_y)),
                Interpolation::Bicubic => T::from_f64(sample_bicubic(image, src_x, src_y)),
            };
        }
    }

    output
}

/// Rotate `image` by `angle_degrees` onto an enlarged canvas so nothing is
/// clipped.
///
/// The canvas size comes from [`compute_rotated_bounds`], raised to at least
/// the source size on each axis. The source is first pasted centered onto the
/// canvas (filled with `background`), then rotated in place.
pub fn rotate_extend<T: Sample>(
    image: &Raster<T>,
    angle_degrees: f64,
    interpolation: Interpolation,
    background: T,
) -> Raster<T> {
    let (bound_w, bound_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);
    let canvas = extend_canvas(image, bound_w, bound_h, background);
    rotate(&canvas, angle_degrees, interpolation, background)
}

/// Clamp an integer tap position into `0..len`.
#[inline]
fn clamp_index(i: i64, len: u32) -> u32 {
    i.clamp(0, len as i64 - 1) as u32
}

fn sample_nearest<T: Sample>(image: &Raster<T>, x: f64, y: f64) -> T {
    let px = clamp_index(x.round() as i64, image.width);
    let py = clamp_index(y.round() as i64, image.height);
    image.get(px, py)
}

/// Sample using bilinear interpolation over the 4 nearest samples.
fn sample_bilinear<T: Sample>(image: &Raster<T>, x: f64, y: f64) -> f64 {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let px0 = clamp_index(x0, image.width);
    let px1 = clamp_index(x0 + 1, image.width);
    let py0 = clamp_index(y0, image.height);
    let py1 = clamp_index(y0 + 1, image.height);

    let p00 = image.get(px0, py0).to_f64();
    let p10 = image.get(px1, py0).to_f64();
    let p01 = image.get(px0, py1).to_f64();
    let p11 = image.get(px1, py1).to_f64();

    p00 * (1.0 - fx) * (1.0 - fy) + p10 * fx * (1.0 - fy) + p01 * (1.0 - fx) * fy + p11 * fx * fy
}

/// Sample using bicubic interpolation over the 4x4 neighborhood.
fn sample_bicubic<T: Sample>(image: &Raster<T>, x: f64, y: f64) -> f64 {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let mut sum = 0.0;
    for ky in -1..=2i64 {
        let wy = cubic_weight(fy - ky as f64);
        if wy == 0.0 {
            continue;
        }
        let py = clamp_index(y0 + ky, image.height);
        let mut row_sum = 0.0;
        for kx in -1..=2i64 {
            let px = clamp_index(x0 + kx, image.width);
            row_sum += image.get(px, py).to_f64() * cubic_weight(fx - kx as f64);
        }
        sum += row_sum * wy;
    }

    sum
}

/// Catmull-Rom cubic convolution kernel (`a = -0.5`).
///
/// ```text
/// W(t) = (a+2)|t|³ - (a+3)|t|² + 1       for |t| <= 1
/// W(t) = a|t|³ - 5a|t|² + 8a|t| - 4a     for 1 < |t| < 2
/// W(t) = 0                               otherwise
/// ```
fn cubic_weight(t: f64) -> f64 {
    const A: f64 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 raster holding 1..=9 row by row.
    fn digits() -> Raster<u16> {
        Raster::new(3, 3, (1..=9).collect())
    }

    fn gradient(width: u32, height: u32) -> Raster<u16> {
        let mut data = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(((x + y) * 8 + 1) as u16);
            }
        }
        Raster::new(width, height, data)
    }

    #[test]
    fn test_no_rotation_is_exact_copy() {
        let img = gradient(10, 7);
        assert_eq!(rotate(&img, 0.0, Interpolation::Bicubic, 0), img);
        assert_eq!(rotate(&img, 360.0, Interpolation::Bicubic, 0), img);
    }

    #[test]
    fn test_90_degrees_is_clockwise() {
        // [[1,2,3],[4,5,6],[7,8,9]] rotated clockwise is
        // [[7,4,1],[8,5,2],[9,6,3]]
        for interpolation in [
            Interpolation::Nearest,
            Interpolation::Bilinear,
            Interpolation::Bicubic,
        ] {
            let result = rotate(&digits(), 90.0, interpolation, 0);
            assert_eq!(
                result.data,
                vec![7, 4, 1, 8, 5, 2, 9, 6, 3],
                "{interpolation:?}"
            );
        }
    }

    #[test]
    fn test_rotate_back_restores_quarter_turn() {
        let img = digits();
        let there = rotate(&img, 90.0, Interpolation::Bicubic, 0);
        let back = rotate(&there, -90.0, Interpolation::Bicubic, 0);
        assert_eq!(back, img);
    }

    #[test]
    fn test_180_degrees() {
        let result = rotate(&digits(), 180.0, Interpolation::Bilinear, 0);
        assert_eq!(result.data, vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_same_size_rotation_fills_corners() {
        let img = Raster::filled(20, 20, 100u16);
        let result = rotate(&img, 45.0, Interpolation::Bicubic, 0);
        assert_eq!(result.dimensions(), (20, 20));
        assert_eq!(result.get(0, 0), 0);
        assert_eq!(result.get(19, 19), 0);
        assert_eq!(result.get(10, 10), 100);
    }

    #[test]
    fn test_rotate_extend_expands_canvas() {
        let img = Raster::filled(100, 100, 7u16);
        let result = rotate_extend(&img, 45.0, Interpolation::Bilinear, 0);
        assert_eq!(result.dimensions(), (141, 141));
        // Corners are background, center is content
        assert_eq!(result.get(0, 0), 0);
        assert_eq!(result.get(70, 70), 7);
    }

    #[test]
    fn test_rotate_extend_quarter_turn_keeps_content() {
        let img = gradient(8, 4);
        let result = rotate_extend(&img, 90.0, Interpolation::Bicubic, 0);
        // Canvas is raised to cover both orientations
        assert_eq!(result.dimensions(), (8, 8));
        let nonzero = result.data.iter().filter(|&&v| v != 0).count();
        assert_eq!(nonzero, 32);
    }

    #[test]
    fn test_constant_raster_stays_constant_inside() {
        let img = Raster::filled(30, 30, 500u16);
        let result = rotate(&img, 17.0, Interpolation::Bicubic, 0);
        // Edge-clamped kernels reproduce constants exactly
        for y in 10..20 {
            for x in 10..20 {
                assert_eq!(result.get(x, y), 500);
            }
        }
    }

    #[test]
    fn test_float_rotation_background() {
        let img = Raster::filled(10, 10, -3.5f32);
        let result = rotate(&img, 45.0, Interpolation::Bicubic, 0.0);
        assert_eq!(result.get(0, 0), 0.0);
        assert!((result.get(5, 5) + 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_cubic_weight_partition_of_unity() {
        for i in 0..=10 {
            let f = i as f64 / 10.0;
            let sum: f64 = (-1..=2).map(|k| cubic_weight(f - k as f64)).sum();
            assert!((sum - 1.0).abs() < 1e-12, "sum at {f} was {sum}");
        }
    }

    #[test]
    fn test_cubic_weight_interpolates() {
        assert_eq!(cubic_weight(0.0), 1.0);
        assert!(cubic_weight(1.0).abs() < 1e-12);
        assert!(cubic_weight(2.0).abs() < 1e-12);
        assert_eq!(cubic_weight(2.5), 0.0);
    }

    #[test]
    fn test_small_image_rotation() {
        let img = gradient(1, 1);
        let result = rotate_extend(&img, 30.0, Interpolation::Bicubic, 0);
        assert_eq!(result.dimensions(), (1, 1));
        assert_eq!(result.get(0, 0), img.get(0, 0));
    }
}
