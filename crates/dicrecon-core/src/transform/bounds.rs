//! Bounding box of a rotated rectangle.

/// Compute the canvas size that holds a `width` x `height` rectangle after
/// rotation by `angle_degrees`, without clipping.
///
/// The rectangle is centered at the origin and its four corners are rotated
/// by `-angle_degrees`: reconstruction angles are anti-clockwise-positive
/// while the rotation primitive in [`super::rotate`] is clockwise-positive.
///
/// # Returns
///
/// `(max(x) - min(x), max(y) - min(y))` rounded to the nearest integer.
///
/// # Example
///
/// ```
/// use dicrecon_core::transform::compute_rotated_bounds;
///
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
/// assert_eq!(compute_rotated_bounds(100, 50, 0.0), (100, 50));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    // Whole turns leave the rectangle untouched
    if (angle_degrees % 360.0).abs() < f64::EPSILON {
        return (width, height);
    }

    let theta = -angle_degrees.to_radians();
    let (sin, cos) = theta.sin_cos();

    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;
    let corners = [
        (-half_w, -half_h),
        (half_w, -half_h),
        (half_w, half_h),
        (-half_w, half_h),
    ];

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (x, y) in corners {
        let rx = x * cos - y * sin;
        let ry = x * sin + y * cos;
        min_x = min_x.min(rx);
        max_x = max_x.max(rx);
        min_y = min_y.min(ry);
        max_y = max_y.max(ry);
    }

    (
        (max_x - min_x).round() as u32,
        (max_y - min_y).round() as u32,
    )
}
