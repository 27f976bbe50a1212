//! Geometric raster operations: bounding boxes, canvas extension, rotation
//! and center cropping.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//!   (y axis pointing down)
//! - Rotation is about the raster center
//! - Canvas extension and center crop share the `floor((outer - inner) / 2)`
//!   offset, so they invert each other

mod bounds;
mod canvas;
mod crop;
mod rotation;

pub use bounds::compute_rotated_bounds;
pub use canvas::extend_canvas;
pub use crop::crop_center;
pub use rotation::{rotate, rotate_extend, Interpolation};
