//! DIC Reconstruction Core
//!
//! This crate reconstructs a height-like image from a differential
//! interference contrast (DIC) micrograph using Kam/LID shear integration:
//! the image is rotated so the shear axis runs along the rows, each row is
//! integrated with exponentially decaying weights in both directions, and the
//! result is rotated back and quantized to 8 bits.
//!
//! # Modules
//!
//! - `raster` - Source image and working raster types
//! - `transform` - Bounding boxes, canvas extension, rotation, center crop
//! - `edges` - Per-row valid column detection on the rotated canvas
//! - `decay` - Exponential decay weight table
//! - `engine` - Preparation, integration and the stateful [`KamEngine`]
//! - `postprocess` - Back-rotation, crop and 8-bit quantization

pub mod config;
pub mod decay;
pub mod edges;
pub mod engine;
pub mod error;
pub mod postprocess;
pub mod raster;
pub mod stats;
pub mod transform;

pub use config::{IntegrationMode, ParamsError, ReconstructionParams, SHIFT};
pub use engine::{integrate, prepare, KamEngine, PreparedState, SATURATION_LIMIT};
pub use error::ReconstructionError;
pub use raster::{decode_grayscale, BitDepth, Raster, RasterError, SourceImage};
pub use transform::{compute_rotated_bounds, Interpolation};
