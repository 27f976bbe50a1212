//! WASM-compatible wrapper types for grayscale image data.
//!
//! This module provides JavaScript-friendly types that wrap the core raster
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use dicrecon_core::raster::{BitDepth, RasterError, SourceImage};
use image::GrayImage;
use wasm_bindgen::prelude::*;

/// A grayscale image wrapper for JavaScript.
///
/// Samples are held as 16-bit values regardless of bit depth, so the same
/// type carries 8-bit results and 16-bit micrographs.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint16Array`.
#[wasm_bindgen]
pub struct JsGrayImage {
    width: u32,
    height: u32,
    bit_depth: u8,
    pixels: Vec<u16>,
}

#[wasm_bindgen]
impl JsGrayImage {
    /// Create a new JsGrayImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `bit_depth` - 8 or 16
    /// * `pixels` - Grayscale samples (row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, bit_depth: u8, pixels: Vec<u16>) -> JsGrayImage {
        JsGrayImage {
            width,
            height,
            bit_depth,
            pixels,
        }
    }

    /// Create a JsGrayImage from a JavaScript `Uint16Array`.
    pub fn from_uint16_array(
        width: u32,
        height: u32,
        bit_depth: u8,
        pixels: &js_sys::Uint16Array,
    ) -> JsGrayImage {
        JsGrayImage::new(width, height, bit_depth, pixels.to_vec())
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the bit depth (8 or 16)
    #[wasm_bindgen(getter)]
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// Returns the samples as Uint16Array.
    pub fn pixels(&self) -> Vec<u16> {
        self.pixels.clone()
    }

    /// Returns the samples as Uint8Array, clamped to 255.
    ///
    /// Intended for 8-bit results, e.g. to fill an `ImageData` buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().map(|&p| p.min(255) as u8).collect()
    }
}

impl JsGrayImage {
    /// Wrap an 8-bit reconstruction result.
    pub(crate) fn from_gray8(image: GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            bit_depth: 8,
            pixels: image.into_raw().into_iter().map(u16::from).collect(),
        }
    }

    /// Wrap a decoded source image.
    pub(crate) fn from_source(source: &SourceImage) -> Self {
        Self {
            width: source.width(),
            height: source.height(),
            bit_depth: source.depth().bits(),
            pixels: source.pixels().to_vec(),
        }
    }

    /// Convert to a validated core SourceImage.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_source(&self) -> Result<SourceImage, RasterError> {
        let depth = BitDepth::from_bits(self.bit_depth)?;
        SourceImage::new(self.width, self.height, depth, self.pixels.clone())
    }
}
