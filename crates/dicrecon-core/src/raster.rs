//! Grayscale raster types shared by the reconstruction pipeline.
//!
//! - [`SourceImage`] is the caller's decoded micrograph (8- or 16-bit).
//! - [`Raster`] is the single-channel working representation. The engine uses
//!   `Raster<u16>` for the shifted/rotated working copy and `Raster<f32>` for
//!   the integrated output.
//!
//! Pixels are stored row-major with no padding between rows.

use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::RasterStats;

/// 16-bit grayscale buffer as produced by the `image` crate.
pub type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Errors raised while building a [`SourceImage`] at the crate boundary.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The pixel buffer does not hold `width * height` samples.
    #[error("Pixel buffer size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A pixel value does not fit in the declared bit depth.
    #[error("Pixel value {value} exceeds the {bits}-bit range")]
    ValueOutOfRange { value: u16, bits: u8 },

    /// Unsupported bit depth requested.
    #[error("Unsupported bit depth: {0}")]
    UnsupportedDepth(u8),

    /// The encoded bytes could not be decoded.
    #[error("Invalid or unsupported image: {0}")]
    Decode(String),
}

/// Pixel depth of a source raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8 bits per pixel, values in 0..=255.
    Eight,
    /// 16 bits per pixel, values in 0..=65535.
    #[default]
    Sixteen,
}

impl BitDepth {
    /// Number of bits per pixel.
    pub fn bits(self) -> u8 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
        }
    }

    /// Largest representable pixel value, `2^bits - 1`.
    pub fn max_value(self) -> u16 {
        match self {
            BitDepth::Eight => u16::from(u8::MAX),
            BitDepth::Sixteen => u16::MAX,
        }
    }

    /// Parse a bit count (8 or 16).
    pub fn from_bits(bits: u8) -> Result<Self, RasterError> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            other => Err(RasterError::UnsupportedDepth(other)),
        }
    }
}

/// A scalar pixel type that can be resampled in `f64`.
pub trait Sample: Copy + Default + PartialEq + std::fmt::Debug {
    fn to_f64(self) -> f64;

    /// Convert back from an interpolated value, clamping to the type's range.
    fn from_f64(value: f64) -> Self;
}

impl Sample for u16 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, f64::from(u16::MAX)) as u16
    }
}

impl Sample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

/// Single-channel raster in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Samples, `width * height` long.
    pub data: Vec<T>,
}

impl<T: Sample> Raster<T> {
    /// Wrap an existing sample buffer.
    pub fn new(width: u32, height: u32, data: Vec<T>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize,
            "Raster buffer size mismatch"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Allocate a raster with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Sample at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> T {
        self.data[self.index(x, y)]
    }

    /// Overwrite the sample at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn put(&mut self, x: u32, y: u32, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Borrow row `y`.
    pub fn row(&self, y: u32) -> &[T] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Mutably borrow row `y`.
    pub fn row_mut(&mut self, y: u32) -> &mut [T] {
        let start = self.index(0, y);
        let width = self.width as usize;
        &mut self.data[start..start + width]
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Min, max and mean over every sample.
    pub fn stats(&self) -> RasterStats {
        RasterStats::compute(&self.data)
    }

    /// Check if this raster has no samples.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }
}

impl Raster<u16> {
    /// Add `value` to every sample, saturating at `u16::MAX`.
    pub fn add_scalar(&mut self, value: u16) {
        for sample in &mut self.data {
            *sample = sample.saturating_add(value);
        }
    }
}

/// A decoded grayscale micrograph handed to the engine.
///
/// Samples are held as `u16` regardless of depth; the declared [`BitDepth`]
/// bounds the values.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    depth: BitDepth,
    pixels: Vec<u16>,
}

impl SourceImage {
    /// Build a source image, validating buffer length and value range.
    pub fn new(
        width: u32,
        height: u32,
        depth: BitDepth,
        pixels: Vec<u16>,
    ) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(RasterError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        if let Some(&value) = pixels.iter().find(|&&p| p > depth.max_value()) {
            return Err(RasterError::ValueOutOfRange {
                value,
                bits: depth.bits(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            pixels,
        })
    }

    /// Convert any decoded image to grayscale.
    ///
    /// 8-bit colour types become 8-bit luma; everything else (16-bit and
    /// float) becomes 16-bit luma.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_) => Self::from(image.to_luma8()),
            _ => Self::from(image.to_luma16()),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Samples in row-major order.
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Brightest sample, 0 for an empty image.
    pub fn max_value(&self) -> u16 {
        self.pixels.iter().copied().max().unwrap_or(0)
    }

    /// 16-bit working copy. Values are carried over unscaled.
    pub fn to_working(&self) -> Raster<u16> {
        Raster::new(self.width, self.height, self.pixels.clone())
    }
}

impl From<GrayImage> for SourceImage {
    fn from(image: GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            depth: BitDepth::Eight,
            pixels: image.into_raw().into_iter().map(u16::from).collect(),
        }
    }
}

impl From<Gray16Image> for SourceImage {
    fn from(image: Gray16Image) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            depth: BitDepth::Sixteen,
            pixels: image.into_raw(),
        }
    }
}

/// Decode PNG, JPEG or TIFF bytes into a grayscale source image.
pub fn decode_grayscale(bytes: &[u8]) -> Result<SourceImage, RasterError> {
    let image = image::load_from_memory(bytes).map_err(|e| RasterError::Decode(e.to_string()))?;
    Ok(SourceImage::from_dynamic(&image))
}
