//! Preparation: shift, rotate and tabulate the working buffer.
//!
//! [`prepare`] turns a source image and parameters into a [`PreparedState`],
//! the immutable input of the integration step.

use tracing::{debug, instrument, warn};

use crate::config::{ReconstructionParams, SHIFT};
use crate::decay::DecayTable;
use crate::edges::{detect_row_ranges, RangeTable};
use crate::error::ReconstructionError;
use crate::raster::{Raster, SourceImage};
use crate::transform::{rotate_extend, Interpolation};

/// Highest pixel value that can still be shifted without reaching the top of
/// the 16-bit working range.
pub const SATURATION_LIMIT: u16 = u16::MAX - SHIFT;

/// 16-bit working copy of the source.
///
/// Goes through two states: as copied from the source, then shifted by
/// [`SHIFT`] and rotated onto an extended canvas. The `rotated` flag records
/// the transition so it is never applied twice.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingBuffer {
    raster: Raster<u16>,
    mean: f64,
    rotated: bool,
}

impl WorkingBuffer {
    /// Unshifted, unrotated copy of `source`.
    pub fn from_source(source: &SourceImage) -> Self {
        Self {
            raster: source.to_working(),
            mean: 0.0,
            rotated: false,
        }
    }

    /// Shift every pixel by [`SHIFT`], record the mean of the shifted
    /// buffer, then rotate by `angle` onto an extended canvas with 0
    /// background.
    ///
    /// No-op once the buffer has been rotated.
    pub fn shift_and_rotate(&mut self, angle: f64, interpolation: Interpolation) {
        if self.rotated {
            return;
        }
        self.raster.add_scalar(SHIFT);
        self.mean = self.raster.stats().mean;
        self.raster = rotate_extend(&self.raster, angle, interpolation, 0);
        self.rotated = true;
    }

    pub fn raster(&self) -> &Raster<u16> {
        &self.raster
    }

    /// Mean of the shifted, unrotated buffer (0 before shifting).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn is_rotated(&self) -> bool {
        self.rotated
    }
}

/// Everything the integration step needs, computed once per image and
/// parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedState {
    working: WorkingBuffer,
    ranges: RangeTable,
    decay: DecayTable,
    original_size: (u32, u32),
    params: ReconstructionParams,
}

impl PreparedState {
    /// Rotated, shifted working buffer.
    pub fn buffer(&self) -> &Raster<u16> {
        self.working.raster()
    }

    pub fn working(&self) -> &WorkingBuffer {
        &self.working
    }

    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    pub fn decay(&self) -> &DecayTable {
        &self.decay
    }

    /// Global mean of the shifted source.
    pub fn mean(&self) -> f64 {
        self.working.mean()
    }

    pub fn is_rotated(&self) -> bool {
        self.working.is_rotated()
    }

    /// Source dimensions before canvas extension.
    pub fn original_size(&self) -> (u32, u32) {
        self.original_size
    }

    pub fn params(&self) -> &ReconstructionParams {
        &self.params
    }
}

/// Build the working state for `source` under `params`.
///
/// # Errors
///
/// [`ReconstructionError::SaturationRisk`] when the brightest source pixel
/// exceeds [`SATURATION_LIMIT`]. Checked before any shifting.
#[instrument(skip_all, fields(width = source.width(), height = source.height(), angle = params.angle, decay = params.decay))]
pub fn prepare(
    source: &SourceImage,
    params: &ReconstructionParams,
) -> Result<PreparedState, ReconstructionError> {
    let mut working = WorkingBuffer::from_source(source);

    let stats = working.raster().stats();
    if stats.max > f64::from(SATURATION_LIMIT) {
        let max = stats.max as u16;
        warn!(max, limit = SATURATION_LIMIT, "Source leaves no headroom for background shift");
        return Err(ReconstructionError::SaturationRisk {
            max,
            limit: SATURATION_LIMIT,
        });
    }

    working.shift_and_rotate(params.angle, params.interpolation);

    let buffer = working.raster();
    let ranges = detect_row_ranges(buffer);
    let decay = DecayTable::build(params.decay, buffer.width as usize);

    debug!(
        canvas_width = buffer.width,
        canvas_height = buffer.height,
        mean = working.mean(),
        degenerate_rows = ranges.degenerate_count(),
        max_span = ranges.max_span(),
        "Working buffer prepared"
    );

    Ok(PreparedState {
        working,
        ranges,
        decay,
        original_size: source.dimensions(),
        params: *params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::BitDepth;

    fn source(width: u32, height: u32, value: u16) -> SourceImage {
        SourceImage::new(
            width,
            height,
            BitDepth::Sixteen,
            vec![value; (width * height) as usize],
        )
        .unwrap()
    }

    #[test]
    fn test_prepare_unrotated() {
        let src = source(6, 4, 10);
        let state = prepare(&src, &ReconstructionParams::new(0.1, 0.0)).unwrap();

        assert!(state.is_rotated());
        assert_eq!(state.buffer().dimensions(), (6, 4));
        assert!(state.buffer().data.iter().all(|&p| p == 11));
        assert_eq!(state.mean(), 11.0);
        assert_eq!(state.decay().len(), 6);
        assert_eq!(state.ranges().degenerate_count(), 0);
        assert_eq!(state.original_size(), (6, 4));
    }

    #[test]
    fn test_zero_pixels_stay_foreground() {
        // A black source must not be mistaken for background after shifting
        let src = source(5, 5, 0);
        let state = prepare(&src, &ReconstructionParams::new(0.1, 0.0)).unwrap();
        assert!(state
            .ranges()
            .iter()
            .all(|r| r.first == 0 && r.last == 4));
    }

    #[test]
    fn test_prepare_rotated_extends_canvas() {
        let src = source(20, 20, 100);
        let state = prepare(&src, &ReconstructionParams::new(0.1, 45.0)).unwrap();

        assert_eq!(state.buffer().dimensions(), (28, 28));
        assert_eq!(state.decay().len(), 28);
        assert_eq!(state.ranges().len(), 28);
        // Top-left corner of the canvas is background
        assert_eq!(state.buffer().get(0, 0), 0);
        assert!(state.ranges().get(14).unwrap().span() > 20);
        // Mean is taken before rotation
        assert_eq!(state.mean(), 101.0);
    }

    #[test]
    fn test_saturation_limit() {
        let mut pixels = vec![1000u16; 16];
        pixels[5] = u16::MAX;
        let src = SourceImage::new(4, 4, BitDepth::Sixteen, pixels).unwrap();

        let err = prepare(&src, &ReconstructionParams::default()).unwrap_err();
        assert_eq!(
            err,
            ReconstructionError::SaturationRisk {
                max: 65535,
                limit: 65534
            }
        );
    }

    #[test]
    fn test_headroom_at_limit_is_accepted() {
        let src = source(4, 4, SATURATION_LIMIT);
        let state = prepare(&src, &ReconstructionParams::new(0.1, 0.0)).unwrap();
        assert!(state.buffer().data.iter().all(|&p| p == u16::MAX));
    }

    #[test]
    fn test_eight_bit_full_scale_has_headroom() {
        let src = SourceImage::new(2, 2, BitDepth::Eight, vec![255; 4]).unwrap();
        assert!(prepare(&src, &ReconstructionParams::new(0.1, 10.0)).is_ok());
    }

    #[test]
    fn test_shift_and_rotate_is_applied_once() {
        let src = source(9, 7, 50);
        let mut working = WorkingBuffer::from_source(&src);
        assert!(!working.is_rotated());

        working.shift_and_rotate(30.0, Interpolation::Bicubic);
        let first = working.clone();
        assert!(first.is_rotated());

        working.shift_and_rotate(30.0, Interpolation::Bicubic);
        assert_eq!(working, first);
    }
}
