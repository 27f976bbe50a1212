//! Kam/LID reconstruction engine.
//!
//! # Pipeline
//!
//! 1. Copy the source into a 16-bit working buffer
//! 2. Refuse sources without headroom for the shift
//! 3. Shift every pixel by [`SHIFT`](crate::config::SHIFT), take the mean
//! 4. Rotate by the shear angle onto an extended canvas (background 0)
//! 5. Find each row's valid span and tabulate the decay weights
//! 6. Integrate every row (decay-weighted up-sum minus down-sum)
//! 7. Rotate back, center-crop, quantize to 8 bits
//!
//! Steps 1 to 5 are [`prepare`] and produce a [`PreparedState`]; step 6 is
//! [`integrate`]; step 7 is [`crate::postprocess::finish`]. [`KamEngine`]
//! caches the prepared state between calls and invalidates it whenever the
//! image or the parameters change.

mod integrate;
mod prepare;

pub use integrate::integrate;
pub use prepare::{prepare, PreparedState, WorkingBuffer, SATURATION_LIMIT};

use image::{DynamicImage, GrayImage};
use tracing::{debug, instrument};

use crate::config::ReconstructionParams;
use crate::error::ReconstructionError;
use crate::postprocess;
use crate::raster::SourceImage;

/// Stateful reconstruction engine bound to one source image.
///
/// Every mutating call takes `&mut self`; share an engine across threads by
/// moving it, not by locking it.
///
/// # Example
///
/// ```ignore
/// use dicrecon_core::{KamEngine, ReconstructionParams};
///
/// let mut engine = KamEngine::from_gray_image(&micrograph, ReconstructionParams::new(0.04, 135.0))?;
/// let height_map = engine.reconstruct()?;
/// ```
#[derive(Debug, Clone)]
pub struct KamEngine {
    source: SourceImage,
    params: ReconstructionParams,
    prepared: Option<PreparedState>,
}

impl KamEngine {
    /// Bind `source` and prepare it for `params`.
    ///
    /// # Errors
    ///
    /// [`ReconstructionError::SaturationRisk`] if the source has no headroom
    /// for the background shift.
    pub fn new(
        source: SourceImage,
        params: ReconstructionParams,
    ) -> Result<Self, ReconstructionError> {
        let prepared = prepare(&source, &params)?;
        Ok(Self {
            source,
            params,
            prepared: Some(prepared),
        })
    }

    /// Build an engine from an 8-bit `image` buffer.
    pub fn from_gray_image(
        image: &GrayImage,
        params: ReconstructionParams,
    ) -> Result<Self, ReconstructionError> {
        Self::new(SourceImage::from(image.clone()), params)
    }

    /// Build an engine from any decoded image, converted to grayscale.
    pub fn from_dynamic(
        image: &DynamicImage,
        params: ReconstructionParams,
    ) -> Result<Self, ReconstructionError> {
        Self::new(SourceImage::from_dynamic(image), params)
    }

    /// Switch to new parameters and prepare for them.
    ///
    /// Unchanged parameters keep the cached state. On error the engine keeps
    /// its previous parameters and state.
    pub fn set_params(&mut self, params: ReconstructionParams) -> Result<(), ReconstructionError> {
        if self.prepared.is_some() && params == self.params {
            return Ok(());
        }
        let prepared = prepare(&self.source, &params)?;
        self.params = params;
        self.prepared = Some(prepared);
        Ok(())
    }

    /// Replace the source image and drop all cached state.
    ///
    /// The next [`reconstruct`](Self::reconstruct) prepares the new image.
    pub fn set_image(&mut self, source: SourceImage) {
        self.source = source;
        self.prepared = None;
    }

    /// Run the integration and return an 8-bit image the size of the source.
    ///
    /// # Errors
    ///
    /// [`ReconstructionError::SaturationRisk`] if the state had to be
    /// prepared again (after [`set_image`](Self::set_image)) and the new
    /// source has no headroom.
    #[instrument(skip_all, fields(angle = self.params.angle, decay = self.params.decay))]
    pub fn reconstruct(&mut self) -> Result<GrayImage, ReconstructionError> {
        let state = match self.prepared.take() {
            Some(state) => state,
            None => prepare(&self.source, &self.params)?,
        };
        let state = self.prepared.insert(state);

        let output = integrate(state);
        let params = state.params();
        let result = postprocess::finish(
            &output,
            params.angle,
            params.interpolation,
            state.original_size(),
        );

        debug!(
            width = result.width(),
            height = result.height(),
            "Reconstruction finished"
        );
        Ok(result)
    }

    pub fn params(&self) -> &ReconstructionParams {
        &self.params
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Cached state, `None` after [`set_image`](Self::set_image) until the
    /// next reconstruction.
    pub fn prepared(&self) -> Option<&PreparedState> {
        self.prepared.as_ref()
    }
}
