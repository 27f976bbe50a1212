//! Reconstruction parameters.
//!
//! [`ReconstructionParams`] is the single configuration value of the engine.
//! It serializes with camelCase field names and fills missing fields from
//! [`Default`], so partial JSON from the JavaScript side is accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::Interpolation;

/// Offset added to every real pixel before rotation.
///
/// Shifting reserves the value 0 for background introduced by the canvas
/// extension, which is what the row range detection keys on.
pub const SHIFT: u16 = 1;

/// How the per-row decay-weighted sums are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegrationMode {
    /// Sum every term against the precomputed decay table, O(span²) per row.
    #[default]
    Direct,
    /// Single-pass recurrence `s[c] = v[c] + e^(-d) * s[c∓1]`, O(span) per row.
    Recursive,
}

/// Errors from [`ReconstructionParams::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("Decay must be a positive finite number, got {0}")]
    InvalidDecay(f64),

    #[error("Angle must be a finite number of degrees, got {0}")]
    InvalidAngle(f64),
}

/// Parameters of a Kam/LID reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReconstructionParams {
    /// Exponential decay coefficient per pixel of distance (> 0).
    pub decay: f64,
    /// Shear angle in degrees, anti-clockwise-positive.
    pub angle: f64,
    /// Interpolation for the forward and backward rotations.
    pub interpolation: Interpolation,
    /// Evaluation strategy for the row sums.
    pub integration: IntegrationMode,
}

impl Default for ReconstructionParams {
    fn default() -> Self {
        Self {
            decay: 0.04,
            angle: 45.0,
            interpolation: Interpolation::default(),
            integration: IntegrationMode::default(),
        }
    }
}

impl ReconstructionParams {
    /// Parameters with the given decay and angle, defaults elsewhere.
    pub fn new(decay: f64, angle: f64) -> Self {
        Self {
            decay,
            angle,
            ..Self::default()
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_integration(mut self, integration: IntegrationMode) -> Self {
        self.integration = integration;
        self
    }

    /// Check that decay is positive and both values are finite.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.decay.is_finite() || self.decay <= 0.0 {
            return Err(ParamsError::InvalidDecay(self.decay));
        }
        if !self.angle.is_finite() {
            return Err(ParamsError::InvalidAngle(self.angle));
        }
        Ok(())
    }
}
