//! Reconstruction parameter WASM bindings.
//!
//! This module provides JavaScript bindings for the ReconstructionParams
//! type, allowing decay, angle and resampling options to be edited from
//! TypeScript.

use dicrecon_core::{IntegrationMode, Interpolation, ReconstructionParams};
use wasm_bindgen::prelude::*;

/// Reconstruction parameters wrapper for JavaScript
#[wasm_bindgen]
pub struct JsReconstructionParams {
    inner: ReconstructionParams,
}

#[wasm_bindgen]
impl JsReconstructionParams {
    /// Create parameters with the given decay and angle, defaults elsewhere
    #[wasm_bindgen(constructor)]
    pub fn new(decay: f64, angle: f64) -> Self {
        Self {
            inner: ReconstructionParams::new(decay, angle),
        }
    }

    /// Get decay coefficient
    #[wasm_bindgen(getter)]
    pub fn decay(&self) -> f64 {
        self.inner.decay
    }

    /// Set decay coefficient
    #[wasm_bindgen(setter)]
    pub fn set_decay(&mut self, value: f64) {
        self.inner.decay = value;
    }

    /// Get shear angle in degrees
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f64 {
        self.inner.angle
    }

    /// Set shear angle in degrees
    #[wasm_bindgen(setter)]
    pub fn set_angle(&mut self, value: f64) {
        self.inner.angle = value;
    }

    /// Get interpolation (0 = nearest, 1 = bilinear, 2 = bicubic)
    #[wasm_bindgen(getter)]
    pub fn interpolation(&self) -> u8 {
        match self.inner.interpolation {
            Interpolation::Nearest => 0,
            Interpolation::Bilinear => 1,
            Interpolation::Bicubic => 2,
        }
    }

    /// Set interpolation (0 = nearest, 1 = bilinear, 2 = bicubic)
    #[wasm_bindgen(setter)]
    pub fn set_interpolation(&mut self, value: u8) {
        self.inner.interpolation = interpolation_from_u8(value);
    }

    /// Whether the O(n) recursive integration is used
    #[wasm_bindgen(getter)]
    pub fn recursive(&self) -> bool {
        self.inner.integration == IntegrationMode::Recursive
    }

    /// Switch between direct and recursive integration
    #[wasm_bindgen(setter)]
    pub fn set_recursive(&mut self, value: bool) {
        self.inner.integration = if value {
            IntegrationMode::Recursive
        } else {
            IntegrationMode::Direct
        };
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from JSON, filling missing fields with defaults
    pub fn from_json(value: JsValue) -> Result<JsReconstructionParams, JsValue> {
        let inner: ReconstructionParams =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for JsReconstructionParams {
    fn default() -> Self {
        Self {
            inner: ReconstructionParams::default(),
        }
    }
}

impl JsReconstructionParams {
    /// Get a reference to the inner parameters for the engine bindings
    pub(crate) fn inner(&self) -> &ReconstructionParams {
        &self.inner
    }
}

/// Convert a u8 interpolation value to the core enum.
///
/// Values:
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = Bicubic
///
/// Any other value defaults to Bicubic.
pub(crate) fn interpolation_from_u8(value: u8) -> Interpolation {
    match value {
        0 => Interpolation::Nearest,
        1 => Interpolation::Bilinear,
        _ => Interpolation::Bicubic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_params() {
        let params = JsReconstructionParams::new(0.04, 135.0);
        assert_eq!(params.decay(), 0.04);
        assert_eq!(params.angle(), 135.0);
        assert_eq!(params.interpolation(), 2);
        assert!(!params.recursive());
    }

    #[test]
    fn test_setters() {
        let mut params = JsReconstructionParams::default();
        params.set_decay(0.5);
        params.set_angle(-30.0);
        params.set_interpolation(1);
        params.set_recursive(true);

        let inner = params.inner();
        assert_eq!(inner.decay, 0.5);
        assert_eq!(inner.angle, -30.0);
        assert_eq!(inner.interpolation, Interpolation::Bilinear);
        assert_eq!(inner.integration, IntegrationMode::Recursive);
    }

    #[test]
    fn test_interpolation_from_u8() {
        assert_eq!(interpolation_from_u8(0), Interpolation::Nearest);
        assert_eq!(interpolation_from_u8(1), Interpolation::Bilinear);
        assert_eq!(interpolation_from_u8(2), Interpolation::Bicubic);
        // Unknown values default to Bicubic
        assert_eq!(interpolation_from_u8(200), Interpolation::Bicubic);
    }
}
