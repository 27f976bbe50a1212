//! Reconstruction engine WASM bindings.
//!
//! Wraps the core `KamEngine` so a worker can keep one engine per open image
//! and re-run the reconstruction while the user adjusts decay and angle.

use crate::params::JsReconstructionParams;
use crate::types::JsGrayImage;
use dicrecon_core::{KamEngine, ReconstructionError, ReconstructionParams};
use wasm_bindgen::prelude::*;

/// Log an engine failure to the browser console and convert it for JS.
fn engine_error(err: ReconstructionError) -> JsValue {
    let value = JsValue::from_str(&err.to_string());
    web_sys::console::warn_1(&value);
    value
}

/// Validate parameters before they reach the engine.
fn checked(params: &JsReconstructionParams) -> Result<ReconstructionParams, JsValue> {
    let inner = *params.inner();
    inner
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(inner)
}

/// Kam/LID reconstruction engine bound to one image.
#[wasm_bindgen]
pub struct JsKamEngine {
    inner: KamEngine,
}

#[wasm_bindgen]
impl JsKamEngine {
    /// Create an engine for `image` and prepare it for `params`.
    ///
    /// # Errors
    /// Rejects invalid images, invalid parameters, and images whose
    /// brightest pixel leaves no headroom for the background shift.
    ///
    /// # Example (TypeScript)
    /// ```typescript
    /// const engine = new JsKamEngine(image, new JsReconstructionParams(0.04, 135));
    /// const heightMap = engine.reconstruct();
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsGrayImage, params: &JsReconstructionParams) -> Result<JsKamEngine, JsValue> {
        let source = image
            .to_source()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let inner = KamEngine::new(source, checked(params)?).map_err(engine_error)?;
        Ok(JsKamEngine { inner })
    }

    /// Switch to new parameters (no-op if unchanged).
    pub fn set_params(&mut self, params: &JsReconstructionParams) -> Result<(), JsValue> {
        let params = checked(params)?;
        self.inner.set_params(params).map_err(engine_error)
    }

    /// Replace the image; the next reconstruction prepares it.
    pub fn set_image(&mut self, image: &JsGrayImage) -> Result<(), JsValue> {
        let source = image
            .to_source()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.set_image(source);
        Ok(())
    }

    /// Run the reconstruction and return an 8-bit image of the source size.
    pub fn reconstruct(&mut self) -> Result<JsGrayImage, JsValue> {
        let output = self.inner.reconstruct().map_err(engine_error)?;
        Ok(JsGrayImage::from_gray8(output))
    }

    /// Current decay coefficient
    #[wasm_bindgen(getter)]
    pub fn decay(&self) -> f64 {
        self.inner.params().decay
    }

    /// Current shear angle in degrees
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f64 {
        self.inner.params().angle
    }
}
