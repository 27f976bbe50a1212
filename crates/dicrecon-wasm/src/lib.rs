//! DIC Reconstruction WASM - WebAssembly bindings for dicrecon
//!
//! This crate provides WASM bindings to expose the dicrecon-core
//! reconstruction engine to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for grayscale image data
//! - `params` - Reconstruction parameters (decay, angle, interpolation)
//! - `engine` - The reconstruction engine
//! - `decode` - Decoding PNG/JPEG/TIFF bytes to grayscale
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_grayscale, JsKamEngine, JsReconstructionParams } from '@dicrecon/wasm';
//!
//! await init();
//!
//! const image = decode_grayscale(new Uint8Array(await file.arrayBuffer()));
//! const engine = new JsKamEngine(image, new JsReconstructionParams(0.04, 135));
//! const result = engine.reconstruct();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod engine;
mod params;
mod types;

// Re-export public types
pub use decode::decode_grayscale;
pub use engine::JsKamEngine;
pub use params::JsReconstructionParams;
pub use types::JsGrayImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
