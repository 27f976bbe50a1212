//! Image decoding WASM bindings.

use crate::types::JsGrayImage;
use dicrecon_core::decode_grayscale as core_decode;
use wasm_bindgen::prelude::*;

/// Decode PNG, JPEG or TIFF bytes into a grayscale image.
///
/// 8-bit sources stay 8-bit; 16-bit and colour sources with more than 8 bits
/// per channel become 16-bit luma.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_grayscale(bytes);
/// console.log(`${image.width}x${image.height}, ${image.bit_depth}-bit`);
/// ```
#[wasm_bindgen]
pub fn decode_grayscale(bytes: &[u8]) -> Result<JsGrayImage, JsValue> {
    core_decode(bytes)
        .map(|source| JsGrayImage::from_source(&source))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageFormat, Luma};
    use std::io::Cursor;

    #[test]
    fn test_decode_png() {
        let img = GrayImage::from_fn(5, 4, |x, y| Luma([(x * 40 + y) as u8]));
        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let decoded = decode_grayscale(&bytes).unwrap();
        assert_eq!(decoded.width(), 5);
        assert_eq!(decoded.height(), 4);
        assert_eq!(decoded.bit_depth(), 8);
        assert_eq!(decoded.pixels()[2], 80);
    }
}
