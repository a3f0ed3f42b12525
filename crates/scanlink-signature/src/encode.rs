//! PNG and data-URL encoding of canvas pixels.

use std::io::Cursor;

use base64::Engine as _;

use crate::SignatureError;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Data URL produced for a canvas with no area, as browsers do.
const EMPTY_DATA_URL: &str = "data:,";

/// Encode straight-alpha RGBA8 pixels as a PNG file.
pub fn encode_rgba_as_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| SignatureError::Encode(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| SignatureError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode pixels as `data:image/png;base64,...`.
pub fn png_data_url(width: u32, height: u32, rgba: &[u8]) -> Result<String, SignatureError> {
    if width == 0 || height == 0 {
        return Ok(EMPTY_DATA_URL.to_string());
    }
    let png_bytes = encode_rgba_as_png(width, height, rgba)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&png_bytes);
    Ok(format!("{PNG_DATA_URL_PREFIX}{b64}"))
}
