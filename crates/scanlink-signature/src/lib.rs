//! Signature capture: a fixed-height drawing surface that turns pointer
//! strokes into a PNG data URL for form submission.

pub mod canvas;
pub mod encode;
pub mod pad;
pub mod replay;

pub use canvas::{Canvas, MAX_CANVAS_DIMENSION};
pub use encode::{encode_rgba_as_png, png_data_url, PNG_DATA_URL_PREFIX};
pub use pad::{PointerInput, SignaturePad, StrokeStyle, DEFAULT_PAD_HEIGHT};
pub use replay::{parse_strokes, replay_strokes, Stroke};

/// Errors from capturing or encoding a signature.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("invalid stroke color: {0}")]
    InvalidColor(String),

    #[error("invalid stroke data: {0}")]
    InvalidStrokes(#[from] serde_json::Error),
}
