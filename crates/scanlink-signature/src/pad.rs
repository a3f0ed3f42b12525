//! Pointer-driven signature pad.

use scanlink_common::{Color, Point, Rect};
use tracing::debug;

use crate::canvas::{Canvas, MAX_CANVAS_DIMENSION};
use crate::encode::png_data_url;
use crate::SignatureError;

pub const DEFAULT_PAD_HEIGHT: u32 = 150;

/// Pen settings reapplied on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub line_width: f64,
    pub color: Color,
}

impl StrokeStyle {
    pub fn new(line_width: f64, color: Color) -> Self {
        Self { line_width, color }
    }

    /// Build a style from a hex color such as `#000`.
    pub fn from_hex(line_width: f64, color: &str) -> Result<Self, SignatureError> {
        let color =
            Color::from_hex(color).ok_or_else(|| SignatureError::InvalidColor(color.to_string()))?;
        Ok(Self { line_width, color })
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            color: Color::BLACK,
        }
    }
}

/// A pointer event in client (viewport) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse { client: Point },
    /// Active touch points; only the first one draws.
    Touch { touches: Vec<Point> },
}

impl PointerInput {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse {
            client: Point::new(x, y),
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self::Touch {
            touches: vec![Point::new(x, y)],
        }
    }

    fn client_point(&self) -> Option<Point> {
        match self {
            Self::Mouse { client } => Some(*client),
            Self::Touch { touches } => touches.first().copied(),
        }
    }

    /// Position relative to the canvas' on-screen rectangle.
    fn canvas_point(&self, canvas_rect: Rect) -> Option<Point> {
        self.client_point()
            .map(|p| Point::new(p.x - canvas_rect.x, p.y - canvas_rect.y))
    }
}

/// Fixed-height drawing surface whose content is published as a PNG data
/// URL whenever a stroke ends.
///
/// The published value mirrors a hidden form field: empty until the first
/// pointer release, emptied by [`SignaturePad::clear`].
#[derive(Debug, Clone)]
pub struct SignaturePad {
    canvas: Canvas,
    height: u32,
    style: StrokeStyle,
    writing: bool,
    last: Option<Point>,
    value: String,
}

impl SignaturePad {
    pub fn new(parent_width: f64, height: u32, style: StrokeStyle) -> Self {
        let mut pad = Self {
            canvas: Canvas::new(0, 0),
            height: height.min(MAX_CANVAS_DIMENSION),
            style,
            writing: false,
            last: None,
            value: String::new(),
        };
        pad.resize(parent_width);
        pad
    }

    /// Match the parent's width, up to [`MAX_CANVAS_DIMENSION`]. Resizing
    /// wipes the drawing, like a canvas element does; the published value is
    /// kept.
    pub fn resize(&mut self, parent_width: f64) {
        let width = if parent_width.is_finite() && parent_width > 0.0 {
            parent_width.floor().min(MAX_CANVAS_DIMENSION as f64) as u32
        } else {
            0
        };
        self.canvas = Canvas::new(width, self.height);
        self.last = None;
        debug!(width, height = self.height, "Signature pad resized");
    }

    pub fn pointer_down(&mut self, input: &PointerInput, canvas_rect: Rect) {
        let Some(pos) = input.canvas_point(canvas_rect) else {
            return;
        };
        self.writing = true;
        self.last = Some(pos);
    }

    /// Draw to the pointer position while a stroke is in progress.
    pub fn pointer_move(&mut self, input: &PointerInput, canvas_rect: Rect) {
        if !self.writing {
            return;
        }
        let Some(pos) = input.canvas_point(canvas_rect) else {
            return;
        };
        if let Some(from) = self.last {
            self.canvas
                .stroke_segment(from, pos, self.style.line_width, self.style.color);
        }
        self.last = Some(pos);
    }

    /// End the stroke and publish the canvas, blank or not.
    pub fn pointer_up(&mut self) -> Result<&str, SignatureError> {
        self.writing = false;
        self.last = None;
        self.value = self.data_url()?;
        debug!(bytes = self.value.len(), "Signature published");
        Ok(&self.value)
    }

    pub fn clear(&mut self) {
        self.canvas.clear();
        self.writing = false;
        self.last = None;
        self.value.clear();
    }

    pub fn data_url(&self) -> Result<String, SignatureError> {
        png_data_url(self.canvas.width(), self.canvas.height(), self.canvas.rgba())
    }

    /// Last published data URL, empty when nothing was published.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_writing(&self) -> bool {
        self.writing
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}
