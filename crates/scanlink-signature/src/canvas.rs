//! RGBA raster with round-capped line segments.

use scanlink_common::{Color, Point};

/// Largest width or height a canvas will take; larger requests are clamped.
pub const MAX_CANVAS_DIMENSION: u32 = 16_384;

/// Straight-alpha RGBA8 pixel buffer, row-major, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// New fully transparent canvas. Each side is clamped to
    /// [`MAX_CANVAS_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.min(MAX_CANVAS_DIMENSION);
        let height = height.min(MAX_CANVAS_DIMENSION);
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        let px = &self.pixels[i..i + 4];
        Some(Color::from_rgba(px[0], px[1], px[2], px[3]))
    }

    /// Stroke a segment `from -> to` with round caps.
    ///
    /// A pixel is painted when its center lies within `line_width / 2`
    /// of the segment. Painting is opaque replacement, not blending.
    pub fn stroke_segment(&mut self, from: Point, to: Point, line_width: f64, color: Color) {
        let radius = (line_width / 2.0).max(0.0);
        if radius == 0.0 || self.width == 0 || self.height == 0 {
            return;
        }

        let min_x = (from.x.min(to.x) - radius).floor().max(0.0);
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0);
        let max_x = (from.x.max(to.x) + radius).ceil().min(self.width as f64 - 1.0);
        let max_y = (from.y.max(to.y) + radius).ceil().min(self.height as f64 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let radius_sq = radius * radius;
        for y in min_y as u32..=max_y as u32 {
            for x in min_x as u32..=max_x as u32 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if distance_sq_to_segment(center, from, to) <= radius_sq {
                    let i = self.index(x, y);
                    self.pixels[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
                }
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    (p.x - cx).powi(2) + (p.y - cy).powi(2)
}
