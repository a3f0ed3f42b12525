//! Replaying recorded strokes onto a pad.
//!
//! Stroke files are JSON arrays of strokes, each an array of points in
//! canvas coordinates: `[[{"x":1,"y":2},{"x":30,"y":4}], ...]`.

use scanlink_common::{Point, Rect};
use serde::Deserialize;
use tracing::debug;

use crate::pad::{PointerInput, SignaturePad};
use crate::SignatureError;

/// One pen-down..pen-up gesture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    pub points: Vec<Point>,
}

pub fn parse_strokes(json: &str) -> Result<Vec<Stroke>, SignatureError> {
    Ok(serde_json::from_str(json)?)
}

/// Draw each stroke as a mouse gesture and return the data URL published
/// by the final pointer release.
pub fn replay_strokes(pad: &mut SignaturePad, strokes: &[Stroke]) -> Result<String, SignatureError> {
    let origin = Rect::new(
        0.0,
        0.0,
        pad.canvas().width() as f64,
        pad.canvas().height() as f64,
    );

    for stroke in strokes {
        let Some((first, rest)) = stroke.points.split_first() else {
            continue;
        };
        pad.pointer_down(&mouse_at(*first), origin);
        for point in rest {
            pad.pointer_move(&mouse_at(*point), origin);
        }
        pad.pointer_up()?;
    }

    debug!(strokes = strokes.len(), "Replayed signature strokes");
    if strokes.iter().all(|s| s.points.is_empty()) {
        pad.pointer_up()?;
    }
    Ok(pad.value().to_string())
}

fn mouse_at(point: Point) -> PointerInput {
    PointerInput::Mouse { client: point }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::PNG_DATA_URL_PREFIX;
    use crate::pad::StrokeStyle;
    use scanlink_common::Color;

    #[test]
    fn parses_nested_point_arrays() {
        let strokes = parse_strokes(r#"[[{"x":1,"y":2},{"x":3,"y":4}],[]]"#).unwrap();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].points[1], Point::new(3.0, 4.0));
        assert!(strokes[1].points.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_strokes(r#"[{"x":1}]"#),
            Err(SignatureError::InvalidStrokes(_))
        ));
    }

    #[test]
    fn replay_draws_and_publishes() {
        let mut pad = SignaturePad::new(200.0, 150, StrokeStyle::default());
        let strokes = parse_strokes(r#"[[{"x":10,"y":75},{"x":190,"y":75}]]"#).unwrap();

        let url = replay_strokes(&mut pad, &strokes).unwrap();

        assert!(url.starts_with(PNG_DATA_URL_PREFIX));
        assert_eq!(pad.canvas().pixel(100, 75), Some(Color::BLACK));
    }

    #[test]
    fn replay_of_nothing_publishes_blank_canvas() {
        let mut pad = SignaturePad::new(50.0, 150, StrokeStyle::default());
        let url = replay_strokes(&mut pad, &[]).unwrap();
        assert!(url.starts_with(PNG_DATA_URL_PREFIX));
        assert!(pad.canvas().is_blank());
    }
}
