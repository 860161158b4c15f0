use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a shape is drawn outlined or solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Stroke,
    Fill,
}

impl StyleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::Stroke => "stroke",
            StyleKind::Fill => "fill",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rect => "rect",
            ShapeKind::Circle => "circle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceIdError {
    #[error("source id `{0}` has no `_` separator")]
    MissingSeparator(String),
    #[error("unknown style `{0}`")]
    UnknownStyle(String),
    #[error("unknown shape kind `{0}`")]
    UnknownShape(String),
}

/// Decoded `style_shape` source identifier, e.g. `stroke_rect`.
///
/// Identifiers that do not name a known style and shape are rejected
/// outright; nothing is drawn from an id we cannot decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceId {
    pub style: StyleKind,
    pub shape: ShapeKind,
}

impl FromStr for SourceId {
    type Err = SourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (style, shape) = s
            .split_once('_')
            .ok_or_else(|| SourceIdError::MissingSeparator(s.to_owned()))?;

        let style = match style {
            "stroke" => StyleKind::Stroke,
            "fill" => StyleKind::Fill,
            other => return Err(SourceIdError::UnknownStyle(other.to_owned())),
        };
        let shape = match shape {
            "rect" => ShapeKind::Rect,
            "circle" => ShapeKind::Circle,
            other => return Err(SourceIdError::UnknownShape(other.to_owned())),
        };

        Ok(SourceId { style, shape })
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.style, self.shape)
    }
}

/// A shape that has been placed on a drawing surface, as handed to the
/// history sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedShape {
    pub id: Uuid,
    pub style: StyleKind,
    pub shape: ShapeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlacedShape {
    pub fn new(style: StyleKind, shape: ShapeKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            style,
            shape,
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_four_source_ids() {
        let cases = [
            ("stroke_rect", StyleKind::Stroke, ShapeKind::Rect),
            ("fill_rect", StyleKind::Fill, ShapeKind::Rect),
            ("stroke_circle", StyleKind::Stroke, ShapeKind::Circle),
            ("fill_circle", StyleKind::Fill, ShapeKind::Circle),
        ];
        for (raw, style, shape) in cases {
            let id: SourceId = raw.parse().unwrap();
            assert_eq!(id, SourceId { style, shape });
            assert_eq!(id.to_string(), raw);
        }
    }

    #[test]
    fn rejects_id_without_separator() {
        let err = "strokerect".parse::<SourceId>().unwrap_err();
        assert_eq!(err, SourceIdError::MissingSeparator("strokerect".into()));
    }

    #[test]
    fn rejects_unknown_style() {
        let err = "blur_rect".parse::<SourceId>().unwrap_err();
        assert_eq!(err, SourceIdError::UnknownStyle("blur".into()));
    }

    #[test]
    fn rejects_unknown_shape_kind() {
        let err = "stroke_triangle".parse::<SourceId>().unwrap_err();
        assert_eq!(err, SourceIdError::UnknownShape("triangle".into()));
    }

    #[test]
    fn placed_shapes_get_distinct_ids() {
        let a = PlacedShape::new(StyleKind::Stroke, ShapeKind::Rect, 0.0, 0.0, 10.0, 10.0);
        let b = PlacedShape::new(StyleKind::Stroke, ShapeKind::Rect, 0.0, 0.0, 10.0, 10.0);
        assert_ne!(a.id, b.id);
    }
}
