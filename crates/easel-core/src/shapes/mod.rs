//! Shape definitions for the drawing board.

mod line;
mod oval;
mod polygon;
mod rectangle;
mod text;

pub use line::Line;
pub use oval::Oval;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// RGBA8 color that serializes as a hex string (`#rrggbb` / `#rrggbbaa`).
///
/// The persisted board format stores colors as strings, so this type
/// parses both hex notation and the handful of named colors the
/// toolbox offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    fn named(name: &str) -> Option<Self> {
        let c = match name {
            "black" => Color::rgb(0, 0, 0),
            "white" => Color::rgb(255, 255, 255),
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "blue" => Color::rgb(0, 0, 255),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "yellow" => Color::rgb(255, 255, 0),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            _ => return None,
        };
        Some(c)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(c) = Color::named(s) {
            return Ok(c);
        }
        let hex = s.strip_prefix('#').ok_or(ColorParseError)?.trim();
        let channel = |range: &str| u8::from_str_radix(range, 16).map_err(|_| ColorParseError);
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Ok(Color::rgb(r, g, b))
            }
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Ok(Color::rgba(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(ColorParseError),
        }
    }
}

/// Error returned when a color string is not hex notation or a known name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorParseError;

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized color string")
    }
}

impl std::error::Error for ColorParseError {}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Style properties shared by all shapes.
///
/// `stroke` carries the drawing color for lines and text; rectangles,
/// ovals and polygons use `fill` for the interior and `stroke` for the
/// outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke/outline color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill: Option<Color>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: Color::BLACK,
            stroke_width: 5.0,
            fill: None,
        }
    }
}

/// The closed set of shape kinds on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Oval,
    Polygon,
    Text,
}

impl ShapeKind {
    /// The kind name used in the persisted file format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Oval => "oval",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Text => "text",
        }
    }

    /// Parse a file-format kind name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "line" => Some(ShapeKind::Line),
            "rectangle" => Some(ShapeKind::Rectangle),
            "oval" => Some(ShapeKind::Oval),
            "polygon" => Some(ShapeKind::Polygon),
            "text" => Some(ShapeKind::Text),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in board coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in board coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Translate the shape by a delta.
    fn translate(&mut self, delta: Vec2);
}

/// Distance from a point to a line segment (a->b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Enum wrapper for all shape types (for the store and serialization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Oval(Oval),
    Polygon(Polygon),
    Text(Text),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Oval(s) => s.id(),
            Shape::Polygon(s) => s.id(),
            Shape::Text(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Oval(_) => ShapeKind::Oval,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Oval(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Line(s) => s.hit_test(point, tolerance),
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Oval(s) => s.hit_test(point, tolerance),
            Shape::Polygon(s) => s.hit_test(point, tolerance),
            Shape::Text(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Line(s) => s.style(),
            Shape::Rectangle(s) => s.style(),
            Shape::Oval(s) => s.style(),
            Shape::Polygon(s) => s.style(),
            Shape::Text(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Line(s) => s.style_mut(),
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Oval(s) => s.style_mut(),
            Shape::Polygon(s) => s.style_mut(),
            Shape::Text(s) => s.style_mut(),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Line(s) => s.translate(delta),
            Shape::Rectangle(s) => s.translate(delta),
            Shape::Oval(s) => s.translate(delta),
            Shape::Polygon(s) => s.translate(delta),
            Shape::Text(s) => s.translate(delta),
        }
    }

    /// Test if this shape's bounds overlap a rectangle (touching counts,
    /// so degenerate zero-area shapes are still found).
    pub fn overlaps(&self, rect: Rect) -> bool {
        let b = self.bounds();
        b.x0 <= rect.x1 && rect.x0 <= b.x1 && b.y0 <= rect.y1 && rect.y0 <= b.y1
    }

    /// Test if this shape's bounds are fully enclosed by a rectangle.
    pub fn enclosed_by(&self, rect: Rect) -> bool {
        let b = self.bounds();
        rect.x0 <= b.x0 && b.x1 <= rect.x1 && rect.y0 <= b.y0 && b.y1 <= rect.y1
    }

    /// Regenerate the shape's ID with a new unique identifier.
    /// Used when pasting so the copy has its own identity.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Line(s) => s.id = new_id,
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Oval(s) => s.id = new_id,
            Shape::Polygon(s) => s.id = new_id,
            Shape::Text(s) => s.id = new_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_hex() {
        assert_eq!("#ff0000".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
        assert_eq!("#abc".parse::<Color>().unwrap(), Color::rgb(0xaa, 0xbb, 0xcc));
        assert_eq!(
            "#11223344".parse::<Color>().unwrap(),
            Color::rgba(0x11, 0x22, 0x33, 0x44)
        );
    }

    #[test]
    fn test_color_parse_named() {
        assert_eq!("black".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("white".parse::<Color>().unwrap(), Color::WHITE);
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_roundtrip() {
        let c = Color::rgb(18, 52, 86);
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
    }

    #[test]
    fn test_kind_names() {
        for kind in [
            ShapeKind::Line,
            ShapeKind::Rectangle,
            ShapeKind::Oval,
            ShapeKind::Polygon,
            ShapeKind::Text,
        ] {
            assert_eq!(ShapeKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ShapeKind::parse("bitmap"), None);
    }

    #[test]
    fn test_point_to_segment_dist() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-9);
        assert!((point_to_segment_dist(Point::new(-4.0, 0.0), a, b) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlaps_touching() {
        let line = Shape::Line(Line::from_points(vec![Point::new(5.0, 5.0)]));
        assert!(line.overlaps(Rect::new(0.0, 0.0, 5.0, 5.0)));
        assert!(!line.overlaps(Rect::new(6.0, 6.0, 10.0, 10.0)));
    }
}
