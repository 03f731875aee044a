//! The persisted board file layout.
//!
//! A board file is `{"objects": [...]}` where each record carries a
//! kind name, a flat coordinate list, string colors, and its position
//! in the draw order under the `z-index` key. Loading sorts ascending
//! by z-index and rebuilds the stack back to front, so stacking
//! round-trips exactly.

use crate::fonts::FontRegistry;
use crate::shapes::{
    Color, Line, Oval, Polygon, Rectangle, Shape, ShapeKind, ShapeStyle, ShapeTrait, Text,
};
use crate::store::ObjectStore;
use crate::tools::DEFAULT_PEN_WIDTH;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Top-level board file.
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardFile {
    pub objects: Vec<ObjectRecord>,
}

/// One persisted shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRecord {
    #[serde(rename = "type")]
    pub kind: String,
    /// Flat x,y coordinate list; meaning depends on the kind.
    pub coords: Vec<f64>,
    /// Interior color for bounded kinds, drawing color for line/text.
    /// Empty string means unfilled.
    pub fill: String,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "z-index")]
    pub z_index: usize,
}

fn flat_coords(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

fn coord_points(coords: &[f64]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect()
}

fn color_string(color: Option<Color>) -> String {
    color.map(|c| c.to_string()).unwrap_or_default()
}

/// Parse an optional color field: empty means absent, garbage is
/// logged and treated as absent.
fn parse_fill(s: &str) -> Option<Color> {
    if s.is_empty() {
        return None;
    }
    match s.parse() {
        Ok(c) => Some(c),
        Err(_) => {
            log::warn!("unrecognized color {s:?} in board file");
            None
        }
    }
}

fn record_for(shape: &Shape, z_index: usize) -> ObjectRecord {
    let style = shape.style();
    let mut record = ObjectRecord {
        kind: shape.kind().as_str().to_string(),
        coords: Vec::new(),
        fill: String::new(),
        width: Some(style.stroke_width),
        outline: None,
        font: None,
        text: None,
        z_index,
    };
    match shape {
        Shape::Line(line) => {
            record.coords = flat_coords(&line.points);
            record.fill = style.stroke.to_string();
        }
        Shape::Rectangle(rect) => {
            let b = rect.as_rect();
            record.coords = vec![b.x0, b.y0, b.x1, b.y1];
            record.fill = color_string(style.fill);
            record.outline = Some(style.stroke.to_string());
        }
        Shape::Oval(oval) => {
            let b = oval.bounds();
            record.coords = vec![b.x0, b.y0, b.x1, b.y1];
            record.fill = color_string(style.fill);
            record.outline = Some(style.stroke.to_string());
        }
        Shape::Polygon(polygon) => {
            record.coords = flat_coords(&polygon.points);
            record.fill = color_string(style.fill);
            record.outline = Some(style.stroke.to_string());
        }
        Shape::Text(text) => {
            record.coords = vec![text.anchor.x, text.anchor.y];
            record.fill = style.stroke.to_string();
            record.font = Some(text.font.to_string());
            record.text = Some(text.content.clone());
        }
    }
    record
}

/// Serialize a store into board-file records, back to front.
pub fn store_to_file(store: &ObjectStore) -> BoardFile {
    BoardFile {
        objects: store
            .iter_ordered()
            .enumerate()
            .map(|(z, shape)| record_for(shape, z))
            .collect(),
    }
}

fn shape_from_record(record: &ObjectRecord, fonts: &FontRegistry) -> Option<Shape> {
    let Some(kind) = ShapeKind::parse(&record.kind) else {
        log::warn!("skipping object of unknown type {:?}", record.kind);
        return None;
    };
    let stroke_width = record.width.unwrap_or(DEFAULT_PEN_WIDTH);
    let stroke = |field: &Option<String>| {
        field
            .as_deref()
            .and_then(parse_fill)
            .unwrap_or(Color::BLACK)
    };
    let points = coord_points(&record.coords);
    let shape = match kind {
        ShapeKind::Line => {
            if points.is_empty() {
                log::warn!("skipping line with no coordinates");
                return None;
            }
            let mut line = Line::from_points(points);
            line.style = ShapeStyle {
                stroke: parse_fill(&record.fill).unwrap_or(Color::BLACK),
                stroke_width,
                fill: None,
            };
            Shape::Line(line)
        }
        ShapeKind::Rectangle | ShapeKind::Oval => {
            let [a, b] = points[..] else {
                log::warn!("skipping {kind} without two corner points");
                return None;
            };
            let style = ShapeStyle {
                stroke: stroke(&record.outline),
                stroke_width,
                fill: parse_fill(&record.fill),
            };
            if kind == ShapeKind::Rectangle {
                let mut rect = Rectangle::from_corners(a, b);
                rect.style = style;
                Shape::Rectangle(rect)
            } else {
                let mut oval = Oval::from_rect(Rect::from_points(a, b));
                oval.style = style;
                Shape::Oval(oval)
            }
        }
        ShapeKind::Polygon => {
            if points.len() < 3 {
                log::warn!("skipping polygon with fewer than three vertices");
                return None;
            }
            let mut polygon = Polygon::from_points(points);
            polygon.style = ShapeStyle {
                stroke: stroke(&record.outline),
                stroke_width,
                fill: parse_fill(&record.fill),
            };
            Shape::Polygon(polygon)
        }
        ShapeKind::Text => {
            let [anchor] = points[..] else {
                log::warn!("skipping text without an anchor point");
                return None;
            };
            let font = match &record.font {
                Some(spec) => fonts.resolve_spec(spec),
                None => fonts.resolve_spec(""),
            };
            let mut text = Text::new(anchor, record.text.clone().unwrap_or_default(), font);
            text.style = ShapeStyle {
                stroke: parse_fill(&record.fill).unwrap_or(Color::BLACK),
                stroke_width: DEFAULT_PEN_WIDTH,
                fill: None,
            };
            Shape::Text(text)
        }
    };
    Some(shape)
}

/// Rebuild a store from board-file records. Entries are applied in
/// ascending z-index order; malformed entries are skipped with a
/// warning and loading continues.
pub fn file_to_store(file: &BoardFile, fonts: &FontRegistry) -> ObjectStore {
    let mut records: Vec<&ObjectRecord> = file.objects.iter().collect();
    records.sort_by_key(|r| r.z_index);
    let mut store = ObjectStore::new();
    for record in records {
        if let Some(shape) = shape_from_record(record, fonts) {
            store.insert(shape);
        }
    }
    store
}
