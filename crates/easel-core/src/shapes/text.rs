//! Text shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::fonts::FontSpec;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Average glyph width as a fraction of the point size, used for the
/// bounds estimate when no rasterizer is available.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Line height as a fraction of the point size.
const LINE_HEIGHT_RATIO: f64 = 1.2;

/// A run of text anchored at its center point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Center anchor in board coordinates.
    pub anchor: Point,
    /// The text content; may contain newlines.
    pub content: String,
    /// Font family and size.
    pub font: FontSpec,
    /// Style properties (`stroke` is the text color; `fill` is unused).
    pub style: ShapeStyle,
}

impl Text {
    /// Create a new text run.
    pub fn new(anchor: Point, content: impl Into<String>, font: FontSpec) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            content: content.into(),
            font,
            style: ShapeStyle::default(),
        }
    }

    /// Estimated size of the rendered block, from line count and the
    /// longest line. Grows with the font size.
    pub fn estimated_size(&self) -> (f64, f64) {
        let size = self.font.size as f64;
        let lines = self.content.lines().count().max(1) as f64;
        let longest = self
            .content
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(1) as f64;
        (longest * size * GLYPH_WIDTH_RATIO, lines * size * LINE_HEIGHT_RATIO)
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let (w, h) = self.estimated_size();
        Rect::new(
            self.anchor.x - w / 2.0,
            self.anchor.y - h / 2.0,
            self.anchor.x + w / 2.0,
            self.anchor.y + h / 2.0,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.anchor += delta;
    }
}
