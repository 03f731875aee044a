//! Oval shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned ellipse, persisted via its bounding-box corners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Oval {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Oval {
    /// Create a new oval.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_x,
            radius_y,
            style: ShapeStyle::default(),
        }
    }

    /// Create a circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    /// Create an oval from a bounding rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.center(), rect.width() / 2.0, rect.height() / 2.0)
    }
}

impl ShapeTrait for Oval {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let half_sw = self.style.stroke_width / 2.0;
        let rx = self.radius_x + tolerance + half_sw;
        let ry = self.radius_y + tolerance + half_sw;
        if rx < f64::EPSILON || ry < f64::EPSILON {
            let d = ((point.x - self.center.x).powi(2) + (point.y - self.center.y).powi(2)).sqrt();
            return d <= tolerance + half_sw;
        }
        let dx = (point.x - self.center.x) / rx;
        let dy = (point.y - self.center.y) / ry;
        if dx * dx + dy * dy > 1.0 {
            return false;
        }
        if self.style.fill.is_some() {
            return true;
        }
        // Outline only: reject if inside the inner ellipse
        let inner_rx = (self.radius_x - tolerance - half_sw).max(0.0);
        let inner_ry = (self.radius_y - tolerance - half_sw).max(0.0);
        if inner_rx < f64::EPSILON || inner_ry < f64::EPSILON {
            return true;
        }
        let dx = (point.x - self.center.x) / inner_rx;
        let dy = (point.y - self.center.y) / inner_ry;
        dx * dx + dy * dy > 1.0
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}
