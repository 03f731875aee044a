//! Line shape: pen strokes, straight lines, and erase-split remnants.

use super::{point_to_polyline_dist, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A polyline through one or more points.
///
/// A straight line is the two-point case; pen strokes carry the full
/// accumulated point list. A single point is a zero-length segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Ordered vertex list in board coordinates.
    pub points: Vec<Point>,
    /// Style properties (`stroke` is the line color; `fill` is unused).
    pub style: ShapeStyle,
}

impl Line {
    /// Create a straight line between two points.
    pub fn new(start: Point, end: Point) -> Self {
        Self::from_points(vec![start, end])
    }

    /// Create a polyline from a point list.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ShapeStyle::default(),
        }
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> Point {
        if self.points.is_empty() {
            return Point::ZERO;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let (min_x, max_x) = self
            .points
            .iter()
            .fold((f64::MAX, f64::MIN), |(mn, mx), p| (mn.min(p.x), mx.max(p.x)));
        let (min_y, max_y) = self
            .points
            .iter()
            .fold((f64::MAX, f64::MIN), |(mn, mx), p| (mn.min(p.y), mx.max(p.y)));
        if self.points.is_empty() {
            return Rect::ZERO;
        }
        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.style.stroke_width / 2.0;
        match self.points.len() {
            0 => false,
            1 => {
                let p = self.points[0];
                ((point.x - p.x).powi(2) + (point.y - p.y).powi(2)).sqrt() <= reach
            }
            _ => point_to_polyline_dist(point, &self.points) <= reach,
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let line = Line::from_points(vec![
            Point::new(10.0, 20.0),
            Point::new(50.0, 80.0),
            Point::new(30.0, 5.0),
        ]);
        let b = line.bounds();
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (10.0, 5.0, 50.0, 80.0));
    }

    #[test]
    fn test_centroid() {
        let line = Line::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 9.0),
        ]);
        let c = line.centroid();
        assert!((c.x - 5.0).abs() < 1e-9);
        assert!((c.y - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test() {
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        line.style.stroke_width = 2.0;
        assert!(line.hit_test(Point::new(50.0, 0.0), 1.0));
        assert!(line.hit_test(Point::new(50.0, 3.0), 5.0));
        assert!(!line.hit_test(Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_single_point_hit() {
        let dot = Line::from_points(vec![Point::new(4.0, 4.0)]);
        assert!(dot.hit_test(Point::new(5.0, 4.0), 1.0));
    }

    #[test]
    fn test_translate() {
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        line.translate(Vec2::new(5.0, -2.0));
        assert_eq!(line.points[0], Point::new(5.0, -2.0));
        assert_eq!(line.points[1], Point::new(15.0, 8.0));
    }
}
