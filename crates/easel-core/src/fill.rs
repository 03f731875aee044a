//! Fill tool: recolor the topmost shape under the click.

use crate::shapes::{Color, Shape, ShapeId};
use crate::store::ObjectStore;
use kurbo::{Point, Rect};

/// Half-width of the square pick region around the click.
pub const FILL_TOLERANCE: f64 = 5.0;

/// Apply the fill color to the topmost shape overlapping the click.
///
/// Lines and text take the color as their drawing color, polygons as
/// their interior; rectangles and ovals recolor interior and outline
/// both. A click hitting nothing is a no-op. Returns the recolored
/// shape's id.
pub fn fill_at(store: &mut ObjectStore, position: Point, fill_color: Color) -> Option<ShapeId> {
    let pick = Rect::new(
        position.x - FILL_TOLERANCE,
        position.y - FILL_TOLERANCE,
        position.x + FILL_TOLERANCE,
        position.y + FILL_TOLERANCE,
    );
    let id = store.overlapping(pick).pop()?;
    let shape = store.get_mut(id)?;
    match shape {
        Shape::Line(_) | Shape::Text(_) => {
            shape.style_mut().stroke = fill_color;
        }
        Shape::Polygon(_) => {
            shape.style_mut().fill = Some(fill_color);
        }
        Shape::Rectangle(_) | Shape::Oval(_) => {
            let style = shape.style_mut();
            style.fill = Some(fill_color);
            style.stroke = fill_color;
        }
    }
    log::debug!("filled {id} with {fill_color}");
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Polygon, Rectangle};

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_fill_topmost_wins() {
        let mut store = ObjectStore::new();
        let mut back = Rectangle::new(Point::new(0.0, 0.0), 50.0, 50.0);
        back.style.fill = Some(Color::BLACK);
        let mut front = Rectangle::new(Point::new(0.0, 0.0), 50.0, 50.0);
        front.style.fill = Some(Color::BLACK);
        let back = store.insert(Shape::Rectangle(back));
        let front = store.insert(Shape::Rectangle(front));

        let filled = fill_at(&mut store, Point::new(25.0, 25.0), RED);
        assert_eq!(filled, Some(front));
        assert_eq!(store.get(back).unwrap().style().fill, Some(Color::BLACK));
    }

    #[test]
    fn test_line_takes_stroke_color() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Line(Line::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        )));
        fill_at(&mut store, Point::new(50.0, 0.0), RED);
        let style = store.get(id).unwrap().style();
        assert_eq!(style.stroke, RED);
        assert_eq!(style.fill, None);
    }

    #[test]
    fn test_polygon_fill_only() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Polygon(Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(10.0, 20.0),
        ])));
        fill_at(&mut store, Point::new(10.0, 5.0), RED);
        let style = store.get(id).unwrap().style();
        assert_eq!(style.fill, Some(RED));
        assert_eq!(style.stroke, Color::BLACK);
    }

    #[test]
    fn test_rectangle_fill_and_outline() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Rectangle(Rectangle::new(
            Point::new(0.0, 0.0),
            30.0,
            30.0,
        )));
        fill_at(&mut store, Point::new(15.0, 15.0), RED);
        let style = store.get(id).unwrap().style();
        assert_eq!(style.fill, Some(RED));
        assert_eq!(style.stroke, RED);
    }

    #[test]
    fn test_near_miss_within_tolerance() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Rectangle(Rectangle::new(
            Point::new(0.0, 0.0),
            10.0,
            10.0,
        )));
        assert_eq!(fill_at(&mut store, Point::new(14.0, 5.0), RED), Some(id));
        assert_eq!(fill_at(&mut store, Point::new(30.0, 5.0), RED), None);
    }
}
