//! Selection set, selection frame, and marquee (rubber-band) selection.

use crate::shapes::{Shape, ShapeId};
use crate::store::ObjectStore;
use kurbo::{Point, Rect};

/// Padding added around the union of selected bounds when drawing the
/// selection frame.
pub const SELECTION_FRAME_PADDING: f64 = 2.0;

/// A rubber-band rectangle being dragged out on empty canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub start: Point,
    pub current: Point,
}

impl Marquee {
    /// The normalized rectangle between the two corners.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }
}

/// Tracks which shapes are selected and the padded frame around them.
///
/// The frame is recomputed on every selection-set change and after any
/// edit that moves or resizes a member; it is the hit region the board
/// uses to start a move drag.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    selected: Vec<ShapeId>,
    frame: Option<Rect>,
    marquee: Option<Marquee>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[ShapeId] {
        &self.selected
    }

    /// The first selected shape. Style edits and delete act on this
    /// one only.
    pub fn first(&self) -> Option<ShapeId> {
        self.selected.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    pub fn marquee(&self) -> Option<Marquee> {
        self.marquee
    }

    /// Whether a point lands inside the selection frame rectangle.
    pub fn point_in_frame(&self, point: Point) -> bool {
        self.frame.is_some_and(|f| f.contains(point))
    }

    /// Click on a shape: an unselected shape replaces the selection;
    /// clicking an already-selected shape deselects everything.
    pub fn click_shape(&mut self, id: ShapeId, store: &ObjectStore) {
        if self.is_selected(id) {
            self.clear();
        } else {
            self.selected = vec![id];
            self.recompute_frame(store);
        }
    }

    /// Replace the selection with a set of shapes.
    pub fn select_many(&mut self, ids: Vec<ShapeId>, store: &ObjectStore) {
        self.selected = ids;
        self.recompute_frame(store);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.frame = None;
    }

    /// Start a marquee drag at a press on empty canvas.
    pub fn begin_marquee(&mut self, position: Point) {
        self.clear();
        self.marquee = Some(Marquee {
            start: position,
            current: position,
        });
    }

    pub fn update_marquee(&mut self, position: Point) {
        if let Some(m) = &mut self.marquee {
            m.current = position;
        }
    }

    /// Finish the marquee: select the shapes fully enclosed by the
    /// normalized rectangle, or clear when it encloses none.
    pub fn finish_marquee(&mut self, store: &ObjectStore) {
        let Some(marquee) = self.marquee.take() else {
            return;
        };
        let enclosed = store.enclosed(marquee.rect());
        if enclosed.is_empty() {
            self.clear();
        } else {
            log::debug!("marquee selected {} shapes", enclosed.len());
            self.select_many(enclosed, store);
        }
    }

    /// Recompute the padded frame from the current members' bounds.
    pub fn recompute_frame(&mut self, store: &ObjectStore) {
        self.frame = self
            .selected
            .iter()
            .filter_map(|&id| store.get(id))
            .map(Shape::bounds)
            .reduce(|acc, b| acc.union(b))
            .map(|b| b.inflate(SELECTION_FRAME_PADDING, SELECTION_FRAME_PADDING));
        if self.frame.is_none() {
            self.selected.clear();
        }
    }

    /// Drop any selected ids no longer present in the store.
    pub fn prune(&mut self, store: &ObjectStore) {
        let before = self.selected.len();
        self.selected.retain(|&id| store.contains(id));
        if self.selected.len() != before {
            self.recompute_frame(store);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Color, Rectangle};

    fn store_with_rects() -> (ObjectStore, ShapeId, ShapeId) {
        let mut store = ObjectStore::new();
        let mut a = Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0);
        a.style.fill = Some(Color::BLACK);
        let mut b = Rectangle::new(Point::new(100.0, 100.0), 20.0, 20.0);
        b.style.fill = Some(Color::BLACK);
        let a = store.insert(Shape::Rectangle(a));
        let b = store.insert(Shape::Rectangle(b));
        (store, a, b)
    }

    #[test]
    fn test_click_replaces_then_toggles_off() {
        let (store, a, b) = store_with_rects();
        let mut sel = SelectionEngine::new();
        sel.click_shape(a, &store);
        assert_eq!(sel.selected(), &[a]);
        sel.click_shape(b, &store);
        assert_eq!(sel.selected(), &[b]);
        sel.click_shape(b, &store);
        assert!(sel.is_empty());
        assert!(sel.frame().is_none());
    }

    #[test]
    fn test_frame_is_padded_union() {
        let (store, a, b) = store_with_rects();
        let mut sel = SelectionEngine::new();
        sel.select_many(vec![a, b], &store);
        let f = sel.frame().unwrap();
        assert_eq!((f.x0, f.y0), (-2.0, -2.0));
        assert_eq!((f.x1, f.y1), (122.0, 122.0));
        assert!(sel.point_in_frame(Point::new(60.0, 60.0)));
        assert!(!sel.point_in_frame(Point::new(150.0, 60.0)));
    }

    #[test]
    fn test_marquee_full_enclosure_only() {
        let (store, a, _b) = store_with_rects();
        let mut sel = SelectionEngine::new();
        sel.begin_marquee(Point::new(-5.0, -5.0));
        // Reversed drag direction still normalizes
        sel.update_marquee(Point::new(50.0, 50.0));
        sel.finish_marquee(&store);
        assert_eq!(sel.selected(), &[a]);
    }

    #[test]
    fn test_marquee_enclosing_none_clears() {
        let (store, a, _b) = store_with_rects();
        let mut sel = SelectionEngine::new();
        sel.click_shape(a, &store);
        sel.begin_marquee(Point::new(200.0, 200.0));
        sel.update_marquee(Point::new(210.0, 210.0));
        sel.finish_marquee(&store);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_prune_after_removal() {
        let (mut store, a, b) = store_with_rects();
        let mut sel = SelectionEngine::new();
        sel.select_many(vec![a, b], &store);
        store.remove(a);
        sel.prune(&store);
        assert_eq!(sel.selected(), &[b]);
        let f = sel.frame().unwrap();
        assert_eq!((f.x0, f.y0), (98.0, 98.0));
    }
}
