//! The drawable object store: shapes plus their stacking order.

use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// All objects on a board, keyed by ID, with an explicit z-order.
///
/// The z-order vector runs back to front: the last entry is the
/// topmost shape and wins hit tests. Insertion places new shapes on
/// top; removal keeps the relative order of everything else.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    z_order: Vec<ShapeId>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Add a shape on top of the stack and return its ID.
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a shape, returning it if present.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Iterate shapes back to front.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Iterate IDs back to front.
    pub fn ids_ordered(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.z_order.iter().copied()
    }

    /// IDs back to front as a slice.
    pub fn ids(&self) -> &[ShapeId] {
        &self.z_order
    }

    /// The stacking position of a shape (0 = backmost).
    pub fn z_index(&self, id: ShapeId) -> Option<usize> {
        self.z_order.iter().position(|&shape_id| shape_id == id)
    }

    /// IDs of shapes whose hit test passes at `point`, front to back.
    pub fn hits_at(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        let mut hits: Vec<ShapeId> = self
            .iter_ordered()
            .filter(|shape| shape.hit_test(point, tolerance))
            .map(Shape::id)
            .collect();
        hits.reverse();
        hits
    }

    /// Topmost shape whose hit test passes at `point`.
    pub fn top_hit(&self, point: Point, tolerance: f64) -> Option<&Shape> {
        self.iter_ordered()
            .filter(|shape| shape.hit_test(point, tolerance))
            .last()
    }

    /// IDs of shapes whose bounds overlap `region`, back to front.
    pub fn overlapping(&self, region: Rect) -> Vec<ShapeId> {
        self.iter_ordered()
            .filter(|shape| shape.overlaps(region))
            .map(|shape| shape.id())
            .collect()
    }

    /// IDs of shapes whose bounds lie fully inside `region`, back to front.
    pub fn enclosed(&self, region: Rect) -> Vec<ShapeId> {
        self.iter_ordered()
            .filter(|shape| shape.enclosed_by(region))
            .map(|shape| shape.id())
            .collect()
    }

    /// Union of all shape bounds, or `None` when the store is empty.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.iter_ordered()
            .map(Shape::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// Bring a shape to the front (topmost).
    pub fn bring_to_front(&mut self, id: ShapeId) {
        if self.shapes.contains_key(&id) {
            self.z_order.retain(|&shape_id| shape_id != id);
            self.z_order.push(id);
        }
    }

    /// Send a shape to the back (bottommost).
    pub fn send_to_back(&mut self, id: ShapeId) {
        if self.shapes.contains_key(&id) {
            self.z_order.retain(|&shape_id| shape_id != id);
            self.z_order.insert(0, id);
        }
    }
}
