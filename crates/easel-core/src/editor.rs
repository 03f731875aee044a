//! Context-menu editing: clipboard, delete, style edits, reorder.
//!
//! Every operation here acts on the first selected shape only; the
//! multi-selection is used for move drags, not for bulk edits.

use crate::selection::SelectionEngine;
use crate::shapes::{Color, Shape, ShapeId, ShapeTrait};
use crate::store::ObjectStore;
use crate::tools::ToolSettings;
use kurbo::Point;

/// Clipboard and single-object edit operations.
#[derive(Debug, Default)]
pub struct Editor {
    clipboard: Option<Shape>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Snapshot the first selected shape into the clipboard.
    pub fn copy(&mut self, store: &ObjectStore, selection: &SelectionEngine) {
        if let Some(shape) = selection.first().and_then(|id| store.get(id)) {
            self.clipboard = Some(shape.clone());
        }
    }

    /// Paste the clipboard at a position, re-centered per kind, with a
    /// fresh id, on top of the stack. Empty clipboard is a no-op.
    pub fn paste_at(&self, store: &mut ObjectStore, position: Point) -> Option<ShapeId> {
        let mut shape = self.clipboard.clone()?;
        match &mut shape {
            Shape::Line(line) => {
                let delta = position - line.centroid();
                line.translate(delta);
            }
            Shape::Polygon(polygon) => {
                let delta = position - polygon.centroid();
                polygon.translate(delta);
            }
            Shape::Text(text) => {
                text.anchor = position;
            }
            Shape::Rectangle(_) | Shape::Oval(_) => {
                let delta = position - shape.bounds().center();
                shape.translate(delta);
            }
        }
        shape.regenerate_id();
        Some(store.insert(shape))
    }

    /// Delete the first selected shape and clear the selection.
    pub fn delete_selected(
        &self,
        store: &mut ObjectStore,
        selection: &mut SelectionEngine,
    ) -> Option<ShapeId> {
        let id = selection.first()?;
        store.remove(id);
        selection.clear();
        Some(id)
    }

    /// Recolor the first selected shape: lines and text take the color
    /// as their drawing color, polygons as their interior, rectangles
    /// and ovals both. Recoloring text also becomes the toolbox text
    /// color for subsequent entry.
    pub fn set_color(
        &self,
        store: &mut ObjectStore,
        selection: &SelectionEngine,
        settings: &mut ToolSettings,
        color: Color,
    ) {
        let Some(shape) = selection.first().and_then(|id| store.get_mut(id)) else {
            return;
        };
        match shape {
            Shape::Line(_) | Shape::Text(_) => shape.style_mut().stroke = color,
            Shape::Polygon(_) => shape.style_mut().fill = Some(color),
            Shape::Rectangle(_) | Shape::Oval(_) => {
                let style = shape.style_mut();
                style.fill = Some(color);
                style.stroke = color;
            }
        }
        if matches!(shape, Shape::Text(_)) {
            settings.text_color = color;
        }
    }

    /// Set the stroke width of the first selected shape.
    pub fn set_stroke_width(
        &self,
        store: &mut ObjectStore,
        selection: &SelectionEngine,
        width: f64,
    ) {
        if let Some(shape) = selection.first().and_then(|id| store.get_mut(id)) {
            shape.style_mut().stroke_width = width;
        }
    }

    /// Change the font family of the first selected shape, keeping its
    /// size. Non-text selections are ignored.
    pub fn set_font_family(
        &self,
        store: &mut ObjectStore,
        selection: &SelectionEngine,
        name: &str,
    ) {
        if let Some(Shape::Text(text)) = selection.first().and_then(|id| store.get_mut(id)) {
            text.font.name = name.to_string();
        }
    }

    /// Change the font size of the first selected shape, keeping its
    /// family. The selection frame is recomputed since the text bounds
    /// change.
    pub fn set_font_size(
        &self,
        store: &mut ObjectStore,
        selection: &mut SelectionEngine,
        size: u32,
    ) {
        if let Some(Shape::Text(text)) = selection.first().and_then(|id| store.get_mut(id)) {
            text.font.size = size;
            selection.recompute_frame(store);
        }
    }

    /// Raise the first selected shape to the top of the stack.
    pub fn bring_to_front(&self, store: &mut ObjectStore, selection: &SelectionEngine) {
        if let Some(id) = selection.first() {
            store.bring_to_front(id);
        }
    }

    /// Lower the first selected shape to the bottom of the stack.
    pub fn send_to_back(&self, store: &mut ObjectStore, selection: &SelectionEngine) {
        if let Some(id) = selection.first() {
            store.send_to_back(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontSpec;
    use crate::shapes::{Line, Polygon, Rectangle, Text};

    const RED: Color = Color::rgb(255, 0, 0);

    fn select(store: &ObjectStore, id: ShapeId) -> SelectionEngine {
        let mut sel = SelectionEngine::new();
        sel.click_shape(id, store);
        sel
    }

    #[test]
    fn test_copy_paste_rectangle_recenters() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Rectangle(Rectangle::new(
            Point::new(0.0, 0.0),
            40.0,
            20.0,
        )));
        let sel = select(&store, id);
        let mut editor = Editor::new();
        editor.copy(&store, &sel);
        let pasted = editor.paste_at(&mut store, Point::new(100.0, 100.0)).unwrap();

        assert_ne!(pasted, id);
        let b = store.get(pasted).unwrap().bounds();
        assert_eq!(b.center(), Point::new(100.0, 100.0));
        assert_eq!((b.width(), b.height()), (40.0, 20.0));
        // Pasted copy is on top
        assert_eq!(store.ids_ordered().last(), Some(pasted));
    }

    #[test]
    fn test_paste_line_centers_by_centroid() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Line(Line::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 9.0),
        ])));
        let sel = select(&store, id);
        let mut editor = Editor::new();
        editor.copy(&store, &sel);
        let pasted = editor.paste_at(&mut store, Point::new(50.0, 50.0)).unwrap();
        let Shape::Line(line) = store.get(pasted).unwrap() else {
            panic!("expected line");
        };
        let c = line.centroid();
        assert!((c.x - 50.0).abs() < 1e-9);
        assert!((c.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_paste_polygon_centers_by_centroid() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Polygon(Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(12.0, 0.0),
            Point::new(6.0, 9.0),
        ])));
        let sel = select(&store, id);
        let mut editor = Editor::new();
        editor.copy(&store, &sel);
        let pasted = editor.paste_at(&mut store, Point::new(40.0, 60.0)).unwrap();
        let Shape::Polygon(poly) = store.get(pasted).unwrap() else {
            panic!("expected polygon");
        };
        let c = poly.centroid();
        assert!((c.x - 40.0).abs() < 1e-9);
        assert!((c.y - 60.0).abs() < 1e-9);
        // Vertex spread is preserved, only the centroid moves
        assert!((poly.points[1].x - poly.points[0].x - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_paste_text_anchors_directly() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Text(Text::new(
            Point::new(5.0, 5.0),
            "hello",
            FontSpec::fallback(12),
        )));
        let sel = select(&store, id);
        let mut editor = Editor::new();
        editor.copy(&store, &sel);
        let pasted = editor.paste_at(&mut store, Point::new(70.0, 30.0)).unwrap();
        let Shape::Text(text) = store.get(pasted).unwrap() else {
            panic!("expected text");
        };
        assert_eq!(text.anchor, Point::new(70.0, 30.0));
    }

    #[test]
    fn test_paste_empty_clipboard_noop() {
        let mut store = ObjectStore::new();
        assert!(Editor::new().paste_at(&mut store, Point::ZERO).is_none());
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0)));
        let mut sel = select(&store, id);
        let editor = Editor::new();
        assert_eq!(editor.delete_selected(&mut store, &mut sel), Some(id));
        assert!(store.is_empty());
        assert!(sel.is_empty());
        assert!(sel.frame().is_none());
    }

    #[test]
    fn test_set_color_kind_mapping() {
        let mut store = ObjectStore::new();
        let line = store.insert(Shape::Line(Line::new(Point::ZERO, Point::new(10.0, 0.0))));
        let poly = store.insert(Shape::Polygon(Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ])));
        let editor = Editor::new();
        let mut settings = ToolSettings::default();

        let sel = select(&store, line);
        editor.set_color(&mut store, &sel, &mut settings, RED);
        assert_eq!(store.get(line).unwrap().style().stroke, RED);

        let sel = select(&store, poly);
        editor.set_color(&mut store, &sel, &mut settings, RED);
        let style = store.get(poly).unwrap().style();
        assert_eq!(style.fill, Some(RED));
        assert_eq!(style.stroke, Color::BLACK);
        // Non-text edits leave the toolbox text color alone
        assert_eq!(settings.text_color, Color::BLACK);
    }

    #[test]
    fn test_text_color_updates_toolbox() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Text(Text::new(
            Point::ZERO,
            "x",
            FontSpec::fallback(12),
        )));
        let sel = select(&store, id);
        let mut settings = ToolSettings::default();
        Editor::new().set_color(&mut store, &sel, &mut settings, RED);
        assert_eq!(settings.text_color, RED);
    }

    #[test]
    fn test_font_size_recomputes_frame() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Text(Text::new(
            Point::ZERO,
            "hello",
            FontSpec::fallback(12),
        )));
        let mut sel = select(&store, id);
        let before = sel.frame().unwrap();
        Editor::new().set_font_size(&mut store, &mut sel, 48);
        let after = sel.frame().unwrap();
        assert!(after.width() > before.width());
        assert!(after.height() > before.height());
    }

    #[test]
    fn test_font_family_keeps_size() {
        let mut store = ObjectStore::new();
        let id = store.insert(Shape::Text(Text::new(
            Point::ZERO,
            "x",
            FontSpec::new("Georgia", 16),
        )));
        let sel = select(&store, id);
        Editor::new().set_font_family(&mut store, &sel, "Courier New");
        let Shape::Text(text) = store.get(id).unwrap() else {
            panic!("expected text");
        };
        assert_eq!(text.font, FontSpec::new("Courier New", 16));
    }
}
