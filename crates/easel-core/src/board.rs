//! The board: owns the document state and routes pointer events to
//! the engine for the active tool.

use crate::editor::Editor;
use crate::erase::{erase_at, eraser_region, EraseOutcome};
use crate::fill::fill_at;
use crate::fonts::FontRegistry;
use crate::input::{MouseButton, PointerEvent};
use crate::selection::SelectionEngine;
use crate::shapes::{Color, Shape, ShapeId, Text};
use crate::storage::{FileStorage, StorageResult};
use crate::store::ObjectStore;
use crate::tools::{Draft, DraftEngine, PolygonClick, Preview, ToolKind, ToolSettings};
use crate::transform::{MoveDrag, ScrollEngine, Viewport};
use kurbo::{Point, Rect};

/// Pixel slack when resolving which shape a click lands on.
pub const HIT_TOLERANCE: f64 = 1.0;

/// One drawing board: object store, active tool, and every engine.
///
/// All mutation is synchronous and single threaded; the host feeds
/// pointer events in and redraws from the store, selection frame, and
/// draft preview afterwards.
#[derive(Debug, Default)]
pub struct Board {
    store: ObjectStore,
    settings: ToolSettings,
    fonts: FontRegistry,
    tool: ToolKind,
    draft: DraftEngine,
    selection: SelectionEngine,
    editor: Editor,
    scroll: ScrollEngine,
    viewport: Viewport,
    move_drag: Option<MoveDrag>,
    /// Anchor of a text entry awaiting its content.
    pending_text: Option<Point>,
    /// Position of the last secondary click, where pastes land.
    secondary_click: Point,
    last_pointer: Point,
    pressed: bool,
}

impl Board {
    pub fn new(fonts: FontRegistry) -> Self {
        Self {
            fonts,
            ..Default::default()
        }
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// The in-progress draft geometry, if any.
    pub fn preview(&self) -> Option<Preview<'_>> {
        self.draft.preview()
    }

    /// The red square the host draws around the pointer while the
    /// eraser is active.
    pub fn eraser_indicator(&self) -> Option<Rect> {
        (self.tool == ToolKind::Erase)
            .then(|| eraser_region(self.last_pointer, self.settings.eraser_width))
    }

    pub fn pending_text_anchor(&self) -> Option<Point> {
        self.pending_text
    }

    /// Switch tools, clearing tool-transient state: any draft except
    /// collected polygon vertices on a polygon re-click, the selection,
    /// and an unfinished move.
    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("tool changed to {tool:?}");
        self.tool = tool;
        let keep_draft = tool == ToolKind::Polygon
            && matches!(self.draft.state(), Draft::Collecting { .. });
        if !keep_draft {
            self.draft.abandon();
        }
        self.selection.clear();
        self.move_drag = None;
        self.pending_text = None;
        self.pressed = false;
    }

    /// Clear the document and recenter the view.
    pub fn new_document(&mut self) {
        self.store.clear();
        self.selection.clear();
        self.draft.abandon();
        self.move_drag = None;
        self.pending_text = None;
        self.pressed = false;
        self.viewport.return_to_middle();
    }

    /// Route a pointer event to the active tool's engine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.last_pointer = event.position();
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                ..
            } => self.handle_primary_down(position),
            PointerEvent::Down {
                position,
                button: MouseButton::Right,
                ..
            } => self.handle_secondary_down(position),
            PointerEvent::Down { .. } => {}
            PointerEvent::Move { position } => self.handle_move(position),
            PointerEvent::Up {
                button: MouseButton::Left,
                ..
            } => self.handle_primary_up(),
            PointerEvent::Up { .. } => {}
        }
    }

    fn handle_primary_down(&mut self, position: Point) {
        self.pressed = true;
        match self.tool {
            ToolKind::Select => {
                if let Some(id) = self.store.top_hit(position, HIT_TOLERANCE).map(Shape::id) {
                    if !self.selection.is_selected(id) {
                        self.selection.click_shape(id, &self.store);
                    }
                    if !self.selection.is_empty() {
                        self.move_drag = Some(MoveDrag::begin(position));
                    }
                } else if !self.selection.point_in_frame(position) {
                    self.selection.begin_marquee(position);
                }
            }
            ToolKind::Pen => self.draft.begin_stroke(position),
            ToolKind::Erase => self.erase(position),
            ToolKind::Fill => {
                fill_at(&mut self.store, position, self.settings.fill_color);
            }
            ToolKind::Text => self.pending_text = Some(position),
            ToolKind::Polygon => {
                if let PolygonClick::Committed(shape) =
                    self.draft.polygon_click(position, &self.settings)
                {
                    self.store.insert(shape);
                }
            }
            ToolKind::Move => self.move_drag = Some(MoveDrag::begin(position)),
            _ => {
                if let Some(kind) = self.tool.sized_kind() {
                    self.draft.begin_sizing(kind, position);
                }
            }
        }
    }

    /// Secondary clicks record the paste position and select the shape
    /// under the pointer so the host can show a context menu for it.
    fn handle_secondary_down(&mut self, position: Point) {
        self.secondary_click = position;
        if let Some(id) = self.store.top_hit(position, HIT_TOLERANCE).map(Shape::id) {
            if !self.selection.is_selected(id) {
                self.selection.click_shape(id, &self.store);
            }
        }
    }

    fn handle_move(&mut self, position: Point) {
        if !self.pressed {
            return;
        }
        match self.tool {
            ToolKind::Select => {
                if let Some(drag) = &mut self.move_drag {
                    let delta = drag.update(position);
                    for id in self.selection.selected().to_vec() {
                        if let Some(shape) = self.store.get_mut(id) {
                            shape.translate(delta);
                        }
                    }
                    self.selection.recompute_frame(&self.store);
                } else if self.selection.point_in_frame(position) {
                    self.move_drag = Some(MoveDrag::begin(position));
                } else {
                    self.selection.update_marquee(position);
                }
            }
            ToolKind::Pen => self.draft.extend_stroke(position),
            ToolKind::Erase => self.erase(position),
            ToolKind::Move => {
                if let Some(drag) = &mut self.move_drag {
                    let delta = drag.update(position);
                    self.scroll.drag(delta);
                }
            }
            _ => self.draft.update_sizing(position),
        }
    }

    fn handle_primary_up(&mut self) {
        self.pressed = false;
        match self.tool {
            ToolKind::Pen => {
                if let Some(shape) = self.draft.finish_stroke(&self.settings) {
                    self.store.insert(shape);
                }
            }
            ToolKind::Select => {
                self.selection.finish_marquee(&self.store);
                self.move_drag = None;
            }
            ToolKind::Move => self.move_drag = None,
            _ => {
                if let Some(shape) = self.draft.finish_sizing(&self.settings) {
                    self.store.insert(shape);
                }
            }
        }
    }

    fn erase(&mut self, position: Point) {
        if let Some(EraseOutcome { .. }) =
            erase_at(&mut self.store, position, self.settings.eraser_width)
        {
            self.selection.prune(&self.store);
        }
    }

    /// One step of the inertial scroll loop. The host calls this every
    /// tick interval while it returns true.
    pub fn scroll_tick(&mut self) -> bool {
        match self.scroll.tick() {
            Some((units_x, units_y)) => {
                self.viewport.scroll_by(units_x, units_y);
                true
            }
            None => false,
        }
    }

    /// Commit a pending text entry. Whitespace-only content cancels it.
    pub fn commit_text(&mut self, content: &str) -> Option<ShapeId> {
        let anchor = self.pending_text.take()?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return None;
        }
        let font = self
            .fonts
            .resolve(&self.settings.text_font.name, self.settings.text_font.size);
        let mut text = Text::new(anchor, trimmed, font);
        text.style.stroke = self.settings.text_color;
        Some(self.store.insert(Shape::Text(text)))
    }

    pub fn cancel_text(&mut self) {
        self.pending_text = None;
    }

    // Context-menu operations. Each acts through the editing engine on
    // the first selected shape.

    pub fn copy_selected(&mut self) {
        self.editor.copy(&self.store, &self.selection);
    }

    pub fn can_paste(&self) -> bool {
        self.editor.has_clipboard()
    }

    /// Paste the clipboard at the last secondary-click position.
    pub fn paste(&mut self) -> Option<ShapeId> {
        self.editor.paste_at(&mut self.store, self.secondary_click)
    }

    pub fn delete_selected(&mut self) -> Option<ShapeId> {
        self.editor.delete_selected(&mut self.store, &mut self.selection)
    }

    pub fn set_selected_color(&mut self, color: Color) {
        self.editor
            .set_color(&mut self.store, &self.selection, &mut self.settings, color);
    }

    pub fn set_selected_width(&mut self, width: f64) {
        self.editor
            .set_stroke_width(&mut self.store, &self.selection, width);
    }

    pub fn set_selected_font_family(&mut self, name: &str) {
        self.editor
            .set_font_family(&mut self.store, &self.selection, name);
    }

    pub fn set_selected_font_size(&mut self, size: u32) {
        self.editor
            .set_font_size(&mut self.store, &mut self.selection, size);
    }

    pub fn bring_selected_to_front(&mut self) {
        self.editor.bring_to_front(&mut self.store, &self.selection);
    }

    pub fn send_selected_to_back(&mut self) {
        self.editor.send_to_back(&mut self.store, &self.selection);
    }

    /// Save the document under a board name.
    pub fn save_to(&self, storage: &FileStorage, name: &str) -> StorageResult<()> {
        storage.save(name, &self.store)
    }

    /// Replace the document with a saved board. The current document
    /// is only discarded once the file has loaded.
    pub fn load_from(&mut self, storage: &FileStorage, name: &str) -> StorageResult<()> {
        let loaded = storage.load(name, &self.fonts)?;
        self.new_document();
        self.store = loaded;
        Ok(())
    }
}
