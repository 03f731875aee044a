//! Easel Core Library
//!
//! UI-agnostic object model and interactive editing engine for the
//! Easel drawing board: shapes, the z-ordered object store, tool
//! dispatch, selection, move/scroll, erase, fill, clipboard editing,
//! fonts, and board-file persistence.

pub mod board;
pub mod editor;
pub mod erase;
pub mod fill;
pub mod fonts;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod store;
pub mod tools;
pub mod transform;

pub use board::Board;
pub use editor::Editor;
pub use fonts::{FontRegistry, FontSpec};
pub use input::{Modifiers, MouseButton, PointerEvent};
pub use selection::SelectionEngine;
pub use shapes::{Color, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use storage::{FileStorage, StorageError};
pub use store::ObjectStore;
pub use tools::{DraftEngine, ToolKind, ToolSettings};
pub use transform::{ScrollEngine, Viewport};
