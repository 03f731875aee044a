//! Pointer event types fed to the board by the host shell.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// A pointer event in board coordinates.
///
/// The host translates its native mouse events into these before
/// handing them to [`crate::board::Board::handle_pointer`]. Move
/// events are delivered whether or not a button is held; the board
/// tracks press state itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
}

impl PointerEvent {
    /// The position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. } => position,
        }
    }

    /// Convenience constructor for an unmodified left-button press.
    pub fn left_down(position: Point) -> Self {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        }
    }

    /// Convenience constructor for a left-button release.
    pub fn left_up(position: Point) -> Self {
        PointerEvent::Up {
            position,
            button: MouseButton::Left,
        }
    }
}
