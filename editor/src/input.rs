//! Input model: mouse buttons, modifier keys, selection session, and the
//! gesture state machine.
//!
//! `Session` holds the one element that may be selected across the whole
//! document; holding it as a single `Option` makes exclusive selection a
//! property of the type rather than a convention. `InputState` is the
//! active gesture tracked between pointer-down and pointer-up, carrying the
//! pointer position and geometry captured at gesture start so every move
//! sample is computed from the same origin.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ElementRef;
use crate::geometry::{Geometry, Point, ResizeHandle};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Editing-session state visible to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    /// The single selected element, if any.
    pub active: Option<ElementRef>,
}

impl Session {
    #[must_use]
    pub fn is_selected(&self, element: &ElementRef) -> bool {
        self.active.as_ref() == Some(element)
    }
}

/// Gesture state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an element.
    Dragging {
        target: ElementRef,
        /// Pointer position at pointer-down.
        start: Point,
        /// Element geometry at pointer-down.
        orig: Geometry,
    },
    /// The user is resizing an element by one of its handles.
    Resizing {
        target: ElementRef,
        handle: ResizeHandle,
        /// Pointer position at pointer-down.
        start: Point,
        /// Element geometry at pointer-down.
        orig: Geometry,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The element being manipulated, if a gesture is active.
    #[must_use]
    pub fn target(&self) -> Option<ElementRef> {
        match self {
            Self::Idle => None,
            Self::Dragging { target, .. } | Self::Resizing { target, .. } => Some(*target),
        }
    }
}
