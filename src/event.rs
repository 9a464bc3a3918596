//! Input events delivered to the dispatcher.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

/// Keyboard keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// A printable character, lowercase for letters.
    Char(char),
    /// Escape.
    Escape,
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Function key F1..F24.
    F(u8),
}

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Either control key.
    pub ctrl: bool,
    /// Either shift key.
    pub shift: bool,
    /// Either alt key.
    pub alt: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Only control held.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// A key combined with the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shortcut {
    /// The key.
    pub key: Key,
    /// Required modifiers; extra held modifiers do not match.
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl Shortcut {
    /// Create a shortcut.
    #[must_use]
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// True when `key` pressed with `modifiers` triggers this shortcut.
    #[must_use]
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key == key && self.modifiers == modifiers
    }
}

/// An input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A mouse button was pressed.
    MouseDown {
        /// Which button.
        button: MouseButton,
        /// Pointer position in root surface coordinates.
        at: Point,
    },
    /// A mouse button was released.
    MouseUp {
        /// Which button.
        button: MouseButton,
        /// Pointer position in root surface coordinates.
        at: Point,
    },
    /// The pointer moved.
    MouseMove {
        /// New pointer position in root surface coordinates.
        at: Point,
    },
    /// A key was pressed.
    KeyDown {
        /// Which key.
        key: Key,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// A key was released.
    KeyUp {
        /// Which key.
        key: Key,
        /// Modifiers held.
        modifiers: Modifiers,
    },
}

impl Event {
    /// Pointer position for mouse events, `None` for keyboard events.
    #[must_use]
    pub const fn pointer(&self) -> Option<Point> {
        match self {
            Self::MouseDown { at, .. } | Self::MouseUp { at, .. } | Self::MouseMove { at } => {
                Some(*at)
            }
            Self::KeyDown { .. } | Self::KeyUp { .. } => None,
        }
    }

    /// Mouse button for press and release events.
    #[must_use]
    pub const fn button(&self) -> Option<MouseButton> {
        match self {
            Self::MouseDown { button, .. } | Self::MouseUp { button, .. } => Some(*button),
            _ => None,
        }
    }

    /// True for a press of the left mouse button.
    #[must_use]
    pub fn is_left_press(&self) -> bool {
        matches!(
            self,
            Self::MouseDown {
                button: MouseButton::Left,
                ..
            }
        )
    }

    /// True for a release of the left mouse button.
    #[must_use]
    pub fn is_left_release(&self) -> bool {
        matches!(
            self,
            Self::MouseUp {
                button: MouseButton::Left,
                ..
            }
        )
    }
}
