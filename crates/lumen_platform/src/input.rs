//! Input event types for pointer and keyboard
//!
//! Pointer events are already targeted: the host resolves which element the
//! pointer is over before forwarding the event.

use lumen_core::ElementId;
use serde::{Deserialize, Serialize};

// ============================================================================
// Pointer Events
// ============================================================================

/// Pointer events addressed to a mounted element
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the element's bounds
    Entered { target: ElementId },
    /// Pointer left the element's bounds
    Left { target: ElementId },
    /// Pointer moved within the element, in document coordinates
    Moved { target: ElementId, x: f32, y: f32 },
}

impl PointerEvent {
    pub fn target(&self) -> ElementId {
        match self {
            PointerEvent::Entered { target }
            | PointerEvent::Left { target }
            | PointerEvent::Moved { target, .. } => *target,
        }
    }
}

// ============================================================================
// Keyboard Events
// ============================================================================

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed or released
    pub key: Key,
    /// Whether the key was pressed or released
    pub state: KeyState,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// A key press with the given modifiers
    pub fn pressed(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
            modifiers,
        }
    }
}

/// Key press/release state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Option on macOS
    pub alt: bool,
    /// Command on macOS, Windows key on Windows
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const ALT_SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: true,
        meta: false,
    };

    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Key codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Space,
    Enter,
    Escape,
    Tab,
    Unknown,
}
