//! Host events
//!
//! The host environment forwards everything the coordination layer reacts
//! to as a [`HostEvent`]. Nothing is registered with the host implicitly;
//! whoever owns the event loop decides which events to forward.

use crate::input::{KeyboardEvent, PointerEvent};
use lumen_core::Viewport;

/// Events delivered by the host environment
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Frame tick - time to advance animations
    ///
    /// `timestamp_ms` comes from the host's high-resolution clock and must be
    /// monotonic.
    Frame { timestamp_ms: f64 },
    /// The page scrolled to a new vertical offset
    Scroll { scroll_y: f32 },
    /// The viewport changed size
    Resize { viewport: Viewport },
    /// The page was hidden or shown
    Visibility(Visibility),
    /// The OS-level reduced-motion preference changed
    MotionPreference { reduced: bool },
    /// Pointer event targeted at an element
    Pointer(PointerEvent),
    /// Keyboard event
    Keyboard(KeyboardEvent),
}

/// Page visibility
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Visibility::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_default() {
        assert_eq!(Visibility::default(), Visibility::Visible);
        assert!(Visibility::Hidden.is_hidden());
    }
}
