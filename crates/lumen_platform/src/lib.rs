//! Lumen Platform Abstraction Layer
//!
//! This crate provides the host-facing types the coordination layer
//! consumes: the [`HostEvent`] stream, pointer and keyboard input, and the
//! capability traits for the reduced-motion setting and the frame clock.
//!
//! # Example
//!
//! ```rust
//! use lumen_platform::prelude::*;
//!
//! let query = StaticMotionQuery(false);
//! assert_eq!(query.prefers_reduced_motion(), Ok(false));
//!
//! let event = HostEvent::Visibility(Visibility::Hidden);
//! assert!(matches!(event, HostEvent::Visibility(v) if v.is_hidden()));
//! ```

mod capability;
mod error;
mod event;
mod input;

pub use capability::{
    EnvMotionQuery, FrameClock, ManualClock, MotionQuery, StaticMotionQuery, SystemClock,
    REDUCED_MOTION_ENV,
};
pub use error::{PlatformError, Result};
pub use event::{HostEvent, Visibility};
pub use input::{Key, KeyState, KeyboardEvent, Modifiers, PointerEvent};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::capability::{
        EnvMotionQuery, FrameClock, ManualClock, MotionQuery, StaticMotionQuery, SystemClock,
    };
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{HostEvent, Visibility};
    pub use crate::input::{Key, KeyState, KeyboardEvent, Modifiers, PointerEvent};
}
