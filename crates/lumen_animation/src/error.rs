//! Error types for lumen_animation
//!
//! None of these are fatal. Every operation that can fail leaves the
//! registries untouched and reports why, so callers can tell "did nothing"
//! apart from "succeeded" without anything reaching the host page.

use lumen_core::ElementId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Speed multipliers must be finite and positive
    #[error("Invalid speed multiplier {0}: must be finite and greater than zero")]
    InvalidSpeed(f32),

    /// The element is not (or no longer) mounted
    #[error("Target element {0:?} is not attached to the document")]
    TargetDetached(ElementId),

    /// A binding was requested with an empty target list
    #[error("Binding {0:?} has no target elements")]
    NoTargets(String),

    /// Stagger offsets must be strictly increasing
    #[error("Invalid stagger {0}ms: must be finite and greater than zero")]
    InvalidStagger(f32),

    /// A scroll position descriptor could not be parsed
    #[error("Invalid scroll position {0:?}")]
    InvalidPosition(String),

    /// A toggle-action descriptor could not be parsed
    #[error("Invalid toggle actions {0:?}")]
    InvalidToggleActions(String),

    /// An animation kind or preset name is not recognized
    #[error("Unknown animation kind {0:?}")]
    UnknownKind(String),
}

/// Result type for lumen_animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
