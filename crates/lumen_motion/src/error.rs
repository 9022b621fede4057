//! Error types for lumen_motion

use lumen_animation::AnimationError;
use lumen_core::ElementId;
use thiserror::Error;

/// Errors returned by the motion coordinator
///
/// All of them mean "nothing happened". The host page keeps working.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinatorError {
    /// The component's target is not attached to the document
    #[error("Target element {0:?} is not attached to the document")]
    TargetDetached(ElementId),

    /// The coordinator has not been started, or was destroyed
    #[error("Motion coordinator is not initialized")]
    NotInitialized,

    /// An animation registry rejected the request
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<anyhow::Error> for CoordinatorError {
    fn from(err: anyhow::Error) -> Self {
        CoordinatorError::Config(format!("{err:#}"))
    }
}

/// Result type for lumen_motion operations
pub type Result<T> = std::result::Result<T, CoordinatorError>;
