//! Lumen Animation System
//!
//! Timelines, scroll-triggered reveals and reduced-motion tracking.
//!
//! # Features
//!
//! - **Timelines**: Named step sequences with independent pause, speed,
//!   repeat and yoyo state, shared as `Rc<RefCell<Timeline>>`
//! - **Timeline Registry**: Idempotent get-or-create by name, bulk
//!   pause/resume, global speed and kill
//! - **Scroll Reveals**: Enter/leave state machine per binding with toggle
//!   actions, scrubbing and staggered content reveals
//! - **Reduced Motion**: Preference tracking with synchronous fan-out,
//!   collapsed durations and a disallow-list of motion-heavy categories
//! - **Global Clock**: Lag-smoothed, scalable frame deltas

pub mod category;
pub mod clock;
pub mod easing;
pub mod error;
pub mod preference;
pub mod presets;
pub mod registry;
pub mod scroll;
pub mod timeline;
pub mod values;

pub use category::MotionCategory;
pub use clock::GlobalClock;
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use preference::{
    AnimationConfig, MotionPreferenceTracker, SimplifiedAnimation, TweenTarget, DEFAULT_DURATION,
    REDUCED_DURATION,
};
pub use presets::{ContentRevealOptions, RevealPreset};
pub use registry::{QualityLevel, SharedTimeline, TimelineRegistry};
pub use scroll::{
    BindingId, RevealAnimation, ScrollBinding, ScrollEvent, ScrollPosition, ScrollRevealRegistry,
    ScrollState, ScrollTransition, ToggleAction, ToggleActions, TriggerSpec,
};
pub use timeline::{
    Direction, Timeline, TimelineOptions, TimelineStep, COLLAPSED_DURATION_MS,
    DEFAULT_STEP_DURATION_MS,
};
pub use values::{Interpolate, MotionProps, Property};
