//! Lumen Motion
//!
//! The coordination facade over the Lumen animation crates. A single
//! [`MotionCoordinator`] registers page components, keeps the reduced-motion
//! preference consistent across every registry, pauses on hidden pages,
//! answers keyboard shortcuts and drops heavy animations when the frame rate
//! sags.
//!
//! # Quick Start
//!
//! ```rust
//! use lumen_core::{Bounds, Document};
//! use lumen_motion::prelude::*;
//!
//! let mut doc = Document::new();
//! let card = doc.mount(Bounds::new(0.0, 200.0, 320.0, 200.0));
//!
//! let query: Box<dyn MotionQuery> = Box::new(EnvMotionQuery);
//! let mut motion = MotionCoordinator::new(CoordinatorConfig::standard(), Some(query));
//! motion.start();
//! motion
//!     .register_component(&mut doc, "feature", card, ComponentOptions::new(ComponentKind::Card))
//!     .unwrap();
//!
//! motion.handle_event(&mut doc, HostEvent::Frame { timestamp_ms: 0.0 });
//! println!("{}", motion.status().to_json().unwrap());
//! ```

pub mod component;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod performance;
pub mod shortcuts;
pub mod status;


pub use component::{ComponentHandle, ComponentKind, ComponentOptions, ComponentState};
pub use config::{ComponentConfig, CoordinatorConfig};
pub use coordinator::MotionCoordinator;
pub use error::{CoordinatorError, Result};
pub use performance::{PerformanceConfig, PerformanceMetrics, PerformanceMonitor, QualitySignal};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutConfig};
pub use status::{CoordinatorStatus, GlobalControls};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::component::{ComponentHandle, ComponentKind, ComponentOptions};
    pub use crate::config::CoordinatorConfig;
    pub use crate::coordinator::MotionCoordinator;
    pub use crate::error::{CoordinatorError, Result};
    pub use crate::status::{CoordinatorStatus, GlobalControls};

    pub use lumen_animation::{ContentRevealOptions, RevealPreset, ScrollPosition};
    pub use lumen_platform::{
        EnvMotionQuery, HostEvent, Key, KeyboardEvent, Modifiers, MotionQuery, PointerEvent,
        StaticMotionQuery, Visibility,
    };
}
