//! Lumen Core
//!
//! Host-independent primitives shared by the Lumen motion crates:
//!
//! - **Element Tree**: A DOM-like [`Document`] of mountable elements with
//!   bounds, text content, inline style and scroll state
//! - **Style Hooks**: Root custom properties read by passive consumers
//! - **Observers**: Callback lists that tolerate (un)subscription while
//!   notifying
//!
//! # Example
//!
//! ```rust
//! use lumen_core::{Bounds, Document};
//!
//! let mut doc = Document::new();
//! let hero = doc.mount(Bounds::new(0.0, 900.0, 1280.0, 400.0));
//! assert!(doc.is_attached(hero));
//!
//! doc.unmount(hero);
//! assert!(!doc.is_attached(hero));
//! ```

pub mod element;
pub mod observer;
pub mod style;

pub use element::{Bounds, Document, ElementId, Viewport};
pub use observer::{Subscribers, SubscriptionId};
pub use style::StyleHooks;
