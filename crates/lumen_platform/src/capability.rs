//! Host capabilities
//!
//! Traits for the two things the coordination layer has to ask the host
//! for directly: the reduced-motion accessibility setting and a
//! high-resolution clock. Both are optional from the layer's point of view;
//! callers degrade to static defaults when a capability is missing.

use crate::error::{PlatformError, Result};
use std::cell::Cell;
use std::time::Instant;

/// Environment variable read by [`EnvMotionQuery`]
pub const REDUCED_MOTION_ENV: &str = "LUMEN_REDUCED_MOTION";

/// Source of the OS-level `prefers-reduced-motion` setting
pub trait MotionQuery {
    /// Whether the host currently asks for reduced motion
    fn prefers_reduced_motion(&self) -> Result<bool>;
}

/// A fixed answer, for hosts that resolve the setting up front
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticMotionQuery(pub bool);

impl MotionQuery for StaticMotionQuery {
    fn prefers_reduced_motion(&self) -> Result<bool> {
        Ok(self.0)
    }
}

/// Reads the preference from the `LUMEN_REDUCED_MOTION` environment variable
///
/// `1`, `true`, `yes` and `reduce` mean reduced; `0`, `false`, `no` and
/// `no-preference` mean full motion. Anything else is a query failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvMotionQuery;

impl MotionQuery for EnvMotionQuery {
    fn prefers_reduced_motion(&self) -> Result<bool> {
        let raw = std::env::var(REDUCED_MOTION_ENV)
            .map_err(|_| PlatformError::Unavailable(format!("{REDUCED_MOTION_ENV} is not set")))?;
        parse_motion_setting(&raw)
    }
}

fn parse_motion_setting(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "reduce" => Ok(true),
        "0" | "false" | "no" | "no-preference" => Ok(false),
        other => Err(PlatformError::QueryFailed(format!(
            "unrecognized reduced-motion value {other:?}"
        ))),
    }
}

/// High-resolution clock in milliseconds
pub trait FrameClock {
    fn now_ms(&self) -> f64;
}

/// Monotonic clock backed by [`Instant`]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for deterministic frame sequences
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward and return the new time
    pub fn advance(&self, dt_ms: f64) -> f64 {
        let next = self.now_ms.get() + dt_ms.max(0.0);
        self.now_ms.set(next);
        next
    }
}

impl FrameClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}
