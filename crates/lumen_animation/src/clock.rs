//! Shared frame clock
//!
//! Converts host frame timestamps into scaled frame deltas. Everything that
//! is not a registry timeline (scroll-reveal tweens, the performance
//! monitor's caller) reads its delta from here, so a single time scale
//! speeds up or slows down all of it together.

use crate::error::{AnimationError, Result};

/// Largest delta accepted from one frame to the next
///
/// A tab returning from the background reports one huge gap; clamping it
/// keeps tweens from jumping straight to their end.
pub const LAG_THRESHOLD_MS: f64 = 100.0;

/// Delta substituted for a frame that exceeded the lag threshold
pub const LAG_ADJUSTED_MS: f64 = 1000.0 / 60.0;

#[derive(Clone, Debug)]
pub struct GlobalClock {
    time_scale: f32,
    last_timestamp_ms: Option<f64>,
    /// Unscaled delta of the most recent frame
    last_raw_ms: f32,
    /// Scaled time accumulated since the clock started
    elapsed_ms: f64,
    frames: u64,
}

impl GlobalClock {
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            last_timestamp_ms: None,
            last_raw_ms: 0.0,
            elapsed_ms: 0.0,
            frames: 0,
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the scale applied to every delta
    pub fn set_time_scale(&mut self, scale: f32) -> Result<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(AnimationError::InvalidSpeed(scale));
        }
        self.time_scale = scale;
        Ok(())
    }

    /// Feed a host frame timestamp, returning the scaled delta in ms
    ///
    /// The first frame after construction or [`reset`](Self::reset) yields
    /// zero. Timestamps that go backwards also yield zero.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> f32 {
        let raw = match self.last_timestamp_ms.replace(timestamp_ms) {
            Some(last) => (timestamp_ms - last).max(0.0),
            None => 0.0,
        };
        let smoothed = if raw > LAG_THRESHOLD_MS {
            tracing::debug!("frame gap of {:.1}ms smoothed", raw);
            LAG_ADJUSTED_MS
        } else {
            raw
        };

        self.last_raw_ms = smoothed as f32;
        let scaled = smoothed * f64::from(self.time_scale);
        self.elapsed_ms += scaled;
        self.frames += 1;
        scaled as f32
    }

    /// Lag-smoothed delta of the last frame before scaling
    pub fn raw_delta_ms(&self) -> f32 {
        self.last_raw_ms
    }

    /// Scale an externally measured delta
    pub fn scale(&self, dt_ms: f32) -> f32 {
        dt_ms * self.time_scale
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Forget the last timestamp so the next frame starts fresh
    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }
}

impl Default for GlobalClock {
    fn default() -> Self {
        Self::new()
    }
}
