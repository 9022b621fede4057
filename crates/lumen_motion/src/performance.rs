//! Frame-rate sampling and complexity adaptation
//!
//! The monitor counts frames and, once per sampling window, turns the count
//! into a frame rate. Sustained low rates ask the coordinator to drop heavy
//! animation categories; sustained high rates bring them back. The band
//! between the two thresholds resets both streaks, so a rate hovering near
//! one threshold never flips quality back and forth.
//!
//! Per-frame cost is one subtraction, one comparison and one increment.

use lumen_animation::QualityLevel;
use serde::{Deserialize, Serialize};

/// Sampling and hysteresis settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Whether frames are sampled at all
    pub enabled: bool,
    /// Minimum window length (ms)
    pub sample_interval_ms: f64,
    /// Below this rate a window counts towards reducing complexity
    pub low_fps: f32,
    /// Above this rate a window counts towards restoring complexity
    pub high_fps: f32,
    /// Consecutive windows needed before quality changes
    pub sustained_windows: u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_interval_ms: 1000.0,
            low_fps: 30.0,
            high_fps: 55.0,
            sustained_windows: 2,
        }
    }
}

/// Quality change requested by the monitor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualitySignal {
    ReduceComplexity,
    RestoreComplexity,
}

/// Read-only snapshot of the latest measurements
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub frame_rate: f32,
    pub animation_count: usize,
    pub memory_usage: Option<u64>,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            animation_count: 0,
            memory_usage: None,
        }
    }
}

#[derive(Debug)]
pub struct PerformanceMonitor {
    config: PerformanceConfig,
    window_start_ms: Option<f64>,
    frames: u32,
    low_streak: u32,
    high_streak: u32,
    quality: QualityLevel,
    metrics: PerformanceMetrics,
}

impl PerformanceMonitor {
    pub fn new(config: PerformanceConfig) -> Self {
        Self {
            config,
            window_start_ms: None,
            frames: 0,
            low_streak: 0,
            high_streak: 0,
            quality: QualityLevel::Full,
            metrics: PerformanceMetrics::default(),
        }
    }

    pub fn config(&self) -> &PerformanceConfig {
        &self.config
    }

    /// Record one frame
    ///
    /// The first frame only opens a window. Returns a signal when the
    /// quality level changes.
    pub fn on_frame(&mut self, now_ms: f64) -> Option<QualitySignal> {
        if !self.config.enabled {
            return None;
        }
        let Some(start) = self.window_start_ms else {
            self.window_start_ms = Some(now_ms);
            return None;
        };

        self.frames += 1;
        let elapsed = now_ms - start;
        if elapsed < self.config.sample_interval_ms {
            return None;
        }

        let frame_rate = (f64::from(self.frames) * 1000.0 / elapsed) as f32;
        self.metrics.frame_rate = frame_rate;
        self.window_start_ms = Some(now_ms);
        self.frames = 0;

        self.evaluate(frame_rate)
    }

    fn evaluate(&mut self, frame_rate: f32) -> Option<QualitySignal> {
        if frame_rate < self.config.low_fps {
            self.low_streak += 1;
            self.high_streak = 0;
        } else if frame_rate > self.config.high_fps {
            self.high_streak += 1;
            self.low_streak = 0;
        } else {
            self.low_streak = 0;
            self.high_streak = 0;
        }

        let sustained = self.config.sustained_windows.max(1);
        match self.quality {
            QualityLevel::Full if self.low_streak >= sustained => {
                tracing::warn!(
                    "frame rate {:.1} below {} for {} windows, reducing complexity",
                    frame_rate,
                    self.config.low_fps,
                    sustained
                );
                self.quality = QualityLevel::Reduced;
                self.low_streak = 0;
                Some(QualitySignal::ReduceComplexity)
            }
            QualityLevel::Reduced if self.high_streak >= sustained => {
                tracing::info!("frame rate {:.1} recovered, restoring complexity", frame_rate);
                self.quality = QualityLevel::Full;
                self.high_streak = 0;
                Some(QualitySignal::RestoreComplexity)
            }
            _ => None,
        }
    }

    pub fn quality(&self) -> QualityLevel {
        self.quality
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        self.metrics
    }

    pub fn set_animation_count(&mut self, count: usize) {
        self.metrics.animation_count = count;
    }

    /// Record heap usage reported by the host, in bytes
    pub fn record_memory_usage(&mut self, bytes: u64) {
        self.metrics.memory_usage = Some(bytes);
    }

    /// Drop the open window, e.g. after the page was hidden
    pub fn reset_window(&mut self) {
        self.window_start_ms = None;
        self.frames = 0;
    }

    /// Forget all history and return to full quality
    pub fn reset(&mut self) {
        self.reset_window();
        self.low_streak = 0;
        self.high_streak = 0;
        self.quality = QualityLevel::Full;
        self.metrics = PerformanceMetrics::default();
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(PerformanceConfig::default())
    }
}
