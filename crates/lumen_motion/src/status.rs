//! Status snapshot
//!
//! [`CoordinatorStatus`] is a copy of the coordinator's state at the moment
//! it was taken. Field names serialize in camelCase for hosts that forward
//! the snapshot to a web inspector.

use crate::performance::PerformanceMetrics;
use lumen_animation::QualityLevel;
use serde::Serialize;

/// The global switches, mutated only through coordinator setters
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalControls {
    pub paused: bool,
    pub speed: f32,
    pub reduced_motion: bool,
}

impl Default for GlobalControls {
    fn default() -> Self {
        Self {
            paused: false,
            speed: 1.0,
            reduced_motion: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorStatus {
    pub is_initialized: bool,
    pub component_count: usize,
    pub timeline_count: usize,
    pub scroll_binding_count: usize,
    pub quality: QualityLevel,
    pub global_controls: GlobalControls,
    pub performance_metrics: PerformanceMetrics,
}

impl CoordinatorStatus {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
