//! Coordinator configuration
//!
//! Loaded from TOML. Every section and field is optional; missing values
//! fall back to [`CoordinatorConfig::standard`].
//!
//! ```toml
//! pause_when_hidden = true
//!
//! [performance]
//! low_fps = 25.0
//!
//! [components]
//! hover_scale = 1.08
//! reveal_start = "top 90%"
//!
//! [shortcuts.toggle]
//! key = "M"
//! modifiers = { alt = true, shift = true }
//! ```

use crate::error::CoordinatorError;
use crate::performance::PerformanceConfig;
use crate::shortcuts::ShortcutConfig;
use anyhow::{Context, Result};
use lumen_animation::{RevealPreset, ScrollPosition};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// =============================================================================
// Component defaults
// =============================================================================

/// Parameters of the per-kind enhancements
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    /// Button scale while hovered
    pub hover_scale: f32,
    /// Button lift while hovered (px)
    pub hover_lift_px: f32,
    pub hover_duration_ms: f32,
    /// Largest card tilt in either axis (degrees)
    pub tilt_max_deg: f32,
    pub tilt_duration_ms: f32,
    /// Delay between successive characters of a text reveal
    pub text_stagger_ms: f32,
    pub text_duration_ms: f32,
    /// Particle field drift amplitude (px)
    pub particle_jitter_px: f32,
    /// One drift leg of a particle field
    pub particle_period_ms: f32,
    pub reveal_preset: RevealPreset,
    pub reveal_duration_ms: f32,
    pub reveal_start: ScrollPosition,
    pub reveal_end: ScrollPosition,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            hover_scale: 1.05,
            hover_lift_px: 4.0,
            hover_duration_ms: 200.0,
            tilt_max_deg: 10.0,
            tilt_duration_ms: 150.0,
            text_stagger_ms: 30.0,
            text_duration_ms: 400.0,
            particle_jitter_px: 6.0,
            particle_period_ms: 1600.0,
            reveal_preset: RevealPreset::FadeUp,
            reveal_duration_ms: 600.0,
            reveal_start: ScrollPosition::DEFAULT_START,
            reveal_end: ScrollPosition::DEFAULT_END,
        }
    }
}

// =============================================================================
// Coordinator
// =============================================================================

/// Configuration for a [`MotionCoordinator`](crate::MotionCoordinator)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Consult the OS reduced-motion setting on start
    pub respect_system_preference: bool,
    /// Pause everything while the page is hidden
    pub pause_when_hidden: bool,
    pub shortcuts: ShortcutConfig,
    pub performance: PerformanceConfig,
    pub components: ComponentConfig,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl CoordinatorConfig {
    /// Standard configuration for general use
    pub fn standard() -> Self {
        Self {
            respect_system_preference: true,
            pause_when_hidden: true,
            shortcuts: ShortcutConfig::default(),
            performance: PerformanceConfig::default(),
            components: ComponentConfig::default(),
        }
    }

    /// Lighter effects and a quicker fallback for weak devices
    pub fn low_power() -> Self {
        Self {
            performance: PerformanceConfig {
                low_fps: 40.0,
                high_fps: 58.0,
                sustained_windows: 1,
                ..PerformanceConfig::default()
            },
            components: ComponentConfig {
                tilt_max_deg: 5.0,
                particle_jitter_px: 3.0,
                text_stagger_ms: 15.0,
                ..ComponentConfig::default()
            },
            ..Self::standard()
        }
    }

    /// Deterministic configuration for tests
    ///
    /// The OS preference is ignored so results do not depend on the machine.
    pub fn testing() -> Self {
        Self {
            respect_system_preference: false,
            ..Self::standard()
        }
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        tracing::info!("loaded motion config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CoordinatorConfig =
            toml::from_str(content).context("Failed to parse motion config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize motion config")
    }

    /// Check values that would make the coordinator misbehave
    pub fn validate(&self) -> std::result::Result<(), CoordinatorError> {
        let perf = &self.performance;
        if !(perf.sample_interval_ms > 0.0) {
            return Err(CoordinatorError::Config(format!(
                "sample_interval_ms must be positive, got {}",
                perf.sample_interval_ms
            )));
        }
        if perf.low_fps >= perf.high_fps {
            return Err(CoordinatorError::Config(format!(
                "low_fps ({}) must be below high_fps ({})",
                perf.low_fps, perf.high_fps
            )));
        }
        let components = &self.components;
        if !(components.text_stagger_ms > 0.0) {
            return Err(CoordinatorError::Config(format!(
                "text_stagger_ms must be positive, got {}",
                components.text_stagger_ms
            )));
        }
        Ok(())
    }

    pub fn with_pause_when_hidden(mut self, pause: bool) -> Self {
        self.pause_when_hidden = pause;
        self
    }

    pub fn with_performance(mut self, performance: PerformanceConfig) -> Self {
        self.performance = performance;
        self
    }

    pub fn with_components(mut self, components: ComponentConfig) -> Self {
        self.components = components;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_platform::{Key, Modifiers};

    #[test]
    fn test_empty_toml_is_standard() {
        let config = CoordinatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, CoordinatorConfig::standard());
    }

    #[test]
    fn test_partial_toml_overrides_fields() {
        let config = CoordinatorConfig::from_toml_str(
            r#"
            pause_when_hidden = false

            [performance]
            low_fps = 25.0

            [components]
            hover_scale = 1.08
            reveal_preset = "scale-in"
            reveal_start = "top 90%"

            [shortcuts.toggle]
            key = "M"
            modifiers = { alt = true, shift = true }
            "#,
        )
        .unwrap();

        assert!(!config.pause_when_hidden);
        assert_eq!(config.performance.low_fps, 25.0);
        assert_eq!(config.performance.high_fps, 55.0);
        assert_eq!(config.components.hover_scale, 1.08);
        assert_eq!(config.components.reveal_preset, RevealPreset::ScaleIn);
        assert_eq!(config.components.reveal_start, ScrollPosition::new(0.0, 0.9));
        assert_eq!(config.shortcuts.toggle.key, Key::M);
        assert_eq!(config.shortcuts.toggle.modifiers, Modifiers::ALT_SHIFT);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = CoordinatorConfig::from_toml_str("[performance]\nlow_fps = 60.0").unwrap_err();
        assert!(format!("{err:#}").contains("low_fps"));

        let bad = "[components]\nreveal_start = \"nowhere\"";
        assert!(CoordinatorConfig::from_toml_str(bad).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CoordinatorConfig::low_power();
        let text = config.to_toml().unwrap();
        assert_eq!(CoordinatorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = CoordinatorConfig::load(Path::new("/nonexistent/lumen.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/lumen.toml"));
    }

    #[test]
    fn test_presets_differ_where_expected() {
        assert!(!CoordinatorConfig::testing().respect_system_preference);
        assert_eq!(CoordinatorConfig::low_power().performance.sustained_windows, 1);
        assert!(CoordinatorConfig::standard().validate().is_ok());
    }
}
