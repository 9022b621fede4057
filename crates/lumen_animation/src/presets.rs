//! Named reveal shapes
//!
//! The five entrance animations offered by
//! [`create_content_reveal`].
//!
//! [`create_content_reveal`]: crate::ScrollRevealRegistry::create_content_reveal

use crate::easing::Easing;
use crate::error::AnimationError;
use crate::scroll::{RevealAnimation, ScrollPosition};
use crate::timeline::DEFAULT_STEP_DURATION_MS;
use crate::values::MotionProps;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Distance (px) slide and fade-up presets travel
pub const REVEAL_DISTANCE: f32 = 40.0;

/// Default per-element delay for content reveals
pub const DEFAULT_STAGGER_MS: f32 = 100.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealPreset {
    #[default]
    FadeUp,
    FadeIn,
    SlideLeft,
    SlideRight,
    ScaleIn,
}

impl RevealPreset {
    pub const ALL: [RevealPreset; 5] = [
        RevealPreset::FadeUp,
        RevealPreset::FadeIn,
        RevealPreset::SlideLeft,
        RevealPreset::SlideRight,
        RevealPreset::ScaleIn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RevealPreset::FadeUp => "fade-up",
            RevealPreset::FadeIn => "fade-in",
            RevealPreset::SlideLeft => "slide-left",
            RevealPreset::SlideRight => "slide-right",
            RevealPreset::ScaleIn => "scale-in",
        }
    }

    /// Hidden state the element starts from
    pub fn from_props(&self) -> MotionProps {
        let hidden = MotionProps::new().opacity(0.0);
        match self {
            RevealPreset::FadeUp => hidden.y(REVEAL_DISTANCE),
            RevealPreset::FadeIn => hidden,
            // Slides in from the left edge
            RevealPreset::SlideLeft => hidden.x(-REVEAL_DISTANCE),
            RevealPreset::SlideRight => hidden.x(REVEAL_DISTANCE),
            RevealPreset::ScaleIn => hidden.scale(0.8),
        }
    }

    /// Resting state the element ends in
    pub fn to_props(&self) -> MotionProps {
        let shown = MotionProps::new().opacity(1.0);
        match self {
            RevealPreset::FadeUp => shown.y(0.0),
            RevealPreset::FadeIn => shown,
            RevealPreset::SlideLeft | RevealPreset::SlideRight => shown.x(0.0),
            RevealPreset::ScaleIn => shown.scale(1.0),
        }
    }

    pub fn animation(&self) -> RevealAnimation {
        RevealAnimation::new(self.from_props(), self.to_props())
    }
}

impl FromStr for RevealPreset {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == normalized)
            .ok_or_else(|| AnimationError::UnknownKind(s.to_string()))
    }
}

/// Options for a staggered content reveal
#[derive(Clone, Debug, PartialEq)]
pub struct ContentRevealOptions {
    pub preset: RevealPreset,
    /// Delay between successive elements (ms)
    pub stagger_ms: f32,
    pub start: ScrollPosition,
    pub end: ScrollPosition,
    pub duration_ms: f32,
    pub easing: Easing,
}

impl ContentRevealOptions {
    pub fn new(preset: RevealPreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    pub fn stagger_ms(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn start(mut self, start: ScrollPosition) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: ScrollPosition) -> Self {
        self.end = end;
        self
    }

    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for ContentRevealOptions {
    fn default() -> Self {
        Self {
            preset: RevealPreset::FadeUp,
            stagger_ms: DEFAULT_STAGGER_MS,
            start: ScrollPosition::DEFAULT_START,
            end: ScrollPosition::DEFAULT_END,
            duration_ms: DEFAULT_STEP_DURATION_MS,
            easing: Easing::Power2Out,
        }
    }
}
