//! Motion categories
//!
//! Every timeline belongs to a category. Categories decide what happens to
//! a timeline when reduced motion is turned on (motion-heavy kinds are
//! disabled) and when the frame rate drops (performance-heavy kinds are
//! suspended).

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionCategory {
    #[default]
    Generic,
    Fade,
    Slide,
    Reveal,
    Hover,
    Parallax,
    Particle,
    Continuous,
    Infinite,
    Bounce,
    Elastic,
    Shake,
    Pulse,
    Rotate,
    Scale,
    #[serde(rename = "transform3d")]
    Transform3d,
}

impl MotionCategory {
    /// Kinds that must not animate while reduced motion is active
    pub const MOTION_HEAVY: [MotionCategory; 11] = [
        MotionCategory::Parallax,
        MotionCategory::Particle,
        MotionCategory::Continuous,
        MotionCategory::Infinite,
        MotionCategory::Bounce,
        MotionCategory::Elastic,
        MotionCategory::Shake,
        MotionCategory::Pulse,
        MotionCategory::Rotate,
        MotionCategory::Scale,
        MotionCategory::Transform3d,
    ];

    /// Parse a kind name such as `"particle"` or `"transform3d"`
    ///
    /// Matching is case-insensitive and ignores `-`/`_` separators.
    pub fn parse(kind: &str) -> Option<Self> {
        let normalized: String = kind
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let category = match normalized.as_str() {
            "generic" => MotionCategory::Generic,
            "fade" => MotionCategory::Fade,
            "slide" => MotionCategory::Slide,
            "reveal" => MotionCategory::Reveal,
            "hover" => MotionCategory::Hover,
            "parallax" => MotionCategory::Parallax,
            "particle" | "particles" => MotionCategory::Particle,
            "continuous" => MotionCategory::Continuous,
            "infinite" => MotionCategory::Infinite,
            "bounce" => MotionCategory::Bounce,
            "elastic" => MotionCategory::Elastic,
            "shake" => MotionCategory::Shake,
            "pulse" => MotionCategory::Pulse,
            "rotate" => MotionCategory::Rotate,
            "scale" => MotionCategory::Scale,
            "transform3d" | "3d" => MotionCategory::Transform3d,
            _ => return None,
        };
        Some(category)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MotionCategory::Generic => "generic",
            MotionCategory::Fade => "fade",
            MotionCategory::Slide => "slide",
            MotionCategory::Reveal => "reveal",
            MotionCategory::Hover => "hover",
            MotionCategory::Parallax => "parallax",
            MotionCategory::Particle => "particle",
            MotionCategory::Continuous => "continuous",
            MotionCategory::Infinite => "infinite",
            MotionCategory::Bounce => "bounce",
            MotionCategory::Elastic => "elastic",
            MotionCategory::Shake => "shake",
            MotionCategory::Pulse => "pulse",
            MotionCategory::Rotate => "rotate",
            MotionCategory::Scale => "scale",
            MotionCategory::Transform3d => "transform3d",
        }
    }

    /// Disabled while reduced motion is active
    pub fn is_motion_heavy(&self) -> bool {
        Self::MOTION_HEAVY.contains(self)
    }

    /// Suspended while complexity is reduced for frame rate
    pub fn is_performance_heavy(&self) -> bool {
        matches!(
            self,
            MotionCategory::Particle
                | MotionCategory::Continuous
                | MotionCategory::Infinite
                | MotionCategory::Parallax
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for category in MotionCategory::MOTION_HEAVY {
            assert_eq!(MotionCategory::parse(category.name()), Some(category));
        }
        assert_eq!(MotionCategory::parse("Transform-3D"), Some(MotionCategory::Transform3d));
        assert_eq!(MotionCategory::parse("confetti"), None);
    }

    #[test]
    fn test_heavy_sets() {
        assert!(MotionCategory::Particle.is_motion_heavy());
        assert!(MotionCategory::Particle.is_performance_heavy());
        assert!(MotionCategory::Scale.is_motion_heavy());
        assert!(!MotionCategory::Scale.is_performance_heavy());
        assert!(!MotionCategory::Fade.is_motion_heavy());
        assert!(!MotionCategory::Hover.is_motion_heavy());
    }
}
