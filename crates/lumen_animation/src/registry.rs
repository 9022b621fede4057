//! Timeline registry
//!
//! Maps names to shared timelines. [`TimelineRegistry::create_or_get`] is
//! idempotent per name: a component can ask for its timeline on every
//! render and always get the same handle back, without piling up
//! duplicates. Bulk controls (pause/resume/kill, global speed, reduced
//! motion, quality) apply to every registered timeline and to timelines
//! created afterwards.
//!
//! # Example
//!
//! ```rust
//! use lumen_animation::{TimelineOptions, TimelineRegistry};
//! use std::rc::Rc;
//!
//! let mut registry = TimelineRegistry::new();
//! let a = registry.create_or_get("hero", TimelineOptions::new());
//! let b = registry.create_or_get("hero", TimelineOptions::new());
//! assert!(Rc::ptr_eq(&a, &b));
//! assert_eq!(registry.count(), 1);
//! ```

use crate::error::{AnimationError, Result};
use crate::preference::AnimationConfig;
use crate::timeline::{Timeline, TimelineOptions};
use indexmap::IndexMap;
use lumen_core::Document;
use std::cell::RefCell;
use std::rc::Rc;

/// A timeline shared between the registry and its users
pub type SharedTimeline = Rc<RefCell<Timeline>>;

/// Rendering quality selected by the performance monitor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityLevel {
    #[default]
    Full,
    /// Performance-heavy categories are suspended
    Reduced,
}

/// Registry of named timelines
#[derive(Debug)]
pub struct TimelineRegistry {
    timelines: IndexMap<String, SharedTimeline>,
    defaults: AnimationConfig,
    global_speed: f32,
    globally_paused: bool,
    reduced_motion: bool,
    quality: QualityLevel,
}

impl TimelineRegistry {
    pub fn new() -> Self {
        Self {
            timelines: IndexMap::new(),
            defaults: AnimationConfig::standard(),
            global_speed: 1.0,
            globally_paused: false,
            reduced_motion: false,
            quality: QualityLevel::Full,
        }
    }

    // =========================================================================
    // Creation & lookup
    // =========================================================================

    /// Get the timeline named `name`, creating it if needed
    ///
    /// A new timeline starts paused (unless `options.autoplay`) and takes
    /// its default duration and easing from the current animation defaults.
    /// An existing timeline is returned unchanged and `options` is ignored.
    pub fn create_or_get(&mut self, name: &str, options: TimelineOptions) -> SharedTimeline {
        if let Some(existing) = self.timelines.get(name) {
            return Rc::clone(existing);
        }

        let mut options = options;
        options.duration_ms.get_or_insert(self.defaults.duration_ms());
        options.easing.get_or_insert(self.defaults.easing);

        let mut timeline = Timeline::new(name, &options);
        timeline.set_speed_unchecked(self.global_speed);
        timeline.set_held(self.globally_paused);
        timeline.set_collapsed(self.reduced_motion);
        timeline.set_motion_suppressed(self.reduced_motion && options.category.is_motion_heavy());
        timeline.set_quality_suppressed(
            self.quality == QualityLevel::Reduced && options.category.is_performance_heavy(),
        );

        tracing::debug!(
            "created timeline {:?} (category={})",
            name,
            options.category.name()
        );
        let shared = Rc::new(RefCell::new(timeline));
        self.timelines.insert(name.to_string(), Rc::clone(&shared));
        shared
    }

    pub fn get(&self, name: &str) -> Option<SharedTimeline> {
        self.timelines.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.timelines.contains_key(name)
    }

    /// Number of live timelines
    pub fn count(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    /// Names in creation order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.timelines.keys().map(String::as_str)
    }

    /// Number of timelines currently making progress
    pub fn active_count(&self) -> usize {
        self.timelines
            .values()
            .filter(|t| t.borrow().is_active())
            .count()
    }

    // =========================================================================
    // Defaults
    // =========================================================================

    pub fn defaults(&self) -> AnimationConfig {
        self.defaults
    }

    /// Set the defaults used for timelines created from now on
    pub fn set_defaults(&mut self, defaults: AnimationConfig) {
        self.defaults = defaults;
    }

    // =========================================================================
    // Bulk controls
    // =========================================================================

    /// Hold every timeline
    pub fn pause_all(&mut self) {
        self.globally_paused = true;
        for timeline in self.timelines.values() {
            timeline.borrow_mut().set_held(true);
        }
        tracing::debug!("paused {} timelines", self.timelines.len());
    }

    /// Release the hold placed by [`pause_all`](Self::pause_all)
    ///
    /// Timelines that were paused for their own reasons before the hold stay
    /// paused. Does nothing (and returns `false`) while reduced motion is
    /// active.
    pub fn resume_all(&mut self) -> bool {
        if self.reduced_motion {
            tracing::debug!("resume_all ignored: reduced motion is active");
            return false;
        }
        self.globally_paused = false;
        for timeline in self.timelines.values() {
            timeline.borrow_mut().set_held(false);
        }
        tracing::debug!("resumed {} timelines", self.timelines.len());
        true
    }

    pub fn is_globally_paused(&self) -> bool {
        self.globally_paused
    }

    pub fn global_speed(&self) -> f32 {
        self.global_speed
    }

    /// Set the speed multiplier of every timeline
    ///
    /// Each timeline's effective duration becomes `base / multiplier`.
    pub fn set_global_speed(&mut self, multiplier: f32) -> Result<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            tracing::warn!("rejected global speed {}", multiplier);
            return Err(AnimationError::InvalidSpeed(multiplier));
        }
        self.global_speed = multiplier;
        for timeline in self.timelines.values() {
            timeline.borrow_mut().set_speed_unchecked(multiplier);
        }
        Ok(())
    }

    pub fn is_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Apply or lift reduced motion
    ///
    /// Under reduced motion every timeline collapses to a near-instant
    /// one-shot, and motion-heavy categories stop entirely. Lifting it
    /// restores both. Returns the number of timelines whose suppression
    /// changed.
    pub fn set_reduced_motion(&mut self, reduced: bool) -> usize {
        self.reduced_motion = reduced;
        self.defaults = AnimationConfig::for_preference(reduced);

        let mut changed = 0;
        for timeline in self.timelines.values() {
            let mut timeline = timeline.borrow_mut();
            let suppress = reduced && timeline.category().is_motion_heavy();
            if timeline.is_suppressed() != (suppress || self.quality_suppresses(&timeline)) {
                changed += 1;
            }
            timeline.set_collapsed(reduced);
            timeline.set_motion_suppressed(suppress);
        }
        tracing::debug!(
            "reduced motion {} ({} timelines changed)",
            if reduced { "on" } else { "off" },
            changed
        );
        changed
    }

    pub fn quality(&self) -> QualityLevel {
        self.quality
    }

    /// Suspend or restore performance-heavy categories
    ///
    /// Returns the number of timelines affected.
    pub fn set_quality(&mut self, quality: QualityLevel) -> usize {
        self.quality = quality;
        let suppress = quality == QualityLevel::Reduced;

        let mut affected = 0;
        for timeline in self.timelines.values() {
            let mut timeline = timeline.borrow_mut();
            if timeline.category().is_performance_heavy() {
                timeline.set_quality_suppressed(suppress);
                affected += 1;
            }
        }
        affected
    }

    fn quality_suppresses(&self, timeline: &Timeline) -> bool {
        self.quality == QualityLevel::Reduced && timeline.category().is_performance_heavy()
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Kill and remove a single timeline
    pub fn kill(&mut self, name: &str) -> bool {
        match self.timelines.shift_remove(name) {
            Some(timeline) => {
                timeline.borrow_mut().kill();
                true
            }
            None => {
                tracing::debug!("kill: no timeline named {:?}", name);
                false
            }
        }
    }

    /// Kill every timeline and empty the registry
    pub fn kill_all(&mut self) {
        let killed = self.timelines.len();
        for (_, timeline) in self.timelines.drain(..) {
            timeline.borrow_mut().kill();
        }
        if killed > 0 {
            tracing::debug!("killed {} timelines", killed);
        }
    }

    // =========================================================================
    // Frame progression
    // =========================================================================

    /// Advance every running timeline
    ///
    /// Returns `true` if any timeline still has somewhere to go.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let mut any_active = false;
        for timeline in self.timelines.values() {
            any_active |= timeline.borrow_mut().tick(dt_ms);
        }
        any_active
    }

    /// Write current step values into element styles
    ///
    /// A suppressed timeline writes its rest values once and is then
    /// skipped. Steps targeting detached elements are dropped by the
    /// document.
    pub fn apply(&self, doc: &mut Document) {
        for timeline in self.timelines.values() {
            let mut timeline = timeline.borrow_mut();
            if timeline.is_suppressed() {
                if timeline.mark_rested() {
                    for (target, property, value) in timeline.rest_sample() {
                        doc.set_style(target, property.css_name(), property.format(value));
                    }
                }
                continue;
            }
            timeline.clear_rested();
            for (target, property, value) in timeline.sample() {
                doc.set_style(target, property.css_name(), property.format(value));
            }
        }
    }
}

impl Default for TimelineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::MotionCategory;
    use crate::timeline::TimelineStep;
    use crate::values::Property;
    use lumen_core::Bounds;

    fn with_fade(
        registry: &mut TimelineRegistry,
        name: &str,
        options: TimelineOptions,
    ) -> SharedTimeline {
        let timeline = registry.create_or_get(name, options);
        timeline
            .borrow_mut()
            .add(TimelineStep::new(Property::Opacity, 0.0, 1.0, 1000.0));
        timeline
    }

    #[test]
    fn test_create_or_get_is_idempotent() {
        let mut registry = TimelineRegistry::new();
        let first = registry.create_or_get("hero", TimelineOptions::new());
        first
            .borrow_mut()
            .add(TimelineStep::new(Property::Opacity, 0.0, 1.0, 300.0));

        let second = registry.create_or_get(
            "hero",
            TimelineOptions::new().category(MotionCategory::Particle).autoplay(true),
        );

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(second.borrow().step_count(), 1);
        assert_eq!(second.borrow().category(), MotionCategory::Generic);
        assert!(second.borrow().is_paused());
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_new_timelines_take_current_defaults() {
        let mut registry = TimelineRegistry::new();
        let normal = registry.create_or_get("normal", TimelineOptions::new());
        assert_eq!(normal.borrow().default_duration_ms(), 600.0);

        registry.set_reduced_motion(true);
        let reduced = registry.create_or_get("reduced", TimelineOptions::new());
        assert_eq!(reduced.borrow().default_duration_ms(), 10.0);

        let explicit =
            registry.create_or_get("explicit", TimelineOptions::new().duration_ms(250.0));
        assert_eq!(explicit.borrow().default_duration_ms(), 250.0);
    }

    #[test]
    fn test_get_unknown_is_none() {
        let registry = TimelineRegistry::new();
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_pause_resume_round_trip() {
        let mut registry = TimelineRegistry::new();
        let running = with_fade(&mut registry, "running", TimelineOptions::new().autoplay(true));
        let idle = with_fade(&mut registry, "idle", TimelineOptions::new());

        registry.pause_all();
        assert!(running.borrow().is_paused());
        assert!(idle.borrow().is_paused());

        assert!(registry.resume_all());
        assert!(running.borrow().is_running());
        assert!(!idle.borrow().is_running());
    }

    #[test]
    fn test_resume_is_noop_under_reduced_motion() {
        let mut registry = TimelineRegistry::new();
        let fade = with_fade(&mut registry, "fade", TimelineOptions::new().autoplay(true));

        registry.set_reduced_motion(true);
        registry.pause_all();
        assert!(!registry.resume_all());
        assert!(fade.borrow().is_paused());
        assert!(registry.is_globally_paused());
    }

    #[test]
    fn test_timelines_created_while_paused_are_held() {
        let mut registry = TimelineRegistry::new();
        registry.pause_all();
        let late = with_fade(&mut registry, "late", TimelineOptions::new().autoplay(true));
        assert!(late.borrow().is_held());
    }

    #[test]
    fn test_global_speed_scales_durations() {
        let mut registry = TimelineRegistry::new();
        let a = with_fade(&mut registry, "a", TimelineOptions::new());
        let b = registry.create_or_get("b", TimelineOptions::new());
        b.borrow_mut()
            .add(TimelineStep::new(Property::Y, 20.0, 0.0, 400.0));

        registry.set_global_speed(4.0).unwrap();
        assert_eq!(a.borrow().effective_duration_ms(), 250.0);
        assert_eq!(b.borrow().effective_duration_ms(), 100.0);

        let late = registry.create_or_get("late", TimelineOptions::new());
        assert_eq!(late.borrow().speed_multiplier(), 4.0);
    }

    #[test]
    fn test_global_speed_rejects_non_positive() {
        let mut registry = TimelineRegistry::new();
        let a = with_fade(&mut registry, "a", TimelineOptions::new());

        for bad in [0.0, -1.0, f32::INFINITY, f32::NAN] {
            assert!(registry.set_global_speed(bad).is_err());
        }
        assert_eq!(registry.global_speed(), 1.0);
        assert_eq!(a.borrow().speed_multiplier(), 1.0);
    }

    #[test]
    fn test_reduced_motion_suppresses_heavy_categories() {
        let mut registry = TimelineRegistry::new();
        let particles = with_fade(
            &mut registry,
            "particles",
            TimelineOptions::new().category(MotionCategory::Particle).infinite().autoplay(true),
        );
        let fade = with_fade(
            &mut registry,
            "fade",
            TimelineOptions::new().category(MotionCategory::Fade).autoplay(true),
        );

        assert_eq!(registry.set_reduced_motion(true), 1);
        assert!(particles.borrow().is_suppressed());
        assert!(!fade.borrow().is_suppressed());
        assert!(fade.borrow().is_collapsed());

        registry.set_reduced_motion(false);
        assert!(particles.borrow().is_running());
        assert!(!fade.borrow().is_collapsed());
    }

    #[test]
    fn test_quality_reduction_suspends_performance_heavy() {
        let mut registry = TimelineRegistry::new();
        let particles = with_fade(
            &mut registry,
            "particles",
            TimelineOptions::new().category(MotionCategory::Particle).autoplay(true),
        );
        let tilt = with_fade(
            &mut registry,
            "tilt",
            TimelineOptions::new().category(MotionCategory::Transform3d).autoplay(true),
        );

        assert_eq!(registry.set_quality(QualityLevel::Reduced), 1);
        assert!(particles.borrow().is_suppressed());
        assert!(tilt.borrow().is_running());

        registry.set_quality(QualityLevel::Full);
        assert!(particles.borrow().is_running());
    }

    #[test]
    fn test_kill_all_empties_registry() {
        let mut registry = TimelineRegistry::new();
        let a = with_fade(&mut registry, "a", TimelineOptions::new());
        with_fade(&mut registry, "b", TimelineOptions::new());

        registry.kill_all();
        assert_eq!(registry.count(), 0);
        assert!(registry.get("a").is_none());
        assert!(a.borrow().is_killed());

        let fresh = registry.create_or_get("a", TimelineOptions::new());
        assert!(!Rc::ptr_eq(&a, &fresh));
    }

    #[test]
    fn test_kill_unknown_is_noop() {
        let mut registry = TimelineRegistry::new();
        assert!(!registry.kill("ghost"));
    }

    #[test]
    fn test_tick_and_apply_write_styles() {
        let mut doc = Document::new();
        let el = doc.mount(Bounds::default());

        let mut registry = TimelineRegistry::new();
        let timeline = registry.create_or_get("fade", TimelineOptions::new().autoplay(true));
        timeline
            .borrow_mut()
            .add(TimelineStep::new(Property::Opacity, 0.0, 1.0, 100.0).on(el));

        registry.tick(50.0);
        registry.apply(&mut doc);
        assert_eq!(doc.style(el, "opacity"), Some("0.500"));
    }

    #[test]
    fn test_suppressed_timeline_writes_rest_values_once() {
        let mut doc = Document::new();
        let el = doc.mount(Bounds::default());

        let mut registry = TimelineRegistry::new();
        let drift = registry.create_or_get(
            "drift",
            TimelineOptions::new().category(MotionCategory::Particle).autoplay(true),
        );
        drift
            .borrow_mut()
            .add(TimelineStep::new(Property::X, 0.0, 40.0, 100.0).on(el));

        registry.tick(50.0);
        registry.apply(&mut doc);
        assert_eq!(doc.style(el, "translate-x"), Some("20.00px"));

        registry.set_quality(QualityLevel::Reduced);
        registry.apply(&mut doc);
        assert_eq!(doc.style(el, "translate-x"), Some("0.00px"));

        doc.set_style(el, "translate-x", "7.00px".to_string());
        registry.apply(&mut doc);
        assert_eq!(doc.style(el, "translate-x"), Some("7.00px"));
    }
}
