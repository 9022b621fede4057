//! Timelines
//!
//! A [`Timeline`] is a named, ordered sequence of [`TimelineStep`]s, each
//! tweening one property of one element between two values. Timelines are
//! advanced by [`Timeline::tick`] with a frame delta; pausing is a flag, so a
//! paused timeline simply does not advance.
//!
//! A timeline can be held back for four independent reasons, and only runs
//! when none applies:
//!
//! - explicitly paused (`pause()` / a fresh timeline without autoplay)
//! - held by a registry-wide `pause_all()`
//! - suppressed because its category is disabled under reduced motion
//! - suppressed because complexity was reduced for frame rate
//!
//! Keeping the reasons apart is what lets `resume_all()` restore exactly the
//! timelines that were running before `pause_all()`.

use crate::category::MotionCategory;
use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::values::{Interpolate, Property};
use lumen_core::ElementId;
use smallvec::SmallVec;

/// Duration a timeline collapses to while reduced motion is active
pub const COLLAPSED_DURATION_MS: f32 = 10.0;

/// Default step duration when nothing else is configured
pub const DEFAULT_STEP_DURATION_MS: f32 = 600.0;

/// One property tween inside a timeline
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStep {
    /// Element the value is written to (`None` for value-only steps)
    pub target: Option<ElementId>,
    pub property: Property,
    /// Start time relative to the timeline start
    pub offset_ms: f32,
    pub duration_ms: f32,
    pub from: f32,
    pub to: f32,
    pub easing: Easing,
}

impl TimelineStep {
    pub fn new(property: Property, from: f32, to: f32, duration_ms: f32) -> Self {
        Self {
            target: None,
            property,
            offset_ms: 0.0,
            duration_ms: duration_ms.max(0.0),
            from,
            to,
            easing: Easing::Linear,
        }
    }

    pub fn on(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn at(mut self, offset_ms: f32) -> Self {
        self.offset_ms = offset_ms.max(0.0);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn end_ms(&self) -> f32 {
        self.offset_ms + self.duration_ms
    }

    /// Value of this step at a timeline-local time
    pub fn value_at(&self, time_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return if time_ms >= self.offset_ms {
                self.to
            } else {
                self.from
            };
        }
        let t = ((time_ms - self.offset_ms) / self.duration_ms).clamp(0.0, 1.0);
        Interpolate::lerp(&self.from, &self.to, self.easing.apply(t))
    }
}

/// Playback direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// Options for creating a timeline
///
/// Unset duration/easing fall back to the registry's current defaults,
/// which follow the reduced-motion preference.
#[derive(Clone, Debug, Default)]
pub struct TimelineOptions {
    pub category: MotionCategory,
    pub duration_ms: Option<f32>,
    pub easing: Option<Easing>,
    /// Extra iterations after the first (-1 for infinite)
    pub repeat: i32,
    /// Alternate direction on each iteration
    pub yoyo: bool,
    /// Start playing immediately instead of paused
    pub autoplay: bool,
}

impl TimelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: MotionCategory) -> Self {
        self.category = category;
        self
    }

    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn repeat(mut self, repeat: i32) -> Self {
        self.repeat = repeat;
        self
    }

    /// Repeat forever
    pub fn infinite(mut self) -> Self {
        self.repeat = -1;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }
}

/// A named sequence of animation steps with its own playback state
#[derive(Clone, Debug)]
pub struct Timeline {
    name: String,
    category: MotionCategory,
    steps: SmallVec<[TimelineStep; 4]>,
    default_duration_ms: f32,
    default_easing: Easing,
    time_ms: f32,
    direction: Direction,
    repeat: i32,
    yoyo: bool,
    iteration: i32,
    speed: f32,
    paused: bool,
    held: bool,
    motion_suppressed: bool,
    quality_suppressed: bool,
    collapsed: bool,
    killed: bool,
    /// Rest values were written after the last suppression
    rested: bool,
}

impl Timeline {
    pub fn new(name: impl Into<String>, options: &TimelineOptions) -> Self {
        Self {
            name: name.into(),
            category: options.category,
            steps: SmallVec::new(),
            default_duration_ms: options
                .duration_ms
                .unwrap_or(DEFAULT_STEP_DURATION_MS)
                .max(0.0),
            default_easing: options.easing.unwrap_or(Easing::Power2Out),
            time_ms: 0.0,
            direction: Direction::Forward,
            repeat: options.repeat,
            yoyo: options.yoyo,
            iteration: 0,
            speed: 1.0,
            paused: !options.autoplay,
            held: false,
            motion_suppressed: false,
            quality_suppressed: false,
            collapsed: false,
            killed: false,
            rested: false,
        }
    }

    // =========================================================================
    // Steps
    // =========================================================================

    /// Add a step, returning its index
    pub fn add(&mut self, step: TimelineStep) -> usize {
        self.steps.push(step);
        self.steps.len() - 1
    }

    /// Append a step after the current end using the default duration and easing
    pub fn then(
        &mut self,
        target: Option<ElementId>,
        property: Property,
        from: f32,
        to: f32,
    ) -> usize {
        let mut step = TimelineStep::new(property, from, to, self.default_duration_ms)
            .at(self.duration_ms())
            .easing(self.default_easing);
        step.target = target;
        self.add(step)
    }

    pub fn steps(&self) -> &[TimelineStep] {
        &self.steps
    }

    pub fn step_mut(&mut self, index: usize) -> Option<&mut TimelineStep> {
        self.steps.get_mut(index)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn clear_steps(&mut self) {
        self.steps.clear();
        self.time_ms = 0.0;
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> MotionCategory {
        self.category
    }

    pub fn default_duration_ms(&self) -> f32 {
        self.default_duration_ms
    }

    pub fn default_easing(&self) -> Easing {
        self.default_easing
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn iteration(&self) -> i32 {
        self.iteration
    }

    pub fn time_ms(&self) -> f32 {
        self.time_ms
    }

    /// Length of one iteration at normal speed
    pub fn duration_ms(&self) -> f32 {
        self.steps.iter().map(TimelineStep::end_ms).fold(0.0, f32::max)
    }

    /// Wall-clock length of one iteration after speed scaling
    ///
    /// Collapsed timelines take at most [`COLLAPSED_DURATION_MS`].
    pub fn effective_duration_ms(&self) -> f32 {
        let base = self.duration_ms();
        if self.collapsed {
            base.min(COLLAPSED_DURATION_MS)
        } else {
            base / self.speed
        }
    }

    /// Position within the current iteration (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let duration = self.duration_ms();
        if duration <= 0.0 {
            return 0.0;
        }
        (self.time_ms / duration).clamp(0.0, 1.0)
    }

    /// Whether the timeline is held back for any reason
    pub fn is_paused(&self) -> bool {
        self.paused || self.held || self.motion_suppressed || self.quality_suppressed
    }

    pub fn is_paused_explicitly(&self) -> bool {
        self.paused
    }

    /// Held by a registry-wide pause
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Disabled by reduced motion or complexity reduction
    pub fn is_suppressed(&self) -> bool {
        self.motion_suppressed || self.quality_suppressed
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// Not paused and not killed (it may still be parked at an end)
    pub fn is_running(&self) -> bool {
        !self.killed && !self.is_paused()
    }

    /// Running and not yet at the end it is heading towards
    pub fn is_active(&self) -> bool {
        if !self.is_running() {
            return false;
        }
        let duration = self.duration_ms();
        if duration <= 0.0 {
            return false;
        }
        match self.direction {
            Direction::Forward => self.time_ms < duration || self.can_repeat(),
            Direction::Reverse => self.time_ms > 0.0 || (self.yoyo && self.can_repeat()),
        }
    }

    fn can_repeat(&self) -> bool {
        !self.collapsed && (self.repeat < 0 || self.iteration < self.repeat)
    }

    // =========================================================================
    // Control
    // =========================================================================

    /// Play forward from the current position
    pub fn play(&mut self) {
        self.direction = Direction::Forward;
        self.paused = false;
    }

    /// Play backward from the current position
    pub fn reverse(&mut self) {
        self.direction = Direction::Reverse;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue in the current direction
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Jump to the start and play forward
    pub fn restart(&mut self) {
        self.time_ms = 0.0;
        self.iteration = 0;
        self.direction = Direction::Forward;
        self.paused = false;
    }

    /// Jump to a time within the current iteration
    pub fn seek(&mut self, time_ms: f32) {
        self.time_ms = time_ms.clamp(0.0, self.duration_ms());
    }

    /// Jump to a fraction (0.0 to 1.0) of the current iteration
    pub fn seek_progress(&mut self, progress: f32) {
        self.seek(progress.clamp(0.0, 1.0) * self.duration_ms());
    }

    /// Set this timeline's speed multiplier
    pub fn set_speed_multiplier(&mut self, multiplier: f32) -> Result<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(AnimationError::InvalidSpeed(multiplier));
        }
        self.speed = multiplier;
        Ok(())
    }

    /// Set the speed without validation (the caller already checked it)
    pub(crate) fn set_speed_unchecked(&mut self, multiplier: f32) {
        self.speed = multiplier;
    }

    pub(crate) fn set_held(&mut self, held: bool) {
        self.held = held;
    }

    pub(crate) fn set_motion_suppressed(&mut self, suppressed: bool) {
        self.motion_suppressed = suppressed;
    }

    pub(crate) fn set_quality_suppressed(&mut self, suppressed: bool) {
        self.quality_suppressed = suppressed;
    }

    pub(crate) fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Returns `true` the first time it is called after a suppression began
    pub(crate) fn mark_rested(&mut self) -> bool {
        !std::mem::replace(&mut self.rested, true)
    }

    pub(crate) fn clear_rested(&mut self) {
        self.rested = false;
    }

    pub(crate) fn kill(&mut self) {
        self.killed = true;
        self.paused = true;
    }

    // =========================================================================
    // Frame progression
    // =========================================================================

    /// Advance by a frame delta
    ///
    /// Returns `true` while the timeline still has somewhere to go.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.is_running() || dt_ms <= 0.0 {
            return self.is_active();
        }
        let duration = self.duration_ms();
        if duration <= 0.0 {
            return false;
        }

        let rate = if self.collapsed {
            duration / duration.min(COLLAPSED_DURATION_MS)
        } else {
            self.speed
        };
        let delta = dt_ms * rate;

        match self.direction {
            Direction::Forward => {
                self.time_ms += delta;
                if self.time_ms >= duration {
                    if self.can_repeat() {
                        self.iteration += 1;
                        let overshoot = (self.time_ms - duration) % duration;
                        if self.yoyo {
                            self.direction = Direction::Reverse;
                            self.time_ms = duration - overshoot;
                        } else {
                            self.time_ms = overshoot;
                        }
                    } else {
                        self.time_ms = duration;
                    }
                }
            }
            Direction::Reverse => {
                self.time_ms -= delta;
                if self.time_ms <= 0.0 {
                    if self.yoyo && self.can_repeat() {
                        self.iteration += 1;
                        self.direction = Direction::Forward;
                        self.time_ms = (-self.time_ms) % duration;
                    } else {
                        self.time_ms = 0.0;
                    }
                }
            }
        }

        self.is_active()
    }

    /// Current value of a step
    pub fn value(&self, index: usize) -> Option<f32> {
        self.steps.get(index).map(|s| s.value_at(self.time_ms))
    }

    /// Current values for every targeted step that has started
    ///
    /// Steps at offset zero always contribute so their from-state is
    /// rendered before the timeline first plays. A collapsed timeline only
    /// fades: every property other than opacity stays at its rest value.
    pub fn sample(&self) -> impl Iterator<Item = (ElementId, Property, f32)> + '_ {
        self.steps.iter().filter_map(move |step| {
            let started = step.offset_ms <= 0.0 || self.time_ms >= step.offset_ms;
            match step.target {
                Some(target) if started => {
                    let value = if self.collapsed && step.property != Property::Opacity {
                        step.property.rest_value()
                    } else {
                        step.value_at(self.time_ms)
                    };
                    Some((target, step.property, value))
                }
                _ => None,
            }
        })
    }

    /// Rest value of every targeted step
    pub fn rest_sample(&self) -> impl Iterator<Item = (ElementId, Property, f32)> + '_ {
        self.steps
            .iter()
            .filter_map(|step| step.target.map(|t| (t, step.property, step.property.rest_value())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade_timeline(options: TimelineOptions) -> Timeline {
        let mut timeline = Timeline::new("fade", &options);
        timeline.add(TimelineStep::new(Property::Opacity, 0.0, 1.0, 1000.0));
        timeline
    }

    #[test]
    fn test_new_timeline_is_paused() {
        let timeline = fade_timeline(TimelineOptions::new());
        assert!(timeline.is_paused());
        assert!(!timeline.is_active());
        assert_eq!(timeline.step_count(), 1);
    }

    #[test]
    fn test_tick_advances_and_completes() {
        let mut timeline = fade_timeline(TimelineOptions::new().autoplay(true));

        assert!(timeline.tick(500.0));
        assert_eq!(timeline.value(0), Some(0.5));

        assert!(!timeline.tick(600.0));
        assert_eq!(timeline.time_ms(), 1000.0);
        assert_eq!(timeline.value(0), Some(1.0));
    }

    #[test]
    fn test_paused_timeline_does_not_advance() {
        let mut timeline = fade_timeline(TimelineOptions::new());
        timeline.tick(500.0);
        assert_eq!(timeline.time_ms(), 0.0);
    }

    #[test]
    fn test_speed_scales_effective_duration() {
        let mut timeline = fade_timeline(TimelineOptions::new().autoplay(true));
        timeline.set_speed_multiplier(2.0).unwrap();

        assert_eq!(timeline.effective_duration_ms(), 500.0);
        timeline.tick(250.0);
        assert_eq!(timeline.progress(), 0.5);
    }

    #[test]
    fn test_speed_rejects_non_positive() {
        let mut timeline = fade_timeline(TimelineOptions::new());
        assert_eq!(
            timeline.set_speed_multiplier(0.0),
            Err(AnimationError::InvalidSpeed(0.0))
        );
        assert!(timeline.set_speed_multiplier(f32::NAN).is_err());
        assert_eq!(timeline.speed_multiplier(), 1.0);
    }

    #[test]
    fn test_reverse_returns_to_start() {
        let mut timeline = fade_timeline(TimelineOptions::new().autoplay(true));
        timeline.tick(400.0);
        timeline.reverse();
        assert!(!timeline.tick(1000.0));
        assert_eq!(timeline.time_ms(), 0.0);
    }

    #[test]
    fn test_infinite_yoyo_keeps_running() {
        let mut timeline = fade_timeline(
            TimelineOptions::new().infinite().yoyo(true).autoplay(true),
        );

        assert!(timeline.tick(1250.0));
        assert_eq!(timeline.direction(), Direction::Reverse);
        assert_eq!(timeline.time_ms(), 750.0);

        assert!(timeline.tick(1000.0));
        assert_eq!(timeline.direction(), Direction::Forward);
        assert_eq!(timeline.iteration(), 2);
    }

    #[test]
    fn test_collapsed_timeline_finishes_within_collapsed_duration() {
        let mut timeline = fade_timeline(TimelineOptions::new().infinite().autoplay(true));
        timeline.set_collapsed(true);

        assert_eq!(timeline.effective_duration_ms(), COLLAPSED_DURATION_MS);
        assert!(!timeline.tick(COLLAPSED_DURATION_MS));
        assert_eq!(timeline.value(0), Some(1.0));
    }

    #[test]
    fn test_then_appends_with_defaults() {
        let mut timeline = Timeline::new(
            "sequence",
            &TimelineOptions::new().duration_ms(200.0).easing(Easing::Linear),
        );
        timeline.then(None, Property::Opacity, 0.0, 1.0);
        timeline.then(None, Property::Y, 20.0, 0.0);

        assert_eq!(timeline.steps()[1].offset_ms, 200.0);
        assert_eq!(timeline.duration_ms(), 400.0);
    }

    #[test]
    fn test_sample_skips_unstarted_offset_steps() {
        let mut doc = lumen_core::Document::new();
        let el = doc.mount(lumen_core::Bounds::default());

        let mut timeline = Timeline::new("sample", &TimelineOptions::new().autoplay(true));
        timeline.add(TimelineStep::new(Property::Opacity, 0.0, 1.0, 100.0).on(el));
        timeline.add(TimelineStep::new(Property::Y, 10.0, 0.0, 100.0).on(el).at(100.0));

        assert_eq!(timeline.sample().count(), 1);
        timeline.tick(150.0);
        assert_eq!(timeline.sample().count(), 2);
    }

    #[test]
    fn test_collapsed_timeline_only_fades() {
        let mut doc = lumen_core::Document::new();
        let el = doc.mount(lumen_core::Bounds::default());

        let mut timeline = Timeline::new("lift", &TimelineOptions::new().autoplay(true));
        timeline.add(TimelineStep::new(Property::Opacity, 0.0, 1.0, 200.0).on(el));
        timeline.add(TimelineStep::new(Property::Scale, 1.0, 1.05, 200.0).on(el));
        timeline.add(TimelineStep::new(Property::Y, 0.0, -4.0, 200.0).on(el));
        timeline.set_collapsed(true);
        timeline.tick(COLLAPSED_DURATION_MS);

        let sampled: Vec<_> = timeline.sample().map(|(_, p, v)| (p, v)).collect();
        assert_eq!(
            sampled,
            vec![(Property::Opacity, 1.0), (Property::Scale, 1.0), (Property::Y, 0.0)]
        );
    }

    #[test]
    fn test_mark_rested_fires_once_per_suppression() {
        let mut timeline = fade_timeline(TimelineOptions::new());
        assert!(timeline.mark_rested());
        assert!(!timeline.mark_rested());
        timeline.clear_rested();
        assert!(timeline.mark_rested());
    }

    #[test]
    fn test_killed_timeline_never_ticks() {
        let mut timeline = fade_timeline(TimelineOptions::new().autoplay(true));
        timeline.kill();
        timeline.play();
        assert!(!timeline.tick(100.0));
        assert_eq!(timeline.time_ms(), 0.0);
    }
}
