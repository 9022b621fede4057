//! Reduced-motion preference tracking
//!
//! [`MotionPreferenceTracker`] owns the single reduced-motion flag. It reads
//! the OS setting through a [`MotionQuery`] when started, accepts explicit
//! overrides, and fans every change out to its subscribers. On each change
//! it also rewrites a small set of root [`StyleHooks`] so that passive
//! consumers pick up the new duration and scroll behavior.
//!
//! Construction has no side effects. Nothing is read from the host until
//! [`MotionPreferenceTracker::start`] is called, which keeps independent
//! trackers isolated from each other in tests.
//!
//! # Example
//!
//! ```rust
//! use lumen_animation::MotionPreferenceTracker;
//! use lumen_platform::StaticMotionQuery;
//!
//! let mut tracker = MotionPreferenceTracker::new(Some(Box::new(StaticMotionQuery(true))));
//! tracker.start();
//!
//! assert!(tracker.preference());
//! assert!(tracker.should_disable_animation("particle"));
//! assert!(tracker.simplified_animation("fade-up").is_some());
//! ```

use crate::category::MotionCategory;
use crate::easing::Easing;
use crate::timeline::COLLAPSED_DURATION_MS;
use crate::values::MotionProps;
use lumen_core::{StyleHooks, Subscribers, SubscriptionId};
use lumen_platform::MotionQuery;
use serde::Serialize;

/// Collapsed duration in seconds
pub const REDUCED_DURATION: f32 = COLLAPSED_DURATION_MS / 1000.0;

/// Normal animation duration in seconds
pub const DEFAULT_DURATION: f32 = 0.6;

/// Root style hook names written on every preference change
pub mod hooks {
    pub const DURATION: &str = "--motion-duration";
    pub const DURATION_SCALE: &str = "--motion-duration-scale";
    pub const EASING: &str = "--motion-easing";
    pub const SCROLL_BEHAVIOR: &str = "--scroll-behavior";
    pub const REDUCED_MOTION: &str = "--reduced-motion";
}

/// Default tween parameters derived from the preference
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnimationConfig {
    /// Seconds
    pub duration: f32,
    pub easing: Easing,
    pub scale: Option<f32>,
    pub opacity: Option<f32>,
}

impl AnimationConfig {
    pub fn standard() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::Power2Out,
            scale: None,
            opacity: None,
        }
    }

    /// Near-instant, un-eased, no transform
    pub fn reduced() -> Self {
        Self {
            duration: REDUCED_DURATION,
            easing: Easing::Linear,
            scale: Some(1.0),
            opacity: Some(1.0),
        }
    }

    pub fn for_preference(reduced_motion: bool) -> Self {
        if reduced_motion {
            Self::reduced()
        } else {
            Self::standard()
        }
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration * 1000.0
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// End state of a tween
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TweenTarget {
    pub props: MotionProps,
    /// Seconds
    pub duration: f32,
    pub easing: Easing,
}

/// The opacity-only fade used in place of any animation under reduced motion
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SimplifiedAnimation {
    pub from: MotionProps,
    pub to: TweenTarget,
}

impl SimplifiedAnimation {
    pub fn fade() -> Self {
        Self {
            from: MotionProps::new().opacity(0.0),
            to: TweenTarget {
                props: MotionProps::new().opacity(1.0),
                duration: REDUCED_DURATION,
                easing: Easing::Linear,
            },
        }
    }
}

/// Tracks the reduced-motion preference and notifies subscribers
pub struct MotionPreferenceTracker {
    query: Option<Box<dyn MotionQuery>>,
    reduced_motion: bool,
    started: bool,
    /// An explicit override pinned the value; OS changes are ignored
    manual: bool,
    subscribers: Subscribers<bool>,
    style_hooks: StyleHooks,
}

impl MotionPreferenceTracker {
    /// Create a tracker
    ///
    /// `None` means the host has no reduced-motion capability; the tracker
    /// then stays at `false` until overridden.
    pub fn new(query: Option<Box<dyn MotionQuery>>) -> Self {
        Self {
            query,
            reduced_motion: false,
            started: false,
            manual: false,
            subscribers: Subscribers::new(),
            style_hooks: StyleHooks::new(),
        }
    }

    /// Read the OS setting and publish it
    ///
    /// Subscribers receive one synchronous notification with the initial
    /// value. Calling `start` on a started tracker does nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let initial = if self.manual {
            self.reduced_motion
        } else {
            self.query_preference()
        };
        tracing::info!("motion preference tracker started (reduced_motion={})", initial);
        self.apply(initial);
    }

    fn query_preference(&self) -> bool {
        match self.query.as_ref() {
            Some(query) => match query.prefers_reduced_motion() {
                Ok(reduced) => reduced,
                Err(err) => {
                    tracing::warn!(
                        "reduced-motion query failed, assuming full motion: {}",
                        err
                    );
                    false
                }
            },
            None => {
                tracing::debug!("no reduced-motion capability; manual override only");
                false
            }
        }
    }

    /// Stop reacting to OS changes (explicit overrides still work)
    pub fn stop(&mut self) {
        self.started = false;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Current reduced-motion state
    pub fn preference(&self) -> bool {
        self.reduced_motion
    }

    /// Explicit override, with the same side effects as an OS change
    ///
    /// The value stays pinned until [`follow_system`](Self::follow_system).
    pub fn set_preference(&mut self, reduced_motion: bool) {
        tracing::debug!("reduced motion overridden to {}", reduced_motion);
        self.manual = true;
        self.apply(reduced_motion);
    }

    /// Whether an explicit override is pinning the value
    pub fn is_manual(&self) -> bool {
        self.manual
    }

    /// Drop a manual override and re-read the OS setting
    pub fn follow_system(&mut self) {
        self.manual = false;
        if self.started {
            let reduced = self.query_preference();
            self.apply(reduced);
        }
    }

    /// OS-level change notification
    ///
    /// Ignored (returns `false`) while the tracker is stopped or pinned by
    /// a manual override.
    pub fn on_system_change(&mut self, reduced_motion: bool) -> bool {
        if !self.started {
            tracing::debug!("ignoring OS motion change while stopped");
            return false;
        }
        if self.manual {
            tracing::debug!("ignoring OS motion change: manual override active");
            return false;
        }
        self.apply(reduced_motion);
        true
    }

    fn apply(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
        self.sync_style_hooks();
        self.subscribers.notify(&reduced_motion);
    }

    fn sync_style_hooks(&mut self) {
        let config = self.animation_config();
        let scale = if self.reduced_motion { "0" } else { "1" };
        let scroll = if self.reduced_motion { "auto" } else { "smooth" };

        self.style_hooks
            .set(hooks::DURATION, format!("{}s", config.duration));
        self.style_hooks.set(hooks::DURATION_SCALE, scale);
        self.style_hooks.set(hooks::EASING, config.easing.css_name());
        self.style_hooks.set(hooks::SCROLL_BEHAVIOR, scroll);
        self.style_hooks
            .set(hooks::REDUCED_MOTION, if self.reduced_motion { "1" } else { "0" });
    }

    pub fn style_hooks(&self) -> &StyleHooks {
        &self.style_hooks
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&bool) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Shared handle to the subscriber list
    pub fn subscribers(&self) -> Subscribers<bool> {
        self.subscribers.clone()
    }

    pub fn clear_subscribers(&self) {
        self.subscribers.clear();
    }

    // =========================================================================
    // Derived configuration
    // =========================================================================

    pub fn animation_config(&self) -> AnimationConfig {
        AnimationConfig::for_preference(self.reduced_motion)
    }

    /// Replacement animation under reduced motion, `None` otherwise
    ///
    /// The replacement is the same opacity fade for every kind.
    pub fn simplified_animation(&self, _kind: &str) -> Option<SimplifiedAnimation> {
        self.reduced_motion.then(SimplifiedAnimation::fade)
    }

    /// Whether an animation of this kind must not run
    pub fn should_disable_animation(&self, kind: &str) -> bool {
        MotionCategory::parse(kind).is_some_and(|category| self.should_disable(category))
    }

    pub fn should_disable(&self, category: MotionCategory) -> bool {
        self.reduced_motion && category.is_motion_heavy()
    }
}

impl std::fmt::Debug for MotionPreferenceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionPreferenceTracker")
            .field("reduced_motion", &self.reduced_motion)
            .field("started", &self.started)
            .field("manual", &self.manual)
            .field("has_query", &self.query.is_some())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_platform::{PlatformError, StaticMotionQuery};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FailingQuery;

    impl MotionQuery for FailingQuery {
        fn prefers_reduced_motion(&self) -> lumen_platform::Result<bool> {
            Err(PlatformError::Unavailable("matchMedia".into()))
        }
    }

    const KINDS: [&str; 14] = [
        "fade-up",
        "fade-in",
        "slide-left",
        "parallax",
        "particle",
        "continuous",
        "infinite",
        "bounce",
        "elastic",
        "shake",
        "pulse",
        "rotate",
        "scale",
        "transform3d",
    ];

    #[test]
    fn test_construction_reads_nothing() {
        let tracker = MotionPreferenceTracker::new(Some(Box::new(StaticMotionQuery(true))));
        assert!(!tracker.preference());
        assert!(tracker.style_hooks().is_empty());
    }

    #[test]
    fn test_start_reads_query_and_notifies() {
        let mut tracker = MotionPreferenceTracker::new(Some(Box::new(StaticMotionQuery(true))));
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            tracker.subscribe(move |v| seen.borrow_mut().push(*v));
        }

        tracker.start();
        tracker.start();

        assert!(tracker.preference());
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn test_missing_or_failing_capability_defaults_to_full_motion() {
        let mut none = MotionPreferenceTracker::new(None);
        none.start();
        assert!(!none.preference());

        let mut failing = MotionPreferenceTracker::new(Some(Box::new(FailingQuery)));
        failing.start();
        assert!(!failing.preference());

        failing.set_preference(true);
        assert!(failing.preference());
    }

    #[test]
    fn test_reduced_collapse_for_every_kind() {
        let mut tracker = MotionPreferenceTracker::new(None);
        tracker.set_preference(true);

        for kind in KINDS {
            let simplified = tracker.simplified_animation(kind).unwrap();
            assert!(simplified.to.duration <= 0.01, "{kind}");
            assert_eq!(simplified.from.opacity, Some(0.0));
            assert_eq!(simplified.to.props.opacity, Some(1.0));
        }
        for category in MotionCategory::MOTION_HEAVY {
            assert!(tracker.should_disable_animation(category.name()));
        }
        assert!(!tracker.should_disable_animation("fade-up"));
        assert!(!tracker.should_disable_animation("unknown-kind"));
    }

    #[test]
    fn test_full_motion_never_simplifies() {
        let mut tracker = MotionPreferenceTracker::new(None);
        tracker.set_preference(false);

        for kind in KINDS {
            assert!(tracker.simplified_animation(kind).is_none());
            assert!(!tracker.should_disable_animation(kind));
        }
    }

    #[test]
    fn test_animation_config_follows_preference() {
        let mut tracker = MotionPreferenceTracker::new(None);
        assert_eq!(tracker.animation_config(), AnimationConfig::standard());
        assert_eq!(tracker.animation_config().duration, 0.6);

        tracker.set_preference(true);
        let config = tracker.animation_config();
        assert!(config.duration <= 0.01);
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.scale, Some(1.0));
    }

    #[test]
    fn test_style_hooks_follow_preference() {
        let mut tracker = MotionPreferenceTracker::new(None);
        tracker.set_preference(true);
        assert_eq!(tracker.style_hooks().get(hooks::SCROLL_BEHAVIOR), Some("auto"));
        assert_eq!(tracker.style_hooks().get(hooks::REDUCED_MOTION), Some("1"));
        assert_eq!(tracker.style_hooks().get_f32(hooks::DURATION), Some(0.01));

        tracker.set_preference(false);
        assert_eq!(tracker.style_hooks().get(hooks::SCROLL_BEHAVIOR), Some("smooth"));
        assert_eq!(tracker.style_hooks().get_f32(hooks::DURATION), Some(0.6));
    }

    #[test]
    fn test_system_change_ignored_while_stopped() {
        let mut tracker = MotionPreferenceTracker::new(None);
        assert!(!tracker.on_system_change(true));
        assert!(!tracker.preference());

        tracker.start();
        assert!(tracker.on_system_change(true));
        assert!(tracker.preference());

        tracker.stop();
        assert!(!tracker.on_system_change(false));
        assert!(tracker.preference());
    }

    #[test]
    fn test_manual_override_pins_value() {
        let mut tracker = MotionPreferenceTracker::new(Some(Box::new(StaticMotionQuery(true))));
        tracker.start();
        tracker.set_preference(false);

        assert!(!tracker.on_system_change(true));
        assert!(!tracker.preference());

        tracker.follow_system();
        assert!(!tracker.is_manual());
        assert!(tracker.preference());
    }

    #[test]
    fn test_every_change_notifies_synchronously() {
        let mut tracker = MotionPreferenceTracker::new(None);
        let count = Rc::new(RefCell::new(0));
        let id = {
            let count = Rc::clone(&count);
            tracker.subscribe(move |_| *count.borrow_mut() += 1)
        };

        tracker.set_preference(true);
        tracker.set_preference(true);
        assert_eq!(*count.borrow(), 2);

        assert!(tracker.unsubscribe(id));
        tracker.set_preference(false);
        assert_eq!(*count.borrow(), 2);
    }
}
