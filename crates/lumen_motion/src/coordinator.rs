//! Motion coordinator
//!
//! [`MotionCoordinator`] is the one object the host talks to. It owns the
//! timeline and scroll registries, the reduced-motion tracker, the
//! performance monitor and the shared clock, and keeps them consistent:
//! every global switch is written to the registries first and announced to
//! preference subscribers afterwards.
//!
//! Nothing is registered with the host. The host calls [`start`] once,
//! forwards its events to [`handle_event`], and calls [`destroy`] on
//! shutdown.
//!
//! [`start`]: MotionCoordinator::start
//! [`handle_event`]: MotionCoordinator::handle_event
//! [`destroy`]: MotionCoordinator::destroy
//!
//! # Example
//!
//! ```rust
//! use lumen_core::{Bounds, Document};
//! use lumen_motion::prelude::*;
//!
//! let mut doc = Document::new();
//! let button = doc.mount(Bounds::new(40.0, 40.0, 160.0, 48.0));
//!
//! let mut motion = MotionCoordinator::new(CoordinatorConfig::testing(), None);
//! motion.start();
//! motion
//!     .register_component(&mut doc, "cta", button, ComponentOptions::new(ComponentKind::Button))
//!     .unwrap();
//!
//! motion.set_reduced_motion(true);
//! assert!(motion.status().global_controls.reduced_motion);
//! assert!(motion.should_disable_animation("particle"));
//! ```

use crate::component::{self, ComponentHandle, ComponentKind, ComponentOptions, ComponentState};
use crate::config::CoordinatorConfig;
use crate::error::{CoordinatorError, Result};
use crate::performance::{PerformanceMonitor, QualitySignal};
use crate::shortcuts::ShortcutAction;
use crate::status::{CoordinatorStatus, GlobalControls};
use indexmap::IndexMap;
use lumen_animation::{
    GlobalClock, MotionPreferenceTracker, QualityLevel, ScrollRevealRegistry, ScrollTransition,
    SimplifiedAnimation, TimelineRegistry,
};
use lumen_core::{Document, ElementId, SubscriptionId};
use lumen_platform::{FrameClock, HostEvent, MotionQuery, PointerEvent, Visibility};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub struct MotionCoordinator {
    config: CoordinatorConfig,
    tracker: MotionPreferenceTracker,
    timelines: TimelineRegistry,
    scroll: ScrollRevealRegistry,
    monitor: PerformanceMonitor,
    clock: GlobalClock,
    components: IndexMap<String, ComponentHandle>,
    /// Component ids per element, in registration order
    by_target: FxHashMap<ElementId, SmallVec<[String; 2]>>,
    controls: GlobalControls,
    initialized: bool,
    /// The current pause was made by the page becoming hidden
    hidden_pause: bool,
}

impl MotionCoordinator {
    /// Create a coordinator
    ///
    /// Construction reads nothing from the host. `query` is only consulted
    /// on [`start`](Self::start), and only if the config respects the system
    /// preference.
    pub fn new(config: CoordinatorConfig, query: Option<Box<dyn MotionQuery>>) -> Self {
        let query = if config.respect_system_preference {
            query
        } else {
            None
        };
        let monitor = PerformanceMonitor::new(config.performance.clone());
        Self {
            config,
            tracker: MotionPreferenceTracker::new(query),
            timelines: TimelineRegistry::new(),
            scroll: ScrollRevealRegistry::new(),
            monitor,
            clock: GlobalClock::new(),
            components: IndexMap::new(),
            by_target: FxHashMap::default(),
            controls: GlobalControls::default(),
            initialized: false,
            hidden_pause: false,
        }
    }

    /// Construct from a TOML config file
    pub fn from_config_file(
        path: &std::path::Path,
        query: Option<Box<dyn MotionQuery>>,
    ) -> anyhow::Result<Self> {
        let config = CoordinatorConfig::load(path)?;
        Ok(Self::new(config, query))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Read the reduced-motion preference and begin accepting work
    pub fn start(&mut self) {
        if self.initialized {
            tracing::debug!("motion coordinator already started");
            return;
        }
        self.initialized = true;
        self.tracker.start();
        self.propagate_reduced_motion(self.tracker.preference());
        tracing::info!(
            "motion coordinator started (reduced_motion={})",
            self.controls.reduced_motion
        );
    }

    /// Stop reacting to frames and OS preference changes
    ///
    /// Registered components are kept; [`start`](Self::start) picks up
    /// where this left off.
    pub fn stop(&mut self) {
        if !self.initialized {
            return;
        }
        self.initialized = false;
        self.tracker.stop();
        self.clock.reset();
        self.monitor.reset_window();
        tracing::info!("motion coordinator stopped");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Tear everything down
    ///
    /// Unregisters every component, kills every timeline, removes every
    /// scroll binding and drops every preference subscriber. Calling it
    /// again does nothing.
    pub fn destroy(&mut self, doc: &mut Document) {
        let had_state = self.initialized
            || !self.components.is_empty()
            || !self.timelines.is_empty()
            || !self.scroll.is_empty()
            || !self.tracker.subscribers().is_empty();
        if !had_state {
            tracing::debug!("destroy: nothing to tear down");
            return;
        }

        let ids: Vec<String> = self.components.keys().cloned().collect();
        for id in ids {
            self.unregister_component(doc, &id);
        }
        self.timelines.kill_all();
        self.scroll.remove_all();
        self.tracker.clear_subscribers();
        self.tracker.stop();
        self.initialized = false;
        self.hidden_pause = false;
        tracing::info!("motion coordinator destroyed");
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Register a component and apply its kind's enhancement
    ///
    /// Re-registering an id returns the existing handle untouched. A detached
    /// target fails without side effects.
    pub fn register_component(
        &mut self,
        doc: &mut Document,
        id: &str,
        target: ElementId,
        options: ComponentOptions,
    ) -> Result<ComponentHandle> {
        if !self.initialized {
            return Err(CoordinatorError::NotInitialized);
        }
        if let Some(existing) = self.components.get(id) {
            tracing::debug!("component {:?} already registered", id);
            return Ok(existing.clone());
        }
        if !doc.is_attached(target) {
            tracing::debug!("component {:?}: target {:?} is detached", id, target);
            return Err(CoordinatorError::TargetDetached(target));
        }

        let handle = component::enhance(
            doc,
            &mut self.timelines,
            &mut self.scroll,
            &self.config.components,
            id,
            target,
            &options,
        )?;

        if self.monitor.quality() == QualityLevel::Reduced
            && handle.kind == ComponentKind::ParticleField
        {
            doc.set_style(target, "will-change", "auto");
        }
        self.by_target.entry(target).or_default().push(id.to_string());
        self.components.insert(id.to_string(), handle.clone());
        tracing::debug!("registered {} component {:?}", options.kind.name(), id);
        Ok(handle)
    }

    /// Remove a component and everything its enhancement created
    pub fn unregister_component(&mut self, doc: &mut Document, id: &str) -> bool {
        let Some(handle) = self.components.shift_remove(id) else {
            tracing::debug!("unregister: no component {:?}", id);
            return false;
        };
        if let Some(ids) = self.by_target.get_mut(&handle.target) {
            ids.retain(|other| other.as_str() != id);
            if ids.is_empty() {
                self.by_target.remove(&handle.target);
            }
        }
        component::teardown(doc, &mut self.timelines, &mut self.scroll, &handle);
        true
    }

    pub fn component(&self, id: &str) -> Option<&ComponentHandle> {
        self.components.get(id)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Component ids in registration order
    pub fn component_ids(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn component_state(&self, id: &str) -> Option<ComponentState> {
        let handle = self.components.get(id)?;
        Some(component::state_of(
            handle,
            &self.timelines,
            &self.scroll,
            self.controls.paused,
        ))
    }

    // =========================================================================
    // Global controls
    // =========================================================================

    pub fn global_controls(&self) -> GlobalControls {
        self.controls
    }

    pub fn pause_all_animations(&mut self) {
        self.timelines.pause_all();
        self.controls.paused = true;
        tracing::debug!("all animations paused");
    }

    /// Resume everything paused by [`pause_all_animations`]
    ///
    /// Does nothing (and returns `false`) while reduced motion is active.
    ///
    /// [`pause_all_animations`]: Self::pause_all_animations
    pub fn resume_all_animations(&mut self) -> bool {
        if !self.timelines.resume_all() {
            return false;
        }
        self.controls.paused = false;
        self.hidden_pause = false;
        self.clock.reset();
        true
    }

    /// Pause if running, resume if paused; returns the new paused state
    pub fn toggle_all_animations(&mut self) -> bool {
        if self.controls.paused {
            self.resume_all_animations();
        } else {
            self.pause_all_animations();
        }
        self.controls.paused
    }

    /// Scale every timeline and the shared clock
    pub fn set_global_speed(&mut self, multiplier: f32) -> Result<()> {
        self.timelines.set_global_speed(multiplier)?;
        self.clock.set_time_scale(multiplier)?;
        self.controls.speed = multiplier;
        tracing::debug!("global speed set to {}", multiplier);
        Ok(())
    }

    /// Override the reduced-motion preference
    ///
    /// Registries are updated before preference subscribers hear about it.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.propagate_reduced_motion(reduced);
        self.tracker.set_preference(reduced);
    }

    /// Drop a manual override and follow the OS setting again
    pub fn follow_system_preference(&mut self) {
        self.tracker.follow_system();
        self.propagate_reduced_motion(self.tracker.preference());
    }

    fn propagate_reduced_motion(&mut self, reduced: bool) {
        let was_reduced = self.controls.reduced_motion;
        self.controls.reduced_motion = reduced;
        self.timelines.set_reduced_motion(reduced);
        self.scroll.set_reduced_motion(reduced);

        if was_reduced && !reduced {
            self.restart_continuous();
        }
        if was_reduced != reduced {
            tracing::info!(
                "reduced motion {}",
                if reduced { "enabled" } else { "disabled" }
            );
        }
    }

    /// Restart endless animations after reduced motion is lifted
    fn restart_continuous(&mut self) {
        for handle in self.components.values() {
            if handle.kind != ComponentKind::ParticleField {
                continue;
            }
            if let Some(timeline) = handle.timeline.as_deref().and_then(|n| self.timelines.get(n)) {
                timeline.borrow_mut().restart();
            }
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.controls.reduced_motion
    }

    pub fn simplified_animation(&self, kind: &str) -> Option<SimplifiedAnimation> {
        self.tracker.simplified_animation(kind)
    }

    pub fn should_disable_animation(&self, kind: &str) -> bool {
        self.tracker.should_disable_animation(kind)
    }

    pub fn subscribe_motion_preference<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&bool) + 'static,
    {
        self.tracker.subscribe(callback)
    }

    pub fn unsubscribe_motion_preference(&self, id: SubscriptionId) -> bool {
        self.tracker.unsubscribe(id)
    }

    // =========================================================================
    // Complexity
    // =========================================================================

    /// Suspend performance-heavy animations and drop their compositor hints
    pub fn reduce_complexity(&mut self, doc: &mut Document) {
        let affected = self.timelines.set_quality(QualityLevel::Reduced);
        self.set_particle_hint(doc, "auto");
        tracing::info!("complexity reduced ({} timelines suspended)", affected);
    }

    /// Undo [`reduce_complexity`](Self::reduce_complexity)
    pub fn restore_complexity(&mut self, doc: &mut Document) {
        let affected = self.timelines.set_quality(QualityLevel::Full);
        self.set_particle_hint(doc, "transform");
        tracing::info!("complexity restored ({} timelines resumed)", affected);
    }

    fn set_particle_hint(&self, doc: &mut Document, value: &str) {
        for handle in self.components.values() {
            if handle.kind == ComponentKind::ParticleField {
                doc.set_style(handle.target, "will-change", value);
            }
        }
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// React to one host event
    ///
    /// Returns the scroll transitions fired by scroll and resize events.
    /// Events other than visibility and motion-preference changes are
    /// ignored until [`start`](Self::start).
    pub fn handle_event(&mut self, doc: &mut Document, event: HostEvent) -> Vec<ScrollTransition> {
        match event {
            HostEvent::Visibility(visibility) => {
                self.on_visibility(visibility);
                return Vec::new();
            }
            HostEvent::MotionPreference { reduced } => {
                self.on_system_preference(reduced);
                return Vec::new();
            }
            _ if !self.initialized => {
                tracing::debug!("ignoring host event before start");
                return Vec::new();
            }
            _ => {}
        }

        match event {
            HostEvent::Frame { timestamp_ms } => self.on_frame(doc, timestamp_ms),
            HostEvent::Scroll { scroll_y } => {
                doc.set_scroll_y(scroll_y);
                return self.scroll.update(doc);
            }
            HostEvent::Resize { viewport } => {
                doc.set_viewport(viewport);
                return self.scroll.update(doc);
            }
            HostEvent::Pointer(pointer) => self.on_pointer(doc, &pointer),
            HostEvent::Keyboard(key) => {
                if let Some(action) = self.config.shortcuts.action_for(&key) {
                    self.on_shortcut(action);
                }
            }
            HostEvent::Visibility(_) | HostEvent::MotionPreference { .. } => {}
        }
        Vec::new()
    }

    /// Run one frame stamped with the current time of `clock`
    pub fn frame(&mut self, doc: &mut Document, clock: &dyn FrameClock) {
        self.handle_event(
            doc,
            HostEvent::Frame {
                timestamp_ms: clock.now_ms(),
            },
        );
    }

    fn on_frame(&mut self, doc: &mut Document, timestamp_ms: f64) {
        let scaled = self.clock.on_frame(timestamp_ms);
        // Timelines apply the global speed themselves
        self.timelines.tick(self.clock.raw_delta_ms());
        if !self.controls.paused {
            self.scroll.tick(scaled);
        }

        self.monitor.set_animation_count(self.timelines.count());
        match self.monitor.on_frame(timestamp_ms) {
            Some(QualitySignal::ReduceComplexity) => self.reduce_complexity(doc),
            Some(QualitySignal::RestoreComplexity) => self.restore_complexity(doc),
            None => {}
        }

        self.timelines.apply(doc);
        self.scroll.apply(doc);
    }

    fn on_visibility(&mut self, visibility: Visibility) {
        if !self.config.pause_when_hidden {
            return;
        }
        match visibility {
            Visibility::Hidden => {
                if !self.controls.paused {
                    self.pause_all_animations();
                    self.hidden_pause = true;
                }
                self.monitor.reset_window();
            }
            Visibility::Visible => {
                if self.hidden_pause && self.resume_all_animations() {
                    tracing::debug!("resumed after page became visible");
                }
                self.clock.reset();
            }
        }
    }

    fn on_system_preference(&mut self, reduced: bool) {
        if !self.tracker.is_started() || self.tracker.is_manual() {
            tracing::debug!("OS motion preference change ignored");
            return;
        }
        self.propagate_reduced_motion(reduced);
        self.tracker.on_system_change(reduced);
    }

    fn on_pointer(&self, doc: &Document, pointer: &PointerEvent) {
        let Some(ids) = self.by_target.get(&pointer.target()) else {
            return;
        };
        for handle in ids.iter().filter_map(|id| self.components.get(id)) {
            self.dispatch_pointer(doc, handle, pointer);
        }
    }

    fn dispatch_pointer(&self, doc: &Document, handle: &ComponentHandle, pointer: &PointerEvent) {
        let Some(timeline) = handle.timeline.as_deref().and_then(|n| self.timelines.get(n)) else {
            return;
        };

        match (handle.kind, pointer) {
            (ComponentKind::Button, PointerEvent::Entered { .. }) => {
                component::hover(&timeline, true)
            }
            (ComponentKind::Button, PointerEvent::Left { .. }) => {
                component::hover(&timeline, false)
            }
            (ComponentKind::Card, PointerEvent::Moved { target, x, y }) => {
                if let Some(bounds) = doc.bounds(*target) {
                    component::tilt_towards(
                        &timeline,
                        bounds,
                        Some((*x, *y)),
                        self.config.components.tilt_max_deg,
                    );
                }
            }
            (ComponentKind::Card, PointerEvent::Left { target }) => {
                if let Some(bounds) = doc.bounds(*target) {
                    component::tilt_towards(
                        &timeline,
                        bounds,
                        None,
                        self.config.components.tilt_max_deg,
                    );
                }
            }
            _ => {}
        }
    }

    fn on_shortcut(&mut self, action: ShortcutAction) {
        tracing::debug!("shortcut {:?}", action);
        match action {
            ShortcutAction::ToggleAll => {
                self.toggle_all_animations();
            }
            ShortcutAction::PauseAll => self.pause_all_animations(),
            ShortcutAction::ResumeAll => {
                self.resume_all_animations();
            }
        }
    }

    // =========================================================================
    // Snapshots & accessors
    // =========================================================================

    pub fn status(&self) -> CoordinatorStatus {
        let mut performance_metrics = self.monitor.metrics();
        performance_metrics.animation_count = self.timelines.count();
        CoordinatorStatus {
            is_initialized: self.initialized,
            component_count: self.components.len(),
            timeline_count: self.timelines.count(),
            scroll_binding_count: self.scroll.count(),
            quality: self.monitor.quality(),
            global_controls: self.controls,
            performance_metrics,
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn timelines(&self) -> &TimelineRegistry {
        &self.timelines
    }

    pub fn scroll(&self) -> &ScrollRevealRegistry {
        &self.scroll
    }

    pub fn tracker(&self) -> &MotionPreferenceTracker {
        &self.tracker
    }

    pub fn performance(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    /// Record heap usage reported by the host, in bytes
    pub fn record_memory_usage(&mut self, bytes: u64) {
        self.monitor.record_memory_usage(bytes);
    }
}

impl std::fmt::Debug for MotionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionCoordinator")
            .field("initialized", &self.initialized)
            .field("components", &self.components.len())
            .field("timelines", &self.timelines.count())
            .field("scroll_bindings", &self.scroll.count())
            .field("controls", &self.controls)
            .finish()
    }
}
