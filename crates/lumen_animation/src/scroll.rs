//! Scroll-triggered reveals
//!
//! A binding ties one or more elements to a scroll range. The range runs
//! from the scroll offset where the `start` position is met to the offset
//! where the `end` position is met, both measured against the first target.
//! On every [`ScrollRevealRegistry::update`] each binding is placed before,
//! inside or after its range, and crossings fire [`ScrollEvent`]s:
//!
//! ```text
//!              Enter               Leave
//! BeforeStart -------> Active -------------> AfterEnd
//!             <-------        <-------------
//!            LeaveBack            EnterBack
//! ```
//!
//! Each event applies the binding's [`ToggleAction`] to its tween. Scrubbed
//! bindings ignore toggle actions and pin progress to the scroll position.
//!
//! Unlike timelines, registering an existing name replaces the old binding.

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::presets::ContentRevealOptions;
use crate::preference::SimplifiedAnimation;
use crate::timeline::{Direction, COLLAPSED_DURATION_MS, DEFAULT_STEP_DURATION_MS};
use crate::values::{Interpolate, MotionProps};
use indexmap::IndexMap;
use lumen_core::{Bounds, Document, ElementId, Viewport};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

new_key_type! {
    /// Handle to a registered scroll binding
    pub struct BindingId;
}

// ============================================================================
// Positions
// ============================================================================

/// Where a trigger line sits: a point on the element meeting a point on the
/// viewport
///
/// Both anchors are fractions from the top (`0.0` top, `1.0` bottom).
/// Parsed from strings such as `"top 80%"` or `"bottom center"`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScrollPosition {
    pub element_anchor: f32,
    pub viewport_anchor: f32,
}

impl ScrollPosition {
    /// `"top 80%"`
    pub const DEFAULT_START: ScrollPosition = ScrollPosition {
        element_anchor: 0.0,
        viewport_anchor: 0.8,
    };

    /// `"bottom 20%"`
    pub const DEFAULT_END: ScrollPosition = ScrollPosition {
        element_anchor: 1.0,
        viewport_anchor: 0.2,
    };

    pub fn new(element_anchor: f32, viewport_anchor: f32) -> Self {
        Self {
            element_anchor,
            viewport_anchor,
        }
    }

    /// Scroll offset at which the two anchors line up
    pub fn scroll_offset(&self, bounds: Bounds, viewport: Viewport) -> f32 {
        bounds.y + self.element_anchor * bounds.height - self.viewport_anchor * viewport.height
    }

    fn parse_anchor(token: &str) -> Option<f32> {
        match token {
            "top" => Some(0.0),
            "center" => Some(0.5),
            "bottom" => Some(1.0),
            _ => {
                let value: f32 = token.strip_suffix('%')?.parse().ok()?;
                value.is_finite().then_some(value / 100.0)
            }
        }
    }

    fn fmt_anchor(anchor: f32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if anchor == 0.0 {
            write!(f, "top")
        } else if anchor == 0.5 {
            write!(f, "center")
        } else if anchor == 1.0 {
            write!(f, "bottom")
        } else {
            write!(f, "{}%", anchor * 100.0)
        }
    }
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::DEFAULT_START
    }
}

impl FromStr for ScrollPosition {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AnimationError::InvalidPosition(s.to_string());
        let lowered = s.trim().to_ascii_lowercase();
        let mut tokens = lowered.split_whitespace();

        let (Some(element), Some(viewport), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(invalid());
        };
        Ok(Self {
            element_anchor: Self::parse_anchor(element).ok_or_else(invalid)?,
            viewport_anchor: Self::parse_anchor(viewport).ok_or_else(invalid)?,
        })
    }
}

impl TryFrom<String> for ScrollPosition {
    type Error = AnimationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ScrollPosition> for String {
    fn from(position: ScrollPosition) -> Self {
        position.to_string()
    }
}

impl fmt::Display for ScrollPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_anchor(self.element_anchor, f)?;
        write!(f, " ")?;
        Self::fmt_anchor(self.viewport_anchor, f)
    }
}

// ============================================================================
// Events & toggle actions
// ============================================================================

/// Where the scroll position sits relative to a binding's range
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollState {
    #[default]
    BeforeStart,
    Active,
    AfterEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

impl ScrollEvent {
    /// Events fired when moving from one state to another, in crossing order
    pub fn between(from: ScrollState, to: ScrollState) -> SmallVec<[ScrollEvent; 2]> {
        use ScrollState::*;
        let events: &[ScrollEvent] = match (from, to) {
            (BeforeStart, Active) => &[ScrollEvent::Enter],
            (Active, AfterEnd) => &[ScrollEvent::Leave],
            (AfterEnd, Active) => &[ScrollEvent::EnterBack],
            (Active, BeforeStart) => &[ScrollEvent::LeaveBack],
            (BeforeStart, AfterEnd) => &[ScrollEvent::Enter, ScrollEvent::Leave],
            (AfterEnd, BeforeStart) => &[ScrollEvent::EnterBack, ScrollEvent::LeaveBack],
            _ => &[],
        };
        SmallVec::from_slice(events)
    }
}

/// What a crossing does to the binding's tween
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    #[default]
    None,
}

impl FromStr for ToggleAction {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        let action = match s {
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            "none" => ToggleAction::None,
            _ => return Err(AnimationError::InvalidToggleActions(s.to_string())),
        };
        Ok(action)
    }
}

/// Actions for enter, leave, enter-back and leave-back
///
/// Defaults to `play none none reverse`: the reveal plays once on the way
/// down and only rewinds when scrolled back above its start line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    pub fn for_event(&self, event: ScrollEvent) -> ToggleAction {
        match event {
            ScrollEvent::Enter => self.on_enter,
            ScrollEvent::Leave => self.on_leave,
            ScrollEvent::EnterBack => self.on_enter_back,
            ScrollEvent::LeaveBack => self.on_leave_back,
        }
    }
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::Reverse,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AnimationError::InvalidToggleActions(s.to_string());
        let lowered = s.trim().to_ascii_lowercase();
        let actions = lowered
            .split_whitespace()
            .map(|token| token.parse::<ToggleAction>().map_err(|_| invalid()))
            .collect::<Result<SmallVec<[ToggleAction; 4]>>>()?;

        match actions.as_slice() {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter: *on_enter,
                on_leave: *on_leave,
                on_enter_back: *on_enter_back,
                on_leave_back: *on_leave_back,
            }),
            _ => Err(invalid()),
        }
    }
}

/// One fired crossing, reported by [`ScrollRevealRegistry::update`]
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTransition {
    pub binding: BindingId,
    pub name: String,
    pub event: ScrollEvent,
}

// ============================================================================
// Specs
// ============================================================================

/// What a binding animates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealAnimation {
    pub from: MotionProps,
    pub to: MotionProps,
    pub duration_ms: f32,
    pub easing: Easing,
    /// Delay between successive targets (ms)
    pub stagger_ms: f32,
}

impl RevealAnimation {
    pub fn new(from: MotionProps, to: MotionProps) -> Self {
        Self {
            from,
            to,
            duration_ms: DEFAULT_STEP_DURATION_MS,
            easing: Easing::Power2Out,
            stagger_ms: 0.0,
        }
    }

    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn stagger_ms(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }
}

/// When a binding fires
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerSpec {
    pub start: ScrollPosition,
    pub end: ScrollPosition,
    /// Pin progress to the scroll position instead of playing
    pub scrub: bool,
    pub toggle_actions: ToggleActions,
}

impl TriggerSpec {
    pub fn new(start: ScrollPosition, end: ScrollPosition) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    pub fn scrub(mut self, scrub: bool) -> Self {
        self.scrub = scrub;
        self
    }

    pub fn toggle_actions(mut self, toggle_actions: ToggleActions) -> Self {
        self.toggle_actions = toggle_actions;
        self
    }
}

impl Default for TriggerSpec {
    fn default() -> Self {
        Self {
            start: ScrollPosition::DEFAULT_START,
            end: ScrollPosition::DEFAULT_END,
            scrub: false,
            toggle_actions: ToggleActions::default(),
        }
    }
}

// ============================================================================
// Bindings
// ============================================================================

/// Playback state of a binding's tween, in normalized progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct RevealTween {
    progress: f32,
    direction: Direction,
    running: bool,
}

impl RevealTween {
    fn apply(&mut self, action: ToggleAction) {
        match action {
            ToggleAction::Play => {
                self.direction = Direction::Forward;
                self.running = true;
            }
            ToggleAction::Pause => self.running = false,
            ToggleAction::Resume => self.running = true,
            ToggleAction::Reverse => {
                self.direction = Direction::Reverse;
                self.running = true;
            }
            ToggleAction::Restart => {
                self.progress = 0.0;
                self.direction = Direction::Forward;
                self.running = true;
            }
            ToggleAction::Reset => {
                self.progress = 0.0;
                self.running = false;
            }
            ToggleAction::Complete => {
                self.progress = 1.0;
                self.running = false;
            }
            ToggleAction::None => {}
        }
    }

    fn is_animating(&self) -> bool {
        self.running
            && match self.direction {
                Direction::Forward => self.progress < 1.0,
                Direction::Reverse => self.progress > 0.0,
            }
    }

    fn advance(&mut self, dt_ms: f32, total_ms: f32) {
        if !self.is_animating() || dt_ms <= 0.0 {
            return;
        }
        let step = if total_ms <= 0.0 { 1.0 } else { dt_ms / total_ms };
        self.progress = match self.direction {
            Direction::Forward => (self.progress + step).min(1.0),
            Direction::Reverse => (self.progress - step).max(0.0),
        };
    }
}

type ToggleCallback = Box<dyn FnMut(ScrollEvent)>;

/// A registered scroll binding
pub struct ScrollBinding {
    name: String,
    targets: SmallVec<[ElementId; 4]>,
    animation: RevealAnimation,
    trigger: TriggerSpec,
    state: ScrollState,
    tween: RevealTween,
    on_toggle: Option<ToggleCallback>,
}

impl ScrollBinding {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    pub fn animation(&self) -> &RevealAnimation {
        &self.animation
    }

    pub fn trigger(&self) -> &TriggerSpec {
        &self.trigger
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Tween progress across all targets (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        self.tween.progress
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_animating()
    }

    /// Start delay of each target, in target order
    pub fn offsets(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.targets.len()).map(move |i| i as f32 * self.animation.stagger_ms)
    }

    /// Scroll range `(start, end)` measured against the first target
    pub fn range(&self, doc: &Document) -> Option<(f32, f32)> {
        let trigger = self.targets.first().and_then(|id| doc.bounds(*id))?;
        let viewport = doc.viewport();
        let start = self.trigger.start.scroll_offset(trigger, viewport);
        let end = self.trigger.end.scroll_offset(trigger, viewport).max(start);
        Some((start, end))
    }

    fn state_at(scroll_y: f32, (start, end): (f32, f32)) -> ScrollState {
        if scroll_y < start {
            ScrollState::BeforeStart
        } else if scroll_y > end {
            ScrollState::AfterEnd
        } else {
            ScrollState::Active
        }
    }

    fn scrub_progress(scroll_y: f32, (start, end): (f32, f32)) -> f32 {
        if end <= start {
            return if scroll_y >= start { 1.0 } else { 0.0 };
        }
        ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
    }

    /// Wall-clock length of the whole staggered tween
    fn total_ms(&self, reduced_motion: bool) -> f32 {
        if reduced_motion {
            return COLLAPSED_DURATION_MS;
        }
        let last_delay = self.targets.len().saturating_sub(1) as f32 * self.animation.stagger_ms;
        self.animation.duration_ms + last_delay
    }

    /// Interpolated props of the target at `index`
    fn props_at(&self, index: usize, reduced_motion: bool) -> MotionProps {
        if reduced_motion {
            let fade = SimplifiedAnimation::fade();
            return fade.from.lerp(&fade.to.props, self.tween.progress);
        }
        let total = self.total_ms(false);
        let elapsed = self.tween.progress * total;
        let delay = index as f32 * self.animation.stagger_ms;
        let local = if self.animation.duration_ms <= 0.0 {
            if elapsed >= delay && self.tween.progress > 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            ((elapsed - delay) / self.animation.duration_ms).clamp(0.0, 1.0)
        };
        self.animation
            .from
            .lerp(&self.animation.to, self.animation.easing.apply(local))
    }
}

impl fmt::Debug for ScrollBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollBinding")
            .field("name", &self.name)
            .field("targets", &self.targets)
            .field("state", &self.state)
            .field("progress", &self.tween.progress)
            .field("scrub", &self.trigger.scrub)
            .field("has_callback", &self.on_toggle.is_some())
            .finish()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Registry of scroll bindings, evaluated in registration order
#[derive(Debug, Default)]
pub struct ScrollRevealRegistry {
    bindings: SlotMap<BindingId, ScrollBinding>,
    by_name: IndexMap<String, BindingId>,
    reduced_motion: bool,
}

impl ScrollRevealRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding, replacing any binding with the same name
    ///
    /// Fails without touching the registry if `targets` is empty or any
    /// target is detached. A replaced binding's old tween is dropped.
    pub fn create_or_replace(
        &mut self,
        doc: &Document,
        name: &str,
        targets: &[ElementId],
        animation: RevealAnimation,
        trigger: TriggerSpec,
    ) -> Result<BindingId> {
        if targets.is_empty() {
            tracing::debug!("scroll binding {:?} has no targets", name);
            return Err(AnimationError::NoTargets(name.to_string()));
        }
        if let Some(detached) = targets.iter().find(|id| !doc.is_attached(**id)) {
            tracing::debug!("scroll binding {:?}: target {:?} is detached", name, detached);
            return Err(AnimationError::TargetDetached(*detached));
        }
        if !animation.stagger_ms.is_finite() || animation.stagger_ms < 0.0 {
            return Err(AnimationError::InvalidStagger(animation.stagger_ms));
        }

        if self.remove(name) {
            tracing::debug!("replaced scroll binding {:?}", name);
        }

        let id = self.bindings.insert(ScrollBinding {
            name: name.to_string(),
            targets: SmallVec::from_slice(targets),
            animation,
            trigger,
            state: ScrollState::BeforeStart,
            tween: RevealTween::default(),
            on_toggle: None,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Stagger a named reveal preset across `elements`
    ///
    /// Element `i` starts `i * stagger_ms` after the first.
    pub fn create_content_reveal(
        &mut self,
        doc: &Document,
        name: &str,
        elements: &[ElementId],
        options: &ContentRevealOptions,
    ) -> Result<BindingId> {
        if !options.stagger_ms.is_finite() || options.stagger_ms <= 0.0 {
            tracing::warn!("content reveal {:?}: invalid stagger {}", name, options.stagger_ms);
            return Err(AnimationError::InvalidStagger(options.stagger_ms));
        }
        let animation = options
            .preset
            .animation()
            .duration_ms(options.duration_ms)
            .easing(options.easing)
            .stagger_ms(options.stagger_ms);
        let trigger = TriggerSpec::new(options.start, options.end);
        self.create_or_replace(doc, name, elements, animation, trigger)
    }

    /// Set the callback invoked for every event the binding fires
    pub fn set_on_toggle<F>(&mut self, name: &str, callback: F) -> bool
    where
        F: FnMut(ScrollEvent) + 'static,
    {
        match self.get_mut(name) {
            Some(binding) => {
                binding.on_toggle = Some(Box::new(callback));
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ScrollBinding> {
        self.by_name.get(name).and_then(|id| self.bindings.get(*id))
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut ScrollBinding> {
        let id = *self.by_name.get(name)?;
        self.bindings.get_mut(id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        match self.by_name.shift_remove(name) {
            Some(id) => self.bindings.remove(id).is_some(),
            None => false,
        }
    }

    /// Remove every binding, returning how many there were
    pub fn remove_all(&mut self) -> usize {
        let removed = self.bindings.len();
        self.bindings.clear();
        self.by_name.clear();
        removed
    }

    pub fn count(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Number of tweens currently moving
    pub fn active_count(&self) -> usize {
        self.bindings.values().filter(|b| b.is_animating()).count()
    }

    pub fn is_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Swap every tween for the simplified fade (or back)
    ///
    /// Progress is kept, so a finished reveal stays finished.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Re-evaluate every binding against the document's scroll position
    ///
    /// Returns the fired transitions in registration order. Bindings whose
    /// trigger element has been unmounted are skipped.
    pub fn update(&mut self, doc: &Document) -> Vec<ScrollTransition> {
        let scroll_y = doc.scroll_y();
        let mut fired = Vec::new();

        for id in self.by_name.values().copied() {
            let Some(binding) = self.bindings.get_mut(id) else {
                continue;
            };
            let Some(range) = binding.range(doc) else {
                tracing::debug!("scroll binding {:?}: trigger element detached", binding.name);
                continue;
            };

            let next = ScrollBinding::state_at(scroll_y, range);
            if binding.trigger.scrub {
                binding.tween.progress = ScrollBinding::scrub_progress(scroll_y, range);
            }
            if next == binding.state {
                continue;
            }

            for event in ScrollEvent::between(binding.state, next) {
                if !binding.trigger.scrub {
                    let action = binding.trigger.toggle_actions.for_event(event);
                    binding.tween.apply(action);
                }
                if let Some(callback) = binding.on_toggle.as_mut() {
                    callback(event);
                }
                fired.push(ScrollTransition {
                    binding: id,
                    name: binding.name.clone(),
                    event,
                });
            }
            binding.state = next;
        }

        if !fired.is_empty() {
            tracing::debug!("scroll update fired {} transitions", fired.len());
        }
        fired
    }

    /// Advance playing tweens by an already scaled frame delta
    ///
    /// Returns `true` while any tween is still moving.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let reduced = self.reduced_motion;
        let mut any = false;
        for binding in self.bindings.values_mut() {
            if binding.trigger.scrub {
                continue;
            }
            let total = binding.total_ms(reduced);
            binding.tween.advance(dt_ms, total);
            any |= binding.tween.is_animating();
        }
        any
    }

    /// Write each target's interpolated props as element styles
    pub fn apply(&self, doc: &mut Document) {
        for id in self.by_name.values() {
            let Some(binding) = self.bindings.get(*id) else {
                continue;
            };
            for (index, target) in binding.targets.iter().enumerate() {
                if !doc.is_attached(*target) {
                    continue;
                }
                for (property, value) in binding.props_at(index, self.reduced_motion).iter() {
                    doc.set_style(*target, property.css_name(), property.format(value));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::RevealPreset;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 720px viewport; element at y=1000, 200px tall
    fn setup() -> (Document, ElementId) {
        let mut doc = Document::new();
        let el = doc.mount(Bounds::new(0.0, 1000.0, 400.0, 200.0));
        (doc, el)
    }

    fn fade(
        doc: &Document,
        registry: &mut ScrollRevealRegistry,
        name: &str,
        el: ElementId,
    ) -> BindingId {
        registry
            .create_or_replace(
                doc,
                name,
                &[el],
                RevealPreset::FadeIn.animation().duration_ms(100.0),
                TriggerSpec::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_parse_scroll_position() {
        let position: ScrollPosition = "top 80%".parse().unwrap();
        assert_eq!(position, ScrollPosition::DEFAULT_START);

        let position: ScrollPosition = "Bottom center".parse().unwrap();
        assert_eq!(position, ScrollPosition::new(1.0, 0.5));

        assert!("top".parse::<ScrollPosition>().is_err());
        assert!("middle 50%".parse::<ScrollPosition>().is_err());
        assert_eq!(ScrollPosition::DEFAULT_END.to_string(), "bottom 20%");
    }

    #[test]
    fn test_parse_toggle_actions() {
        let actions: ToggleActions = "play none none reverse".parse().unwrap();
        assert_eq!(actions, ToggleActions::default());

        let actions: ToggleActions = "restart pause resume reset".parse().unwrap();
        assert_eq!(actions.on_leave, ToggleAction::Pause);

        assert!("play none".parse::<ToggleActions>().is_err());
        assert!("play none none rewind".parse::<ToggleActions>().is_err());
    }

    #[test]
    fn test_range_uses_anchors() {
        let (doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        fade(&doc, &mut registry, "hero", el);

        // start: 1000 - 0.8*720 = 424, end: 1200 - 0.2*720 = 1056
        let (start, end) = registry.get("hero").unwrap().range(&doc).unwrap();
        assert_eq!(start, 424.0);
        assert_eq!(end, 1056.0);
    }

    #[test]
    fn test_detached_or_empty_targets_register_nothing() {
        let (mut doc, el) = setup();
        let other = doc.mount(Bounds::default());
        doc.unmount(other);

        let mut registry = ScrollRevealRegistry::new();
        let result = registry.create_or_replace(
            &doc,
            "mixed",
            &[el, other],
            RevealPreset::FadeUp.animation(),
            TriggerSpec::default(),
        );
        assert_eq!(result, Err(AnimationError::TargetDetached(other)));

        let result = registry.create_or_replace(
            &doc,
            "empty",
            &[],
            RevealPreset::FadeUp.animation(),
            TriggerSpec::default(),
        );
        assert_eq!(result, Err(AnimationError::NoTargets("empty".into())));
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_reregister_replaces_binding() {
        let (doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        let first = fade(&doc, &mut registry, "hero", el);
        let second = fade(&doc, &mut registry, "hero", el);

        assert_ne!(first, second);
        assert_eq!(registry.count(), 1);
        assert_eq!(registry.get("hero").unwrap().state(), ScrollState::BeforeStart);
    }

    #[test]
    fn test_state_transitions_fire_events() {
        let (mut doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        fade(&doc, &mut registry, "hero", el);

        let events = |fired: Vec<ScrollTransition>| {
            fired.into_iter().map(|t| t.event).collect::<Vec<_>>()
        };

        assert!(registry.update(&doc).is_empty());

        doc.set_scroll_y(500.0);
        assert_eq!(events(registry.update(&doc)), vec![ScrollEvent::Enter]);
        doc.set_scroll_y(1100.0);
        assert_eq!(events(registry.update(&doc)), vec![ScrollEvent::Leave]);
        doc.set_scroll_y(800.0);
        assert_eq!(events(registry.update(&doc)), vec![ScrollEvent::EnterBack]);
        doc.set_scroll_y(100.0);
        assert_eq!(events(registry.update(&doc)), vec![ScrollEvent::LeaveBack]);
    }

    #[test]
    fn test_jump_across_range_fires_both_in_order() {
        let (mut doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        fade(&doc, &mut registry, "hero", el);

        doc.set_scroll_y(5000.0);
        let fired: Vec<_> = registry.update(&doc).into_iter().map(|t| t.event).collect();
        assert_eq!(fired, vec![ScrollEvent::Enter, ScrollEvent::Leave]);

        doc.set_scroll_y(0.0);
        let fired: Vec<_> = registry.update(&doc).into_iter().map(|t| t.event).collect();
        assert_eq!(fired, vec![ScrollEvent::EnterBack, ScrollEvent::LeaveBack]);
    }

    #[test]
    fn test_transitions_follow_registration_order() {
        let (mut doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        fade(&doc, &mut registry, "b", el);
        fade(&doc, &mut registry, "a", el);

        doc.set_scroll_y(500.0);
        let names: Vec<_> = registry.update(&doc).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_default_toggle_policy_is_asymmetric() {
        let (mut doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        fade(&doc, &mut registry, "hero", el);

        doc.set_scroll_y(500.0);
        registry.update(&doc);
        registry.tick(100.0);
        assert_eq!(registry.get("hero").unwrap().progress(), 1.0);

        // Leaving past the end and coming back does nothing
        doc.set_scroll_y(2000.0);
        registry.update(&doc);
        doc.set_scroll_y(800.0);
        registry.update(&doc);
        registry.tick(100.0);
        assert_eq!(registry.get("hero").unwrap().progress(), 1.0);

        // Scrolling above the start rewinds
        doc.set_scroll_y(0.0);
        registry.update(&doc);
        registry.tick(50.0);
        assert_eq!(registry.get("hero").unwrap().progress(), 0.5);
    }

    #[test]
    fn test_scrub_tracks_scroll_position() {
        let (mut doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        registry
            .create_or_replace(
                &doc,
                "scrubbed",
                &[el],
                RevealPreset::FadeIn.animation().easing(Easing::Linear),
                TriggerSpec::new("top bottom".parse().unwrap(), "top top".parse().unwrap())
                    .scrub(true),
            )
            .unwrap();

        // range: 1000 - 720 = 280 .. 1000
        doc.set_scroll_y(640.0);
        registry.update(&doc);
        assert_eq!(registry.get("scrubbed").unwrap().progress(), 0.5);

        registry.tick(10_000.0);
        registry.apply(&mut doc);
        assert_eq!(doc.style(el, "opacity"), Some("0.500"));
    }

    #[test]
    fn test_content_reveal_offsets_are_evenly_staggered() {
        let mut doc = Document::new();
        let elements: Vec<_> = (0..5)
            .map(|i| doc.mount(Bounds::new(0.0, 900.0 + i as f32 * 50.0, 300.0, 40.0)))
            .collect();

        let mut registry = ScrollRevealRegistry::new();
        registry
            .create_content_reveal(
                &doc,
                "cards",
                &elements,
                &ContentRevealOptions::new(RevealPreset::SlideLeft).stagger_ms(120.0),
            )
            .unwrap();

        let offsets: Vec<f32> = registry.get("cards").unwrap().offsets().collect();
        assert_eq!(offsets, vec![0.0, 120.0, 240.0, 360.0, 480.0]);
    }

    #[test]
    fn test_content_reveal_rejects_bad_stagger() {
        let (doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        for bad in [0.0, -50.0, f32::NAN] {
            let result = registry.create_content_reveal(
                &doc,
                "bad",
                &[el],
                &ContentRevealOptions::default().stagger_ms(bad),
            );
            assert!(matches!(result, Err(AnimationError::InvalidStagger(_))));
        }
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_staggered_targets_start_in_order() {
        let mut doc = Document::new();
        let first = doc.mount(Bounds::new(0.0, 100.0, 100.0, 20.0));
        let second = doc.mount(Bounds::new(0.0, 130.0, 100.0, 20.0));

        let mut registry = ScrollRevealRegistry::new();
        registry
            .create_content_reveal(
                &doc,
                "list",
                &[first, second],
                &ContentRevealOptions::new(RevealPreset::FadeIn)
                    .stagger_ms(100.0)
                    .duration_ms(100.0)
                    .easing(Easing::Linear),
            )
            .unwrap();

        registry.update(&doc);
        registry.tick(100.0);
        registry.apply(&mut doc);
        assert_eq!(doc.style(first, "opacity"), Some("1.000"));
        assert_eq!(doc.style(second, "opacity"), Some("0.000"));
    }

    #[test]
    fn test_reduced_motion_uses_collapsed_fade() {
        let (mut doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        registry
            .create_or_replace(
                &doc,
                "hero",
                &[el],
                RevealPreset::FadeUp.animation(),
                TriggerSpec::default(),
            )
            .unwrap();
        registry.set_reduced_motion(true);

        doc.set_scroll_y(500.0);
        registry.update(&doc);
        assert!(!registry.tick(COLLAPSED_DURATION_MS));
        registry.apply(&mut doc);

        assert_eq!(doc.style(el, "opacity"), Some("1.000"));
        assert_eq!(doc.style(el, "translate-y"), None);
    }

    #[test]
    fn test_on_toggle_callback_receives_events() {
        let (mut doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        fade(&doc, &mut registry, "hero", el);

        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            assert!(registry.set_on_toggle("hero", move |e| seen.borrow_mut().push(e)));
        }
        assert!(!registry.set_on_toggle("ghost", |_| {}));

        doc.set_scroll_y(600.0);
        registry.update(&doc);
        assert_eq!(*seen.borrow(), vec![ScrollEvent::Enter]);
    }

    #[test]
    fn test_remove_all_clears_bindings() {
        let (doc, el) = setup();
        let mut registry = ScrollRevealRegistry::new();
        fade(&doc, &mut registry, "a", el);
        fade(&doc, &mut registry, "b", el);

        assert_eq!(registry.remove_all(), 2);
        assert!(registry.is_empty());
        assert!(!registry.remove("a"));
    }
}
