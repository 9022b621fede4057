//! Component kinds and their default enhancements
//!
//! Registering a component wires its target element to a timeline or a
//! scroll binding, depending on the kind:
//!
//! | Kind | Enhancement | Driven by |
//! |---|---|---|
//! | Button | hover scale and lift | pointer enter/leave |
//! | Text | staggered per-character reveal | plays on registration |
//! | Card | 3D tilt towards the pointer | pointer move/leave |
//! | Particle field | endless drift | plays on registration |
//! | Generic | fade-up scroll reveal | scroll position |

use crate::config::ComponentConfig;
use crate::error::CoordinatorError;
use lumen_animation::{
    ContentRevealOptions, Direction, MotionCategory, Property, ScrollRevealRegistry,
    SharedTimeline, TimelineOptions, TimelineRegistry, TimelineStep,
};
use lumen_core::{Bounds, Document, ElementId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Button,
    Text,
    Card,
    ParticleField,
    #[default]
    Generic,
}

impl ComponentKind {
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Button => "button",
            ComponentKind::Text => "text",
            ComponentKind::Card => "card",
            ComponentKind::ParticleField => "particle-field",
            ComponentKind::Generic => "generic",
        }
    }

    /// Category of the timeline backing this kind
    pub fn category(&self) -> MotionCategory {
        match self {
            ComponentKind::Button => MotionCategory::Hover,
            ComponentKind::Text => MotionCategory::Reveal,
            ComponentKind::Card => MotionCategory::Transform3d,
            ComponentKind::ParticleField => MotionCategory::Particle,
            ComponentKind::Generic => MotionCategory::Fade,
        }
    }

    /// Whether the kind is backed by a scroll binding instead of a timeline
    pub fn is_scroll_driven(&self) -> bool {
        matches!(self, ComponentKind::Generic)
    }
}

impl FromStr for ComponentKind {
    type Err = CoordinatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "button" => Ok(ComponentKind::Button),
            "text" => Ok(ComponentKind::Text),
            "card" => Ok(ComponentKind::Card),
            "particle-field" | "particles" | "particle" => Ok(ComponentKind::ParticleField),
            "generic" => Ok(ComponentKind::Generic),
            _ => Err(CoordinatorError::Animation(
                lumen_animation::AnimationError::UnknownKind(s.to_string()),
            )),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentOptions {
    pub kind: ComponentKind,
    /// Reveal used by generic components instead of the configured default
    pub reveal: Option<ContentRevealOptions>,
}

impl ComponentOptions {
    pub fn new(kind: ComponentKind) -> Self {
        Self { kind, reveal: None }
    }

    pub fn reveal(mut self, reveal: ContentRevealOptions) -> Self {
        self.reveal = Some(reveal);
        self
    }
}

/// Lifecycle state of a registered component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentState {
    Idle,
    Animating,
    Paused,
}

/// A registered component
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentHandle {
    pub id: String,
    pub kind: ComponentKind,
    pub target: ElementId,
    /// Backing timeline name
    pub timeline: Option<String>,
    /// Backing scroll binding name
    pub binding: Option<String>,
    /// Elements mounted by the enhancement (text character spans)
    pub generated: SmallVec<[ElementId; 8]>,
}

// =============================================================================
// Enhancements
// =============================================================================

pub(crate) fn timeline_name(kind: ComponentKind, id: &str) -> String {
    format!("{}:{}", kind.name(), id)
}

fn new_timeline(
    timelines: &mut TimelineRegistry,
    kind: ComponentKind,
    id: &str,
    options: TimelineOptions,
) -> (String, SharedTimeline) {
    let name = timeline_name(kind, id);
    let timeline = timelines.create_or_get(&name, options.category(kind.category()));
    (name, timeline)
}

/// Wire `target` up according to `options.kind`
pub(crate) fn enhance(
    doc: &mut Document,
    timelines: &mut TimelineRegistry,
    scroll: &mut ScrollRevealRegistry,
    config: &ComponentConfig,
    id: &str,
    target: ElementId,
    options: &ComponentOptions,
) -> Result<ComponentHandle, CoordinatorError> {
    let mut handle = ComponentHandle {
        id: id.to_string(),
        kind: options.kind,
        target,
        timeline: None,
        binding: None,
        generated: SmallVec::new(),
    };

    match options.kind {
        ComponentKind::Button => {
            let (name, timeline) = new_timeline(
                timelines,
                options.kind,
                id,
                TimelineOptions::new().duration_ms(config.hover_duration_ms),
            );
            let mut timeline = timeline.borrow_mut();
            let duration = timeline.default_duration_ms();
            let easing = timeline.default_easing();
            timeline.add(
                TimelineStep::new(Property::Scale, 1.0, config.hover_scale, duration)
                    .on(target)
                    .easing(easing),
            );
            timeline.add(
                TimelineStep::new(Property::Y, 0.0, -config.hover_lift_px, duration)
                    .on(target)
                    .easing(easing),
            );
            handle.timeline = Some(name);
        }
        ComponentKind::Text => {
            let (name, timeline) = new_timeline(
                timelines,
                options.kind,
                id,
                TimelineOptions::new()
                    .duration_ms(config.text_duration_ms)
                    .autoplay(true),
            );
            handle.generated = split_characters(doc, target);
            let mut timeline = timeline.borrow_mut();
            let duration = timeline.default_duration_ms();
            let easing = timeline.default_easing();
            let spans: SmallVec<[ElementId; 8]> = if handle.generated.is_empty() {
                SmallVec::from_slice(&[target])
            } else {
                handle.generated.clone()
            };
            for (i, span) in spans.iter().enumerate() {
                let offset = i as f32 * config.text_stagger_ms;
                timeline.add(
                    TimelineStep::new(Property::Opacity, 0.0, 1.0, duration)
                        .on(*span)
                        .at(offset)
                        .easing(easing),
                );
                timeline.add(
                    TimelineStep::new(Property::Y, 20.0, 0.0, duration)
                        .on(*span)
                        .at(offset)
                        .easing(easing),
                );
            }
            handle.timeline = Some(name);
        }
        ComponentKind::Card => {
            let (name, timeline) = new_timeline(
                timelines,
                options.kind,
                id,
                TimelineOptions::new().duration_ms(config.tilt_duration_ms),
            );
            let mut timeline = timeline.borrow_mut();
            let duration = timeline.default_duration_ms();
            let easing = timeline.default_easing();
            timeline.add(
                TimelineStep::new(Property::RotateX, 0.0, 0.0, duration)
                    .on(target)
                    .easing(easing),
            );
            timeline.add(
                TimelineStep::new(Property::RotateY, 0.0, 0.0, duration)
                    .on(target)
                    .easing(easing),
            );
            handle.timeline = Some(name);
        }
        ComponentKind::ParticleField => {
            let (name, timeline) = new_timeline(
                timelines,
                options.kind,
                id,
                TimelineOptions::new()
                    .duration_ms(config.particle_period_ms)
                    .infinite()
                    .yoyo(true)
                    .autoplay(true),
            );
            let mut timeline = timeline.borrow_mut();
            let duration = timeline.default_duration_ms();
            let jitter = config.particle_jitter_px;
            timeline.add(
                TimelineStep::new(Property::X, -jitter, jitter, duration)
                    .on(target)
                    .easing(lumen_animation::Easing::SineInOut),
            );
            timeline.add(
                TimelineStep::new(Property::Y, jitter, -jitter, duration)
                    .on(target)
                    .easing(lumen_animation::Easing::SineInOut),
            );
            doc.set_style(target, "will-change", "transform");
            handle.timeline = Some(name);
        }
        ComponentKind::Generic => {
            let reveal = options.reveal.clone().unwrap_or_else(|| {
                ContentRevealOptions::new(config.reveal_preset)
                    .duration_ms(config.reveal_duration_ms)
                    .start(config.reveal_start)
                    .end(config.reveal_end)
            });
            let name = timeline_name(options.kind, id);
            scroll.create_content_reveal(doc, &name, &[target], &reveal)?;
            handle.binding = Some(name);
        }
    }

    tracing::debug!("enhanced {} component {:?}", options.kind.name(), id);
    Ok(handle)
}

/// Undo what [`enhance`] did
pub(crate) fn teardown(
    doc: &mut Document,
    timelines: &mut TimelineRegistry,
    scroll: &mut ScrollRevealRegistry,
    handle: &ComponentHandle,
) {
    if let Some(name) = &handle.timeline {
        timelines.kill(name);
    }
    if let Some(name) = &handle.binding {
        scroll.remove(name);
    }
    for span in &handle.generated {
        doc.unmount(*span);
    }
    if handle.kind == ComponentKind::ParticleField {
        doc.remove_style(handle.target, "will-change");
    }
}

/// Mount one child span per visible character of the target's text
fn split_characters(doc: &mut Document, target: ElementId) -> SmallVec<[ElementId; 8]> {
    let Some(text) = doc.text(target).map(str::to_owned) else {
        return SmallVec::new();
    };
    let Some(bounds) = doc.bounds(target) else {
        return SmallVec::new();
    };
    let count = text.chars().count().max(1);
    let width = bounds.width / count as f32;

    let mut spans = SmallVec::new();
    for (i, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let span_bounds = Bounds::new(bounds.x + i as f32 * width, bounds.y, width, bounds.height);
        if let Some(span) = doc.mount_child(target, span_bounds) {
            doc.set_text(span, ch.to_string());
            spans.push(span);
        }
    }
    spans
}

/// Retarget a card's tilt towards a pointer position
pub(crate) fn tilt_towards(
    timeline: &SharedTimeline,
    bounds: Bounds,
    pointer: Option<(f32, f32)>,
    max_deg: f32,
) {
    let (rotate_x, rotate_y) = match pointer {
        Some((x, y)) if bounds.width > 0.0 && bounds.height > 0.0 => {
            let dx = ((x - bounds.center_x()) / (bounds.width / 2.0)).clamp(-1.0, 1.0);
            let dy = ((y - bounds.center_y()) / (bounds.height / 2.0)).clamp(-1.0, 1.0);
            (-dy * max_deg, dx * max_deg)
        }
        _ => (0.0, 0.0),
    };

    let mut timeline = timeline.borrow_mut();
    let current: SmallVec<[f32; 2]> = (0..2).filter_map(|i| timeline.value(i)).collect();
    for (index, to) in [rotate_x, rotate_y].into_iter().enumerate() {
        let from = current.get(index).copied().unwrap_or(0.0);
        if let Some(step) = timeline.step_mut(index) {
            step.from = from;
            step.to = to;
        }
    }
    timeline.restart();
}

/// Lifecycle state derived from the backing animation
pub(crate) fn state_of(
    handle: &ComponentHandle,
    timelines: &TimelineRegistry,
    scroll: &ScrollRevealRegistry,
    globally_paused: bool,
) -> ComponentState {
    if let Some(timeline) = handle.timeline.as_deref().and_then(|n| timelines.get(n)) {
        let timeline = timeline.borrow();
        return if timeline.is_paused() && (timeline.is_held() || timeline.is_suppressed()) {
            ComponentState::Paused
        } else if timeline.is_active() {
            ComponentState::Animating
        } else {
            ComponentState::Idle
        };
    }
    if let Some(binding) = handle.binding.as_deref().and_then(|n| scroll.get(n)) {
        return if binding.is_animating() {
            if globally_paused {
                ComponentState::Paused
            } else {
                ComponentState::Animating
            }
        } else {
            ComponentState::Idle
        };
    }
    ComponentState::Idle
}

/// Send a button timeline towards its hovered or resting end
pub(crate) fn hover(timeline: &SharedTimeline, entered: bool) {
    let mut timeline = timeline.borrow_mut();
    if entered {
        timeline.play();
    } else if timeline.direction() == Direction::Forward || timeline.time_ms() > 0.0 {
        timeline.reverse();
    }
}
