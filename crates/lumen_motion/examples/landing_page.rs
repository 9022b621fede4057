//! Landing Page Demo
//!
//! Drives a simulated landing page through a few seconds of frames: the
//! headline types in, the call-to-action is hovered, the feature section is
//! scrolled into view and the reduced-motion preference is flipped halfway.
//!
//! Run with: RUST_LOG=debug cargo run -p lumen_motion --example landing_page

use lumen_core::{Bounds, Document};
use lumen_motion::prelude::*;
use lumen_platform::{FrameClock, ManualClock};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut doc = Document::new();
    let backdrop = doc.mount(Bounds::new(0.0, 0.0, 1280.0, 720.0));
    let headline = doc.mount(Bounds::new(160.0, 200.0, 960.0, 80.0));
    doc.set_text(headline, "Motion that respects you");
    let cta = doc.mount(Bounds::new(560.0, 420.0, 160.0, 48.0));
    let features = doc.mount(Bounds::new(0.0, 1100.0, 1280.0, 400.0));
    let card = doc.mount(Bounds::new(160.0, 1700.0, 320.0, 240.0));

    let query: Box<dyn MotionQuery> = Box::new(EnvMotionQuery);
    let mut motion = MotionCoordinator::new(CoordinatorConfig::standard(), Some(query));
    motion.start();

    let components = [
        ("backdrop", backdrop, ComponentKind::ParticleField),
        ("headline", headline, ComponentKind::Text),
        ("cta", cta, ComponentKind::Button),
        ("card", card, ComponentKind::Card),
    ];
    for (id, target, kind) in components {
        motion.register_component(&mut doc, id, target, ComponentOptions::new(kind))?;
    }

    let slide_in = ContentRevealOptions::new(RevealPreset::SlideLeft)
        .start("top 90%".parse::<ScrollPosition>()?);
    motion.register_component(
        &mut doc,
        "features",
        features,
        ComponentOptions::new(ComponentKind::Generic).reveal(slide_in),
    )?;

    motion.subscribe_motion_preference(|reduced| {
        tracing::info!("subscriber saw reduced motion = {}", reduced);
    });

    let clock = ManualClock::new();
    for frame in 0..240 {
        match frame {
            30 => {
                let entered = PointerEvent::Entered { target: cta };
                motion.handle_event(&mut doc, HostEvent::Pointer(entered));
            }
            60 => {
                let left = PointerEvent::Left { target: cta };
                motion.handle_event(&mut doc, HostEvent::Pointer(left));
            }
            90 => {
                let fired = motion.handle_event(&mut doc, HostEvent::Scroll { scroll_y: 600.0 });
                for transition in fired {
                    tracing::info!("{} fired {:?}", transition.name, transition.event);
                }
            }
            120 => motion.set_reduced_motion(true),
            180 => motion.set_reduced_motion(false),
            _ => {}
        }
        motion.frame(&mut doc, &clock);
        clock.advance(FRAME_MS);
    }

    if let Some(first) = doc.children(headline).first() {
        println!("headline opacity: {:?}", doc.style(*first, "opacity"));
    }
    println!("features opacity: {:?}", doc.style(features, "opacity"));
    println!("cta scale: {:?}", doc.style(cta, "scale"));
    println!("simulated {:.0}ms", clock.now_ms());
    println!("{}", motion.status().to_json_pretty()?);

    motion.destroy(&mut doc);
    Ok(())
}
