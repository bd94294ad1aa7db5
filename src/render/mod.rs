//! Frame renderer: turns a [`FramePlan`] into draw calls.
//!
//! # Draw Order
//!
//! ```text
//! 1. clear to black
//! 2. background fill
//! 3. corner ornaments
//! 4. heartbeat logo (echo, then primary)
//! 5. clock overlay
//! 6. panel(s)
//! ```
//!
//! # Transitions
//!
//! | Style       | Outgoing panel                      | Incoming panel                      |
//! |-------------|-------------------------------------|-------------------------------------|
//! | `slide`     | clipped to + translated by viewport | clipped to + translated by viewport |
//! | `crossfade` | full frame, opacity `1 - p`         | full frame, opacity `p`             |
//!
//! A crossfade draws the fainter panel first so the stronger one stays intact.
//!
//! The full frame is restored after a transition because every sub-target is
//! a temporary borrow of the real one.

pub mod targets;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::colors::{BACKGROUND, BLACK};
use crate::content::ContentStore;
use crate::rotation::{PanelPlan, Transition};
use crate::scheduler::{FramePlan, TransitionStyle};
use crate::screens::draw_panel;
use crate::widgets::{draw_clock, draw_corners, draw_logo};

use self::targets::Faded;

const BACKGROUND_FILL: PrimitiveStyle<Rgb888> = PrimitiveStyle::with_fill(BACKGROUND);

/// Draw one complete frame of logical size `frame`.
pub fn draw_frame<D>(
    target: &mut D,
    plan: &FramePlan,
    frame: Size,
    content: &ContentStore,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.clear(BLACK)?;
    Rectangle::new(Point::zero(), frame).into_styled(BACKGROUND_FILL).draw(target)?;

    draw_corners(target, frame)?;
    draw_logo(target, frame, &plan.pulse)?;
    draw_clock(target, frame, &content.clock);

    match plan.panels {
        PanelPlan::Single(panel) => draw_panel(panel, target, frame, content),
        PanelPlan::Transition(transition) => match plan.style {
            TransitionStyle::Slide => draw_slide(target, &transition, frame, content),
            TransitionStyle::Crossfade => draw_crossfade(target, &transition, frame, content),
        },
    }
}

fn draw_slide<D>(
    target: &mut D,
    transition: &Transition,
    frame: Size,
    content: &ContentStore,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let sides = [
        (transition.outgoing, transition.outgoing_viewport),
        (transition.incoming, transition.incoming_viewport),
    ];
    for (panel, viewport) in sides {
        let mut clipped = target.clipped(&viewport);
        let mut shifted = clipped.translated(viewport.top_left);
        draw_panel(panel, &mut shifted, frame, content)?;
    }
    Ok(())
}

fn draw_crossfade<D>(
    target: &mut D,
    transition: &Transition,
    frame: Size,
    content: &ContentStore,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    // Fading only knows the background, so the stronger panel goes on top
    let p = transition.progress;
    let outgoing = (transition.outgoing, 1.0 - p);
    let incoming = (transition.incoming, p);
    let layers = if p < 0.5 { [incoming, outgoing] } else { [outgoing, incoming] };
    for (panel, alpha) in layers {
        draw_panel(panel, &mut Faded::new(target, BACKGROUND, alpha), frame, content)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::{BADGE_FILL, blend};
    use crate::content::Labels;
    use crate::heartbeat::Heartbeat;
    use crate::panels::Panel;
    use crate::rotation::Rotation;
    use crate::scheduler::Scheduler;
    use crate::screens::hacktoberfest_layout;
    use crate::text::MonoRasterizer;

    const FRAME: Size = Size::new(480, 270);

    fn scheduler(style: TransitionStyle) -> Scheduler {
        Scheduler::new(
            Rotation::new(vec![Panel::Counter, Panel::HacktoberfestSponsors], 5000, 500).unwrap(),
            Heartbeat::new(5000, 200, 800, 1.05, 1.25, 0.35).unwrap(),
            style,
        )
    }

    fn store() -> ContentStore {
        let mut store = ContentStore::new(FRAME);
        store.render_static(&Labels::default(), &MonoRasterizer);
        store.counter.update_str("42", &MonoRasterizer).unwrap();
        store
    }

    /// A point on the Hacktoberfest badge plate, in panel coordinates.
    fn badge_point(store: &ContentStore) -> Point {
        let badge = hacktoberfest_layout(FRAME, &store.hacktoberfest_header).badges[0];
        badge.top_left + Point::new(badge.size.width as i32 / 4, 3)
    }

    fn render(style: TransitionStyle, ticks: u64, store: &ContentStore) -> SimulatorDisplay<Rgb888> {
        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(FRAME);
        let plan = scheduler(style).plan(ticks, FRAME);
        draw_frame(&mut display, &plan, FRAME, store).unwrap();
        display
    }

    #[test]
    fn test_background_fills_frame() {
        let display = render(TransitionStyle::Slide, 1000, &store());
        // Between the logo and the counter label nothing else is drawn
        assert_eq!(display.get_pixel(Point::new(5, 120)), BACKGROUND);
    }

    #[test]
    fn test_single_panel_has_no_badges() {
        let display = render(TransitionStyle::Slide, 1000, &store());
        assert!(display.bounding_box().points().all(|p| display.get_pixel(p) != BADGE_FILL));
    }

    #[test]
    fn test_slide_shifts_incoming_panel() {
        let store = store();
        let plan = scheduler(TransitionStyle::Slide).plan(4800, FRAME);
        let PanelPlan::Transition(transition) = plan.panels else {
            panic!("expected a transition at 4800ms");
        };
        let display = render(TransitionStyle::Slide, 4800, &store);

        let point = badge_point(&store) + transition.incoming_viewport.top_left;
        assert!(point.x < FRAME.width as i32, "point should be on screen");
        assert_eq!(display.get_pixel(point), BADGE_FILL, "badge drawn at its viewport offset");
        assert_ne!(display.get_pixel(badge_point(&store)), BADGE_FILL, "unshifted position is empty");
    }

    #[test]
    fn test_crossfade_blends_both_panels() {
        let store = store();
        let display = render(TransitionStyle::Crossfade, 4800, &store);
        let expected = blend(BACKGROUND, BADGE_FILL, 0.6);
        let actual = display.get_pixel(badge_point(&store));
        for (a, e) in [(actual.r(), expected.r()), (actual.g(), expected.g()), (actual.b(), expected.b())] {
            assert!(a.abs_diff(e) <= 1, "incoming at 60%: {actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_crossfade_start_matches_previous_frame() {
        let store = store();
        let before = render(TransitionStyle::Crossfade, 4499, &store);
        let after = render(TransitionStyle::Crossfade, 4501, &store);
        for p in before.bounding_box().points() {
            let (a, b) = (after.get_pixel(p), before.get_pixel(p));
            let diff = a.r().abs_diff(b.r()).max(a.g().abs_diff(b.g())).max(a.b().abs_diff(b.b()));
            assert!(diff <= 2, "pixel {p:?} jumped from {b:?} to {a:?}");
        }
    }

    #[test]
    fn test_transition_after_slot_boundary_is_single() {
        let store = store();
        let display = render(TransitionStyle::Slide, 5000, &store);
        assert_eq!(display.get_pixel(badge_point(&store)), BADGE_FILL);
    }
}
