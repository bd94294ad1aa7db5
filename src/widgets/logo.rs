//! Heartbeat logo.
//!
//! The emblem is vector art scaled into whatever rectangle it is given, so the
//! pulse only has to change the rectangle:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   ◀        ( )         ▶     │   brackets + ring inside a rounded frame
//! └──────────────────────────────┘
//! ```
//!
//! The echo copy (if any) is drawn first at the echo scale, faded toward the
//! background, and the primary copy at the pulse's scale on top of it. The
//! fade only knows the background colour, so the echo stays behind.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment, Triangle,
};

use crate::colors::{BACKGROUND, LOGO_ACCENT, LOGO_PRIMARY};
use crate::config::{LOGO_ASPECT_DIVISOR, LOGO_WIDTH_DEN, LOGO_WIDTH_NUM};
use crate::geometry::scale_rect;
use crate::heartbeat::Pulse;
use crate::render::targets::Faded;

/// Unscaled logo placement: centred horizontally, touching the top edge.
pub fn logo_rect(frame: Size) -> Rectangle {
    let width = frame.width * LOGO_WIDTH_NUM / LOGO_WIDTH_DEN;
    let height = width / LOGO_ASPECT_DIVISOR;
    Rectangle::new(Point::new(((frame.width - width) / 2) as i32, 0), Size::new(width, height))
}

/// Draw the logo for one heartbeat sample.
pub fn draw_logo<D>(
    target: &mut D,
    frame: Size,
    pulse: &Pulse,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let base = logo_rect(frame);
    if let Some(echo) = pulse.echo {
        let mut faded = Faded::new(target, BACKGROUND, echo.opacity);
        draw_emblem(&mut faded, scale_rect(base, echo.scale))?;
    }

    let primary = pulse.primary_scale.map_or(base, |scale| scale_rect(base, scale));
    draw_emblem(target, primary)
}

/// Emblem artwork filling `area`.
pub fn draw_emblem<D>(target: &mut D, area: Rectangle) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let Size { width: w, height: h } = area.size;
    if w < 8 || h < 8 {
        return Ok(());
    }
    let stroke = (h / 16).max(1);
    let (x, y) = (area.top_left.x, area.top_left.y);
    let (wi, hi) = (w as i32, h as i32);

    RoundedRectangle::with_equal_corners(area, Size::new(h / 4, h / 4))
        .into_styled(inside_stroke(LOGO_PRIMARY, stroke))
        .draw(target)?;

    let fill = PrimitiveStyle::with_fill(LOGO_PRIMARY);
    let mid_y = y + hi / 2;
    Triangle::new(
        Point::new(x + wi / 10, mid_y),
        Point::new(x + wi / 4, y + hi / 4),
        Point::new(x + wi / 4, y + hi * 3 / 4),
    )
    .into_styled(fill)
    .draw(target)?;
    Triangle::new(
        Point::new(x + wi * 9 / 10, mid_y),
        Point::new(x + wi * 3 / 4, y + hi / 4),
        Point::new(x + wi * 3 / 4, y + hi * 3 / 4),
    )
    .into_styled(fill)
    .draw(target)?;

    Circle::with_center(area.center(), h / 2)
        .into_styled(inside_stroke(LOGO_ACCENT, stroke * 2))
        .draw(target)?;
    Ok(())
}

/// Outlines stay inside their shape so the emblem never exceeds its rectangle.
fn inside_stroke(color: Rgb888, width: u32) -> PrimitiveStyle<Rgb888> {
    PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(width)
        .stroke_alignment(StrokeAlignment::Inside)
        .build()
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::BLACK;
    use crate::heartbeat::{EchoCopy, Heartbeat, PulsePhase};

    const FRAME: Size = Size::new(480, 270);

    fn lit_bounds(display: &SimulatorDisplay<Rgb888>) -> Option<(i32, i32)> {
        let mut bounds: Option<(i32, i32)> = None;
        for x in 0..FRAME.width as i32 {
            for y in 0..FRAME.height as i32 {
                if display.get_pixel(Point::new(x, y)) != BLACK {
                    bounds = Some(bounds.map_or((x, x), |(lo, hi)| (lo.min(x), hi.max(x))));
                }
            }
        }
        bounds
    }

    #[test]
    fn test_logo_rect_centered_at_top() {
        let rect = logo_rect(Size::new(1920, 1080));
        assert_eq!(rect, Rectangle::new(Point::new(240, 0), Size::new(1440, 360)));
    }

    #[test]
    fn test_rest_draws_unscaled() {
        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(FRAME);
        let rest = Pulse { phase: PulsePhase::Rest, primary_scale: None, echo: None };
        draw_logo(&mut display, FRAME, &rest).unwrap();

        let base = logo_rect(FRAME);
        let (lo, hi) = lit_bounds(&display).unwrap();
        assert_eq!(lo, base.top_left.x);
        assert_eq!(hi, base.top_left.x + base.size.width as i32 - 1);
    }

    #[test]
    fn test_echo_grows_symmetrically() {
        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(FRAME);
        let echo = Pulse {
            phase: PulsePhase::Echo,
            primary_scale: Some(1.0),
            echo: Some(EchoCopy { scale: 1.2, opacity: 0.3 }),
        };
        draw_logo(&mut display, FRAME, &echo).unwrap();

        let base = logo_rect(FRAME);
        let (lo, hi) = lit_bounds(&display).unwrap();
        let left_growth = base.top_left.x - lo;
        let right_growth = hi - (base.top_left.x + base.size.width as i32 - 1);
        assert!(left_growth > 0, "echo should extend past the primary copy");
        assert!((left_growth - right_growth).abs() <= 1, "growth {left_growth} vs {right_growth}");
    }

    #[test]
    fn test_echo_is_dimmer_than_primary() {
        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(FRAME);
        let echo = Pulse {
            phase: PulsePhase::Echo,
            primary_scale: Some(1.0),
            echo: Some(EchoCopy { scale: 1.2, opacity: 0.3 }),
        };
        draw_logo(&mut display, FRAME, &echo).unwrap();

        // Leftmost lit column belongs to the echo outline only
        let (lo, _) = lit_bounds(&display).unwrap();
        let echo_px = (0..FRAME.height as i32)
            .map(|y| display.get_pixel(Point::new(lo, y)))
            .find(|c| *c != BLACK)
            .unwrap();
        assert_ne!(echo_px, LOGO_PRIMARY);
        assert!(echo_px.r() < LOGO_PRIMARY.r());
    }

    fn primary_pixels(pulse: &Pulse) -> usize {
        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(FRAME);
        draw_logo(&mut display, FRAME, pulse).unwrap();
        display.bounding_box().points().filter(|p| display.get_pixel(*p) == LOGO_PRIMARY).count()
    }

    #[test]
    fn test_primary_keeps_full_brightness_into_echo() {
        let hb = Heartbeat::new(5000, 200, 800, 1.05, 1.25, 0.35).unwrap();
        let before = primary_pixels(&hb.sample(5199));
        let at = primary_pixels(&hb.sample(5200));
        assert!(before > 0);
        assert!(at * 10 >= before * 9, "primary drops from {before} to {at} pixels");
    }

    #[test]
    fn test_tiny_area_is_skipped() {
        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(8, 8));
        draw_emblem(&mut display, Rectangle::new(Point::zero(), Size::new(4, 4))).unwrap();
        assert_eq!(display.get_pixel(Point::new(1, 1)), BLACK);
    }
}
