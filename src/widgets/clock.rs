//! `HH:MM` clock overlay in the top-left corner.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::config::CLOCK_MARGIN_DIVISOR;
use crate::text::DynamicText;

/// Top-left corner of the clock text.
pub fn clock_position(frame: Size) -> Point {
    let margin = (frame.height / CLOCK_MARGIN_DIVISOR) as i32;
    Point::new(margin, margin)
}

/// Draw the clock if it has rendered at least once.
pub fn draw_clock<D>(target: &mut D, frame: Size, clock: &DynamicText) -> bool
where
    D: DrawTarget<Color = Rgb888>,
{
    clock.draw(target, clock_position(frame))
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::{BLACK, CLOCK_GREY};
    use crate::styles::clock_spec;
    use crate::text::MonoRasterizer;

    #[test]
    fn test_clock_position_margin() {
        assert_eq!(clock_position(Size::new(1920, 1080)), Point::new(10, 10));
    }

    #[test]
    fn test_draw_clock_grey_inside_margin() {
        let frame = Size::new(480, 300);
        let mut clock = DynamicText::new(clock_spec(frame));
        clock.update_str("12:34", &MonoRasterizer).unwrap();

        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(frame);
        assert!(draw_clock(&mut display, frame, &clock));

        let size = clock.size().unwrap();
        let mut grey = 0;
        for y in 0..frame.height as i32 {
            for x in 0..frame.width as i32 {
                let c = display.get_pixel(Point::new(x, y));
                if c == BLACK {
                    continue;
                }
                assert_eq!(c, CLOCK_GREY);
                assert!(x >= 3 && y >= 3 && x < 3 + size.width as i32 && y < 3 + size.height as i32);
                grey += 1;
            }
        }
        assert!(grey > 0);
    }

    #[test]
    fn test_unrendered_clock_draws_nothing() {
        let frame = Size::new(64, 64);
        let clock = DynamicText::new(clock_spec(frame));
        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(frame);
        assert!(!draw_clock(&mut display, frame, &clock));
    }
}
