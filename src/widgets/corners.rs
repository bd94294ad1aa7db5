//! Corner ornaments anchored to the bottom-left and bottom-right of the frame.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, Triangle};

use crate::colors::{ORNAMENT, TEXT};
use crate::config::{CORNER_HEIGHT_DIVISOR, CORNER_WIDTH_DIVISOR};

const FILL: PrimitiveStyle<Rgb888> = PrimitiveStyle::with_fill(ORNAMENT);

/// Area each ornament occupies, `(left, right)`.
pub fn corner_rects(frame: Size) -> (Rectangle, Rectangle) {
    let size = Size::new(frame.width / CORNER_WIDTH_DIVISOR, frame.height / CORNER_HEIGHT_DIVISOR);
    let y = (frame.height - size.height) as i32;
    let left = Rectangle::new(Point::new(0, y), size);
    let right = Rectangle::new(Point::new((frame.width - size.width) as i32, y), size);
    (left, right)
}

pub fn draw_corners<D>(target: &mut D, frame: Size) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let (left, right) = corner_rects(frame);
    draw_ornament(target, left, false)?;
    draw_ornament(target, right, true)
}

/// Filled right triangle in the frame corner, with an accent line along its hypotenuse.
fn draw_ornament<D>(
    target: &mut D,
    area: Rectangle,
    mirrored: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let Some(bottom_right) = area.bottom_right() else {
        return Ok(());
    };
    let (top, bottom) = (area.top_left.y, bottom_right.y);
    let (outer, inner) = if mirrored { (bottom_right.x, area.top_left.x) } else { (area.top_left.x, bottom_right.x) };

    Triangle::new(Point::new(outer, top), Point::new(outer, bottom), Point::new(inner, bottom))
        .into_styled(FILL)
        .draw(target)?;

    // Accent inset by a tenth of the ornament height
    let inset = (area.size.height / 10) as i32;
    let step = if mirrored { -inset } else { inset };
    let stroke = (area.size.height / 40).max(1);
    Line::new(Point::new(outer, top + inset), Point::new(inner - step, bottom))
        .into_styled(PrimitiveStyle::with_stroke(TEXT, stroke))
        .draw(target)?;
    Ok(())
}
