//! Sponsor badges: a light rounded plate with the sponsor name fitted inside.
//!
//! Badges stand in for sponsor artwork. Each one has a fixed aspect ratio so
//! the panel layouts can size them from one dimension the same way they would
//! size an image.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::colors::{BADGE_FILL, BADGE_TEXT};
use crate::render::targets::Magnified;
use crate::styles::{CAPTION_FONT, caption_spec};

const PLATE_STYLE: PrimitiveStyle<Rgb888> = PrimitiveStyle::with_fill(BADGE_FILL);

/// A sponsor name with the proportions of its plate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub caption: &'static str,
    aspect_w: u32,
    aspect_h: u32,
}

impl Badge {
    /// `aspect_w : aspect_h` is the plate's width to height ratio.
    pub const fn new(caption: &'static str, aspect_w: u32, aspect_h: u32) -> Self {
        Self { caption, aspect_w, aspect_h }
    }

    #[inline]
    pub const fn width_for_height(&self, height: u32) -> u32 { height * self.aspect_w / self.aspect_h }

    #[inline]
    pub const fn height_for_width(&self, width: u32) -> u32 { width * self.aspect_h / self.aspect_w }
}

/// Largest caption magnification that fits the plate: half its height, 90% of its width.
pub fn caption_factor(caption: &str, plate: Size) -> u32 {
    let chars = caption.chars().count() as u32;
    if chars == 0 {
        return 1;
    }
    let glyph = CAPTION_FONT.character_size;
    let base_width = chars * glyph.width + (chars - 1) * CAPTION_FONT.character_spacing;
    let by_height = caption_spec(plate.height).magnification();
    let by_width = plate.width * 9 / 10 / base_width;
    by_height.min(by_width).max(1)
}

pub fn draw_badge<D>(
    target: &mut D,
    badge: &Badge,
    plate: Rectangle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let radius = plate.size.height / 6;
    RoundedRectangle::with_equal_corners(plate, Size::new(radius, radius))
        .into_styled(PLATE_STYLE)
        .draw(target)?;

    let factor = caption_factor(badge.caption, plate.size);
    let chars = badge.caption.chars().count() as u32;
    let glyph = CAPTION_FONT.character_size;
    let text_w = (chars * glyph.width + chars.saturating_sub(1) * CAPTION_FONT.character_spacing) * factor;
    let text_h = glyph.height * factor;
    let origin = plate.top_left
        + Point::new(
            (plate.size.width as i32 - text_w as i32) / 2,
            (plate.size.height as i32 - text_h as i32) / 2,
        );

    let style = MonoTextStyle::new(CAPTION_FONT, BADGE_TEXT);
    let mut magnified = Magnified::new(target, origin, factor);
    Text::with_baseline(badge.caption, Point::zero(), style, Baseline::Top).draw(&mut magnified)?;
    Ok(())
}
