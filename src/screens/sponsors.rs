//! Sponsor panels. Each one is a header above a row of badges.
//!
//! # Meetup Sponsors
//!
//! Two badges around a centre shifted by half their width difference, each
//! `w / 20` away from it. Allegro is 10% taller and sinks by a tenth of its
//! height so both read as sharing a baseline.
//!
//! # Media Patrons
//!
//! Three badges left to right. The free width is split into sixths: two for
//! the left margin, one between each pair of badges (the remaining two are the
//! right margin).
//!
//! # Hacktoberfest Sponsors
//!
//! One badge, centred, bottom at `h - h / 25`.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{
    BADGE_BAND_DIVISOR,
    COUNTER_BOTTOM_DIVISOR,
    HEADER_GAP_DIVISOR,
    MEETUP_BADGE_HEIGHT_DIVISOR,
    MEETUP_BADGE_SPREAD_DIVISOR,
    PATRON_BADGE_WIDTH_DIVISOR,
};
use crate::content::ContentStore;
use crate::text::DynamicText;
use crate::widgets::{Badge, draw_badge};

// =============================================================================
// Badges
// =============================================================================

pub const SONALAKE: Badge = Badge::new("Sonalake", 4, 1);
pub const ALLEGRO: Badge = Badge::new("Allegro", 3, 1);

pub const POIT: Badge = Badge::new("PoIT", 1, 1);
pub const OSWORLD: Badge = Badge::new("OSWorld", 3, 1);
pub const LINUXIARZE: Badge = Badge::new("Linuxiarze", 4, 1);

pub const DO_AND_DEV: Badge = Badge::new("DigitalOcean & DEV", 4, 1);

/// Hacktoberfest badge width: `w * 2 / 5`.
const DO_AND_DEV_WIDTH_NUM: u32 = 2;
const DO_AND_DEV_WIDTH_DEN: u32 = 5;

// =============================================================================
// Layout
// =============================================================================

/// Badge rectangles of a sponsor panel and its header, if the header has rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SponsorLayout<const N: usize> {
    pub badges: [Rectangle; N],
    pub header: Option<Rectangle>,
}

/// Header centred horizontally, ending `header_h / 5` above `top`.
fn header_above(frame: Size, header: &DynamicText, top: i32) -> Option<Rectangle> {
    header.size().map(|size| {
        let hh = size.height as i32;
        Rectangle::new(
            Point::new((frame.width as i32 - size.width as i32) / 2, top - hh - hh / HEADER_GAP_DIVISOR as i32),
            size,
        )
    })
}

/// Bottom edge of the badge band.
fn band_bottom(frame: Size) -> i32 { (frame.height - frame.height / BADGE_BAND_DIVISOR) as i32 }

pub fn meetup_layout(frame: Size, header: &DynamicText) -> SponsorLayout<2> {
    let (w, h) = (frame.width as i32, frame.height);

    let sona_h = h / MEETUP_BADGE_HEIGHT_DIVISOR;
    let sona = Size::new(SONALAKE.width_for_height(sona_h), sona_h);
    let alle_h = sona_h * 11 / 10;
    let alle = Size::new(ALLEGRO.width_for_height(alle_h), alle_h);

    let center = w / 2 + (sona.width as i32 - alle.width as i32) / 2;
    let spread = w / MEETUP_BADGE_SPREAD_DIVISOR as i32;
    let bottom = band_bottom(frame);

    let sona_rect = Rectangle::new(Point::new(center - spread - sona.width as i32, bottom - sona.height as i32), sona);
    let alle_rect = Rectangle::new(Point::new(center + spread, bottom - (alle.height * 9 / 10) as i32), alle);

    let top = sona_rect.top_left.y.min(alle_rect.top_left.y);
    SponsorLayout { badges: [sona_rect, alle_rect], header: header_above(frame, header, top) }
}

pub fn media_patrons_layout(frame: Size, header: &DynamicText) -> SponsorLayout<3> {
    let badge_w = frame.width / PATRON_BADGE_WIDTH_DIVISOR;
    let lin = Size::new(badge_w, LINUXIARZE.height_for_width(badge_w));
    let osw = Size::new(badge_w, OSWORLD.height_for_width(badge_w));
    let poit_h = lin.height * 5 / 3;
    let poit = Size::new(POIT.width_for_height(poit_h), poit_h);

    let bottom = band_bottom(frame);
    let space_left = frame.width as i32 - (poit.width + osw.width + lin.width) as i32;
    let spacing = space_left / 6;
    let margin = spacing * 2;

    let poit_x = margin;
    let osw_x = poit_x + poit.width as i32 + spacing;
    let lin_x = osw_x + osw.width as i32 + spacing;

    let poit_rect = Rectangle::new(Point::new(poit_x, bottom - (poit.height * 4 / 5) as i32), poit);
    let osw_rect = Rectangle::new(Point::new(osw_x, bottom - osw.height as i32), osw);
    let lin_rect = Rectangle::new(Point::new(lin_x, bottom - lin.height as i32), lin);

    SponsorLayout {
        badges: [poit_rect, osw_rect, lin_rect],
        header: header_above(frame, header, poit_rect.top_left.y),
    }
}

pub fn hacktoberfest_layout(frame: Size, header: &DynamicText) -> SponsorLayout<1> {
    let badge_w = frame.width * DO_AND_DEV_WIDTH_NUM / DO_AND_DEV_WIDTH_DEN;
    let size = Size::new(badge_w, DO_AND_DEV.height_for_width(badge_w));
    let (w, h) = (frame.width as i32, frame.height as i32);

    let rect = Rectangle::new(
        Point::new((w - size.width as i32) / 2, h - h / COUNTER_BOTTOM_DIVISOR as i32 - size.height as i32),
        size,
    );
    SponsorLayout { badges: [rect], header: header_above(frame, header, rect.top_left.y) }
}

// =============================================================================
// Drawing
// =============================================================================

fn draw_sponsors<D, const N: usize>(
    target: &mut D,
    layout: &SponsorLayout<N>,
    badges: &[Badge; N],
    header: &DynamicText,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    for (badge, rect) in badges.iter().zip(layout.badges) {
        draw_badge(target, badge, rect)?;
    }
    if let (Some(rect), Some(texture)) = (layout.header, header.texture()) {
        texture.draw(target, rect.top_left)?;
    }
    Ok(())
}

pub fn draw_meetup_sponsors<D>(target: &mut D, frame: Size, content: &ContentStore) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let layout = meetup_layout(frame, &content.meetup_header);
    draw_sponsors(target, &layout, &[SONALAKE, ALLEGRO], &content.meetup_header)
}

pub fn draw_media_patrons<D>(target: &mut D, frame: Size, content: &ContentStore) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let layout = media_patrons_layout(frame, &content.media_header);
    draw_sponsors(target, &layout, &[POIT, OSWORLD, LINUXIARZE], &content.media_header)
}

pub fn draw_hacktoberfest_sponsors<D>(target: &mut D, frame: Size, content: &ContentStore) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let layout = hacktoberfest_layout(frame, &content.hacktoberfest_header);
    draw_sponsors(target, &layout, &[DO_AND_DEV], &content.hacktoberfest_header)
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::{BADGE_FILL, BLACK, TEXT};
    use crate::content::Labels;
    use crate::styles::header_spec;
    use crate::text::MonoRasterizer;

    const FRAME: Size = Size::new(1920, 1080);

    fn rendered_header(text: &str) -> DynamicText {
        let mut header = DynamicText::new(header_spec(FRAME));
        header.update_str(text, &MonoRasterizer).unwrap();
        header
    }

    fn bottom(rect: &Rectangle) -> i32 { rect.top_left.y + rect.size.height as i32 }

    #[test]
    fn test_meetup_layout() {
        let layout = meetup_layout(FRAME, &rendered_header("POZNAN MEETUP SPONSORS"));
        let [sona, alle] = layout.badges;

        assert_eq!(sona.size, Size::new(480, 120));
        assert_eq!(alle.size, Size::new(396, 132));
        // centre = 960 + (480 - 396) / 2 = 1002, spread = 96
        assert_eq!(sona.top_left.x, 1002 - 96 - 480);
        assert_eq!(alle.top_left.x, 1002 + 96);
        assert_eq!(bottom(&sona), 972);
        assert_eq!(alle.top_left.y, 972 - 118);

        let header = layout.header.unwrap();
        let top = sona.top_left.y.min(alle.top_left.y);
        assert_eq!(bottom(&header) + header.size.height as i32 / 5, top);
    }

    #[test]
    fn test_media_patrons_layout() {
        let layout = media_patrons_layout(FRAME, &rendered_header("MEDIA PATRONS"));
        let [poit, osw, lin] = layout.badges;

        assert_eq!(lin.size, Size::new(480, 120));
        assert_eq!(osw.size, Size::new(480, 160));
        assert_eq!(poit.size, Size::new(200, 200));

        // (1920 - 1160) / 6 = 126
        assert_eq!(poit.top_left.x, 252);
        assert_eq!(osw.top_left.x, 252 + 200 + 126);
        assert_eq!(lin.top_left.x, osw.top_left.x + 480 + 126);
        assert_eq!(bottom(&osw), 972);
        assert_eq!(bottom(&lin), 972);
        assert_eq!(poit.top_left.y, 972 - 160);
        assert!(layout.header.unwrap().top_left.y < poit.top_left.y);
    }

    #[test]
    fn test_hacktoberfest_layout() {
        let layout = hacktoberfest_layout(FRAME, &rendered_header("HACKTOBERFEST SPONSORS"));
        let [badge] = layout.badges;
        assert_eq!(badge, Rectangle::new(Point::new(576, 1080 - 43 - 192), Size::new(768, 192)));
    }

    #[test]
    fn test_unrendered_header_has_no_layout() {
        let header = DynamicText::new(header_spec(FRAME));
        assert!(meetup_layout(FRAME, &header).header.is_none());
        assert!(media_patrons_layout(FRAME, &header).header.is_none());
        assert!(hacktoberfest_layout(FRAME, &header).header.is_none());
    }

    #[test]
    fn test_badges_draw_even_without_header() {
        let small = Size::new(480, 270);
        let store = ContentStore::new(small);
        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(small);
        draw_hacktoberfest_sponsors(&mut display, small, &store).unwrap();

        let colors: Vec<_> = display.bounding_box().points().map(|p| display.get_pixel(p)).collect();
        assert!(colors.contains(&BADGE_FILL));
        assert!(!colors.contains(&TEXT), "no header text without a rendered header");
    }

    #[test]
    fn test_header_drawn_when_rendered() {
        let small = Size::new(480, 270);
        let mut store = ContentStore::new(small);
        store.render_static(&Labels::default(), &MonoRasterizer);
        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(small);
        draw_media_patrons(&mut display, small, &store).unwrap();

        let header = media_patrons_layout(small, &store.media_header).header.unwrap();
        let header_lit = header.points().any(|p| display.get_pixel(p) == TEXT);
        assert!(header_lit);
        assert_eq!(display.get_pixel(Point::new(0, 0)), BLACK);
    }
}
