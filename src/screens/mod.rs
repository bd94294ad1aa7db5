//! Panel draw procedures.
//!
//! # Panels
//!
//! - **Counter** ([`counter`]): live counter with its label above it
//! - **Sponsors** ([`sponsors`]): meetup sponsors, media patrons and
//!   Hacktoberfest sponsors, each a header above a row of badges
//!
//! # Draw Contract
//!
//! A panel draws into whatever target it is given (the full frame, a sliding
//! viewport or a fading adapter) using coordinates of the logical frame. Text
//! that has never rendered is skipped, and so is any text laid out relative to
//! it.

mod counter;
mod sponsors;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

pub use counter::{CounterLayout, counter_layout, draw_counter};
pub use sponsors::{
    SponsorLayout,
    draw_hacktoberfest_sponsors,
    draw_media_patrons,
    draw_meetup_sponsors,
    hacktoberfest_layout,
    media_patrons_layout,
    meetup_layout,
};

use crate::content::ContentStore;
use crate::panels::Panel;

/// Draw one panel.
pub fn draw_panel<D>(
    panel: Panel,
    target: &mut D,
    frame: Size,
    content: &ContentStore,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    match panel {
        Panel::Counter => draw_counter(target, frame, content),
        Panel::MeetupSponsors => draw_meetup_sponsors(target, frame, content),
        Panel::MediaPatrons => draw_media_patrons(target, frame, content),
        Panel::HacktoberfestSponsors => draw_hacktoberfest_sponsors(target, frame, content),
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::BLACK;
    use crate::content::Labels;
    use crate::text::MonoRasterizer;

    const FRAME: Size = Size::new(480, 270);

    fn store() -> ContentStore {
        let mut store = ContentStore::new(FRAME);
        store.render_static(&Labels::default(), &MonoRasterizer);
        store.counter.update_str("42", &MonoRasterizer).unwrap();
        store
    }

    #[test]
    fn test_every_panel_draws_something() {
        let store = store();
        for panel in Panel::ALL {
            let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(FRAME);
            draw_panel(panel, &mut display, FRAME, &store).unwrap();
            let lit = display.bounding_box().points().any(|p| display.get_pixel(p) != BLACK);
            assert!(lit, "{panel} drew nothing");
        }
    }
}
