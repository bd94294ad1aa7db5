//! Font choices and text specs for every text element on the kiosk.
//!
//! # Sizing
//!
//! Text heights are derived from the frame height so the layout holds in both
//! fixed and tracking viewport modes:
//!
//! ```text
//! counter        h / 5    PROFONT_24_POINT, yellow
//! counter label  h / 10   FONT_10X20, yellow
//! panel headers  h / 12   FONT_10X20, yellow
//! clock          h / 15   FONT_10X20, grey
//! ```
//!
//! The monospace fonts are far smaller than these heights, so a [`TextSpec`]
//! only carries the target height and the rasterizer picks the integer
//! magnification. Nothing here allocates; the specs are rebuilt on resize.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::prelude::Size;
use profont::PROFONT_24_POINT;

use crate::colors::{BADGE_TEXT, CLOCK_GREY, TEXT};
use crate::config::{CLOCK_HEIGHT_DIVISOR, COUNTER_HEIGHT_DIVISOR, HEADER_HEIGHT_DIVISOR, LABEL_HEIGHT_DIVISOR};
use crate::text::TextSpec;

// =============================================================================
// Font References
// =============================================================================

/// Counter digits. ProFont has a slashed zero and reads well from across a room.
pub const COUNTER_FONT: &MonoFont<'static> = &PROFONT_24_POINT;

/// Labels, headers and the clock.
pub const LABEL_FONT: &MonoFont<'static> = &FONT_10X20;

/// Badge captions. Small glyphs let long sponsor names fit narrow plates.
pub const CAPTION_FONT: &MonoFont<'static> = &FONT_6X10;

// =============================================================================
// Text Specs
// =============================================================================

/// The live counter value.
pub fn counter_spec(frame: Size) -> TextSpec {
    TextSpec::new(COUNTER_FONT, TEXT, frame.height / COUNTER_HEIGHT_DIVISOR)
}

/// Label shown above the counter.
pub fn counter_label_spec(frame: Size) -> TextSpec {
    TextSpec::new(LABEL_FONT, TEXT, frame.height / LABEL_HEIGHT_DIVISOR)
}

/// Sponsor panel headers.
pub fn header_spec(frame: Size) -> TextSpec { TextSpec::new(LABEL_FONT, TEXT, frame.height / HEADER_HEIGHT_DIVISOR) }

/// `HH:MM` clock overlay.
pub fn clock_spec(frame: Size) -> TextSpec {
    TextSpec::new(LABEL_FONT, CLOCK_GREY, frame.height / CLOCK_HEIGHT_DIVISOR)
}

/// Caption inside a badge plate of the given height.
pub fn caption_spec(plate_height: u32) -> TextSpec { TextSpec::new(CAPTION_FONT, BADGE_TEXT, plate_height / 2) }

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HD: Size = Size::new(1920, 1080);

    #[test]
    fn test_heights_follow_frame() {
        assert_eq!(counter_spec(FULL_HD).pixel_height, 216);
        assert_eq!(counter_label_spec(FULL_HD).pixel_height, 108);
        assert_eq!(header_spec(FULL_HD).pixel_height, 90);
        assert_eq!(clock_spec(FULL_HD).pixel_height, 72);
    }

    #[test]
    fn test_size_ordering() {
        let counter = counter_spec(FULL_HD);
        let label = counter_label_spec(FULL_HD);
        let clock = clock_spec(FULL_HD);
        let counter_px = counter.magnification() * counter.font.character_size.height;
        let label_px = label.magnification() * label.font.character_size.height;
        let clock_px = clock.magnification() * clock.font.character_size.height;
        assert!(counter_px > label_px, "counter {counter_px}px should dwarf label {label_px}px");
        assert!(label_px > clock_px, "label {label_px}px should be above clock {clock_px}px");
    }

    #[test]
    fn test_clock_is_grey() {
        assert_eq!(clock_spec(FULL_HD).color, CLOCK_GREY);
    }
}
