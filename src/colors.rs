//! Color constants for the kiosk display.
//!
//! The display works in `Rgb888`: blending the heartbeat echo and crossfades
//! toward the background needs more than 5-6-5 bits per channel to look smooth.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Cleared behind the background before every frame.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Pure white. Sponsor badge plates.
pub const WHITE: Rgb888 = Rgb888::WHITE;

// =============================================================================
// Kiosk Palette
// =============================================================================

/// Navy frame background (0x15, 0x23, 0x47).
pub const BACKGROUND: Rgb888 = Rgb888::new(0x15, 0x23, 0x47);

/// Yellow text for the counter, its label and panel headers (0xff, 0xf9, 0x22).
pub const TEXT: Rgb888 = Rgb888::new(0xff, 0xf9, 0x22);

/// Mid grey for the clock overlay so it does not compete with the panels.
pub const CLOCK_GREY: Rgb888 = Rgb888::new(127, 127, 127);

/// Lighter navy for the corner ornaments.
pub const ORNAMENT: Rgb888 = Rgb888::new(0x2b, 0x46, 0x8c);

/// Logo outline / bracket color.
pub const LOGO_PRIMARY: Rgb888 = TEXT;

/// Logo inner ring color.
pub const LOGO_ACCENT: Rgb888 = Rgb888::new(0xff, 0x6f, 0x3c);

/// Badge plate fill.
pub const BADGE_FILL: Rgb888 = Rgb888::new(0xf2, 0xf2, 0xf2);

/// Badge caption text. Dark on the light plate.
pub const BADGE_TEXT: Rgb888 = BACKGROUND;

// =============================================================================
// Blending
// =============================================================================

/// Blend `color` over `base` with coverage `alpha` (0.0 = base, 1.0 = color).
///
/// Alpha is clamped, so callers may pass ramp values that overshoot slightly.
pub fn blend(
    base: Rgb888,
    color: Rgb888,
    alpha: f32,
) -> Rgb888 {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| -> u8 {
        let v = (f32::from(to) - f32::from(from)).mul_add(a, f32::from(from));
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgb888::new(mix(base.r(), color.r()), mix(base.g(), color.g()), mix(base.b(), color.b()))
}
