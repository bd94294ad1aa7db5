//! Easing and rectangle helpers shared by the rotation engine and the heartbeat.
//!
//! Everything here is pure arithmetic on `f32` and `embedded_graphics` rectangles.
//! Callers own the interval checks: [`progress`] happily extrapolates outside
//! `[lo, hi]`, because both the transition window and the heartbeat phases only
//! call it after they have already decided which interval the time falls into.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Normalize `value` into the interval `[lo, hi]`.
///
/// Returns 0.0 at `lo` and 1.0 at `hi`. Values outside the interval are
/// extrapolated, not clamped. `lo` and `hi` must differ.
#[inline]
pub fn progress(value: f32, lo: f32, hi: f32) -> f32 {
    debug_assert!(hi != lo, "progress() over an empty interval");
    (value - lo) / (hi - lo)
}

/// Linear interpolation from `from` to `to` by `t`.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    (to - from).mul_add(t, from)
}

/// Scale a rectangle by `factor` around its own center.
///
/// Width and height are multiplied by `factor` (truncated to whole pixels), then
/// the top-left corner moves by half of the size change on each axis so the
/// center stays put. Odd size changes leave the center at most half a pixel off.
pub fn scale_rect(
    rect: Rectangle,
    factor: f32,
) -> Rectangle {
    let old_w = rect.size.width as i32;
    let old_h = rect.size.height as i32;

    let new_w = (rect.size.width as f32 * factor).max(0.0) as i32;
    let new_h = (rect.size.height as f32 * factor).max(0.0) as i32;

    let top_left = Point::new(
        rect.top_left.x - (new_w - old_w) / 2,
        rect.top_left.y - (new_h - old_h) / 2,
    );

    Rectangle::new(top_left, Size::new(new_w as u32, new_h as u32))
}

/// Center of a rectangle in floating point (`Rectangle::center` rounds down).
#[inline]
pub fn exact_center(rect: &Rectangle) -> (f32, f32) {
    (
        rect.size.width as f32 / 2.0 + rect.top_left.x as f32,
        rect.size.height as f32 / 2.0 + rect.top_left.y as f32,
    )
}
