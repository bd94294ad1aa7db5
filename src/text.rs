//! Bounded text buffers and dynamic text elements.
//!
//! A [`DynamicText`] owns a font spec, a bounded text buffer and the last
//! successfully rendered [`TextTexture`]. The texture is produced by a
//! [`Rasterizer`], keeps its own copy of the text it was rendered from, and is
//! only ever replaced by a newer successful render:
//!
//! - never rendered: `texture() == None`, drawing is a no-op
//! - render ok: buffer and texture both hold the new text
//! - render failed: buffer rolls back, previous texture stays (last-known-good)
//!
//! Sizes for the kiosk are big (the counter is a fifth of the frame height), so
//! a texture records an integer magnification on top of a monospace font.

use core::fmt;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use thiserror::Error;

use crate::render::targets::Magnified;

/// Bytes of text a dynamic element can hold.
pub const TEXT_CAPACITY: usize = 232;

/// Widest texture the rasterizer will produce, in pixels.
pub const MAX_TEXTURE_WIDTH: u32 = 16_384;

// =============================================================================
// Bounded Text
// =============================================================================

/// UTF-8 string that never exceeds `N` bytes.
///
/// Construction truncates at the last whole character that fits, so the
/// capacity invariant cannot be violated and no character is ever split.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BoundedText<const N: usize> {
    inner: String<N>,
}

impl<const N: usize> BoundedText<N> {
    pub const fn new() -> Self { Self { inner: String::new() } }

    /// Copy as much of `source` as fits. Returns the text and whether anything was cut.
    pub fn truncated(source: &str) -> (Self, bool) {
        let mut inner: String<N> = String::new();
        for ch in source.chars() {
            if inner.push(ch).is_err() {
                return (Self { inner }, true);
            }
        }
        (Self { inner }, false)
    }

    #[inline]
    pub fn as_str(&self) -> &str { self.inner.as_str() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.inner.is_empty() }

    #[inline]
    pub fn len(&self) -> usize { self.inner.len() }

    /// Drop trailing bytes at or below ASCII space (whitespace, newlines, control codes).
    pub fn trim_end_control(&mut self) {
        while self.inner.as_bytes().last().is_some_and(|b| *b <= b' ') {
            self.inner.pop();
        }
    }
}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(self.as_str(), f) }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Buffer type of every dynamic text element.
pub type TextBuffer = BoundedText<TEXT_CAPACITY>;

// =============================================================================
// Rasterization
// =============================================================================

/// Rendering a text element failed. The element keeps its previous texture.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("text has zero width")]
    EmptyText,
    #[error("rendered text is {width}px wide, limit is {max}px")]
    TooWide { width: u32, max: u32 },
}

/// Font, color and target height of a text element.
#[derive(Clone, Copy, Debug)]
pub struct TextSpec {
    pub font: &'static MonoFont<'static>,
    pub color: Rgb888,
    /// Desired glyph height in frame pixels; rounded down to a whole magnification.
    pub pixel_height: u32,
}

impl TextSpec {
    pub const fn new(font: &'static MonoFont<'static>, color: Rgb888, pixel_height: u32) -> Self {
        Self { font, color, pixel_height }
    }

    /// Integer magnification that brings the font closest to `pixel_height` without exceeding it.
    pub fn magnification(&self) -> u32 { (self.pixel_height / self.font.character_size.height).max(1) }
}

/// A rendered text, ready to draw.
#[derive(Clone, Debug)]
pub struct TextTexture {
    text: TextBuffer,
    spec: TextSpec,
    factor: u32,
    size: Size,
}

impl TextTexture {
    #[inline]
    pub fn text(&self) -> &str { self.text.as_str() }

    /// Pixel size on the frame.
    #[inline]
    pub const fn size(&self) -> Size { self.size }

    /// Draw with the top-left corner at `top_left`.
    pub fn draw<D>(&self, target: &mut D, top_left: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let style = MonoTextStyle::new(self.spec.font, self.spec.color);
        let mut magnified = Magnified::new(target, top_left, self.factor);
        Text::with_baseline(self.text.as_str(), Point::zero(), style, Baseline::Top).draw(&mut magnified)?;
        Ok(())
    }
}

/// Turns text into textures.
pub trait Rasterizer {
    fn rasterize(&self, text: &TextBuffer, spec: &TextSpec) -> Result<TextTexture, RenderError>;
}

/// Rasterizer for embedded-graphics monospace fonts.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoRasterizer;

impl Rasterizer for MonoRasterizer {
    fn rasterize(&self, text: &TextBuffer, spec: &TextSpec) -> Result<TextTexture, RenderError> {
        let chars = text.as_str().chars().count() as u32;
        if chars == 0 {
            return Err(RenderError::EmptyText);
        }

        let factor = spec.magnification();
        let glyph = spec.font.character_size;
        let base_width = chars * glyph.width + (chars - 1) * spec.font.character_spacing;
        let width = base_width.saturating_mul(factor);
        if width > MAX_TEXTURE_WIDTH {
            return Err(RenderError::TooWide { width, max: MAX_TEXTURE_WIDTH });
        }

        Ok(TextTexture { text: text.clone(), spec: *spec, factor, size: Size::new(width, glyph.height * factor) })
    }
}

// =============================================================================
// Dynamic Text Element
// =============================================================================

/// Text element whose content changes at runtime.
#[derive(Clone, Debug)]
pub struct DynamicText {
    spec: TextSpec,
    buffer: TextBuffer,
    texture: Option<TextTexture>,
}

impl DynamicText {
    /// New element with an empty buffer and no texture.
    pub const fn new(spec: TextSpec) -> Self { Self { spec, buffer: TextBuffer::new(), texture: None } }

    #[inline]
    pub fn buffer(&self) -> &str { self.buffer.as_str() }

    #[inline]
    pub const fn texture(&self) -> Option<&TextTexture> { self.texture.as_ref() }

    /// Size of the current texture, `None` before the first successful render.
    #[inline]
    pub fn size(&self) -> Option<Size> { self.texture.as_ref().map(TextTexture::size) }

    #[inline]
    pub const fn spec(&self) -> &TextSpec { &self.spec }

    /// Replace the buffer and render it.
    ///
    /// On failure the buffer is rolled back to the text of the surviving texture
    /// (or cleared if there is none), so buffer and texture never disagree.
    pub fn update(&mut self, text: TextBuffer, rasterizer: &impl Rasterizer) -> Result<(), RenderError> {
        match rasterizer.rasterize(&text, &self.spec) {
            Ok(texture) => {
                self.buffer = text;
                self.texture = Some(texture);
                Ok(())
            }
            Err(err) => {
                self.buffer = self.texture.as_ref().map(|t| t.text.clone()).unwrap_or_default();
                Err(err)
            }
        }
    }

    /// Convenience for static labels: truncate `text` into the buffer and render it.
    pub fn update_str(&mut self, text: &str, rasterizer: &impl Rasterizer) -> Result<(), RenderError> {
        let (buffer, _) = TextBuffer::truncated(text);
        self.update(buffer, rasterizer)
    }

    /// Switch to a new spec (frame resized) and re-render the current buffer.
    ///
    /// A failed re-render keeps the old texture at its old size.
    pub fn respec(&mut self, spec: TextSpec, rasterizer: &impl Rasterizer) -> Result<(), RenderError> {
        self.spec = spec;
        if self.texture.is_none() {
            return Ok(());
        }
        let text = self.buffer.clone();
        self.update(text, rasterizer)
    }

    /// Draw at `top_left` if a texture exists. Returns whether anything was drawn.
    pub fn draw<D>(&self, target: &mut D, top_left: Point) -> bool
    where
        D: DrawTarget<Color = Rgb888>,
    {
        self.texture.as_ref().is_some_and(|texture| texture.draw(target, top_left).is_ok())
    }
}


#[cfg(test)]
mod tests {
    use embedded_graphics::mono_font::ascii::FONT_10X20;
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::test_support::FlakyRasterizer;
    use super::*;
    use crate::colors::{BLACK, TEXT};

    const SPEC: TextSpec = TextSpec::new(&FONT_10X20, TEXT, 60);

    #[test]
    fn test_truncated_fits() {
        let (text, cut) = BoundedText::<8>::truncated("42");
        assert_eq!(text.as_str(), "42");
        assert!(!cut);
    }

    #[test]
    fn test_truncated_cuts_at_capacity() {
        let (text, cut) = BoundedText::<4>::truncated("123456");
        assert_eq!(text.as_str(), "1234");
        assert!(cut);
    }

    #[test]
    fn test_truncated_never_splits_a_character() {
        // "é" is two bytes; only one "é" fits in 3 bytes
        let (text, cut) = BoundedText::<3>::truncated("éé");
        assert_eq!(text.as_str(), "é");
        assert!(cut);
    }

    #[test]
    fn test_text_capacity_enforced_for_long_input() {
        let long = "9".repeat(TEXT_CAPACITY * 2);
        let (text, cut) = TextBuffer::truncated(&long);
        assert_eq!(text.len(), TEXT_CAPACITY);
        assert!(cut);
    }

    #[test]
    fn test_trim_end_control() {
        let (mut text, _) = BoundedText::<16>::truncated("1337 \r\n\t");
        text.trim_end_control();
        assert_eq!(text.as_str(), "1337");

        let (mut blank, _) = BoundedText::<16>::truncated(" \n");
        blank.trim_end_control();
        assert!(blank.is_empty());
    }

    #[test]
    fn test_magnification() {
        assert_eq!(SPEC.magnification(), 3);
        assert_eq!(TextSpec::new(&FONT_10X20, TEXT, 5).magnification(), 1);
    }

    #[test]
    fn test_rasterize_dimensions() {
        let (text, _) = TextBuffer::truncated("42");
        let texture = MonoRasterizer.rasterize(&text, &SPEC).unwrap();
        // 2 glyphs of 10px wide, no spacing, x3
        assert_eq!(texture.size(), Size::new(60, 60));
        assert_eq!(texture.text(), "42");
    }

    #[test]
    fn test_rasterize_rejects_empty() {
        assert_eq!(MonoRasterizer.rasterize(&TextBuffer::new(), &SPEC).unwrap_err(), RenderError::EmptyText);
    }

    #[test]
    fn test_rasterize_rejects_too_wide() {
        let (text, _) = TextBuffer::truncated(&"W".repeat(200));
        let huge = TextSpec::new(&FONT_10X20, TEXT, 20 * 40);
        assert!(matches!(MonoRasterizer.rasterize(&text, &huge), Err(RenderError::TooWide { .. })));
    }

    #[test]
    fn test_dynamic_text_starts_unrendered() {
        let element = DynamicText::new(SPEC);
        assert!(element.texture().is_none());
        assert_eq!(element.size(), None);

        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(64, 64));
        assert!(!element.draw(&mut display, Point::zero()), "unrendered element draws nothing");
    }

    #[test]
    fn test_dynamic_text_update_replaces_texture() {
        let mut element = DynamicText::new(SPEC);
        element.update_str("5", &MonoRasterizer).unwrap();
        element.update_str("42", &MonoRasterizer).unwrap();

        assert_eq!(element.buffer(), "42");
        assert_eq!(element.texture().unwrap().text(), "42");
        assert_eq!(element.size(), Some(Size::new(60, 60)));
    }

    #[test]
    fn test_dynamic_text_failure_keeps_last_good() {
        let rasterizer = FlakyRasterizer::default();
        let mut element = DynamicText::new(SPEC);
        element.update_str("42", &rasterizer).unwrap();

        rasterizer.failing.set(true);
        assert!(element.update_str("43", &rasterizer).is_err());

        assert_eq!(element.texture().unwrap().text(), "42");
        assert_eq!(element.buffer(), "42", "buffer rolls back to the rendered text");
        assert_eq!(element.size(), Some(Size::new(60, 60)));
    }

    #[test]
    fn test_dynamic_text_failure_before_first_render() {
        let mut element = DynamicText::new(SPEC);
        assert!(element.update(TextBuffer::new(), &MonoRasterizer).is_err());
        assert!(element.texture().is_none());
        assert_eq!(element.buffer(), "");
    }

    #[test]
    fn test_respec_rerenders_at_new_size() {
        let mut element = DynamicText::new(SPEC);
        element.update_str("7", &MonoRasterizer).unwrap();
        element.respec(TextSpec::new(&FONT_10X20, TEXT, 20), &MonoRasterizer).unwrap();
        assert_eq!(element.size(), Some(Size::new(10, 20)));
    }

    #[test]
    fn test_respec_without_texture_stays_unrendered() {
        let mut element = DynamicText::new(SPEC);
        element.respec(TextSpec::new(&FONT_10X20, TEXT, 20), &MonoRasterizer).unwrap();
        assert!(element.texture().is_none());
    }

    #[test]
    fn test_draw_puts_pixels_inside_texture_bounds() {
        let mut element = DynamicText::new(SPEC);
        element.update_str("8", &MonoRasterizer).unwrap();

        let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(100, 100));
        assert!(element.draw(&mut display, Point::new(10, 10)));

        let mut lit = 0;
        for y in 0..100 {
            for x in 0..100 {
                if display.get_pixel(Point::new(x, y)) != BLACK {
                    lit += 1;
                    assert!((10..40).contains(&x) && (10..70).contains(&y), "pixel ({x},{y}) outside texture");
                }
            }
        }
        assert!(lit > 0, "glyph should light some pixels");
    }
}
