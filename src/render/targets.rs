//! Draw-target adapters used by the frame renderer.
//!
//! embedded-graphics has no alpha channel and monospace fonts come in fixed
//! sizes, so the renderer gets both effects by wrapping the real target:
//!
//! - [`Faded`]: blends every color toward the (solid) frame background.
//!   Used for the heartbeat echo and crossfades.
//! - [`Magnified`]: draws each pixel as a `factor x factor` block. Used to bring
//!   text up to the sizes the layout derives from the frame height.
//!
//! Both forward to the parent target, so clipping and translation applied
//! further out (viewports) still hold.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::blend;

// =============================================================================
// Faded
// =============================================================================

/// Draws at reduced opacity over a known solid background.
pub struct Faded<'a, D> {
    parent: &'a mut D,
    background: Rgb888,
    alpha: f32,
}

impl<'a, D> Faded<'a, D> {
    pub const fn new(parent: &'a mut D, background: Rgb888, alpha: f32) -> Self { Self { parent, background, alpha } }
}

impl<D: DrawTarget<Color = Rgb888>> Dimensions for Faded<'_, D> {
    fn bounding_box(&self) -> Rectangle { self.parent.bounding_box() }
}

impl<D: DrawTarget<Color = Rgb888>> DrawTarget for Faded<'_, D> {
    type Color = Rgb888;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (background, alpha) = (self.background, self.alpha);
        self.parent
            .draw_iter(pixels.into_iter().map(|Pixel(p, c)| Pixel(p, blend(background, c, alpha))))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.parent.fill_solid(area, blend(self.background, color, self.alpha))
    }
}

// =============================================================================
// Magnified
// =============================================================================

/// Integer pixel magnification anchored at `origin` in parent coordinates.
///
/// A pixel drawn at `p` lands on the block starting at `origin + p * factor`.
pub struct Magnified<'a, D> {
    parent: &'a mut D,
    origin: Point,
    factor: u32,
}

impl<'a, D> Magnified<'a, D> {
    /// `factor` below 1 is treated as 1.
    pub fn new(parent: &'a mut D, origin: Point, factor: u32) -> Self {
        Self { parent, origin, factor: factor.max(1) }
    }
}

impl<D: DrawTarget<Color = Rgb888>> Dimensions for Magnified<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let parent = self.parent.bounding_box();
        let f = self.factor as i32;
        let top_left = Point::new(
            (parent.top_left.x - self.origin.x).div_euclid(f),
            (parent.top_left.y - self.origin.y).div_euclid(f),
        );
        Rectangle::new(top_left, Size::new(parent.size.width / self.factor + 1, parent.size.height / self.factor + 1))
    }
}

impl<D: DrawTarget<Color = Rgb888>> DrawTarget for Magnified<'_, D> {
    type Color = Rgb888;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let block = Size::new(self.factor, self.factor);
        let f = self.factor as i32;
        for Pixel(p, color) in pixels {
            let top_left = self.origin + p * f;
            self.parent.fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let f = self.factor as i32;
        let scaled = Rectangle::new(
            self.origin + area.top_left * f,
            Size::new(area.size.width * self.factor, area.size.height * self.factor),
        );
        self.parent.fill_solid(&scaled, color)
    }
}
