//! Counter panel: live value near the bottom, its label above.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │                              │
//! │     Pull Request count:      │  label, gap = label_h / 5
//! │             42               │  counter
//! │                              │  h / 25
//! └──────────────────────────────┘
//! ```

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{COUNTER_BOTTOM_DIVISOR, HEADER_GAP_DIVISOR};
use crate::content::ContentStore;

/// Where the counter and its label go. The label is `None` until it has rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterLayout {
    pub counter: Rectangle,
    pub label: Option<Rectangle>,
}

/// Layout for the current textures, or `None` before the counter first renders.
pub fn counter_layout(frame: Size, content: &ContentStore) -> Option<CounterLayout> {
    let counter_size = content.counter.size()?;
    let (w, h) = (frame.width as i32, frame.height as i32);

    let counter = Rectangle::new(
        Point::new(
            (w - counter_size.width as i32) / 2,
            h - counter_size.height as i32 - h / COUNTER_BOTTOM_DIVISOR as i32,
        ),
        counter_size,
    );

    let label = content.counter_label.size().map(|label_size| {
        let lh = label_size.height as i32;
        Rectangle::new(
            Point::new((w - label_size.width as i32) / 2, counter.top_left.y - lh - lh / HEADER_GAP_DIVISOR as i32),
            label_size,
        )
    });

    Some(CounterLayout { counter, label })
}

pub fn draw_counter<D>(
    target: &mut D,
    frame: Size,
    content: &ContentStore,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let Some(layout) = counter_layout(frame, content) else {
        return Ok(());
    };
    if let Some(texture) = content.counter.texture() {
        texture.draw(target, layout.counter.top_left)?;
    }
    if let (Some(rect), Some(texture)) = (layout.label, content.counter_label.texture()) {
        texture.draw(target, rect.top_left)?;
    }
    Ok(())
}
