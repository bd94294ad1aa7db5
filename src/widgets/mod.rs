//! Drawing components shared by the frame renderer and the panels.
//!
//! - [`logo`]: heartbeat emblem, primary and echo copies
//! - [`corners`]: bottom corner ornaments
//! - [`clock`]: `HH:MM` overlay
//! - [`badge`]: sponsor plates used by the sponsor panels
//!
//! Every widget draws into a generic `DrawTarget<Color = Rgb888>` and takes the
//! logical frame size explicitly. Under a viewport the target's own bounding
//! box is shifted, so widgets never lay out against it.

mod badge;
mod clock;
mod corners;
mod logo;

pub use badge::{Badge, caption_factor, draw_badge};
pub use clock::{clock_position, draw_clock};
pub use corners::{corner_rects, draw_corners};
pub use logo::{draw_emblem, draw_logo, logo_rect};
