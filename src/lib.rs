// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/u64->f32 in progress and scale calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for frame-sized values
#![allow(clippy::cast_sign_loss)] // f32->u32 where the value is known to be positive
#![allow(clippy::similar_names)] // sona/alle, osw/lin in layout code are clear

//! Kiosk display: an unattended fullscreen screen that rotates content
//! panels, pulses a logo and shows a live counter read from a watched file.
//!
//! # Architecture
//!
//! ```text
//!             ┌────────────┐     ticks     ┌───────────────┐
//!             │   Clock    ├──────────────►│   Scheduler   │
//!             └────────────┘               │ rotation  +   │
//!                                          │ heartbeat     │
//!  ┌──────────────┐ changed? ┌──────────┐  └───────┬───────┘
//!  │ FileWatcher  ├─────────►│ Content  │          │ FramePlan
//!  └──────────────┘          │ Store    ├──────────┤
//!                            └──────────┘          ▼
//!                                          ┌───────────────┐
//!                                          │ Frame render  │──► DrawTarget
//!                                          └───────────────┘
//! ```
//!
//! The [`kiosk::Kiosk`] context owns all of it and runs one iteration per
//! [`kiosk::Kiosk::step`]. There is no global state.
//!
//! # Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | progress, lerp, centre-preserving rectangle scaling |
//! | [`rotation`] | which panel is current, slide viewports |
//! | [`heartbeat`] | logo pulse state machine |
//! | [`scheduler`] | both of the above sampled per frame |
//! | [`text`], [`content`] | bounded text, last-known-good textures, reloads |
//! | [`watcher`] | notify-backed change signal |
//! | [`render`], [`screens`], [`widgets`] | drawing |
//! | [`kiosk`], [`backend`] | loop driver and simulator window |

pub mod backend;
pub mod clock;
pub mod colors;
pub mod config;
pub mod content;
pub mod geometry;
pub mod heartbeat;
pub mod kiosk;
pub mod logging;
pub mod panels;
pub mod render;
pub mod rotation;
pub mod scheduler;
pub mod screens;
pub mod stats;
pub mod styles;
pub mod text;
pub mod watcher;
pub mod widgets;
