//! Panel rotation engine.
//!
//! Decides, from elapsed time alone, which panel is on screen and whether a
//! transition to the next one is in progress. Nothing is stored between frames:
//!
//! ```text
//! slot   = ticks / slot_ms
//! index  = slot % len
//! offset = ticks % slot_ms
//! ```
//!
//! The last `transition_ms` of every slot is the transition window. Inside it,
//! and only when the next entry is a different panel, the outgoing panel slides
//! off to the left while the incoming one follows it in from the right edge:
//!
//! ```text
//!   p = 0.0              p = 0.6              p -> 1.0
//! +---------+        +---------+          +---------+
//! |  OUT    |        |UT |  IN |          |   IN    |
//! +---------+        +---------+          +---------+
//!  out.x = 0         out.x = -0.6W         out.x -> -W
//!  in.x  = W         in.x  = 0.4W          in.x  -> 0
//! ```
//!
//! `transition_ms = 0` turns every boundary into a hard cut.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use thiserror::Error;

use crate::geometry::progress;
use crate::panels::Panel;

/// Invalid rotation parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotationError {
    #[error("rotation needs at least one panel")]
    Empty,
    #[error("slot duration must be greater than zero")]
    ZeroSlot,
    #[error("transition window {transition_ms}ms must be shorter than the slot ({slot_ms}ms)")]
    TransitionTooLong { transition_ms: u64, slot_ms: u64 },
}

/// Where `ticks` falls in the rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotPosition {
    /// Index into the rotation list, always `< len`.
    pub index: usize,
    /// Milliseconds into the current slot, always `< slot_ms`.
    pub offset: u64,
}

/// An in-progress move from one panel to the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub outgoing: Panel,
    pub incoming: Panel,
    /// Position inside the transition window, `0.0 <= progress < 1.0`.
    pub progress: f32,
    pub outgoing_viewport: Rectangle,
    pub incoming_viewport: Rectangle,
}

/// What the panel layer draws this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelPlan {
    /// One panel on the full frame.
    Single(Panel),
    /// Two panels sharing the frame.
    Transition(Transition),
}

impl PanelPlan {
    /// The panel that owns the current slot.
    pub const fn current(&self) -> Panel {
        match self {
            Self::Single(panel) => *panel,
            Self::Transition(t) => t.outgoing,
        }
    }
}

/// Ordered, weighted list of panels with its timing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rotation {
    panels: Vec<Panel>,
    slot_ms: u64,
    transition_ms: u64,
}

impl Rotation {
    /// Build a rotation. Duplicate entries are allowed and weight a panel's airtime.
    pub fn new(
        panels: Vec<Panel>,
        slot_ms: u64,
        transition_ms: u64,
    ) -> Result<Self, RotationError> {
        if panels.is_empty() {
            return Err(RotationError::Empty);
        }
        if slot_ms == 0 {
            return Err(RotationError::ZeroSlot);
        }
        if transition_ms >= slot_ms {
            return Err(RotationError::TransitionTooLong { transition_ms, slot_ms });
        }
        Ok(Self { panels, slot_ms, transition_ms })
    }

    #[inline]
    pub fn len(&self) -> usize { self.panels.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.panels.is_empty() }

    #[inline]
    pub fn panels(&self) -> &[Panel] { &self.panels }

    #[inline]
    pub const fn slot_ms(&self) -> u64 { self.slot_ms }

    #[inline]
    pub const fn transition_ms(&self) -> u64 { self.transition_ms }

    /// Locate `ticks` in the rotation.
    pub fn position(&self, ticks: u64) -> SlotPosition {
        let slot = ticks / self.slot_ms;
        SlotPosition {
            // The remainder is < len, which already fits in usize
            index: (slot % self.panels.len() as u64) as usize,
            offset: ticks % self.slot_ms,
        }
    }

    /// Plan the panel layer for a frame of `frame` size at `ticks`.
    pub fn plan(
        &self,
        ticks: u64,
        frame: Size,
    ) -> PanelPlan {
        let pos = self.position(ticks);
        let current = self.panels[pos.index];
        let next = self.panels[(pos.index + 1) % self.panels.len()];

        let window_start = self.slot_ms - self.transition_ms;
        if current == next || pos.offset < window_start {
            return PanelPlan::Single(current);
        }

        // transition_ms > 0 here: offset < slot_ms == window_start when it is 0
        let p = progress(pos.offset as f32, window_start as f32, self.slot_ms as f32);
        let (outgoing_viewport, incoming_viewport) = slide_viewports(frame, p);

        PanelPlan::Transition(Transition {
            outgoing: current,
            incoming: next,
            progress: p,
            outgoing_viewport,
            incoming_viewport,
        })
    }
}

/// Viewports for a slide at progress `p`.
///
/// The outgoing viewport is the full frame shifted left by `p * width`; the
/// incoming one sits immediately to its right, so together they always tile
/// exactly two frame widths with the visible frame somewhere inside.
pub fn slide_viewports(
    frame: Size,
    p: f32,
) -> (Rectangle, Rectangle) {
    let width = frame.width as i32;
    let out_x = (p * -(frame.width as f32)) as i32;

    (
        Rectangle::new(Point::new(out_x, 0), frame),
        Rectangle::new(Point::new(width + out_x, 0), frame),
    )
}
