//! Presentation scheduler: one [`FramePlan`] per frame from the current tick.
//!
//! The rotation engine and the heartbeat animator are independent clocks over
//! the same tick count. The scheduler samples both and hands the combined plan
//! to the frame renderer, which does the drawing.

use embedded_graphics::prelude::Size;
use serde::{Deserialize, Serialize};

use crate::heartbeat::{Heartbeat, Pulse};
use crate::rotation::{PanelPlan, Rotation};

/// How two panels share the frame during a transition.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionStyle {
    /// Outgoing panel slides out left, incoming follows from the right.
    #[default]
    Slide,
    /// Both panels full-frame; outgoing fades out while incoming fades in.
    Crossfade,
}

/// Everything the renderer needs to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePlan {
    pub ticks: u64,
    pub panels: PanelPlan,
    pub pulse: Pulse,
    pub style: TransitionStyle,
}

/// Rotation + heartbeat, sampled together.
#[derive(Clone, Debug)]
pub struct Scheduler {
    rotation: Rotation,
    heartbeat: Heartbeat,
    style: TransitionStyle,
}

impl Scheduler {
    pub const fn new(rotation: Rotation, heartbeat: Heartbeat, style: TransitionStyle) -> Self {
        Self { rotation, heartbeat, style }
    }

    #[inline]
    pub const fn rotation(&self) -> &Rotation { &self.rotation }

    #[inline]
    pub const fn heartbeat(&self) -> &Heartbeat { &self.heartbeat }

    /// Plan the frame drawn at `ticks` on a frame of `frame` size.
    pub fn plan(
        &self,
        ticks: u64,
        frame: Size,
    ) -> FramePlan {
        FramePlan {
            ticks,
            panels: self.rotation.plan(ticks, frame),
            pulse: self.heartbeat.sample(ticks),
            style: self.style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heartbeat::PulsePhase;
    use crate::panels::Panel;

    fn scheduler() -> Scheduler {
        Scheduler::new(
            Rotation::new(vec![Panel::Counter, Panel::MediaPatrons], 5000, 500).unwrap(),
            Heartbeat::new(5000, 200, 800, 1.05, 1.25, 0.35).unwrap(),
            TransitionStyle::Slide,
        )
    }

    #[test]
    fn test_plan_combines_rotation_and_heartbeat() {
        let plan = scheduler().plan(5100, Size::new(1920, 1080));
        assert_eq!(plan.panels, PanelPlan::Single(Panel::MediaPatrons));
        assert_eq!(plan.pulse.phase, PulsePhase::Buildup);
        assert_eq!(plan.style, TransitionStyle::Slide);
        assert_eq!(plan.ticks, 5100);
    }

    #[test]
    fn test_heartbeat_independent_of_rotation() {
        // Mid-transition ticks still carry a heartbeat sample
        let plan = scheduler().plan(4800, Size::new(1920, 1080));
        assert!(matches!(plan.panels, PanelPlan::Transition(_)));
        assert_eq!(plan.pulse.phase, PulsePhase::Rest);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let s = scheduler();
        for ticks in (0..60_000).step_by(123) {
            assert_eq!(s.plan(ticks, Size::new(800, 600)), s.plan(ticks, Size::new(800, 600)));
        }
    }
}
