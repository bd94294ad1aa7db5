//! Heartbeat pulse for the logo.
//!
//! The pulse is a pure function of elapsed time modulo one period, so it needs no
//! per-frame state and keeps running regardless of what the panel rotation does.
//!
//! # Phases
//!
//! ```text
//!  scale
//!  1.25 |                               . echo (fading)
//!  1.05 |                         /\  .
//!  1.00 |________________________/  \______
//!       0                       R  R+B    T
//!       |--------- rest --------|-B-|-E-|
//! ```
//!
//! - **Rest** (`t < R`): logo drawn unscaled, no echo.
//! - **Buildup** (`R <= t < R+B`): primary scale rises linearly from 1 to `buildup_scale`.
//! - **Echo** (`R+B <= t < T`): primary shrinks back to 1 while a second copy grows
//!   from `buildup_scale` to `echo_scale` and fades from `echo_opacity` to 0.
//!
//! Both ramps meet at the phase boundaries, so the primary scale never jumps.

use thiserror::Error;

use crate::geometry::{lerp, progress};

/// Invalid heartbeat parameters.
#[derive(Debug, Error, PartialEq)]
pub enum HeartbeatError {
    #[error("heartbeat {0} duration must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("buildup scale must be greater than 1 (got {0})")]
    BuildupScale(f32),
    #[error("echo scale {echo} must be greater than buildup scale {buildup}")]
    EchoScale { echo: f32, buildup: f32 },
    #[error("echo opacity must be strictly between 0 and 1 (got {0})")]
    EchoOpacity(f32),
}

/// Which part of the period the pulse is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulsePhase {
    Rest,
    Buildup,
    Echo,
}

/// The fading copy drawn during the echo phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EchoCopy {
    pub scale: f32,
    pub opacity: f32,
}

/// One heartbeat sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub phase: PulsePhase,
    /// `None` during rest: the logo is drawn at its natural size.
    pub primary_scale: Option<f32>,
    pub echo: Option<EchoCopy>,
}

impl Pulse {
    /// Primary scale with rest mapped to 1.0.
    #[inline]
    pub fn primary_factor(&self) -> f32 { self.primary_scale.unwrap_or(1.0) }
}

/// Heartbeat timing and amplitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Heartbeat {
    rest_ms: u64,
    buildup_ms: u64,
    echo_ms: u64,
    buildup_scale: f32,
    echo_scale: f32,
    echo_opacity: f32,
}

impl Heartbeat {
    /// Build a heartbeat, rejecting parameters that would make a phase empty or
    /// the scales non-monotonic.
    pub fn new(
        rest_ms: u64,
        buildup_ms: u64,
        echo_ms: u64,
        buildup_scale: f32,
        echo_scale: f32,
        echo_opacity: f32,
    ) -> Result<Self, HeartbeatError> {
        if rest_ms == 0 {
            return Err(HeartbeatError::ZeroDuration("rest"));
        }
        if buildup_ms == 0 {
            return Err(HeartbeatError::ZeroDuration("buildup"));
        }
        if echo_ms == 0 {
            return Err(HeartbeatError::ZeroDuration("echo"));
        }
        if buildup_scale <= 1.0 || !buildup_scale.is_finite() {
            return Err(HeartbeatError::BuildupScale(buildup_scale));
        }
        if echo_scale <= buildup_scale || !echo_scale.is_finite() {
            return Err(HeartbeatError::EchoScale { echo: echo_scale, buildup: buildup_scale });
        }
        if echo_opacity <= 0.0 || echo_opacity >= 1.0 || !echo_opacity.is_finite() {
            return Err(HeartbeatError::EchoOpacity(echo_opacity));
        }

        Ok(Self { rest_ms, buildup_ms, echo_ms, buildup_scale, echo_scale, echo_opacity })
    }

    /// Length of one full rest + buildup + echo cycle.
    #[inline]
    pub const fn period_ms(&self) -> u64 { self.rest_ms + self.buildup_ms + self.echo_ms }

    /// Sample the pulse at `ticks` milliseconds since start.
    pub fn sample(&self, ticks: u64) -> Pulse {
        let t = ticks % self.period_ms();
        let buildup_start = self.rest_ms;
        let echo_start = self.rest_ms + self.buildup_ms;

        if t < buildup_start {
            return Pulse { phase: PulsePhase::Rest, primary_scale: None, echo: None };
        }

        if t < echo_start {
            let frac = progress(t as f32, buildup_start as f32, echo_start as f32);
            return Pulse {
                phase: PulsePhase::Buildup,
                primary_scale: Some(lerp(1.0, self.buildup_scale, frac)),
                echo: None,
            };
        }

        let frac = progress(t as f32, echo_start as f32, self.period_ms() as f32);
        Pulse {
            phase: PulsePhase::Echo,
            primary_scale: Some(lerp(self.buildup_scale, 1.0, frac)),
            echo: Some(EchoCopy {
                scale: lerp(self.buildup_scale, self.echo_scale, frac),
                opacity: self.echo_opacity * (1.0 - frac),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn standard() -> Heartbeat { Heartbeat::new(5000, 200, 800, 1.05, 1.25, 0.35).unwrap() }

    #[test]
    fn test_period() {
        assert_eq!(standard().period_ms(), 6000);
    }

    #[test]
    fn test_rest_phase_unscaled() {
        let hb = standard();
        for ticks in [0, 1, 2500, 4999, 6000, 10_999] {
            let pulse = hb.sample(ticks);
            assert_eq!(pulse.phase, PulsePhase::Rest, "ticks {ticks}");
            assert_eq!(pulse.primary_scale, None);
            assert_eq!(pulse.echo, None);
            assert_eq!(pulse.primary_factor(), 1.0);
        }
    }

    #[test]
    fn test_buildup_starts_at_one() {
        let pulse = standard().sample(5000);
        assert_eq!(pulse.phase, PulsePhase::Buildup);
        assert!((pulse.primary_factor() - 1.0).abs() < EPS);
        assert!(pulse.echo.is_none());
    }

    #[test]
    fn test_buildup_midpoint() {
        let pulse = standard().sample(5100);
        assert!((pulse.primary_factor() - 1.025).abs() < EPS);
    }

    #[test]
    fn test_continuous_at_echo_boundary() {
        let hb = standard();
        let before = hb.sample(5199).primary_factor();
        let at = hb.sample(5200);

        assert_eq!(at.phase, PulsePhase::Echo);
        assert!((at.primary_factor() - 1.05).abs() < EPS, "echo starts at buildup scale");
        assert!((before - 1.05).abs() < 1e-3, "buildup approaches buildup scale from below");

        let echo = at.echo.unwrap();
        assert!((echo.scale - 1.05).abs() < EPS);
        assert!((echo.opacity - 0.35).abs() < EPS);
    }

    #[test]
    fn test_echo_fades_to_zero_at_period_end() {
        let hb = standard();
        let last = hb.sample(5999);
        let echo = last.echo.unwrap();

        assert!(echo.opacity < 0.001, "opacity {} should be ~0", echo.opacity);
        assert!((echo.scale - 1.25).abs() < 1e-3);
        assert!((last.primary_factor() - 1.0).abs() < 1e-3, "primary returns to 1");

        // Wraps to rest, still scale 1
        assert_eq!(hb.sample(6000).primary_factor(), 1.0);
    }

    #[test]
    fn test_primary_scale_bounded() {
        let hb = standard();
        for ticks in 0..hb.period_ms() * 2 {
            let pulse = hb.sample(ticks);
            let s = pulse.primary_factor();
            assert!((1.0 - EPS..=1.05 + EPS).contains(&s), "ticks {ticks}: scale {s}");
            if let Some(echo) = pulse.echo {
                assert!(echo.scale >= 1.05 - EPS && echo.scale <= 1.25 + EPS);
                assert!(echo.opacity >= 0.0 && echo.opacity <= 0.35 + EPS);
            }
        }
    }

    #[test]
    fn test_no_jump_between_consecutive_ticks() {
        let hb = standard();
        let mut prev = hb.sample(0).primary_factor();
        for ticks in 1..hb.period_ms() * 2 {
            let cur = hb.sample(ticks).primary_factor();
            // Steepest ramp is 0.05 over 200ms
            assert!((cur - prev).abs() < 0.001, "jump at ticks {ticks}: {prev} -> {cur}");
            prev = cur;
        }
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert_eq!(
            Heartbeat::new(0, 200, 800, 1.05, 1.25, 0.35),
            Err(HeartbeatError::ZeroDuration("rest"))
        );
        assert_eq!(
            Heartbeat::new(5000, 200, 800, 1.0, 1.25, 0.35),
            Err(HeartbeatError::BuildupScale(1.0))
        );
        assert_eq!(
            Heartbeat::new(5000, 200, 800, 1.05, 1.05, 0.35),
            Err(HeartbeatError::EchoScale { echo: 1.05, buildup: 1.05 })
        );
        assert_eq!(
            Heartbeat::new(5000, 200, 800, 1.05, 1.25, 1.0),
            Err(HeartbeatError::EchoOpacity(1.0))
        );
    }

    #[test]
    fn test_rejects_nan_opacity() {
        let result = Heartbeat::new(5000, 200, 800, 1.05, 1.25, f32::NAN);
        assert!(matches!(result, Err(HeartbeatError::EchoOpacity(o)) if o.is_nan()));
    }
}
