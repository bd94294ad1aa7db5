//! Frame timing and reload statistics.
//!
//! # Usage
//!
//! ```ignore
//! let mut stats = FrameStats::new();
//!
//! // In the loop:
//! let start = Instant::now();
//! // ... draw ...
//! stats.record_frame(start.elapsed());
//! stats.record_reload(&outcome);
//! stats.maybe_report(clock.ticks());
//! ```
//!
//! The summary goes to the `debug` log once per [`REPORT_INTERVAL_MS`].

use core::fmt::Write;
use std::time::Duration;

use heapless::String;
use log::debug;

use crate::content::ReloadOutcome;

/// Milliseconds between statistics summaries.
pub const REPORT_INTERVAL_MS: u64 = 60_000;

/// Counters since startup plus a rolling view of render time.
#[derive(Clone, Debug)]
pub struct FrameStats {
    /// Render time of the most recent frame
    pub render_time_us: u32,
    pub render_time_min_us: u32,
    pub render_time_max_us: u32,
    /// Rolling average render time (exponential moving average)
    render_time_avg_us: f32,

    pub total_frames: u64,
    pub panel_changes: u32,
    pub reloads: u32,
    pub reload_failures: u32,

    last_report_ms: u64,
}

impl FrameStats {
    /// Exponential moving average alpha (0.1 for smooth updates).
    const EMA_ALPHA: f32 = 0.1;

    pub const fn new() -> Self {
        Self {
            render_time_us: 0,
            render_time_min_us: u32::MAX,
            render_time_max_us: 0,
            render_time_avg_us: 0.0,
            total_frames: 0,
            panel_changes: 0,
            reloads: 0,
            reload_failures: 0,
            last_report_ms: 0,
        }
    }

    /// Record how long one frame took to draw.
    pub fn record_frame(&mut self, render_time: Duration) {
        let us = u32::try_from(render_time.as_micros()).unwrap_or(u32::MAX);
        self.render_time_us = us;
        self.render_time_min_us = self.render_time_min_us.min(us);
        self.render_time_max_us = self.render_time_max_us.max(us);

        if self.total_frames == 0 {
            self.render_time_avg_us = us as f32;
        } else {
            self.render_time_avg_us =
                Self::EMA_ALPHA.mul_add(us as f32, (1.0 - Self::EMA_ALPHA) * self.render_time_avg_us);
        }
        self.total_frames += 1;
    }

    pub fn record_reload(&mut self, outcome: &ReloadOutcome) {
        match outcome {
            ReloadOutcome::Idle => {}
            ReloadOutcome::Reloaded => self.reloads += 1,
            ReloadOutcome::Retained(_) => self.reload_failures += 1,
        }
    }

    #[inline]
    pub const fn record_panel_change(&mut self) { self.panel_changes += 1; }

    #[inline]
    pub const fn render_time_avg_us(&self) -> u32 { self.render_time_avg_us as u32 }

    /// Log a summary if [`REPORT_INTERVAL_MS`] has passed since the last one.
    /// Returns whether a summary was logged.
    pub fn maybe_report(&mut self, ticks: u64) -> bool {
        if ticks.saturating_sub(self.last_report_ms) < REPORT_INTERVAL_MS {
            return false;
        }
        self.last_report_ms = ticks;
        debug!(
            "uptime {} | {} frames | render avg {}us min {}us max {}us | {} panel changes | {} reloads, {} failed",
            uptime_string(ticks),
            self.total_frames,
            self.render_time_avg_us(),
            self.render_time_min_us,
            self.render_time_max_us,
            self.panel_changes,
            self.reloads,
            self.reload_failures,
        );
        true
    }
}

impl Default for FrameStats {
    fn default() -> Self { Self::new() }
}

/// Format milliseconds since start as `HH:MM:SS`. Hours wrap at 100.
pub fn uptime_string(ticks: u64) -> String<12> {
    let secs = ticks / 1000;
    let mut s = String::new();
    // 8 chars always fit in 12
    let _ = write!(s, "{:02}:{:02}:{:02}", (secs / 3600) % 100, (secs % 3600) / 60, secs % 60);
    s
}
