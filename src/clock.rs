//! Clock source: monotonic ticks for animation, wall time for the clock overlay.

use std::time::Instant;

use chrono::{Local, NaiveTime, Timelike};

/// Time as seen by the scheduler.
pub trait Clock {
    /// Milliseconds since the clock was started. Never decreases.
    fn ticks(&self) -> u64;

    /// Current local wall-clock time.
    fn local_time(&self) -> NaiveTime;
}

/// Real clock: `Instant` for ticks, `chrono::Local` for wall time.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self { Self { start: Instant::now() } }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl Clock for SystemClock {
    fn ticks(&self) -> u64 {
        // u64 milliseconds outlasts any deployment
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn local_time(&self) -> NaiveTime { Local::now().time() }
}

/// Minute of the day, used to decide when the clock text is stale.
#[inline]
pub fn minute_of_day(time: NaiveTime) -> u32 { time.hour() * 60 + time.minute() }
