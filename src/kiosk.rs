//! Loop driver: the context object that owns every piece of runtime state.
//!
//! # Iteration
//!
//! ```text
//! step(events, target)
//!   1. handle_events   Quit → stop before drawing; Resize → relayout (tracking mode)
//!   2. update_content  consume the change signal, reload if dirty, refresh the clock
//!   3. render          plan from the clock tick, draw the frame
//! ```
//!
//! Sleeping until the next frame deadline belongs to the caller. Nothing in a
//! step is fatal: content, render and draw failures are logged and the
//! previous visuals stay on screen.

use std::fmt::Debug;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::content::{ChangeNotifier, ContentReloader, ContentSource, ContentStore, Labels, ReloadOutcome};
use crate::panels::Panel;
use crate::render::draw_frame;
use crate::scheduler::{FramePlan, Scheduler};
use crate::stats::FrameStats;
use crate::text::Rasterizer;

// =============================================================================
// Viewport
// =============================================================================

/// Whether the logical frame follows the window size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewportMode {
    /// Logical size fixed at startup; resize events are ignored.
    #[default]
    Fixed,
    /// Logical size tracks the window.
    Tracking,
}

/// Cached logical frame size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    mode: ViewportMode,
    size: Size,
}

impl Viewport {
    pub const fn new(mode: ViewportMode, size: Size) -> Self { Self { mode, size } }

    #[inline]
    pub const fn size(&self) -> Size { self.size }

    #[inline]
    pub const fn mode(&self) -> ViewportMode { self.mode }

    /// Apply a window resize. Returns true if the logical size changed.
    pub fn apply_resize(&mut self, size: Size) -> bool {
        if self.mode == ViewportMode::Fixed || size == self.size || size.width == 0 || size.height == 0 {
            return false;
        }
        self.size = size;
        true
    }
}

// =============================================================================
// Events
// =============================================================================

/// Input the loop reacts to. Everything else the window reports is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KioskEvent {
    Quit,
    Resize(Size),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

// =============================================================================
// Surface
// =============================================================================

/// Frame buffer that can be matched to the logical viewport size.
pub trait Surface {
    type Target: DrawTarget<Color = Rgb888>;

    /// Reallocate so the target is `size`. No-op if it already is.
    fn ensure_size(&mut self, size: Size);

    fn target(&mut self) -> &mut Self::Target;
}

// =============================================================================
// Kiosk
// =============================================================================

/// Runtime state of the display, owned by the loop thread.
pub struct Kiosk<C, N, S, R> {
    clock: C,
    notifier: N,
    reloader: ContentReloader<S>,
    rasterizer: R,
    scheduler: Scheduler,
    content: ContentStore,
    viewport: Viewport,
    stats: FrameStats,
    shown_panel: Option<Panel>,
}

impl<C, N, S, R> Kiosk<C, N, S, R>
where
    C: Clock,
    N: ChangeNotifier,
    S: ContentSource,
    R: Rasterizer,
{
    /// Build the context and render the static labels.
    ///
    /// The counter is not read here; the first [`Kiosk::update_content`] loads it.
    pub fn new(
        clock: C,
        notifier: N,
        source: S,
        rasterizer: R,
        scheduler: Scheduler,
        viewport: Viewport,
        labels: &Labels,
    ) -> Self {
        let mut content = ContentStore::new(viewport.size());
        content.render_static(labels, &rasterizer);
        Self {
            clock,
            notifier,
            reloader: ContentReloader::new(source),
            rasterizer,
            scheduler,
            content,
            viewport,
            stats: FrameStats::new(),
            shown_panel: None,
        }
    }

    #[inline]
    pub const fn content(&self) -> &ContentStore { &self.content }

    #[inline]
    pub const fn viewport(&self) -> &Viewport { &self.viewport }

    #[inline]
    pub const fn stats(&self) -> &FrameStats { &self.stats }

    #[inline]
    pub const fn clock(&self) -> &C { &self.clock }

    #[inline]
    pub const fn notifier_mut(&mut self) -> &mut N { &mut self.notifier }

    /// Apply a batch of events in order. Stops at the first quit.
    pub fn handle_events(&mut self, events: impl IntoIterator<Item = KioskEvent>) -> LoopControl {
        for event in events {
            match event {
                KioskEvent::Quit => {
                    info!("Quit requested");
                    return LoopControl::Quit;
                }
                KioskEvent::Resize(size) => {
                    if self.viewport.apply_resize(size) {
                        info!("Viewport resized to {}x{}", size.width, size.height);
                        self.content.relayout(size, &self.rasterizer);
                    }
                }
            }
        }
        LoopControl::Continue
    }

    /// Reload the counter if the notifier fired (or on first call) and refresh the clock.
    pub fn update_content(&mut self) -> ReloadOutcome {
        let outcome = self.reloader.poll(&mut self.notifier, &mut self.content.counter, &self.rasterizer);
        self.stats.record_reload(&outcome);
        self.content.refresh_clock(self.clock.local_time(), &self.rasterizer);
        outcome
    }

    /// Plan and draw the frame for the current tick.
    pub fn render<D>(&mut self, target: &mut D) -> Result<FramePlan, D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let started = Instant::now();
        let ticks = self.clock.ticks();
        let plan = self.scheduler.plan(ticks, self.viewport.size());

        let current = plan.panels.current();
        if self.shown_panel != Some(current) {
            if self.shown_panel.is_some() {
                self.stats.record_panel_change();
            }
            debug!("Showing panel {current}");
            self.shown_panel = Some(current);
        }

        draw_frame(target, &plan, self.viewport.size(), &self.content)?;
        self.stats.record_frame(started.elapsed());
        self.stats.maybe_report(ticks);
        Ok(plan)
    }

    /// One loop iteration. Draw errors are logged, never returned.
    pub fn step<D>(
        &mut self,
        events: impl IntoIterator<Item = KioskEvent>,
        target: &mut D,
    ) -> LoopControl
    where
        D: DrawTarget<Color = Rgb888>,
        D::Error: Debug,
    {
        if self.handle_events(events) == LoopControl::Quit {
            return LoopControl::Quit;
        }
        self.update_content();
        if let Err(err) = self.render(target) {
            warn!("Frame draw failed: {err:?}");
        }
        LoopControl::Continue
    }

    /// Like [`Kiosk::step`], resizing `surface` to the viewport once events
    /// are applied and before anything is drawn.
    pub fn step_on<Sf>(
        &mut self,
        events: impl IntoIterator<Item = KioskEvent>,
        surface: &mut Sf,
    ) -> LoopControl
    where
        Sf: Surface,
        <Sf::Target as DrawTarget>::Error: Debug,
    {
        if self.handle_events(events) == LoopControl::Quit {
            return LoopControl::Quit;
        }
        surface.ensure_size(self.viewport.size());
        self.step(None::<KioskEvent>, surface.target())
    }
}
