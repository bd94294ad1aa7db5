//! Kiosk display binary.
//!
//! Setup failures (bad config, unwritable content file, watcher errors) end the
//! process with a non-zero exit code before the first frame. Once the loop is
//! running, only a quit request stops it.
//!
//! # Environment
//!
//! - `KIOSK_CONFIG`: config file path (default `kiosk.toml`)
//! - `RUST_LOG`: log filter (default `kiosk_display=info`)

use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use kiosk_display::backend::SimulatorBackend;
use kiosk_display::clock::SystemClock;
use kiosk_display::config::KioskConfig;
use kiosk_display::content::FileSource;
use kiosk_display::kiosk::{Kiosk, LoopControl, Viewport};
use kiosk_display::logging;
use kiosk_display::text::MonoRasterizer;
use kiosk_display::watcher::{FileWatcher, ensure_exists};
use log::info;

fn main() -> Result<()> {
    logging::init();

    let config = KioskConfig::load()
        .with_context(|| format!("loading configuration from {}", KioskConfig::path().display()))?;
    let scheduler = config.build_scheduler().context("building scheduler")?;

    // The watch needs an existing target
    let content_path = &config.content.path;
    ensure_exists(content_path, &config.content.default_value).context("preparing content file")?;
    let watcher = FileWatcher::start(content_path.clone()).context("starting content watcher")?;
    let source = FileSource::new(watcher.path());

    let viewport = Viewport::new(config.display.mode, config.frame_size());
    let mut backend = SimulatorBackend::new(&config.display);
    let mut kiosk = Kiosk::new(
        SystemClock::new(),
        watcher,
        source,
        MonoRasterizer,
        scheduler,
        viewport,
        &config.labels(),
    );

    let frame_budget = config.frame_budget();
    info!(
        "Kiosk running: {}x{} {:?}, {} panels, {}ms slots",
        viewport.size().width,
        viewport.size().height,
        viewport.mode(),
        config.rotation.panels.len(),
        config.rotation.slot_ms,
    );

    loop {
        let frame_start = Instant::now();

        let events = backend.poll_events();
        if kiosk.step_on(events, &mut backend) == LoopControl::Quit {
            break;
        }
        backend.present();

        if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    info!("Kiosk stopped after {} frames", kiosk.stats().total_frames);
    Ok(())
}
