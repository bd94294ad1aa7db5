//! Content store and dirty tracking for the dynamic text elements.
//!
//! # Reload Cycle
//!
//! ```text
//! every loop iteration:
//!   notifier.poll_changed() ──┐
//!   first iteration ──────────┴─ OR ─► source.read() ─► normalize ─► rasterize
//!                                          │                │            │
//!                                          └──── error ─────┴────────────┴─► keep last texture, warn
//! ```
//!
//! The change signal is a boolean, so any number of writes between two polls
//! produce exactly one reload of whatever is on disk at poll time.
//!
//! The clock element is dirty-by-comparison instead: it is regenerated when the
//! minute of day differs from the last one it was rendered for.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use embedded_graphics::prelude::Size;
use log::{debug, warn};
use thiserror::Error;

use crate::clock::minute_of_day;
use crate::styles;
use crate::text::{DynamicText, Rasterizer, RenderError, TEXT_CAPACITY, TextBuffer};

// =============================================================================
// Errors
// =============================================================================

/// Reading the external content failed. The counter keeps its last texture.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content is empty")]
    Empty,
}

/// A reload attempt that left the previous texture in place.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("failed to render content: {0}")]
    Render(#[from] RenderError),
}

// =============================================================================
// Collaborator Seams
// =============================================================================

/// Where the counter text comes from.
pub trait ContentSource {
    fn read(&mut self) -> Result<String, ContentError>;
}

/// Boolean "something changed since the last poll" signal.
///
/// Each call consumes the signal: a second call with no new events returns false.
pub trait ChangeNotifier {
    fn poll_changed(&mut self) -> bool;
}

/// Bytes read per reload; the extra byte lets truncation be detected.
const READ_LIMIT: u64 = TEXT_CAPACITY as u64 + 1;

/// Counter text read from a file on every reload.
///
/// Only the first line is read, and at most one byte more than a
/// [`TextBuffer`] holds, so an oversized file is never loaded whole.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    #[inline]
    pub fn path(&self) -> &Path { &self.path }
}

impl ContentSource for FileSource {
    fn read(&mut self) -> Result<String, ContentError> {
        let read_err = |source| ContentError::Read { path: self.path.clone(), source };
        let file = File::open(&self.path).map_err(read_err)?;

        let mut line = Vec::new();
        BufReader::new(file)
            .take(READ_LIMIT)
            .read_until(b'\n', &mut line)
            .map_err(read_err)?;
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}

/// Reduce raw file content to what the counter shows.
///
/// Only the first line counts. It is truncated to the buffer capacity, then
/// trailing whitespace and control bytes are stripped. A blank result is
/// [`ContentError::Empty`].
pub fn normalize_content(raw: &str) -> Result<TextBuffer, ContentError> {
    let first_line = raw.split('\n').next().unwrap_or_default();
    let (mut text, truncated) = TextBuffer::truncated(first_line);
    if truncated {
        debug!("Content truncated to {} bytes", text.len());
    }
    text.trim_end_control();
    if text.is_empty() {
        return Err(ContentError::Empty);
    }
    Ok(text)
}

// =============================================================================
// Reloader
// =============================================================================

/// Result of one reload poll.
#[derive(Debug)]
pub enum ReloadOutcome {
    /// No change signalled; nothing read.
    Idle,
    /// Content read and rendered.
    Reloaded,
    /// Reload attempted and failed; previous texture retained.
    Retained(ReloadError),
}

/// Polls a notifier and regenerates the counter element when it fires.
#[derive(Debug)]
pub struct ContentReloader<S> {
    source: S,
    primed: bool,
}

impl<S: ContentSource> ContentReloader<S> {
    pub const fn new(source: S) -> Self { Self { source, primed: false } }

    #[inline]
    pub const fn source(&self) -> &S { &self.source }

    /// Consume the change signal and reload if it fired or this is the first poll.
    pub fn poll(
        &mut self,
        notifier: &mut impl ChangeNotifier,
        element: &mut DynamicText,
        rasterizer: &impl Rasterizer,
    ) -> ReloadOutcome {
        let changed = notifier.poll_changed();
        if self.primed && !changed {
            return ReloadOutcome::Idle;
        }
        self.primed = true;

        match self.reload(element, rasterizer) {
            Ok(()) => {
                debug!("Content reloaded: {:?}", element.buffer());
                ReloadOutcome::Reloaded
            }
            Err(err) => {
                warn!("Keeping previous content: {err}");
                ReloadOutcome::Retained(err)
            }
        }
    }

    fn reload(&mut self, element: &mut DynamicText, rasterizer: &impl Rasterizer) -> Result<(), ReloadError> {
        let raw = self.source.read()?;
        let text = normalize_content(&raw)?;
        element.update(text, rasterizer)?;
        Ok(())
    }
}

// =============================================================================
// Content Store
// =============================================================================

/// Static text shown by the panels, fixed at startup.
#[derive(Clone, Debug)]
pub struct Labels {
    pub counter_label: String,
    pub meetup_header: String,
    pub media_header: String,
    pub hacktoberfest_header: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            counter_label: "Pull Request count:".into(),
            meetup_header: "POZNAN MEETUP SPONSORS".into(),
            media_header: "MEDIA PATRONS".into(),
            hacktoberfest_header: "HACKTOBERFEST SPONSORS".into(),
        }
    }
}

/// Every text element the panels and overlays draw.
#[derive(Clone, Debug)]
pub struct ContentStore {
    pub counter: DynamicText,
    pub counter_label: DynamicText,
    pub clock: DynamicText,
    pub meetup_header: DynamicText,
    pub media_header: DynamicText,
    pub hacktoberfest_header: DynamicText,
    clock_minute: Option<u32>,
}

impl ContentStore {
    /// Unrendered elements sized for `frame`.
    pub fn new(frame: Size) -> Self {
        Self {
            counter: DynamicText::new(styles::counter_spec(frame)),
            counter_label: DynamicText::new(styles::counter_label_spec(frame)),
            clock: DynamicText::new(styles::clock_spec(frame)),
            meetup_header: DynamicText::new(styles::header_spec(frame)),
            media_header: DynamicText::new(styles::header_spec(frame)),
            hacktoberfest_header: DynamicText::new(styles::header_spec(frame)),
            clock_minute: None,
        }
    }

    /// Render the static label and headers. Failures are logged; the paired panel skips that text.
    pub fn render_static(&mut self, labels: &Labels, rasterizer: &impl Rasterizer) {
        let statics = [
            (&mut self.counter_label, labels.counter_label.as_str()),
            (&mut self.meetup_header, labels.meetup_header.as_str()),
            (&mut self.media_header, labels.media_header.as_str()),
            (&mut self.hacktoberfest_header, labels.hacktoberfest_header.as_str()),
        ];
        for (element, text) in statics {
            if let Err(err) = element.update_str(text, rasterizer) {
                warn!("Failed to render {text:?}: {err}");
            }
        }
    }

    /// Regenerate the clock if the minute changed. Returns true if a render was attempted.
    pub fn refresh_clock(&mut self, now: NaiveTime, rasterizer: &impl Rasterizer) -> bool {
        let minute = minute_of_day(now);
        if self.clock_minute == Some(minute) {
            return false;
        }
        // One attempt per minute, even if it fails
        self.clock_minute = Some(minute);

        let formatted = now.format("%H:%M").to_string();
        if let Err(err) = self.clock.update_str(&formatted, rasterizer) {
            warn!("Failed to render clock {formatted}: {err}");
        }
        true
    }

    /// Re-render every element for a new frame size. Failed elements keep their old texture.
    pub fn relayout(&mut self, frame: Size, rasterizer: &impl Rasterizer) {
        let header = styles::header_spec(frame);
        let elements = [
            (&mut self.counter, styles::counter_spec(frame)),
            (&mut self.counter_label, styles::counter_label_spec(frame)),
            (&mut self.clock, styles::clock_spec(frame)),
            (&mut self.meetup_header, header),
            (&mut self.media_header, header),
            (&mut self.hacktoberfest_header, header),
        ];
        for (element, spec) in elements {
            if let Err(err) = element.respec(spec, rasterizer) {
                warn!("Failed to re-render {:?} for {}x{}: {err}", element.buffer(), frame.width, frame.height);
            }
        }
    }
}
