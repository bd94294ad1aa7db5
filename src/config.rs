//! Runtime configuration and layout constants.
//!
//! # Configuration File
//!
//! Settings are read from a TOML file, `kiosk.toml` in the working directory
//! unless `KIOSK_CONFIG` names another path. Every section is optional and
//! every field falls back to its default, so an empty file is valid:
//!
//! ```toml
//! [rotation]
//! slot_ms = 5000
//! transition_ms = 500
//! style = "slide"            # or "crossfade"
//! panels = ["counter", "meetup-sponsors", "media-patrons", "hacktoberfest-sponsors", "counter", "counter"]
//!
//! [heartbeat]
//! rest_ms = 5000
//! buildup_ms = 200
//! echo_ms = 800
//! buildup_scale = 1.05
//! echo_scale = 1.25
//! echo_opacity = 0.35
//!
//! [display]
//! mode = "fixed"             # or "tracking"
//! width = 1920
//! height = 1080
//! window_scale = 1
//! min_fps = 25
//! title = "Pull Request Count Display"
//!
//! [content]
//! path = "/tmp/pr-counter"
//! default_value = "0"
//! counter_label = "Pull Request count:"
//! ```
//!
//! A missing file means defaults. A file that exists but does not parse, or
//! parses into values the scheduler cannot run with, is a setup failure.
//!
//! # Layout Constants
//!
//! Panel and overlay geometry is expressed as divisors of the frame size so it
//! holds for any resolution. They are compile-time constants, not config.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use embedded_graphics::prelude::Size;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::Labels;
use crate::heartbeat::{Heartbeat, HeartbeatError};
use crate::kiosk::ViewportMode;
use crate::panels::{DEFAULT_ROTATION, Panel};
use crate::rotation::{Rotation, RotationError};
use crate::scheduler::{Scheduler, TransitionStyle};

// =============================================================================
// File Location
// =============================================================================

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "KIOSK_CONFIG";

/// Config file used when `KIOSK_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "kiosk.toml";

// =============================================================================
// Text Layout Constants
// =============================================================================

/// Counter glyph height: `h / 5`.
pub const COUNTER_HEIGHT_DIVISOR: u32 = 5;

/// Counter label height: `h / 10`.
pub const LABEL_HEIGHT_DIVISOR: u32 = 10;

/// Sponsor panel header height: `h / 12`.
pub const HEADER_HEIGHT_DIVISOR: u32 = 12;

/// Clock height: `h / 15`.
pub const CLOCK_HEIGHT_DIVISOR: u32 = 15;

/// Clock inset from the top-left corner: `h / 100`.
pub const CLOCK_MARGIN_DIVISOR: u32 = 100;

/// Gap between the counter bottom and the frame bottom: `h / 25`.
pub const COUNTER_BOTTOM_DIVISOR: u32 = 25;

/// Gap above a block, as a fraction of the header placed there: `header_h / 5`.
pub const HEADER_GAP_DIVISOR: u32 = 5;

// =============================================================================
// Decoration and Badge Layout Constants
// =============================================================================

/// Logo width as `w * NUM / DEN` (1440 px on a 1920 px frame).
pub const LOGO_WIDTH_NUM: u32 = 3;
pub const LOGO_WIDTH_DEN: u32 = 4;

/// Logo height as a fraction of the logo width.
pub const LOGO_ASPECT_DIVISOR: u32 = 4;

/// Corner ornament size: `w / 6` by `h / 4`.
pub const CORNER_WIDTH_DIVISOR: u32 = 6;
pub const CORNER_HEIGHT_DIVISOR: u32 = 4;

/// Sponsor badges sit above a bottom band of `h / 10`.
pub const BADGE_BAND_DIVISOR: u32 = 10;

/// Meetup sponsor badge height: `h / 9`.
pub const MEETUP_BADGE_HEIGHT_DIVISOR: u32 = 9;

/// Meetup badges are pushed apart from the centre by `w / 20` each.
pub const MEETUP_BADGE_SPREAD_DIVISOR: u32 = 20;

/// Media patron badges (besides the lead one) are `w / 4` wide.
pub const PATRON_BADGE_WIDTH_DIVISOR: u32 = 4;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid rotation: {0}")]
    Rotation(#[from] RotationError),
    #[error("invalid heartbeat: {0}")]
    Heartbeat(#[from] HeartbeatError),
    #[error("invalid display: {0}")]
    Display(&'static str),
}

// =============================================================================
// Sections
// =============================================================================

/// Panel rotation timing and order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RotationConfig {
    /// How long each rotation entry stays current.
    pub slot_ms: u64,
    /// Tail of each slot spent transitioning; 0 for hard cuts.
    pub transition_ms: u64,
    pub style: TransitionStyle,
    /// Rotation order. Repeat an entry to show it more often.
    pub panels: Vec<Panel>,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self { slot_ms: 5000, transition_ms: 500, style: TransitionStyle::Slide, panels: DEFAULT_ROTATION.to_vec() }
    }
}

/// Logo heartbeat timing and amplitude.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    pub rest_ms: u64,
    pub buildup_ms: u64,
    pub echo_ms: u64,
    pub buildup_scale: f32,
    pub echo_scale: f32,
    pub echo_opacity: f32,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self { rest_ms: 5000, buildup_ms: 200, echo_ms: 800, buildup_scale: 1.05, echo_scale: 1.25, echo_opacity: 0.35 }
    }
}

/// Render surface.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// `tracking` follows `Resize` events. The simulator window never resizes,
    /// so with the simulator backend both modes keep the startup size.
    pub mode: ViewportMode,
    /// Logical frame width; the initial window size in tracking mode.
    pub width: u32,
    pub height: u32,
    /// Window pixels per frame pixel.
    pub window_scale: u32,
    /// Frame rate floor. The loop sleeps at most `1000 / min_fps` ms per frame.
    pub min_fps: u32,
    pub title: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: ViewportMode::Fixed,
            width: 1920,
            height: 1080,
            window_scale: 1,
            min_fps: 25,
            title: "Pull Request Count Display".into(),
        }
    }
}

/// Counter content file and its label.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    pub path: PathBuf,
    /// Written to `path` if the file does not exist at startup.
    pub default_value: String,
    pub counter_label: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/tmp/pr-counter"),
            default_value: "0".into(),
            counter_label: "Pull Request count:".into(),
        }
    }
}

// =============================================================================
// Kiosk Config
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KioskConfig {
    pub rotation: RotationConfig,
    pub heartbeat: HeartbeatConfig,
    pub display: DisplayConfig,
    pub content: ContentConfig,
}

impl KioskConfig {
    /// Config file path: `KIOSK_CONFIG` or [`DEFAULT_CONFIG_PATH`].
    pub fn path() -> PathBuf {
        env::var_os(CONFIG_ENV_VAR).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }

    /// Load and validate the config from [`KioskConfig::path`].
    pub fn load() -> Result<Self, ConfigError> { Self::load_from_path(Self::path()) }

    /// Load and validate the config at `path`. A missing file yields the defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self = toml::from_str(&contents)
                    .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every value the scheduler and display depend on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_rotation()?;
        self.build_heartbeat()?;

        let display = &self.display;
        if display.width == 0 || display.height == 0 {
            return Err(ConfigError::Display("width and height must be greater than zero"));
        }
        if display.window_scale == 0 {
            return Err(ConfigError::Display("window_scale must be greater than zero"));
        }
        if display.min_fps == 0 {
            return Err(ConfigError::Display("min_fps must be greater than zero"));
        }
        Ok(())
    }

    pub fn build_rotation(&self) -> Result<Rotation, RotationError> {
        let r = &self.rotation;
        Rotation::new(r.panels.clone(), r.slot_ms, r.transition_ms)
    }

    pub fn build_heartbeat(&self) -> Result<Heartbeat, HeartbeatError> {
        let h = &self.heartbeat;
        Heartbeat::new(h.rest_ms, h.buildup_ms, h.echo_ms, h.buildup_scale, h.echo_scale, h.echo_opacity)
    }

    pub fn build_scheduler(&self) -> Result<Scheduler, ConfigError> {
        Ok(Scheduler::new(self.build_rotation()?, self.build_heartbeat()?, self.rotation.style))
    }

    /// Initial logical frame size.
    #[inline]
    pub const fn frame_size(&self) -> Size { Size::new(self.display.width, self.display.height) }

    /// Longest sleep between frames that still meets `min_fps`.
    pub fn frame_budget(&self) -> Duration { Duration::from_millis(1000 / u64::from(self.display.min_fps.max(1))) }

    /// Static panel text.
    pub fn labels(&self) -> Labels { Labels { counter_label: self.content.counter_label.clone(), ..Labels::default() } }
}
