//! Content panels shown in the rotation.
//!
//! # Panels
//!
//! - [`Panel::Counter`]: live pull request counter with its label
//! - [`Panel::MeetupSponsors`]: meetup sponsor badges
//! - [`Panel::MediaPatrons`]: media patron badges
//! - [`Panel::HacktoberfestSponsors`]: Hacktoberfest sponsor badge
//!
//! The set is closed: adding a panel means adding a variant here and a draw
//! function in [`crate::screens`]. The compiler then points at every `match`
//! that has to learn about it.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A content screen in the rotation.
///
/// Equality is identity: two rotation entries naming the same variant are "the
/// same panel" and never transition into each other.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Panel {
    Counter,
    MeetupSponsors,
    MediaPatrons,
    HacktoberfestSponsors,
}

impl Panel {
    /// Every panel kind, in declaration order.
    pub const ALL: [Self; 4] = [Self::Counter, Self::MeetupSponsors, Self::MediaPatrons, Self::HacktoberfestSponsors];

    /// Short name used in logs and config files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::MeetupSponsors => "meetup-sponsors",
            Self::MediaPatrons => "media-patrons",
            Self::HacktoberfestSponsors => "hacktoberfest-sponsors",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Default rotation: the counter shows three times out of six slots.
pub const DEFAULT_ROTATION: [Panel; 6] = [
    Panel::Counter,
    Panel::MeetupSponsors,
    Panel::MediaPatrons,
    Panel::HacktoberfestSponsors,
    Panel::Counter,
    Panel::Counter,
];
