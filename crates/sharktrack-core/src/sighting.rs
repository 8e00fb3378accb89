//! Sightings ("pings") and the lookback windows they are queried over.
//!
//! The provider hands out raw [`Sighting`]s whose timestamps are plain
//! strings. Anything that needs ordering works on [`TimedSighting`], which
//! carries the parsed timestamp as its comparison key.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Error, Result};

/// Wire format of every timestamp the provider returns and the rotation
/// cache stores. Local wall-clock time, second resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp in [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(
    |source| Error::MalformedTimestamp {
      timestamp: raw.to_owned(),
      source,
    },
  )
}

/// Render a timestamp in [`TIMESTAMP_FORMAT`].
pub fn format_timestamp(at: NaiveDateTime) -> String {
  at.format(TIMESTAMP_FORMAT).to_string()
}

// ─── Window ──────────────────────────────────────────────────────────────────

/// A named lookback period bounding which sightings are retrieved.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Window {
  #[default]
  Day,
  Week,
  Month,
}

impl Window {
  /// Narrowest first; the order used to find a subject's latest sighting.
  pub const CASCADE: [Window; 3] = [Window::Day, Window::Week, Window::Month];

  /// How far back from "now" this window reaches.
  pub fn lookback(self) -> TimeDelta {
    match self {
      Window::Day => TimeDelta::hours(24),
      Window::Week => TimeDelta::days(7),
      Window::Month => TimeDelta::days(30),
    }
  }
}

// ─── Sightings ───────────────────────────────────────────────────────────────

/// A raw sighting record exactly as the provider reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sighting {
  pub subject_id: String,
  pub timestamp:  String,
}

impl Sighting {
  pub fn new(subject_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
    Self {
      subject_id: subject_id.into(),
      timestamp:  timestamp.into(),
    }
  }
}

/// A sighting whose timestamp has been parsed into a sortable key.
///
/// Two timed sightings describe the "same" subject when their
/// [`subject_key`]s are equal, whatever their timestamps. That identity is
/// kept out of `PartialEq` on purpose; callers that want it ask for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedSighting {
  pub subject_id: String,
  /// The provider's original timestamp string.
  pub timestamp:  String,
  #[serde(skip)]
  pub seen_at:    NaiveDateTime,
}

impl TryFrom<Sighting> for TimedSighting {
  type Error = Error;

  fn try_from(sighting: Sighting) -> Result<Self> {
    let seen_at = parse_timestamp(&sighting.timestamp)?;
    Ok(Self {
      subject_id: sighting.subject_id,
      timestamp: sighting.timestamp,
      seen_at,
    })
  }
}

impl From<TimedSighting> for Sighting {
  fn from(timed: TimedSighting) -> Self {
    Self {
      subject_id: timed.subject_id,
      timestamp:  timed.timestamp,
    }
  }
}

/// The identity key for deduplication and lookup: the subject alone.
pub fn subject_key(sighting: &TimedSighting) -> &str { &sighting.subject_id }
