//! [`SnapshotProvider`]: a [`SightingProvider`] over a JSON dataset file.
//!
//! The upstream tracking service is out of reach here, so the server reads a
//! saved dataset instead:
//!
//! ```json
//! {
//!   "sightings": [{ "subject_id": "Oscar", "timestamp": "2016-03-01 10:00:00" }],
//!   "subjects":  [{ "subject_id": "Oscar", "gender": "Male", "last_location": { "lat": 41.5, "lon": -70.1 } }]
//! }
//! ```

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sharktrack_core::{
  provider::SightingProvider,
  sighting::{Sighting, Window, parse_timestamp},
  subject::{Location, SubjectRecord},
};

use crate::{Error, Result};

/// The on-disk dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
  #[serde(default)]
  pub sightings: Vec<Sighting>,
  #[serde(default)]
  pub subjects:  Vec<SubjectRecord>,
}

/// Serves a [`Snapshot`] as if it were the live provider.
///
/// Windows are measured back from the local clock unless pinned with
/// [`SnapshotProvider::at`].
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
  snapshot: Snapshot,
  now:      Option<NaiveDateTime>,
}

impl SnapshotProvider {
  pub fn new(snapshot: Snapshot) -> Self {
    Self {
      snapshot,
      now: None,
    }
  }

  /// Load a dataset file.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    tracing::info!(
      path = %path.display(),
      sightings = snapshot.sightings.len(),
      subjects = snapshot.subjects.len(),
      "loaded snapshot"
    );
    Ok(Self::new(snapshot))
  }

  /// Measure windows back from `now` instead of the local clock.
  pub fn at(mut self, now: NaiveDateTime) -> Self {
    self.now = Some(now);
    self
  }

  fn now(&self) -> NaiveDateTime {
    self.now.unwrap_or_else(|| Local::now().naive_local())
  }

  fn subject(&self, subject_id: &str) -> Result<&SubjectRecord> {
    self
      .snapshot
      .subjects
      .iter()
      .find(|s| s.subject_id == subject_id)
      .ok_or_else(|| Error::UnknownSubject(subject_id.to_owned()))
  }
}

impl SightingProvider for SnapshotProvider {
  type Error = Error;

  /// Sightings at or after `now - lookback`. Records with unparseable
  /// timestamps are passed through for the caller to deal with.
  async fn list_sightings(&self, window: Window) -> Result<Vec<Sighting>> {
    let since = self.now() - window.lookback();
    Ok(
      self
        .snapshot
        .sightings
        .iter()
        .filter(|s| parse_timestamp(&s.timestamp).map_or(true, |at| at >= since))
        .cloned()
        .collect(),
    )
  }

  async fn get_subject<'a>(&'a self, subject_id: &'a str) -> Result<SubjectRecord> {
    self.subject(subject_id).cloned()
  }

  async fn get_last_location<'a>(&'a self, subject_id: &'a str) -> Result<Location> {
    self
      .subject(subject_id)?
      .last_location
      .ok_or_else(|| Error::NoLocation(subject_id.to_owned()))
  }

  async fn list_subject_ids(&self) -> Result<Vec<String>> {
    Ok(
      self
        .snapshot
        .subjects
        .iter()
        .map(|s| s.subject_id.clone())
        .collect(),
    )
  }
}
