//! The "item of the day" state machine.
//!
//! A cache entry names the selected subject and when it was selected. On
//! every read the entry is either kept, or (when absent or at least
//! [`rotation_period`] old) replaced by a fresh uniform pick from the
//! candidate pool. Persistence lives in the store crate; this module only
//! decides.

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use rand::{Rng, seq::SliceRandom};
use serde::Serialize;

use crate::{
  Error, Result,
  membership::is_storage_key,
  sighting::{format_timestamp, parse_timestamp},
};

/// Age in hours at which an entry is replaced. Measured from the stored
/// timestamp, not from calendar-day boundaries.
pub const ROTATION_HOURS: i64 = 24;

pub fn rotation_period() -> TimeDelta { TimeDelta::hours(ROTATION_HOURS) }

/// Cache keys name one storage file each, under the same character rules as
/// profile names.
pub fn validate_cache_key(key: &str) -> Result<()> {
  if is_storage_key(key) {
    Ok(())
  } else {
    Err(Error::InvalidCacheKey(key.to_owned()))
  }
}

/// One persisted selection: `"<timestamp>|<selected_id>"` on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
  pub selected_id: String,
  pub selected_at: NaiveDateTime,
}

impl CacheEntry {
  /// Parse the single stored line.
  pub fn parse_line(line: &str) -> Result<Self> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (at, id) = line
      .split_once('|')
      .ok_or_else(|| Error::MalformedCacheEntry(line.to_owned()))?;
    if id.is_empty() {
      return Err(Error::MalformedCacheEntry(line.to_owned()));
    }
    Ok(Self {
      selected_id: id.to_owned(),
      selected_at: parse_timestamp(at)?,
    })
  }

  /// The stored line, without a trailing newline.
  pub fn to_line(&self) -> String {
    format!("{}|{}", format_timestamp(self.selected_at), self.selected_id)
  }

  pub fn is_stale(&self, now: NaiveDateTime) -> bool {
    now - self.selected_at >= rotation_period()
  }
}

/// What a read did to the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rotation {
  /// The stored entry is still fresh; nothing needs writing.
  Kept(CacheEntry),
  /// A new entry was picked and must be persisted.
  Selected(CacheEntry),
}

impl Rotation {
  pub fn entry(&self) -> &CacheEntry {
    match self {
      Rotation::Kept(entry) | Rotation::Selected(entry) => entry,
    }
  }

  pub fn into_entry(self) -> CacheEntry {
    match self {
      Rotation::Kept(entry) | Rotation::Selected(entry) => entry,
    }
  }

  pub fn needs_write(&self) -> bool { matches!(self, Rotation::Selected(_)) }
}

/// Decide the entry to serve at `now`.
///
/// The pool is only consulted when a new pick is needed, so a fresh entry
/// survives an empty pool.
pub fn rotate<R>(
  current: Option<CacheEntry>,
  now: NaiveDateTime,
  pool: &[String],
  rng: &mut R,
) -> Result<Rotation>
where
  R: Rng + ?Sized,
{
  if let Some(entry) = current
    && !entry.is_stale(now)
  {
    return Ok(Rotation::Kept(entry));
  }

  let selected_id = pool.choose(rng).ok_or(Error::EmptyPool)?.clone();
  Ok(Rotation::Selected(CacheEntry {
    selected_id,
    selected_at: now.with_nanosecond(0).unwrap_or(now),
  }))
}
