//! [`FileRotationCache`]: one-line "item of the day" files.

use std::{
  io::ErrorKind,
  path::PathBuf,
  sync::{Mutex, PoisonError},
};

use chrono::NaiveDateTime;
use rand::Rng;
use sharktrack_core::rotation::{CacheEntry, Rotation, rotate, validate_cache_key};

use crate::{Error, Result, atomic::write_atomic};

/// Rotation cache entries stored as `<dir>/<key>.txt`, each holding a single
/// `"<timestamp>|<selected_id>"` line.
///
/// A read and its follow-up rewrite happen under one mutex, so a staleness
/// event produces exactly one rewrite within a process.
#[derive(Debug)]
pub struct FileRotationCache {
  dir:  PathBuf,
  lock: Mutex<()>,
}

impl FileRotationCache {
  /// Open (or create) the cache directory.
  pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    std::fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
    Ok(Self {
      dir,
      lock: Mutex::new(()),
    })
  }

  /// Backing file for `key`.
  pub fn path_for(&self, key: &str) -> Result<PathBuf> {
    validate_cache_key(key)?;
    Ok(self.dir.join(format!("{key}.txt")))
  }

  /// The stored entry for `key`, if there is a readable one.
  ///
  /// A missing file is simply absent. An unreadable or malformed one is also
  /// treated as absent so the cache can always move forward, but it is
  /// logged.
  pub fn load(&self, key: &str) -> Result<Option<CacheEntry>> {
    let path = self.path_for(key)?;
    let raw = match std::fs::read_to_string(&path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => {
        tracing::warn!(path = %path.display(), err = %e, "unreadable cache entry; reselecting");
        return Ok(None);
      }
    };
    let line = raw.lines().next().unwrap_or_default();
    match CacheEntry::parse_line(line) {
      Ok(entry) => Ok(Some(entry)),
      Err(e) => {
        tracing::warn!(path = %path.display(), err = %e, "malformed cache entry; reselecting");
        Ok(None)
      }
    }
  }

  /// The entry to serve for `key` at `now`, reselecting from `pool` when the
  /// stored one is absent or stale.
  pub fn current<R>(
    &self,
    key: &str,
    pool: &[String],
    now: NaiveDateTime,
    rng: &mut R,
  ) -> Result<CacheEntry>
  where
    R: Rng + ?Sized,
  {
    let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
    let rotation = rotate(self.load(key)?, now, pool, rng)?;
    if let Rotation::Selected(entry) = &rotation {
      let mut line = entry.to_line();
      line.push('\n');
      write_atomic(&self.path_for(key)?, &line)?;
      tracing::info!(key, selected = %entry.selected_id, "rotated cache entry");
    }
    Ok(rotation.into_entry())
  }
}
