//! [`FileMembershipStore`]: profiles as text files, one subject per line.

use std::{
  io::ErrorKind,
  path::PathBuf,
  sync::{Mutex, PoisonError},
};

use sharktrack_core::membership::{
  MembershipChange, MembershipStore, Profile, normalize_members,
  validate_profile_name, validate_subject_id,
};

use crate::{Error, Result, atomic::write_atomic};

const EXTENSION: &str = "txt";

/// Profiles stored as `<dir>/<name>.txt`.
///
/// A mutex serialises read-modify-write cycles within one process.
#[derive(Debug)]
pub struct FileMembershipStore {
  dir:  PathBuf,
  lock: Mutex<()>,
}

impl FileMembershipStore {
  /// Open (or create) the profile directory.
  pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    std::fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
    Ok(Self {
      dir,
      lock: Mutex::new(()),
    })
  }

  /// Backing file for the profile called `name`.
  pub fn path_for(&self, name: &str) -> Result<PathBuf> {
    validate_profile_name(name)?;
    Ok(self.dir.join(format!("{name}.{EXTENSION}")))
  }

  /// Create `name` unless it already exists; either way return its handle.
  pub fn ensure_profile(&self, name: &str) -> Result<Profile> {
    match self.create_profile(name) {
      Err(Error::ProfileExists(_)) => self.switch_profile(name),
      other => other,
    }
  }

  fn read_members(&self, profile: &Profile) -> Result<Vec<String>> {
    let path = self.path_for(profile.name())?;
    match std::fs::read_to_string(&path) {
      Ok(raw) => Ok(normalize_members(raw.lines())),
      Err(e) if e.kind() == ErrorKind::NotFound => {
        Err(Error::ProfileNotFound(profile.name().to_owned()))
      }
      Err(e) => Err(Error::io(path, e)),
    }
  }

  fn write_members(&self, profile: &Profile, members: &[String]) -> Result<()> {
    let path = self.path_for(profile.name())?;
    let mut content = String::new();
    for id in members {
      content.push_str(id);
      content.push('\n');
    }
    write_atomic(&path, &content)
  }

  /// Apply `edit` to the member list under the lock, writing only if it
  /// reports a change.
  fn modify<F>(&self, profile: &Profile, edit: F) -> Result<MembershipChange>
  where
    F: FnOnce(&mut Vec<String>) -> bool,
  {
    let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
    let mut members = self.read_members(profile)?;
    let previous = members.len();
    if edit(&mut members) {
      self.write_members(profile, &members)?;
    }
    Ok(MembershipChange {
      previous,
      count: members.len(),
    })
  }
}

impl MembershipStore for FileMembershipStore {
  type Error = Error;

  fn create_profile(&self, name: &str) -> Result<Profile> {
    let profile = Profile::new(name)?;
    let path = self.path_for(name)?;
    let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

    // `create_new` refuses to clobber, closing the gap between check and
    // create against other processes as well.
    match std::fs::OpenOptions::new()
      .write(true)
      .create_new(true)
      .open(&path)
    {
      Ok(_) => {
        tracing::info!(profile = name, "created profile");
        Ok(profile)
      }
      Err(e) if e.kind() == ErrorKind::AlreadyExists => {
        Err(Error::ProfileExists(name.to_owned()))
      }
      Err(e) => Err(Error::io(path, e)),
    }
  }

  fn switch_profile(&self, name: &str) -> Result<Profile> {
    let profile = Profile::new(name)?;
    let path = self.path_for(name)?;
    if path.is_file() {
      tracing::debug!(profile = name, "switched profile");
      Ok(profile)
    } else {
      Err(Error::ProfileNotFound(name.to_owned()))
    }
  }

  fn list(&self, profile: &Profile) -> Result<Vec<String>> {
    self.read_members(profile)
  }

  fn follow(&self, profile: &Profile, subject_id: &str) -> Result<MembershipChange> {
    validate_subject_id(subject_id)?;
    let change = self.modify(profile, |members| {
      if members.iter().any(|m| m == subject_id) {
        false
      } else {
        members.push(subject_id.to_owned());
        true
      }
    })?;
    if change.changed() {
      tracing::info!(profile = profile.name(), subject_id, count = change.count, "followed");
    }
    Ok(change)
  }

  fn unfollow(&self, profile: &Profile, subject_id: &str) -> Result<MembershipChange> {
    let change = self.modify(profile, |members| {
      let before = members.len();
      members.retain(|m| m != subject_id);
      members.len() != before
    })?;
    if change.changed() {
      tracing::info!(profile = profile.name(), subject_id, count = change.count, "unfollowed");
    }
    Ok(change)
  }
}
