//! Profiles and the `MembershipStore` trait ("followed" subjects).
//!
//! A profile is a named, ordered set of subject identifiers. The store is the
//! single source of truth for how many subjects a profile follows; callers
//! read [`MembershipChange`] or [`MembershipStore::count`] instead of keeping
//! their own counter.

use serde::Serialize;

use crate::{Error, Result};

// ─── Profile ─────────────────────────────────────────────────────────────────

/// Handle to an existing profile. Only a [`MembershipStore`] hands these out,
/// so holding one means the profile existed when it was created or selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
  name: String,
}

impl Profile {
  /// Wrap a validated name. Store implementations call this after checking
  /// that the backing storage exists.
  pub fn new(name: &str) -> Result<Self> {
    validate_profile_name(name)?;
    Ok(Self {
      name: name.to_owned(),
    })
  }

  pub fn name(&self) -> &str { &self.name }
}

/// Whether `key` can name a storage file on its own: non-empty ASCII
/// alphanumerics, `-` and `_`.
pub fn is_storage_key(key: &str) -> bool {
  !key.is_empty()
    && key
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Profile names map one-to-one onto storage keys.
pub fn validate_profile_name(name: &str) -> Result<()> {
  if is_storage_key(name) {
    Ok(())
  } else {
    Err(Error::InvalidProfileName(name.to_owned()))
  }
}

/// Subject identifiers are stored one per line, so they must be non-empty,
/// single-line and free of surrounding whitespace.
pub fn validate_subject_id(subject_id: &str) -> Result<()> {
  let valid = !subject_id.is_empty()
    && subject_id.trim() == subject_id
    && !subject_id.contains(['\n', '\r']);
  if valid {
    Ok(())
  } else {
    Err(Error::InvalidSubjectId(subject_id.to_owned()))
  }
}

// ─── Change report ───────────────────────────────────────────────────────────

/// Result of a follow or unfollow: the profile size before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MembershipChange {
  pub previous: usize,
  pub count:    usize,
}

impl MembershipChange {
  /// The set went from empty to non-empty; dependent features switch on.
  pub fn became_non_empty(&self) -> bool { self.previous == 0 && self.count > 0 }

  /// The set went from non-empty to empty; dependent features switch off.
  pub fn became_empty(&self) -> bool { self.previous > 0 && self.count == 0 }

  /// Whether the persisted set was modified at all.
  pub fn changed(&self) -> bool { self.previous != self.count }
}

// ─── Set helpers ─────────────────────────────────────────────────────────────

/// Collapse raw stored lines into set form: blank lines dropped, duplicates
/// removed keeping the first occurrence. Lines are compared exactly as
/// stored.
pub fn normalize_members<I, S>(lines: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut members: Vec<String> = Vec::new();
  for line in lines {
    let id = line.as_ref();
    if !id.trim().is_empty() && !members.iter().any(|m| m == id) {
      members.push(id.to_owned());
    }
  }
  members
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a profile store backend.
///
/// Membership is matched by exact identifier equality. `follow` and
/// `unfollow` are idempotent, so following then unfollowing the same subject
/// leaves the stored set as it was.
pub trait MembershipStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create a new, empty profile. Fails if one of that name already exists.
  fn create_profile(&self, name: &str) -> Result<Profile, Self::Error>;

  /// Select an existing profile. Fails if no profile of that name exists.
  fn switch_profile(&self, name: &str) -> Result<Profile, Self::Error>;

  /// The followed subjects of `profile`, in the order they were followed.
  fn list(&self, profile: &Profile) -> Result<Vec<String>, Self::Error>;

  /// Add `subject_id` unless it is already present.
  fn follow(
    &self,
    profile: &Profile,
    subject_id: &str,
  ) -> Result<MembershipChange, Self::Error>;

  /// Remove `subject_id` if present.
  fn unfollow(
    &self,
    profile: &Profile,
    subject_id: &str,
  ) -> Result<MembershipChange, Self::Error>;

  fn is_following(
    &self,
    profile: &Profile,
    subject_id: &str,
  ) -> Result<bool, Self::Error> {
    Ok(self.list(profile)?.iter().any(|id| id == subject_id))
  }

  fn count(&self, profile: &Profile) -> Result<usize, Self::Error> {
    Ok(self.list(profile)?.len())
  }
}
