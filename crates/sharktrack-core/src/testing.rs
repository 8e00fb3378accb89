//! In-memory collaborators for unit tests.

use std::{collections::HashMap, sync::Mutex};

use thiserror::Error;

use crate::{
  membership::{MembershipChange, MembershipStore, Profile, normalize_members},
  provider::SightingProvider,
  sighting::{Sighting, Window},
  subject::{Location, SubjectRecord},
};

#[derive(Debug, Error)]
pub enum FakeError {
  #[error("provider offline")]
  Offline,
  #[error("unknown subject {0}")]
  Unknown(String),
  #[error("no such profile {0}")]
  NoProfile(String),
  #[error(transparent)]
  Core(#[from] crate::Error),
}

#[derive(Debug, Default)]
pub struct FakeProvider {
  pub sightings: HashMap<Window, Vec<Sighting>>,
  pub subjects:  HashMap<String, SubjectRecord>,
  pub locations: HashMap<String, Location>,
  pub offline:   bool,
}

impl FakeProvider {
  pub fn offline() -> Self {
    Self {
      offline: true,
      ..Self::default()
    }
  }

  pub fn with_sightings(mut self, window: Window, pairs: &[(&str, &str)]) -> Self {
    self.sightings.insert(
      window,
      pairs.iter().map(|(id, ts)| Sighting::new(*id, *ts)).collect(),
    );
    self
  }

  pub fn with_subject(mut self, record: SubjectRecord) -> Self {
    self.subjects.insert(record.subject_id.clone(), record);
    self
  }

  pub fn with_location(mut self, subject_id: &str, location: Location) -> Self {
    self.locations.insert(subject_id.to_owned(), location);
    self
  }
}

pub fn subject(
  id: &str,
  gender: Option<&str>,
  life_stage: Option<&str>,
  tag_location: Option<&str>,
) -> SubjectRecord {
  SubjectRecord {
    subject_id:    id.to_owned(),
    gender:        gender.map(str::to_owned),
    life_stage:    life_stage.map(str::to_owned),
    tag_location:  tag_location.map(str::to_owned),
    species:       "Great White Shark (Carcharodon carcharias)".to_owned(),
    length:        "3.5 m".to_owned(),
    weight:        "500 kg".to_owned(),
    description:   String::new(),
    last_location: None,
  }
}

impl SightingProvider for FakeProvider {
  type Error = FakeError;

  async fn list_sightings(&self, window: Window) -> Result<Vec<Sighting>, FakeError> {
    if self.offline {
      return Err(FakeError::Offline);
    }
    Ok(self.sightings.get(&window).cloned().unwrap_or_default())
  }

  async fn get_subject<'a>(&'a self, subject_id: &'a str) -> Result<SubjectRecord, FakeError> {
    if self.offline {
      return Err(FakeError::Offline);
    }
    self
      .subjects
      .get(subject_id)
      .cloned()
      .ok_or_else(|| FakeError::Unknown(subject_id.to_owned()))
  }

  async fn get_last_location<'a>(&'a self, subject_id: &'a str) -> Result<Location, FakeError> {
    if self.offline {
      return Err(FakeError::Offline);
    }
    self
      .locations
      .get(subject_id)
      .copied()
      .ok_or_else(|| FakeError::Unknown(subject_id.to_owned()))
  }

  async fn list_subject_ids(&self) -> Result<Vec<String>, FakeError> {
    if self.offline {
      return Err(FakeError::Offline);
    }
    let mut ids: Vec<String> = self.subjects.keys().cloned().collect();
    ids.sort();
    Ok(ids)
  }
}

/// Profiles held in memory.
#[derive(Debug, Default)]
pub struct FakeMembership {
  profiles: Mutex<HashMap<String, Vec<String>>>,
}

impl FakeMembership {
  pub fn with_profile(name: &str, members: &[&str]) -> Self {
    let store = Self::default();
    store
      .profiles
      .lock()
      .unwrap()
      .insert(name.to_owned(), normalize_members(members));
    store
  }
}

impl MembershipStore for FakeMembership {
  type Error = FakeError;

  fn create_profile(&self, name: &str) -> Result<Profile, FakeError> {
    let profile = Profile::new(name)?;
    self
      .profiles
      .lock()
      .unwrap()
      .entry(name.to_owned())
      .or_default();
    Ok(profile)
  }

  fn switch_profile(&self, name: &str) -> Result<Profile, FakeError> {
    if self.profiles.lock().unwrap().contains_key(name) {
      Ok(Profile::new(name)?)
    } else {
      Err(FakeError::NoProfile(name.to_owned()))
    }
  }

  fn list(&self, profile: &Profile) -> Result<Vec<String>, FakeError> {
    self
      .profiles
      .lock()
      .unwrap()
      .get(profile.name())
      .cloned()
      .ok_or_else(|| FakeError::NoProfile(profile.name().to_owned()))
  }

  fn follow(&self, profile: &Profile, subject_id: &str) -> Result<MembershipChange, FakeError> {
    let mut profiles = self.profiles.lock().unwrap();
    let members = profiles
      .get_mut(profile.name())
      .ok_or_else(|| FakeError::NoProfile(profile.name().to_owned()))?;
    let previous = members.len();
    if !members.iter().any(|m| m == subject_id) {
      members.push(subject_id.to_owned());
    }
    Ok(MembershipChange { previous, count: members.len() })
  }

  fn unfollow(&self, profile: &Profile, subject_id: &str) -> Result<MembershipChange, FakeError> {
    let mut profiles = self.profiles.lock().unwrap();
    let members = profiles
      .get_mut(profile.name())
      .ok_or_else(|| FakeError::NoProfile(profile.name().to_owned()))?;
    let previous = members.len();
    members.retain(|m| m != subject_id);
    Ok(MembershipChange { previous, count: members.len() })
  }
}
