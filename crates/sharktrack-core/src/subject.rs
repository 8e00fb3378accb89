//! Subject attribute records and locations.

use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub lat: f64,
  pub lon: f64,
}

impl Location {
  pub const fn new(lat: f64, lon: f64) -> Self { Self { lat, lon } }
}

/// Everything the provider knows about a tagged subject.
///
/// Categorical attributes are optional because the provider reports them as
/// unknown for some subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
  pub subject_id:    String,
  #[serde(default)]
  pub gender:        Option<String>,
  #[serde(default)]
  pub life_stage:    Option<String>,
  #[serde(default)]
  pub tag_location:  Option<String>,
  #[serde(default)]
  pub species:       String,
  #[serde(default)]
  pub length:        String,
  #[serde(default)]
  pub weight:        String,
  #[serde(default)]
  pub description:   String,
  #[serde(default)]
  pub last_location: Option<Location>,
}
