//! Attribute search and statistics over a window's unique sightings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
  lookback::unique_in_window,
  provider::SightingProvider,
  sighting::Window,
  subject::SubjectRecord,
};

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Attribute constraints for a search. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
  pub gender:       Option<String>,
  pub life_stage:   Option<String>,
  pub tag_location: Option<String>,
}

impl AttributeFilter {
  /// Every constrained attribute must equal the subject's exactly. A subject
  /// whose attribute is unknown never matches a constraint on it.
  pub fn matches(&self, subject: &SubjectRecord) -> bool {
    fn field(wanted: &Option<String>, actual: &Option<String>) -> bool {
      match wanted {
        None => true,
        Some(w) => actual.as_deref() == Some(w.as_str()),
      }
    }
    field(&self.gender, &subject.gender)
      && field(&self.life_stage, &subject.life_stage)
      && field(&self.tag_location, &subject.tag_location)
  }
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// A matching subject and the timestamp of its latest sighting in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
  pub subject:   SubjectRecord,
  pub last_seen: String,
}

/// Subjects seen within `window` whose attributes satisfy `filter`, most
/// recently seen first. An empty result is a normal outcome.
pub async fn search<P>(
  provider: &P,
  window: Window,
  filter: &AttributeFilter,
) -> Result<Vec<SearchHit>, P::Error>
where
  P: SightingProvider,
{
  let mut hits = Vec::new();
  for sighting in unique_in_window(provider, window).await? {
    let subject = provider.get_subject(&sighting.subject_id).await?;
    if filter.matches(&subject) {
      hits.push(SearchHit {
        subject,
        last_seen: sighting.timestamp,
      });
    }
  }
  Ok(hits)
}

// ─── Statistics ──────────────────────────────────────────────────────────────

/// Occurrence counts per attribute value among the subjects of a window.
/// Unknown values are not counted; an empty map means there was nothing to
/// count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTally {
  pub genders:       BTreeMap<String, usize>,
  pub life_stages:   BTreeMap<String, usize>,
  pub tag_locations: BTreeMap<String, usize>,
}

impl AttributeTally {
  pub fn record(&mut self, subject: &SubjectRecord) {
    fn bump(counts: &mut BTreeMap<String, usize>, value: &Option<String>) {
      if let Some(v) = value {
        *counts.entry(v.clone()).or_default() += 1;
      }
    }
    bump(&mut self.genders, &subject.gender);
    bump(&mut self.life_stages, &subject.life_stage);
    bump(&mut self.tag_locations, &subject.tag_location);
  }

  /// Nothing was counted: not enough data for statistics.
  pub fn is_empty(&self) -> bool {
    self.genders.is_empty() && self.life_stages.is_empty() && self.tag_locations.is_empty()
  }
}

/// Tally attributes over the unique subjects seen in `window`.
pub async fn tally<P>(provider: &P, window: Window) -> Result<AttributeTally, P::Error>
where
  P: SightingProvider,
{
  let mut tally = AttributeTally::default();
  for sighting in unique_in_window(provider, window).await? {
    tally.record(&provider.get_subject(&sighting.subject_id).await?);
  }
  Ok(tally)
}
