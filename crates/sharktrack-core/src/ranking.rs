//! Proximity ranking of followed subjects.
//!
//! Each followed subject's last known location is looked up, its distance
//! from a fixed origin computed, and the list sorted nearest first. A
//! subject whose location cannot be resolved is left out of the ranking
//! rather than failing it.

use serde::{Deserialize, Serialize};

use crate::{
  geo::{format_miles, haversine_miles},
  membership::{MembershipStore, Profile},
  provider::SightingProvider,
  subject::Location,
};

/// King's College London, Strand campus.
pub const DEFAULT_ORIGIN: Location = Location::new(51.5115, -0.1160);

/// A followed subject together with how far it is from the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFavourite {
  pub subject_id:     String,
  pub last_location:  Location,
  pub distance_miles: f64,
}

impl RankedFavourite {
  /// Distance as shown to users; see [`format_miles`].
  pub fn display_distance(&self) -> String { format_miles(self.distance_miles) }
}

/// Rank the given subjects by distance from `origin`, nearest first.
///
/// Ties keep the order of `subject_ids`.
pub async fn rank_subjects<P>(
  provider: &P,
  subject_ids: &[String],
  origin: Location,
) -> Vec<RankedFavourite>
where
  P: SightingProvider,
{
  let mut ranked = Vec::with_capacity(subject_ids.len());
  for subject_id in subject_ids {
    match provider.get_last_location(subject_id).await {
      Ok(location) => ranked.push(RankedFavourite {
        subject_id:     subject_id.clone(),
        last_location:  location,
        distance_miles: haversine_miles(origin, location),
      }),
      Err(err) => {
        tracing::warn!(%subject_id, %err, "no location; left out of ranking");
      }
    }
  }
  ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
  ranked
}

/// Rank everything `profile` follows.
///
/// Storage errors propagate; per-subject location failures do not.
pub async fn rank<P, M>(
  provider: &P,
  store: &M,
  profile: &Profile,
  origin: Location,
) -> Result<Vec<RankedFavourite>, M::Error>
where
  P: SightingProvider,
  M: MembershipStore,
{
  let following = store.list(profile)?;
  Ok(rank_subjects(provider, &following, origin).await)
}
