//! Handler for `GET /featured`: the subject of the day.

use axum::{Json, extract::State};
use chrono::Local;
use serde::Serialize;
use sharktrack_core::{
  provider::SightingProvider,
  sighting::format_timestamp,
  subject::SubjectRecord,
};

use crate::{AppState, error::ApiError};

/// Cache key of the featured-subject entry.
pub const FEATURED_KEY: &str = "featured";

#[derive(Debug, Serialize)]
pub struct FeaturedView {
  /// When the subject was picked, in the sighting timestamp format.
  pub selected_at: String,
  pub subject:     SubjectRecord,
}

/// `GET /featured`
///
/// Serves the cached selection while it is under a day old; otherwise picks
/// a new subject uniformly from everything the provider knows about. The
/// candidate list is only fetched when a pick is needed. 503 if the provider
/// knows no subjects.
pub async fn handler<P>(
  State(state): State<AppState<P>>,
) -> Result<Json<FeaturedView>, ApiError>
where
  P: SightingProvider + 'static,
{
  let now = Local::now().naive_local();
  let entry = match state.featured.load(FEATURED_KEY)? {
    Some(entry) if !entry.is_stale(now) => entry,
    _ => {
      let pool = state
        .provider
        .list_subject_ids()
        .await
        .map_err(ApiError::provider)?;
      // Re-checked under the cache lock, so a concurrent pick wins.
      state
        .featured
        .current(FEATURED_KEY, &pool, now, &mut rand::thread_rng())?
    }
  };

  let subject = state
    .provider
    .get_subject(&entry.selected_id)
    .await
    .map_err(ApiError::provider)?;
  Ok(Json(FeaturedView {
    selected_at: format_timestamp(entry.selected_at),
    subject,
  }))
}
