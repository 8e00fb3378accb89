//! Handler for `GET /subjects/{id}`.

use axum::{
  Json,
  extract::State,
};
use serde::Serialize;
use sharktrack_core::{
  lookback::resolve_latest,
  provider::SightingProvider,
  sighting::{TimedSighting, Window},
  subject::SubjectRecord,
};

use crate::{AppState, error::ApiError, extract::AppPath};

/// A subject's record and its latest sighting across the window cascade.
#[derive(Debug, Serialize)]
pub struct SubjectView {
  pub subject:   SubjectRecord,
  /// `null` when the subject has not been seen within the widest window.
  pub last_seen: Option<TimedSighting>,
}

/// `GET /subjects/{id}`: 404 if the provider does not know the subject.
pub async fn get_one<P>(
  State(state): State<AppState<P>>,
  AppPath(id): AppPath<String>,
) -> Result<Json<SubjectView>, ApiError>
where
  P: SightingProvider + 'static,
{
  let provider = state.provider.as_ref();
  let known = provider
    .list_subject_ids()
    .await
    .map_err(ApiError::provider)?;
  if !known.contains(&id) {
    return Err(ApiError::NotFound(format!("subject {id} not found")));
  }

  let subject = provider.get_subject(&id).await.map_err(ApiError::provider)?;
  let last_seen = resolve_latest(provider, &id, &Window::CASCADE)
    .await
    .map_err(ApiError::provider)?;
  Ok(Json(SubjectView { subject, last_seen }))
}
