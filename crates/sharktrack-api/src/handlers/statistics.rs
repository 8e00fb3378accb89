//! Handler for `GET /statistics`.

use axum::{
  Json,
  extract::State,
};
use serde::Deserialize;
use sharktrack_core::{
  provider::SightingProvider,
  search::{AttributeTally, tally},
  sighting::Window,
};

use crate::{AppState, error::ApiError, extract::AppQuery};

#[derive(Debug, Default, Deserialize)]
pub struct StatisticsParams {
  pub window: Option<Window>,
}

/// `GET /statistics[?window=...]`
///
/// Per-attribute counts over the subjects seen in the window. Empty maps mean
/// there was not enough data.
pub async fn handler<P>(
  State(state): State<AppState<P>>,
  AppQuery(params): AppQuery<StatisticsParams>,
) -> Result<Json<AttributeTally>, ApiError>
where
  P: SightingProvider + 'static,
{
  let window = params.window.unwrap_or_default();
  let counts = tally(state.provider.as_ref(), window)
    .await
    .map_err(ApiError::provider)?;
  Ok(Json(counts))
}
