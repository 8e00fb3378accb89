//! Handler for `GET /sightings`.
//!
//! | Param | Notes |
//! |-------|-------|
//! | `window` | `day` (default), `week` or `month` |
//! | `gender`, `life_stage`, `tag_location` | exact match; omitted or `Any` means unconstrained |

use axum::{
  Json,
  extract::State,
};
use serde::Deserialize;
use sharktrack_core::{
  provider::SightingProvider,
  search::{AttributeFilter, SearchHit, search},
  sighting::Window,
};

use super::constraint;
use crate::{AppState, error::ApiError, extract::AppQuery};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
  pub window:       Option<Window>,
  pub gender:       Option<String>,
  pub life_stage:   Option<String>,
  pub tag_location: Option<String>,
}

impl SearchParams {
  fn filter(self) -> AttributeFilter {
    AttributeFilter {
      gender:       constraint(self.gender),
      life_stage:   constraint(self.life_stage),
      tag_location: constraint(self.tag_location),
    }
  }
}

/// `GET /sightings[?window=...][&gender=...][&life_stage=...][&tag_location=...]`
///
/// Responds with the matching subjects, most recently seen first. An empty
/// array is a successful "no results".
pub async fn handler<P>(
  State(state): State<AppState<P>>,
  AppQuery(params): AppQuery<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, ApiError>
where
  P: SightingProvider + 'static,
{
  let window = params.window.unwrap_or_default();
  let filter = params.filter();
  let hits = search(state.provider.as_ref(), window, &filter)
    .await
    .map_err(ApiError::provider)?;
  tracing::debug!(%window, ?filter, hits = hits.len(), "search");
  Ok(Json(hits))
}
