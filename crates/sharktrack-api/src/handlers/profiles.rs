//! Handlers for `/profiles` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/profiles` | Body: `{"name":"alice"}`; 409 if it exists |
//! | `GET`  | `/profiles/{name}` | 404 if missing |
//! | `PUT`  | `/profiles/{name}/following/{id}` | follow, idempotent |
//! | `DELETE` | `/profiles/{name}/following/{id}` | unfollow, idempotent |
//! | `GET`  | `/profiles/{name}/favourites` | followed subjects, nearest first |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use sharktrack_core::{
  membership::{MembershipChange, MembershipStore},
  provider::SightingProvider,
  ranking::{RankedFavourite, rank},
  subject::Location,
};

use crate::{AppState, error::ApiError, extract::{AppJson, AppPath}};

// ─── Views ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProfileView {
  pub name:      String,
  pub following: Vec<String>,
}

/// Outcome of a follow or unfollow.
///
/// `became_non_empty` and `became_empty` are the switch-on and switch-off
/// signals for features that need at least one followed subject.
#[derive(Debug, Serialize)]
pub struct MembershipView {
  pub subject_id:       String,
  pub following:        bool,
  pub count:            usize,
  pub became_non_empty: bool,
  pub became_empty:     bool,
}

impl MembershipView {
  fn new(subject_id: String, following: bool, change: MembershipChange) -> Self {
    Self {
      subject_id,
      following,
      count: change.count,
      became_non_empty: change.became_non_empty(),
      became_empty: change.became_empty(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct FavouriteView {
  #[serde(flatten)]
  pub ranked:   RankedFavourite,
  /// Distance rounded up to two decimals, trailing zeros dropped.
  pub distance: String,
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
}

/// `POST /profiles`: body `{"name":"alice"}`
pub async fn create<P>(
  State(state): State<AppState<P>>,
  AppJson(body): AppJson<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  P: SightingProvider + 'static,
{
  let profile = state.profiles.create_profile(&body.name)?;
  let view = ProfileView {
    name:      profile.name().to_owned(),
    following: Vec::new(),
  };
  Ok((StatusCode::CREATED, Json(view)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /profiles/{name}`: select the profile and list what it follows.
pub async fn get_one<P>(
  State(state): State<AppState<P>>,
  AppPath(name): AppPath<String>,
) -> Result<Json<ProfileView>, ApiError>
where
  P: SightingProvider + 'static,
{
  let profile = state.profiles.switch_profile(&name)?;
  let following = state.profiles.list(&profile)?;
  Ok(Json(ProfileView { name, following }))
}

// ─── Follow / unfollow ────────────────────────────────────────────────────────

/// `PUT /profiles/{name}/following/{id}`
pub async fn follow<P>(
  State(state): State<AppState<P>>,
  AppPath((name, id)): AppPath<(String, String)>,
) -> Result<Json<MembershipView>, ApiError>
where
  P: SightingProvider + 'static,
{
  let profile = state.profiles.switch_profile(&name)?;
  let change = state.profiles.follow(&profile, &id)?;
  Ok(Json(MembershipView::new(id, true, change)))
}

/// `DELETE /profiles/{name}/following/{id}`
pub async fn unfollow<P>(
  State(state): State<AppState<P>>,
  AppPath((name, id)): AppPath<(String, String)>,
) -> Result<Json<MembershipView>, ApiError>
where
  P: SightingProvider + 'static,
{
  let profile = state.profiles.switch_profile(&name)?;
  let change = state.profiles.unfollow(&profile, &id)?;
  Ok(Json(MembershipView::new(id, false, change)))
}

// ─── Favourites ───────────────────────────────────────────────────────────────

/// `GET /profiles/{name}/favourites`
///
/// Followed subjects ranked by distance from the configured origin. Subjects
/// whose location cannot be resolved are left out.
pub async fn favourites<P>(
  State(state): State<AppState<P>>,
  AppPath(name): AppPath<String>,
) -> Result<Json<Vec<FavouriteView>>, ApiError>
where
  P: SightingProvider + 'static,
{
  let profile = state.profiles.switch_profile(&name)?;
  let origin = Location::new(state.config.origin_lat, state.config.origin_lon);
  let ranked = rank(
    state.provider.as_ref(),
    state.profiles.as_ref(),
    &profile,
    origin,
  )
  .await?;

  let views = ranked
    .into_iter()
    .map(|ranked| FavouriteView {
      distance: ranked.display_distance(),
      ranked,
    })
    .collect();
  Ok(Json(views))
}
