//! JSON API for sharktrack.
//!
//! Exposes an axum [`Router`] over any [`SightingProvider`], with profiles
//! and the featured-subject cache kept on disk by `sharktrack-store-fs`.
//! Presentation is the client's business; every response is JSON.

pub mod error;
pub mod extract;
pub mod handlers;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post, put},
};
use serde::Deserialize;
use sharktrack_core::{provider::SightingProvider, ranking::DEFAULT_ORIGIN};
use sharktrack_store_fs::{FileMembershipStore, FileRotationCache};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

use handlers::{featured, profiles, sightings, statistics, subjects};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `sharktrack.toml` and
/// `SHARKTRACK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// Root of the on-disk state: `profiles/` and `cache/` live under it.
  pub data_dir:        PathBuf,
  pub snapshot_path:   PathBuf,
  /// Created at startup if it does not exist yet.
  pub default_profile: String,
  /// Point that favourites are ranked by distance from.
  pub origin_lat:      f64,
  pub origin_lon:      f64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "127.0.0.1".to_string(),
      port:            5280,
      data_dir:        PathBuf::from("data"),
      snapshot_path:   PathBuf::from("data/snapshot.json"),
      default_profile: "default".to_string(),
      origin_lat:      DEFAULT_ORIGIN.lat,
      origin_lon:      DEFAULT_ORIGIN.lon,
    }
  }
}

impl ServerConfig {
  pub fn profiles_dir(&self) -> PathBuf { self.data_dir.join("profiles") }

  pub fn cache_dir(&self) -> PathBuf { self.data_dir.join("cache") }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<P> {
  pub provider: Arc<P>,
  pub profiles: Arc<FileMembershipStore>,
  pub featured: Arc<FileRotationCache>,
  pub config:   Arc<ServerConfig>,
}

// Manual impl: only the `Arc`s are cloned, so `P` need not be `Clone`.
impl<P> Clone for AppState<P> {
  fn clone(&self) -> Self {
    Self {
      provider: self.provider.clone(),
      profiles: self.profiles.clone(),
      featured: self.featured.clone(),
      config:   self.config.clone(),
    }
  }
}

impl<P: SightingProvider> AppState<P> {
  /// Open the profile and cache directories under `config.data_dir` and make
  /// sure the default profile exists.
  pub fn open(provider: P, config: ServerConfig) -> sharktrack_store_fs::Result<Self> {
    let profiles = FileMembershipStore::open(config.profiles_dir())?;
    profiles.ensure_profile(&config.default_profile)?;
    let featured = FileRotationCache::open(config.cache_dir())?;
    Ok(Self {
      provider: Arc::new(provider),
      profiles: Arc::new(profiles),
      featured: Arc::new(featured),
      config:   Arc::new(config),
    })
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the sharktrack API.
pub fn router<P>(state: AppState<P>) -> Router
where
  P: SightingProvider + 'static,
{
  Router::new()
    // Lookback queries
    .route("/sightings",                         get(sightings::handler::<P>))
    .route("/statistics",                        get(statistics::handler::<P>))
    .route("/subjects/{id}",                     get(subjects::get_one::<P>))
    .route("/featured",                          get(featured::handler::<P>))
    // Profiles
    .route("/profiles",                          post(profiles::create::<P>))
    .route("/profiles/{name}",                   get(profiles::get_one::<P>))
    .route(
      "/profiles/{name}/following/{id}",
      put(profiles::follow::<P>).delete(profiles::unfollow::<P>),
    )
    .route("/profiles/{name}/favourites",        get(profiles::favourites::<P>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
