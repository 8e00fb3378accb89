//! Async HTTP client wrapping the sharktrack JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use sharktrack_core::{
  ranking::RankedFavourite,
  search::{AttributeTally, SearchHit},
  sighting::{Sighting, Window},
  subject::SubjectRecord,
};

// ─── Response shapes ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubjectView {
  pub subject:   SubjectRecord,
  pub last_seen: Option<Sighting>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedView {
  pub selected_at: String,
  pub subject:     SubjectRecord,
}

#[derive(Debug, Deserialize)]
pub struct ProfileView {
  pub name:      String,
  pub following: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MembershipView {
  pub subject_id:       String,
  pub following:        bool,
  pub count:            usize,
  pub became_non_empty: bool,
  pub became_empty:     bool,
}

#[derive(Debug, Deserialize)]
pub struct FavouriteView {
  #[serde(flatten)]
  pub ranked:   RankedFavourite,
  pub distance: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

/// Attribute constraints for `search`; `None` means any.
#[derive(Debug, Default, Clone)]
pub struct SearchQuery {
  pub window:       Window,
  pub gender:       Option<String>,
  pub life_stage:   Option<String>,
  pub tag_location: Option<String>,
}

impl SearchQuery {
  fn pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("window", self.window.to_string())];
    for (key, value) in [
      ("gender", &self.gender),
      ("life_stage", &self.life_stage),
      ("tag_location", &self.tag_location),
    ] {
      if let Some(v) = value {
        pairs.push((key, v.clone()));
      }
    }
    pairs
  }
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async HTTP client for the sharktrack JSON API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self {
      client,
      base_url: base_url.into(),
    })
  }

  fn url(&self, segments: &[&str]) -> Result<reqwest::Url> {
    let mut url = reqwest::Url::parse(&self.base_url)
      .with_context(|| format!("invalid server URL {:?}", self.base_url))?;
    url
      .path_segments_mut()
      .map_err(|_| anyhow!("server URL {:?} cannot take a path", self.base_url))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
    Ok(self.client.request(method, self.url(segments)?))
  }

  /// Send `req`, turning a non-success status into an error carrying the
  /// server's `{"error": ...}` message.
  async fn send<T: DeserializeOwned>(req: RequestBuilder, what: &str) -> Result<T> {
    let resp: Response = req
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;

    let status = resp.status();
    if !status.is_success() {
      let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
      };
      return Err(anyhow!("{what} → {status}: {message}"));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising {what} response"))
  }

  // ── Lookback queries ──────────────────────────────────────────────────────

  /// `GET /sightings`
  pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>> {
    let req = self.request(Method::GET, &["sightings"])?.query(&query.pairs());
    Self::send(req, "GET /sightings").await
  }

  /// `GET /statistics?window=<window>`
  pub async fn statistics(&self, window: Window) -> Result<AttributeTally> {
    let req = self
      .request(Method::GET, &["statistics"])?
      .query(&[("window", window.to_string())]);
    Self::send(req, "GET /statistics").await
  }

  /// `GET /subjects/<id>`
  pub async fn subject(&self, id: &str) -> Result<SubjectView> {
    let req = self.request(Method::GET, &["subjects", id])?;
    Self::send(req, "GET /subjects").await
  }

  /// `GET /featured`
  pub async fn featured(&self) -> Result<FeaturedView> {
    let req = self.request(Method::GET, &["featured"])?;
    Self::send(req, "GET /featured").await
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  /// `POST /profiles`
  pub async fn create_profile(&self, name: &str) -> Result<ProfileView> {
    let req = self
      .request(Method::POST, &["profiles"])?
      .json(&serde_json::json!({ "name": name }));
    Self::send(req, "POST /profiles").await
  }

  /// `GET /profiles/<name>`
  pub async fn profile(&self, name: &str) -> Result<ProfileView> {
    let req = self.request(Method::GET, &["profiles", name])?;
    Self::send(req, "GET /profiles").await
  }

  /// `PUT /profiles/<name>/following/<id>`
  pub async fn follow(&self, profile: &str, id: &str) -> Result<MembershipView> {
    let req = self.request(Method::PUT, &["profiles", profile, "following", id])?;
    Self::send(req, "PUT /profiles/following").await
  }

  /// `DELETE /profiles/<name>/following/<id>`
  pub async fn unfollow(&self, profile: &str, id: &str) -> Result<MembershipView> {
    let req = self.request(Method::DELETE, &["profiles", profile, "following", id])?;
    Self::send(req, "DELETE /profiles/following").await
  }

  /// `GET /profiles/<name>/favourites`
  pub async fn favourites(&self, profile: &str) -> Result<Vec<FavouriteView>> {
    let req = self.request(Method::GET, &["profiles", profile, "favourites"])?;
    Self::send(req, "GET /profiles/favourites").await
  }
}
