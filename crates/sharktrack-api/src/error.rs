//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// Nothing to choose from, e.g. the provider knows no subjects yet.
  #[error("unavailable: {0}")]
  Unavailable(String),

  #[error("provider error: {0}")]
  Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("storage error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a failure of the upstream sighting provider.
  pub fn provider<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    tracing::warn!(%err, "provider call failed");
    Self::Provider(Box::new(err))
  }
}

impl From<sharktrack_core::Error> for ApiError {
  fn from(err: sharktrack_core::Error) -> Self {
    use sharktrack_core::Error as Core;
    match err {
      Core::InvalidProfileName(_) | Core::InvalidSubjectId(_) => {
        Self::BadRequest(err.to_string())
      }
      Core::EmptyPool => Self::Unavailable(err.to_string()),
      other => Self::Store(Box::new(other)),
    }
  }
}

impl From<sharktrack_store_fs::Error> for ApiError {
  fn from(err: sharktrack_store_fs::Error) -> Self {
    use sharktrack_store_fs::Error as Fs;
    match err {
      Fs::Core(core) => core.into(),
      Fs::ProfileExists(_) => Self::Conflict(err.to_string()),
      Fs::ProfileNotFound(_) | Fs::UnknownSubject(_) | Fs::NoLocation(_) => {
        Self::NotFound(err.to_string())
      }
      other => Self::Store(Box::new(other)),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
      ApiError::Store(e) => {
        tracing::error!(err = %e, "storage failure");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
