//! Error type for `sharktrack-store-fs`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] sharktrack_core::Error),

  #[error("i/o error on {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("profile already exists: {0}")]
  ProfileExists(String),

  #[error("profile not found: {0}")]
  ProfileNotFound(String),

  #[error("unknown subject: {0}")]
  UnknownSubject(String),

  #[error("no known location for subject: {0}")]
  NoLocation(String),
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
