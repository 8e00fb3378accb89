//! Error types for `sharktrack-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed timestamp {timestamp:?}: {source}")]
  MalformedTimestamp {
    timestamp: String,
    #[source]
    source:    chrono::ParseError,
  },

  #[error("malformed cache entry: {0:?}")]
  MalformedCacheEntry(String),

  #[error("candidate pool is empty")]
  EmptyPool,

  #[error("invalid profile name: {0:?}")]
  InvalidProfileName(String),

  #[error("invalid cache key: {0:?}")]
  InvalidCacheKey(String),

  #[error("invalid subject id: {0:?}")]
  InvalidSubjectId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
