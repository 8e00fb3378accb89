//! The `SightingProvider` trait: the upstream data source.
//!
//! Transport to the real tracking service is somebody else's problem; the
//! core only needs these four calls. Implementations are assumed reliable and
//! are never retried here.

use std::future::Future;

use crate::{
  sighting::{Sighting, Window},
  subject::{Location, SubjectRecord},
};

/// Abstraction over the upstream sighting source.
///
/// All methods return `Send` futures so providers can be shared across a
/// multi-threaded runtime (e.g. behind `axum` handlers).
pub trait SightingProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every raw sighting reported within `window`, in provider order.
  fn list_sightings(
    &self,
    window: Window,
  ) -> impl Future<Output = Result<Vec<Sighting>, Self::Error>> + Send + '_;

  /// Full attribute record for one subject.
  fn get_subject<'a>(
    &'a self,
    subject_id: &'a str,
  ) -> impl Future<Output = Result<SubjectRecord, Self::Error>> + Send + 'a;

  /// Last reported position of one subject.
  fn get_last_location<'a>(
    &'a self,
    subject_id: &'a str,
  ) -> impl Future<Output = Result<Location, Self::Error>> + Send + 'a;

  /// Identifiers of every known subject.
  fn list_subject_ids(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
