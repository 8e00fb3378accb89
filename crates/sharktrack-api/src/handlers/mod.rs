//! Route handlers, one module per resource.

pub mod featured;
pub mod profiles;
pub mod sightings;
pub mod statistics;
pub mod subjects;

/// Treat an empty or `Any` attribute value as no constraint, the way the
/// search form's default option reads.
pub(crate) fn constraint(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("any"))
}
