//! Core types and trait definitions for sharktrack.
//!
//! This crate is deliberately free of file and HTTP I/O. Sightings and
//! subject attributes come from a [`provider::SightingProvider`]; followed
//! subjects live behind a [`membership::MembershipStore`]. Everything else
//! here is pure logic over those two seams.

pub mod error;
pub mod geo;
pub mod lookback;
pub mod membership;
pub mod provider;
pub mod ranking;
pub mod rotation;
pub mod search;
pub mod sighting;
pub mod subject;

pub use error::{Error, Result};

#[cfg(test)]
pub(crate) mod testing;
