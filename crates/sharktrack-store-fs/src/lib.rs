//! File-backed storage for sharktrack.
//!
//! Profiles are plain text files with one subject identifier per line;
//! rotation cache entries are single-line files. Every mutation replaces the
//! whole file through [`atomic::write_atomic`], so a concurrent reader sees
//! either the old content or the new, never a partial write. Two processes
//! writing the same file still race: the last rename wins.

mod atomic;
mod profiles;
mod rotation;
mod snapshot;

pub mod error;

pub use error::{Error, Result};
pub use profiles::FileMembershipStore;
pub use rotation::FileRotationCache;
pub use snapshot::{Snapshot, SnapshotProvider};
