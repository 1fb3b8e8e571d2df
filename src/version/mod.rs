//! Parsed release-notes rows
//!
//! A [`VersionRecord`] is one row of the build-numbers table: a display
//! name, a dotted [`VersionCode`] and a [`ReleaseDate`] that may only be
//! known to month precision (or not at all).

mod code;
mod date;
mod record;

pub use code::VersionCode;
pub use date::ReleaseDate;
pub use record::VersionRecord;
