//! Exchange Server version tree
//!
//! Turns the published Exchange build-numbers release notes into a
//! hierarchical version tree and works out which builds are still
//! current.
//!
//! Pipeline:
//! ```text
//! markdown ──scan──► VersionRecord* ──HierarchyBuilder──► VersionTree forest
//!                                                          │  fix-up
//!                                                          │  liveness
//!                                                          ▼
//!                                   versions.yaml / versions.html / alive.json
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod render;
pub mod tree;
pub mod version;

pub use config::{FamilySeed, LivenessPolicy, OutputPaths, ScanConfig};
pub use document::scan_document;
pub use error::{Result, ScanError};
pub use pipeline::{build_forest, forest_from_document};
pub use render::Artifacts;
pub use tree::{collect_alive, AliveRecords, HierarchyBuilder, VersionTree, Walk};
pub use version::{ReleaseDate, VersionCode, VersionRecord};
