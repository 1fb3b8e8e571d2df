//! Version tree
//!
//! Records are inserted by their dotted code into a mutable
//! [`HierarchyBuilder`], which is then consumed into an immutable forest of
//! [`VersionTree`] nodes:
//!
//! ```text
//! seed family names ─┐
//!                    ├─► HierarchyBuilder ──build──► flatten (elide wrappers)
//! insert records ────┘                                  │
//!                                                       ▼
//!                                         fix-up (names, latest release)
//!                                                       │
//!                                                       ▼
//!                                         liveness (alive / dead)
//! ```
//!
//! Children are always ordered newest first (descending path segment).

mod builder;
mod node;
mod walk;

pub use builder::HierarchyBuilder;
pub use node::VersionTree;
pub use walk::{collect_alive, AliveRecords, Walk};
