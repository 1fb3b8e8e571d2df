//! Artifact renderers
//!
//! - `versions.yaml`: the forest as a reusable document
//! - `versions.html`: browsable report table
//! - `alive.json`: flat list of currently supported build codes
//!
//! All three are rendered in memory before anything is written, so a
//! failure leaves no partial output behind.

mod alive;
mod html;
mod yaml;

use std::path::{Path, PathBuf};

use tracing::info;

pub use alive::{alive_codes, alive_json};
pub use html::{html_page, html_rows};
pub use yaml::tree_document;

use crate::config::OutputPaths;
use crate::error::Result;
use crate::tree::VersionTree;

/// Rendered artifacts, not yet on disk
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub tree: String,
    pub html: String,
    pub alive: String,
}

impl Artifacts {
    pub fn render(forest: &[VersionTree]) -> Result<Self> {
        Ok(Self {
            tree: tree_document(forest)?,
            html: html_page(forest),
            alive: alive_json(forest)?,
        })
    }

    /// Write all three files below `out_dir`; returns the paths written.
    pub fn write(&self, out_dir: &Path, outputs: &OutputPaths) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(out_dir)?;
        let mut written = Vec::with_capacity(3);
        for (name, content) in [
            (&outputs.tree, &self.tree),
            (&outputs.html, &self.html),
            (&outputs.alive, &self.alive),
        ] {
            let path = out_dir.join(name);
            std::fs::write(&path, content)?;
            info!(path = %path.display(), bytes = content.len(), "wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}
