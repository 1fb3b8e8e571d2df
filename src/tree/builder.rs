//! HierarchyBuilder - reconstructs the version hierarchy from dotted codes
//!
//! The builder does not need to know the tree shape up front: every path
//! segment creates its node on first reference. Family names and records
//! are attached to the node at the end of their path.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::node::VersionTree;
use crate::config::{FamilySeed, LivenessPolicy};
use crate::error::{Result, ScanError};
use crate::version::VersionRecord;

/// Mutable insertion tree. Consumed by [`HierarchyBuilder::build`].
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    root: BuilderNode,
    record_count: usize,
}

#[derive(Debug, Default)]
struct BuilderNode {
    path: Vec<u32>,
    name: String,
    html_name: Option<String>,
    record: Option<VersionRecord>,
    children: BTreeMap<u32, BuilderNode>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-seeded with the given family names
    pub fn with_families(families: &[FamilySeed]) -> Self {
        let mut builder = Self::new();
        for family in families {
            builder.seed_name(family.code.segments(), family.name.clone());
        }
        builder
    }

    /// Name the node at `path`, creating it (and its ancestors) if needed.
    pub fn seed_name(&mut self, path: &[u32], name: impl Into<String>) {
        let node = self.root.descend(path);
        node.name = name.into();
        debug!(path = ?path, name = %node.name, "seeded family name");
    }

    /// Attach `record` to the node at its own code path.
    ///
    /// Fails if a record already sits at that path; the caller must treat
    /// this as fatal since the input is ambiguous.
    pub fn insert_record(&mut self, record: VersionRecord) -> Result<()> {
        let node = self.root.descend(record.code().segments());
        if let Some(existing) = &node.record {
            return Err(ScanError::DuplicateVersion {
                code: record.code().clone(),
                existing: existing.name().to_string(),
                incoming: record.name().to_string(),
            });
        }
        node.record = Some(record);
        self.record_count += 1;
        Ok(())
    }

    pub fn insert_all(&mut self, records: impl IntoIterator<Item = VersionRecord>) -> Result<()> {
        for record in records {
            self.insert_record(record)?;
        }
        Ok(())
    }

    /// Number of records inserted so far
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Freeze into the forest of top-level trees, then run fix-up and
    /// liveness on every tree.
    ///
    /// Top-level trees are the outermost nodes carrying a name or a
    /// record; unnamed wrappers above them are dropped.
    pub fn build(self, policy: &LivenessPolicy, today: NaiveDate) -> Vec<VersionTree> {
        let mut forest = Vec::new();
        self.root.into_top_trees(&mut forest);

        for tree in &mut forest {
            tree.fix_up();
            tree.compute_liveness(policy, today);
        }

        info!(
            records = self.record_count,
            trees = forest.len(),
            "built version forest"
        );
        forest
    }
}

impl BuilderNode {
    fn child(&mut self, key: u32) -> &mut BuilderNode {
        self.children.entry(key).or_insert_with(|| {
            let mut path = self.path.clone();
            path.push(key);
            BuilderNode {
                path,
                ..BuilderNode::default()
            }
        })
    }

    fn descend(&mut self, path: &[u32]) -> &mut BuilderNode {
        let mut node = self;
        for &key in path {
            node = node.child(key);
        }
        node
    }

    fn is_marked(&self) -> bool {
        !self.name.is_empty() || self.record.is_some()
    }

    fn into_top_trees(self, forest: &mut Vec<VersionTree>) {
        if self.is_marked() {
            forest.push(self.flatten());
            return;
        }
        for child in self.children.into_values().rev() {
            child.into_top_trees(forest);
        }
    }

    /// Children first, newest first; a wrapper with neither name nor
    /// record and a single child is replaced by that child.
    fn flatten(self) -> VersionTree {
        let mut children: Vec<VersionTree> = self
            .children
            .into_values()
            .rev()
            .map(BuilderNode::flatten)
            .collect();

        if self.name.is_empty() && self.record.is_none() && children.len() == 1 {
            if let Some(only) = children.pop() {
                return only;
            }
        }

        VersionTree::new(self.path, self.name, self.html_name, self.record, children)
    }
}
