//! VersionTree - immutable version hierarchy with derived state
//!
//! Each node may carry a family name, a record, or both. After
//! [`VersionTree::fix_up`] every node knows the latest release in its
//! subtree; after [`VersionTree::compute_liveness`] every node knows whether
//! it is still current.
//!
//! Nodes hold no parent reference. Whatever a node needs from its ancestors
//! is passed down as an argument of the traversal.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::walk::Walk;
use crate::config::LivenessPolicy;
use crate::version::VersionRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTree {
    path: Vec<u32>,
    name: String,
    html_name: Option<String>,
    record: Option<VersionRecord>,
    /// Newest first
    children: Vec<VersionTree>,

    // =========================================================================
    // DERIVED FIELDS - set by fix_up / compute_liveness
    // =========================================================================
    /// Latest release anywhere in this subtree. `None` unless every
    /// contributing date is known to the day.
    latest_release: Option<NaiveDate>,

    /// `None` until liveness has been computed
    alive: Option<bool>,
}

impl VersionTree {
    pub(crate) fn new(
        path: Vec<u32>,
        name: String,
        html_name: Option<String>,
        record: Option<VersionRecord>,
        children: Vec<VersionTree>,
    ) -> Self {
        Self {
            path,
            name,
            html_name,
            record,
            children,
            latest_release: None,
            alive: None,
        }
    }

    pub fn path(&self) -> &[u32] {
        &self.path
    }

    /// Family name, or the name inherited by fix-up. May be empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn html_name(&self) -> Option<&str> {
        self.html_name.as_deref()
    }

    pub fn record(&self) -> Option<&VersionRecord> {
        self.record.as_ref()
    }

    pub fn children(&self) -> &[VersionTree] {
        &self.children
    }

    pub fn latest_release(&self) -> Option<NaiveDate> {
        self.latest_release
    }

    pub fn latest_release_string(&self) -> Option<String> {
        self.latest_release
            .map(|date| date.format("%Y-%m-%d").to_string())
    }

    /// `None` if liveness has not been computed yet
    pub fn alive(&self) -> Option<bool> {
        self.alive
    }

    pub fn is_alive(&self) -> bool {
        self.alive.unwrap_or(false)
    }

    /// `15.2.*` for the subtree at path `15.2`, `*` at the root
    pub fn wildcard_code(&self) -> String {
        if self.path.is_empty() {
            return "*".to_string();
        }
        let mut code = self
            .path
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".");
        code.push_str(".*");
        code
    }

    /// A record with nothing below it
    pub fn is_flat_version(&self) -> bool {
        self.record.is_some() && self.children.is_empty()
    }

    /// Depth-first, pre-order walk of this subtree with nesting depth
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(std::slice::from_ref(self))
    }

    // =========================================================================
    // FIX-UP
    // =========================================================================

    /// Post-order pass deriving `name` and `latest_release` from children.
    ///
    /// - An unnamed node without a record takes the name of its newest
    ///   child's record, but only if every child is a flat version.
    /// - `latest_release` is the max over the node's own record date and
    ///   each child's `latest_release`. A single contributor without an
    ///   exact date makes the whole aggregate unknown.
    ///
    /// Safe to run more than once.
    pub fn fix_up(&mut self) {
        let mut children_flat = true;
        let mut dates_exact = true;
        let mut latest: Option<NaiveDate> = None;

        if let Some(record) = &self.record {
            match record.date() {
                Some(date) => latest = Some(date),
                None => dates_exact = false,
            }
        }

        for child in &mut self.children {
            child.fix_up();
            match child.latest_release {
                Some(date) => latest = latest.max(Some(date)),
                None => dates_exact = false,
            }
            children_flat &= child.is_flat_version();
        }

        // Newest child, not the oldest: a CU14 group is labelled after its
        // latest SU rather than the CU14 base release.
        if children_flat && self.name.is_empty() && self.record.is_none() {
            if let Some(newest) = self.children.first().and_then(|c| c.record.as_ref()) {
                self.name = newest.name().to_string();
                self.html_name = newest.html_name().map(str::to_string);
            }
        }

        self.latest_release = if dates_exact { latest } else { None };
    }

    // =========================================================================
    // LIVENESS
    // =========================================================================

    /// Top-down alive/dead classification of this subtree, treating this
    /// node as a root (alive parent, no parent release date).
    pub fn compute_liveness(&mut self, policy: &LivenessPolicy, today: NaiveDate) {
        self.mark_alive(true, None, policy, today);
    }

    fn mark_alive(
        &mut self,
        parent_alive: bool,
        parent_latest_release: Option<NaiveDate>,
        policy: &LivenessPolicy,
        today: NaiveDate,
    ) {
        let mut alive = parent_alive
            && self
                .latest_release
                .is_some_and(|latest| today - latest < policy.max_age());

        // a build lagging well behind the rest of its family is superseded
        if alive && self.record.is_some() {
            if let (Some(parent), Some(latest)) = (parent_latest_release, self.latest_release) {
                if parent - latest > policy.max_family_lag() {
                    alive = false;
                }
            }
        }

        self.alive = Some(alive);

        let latest = self.latest_release;
        for child in &mut self.children {
            child.mark_alive(alive, latest, policy, today);
        }
    }
}

impl Serialize for VersionTree {
    /// Only non-empty fields; `path` is implied by the records.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if !self.name.is_empty() {
            map.serialize_entry("name", &self.name)?;
        }
        if let Some(html_name) = self.html_name.as_deref().filter(|h| !h.is_empty()) {
            map.serialize_entry("html_name", html_name)?;
        }
        if let Some(record) = &self.record {
            map.serialize_entry("version", record)?;
        }
        if !self.children.is_empty() {
            map.serialize_entry("children", &self.children)?;
        }
        if let Some(latest) = &self.latest_release {
            map.serialize_entry("latest_release", latest)?;
        }
        if self.is_alive() {
            map.serialize_entry("alive", &true)?;
        }
        map.end()
    }
}
