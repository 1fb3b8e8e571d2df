//! Document text -> built forest

use chrono::NaiveDate;
use tracing::info;

use crate::config::ScanConfig;
use crate::document::scan_document;
use crate::error::Result;
use crate::tree::{HierarchyBuilder, VersionTree};
use crate::version::VersionRecord;

/// Seed the configured families, insert `records` and build the forest.
///
/// Any duplicate version code aborts the whole build.
pub fn build_forest(
    records: impl IntoIterator<Item = VersionRecord>,
    config: &ScanConfig,
    today: NaiveDate,
) -> Result<Vec<VersionTree>> {
    let mut builder = HierarchyBuilder::with_families(&config.families);
    builder.insert_all(records)?;
    Ok(builder.build(&config.liveness, today))
}

/// Scan a build-numbers markdown document and build its forest.
pub fn forest_from_document(
    text: &str,
    config: &ScanConfig,
    today: NaiveDate,
) -> Result<Vec<VersionTree>> {
    let forest = build_forest(scan_document(text), config, today)?;
    info!(
        alive = crate::tree::collect_alive(&forest).count(),
        "classified builds"
    );
    Ok(forest)
}
