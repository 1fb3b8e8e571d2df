//! Build-numbers document scanner
//!
//! Reads the markdown tables of the release-notes page:
//!
//! ```text
//! |Product name|Release date|Build number<br/>(short format)|Build number<br/>(long format)|
//! |---|---|---|---|
//! |[Exchange Server 2019 CU14 Mar24SU](https://...)|March 12, 2024|15.2.1544.9|15.02.1544.009|
//! ```
//!
//! Rows that cannot be turned into a [`VersionRecord`] are logged and
//! skipped; the tree only ever sees well-formed records.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::version::{ReleaseDate, VersionCode, VersionRecord};

/// `[text](href)`, non-greedy so several links per cell work
static MD_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());

const SKIPPED_ROW_PREFIXES: &[&str] = &["|Product name|", "|---|", "||"];

/// Parse every table row of the document, in document order.
pub fn scan_document(text: &str) -> Vec<VersionRecord> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in text.lines().enumerate() {
        if !is_data_row(line) {
            continue;
        }
        match parse_row(line) {
            Some(record) => records.push(record),
            None => {
                warn!(line = index + 1, row = %line, "skipping malformed release row");
                skipped += 1;
            }
        }
    }

    info!(records = records.len(), skipped, "scanned release notes");
    records
}

fn is_data_row(line: &str) -> bool {
    line.starts_with('|')
        && line != "|"
        && !SKIPPED_ROW_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
}

/// `|name|date|short code|...|` -> record
pub fn parse_row(line: &str) -> Option<VersionRecord> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    let cols: Vec<&str> = inner.split('|').collect();
    if cols.len() < 3 {
        return None;
    }

    let code: VersionCode = cols[2].parse().ok()?;
    let (name, html_name) = split_markdown_links(strip_leading_nbsp(cols[0].trim()));
    let date = ReleaseDate::parse(cols[1]);

    let record = VersionRecord::new(name, code, date);
    Some(match html_name {
        Some(html) => record.with_html_name(html),
        None => record,
    })
}

fn strip_leading_nbsp(mut name: &str) -> &str {
    while let Some(rest) = name.strip_prefix("&nbsp;") {
        name = rest.trim_start();
    }
    name
}

/// Split `[text](href)` links into a plain name and, if any link was
/// present, an HTML rendering.
pub fn split_markdown_links(md: &str) -> (String, Option<String>) {
    if !MD_LINK_RE.is_match(md) {
        return (md.to_string(), None);
    }
    let plain = MD_LINK_RE.replace_all(md, "$1").into_owned();
    let html = MD_LINK_RE
        .replace_all(md, r#"<a href="$2">$1</a>"#)
        .into_owned();
    (plain, Some(html))
}
