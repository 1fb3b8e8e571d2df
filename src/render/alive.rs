use crate::error::Result;
use crate::tree::{collect_alive, VersionTree};

/// Dotted codes of every alive build, in forest order
pub fn alive_codes(forest: &[VersionTree]) -> Vec<String> {
    collect_alive(forest)
        .map(|record| record.code().to_string())
        .collect()
}

/// `alive_codes` as a compact JSON array
pub fn alive_json(forest: &[VersionTree]) -> Result<String> {
    Ok(serde_json::to_string(&alive_codes(forest))?)
}
