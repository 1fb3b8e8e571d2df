use crate::error::Result;
use crate::tree::VersionTree;

/// YAML list of trees, empty fields omitted
pub fn tree_document(forest: &[VersionTree]) -> Result<String> {
    Ok(serde_yaml::to_string(forest)?)
}
