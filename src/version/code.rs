use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScanError;

/// Dotted numeric version code, e.g. `15.2.1544.9`.
///
/// Never empty. Ordering is segment-wise numeric, so `15.2.10` sorts after
/// `15.2.9`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionCode(Vec<u32>);

impl VersionCode {
    pub fn new(segments: Vec<u32>) -> Result<Self, ScanError> {
        if segments.is_empty() {
            return Err(ScanError::InvalidCode(String::new()));
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[u32] {
        &self.0
    }
}

impl FromStr for VersionCode {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let segments = s
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ScanError::InvalidCode(s.to_string()))?;
        Self::new(segments).map_err(|_| ScanError::InvalidCode(s.to_string()))
    }
}

impl fmt::Display for VersionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for VersionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // YAML reads `14` as an integer, so accept either form
        let raw = serde_yaml::Value::deserialize(deserializer)?;
        let text = match raw {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected dotted version code, got {:?}",
                    other
                )))
            }
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}
