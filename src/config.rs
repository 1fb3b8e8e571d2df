//! Scanner configuration
//!
//! Loads an optional YAML file; every key falls back to the built-in
//! defaults, so an empty file (or no file) gives the stock behaviour.
//!
//! ```yaml
//! source_url: https://raw.githubusercontent.com/...
//! families:
//!   - code: "15.2"      # quote codes, YAML would read 15.10 as a float
//!     name: Exchange Server 2019
//! liveness:
//!   max_age_days: 180
//!   max_family_lag_days: 31
//! outputs:
//!   tree: versions.yaml
//!   html: versions.html
//!   alive: alive.json
//! ```

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::Deserialize;
use tracing::info;

use crate::error::{Result, ScanError};
use crate::version::VersionCode;

/// Environment variable naming a config file when `--config` is not given
pub const CONFIG_ENV_VAR: &str = "EXCHANGE_VERSIONS_CONFIG";

pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/MicrosoftDocs/OfficeDocs-Exchange/public/Exchange/ExchangeServer/new-features/build-numbers-and-release-dates.md";

/// Well-known product families keyed by major(.minor) code
const DEFAULT_FAMILIES: &[(&[u32], &str)] = &[
    (&[15, 2], "Exchange Server 2019"),
    (&[15, 1], "Exchange Server 2016"),
    (&[15, 0], "Exchange Server 2013"),
    (&[14], "Exchange Server 2010"),
    (&[8], "Exchange Server 2007"),
    (&[6, 5], "Exchange Server 2003"),
    (&[6, 0], "Exchange 2000 Server"),
    (&[5, 5], "Exchange Server 5.5"),
    (&[5, 0], "Exchange Server 5.0"),
    (&[4, 0], "Exchange Server 4.0"),
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Raw markdown of the build-numbers document
    pub source_url: String,
    /// Family names seeded into the tree before any record is inserted
    pub families: Vec<FamilySeed>,
    pub liveness: LivenessPolicy,
    pub outputs: OutputPaths,
}

/// Static name for a major(.minor) code path
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FamilySeed {
    pub code: VersionCode,
    pub name: String,
}

/// Thresholds for the alive/dead classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LivenessPolicy {
    /// A subtree whose latest release is this old (or older) is dead
    pub max_age_days: i64,
    /// A build lagging its family's latest release by more than this is dead
    pub max_family_lag_days: i64,
}

/// Artifact file names, relative to the output directory
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    pub tree: PathBuf,
    pub html: PathBuf,
    pub alive: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            families: FamilySeed::defaults(),
            liveness: LivenessPolicy::default(),
            outputs: OutputPaths::default(),
        }
    }
}

impl Default for LivenessPolicy {
    fn default() -> Self {
        Self {
            max_age_days: 180,
            max_family_lag_days: 31,
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            tree: PathBuf::from("versions.yaml"),
            html: PathBuf::from("versions.html"),
            alive: PathBuf::from("alive.json"),
        }
    }
}

impl FamilySeed {
    pub fn new(code: VersionCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    /// The Exchange 4.0 .. 2019 family table
    pub fn defaults() -> Vec<FamilySeed> {
        DEFAULT_FAMILIES
            .iter()
            .filter_map(|(path, name)| {
                VersionCode::new(path.to_vec())
                    .ok()
                    .map(|code| FamilySeed::new(code, *name))
            })
            .collect()
    }
}

impl LivenessPolicy {
    pub fn max_age(&self) -> Duration {
        Duration::days(self.max_age_days)
    }

    pub fn max_family_lag(&self) -> Duration {
        Duration::days(self.max_family_lag_days)
    }
}

impl ScanConfig {
    /// Load from an explicit path, else from `EXCHANGE_VERSIONS_CONFIG`,
    /// else use the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match path.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading scanner configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // an empty document deserializes to unit, not an empty mapping
        let config: ScanConfig = if content.trim().is_empty() {
            ScanConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.liveness.max_age_days <= 0 {
            return Err(ScanError::Config(format!(
                "liveness.max_age_days must be positive, got {}",
                self.liveness.max_age_days
            )));
        }
        if self.liveness.max_family_lag_days < 0 {
            return Err(ScanError::Config(format!(
                "liveness.max_family_lag_days must not be negative, got {}",
                self.liveness.max_family_lag_days
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for family in &self.families {
            if !seen.insert(&family.code) {
                return Err(ScanError::Config(format!(
                    "family code {} listed more than once",
                    family.code
                )));
            }
        }
        Ok(())
    }
}
