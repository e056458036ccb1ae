//! Optional TOML configuration.
//!
//! ```toml
//! fixture_path = "tests/fixtures/test_vectors.json"
//! log_level = "tsig=debug"
//!
//! [params]
//! p = "0x3fb"
//! g = "2"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tsig_crypto::GroupParams;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TSIG_CONFIG";

const DEFAULT_FIXTURE_PATH: &str = "tests/fixtures/test_vectors.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestvecConfig {
    /// Where vectors are written and read back from.
    #[serde(default = "default_fixture_path")]
    pub fixture_path: PathBuf,
    /// `tracing` filter directive.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Extra parameter set to emit a round-trip vector for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<GroupParams>,
}

impl Default for TestvecConfig {
    fn default() -> Self {
        Self {
            fixture_path: default_fixture_path(),
            log_level: default_log_level(),
            params: None,
        }
    }
}

impl TestvecConfig {
    /// Load from `$TSIG_CONFIG`, or defaults when unset.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Load from a file. A missing file yields defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

fn default_fixture_path() -> PathBuf {
    PathBuf::from(DEFAULT_FIXTURE_PATH)
}

fn default_log_level() -> String {
    "tsig=info".to_string()
}
