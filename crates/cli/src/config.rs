use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// On-disk configuration (`sigwatch.toml`).
///
/// ```toml
/// symbols = ["AAPL", "MSFT", "NVDA"]   # first entry is the anchor
/// data_dir = "data"                     # directory of {SYMBOL}.csv files
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub symbols: Vec<String>,
    pub data_dir: Option<PathBuf>,
}

impl WatchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
