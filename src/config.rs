use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CodetrailError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Trace generation settings
    #[serde(default)]
    pub trace: TraceConfig,

    /// Repository access settings
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Number of lines scanned below a definition for outgoing calls
    pub scope_window: usize,

    /// Number of lines kept as a content excerpt on resolved targets
    pub preview_lines: usize,

    /// Hard stop for trace depth
    pub max_depth: usize,

    /// Steps generated per continue/branch/dive call
    pub batch_size: usize,

    /// Maximum candidate targets returned per location
    pub max_targets: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Maximum file size to read (in bytes)
    pub max_file_bytes: usize,

    /// Result cap for repository-wide text search
    pub max_search_results: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            scope_window: 80,
            preview_lines: 6,
            max_depth: 10,
            batch_size: 5,
            max_targets: 5,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 200_000,
            max_search_results: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace: TraceConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults for
    /// missing sections.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| CodetrailError::Config(e.to_string()))
    }
}
