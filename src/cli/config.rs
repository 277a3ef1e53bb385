// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::{ConfigError, ConfigResult};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileConfig {
    // Global options
    pub output: Option<String>,
    pub task: Option<String>,
    pub name: Option<String>,

    // Task-specific options keyed by their long option name
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl FileConfig {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            output: None,
            task: None,
            name: None,
            options: BTreeMap::new(),
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# archtrace.toml - Configuration file for archtrace
# Command line arguments will override these settings

# =============================================================================
# GLOBAL OPTIONS
# =============================================================================

# Directory where analysis results are written (created if missing)
output = "results"

# Task to perform: sad-sam, sam-code, sad-code, ALL
task = "sad-sam"

# Name of the project that should be analyzed
name = "teastore"

# =============================================================================
# TASK OPTIONS
# =============================================================================
# Values for task-specific options, keyed by their long option name.
# Only options of the selected task are consulted.

[options]
# Path to the documentation (SAD)
sas-documentation = "/path/to/documentation.txt"

# Path to the model (SAM)
sas-model = "/path/to/model.txt"

# Path to the code (file or directory)
# smc-model = "/path/to/model.txt"
# smc-code = "/path/to/src"
"#
        .to_string()
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}
