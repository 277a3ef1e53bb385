// merge.rs - Merge configuration file values into the parsed invocation

use crate::cli::{FileConfig, Invocation, OptionRegistry};
use crate::cli::options::{OPT_NAME, OPT_OUTPUT, OPT_TASK};
use crate::errors::ConfigResult;

impl Invocation {
    /// Merge with configuration from file
    /// Command-line values take precedence over config file values
    pub fn merge_with_config(mut self, config: &FileConfig, registry: &OptionRegistry) -> Self {
        // Global options
        if let Some(output) = &config.output {
            self.set_if_absent(OPT_OUTPUT, output);
        }
        if let Some(task) = &config.task {
            self.set_if_absent(OPT_TASK, task);
        }
        if let Some(name) = &config.name {
            self.set_if_absent(OPT_NAME, name);
        }

        // Task-specific options, keyed by long name
        for (long, value) in &config.options {
            if registry.has_option(long) {
                self.set_if_absent(long, value);
            } else {
                println!("⚠️  Ignoring unknown config option: {}", long);
            }
        }

        self
    }

    /// Load a configuration file and merge it into this invocation
    pub fn with_config_file(self, path: &str, registry: &OptionRegistry) -> ConfigResult<Self> {
        let config = FileConfig::from_file(path)?;
        Ok(self.merge_with_config(&config, registry))
    }
}
