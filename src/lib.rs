// lib.rs - archtrace library root

//! # archtrace - Pluggable traceability link recovery for software architecture artifacts
//!
//! This library provides a plugin-based command-line dispatcher for recovering
//! traceability links between architecture documentation, architecture models,
//! and source code. Each analysis task is a plugin that contributes its own
//! options to a shared command-line namespace and is selected by name at run time.
//!
//! ## Features
//!
//! - **Plugin system**: Built-in SAD-SAM, SAM-code, and SAD-code tasks plus custom handlers
//! - **Merged option namespace**: Plugins register options atomically with collision detection
//! - **Run one or all**: Select a single task by name or run every registered task in order
//! - **TOML configuration**: Config files fill in options absent from the command line
//! - **CSV trace links**: Durable per-task reports with command and timestamp provenance
//! - **Workspace hygiene**: Transient analysis artifacts are purged after every run
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use archtrace::prelude::*;
//!
//! // Register the built-in recovery tasks
//! let manager = PluginManager::with_plugins(vec![
//!     Box::new(SadSamPlugin),
//!     Box::new(SamCodePlugin),
//!     Box::new(SadCodePlugin),
//! ])?;
//!
//! // Dispatch one run from command-line style arguments
//! let report = manager.execute_plugins([
//!     "--task", "sad-sam",
//!     "--output", "results",
//!     "--name", "teastore",
//!     "--sas-documentation", "docs/architecture.txt",
//!     "--sas-model", "models/teastore.txt",
//! ]);
//! assert!(report.success());
//! # Ok::<(), archtrace::errors::ConfigError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod engine;
pub mod errors;
pub mod output;
pub mod plugins;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{FileConfig, Invocation, OptionDef, OptionRegistry};
    pub use crate::core::{PluginManager, RunReport, RunStatus};
    pub use crate::engine::{ModelFormat, RecoveryStats, TraceLink};
    pub use crate::errors::{ConfigError, EngineError, TaskError, TaskResult};
    pub use crate::plugins::{ensure_path, project_name_option, require_value, TaskPlugin};
    pub use crate::plugins::{SadCodePlugin, SadSamPlugin, SamCodePlugin};
}

// Re-export main types at the root level for convenience
pub use cli::{Invocation, OptionDef, OptionRegistry};
pub use core::{PluginManager, RunReport, RunStatus};
pub use plugins::TaskPlugin;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "archtrace v{} - Traceability link recovery for architecture artifacts",
        VERSION
    )
}
