// traits.rs - Core trait and helpers for the task plugin system

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::cli::{Invocation, OptionDef};
use crate::cli::options::OPT_NAME;
use crate::errors::{TaskError, TaskResult};

/// Trait for selectable analysis tasks - each plugin contributes its own
/// command-line options and is dispatched by task name
pub trait TaskPlugin: Send + Sync + Debug {
    /// Stable task identifier, matched case-insensitively against --task
    fn task_name(&self) -> &'static str;

    /// Namespace prefix applied to this plugin's own option names
    fn prefix(&self) -> &'static str;

    /// Options this plugin needs on the command line. Always includes the
    /// shared project-name option.
    fn required_options(&self) -> Vec<OptionDef>;

    /// Flag -> description pairs for this plugin's help section
    fn prefix_descriptions(&self) -> BTreeMap<String, String> {
        self.required_options()
            .iter()
            .map(|def| (def.render_flag(), def.help.clone()))
            .collect()
    }

    /// Check whether this plugin is responsible for the given task name
    fn can_handle(&self, task: &str) -> bool {
        task.eq_ignore_ascii_case(self.task_name())
    }

    /// Check that every required option is present in the invocation.
    /// Reports the first missing parameter and returns false.
    fn validate_parameters(&self, invocation: &Invocation) -> bool {
        for def in self.required_options() {
            if def.required && !invocation.has(&def.long) {
                eprintln!("❌ Missing required parameter: {}", def.long);
                return false;
            }
        }
        true
    }

    /// Run this plugin's analysis against the parsed invocation, writing
    /// results into the output directory
    fn execute(&self, invocation: &Invocation, output_dir: &Path) -> TaskResult<()>;
}

/// The project-name option shared by every plugin and the dispatcher
pub fn project_name_option() -> OptionDef {
    OptionDef::valued(
        Some('n'),
        OPT_NAME,
        "NAME",
        "Name of the project that should be analyzed",
    )
    .required()
}

/// Fetch a required option value from the invocation
pub fn require_value<'a>(invocation: &'a Invocation, long: &str) -> TaskResult<&'a str> {
    invocation
        .value(long)
        .ok_or_else(|| TaskError::MissingParameter(long.to_string()))
}

/// Resolve a path argument, requiring it to denote an existing file or directory
pub fn ensure_path(raw: &str) -> TaskResult<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskError::PathNotFound(PathBuf::from(raw)));
    }
    let path = PathBuf::from(trimmed);
    if !path.exists() {
        return Err(TaskError::PathNotFound(path));
    }
    Ok(path)
}
