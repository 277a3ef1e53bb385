// report.rs - Run outcome summary for the dispatcher

/// Terminal state of one dispatcher run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Usage was printed in response to the help flag
    Help,
    /// A sample configuration file was printed
    GeneratedConfig,
    /// The command line did not parse against the merged option set
    ParseFailed,
    /// A configuration file was given but could not be loaded
    ConfigFailed,
    /// No output directory was specified or it could not be created
    NoOutputDir,
    /// No task selector was supplied
    NoTask,
    /// The task selector matched no registered plugin
    UnknownTask,
    /// Task selection succeeded and the selected plugins were attempted
    Completed,
}

/// What one dispatcher run did: which tasks ran and which were skipped
#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: RunStatus,
    pub executed: Vec<String>,
    pub skipped: Vec<(String, String)>,
}

impl RunReport {
    pub(crate) fn new(status: RunStatus) -> Self {
        Self {
            status,
            executed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Whether the run should terminate the process successfully. Help and
    /// sample-config runs are informational; a completed run succeeds only
    /// when no selected task was skipped or failed.
    pub fn success(&self) -> bool {
        match self.status {
            RunStatus::Help | RunStatus::GeneratedConfig => true,
            RunStatus::Completed => self.skipped.is_empty(),
            _ => false,
        }
    }

    /// Print the per-task outcome summary for multi-task runs
    pub fn print_summary(&self) {
        if self.status != RunStatus::Completed || self.executed.len() + self.skipped.len() < 2 {
            return;
        }
        println!("📊 Task summary:");
        for name in &self.executed {
            println!("   ✅ {}", name);
        }
        for (name, reason) in &self.skipped {
            println!("   ❌ {} ({})", name, reason);
        }
    }
}
