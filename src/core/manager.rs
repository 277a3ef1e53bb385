// manager.rs - Plugin registration and task dispatch

use std::path::{Path, PathBuf};

use crate::cli::options::{OPT_CONFIG, OPT_GENERATE_CONFIG, OPT_HELP, OPT_OUTPUT, OPT_TASK};
use crate::cli::{FileConfig, Invocation, OptionRegistry};
use crate::core::cleanup;
use crate::core::report::{RunReport, RunStatus};
use crate::errors::{ConfigError, ConfigResult};
use crate::plugins::TaskPlugin;

/// Name of the binary shown in usage output
const BIN_NAME: &str = "archtrace";

/// Task selector value that runs every registered plugin
const TASK_ALL: &str = "all";

/// Owns the registered plugins, the merged option registry, and the
/// dispatch state machine for one process run. One manager is constructed
/// fresh per run; there is no process-wide registry.
pub struct PluginManager {
    plugins: Vec<Box<dyn TaskPlugin>>,
    registry: OptionRegistry,
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            registry: OptionRegistry::with_global_options(),
        }
    }

    /// Create a manager with an explicit plugin list. Registration order is
    /// execution order for --task ALL.
    pub fn with_plugins(plugins: Vec<Box<dyn TaskPlugin>>) -> ConfigResult<Self> {
        let mut manager = Self::new();
        for plugin in plugins {
            manager.add_plugin(plugin)?;
        }
        Ok(manager)
    }

    /// Register a plugin. Its task name must be unused and its options must
    /// merge into the registry without collisions; a failed registration
    /// leaves the manager unchanged.
    pub fn add_plugin(&mut self, plugin: Box<dyn TaskPlugin>) -> ConfigResult<()> {
        let task_name = plugin.task_name();
        if self.plugins.iter().any(|p| p.can_handle(task_name)) {
            return Err(ConfigError::DuplicateTask(task_name.to_string()));
        }
        self.registry.merge(task_name, &plugin.required_options())?;
        self.plugins.push(plugin);
        Ok(())
    }

    /// Registered task names in registration order
    pub fn task_names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.task_name().to_string()).collect()
    }

    /// Parse the command line and run the selected task(s). Never exits the
    /// process; the returned report carries the outcome.
    pub fn execute_plugins<I, S>(&self, args: I) -> RunReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = self.registry.build_command(BIN_NAME, &self.task_names());
        let mut argv: Vec<String> = vec![BIN_NAME.to_string()];
        argv.extend(args.into_iter().map(Into::into));

        let matches = match command.try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(e) => {
                eprintln!("❌ {}", e);
                self.print_usage();
                return RunReport::new(RunStatus::ParseFailed);
            }
        };
        let mut invocation = Invocation::from_matches(&self.registry, &matches);

        // Help ends the run before anything else is required
        if invocation.has(OPT_HELP) {
            self.print_usage();
            return RunReport::new(RunStatus::Help);
        }
        if invocation.has(OPT_GENERATE_CONFIG) {
            print!("{}", FileConfig::generate_sample());
            return RunReport::new(RunStatus::GeneratedConfig);
        }

        println!("🚀 {} v{}", BIN_NAME, env!("CARGO_PKG_VERSION"));

        // Config file values fill in options absent from the command line
        if let Some(config_path) = invocation.value(OPT_CONFIG).map(|s| s.to_string()) {
            invocation = match invocation.with_config_file(&config_path, &self.registry) {
                Ok(merged) => merged,
                Err(e) => {
                    eprintln!("❌ {}", e);
                    return RunReport::new(RunStatus::ConfigFailed);
                }
            };
        }

        let output_dir = match invocation.value(OPT_OUTPUT) {
            Some(value) => PathBuf::from(value),
            None => {
                eprintln!("❌ No output directory specified.");
                return RunReport::new(RunStatus::NoOutputDir);
            }
        };
        if let Err(e) = std::fs::create_dir_all(&output_dir) {
            eprintln!(
                "❌ Could not create output directory {}: {}",
                output_dir.display(),
                e
            );
            return RunReport::new(RunStatus::NoOutputDir);
        }

        let report = self.dispatch(&invocation, &output_dir);

        // Transient artifacts are purged regardless of task outcomes
        let deleted = cleanup::purge_transient_files(&output_dir);
        if deleted > 0 {
            println!(
                "🧹 Removed {} transient file(s) from {}",
                deleted,
                output_dir.display()
            );
        }

        report
    }

    fn dispatch(&self, invocation: &Invocation, output_dir: &Path) -> RunReport {
        let selector = match invocation.value(OPT_TASK) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => {
                eprintln!("❌ No task specified. Use -t/--task to select one.");
                self.print_usage();
                return RunReport::new(RunStatus::NoTask);
            }
        };

        let selected: Vec<&dyn TaskPlugin> = if selector.eq_ignore_ascii_case(TASK_ALL) {
            self.plugins.iter().map(|p| p.as_ref()).collect()
        } else {
            match self.plugins.iter().find(|p| p.can_handle(&selector)) {
                Some(plugin) => vec![plugin.as_ref()],
                None => {
                    eprintln!("❌ Invalid task provided: {}", selector);
                    self.print_usage();
                    return RunReport::new(RunStatus::UnknownTask);
                }
            }
        };

        let mut report = RunReport::new(RunStatus::Completed);
        for plugin in selected {
            let name = plugin.task_name().to_string();
            if !plugin.validate_parameters(invocation) {
                eprintln!("❌ Cannot execute task {} due to missing parameters", name);
                report.skipped.push((name, "missing parameters".to_string()));
                continue;
            }
            match plugin.execute(invocation, output_dir) {
                Ok(()) => report.executed.push(name),
                Err(e) => {
                    eprintln!("❌ Task {} failed: {}", name, e);
                    report.skipped.push((name, e.to_string()));
                }
            }
        }
        report
    }

    /// Print the option summary and each plugin's parameter section
    pub fn print_usage(&self) {
        let mut command = self.registry.build_command(BIN_NAME, &self.task_names());
        println!("{}", command.render_help());
        for plugin in &self.plugins {
            println!("Parameters of the {} task:", plugin.task_name());
            for (flag, description) in plugin.prefix_descriptions() {
                println!("  {:<32} {}", flag, description);
            }
            println!();
        }
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OptionDef;
    use crate::errors::{TaskError, TaskResult};
    use crate::plugins::traits::{ensure_path, project_name_option, require_value};
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Debug)]
    struct RecordingPlugin {
        name: &'static str,
        options: Vec<OptionDef>,
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
        write_files: bool,
    }

    impl RecordingPlugin {
        fn boxed(
            name: &'static str,
            longs: &[&str],
            calls: &Arc<Mutex<Vec<String>>>,
        ) -> Box<Self> {
            let options = longs
                .iter()
                .map(|long| OptionDef::valued(None, long, "FILE", "test input").required())
                .chain([project_name_option()])
                .collect();
            Box::new(Self {
                name,
                options,
                calls: Arc::clone(calls),
                fail: false,
                write_files: false,
            })
        }
    }

    impl TaskPlugin for RecordingPlugin {
        fn task_name(&self) -> &'static str {
            self.name
        }

        fn prefix(&self) -> &'static str {
            "tst"
        }

        fn required_options(&self) -> Vec<OptionDef> {
            self.options.clone()
        }

        fn execute(&self, _invocation: &Invocation, output_dir: &Path) -> TaskResult<()> {
            self.calls.lock().unwrap().push(self.name.to_string());
            if self.write_files {
                let scratch = output_dir.join(format!("traceLinks_{}.txt", self.name));
                let durable = output_dir.join(format!("traceLinks_{}.csv", self.name));
                fs::write(scratch, "scratch").map_err(|_| TaskError::MissingParameter("w".into()))?;
                fs::write(durable, "durable").map_err(|_| TaskError::MissingParameter("w".into()))?;
            }
            if self.fail {
                return Err(TaskError::PathNotFound(PathBuf::from("forced-failure")));
            }
            Ok(())
        }
    }

    fn out_path(dir: &TempDir) -> String {
        dir.path().join("out").to_str().unwrap().to_string()
    }

    #[test]
    fn test_with_plugins_preserves_registration_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![
            RecordingPlugin::boxed("alpha", &["alpha-input"], &calls),
            RecordingPlugin::boxed("beta", &["beta-input"], &calls),
            RecordingPlugin::boxed("gamma", &["gamma-input"], &calls),
        ])
        .unwrap();
        assert_eq!(manager.task_names(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_add_plugin_rejects_duplicate_task_names() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut manager = PluginManager::new();
        manager
            .add_plugin(RecordingPlugin::boxed("alpha", &["alpha-input"], &calls))
            .unwrap();
        // Case differences do not make a name unique
        let err = manager
            .add_plugin(RecordingPlugin::boxed("ALPHA", &["other-input"], &calls))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTask(name) if name == "ALPHA"));
        assert_eq!(manager.task_names(), vec!["alpha"]);
    }

    #[test]
    fn test_add_plugin_rejects_option_collisions() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut manager = PluginManager::new();
        manager
            .add_plugin(RecordingPlugin::boxed("alpha", &["shared-input"], &calls))
            .unwrap();
        let err = manager
            .add_plugin(RecordingPlugin::boxed("beta", &["shared-input"], &calls))
            .unwrap_err();
        match err {
            ConfigError::DuplicateOption { long, owner, existing_owner } => {
                assert_eq!(long, "shared-input");
                assert_eq!(owner, "beta");
                assert_eq!(existing_owner, "alpha");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // The rejected plugin is not registered at all
        assert_eq!(manager.task_names(), vec!["alpha"]);
    }

    #[test]
    fn test_task_resolution_is_case_insensitive() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![RecordingPlugin::boxed(
            "sad-sam",
            &["input-file"],
            &calls,
        )])
        .unwrap();
        let dir = TempDir::new().unwrap();
        let out = out_path(&dir);

        for spelling in ["sad-sam", "SAD-SAM", "Sad-Sam"] {
            let report = manager.execute_plugins([
                "-o",
                out.as_str(),
                "-t",
                spelling,
                "-n",
                "proj",
                "--input-file",
                "x",
            ]);
            assert_eq!(report.status, RunStatus::Completed);
            assert!(report.success());
        }
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_all_runs_in_registration_order_and_skips_invalid() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![
            RecordingPlugin::boxed("alpha", &["alpha-input"], &calls),
            RecordingPlugin::boxed("beta", &["beta-input"], &calls),
            RecordingPlugin::boxed("gamma", &["gamma-input"], &calls),
        ])
        .unwrap();
        let dir = TempDir::new().unwrap();
        let out = out_path(&dir);

        // beta's required option is missing; alpha and gamma still run
        let report = manager.execute_plugins([
            "-o",
            out.as_str(),
            "-t",
            "ALL",
            "-n",
            "proj",
            "--alpha-input",
            "a",
            "--gamma-input",
            "g",
        ]);

        assert_eq!(*calls.lock().unwrap(), vec!["alpha", "gamma"]);
        assert_eq!(report.executed, vec!["alpha", "gamma"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "beta");
        assert!(!report.success());
    }

    #[test]
    fn test_missing_output_directory_aborts_before_execution() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![RecordingPlugin::boxed(
            "alpha",
            &["alpha-input"],
            &calls,
        )])
        .unwrap();

        let report = manager.execute_plugins(["-t", "alpha", "-n", "proj", "--alpha-input", "a"]);

        assert_eq!(report.status, RunStatus::NoOutputDir);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_task_still_creates_output_directory() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![RecordingPlugin::boxed(
            "alpha",
            &["alpha-input"],
            &calls,
        )])
        .unwrap();
        let dir = TempDir::new().unwrap();
        let out = out_path(&dir);

        let report =
            manager.execute_plugins(["-o", out.as_str(), "-t", "no-such-task", "-n", "proj"]);

        assert_eq!(report.status, RunStatus::UnknownTask);
        assert!(calls.lock().unwrap().is_empty());
        assert!(Path::new(&out).is_dir());
    }

    #[test]
    fn test_missing_task_selector_aborts() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![RecordingPlugin::boxed(
            "alpha",
            &["alpha-input"],
            &calls,
        )])
        .unwrap();
        let dir = TempDir::new().unwrap();
        let out = out_path(&dir);

        let report = manager.execute_plugins(["-o", out.as_str(), "-n", "proj"]);
        assert_eq!(report.status, RunStatus::NoTask);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_help_short_circuits_without_side_effects() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![RecordingPlugin::boxed(
            "alpha",
            &["alpha-input"],
            &calls,
        )])
        .unwrap();
        let dir = TempDir::new().unwrap();
        let out = out_path(&dir);

        let report = manager.execute_plugins(["-h", "-o", out.as_str(), "-t", "alpha"]);

        assert_eq!(report.status, RunStatus::Help);
        assert!(report.success());
        assert!(calls.lock().unwrap().is_empty());
        assert!(!Path::new(&out).exists());
    }

    #[test]
    fn test_parse_failure_aborts() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![RecordingPlugin::boxed(
            "alpha",
            &["alpha-input"],
            &calls,
        )])
        .unwrap();

        let report = manager.execute_plugins(["--no-such-option"]);
        assert_eq!(report.status, RunStatus::ParseFailed);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_execution_failure_does_not_abort_siblings() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut failing = RecordingPlugin::boxed("alpha", &["alpha-input"], &calls);
        failing.fail = true;
        let manager = PluginManager::with_plugins(vec![
            failing,
            RecordingPlugin::boxed("beta", &["beta-input"], &calls),
        ])
        .unwrap();
        let dir = TempDir::new().unwrap();
        let out = out_path(&dir);

        let report = manager.execute_plugins([
            "-o",
            out.as_str(),
            "-t",
            "ALL",
            "-n",
            "proj",
            "--alpha-input",
            "a",
            "--beta-input",
            "b",
        ]);

        assert_eq!(*calls.lock().unwrap(), vec!["alpha", "beta"]);
        assert_eq!(report.executed, vec!["beta"]);
        assert_eq!(report.skipped[0].0, "alpha");
        assert!(!report.success());
    }

    #[test]
    fn test_transient_files_are_purged_after_execution() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut writing = RecordingPlugin::boxed("alpha", &["alpha-input"], &calls);
        writing.write_files = true;
        let manager = PluginManager::with_plugins(vec![writing]).unwrap();
        let dir = TempDir::new().unwrap();
        let out = out_path(&dir);

        let report = manager.execute_plugins([
            "-o",
            out.as_str(),
            "-t",
            "alpha",
            "-n",
            "proj",
            "--alpha-input",
            "a",
        ]);

        assert!(report.success());
        assert!(!Path::new(&out).join("traceLinks_alpha.txt").exists());
        assert!(Path::new(&out).join("traceLinks_alpha.csv").exists());
    }

    #[test]
    fn test_transient_files_are_purged_even_for_unknown_task() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![RecordingPlugin::boxed(
            "alpha",
            &["alpha-input"],
            &calls,
        )])
        .unwrap();
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("traceLinks_stale.txt"), "left over").unwrap();

        let report =
            manager.execute_plugins(["-o", out.to_str().unwrap(), "-t", "no-such-task"]);

        assert_eq!(report.status, RunStatus::UnknownTask);
        assert!(!out.join("traceLinks_stale.txt").exists());
    }

    #[test]
    fn test_generate_config_short_circuits() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![RecordingPlugin::boxed(
            "alpha",
            &["alpha-input"],
            &calls,
        )])
        .unwrap();

        let report = manager.execute_plugins(["--generate-config"]);
        assert_eq!(report.status, RunStatus::GeneratedConfig);
        assert!(report.success());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_config_file_supplies_missing_options() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![RecordingPlugin::boxed(
            "alpha",
            &["alpha-input"],
            &calls,
        )])
        .unwrap();
        let dir = TempDir::new().unwrap();
        let out = out_path(&dir);
        let config_path = dir.path().join("archtrace.toml");
        fs::write(
            &config_path,
            format!(
                "output = \"{}\"\ntask = \"alpha\"\nname = \"proj\"\n[options]\nalpha-input = \"a\"\n",
                out.replace('\\', "/")
            ),
        )
        .unwrap();

        let report = manager.execute_plugins(["-c", config_path.to_str().unwrap()]);

        assert_eq!(report.status, RunStatus::Completed);
        assert_eq!(report.executed, vec!["alpha"]);
        assert!(report.success());
    }

    #[test]
    fn test_unreadable_config_file_aborts() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![RecordingPlugin::boxed(
            "alpha",
            &["alpha-input"],
            &calls,
        )])
        .unwrap();
        let dir = TempDir::new().unwrap();
        let out = out_path(&dir);
        let config = dir.path().join("absent.toml");

        let report = manager.execute_plugins([
            "-c",
            config.to_str().unwrap(),
            "-o",
            out.as_str(),
            "-t",
            "alpha",
        ]);

        assert_eq!(report.status, RunStatus::ConfigFailed);
        assert!(calls.lock().unwrap().is_empty());
    }

    // Scenario from the dispatch contract: a sad-sam style plugin with short
    // flags resolves its paths from the invocation and runs exactly once
    #[derive(Debug)]
    struct PathRecordingPlugin {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl TaskPlugin for PathRecordingPlugin {
        fn task_name(&self) -> &'static str {
            "sad-sam"
        }

        fn prefix(&self) -> &'static str {
            "sas"
        }

        fn required_options(&self) -> Vec<OptionDef> {
            vec![
                OptionDef::valued(Some('d'), "documentation", "FILE", "Path to the documentation")
                    .required(),
                OptionDef::valued(Some('m'), "model", "FILE", "Path to the model").required(),
                project_name_option(),
            ]
        }

        fn execute(&self, invocation: &Invocation, _output_dir: &Path) -> TaskResult<()> {
            let documentation = ensure_path(require_value(invocation, "documentation")?)?;
            let model = ensure_path(require_value(invocation, "model")?)?;
            self.calls
                .lock()
                .unwrap()
                .push(format!("{}|{}", documentation.display(), model.display()));
            Ok(())
        }
    }

    #[test]
    fn test_short_flag_plugin_receives_resolved_paths() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let manager = PluginManager::with_plugins(vec![Box::new(PathRecordingPlugin {
            calls: Arc::clone(&calls),
        })])
        .unwrap();
        let dir = TempDir::new().unwrap();
        let out = out_path(&dir);
        let doc = dir.path().join("doc.txt");
        let model = dir.path().join("model.txt");
        fs::write(&doc, "documentation").unwrap();
        fs::write(&model, "Component WebUI").unwrap();

        let report = manager.execute_plugins([
            "-o",
            out.as_str(),
            "-t",
            "sad-sam",
            "-n",
            "Proj",
            "-d",
            doc.to_str().unwrap(),
            "-m",
            model.to_str().unwrap(),
        ]);

        assert!(report.success());
        let recorded = calls.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(
            recorded[0],
            format!("{}|{}", doc.display(), model.display())
        );
    }
}
