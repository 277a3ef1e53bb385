// sad_code.rs - SAD-Code traceability link recovery task

use std::collections::BTreeMap;
use std::path::Path;

use super::traits::{ensure_path, project_name_option, require_value, TaskPlugin};
use crate::cli::options::OPT_NAME;
use crate::cli::{Invocation, OptionDef};
use crate::engine::{ModelFormat, SadSamCodeRecovery};
use crate::errors::TaskResult;

pub const OPT_SDC_DOCUMENTATION: &str = "sdc-documentation";
pub const OPT_SDC_MODEL: &str = "sdc-model";
pub const OPT_SDC_CODE: &str = "sdc-code";

/// Links documentation sentences to code files through the model
#[derive(Debug, Clone)]
pub struct SadCodePlugin;

impl TaskPlugin for SadCodePlugin {
    fn task_name(&self) -> &'static str {
        "sad-code"
    }

    fn prefix(&self) -> &'static str {
        "sdc"
    }

    fn required_options(&self) -> Vec<OptionDef> {
        vec![
            OptionDef::valued(
                None,
                OPT_SDC_DOCUMENTATION,
                "FILE",
                "Path to the documentation (SAD)",
            )
            .required(),
            OptionDef::valued(None, OPT_SDC_MODEL, "FILE", "Path to the model (SAM)").required(),
            OptionDef::valued(None, OPT_SDC_CODE, "PATH", "Path to the code (file or directory)")
                .required(),
            project_name_option(),
        ]
    }

    fn execute(&self, invocation: &Invocation, output_dir: &Path) -> TaskResult<()> {
        println!("🔗 Starting SAD-Code traceability link recovery task.");

        let name = require_value(invocation, OPT_NAME)?;
        let documentation = ensure_path(require_value(invocation, OPT_SDC_DOCUMENTATION)?)?;
        let model = ensure_path(require_value(invocation, OPT_SDC_MODEL)?)?;
        let code = ensure_path(require_value(invocation, OPT_SDC_CODE)?)?;

        let mut runner = SadSamCodeRecovery::new(name);
        runner.set_up(
            &documentation,
            &model,
            &code,
            ModelFormat::Pcm,
            BTreeMap::new(),
            output_dir,
        );
        let stats = runner.run()?;

        println!("📊 Recovered {} trace links", stats.trace_links);
        println!("✅ SAD-Code task completed.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OptionRegistry;
    use crate::core::PluginManager;
    use crate::errors::TaskError;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Invocation {
        let mut registry = OptionRegistry::with_global_options();
        registry
            .merge(SadCodePlugin.task_name(), &SadCodePlugin.required_options())
            .unwrap();
        let command = registry.build_command("archtrace", &["sad-code".to_string()]);
        let mut full = vec!["archtrace"];
        full.extend_from_slice(args);
        Invocation::from_matches(&registry, &command.try_get_matches_from(full).unwrap())
    }

    #[test]
    fn test_required_options_include_project_name() {
        let longs: Vec<String> = SadCodePlugin
            .required_options()
            .iter()
            .map(|def| def.long.clone())
            .collect();
        assert!(longs.contains(&OPT_NAME.to_string()));
        assert!(longs.contains(&OPT_SDC_DOCUMENTATION.to_string()));
        assert!(longs.contains(&OPT_SDC_MODEL.to_string()));
        assert!(longs.contains(&OPT_SDC_CODE.to_string()));
    }

    #[test]
    fn test_execute_links_sentences_to_code_files() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("doc.txt");
        let model = dir.path().join("model.txt");
        fs::write(&doc, "Requests arrive at the gateway. The WebUI renders pages.").unwrap();
        fs::write(&model, "Component WebUI\n").unwrap();
        let code = dir.path().join("src");
        fs::create_dir(&code).unwrap();
        fs::write(code.join("WebUI.java"), "class WebUI {}").unwrap();
        let out = dir.path().join("out");

        let invocation = parse(&[
            "-n",
            "teastore",
            "--sdc-documentation",
            doc.to_str().unwrap(),
            "--sdc-model",
            model.to_str().unwrap(),
            "--sdc-code",
            code.to_str().unwrap(),
        ]);
        SadCodePlugin.execute(&invocation, &out).unwrap();

        let csv = fs::read_to_string(out.join("traceLinks_sad-code_teastore.csv")).unwrap();
        assert!(csv.contains("sentence 2,"));
        assert!(csv.contains("WebUI.java"));
        assert!(out.join("traceLinks_sad-code_teastore.txt").is_file());
    }

    #[test]
    fn test_execute_rejects_missing_code_path() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("doc.txt");
        let model = dir.path().join("model.txt");
        fs::write(&doc, "The WebUI renders pages.").unwrap();
        fs::write(&model, "Component WebUI\n").unwrap();

        let invocation = parse(&[
            "-n",
            "teastore",
            "--sdc-documentation",
            doc.to_str().unwrap(),
            "--sdc-model",
            model.to_str().unwrap(),
            "--sdc-code",
            dir.path().join("no-src").to_str().unwrap(),
        ]);
        let err = SadCodePlugin
            .execute(&invocation, &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, TaskError::PathNotFound(_)));
    }

    #[test]
    fn test_missing_code_path_is_recorded_as_skip() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("doc.txt");
        let model = dir.path().join("model.txt");
        fs::write(&doc, "The WebUI renders pages.").unwrap();
        fs::write(&model, "Component WebUI\n").unwrap();
        let out = dir.path().join("out");
        let missing = dir.path().join("no-src");

        let manager = PluginManager::with_plugins(vec![Box::new(SadCodePlugin)]).unwrap();
        let report = manager.execute_plugins([
            "--task",
            "sad-code",
            "-o",
            out.to_str().unwrap(),
            "-n",
            "teastore",
            "--sdc-documentation",
            doc.to_str().unwrap(),
            "--sdc-model",
            model.to_str().unwrap(),
            "--sdc-code",
            missing.to_str().unwrap(),
        ]);

        assert!(report.executed.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "sad-code");
        assert!(!report.success());
    }
}
