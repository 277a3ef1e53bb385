// sad_sam.rs - SAD-SAM traceability link recovery task

use std::collections::BTreeMap;
use std::path::Path;

use super::traits::{ensure_path, project_name_option, require_value, TaskPlugin};
use crate::cli::options::OPT_NAME;
use crate::cli::{Invocation, OptionDef};
use crate::engine::{ModelFormat, SadSamRecovery};
use crate::errors::TaskResult;

pub const OPT_SAS_DOCUMENTATION: &str = "sas-documentation";
pub const OPT_SAS_MODEL: &str = "sas-model";

/// Links documentation sentences to architecture model elements
#[derive(Debug, Clone)]
pub struct SadSamPlugin;

impl TaskPlugin for SadSamPlugin {
    fn task_name(&self) -> &'static str {
        "sad-sam"
    }

    fn prefix(&self) -> &'static str {
        "sas"
    }

    fn required_options(&self) -> Vec<OptionDef> {
        vec![
            OptionDef::valued(
                None,
                OPT_SAS_DOCUMENTATION,
                "FILE",
                "Path to the documentation (SAD)",
            )
            .required(),
            OptionDef::valued(None, OPT_SAS_MODEL, "FILE", "Path to the model (SAM)").required(),
            project_name_option(),
        ]
    }

    fn execute(&self, invocation: &Invocation, output_dir: &Path) -> TaskResult<()> {
        println!("🔗 Starting SAD-SAM traceability link recovery task.");

        let name = require_value(invocation, OPT_NAME)?;
        let documentation = ensure_path(require_value(invocation, OPT_SAS_DOCUMENTATION)?)?;
        let model = ensure_path(require_value(invocation, OPT_SAS_MODEL)?)?;

        let mut runner = SadSamRecovery::new(name);
        runner.set_up(
            &documentation,
            &model,
            ModelFormat::Pcm,
            BTreeMap::new(),
            output_dir,
        );
        let stats = runner.run()?;

        println!(
            "📊 Recovered {} trace links, {} inconsistencies",
            stats.trace_links, stats.inconsistencies
        );
        println!("✅ SAD-SAM task completed.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OptionRegistry;
    use crate::errors::TaskError;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Invocation {
        let mut registry = OptionRegistry::with_global_options();
        registry
            .merge(SadSamPlugin.task_name(), &SadSamPlugin.required_options())
            .unwrap();
        let command = registry.build_command("archtrace", &["sad-sam".to_string()]);
        let mut full = vec!["archtrace"];
        full.extend_from_slice(args);
        Invocation::from_matches(&registry, &command.try_get_matches_from(full).unwrap())
    }

    #[test]
    fn test_required_options_include_project_name() {
        let longs: Vec<String> = SadSamPlugin
            .required_options()
            .iter()
            .map(|def| def.long.clone())
            .collect();
        assert!(longs.contains(&OPT_NAME.to_string()));
        assert!(longs.contains(&OPT_SAS_DOCUMENTATION.to_string()));
        assert!(longs.contains(&OPT_SAS_MODEL.to_string()));
    }

    #[test]
    fn test_execute_recovers_links_from_existing_inputs() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("doc.txt");
        let model = dir.path().join("model.txt");
        fs::write(&doc, "The WebUI renders pages.").unwrap();
        fs::write(&model, "Component WebUI\n").unwrap();
        let out = dir.path().join("out");

        let invocation = parse(&[
            "-n",
            "teastore",
            "--sas-documentation",
            doc.to_str().unwrap(),
            "--sas-model",
            model.to_str().unwrap(),
        ]);
        SadSamPlugin.execute(&invocation, &out).unwrap();

        assert!(out.join("traceLinks_sad-sam_teastore.csv").is_file());
        assert!(out.join("traceLinks_sad-sam_teastore.txt").is_file());
    }

    #[test]
    fn test_execute_rejects_missing_documentation_file() {
        let dir = TempDir::new().unwrap();
        let model = dir.path().join("model.txt");
        fs::write(&model, "Component WebUI\n").unwrap();

        let invocation = parse(&[
            "-n",
            "teastore",
            "--sas-documentation",
            dir.path().join("absent.txt").to_str().unwrap(),
            "--sas-model",
            model.to_str().unwrap(),
        ]);
        let err = SadSamPlugin
            .execute(&invocation, &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, TaskError::PathNotFound(_)));
    }

    #[test]
    fn test_execute_requires_project_name() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("doc.txt");
        fs::write(&doc, "text.").unwrap();

        let invocation = parse(&["--sas-documentation", doc.to_str().unwrap()]);
        let err = SadSamPlugin
            .execute(&invocation, &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, TaskError::MissingParameter(long) if long == OPT_NAME));
    }
}
