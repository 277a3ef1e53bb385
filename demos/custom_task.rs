#!/usr/bin/env rust-script

//! # Custom Task Example
//!
//! This example demonstrates how to implement and register custom analysis
//! tasks in archtrace.
//!
//! Usage:
//! ```bash
//! cargo run --example custom_task
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use archtrace::engine::lexical;
use archtrace::prelude::*;
use tempfile::TempDir;

/// Example 1: Model inventory task
/// Counts model elements per kind and writes the inventory to the output directory
#[derive(Debug)]
pub struct ModelStatsPlugin;

impl TaskPlugin for ModelStatsPlugin {
    fn task_name(&self) -> &'static str {
        "model-stats"
    }

    fn prefix(&self) -> &'static str {
        "mst"
    }

    fn required_options(&self) -> Vec<OptionDef> {
        vec![
            OptionDef::valued(None, "mst-model", "FILE", "Path to the architecture model").required(),
            project_name_option(),
        ]
    }

    fn execute(&self, invocation: &Invocation, output_dir: &Path) -> TaskResult<()> {
        let project = require_value(invocation, "name")?;
        let model_path = ensure_path(require_value(invocation, "mst-model")?)?;

        let content = fs::read_to_string(&model_path).map_err(|e| EngineError::Read {
            path: model_path.clone(),
            source: e,
        })?;
        let elements = lexical::parse_model(&content);

        // Tally elements per kind; elements without a kind go into one bucket
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for element in &elements {
            let kind = element.kind.clone().unwrap_or_else(|| "Unspecified".to_string());
            *counts.entry(kind).or_insert(0) += 1;
        }

        let mut lines = vec![format!("Model inventory for {}", project)];
        for (kind, count) in &counts {
            lines.push(format!("{}: {}", kind, count));
        }
        let target = output_dir.join(format!("modelStats_{}.txt", project));
        fs::write(&target, lines.join("\n")).map_err(|e| EngineError::Write {
            path: target.clone(),
            source: e,
        })?;

        println!("📊 {} model elements across {} kinds", elements.len(), counts.len());
        println!("✅ Inventory written to: {}", target.display());
        Ok(())
    }
}

/// Example 2: Documentation profile task
/// Reports sentence and vocabulary counts for a documentation file
#[derive(Debug)]
pub struct DocStatsPlugin;

impl TaskPlugin for DocStatsPlugin {
    fn task_name(&self) -> &'static str {
        "doc-stats"
    }

    fn prefix(&self) -> &'static str {
        "dcs"
    }

    fn required_options(&self) -> Vec<OptionDef> {
        vec![
            OptionDef::valued(None, "dcs-documentation", "FILE", "Path to the textual documentation")
                .required(),
            project_name_option(),
        ]
    }

    fn execute(&self, invocation: &Invocation, _output_dir: &Path) -> TaskResult<()> {
        let documentation = ensure_path(require_value(invocation, "dcs-documentation")?)?;
        let content = fs::read_to_string(&documentation).map_err(|e| EngineError::Read {
            path: documentation.clone(),
            source: e,
        })?;

        let sentences = lexical::split_sentences(&content);
        let mut vocabulary: BTreeSet<String> = BTreeSet::new();
        for sentence in &sentences {
            vocabulary.extend(lexical::split_identifier(sentence));
        }

        println!(
            "📄 {} sentences, {} distinct tokens",
            sentences.len(),
            vocabulary.len()
        );
        Ok(())
    }
}

struct Workspace {
    root: TempDir,
    model: PathBuf,
    documentation: PathBuf,
}

/// Prepare a scratch directory with a small sample model and documentation
fn setup_workspace() -> std::io::Result<Workspace> {
    let root = TempDir::new()?;
    let model = root.path().join("teastore.txt");
    fs::write(
        &model,
        "# sample architecture model\nComponent WebUI\nComponent Registry\nInterface Auth\n",
    )?;
    let documentation = root.path().join("architecture.txt");
    fs::write(
        &documentation,
        "The WebUI renders pages. The Registry tracks every running service. Auth checks tokens!",
    )?;
    Ok(Workspace {
        root,
        model,
        documentation,
    })
}

fn main() {
    println!("🔌 archtrace Custom Task Examples");
    println!("=================================\n");

    // Register the custom tasks next to the built-in ones
    let manager = match PluginManager::with_plugins(vec![
        Box::new(SadSamPlugin),
        Box::new(SamCodePlugin),
        Box::new(SadCodePlugin),
        Box::new(ModelStatsPlugin),
        Box::new(DocStatsPlugin),
    ]) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("❌ Registration failed: {}", e);
            return;
        }
    };

    println!("📋 Registered tasks:");
    for name in manager.task_names() {
        println!("  • {}", name);
    }
    println!();

    let workspace = match setup_workspace() {
        Ok(workspace) => workspace,
        Err(e) => {
            eprintln!("❌ Could not prepare the demo workspace: {}", e);
            return;
        }
    };
    let output_arg = workspace.root.path().join("results").display().to_string();
    let model_arg = workspace.model.display().to_string();
    let docs_arg = workspace.documentation.display().to_string();

    println!("🧮 Running the model-stats task:");
    let report = manager.execute_plugins([
        "-o",
        output_arg.as_str(),
        "-t",
        "model-stats",
        "-n",
        "demo",
        "--mst-model",
        model_arg.as_str(),
    ]);
    println!("   Completed: {}\n", report.success());

    println!("📖 Running the doc-stats task:");
    let report = manager.execute_plugins([
        "-o",
        output_arg.as_str(),
        "-t",
        "doc-stats",
        "-n",
        "demo",
        "--dcs-documentation",
        docs_arg.as_str(),
    ]);
    println!("   Completed: {}\n", report.success());

    // Required parameters are validated before execution
    println!("🚫 Running model-stats without its model option:");
    let report = manager.execute_plugins(["-o", output_arg.as_str(), "-t", "model-stats", "-n", "demo"]);
    println!("   Completed: {}", report.success());

    println!("\n✅ Custom task examples completed!");
    println!("💡 Tip: keep option names behind a distinct prefix so they merge without collisions");
}
