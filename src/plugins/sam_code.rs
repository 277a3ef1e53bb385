// sam_code.rs - SAM-Code traceability link recovery task

use std::collections::BTreeMap;
use std::path::Path;

use super::traits::{ensure_path, project_name_option, require_value, TaskPlugin};
use crate::cli::options::OPT_NAME;
use crate::cli::{Invocation, OptionDef};
use crate::engine::{ModelFormat, SamCodeRecovery};
use crate::errors::TaskResult;

pub const OPT_SMC_MODEL: &str = "smc-model";
pub const OPT_SMC_CODE: &str = "smc-code";

/// Links architecture model elements to code files
#[derive(Debug, Clone)]
pub struct SamCodePlugin;

impl TaskPlugin for SamCodePlugin {
    fn task_name(&self) -> &'static str {
        "sam-code"
    }

    fn prefix(&self) -> &'static str {
        "smc"
    }

    fn required_options(&self) -> Vec<OptionDef> {
        vec![
            OptionDef::valued(None, OPT_SMC_MODEL, "FILE", "Path to the model (SAM)").required(),
            OptionDef::valued(None, OPT_SMC_CODE, "PATH", "Path to the code (file or directory)")
                .required(),
            project_name_option(),
        ]
    }

    fn execute(&self, invocation: &Invocation, output_dir: &Path) -> TaskResult<()> {
        println!("🔗 Starting SAM-Code traceability link recovery task.");

        let name = require_value(invocation, OPT_NAME)?;
        let model = ensure_path(require_value(invocation, OPT_SMC_MODEL)?)?;
        let code = ensure_path(require_value(invocation, OPT_SMC_CODE)?)?;

        let mut runner = SamCodeRecovery::new(name);
        runner.set_up(&model, &code, ModelFormat::Pcm, BTreeMap::new(), output_dir);
        let stats = runner.run()?;

        println!("📊 Recovered {} trace links", stats.trace_links);
        println!("✅ SAM-Code task completed.");
        Ok(())
    }
}
