// runner.rs - Recovery runners invoked by the task plugins

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::lexical;
use super::{ModelFormat, RecoveryStats, TraceLink};
use crate::errors::{EngineError, EngineResult};
use crate::output;

fn read_input(path: &Path) -> EngineResult<String> {
    fs::read_to_string(path).map_err(|e| EngineError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Recovers links between documentation sentences and model elements
#[derive(Debug)]
pub struct SadSamRecovery {
    project_name: String,
    documentation: Option<PathBuf>,
    model: Option<PathBuf>,
    model_format: ModelFormat,
    additional_configs: BTreeMap<String, String>,
    output_dir: Option<PathBuf>,
}

impl SadSamRecovery {
    pub fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            documentation: None,
            model: None,
            model_format: ModelFormat::Pcm,
            additional_configs: BTreeMap::new(),
            output_dir: None,
        }
    }

    /// Configure the runner with resolved inputs and the output directory
    pub fn set_up(
        &mut self,
        documentation: &Path,
        model: &Path,
        model_format: ModelFormat,
        additional_configs: BTreeMap<String, String>,
        output_dir: &Path,
    ) {
        self.documentation = Some(documentation.to_path_buf());
        self.model = Some(model.to_path_buf());
        self.model_format = model_format;
        self.additional_configs = additional_configs;
        self.output_dir = Some(output_dir.to_path_buf());
    }

    /// Run the recovery synchronously, writing results into the output directory
    pub fn run(&self) -> EngineResult<RecoveryStats> {
        let documentation = self.documentation.as_deref().ok_or(EngineError::NotConfigured)?;
        let model = self.model.as_deref().ok_or(EngineError::NotConfigured)?;
        let output_dir = self.output_dir.as_deref().ok_or(EngineError::NotConfigured)?;

        println!("   Documentation: {}", documentation.display());
        println!("   Model: {} ({} format)", model.display(), self.model_format);

        let sentences = lexical::split_sentences(&read_input(documentation)?);
        let elements = lexical::parse_model(&read_input(model)?);
        let matched = lexical::match_elements_to_sentences(&elements, &sentences);

        let mut links = Vec::new();
        let mut findings = Vec::new();
        for (element, sentence_numbers) in elements.iter().zip(&matched) {
            if sentence_numbers.is_empty() {
                findings.push(format!(
                    "MissingDocumentation: model element '{}' is never mentioned",
                    element.name
                ));
            }
            for number in sentence_numbers {
                links.push(TraceLink::new(format!("sentence {}", number), element.name.clone()));
            }
        }

        output::write_trace_links_csv(
            output_dir,
            &format!("traceLinks_sad-sam_{}.csv", self.project_name),
            ("sentence", "model_element"),
            &links,
            &self.additional_configs,
        )?;
        output::write_trace_links_txt(
            output_dir,
            &format!("traceLinks_sad-sam_{}.txt", self.project_name),
            &links,
        )?;
        output::write_inconsistencies_txt(
            output_dir,
            &format!("inconsistencyDetection_{}.txt", self.project_name),
            &findings,
        )?;

        Ok(RecoveryStats {
            trace_links: links.len(),
            inconsistencies: findings.len(),
        })
    }
}

/// Recovers links between model elements and code files
#[derive(Debug)]
pub struct SamCodeRecovery {
    project_name: String,
    model: Option<PathBuf>,
    code: Option<PathBuf>,
    model_format: ModelFormat,
    additional_configs: BTreeMap<String, String>,
    output_dir: Option<PathBuf>,
}

impl SamCodeRecovery {
    pub fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            model: None,
            code: None,
            model_format: ModelFormat::Pcm,
            additional_configs: BTreeMap::new(),
            output_dir: None,
        }
    }

    /// Configure the runner with resolved inputs and the output directory
    pub fn set_up(
        &mut self,
        model: &Path,
        code: &Path,
        model_format: ModelFormat,
        additional_configs: BTreeMap<String, String>,
        output_dir: &Path,
    ) {
        self.model = Some(model.to_path_buf());
        self.code = Some(code.to_path_buf());
        self.model_format = model_format;
        self.additional_configs = additional_configs;
        self.output_dir = Some(output_dir.to_path_buf());
    }

    /// Run the recovery synchronously, writing results into the output directory
    pub fn run(&self) -> EngineResult<RecoveryStats> {
        let model = self.model.as_deref().ok_or(EngineError::NotConfigured)?;
        let code = self.code.as_deref().ok_or(EngineError::NotConfigured)?;
        let output_dir = self.output_dir.as_deref().ok_or(EngineError::NotConfigured)?;

        println!("   Model: {} ({} format)", model.display(), self.model_format);
        println!("   Code: {}", code.display());

        let elements = lexical::parse_model(&read_input(model)?);
        let files = lexical::collect_code_files(code)?;
        println!("   Found {} code files", files.len());
        let matched = lexical::match_elements_to_files(&elements, &files);

        let mut links = Vec::new();
        for (element, file_indices) in elements.iter().zip(&matched) {
            for &index in file_indices {
                links.push(TraceLink::new(
                    element.name.clone(),
                    files[index].display().to_string(),
                ));
            }
        }

        output::write_trace_links_csv(
            output_dir,
            &format!("traceLinks_sam-code_{}.csv", self.project_name),
            ("model_element", "code_file"),
            &links,
            &self.additional_configs,
        )?;
        output::write_trace_links_txt(
            output_dir,
            &format!("traceLinks_sam-code_{}.txt", self.project_name),
            &links,
        )?;

        Ok(RecoveryStats {
            trace_links: links.len(),
            inconsistencies: 0,
        })
    }
}

/// Recovers links between documentation sentences and code files,
/// transitively through the model elements both sides match
#[derive(Debug)]
pub struct SadSamCodeRecovery {
    project_name: String,
    documentation: Option<PathBuf>,
    model: Option<PathBuf>,
    code: Option<PathBuf>,
    model_format: ModelFormat,
    additional_configs: BTreeMap<String, String>,
    output_dir: Option<PathBuf>,
}

impl SadSamCodeRecovery {
    pub fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            documentation: None,
            model: None,
            code: None,
            model_format: ModelFormat::Pcm,
            additional_configs: BTreeMap::new(),
            output_dir: None,
        }
    }

    /// Configure the runner with resolved inputs and the output directory
    pub fn set_up(
        &mut self,
        documentation: &Path,
        model: &Path,
        code: &Path,
        model_format: ModelFormat,
        additional_configs: BTreeMap<String, String>,
        output_dir: &Path,
    ) {
        self.documentation = Some(documentation.to_path_buf());
        self.model = Some(model.to_path_buf());
        self.code = Some(code.to_path_buf());
        self.model_format = model_format;
        self.additional_configs = additional_configs;
        self.output_dir = Some(output_dir.to_path_buf());
    }

    /// Run the recovery synchronously, writing results into the output directory
    pub fn run(&self) -> EngineResult<RecoveryStats> {
        let documentation = self.documentation.as_deref().ok_or(EngineError::NotConfigured)?;
        let model = self.model.as_deref().ok_or(EngineError::NotConfigured)?;
        let code = self.code.as_deref().ok_or(EngineError::NotConfigured)?;
        let output_dir = self.output_dir.as_deref().ok_or(EngineError::NotConfigured)?;

        println!("   Documentation: {}", documentation.display());
        println!("   Model: {} ({} format)", model.display(), self.model_format);
        println!("   Code: {}", code.display());

        let sentences = lexical::split_sentences(&read_input(documentation)?);
        let elements = lexical::parse_model(&read_input(model)?);
        let files = lexical::collect_code_files(code)?;
        let to_sentences = lexical::match_elements_to_sentences(&elements, &sentences);
        let to_files = lexical::match_elements_to_files(&elements, &files);

        let mut links = Vec::new();
        for (sentence_numbers, file_indices) in to_sentences.iter().zip(&to_files) {
            for number in sentence_numbers {
                for &index in file_indices {
                    links.push(TraceLink::new(
                        format!("sentence {}", number),
                        files[index].display().to_string(),
                    ));
                }
            }
        }
        // Two elements can induce the same sentence/file pair
        links.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));
        links.dedup();

        output::write_trace_links_csv(
            output_dir,
            &format!("traceLinks_sad-code_{}.csv", self.project_name),
            ("sentence", "code_file"),
            &links,
            &self.additional_configs,
        )?;
        output::write_trace_links_txt(
            output_dir,
            &format!("traceLinks_sad-code_{}.txt", self.project_name),
            &links,
        )?;

        Ok(RecoveryStats {
            trace_links: links.len(),
            inconsistencies: 0,
        })
    }
}
