// lexical.rs - Identifier normalization and lexical artifact matching

use std::path::{Path, PathBuf};

use crate::errors::{EngineError, EngineResult};

/// One element parsed from an architecture model file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelElement {
    /// Element kind as written in the model, e.g. "Component"
    pub kind: Option<String>,
    pub name: String,
}

fn flush_part(parts: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        parts.push(current.to_lowercase());
        current.clear();
    }
}

/// Split an identifier into lowercase parts at case, digit, and separator
/// boundaries. "TeaStoreWebUI" and "tea_store_web_ui" both yield
/// ["tea", "store", "web", "ui"].
pub fn split_identifier(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();

    for i in 0..chars.len() {
        let c = chars[i];
        if !c.is_alphanumeric() {
            flush_part(&mut parts, &mut current);
            continue;
        }
        if !current.is_empty() {
            // current is non-empty, so chars[i - 1] was alphanumeric
            let prev = chars[i - 1];
            let camel = prev.is_lowercase() && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && chars.get(i + 1).map_or(false, |next| next.is_lowercase());
            let digit_edge = prev.is_ascii_digit() != c.is_ascii_digit();
            if camel || acronym_end || digit_edge {
                flush_part(&mut parts, &mut current);
            }
        }
        current.push(c);
    }
    flush_part(&mut parts, &mut current);
    parts
}

/// True when the element's normalized parts appear contiguously in the
/// token stream, in either split or compound spelling
pub fn mentions(tokens: &[String], element_parts: &[String]) -> bool {
    if element_parts.is_empty() || tokens.is_empty() {
        return false;
    }
    let compact = element_parts.concat();
    (1..=tokens.len()).any(|size| tokens.windows(size).any(|window| window.concat() == compact))
}

/// Split documentation text into sentences (numbered from 1 by callers)
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        } else {
            current.push(c);
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    sentences
}

/// Parse a model file: one element per line as "Kind Name" or
/// bare "Name"; '#' comments and blank lines are ignored
pub fn parse_model(content: &str) -> Vec<ModelElement> {
    let mut elements = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once(char::is_whitespace) {
            Some((kind, name)) if !name.trim().is_empty() => elements.push(ModelElement {
                kind: Some(kind.to_string()),
                name: name.trim().to_string(),
            }),
            _ => elements.push(ModelElement {
                kind: None,
                name: line.to_string(),
            }),
        }
    }
    elements
}

/// Collect code files from a path: a single file as-is, a directory
/// recursively in sorted order. Hidden entries are skipped.
pub fn collect_code_files(path: &Path) -> EngineResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    if path.is_file() {
        files.push(path.to_path_buf());
        return Ok(files);
    }

    let entries = std::fs::read_dir(path).map_err(|e| EngineError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut children: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| EngineError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        children.push(entry.path());
    }
    children.sort();

    for child in children {
        let name = child.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with('.') {
            continue;
        }
        if child.is_dir() {
            files.extend(collect_code_files(&child)?);
        } else if child.is_file() {
            files.push(child);
        }
    }
    Ok(files)
}

/// For each element, the 1-based numbers of sentences mentioning it
pub fn match_elements_to_sentences(elements: &[ModelElement], sentences: &[String]) -> Vec<Vec<usize>> {
    let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| split_identifier(s)).collect();
    elements
        .iter()
        .map(|element| {
            let parts = split_identifier(&element.name);
            tokenized
                .iter()
                .enumerate()
                .filter(|(_, tokens)| mentions(tokens, &parts))
                .map(|(i, _)| i + 1)
                .collect()
        })
        .collect()
}

/// For each element, the indices of code files whose names match it
pub fn match_elements_to_files(elements: &[ModelElement], files: &[PathBuf]) -> Vec<Vec<usize>> {
    let stems: Vec<Vec<String>> = files
        .iter()
        .map(|file| split_identifier(file.file_stem().and_then(|s| s.to_str()).unwrap_or_default()))
        .collect();
    elements
        .iter()
        .map(|element| {
            let parts = split_identifier(&element.name);
            stems
                .iter()
                .enumerate()
                .filter(|(_, stem)| mentions(stem, &parts))
                .map(|(i, _)| i)
                .collect()
        })
        .collect()
}
