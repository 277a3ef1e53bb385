// cleanup.rs - Purge transient analysis artifacts from the output directory

use std::path::Path;

use regex::Regex;

/// File name patterns of intermediate artifacts, matched against the whole name
const TRANSIENT_PATTERNS: [&str; 2] = [
    r"^inconsistencyDetection_.*\.txt$",
    r"^traceLinks_.*\.txt$",
];

/// Delete transient files from the output directory, returning how many were
/// removed. Failures are reported as warnings and never abort the run.
pub fn purge_transient_files(output_dir: &Path) -> usize {
    let patterns: Vec<Regex> = TRANSIENT_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("transient patterns are valid"))
        .collect();

    let entries = match std::fs::read_dir(output_dir) {
        Ok(entries) => entries,
        Err(e) => {
            println!(
                "⚠️  Could not scan output directory {}: {}",
                output_dir.display(),
                e
            );
            return 0;
        }
    };

    let mut deleted = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if patterns.iter().any(|pattern| pattern.is_match(name)) {
            match std::fs::remove_file(&path) {
                Ok(()) => deleted += 1,
                Err(e) => println!("⚠️  Could not delete {}: {}", path.display(), e),
            }
        }
    }
    deleted
}
