// mod.rs - Result writers for recovered trace links

use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::engine::TraceLink;
use crate::errors::{EngineError, EngineResult};

/// The command line of the current process, reproduced in output headers
pub fn current_command_line() -> String {
    std::env::args().collect::<Vec<String>>().join(" ")
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> EngineResult<()> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent).map_err(|e| EngineError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> EngineError + '_ {
    move |e| EngineError::Write {
        path: path.to_path_buf(),
        source: e,
    }
}

/// Write recovered trace links as CSV with provenance headers
pub fn write_trace_links_csv(
    output_dir: &Path,
    file_name: &str,
    columns: (&str, &str),
    links: &[TraceLink],
    additional_configs: &BTreeMap<String, String>,
) -> EngineResult<PathBuf> {
    let file_path = output_dir.join(file_name);
    ensure_parent_dir(&file_path)?;
    let file = File::create(&file_path).map_err(write_error(&file_path))?;
    let mut writer = BufWriter::new(file);

    // Write command header
    writeln!(writer, "# Command: {}", current_command_line()).map_err(write_error(&file_path))?;
    writeln!(
        writer,
        "# Generated: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
    .map_err(write_error(&file_path))?;
    writeln!(writer, "# archtrace v{}", env!("CARGO_PKG_VERSION")).map_err(write_error(&file_path))?;
    for (key, value) in additional_configs {
        writeln!(writer, "# Config {}: {}", key, value).map_err(write_error(&file_path))?;
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record([columns.0, columns.1])
        .map_err(|e| EngineError::Csv {
            path: file_path.clone(),
            source: e,
        })?;
    for link in links {
        csv_writer
            .write_record([link.source.as_str(), link.target.as_str()])
            .map_err(|e| EngineError::Csv {
                path: file_path.clone(),
                source: e,
            })?;
    }
    csv_writer.flush().map_err(write_error(&file_path))?;

    println!("✅ Trace links written to: {}", file_path.display());
    Ok(file_path)
}

/// Write the intermediate human-readable link listing. These files are
/// purged by the dispatcher after all tasks have run.
pub fn write_trace_links_txt(
    output_dir: &Path,
    file_name: &str,
    links: &[TraceLink],
) -> EngineResult<PathBuf> {
    let file_path = output_dir.join(file_name);
    ensure_parent_dir(&file_path)?;
    let file = File::create(&file_path).map_err(write_error(&file_path))?;
    let mut writer = BufWriter::new(file);

    for link in links {
        writeln!(writer, "{} -> {}", link.source, link.target).map_err(write_error(&file_path))?;
    }
    writer.flush().map_err(write_error(&file_path))?;
    Ok(file_path)
}

/// Write detected inconsistencies, one finding per line. Purged by the
/// dispatcher after all tasks have run.
pub fn write_inconsistencies_txt(
    output_dir: &Path,
    file_name: &str,
    findings: &[String],
) -> EngineResult<PathBuf> {
    let file_path = output_dir.join(file_name);
    ensure_parent_dir(&file_path)?;
    let file = File::create(&file_path).map_err(write_error(&file_path))?;
    let mut writer = BufWriter::new(file);

    for finding in findings {
        writeln!(writer, "{}", finding).map_err(write_error(&file_path))?;
    }
    writer.flush().map_err(write_error(&file_path))?;
    Ok(file_path)
}
