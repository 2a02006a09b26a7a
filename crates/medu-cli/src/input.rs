//! Collecting raw entries from JSON files on disk.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde_json::Value;
use walkdir::WalkDir;

use medu_adapt::type_name;

/// Expand `paths` into JSON files: files are kept as given, directories are
/// searched recursively for `*.json` in file-name order.
pub fn collect_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.with_context(|| format!("walking {}", path.display()))?;
                if entry.file_type().is_file() && is_json(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            bail!("no such file or directory: {}", path.display());
        }
    }
    Ok(files)
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Raw entries of every file, in order. A file holds one entry object or an
/// array of them.
pub fn read_raw_entries(paths: &[PathBuf]) -> anyhow::Result<Vec<Value>> {
    let mut entries = Vec::new();
    for file in collect_files(paths)? {
        let text = std::fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", file.display()))?;
        match value {
            Value::Array(items) => entries.extend(items),
            Value::Object(_) => entries.push(value),
            other => bail!(
                "{}: expected an entry object or an array of entries, got {}",
                file.display(),
                type_name(&other)
            ),
        }
        tracing::debug!(file = %file.display(), total = entries.len(), "read content file");
    }
    Ok(entries)
}
