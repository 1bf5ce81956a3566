//! The merge pipeline
//!
//! A single forward pass over the placeholder document: for each marker, in
//! order, resolve `fragments_dir/<key>.d.ts`, transform its lines, and append
//! them to the output. The output is joined with `\n` and written once at the
//! end. A missing fragment is diagnosed on stderr and skipped; an unreadable
//! placeholder or an unwritable output aborts the whole operation.

use crate::fragment;
use crate::marker::collect_markers;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension appended to a fragment key when resolving its file
const FRAGMENT_EXTENSION: &str = ".d.ts";

/// Fatal errors for merge operations
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Failed to read placeholder document {path}: {source}")]
    PlaceholderRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output document {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Summary of one merge run
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Number of markers found in the placeholder document
    pub markers: usize,
    /// Number of fragments successfully merged
    pub merged: usize,
    /// Resolved paths that could not be read, in marker order
    pub missing: Vec<PathBuf>,
    /// Number of lines written to the output document
    pub lines_written: usize,
    /// Where the output document was written
    pub output: PathBuf,
}

impl MergeReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_human(&self) -> String {
        let mut out = format!(
            "Merged {} of {} fragments ({} lines) -> {}",
            self.merged,
            self.markers,
            self.lines_written,
            self.output.display()
        );
        if !self.missing.is_empty() {
            out.push_str("\nMissing fragments:");
            for path in &self.missing {
                out.push_str(&format!("\n  {}", path.display()));
            }
        }
        out
    }
}

/// One marker's resolution status, as produced by [`check`]
#[derive(Debug, Clone, Serialize)]
pub struct CheckEntry {
    pub key: String,
    pub path: PathBuf,
    pub found: bool,
}

/// Summary of a resolution-only pass over the placeholder document
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub entries: Vec<CheckEntry>,
}

impl CheckReport {
    pub fn missing_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.found).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_human(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{} -> {} ({})",
                    e.key,
                    e.path.display(),
                    if e.found { "ok" } else { "MISSING" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Resolve a fragment key to its file under the fragment directory
pub fn fragment_path(fragments_dir: &Path, key: &str) -> PathBuf {
    fragments_dir.join(format!("{}{}", key, FRAGMENT_EXTENSION))
}

/// Assemble the output document from the placeholder and fragment files.
///
/// Idempotent: unchanged inputs produce byte-identical output. The only side
/// effects are the single write to `output` and stderr diagnostics for
/// fragments that could not be read.
pub fn merge(
    placeholder: &Path,
    fragments_dir: &Path,
    output: &Path,
) -> Result<MergeReport, MergeError> {
    let contents = fs::read_to_string(placeholder).map_err(|source| {
        MergeError::PlaceholderRead {
            path: placeholder.to_path_buf(),
            source,
        }
    })?;

    let markers = collect_markers(&contents);
    let mut lines: Vec<String> = Vec::new();
    let mut missing: Vec<PathBuf> = Vec::new();

    for key in &markers {
        let path = fragment_path(fragments_dir, key);
        match fs::read_to_string(&path) {
            Ok(fragment_contents) => {
                lines.extend(
                    fragment::transform(&fragment_contents)
                        .into_iter()
                        .map(String::from),
                );
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                eprintln!("Missing fragment file: {}", path.display());
                missing.push(path);
            }
            Err(e) => {
                eprintln!("Failed to read fragment {}: {}", path.display(), e);
                missing.push(path);
            }
        }
    }

    let merged = markers.len() - missing.len();
    let report = MergeReport {
        markers: markers.len(),
        merged,
        missing,
        lines_written: lines.len(),
        output: output.to_path_buf(),
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| MergeError::OutputWrite {
                path: output.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(output, lines.join("\n")).map_err(|source| MergeError::OutputWrite {
        path: output.to_path_buf(),
        source,
    })?;

    Ok(report)
}

/// Resolve every marker without reading fragment bodies or writing output.
pub fn check(placeholder: &Path, fragments_dir: &Path) -> Result<CheckReport, MergeError> {
    let contents = fs::read_to_string(placeholder).map_err(|source| {
        MergeError::PlaceholderRead {
            path: placeholder.to_path_buf(),
            source,
        }
    })?;

    let entries = collect_markers(&contents)
        .into_iter()
        .map(|key| {
            let path = fragment_path(fragments_dir, &key);
            let found = path.is_file();
            CheckEntry { key, path, found }
        })
        .collect();

    Ok(CheckReport { entries })
}
