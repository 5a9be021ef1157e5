//! Folder scanning and the batch driver.
//!
//! [`scan`] classifies every file in the source directory without touching
//! the output directory. [`run`] scans, then feeds each candidate through the
//! [shrink loop](crate::shrink) one file at a time.
//!
//! ## Classification
//!
//! The source directory is listed non-recursively in sorted order. Hidden
//! entries (leading `.`), directories and `config.toml` are ignored. Every
//! other file gets one [`EntryStatus`], checked in this order:
//!
//! 1. **UnderLimit**: size is at or below the limit; nothing to do
//! 2. **Unsupported**: no decoder for the extension
//! 3. **AlreadyShrunk**: an output `<base>-<n>.jpeg` exists for it
//! 4. **Candidate**: everything else
//!
//! The existence check is a plain idempotence guard. It does not compare
//! content, so delete the output to force a file to be shrunk again.
//!
//! ## Errors
//!
//! Only setup problems (unreadable source, output directory that cannot be
//! created) fail a run. A file that fails to shrink is reported through a
//! [`ShrinkEvent::Failed`] event and counted; the run moves on to the next file.

use crate::config::{CONFIG_FILENAME, ShrinkConfig};
use crate::imaging::{ImageBackend, is_supported};
use crate::naming::{base_name, parse_output_name};
use crate::shrink::{ShrinkEvent, ShrinkOutcome, emit, shrink};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// What the scan decided for a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryStatus {
    /// Over the limit with no existing output: will be shrunk.
    Candidate,
    UnderLimit,
    /// Output already exists at `existing`.
    AlreadyShrunk { existing: PathBuf },
    Unsupported,
}

/// A file found in the source directory.
#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub status: EntryStatus,
}

/// Result of scanning a source directory.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub limit_bytes: u64,
    pub entries: Vec<ScanEntry>,
}

impl ScanReport {
    pub fn candidates(&self) -> impl Iterator<Item = &ScanEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Candidate)
    }
}

/// Classify every file in `source` against the limit and existing outputs.
pub fn scan(
    source: &Path,
    output_dir: &Path,
    config: &ShrinkConfig,
) -> Result<ScanReport, ScanError> {
    if !source.is_dir() {
        return Err(ScanError::NotADirectory(source.to_path_buf()));
    }
    let limit = config.limit_bytes();
    let existing = existing_outputs(output_dir)?;

    let mut entries = Vec::new();
    for path in collect_files(source)? {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size_bytes = fs::metadata(&path)?.len();

        let status = if size_bytes <= limit {
            EntryStatus::UnderLimit
        } else if !is_supported(&path) {
            EntryStatus::Unsupported
        } else if let Some(found) = existing.get(base_name(&file_name)) {
            EntryStatus::AlreadyShrunk {
                existing: output_dir.join(found),
            }
        } else {
            EntryStatus::Candidate
        };

        entries.push(ScanEntry {
            file_name,
            path,
            size_bytes,
            status,
        });
    }

    Ok(ScanReport {
        source: source.to_path_buf(),
        output: output_dir.to_path_buf(),
        limit_bytes: limit,
        entries,
    })
}

/// Regular, non-hidden files in `dir`, sorted by path.
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            !name.is_empty() && !name.starts_with('.') && name != CONFIG_FILENAME && p.is_file()
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Map of base name → output file name with the highest attempt number.
fn existing_outputs(output_dir: &Path) -> Result<BTreeMap<String, String>, ScanError> {
    let mut found: BTreeMap<String, (u32, String)> = BTreeMap::new();
    if !output_dir.is_dir() {
        return Ok(BTreeMap::new());
    }
    for entry in fs::read_dir(output_dir)?.filter_map(|e| e.ok()) {
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(parsed) = parse_output_name(&name) else {
            continue;
        };
        let slot = found.entry(parsed.base).or_insert((0, String::new()));
        if parsed.attempt >= slot.0 {
            *slot = (parsed.attempt, name);
        }
    }
    Ok(found
        .into_iter()
        .map(|(base, (_, name))| (base, name))
        .collect())
}

/// Tally of a run, one counter per way a file can end up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub fitted: u32,
    pub not_converged: u32,
    pub failed: u32,
    pub under_limit: u32,
    pub already_shrunk: u32,
    pub unsupported: u32,
}

impl RunStats {
    fn record_skip(&mut self, status: &EntryStatus) {
        match status {
            EntryStatus::UnderLimit => self.under_limit += 1,
            EntryStatus::AlreadyShrunk { .. } => self.already_shrunk += 1,
            EntryStatus::Unsupported => self.unsupported += 1,
            EntryStatus::Candidate => {}
        }
    }

    fn record_outcome(&mut self, outcome: &ShrinkOutcome) {
        match outcome {
            ShrinkOutcome::Fitted(_) => self.fitted += 1,
            ShrinkOutcome::NotConverged(_) => self.not_converged += 1,
        }
    }

    pub fn skipped(&self) -> u32 {
        self.under_limit + self.already_shrunk + self.unsupported
    }

    pub fn total(&self) -> u32 {
        self.fitted + self.not_converged + self.failed + self.skipped()
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shrunk", self.fitted)?;
        if self.not_converged > 0 {
            write!(f, ", {} still over limit", self.not_converged)?;
        }
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        write!(f, ", {} skipped ({} total)", self.skipped(), self.total())
    }
}

/// Result of a full run.
#[derive(Debug)]
pub struct RunResult {
    pub stats: RunStats,
    /// Shrink outcome per source file name.
    pub outcomes: BTreeMap<String, ShrinkOutcome>,
}

/// Scan `source` and shrink every candidate into `output_dir`.
///
/// Files are handled one at a time in sorted order. The output directory is
/// created if absent. A candidate whose base name already produced an output
/// earlier in the run (`a.jpg` then `a.png`) is skipped as already shrunk. Progress is sent to `events` when given; the sender is
/// dropped on return, which ends the receiving printer loop.
pub fn run(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    config: &ShrinkConfig,
    events: Option<Sender<ShrinkEvent>>,
) -> Result<RunResult, ScanError> {
    let report = scan(source, output_dir, config)?;
    fs::create_dir_all(output_dir)?;

    let events = events.as_ref();
    let mut stats = RunStats::default();
    let mut outcomes = BTreeMap::new();
    // Base name -> output kept for it during this run.
    let mut claimed: BTreeMap<String, PathBuf> = BTreeMap::new();

    for entry in report.entries {
        let status = match claimed.get(base_name(&entry.file_name)) {
            Some(existing) if entry.status == EntryStatus::Candidate => {
                EntryStatus::AlreadyShrunk {
                    existing: existing.clone(),
                }
            }
            _ => entry.status,
        };
        if status != EntryStatus::Candidate {
            stats.record_skip(&status);
            emit(
                events,
                ShrinkEvent::Skipped {
                    file_name: entry.file_name,
                    size_bytes: entry.size_bytes,
                    status,
                },
            );
            continue;
        }

        emit(
            events,
            ShrinkEvent::Started {
                file_name: entry.file_name.clone(),
                size_bytes: entry.size_bytes,
            },
        );
        match shrink(
            backend,
            &entry.path,
            output_dir,
            config.resize.initial_long_edge,
            config,
            events,
        ) {
            Ok(outcome) => {
                stats.record_outcome(&outcome);
                claimed.insert(
                    base_name(&entry.file_name).to_string(),
                    outcome.final_attempt().path.clone(),
                );
                emit(
                    events,
                    ShrinkEvent::Finished {
                        file_name: entry.file_name.clone(),
                        outcome: outcome.clone(),
                    },
                );
                outcomes.insert(entry.file_name, outcome);
            }
            Err(e) => {
                stats.failed += 1;
                emit(
                    events,
                    ShrinkEvent::Failed {
                        file_name: entry.file_name,
                        error: e.to_string(),
                    },
                );
            }
        }
    }

    Ok(RunResult { stats, outcomes })
}
