//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Source: images → images/resized (limit 921.6 KB)
//! 001 beach.png (1.43 MB)
//!     Status: over limit, will shrink
//! 002 logo.png (120.0 KB)
//!     Status: under limit
//! 003 IMG_0042.jpg (2.10 MB)
//!     Status: already shrunk → IMG_0042-2.jpeg
//!
//! 1 to shrink, 2 skipped
//! ```
//!
//! ## Run
//!
//! ```text
//! beach.png (1.43 MB)
//!     attempt 1: 2500px → 2500x1667, 1.12 MB (over limit)
//!     attempt 2: 2000px → 2000x1333, 801.2 KB
//!     removed beach-1.jpeg
//!     done → beach-2.jpeg
//! logo.png: skipped (under limit)
//!
//! 1 shrunk, 1 skipped (2 total)
//! ```

use crate::scan::{EntryStatus, RunStats, ScanReport};
use crate::shrink::{ShrinkEvent, ShrinkOutcome};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte size in binary units (the unit the limit is set in).
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.2} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn status_text(status: &EntryStatus) -> String {
    match status {
        EntryStatus::Candidate => "over limit, will shrink".to_string(),
        EntryStatus::UnderLimit => "under limit".to_string(),
        EntryStatus::AlreadyShrunk { existing } => {
            format!("already shrunk \u{2192} {}", file_name_of(existing))
        }
        EntryStatus::Unsupported => "unsupported format".to_string(),
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the scan classification of every file.
pub fn format_scan_output(report: &ScanReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Source: {} \u{2192} {} (limit {})",
        report.source.display(),
        report.output.display(),
        format_size(report.limit_bytes)
    )];

    for (i, entry) in report.entries.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            entry.file_name,
            format_size(entry.size_bytes)
        ));
        lines.push(format!("{}Status: {}", indent(1), status_text(&entry.status)));
    }

    let to_shrink = report.candidates().count();
    lines.push(String::new());
    lines.push(format!(
        "{} to shrink, {} skipped",
        to_shrink,
        report.entries.len() - to_shrink
    ));
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(report: &ScanReport) {
    for line in format_scan_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Run
// ============================================================================

/// Format a single shrink progress event as display lines.
pub fn format_shrink_event(event: &ShrinkEvent) -> Vec<String> {
    match event {
        ShrinkEvent::Skipped {
            file_name, status, ..
        } => {
            vec![format!("{}: skipped ({})", file_name, status_text(status))]
        }
        ShrinkEvent::Started {
            file_name,
            size_bytes,
        } => vec![format!("{} ({})", file_name, format_size(*size_bytes))],
        ShrinkEvent::AttemptWritten {
            attempt,
            long_edge,
            dimensions,
            size_bytes,
            over_limit,
            ..
        } => {
            let mut line = format!(
                "{}attempt {}: {}px \u{2192} {}x{}, {}",
                indent(1),
                attempt,
                long_edge,
                dimensions.0,
                dimensions.1,
                format_size(*size_bytes)
            );
            if *over_limit {
                line.push_str(" (over limit)");
            }
            vec![line]
        }
        ShrinkEvent::AttemptRemoved { path, .. } => {
            vec![format!("{}removed {}", indent(1), file_name_of(path))]
        }
        ShrinkEvent::RemoveFailed { path, error, .. } => vec![format!(
            "{}could not remove {}: {}",
            indent(1),
            file_name_of(path),
            error
        )],
        ShrinkEvent::Finished { outcome, .. } => {
            let last = outcome.final_attempt();
            let name = file_name_of(&last.path);
            match outcome {
                ShrinkOutcome::Fitted(_) => {
                    vec![format!("{}done \u{2192} {}", indent(1), name)]
                }
                ShrinkOutcome::NotConverged(_) => vec![format!(
                    "{}could not shrink below limit after {} attempts, kept {} ({})",
                    indent(1),
                    last.attempt,
                    name,
                    format_size(last.size_bytes)
                )],
            }
        }
        ShrinkEvent::Failed { error, .. } => {
            vec![format!("{}failed: {}", indent(1), error)]
        }
    }
}

/// Format the closing summary of a run.
pub fn format_run_summary(stats: &RunStats) -> Vec<String> {
    vec![String::new(), stats.to_string()]
}

/// Print the run summary to stdout.
pub fn print_run_summary(stats: &RunStats) {
    for line in format_run_summary(stats) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanEntry;
    use crate::shrink::FinalAttempt;
    use std::path::PathBuf;

    fn final_attempt(name: &str, attempt: u32, size_bytes: u64) -> FinalAttempt {
        FinalAttempt {
            path: PathBuf::from("images/resized").join(name),
            attempt,
            long_edge: 2000,
            dimensions: (2000, 1333),
            size_bytes,
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(943_718), "921.6 KB");
        assert_eq!(format_size(1_500_000), "1.43 MB");
    }

    // =========================================================================
    // Check output
    // =========================================================================

    #[test]
    fn format_scan_lists_entries_with_status() {
        let report = ScanReport {
            source: PathBuf::from("images"),
            output: PathBuf::from("images/resized"),
            limit_bytes: 943_718,
            entries: vec![
                ScanEntry {
                    file_name: "beach.png".into(),
                    path: "images/beach.png".into(),
                    size_bytes: 1_500_000,
                    status: EntryStatus::Candidate,
                },
                ScanEntry {
                    file_name: "IMG_0042.jpg".into(),
                    path: "images/IMG_0042.jpg".into(),
                    size_bytes: 2048,
                    status: EntryStatus::AlreadyShrunk {
                        existing: "images/resized/IMG_0042-2.jpeg".into(),
                    },
                },
            ],
        };

        let lines = format_scan_output(&report);
        assert_eq!(
            lines[0],
            "Source: images \u{2192} images/resized (limit 921.6 KB)"
        );
        assert_eq!(lines[1], "001 beach.png (1.43 MB)");
        assert_eq!(lines[2], "    Status: over limit, will shrink");
        assert_eq!(lines[3], "002 IMG_0042.jpg (2.0 KB)");
        assert_eq!(
            lines[4],
            "    Status: already shrunk \u{2192} IMG_0042-2.jpeg"
        );
        assert_eq!(lines.last().unwrap(), "1 to shrink, 1 skipped");
    }

    // =========================================================================
    // Run events
    // =========================================================================

    #[test]
    fn format_attempt_over_limit() {
        let lines = format_shrink_event(&ShrinkEvent::AttemptWritten {
            file_name: "beach.png".into(),
            attempt: 1,
            long_edge: 2500,
            dimensions: (2500, 1667),
            size_bytes: 1_200_000,
            over_limit: true,
        });
        assert_eq!(
            lines,
            vec!["    attempt 1: 2500px \u{2192} 2500x1667, 1.14 MB (over limit)"]
        );
    }

    #[test]
    fn format_attempt_within_limit() {
        let lines = format_shrink_event(&ShrinkEvent::AttemptWritten {
            file_name: "beach.png".into(),
            attempt: 2,
            long_edge: 2000,
            dimensions: (2000, 1333),
            size_bytes: 820_000,
            over_limit: false,
        });
        assert_eq!(
            lines,
            vec!["    attempt 2: 2000px \u{2192} 2000x1333, 800.8 KB"]
        );
    }

    #[test]
    fn format_removed_shows_file_name_only() {
        let lines = format_shrink_event(&ShrinkEvent::AttemptRemoved {
            file_name: "beach.png".into(),
            path: "images/resized/beach-1.jpeg".into(),
        });
        assert_eq!(lines, vec!["    removed beach-1.jpeg"]);
    }

    #[test]
    fn format_finished_fitted() {
        let lines = format_shrink_event(&ShrinkEvent::Finished {
            file_name: "beach.png".into(),
            outcome: ShrinkOutcome::Fitted(final_attempt("beach-2.jpeg", 2, 800_000)),
        });
        assert_eq!(lines, vec!["    done \u{2192} beach-2.jpeg"]);
    }

    #[test]
    fn format_finished_not_converged() {
        let lines = format_shrink_event(&ShrinkEvent::Finished {
            file_name: "noise.tif".into(),
            outcome: ShrinkOutcome::NotConverged(final_attempt("noise-5.jpeg", 5, 1_048_576)),
        });
        assert_eq!(
            lines,
            vec!["    could not shrink below limit after 5 attempts, kept noise-5.jpeg (1.00 MB)"]
        );
    }

    #[test]
    fn format_skipped_and_failed() {
        let skipped = format_shrink_event(&ShrinkEvent::Skipped {
            file_name: "logo.png".into(),
            size_bytes: 1000,
            status: EntryStatus::UnderLimit,
        });
        assert_eq!(skipped, vec!["logo.png: skipped (under limit)"]);

        let failed = format_shrink_event(&ShrinkEvent::Failed {
            file_name: "broken.jpg".into(),
            error: "Image processing failed: bad data".into(),
        });
        assert_eq!(failed, vec!["    failed: Image processing failed: bad data"]);
    }

    #[test]
    fn format_summary_has_blank_separator() {
        let stats = RunStats {
            fitted: 2,
            ..Default::default()
        };
        assert_eq!(
            format_run_summary(&stats),
            vec!["".to_string(), "2 shrunk, 0 skipped (2 total)".to_string()]
        );
    }
}
