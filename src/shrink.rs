//! The shrink loop.
//!
//! Takes one oversized image and re-encodes it as JPEG at decreasing sizes
//! until the written file fits under the byte limit.
//!
//! ## Attempts
//!
//! ```text
//! attempt 1   source.png      → out/source-1.jpeg   long edge 2500
//! attempt 2   source-1.jpeg   → out/source-2.jpeg   long edge 2000   (source-1 removed)
//! attempt 3   source-2.jpeg   → out/source-3.jpeg   long edge 1500   (source-2 removed)
//! ...
//! ```
//!
//! Each attempt decodes the *previous attempt's output*, not the original.
//! The previous attempt is deleted by its exact path as soon as its
//! successor has been written, so at most one output per source remains.
//! Setting `output.keep_intermediate` keeps every attempt.
//!
//! ## Termination
//!
//! The loop stops when:
//! - an attempt fits under the limit → [`ShrinkOutcome::Fitted`]
//! - the next long edge would drop below `resize.min_long_edge`, or
//!   `resize.max_attempts` is reached → [`ShrinkOutcome::NotConverged`],
//!   keeping the last (smallest) attempt
//! - the backend fails → [`ShrinkError`]; files written by this run are
//!   removed so a later run retries the image

use crate::config::ShrinkConfig;
use crate::imaging::{BackendError, ImageBackend, next_long_edge, resize_to_long_edge};
use crate::naming::output_file_name;
use crate::scan::EntryStatus;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShrinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Source has no file name: {0}")]
    NoFileName(PathBuf),
    #[error("Invalid target long edge: {0}px")]
    InvalidTarget(u32),
}

/// The attempt a shrink ended on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalAttempt {
    /// Output file kept on disk.
    pub path: PathBuf,
    /// 1-based attempt sequence.
    pub attempt: u32,
    /// Requested long edge.
    pub long_edge: u32,
    /// Written dimensions (width, height).
    pub dimensions: (u32, u32),
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShrinkOutcome {
    /// The output fits under the limit.
    Fitted(FinalAttempt),
    /// The floor or attempt ceiling was hit first; the output is still over the limit.
    NotConverged(FinalAttempt),
}

impl ShrinkOutcome {
    pub fn final_attempt(&self) -> &FinalAttempt {
        match self {
            ShrinkOutcome::Fitted(a) | ShrinkOutcome::NotConverged(a) => a,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self, ShrinkOutcome::Fitted(_))
    }
}

/// Progress events, sent to the CLI printer as work happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShrinkEvent {
    /// A scanned file was left alone.
    Skipped {
        file_name: String,
        size_bytes: u64,
        status: EntryStatus,
    },
    /// An oversized file entered the shrink loop.
    Started { file_name: String, size_bytes: u64 },
    AttemptWritten {
        file_name: String,
        attempt: u32,
        long_edge: u32,
        dimensions: (u32, u32),
        size_bytes: u64,
        over_limit: bool,
    },
    /// A superseded attempt was deleted.
    AttemptRemoved { file_name: String, path: PathBuf },
    RemoveFailed {
        file_name: String,
        path: PathBuf,
        error: String,
    },
    Finished {
        file_name: String,
        outcome: ShrinkOutcome,
    },
    Failed { file_name: String, error: String },
}

pub(crate) fn emit(events: Option<&Sender<ShrinkEvent>>, event: ShrinkEvent) {
    if let Some(tx) = events {
        // Printer gone means nobody is listening; the work itself continues.
        let _ = tx.send(event);
    }
}

/// Shrink `source` into `output_dir`, starting at `target_long_edge`.
pub fn shrink(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    target_long_edge: u32,
    config: &ShrinkConfig,
    events: Option<&Sender<ShrinkEvent>>,
) -> Result<ShrinkOutcome, ShrinkError> {
    if target_long_edge == 0 {
        return Err(ShrinkError::InvalidTarget(target_long_edge));
    }
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ShrinkError::NoFileName(source.to_path_buf()))?;

    let limit = config.limit_bytes();
    let quality = config.quality();
    let keep_intermediate = config.output.keep_intermediate;

    let mut current_source = source.to_path_buf();
    let mut previous: Option<PathBuf> = None;
    let mut long_edge = target_long_edge;
    let mut attempt = 1;

    loop {
        let output = output_dir.join(output_file_name(&file_name, attempt));

        let written = resize_to_long_edge(backend, &current_source, &output, long_edge, quality)
            .map_err(ShrinkError::from)
            .and_then(|dims| Ok((dims, fs::metadata(&output)?.len())));
        let (dimensions, size_bytes) = match written {
            Ok(w) => w,
            Err(e) => {
                discard_failed_run(
                    &file_name,
                    &output,
                    previous.filter(|_| !keep_intermediate),
                    events,
                );
                return Err(e);
            }
        };

        let over_limit = size_bytes > limit;
        emit(
            events,
            ShrinkEvent::AttemptWritten {
                file_name: file_name.clone(),
                attempt,
                long_edge,
                dimensions,
                size_bytes,
                over_limit,
            },
        );

        if let Some(superseded) = previous.take() {
            if !keep_intermediate {
                remove_superseded(&file_name, superseded, events);
            }
        }

        let result = FinalAttempt {
            path: output.clone(),
            attempt,
            long_edge,
            dimensions,
            size_bytes,
        };
        if !over_limit {
            return Ok(ShrinkOutcome::Fitted(result));
        }

        let next = if attempt < config.resize.max_attempts {
            next_long_edge(long_edge, config.resize.step, config.resize.min_long_edge)
        } else {
            None
        };
        match next {
            Some(next) => {
                previous = Some(output.clone());
                current_source = output;
                long_edge = next;
                attempt += 1;
            }
            None => return Ok(ShrinkOutcome::NotConverged(result)),
        }
    }
}

fn remove_superseded(file_name: &str, path: PathBuf, events: Option<&Sender<ShrinkEvent>>) {
    let file_name = file_name.to_string();
    match fs::remove_file(&path) {
        Ok(()) => emit(events, ShrinkEvent::AttemptRemoved { file_name, path }),
        Err(e) => report_remove_failure(file_name, path, e, events),
    }
}

/// Remove what a failed run left behind: the (possibly partial) failed
/// attempt, and the last good attempt when one is passed in.
fn discard_failed_run(
    file_name: &str,
    failed: &Path,
    previous: Option<PathBuf>,
    events: Option<&Sender<ShrinkEvent>>,
) {
    let leftovers = Some(failed.to_path_buf())
        .filter(|p| p.exists())
        .into_iter()
        .chain(previous);
    for path in leftovers {
        if let Err(e) = fs::remove_file(&path) {
            report_remove_failure(file_name.to_string(), path, e, events);
        }
    }
}

fn report_remove_failure(
    file_name: String,
    path: PathBuf,
    error: std::io::Error,
    events: Option<&Sender<ShrinkEvent>>,
) {
    emit(
        events,
        ShrinkEvent::RemoveFailed {
            file_name,
            path,
            error: error.to_string(),
        },
    );
}
