//! # downsize
//!
//! A batch tool that makes oversized images fit under a file-size limit.
//! Every image in a folder that is larger than the limit is resized and
//! re-encoded as JPEG, stepping the long edge down until the result fits.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan     images/          →  ScanReport       (classify every file)
//! 2. Shrink   each candidate   →  images/resized/  (<base>-<attempt>.jpeg)
//! ```
//!
//! Files are processed one at a time, and attempts within a file run in
//! sequence. Per-file failures are reported and skipped; only setup
//! problems stop a run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists the source directory, classifies files, drives the shrink loop |
//! | [`shrink`] | The shrink loop: resize, encode, measure, retry smaller |
//! | [`imaging`] | Pure-Rust image operations behind the [`imaging::ImageBackend`] trait |
//! | [`naming`] | `<base>-<attempt>.jpeg` output naming and parsing |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting for `check` and `run` |
//!
//! # Design Decisions
//!
//! ## Each attempt starts from the previous one
//!
//! Attempt `n + 1` decodes attempt `n`'s JPEG rather than the original. The
//! superseded attempt is deleted by the exact path the loop recorded when it
//! wrote it, so the output directory ends with one file per source.
//!
//! ## Bounded retries
//!
//! The long edge shrinks by a fixed step. The loop refuses to go below a
//! minimum long edge or past a maximum attempt count, and reports the image
//! as still over the limit instead of looping into degenerate sizes.
//!
//! ## Existence as the cache
//!
//! A source is skipped when any `<base>-<n>.jpeg` exists for it in the output
//! directory. There is no content hashing and no state file: delete an output
//! to redo its source.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod scan;
pub mod shrink;

#[cfg(test)]
pub(crate) mod test_helpers;
