//! Multi-file batch processing.
//!
//! Files are independent: each one is loaded, scanned and written by a single
//! worker, and a failing file is recorded as skipped without affecting the rest.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::{ListingType, ParseOptions};
use crate::error::{ParserError, Result};
use crate::hansard::parse_hansard_with_cancel;
use crate::inquiry::parse_inquiry_with_cancel;
use crate::node::load_nodes;
use crate::output::{save_hansard, save_inquiries};
use crate::types::{Diagnostic, Meta};

/// Shared flag that aborts running scans between nodes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Scans in progress stop at the next node.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Settings shared by every file in a batch.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub listing: ListingType,
    pub output_dir: PathBuf,
    pub year: u16,
    pub session: u16,
    pub dun: String,
    pub parse: ParseOptions,
    /// Worker threads. `None` uses the available parallelism.
    pub jobs: Option<usize>,
}

/// A file that produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// An element no rule claimed, with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclaimedElement {
    pub path: PathBuf,
    pub diagnostic: Diagnostic,
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Every JSON document written, in input order.
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    /// Diagnostics across all files, in input order (only collected in debug mode).
    pub unclaimed: Vec<UnclaimedElement>,
}

/// Output of one successfully processed file.
#[derive(Debug, Clone, Default)]
pub struct FileOutcome {
    pub written: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Expand inputs to the list of files to parse.
///
/// Directories contribute their `*.json` entries in sorted order. Hidden files
/// (temp files from an interrupted write) are ignored.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|path| path.is_file() && is_json_document(path))
                .collect();
            entries.sort();
            files.extend(entries);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(ParserError::InputNotFound(input.clone()));
        }
    }

    Ok(files)
}

fn is_json_document(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'));
    !hidden && path.extension().is_some_and(|ext| ext == "json")
}

fn log_diagnostics(path: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        tracing::debug!(
            path = %path.display(),
            index = diagnostic.index,
            section = diagnostic.section.map(|section| section.as_str()),
            text = %diagnostic.text,
            "Skipping element"
        );
    }
}

/// Parse one file and write its records.
pub fn process_file(
    path: &Path,
    options: &BatchOptions,
    cancel: &CancelToken,
) -> Result<FileOutcome> {
    let nodes = load_nodes(path)?;
    let meta = Meta::new(
        path.display().to_string(),
        options.year,
        options.session,
        options.dun.clone(),
    );

    match options.listing {
        ListingType::Hansard => {
            let parsed = parse_hansard_with_cancel(&nodes, meta, options.parse, cancel)?;
            log_diagnostics(path, &parsed.diagnostics);

            let written = save_hansard(&parsed.record, path, &options.output_dir)?;
            tracing::info!(source = %path.display(), output = %written.display(), "Wrote hansard");

            Ok(FileOutcome {
                written: vec![written],
                diagnostics: parsed.diagnostics,
            })
        }
        ListingType::Inquiry => {
            let parsed = parse_inquiry_with_cancel(&nodes, meta, options.parse, cancel)?;
            log_diagnostics(path, &parsed.diagnostics);

            let written = save_inquiries(&parsed.records, path, &options.output_dir)?;
            tracing::info!(
                source = %path.display(),
                records = written.len(),
                "Wrote inquiries"
            );

            Ok(FileOutcome {
                written,
                diagnostics: parsed.diagnostics,
            })
        }
    }
}

/// Process `files` on a worker pool.
///
/// `on_file_done` is called once per file from the worker that handled it.
/// Per-file failures end up in [`BatchReport::skipped`]; only pool
/// construction can fail the batch as a whole.
pub fn run_batch<F>(
    files: &[PathBuf],
    options: &BatchOptions,
    cancel: &CancelToken,
    on_file_done: F,
) -> Result<BatchReport>
where
    F: Fn(&Path) + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.unwrap_or(0))
        .build()?;

    tracing::info!(
        files = files.len(),
        listing = options.listing.as_str(),
        threads = pool.current_num_threads(),
        "Starting batch"
    );

    let results: Vec<(&PathBuf, Result<FileOutcome>)> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                tracing::info!(path = %path.display(), "Parsing file");
                let result = process_file(path, options, cancel);
                on_file_done(path);
                (path, result)
            })
            .collect()
    });

    let mut report = BatchReport::default();
    for (path, result) in results {
        match result {
            Ok(outcome) => {
                report.written.extend(outcome.written);
                report.unclaimed.extend(outcome.diagnostics.into_iter().map(|diagnostic| {
                    UnclaimedElement {
                        path: path.clone(),
                        diagnostic,
                    }
                }));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping file");
                report.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}
