//! Directory batch processing.
//!
//! Every PDF in an input directory becomes one JSON file in the output
//! directory. A failing document is reported and skipped; it never stops the
//! rest of the batch.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::model::DocumentResult;
use crate::outline::{OutlineExtractor, OutlineOptions};
use crate::parser::{ParseOptions, PdfReader};
use crate::render::{write_json, JsonFormat};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process documents in parallel
    pub parallel: bool,

    /// Output JSON layout
    pub json_format: JsonFormat,

    /// Reader options applied to every document
    pub parse: ParseOptions,

    /// Outline options applied to every document
    pub outline: OutlineOptions,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Set reader options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set outline options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline = options;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            json_format: JsonFormat::Pretty,
            parse: ParseOptions::default(),
            outline: OutlineOptions::default(),
        }
    }
}

/// Receives progress events from [`run_batch`].
///
/// Calls may arrive from several worker threads at once.
pub trait BatchReporter: Send + Sync {
    /// Called once before any document is processed.
    fn on_start(&self, _total: usize) {}

    /// Called after a document's JSON has been written.
    fn on_success(&self, _input: &Path, _output: &Path, _result: &DocumentResult) {}

    /// Called when a document could not be processed.
    fn on_failure(&self, _input: &Path, _error: &Error) {}

    /// Called once after every document has been processed.
    fn on_finish(&self, _summary: &BatchSummary) {}
}

/// Reporter that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl BatchReporter for NoopReporter {}

/// Reporter that forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl BatchReporter for LogReporter {
    fn on_start(&self, total: usize) {
        log::info!("Processing {} PDF files", total);
    }

    fn on_success(&self, input: &Path, output: &Path, result: &DocumentResult) {
        log::info!(
            "Processed {} -> {} ({} headings)",
            input.display(),
            output.display(),
            result.outline.len()
        );
    }

    fn on_failure(&self, input: &Path, error: &Error) {
        log::error!("Failed {}: {}", input.display(), error);
    }

    fn on_finish(&self, summary: &BatchSummary) {
        log::info!(
            "Batch finished: {} succeeded, {} failed",
            summary.succeeded.len(),
            summary.failed.len()
        );
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of PDF files attempted
    pub processed: usize,
    /// Inputs whose JSON was written
    pub succeeded: Vec<PathBuf>,
    /// Inputs that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    /// Whether every document succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Output path for an input file: its stem plus `.json`, inside `output_dir`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut name = stem.to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// List the PDF files directly inside `dir`, sorted by file name.
pub fn collect_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// One input scheduled for a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    /// PDF to read
    pub input: PathBuf,
    /// JSON file to write
    pub output: PathBuf,
    /// Earlier input that already writes `output`, if any
    pub claimed_by: Option<PathBuf>,
}

/// Pair every input with its output path, in input order.
///
/// Only the first input mapping to a given output is left unclaimed; later
/// ones record that input in `claimed_by` and are never processed.
pub fn plan_jobs(files: &[PathBuf], output_dir: &Path) -> Vec<BatchJob> {
    let mut owners: HashMap<PathBuf, PathBuf> = HashMap::new();
    files
        .iter()
        .map(|input| {
            let output = output_path_for(input, output_dir);
            let claimed_by = owners.get(&output).cloned();
            if claimed_by.is_none() {
                owners.insert(output.clone(), input.clone());
            }
            BatchJob {
                input: input.clone(),
                output,
                claimed_by,
            }
        })
        .collect()
}

/// Read, extract and write a single document.
pub fn process_file(input: &Path, output: &Path, options: &BatchOptions) -> Result<DocumentResult> {
    let document = PdfReader::open_with_options(input, options.parse.clone())?.read()?;
    let result = OutlineExtractor::new(options.outline.clone()).extract(&document)?;
    write_json(&result, output, options.json_format)?;
    Ok(result)
}

/// Process every PDF in `input_dir`, writing one JSON file per document.
///
/// Fails only if `input_dir` cannot be listed or `output_dir` cannot be
/// created; per-document failures are reported and recorded in the summary.
pub fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    reporter: &dyn BatchReporter,
) -> Result<BatchSummary> {
    fs::create_dir_all(output_dir)?;
    let files = collect_pdf_files(input_dir)?;
    reporter.on_start(files.len());
    let jobs = plan_jobs(&files, output_dir);

    let process = |job: &BatchJob| -> (PathBuf, Result<()>) {
        let outcome = match &job.claimed_by {
            Some(first) => Err(Error::OutputCollision {
                output: job.output.clone(),
                first: first.clone(),
            }),
            None => process_file(&job.input, &job.output, options)
                .map(|result| reporter.on_success(&job.input, &job.output, &result)),
        };
        if let Err(e) = &outcome {
            reporter.on_failure(&job.input, e);
        }
        (job.input.clone(), outcome)
    };

    let outcomes: Vec<(PathBuf, Result<()>)> = if options.parallel {
        jobs.par_iter().map(process).collect()
    } else {
        jobs.iter().map(process).collect()
    };

    let mut summary = BatchSummary {
        processed: outcomes.len(),
        ..BatchSummary::default()
    };
    for (input, outcome) in outcomes {
        match outcome {
            Ok(()) => summary.succeeded.push(input),
            Err(e) => summary.failed.push((input, e.to_string())),
        }
    }

    reporter.on_finish(&summary);
    Ok(summary)
}
