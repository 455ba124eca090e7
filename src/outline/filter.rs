//! Candidate filtering: which runs may be headings at all.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Candidate, Document, FontSize, TextRun};

/// Shortest trimmed text, in characters, that can be a heading.
const MIN_HEADING_CHARS: usize = 3;

/// Rejects page numbers, table-of-contents markers and near-empty text.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    page_number_regex: Regex,
    toc_marker_regex: Regex,
}

impl CandidateFilter {
    /// Create a filter with the standard rejection rules.
    pub fn new() -> Self {
        Self {
            page_number_regex: Regex::new(r"^\d+$").unwrap(),
            toc_marker_regex: Regex::new(r"(?i)^table of contents").unwrap(),
        }
    }

    /// Decide on already-trimmed text.
    pub fn accepts(&self, trimmed: &str) -> bool {
        if trimmed.chars().count() < MIN_HEADING_CHARS {
            return false;
        }
        if self.page_number_regex.is_match(trimmed) {
            return false;
        }
        !self.toc_marker_regex.is_match(trimmed)
    }
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn shared_filter() -> &'static CandidateFilter {
    static FILTER: OnceLock<CandidateFilter> = OnceLock::new();
    FILTER.get_or_init(CandidateFilter::new)
}

/// Whether a run is eligible to be a heading.
pub fn is_heading_candidate(run: &TextRun) -> bool {
    shared_filter().accepts(run.text.trim())
}

/// Filter every run of the document, in page then layout order.
///
/// Runs that break the reader contract fail the whole document.
pub fn extract_candidates(doc: &Document) -> Result<Vec<Candidate>> {
    let filter = shared_filter();
    let mut candidates = Vec::new();

    for page in &doc.pages {
        for run in &page.runs {
            validate_run(run, page.number)?;

            let text = run.text.trim();
            if !filter.accepts(text) {
                continue;
            }

            candidates.push(Candidate {
                text: text.to_string(),
                font: run.font.clone(),
                size: FontSize::from_points(run.size),
                flags: run.flags,
                page: run.page,
                y: run.y,
            });
        }
    }

    log::debug!(
        "{} of {} runs are heading candidates",
        candidates.len(),
        doc.run_count()
    );

    Ok(candidates)
}

fn validate_run(run: &TextRun, page_number: u32) -> Result<()> {
    if !run.size.is_finite() || run.size <= 0.0 {
        return Err(Error::malformed_run(
            run.page,
            format!("font size must be positive, got {}", run.size),
        ));
    }
    if run.page == 0 {
        return Err(Error::malformed_run(0, "page numbers are 1-based"));
    }
    if run.page != page_number {
        return Err(Error::malformed_run(
            run.page,
            format!("run filed under page {}", page_number),
        ));
    }
    if !run.y.is_finite() {
        return Err(Error::malformed_run(run.page, "vertical position is not finite"));
    }
    Ok(())
}
