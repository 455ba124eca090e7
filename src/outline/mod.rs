//! Heading outline extraction.
//!
//! The pipeline runs once per document and keeps no state between calls:
//!
//! 1. [`extract_candidates`] filters the reader's runs down to possible headings.
//! 2. [`infer_levels`] clusters the most frequent candidate sizes into H1-H3.
//! 3. [`assemble_outline`] maps each candidate through that table, and
//!    [`select_title`] picks the title from page 1.

mod assemble;
mod cluster;
mod filter;
mod levels;
mod options;

pub use assemble::{assemble_outline, select_title, select_title_with};
pub use cluster::{cluster_1d, Clustering};
pub use filter::{extract_candidates, is_heading_candidate, CandidateFilter};
pub use levels::{infer_levels, infer_levels_with, size_histogram, SizeLevelMap};
pub use options::{
    ClusterStrategy, OutlineOptions, DEFAULT_FALLBACK_TITLE, DEFAULT_MAX_SIZES,
    DEFAULT_TITLE_REFERENCE_Y,
};

use crate::error::Result;
use crate::model::{Candidate, Document, DocumentResult, FontSize};

/// Extract the title and outline of a document with default options.
pub fn extract_outline(doc: &Document) -> Result<DocumentResult> {
    OutlineExtractor::default().extract(doc)
}

/// Intermediate products of one extraction, for inspection and debugging.
#[derive(Debug, Clone)]
pub struct OutlineAnalysis {
    /// Filtered candidates in reading order
    pub candidates: Vec<Candidate>,
    /// Candidate count per size, most frequent first
    pub histogram: Vec<(FontSize, usize)>,
    /// Inferred size to level table
    pub levels: SizeLevelMap,
    /// Final title and outline
    pub result: DocumentResult,
}

/// Runs the outline pipeline with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: OutlineOptions,
}

impl OutlineExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Extract the title and outline of a document.
    pub fn extract(&self, doc: &Document) -> Result<DocumentResult> {
        let candidates = extract_candidates(doc)?;
        Ok(self.build(&candidates))
    }

    /// Extract and keep the intermediate products.
    pub fn analyze(&self, doc: &Document) -> Result<OutlineAnalysis> {
        let candidates = extract_candidates(doc)?;
        let histogram = size_histogram(&candidates);
        let levels = infer_levels_with(&candidates, &self.options);
        let result = DocumentResult {
            title: select_title_with(&candidates, &self.options),
            outline: assemble_outline(&candidates, &levels),
        };

        Ok(OutlineAnalysis {
            candidates,
            histogram,
            levels,
            result,
        })
    }

    fn build(&self, candidates: &[Candidate]) -> DocumentResult {
        let levels = infer_levels_with(candidates, &self.options);
        DocumentResult {
            title: select_title_with(candidates, &self.options),
            outline: assemble_outline(candidates, &levels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, Page, TextRun};

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.add_page(
            Page::letter(1)
                .with_run(TextRun::new("Annual Report", "Helvetica-Bold", 28.0, 1, 72.0, 90.0))
                .with_run(TextRun::new("Summary", "Helvetica-Bold", 18.0, 1, 72.0, 160.0))
                .with_run(TextRun::new("Body text line", "Helvetica", 11.0, 1, 72.0, 190.0))
                .with_run(TextRun::new("1", "Helvetica", 9.0, 1, 300.0, 760.0)),
        );
        doc.add_page(
            Page::letter(2)
                .with_run(TextRun::new("Results", "Helvetica-Bold", 18.0, 2, 72.0, 80.0))
                .with_run(TextRun::new("More body text", "Helvetica", 11.0, 2, 72.0, 110.0)),
        );
        doc
    }

    #[test]
    fn test_extract_outline() {
        let result = extract_outline(&sample_document()).unwrap();
        assert_eq!(result.title, "Annual Report");

        let outline: Vec<(HeadingLevel, &str, u32)> = result
            .outline
            .iter()
            .map(|e| (e.level, e.text.as_str(), e.page))
            .collect();
        assert_eq!(
            outline,
            vec![
                (HeadingLevel::H1, "Annual Report", 1),
                (HeadingLevel::H2, "Summary", 1),
                (HeadingLevel::H3, "Body text line", 1),
                (HeadingLevel::H2, "Results", 2),
                (HeadingLevel::H3, "More body text", 2),
            ]
        );
    }

    #[test]
    fn test_analyze_matches_extract() {
        let extractor = OutlineExtractor::default();
        let doc = sample_document();
        let analysis = extractor.analyze(&doc).unwrap();

        assert_eq!(analysis.result, extractor.extract(&doc).unwrap());
        assert_eq!(analysis.candidates.len(), 5);
        assert_eq!(analysis.histogram[0], (FontSize::from_points(18.0), 2));
        assert_eq!(analysis.levels.len(), 3);
    }

    #[test]
    fn test_uniform_typography_has_empty_outline() {
        let mut page = Page::letter(1);
        for i in 0..20 {
            page.push_run(TextRun::new(
                format!("Line number {}", i),
                "Times-Roman",
                11.0,
                1,
                72.0,
                80.0 + i as f32 * 14.0,
            ));
        }
        let mut doc = Document::new();
        doc.add_page(page);

        let result = extract_outline(&doc).unwrap();
        assert_eq!(result.title, "Line number 1");
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let result = extract_outline(&Document::new()).unwrap();
        assert_eq!(result.title, "Untitled Document");
        assert!(result.outline.is_empty());
    }
}
