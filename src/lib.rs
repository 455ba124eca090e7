//! # pdf-outline
//!
//! Heading outline extraction for PDF documents.
//!
//! The library reads the positioned text runs of a PDF, infers a three-level
//! heading hierarchy from the distribution of font sizes, and produces a
//! document title plus an ordered outline of `{level, text, page}` entries.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_outline_from_file, render};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let result = extract_outline_from_file("document.pdf")?;
//!
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Reader** ([`parser`]): lopdf-backed content stream interpretation into [`TextRun`]s
//! - **Outline** ([`outline`]): candidate filter, size clustering, outline assembly, title selection
//! - **Render** ([`render`]): JSON output
//! - **Batch** ([`batch`]): one JSON file per PDF in a directory, in parallel with Rayon

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{
    plan_jobs, run_batch, BatchJob, BatchOptions, BatchReporter, BatchSummary, LogReporter,
    NoopReporter,
};
pub use detect::{has_pdf_extension, sniff_header, PdfHeader};
pub use error::{Error, Result};
pub use model::{
    Candidate, Document, DocumentResult, FontSize, HeadingLevel, OutlineEntry, Page, StyleFlags,
    TextRun,
};
pub use outline::{
    extract_outline, ClusterStrategy, OutlineAnalysis, OutlineExtractor, OutlineOptions,
    SizeLevelMap,
};
pub use parser::{ErrorMode, ParseOptions, PdfReader};
pub use render::JsonFormat;

use std::path::Path;

/// Read a PDF file into pages of text runs.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::read_document;
///
/// let doc = read_document("document.pdf").unwrap();
/// println!("Pages: {}, runs: {}", doc.page_count(), doc.run_count());
/// ```
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    PdfReader::open(path)?.read()
}

/// Read a PDF file with custom reader options.
pub fn read_document_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<Document> {
    PdfReader::open_with_options(path, options)?.read()
}

/// Extract the title and heading outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_outline_from_file;
///
/// let result = extract_outline_from_file("document.pdf").unwrap();
/// for entry in &result.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline_from_file<P: AsRef<Path>>(path: P) -> Result<DocumentResult> {
    extract_outline(&read_document(path)?)
}

/// Extract the title and heading outline of a PDF held in memory.
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<DocumentResult> {
    extract_outline(&PdfReader::from_bytes(data)?.read()?)
}

/// Builder combining reader and outline options.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::PdfOutline;
///
/// let result = PdfOutline::new()
///     .lenient()
///     .with_seed(7)
///     .extract("document.pdf")?;
/// # Ok::<(), pdf_outline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfOutline {
    parse_options: ParseOptions,
    outline_options: OutlineOptions,
}

impl PdfOutline {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable lenient reading mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set reader options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set outline options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline_options = options;
        self
    }

    /// Seed the k-means clustering.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.outline_options = self.outline_options.with_seed(seed);
        self
    }

    /// Use exhaustive clustering instead of k-means.
    pub fn exhaustive(mut self) -> Self {
        self.outline_options = self.outline_options.exhaustive();
        self
    }

    /// Extract from a PDF file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<DocumentResult> {
        let doc = PdfReader::open_with_options(path, self.parse_options.clone())?.read()?;
        self.extractor().extract(&doc)
    }

    /// Extract from a PDF held in memory.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<DocumentResult> {
        let doc = PdfReader::from_bytes_with_options(data, self.parse_options.clone())?.read()?;
        self.extractor().extract(&doc)
    }

    /// Extract from a PDF file, keeping the intermediate products.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<OutlineAnalysis> {
        let doc = PdfReader::open_with_options(path, self.parse_options.clone())?.read()?;
        self.extractor().analyze(&doc)
    }

    fn extractor(&self) -> OutlineExtractor {
        OutlineExtractor::new(self.outline_options.clone())
    }
}
