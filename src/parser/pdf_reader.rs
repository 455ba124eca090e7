//! PDF document reader.
//!
//! Produces the [`Document`] of positioned text runs that the outline
//! pipeline consumes.

use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::detect::{sniff_file, sniff_header};
use crate::error::Result;
use crate::model::{Document, Page, TextRun};

use super::backend::{LopdfBackend, PageId, PdfBackend};
use super::content::{extract_runs, PageContext};
use super::options::{ErrorMode, ParseOptions};

/// Reads a PDF into pages of text runs.
pub struct PdfReader<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ParseOptions,
}

impl PdfReader<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let header = sniff_file(path)?;
        log::debug!("{}: {}", path.display(), header);

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Read a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        sniff_header(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self::with_backend(backend, options))
    }
}

impl<B: PdfBackend> PdfReader<B> {
    /// Wrap an already loaded backend.
    pub fn with_backend(backend: B, options: ParseOptions) -> Self {
        Self { backend, options }
    }

    /// The options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Read every page, in page order.
    pub fn read(&self) -> Result<Document> {
        let mut document = Document::new();

        for (number, page_id) in self.backend.pages() {
            document.add_page(self.read_page(number, page_id)?);
        }

        log::debug!(
            "Read {} runs from {} pages",
            document.run_count(),
            document.page_count()
        );
        Ok(document)
    }

    fn read_page(&self, number: u32, page_id: PageId) -> Result<Page> {
        let media_box = self.backend.media_box(page_id)?;
        let width = media_box[2] - media_box[0];
        let height = media_box[3] - media_box[1];
        let mut page = Page::new(number, width, height);

        match self.page_runs(number, page_id, media_box) {
            Ok(runs) => {
                for run in runs {
                    page.push_run(self.finish_run(run));
                }
            }
            Err(e) => {
                if self.options.error_mode == ErrorMode::Strict {
                    return Err(e);
                }
                log::warn!("Failed to extract text from page {}: {}", number, e);
            }
        }

        Ok(page)
    }

    fn page_runs(&self, number: u32, page_id: PageId, media_box: [f32; 4]) -> Result<Vec<TextRun>> {
        let fonts = self.backend.page_fonts(page_id)?;
        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;
        let context = PageContext::new(number, page_id, media_box, fonts);
        Ok(extract_runs(&self.backend, &ops, &context))
    }

    fn finish_run(&self, mut run: TextRun) -> TextRun {
        if self.options.normalize_unicode {
            run.text = run.text.nfc().collect();
        }
        run
    }
}

impl std::fmt::Debug for PdfReader<LopdfBackend> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfReader")
            .field("version", &self.backend.version())
            .field("options", &self.options)
            .finish()
    }
}
