//! PDF reading: turns a file into pages of positioned text runs.

mod backend;
mod content;
mod options;
mod pdf_reader;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
    DEFAULT_MEDIA_BOX,
};
pub use content::{extract_runs, PageContext};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_reader::PdfReader;
