//! Data model shared by the reader, the outline pipeline and the renderer.
//!
//! The reader produces a [`Document`] of positioned [`TextRun`]s; the outline
//! pipeline turns it into [`Candidate`]s and finally a [`DocumentResult`].

mod document;
mod outline;
mod size;

pub use document::{Document, Page, StyleFlags, TextRun};
pub use outline::{Candidate, DocumentResult, HeadingLevel, OutlineEntry};
pub use size::FontSize;
