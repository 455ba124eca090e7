//! Reader-side types: positioned text runs grouped into pages.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Style attributes of a text run.
    ///
    /// Bit values follow the span flag layout common to PDF text extractors.
    /// Carried through to candidates; heading levels are decided on size alone.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u32 {
        const SUPERSCRIPT = 1 << 0;
        const ITALIC = 1 << 1;
        const SERIF = 1 << 2;
        const MONOSPACED = 1 << 3;
        const BOLD = 1 << 4;
    }
}

impl StyleFlags {
    /// Derive style flags from a font name such as `"Helvetica-BoldOblique"`.
    pub fn from_font_name(font_name: &str) -> Self {
        let name = font_name.to_lowercase();
        let mut flags = StyleFlags::empty();

        if name.contains("bold") || name.contains("black") || name.contains("heavy") {
            flags |= StyleFlags::BOLD;
        }
        if name.contains("italic") || name.contains("oblique") {
            flags |= StyleFlags::ITALIC;
        }
        if name.contains("mono") || name.contains("courier") {
            flags |= StyleFlags::MONOSPACED;
        }
        if (name.contains("times") || name.contains("serif")) && !name.contains("sans") {
            flags |= StyleFlags::SERIF;
        }

        flags
    }
}

impl Serialize for StyleFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for StyleFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        u32::deserialize(deserializer).map(StyleFlags::from_bits_retain)
    }
}

/// One contiguous styled run of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Text content, possibly with surrounding whitespace
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold")
    pub font: String,
    /// Nominal font size in points
    pub size: f32,
    /// Style attributes
    pub flags: StyleFlags,
    /// 1-based page number
    pub page: u32,
    /// Left edge of the run
    pub x: f32,
    /// Top edge of the run, measured downwards from the top of the page
    pub y: f32,
}

impl TextRun {
    /// Create a run, deriving its style flags from the font name.
    pub fn new(
        text: impl Into<String>,
        font: impl Into<String>,
        size: f32,
        page: u32,
        x: f32,
        y: f32,
    ) -> Self {
        let font = font.into();
        Self {
            text: text.into(),
            flags: StyleFlags::from_font_name(&font),
            font,
            size,
            page,
            x,
            y,
        }
    }

    /// Override the style flags.
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A page and its runs in layout order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Runs in the order the page draws them
    pub runs: Vec<TextRun>,
}

impl Page {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            runs: Vec::new(),
        }
    }

    /// Create an empty US Letter page.
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Append a run, stamping it with this page's number.
    pub fn push_run(&mut self, mut run: TextRun) {
        run.page = self.number;
        self.runs.push(run);
    }

    /// Builder-style variant of [`Page::push_run`].
    pub fn with_run(mut self, run: TextRun) -> Self {
        self.push_run(run);
        self
    }
}

/// A document as delivered by the reader: pages in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in document order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Total number of runs across all pages.
    pub fn run_count(&self) -> usize {
        self.pages.iter().map(|p| p.runs.len()).sum()
    }

    /// Iterate all runs in reading order.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|p| p.runs.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_flags_from_font_name() {
        let flags = StyleFlags::from_font_name("Helvetica-BoldOblique");
        assert!(flags.contains(StyleFlags::BOLD | StyleFlags::ITALIC));
        assert!(!flags.contains(StyleFlags::SERIF));

        assert_eq!(
            StyleFlags::from_font_name("Times-Roman"),
            StyleFlags::SERIF
        );
        assert_eq!(
            StyleFlags::from_font_name("Courier"),
            StyleFlags::MONOSPACED
        );
        assert_eq!(
            StyleFlags::from_font_name("DejaVuSans"),
            StyleFlags::empty()
        );
    }

    #[test]
    fn test_style_flags_serialize_as_bits() {
        let json = serde_json::to_string(&(StyleFlags::BOLD | StyleFlags::ITALIC)).unwrap();
        assert_eq!(json, "18");
        let back: StyleFlags = serde_json::from_str("18").unwrap();
        assert_eq!(back, StyleFlags::BOLD | StyleFlags::ITALIC);
    }

    #[test]
    fn test_page_stamps_run_page_number() {
        let page = Page::letter(4).with_run(TextRun::new("Intro", "Arial", 12.0, 1, 0.0, 0.0));
        assert_eq!(page.runs[0].page, 4);
    }

    #[test]
    fn test_document_runs_in_reading_order() {
        let mut doc = Document::new();
        doc.add_page(
            Page::letter(1)
                .with_run(TextRun::new("a", "F", 10.0, 1, 0.0, 0.0))
                .with_run(TextRun::new("b", "F", 10.0, 1, 0.0, 0.0)),
        );
        doc.add_page(Page::letter(2).with_run(TextRun::new("c", "F", 10.0, 2, 0.0, 0.0)));

        let texts: Vec<&str> = doc.runs().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.run_count(), 3);
    }
}
