//! Synthetic PDF generation for integration tests.

#![allow(dead_code)]

use std::path::Path;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;

/// Fonts registered in every generated page's resources.
#[derive(Debug, Clone, Copy)]
pub enum Font {
    /// `/F1`, Helvetica-Bold
    Bold,
    /// `/F2`, Helvetica
    Regular,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Bold => "F1",
            Font::Regular => "F2",
        }
    }
}

/// One line of text placed by its top edge, measured from the top of the page.
#[derive(Debug, Clone)]
pub struct TextItem {
    pub font: Font,
    pub size: f32,
    pub x: f32,
    pub top: f32,
    pub text: String,
}

/// Shorthand for a text item at the left margin.
pub fn text(font: Font, size: f32, top: f32, text: &str) -> TextItem {
    TextItem {
        font,
        size,
        x: 72.0,
        top,
        text: text.to_string(),
    }
}

/// Body text lines in the regular font, one every 14 points from `top`.
pub fn body(lines: usize, size: f32, top: f32) -> Vec<TextItem> {
    (0..lines)
        .map(|i| {
            text(
                Font::Regular,
                size,
                top + i as f32 * 14.0,
                &format!("Body text line {}", i + 1),
            )
        })
        .collect()
}

/// Builds a small but well-formed PDF with a correct cross-reference table.
#[derive(Debug, Clone, Default)]
pub struct SyntheticPdf {
    pages: Vec<Vec<TextItem>>,
}

impl SyntheticPdf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, items: Vec<TextItem>) -> Self {
        self.pages.push(items);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut objects: Vec<String> = Vec::new();

        // 1: catalog, 2: page tree, 3-4: fonts, then page/content pairs.
        let first_page = 5;
        let kids: Vec<String> = (0..self.pages.len())
            .map(|i| format!("{} 0 R", first_page + i * 2))
            .collect();

        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
        objects.push(format!(
            "<< /Type /Pages /Kids [{}] /Count {} /MediaBox [0 0 {} {}] >>",
            kids.join(" "),
            self.pages.len(),
            PAGE_WIDTH,
            PAGE_HEIGHT
        ));
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        for (i, items) in self.pages.iter().enumerate() {
            let content_obj = first_page + i * 2 + 1;
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                content_obj
            ));
            let stream = content_stream(items);
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ));
        }

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );
        out
    }

    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.to_bytes()).unwrap();
    }
}

fn content_stream(items: &[TextItem]) -> String {
    items
        .iter()
        .map(|item| {
            let baseline = PAGE_HEIGHT - item.top - item.size * 0.8;
            format!(
                "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
                item.font.resource(),
                item.size,
                item.x,
                baseline,
                escape(&item.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '(' | ')' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A two-page report: title, numbered page artifacts, a contents line,
/// three heading sizes and body text.
pub fn report_pdf() -> SyntheticPdf {
    let mut page1 = vec![
        text(Font::Regular, 10.0, 20.0, "1"),
        text(Font::Bold, 24.0, 40.0, "Introduction"),
        text(Font::Bold, 24.0, 10.0, "Table of Contents"),
        text(Font::Bold, 18.0, 80.0, "Background"),
        text(Font::Bold, 24.0, 600.0, "Appendix Banner"),
    ];
    page1.extend(body(3, 11.0, 120.0));

    let mut page2 = vec![
        text(Font::Regular, 10.0, 20.0, "2"),
        text(Font::Bold, 18.0, 60.0, "Methods"),
        text(Font::Bold, 14.0, 100.0, "Data Collection"),
    ];
    page2.extend(body(2, 11.0, 130.0));

    SyntheticPdf::new().page(page1).page(page2)
}
