//! Text run extraction from decoded content streams.
//!
//! Tracks the text state operators (`Tf`, `Tm`, `Td`, `TL`, ...) and emits one
//! [`TextRun`] per maximal sequence of text shown with the same font and size
//! on the same baseline, in content stream order.

use std::collections::HashMap;

use crate::model::{FontSize, TextRun};

use super::backend::{BackendFontInfo, ContentOp, PageId, PdfBackend, PdfValue};

/// Adjustments in a `TJ` array beyond this (thousandths of an em) read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Without glyph metrics, a character is assumed to be half an em wide.
const AVG_CHAR_WIDTH_EM: f32 = 0.5;

/// Fraction of the font size above the baseline taken as the run's top edge.
const ASCENT_EM: f32 = 0.8;

/// Everything about a page the interpreter needs besides its operators.
pub struct PageContext {
    /// 1-based page number
    pub number: u32,
    /// Backend page identifier, used to resolve font encodings
    pub id: PageId,
    /// `[llx, lly, urx, ury]`
    pub media_box: [f32; 4],
    /// Fonts keyed by resource name
    pub fonts: HashMap<Vec<u8>, BackendFontInfo>,
}

impl PageContext {
    /// Build a context from the backend's font list.
    pub fn new(
        number: u32,
        id: PageId,
        media_box: [f32; 4],
        fonts: Vec<BackendFontInfo>,
    ) -> Self {
        Self {
            number,
            id,
            media_box,
            fonts: fonts.into_iter().map(|f| (f.name.clone(), f)).collect(),
        }
    }
}

/// Interpret a page's operators into text runs.
pub fn extract_runs<B: PdfBackend + ?Sized>(
    backend: &B,
    ops: &[ContentOp],
    page: &PageContext,
) -> Vec<TextRun> {
    let mut state = TextState::default();
    let mut builder = RunBuilder::new(page);

    for op in ops {
        match op.operator.as_str() {
            "BT" => {
                state.in_text = true;
                state.matrix = TextMatrix::default();
            }
            "ET" => state.in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    state.font_key = name.clone();
                }
                state.font_size = op.number(1).unwrap_or(state.font_size);
            }
            "TL" => state.leading = op.number(0).unwrap_or(state.leading),
            "Td" => {
                let (tx, ty) = (op.number(0).unwrap_or(0.0), op.number(1).unwrap_or(0.0));
                state.matrix.translate(tx, ty);
            }
            "TD" => {
                let (tx, ty) = (op.number(0).unwrap_or(0.0), op.number(1).unwrap_or(0.0));
                state.leading = -ty;
                state.matrix.translate(tx, ty);
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    state.matrix.set([
                        op.number(0).unwrap_or(1.0),
                        op.number(1).unwrap_or(0.0),
                        op.number(2).unwrap_or(0.0),
                        op.number(3).unwrap_or(1.0),
                        op.number(4).unwrap_or(0.0),
                        op.number(5).unwrap_or(0.0),
                    ]);
                }
            }
            "T*" => state.matrix.next_line(state.leading),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = backend.decode_text(page.id, &state.font_key, bytes);
                    show(&mut state, &mut builder, page, text);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = decode_tj_array(backend, page.id, &state.font_key, items);
                    show(&mut state, &mut builder, page, text);
                }
            }
            "'" | "\"" => {
                state.matrix.next_line(state.leading);
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(PdfValue::Str(bytes)) = op.operands.get(text_idx) {
                    let text = backend.decode_text(page.id, &state.font_key, bytes);
                    show(&mut state, &mut builder, page, text);
                }
            }
            _ => {}
        }
    }

    builder.finish()
}

fn show(state: &mut TextState, builder: &mut RunBuilder, page: &PageContext, text: String) {
    if !state.in_text || text.is_empty() {
        return;
    }

    // A negative Tf size mirrors the glyphs; a zero size shows nothing.
    let size = (state.font_size * state.matrix.vertical_scale()).abs();
    let (x, baseline) = state.matrix.position();
    let advance = text.chars().count() as f32 * size * AVG_CHAR_WIDTH_EM;

    if size > 0.0 && !text.trim().is_empty() {
        let font = state
            .font(page)
            .map(|f| f.base_font.clone())
            .unwrap_or_else(|| String::from_utf8_lossy(&state.font_key).to_string());
        builder.push(Shown {
            text,
            font,
            size,
            x,
            baseline,
            advance,
        });
    }

    state.matrix.advance(advance / state.matrix.horizontal_scale().max(f32::EPSILON));
}

/// Decode a `TJ` array, turning large negative adjustments into spaces.
fn decode_tj_array<B: PdfBackend + ?Sized>(
    backend: &B,
    page: PageId,
    font_key: &[u8],
    items: &[PdfValue],
) -> String {
    let mut combined = String::new();

    for item in items {
        match item {
            PdfValue::Str(bytes) => {
                combined.push_str(&backend.decode_text(page, font_key, bytes))
            }
            PdfValue::Integer(_) | PdfValue::Real(_) => {
                let adjustment = -super::backend::get_number_from_value(item).unwrap_or(0.0);
                let ends_with_space = combined.ends_with(' ') || combined.ends_with('\u{00A0}');
                if adjustment > TJ_SPACE_THRESHOLD && !combined.is_empty() && !ends_with_space {
                    let last_is_cjk = combined
                        .chars()
                        .last()
                        .map(is_spaceless_script_char)
                        .unwrap_or(false);
                    if !last_is_cjk {
                        combined.push(' ');
                    }
                }
            }
            _ => {}
        }
    }

    combined
}

/// A single text-showing operation, before merging.
struct Shown {
    text: String,
    font: String,
    size: f32,
    x: f32,
    baseline: f32,
    advance: f32,
}

/// Accumulates shown text into runs.
struct RunBuilder<'a> {
    page: &'a PageContext,
    runs: Vec<TextRun>,
    current: Option<Shown>,
}

impl<'a> RunBuilder<'a> {
    fn new(page: &'a PageContext) -> Self {
        Self {
            page,
            runs: Vec::new(),
            current: None,
        }
    }

    fn push(&mut self, next: Shown) {
        let merges = self
            .current
            .as_ref()
            .map(|current| continues(current, &next))
            .unwrap_or(false);

        if !merges {
            self.flush();
            self.current = Some(next);
            return;
        }

        if let Some(current) = self.current.as_mut() {
            let gap = next.x - (current.x + current.advance);
            let needs_space = gap > next.size * AVG_CHAR_WIDTH_EM * 0.2
                && !current.text.ends_with(' ')
                && !next.text.starts_with(' ')
                && !next.text.chars().next().map(is_spaceless_script_char).unwrap_or(false);
            if needs_space {
                current.text.push(' ');
            }
            current.text.push_str(&next.text);
            current.advance = (next.x + next.advance) - current.x;
        }
    }

    fn flush(&mut self) {
        if let Some(shown) = self.current.take() {
            let [llx, _, _, ury] = self.page.media_box;
            let top = shown.baseline + shown.size * ASCENT_EM;
            self.runs.push(TextRun::new(
                shown.text,
                shown.font,
                shown.size,
                self.page.number,
                shown.x - llx,
                ury - top,
            ));
        }
    }

    fn finish(mut self) -> Vec<TextRun> {
        self.flush();
        self.runs
    }
}

/// Same font, same rounded size, same baseline, moving rightwards.
fn continues(current: &Shown, next: &Shown) -> bool {
    current.font == next.font
        && FontSize::from_points(current.size) == FontSize::from_points(next.size)
        && (current.baseline - next.baseline).abs() <= next.size * 0.3
        && next.x >= current.x
}

#[derive(Debug, Clone)]
struct TextState {
    in_text: bool,
    font_key: Vec<u8>,
    font_size: f32,
    leading: f32,
    matrix: TextMatrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font_key: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
            matrix: TextMatrix::default(),
        }
    }
}

impl TextState {
    fn font<'p>(&self, page: &'p PageContext) -> Option<&'p BackendFontInfo> {
        page.fonts.get(&self.font_key)
    }
}

/// Text matrix plus the start-of-line matrix that `Td`/`T*` move from.
#[derive(Debug, Clone)]
struct TextMatrix {
    m: [f32; 6],
    line: [f32; 6],
}

impl Default for TextMatrix {
    fn default() -> Self {
        let identity = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        Self {
            m: identity,
            line: identity,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: [f32; 6]) {
        self.m = m;
        self.line = m;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        let [a, b, c, d, e, f] = self.line;
        self.line = [a, b, c, d, e + tx * a + ty * c, f + tx * b + ty * d];
        self.m = self.line;
    }

    fn next_line(&mut self, leading: f32) {
        // Leading defaults to 0 until set; fall back to a typical 12pt line.
        let leading = if leading == 0.0 { 12.0 } else { leading };
        self.translate(0.0, -leading);
    }

    /// Move along the baseline by `tx` unscaled text space units.
    fn advance(&mut self, tx: f32) {
        let [a, b, ..] = self.m;
        self.m[4] += tx * a;
        self.m[5] += tx * b;
    }

    fn position(&self) -> (f32, f32) {
        (self.m[4], self.m[5])
    }

    fn horizontal_scale(&self) -> f32 {
        (self.m[0] * self.m[0] + self.m[1] * self.m[1]).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        (self.m[2] * self.m[2] + self.m[3] * self.m[3]).sqrt()
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
