//! Content-stream interpretation.
//!
//! Walks the text operators of a page (`BT`/`ET`, `Tf`, `Td`/`TD`/`Tm`/`T*`,
//! `TL`, `Tj`/`TJ`/`'`/`"`) and emits one [`TextSpan`] per shown string,
//! positioned in top-left page space. Glyph widths are not read from font
//! programs; span width is approximated from the character count.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Rect, StyleFlags, TextSpan};

use super::backend::{get_number_from_value, PageId, PdfBackend, PdfValue};

/// Approximate glyph advance as a fraction of font size.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Portion of the font size above the baseline.
const ASCENT_RATIO: f32 = 0.8;

/// Portion of the font size below the baseline.
const DESCENT_RATIO: f32 = 0.2;

/// `TJ` adjustments beyond this (thousandths of an em) read as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Extract positioned spans from one page.
///
/// `page_index` is the 0-based index recorded on every span.
pub fn extract_page_spans<B: PdfBackend + ?Sized>(
    backend: &B,
    page_id: PageId,
    page_index: usize,
) -> Result<Vec<TextSpan>> {
    let fonts: HashMap<Vec<u8>, String> = backend
        .page_fonts(page_id)?
        .into_iter()
        .map(|f| (f.name, f.base_font))
        .collect();
    let (_, page_height) = backend.page_size(page_id);
    let content = backend.page_content(page_id)?;
    let ops = backend.decode_content(&content)?;

    let mut state = TextState::new(page_height, page_index);

    for op in ops {
        match op.operator.as_str() {
            "BT" => {
                state.in_text = true;
                state.matrix = TextMatrix::default();
            }
            "ET" => state.in_text = false,
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let PdfValue::Name(name) = &op.operands[0] {
                        state.font_key = name.clone();
                        state.font_name = fonts
                            .get(name)
                            .cloned()
                            .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                    }
                    state.font_size = get_number_from_value(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(get_number_from_value) {
                    state.leading = leading;
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number_from_value(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number_from_value(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    state.matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    let n: Vec<f32> = op
                        .operands
                        .iter()
                        .take(6)
                        .map(|v| get_number_from_value(v).unwrap_or(0.0))
                        .collect();
                    state.matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                }
            }
            "T*" => state.next_line(),
            "Tj" if state.in_text => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = backend.decode_text(page_id, &state.font_key, bytes);
                    state.show(text);
                }
            }
            "TJ" if state.in_text => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = decode_tj_array(backend, page_id, &state.font_key, items);
                    state.show(text);
                }
            }
            "'" | "\"" => {
                state.next_line();
                if state.in_text {
                    let idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(PdfValue::Str(bytes)) = op.operands.get(idx) {
                        let text = backend.decode_text(page_id, &state.font_key, bytes);
                        state.show(text);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(state.spans)
}

/// Join the strings of a `TJ` array, turning wide negative kerns into spaces.
fn decode_tj_array<B: PdfBackend + ?Sized>(
    backend: &B,
    page_id: PageId,
    font_key: &[u8],
    items: &[PdfValue],
) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            PdfValue::Str(bytes) => combined.push_str(&backend.decode_text(page_id, font_key, bytes)),
            PdfValue::Integer(_) | PdfValue::Real(_) => {
                let adjustment = -get_number_from_value(item).unwrap_or(0.0);
                if adjustment > TJ_SPACE_THRESHOLD
                    && !combined.is_empty()
                    && !combined.ends_with(' ')
                    && !combined.ends_with('\u{00A0}')
                {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }
    combined
}

/// Graphics-independent text state for one page.
struct TextState {
    matrix: TextMatrix,
    in_text: bool,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
    page_height: f32,
    page_index: usize,
    spans: Vec<TextSpan>,
}

impl TextState {
    fn new(page_height: f32, page_index: usize) -> Self {
        Self {
            matrix: TextMatrix::default(),
            in_text: false,
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: 0.0,
            page_height,
            page_index,
            spans: Vec::new(),
        }
    }

    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size * 1.2
        };
        self.matrix.translate(0.0, -leading);
    }

    /// Record a shown string and advance the pen past it.
    fn show(&mut self, text: String) {
        let size = self.font_size * self.matrix.scale();
        let width = text.chars().count() as f32 * size * APPROX_CHAR_WIDTH_RATIO;
        let (x, baseline) = self.matrix.position();

        if !text.trim().is_empty() {
            let bbox = Rect::new(
                x,
                self.page_height - (baseline + size * ASCENT_RATIO),
                x + width,
                self.page_height - (baseline - size * DESCENT_RATIO),
            );
            let flags = StyleFlags::from_font_name(&self.font_name);
            self.spans
                .push(TextSpan::new(text, size, bbox, self.page_index).with_flags(flags));
        }

        let scale = self.matrix.scale();
        if scale > 0.0 {
            self.matrix.advance(width / scale);
        }
    }
}

/// Text matrix for tracking position in content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    // Start of the current line; Td/T* are relative to it, not the pen.
    line_e: f32,
    line_f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_e: 0.0,
            line_f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self {
            a,
            b,
            c,
            d,
            e,
            f,
            line_e: e,
            line_f: f,
        };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    fn advance(&mut self, tx: f32) {
        self.e += tx * self.a;
        self.f += tx * self.b;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}
