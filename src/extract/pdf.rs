//! PDF fragment extraction over lopdf.
//!
//! A deliberately thin adapter: it walks each page's content stream tracking
//! the text state (`BT`/`ET`, `Tf`, `Td`/`TD`/`Tm`/`T*`, `Tj`/`TJ`/`'`/`"`),
//! decodes shown text (UTF-16BE for Identity-encoded fonts, UTF-8, Latin-1
//! fallback), and emits one fragment per run of same-formatted text on a
//! line. Everything beyond that, such as column detection, width modeling,
//! or table structure, is out of scope here; the classification engine works
//! from size, weight, and position alone.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Document, Object};

use crate::error::{Error, Result};
use crate::extract::FragmentSource;
use crate::model::TextFragment;

/// Space-insertion threshold for `TJ` kerning adjustments, in 1/1000 text
/// space units. Large negative adjustments encode word gaps.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Default page height when the MediaBox is missing or malformed.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Fragment source backed by the lopdf parser.
#[derive(Debug, Default)]
pub struct PdfFragmentSource;

impl PdfFragmentSource {
    /// Create a new PDF fragment source.
    pub fn new() -> Self {
        Self
    }

    /// Extract fragments from in-memory PDF data.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Vec<TextFragment>> {
        let doc = Document::load_mem(data)?;
        self.extract_document(&doc)
    }

    fn extract_document(&self, doc: &Document) -> Result<Vec<TextFragment>> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        let mut fragments = Vec::new();
        let mut order_index = 0usize;
        for (page_index, (_, page_id)) in doc.get_pages().into_iter().enumerate() {
            match extract_page_spans(doc, page_id) {
                Ok(spans) => {
                    merge_spans(spans, page_index, &mut order_index, &mut fragments);
                }
                Err(e) => {
                    // Page-level anomalies degrade to missing fragments.
                    log::warn!("skipping unreadable page {}: {}", page_index, e);
                }
            }
        }
        Ok(fragments)
    }
}

impl FragmentSource for PdfFragmentSource {
    fn name(&self) -> &str {
        "pdf"
    }

    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn extract(&self, path: &Path) -> Result<Vec<TextFragment>> {
        let doc = Document::load(path)?;
        self.extract_document(&doc)
    }
}

/// A positioned run of text before line merging. `y` is already converted to
/// top-origin coordinates.
struct RawSpan {
    text: String,
    x: f32,
    y: f32,
    font_size: f32,
    is_bold: bool,
}

/// Per-font info resolved once per page.
struct FontInfo {
    base_name: String,
    /// Declared /Encoding name, when it is a plain name (e.g. "Identity-H")
    encoding: Option<String>,
}

impl FontInfo {
    fn is_bold(&self) -> bool {
        let name = self.base_name.to_lowercase();
        name.contains("bold") || name.contains("black") || name.contains("heavy")
    }
}

/// Text-positioning state: the text matrix and line matrix of PDF text space,
/// reduced to what fragment extraction needs.
#[derive(Clone, Copy)]
struct TextState {
    // current text matrix [a b c d e f]
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    // line start, for T* and ' operators
    line_e: f32,
    line_f: f32,
    leading: f32,
}

impl Default for TextState {
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
            leading: 0.0,
        }
    }
}

impl TextState {
    fn set_matrix(&mut self, m: [f32; 6]) {
        [self.a, self.b, self.c, self.d, self.e, self.f] = m;
        self.line_e = self.e;
        self.line_f = self.f;
    }

    /// `Td`: move the line start by (tx, ty) in text space.
    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    /// `T*`: advance to the next line using the current leading.
    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    /// Vertical scale applied to the nominal font size.
    fn scale(&self) -> f32 {
        let s = (self.b * self.b + self.d * self.d).sqrt();
        if s > 0.0 {
            s
        } else {
            1.0
        }
    }
}

fn extract_page_spans(doc: &Document, page_id: lopdf::ObjectId) -> Result<Vec<RawSpan>> {
    let lopdf_fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::ParseFailure(e.to_string()))?;

    let mut fonts: BTreeMap<Vec<u8>, FontInfo> = BTreeMap::new();
    for (name, font) in &lopdf_fonts {
        let base_name = font
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let encoding = font.get(b"Encoding").ok().and_then(|o| match o {
            Object::Name(n) => Some(String::from_utf8_lossy(n).to_string()),
            _ => None,
        });
        fonts.insert(name.clone(), FontInfo { base_name, encoding });
    }

    let content = doc
        .get_page_content(page_id)
        .map_err(|e| Error::ParseFailure(e.to_string()))?;
    let page_height = page_height(doc, page_id);

    parse_content_stream(&content, &fonts, page_height)
}

fn parse_content_stream(
    content: &[u8],
    fonts: &BTreeMap<Vec<u8>, FontInfo>,
    page_height: f32,
) -> Result<Vec<RawSpan>> {
    let content =
        lopdf::content::Content::decode(content).map_err(|e| Error::ParseFailure(e.to_string()))?;

    let mut spans = Vec::new();
    let mut current_font_name: Vec<u8> = Vec::new();
    let mut current_font_size: f32 = 12.0;
    let mut state = TextState::default();
    let mut in_text_block = false;

    for op in content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                state = TextState::default();
            }
            "ET" => {
                in_text_block = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(font_name) = &op.operands[0] {
                        current_font_name = font_name.clone();
                    }
                    current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(get_number) {
                    state.leading = leading;
                }
            }
            "Td" => {
                if op.operands.len() >= 2 {
                    let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                    state.translate(tx, ty);
                }
            }
            "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                    state.leading = -ty;
                    state.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    let mut m = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                    for (slot, operand) in m.iter_mut().zip(&op.operands) {
                        if let Some(n) = get_number(operand) {
                            *slot = n;
                        }
                    }
                    state.set_matrix(m);
                }
            }
            "T*" => {
                state.next_line();
            }
            "Tj" | "TJ" => {
                if in_text_block {
                    let font = fonts.get(&current_font_name);
                    let text = if op.operator == "TJ" {
                        decode_tj_array(op.operands.first(), font)
                    } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                        decode_string(bytes, font)
                    } else {
                        String::new()
                    };

                    push_span(&mut spans, text, &state, current_font_size, font, page_height);
                }
            }
            "'" | "\"" => {
                state.next_line();
                if in_text_block {
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let font = fonts.get(&current_font_name);
                        let text = decode_string(bytes, font);
                        push_span(&mut spans, text, &state, current_font_size, font, page_height);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(spans)
}

fn push_span(
    spans: &mut Vec<RawSpan>,
    text: String,
    state: &TextState,
    font_size: f32,
    font: Option<&FontInfo>,
    page_height: f32,
) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = state.position();
    spans.push(RawSpan {
        text,
        x,
        // flip to top-origin so smaller y means higher on the page
        y: (page_height - y).max(0.0),
        font_size: font_size * state.scale(),
        is_bold: font.map(|f| f.is_bold()).unwrap_or(false),
    });
}

/// Decode a `TJ` operand array: strings interleaved with kerning adjustments.
/// Large negative adjustments become word spaces, except between characters
/// of scripts written without spaces.
fn decode_tj_array(operand: Option<&Object>, font: Option<&FontInfo>) -> String {
    let Some(Object::Array(items)) = operand else {
        return String::new();
    };

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => {
                combined.push_str(&decode_string(bytes, font));
            }
            Object::Integer(n) => {
                maybe_push_space(&mut combined, -(*n as f32));
            }
            Object::Real(n) => {
                maybe_push_space(&mut combined, -(*n as f32));
            }
            _ => {}
        }
    }
    combined
}

fn maybe_push_space(combined: &mut String, adjustment: f32) {
    if adjustment > TJ_SPACE_THRESHOLD
        && !combined.is_empty()
        && !combined.ends_with(' ')
        && !combined.ends_with('\u{00A0}')
        && !combined.chars().last().map(is_spaceless_script).unwrap_or(false)
    {
        combined.push(' ');
    }
}

/// Decode raw string bytes from a text-showing operator.
///
/// Identity-encoded composite fonts carry 2-byte codes that usually map to
/// Unicode, so those are tried as UTF-16BE first; everything else goes
/// through the generic heuristic.
fn decode_string(bytes: &[u8], font: Option<&FontInfo>) -> String {
    let identity = font
        .and_then(|f| f.encoding.as_deref())
        .is_some_and(|e| e.contains("Identity"));
    if identity && bytes.len() >= 2 && bytes.len() % 2 == 0 {
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        let decoded = String::from_utf16_lossy(&units);
        if !decoded.is_empty() && !decoded.chars().all(|c| c == '\u{FFFD}' || c == '\0') {
            return decoded;
        }
    }
    decode_text_simple(bytes)
}

/// Best-effort decoding: UTF-16BE with BOM, then valid UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

fn page_height(doc: &Document, page_id: lopdf::ObjectId) -> f32 {
    let media_box = doc
        .get_dictionary(page_id)
        .ok()
        .and_then(|d| d.get(b"MediaBox").ok())
        .and_then(|obj| match obj {
            Object::Array(arr) => Some(arr.clone()),
            Object::Reference(r) => match doc.get_object(*r) {
                Ok(Object::Array(arr)) => Some(arr.clone()),
                _ => None,
            },
            _ => None,
        });

    match media_box.as_deref() {
        Some([_, y0, _, y1]) => match (get_number(y0), get_number(y1)) {
            (Some(y0), Some(y1)) if y1 > y0 => y1 - y0,
            _ => DEFAULT_PAGE_HEIGHT,
        },
        _ => DEFAULT_PAGE_HEIGHT,
    }
}

/// Merge consecutive spans that share a line and formatting into fragments.
///
/// Same-line runs with the same size and weight become one fragment, joined
/// with a space except across characters of spaceless scripts. Extraction
/// order is preserved; no sorting happens here.
fn merge_spans(
    spans: Vec<RawSpan>,
    page_index: usize,
    order_index: &mut usize,
    fragments: &mut Vec<TextFragment>,
) {
    let mut pending: Option<RawSpan> = None;

    for span in spans {
        match pending.take() {
            None => pending = Some(span),
            Some(mut current) => {
                if same_run(&current, &span) {
                    join_text(&mut current.text, &span.text);
                    pending = Some(current);
                } else {
                    emit(fragments, current, page_index, order_index);
                    pending = Some(span);
                }
            }
        }
    }
    if let Some(current) = pending {
        emit(fragments, current, page_index, order_index);
    }
}

fn same_run(a: &RawSpan, b: &RawSpan) -> bool {
    let same_line = (a.y - b.y).abs() < 2.0;
    let same_size = (a.font_size - b.font_size).abs() < 0.1;
    same_line && same_size && a.is_bold == b.is_bold
}

fn join_text(current: &mut String, next: &str) {
    let boundary_spaceless = current.chars().last().map(is_spaceless_script).unwrap_or(false)
        && next.chars().next().map(is_spaceless_script).unwrap_or(false);
    if !boundary_spaceless && !current.ends_with(' ') && !next.starts_with(' ') {
        current.push(' ');
    }
    current.push_str(next);
}

fn emit(
    fragments: &mut Vec<TextFragment>,
    span: RawSpan,
    page_index: usize,
    order_index: &mut usize,
) {
    fragments.push(TextFragment::new(
        span.text,
        span.font_size,
        span.is_bold,
        page_index,
        span.y,
        span.x,
        *order_index,
    ));
    *order_index += 1;
}

/// Characters from scripts written without inter-word spaces (CJK).
fn is_spaceless_script(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}'   // CJK Extension A
        | '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}'   // Katakana
        | '\u{AC00}'..='\u{D7AF}'   // Hangul Syllables
        | '\u{FF00}'..='\u{FFEF}'   // Fullwidth forms
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};

    /// Build a one-page PDF with a bold 24pt line near the top and a regular
    /// 12pt line below it.
    fn synthetic_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let bold_font = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let body_font = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => bold_font, "F2" => body_font },
        });

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal("Document Title")]),
                Operation::new("Tf", vec!["F2".into(), 12.into()]),
                Operation::new("Td", vec![0.into(), (-48).into()]),
                Operation::new("Tj", vec![Object::string_literal("Body paragraph text.")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content encodes"),
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).expect("pdf saves");
        data
    }

    #[test]
    fn test_extract_bytes_positions_and_styles() {
        let source = PdfFragmentSource::new();
        let fragments = source.extract_bytes(&synthetic_pdf()).unwrap();
        assert_eq!(fragments.len(), 2);

        let title = &fragments[0];
        assert_eq!(title.text, "Document Title");
        assert_eq!(title.font_size, 24.0);
        assert!(title.is_bold);
        assert_eq!(title.page, 0);
        // 792pt page, text at y=700 from the bottom: 92pt from the top.
        assert!((title.y - 92.0).abs() < 0.01);

        let body = &fragments[1];
        assert_eq!(body.text, "Body paragraph text.");
        assert!(!body.is_bold);
        assert!(body.y > title.y);
        assert!(body.order_index > title.order_index);
    }

    #[test]
    fn test_invalid_bytes_are_a_parse_failure() {
        let source = PdfFragmentSource::new();
        let result = source.extract_bytes(b"not a pdf at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = [0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42];
        assert_eq!(decode_text_simple(&bytes), "AB");
        assert_eq!(decode_text_simple(b"plain"), "plain");
    }

    #[test]
    fn test_merge_joins_same_line_runs() {
        let spans = vec![
            RawSpan {
                text: "Hello".to_string(),
                x: 72.0,
                y: 100.0,
                font_size: 12.0,
                is_bold: false,
            },
            RawSpan {
                text: "world".to_string(),
                x: 110.0,
                y: 100.5,
                font_size: 12.0,
                is_bold: false,
            },
            RawSpan {
                text: "Next line".to_string(),
                x: 72.0,
                y: 114.0,
                font_size: 12.0,
                is_bold: false,
            },
        ];
        let mut order = 0;
        let mut fragments = Vec::new();
        merge_spans(spans, 0, &mut order, &mut fragments);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Hello world");
        assert_eq!(fragments[1].text, "Next line");
    }

    #[test]
    fn test_merge_cjk_without_space() {
        let spans = vec![
            RawSpan {
                text: "第1章".to_string(),
                x: 72.0,
                y: 100.0,
                font_size: 16.0,
                is_bold: true,
            },
            RawSpan {
                text: "序論".to_string(),
                x: 120.0,
                y: 100.0,
                font_size: 16.0,
                is_bold: true,
            },
        ];
        let mut order = 0;
        let mut fragments = Vec::new();
        merge_spans(spans, 0, &mut order, &mut fragments);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "第1章序論");
    }
}
