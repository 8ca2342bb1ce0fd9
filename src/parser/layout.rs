//! Layout analysis for PDF pages.
//!
//! A page's content stream is interpreted into positioned text spans and
//! image placements. Spans are then grouped into lines, lines into blocks,
//! and each block is classified as heading, list item or body text.
//!
//! All coordinates are PDF user space: origin at the bottom-left corner,
//! y growing upwards.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::ContentItem;

use super::backend::{ContentOp, ImageInfo, PageId, PdfBackend, PdfValue};

/// Average glyph width as a fraction of the font size, used when real
/// glyph metrics are not consulted.
const AVG_GLYPH_WIDTH: f64 = 0.5;

/// TJ adjustment (thousandths of an em) treated as a word break.
const TJ_SPACE_THRESHOLD: f64 = 200.0;

/// A text span with position and style information.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f64,
    /// Y position (baseline)
    pub y: f64,
    /// Estimated width of the text
    pub width: f64,
    /// Font size in points
    pub font_size: f64,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub is_bold: bool,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(text: String, x: f64, y: f64, font_size: f64, font_name: String) -> Self {
        let lower = font_name.to_lowercase();
        let is_bold = lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        let width = text.chars().count() as f64 * font_size * AVG_GLYPH_WIDTH;

        Self {
            text,
            x,
            y,
            width,
            font_size,
            font_name,
            is_bold,
        }
    }

    /// Set an explicit width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Approximate bottom (descender).
    pub fn bottom(&self) -> f64 {
        self.y - self.font_size * 0.2
    }

    /// Approximate top (ascender).
    pub fn top(&self) -> f64 {
        self.y + self.font_size * 0.8
    }
}

/// An image XObject drawn on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    /// XObject resource name
    pub name: String,
    /// Pixel dimensions
    pub info: ImageInfo,
    /// Placement `[x0, y0, x1, y1]`
    pub bbox: [f64; 4],
}

impl PlacedImage {
    /// Convert to a content item.
    pub fn to_content_item(&self) -> ContentItem {
        ContentItem::image(self.name.clone(), self.info.width, self.info.height).with_bbox(self.bbox)
    }
}

/// Everything drawn on a page that the parser reports.
#[derive(Debug, Clone, Default)]
pub struct PageElements {
    /// Text spans in content-stream order
    pub spans: Vec<TextSpan>,
    /// Image placements in content-stream order
    pub images: Vec<PlacedImage>,
}

// ---------------------------------------------------------------------------
// Content stream interpretation
// ---------------------------------------------------------------------------

/// 2D affine matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_op(op: &ContentOp) -> Option<Self> {
        Some(Self {
            a: op.number(0)?,
            b: op.number(1)?,
            c: op.number(2)?,
            d: op.number(3)?,
            e: op.number(4)?,
            f: op.number(5)?,
        })
    }

    fn translation(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// `self × other` (apply self first, then other).
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    fn horizontal_scale(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f64 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text and graphics state while walking a content stream.
struct Interpreter<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    page: PageId,
    fonts: HashMap<Vec<u8>, String>,
    images: HashMap<Vec<u8>, ImageInfo>,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    font_resource: Vec<u8>,
    font_name: String,
    font_size: f64,
    leading: f64,
    in_text: bool,
    out: PageElements,
}

impl<'a, B: PdfBackend + ?Sized> Interpreter<'a, B> {
    fn run(mut self, ops: &[ContentOp]) -> PageElements {
        for op in ops {
            self.step(op);
        }
        self.out
    }

    fn step(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "q" => self.ctm_stack.push(self.ctm),
            "Q" => {
                if let Some(m) = self.ctm_stack.pop() {
                    self.ctm = m;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_op(op) {
                    self.ctm = m.then(&self.ctm);
                }
            }
            "BT" => {
                self.in_text = true;
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.font_name = self
                        .fonts
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                    self.font_resource = name.clone();
                }
                if let Some(size) = op.number(1) {
                    self.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = op.number(0) {
                    self.leading = leading;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_op(op) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text, 0.0);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    self.show_array(items);
                }
            }
            "'" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text, 0.0);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    let text = self.decode(bytes);
                    self.show(text, 0.0);
                }
            }
            "Do" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.place_image(name);
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        // Unset leading: fall back to a typical line height.
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.backend
            .decode_text(self.page, &self.font_resource, bytes)
    }

    fn show_array(&mut self, items: &[PdfValue]) {
        let mut combined = String::new();
        let mut adjust = 0.0;

        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(bytes)),
                PdfValue::Integer(_) | PdfValue::Real(_) => {
                    let n = super::backend::get_number_from_value(item).unwrap_or(0.0);
                    adjust += n;
                    let is_word_break = -n > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(' ')
                        && !combined.ends_with('\u{00A0}')
                        && !combined.chars().last().is_some_and(is_spaceless_script_char);
                    if is_word_break {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }

        self.show(combined, adjust);
    }

    /// Emit a span at the current text position and advance past it.
    ///
    /// `adjust` is the sum of TJ displacements in thousandths of an em.
    fn show(&mut self, text: String, adjust: f64) {
        let glyphs = text.chars().count() as f64;
        let advance = glyphs * self.font_size * AVG_GLYPH_WIDTH - adjust / 1000.0 * self.font_size;

        if self.in_text && !text.trim().is_empty() {
            let device = self.text_matrix.then(&self.ctm);
            let (x, y) = device.apply(0.0, 0.0);
            let size = self.font_size * device.vertical_scale();
            let width = advance.max(0.0) * device.horizontal_scale();
            let text = normalize_text(&text);
            self.out
                .spans
                .push(TextSpan::new(text, x, y, size, self.font_name.clone()).with_width(width));
        }

        self.text_matrix = Matrix::translation(advance, 0.0).then(&self.text_matrix);
    }

    fn place_image(&mut self, name: &[u8]) {
        let Some(info) = self.images.get(name) else {
            // Form XObjects and unknown names are not reported.
            return;
        };

        let corners = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)].map(|(x, y)| self.ctm.apply(x, y));
        let xs = corners.map(|(x, _)| x);
        let ys = corners.map(|(_, y)| y);
        let bbox = [
            xs.iter().copied().fold(f64::INFINITY, f64::min),
            ys.iter().copied().fold(f64::INFINITY, f64::min),
            xs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ys.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        ];

        self.out.images.push(PlacedImage {
            name: String::from_utf8_lossy(name).to_string(),
            info: info.clone(),
            bbox,
        });
    }
}

/// Interpret a page's content stream into spans and image placements.
pub fn interpret_page<B: PdfBackend + ?Sized>(backend: &B, page: PageId) -> Result<PageElements> {
    let fonts = backend.page_fonts(page)?.into_iter().collect();
    let images = backend.page_images(page).into_iter().collect();
    let data = backend.page_content(page)?;
    let ops = backend.decode_content(&data)?;

    let interpreter = Interpreter {
        backend,
        page,
        fonts,
        images,
        ctm: Matrix::IDENTITY,
        ctm_stack: Vec::new(),
        text_matrix: Matrix::IDENTITY,
        line_matrix: Matrix::IDENTITY,
        font_resource: Vec::new(),
        font_name: String::new(),
        font_size: 12.0,
        leading: 0.0,
        in_text: false,
        out: PageElements::default(),
    };

    let elements = interpreter.run(&ops);
    log::debug!(
        "Page {:?}: {} ops, {} spans, {} images",
        page,
        ops.len(),
        elements.spans.len(),
        elements.images.len()
    );
    Ok(elements)
}

// ---------------------------------------------------------------------------
// Lines and blocks
// ---------------------------------------------------------------------------

/// A text line composed of multiple spans on the same baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// The spans in this line, sorted by X position
    pub spans: Vec<TextSpan>,
    /// Y position (baseline)
    pub y: f64,
    /// Leftmost X position
    pub x: f64,
    /// Dominant font size in this line
    pub font_size: f64,
    /// Detected heading level (1-6, or 0 for non-heading)
    pub heading_level: u8,
}

impl TextLine {
    /// Create a new text line from spans.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.total_cmp(&b.x));

        // Dominant font size, weighted by text length
        let total_chars: usize = spans.iter().map(|s| s.text.chars().count()).sum();
        let weighted: f64 = spans
            .iter()
            .map(|s| s.font_size * s.text.chars().count() as f64)
            .sum();
        let font_size = if total_chars > 0 {
            weighted / total_chars as f64
        } else {
            spans.first().map(|s| s.font_size).unwrap_or(0.0)
        };

        let y = spans.first().map(|s| s.y).unwrap_or(0.0);
        let x = spans.first().map(|s| s.x).unwrap_or(0.0);

        Self {
            spans,
            y,
            x,
            font_size,
            heading_level: 0,
        }
    }

    /// Whether this line was classified as a heading.
    pub fn is_heading(&self) -> bool {
        self.heading_level > 0
    }

    /// Right edge of the last span.
    pub fn right(&self) -> f64 {
        self.spans.iter().map(TextSpan::right).fold(self.x, f64::max)
    }

    /// Combined text of all spans, inserting spaces at visible gaps.
    pub fn text(&self) -> String {
        join_spans(&self.spans)
    }

    /// Check if the line is predominantly bold.
    pub fn is_bold(&self) -> bool {
        let bold: usize = self
            .spans
            .iter()
            .filter(|s| s.is_bold)
            .map(|s| s.text.len())
            .sum();
        let total: usize = self.spans.iter().map(|s| s.text.len()).sum();
        total > 0 && bold * 2 > total
    }

    /// Whether the line starts with a bullet or enumeration marker.
    pub fn starts_with_list_marker(&self) -> bool {
        let text = self.text();
        let first = text.split_whitespace().next().unwrap_or("");
        if is_bullet_marker(first) || is_number_marker(first) {
            return true;
        }
        // Bullet glued to the text ("•Item")
        text.trim_start()
            .chars()
            .next()
            .is_some_and(|c| matches!(c, '•' | '·' | '▪' | '◦' | '●' | '■' | '►' | '▸'))
    }
}

/// Join spans left to right with spaces where the gap warrants one.
pub(crate) fn join_spans(spans: &[TextSpan]) -> String {
    let mut result = String::new();

    for (i, span) in spans.iter().enumerate() {
        if i > 0 {
            let prev = &spans[i - 1];
            let gap = span.x - prev.right();
            let threshold = span.font_size * AVG_GLYPH_WIDTH * 0.2;

            let both_spaceless = prev.text.chars().last().is_some_and(is_spaceless_script_char)
                && span.text.chars().next().is_some_and(is_spaceless_script_char);
            let has_space = prev.text.ends_with(' ') || span.text.starts_with(' ');

            if gap > threshold && !both_spaceless && !has_space {
                result.push(' ');
            }
        }
        result.push_str(&span.text);
    }

    result
}

/// Type of text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    /// A heading (H1-H6)
    Heading,
    /// A regular paragraph
    Paragraph,
    /// A list item
    ListItem,
}

/// A group of consecutive lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// The lines in this block
    pub lines: Vec<TextLine>,
    /// Block type
    pub block_type: BlockType,
    /// Heading level (1-6 for headings, 0 otherwise)
    pub heading_level: u8,
}

impl TextBlock {
    /// Build a block and classify it from its lines.
    pub fn new(lines: Vec<TextLine>) -> Self {
        let heading_level = lines
            .iter()
            .filter(|l| l.is_heading())
            .map(|l| l.heading_level)
            .min()
            .unwrap_or(0);

        let block_type = if heading_level > 0 {
            BlockType::Heading
        } else if lines.first().is_some_and(TextLine::starts_with_list_marker) {
            BlockType::ListItem
        } else {
            BlockType::Paragraph
        };

        Self {
            lines,
            block_type,
            heading_level,
        }
    }

    /// Combined text of all lines.
    pub fn text(&self) -> String {
        let joined = self
            .lines
            .iter()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join(" ");
        collapse_whitespace(&joined)
    }

    /// Top edge (highest ascender).
    pub fn top(&self) -> f64 {
        self.lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .map(TextSpan::top)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Bounding box `[x0, y0, x1, y1]`.
    pub fn bbox(&self) -> [f64; 4] {
        let spans = || self.lines.iter().flat_map(|l| l.spans.iter());
        [
            spans().map(|s| s.x).fold(f64::INFINITY, f64::min),
            spans().map(TextSpan::bottom).fold(f64::INFINITY, f64::min),
            spans().map(TextSpan::right).fold(f64::NEG_INFINITY, f64::max),
            self.top(),
        ]
    }

    /// Check if the block has no visible text.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() || self.text().trim().is_empty()
    }

    /// Convert to a content item.
    pub fn to_content_item(&self) -> ContentItem {
        let text = self.text();
        let item = match self.block_type {
            BlockType::Heading => ContentItem::heading(text, self.heading_level),
            BlockType::ListItem => ContentItem::list_item(text),
            BlockType::Paragraph => ContentItem::text(text),
        };
        item.with_bbox(self.bbox())
    }
}

/// Font statistics for heading detection.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// Body text font size (most common)
    pub body_size: f64,
    /// Font sizes larger than body (potential headings), largest first
    pub heading_sizes: Vec<f64>,
    /// Observed font sizes (0.1pt buckets) weighted by character count
    size_histogram: HashMap<i64, usize>,
}

impl FontStatistics {
    /// Add a font size observation covering `chars` characters.
    pub fn add_size(&mut self, size: f64, chars: usize) {
        let key = (size * 10.0).round() as i64;
        *self.size_histogram.entry(key).or_insert(0) += chars.max(1);
    }

    /// Add every span of a page.
    pub fn add_spans(&mut self, spans: &[TextSpan]) {
        for span in spans {
            self.add_size(span.font_size, span.text.chars().count());
        }
    }

    /// Calculate body size and heading sizes.
    pub fn analyze(&mut self) {
        // Ties go to the smaller size so results are deterministic.
        let body = self
            .size_histogram
            .iter()
            .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then(kb.cmp(ka)))
            .map(|(k, _)| *k);

        let Some(body_key) = body else {
            self.body_size = 12.0;
            self.heading_sizes.clear();
            return;
        };
        self.body_size = body_key as f64 / 10.0;

        let mut larger: Vec<f64> = self
            .size_histogram
            .keys()
            .map(|k| *k as f64 / 10.0)
            .filter(|s| *s > self.body_size + 0.5)
            .collect();
        larger.sort_by(|a, b| b.total_cmp(a));
        self.heading_sizes = larger;
    }

    /// Get heading level for a line (1-6, or 0 for body text).
    pub fn get_heading_level(&self, font_size: f64, is_bold: bool) -> u8 {
        // At least 1.5pt above body size, or 0.5pt for bold lines
        let margin = if is_bold { 0.5 } else { 1.5 };
        if font_size < self.body_size + margin {
            return 0;
        }

        for (i, &heading_size) in self.heading_sizes.iter().enumerate() {
            if font_size >= heading_size - 0.5 {
                return (i + 1).min(6) as u8;
            }
        }

        5
    }
}

/// Group spans into lines by baseline proximity, top to bottom.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut line_y = 0.0;

    for span in spans {
        let tolerance = span.font_size.max(1.0) * 0.5;
        if !current.is_empty() && (span.y - line_y).abs() > tolerance {
            lines.push(TextLine::from_spans(std::mem::take(&mut current)));
        }
        if current.is_empty() {
            line_y = span.y;
        }
        current.push(span);
    }

    if !current.is_empty() {
        lines.push(TextLine::from_spans(current));
    }

    lines
}

/// Mark heading lines using the document font statistics.
pub fn detect_headings(mut lines: Vec<TextLine>, stats: &FontStatistics) -> Vec<TextLine> {
    for line in &mut lines {
        line.heading_level = stats.get_heading_level(line.font_size, line.is_bold());
    }
    lines
}

/// Group lines into blocks (paragraphs) based on spacing.
pub fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<TextBlock> {
    let avg_spacing = average_line_spacing(&lines);
    let mut blocks = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if should_break_block(prev, &line, avg_spacing) {
                blocks.push(TextBlock::new(std::mem::take(&mut current)));
            }
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(TextBlock::new(current));
    }

    blocks.retain(|b| !b.is_empty());
    blocks
}

/// Average baseline distance between consecutive lines.
fn average_line_spacing(lines: &[TextLine]) -> f64 {
    let spacings: Vec<f64> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f64>() / spacings.len() as f64
}

/// Determine if a new block should start.
fn should_break_block(prev: &TextLine, curr: &TextLine, avg_spacing: f64) -> bool {
    if curr.is_heading() != prev.is_heading() {
        return true;
    }

    if curr.starts_with_list_marker() {
        return true;
    }

    let spacing = (prev.y - curr.y).abs();
    if spacing > avg_spacing * 1.5 || spacing > prev.font_size.max(curr.font_size) * 2.0 {
        return true;
    }

    if (prev.font_size - curr.font_size).abs() > 1.0 {
        return true;
    }

    // Indentation change; continuation lines of a list item are indented.
    let indent = curr.x - prev.x;
    if indent.abs() > 20.0 && !(prev.starts_with_list_marker() && indent > 0.0) {
        return true;
    }

    false
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// NFC-normalize and strip control characters.
pub(crate) fn normalize_text(text: &str) -> String {
    text.nfc()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check if a character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
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

/// Check if text is a bullet marker (•, -, etc.).
pub(crate) fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "►" | "■" | "●" | "□" | "◆" | "▶" | "➤"
    )
}

/// Check if text is a number-style list marker (1., 2), a., etc.).
pub(crate) fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }

    // "1.", "12.", "1)"
    if let Some(pos) = cleaned.find(|c: char| !c.is_ascii_digit()) {
        let (prefix, suffix) = cleaned.split_at(pos);
        if !prefix.is_empty() && (suffix == "." || suffix == ")") {
            return true;
        }
    }

    // "a.", "B)"
    let chars: Vec<char> = cleaned.chars().collect();
    chars.len() == 2 && chars[0].is_ascii_alphabetic() && (chars[1] == '.' || chars[1] == ')')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f64, y: f64, size: f64) -> TextSpan {
        TextSpan::new(text.to_string(), x, y, size, "Helvetica".to_string())
    }

    #[test]
    fn test_matrix_then() {
        let scale = Matrix {
            a: 2.0,
            d: 2.0,
            ..Matrix::IDENTITY
        };
        let m = Matrix::translation(10.0, 5.0).then(&scale);
        assert_eq!(m.apply(0.0, 0.0), (20.0, 10.0));
        assert_eq!(m.vertical_scale(), 2.0);
    }

    #[test]
    fn test_text_span_bold_detection() {
        let bold = TextSpan::new("A".into(), 0.0, 0.0, 12.0, "Arial-BoldMT".into());
        assert!(bold.is_bold);
        let regular = span("A", 0.0, 0.0, 12.0);
        assert!(!regular.is_bold);
    }

    #[test]
    fn test_font_statistics() {
        let mut stats = FontStatistics::default();
        stats.add_size(12.0, 500);
        stats.add_size(18.0, 20);
        stats.add_size(24.0, 10);
        stats.analyze();

        assert_eq!(stats.body_size, 12.0);
        assert_eq!(stats.heading_sizes, vec![24.0, 18.0]);
        assert_eq!(stats.get_heading_level(24.0, false), 1);
        assert_eq!(stats.get_heading_level(18.0, false), 2);
        assert_eq!(stats.get_heading_level(12.0, true), 0);
    }

    #[test]
    fn test_bold_lines_need_less_size() {
        let mut stats = FontStatistics::default();
        stats.add_size(12.0, 500);
        stats.add_size(13.0, 15);
        stats.add_size(20.0, 10);
        stats.analyze();

        assert_eq!(stats.heading_sizes, vec![20.0, 13.0]);
        assert_eq!(stats.get_heading_level(13.0, false), 0);
        assert_eq!(stats.get_heading_level(13.0, true), 2);
        assert_eq!(stats.get_heading_level(12.4, true), 0);
        assert_eq!(stats.get_heading_level(20.0, false), 1);
    }

    #[test]
    fn test_font_statistics_empty() {
        let mut stats = FontStatistics::default();
        stats.analyze();
        assert_eq!(stats.body_size, 12.0);
        assert_eq!(stats.get_heading_level(12.0, false), 0);
    }

    #[test]
    fn test_group_spans_into_lines() {
        let spans = vec![
            span("world", 110.0, 700.0, 12.0),
            span("Second", 72.0, 685.0, 12.0),
            span("Hello", 72.0, 700.5, 12.0),
        ];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "Hello world");
        assert_eq!(lines[1].text(), "Second");
    }

    #[test]
    fn test_join_spans_cjk_no_space() {
        let spans = vec![span("日本", 0.0, 0.0, 10.0), span("語", 12.0, 0.0, 10.0)];
        assert_eq!(join_spans(&spans), "日本語");
    }

    #[test]
    fn test_blocks_split_on_gap_and_heading() {
        let mut stats = FontStatistics::default();
        let spans = vec![
            span("Introduction", 72.0, 740.0, 20.0),
            span("First line of text", 72.0, 700.0, 12.0),
            span("continues here.", 72.0, 686.0, 12.0),
            span("New paragraph.", 72.0, 640.0, 12.0),
        ];
        stats.add_spans(&spans);
        stats.analyze();

        let lines = detect_headings(group_spans_into_lines(spans), &stats);
        let blocks = group_lines_into_blocks(lines);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].block_type, BlockType::Heading);
        assert_eq!(blocks[0].heading_level, 1);
        assert_eq!(blocks[1].text(), "First line of text continues here.");
        assert_eq!(blocks[1].block_type, BlockType::Paragraph);
        assert_eq!(blocks[2].text(), "New paragraph.");
    }

    #[test]
    fn test_list_items_split() {
        let lines = group_spans_into_lines(vec![
            span("• Apples", 72.0, 700.0, 12.0),
            span("• Pears", 72.0, 686.0, 12.0),
            span("1. Plums", 72.0, 672.0, 12.0),
        ]);
        let blocks = group_lines_into_blocks(lines);
        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.block_type == BlockType::ListItem));
    }

    #[test]
    fn test_block_content_item() {
        let block = TextBlock::new(vec![TextLine::from_spans(vec![span(
            "Body", 72.0, 700.0, 10.0,
        )])]);
        let item = block.to_content_item();
        assert_eq!(item.type_name(), "text");
        assert_eq!(item.text_content(), Some("Body"));
        assert_eq!(item.extra["bbox"], serde_json::json!([72.0, 698.0, 92.0, 708.0]));
    }

    #[test]
    fn test_list_markers() {
        assert!(is_bullet_marker("•"));
        assert!(is_number_marker("12."));
        assert!(is_number_marker("a)"));
        assert!(!is_number_marker("Total"));
        assert!(!is_number_marker("2024"));
    }

    #[test]
    fn test_normalize_text_nfc() {
        // "e" + combining acute accent
        assert_eq!(normalize_text("e\u{0301}"), "é");
        assert_eq!(normalize_text("a\tb"), "a b");
    }
}
