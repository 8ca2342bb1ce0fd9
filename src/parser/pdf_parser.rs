//! PDF document parser using lopdf.

use crate::detect::detect_format_from_bytes;
use crate::error::Result;
use crate::model::{ContentItem, Page, ParseResult};
use crate::source::Source;

use super::backend::{LopdfBackend, PageId, PdfBackend};
use super::layout::{
    detect_headings, group_lines_into_blocks, group_spans_into_lines, interpret_page,
    FontStatistics,
};
use super::options::{ErrorMode, ParseOptions};
use super::table::TableDetector;
use super::DocumentParser;

/// Reference PDF parser.
///
/// Stateless apart from its options; one instance can parse any number of
/// sources.
#[derive(Debug, Clone, Default)]
pub struct PdfParser {
    options: ParseOptions,
}

impl PdfParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Acquire and parse a classified source.
    pub fn parse_source(&self, source: &Source) -> Result<ParseResult> {
        let data = source.load(&self.options.fetch)?;
        self.parse_bytes(&data, &source.to_string())
    }

    /// Parse in-memory PDF data; `label` becomes the result's `source`.
    pub fn parse_bytes(&self, data: &[u8], label: &str) -> Result<ParseResult> {
        let format = detect_format_from_bytes(data)?;
        log::info!("Parsing {} ({}, {} bytes)", label, format, data.len());

        let backend = LopdfBackend::load_bytes(&data[format.header_offset..])?;
        if backend.is_encrypted() {
            log::warn!("{} is encrypted; text may be unreadable", label);
        }

        let mut result = ParseResult::new().with_source(label);
        result.metadata = Some(backend.metadata());

        for (page_num, page_id) in backend.pages() {
            if !self.options.includes_page(page_num) {
                log::debug!("Page limit {} reached", self.options.max_pages);
                break;
            }
            result.add_page(self.parse_page(&backend, page_num, page_id)?);
        }

        log::info!(
            "Parsed {} pages, {} content items",
            result.page_count(),
            result.content_count()
        );
        Ok(result)
    }

    /// Parse one page, applying the error mode.
    fn parse_page<B: PdfBackend + ?Sized>(
        &self,
        backend: &B,
        page_num: u32,
        page_id: PageId,
    ) -> Result<Page> {
        let (width, height) = backend.page_dimensions(page_id);
        let mut page = Page::with_dimensions(page_num, width, height);

        match self.extract_items(backend, page_id) {
            Ok(items) => {
                for item in items {
                    page.push(item);
                }
            }
            Err(e) => {
                if self.options.error_mode == ErrorMode::Strict {
                    return Err(e);
                }
                log::warn!("Failed to extract content from page {}: {}", page_num, e);
            }
        }

        Ok(page)
    }

    /// Extract a page's content items, top to bottom.
    fn extract_items<B: PdfBackend + ?Sized>(
        &self,
        backend: &B,
        page_id: PageId,
    ) -> Result<Vec<ContentItem>> {
        let elements = interpret_page(backend, page_id)?;

        let mut stats = FontStatistics::default();
        stats.add_spans(&elements.spans);
        stats.analyze();

        let mut lines = group_spans_into_lines(elements.spans);
        let mut placed: Vec<(f64, ContentItem)> = Vec::new();

        if self.options.detect_tables {
            let detector = TableDetector::with_config(self.options.table_config.clone());
            let (tables, remaining) = detector.detect(lines);
            for table in &tables {
                log::debug!(
                    "Table with {} rows and {} columns",
                    table.rows.len(),
                    table.column_count()
                );
            }
            placed.extend(tables.iter().map(|t| (t.top(), t.to_content_item())));
            lines = remaining;
        }

        let blocks = group_lines_into_blocks(detect_headings(lines, &stats));
        placed.extend(blocks.iter().map(|b| (b.top(), b.to_content_item())));

        if self.options.extract_images {
            placed.extend(
                elements
                    .images
                    .iter()
                    .map(|img| (img.bbox[3], img.to_content_item())),
            );
        }

        // Stable sort; ties keep insertion order
        placed.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(placed.into_iter().map(|(_, item)| item).collect())
    }
}

impl DocumentParser for PdfParser {
    fn parse(&self, source: &str) -> Result<ParseResult> {
        let source = Source::parse(source)?;
        self.parse_source(&source)
    }
}
