//! Parsing options and configuration.

use std::time::Duration;

use crate::source::FetchOptions;

use super::table::TableDetectorConfig;

/// Options for parsing PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// HTTP settings used when the source is a URL
    pub fetch: FetchOptions,

    /// Maximum number of pages to parse (0 = all)
    pub max_pages: u32,

    /// Whether to emit image content items
    pub extract_images: bool,

    /// Whether to run table detection
    pub detect_tables: bool,

    /// Thresholds used by table detection
    pub table_config: TableDetectorConfig,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (keep going past broken pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the HTTP settings.
    pub fn with_fetch(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// Set the overall HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetch.timeout = timeout;
        self
    }

    /// Limit the number of parsed pages.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Enable or disable image items.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Set the table detection thresholds.
    pub fn with_table_config(mut self, config: TableDetectorConfig) -> Self {
        self.table_config = config;
        self
    }

    /// Whether page `page_num` (1-based) falls within the page limit.
    pub fn includes_page(&self, page_num: u32) -> bool {
        self.max_pages == 0 || page_num <= self.max_pages
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            fetch: FetchOptions::default(),
            max_pages: 0,
            extract_images: true,
            detect_tables: true,
            table_config: TableDetectorConfig::default(),
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Keep pages that fail to parse, with empty content
    Lenient,
}
