//! # pdfprobe
//!
//! Smoke-test harness for PDF parsers.
//!
//! A run hands one source (a URL or a local path) to a [`DocumentParser`],
//! writes the returned [`ParseResult`] as pretty-printed JSON and prints a
//! per-page summary of content counts and content types.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfprobe::{PdfParser, RunOptions, SmokeTest};
//!
//! fn main() -> pdfprobe::Result<()> {
//!     let options = RunOptions::new()
//!         .with_source("report.pdf")
//!         .with_output("report.json");
//!
//!     let stdout = std::io::stdout();
//!     SmokeTest::new(options).run(&PdfParser::new(), &mut stdout.lock())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pluggable parser**: anything implementing [`DocumentParser`]
//! - **Built-in parser**: lopdf-based text, heading, list, table and image extraction
//! - **Remote sources**: HTTP(S) download via the default `remote` feature
//! - **Lossless output**: unknown fields in a result survive the JSON round trip

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod runner;
pub mod source;
pub mod summary;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, is_pdf_bytes, PdfFormat};
pub use error::{Error, Result};
pub use model::{ContentItem, ContentKind, Metadata, Page, ParseResult};
pub use parser::{DocumentParser, ErrorMode, ParseOptions, PdfParser};
pub use runner::{run, write_json, RunOptions, SmokeTest, DEFAULT_OUTPUT, DEFAULT_URL};
pub use source::{FetchOptions, Source};
pub use summary::{PageSummary, Summary, TypeTally};

/// Parse a URL or file path with default options.
///
/// # Example
///
/// ```no_run
/// let result = pdfprobe::parse_source("document.pdf").unwrap();
/// println!("Pages: {}", result.page_count());
/// ```
pub fn parse_source(source: &str) -> Result<ParseResult> {
    PdfParser::new().parse(source)
}

/// Parse a URL or file path with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfprobe::{parse_source_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().with_max_pages(5);
/// let result = parse_source_with_options("document.pdf", options).unwrap();
/// ```
pub fn parse_source_with_options(source: &str, options: ParseOptions) -> Result<ParseResult> {
    PdfParser::with_options(options).parse(source)
}

/// Parse PDF data already in memory; `label` is recorded as the result's source.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("document.pdf").unwrap();
/// let result = pdfprobe::parse_bytes(&data, "document.pdf").unwrap();
/// ```
pub fn parse_bytes(data: &[u8], label: &str) -> Result<ParseResult> {
    PdfParser::new().parse_bytes(data, label)
}

/// Summarize a result; `None` when it has no `pages` key.
pub fn summarize(result: &ParseResult) -> Option<Summary> {
    Summary::from_result(result)
}
