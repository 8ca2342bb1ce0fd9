//! PDF parsing module.
//!
//! [`DocumentParser`] is the contract the runner depends on; [`PdfParser`]
//! is the lopdf-backed implementation shipped with the crate.

pub mod backend;
mod layout;
mod options;
mod pdf_parser;
mod table;

pub use layout::{
    interpret_page, BlockType, FontStatistics, PageElements, PlacedImage, TextBlock, TextLine,
    TextSpan,
};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
pub use table::{DetectedTable, TableDetector, TableDetectorConfig};

use crate::error::Result;
use crate::model::ParseResult;

/// Anything that turns a source (URL or path) into a [`ParseResult`].
pub trait DocumentParser {
    /// Parse one source synchronously.
    fn parse(&self, source: &str) -> Result<ParseResult>;
}

impl<T: DocumentParser + ?Sized> DocumentParser for &T {
    fn parse(&self, source: &str) -> Result<ParseResult> {
        (**self).parse(source)
    }
}

impl<T: DocumentParser + ?Sized> DocumentParser for Box<T> {
    fn parse(&self, source: &str) -> Result<ParseResult> {
        (**self).parse(source)
    }
}
