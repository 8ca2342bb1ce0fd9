//! Top-level parse result.

use super::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured output of a PDF-parsing operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// The URL or path that was parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Document metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Pages in order; `None` when the collaborator reported no `pages` key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<Page>>,

    /// Any other top-level fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParseResult {
    /// Create an empty result with an empty page list.
    pub fn new() -> Self {
        Self {
            pages: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Set the source the result was produced from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Append a page.
    pub fn add_page(&mut self, page: Page) {
        self.pages.get_or_insert_with(Vec::new).push(page);
    }

    /// Pages; empty when the key is absent.
    pub fn pages(&self) -> &[Page] {
        self.pages.as_deref().unwrap_or_default()
    }

    /// Whether the `pages` key is present.
    pub fn has_pages(&self) -> bool {
        self.pages.is_some()
    }

    /// Number of pages (0 when absent).
    pub fn page_count(&self) -> usize {
        self.pages().len()
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_number: u32) -> Option<&Page> {
        self.pages().iter().find(|p| p.page_number == page_number)
    }

    /// Total content items across all pages.
    pub fn content_count(&self) -> usize {
        self.pages().iter().map(Page::content_count).sum()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Document subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Creator application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// PDF producer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,

    /// Creation date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7")
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pdf_version: String,

    /// Total number of pages in the document
    #[serde(skip_serializing_if = "is_zero")]
    pub page_count: u32,

    /// Whether the document is encrypted
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub encrypted: bool,

    /// Any other metadata fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    /// Create metadata with a PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}
