//! Page-level types.

use super::ContentItem;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single page of the parse result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Page width in points (1 point = 1/72 inch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Page height in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Content items in reading order; `None` when the key is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<ContentItem>>,

    /// Any other page fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Page {
    /// Create a page with an empty content list.
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            width: None,
            height: None,
            content: Some(Vec::new()),
            extra: Map::new(),
        }
    }

    /// Create a page with the given dimensions.
    pub fn with_dimensions(page_number: u32, width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::new(page_number)
        }
    }

    /// Append a content item.
    pub fn push(&mut self, item: ContentItem) {
        self.content.get_or_insert_with(Vec::new).push(item);
    }

    /// Content items; empty when the key is absent.
    pub fn items(&self) -> &[ContentItem] {
        self.content.as_deref().unwrap_or_default()
    }

    /// Number of content items (0 when absent).
    pub fn content_count(&self) -> usize {
        self.items().len()
    }

    /// Check if the page has no content items.
    pub fn is_empty(&self) -> bool {
        self.content_count() == 0
    }

    /// Plain text of all items carrying text, one item per line.
    pub fn plain_text(&self) -> String {
        self.items()
            .iter()
            .filter_map(ContentItem::text_content)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
