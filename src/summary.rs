//! Page and content-type summary of a parse result.
//!
//! The summary is what the runner prints after writing the JSON file:
//!
//! ```text
//! Summary:
//! Pages processed: 2
//!   Page 1: 3 content items
//!     Types: 2 text, 1 image
//!   Page 2: 0 content items
//! ```

use std::fmt;

use indexmap::IndexMap;

use crate::model::{Page, ParseResult};

/// Content-type frequencies in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTally {
    counts: IndexMap<String, usize>,
}

impl TypeTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the item types of a page.
    pub fn from_page(page: &Page) -> Self {
        let mut tally = Self::new();
        for item in page.items() {
            tally.record(item.type_name());
        }
        tally
    }

    /// Record one occurrence of a type.
    pub fn record(&mut self, type_name: &str) {
        match self.counts.get_mut(type_name) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(type_name.to_string(), 1);
            }
        }
    }

    /// Count for a type (0 if never seen).
    pub fn get(&self, type_name: &str) -> usize {
        self.counts.get(type_name).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct types.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(type, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl fmt::Display for TypeTally {
    /// Renders `2 text, 1 image`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (type_name, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", count, type_name)?;
        }
        Ok(())
    }
}

/// Summary line data for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    /// Page number as reported by the collaborator
    pub page_number: u32,
    /// Number of content items (0 when absent)
    pub content_count: usize,
    /// Type frequencies
    pub types: TypeTally,
}

impl PageSummary {
    /// Summarize one page.
    pub fn from_page(page: &Page) -> Self {
        Self {
            page_number: page.page_number,
            content_count: page.content_count(),
            types: TypeTally::from_page(page),
        }
    }
}

/// Summary of every page in a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Per-page summaries in input order
    pub pages: Vec<PageSummary>,
}

impl Summary {
    /// Summarize a result; `None` when the result has no `pages` key.
    pub fn from_result(result: &ParseResult) -> Option<Self> {
        let pages = result.pages.as_ref()?;
        Some(Self {
            pages: pages.iter().map(PageSummary::from_page).collect(),
        })
    }

    /// Number of pages processed.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Type frequencies across all pages, in first-seen order.
    pub fn document_types(&self) -> TypeTally {
        let mut tally = TypeTally::new();
        for page in &self.pages {
            for (type_name, count) in page.types.iter() {
                for _ in 0..count {
                    tally.record(type_name);
                }
            }
        }
        tally
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "Pages processed: {}", self.page_count())?;
        for page in &self.pages {
            writeln!(
                f,
                "  Page {}: {} content items",
                page.page_number, page.content_count
            )?;
            if !page.types.is_empty() {
                writeln!(f, "    Types: {}", page.types)?;
            }
        }
        Ok(())
    }
}
