//! Parse result model.
//!
//! These types describe what a parsing collaborator hands back to the
//! runner: a result with optional pages, each page holding an ordered list
//! of typed content items. Keys the types do not name are kept in an
//! `extra` map so that a result survives a JSON round trip unchanged.

mod content;
mod page;
mod result;

pub use content::{ContentItem, ContentKind, UNKNOWN_TYPE};
pub use page::Page;
pub use result::{Metadata, ParseResult};
