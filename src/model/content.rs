//! Content items extracted from a page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Type tag reported for items without a `type` key.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Content kinds produced by the bundled parser.
///
/// Collaborators are free to emit any other tag; the model stores the tag
/// as a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Body text paragraph
    Text,
    /// Heading line(s), larger than body text
    Heading,
    /// Bulleted or numbered list entry
    ListItem,
    /// Grid of aligned text cells
    Table,
    /// Image XObject drawn on the page
    Image,
}

impl ContentKind {
    /// The tag written to the `type` key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Heading => "heading",
            ContentKind::ListItem => "list_item",
            ContentKind::Table => "table",
            ContentKind::Image => "image",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted unit of page content tagged with a type string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Type tag (e.g. "text", "image", "table"), kept as sent.
    ///
    /// `None` means the key was absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<Value>,

    /// Remaining item fields (text, bbox, rows, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentItem {
    /// Create an item with the given type tag and no other fields.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(Value::String(kind.into())),
            extra: Map::new(),
        }
    }

    /// Create an item of a bundled kind.
    pub fn of_kind(kind: ContentKind) -> Self {
        Self::new(kind.as_str())
    }

    /// Create a text paragraph item.
    pub fn text(text: impl Into<String>) -> Self {
        Self::of_kind(ContentKind::Text).with_field("text", text.into())
    }

    /// Create a heading item.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self::of_kind(ContentKind::Heading)
            .with_field("text", text.into())
            .with_field("level", level)
    }

    /// Create a list item.
    pub fn list_item(text: impl Into<String>) -> Self {
        Self::of_kind(ContentKind::ListItem).with_field("text", text.into())
    }

    /// Create a table item from rows of cell strings.
    pub fn table(rows: Vec<Vec<String>>) -> Self {
        Self::of_kind(ContentKind::Table).with_field("rows", rows)
    }

    /// Create an image item referencing a named XObject.
    pub fn image(name: impl Into<String>, width: Option<u32>, height: Option<u32>) -> Self {
        let mut item = Self::of_kind(ContentKind::Image).with_field("name", name.into());
        if let Some(w) = width {
            item = item.with_field("width", w);
        }
        if let Some(h) = height {
            item = item.with_field("height", h);
        }
        item
    }

    /// Attach a bounding box `[x0, y0, x1, y1]` in page points.
    pub fn with_bbox(self, bbox: [f64; 4]) -> Self {
        // Two decimals keep the JSON readable and stable.
        let rounded: Vec<f64> = bbox.iter().map(|v| (v * 100.0).round() / 100.0).collect();
        self.with_field("bbox", rounded)
    }

    /// Set an arbitrary field.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Type tag, or `"unknown"` when the item has no string tag.
    pub fn type_name(&self) -> &str {
        self.kind.as_ref().and_then(Value::as_str).unwrap_or(UNKNOWN_TYPE)
    }

    /// Text payload, if the item carries one.
    pub fn text_content(&self) -> Option<&str> {
        self.extra.get("text").and_then(Value::as_str)
    }
}

/// Maps a present key to `Some`, including an explicit `null`.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_type_is_unknown() {
        let item: ContentItem = serde_json::from_value(json!({"text": "orphan"})).unwrap();
        assert_eq!(item.kind, None);
        assert_eq!(item.type_name(), "unknown");
        assert_eq!(item.text_content(), Some("orphan"));
    }

    #[test]
    fn test_heading_fields() {
        let item = ContentItem::heading("Introduction", 1);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({"type": "heading", "text": "Introduction", "level": 1})
        );
    }

    #[test]
    fn test_table_rows() {
        let item = ContentItem::table(vec![
            vec!["Name".into(), "Qty".into()],
            vec!["Bolt".into(), "12".into()],
        ]);
        assert_eq!(item.type_name(), "table");
        assert_eq!(item.extra["rows"][1][1], json!("12"));
    }

    #[test]
    fn test_bbox_rounding() {
        let item = ContentItem::text("x").with_bbox([10.004, 20.0, 30.556, 40.1]);
        assert_eq!(item.extra["bbox"], json!([10.0, 20.0, 30.56, 40.1]));
    }

    #[test]
    fn test_image_without_dimensions() {
        let item = ContentItem::image("Im1", None, None);
        assert!(!item.extra.contains_key("width"));
        assert_eq!(item.extra["name"], json!("Im1"));
    }

    #[test]
    fn test_null_type_survives_round_trip() {
        let raw = r#"{"type":null,"text":"x"}"#;
        let item: ContentItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.kind, Some(Value::Null));
        assert_eq!(item.type_name(), "unknown");
        assert_eq!(serde_json::to_string(&item).unwrap(), raw);
    }

    #[test]
    fn test_non_string_type_is_kept() {
        let item: ContentItem = serde_json::from_value(json!({"type": 7})).unwrap();
        assert_eq!(item.type_name(), "unknown");
        assert_eq!(serde_json::to_value(&item).unwrap(), json!({"type": 7}));
    }

    #[test]
    fn test_extra_keys_keep_their_order() {
        let raw = r#"{"type":"text","zeta":1,"alpha":2}"#;
        let item: ContentItem = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&item).unwrap(), raw);
    }
}
