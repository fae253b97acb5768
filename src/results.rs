use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keys a page's metadata may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataKey {
    /// `html[lang]` or the `content-language` meta tag
    Language,
    Description,
    /// Comma-separated `keywords` meta, split into a list
    Keywords,
    OpenGraphType,
    OpenGraphLocale,
    /// `category` / `article:section` meta, else the last breadcrumb entry
    Category,
    /// The URL the page was fetched from
    SourceUrl,
}

/// A metadata value: either a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    List(Vec<String>),
}

impl MetadataValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            MetadataValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetadataValue::List(items) => Some(items),
            MetadataValue::Text(_) => None,
        }
    }
}

pub type Metadata = BTreeMap<MetadataKey, MetadataValue>;

/// Structured record produced for each fetched and parsed page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Canonical URL of the page
    pub url: String,

    /// Best-effort title, empty when the page has none
    pub title: String,

    /// Extracted text content with whitespace collapsed
    pub text_content: String,

    /// Raw link targets as written in the markup, first-seen order
    pub links: Vec<String>,

    pub metadata: Metadata,
}

impl PageRecord {
    /// Create a new page record with no metadata
    pub fn new(url: String, title: String, text_content: String, links: Vec<String>) -> Self {
        Self {
            url,
            title,
            text_content,
            links,
            metadata: Metadata::new(),
        }
    }

    pub fn meta(&self, key: MetadataKey) -> Option<&MetadataValue> {
        self.metadata.get(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let mut record = PageRecord::new(
            "https://example.com/".to_string(),
            "Example".to_string(),
            "Hello".to_string(),
            vec!["/about".to_string()],
        );
        record.metadata.insert(
            MetadataKey::OpenGraphType,
            MetadataValue::Text("website".to_string()),
        );
        record.metadata.insert(
            MetadataKey::Keywords,
            MetadataValue::List(vec!["a".to_string(), "b".to_string()]),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["textContent"], "Hello");
        assert_eq!(json["metadata"]["openGraphType"], "website");
        assert_eq!(json["metadata"]["keywords"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_value_accessors() {
        let text = MetadataValue::Text("en".to_string());
        assert_eq!(text.as_text(), Some("en"));
        assert!(text.as_list().is_none());

        let list = MetadataValue::List(vec!["x".to_string()]);
        assert_eq!(list.as_list().map(|l| l.len()), Some(1));
        assert!(list.as_text().is_none());
    }
}
