//! Input elements produced by the PDF partitioner.
//!
//! A partitioned document is a JSON array of elements:
//!
//! ```json
//! [{"type": "Title", "text": "YANG HADIR", "metadata": {"text_as_html": null}}]
//! ```
//!
//! Elements are loaded once, in order, and never mutated afterwards.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::types::ContentElement;

/// Partitioner element category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Title,
    ListItem,
    NarrativeText,
    Table,
    Image,
    /// Any other element type, keeping the partitioner's type name.
    Other(String),
}

impl Category {
    /// Map a partitioner type name to a category.
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Title" => Self::Title,
            "ListItem" => Self::ListItem,
            "NarrativeText" => Self::NarrativeText,
            "Table" => Self::Table,
            "Image" => Self::Image,
            other => Self::Other(other.to_string()),
        }
    }

    /// Type name as emitted by the partitioner.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Title => "Title",
            Self::ListItem => "ListItem",
            Self::NarrativeText => "NarrativeText",
            Self::Table => "Table",
            Self::Image => "Image",
            Self::Other(name) => name,
        }
    }

    /// Lowercased type name, used as `ContentElement.type`.
    #[must_use]
    pub fn kind(&self) -> String {
        self.type_name().to_lowercase()
    }
}

/// One partitioned element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNode {
    pub category: Category,
    pub text: String,
    pub rendered_html: Option<String>,
    pub embedded_image: Option<String>,
}

impl SourceNode {
    /// Create a node with text only.
    #[must_use]
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
            rendered_html: None,
            embedded_image: None,
        }
    }

    #[must_use]
    pub fn title(text: impl Into<String>) -> Self {
        Self::new(Category::Title, text)
    }

    #[must_use]
    pub fn narrative(text: impl Into<String>) -> Self {
        Self::new(Category::NarrativeText, text)
    }

    #[must_use]
    pub fn list_item(text: impl Into<String>) -> Self {
        Self::new(Category::ListItem, text)
    }

    /// Attach rendered HTML (tables).
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.rendered_html = Some(html.into());
        self
    }

    /// Attach a base64 image payload.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.embedded_image = Some(image.into());
        self
    }

    #[must_use]
    pub fn is_title(&self) -> bool {
        self.category == Category::Title
    }

    #[must_use]
    pub fn is_list_item(&self) -> bool {
        self.category == Category::ListItem
    }

    /// Content element carrying the rendered HTML when present, else the text.
    #[must_use]
    pub fn content_element(&self) -> ContentElement {
        ContentElement {
            kind: self.category.kind(),
            value: self
                .rendered_html
                .clone()
                .unwrap_or_else(|| self.text.clone()),
            image: self.embedded_image.clone(),
        }
    }

    /// Content element with an explicit value (speakline remainder).
    #[must_use]
    pub fn content_element_with(&self, value: impl Into<String>) -> ContentElement {
        ContentElement {
            kind: self.category.kind(),
            value: value.into(),
            image: self.embedded_image.clone(),
        }
    }
}

/// Element shape as serialized by the partitioner.
#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    metadata: RawMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    text_as_html: Option<String>,
    #[serde(default)]
    image_base64: Option<String>,
}

impl From<RawElement> for SourceNode {
    fn from(raw: RawElement) -> Self {
        Self {
            category: Category::from_type_name(&raw.kind),
            text: raw.text,
            rendered_html: raw.metadata.text_as_html.filter(|html| !html.is_empty()),
            embedded_image: raw.metadata.image_base64,
        }
    }
}

/// Parse a partitioned document from its JSON text.
pub fn parse_nodes(json: &str) -> Result<Vec<SourceNode>> {
    let raw: Vec<RawElement> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(SourceNode::from).collect())
}

/// Load a partitioned document from a JSON file.
pub fn load_nodes(path: &Path) -> Result<Vec<SourceNode>> {
    let json = fs::read_to_string(path)?;
    parse_nodes(&json)
}

/// Normalized header comparison key (uppercased, trimmed).
fn header_key(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Page numbers are nodes consisting only of digits.
fn is_page_number(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Drop repeated page headers and page numbers.
///
/// The page header is taken to be the text of the very first node, so the
/// first node itself is dropped as well.
#[must_use]
pub fn filter_nodes(nodes: &[SourceNode]) -> Vec<SourceNode> {
    let Some(first) = nodes.first() else {
        return Vec::new();
    };
    let header = header_key(&first.text);

    nodes
        .iter()
        .filter(|node| header_key(&node.text) != header && !is_page_number(&node.text))
        .cloned()
        .collect()
}
