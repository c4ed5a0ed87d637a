//! Document model and its two serializations.
//!
//! The JSON shape is fixed:
//!
//! ```text
//! {"type":"pdf","pages":["<page 0 text>","<page 1 text>",...]}
//! ```
//!
//! Field order follows struct declaration order and `serde_json::to_string`
//! emits no whitespace, so the output is byte-identical across runs.

use serde::{Deserialize, Serialize};

/// Type tag written for every document this crate extracts.
pub const PDF_DOCUMENT_TYPE: &str = "pdf";

/// Text extracted from one page. Serializes as a bare JSON string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    pub text: String,
}

impl Page {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The assembled document: a type tag plus pages in page-index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub kind: String,
    pub pages: Vec<Page>,
}

impl Document {
    /// An empty PDF document, ready for pages to be appended.
    pub fn pdf() -> Self {
        Self {
            kind: PDF_DOCUMENT_TYPE.to_string(),
            pages: Vec::new(),
        }
    }

    /// All page texts joined with no separator.
    pub fn raw_text(&self) -> String {
        let len = self.pages.iter().map(|p| p.text.len()).sum();
        let mut out = String::with_capacity(len);
        for page in &self.pages {
            out.push_str(&page.text);
        }
        out
    }

    /// Compact JSON rendering.
    pub fn to_json(&self) -> String {
        // A struct of strings cannot fail to serialize; the fallback keeps the
        // function total without a panic path.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Which serialization to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Page texts concatenated, no separators, no trailing newline.
    Raw,
    /// `{"type":...,"pages":[...]}`, compact. (default)
    #[default]
    Json,
}

/// Serialize `document` in the requested format.
pub fn render(document: &Document, format: OutputFormat) -> String {
    match format {
        OutputFormat::Raw => document.raw_text(),
        OutputFormat::Json => document.to_json(),
    }
}
