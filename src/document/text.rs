//! In-memory text documents.

use std::fs;
use std::path::Path;

use crate::document::{Document, PageNumber, page_index};
use crate::error::Result;

/// Form feed, the page separator `pdftotext` and friends emit.
const FORM_FEED: char = '\u{000C}';

/// A document whose pages are held as plain strings.
#[derive(Clone, Debug, Default)]
pub struct TextDocument {
    name: String,
    pages: Vec<String>,
}

impl TextDocument {
    /// Create a document from page texts.
    pub fn from_pages<S: Into<String>>(name: impl Into<String>, pages: Vec<S>) -> Self {
        TextDocument {
            name: name.into(),
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    /// Split text into pages on form feeds.
    ///
    /// A trailing form feed does not open an extra page, and empty input
    /// yields a document with no pages.
    ///
    /// ```
    /// use termscope::document::{Document, TextDocument};
    ///
    /// let doc = TextDocument::from_text("notes", "first\u{000C}second\u{000C}");
    /// assert_eq!(doc.page_count(), 2);
    /// ```
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let mut pages: Vec<String> = text.split(FORM_FEED).map(str::to_string).collect();
        if pages.last().is_some_and(|p| p.is_empty()) {
            pages.pop();
        }
        TextDocument {
            name: name.into(),
            pages,
        }
    }

    /// Read a UTF-8 text file and split it into pages on form feeds.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        Ok(Self::from_text(name, &text))
    }
}

impl Document for TextDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: PageNumber) -> Result<String> {
        let index = page_index(self, page)?;
        Ok(self.pages[index].clone())
    }
}
