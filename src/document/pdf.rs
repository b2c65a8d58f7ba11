//! PDF documents backed by `lopdf`.
//!
//! Text comes from `lopdf`. The source bytes are kept alongside the parsed
//! tree so the page renderer can open the same file.

use std::path::Path;

use crate::document::{Document, PageNumber, page_index};
use crate::error::{Result, TermscopeError};

/// A parsed PDF.
///
/// Text is extracted lazily per page; the parsed object tree is never
/// modified after loading.
pub struct PdfDocument {
    name: String,
    inner: lopdf::Document,
    bytes: Vec<u8>,
    /// PDF page numbers in page order, as keyed by `lopdf`.
    pages: Vec<u32>,
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("name", &self.name)
            .field("pages", &self.pages.len())
            .finish()
    }
}

impl PdfDocument {
    /// Parse a PDF held in memory.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| TermscopeError::document(format!("failed to parse '{}': {}", name, e)))?;
        Self::from_lopdf(name, inner, bytes.to_vec())
    }

    /// Open and parse a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf")
            .to_string();
        Self::from_bytes(name, &bytes)
    }

    /// The raw PDF as it was loaded.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn from_lopdf(name: String, inner: lopdf::Document, bytes: Vec<u8>) -> Result<Self> {
        if inner.is_encrypted() {
            return Err(TermscopeError::document(format!(
                "'{}' is encrypted and could not be decrypted",
                name
            )));
        }
        let pages = inner.get_pages().keys().copied().collect();
        Ok(PdfDocument {
            name,
            inner,
            bytes,
            pages,
        })
    }
}

impl Document for PdfDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: PageNumber) -> Result<String> {
        let index = page_index(self, page)?;
        self.inner
            .extract_text(&[self.pages[index]])
            .map_err(|e| {
                TermscopeError::document(format!(
                    "failed to extract text from page {} of '{}': {}",
                    page, self.name, e
                ))
            })
    }

    fn as_pdf(&self) -> Option<&PdfDocument> {
        Some(self)
    }
}
