//! Paginated documents.
//!
//! The core only ever reads documents through the [`Document`] trait: a page
//! count and the extractable text of each page. Pages are numbered from 1
//! and the numbering is stable for the lifetime of the document.

use std::ops::RangeInclusive;

use crate::error::{Result, TermscopeError};

pub mod pdf;
pub mod text;

pub use pdf::PdfDocument;
pub use text::TextDocument;

/// 1-based page number.
pub type PageNumber = usize;

/// A read-only paginated document.
///
/// Implementations are not required to be thread safe; a document is owned
/// by the request that is reading it.
pub trait Document {
    /// A name for logs and error messages (file name, upload handle, ...).
    fn name(&self) -> &str;

    /// Number of pages.
    fn page_count(&self) -> usize;

    /// The extractable text of a page.
    fn page_text(&self, page: PageNumber) -> Result<String>;

    /// All valid page numbers in order.
    fn page_numbers(&self) -> RangeInclusive<PageNumber> {
        1..=self.page_count()
    }

    /// The underlying PDF, for documents that have one. Used to pick a
    /// renderer that draws the real page.
    fn as_pdf(&self) -> Option<&PdfDocument> {
        None
    }
}

/// Check that `page` addresses a page of `doc` and return its 0-based index.
pub fn page_index(doc: &(impl Document + ?Sized), page: PageNumber) -> Result<usize> {
    if page == 0 || page > doc.page_count() {
        return Err(TermscopeError::invalid_argument(format!(
            "page {} out of range for '{}' ({} pages)",
            page,
            doc.name(),
            doc.page_count()
        )));
    }
    Ok(page - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_index_bounds() {
        let doc = TextDocument::from_pages("doc", vec!["one", "two"]);
        assert_eq!(page_index(&doc, 1).unwrap(), 0);
        assert_eq!(page_index(&doc, 2).unwrap(), 1);
        assert!(page_index(&doc, 0).is_err());
        assert!(page_index(&doc, 3).is_err());
        assert_eq!(doc.page_numbers().collect::<Vec<_>>(), vec![1, 2]);
    }
}
