//! # termscope
//!
//! Locate taxonomy terms inside paginated documents, pull the surrounding
//! sentences for every hit and render the matched pages with each occurrence
//! boxed.
//!
//! ## Features
//!
//! - Category → subcategory → term taxonomies loaded from tabular sources
//! - Unicode sentence segmentation with lossless byte spans
//! - Case-insensitive sentence-level matching with bounded context windows
//! - Idempotent inline highlighting
//! - Per-term occurrence statistics
//! - Page rasterization with outlined occurrences, PNG output
//!
//! ## Example
//!
//! ```
//! use termscope::document::TextDocument;
//! use termscope::pipeline::{ExtractorConfig, KeywordExtractor};
//! use termscope::term::TermSet;
//!
//! let doc = TextDocument::from_pages(
//!     "report",
//!     vec!["The fund reports GHG emissions annually.", "No climate data here."],
//! );
//! let terms = TermSet::from_csv("GHG emissions");
//!
//! let extractor = KeywordExtractor::new(ExtractorConfig::default());
//! let extraction = extractor.extract(&doc, &terms).unwrap();
//!
//! assert_eq!(extraction.matches.page_numbers().collect::<Vec<_>>(), vec![1]);
//! assert_eq!(extraction.statistics[0].occurrences, 1);
//! ```

pub mod cli;
pub mod document;
pub mod error;
pub mod highlight;
pub mod pipeline;
pub mod render;
pub mod search;
pub mod segment;
pub mod stats;
pub mod taxonomy;
pub mod term;

pub mod prelude {
    pub use crate::document::{Document, PageNumber, PdfDocument, TextDocument};
    pub use crate::error::{Result, TermscopeError};
    pub use crate::highlight::{HighlightConfig, Highlighter};
    pub use crate::pipeline::{Extraction, ExtractionReport, ExtractorConfig, KeywordExtractor};
    pub use crate::render::{AnnotatedPages, AnnotatorConfig, PageAnnotator};
    pub use crate::search::{ContextRadius, Match, MatchLocator, MatchSet};
    pub use crate::stats::Statistic;
    pub use crate::taxonomy::{CategorySchemas, Table, Taxonomy};
    pub use crate::term::{Term, TermSet};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
