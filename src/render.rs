//! Page rendering and annotation.
//!
//! Rendering goes through two small traits modelled on the usual PDF page
//! API: a [`PageRenderer`] loads pages, and each loaded [`PageView`] can
//! search for text (returning boxes in page space) and rasterize itself.
//! The [`PageAnnotator`] draws outlines over every occurrence of the
//! selected terms on top of the raster and encodes the result as PNG.
//!
//! [`PdfRenderer`] draws PDF pages with MuPDF, keeping each page's own size
//! and layout. [`TextLayoutRenderer`] covers documents that are only text:
//! it lays the page text out on a fixed page geometry and derives both
//! occurrence boxes and the raster from that layout.

use image::RgbImage;

use crate::document::PageNumber;
use crate::error::Result;

pub mod annotator;
pub mod geometry;
pub mod layout;
pub mod pdf;
pub mod raster;
mod scratch;

pub use annotator::{AnnotatedPages, AnnotatorConfig, PageAnnotator, Scratch, SkippedPage};
pub use geometry::{PageGeometry, Rect};
pub use layout::{TextLayout, TextLayoutRenderer};
pub use pdf::{PdfPage, PdfRenderer};

/// Loads pages for rendering.
pub trait PageRenderer {
    type Page: PageView;

    /// Load a page (1-based).
    fn load_page(&self, page: PageNumber) -> Result<Self::Page>;
}

/// A loaded page.
pub trait PageView {
    /// Page width and height in points.
    fn size(&self) -> (f32, f32);

    /// Boxes, in points with a top-left origin, of every case-insensitive
    /// occurrence of `needle`.
    fn search_for(&self, needle: &str) -> Vec<Rect>;

    /// Render the page at `dpi` dots per inch.
    fn rasterize(&self, dpi: u32) -> Result<RgbImage>;
}
