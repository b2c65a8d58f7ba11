//! PDF pages rendered by MuPDF.
//!
//! Boxes come from MuPDF's structured-text search, which ignores case, and
//! are reported relative to the page's top-left corner. The raster is the
//! page itself at the requested resolution, so outlines land on the printed
//! words.

use image::{Rgb, RgbImage};
use log::warn;
use mupdf::{Colorspace, Matrix};

use crate::document::{Document, PageNumber, PdfDocument};
use crate::error::{Result, TermscopeError};
use crate::render::geometry::{POINTS_PER_INCH, Rect};
use crate::render::layout::MAX_RASTER_PIXELS;
use crate::render::{PageRenderer, PageView};

/// Hits returned per needle and page.
const MAX_HITS: u32 = 512;

/// Renders the pages of a [`PdfDocument`].
pub struct PdfRenderer {
    name: String,
    inner: mupdf::Document,
    page_count: usize,
}

impl PdfRenderer {
    /// Open `doc` with MuPDF.
    pub fn new(doc: &PdfDocument) -> Result<Self> {
        Self::from_bytes(doc.name(), doc.bytes())
    }

    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self> {
        let open_error = |e: mupdf::Error| {
            TermscopeError::document(format!("failed to open '{}' for rendering: {}", name, e))
        };

        let inner = mupdf::Document::from_bytes(bytes, "application/pdf").map_err(open_error)?;
        let page_count = inner.page_count().map_err(open_error)?.max(0) as usize;
        Ok(PdfRenderer {
            name: name.to_string(),
            inner,
            page_count,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

impl PageRenderer for PdfRenderer {
    type Page = PdfPage;

    fn load_page(&self, page: PageNumber) -> Result<PdfPage> {
        if page == 0 || page > self.page_count {
            return Err(TermscopeError::invalid_argument(format!(
                "page {} out of range for '{}' ({} pages)",
                page, self.name, self.page_count
            )));
        }
        let render_error = |e: mupdf::Error| TermscopeError::render(page, e.to_string());

        let inner = self
            .inner
            .load_page((page - 1) as i32)
            .map_err(render_error)?;
        let bounds = inner.bounds().map_err(render_error)?;
        Ok(PdfPage {
            number: page,
            inner,
            bounds: Rect::new(bounds.x0, bounds.y0, bounds.x1, bounds.y1),
        })
    }
}

/// A loaded PDF page.
pub struct PdfPage {
    number: PageNumber,
    inner: mupdf::Page,
    /// Page bounds in MuPDF space (top-left origin, y down).
    bounds: Rect,
}

impl PageView for PdfPage {
    fn size(&self) -> (f32, f32) {
        (self.bounds.width(), self.bounds.height())
    }

    fn search_for(&self, needle: &str) -> Vec<Rect> {
        let quads = match self.inner.search(needle, MAX_HITS) {
            Ok(quads) => quads,
            Err(e) => {
                warn!("Search for '{}' failed on page {}: {}", needle, self.number, e);
                return Vec::new();
            }
        };

        quads
            .iter()
            .map(|quad| {
                let xs = [quad.ul.x, quad.ur.x, quad.ll.x, quad.lr.x];
                let ys = [quad.ul.y, quad.ur.y, quad.ll.y, quad.lr.y];
                Rect::new(
                    xs.iter().copied().fold(f32::INFINITY, f32::min) - self.bounds.x0,
                    ys.iter().copied().fold(f32::INFINITY, f32::min) - self.bounds.y0,
                    xs.iter().copied().fold(f32::NEG_INFINITY, f32::max) - self.bounds.x0,
                    ys.iter().copied().fold(f32::NEG_INFINITY, f32::max) - self.bounds.y0,
                )
            })
            .filter(|rect| !rect.is_empty())
            .collect()
    }

    fn rasterize(&self, dpi: u32) -> Result<RgbImage> {
        if dpi == 0 {
            return Err(TermscopeError::invalid_argument("dpi must be positive"));
        }
        let scale = dpi as f32 / POINTS_PER_INCH;
        let pixels = (self.bounds.width() * scale).ceil() as u64
            * (self.bounds.height() * scale).ceil() as u64;
        if pixels > MAX_RASTER_PIXELS {
            return Err(TermscopeError::invalid_argument(format!(
                "raster of {pixels} pixels exceeds the limit of {MAX_RASTER_PIXELS}"
            )));
        }

        let pixmap = self
            .inner
            .to_pixmap(
                &Matrix::new_scale(scale, scale),
                &Colorspace::device_rgb(),
                0.0,
                false,
            )
            .map_err(|e| TermscopeError::render(self.number, e.to_string()))?;

        let width = pixmap.width() as u32;
        let height = pixmap.height() as u32;
        let components = pixmap.n() as usize;
        let stride = pixmap.stride() as usize;
        if width == 0 || height == 0 {
            return Ok(RgbImage::new(width, height));
        }
        if components < 3 || stride < width as usize * components {
            return Err(TermscopeError::render(
                self.number,
                format!("unexpected pixmap layout: {components} components, stride {stride}"),
            ));
        }

        let mut image = RgbImage::new(width, height);
        for (y, row) in pixmap
            .samples()
            .chunks(stride)
            .take(height as usize)
            .enumerate()
        {
            for (x, px) in row.chunks_exact(components).take(width as usize).enumerate() {
                image.put_pixel(x as u32, y as u32, Rgb([px[0], px[1], px[2]]));
            }
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_bytes_fail_to_open() {
        let result = PdfRenderer::from_bytes("junk.pdf", b"not a pdf at all");
        assert!(matches!(result, Err(TermscopeError::Document(_))));
    }
}
