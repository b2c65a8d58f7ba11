//! Page annotation: outline every term occurrence on a page raster.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use image::Rgb;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::document::{Document, PageNumber};
use crate::error::{Result, TermscopeError};
use crate::render::geometry::{POINTS_PER_INCH, PageGeometry};
use crate::render::layout::TextLayoutRenderer;
use crate::render::pdf::PdfRenderer;
use crate::render::raster;
use crate::render::scratch::ScratchSpace;
use crate::render::{PageRenderer, PageView};
use crate::term::TermSet;

/// Where encoded pages are held while an annotation call runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Scratch {
    /// Encode straight into memory.
    #[default]
    Memory,
    /// Stream each page through a temporary file inside a per-call
    /// temporary directory (created under `parent`, or the system default).
    TempDir {
        #[serde(default)]
        parent: Option<PathBuf>,
    },
}

/// Configuration for [`PageAnnotator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Raster resolution in dots per inch.
    pub dpi: u32,
    /// Contrast factor applied to the finished raster (1.0 = unchanged).
    pub contrast: f32,
    /// Outline colour as RGB.
    pub outline_color: [u8; 3],
    /// Outline width in points.
    pub outline_width_pt: f32,
    pub scratch: Scratch,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        AnnotatorConfig {
            dpi: 300,
            contrast: 1.5,
            outline_color: [0, 255, 0],
            outline_width_pt: 1.0,
            scratch: Scratch::Memory,
        }
    }
}

impl AnnotatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    pub fn outline_color(mut self, rgb: [u8; 3]) -> Self {
        self.outline_color = rgb;
        self
    }

    pub fn outline_width_pt(mut self, width: f32) -> Self {
        self.outline_width_pt = width;
        self
    }

    pub fn scratch(mut self, scratch: Scratch) -> Self {
        self.scratch = scratch;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(TermscopeError::invalid_argument("dpi must be positive"));
        }
        if !self.contrast.is_finite() || self.contrast < 0.0 {
            return Err(TermscopeError::invalid_argument(format!(
                "contrast factor must be a non-negative number, got {}",
                self.contrast
            )));
        }
        if !self.outline_width_pt.is_finite() || self.outline_width_pt <= 0.0 {
            return Err(TermscopeError::invalid_argument(format!(
                "outline width must be positive, got {}",
                self.outline_width_pt
            )));
        }
        Ok(())
    }
}

/// A page left out of the annotated output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedPage {
    pub page: PageNumber,
    pub reason: String,
}

/// The result of one annotation call.
#[derive(Clone, Debug, Default)]
pub struct AnnotatedPages {
    /// PNG bytes per page.
    pub images: BTreeMap<PageNumber, Vec<u8>>,
    /// Pages that failed to render.
    pub skipped: Vec<SkippedPage>,
}

impl AnnotatedPages {
    pub fn get(&self, page: PageNumber) -> Option<&[u8]> {
        self.images.get(&page).map(Vec::as_slice)
    }

    pub fn page_numbers(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.images.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Renders pages with an outline drawn around every occurrence of a set of
/// terms.
///
/// Rendering never touches the source document: every page is rasterized
/// into a fresh image and the outlines are drawn on that image.
#[derive(Clone, Debug, Default)]
pub struct PageAnnotator {
    config: AnnotatorConfig,
}

impl PageAnnotator {
    pub fn new(config: AnnotatorConfig) -> Self {
        PageAnnotator { config }
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Annotate `pages` of a document.
    ///
    /// PDFs are drawn by [`PdfRenderer`] at their own page size. Other
    /// documents are laid out on `geometry` by [`TextLayoutRenderer`]. Fails
    /// up front if MuPDF cannot open the PDF.
    pub fn annotate_document(
        &self,
        doc: &dyn Document,
        geometry: &PageGeometry,
        pages: impl IntoIterator<Item = PageNumber>,
        terms: &TermSet,
    ) -> Result<AnnotatedPages> {
        match doc.as_pdf() {
            Some(pdf) => {
                debug!("Rendering '{}' with MuPDF", pdf.name());
                self.annotate(&PdfRenderer::new(pdf)?, pages, terms)
            }
            None => {
                let renderer = TextLayoutRenderer::new(doc, geometry.clone())?;
                self.annotate(&renderer, pages, terms)
            }
        }
    }

    /// Annotate `pages` using `renderer`.
    ///
    /// Each page is rendered independently. A page that fails is logged,
    /// recorded in [`AnnotatedPages::skipped`] and the batch goes on. Only an
    /// invalid configuration or a scratch directory that cannot be created
    /// fails the call.
    pub fn annotate<R: PageRenderer + ?Sized>(
        &self,
        renderer: &R,
        pages: impl IntoIterator<Item = PageNumber>,
        terms: &TermSet,
    ) -> Result<AnnotatedPages> {
        self.config.validate()?;
        let scratch = ScratchSpace::acquire(&self.config.scratch)?;

        let pages: BTreeSet<PageNumber> = pages.into_iter().collect();
        let mut result = AnnotatedPages::default();

        for page in pages {
            match self.annotate_page(renderer, page, terms, &scratch) {
                Ok(bytes) => {
                    result.images.insert(page, bytes);
                }
                Err(e) => {
                    warn!("Skipping page {}: {}", page, e);
                    result.skipped.push(SkippedPage {
                        page,
                        reason: e.to_string(),
                    });
                }
            }
        }

        scratch.release();
        debug!(
            "Annotated {} pages ({} skipped)",
            result.images.len(),
            result.skipped.len()
        );
        Ok(result)
    }

    fn annotate_page<R: PageRenderer + ?Sized>(
        &self,
        renderer: &R,
        page: PageNumber,
        terms: &TermSet,
        scratch: &ScratchSpace,
    ) -> Result<Vec<u8>> {
        let view = renderer.load_page(page).map_err(|e| page_error(page, e))?;

        let boxes: Vec<_> = terms
            .iter()
            .flat_map(|term| view.search_for(term.as_str()))
            .collect();

        let mut image = view
            .rasterize(self.config.dpi)
            .map_err(|e| page_error(page, e))?;

        let scale = self.config.dpi as f32 / POINTS_PER_INCH;
        let color = Rgb(self.config.outline_color);
        for rect in &boxes {
            raster::stroke_rect(
                &mut image,
                rect.scale(scale),
                self.config.outline_width_pt * scale,
                color,
            );
        }
        raster::enhance_contrast(&mut image, self.config.contrast);

        debug!("Page {}: {} occurrence boxes", page, boxes.len());
        scratch
            .encode(page, &image)
            .map_err(|e| page_error(page, e))
    }
}

fn page_error(page: PageNumber, error: TermscopeError) -> TermscopeError {
    if error.is_page_scoped() {
        error
    } else {
        TermscopeError::render(page, error.to_string())
    }
}
