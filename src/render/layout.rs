//! Fixed-cell text layout and the renderer built on it.
//!
//! Page text is set line by line in monospace cells. Lines longer than the
//! text width are wrapped at the last whitespace that fits (or hard-wrapped
//! when there is none). Pages that need more rows than fit grow downwards
//! instead of spilling onto another page, so page numbers stay aligned with
//! the document.

use std::ops::Range;

use image::RgbImage;
use regex::RegexBuilder;

use crate::document::{Document, PageNumber, page_index};
use crate::error::{Result, TermscopeError};
use crate::render::geometry::{POINTS_PER_INCH, PageGeometry, Rect};
use crate::render::raster::{self, INK, WHITE};
use crate::render::{PageRenderer, PageView};

/// Upper bound on the pixel count of one raster.
pub const MAX_RASTER_PIXELS: u64 = 150_000_000;

/// One wrapped row: a char range of a source line.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Row {
    line: usize,
    chars: Range<usize>,
}

/// Page text laid out on a [`PageGeometry`].
#[derive(Clone, Debug)]
pub struct TextLayout {
    geometry: PageGeometry,
    lines: Vec<String>,
    /// Row indices belonging to each line.
    line_rows: Vec<Range<usize>>,
    rows: Vec<Row>,
    height: f32,
}

impl TextLayout {
    pub fn new(text: &str, geometry: PageGeometry) -> Self {
        let columns = geometry.columns();
        let mut lines = Vec::new();
        let mut line_rows = Vec::new();
        let mut rows = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let chars: Vec<char> = line
                .chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect();
            let first = rows.len();
            for range in wrap(&chars, columns) {
                rows.push(Row {
                    line: index,
                    chars: range,
                });
            }
            line_rows.push(first..rows.len());
            lines.push(chars.into_iter().collect());
        }

        let needed = 2.0 * geometry.margin + rows.len() as f32 * geometry.line_height;
        let height = geometry.height.max(needed);

        TextLayout {
            geometry,
            lines,
            line_rows,
            rows,
            height,
        }
    }

    /// Number of wrapped rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Text of wrapped row `row`.
    pub fn row_text(&self, row: usize) -> Option<String> {
        let row = self.rows.get(row)?;
        Some(
            self.lines[row.line]
                .chars()
                .skip(row.chars.start)
                .take(row.chars.len())
                .collect(),
        )
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }
}

/// Split `chars` into rows of at most `columns` chars.
fn wrap(chars: &[char], columns: usize) -> Vec<Range<usize>> {
    if chars.is_empty() {
        return vec![0..0];
    }

    let mut rows = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut end = (start + columns).min(chars.len());
        if end < chars.len() && !chars[end].is_whitespace() {
            if let Some(pos) = chars[start..end].iter().rposition(|c| c.is_whitespace()) {
                if pos > 0 {
                    end = start + pos + 1;
                }
            }
        }
        rows.push(start..end);
        start = end;
    }
    rows
}

impl PageView for TextLayout {
    fn size(&self) -> (f32, f32) {
        (self.geometry.width, self.height)
    }

    fn search_for(&self, needle: &str) -> Vec<Rect> {
        if needle.trim().is_empty() {
            return Vec::new();
        }
        let Ok(pattern) = RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
        else {
            return Vec::new();
        };

        let mut rects = Vec::new();
        for (index, line) in self.lines.iter().enumerate() {
            for m in pattern.find_iter(line) {
                let start = line[..m.start()].chars().count();
                let end = start + m.as_str().chars().count();

                // A hit wrapped across rows yields one box per row.
                for row in self.line_rows[index].clone() {
                    let span = &self.rows[row].chars;
                    let (s, e) = (start.max(span.start), end.min(span.end));
                    if s < e {
                        rects.push(self.geometry.cell_rect(row, s - span.start, e - s));
                    }
                }
            }
        }
        rects
    }

    fn rasterize(&self, dpi: u32) -> Result<RgbImage> {
        if dpi == 0 {
            return Err(TermscopeError::invalid_argument("dpi must be positive"));
        }
        let scale = dpi as f32 / POINTS_PER_INCH;
        let width = (self.geometry.width * scale).ceil() as u32;
        let height = (self.height * scale).ceil() as u32;
        if width as u64 * height as u64 > MAX_RASTER_PIXELS {
            return Err(TermscopeError::invalid_argument(format!(
                "raster of {width}x{height} pixels exceeds the limit of {MAX_RASTER_PIXELS}"
            )));
        }

        let mut image = RgbImage::from_pixel(width, height, WHITE);
        let (cw, lh) = (self.geometry.char_width, self.geometry.line_height);

        for (index, row) in self.rows.iter().enumerate() {
            let glyphs = self.lines[row.line]
                .chars()
                .skip(row.chars.start)
                .take(row.chars.len());
            for (column, c) in glyphs.enumerate() {
                if c.is_whitespace() {
                    continue;
                }
                let cell = self.geometry.cell_rect(index, column, 1);
                let glyph = Rect::new(
                    cell.x0 + cw * 0.1,
                    cell.y0 + lh * 0.25,
                    cell.x1 - cw * 0.1,
                    cell.y1 - lh * 0.15,
                );
                raster::fill_rect(&mut image, glyph.scale(scale), INK);
            }
        }

        Ok(image)
    }
}

/// Renders pages of any [`Document`] through [`TextLayout`].
pub struct TextLayoutRenderer<'a> {
    document: &'a dyn Document,
    geometry: PageGeometry,
}

impl<'a> TextLayoutRenderer<'a> {
    pub fn new(document: &'a dyn Document, geometry: PageGeometry) -> Result<Self> {
        if !geometry.is_valid() {
            return Err(TermscopeError::invalid_argument(format!(
                "invalid page geometry: {geometry:?}"
            )));
        }
        Ok(TextLayoutRenderer { document, geometry })
    }
}

impl PageRenderer for TextLayoutRenderer<'_> {
    type Page = TextLayout;

    fn load_page(&self, page: PageNumber) -> Result<TextLayout> {
        page_index(self.document, page)?;
        let text = self.document.page_text(page)?;
        Ok(TextLayout::new(&text, self.geometry.clone()))
    }
}
