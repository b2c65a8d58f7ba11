//! Page-space geometry.

use serde::{Deserialize, Serialize};

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// An axis-aligned rectangle with a top-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Rect { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Multiply every coordinate by `factor`.
    pub fn scale(&self, factor: f32) -> Rect {
        Rect::new(
            self.x0 * factor,
            self.y0 * factor,
            self.x1 * factor,
            self.y1 * factor,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }
}

/// Layout geometry for rendering plain page text, in points.
///
/// Text is set in fixed-size cells: `char_width` wide and `line_height`
/// tall, inside `margin` on every side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for PageGeometry {
    /// US Letter with 10 pt monospace text.
    fn default() -> Self {
        PageGeometry {
            width: 612.0,
            height: 792.0,
            margin: 36.0,
            char_width: 6.0,
            line_height: 12.0,
        }
    }
}

impl PageGeometry {
    /// Character cells per line (at least one).
    pub fn columns(&self) -> usize {
        (((self.width - 2.0 * self.margin) / self.char_width).floor() as usize).max(1)
    }

    /// Whether every dimension is positive and finite.
    pub fn is_valid(&self) -> bool {
        [
            self.width,
            self.height,
            self.char_width,
            self.line_height,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0)
            && self.margin.is_finite()
            && self.margin >= 0.0
            && self.width > 2.0 * self.margin
    }

    /// The cell box of `column` on `row`, spanning `len` cells.
    pub fn cell_rect(&self, row: usize, column: usize, len: usize) -> Rect {
        let x0 = self.margin + column as f32 * self.char_width;
        let y0 = self.margin + row as f32 * self.line_height;
        Rect::new(
            x0,
            y0,
            x0 + len as f32 * self.char_width,
            y0 + self.line_height,
        )
    }
}
