//! Sentence segmentation.
//!
//! Page text is split with the Unicode sentence boundary rules (UAX #29):
//! a boundary follows terminal punctuation when the next sentence starts
//! with an uppercase letter, and never precedes a lowercase continuation.
//! Headers, tables and bullet lists are not segmented reliably; that is a
//! known limitation of punctuation-driven segmentation.
//!
//! Text extracted from PDFs wraps lines in the middle of sentences, so a
//! single line break is read as a space when boundaries are chosen. A blank
//! line still ends a paragraph. Every [`Sentence`] records its byte span in
//! the page text and only whitespace lies between consecutive spans.
//!
//! # Examples
//!
//! ```
//! use termscope::segment::SentenceSegmenter;
//!
//! let segmenter = SentenceSegmenter::new();
//! let sentences = segmenter.segment("Emissions fell.\nThe board\nagreed. Done!");
//!
//! assert_eq!(sentences.len(), 3);
//! assert_eq!(sentences[1].text, "The board\nagreed.");
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A sentence of page text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence text with surrounding whitespace removed.
    pub text: String,
    /// Byte range of `text` in the page text.
    pub span: Range<usize>,
}

/// Splits page text into sentences.
#[derive(Clone, Debug)]
pub struct SentenceSegmenter {
    /// Treat a single line break as a space when looking for boundaries.
    soft_line_breaks: bool,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSegmenter {
    /// Create a segmenter that reads single line breaks as soft wraps.
    pub fn new() -> Self {
        SentenceSegmenter {
            soft_line_breaks: true,
        }
    }

    /// Set whether single line breaks are soft wraps.
    pub fn soft_line_breaks(mut self, soft: bool) -> Self {
        self.soft_line_breaks = soft;
        self
    }

    /// Segment `text` into sentences in source order.
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let unwrapped;
        let boundary_text = if self.soft_line_breaks {
            unwrapped = unwrap_soft_breaks(text);
            unwrapped.as_str()
        } else {
            text
        };

        // `boundary_text` differs from `text` only in ASCII whitespace, so
        // its offsets are valid char boundaries in `text`.
        let mut sentences = Vec::new();
        for (offset, segment) in boundary_text.split_sentence_bound_indices() {
            let original = &text[offset..offset + segment.len()];
            let trimmed = original.trim();
            if trimmed.is_empty() {
                continue;
            }
            let start = offset + (original.len() - original.trim_start().len());
            let end = start + trimmed.len();
            sentences.push(Sentence {
                text: trimmed.to_string(),
                span: start..end,
            });
        }

        sentences
    }

    /// Segment `text` and keep only the sentence strings.
    pub fn sentences(&self, text: &str) -> Vec<String> {
        self.segment(text).into_iter().map(|s| s.text).collect()
    }
}

/// Replace line breaks that are not part of a blank line with spaces.
///
/// Operates on whole runs of ASCII whitespace; a run holding two or more
/// line breaks is a paragraph break and is left alone.
fn unwrap_soft_breaks(text: &str) -> String {
    let mut bytes = text.as_bytes().to_vec();
    let mut i = 0;

    while i < bytes.len() {
        if !is_ascii_space(bytes[i]) {
            i += 1;
            continue;
        }

        let run_start = i;
        while i < bytes.len() && is_ascii_space(bytes[i]) {
            i += 1;
        }
        let run = &bytes[run_start..i];

        let breaks = run
            .iter()
            .enumerate()
            .filter(|&(j, &b)| b == b'\n' || (b == b'\r' && run.get(j + 1) != Some(&b'\n')))
            .count();

        if breaks < 2 {
            for b in &mut bytes[run_start..i] {
                if *b == b'\n' || *b == b'\r' {
                    *b = b' ';
                }
            }
        }
    }

    // Only ASCII bytes were replaced by ASCII bytes.
    String::from_utf8(bytes).unwrap_or_else(|_| text.to_string())
}

fn is_ascii_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
