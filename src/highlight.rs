//! Inline highlighting of matched terms.
//!
//! Every case-insensitive occurrence of a selected term is wrapped in an
//! emphasis tag. Occurrences that overlap or touch are merged into a single
//! marked run, and runs that are already marked in the input are kept as
//! they are, so highlighting the output again with the same terms changes
//! nothing.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TermscopeError};
use crate::term::TermSet;

/// Configuration for inline highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// HTML tag to wrap highlighted terms (e.g., "b", "mark", "em").
    pub tag: String,
    /// CSS class to add to highlight tags.
    pub css_class: Option<String>,
    /// Inline style to add to highlight tags.
    pub style: Option<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            tag: "b".to_string(),
            css_class: None,
            style: Some("color: red;".to_string()),
        }
    }
}

impl HighlightConfig {
    /// Create a new highlight configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTML tag for highlighting.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the CSS class for highlight tags.
    pub fn css_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = Some(css_class.into());
        self
    }

    /// Set or clear the inline style for highlight tags.
    pub fn style(mut self, style: Option<String>) -> Self {
        self.style = style;
        self
    }

    /// Build the opening HTML tag.
    pub fn opening_tag(&self) -> String {
        let mut tag = format!("<{}", self.tag);
        if let Some(ref css_class) = self.css_class {
            tag.push_str(&format!(" class=\"{}\"", css_class));
        }
        if let Some(ref style) = self.style {
            tag.push_str(&format!(" style=\"{}\"", style));
        }
        tag.push('>');
        tag
    }

    /// Build the closing HTML tag.
    pub fn closing_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// Highlights a fixed set of terms.
#[derive(Debug, Clone)]
pub struct Highlighter {
    config: HighlightConfig,
    open: String,
    close: String,
    patterns: Vec<Regex>,
}

impl Highlighter {
    /// Compile a highlighter for `terms`.
    pub fn new(config: HighlightConfig, terms: &TermSet) -> Result<Self> {
        if config.tag.is_empty() {
            return Err(TermscopeError::invalid_argument("highlight tag is empty"));
        }

        let patterns = terms
            .iter()
            .map(|term| {
                RegexBuilder::new(&regex::escape(term.as_str()))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        TermscopeError::invalid_argument(format!(
                            "cannot highlight term '{}': {}",
                            term, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Highlighter {
            open: config.opening_tag(),
            close: config.closing_tag(),
            config,
            patterns,
        })
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Wrap every occurrence of the terms in `text`.
    pub fn highlight(&self, text: &str) -> String {
        let (visible, mut spans) = self.parse_marked(text);

        for pattern in &self.patterns {
            spans.extend(pattern.find_iter(&visible).map(|m| m.range()));
        }

        if spans.is_empty() {
            return visible;
        }

        spans.sort_by_key(|span| span.start);
        let merged = merge_overlapping_spans(spans);
        self.apply_highlighting(&visible, &merged)
    }

    /// Remove highlight markup produced by this highlighter.
    pub fn strip(&self, text: &str) -> String {
        self.parse_marked(text).0
    }

    /// Split `text` into its visible characters and the ranges (in visible
    /// coordinates) that are already wrapped in highlight tags.
    fn parse_marked(&self, text: &str) -> (String, Vec<Range<usize>>) {
        let mut visible = String::with_capacity(text.len());
        let mut marked = Vec::new();
        let mut rest = text;

        while let Some(open_at) = rest.find(&self.open) {
            let inner_start = open_at + self.open.len();
            let Some(close_rel) = rest[inner_start..].find(&self.close) else {
                break;
            };
            let inner_end = inner_start + close_rel;

            visible.push_str(&rest[..open_at]);
            let start = visible.len();
            visible.push_str(&rest[inner_start..inner_end]);
            if visible.len() > start {
                marked.push(start..visible.len());
            }
            rest = &rest[inner_end + self.close.len()..];
        }
        visible.push_str(rest);

        (visible, marked)
    }

    /// Apply highlighting markup to text.
    fn apply_highlighting(&self, text: &str, spans: &[Range<usize>]) -> String {
        let mut result = String::with_capacity(text.len() + spans.len() * 32);
        let mut last_pos = 0;

        for span in spans {
            result.push_str(&text[last_pos..span.start]);
            result.push_str(&self.open);
            result.push_str(&text[span.clone()]);
            result.push_str(&self.close);
            last_pos = span.end;
        }

        result.push_str(&text[last_pos..]);
        result
    }
}

/// Merge overlapping or touching spans. Input must be sorted by start.
fn merge_overlapping_spans(spans: Vec<Range<usize>>) -> Vec<Range<usize>> {
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());

    for span in spans {
        match merged.last_mut() {
            Some(current) if span.start <= current.end => {
                current.end = current.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }

    merged
}
