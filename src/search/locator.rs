//! Per-page sentence matching.

use log::{debug, warn};

use crate::document::{Document, PageNumber};
use crate::error::{Result, TermscopeError};
use crate::highlight::Highlighter;
use crate::search::matches::{ContextRadius, Match, MatchSet};
use crate::search::window::context_window;
use crate::segment::SentenceSegmenter;
use crate::term::{Term, TermSet};

/// Finds the sentences of a document that contain selected terms.
#[derive(Clone, Debug, Default)]
pub struct MatchLocator {
    segmenter: SentenceSegmenter,
    radius: ContextRadius,
}

impl MatchLocator {
    /// Create a locator with the given context radius.
    pub fn new(radius: ContextRadius) -> Self {
        MatchLocator {
            segmenter: SentenceSegmenter::new(),
            radius,
        }
    }

    /// Use a custom sentence segmenter.
    pub fn with_segmenter(mut self, segmenter: SentenceSegmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn radius(&self) -> ContextRadius {
        self.radius
    }

    /// Scan every page of `doc` for `terms`.
    ///
    /// Fails with [`TermscopeError::EmptyDocument`] if the document has no
    /// pages. A page whose text cannot be read is logged and treated as
    /// having no text.
    pub fn locate(
        &self,
        doc: &dyn Document,
        terms: &TermSet,
        highlighter: &Highlighter,
    ) -> Result<MatchSet> {
        if doc.page_count() == 0 {
            return Err(TermscopeError::empty_document(doc.name()));
        }

        let mut match_set = MatchSet::new();
        if terms.is_empty() {
            return Ok(match_set);
        }

        for page in doc.page_numbers() {
            let text = match doc.page_text(page) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping text of page {} in '{}': {}", page, doc.name(), e);
                    continue;
                }
            };
            match_set.insert_page(page, self.locate_in_page(page, &text, terms, highlighter));
        }

        debug!(
            "Located {} matches on {} of {} pages in '{}'",
            match_set.total_matches(),
            match_set.len(),
            doc.page_count(),
            doc.name()
        );
        Ok(match_set)
    }

    /// Match the sentences of a single page.
    ///
    /// A sentence produces at most one [`Match`], however many times the
    /// terms occur in it.
    pub fn locate_in_page(
        &self,
        page: PageNumber,
        text: &str,
        terms: &TermSet,
        highlighter: &Highlighter,
    ) -> Vec<Match> {
        let sentences = self.segmenter.sentences(text);
        let mut matches = Vec::new();

        for (index, sentence) in sentences.iter().enumerate() {
            let found = matching_terms(sentence, terms);
            if found.is_empty() {
                continue;
            }
            matches.push(Match {
                page,
                sentence_index: index,
                sentence: sentence.clone(),
                highlighted: highlighter.highlight(sentence),
                context: context_window(&sentences, index, self.radius.get()).to_vec(),
                terms: found,
            });
        }

        matches
    }
}

/// Terms that occur in `sentence`, ignoring case, in selection order.
fn matching_terms(sentence: &str, terms: &TermSet) -> Vec<Term> {
    let lower = sentence.to_lowercase();
    terms
        .iter()
        .filter(|term| lower.contains(term.as_str()))
        .cloned()
        .collect()
}
