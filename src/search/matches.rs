//! Match records and the per-page match set.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::PageNumber;
use crate::error::{Result, TermscopeError};
use crate::term::Term;

/// Number of neighbouring sentences included on each side of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ContextRadius(usize);

impl ContextRadius {
    pub const MIN: usize = 1;
    pub const MAX: usize = 5;
    pub const DEFAULT: usize = 2;

    /// Validate a radius; it must lie in `[1, 5]`.
    pub fn new(radius: usize) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&radius) {
            return Err(TermscopeError::invalid_argument(format!(
                "context radius must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                radius
            )));
        }
        Ok(ContextRadius(radius))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ContextRadius {
    fn default() -> Self {
        ContextRadius(Self::DEFAULT)
    }
}

impl TryFrom<usize> for ContextRadius {
    type Error = TermscopeError;

    fn try_from(value: usize) -> Result<Self> {
        ContextRadius::new(value)
    }
}

impl From<ContextRadius> for usize {
    fn from(radius: ContextRadius) -> Self {
        radius.0
    }
}

impl fmt::Display for ContextRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One sentence on one page that contains at least one selected term.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Page the sentence is on (1-based).
    pub page: PageNumber,
    /// Position of the sentence among the page's sentences.
    pub sentence_index: usize,
    /// The sentence as extracted.
    pub sentence: String,
    /// The sentence with every selected term wrapped in highlight markup.
    pub highlighted: String,
    /// The matched sentence and its neighbours, in page order.
    pub context: Vec<String>,
    /// Selected terms found in the sentence, in selection order.
    pub terms: Vec<Term>,
}

impl Match {
    /// The first selected term found in the sentence.
    pub fn originating_term(&self) -> Option<&Term> {
        self.terms.first()
    }
}

/// Matches per page for one search request.
///
/// Only pages with at least one match are present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    pages: BTreeMap<PageNumber, Vec<Match>>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the matches of a page. An empty list leaves the set unchanged.
    pub fn insert_page(&mut self, page: PageNumber, matches: Vec<Match>) {
        if !matches.is_empty() {
            self.pages.insert(page, matches);
        }
    }

    /// Matches on `page`, or `None` if the page had none.
    pub fn get(&self, page: PageNumber) -> Option<&[Match]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    /// Pages with matches, ascending.
    pub fn page_numbers(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.pages.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PageNumber, &[Match])> {
        self.pages.iter().map(|(page, matches)| (*page, matches.as_slice()))
    }

    /// All matches in page order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.pages.values().flatten()
    }

    /// Number of pages with matches.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of matched sentences.
    pub fn total_matches(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match(page: PageNumber, sentence: &str) -> Match {
        Match {
            page,
            sentence_index: 0,
            sentence: sentence.to_string(),
            highlighted: sentence.to_string(),
            context: vec![sentence.to_string()],
            terms: vec![Term::parse("ghg").unwrap()],
        }
    }

    #[test]
    fn test_context_radius_bounds() {
        assert!(ContextRadius::new(0).is_err());
        assert!(ContextRadius::new(6).is_err());
        assert_eq!(ContextRadius::new(5).unwrap().get(), 5);
        assert_eq!(ContextRadius::default().get(), 2);
    }

    #[test]
    fn test_context_radius_serde() {
        let radius: ContextRadius = serde_json::from_str("3").unwrap();
        assert_eq!(radius.get(), 3);
        assert!(serde_json::from_str::<ContextRadius>("9").is_err());
    }

    #[test]
    fn test_empty_pages_are_not_inserted() {
        let mut set = MatchSet::new();
        set.insert_page(1, vec![sample_match(1, "GHG rose.")]);
        set.insert_page(2, Vec::new());
        set.insert_page(4, vec![sample_match(4, "GHG fell."), sample_match(4, "GHG.")]);

        assert_eq!(set.page_numbers().collect::<Vec<_>>(), vec![1, 4]);
        assert!(set.get(2).is_none());
        assert_eq!(set.len(), 2);
        assert_eq!(set.total_matches(), 3);
        assert_eq!(set.matches().count(), 3);
    }

    #[test]
    fn test_originating_term() {
        let m = sample_match(1, "GHG rose.");
        assert_eq!(m.originating_term().unwrap().as_str(), "ghg");
    }
}
