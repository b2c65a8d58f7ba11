//! Search terms and ordered term selections.
//!
//! A [`Term`] keeps the text the user wrote for display and a normalized key
//! (trimmed, lower-cased) that all matching is done against. Two terms with
//! the same key are the same term.
//!
//! A [`TermSet`] is the selection a search request runs with: insertion
//! ordered, free of duplicate keys, never containing an empty term.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// A normalized search term.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Term {
    display: String,
    key: String,
}

impl Term {
    /// Parse a raw term. Returns `None` if nothing is left after trimming.
    ///
    /// ```
    /// use termscope::term::Term;
    ///
    /// let term = Term::parse("  GHG Emissions ").unwrap();
    /// assert_eq!(term.as_str(), "ghg emissions");
    /// assert_eq!(term.display(), "GHG Emissions");
    /// assert!(Term::parse("   ").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let display = raw.trim();
        if display.is_empty() {
            return None;
        }
        Some(Term {
            display: display.to_string(),
            key: display.to_lowercase(),
        })
    }

    /// The normalized (lower-cased) key used for matching.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The term as originally written.
    pub fn display(&self) -> &str {
        &self.display
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<Term> for String {
    fn from(term: Term) -> Self {
        term.display
    }
}

impl TryFrom<String> for Term {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Term::parse(&value).ok_or_else(|| "term is empty".to_string())
    }
}

/// An insertion-ordered set of terms with unique keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Term>", into = "Vec<Term>")]
pub struct TermSet {
    terms: Vec<Term>,
    #[serde(skip)]
    seen: AHashSet<String>,
}

impl TermSet {
    /// Create an empty term set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list of terms.
    ///
    /// ```
    /// use termscope::term::TermSet;
    ///
    /// let terms = TermSet::from_csv("scope 1, Scope 1 ,, scope 2");
    /// assert_eq!(terms.keys().collect::<Vec<_>>(), vec!["scope 1", "scope 2"]);
    /// ```
    pub fn from_csv(input: &str) -> Self {
        let mut set = Self::new();
        set.extend_csv(input);
        set
    }

    /// Add a term. Returns `false` if a term with the same key was present.
    pub fn insert(&mut self, term: Term) -> bool {
        if !self.seen.insert(term.key.clone()) {
            return false;
        }
        self.terms.push(term);
        true
    }

    /// Parse and add a raw term. Empty input is ignored.
    pub fn insert_str(&mut self, raw: &str) -> bool {
        match Term::parse(raw) {
            Some(term) => self.insert(term),
            None => false,
        }
    }

    /// Append comma-separated extra terms, skipping blanks and duplicates.
    pub fn extend_csv(&mut self, input: &str) {
        for raw in input.split(',') {
            self.insert_str(raw);
        }
    }

    /// Whether a term with this normalized key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Normalized keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(Term::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn as_slice(&self) -> &[Term] {
        &self.terms
    }
}

impl From<Vec<Term>> for TermSet {
    fn from(terms: Vec<Term>) -> Self {
        terms.into_iter().collect()
    }
}

impl From<TermSet> for Vec<Term> {
    fn from(set: TermSet) -> Self {
        set.terms
    }
}

impl FromIterator<Term> for TermSet {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        let mut set = TermSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> FromIterator<&'a str> for TermSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().filter_map(Term::parse).collect()
    }
}

impl Extend<Term> for TermSet {
    fn extend<I: IntoIterator<Item = Term>>(&mut self, iter: I) {
        for term in iter {
            self.insert(term);
        }
    }
}

impl<'a> IntoIterator for &'a TermSet {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
