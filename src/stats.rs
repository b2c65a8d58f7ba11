//! Occurrence statistics per term.
//!
//! Statistics are derived from a finished [`MatchSet`] in a single pass per
//! term; nothing is accumulated while matching.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::document::PageNumber;
use crate::search::MatchSet;
use crate::term::{Term, TermSet};

/// Occurrence summary for one term.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub term: Term,
    /// Non-overlapping occurrences across all matched sentences.
    pub occurrences: usize,
    /// Pages with at least one matched sentence containing the term, ascending.
    pub pages: Vec<PageNumber>,
}

/// One row per term, in the order of `terms`.
///
/// Occurrences are counted case-insensitively in the plain sentence text;
/// a term appearing twice in a sentence counts twice.
///
/// ```
/// use termscope::search::{Match, MatchSet};
/// use termscope::stats::aggregate;
/// use termscope::term::TermSet;
///
/// let terms = TermSet::from_csv("water");
/// let mut set = MatchSet::new();
/// set.insert_page(2, vec![Match {
///     page: 2,
///     sentence_index: 0,
///     sentence: "Water, water everywhere.".into(),
///     highlighted: String::new(),
///     context: vec![],
///     terms: terms.as_slice().to_vec(),
/// }]);
///
/// let stats = aggregate(&set, &terms);
/// assert_eq!(stats[0].occurrences, 2);
/// assert_eq!(stats[0].pages, vec![2]);
/// ```
pub fn aggregate(matches: &MatchSet, terms: &TermSet) -> Vec<Statistic> {
    terms.iter().map(|term| term_statistic(matches, term)).collect()
}

fn term_statistic(matches: &MatchSet, term: &Term) -> Statistic {
    let mut occurrences = 0;
    let mut pages = BTreeSet::new();

    for (page, page_matches) in matches.iter() {
        let on_page: usize = page_matches
            .iter()
            .map(|m| count_occurrences(&m.sentence, term.as_str()))
            .sum();
        if on_page > 0 {
            occurrences += on_page;
            pages.insert(page);
        }
    }

    Statistic {
        term: term.clone(),
        occurrences,
        pages: pages.into_iter().collect(),
    }
}

fn count_occurrences(sentence: &str, key: &str) -> usize {
    if key.is_empty() {
        return 0;
    }
    sentence.to_lowercase().matches(key).count()
}
