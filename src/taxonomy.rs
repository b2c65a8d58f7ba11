//! Keyword taxonomies.
//!
//! A [`Taxonomy`] groups search terms by category (an indicator) and
//! subcategory (a datapoint). It is built once from a tabular source with a
//! [`TaxonomyLoader`] and is read-only afterwards. Which column of the
//! source holds the category is decided by a [`CategorySchema`], looked up
//! by category tag in a [`CategorySchemas`] table.
//!
//! # Examples
//!
//! ```
//! use termscope::taxonomy::{CategorySchemas, Table, TaxonomyLoader};
//!
//! let table = Table::from_csv_str(
//!     "SFDR Indicator,Datapoint Name,Keywords\n\
//!      GHG,Scope 1,\"scope 1, direct emissions\"\n\
//!      ,Unrelated,ignored\n",
//! )
//! .unwrap();
//!
//! let schemas = CategorySchemas::builtin();
//! let taxonomy = TaxonomyLoader::new(schemas.get("sfdr").unwrap().clone())
//!     .load(&table)
//!     .unwrap();
//!
//! assert_eq!(taxonomy.categories().collect::<Vec<_>>(), vec!["GHG"]);
//! let terms = taxonomy.select("GHG", &["Scope 1"]);
//! assert_eq!(terms.keys().collect::<Vec<_>>(), vec!["scope 1", "direct emissions"]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::term::TermSet;

pub mod loader;
pub mod schema;
pub mod table;

pub use loader::TaxonomyLoader;
pub use schema::{CategorySchema, CategorySchemas};
pub use table::Table;

/// Category → subcategory → terms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    categories: BTreeMap<String, BTreeMap<String, TermSet>>,
}

impl Taxonomy {
    /// Categories in ascending order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Subcategories of `category` in ascending order; empty if unknown.
    pub fn subcategories(&self, category: &str) -> impl Iterator<Item = &str> {
        self.categories
            .get(category)
            .into_iter()
            .flat_map(|subs| subs.keys().map(String::as_str))
    }

    /// Terms of one subcategory.
    pub fn terms(&self, category: &str, subcategory: &str) -> Option<&TermSet> {
        self.categories.get(category)?.get(subcategory)
    }

    /// Union of the terms of the given subcategories, without duplicates.
    ///
    /// Unknown categories and subcategories contribute nothing.
    pub fn select<S: AsRef<str>>(&self, category: &str, subcategories: &[S]) -> TermSet {
        let mut selected = TermSet::new();
        for sub in subcategories {
            if let Some(terms) = self.terms(category, sub.as_ref()) {
                selected.extend(terms.iter().cloned());
            }
        }
        selected
    }

    /// Union of every subcategory's terms in `category`.
    pub fn category_terms(&self, category: &str) -> TermSet {
        let mut selected = TermSet::new();
        if let Some(subs) = self.categories.get(category) {
            for terms in subs.values() {
                selected.extend(terms.iter().cloned());
            }
        }
        selected
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Add terms under (category, subcategory), merging with existing ones.
    pub(crate) fn merge_terms(&mut self, category: &str, subcategory: &str, terms: TermSet) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .entry(subcategory.to_string())
            .or_default()
            .extend(Vec::from(terms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Taxonomy {
        let mut taxonomy = Taxonomy::default();
        taxonomy.merge_terms("GHG", "Scope 1", TermSet::from_csv("scope 1, direct emissions"));
        taxonomy.merge_terms("GHG", "Scope 2", TermSet::from_csv("scope 2, Direct Emissions"));
        taxonomy.merge_terms("Water", "Usage", TermSet::from_csv("water withdrawal"));
        taxonomy
    }

    #[test]
    fn test_listing() {
        let taxonomy = sample();
        assert_eq!(taxonomy.categories().collect::<Vec<_>>(), vec!["GHG", "Water"]);
        assert_eq!(
            taxonomy.subcategories("GHG").collect::<Vec<_>>(),
            vec!["Scope 1", "Scope 2"]
        );
        assert_eq!(taxonomy.subcategories("Missing").count(), 0);
        assert_eq!(taxonomy.len(), 2);
    }

    #[test]
    fn test_select_unions_without_duplicates() {
        let taxonomy = sample();
        let terms = taxonomy.select("GHG", &["Scope 1", "Scope 2", "Unknown"]);
        assert_eq!(
            terms.keys().collect::<Vec<_>>(),
            vec!["scope 1", "direct emissions", "scope 2"]
        );
        assert!(taxonomy.select("Missing", &["Scope 1"]).is_empty());
    }

    #[test]
    fn test_category_terms() {
        let taxonomy = sample();
        assert_eq!(taxonomy.category_terms("GHG").len(), 3);
        assert!(taxonomy.category_terms("Missing").is_empty());
    }
}
