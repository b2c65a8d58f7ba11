//! Building a taxonomy from a table.

use log::{debug, warn};

use crate::error::{Result, TermscopeError};
use crate::taxonomy::Taxonomy;
use crate::taxonomy::schema::CategorySchema;
use crate::taxonomy::table::Table;
use crate::term::TermSet;

/// Loads a [`Taxonomy`] from tables laid out according to one schema.
#[derive(Clone, Debug)]
pub struct TaxonomyLoader {
    schema: CategorySchema,
}

impl TaxonomyLoader {
    pub fn new(schema: CategorySchema) -> Self {
        TaxonomyLoader { schema }
    }

    pub fn schema(&self) -> &CategorySchema {
        &self.schema
    }

    /// Build a taxonomy from `table`.
    ///
    /// Rows with an empty indicator do not belong to this category and are
    /// skipped. Rows repeating a (category, subcategory) pair have their
    /// terms merged. Fails with a schema error if one of the schema's
    /// columns is missing.
    pub fn load(&self, table: &Table) -> Result<Taxonomy> {
        let indicator = required_column(table, &self.schema.indicator_column)?;
        let name = required_column(table, &self.schema.name_column)?;
        let keywords = required_column(table, &self.schema.terms_column)?;

        let mut taxonomy = Taxonomy::default();
        let mut skipped = 0;

        for row in 0..table.len() {
            let category = table.cell(row, indicator);
            if category.is_empty() {
                skipped += 1;
                continue;
            }

            let subcategory = table.cell(row, name);
            if subcategory.is_empty() {
                warn!(
                    "Row {} has indicator '{}' but no '{}', skipping",
                    row + 2,
                    category,
                    self.schema.name_column
                );
                skipped += 1;
                continue;
            }

            taxonomy.merge_terms(
                category,
                subcategory,
                TermSet::from_csv(table.cell(row, keywords)),
            );
        }

        debug!(
            "Loaded {} categories from {} rows ({} skipped) using column '{}'",
            taxonomy.len(),
            table.len(),
            skipped,
            self.schema.indicator_column
        );
        Ok(taxonomy)
    }
}

fn required_column(table: &Table, name: &str) -> Result<usize> {
    table.column(name).ok_or_else(|| {
        TermscopeError::schema(format!(
            "required column '{}' not found (columns: {})",
            name,
            table.headers().join(", ")
        ))
    })
}
