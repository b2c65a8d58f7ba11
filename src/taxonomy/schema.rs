//! Category schemas: which columns of a taxonomy source to read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermscopeError};

/// Column names for one category of taxonomy source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySchema {
    /// Column holding the indicator (the taxonomy category).
    pub indicator_column: String,
    /// Column holding the datapoint name (the subcategory).
    #[serde(default = "default_name_column")]
    pub name_column: String,
    /// Column holding the comma-separated terms.
    #[serde(default = "default_terms_column")]
    pub terms_column: String,
}

fn default_name_column() -> String {
    "Datapoint Name".to_string()
}

fn default_terms_column() -> String {
    "Keywords".to_string()
}

impl CategorySchema {
    /// A schema with the default name and terms columns.
    pub fn new(indicator_column: impl Into<String>) -> Self {
        CategorySchema {
            indicator_column: indicator_column.into(),
            name_column: default_name_column(),
            terms_column: default_terms_column(),
        }
    }

    /// Set the datapoint name column.
    pub fn name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = column.into();
        self
    }

    /// Set the terms column.
    pub fn terms_column(mut self, column: impl Into<String>) -> Self {
        self.terms_column = column.into();
        self
    }
}

/// Category tag → schema.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySchemas {
    schemas: BTreeMap<String, CategorySchema>,
}

impl CategorySchemas {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The categories known out of the box.
    pub fn builtin() -> Self {
        let mut schemas = Self::new();
        schemas.insert("sfdr", CategorySchema::new("SFDR Indicator"));
        schemas.insert("physical assets", CategorySchema::new("Asset/Report Type"));
        schemas.insert(
            "Company data - Granular segments",
            CategorySchema::new("Granular Indicator"),
        );
        schemas.insert("ENS Diversity", CategorySchema::new("Div_Indicators"));
        schemas.insert("Governance annual update", CategorySchema::new("CG- Indicator"));
        schemas
    }

    /// Parse a table from JSON: `{"tag": {"indicator_column": "..."}, ...}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add or replace the schema for `tag`.
    pub fn insert(&mut self, tag: impl Into<String>, schema: CategorySchema) {
        self.schemas.insert(tag.into(), schema);
    }

    /// Look up the schema for `tag`.
    pub fn get(&self, tag: &str) -> Result<&CategorySchema> {
        self.schemas.get(tag).ok_or_else(|| {
            TermscopeError::schema(format!(
                "unknown category '{}' (known: {})",
                tag,
                self.tags().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    /// Category tags in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategorySchema)> {
        self.schemas.iter().map(|(tag, schema)| (tag.as_str(), schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_categories() {
        let schemas = CategorySchemas::builtin();
        assert_eq!(schemas.tags().count(), 5);
        assert_eq!(schemas.get("sfdr").unwrap().indicator_column, "SFDR Indicator");
        assert_eq!(
            schemas.get("Governance annual update").unwrap().indicator_column,
            "CG- Indicator"
        );
        assert_eq!(schemas.get("ENS Diversity").unwrap().terms_column, "Keywords");
    }

    #[test]
    fn test_unknown_category_is_schema_error() {
        let schemas = CategorySchemas::builtin();
        assert!(matches!(schemas.get("marketing"), Err(TermscopeError::Schema(_))));
    }

    #[test]
    fn test_from_json_with_defaults() {
        let schemas = CategorySchemas::from_json_str(
            r#"{"water": {"indicator_column": "Water KPI", "terms_column": "Terms"}}"#,
        )
        .unwrap();
        let schema = schemas.get("water").unwrap();
        assert_eq!(schema.indicator_column, "Water KPI");
        assert_eq!(schema.name_column, "Datapoint Name");
        assert_eq!(schema.terms_column, "Terms");
    }
}
