//! One extraction request, end to end.
//!
//! [`KeywordExtractor`] runs the stages in order: locate matching sentences
//! (with context windows and highlighting), aggregate statistics, and
//! optionally render the matched pages.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Result;
use crate::highlight::{HighlightConfig, Highlighter};
use crate::render::{AnnotatedPages, AnnotatorConfig, PageAnnotator, PageGeometry};
use crate::search::{ContextRadius, MatchLocator, MatchSet};
use crate::stats::{self, Statistic};
use crate::term::TermSet;

/// Settings for a [`KeywordExtractor`].
///
/// Every field has a default, so a JSON config file only needs the values it
/// changes:
///
/// ```json
/// { "radius": 1, "annotator": { "dpi": 150 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sentences of context on each side of a match.
    pub radius: ContextRadius,
    pub highlight: HighlightConfig,
    pub annotator: AnnotatorConfig,
    /// Page layout used when rendering documents.
    pub geometry: PageGeometry,
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn radius(mut self, radius: ContextRadius) -> Self {
        self.radius = radius;
        self
    }

    pub fn highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn annotator(mut self, annotator: AnnotatorConfig) -> Self {
        self.annotator = annotator;
        self
    }

    pub fn geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

/// Matches and statistics for one request.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Extraction {
    pub matches: MatchSet,
    pub statistics: Vec<Statistic>,
}

/// An [`Extraction`] plus the annotated page images.
#[derive(Clone, Debug, Default)]
pub struct ExtractionReport {
    pub matches: MatchSet,
    pub statistics: Vec<Statistic>,
    pub images: AnnotatedPages,
}

/// Runs extraction requests with a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct KeywordExtractor {
    config: ExtractorConfig,
}

impl KeywordExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        KeywordExtractor { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Find every sentence of `doc` containing one of `terms`, with context
    /// and highlighting, and count occurrences per term.
    ///
    /// Fails if the document has no pages or the highlight config is invalid.
    pub fn extract(&self, doc: &dyn Document, terms: &TermSet) -> Result<Extraction> {
        let highlighter = Highlighter::new(self.config.highlight.clone(), terms)?;
        let locator = MatchLocator::new(self.config.radius);

        let matches = locator.locate(doc, terms, &highlighter)?;
        let statistics = stats::aggregate(&matches, terms);

        info!(
            "Extracted {} matches for {} terms on {} pages of '{}'",
            matches.total_matches(),
            terms.len(),
            matches.len(),
            doc.name()
        );
        Ok(Extraction {
            matches,
            statistics,
        })
    }

    /// [`extract`](Self::extract), then render every page that had a match.
    ///
    /// Pages that fail to render are reported in
    /// [`AnnotatedPages::skipped`]; they do not fail the request.
    pub fn run(&self, doc: &dyn Document, terms: &TermSet) -> Result<ExtractionReport> {
        let Extraction {
            matches,
            statistics,
        } = self.extract(doc, terms)?;

        let annotator = PageAnnotator::new(self.config.annotator.clone());
        let images = annotator.annotate_document(
            doc,
            &self.config.geometry,
            matches.page_numbers(),
            terms,
        )?;

        Ok(ExtractionReport {
            matches,
            statistics,
            images,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;
    use crate::error::TermscopeError;

    fn pages() -> TextDocument {
        TextDocument::from_pages(
            "report",
            vec![
                "The fund reports GHG emissions annually.",
                "No climate data here.",
            ],
        )
    }

    #[test]
    fn test_extract_single_hit() {
        let config = ExtractorConfig::new().radius(ContextRadius::new(1).unwrap());
        let extraction = KeywordExtractor::new(config)
            .extract(&pages(), &TermSet::from_csv("GHG emissions"))
            .unwrap();

        let hits = extraction.matches.get(1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits[0].context,
            vec!["The fund reports GHG emissions annually."]
        );
        assert!(extraction.matches.get(2).is_none());
        assert_eq!(extraction.statistics.len(), 1);
        assert_eq!(extraction.statistics[0].occurrences, 1);
        assert_eq!(extraction.statistics[0].pages, vec![1]);
    }

    #[test]
    fn test_run_renders_matched_pages() {
        let config = ExtractorConfig::new().annotator(AnnotatorConfig::new().dpi(36));
        let report = KeywordExtractor::new(config)
            .run(&pages(), &TermSet::from_csv("ghg emissions, climate"))
            .unwrap();

        assert_eq!(report.matches.page_numbers().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(report.images.page_numbers().collect::<Vec<_>>(), vec![1, 2]);
        assert!(report.images.skipped.is_empty());
    }

    #[test]
    fn test_empty_document_fails() {
        let doc = TextDocument::from_pages("empty", Vec::<String>::new());
        let result = KeywordExtractor::default().run(&doc, &TermSet::from_csv("x"));
        assert!(matches!(result, Err(TermscopeError::EmptyDocument(_))));
    }

    #[test]
    fn test_config_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"radius": 3, "highlight": {"tag": "mark", "style": null}, "annotator": {"dpi": 150}}"#,
        )
        .unwrap();

        let config = ExtractorConfig::from_json_file(&path).unwrap();
        assert_eq!(config.radius.get(), 3);
        assert_eq!(config.highlight.opening_tag(), "<mark>");
        assert_eq!(config.annotator.dpi, 150);
        assert_eq!(config.annotator.contrast, 1.5);
        assert_eq!(config.geometry, PageGeometry::default());
    }

    #[test]
    fn test_config_rejects_out_of_range_radius() {
        let result: std::result::Result<ExtractorConfig, _> =
            serde_json::from_str(r#"{"radius": 9}"#);
        assert!(result.is_err());
    }
}
