//! Output formatting for CLI commands.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::{OutputFormat, TermscopeArgs};
use crate::document::PageNumber;
use crate::error::Result;
use crate::render::SkippedPage;
use crate::search::MatchSet;
use crate::stats::Statistic;

/// Result structure for extraction.
#[derive(Debug, Serialize)]
pub struct ExtractionOutput {
    pub document: String,
    pub page_count: usize,
    pub terms: Vec<String>,
    pub matches: MatchSet,
    pub statistics: Vec<Statistic>,
    pub images: Vec<WrittenImage>,
    pub skipped_pages: Vec<SkippedPage>,
}

/// An annotated page image written to disk.
#[derive(Debug, Serialize)]
pub struct WrittenImage {
    pub page: PageNumber,
    pub path: PathBuf,
}

/// Result structure for taxonomy inspection.
#[derive(Debug, Serialize)]
pub struct TaxonomyOutput {
    pub category: String,
    pub indicators: Vec<IndicatorOutput>,
}

#[derive(Debug, Serialize)]
pub struct IndicatorOutput {
    pub indicator: String,
    pub datapoints: Vec<DatapointOutput>,
}

#[derive(Debug, Serialize)]
pub struct DatapointOutput {
    pub name: String,
    pub terms: Vec<String>,
}

/// Result structure for category listing.
#[derive(Debug, Serialize)]
pub struct CategoryOutput {
    pub tag: String,
    pub indicator_column: String,
    pub name_column: String,
    pub terms_column: String,
}

/// Rendering of a result for a terminal.
pub trait HumanOutput {
    fn print_human(&self);
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &TermscopeArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TermscopeArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

impl HumanOutput for ExtractionOutput {
    fn print_human(&self) {
        println!("Document: {} ({} pages)", self.document, self.page_count);
        println!("Terms: {}", self.terms.join(", "));

        if self.matches.is_empty() {
            println!();
            println!("No matches found.");
        }

        for (page, matches) in self.matches.iter() {
            println!();
            println!("Page {page}");
            println!("───────");
            for m in matches {
                let terms: Vec<&str> = m.terms.iter().map(|t| t.display()).collect();
                println!("  [{}] {}", m.sentence_index + 1, m.sentence);
                println!("      terms: {}", terms.join(", "));
                if m.context.len() > 1 {
                    println!("      context: {}", m.context.join(" "));
                }
            }
        }

        println!();
        println!("Statistics:");
        println!("═══════════");
        let width = self
            .statistics
            .iter()
            .map(|s| s.term.display().chars().count())
            .max()
            .unwrap_or(4)
            .max(4);
        println!("{:<width$}  {:>11}  Pages", "Term", "Occurrences");
        for statistic in &self.statistics {
            let pages: Vec<String> = statistic.pages.iter().map(|p| p.to_string()).collect();
            println!(
                "{:<width$}  {:>11}  {}",
                statistic.term.display(),
                statistic.occurrences,
                pages.join(", ")
            );
        }

        if !self.images.is_empty() {
            println!();
            for image in &self.images {
                println!("Wrote page {} to {}", image.page, image.path.display());
            }
        }
        for skipped in &self.skipped_pages {
            println!("Page {} not rendered: {}", skipped.page, skipped.reason);
        }
    }
}

impl HumanOutput for TaxonomyOutput {
    fn print_human(&self) {
        println!("Category: {}", self.category);
        if self.indicators.is_empty() {
            println!("No indicators found.");
        }
        for indicator in &self.indicators {
            println!();
            println!("{}", indicator.indicator);
            for datapoint in &indicator.datapoints {
                println!("  {}: {}", datapoint.name, datapoint.terms.join(", "));
            }
        }
    }
}

impl HumanOutput for Vec<CategoryOutput> {
    fn print_human(&self) {
        for category in self {
            println!("{}: {}", category.tag, category.indicator_column);
        }
    }
}
