//! Command line argument parsing for the termscope CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// termscope - find taxonomy terms in documents and show them in context
#[derive(Parser, Debug, Clone)]
#[command(name = "termscope")]
#[command(about = "Find taxonomy terms in documents and show them in context")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TermscopeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TermscopeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find terms in a document
    Extract(ExtractArgs),

    /// Show the indicators, datapoints and terms of a taxonomy source
    Taxonomy(TaxonomyArgs),

    /// List the known category tags
    Categories(CategoriesArgs),
}

/// Arguments for extraction
#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    /// Document to search (.pdf, otherwise UTF-8 text with form-feed page breaks)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Taxonomy source (CSV)
    #[arg(long, value_name = "CSV", requires_all = ["category", "indicator"])]
    pub taxonomy: Option<PathBuf>,

    /// Category tag selecting the taxonomy's indicator column
    #[arg(short, long, value_name = "TAG")]
    pub category: Option<String>,

    /// Indicator whose terms are searched
    #[arg(short, long, value_name = "NAME")]
    pub indicator: Option<String>,

    /// Restrict to these datapoints of the indicator (repeatable)
    #[arg(short, long, value_name = "NAME")]
    pub datapoint: Vec<String>,

    /// Additional comma-separated terms
    #[arg(short, long, value_name = "TERMS")]
    pub terms: Option<String>,

    /// Sentences of context on each side of a match (1-5)
    #[arg(short, long, value_name = "K")]
    pub radius: Option<usize>,

    /// Extractor configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra category schemas (JSON)
    #[arg(long, value_name = "FILE")]
    pub schemas: Option<PathBuf>,

    /// Write annotated page images to this directory
    #[arg(long, value_name = "DIR")]
    pub images_dir: Option<PathBuf>,

    /// Skip page rendering
    #[arg(long, conflicts_with = "images_dir")]
    pub no_images: bool,
}

/// Arguments for taxonomy inspection
#[derive(Parser, Debug, Clone)]
pub struct TaxonomyArgs {
    /// Taxonomy source (CSV)
    #[arg(value_name = "CSV")]
    pub source: PathBuf,

    /// Category tag selecting the indicator column
    #[arg(short, long, value_name = "TAG")]
    pub category: String,

    /// Only show this indicator
    #[arg(short, long, value_name = "NAME")]
    pub indicator: Option<String>,

    /// Extra category schemas (JSON)
    #[arg(long, value_name = "FILE")]
    pub schemas: Option<PathBuf>,
}

/// Arguments for listing categories
#[derive(Parser, Debug, Clone)]
pub struct CategoriesArgs {
    /// Extra category schemas (JSON)
    #[arg(long, value_name = "FILE")]
    pub schemas: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_args() {
        let args = TermscopeArgs::parse_from([
            "termscope",
            "-vv",
            "extract",
            "report.pdf",
            "--taxonomy",
            "taxonomy.csv",
            "--category",
            "sfdr",
            "--indicator",
            "GHG emissions",
            "--datapoint",
            "Scope 1",
            "--datapoint",
            "Scope 2",
            "--radius",
            "3",
        ]);
        assert_eq!(args.verbosity(), 2);
        match args.command {
            Command::Extract(extract) => {
                assert_eq!(extract.document, PathBuf::from("report.pdf"));
                assert_eq!(extract.datapoint, vec!["Scope 1", "Scope 2"]);
                assert_eq!(extract.radius, Some(3));
                assert!(!extract.no_images);
            }
            _ => panic!("Expected extract command"),
        }
    }

    #[test]
    fn test_taxonomy_requires_category_and_indicator() {
        let result = TermscopeArgs::try_parse_from([
            "termscope",
            "extract",
            "report.pdf",
            "--taxonomy",
            "taxonomy.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args = TermscopeArgs::parse_from(["termscope", "-q", "-vvv", "categories"]);
        assert_eq!(args.verbosity(), 0);
        assert!(matches!(args.output_format, OutputFormat::Human));
    }

    #[test]
    fn test_no_images_conflicts_with_images_dir() {
        let result = TermscopeArgs::try_parse_from([
            "termscope",
            "extract",
            "report.pdf",
            "--terms",
            "scope 1",
            "--images-dir",
            "out",
            "--no-images",
        ]);
        assert!(result.is_err());
    }
}
