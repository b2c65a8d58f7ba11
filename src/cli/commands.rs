//! Command implementations for the termscope CLI.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::{Document, PdfDocument, TextDocument};
use crate::error::{Result, TermscopeError};
use crate::pipeline::{Extraction, ExtractorConfig, KeywordExtractor};
use crate::render::AnnotatedPages;
use crate::search::ContextRadius;
use crate::taxonomy::{CategorySchemas, Table, Taxonomy, TaxonomyLoader};
use crate::term::TermSet;

/// Execute a CLI command.
pub fn execute_command(args: TermscopeArgs) -> Result<()> {
    match &args.command {
        Command::Extract(extract_args) => extract(extract_args, &args),
        Command::Taxonomy(taxonomy_args) => show_taxonomy(taxonomy_args, &args),
        Command::Categories(categories_args) => list_categories(categories_args, &args),
    }
}

/// Search a document for the selected terms.
fn extract(args: &ExtractArgs, cli_args: &TermscopeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ExtractorConfig::from_json_file(path)?,
        None => ExtractorConfig::default(),
    };
    if let Some(radius) = args.radius {
        config.radius = ContextRadius::new(radius)?;
    }

    let terms = select_terms(args)?;
    let document = open_document(&args.document)?;
    let extractor = KeywordExtractor::new(config);

    let (extraction, annotated) = match &args.images_dir {
        Some(_) if !args.no_images => {
            let report = extractor.run(document.as_ref(), &terms)?;
            (
                Extraction {
                    matches: report.matches,
                    statistics: report.statistics,
                },
                report.images,
            )
        }
        _ => (
            extractor.extract(document.as_ref(), &terms)?,
            AnnotatedPages::default(),
        ),
    };

    let images = match &args.images_dir {
        Some(dir) => write_images(dir, &annotated)?,
        None => Vec::new(),
    };

    let output = ExtractionOutput {
        document: document.name().to_string(),
        page_count: document.page_count(),
        terms: terms.iter().map(|t| t.display().to_string()).collect(),
        matches: extraction.matches,
        statistics: extraction.statistics,
        images,
        skipped_pages: annotated.skipped,
    };

    output_result("Extraction completed", &output, cli_args)
}

/// Show the indicators of a taxonomy source.
fn show_taxonomy(args: &TaxonomyArgs, cli_args: &TermscopeArgs) -> Result<()> {
    let taxonomy = load_taxonomy(&args.source, &args.category, args.schemas.as_deref())?;

    let indicators: Vec<&str> = match &args.indicator {
        Some(indicator) => {
            require_indicator(&taxonomy, indicator)?;
            vec![indicator.as_str()]
        }
        None => taxonomy.categories().collect(),
    };

    let output = TaxonomyOutput {
        category: args.category.clone(),
        indicators: indicators
            .into_iter()
            .map(|indicator| IndicatorOutput {
                indicator: indicator.to_string(),
                datapoints: taxonomy
                    .subcategories(indicator)
                    .map(|name| DatapointOutput {
                        name: name.to_string(),
                        terms: taxonomy
                            .terms(indicator, name)
                            .map(|terms| terms.iter().map(|t| t.display().to_string()).collect())
                            .unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect(),
    };

    output_result("Taxonomy loaded", &output, cli_args)
}

/// List the category tags and their columns.
fn list_categories(args: &CategoriesArgs, cli_args: &TermscopeArgs) -> Result<()> {
    let schemas = load_schemas(args.schemas.as_deref())?;
    let categories: Vec<CategoryOutput> = schemas
        .iter()
        .map(|(tag, schema)| CategoryOutput {
            tag: tag.to_string(),
            indicator_column: schema.indicator_column.clone(),
            name_column: schema.name_column.clone(),
            terms_column: schema.terms_column.clone(),
        })
        .collect();

    output_result("Known categories", &categories, cli_args)
}

/// Open a document, choosing the reader by file extension.
fn open_document(path: &Path) -> Result<Box<dyn Document>> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let document: Box<dyn Document> = if is_pdf {
        Box::new(PdfDocument::open(path)?)
    } else {
        Box::new(TextDocument::open(path)?)
    };
    debug!(
        "Opened '{}' with {} pages",
        document.name(),
        document.page_count()
    );
    Ok(document)
}

/// The built-in category schemas, extended from a JSON file if given.
fn load_schemas(path: Option<&Path>) -> Result<CategorySchemas> {
    let mut schemas = CategorySchemas::builtin();
    if let Some(path) = path {
        let extra = CategorySchemas::from_json_str(&fs::read_to_string(path)?)?;
        for (tag, schema) in extra.iter() {
            schemas.insert(tag, schema.clone());
        }
    }
    Ok(schemas)
}

fn load_taxonomy(source: &Path, category: &str, schemas: Option<&Path>) -> Result<Taxonomy> {
    let schemas = load_schemas(schemas)?;
    let loader = TaxonomyLoader::new(schemas.get(category)?.clone());
    let table = Table::from_csv_path(source)?;
    let taxonomy = loader.load(&table)?;
    info!(
        "Loaded {} indicators from {}",
        taxonomy.len(),
        source.display()
    );
    Ok(taxonomy)
}

fn require_indicator(taxonomy: &Taxonomy, indicator: &str) -> Result<()> {
    if taxonomy.subcategories(indicator).next().is_none() {
        return Err(TermscopeError::invalid_argument(format!(
            "indicator '{}' not found (available: {})",
            indicator,
            taxonomy.categories().collect::<Vec<_>>().join(", ")
        )));
    }
    Ok(())
}

/// Terms from the taxonomy selection followed by any `--terms`.
fn select_terms(args: &ExtractArgs) -> Result<TermSet> {
    let mut terms = TermSet::new();

    if let (Some(source), Some(category), Some(indicator)) =
        (&args.taxonomy, &args.category, &args.indicator)
    {
        let taxonomy = load_taxonomy(source, category, args.schemas.as_deref())?;
        require_indicator(&taxonomy, indicator)?;
        let selected = if args.datapoint.is_empty() {
            taxonomy.category_terms(indicator)
        } else {
            taxonomy.select(indicator, &args.datapoint)
        };
        terms.extend(selected.iter().cloned());
    }

    if let Some(list) = &args.terms {
        terms.extend_csv(list);
    }

    if terms.is_empty() {
        return Err(TermscopeError::invalid_argument(
            "no terms selected; pass --terms or --taxonomy with --category and --indicator",
        ));
    }
    Ok(terms)
}

/// Write each annotated page as `page-<n>.png` under `dir`.
fn write_images(dir: &Path, annotated: &AnnotatedPages) -> Result<Vec<WrittenImage>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(annotated.len());
    for (page, bytes) in &annotated.images {
        let path = dir.join(format!("page-{page}.png"));
        fs::write(&path, bytes)?;
        written.push(WrittenImage { page: *page, path });
    }
    Ok(written)
}
