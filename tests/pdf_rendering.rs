mod common;

use image::{Rgb, RgbImage};

use common::{FixturePage, build_pdf, build_pdf_pages};
use termscope::document::{Document, PdfDocument};
use termscope::error::Result;
use termscope::pipeline::{ExtractorConfig, KeywordExtractor};
use termscope::render::{AnnotatorConfig, PageRenderer, PageView, PdfRenderer};
use termscope::term::TermSet;

const GREEN: Rgb<u8> = Rgb([0, 255, 0]);

/// A 300 x 200 pt page with the text starting at x = 150, baseline 20 pt
/// above the bottom edge (180 pt from the top).
fn small_page() -> Vec<u8> {
    build_pdf_pages(&[FixturePage {
        text: "GHG emissions rose.",
        size: (300, 200),
        origin: (150, 20),
    }])
}

fn green_pixels(image: &RgbImage) -> Vec<(u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, pixel)| **pixel == GREEN)
        .map(|(x, y, _)| (x, y))
        .collect()
}

fn annotate_small_page(dpi: u32) -> Result<RgbImage> {
    let doc = PdfDocument::from_bytes("small.pdf", &small_page())?;
    let config = ExtractorConfig::new().annotator(AnnotatorConfig::new().dpi(dpi).contrast(1.0));
    let report = KeywordExtractor::new(config).run(&doc, &TermSet::from_csv("ghg emissions"))?;

    assert_eq!(report.matches.page_numbers().collect::<Vec<_>>(), vec![1]);
    assert!(report.images.skipped.is_empty());
    Ok(image::load_from_memory(report.images.get(1).unwrap())
        .unwrap()
        .to_rgb8())
}

#[test]
fn pdf_pages_report_count_and_text() -> Result<()> {
    let bytes = build_pdf(&["Hello emissions", "Second page"]);
    let doc = PdfDocument::from_bytes("sample.pdf", &bytes)?;

    assert_eq!(doc.page_count(), 2);
    assert!(doc.page_text(1)?.contains("Hello"));
    assert!(doc.page_text(2)?.contains("Second"));
    assert!(doc.page_text(3).is_err());
    Ok(())
}

#[test]
fn pdf_without_pages_is_empty() -> Result<()> {
    let doc = PdfDocument::from_bytes("blank.pdf", &build_pdf(&[]))?;
    assert_eq!(doc.page_count(), 0);
    Ok(())
}

#[test]
fn pdf_search_uses_page_coordinates() -> Result<()> {
    let doc = PdfDocument::from_bytes("small.pdf", &small_page())?;
    let renderer = PdfRenderer::new(&doc)?;
    assert_eq!(renderer.page_count(), 1);

    let page = renderer.load_page(1)?;
    assert_eq!(page.size(), (300.0, 200.0));

    let rects = page.search_for("ghg emissions");
    assert_eq!(rects.len(), 1);
    let rect = rects[0];
    assert!((rect.x0 - 150.0).abs() < 1.0, "x0 = {}", rect.x0);
    // Thirteen Courier glyphs at 7.2 pt each.
    assert!((rect.x1 - 243.6).abs() < 2.0, "x1 = {}", rect.x1);
    assert!(rect.y0 > 160.0 && rect.y0 < 180.0, "y0 = {}", rect.y0);
    assert!(rect.y1 > 178.0 && rect.y1 < 190.0, "y1 = {}", rect.y1);

    assert!(page.search_for("water").is_empty());
    assert!(renderer.load_page(2).is_err());
    Ok(())
}

#[test]
fn annotated_pdf_page_keeps_its_own_geometry() -> Result<()> {
    let image = annotate_small_page(72)?;
    assert_eq!(image.dimensions(), (300, 200));

    let green = green_pixels(&image);
    assert!(!green.is_empty());
    let min_x = green.iter().map(|(x, _)| *x).min().unwrap();
    let max_x = green.iter().map(|(x, _)| *x).max().unwrap();
    assert!((149..=151).contains(&min_x), "outline starts at x = {min_x}");
    assert!((240..=246).contains(&max_x), "outline ends at x = {max_x}");
    assert!(green.iter().all(|(_, y)| (160..=190).contains(y)));
    Ok(())
}

#[test]
fn annotated_pdf_page_scales_with_dpi() -> Result<()> {
    let image = annotate_small_page(144)?;
    assert_eq!(image.dimensions(), (600, 400));

    let green = green_pixels(&image);
    let min_x = green.iter().map(|(x, _)| *x).min().unwrap();
    assert!((298..=302).contains(&min_x), "outline starts at x = {min_x}");
    assert!(green.iter().all(|(_, y)| (320..=380).contains(y)));
    Ok(())
}
