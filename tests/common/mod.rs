//! PDF fixtures shared by the integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, dictionary};

/// One page of a fixture PDF: a single line of 12 pt Courier.
pub struct FixturePage<'a> {
    pub text: &'a str,
    /// MediaBox width and height in points.
    pub size: (i64, i64),
    /// Text origin in PDF space (bottom-left origin).
    pub origin: (i64, i64),
}

impl<'a> FixturePage<'a> {
    /// US Letter with the text one inch in from the top-left corner.
    pub fn letter(text: &'a str) -> Self {
        FixturePage {
            text,
            size: (612, 792),
            origin: (72, 700),
        }
    }
}

/// A Letter-sized PDF with one line of text per page.
pub fn build_pdf(texts: &[&str]) -> Vec<u8> {
    let pages: Vec<_> = texts.iter().map(|text| FixturePage::letter(text)).collect();
    build_pdf_pages(&pages)
}

pub fn build_pdf_pages(pages: &[FixturePage<'_>]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![page.origin.0.into(), page.origin.1.into()]),
                Operation::new("Tj", vec![Object::string_literal(page.text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), page.size.0.into(), page.size.1.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
