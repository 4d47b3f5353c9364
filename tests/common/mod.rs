//! Builds small text-only PDFs for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text: content, font size, x and baseline y in PDF space.
#[derive(Debug, Clone)]
pub struct Item {
    pub text: &'static str,
    pub size: i64,
    pub x: i64,
    pub y: i64,
}

pub fn item(text: &'static str, size: i64, y: i64) -> Item {
    Item { text, size, x: 72, y }
}

/// Write a letter-size PDF with one Helvetica text line per item.
pub fn write_pdf(path: &Path, pages: &[Vec<Item>]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for items in pages {
        let mut operations = Vec::new();
        for it in items {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), it.size.into()]));
            operations.push(Operation::new("Td", vec![it.x.into(), it.y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(it.text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

/// A two-page travel guide with three heading tiers plus a fourth, smaller one.
pub fn travel_guide(dir: &Path) -> PathBuf {
    let path = dir.join("south_of_france_cities.pdf");
    write_pdf(
        &path,
        &[
            vec![
                item("Cities of the South", 24, 720),
                item("Table of Contents", 14, 680),
                item("Nice", 18, 620),
                item("Nice sits on the coast with long pebble beaches.", 10, 590),
                item("Old Town", 14, 540),
                item("Narrow streets hide bakeries and markets.", 10, 510),
            ],
            vec![
                item("Marseille", 18, 720),
                item("Harbor Walks", 14, 660),
                item("Fishing boats line the old port at dawn.", 10, 630),
                item("Opening Hours", 12, 560),
                item("- Museums close on Tuesdays", 10, 530),
            ],
        ],
    );
    path
}

/// A single-page document focused on one topic.
pub fn single_topic(dir: &Path, name: &str, heading: &'static str, body: &'static str) -> PathBuf {
    let path = dir.join(name);
    write_pdf(
        &path,
        &[vec![
            item("Field Notes", 22, 720),
            item(heading, 16, 660),
            item(body, 10, 630),
        ]],
    );
    path
}
