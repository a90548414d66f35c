mod common;

use kinreport::{Element, FootnoteTable, ReportDocument};

#[test]
fn identical_text_shares_one_number() {
    let mut table = FootnoteTable::new();
    assert_eq!(table.check("Birth record, parish of Voss", None), 1);
    assert_eq!(table.check("Census of 1801", None), 2);
    assert_eq!(table.check("Birth record, parish of Voss", None), 1);
    assert_eq!(table.len(), 2);
}

#[test]
fn numbers_follow_first_seen_order() {
    let mut table = FootnoteTable::new();
    for (i, text) in ["c", "a", "b"].iter().enumerate() {
        assert_eq!(table.check(text, None), i as u32 + 1);
    }
}

#[test]
fn flush_returns_each_entry_once_in_order() {
    let mut table = FootnoteTable::new();
    table.check("first", None);
    table.check("second", None);

    let flushed = table.take_unprinted();
    assert_eq!(
        flushed.iter().map(|e| e.number).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert!(table.take_unprinted().is_empty());
    assert!(!table.has_unprinted());

    table.check("third", None);
    let late = table.take_unprinted();
    assert_eq!(late.len(), 1);
    assert_eq!(late[0].number, 3);
    assert_eq!(late[0].text, "third");
}

#[test]
fn rendered_footnotes_deduplicate_and_number_in_order() {
    let def = common::definition(vec![
        common::block_cell("Ole Olsen"),
        Element::footnote("Birth record, parish of Voss"),
        Element::footnote("Census of 1801"),
        Element::footnote("Birth record, parish of Voss"),
        Element::FootnoteFlush,
    ]);

    let mut doc = ReportDocument::from_definition(
        &def,
        &kinreport::NullMediaResolver,
        &kinreport::EnglishLocalizer,
    );
    let html = doc.run().expect("render");

    assert_eq!(doc.footnote_count(), 2);
    // two entries, printed once each
    assert_eq!(html.matches("id=\"fn-1\"").count(), 1);
    assert_eq!(html.matches("id=\"fn-2\"").count(), 1);
    assert!(html.find("id=\"fn-1\"").unwrap() < html.find("id=\"fn-2\"").unwrap());
    // the duplicate reference points at the shared entry
    assert_eq!(html.matches("href=\"#fn-1\"").count(), 2);
    assert_eq!(html.matches("href=\"#fn-2\"").count(), 1);
}

#[test]
fn unflushed_footnotes_are_printed_after_the_footer() {
    let def = common::definition(vec![
        common::block_cell("Ole Olsen"),
        Element::footnote("Probate record of 1842"),
    ]);

    let html = kinreport::render(&def).expect("render");
    assert_eq!(html.matches("id=\"fn-1\"").count(), 1);
    assert!(html.contains("Probate record of 1842"));
}

#[test]
fn flush_marker_prints_nothing_without_footnotes() {
    let def = common::definition(vec![
        common::block_cell("no sources here"),
        Element::FootnoteFlush,
    ]);

    let html = kinreport::render(&def).expect("render");
    assert!(!html.contains("class=\"footnotes"));
}
