mod common;

use kinreport::{
    Cell, Element, Error, Image, Line, RawMarkup, ReportDefinition, ReportDocument, Section,
    StyleRegistry, TextDirection,
};

#[test]
fn style_registry_round_trip() {
    let mut registry = StyleRegistry::new();
    let mut bold = common::style("bold-14", 14.0);
    bold.bold = true;
    registry.register(bold.clone());

    assert_eq!(registry.resolve("bold-14").unwrap(), &bold);
    assert!(matches!(
        registry.resolve("missing"),
        Err(Error::UnknownStyle(_))
    ));
    // recovery path hands back the default instead of propagating
    assert_eq!(registry.resolve_or_default("missing").name, "default");
}

#[test]
fn registration_overwrites_last_write_wins() {
    let mut registry = StyleRegistry::new();
    registry.register(common::style("name", 10.0));
    registry.register(common::style("name", 16.0));
    assert_eq!(registry.resolve("name").unwrap().size, 16.0);
}

#[test]
fn stylesheet_carries_registered_styles() {
    let mut def = common::definition(vec![common::block_cell("x")]);
    let mut heading = common::style("heading", 14.0);
    heading.bold = true;
    heading.font = "serif".to_string();
    def.styles.push(heading);

    let html = kinreport::render(&def).expect("render");
    assert!(html.contains(".s-heading{font-family:serif;font-size:14pt;font-weight:bold}"));
    assert!(html.contains(".s-default{font-family:sans-serif;font-size:10pt}"));
}

#[test]
fn unknown_cell_style_degrades_to_default() {
    let def = common::definition(vec![Element::cell("text", "nonexistent")]);
    let html = kinreport::render(&def).expect("render");
    assert!(html.contains("class=\"cell s-default\""), "{html}");
}

#[test]
fn text_is_escaped_and_breaks_become_tags() {
    let def = common::definition(vec![common::block_cell("<b>Olsen & Sons</b>\nline two")]);
    let html = kinreport::render(&def).expect("render");
    assert!(html.contains("&lt;b&gt;Olsen &amp; Sons&lt;/b&gt;<br>line two"));
}

#[test]
fn section_heights_come_from_the_layout() {
    let mut def = common::definition(vec![common::block_cell("body line")]);
    def.header = vec![common::block_cell("header line")];

    let html = kinreport::render(&def).expect("render");
    // one 10pt line at ratio 1.8 in each populated section
    assert!(html.contains("report-section header\" style=\"width:500pt;height:18pt"));
    assert!(html.contains("report-section body\" style=\"width:500pt;height:18pt"));
    assert!(html.contains("report-section footer\" style=\"width:500pt;height:0pt"));
}

#[test]
fn page_number_token_is_substituted_per_page() {
    let mut def = common::definition(vec![
        Element::PageHeader,
        common::block_cell("first page"),
        Element::AddPage,
        common::block_cell("second page"),
    ]);
    def.page_header = vec![common::block_cell("Page #PAGENUM#")];

    let html = kinreport::render(&def).expect("render");
    assert!(html.contains("Page 1"), "{html}");
    assert!(html.contains("Page 2"), "{html}");
    assert!(!html.contains("#PAGENUM#"));
}

#[test]
fn malformed_colors_are_dropped_not_fatal() {
    let def = common::definition(vec![Element::Cell(Cell {
        text: "tinted".to_string(),
        style: "default".to_string(),
        fill: Some("not-a-color".to_string()),
        color: Some("#0a0b0c".to_string()),
        ..Cell::default()
    })]);

    let html = kinreport::render(&def).expect("render");
    assert!(html.contains("color:#0a0b0c"));
    assert!(!html.contains("not-a-color"));
}

#[test]
fn hyperlinked_cell_wraps_its_text() {
    let def = common::definition(vec![Element::Cell(Cell {
        text: "Ole Olsen".to_string(),
        style: "default".to_string(),
        url: Some("https://example.net/individual/12".to_string()),
        ..Cell::default()
    })]);

    let html = kinreport::render(&def).expect("render");
    assert!(html.contains("<a href=\"https://example.net/individual/12\">Ole Olsen</a>"));
}

#[test]
fn raw_markup_passes_through_verbatim() {
    let def = common::definition(vec![Element::RawMarkup(RawMarkup {
        markup: "<hr data-role=\"divider\">".to_string(),
    })]);

    let html = kinreport::render(&def).expect("render");
    assert!(html.contains("<hr data-role=\"divider\">"));
}

#[test]
fn line_records_its_lower_endpoint() {
    let def = common::definition(vec![Element::Line(Line {
        x1: 0.0,
        y1: 10.0,
        x2: 200.0,
        y2: 40.0,
    })]);

    let mut doc = ReportDocument::from_definition(
        &def,
        &kinreport::NullMediaResolver,
        &kinreport::EnglishLocalizer,
    );
    let html = doc.run().expect("render");
    assert!(html.contains("<svg"));
    // section height adopts the lower endpoint
    assert!(html.contains("report-section body\" style=\"width:500pt;height:40pt"));
}

struct FixedMedia;

impl kinreport::MediaResolver for FixedMedia {
    fn resolve_image_url(
        &self,
        media_reference: &str,
        _width_hint: f32,
        _height_hint: f32,
    ) -> Result<String, Error> {
        Ok(format!("https://media.example.net/{media_reference}"))
    }

    fn intrinsic_size(&self, _media_reference: &str) -> Result<(f32, f32), Error> {
        Ok((120.0, 60.0))
    }
}

#[test]
fn image_uses_intrinsic_size_and_resolved_url() {
    let def = common::definition(vec![Element::Image(Image {
        media: "portrait-12".to_string(),
        width: 60.0, // height follows the 2:1 intrinsic ratio
        height: 0.0,
        left: None,
        top: None,
        align: None,
        advance: kinreport::Advance::NextLine,
    })]);

    let html = kinreport::render_with(&def, &FixedMedia, &kinreport::EnglishLocalizer)
        .expect("render");
    assert!(html.contains("src=\"https://media.example.net/portrait-12\""));
    assert!(html.contains("width:60pt;height:30pt"), "{html}");
}

#[test]
fn unresolvable_media_reserves_an_empty_region() {
    let def = common::definition(vec![Element::Image(Image {
        media: "missing".to_string(),
        width: 0.0,
        height: 0.0,
        left: None,
        top: None,
        align: None,
        advance: kinreport::Advance::NextLine,
    })]);

    let html = kinreport::render(&def).expect("render");
    assert!(!html.contains("<img"));
    assert!(html.contains("class=\"image\""), "{html}");
}

struct HebrewLocalizer; // direction only; strings pass through

impl kinreport::Localizer for HebrewLocalizer {
    fn text_direction(&self) -> TextDirection {
        TextDirection::Rtl
    }

    fn translate(&self, key: &str, _args: &[&str]) -> String {
        key.to_string()
    }
}

#[test]
fn rtl_direction_flips_document_and_default_alignment() {
    let def = common::definition(vec![common::block_cell("שלום")]);
    let html = kinreport::render_with(&def, &kinreport::NullMediaResolver, &HebrewLocalizer)
        .expect("render");
    assert!(html.contains("<html dir=\"rtl\">"));
    assert!(html.contains("text-align:right"));
}

#[test]
fn generated_by_line_is_appended_to_the_footer() {
    let mut def = common::definition(vec![common::block_cell("body")]);
    def.options.show_generated_by = true;

    let html = kinreport::render(&def).expect("render");
    let footer_at = html.find("report-section footer").unwrap();
    let attribution_at = html.find("Generated by kinreport").unwrap();
    assert!(attribution_at > footer_at);
}

#[test]
fn documents_can_be_assembled_imperatively() {
    let mut doc = ReportDocument::new(
        common::plain_options(500.0, 800.0),
        &[],
        &kinreport::NullMediaResolver,
        &kinreport::EnglishLocalizer,
    );
    doc.register_style(common::style("default", 10.0));
    doc.add_element(Section::Header, Element::cell("Family report", "default"));
    doc.add_element(Section::Body, common::block_cell("Ole Olsen"));

    let html = doc.run().expect("render");
    assert!(html.contains("Family report"));
    assert!(html.contains("Ole Olsen"));
    assert_eq!(doc.cursor().no_margin_width, 500.0);
}

#[test]
fn section_tags_parse_or_fail_fast() {
    assert!(matches!(Section::parse("body"), Ok(Section::Body)));
    assert!(matches!(Section::parse("pageheader"), Ok(Section::PageHeader)));
    assert!(matches!(
        Section::parse("sidebar"),
        Err(Error::InvalidSection(_))
    ));
}

#[test]
fn json_definitions_render_end_to_end() {
    let json = r#"{
        "options": {"pageWidth": 500, "pageHeight": 800,
                    "marginTop": 0, "marginBottom": 0,
                    "marginLeft": 0, "marginRight": 0},
        "styles": [{"name": "default", "size": 10}],
        "body": [
            {"type": "cell", "text": "Hello", "style": "default",
             "advance": "next-line"},
            {"type": "addpage"},
            {"type": "cell", "text": "World", "style": "default"}
        ]
    }"#;

    let html = kinreport::render_json(json).expect("render");
    assert!(html.contains("Hello"));
    assert!(html.contains("page-break"));
    assert!(html.contains("top:28pt"), "{html}");
}

#[test]
fn invalid_json_surfaces_a_parse_error() {
    assert!(matches!(
        kinreport::render_json("{not json"),
        Err(Error::Parse(_))
    ));
}

#[test]
fn definitions_round_trip_through_serde() {
    let def = common::definition(vec![
        common::block_cell("x"),
        Element::AddPage,
        Element::footnote("a source"),
    ]);
    let json = serde_json::to_string(&def).expect("serialize");
    let back: ReportDefinition = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.body.len(), 3);
    assert!(matches!(back.body[1], Element::AddPage));
    assert!(back.body[1].is_marker());
    assert!(!back.body[0].is_marker());
}

#[test]
fn landscape_swaps_page_dimensions() {
    let mut def = common::definition(vec![common::block_cell("wide")]);
    def.options.landscape = true; // 500x800 becomes 800x500

    let html = kinreport::render(&def).expect("render");
    assert!(html.contains("width:800pt"), "{html}");
}

#[test]
fn styles_vector_on_the_definition_reaches_the_registry() {
    let styles = vec![common::style("default", 10.0), common::style("small", 8.0)];
    let def = ReportDefinition {
        options: common::plain_options(500.0, 800.0),
        styles,
        body: vec![Element::cell("tiny", "small")],
        ..ReportDefinition::default()
    };

    let html = kinreport::render(&def).expect("render");
    assert!(html.contains("class=\"cell s-small\""));
    assert!(html.contains(".s-small{font-family:sans-serif;font-size:8pt}"));
}
