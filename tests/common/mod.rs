use kinreport::{Advance, Cell, Element, ReportDefinition, ReportOptions, Style};

/// A style with everything default except name and size.
pub fn style(name: &str, size: f32) -> Style {
    let mut style = Style::named(name);
    style.size = size;
    style
}

/// Geometry with no margins, so coordinates in assertions stay round.
pub fn plain_options(page_width: f32, page_height: f32) -> ReportOptions {
    ReportOptions {
        page_width,
        page_height,
        margin_top: 0.0,
        margin_bottom: 0.0,
        margin_left: 0.0,
        margin_right: 0.0,
        ..ReportOptions::default()
    }
}

/// A definition with a registered 10pt default style and the given body.
pub fn definition(body: Vec<Element>) -> ReportDefinition {
    ReportDefinition {
        options: plain_options(500.0, 800.0),
        styles: vec![style("default", 10.0)],
        body,
        ..ReportDefinition::default()
    }
}

/// A default-styled cell that drops to the next line after rendering.
pub fn block_cell(text: &str) -> Element {
    Element::Cell(Cell {
        text: text.to_string(),
        style: "default".to_string(),
        advance: Advance::NextLine,
        ..Cell::default()
    })
}
