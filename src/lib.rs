mod cursor;
mod error;
mod footnotes;
mod html;
mod metrics;
mod model;
mod providers;
mod styles;

pub use cursor::LayoutCursor;
pub use error::Error;
pub use footnotes::{FootnoteEntry, FootnoteTable};
pub use html::ReportDocument;
pub use metrics::{cell_height, count_lines, estimate_width, wrap};
pub use model::{
    Advance, Align, Cell, Element, Footnote, Image, Line, RawMarkup, ReportDefinition,
    ReportOptions, Section, Style, TextBox, TextDirection, TextRun,
};
pub use providers::{EnglishLocalizer, Localizer, MediaResolver, NullMediaResolver};
pub use styles::{DEFAULT_STYLE, StyleRegistry, parse_hex_color};

use std::time::Instant;

/// Render a report definition with the built-in collaborators (no media
/// store, LTR identity localization).
pub fn render(def: &ReportDefinition) -> Result<String, Error> {
    render_with(def, &NullMediaResolver, &EnglishLocalizer)
}

/// Render a report definition with caller-supplied collaborators.
pub fn render_with(
    def: &ReportDefinition,
    media: &dyn MediaResolver,
    localizer: &dyn Localizer,
) -> Result<String, Error> {
    let t0 = Instant::now();

    let mut doc = ReportDocument::from_definition(def, media, localizer);
    let out = doc.run()?;

    log::info!(
        "Timing: render={:.1}ms ({} pages, output {} bytes)",
        t0.elapsed().as_secs_f64() * 1000.0,
        doc.page_number(),
        out.len(),
    );

    Ok(out)
}

/// Render a report definition given as JSON.
pub fn render_json(json: &str) -> Result<String, Error> {
    let def: ReportDefinition = serde_json::from_str(json)?;
    render(&def)
}
