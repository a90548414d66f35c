use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named text style. Immutable once registered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_font_size")]
    pub size: f32, // points
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
}

fn default_font() -> String {
    "sans-serif".to_string()
}

fn default_font_size() -> f32 {
    10.0
}

impl Style {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            font: default_font(),
            size: default_font_size(),
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
        }
    }
}

/// The four element streams of a report document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    PageHeader,
    Header,
    Body,
    Footer,
}

impl Section {
    /// Parse a section tag as it appears in report definitions.
    /// Unrecognized tags fail fast: they indicate a broken definition,
    /// not bad report data.
    pub fn parse(tag: &str) -> Result<Self, Error> {
        match tag {
            "pageheader" => Ok(Section::PageHeader),
            "header" => Ok(Section::Header),
            "body" => Ok(Section::Body),
            "footer" => Ok(Section::Footer),
            _ => Err(Error::InvalidSection(tag.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

/// Where the cursor goes after a visual element commits its region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Advance {
    /// Stay on the same line; x moves right by the element width.
    #[default]
    Right,
    /// Drop below the element; x resets to the left margin.
    NextLine,
}

/// A bordered rectangle with styled text content.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub text: String,
    /// Style name; empty means the cursor's current style (or the default).
    #[serde(default)]
    pub style: String,
    /// 0 = auto: the remaining printable width from the cursor.
    #[serde(default)]
    pub width: f32,
    /// 0 = auto: computed from the text metrics.
    #[serde(default)]
    pub height: f32,
    /// Absolute placement; when set the cell repositions the cursor first.
    #[serde(default)]
    pub left: Option<f32>,
    #[serde(default)]
    pub top: Option<f32>,
    /// None = direction default (left for LTR, right for RTL).
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default)]
    pub border: bool,
    /// Background color, `#rgb` or `#rrggbb`.
    #[serde(default)]
    pub fill: Option<String>,
    /// Text color override.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub advance: Advance,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            text: String::new(),
            style: String::new(),
            width: 0.0,
            height: 0.0,
            left: None,
            top: None,
            align: None,
            border: false,
            fill: None,
            color: None,
            url: None,
            advance: Advance::Right,
        }
    }
}

/// One styled run inside a text box.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A flow container that word-wraps its runs to its width and grows
/// vertically.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextBox {
    #[serde(default)]
    pub runs: Vec<TextRun>,
    /// 0 = auto: the remaining printable width from the cursor.
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub left: Option<f32>,
    #[serde(default)]
    pub top: Option<f32>,
    #[serde(default)]
    pub border: bool,
    #[serde(default)]
    pub fill: Option<String>,
    /// Break to a new page first if the box would overflow the printable
    /// height.
    #[serde(default = "default_true")]
    pub pagecheck: bool,
    /// true: cursor drops below the box; false: continues to its right.
    #[serde(default = "default_true")]
    pub newline: bool,
}

fn default_true() -> bool {
    true
}

/// A straight connector between two absolute points.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// A reserved image region, resolved through the media collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Image {
    /// Opaque media reference handed to the resolver.
    pub media: String,
    /// 0 = use the intrinsic dimension (scaled if the other is given).
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub left: Option<f32>,
    #[serde(default)]
    pub top: Option<f32>,
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default)]
    pub advance: Advance,
}

/// Opaque backend passthrough, emitted verbatim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawMarkup {
    pub markup: String,
}

/// A footnote reference. Identical text collapses to one numbered entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Footnote {
    pub text: String,
    /// Optional link label shown with the flushed entry.
    #[serde(default)]
    pub link: Option<String>,
}

/// A report render primitive. The last three variants are control markers
/// interpreted by the document iterator, not visual elements.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Cell(Cell),
    #[serde(rename = "textbox")]
    TextBox(TextBox),
    Line(Line),
    Image(Image),
    #[serde(rename = "markup")]
    RawMarkup(RawMarkup),
    Footnote(Footnote),
    /// Re-run the page-header element list at this point.
    #[serde(rename = "pageheader")]
    PageHeader,
    /// Flush all unprinted footnotes.
    #[serde(rename = "footnoteflush")]
    FootnoteFlush,
    /// Force a page break.
    #[serde(rename = "addpage")]
    AddPage,
}

impl Element {
    pub fn cell(text: &str, style: &str) -> Self {
        Element::Cell(Cell {
            text: text.to_string(),
            style: style.to_string(),
            ..Cell::default()
        })
    }

    pub fn textbox(runs: Vec<TextRun>, width: f32) -> Self {
        Element::TextBox(TextBox {
            runs,
            width,
            left: None,
            top: None,
            border: false,
            fill: None,
            pagecheck: true,
            newline: true,
        })
    }

    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Element::Line(Line { x1, y1, x2, y2 })
    }

    pub fn image(media: &str, width: f32, height: f32) -> Self {
        Element::Image(Image {
            media: media.to_string(),
            width,
            height,
            left: None,
            top: None,
            align: None,
            advance: Advance::Right,
        })
    }

    pub fn raw(markup: &str) -> Self {
        Element::RawMarkup(RawMarkup {
            markup: markup.to_string(),
        })
    }

    pub fn footnote(text: &str) -> Self {
        Element::Footnote(Footnote {
            text: text.to_string(),
            link: None,
        })
    }

    /// Control markers are interpreted by the section iterator and never
    /// reach the backend dispatch.
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Element::PageHeader | Element::FootnoteFlush | Element::AddPage
        )
    }
}

/// Page geometry and document-wide rendering options.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    /// Document title, emitted into the output head.
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_page_width")]
    pub page_width: f32, // points
    #[serde(default = "default_page_height")]
    pub page_height: f32,
    #[serde(default = "default_margin")]
    pub margin_top: f32,
    #[serde(default = "default_margin")]
    pub margin_bottom: f32,
    #[serde(default = "default_margin")]
    pub margin_left: f32,
    #[serde(default = "default_margin")]
    pub margin_right: f32,
    /// Swap page width and height at setup.
    #[serde(default)]
    pub landscape: bool,
    #[serde(default = "default_line_height_ratio")]
    pub line_height_ratio: f32,
    /// Append a small attribution cell to the footer at setup.
    #[serde(default)]
    pub show_generated_by: bool,
}

// A4 portrait, ~0.75in margins.
fn default_page_width() -> f32 {
    595.28
}

fn default_page_height() -> f32 {
    841.89
}

fn default_margin() -> f32 {
    54.0
}

fn default_line_height_ratio() -> f32 {
    1.8
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            page_width: default_page_width(),
            page_height: default_page_height(),
            margin_top: default_margin(),
            margin_bottom: default_margin(),
            margin_left: default_margin(),
            margin_right: default_margin(),
            landscape: false,
            line_height_ratio: default_line_height_ratio(),
            show_generated_by: false,
        }
    }
}

/// A complete report definition ready for rendering: geometry, named styles
/// and the four element streams.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    #[serde(default)]
    pub options: ReportOptions,
    #[serde(default)]
    pub styles: Vec<Style>,
    #[serde(default)]
    pub page_header: Vec<Element>,
    #[serde(default)]
    pub header: Vec<Element>,
    #[serde(default)]
    pub body: Vec<Element>,
    #[serde(default)]
    pub footer: Vec<Element>,
}
