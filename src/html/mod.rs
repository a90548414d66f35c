//! Reflow markup backend: renders a report document to a single
//! self-contained HTML stream. Pages are virtual — content flows down one
//! coordinate space and page breaks become CSS break markers plus a re-run
//! of the page-header elements.

mod elements;
mod writer;

use std::time::Instant;

use crate::cursor::LayoutCursor;
use crate::error::Error;
use crate::footnotes::FootnoteTable;
use crate::model::{
    Advance, Cell, Element, ReportDefinition, ReportOptions, Section, Style, TextDirection,
};
use crate::providers::{Localizer, MediaResolver};
use crate::styles::StyleRegistry;

use writer::{MarkupWriter, escape_text, pt, stylesheet};

/// Render pass phases. Transitions are strictly linear; the body may
/// re-enter a page-header sub-step without leaving `RenderingBody`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RenderState {
    Setup,
    RenderingHeader,
    RenderingBody,
    RenderingFooter,
    Done,
}

/// One report render pass: owns the four element streams, the style
/// registry, the footnote table and the layout cursor. Construct one per
/// render request; `run` resets the shared caches, so an instance is never
/// shared between passes.
pub struct ReportDocument<'a> {
    options: ReportOptions,
    styles: StyleRegistry,
    cursor: LayoutCursor,
    footnotes: FootnoteTable,
    direction: TextDirection,
    page_header: Vec<Element>,
    header: Vec<Element>,
    body: Vec<Element>,
    footer: Vec<Element>,
    media: &'a dyn MediaResolver,
    localizer: &'a dyn Localizer,
    state: RenderState,
    /// Page breaks and marker interpretation are live only while iterating
    /// the body's own elements, never inside a page-header sub-step.
    breaks_enabled: bool,
    /// Section-relative y where the current virtual page begins; overflow
    /// checks measure against this plus the printable height.
    page_start_y: f32,
}

impl<'a> ReportDocument<'a> {
    pub fn new(
        options: ReportOptions,
        styles: &[Style],
        media: &'a dyn MediaResolver,
        localizer: &'a dyn Localizer,
    ) -> Self {
        Self {
            options,
            styles: StyleRegistry::from_styles(styles),
            cursor: LayoutCursor::new(0.0),
            footnotes: FootnoteTable::new(),
            direction: TextDirection::Ltr,
            page_header: Vec::new(),
            header: Vec::new(),
            body: Vec::new(),
            footer: Vec::new(),
            media,
            localizer,
            state: RenderState::Setup,
            breaks_enabled: false,
            page_start_y: 0.0,
        }
    }

    pub fn from_definition(
        def: &ReportDefinition,
        media: &'a dyn MediaResolver,
        localizer: &'a dyn Localizer,
    ) -> Self {
        let mut doc = Self::new(def.options.clone(), &def.styles, media, localizer);
        doc.page_header = def.page_header.clone();
        doc.header = def.header.clone();
        doc.body = def.body.clone();
        doc.footer = def.footer.clone();
        doc
    }

    pub fn add_element(&mut self, section: Section, element: Element) {
        match section {
            Section::PageHeader => self.page_header.push(element),
            Section::Header => self.header.push(element),
            Section::Body => self.body.push(element),
            Section::Footer => self.footer.push(element),
        }
    }

    pub fn register_style(&mut self, style: Style) {
        self.styles.register(style);
    }

    /// The page number the cursor ended on (1 before `run`).
    pub fn page_number(&self) -> u32 {
        self.cursor.page_number
    }

    pub fn cursor(&self) -> &LayoutCursor {
        &self.cursor
    }

    pub fn footnote_count(&self) -> usize {
        self.footnotes.len()
    }

    /// Execute the full render pass and return the finished markup document.
    ///
    /// Each section renders into its own buffer; the section heights are
    /// injected afterwards from the `max_y` the section reached.
    pub fn run(&mut self) -> Result<String, Error> {
        let t0 = Instant::now();

        // A second run on the same document starts from clean caches.
        if self.state != RenderState::Setup {
            log::debug!("re-running a finished document; resetting caches");
        }
        self.state = RenderState::Setup;
        self.footnotes = FootnoteTable::new();
        self.setup();
        let t_setup = t0.elapsed();

        self.state = RenderState::RenderingHeader;
        let (header_markup, header_height) = self.render_section(Section::Header);
        let t_header = t0.elapsed();

        self.state = RenderState::RenderingBody;
        self.cursor.reset_section();
        self.page_start_y = 0.0;
        let (body_markup, body_height) = self.render_section(Section::Body);
        let t_body = t0.elapsed();

        self.state = RenderState::RenderingFooter;
        self.cursor.reset_section();
        self.page_start_y = 0.0;
        let (footer_markup, footer_height) = self.render_section(Section::Footer);
        self.state = RenderState::Done;
        let t_footer = t0.elapsed();

        let out = self.assemble(
            (&header_markup, header_height),
            (&body_markup, body_height),
            (&footer_markup, footer_height),
        );

        log::info!(
            "Render phases: setup={:.1}ms, header={:.1}ms, body={:.1}ms, footer={:.1}ms ({} pages, {} bytes)",
            t_setup.as_secs_f64() * 1000.0,
            (t_header - t_setup).as_secs_f64() * 1000.0,
            (t_body - t_header).as_secs_f64() * 1000.0,
            (t_footer - t_body).as_secs_f64() * 1000.0,
            self.cursor.page_number,
            out.len(),
        );

        Ok(out)
    }

    /// Page geometry, direction defaults and the optional attribution line.
    fn setup(&mut self) {
        // Idempotent landscape swap: only when still portrait-shaped.
        if self.options.landscape && self.options.page_width < self.options.page_height {
            std::mem::swap(&mut self.options.page_width, &mut self.options.page_height);
        }

        self.direction = self.localizer.text_direction();
        let no_margin_width =
            self.options.page_width - self.options.margin_left - self.options.margin_right;
        self.cursor = LayoutCursor::new(no_margin_width);

        if self.options.show_generated_by {
            self.options.show_generated_by = false;
            let generator = concat!("kinreport ", env!("CARGO_PKG_VERSION"));
            let text = self.localizer.translate("Generated by %s", &[generator]);
            self.footer.push(Element::Cell(Cell {
                text,
                advance: Advance::NextLine,
                ..Cell::default()
            }));
        }
    }

    /// Render one section's element list into its own buffer and report the
    /// height it reached.
    fn render_section(&mut self, section: Section) -> (String, f32) {
        let elements = match section {
            Section::PageHeader => self.page_header.clone(),
            Section::Header => self.header.clone(),
            Section::Body => self.body.clone(),
            Section::Footer => self.footer.clone(),
        };

        let mut w = MarkupWriter::new();
        self.breaks_enabled = section == Section::Body;
        for element in &elements {
            self.render_element(&mut w, element);
        }
        self.breaks_enabled = false;

        // A definition that registered footnotes but never flushed them
        // still gets them, in one trailing block.
        if section == Section::Footer && self.footnotes.has_unprinted() {
            self.flush_footnotes(&mut w);
        }

        (w.finish(), self.cursor.max_y)
    }

    /// Run the page-header element list in place. Nested control markers are
    /// inert here; a page header cannot break pages.
    pub(super) fn run_page_header(&mut self, w: &mut MarkupWriter) {
        let elements = self.page_header.clone();
        let saved = self.breaks_enabled;
        self.breaks_enabled = false;
        for element in &elements {
            self.render_element(w, element);
        }
        self.breaks_enabled = saved;
    }

    /// Break to a new virtual page, then re-run the page-header elements.
    /// The new page starts at the left margin.
    pub(super) fn page_break(&mut self, w: &mut MarkupWriter) {
        self.cursor.advance_page();
        self.cursor.x = 0.0;
        self.page_start_y = self.cursor.y;
        w.raw("<div class=\"page-break\"></div>\n");
        self.run_page_header(w);
    }

    fn assemble(
        &self,
        (header, header_height): (&str, f32),
        (body, body_height): (&str, f32),
        (footer, footer_height): (&str, f32),
    ) -> String {
        let dir = match self.direction {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        };
        // The start-side margin follows the text direction.
        let side_margin = match self.direction {
            TextDirection::Ltr => format!("margin-left:{}pt", pt(self.options.margin_left)),
            TextDirection::Rtl => format!("margin-right:{}pt", pt(self.options.margin_right)),
        };
        let width = pt(self.cursor.no_margin_width);

        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n");
        out.push_str(&format!("<html dir=\"{dir}\">\n<head>\n<meta charset=\"utf-8\">\n"));
        out.push_str(&format!(
            "<title>{}</title>\n",
            escape_text(&self.options.title)
        ));
        out.push_str("<style>\n");
        out.push_str(&stylesheet(&self.styles));
        out.push_str("</style>\n</head>\n<body>\n");

        let section = |out: &mut String, class: &str, markup: &str, height: f32, extra: &str| {
            out.push_str(&format!(
                "<div class=\"report-section {class}\" style=\"width:{width}pt;height:{}pt;{side_margin}{extra}\">\n",
                pt(height),
            ));
            out.push_str(markup);
            out.push_str("</div>\n");
        };

        let top = format!(";margin-top:{}pt", pt(self.options.margin_top));
        let bottom = format!(";margin-bottom:{}pt", pt(self.options.margin_bottom));
        section(&mut out, "header", header, header_height, &top);
        section(&mut out, "body", body, body_height, "");
        section(&mut out, "footer", footer, footer_height, &bottom);

        out.push_str("</body>\n</html>\n");
        out
    }
}
