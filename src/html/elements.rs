use crate::metrics;
use crate::model::{Advance, Align, Cell, Element, Footnote, Image, Line, TextBox, TextDirection};
use crate::styles::{DEFAULT_STYLE, checked_color};

use super::ReportDocument;
use super::writer::{MarkupWriter, css_class, escape_attr, escape_text, pt};

/// Token replaced with the current page number in cell text.
const PAGE_NUMBER_TOKEN: &str = "#PAGENUM#";

/// Region reserved for an image whose reference could not be resolved.
const PLACEHOLDER_SIZE: f32 = 36.0;

impl ReportDocument<'_> {
    /// Single dispatch point for the markup backend. Control markers are
    /// interpreted here; visual variants commit output and move the cursor.
    pub(super) fn render_element(&mut self, w: &mut MarkupWriter, element: &Element) {
        match element {
            Element::Cell(cell) => self.render_cell(w, cell),
            Element::TextBox(textbox) => self.render_textbox(w, textbox),
            Element::Line(line) => self.render_line(w, line),
            Element::Image(image) => self.render_image(w, image),
            Element::RawMarkup(raw) => w.raw(&raw.markup),
            Element::Footnote(footnote) => self.render_footnote(w, footnote),
            Element::PageHeader => {
                if self.breaks_enabled {
                    self.run_page_header(w);
                } else {
                    log::debug!("page-header marker outside the body, skipped");
                }
            }
            Element::FootnoteFlush => self.flush_footnotes(w),
            Element::AddPage => {
                if self.breaks_enabled {
                    self.page_break(w);
                } else {
                    log::debug!("page-break marker outside the body, skipped");
                }
            }
        }
    }

    /// Resolve a style name for rendering. Empty names reuse the cursor's
    /// current style; unknown names fall back to the default with a warning.
    fn resolve_style(&mut self, name: &str) -> crate::model::Style {
        let effective = if name.is_empty() {
            self.cursor
                .current_style
                .clone()
                .unwrap_or_else(|| DEFAULT_STYLE.to_string())
        } else {
            name.to_string()
        };
        let style = if effective == DEFAULT_STYLE {
            self.styles.default_style().clone()
        } else {
            self.styles.resolve_or_default(&effective).clone()
        };
        self.cursor.current_style = Some(style.name.clone());
        style
    }

    fn default_align(&self) -> Align {
        match self.direction {
            TextDirection::Ltr => Align::Left,
            TextDirection::Rtl => Align::Right,
        }
    }

    fn render_cell(&mut self, w: &mut MarkupWriter, cell: &Cell) {
        let style = self.resolve_style(&cell.style);

        if cell.left.is_some() || cell.top.is_some() {
            let x = cell.left.unwrap_or(self.cursor.x);
            let y = cell.top.unwrap_or(self.cursor.y);
            self.cursor.set_position(x, y);
        }
        let x = self.cursor.x;
        let y = self.cursor.y;

        let width = if cell.width > 0.0 {
            cell.width
        } else {
            (self.cursor.no_margin_width - x).max(0.0)
        };
        let text = if cell.text.contains(PAGE_NUMBER_TOKEN) {
            cell.text
                .replace(PAGE_NUMBER_TOKEN, &self.cursor.page_number.to_string())
        } else {
            cell.text.clone()
        };
        let height = if cell.height > 0.0 {
            cell.height
        } else {
            metrics::cell_height(&style, &text, self.options.line_height_ratio)
        };

        let align = cell.align.unwrap_or_else(|| self.default_align());
        let mut css = format!(
            "left:{}pt;top:{}pt;width:{}pt;height:{}pt;text-align:{}",
            pt(x),
            pt(y),
            pt(width),
            pt(height),
            align_css(align),
        );
        if cell.border {
            css.push_str(";border:0.5pt solid #000");
        }
        if let Some(fill) = cell.fill.as_deref().and_then(checked_color) {
            css.push_str(";background:");
            css.push_str(&fill);
        }
        if let Some(color) = cell.color.as_deref().and_then(checked_color) {
            css.push_str(";color:");
            css.push_str(&color);
        }

        w.raw(&format!(
            "<div class=\"cell s-{}\" style=\"{}\">",
            css_class(&style.name),
            css,
        ));
        if let Some(url) = &cell.url {
            w.raw(&format!("<a href=\"{}\">", escape_attr(url)));
            w.text(&text);
            w.raw("</a>");
        } else {
            w.text(&text);
        }
        w.raw("</div>\n");

        match cell.advance {
            Advance::Right => self.cursor.x = x + width,
            Advance::NextLine => {
                self.cursor.x = 0.0;
                self.cursor.y = y + height;
            }
        }
        self.cursor.note_y(y + height);
    }

    fn render_textbox(&mut self, w: &mut MarkupWriter, textbox: &TextBox) {
        if textbox.left.is_some() || textbox.top.is_some() {
            let x = textbox.left.unwrap_or(self.cursor.x);
            let y = textbox.top.unwrap_or(self.cursor.y);
            self.cursor.set_position(x, y);
        }

        let width = if textbox.width > 0.0 {
            textbox.width
        } else {
            (self.cursor.no_margin_width - self.cursor.x).max(0.0)
        };

        // Wrap all runs first so the height is known before anything commits.
        let mut wrapped = Vec::with_capacity(textbox.runs.len());
        let mut height = 0.0f32;
        for run in &textbox.runs {
            let style = self.resolve_style(&run.style);
            let text = metrics::wrap(&run.text, width, &style);
            height += metrics::cell_height(&style, &text, self.options.line_height_ratio);
            let color = run.color.as_deref().and_then(checked_color);
            wrapped.push((text, style, color));
        }

        let printable =
            self.options.page_height - self.options.margin_top - self.options.margin_bottom;
        if textbox.pagecheck
            && self.breaks_enabled
            && textbox.top.is_none()
            && height <= printable
            && self.cursor.y + height > self.page_start_y + printable
        {
            self.page_break(w);
        }
        let x = self.cursor.x;
        let y = self.cursor.y;

        let mut css = format!(
            "left:{}pt;top:{}pt;width:{}pt;height:{}pt",
            pt(x),
            pt(y),
            pt(width),
            pt(height),
        );
        if textbox.border {
            css.push_str(";border:0.5pt solid #000");
        }
        if let Some(fill) = textbox.fill.as_deref().and_then(checked_color) {
            css.push_str(";background:");
            css.push_str(&fill);
        }

        w.raw(&format!("<div class=\"textbox\" style=\"{css}\">"));
        for (text, style, color) in &wrapped {
            match color {
                Some(color) => w.raw(&format!(
                    "<div class=\"s-{}\" style=\"color:{}\">",
                    css_class(&style.name),
                    color,
                )),
                None => w.raw(&format!("<div class=\"s-{}\">", css_class(&style.name))),
            }
            w.text(text);
            w.raw("</div>");
        }
        w.raw("</div>\n");

        if textbox.newline {
            self.cursor.x = 0.0;
            self.cursor.y = y + height;
        } else {
            self.cursor.x = x + width;
        }
        self.cursor.note_y(y + height);
    }

    fn render_line(&mut self, w: &mut MarkupWriter, line: &Line) {
        let left = line.x1.min(line.x2);
        let top = line.y1.min(line.y2);
        let width = (line.x2 - line.x1).abs().max(1.0);
        let height = (line.y2 - line.y1).abs().max(1.0);

        w.raw(&format!(
            "<svg class=\"rule\" style=\"left:{}pt;top:{}pt\" width=\"{}pt\" height=\"{}pt\" \
             viewBox=\"0 0 {} {}\"><line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" \
             stroke=\"#000\" stroke-width=\"0.5\"/></svg>\n",
            pt(left),
            pt(top),
            pt(width),
            pt(height),
            pt(width),
            pt(height),
            pt(line.x1 - left),
            pt(line.y1 - top),
            pt(line.x2 - left),
            pt(line.y2 - top),
        ));

        self.cursor.note_y(line.y1.max(line.y2));
    }

    fn render_image(&mut self, w: &mut MarkupWriter, image: &Image) {
        if image.left.is_some() || image.top.is_some() {
            let x = image.left.unwrap_or(self.cursor.x);
            let y = image.top.unwrap_or(self.cursor.y);
            self.cursor.set_position(x, y);
        }
        let x = self.cursor.x;
        let y = self.cursor.y;

        let (width, height) = self.image_dimensions(image);
        let draw_x = match image.align.unwrap_or_else(|| self.default_align()) {
            Align::Left | Align::Justify => x,
            Align::Center => (self.cursor.no_margin_width - width) / 2.0,
            Align::Right => self.cursor.no_margin_width - width,
        };

        match self.media.resolve_image_url(&image.media, width, height) {
            Ok(url) => w.raw(&format!(
                "<img class=\"image\" style=\"left:{}pt;top:{}pt;width:{}pt;height:{}pt\" src=\"{}\" alt=\"\">\n",
                pt(draw_x),
                pt(y),
                pt(width),
                pt(height),
                escape_attr(&url),
            )),
            Err(e) => {
                log::warn!("{e}; reserving an empty region");
                w.raw(&format!(
                    "<div class=\"image\" style=\"left:{}pt;top:{}pt;width:{}pt;height:{}pt\"></div>\n",
                    pt(draw_x),
                    pt(y),
                    pt(width),
                    pt(height),
                ));
            }
        }

        match image.advance {
            Advance::Right => self.cursor.x = draw_x + width,
            Advance::NextLine => {
                self.cursor.x = 0.0;
                self.cursor.y = y + height;
            }
        }
        self.cursor.note_y(y + height);
    }

    /// Display size for an image: explicit dimensions win, missing ones come
    /// from the intrinsic media size (scaled proportionally when only one is
    /// given). An unresolvable reference reserves a placeholder square.
    fn image_dimensions(&self, image: &Image) -> (f32, f32) {
        if image.width > 0.0 && image.height > 0.0 {
            return (image.width, image.height);
        }
        match self.media.intrinsic_size(&image.media) {
            Ok((iw, ih)) if iw > 0.0 && ih > 0.0 => {
                if image.width > 0.0 {
                    (image.width, image.width * ih / iw)
                } else if image.height > 0.0 {
                    (image.height * iw / ih, image.height)
                } else {
                    (iw, ih)
                }
            }
            Ok(_) => (
                if image.width > 0.0 { image.width } else { PLACEHOLDER_SIZE },
                if image.height > 0.0 { image.height } else { PLACEHOLDER_SIZE },
            ),
            Err(e) => {
                log::warn!("{e}; using placeholder dimensions");
                (
                    if image.width > 0.0 { image.width } else { PLACEHOLDER_SIZE },
                    if image.height > 0.0 { image.height } else { PLACEHOLDER_SIZE },
                )
            }
        }
    }

    /// Emit the superscript reference mark and register (or re-find) the
    /// footnote in the table.
    fn render_footnote(&mut self, w: &mut MarkupWriter, footnote: &Footnote) {
        let number = self
            .footnotes
            .check(&footnote.text, footnote.link.as_deref());
        let style = self.resolve_style("");
        let mark = number.to_string();

        w.raw(&format!(
            "<div class=\"cell s-{}\" style=\"left:{}pt;top:{}pt\">\
             <sup class=\"footnote-ref\"><a href=\"#fn-{}\">{}</a></sup></div>\n",
            css_class(&style.name),
            pt(self.cursor.x),
            pt(self.cursor.y),
            number,
            mark,
        ));

        self.cursor.x += metrics::estimate_width(&style, &mark);
        let line = metrics::cell_height(&style, &mark, self.options.line_height_ratio);
        self.cursor.note_y(self.cursor.y + line);
    }

    /// Print every footnote not yet flushed, in assigned-number order, as one
    /// block at the cursor.
    pub(super) fn flush_footnotes(&mut self, w: &mut MarkupWriter) {
        let entries = self.footnotes.take_unprinted();
        if entries.is_empty() {
            return;
        }

        let style = match self.styles.resolve("footnote") {
            Ok(style) => style.clone(),
            Err(_) => self.styles.default_style().clone(),
        };
        let y = self.cursor.y;
        let width = self.cursor.no_margin_width;

        w.raw(&format!(
            "<div class=\"footnotes s-{}\" style=\"left:0pt;top:{}pt;width:{}pt\">\n",
            css_class(&style.name),
            pt(y),
            pt(width),
        ));
        let mut offset = 0.0f32;
        for entry in &entries {
            let text = metrics::wrap(&entry.text, width, &style);
            offset += metrics::cell_height(&style, &text, self.options.line_height_ratio);
            w.raw(&format!(
                "<div class=\"footnote\" id=\"fn-{}\"><sup>{}</sup> ",
                entry.number, entry.number,
            ));
            w.text(&text);
            if let Some(link) = &entry.link {
                w.raw(&format!(
                    " <a href=\"{}\">{}</a>",
                    escape_attr(link),
                    escape_text(link),
                ));
            }
            w.raw("</div>\n");
        }
        w.raw("</div>\n");

        self.cursor.x = 0.0;
        self.cursor.y = y + offset;
        self.cursor.note_y(self.cursor.y);
    }
}

fn align_css(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
        Align::Justify => "justify",
    }
}
