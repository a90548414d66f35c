use crate::model::Style;
use crate::styles::{DEFAULT_STYLE, StyleRegistry};

/// Append-only markup stream. The document assembles one writer per section
/// so section heights can be injected after the section finishes.
pub(super) struct MarkupWriter {
    buf: String,
}

impl MarkupWriter {
    pub(super) fn new() -> Self {
        Self { buf: String::new() }
    }

    pub(super) fn raw(&mut self, markup: &str) {
        self.buf.push_str(markup);
    }

    /// Escaped text content; line breaks become `<br>`.
    pub(super) fn text(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.buf.push_str("<br>");
            }
            self.buf.push_str(&escape_text(line));
        }
    }

    pub(super) fn finish(self) -> String {
        self.buf
    }
}

pub(super) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub(super) fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format a point coordinate for markup output, trimmed to 1/100pt.
pub(super) fn pt(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// Style names become CSS class suffixes; anything outside the safe set
/// collapses to `-`.
pub(super) fn css_class(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// The document stylesheet: fixed layout classes plus one rule per
/// registered style.
pub(super) fn stylesheet(registry: &StyleRegistry) -> String {
    let mut css = String::new();
    css.push_str("body{margin:0}\n");
    css.push_str(".report-section{position:relative}\n");
    css.push_str(".cell,.textbox,.rule,.image,.footnotes{position:absolute}\n");
    css.push_str(".cell{overflow:hidden}\n");
    css.push_str(".page-break{page-break-before:always;break-before:page}\n");
    css.push_str(".footnote-ref{vertical-align:super;font-size:smaller}\n");

    if registry.resolve(DEFAULT_STYLE).is_err() {
        css.push_str(&style_rule(registry.default_style()));
    }
    for style in registry.iter() {
        css.push_str(&style_rule(style));
    }
    css
}

fn style_rule(style: &Style) -> String {
    let mut rule = format!(
        ".s-{}{{font-family:{};font-size:{}pt",
        css_class(&style.name),
        style.font,
        style.size
    );
    if style.bold {
        rule.push_str(";font-weight:bold");
    }
    if style.italic {
        rule.push_str(";font-style:italic");
    }
    match (style.underline, style.strikethrough) {
        (true, true) => rule.push_str(";text-decoration:underline line-through"),
        (true, false) => rule.push_str(";text-decoration:underline"),
        (false, true) => rule.push_str(";text-decoration:line-through"),
        (false, false) => {}
    }
    rule.push_str("}\n");
    rule
}
