//! Approximate text metrics.
//!
//! Width uses an average-character-width model: one code point is assumed to
//! occupy half the font size. Crude, but every layout decision in the engine
//! only needs layout-equivalent output, not glyph-accurate shaping.

use unicode_segmentation::UnicodeSegmentation;

use crate::model::{Cell, Style, TextBox};
use crate::styles::StyleRegistry;

/// Estimated rendered width of `text` in points.
/// Counts Unicode code points, not bytes.
pub fn estimate_width(style: &Style, text: &str) -> f32 {
    text.chars().count() as f32 * (style.size / 2.0)
}

/// Number of physical lines: 0 for the empty string, otherwise line-break
/// count + 1.
pub fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.matches('\n').count() + 1
    }
}

/// Height of a cell holding `text`, in points. Always at least one line tall,
/// even for empty text.
pub fn cell_height(style: &Style, text: &str, line_height_ratio: f32) -> f32 {
    let lines = count_lines(text).max(1);
    (style.size * line_height_ratio * lines as f32).ceil()
}

/// Word-wrap `text` to `max_width` points in `style`.
///
/// Existing line breaks are honored first (empty lines survive); each
/// physical line is then greedily wrapped to a column budget derived from the
/// average character width. A single word longer than the budget is emitted
/// intact on its own line, overflowing the budget, rather than broken or
/// truncated.
pub fn wrap(text: &str, max_width: f32, style: &Style) -> String {
    let columns = (max_width / (style.size / 2.0)).floor() as usize;
    text.split('\n')
        .map(|line| wrap_line(line, columns))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Cell {
    /// Width the cell would claim if sized to its widest text line.
    pub fn natural_width(&self, style: &Style) -> f32 {
        self.text
            .split('\n')
            .map(|line| estimate_width(style, line))
            .fold(0.0, f32::max)
    }

    /// Height the cell takes when its height is left auto.
    pub fn natural_height(&self, style: &Style, line_height_ratio: f32) -> f32 {
        cell_height(style, &self.text, line_height_ratio)
    }
}

impl TextBox {
    /// Height of the box once every run is wrapped to `width`.
    pub fn natural_height(
        &self,
        styles: &StyleRegistry,
        width: f32,
        line_height_ratio: f32,
    ) -> f32 {
        self.runs
            .iter()
            .map(|run| {
                let style = styles
                    .resolve(&run.style)
                    .unwrap_or_else(|_| styles.default_style());
                cell_height(style, &wrap(&run.text, width, style), line_height_ratio)
            })
            .sum()
    }
}

/// Greedy wrap of one physical line. Columns are counted in grapheme
/// clusters so a cluster is never split across lines.
fn wrap_line(line: &str, max_columns: usize) -> String {
    let mut out = String::new();
    let mut column = 0usize;
    for word in line.split_whitespace() {
        let width = word.graphemes(true).count();
        if column == 0 {
            out.push_str(word);
            column = width;
        } else if column + 1 + width <= max_columns {
            out.push(' ');
            out.push_str(word);
            column += 1 + width;
        } else {
            out.push('\n');
            out.push_str(word);
            column = width;
        }
    }
    out
}
