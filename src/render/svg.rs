#![forbid(unsafe_code)]

//! SVG export.
//!
//! Renders a renderable at a fixed 80-cell width into a chrome-decorated
//! terminal snapshot: rounded window, traffic-light buttons, monospace
//! text with per-span fills. Styles come straight from the span model, so
//! whatever the terminal would show lands in the file.

use std::fs;
use std::path::Path;

use palette::Srgb;

use crate::error::{CliError, CliResult};

use super::{Line, Renderable, Span};

/// Render width used for every export, matching the recorded-console
/// width the CLI always used.
pub const EXPORT_WIDTH: usize = 80;

const FONT_SIZE: f32 = 14.0;
const CHAR_WIDTH: f32 = FONT_SIZE * 0.61;
const LINE_HEIGHT: f32 = FONT_SIZE * 1.4;
/// Interior padding in cells: one row above and below, four columns at
/// the sides.
const PAD_ROWS: usize = 1;
const PAD_COLS: usize = 4;
const MARGIN: f32 = 12.0;
const TITLE_BAR: f32 = 40.0;

const BACKGROUND: &str = "#0d1117";
const FOREGROUND: &str = "#e6edf3";
const WINDOW_TITLE: &str = "gradient";

/// Writes the rendered SVG to `path`.
pub fn export(renderable: &dyn Renderable, path: &Path, end: &str) -> CliResult<()> {
    let svg = render_svg(renderable, end);
    fs::write(path, svg).map_err(|source| CliError::SvgWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders the SVG document as a string. Any printable tail of `end` is
/// appended after the content the way it would be on the terminal.
pub fn render_svg(renderable: &dyn Renderable, end: &str) -> String {
    let mut lines = renderable.lines(EXPORT_WIDTH);
    append_end(&mut lines, end);

    let rows = lines.len();
    let cols = EXPORT_WIDTH;
    let inner_width = (cols + 2 * PAD_COLS) as f32 * CHAR_WIDTH;
    let inner_height = rows as f32 * LINE_HEIGHT + 2.0 * PAD_ROWS as f32 * LINE_HEIGHT + TITLE_BAR;
    let total_width = inner_width + 2.0 * MARGIN;
    let total_height = inner_height + 2.0 * MARGIN;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{total_width:.0}\" \
         height=\"{total_height:.0}\" viewBox=\"0 0 {total_width:.0} {total_height:.0}\" \
         xml:space=\"preserve\">\n"
    ));
    svg.push_str(&format!(
        "  <style>text {{ font-family: 'Fira Code', 'Cascadia Code', Consolas, \
         Menlo, monospace; font-size: {FONT_SIZE}px; white-space: pre; }}</style>\n"
    ));
    svg.push_str(&format!(
        "  <rect x=\"{MARGIN}\" y=\"{MARGIN}\" width=\"{inner_width:.1}\" \
         height=\"{inner_height:.1}\" rx=\"8\" fill=\"{BACKGROUND}\"/>\n"
    ));
    for (i, color) in ["#ff5f57", "#febc2e", "#28c840"].iter().enumerate() {
        let cx = MARGIN + 22.0 + 22.0 * i as f32;
        let cy = MARGIN + TITLE_BAR / 2.0;
        svg.push_str(&format!(
            "  <circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"7\" fill=\"{color}\"/>\n"
        ));
    }
    svg.push_str(&format!(
        "  <text x=\"{x:.1}\" y=\"{y:.1}\" fill=\"#808080\" text-anchor=\"middle\">{title}</text>\n",
        x = total_width / 2.0,
        y = MARGIN + TITLE_BAR / 2.0 + FONT_SIZE / 3.0,
        title = escape(WINDOW_TITLE),
    ));

    let origin_x = MARGIN + PAD_COLS as f32 * CHAR_WIDTH;
    let origin_y = MARGIN + TITLE_BAR + PAD_ROWS as f32 * LINE_HEIGHT;
    for (row, line) in lines.iter().enumerate() {
        let top = origin_y + row as f32 * LINE_HEIGHT;
        let baseline = top + FONT_SIZE;
        let mut cell = 0usize;
        for span in &line.spans {
            let width_cells = span.width();
            let x = origin_x + cell as f32 * CHAR_WIDTH;
            if let Some(bg) = span.style.bg {
                svg.push_str(&format!(
                    "  <rect x=\"{x:.1}\" y=\"{top:.1}\" width=\"{w:.1}\" \
                     height=\"{LINE_HEIGHT:.1}\" fill=\"{fill}\"/>\n",
                    w = width_cells as f32 * CHAR_WIDTH,
                    fill = css_hex(bg),
                ));
            }
            if !span.text.trim().is_empty() {
                svg.push_str(&text_element(span, x, baseline));
            }
            cell += width_cells;
        }
    }
    svg.push_str("</svg>\n");
    svg
}

fn text_element(span: &Span, x: f32, baseline: f32) -> String {
    let fill = span
        .style
        .fg
        .map(css_hex)
        .unwrap_or_else(|| FOREGROUND.to_string());
    let mut attrs = String::new();
    if span.style.bold {
        attrs.push_str(" font-weight=\"bold\"");
    }
    if span.style.italic {
        attrs.push_str(" font-style=\"italic\"");
    }
    let mut decorations = Vec::new();
    if span.style.underline {
        decorations.push("underline");
    }
    if span.style.strikethrough {
        decorations.push("line-through");
    }
    if !decorations.is_empty() {
        attrs.push_str(&format!(" text-decoration=\"{}\"", decorations.join(" ")));
    }
    if span.style.dim {
        attrs.push_str(" opacity=\"0.7\"");
    }
    format!(
        "  <text x=\"{x:.1}\" y=\"{baseline:.1}\" fill=\"{fill}\"{attrs}>{text}</text>\n",
        text = escape(&span.text),
    )
}

/// Appends the printable tail of `end` after the content. Only trailing
/// newlines are stripped; interior and leading ones become new rows, as
/// they would on the terminal.
fn append_end(lines: &mut Vec<Line>, end: &str) {
    let tail = end.trim_end_matches('\n');
    if tail.is_empty() {
        return;
    }
    let mut segments = tail.split('\n');
    if let Some(first) = segments.next() {
        if !first.is_empty() {
            match lines.last_mut() {
                Some(last) => last.push(Span::plain(first)),
                None => lines.push(Line::from_plain(first)),
            }
        }
    }
    for segment in segments {
        lines.push(Line::from_plain(segment));
    }
}

fn css_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
