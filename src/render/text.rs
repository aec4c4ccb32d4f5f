#![forbid(unsafe_code)]

//! Gradient text: word wrapping, justification, and overflow handling.
//!
//! The wrapping helpers here are shared by the panel, markdown, and help
//! renderers, which all wrap styled spans rather than bare strings.

use unicode_width::UnicodeWidthChar;

use super::gradient::colorize_line;
use super::style::Style;
use super::{Gradient, GradientSpec, Justify, Line, Overflow, Renderable, Span};

/// Options for the `print` command's renderable.
#[derive(Debug, Clone)]
pub struct TextRequest {
    pub content: String,
    pub gradient: GradientSpec,
    pub style: Style,
    pub justify: Justify,
    pub overflow: Overflow,
    pub no_wrap: bool,
}

/// Plain text with a gradient swept across each line.
pub struct GradientText {
    request: TextRequest,
    fg: Gradient,
    bg: Option<Gradient>,
}

impl GradientText {
    /// Resolves the gradients once so every animation frame (and the SVG
    /// export) sees the same stops.
    pub fn new(request: TextRequest) -> Self {
        let fg = request.gradient.foreground();
        let bg = request.gradient.background();
        GradientText { request, fg, bg }
    }
}

impl Renderable for GradientText {
    fn lines_at(&self, width: usize, phase: f32) -> Vec<Line> {
        let mut out = Vec::new();
        for logical in self.request.content.split('\n') {
            let mut base = Line::default();
            base.push(Span::new(logical, self.request.style));
            let wrapped = if self.request.no_wrap {
                vec![match self.request.overflow {
                    Overflow::Crop => truncate_line(&base, width, false),
                    Overflow::Ellipsis => truncate_line(&base, width, true),
                    Overflow::Fold => base,
                }]
            } else {
                wrap_spans(&base.spans, width)
            };
            for line in wrapped {
                let colored = colorize_line(&line, Some(&self.fg), self.bg.as_ref(), phase);
                out.push(justify_line(colored, width, self.request.justify));
            }
        }
        out
    }
}

/// Greedy word wrap over styled spans. Inner runs of spaces survive when
/// they fit; the space a line breaks on is dropped, as are spaces that
/// would start a continuation line. Words wider than the target are split
/// at cell boundaries.
pub(crate) fn wrap_spans(spans: &[Span], width: usize) -> Vec<Line> {
    let width = width.max(1);
    let chars: Vec<(char, Style)> = spans
        .iter()
        .flat_map(|s| s.text.chars().map(move |c| (c, s.style)))
        .collect();

    let mut lines = Vec::new();
    let mut current: Vec<(char, Style)> = Vec::new();
    let mut current_width = 0usize;

    let mut i = 0;
    while i < chars.len() {
        let is_space = chars[i].0 == ' ';
        let mut j = i;
        while j < chars.len() && (chars[j].0 == ' ') == is_space {
            j += 1;
        }
        let token = &chars[i..j];
        let token_width: usize = token.iter().map(|(c, _)| cell_width(*c)).sum();
        i = j;

        if is_space {
            // Spaces at the start of a continuation line vanish.
            if current_width == 0 && !lines.is_empty() {
                continue;
            }
            current.extend_from_slice(token);
            current_width += token_width;
            continue;
        }

        if current_width + token_width <= width {
            current.extend_from_slice(token);
            current_width += token_width;
            continue;
        }
        if current_width > 0 {
            flush(&mut lines, &mut current, &mut current_width);
        }
        if token_width <= width {
            current.extend_from_slice(token);
            current_width = token_width;
            continue;
        }
        // Overlong word, split at cell boundaries.
        for &(c, style) in token {
            let w = cell_width(c);
            if current_width + w > width {
                flush(&mut lines, &mut current, &mut current_width);
            }
            current.push((c, style));
            current_width += w;
        }
    }
    flush(&mut lines, &mut current, &mut current_width);
    if lines.is_empty() {
        lines.push(Line::default());
    }
    lines
}

fn flush(lines: &mut Vec<Line>, current: &mut Vec<(char, Style)>, current_width: &mut usize) {
    while current.last().is_some_and(|(c, _)| *c == ' ') {
        current.pop();
    }
    let mut line = Line::default();
    for &(c, style) in current.iter() {
        line.push(Span::new(c.to_string(), style));
    }
    lines.push(line);
    current.clear();
    *current_width = 0;
}

/// Left-pads a line into `width` according to the justification. Lines at
/// or past the width are untouched.
pub(crate) fn justify_line(line: Line, width: usize, justify: Justify) -> Line {
    let line_width = line.width();
    if line_width >= width || justify == Justify::Left {
        return line;
    }
    let pad = match justify {
        Justify::Left => 0,
        Justify::Center => (width - line_width) / 2,
        Justify::Right => width - line_width,
    };
    if pad == 0 {
        return line;
    }
    let mut out = Line::default();
    out.push(Span::plain(" ".repeat(pad)));
    for span in line.spans {
        out.push(span);
    }
    out
}

/// Cuts a line down to `width` cells. With `ellipsis`, the last cell is
/// spent on `…`.
pub(crate) fn truncate_line(line: &Line, width: usize, ellipsis: bool) -> Line {
    if line.width() <= width {
        return line.clone();
    }
    let target = if ellipsis {
        width.saturating_sub(1)
    } else {
        width
    };
    let mut out = Line::default();
    let mut used = 0usize;
    'spans: for span in &line.spans {
        for c in span.text.chars() {
            let w = cell_width(c);
            if used + w > target {
                break 'spans;
            }
            out.push(Span::new(c.to_string(), span.style));
            used += w;
        }
    }
    if ellipsis {
        let style = line.spans.last().map(|s| s.style).unwrap_or_default();
        out.push(Span::new("…", style));
    }
    out
}

fn cell_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}
