#![forbid(unsafe_code)]

//! Gradient panels: boxed content with optional title and subtitle.
//!
//! The gradient runs horizontally across each border line; the content
//! keeps its own style unless a background gradient is set, which fills
//! the whole panel interior.

use clap::ValueEnum;
use unicode_width::UnicodeWidthStr;

use super::gradient::colorize_line;
use super::style::Style;
use super::text::{justify_line, truncate_line, wrap_spans};
use super::{Gradient, GradientSpec, Justify, Line, Renderable, Span, VerticalAlign};

/// Interior padding in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

impl Padding {
    /// The same padding on all four sides.
    pub fn uniform(value: usize) -> Self {
        Padding {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Vertical and horizontal padding, CSS-shorthand style.
    pub fn symmetric(vertical: usize, horizontal: usize) -> Self {
        Padding {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Explicit top, right, bottom, left padding.
    pub fn new(top: usize, right: usize, bottom: usize, left: usize) -> Self {
        Padding {
            top,
            right,
            bottom,
            left,
        }
    }

    fn horizontal(&self) -> usize {
        self.left + self.right
    }

    fn vertical(&self) -> usize {
        self.top + self.bottom
    }
}

/// Border glyph set for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum BoxKind {
    Square,
    #[default]
    Rounded,
    Heavy,
    Double,
    Ascii,
}

pub(crate) struct BoxChars {
    pub top_left: char,
    pub top: char,
    pub top_right: char,
    pub side: char,
    pub bottom_left: char,
    pub bottom: char,
    pub bottom_right: char,
}

impl BoxKind {
    pub(crate) fn chars(self) -> BoxChars {
        match self {
            BoxKind::Square => BoxChars {
                top_left: '┌',
                top: '─',
                top_right: '┐',
                side: '│',
                bottom_left: '└',
                bottom: '─',
                bottom_right: '┘',
            },
            BoxKind::Rounded => BoxChars {
                top_left: '╭',
                top: '─',
                top_right: '╮',
                side: '│',
                bottom_left: '╰',
                bottom: '─',
                bottom_right: '╯',
            },
            BoxKind::Heavy => BoxChars {
                top_left: '┏',
                top: '━',
                top_right: '┓',
                side: '┃',
                bottom_left: '┗',
                bottom: '━',
                bottom_right: '┛',
            },
            BoxKind::Double => BoxChars {
                top_left: '╔',
                top: '═',
                top_right: '╗',
                side: '║',
                bottom_left: '╚',
                bottom: '═',
                bottom_right: '╝',
            },
            BoxKind::Ascii => BoxChars {
                top_left: '+',
                top: '-',
                top_right: '+',
                side: '|',
                bottom_left: '+',
                bottom: '-',
                bottom_right: '+',
            },
        }
    }
}

/// Options for the `panel` command's renderable.
#[derive(Debug, Clone)]
pub struct PanelRequest {
    pub content: String,
    pub gradient: GradientSpec,
    pub title: Option<String>,
    pub title_style: Style,
    pub title_align: Justify,
    pub subtitle: Option<String>,
    pub subtitle_style: Style,
    pub subtitle_align: Justify,
    pub style: Style,
    pub border_style: Style,
    pub padding: Padding,
    pub text_justify: Justify,
    pub vertical_align: VerticalAlign,
    pub justify: Justify,
    pub expand: bool,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub box_kind: BoxKind,
}

/// A bordered panel with gradient borders.
pub struct GradientPanel {
    request: PanelRequest,
    fg: Gradient,
    bg: Option<Gradient>,
}

impl GradientPanel {
    pub fn new(request: PanelRequest) -> Self {
        let fg = request.gradient.foreground();
        let bg = request.gradient.background();
        GradientPanel { request, fg, bg }
    }

    fn content_lines(&self, inner_width: usize) -> Vec<Line> {
        let mut lines = Vec::new();
        for logical in self.request.content.split('\n') {
            let mut base = Line::default();
            base.push(Span::new(logical, self.request.style));
            for wrapped in wrap_spans(&base.spans, inner_width) {
                lines.push(justify_line(wrapped, inner_width, self.request.text_justify));
            }
        }
        lines
    }

    /// Panel width for the given console width, honoring `--width`, then
    /// `--expand`, then content fit.
    fn panel_width(&self, console_width: usize) -> usize {
        let frame = 2 + self.request.padding.horizontal();
        let min_width = frame + 1;
        if let Some(width) = self.request.width {
            return width.clamp(min_width.min(console_width), console_width.max(min_width));
        }
        if self.request.expand {
            return console_width.max(min_width);
        }
        let max_inner = console_width.saturating_sub(frame).max(1);
        let natural = self
            .content_lines(max_inner)
            .iter()
            .map(Line::width)
            .max()
            .unwrap_or(0);
        let caption = |text: &Option<String>| {
            text.as_deref()
                .map(|t| UnicodeWidthStr::width(t) + 4)
                .unwrap_or(0)
        };
        let needed = natural
            .max(caption(&self.request.title))
            .max(caption(&self.request.subtitle));
        (needed + frame).clamp(min_width, console_width.max(min_width))
    }

    fn border_color(&self, t: f32, phase: f32) -> Style {
        self.request.border_style.with_fg(self.fg.at(t + phase))
    }

    /// A top or bottom border line with an optional embedded caption.
    fn border_line(
        &self,
        panel_width: usize,
        phase: f32,
        left: char,
        fill: char,
        right: char,
        caption: Option<(&str, Style, Justify)>,
    ) -> Line {
        let inner = panel_width.saturating_sub(2);
        let mut line = Line::default();
        line.push(Span::new(left.to_string(), self.request.border_style));
        match caption {
            Some((text, style, align)) if inner >= 4 => {
                let mut caption_line = Line::default();
                caption_line.push(Span::new(text, style));
                let caption_line = truncate_line(&caption_line, inner - 4, true);
                let cap_width = caption_line.width() + 2;
                let available = inner - cap_width;
                let before = match align {
                    Justify::Left => 1.min(available),
                    Justify::Center => available / 2,
                    Justify::Right => available.saturating_sub(1),
                };
                let after = available - before;
                line.push(Span::new(
                    fill.to_string().repeat(before),
                    self.request.border_style,
                ));
                line.push(Span::new(" ", self.request.border_style));
                for span in caption_line.spans {
                    line.push(span);
                }
                line.push(Span::new(" ", self.request.border_style));
                line.push(Span::new(
                    fill.to_string().repeat(after),
                    self.request.border_style,
                ));
            }
            _ => {
                line.push(Span::new(
                    fill.to_string().repeat(inner),
                    self.request.border_style,
                ));
            }
        }
        line.push(Span::new(right.to_string(), self.request.border_style));
        colorize_line(&line, Some(&self.fg), None, phase)
    }

    /// An interior row: side borders, padding, and content padded out to
    /// the inner width.
    fn side_row(&self, content: &Line, inner_width: usize, phase: f32) -> Line {
        let chars = self.request.box_kind.chars();
        let mut line = Line::default();
        line.push(Span::new(
            chars.side.to_string(),
            self.border_color(0.0, phase),
        ));
        line.push(Span::plain(" ".repeat(self.request.padding.left)));
        let content = truncate_line(content, inner_width, false);
        let fill = inner_width.saturating_sub(content.width());
        for span in &content.spans {
            line.push(span.clone());
        }
        line.push(Span::plain(" ".repeat(fill)));
        line.push(Span::plain(" ".repeat(self.request.padding.right)));
        line.push(Span::new(
            chars.side.to_string(),
            self.border_color(1.0, phase),
        ));
        line
    }
}

impl Renderable for GradientPanel {
    fn lines_at(&self, width: usize, phase: f32) -> Vec<Line> {
        let console_width = width.max(4);
        let panel_width = self.panel_width(console_width);
        let inner_width = panel_width
            .saturating_sub(2 + self.request.padding.horizontal())
            .max(1);
        let chars = self.request.box_kind.chars();

        let mut content = self.content_lines(inner_width);
        if let Some(height) = self.request.height {
            let rows = height.saturating_sub(2 + self.request.padding.vertical());
            content = fit_rows(content, rows, self.request.vertical_align);
        }

        let mut lines = Vec::new();
        lines.push(self.border_line(
            panel_width,
            phase,
            chars.top_left,
            chars.top,
            chars.top_right,
            self.request
                .title
                .as_deref()
                .map(|t| (t, self.request.title_style, self.request.title_align)),
        ));
        let blank = Line::from_plain(" ".repeat(inner_width));
        for _ in 0..self.request.padding.top {
            lines.push(self.side_row(&blank, inner_width, phase));
        }
        for row in &content {
            lines.push(self.side_row(row, inner_width, phase));
        }
        for _ in 0..self.request.padding.bottom {
            lines.push(self.side_row(&blank, inner_width, phase));
        }
        lines.push(self.border_line(
            panel_width,
            phase,
            chars.bottom_left,
            chars.bottom,
            chars.bottom_right,
            self.request
                .subtitle
                .as_deref()
                .map(|t| (t, self.request.subtitle_style, self.request.subtitle_align)),
        ));

        if let Some(bg) = &self.bg {
            lines = lines
                .iter()
                .map(|l| colorize_line(l, None, Some(bg), phase))
                .collect();
        }

        // Panel placement inside the console happens after background
        // fill, so the alignment pad stays transparent.
        if console_width > panel_width && self.request.justify != Justify::Left {
            lines = lines
                .into_iter()
                .map(|l| pad_panel_line(l, console_width, panel_width, self.request.justify))
                .collect();
        }
        lines
    }
}

fn pad_panel_line(line: Line, console_width: usize, panel_width: usize, justify: Justify) -> Line {
    let pad = match justify {
        Justify::Left => 0,
        Justify::Center => (console_width - panel_width) / 2,
        Justify::Right => console_width - panel_width,
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

/// Pads or crops `rows` to exactly `target` lines, placing the content
/// according to the vertical alignment.
fn fit_rows(mut rows: Vec<Line>, target: usize, align: VerticalAlign) -> Vec<Line> {
    if rows.len() >= target {
        rows.truncate(target);
        return rows;
    }
    let missing = target - rows.len();
    let above = match align {
        VerticalAlign::Top => 0,
        VerticalAlign::Middle => missing / 2,
        VerticalAlign::Bottom => missing,
    };
    let mut out = Vec::with_capacity(target);
    for _ in 0..above {
        out.push(Line::default());
    }
    out.append(&mut rows);
    while out.len() < target {
        out.push(Line::default());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;

    fn request(content: &str) -> PanelRequest {
        PanelRequest {
            content: content.to_string(),
            gradient: GradientSpec {
                colors: vec![Srgb::new(255, 0, 0), Srgb::new(0, 0, 255)],
                ..GradientSpec::default()
            },
            title: None,
            title_style: Style::default(),
            title_align: Justify::Center,
            subtitle: None,
            subtitle_style: Style::default(),
            subtitle_align: Justify::Right,
            style: Style::default(),
            border_style: Style::default(),
            padding: Padding::symmetric(0, 1),
            text_justify: Justify::Left,
            vertical_align: VerticalAlign::Top,
            justify: Justify::Left,
            expand: false,
            width: None,
            height: None,
            box_kind: BoxKind::Rounded,
        }
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::plain_text).collect()
    }

    #[test]
    fn test_fit_panel_wraps_content_in_rounded_borders() {
        let panel = GradientPanel::new(request("hi"));
        let lines = panel.lines(40);
        assert_eq!(texts(&lines), vec!["╭────╮", "│ hi │", "╰────╯"]);
    }

    #[test]
    fn test_expand_fills_console_width() {
        let mut req = request("hi");
        req.expand = true;
        let panel = GradientPanel::new(req);
        let lines = panel.lines(24);
        assert!(lines.iter().all(|l| l.width() == 24));
    }

    #[test]
    fn test_explicit_width_wins() {
        let mut req = request("hi");
        req.width = Some(10);
        let panel = GradientPanel::new(req);
        assert_eq!(panel.lines(40)[0].width(), 10);
    }

    #[test]
    fn test_title_is_embedded_in_top_border() {
        let mut req = request("content here");
        req.title = Some("Title".to_string());
        let panel = GradientPanel::new(req);
        let top = panel.lines(40)[0].plain_text();
        assert!(top.contains(" Title "));
        assert!(top.starts_with('╭'));
        assert!(top.ends_with('╮'));
    }

    #[test]
    fn test_subtitle_lands_in_bottom_border() {
        let mut req = request("content here");
        req.subtitle = Some("sub".to_string());
        let panel = GradientPanel::new(req);
        let lines = panel.lines(40);
        assert!(lines[lines.len() - 1].plain_text().contains(" sub "));
    }

    #[test]
    fn test_ascii_box_uses_ascii_glyphs() {
        let mut req = request("hi");
        req.box_kind = BoxKind::Ascii;
        let panel = GradientPanel::new(req);
        assert_eq!(texts(&panel.lines(40)), vec!["+----+", "| hi |", "+----+"]);
    }

    #[test]
    fn test_padding_adds_blank_rows_and_columns() {
        let mut req = request("hi");
        req.padding = Padding::uniform(1);
        let panel = GradientPanel::new(req);
        let lines = panel.lines(40);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1].plain_text(), "│    │");
        assert_eq!(lines[2].plain_text(), "│ hi │");
    }

    #[test]
    fn test_fixed_height_middle_alignment() {
        let mut req = request("hi");
        req.height = Some(5);
        req.padding = Padding::default();
        req.vertical_align = VerticalAlign::Middle;
        let panel = GradientPanel::new(req);
        let lines = panel.lines(40);
        assert_eq!(lines.len(), 5);
        assert!(lines[2].plain_text().contains("hi"));
    }

    #[test]
    fn test_panel_justify_right_pads_every_line() {
        let mut req = request("hi");
        req.justify = Justify::Right;
        let panel = GradientPanel::new(req);
        let lines = panel.lines(12);
        assert!(lines.iter().all(|l| l.plain_text().starts_with("      ")));
    }

    #[test]
    fn test_border_carries_gradient_colors() {
        let panel = GradientPanel::new(request("hi"));
        let lines = panel.lines(40);
        let top = &lines[0];
        assert!(top.spans.iter().all(|s| s.style.fg.is_some()));
        assert_eq!(top.spans[0].style.fg, Some(Srgb::new(255, 0, 0)));
        // Content keeps its own (plain) style.
        let mid = &lines[1];
        assert!(mid.spans.iter().any(|s| s.style.fg.is_none()));
    }

    #[test]
    fn test_background_gradient_fills_interior() {
        let mut req = request("hi");
        req.gradient.bg_colors = vec![Srgb::new(0, 0, 0), Srgb::new(30, 30, 30)];
        let panel = GradientPanel::new(req);
        let lines = panel.lines(40);
        assert!(
            lines
                .iter()
                .all(|l| l.spans.iter().all(|s| s.style.bg.is_some()))
        );
    }

    #[test]
    fn test_multiline_content_keeps_logical_breaks() {
        let panel = GradientPanel::new(request("one\ntwo"));
        let lines = panel.lines(40);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].plain_text().contains("one"));
        assert!(lines[2].plain_text().contains("two"));
    }

    #[test]
    fn test_long_title_is_truncated_not_overflowed() {
        let mut req = request("hi");
        req.width = Some(12);
        req.title = Some("a very long title indeed".to_string());
        let panel = GradientPanel::new(req);
        assert_eq!(panel.lines(40)[0].width(), 12);
    }
}
