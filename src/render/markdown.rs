#![forbid(unsafe_code)]

//! Gradient markdown rendering.
//!
//! `pulldown-cmark` does the parsing; this module lays the event stream
//! out into styled lines (headings, lists, quotes, code, rules) and then
//! sweeps the gradient across the result line by line.

use palette::Srgb;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

use super::gradient::colorize_line;
use super::style::Style;
use super::text::{justify_line, wrap_spans};
use super::{Gradient, GradientSpec, Justify, Line, Renderable, Span, VerticalAlign};

/// Background for inline code and code blocks. Survives the gradient,
/// which only replaces foreground colors.
const CODE_BG: Srgb<u8> = Srgb::new(40, 40, 40);

/// Options for the `markdown` command's renderable.
#[derive(Debug, Clone)]
pub struct MarkdownRequest {
    pub source: String,
    pub gradient: GradientSpec,
    pub style: Style,
    pub justify: Justify,
    pub vertical_align: VerticalAlign,
    pub no_wrap: bool,
}

/// Markdown laid out for the terminal with a gradient over the text.
pub struct GradientMarkdown {
    request: MarkdownRequest,
    fg: Gradient,
    bg: Option<Gradient>,
}

impl GradientMarkdown {
    pub fn new(request: MarkdownRequest) -> Self {
        let fg = request.gradient.foreground();
        let bg = request.gradient.background();
        GradientMarkdown { request, fg, bg }
    }

    /// Vertical placement requested for animated, full-screen rendering.
    pub fn vertical_align(&self) -> VerticalAlign {
        self.request.vertical_align
    }
}

impl Renderable for GradientMarkdown {
    fn lines_at(&self, width: usize, phase: f32) -> Vec<Line> {
        let width = width.max(8);
        let doc = layout(
            &self.request.source,
            width,
            self.request.style,
            self.request.justify,
            self.request.no_wrap,
        );
        doc.into_iter()
            .map(|line| {
                if line.spans.is_empty() {
                    line
                } else {
                    colorize_line(&line, Some(&self.fg), self.bg.as_ref(), phase)
                }
            })
            .collect()
    }
}

struct ListState {
    next_index: Option<u64>,
}

struct Prefix {
    text: String,
    style: Style,
    /// Markers print once; continuation lines get matching indent.
    once: bool,
    used: bool,
}

impl Prefix {
    fn bar() -> Self {
        Prefix {
            text: "│ ".to_string(),
            style: Style {
                dim: true,
                ..Style::default()
            },
            once: false,
            used: false,
        }
    }

    fn marker(text: String) -> Self {
        Prefix {
            text,
            style: Style::default(),
            once: true,
            used: false,
        }
    }

    fn indent() -> Self {
        Prefix {
            text: "  ".to_string(),
            style: Style::default(),
            once: false,
            used: false,
        }
    }
}

struct DocBuilder {
    width: usize,
    justify: Justify,
    no_wrap: bool,
    lines: Vec<Line>,
    buffer: Line,
    style_stack: Vec<Style>,
    prefixes: Vec<Prefix>,
    lists: Vec<ListState>,
    code: Option<String>,
    link_text_from: usize,
    link_dest: Option<String>,
}

impl DocBuilder {
    fn new(width: usize, base: Style, justify: Justify, no_wrap: bool) -> Self {
        DocBuilder {
            width,
            justify,
            no_wrap,
            lines: Vec::new(),
            buffer: Line::default(),
            style_stack: vec![base],
            prefixes: Vec::new(),
            lists: Vec::new(),
            code: None,
            link_text_from: 0,
            link_dest: None,
        }
    }

    fn style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, overlay: Style) {
        let merged = self.style().overlay(&overlay);
        self.style_stack.push(merged);
    }

    fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    /// Separates blocks with one empty line.
    fn start_block(&mut self) {
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn prefix_width(&self) -> usize {
        self.prefixes
            .iter()
            .map(|p| UnicodeWidthStr::width(p.text.as_str()))
            .sum()
    }

    fn prefix_line(&self, continuation: bool) -> Line {
        let mut line = Line::default();
        for prefix in &self.prefixes {
            if prefix.once && (prefix.used || continuation) {
                let width = UnicodeWidthStr::width(prefix.text.as_str());
                line.push(Span::plain(" ".repeat(width)));
            } else {
                line.push(Span::new(prefix.text.clone(), prefix.style));
            }
        }
        line
    }

    /// Wraps and emits the buffered inline spans.
    fn flush(&mut self, justify: Justify) {
        if self.buffer.spans.is_empty() {
            return;
        }
        let buffer = std::mem::take(&mut self.buffer);
        let avail = self.width.saturating_sub(self.prefix_width()).max(4);
        let wrapped = if self.no_wrap {
            vec![buffer]
        } else {
            wrap_spans(&buffer.spans, avail)
        };
        for (i, row) in wrapped.into_iter().enumerate() {
            let mut line = self.prefix_line(i > 0);
            let row = justify_line(row, avail, justify);
            for span in row.spans {
                line.push(span);
            }
            self.lines.push(line);
        }
        for prefix in &mut self.prefixes {
            if prefix.once {
                prefix.used = true;
            }
        }
    }

    fn push_raw_block(&mut self, text: &str, indent: &str, style: Style) {
        for raw in text.lines() {
            let mut line = self.prefix_line(false);
            line.push(Span::new(format!("{indent}{raw}"), style));
            self.lines.push(line);
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.handle_start(tag),
            Event::End(end) => self.handle_end(end),
            Event::Text(text) => {
                if let Some(code) = &mut self.code {
                    code.push_str(&text);
                } else {
                    let style = self.style();
                    self.buffer.push(Span::new(text.into_string(), style));
                }
            }
            Event::Code(text) => {
                let style = self.style().with_bg(CODE_BG);
                self.buffer.push(Span::new(text.into_string(), style));
            }
            Event::SoftBreak => {
                let style = self.style();
                self.buffer.push(Span::new(" ", style));
            }
            Event::HardBreak => {
                let justify = self.justify;
                self.flush(justify);
            }
            Event::Rule => {
                self.start_block();
                let avail = self.width.saturating_sub(self.prefix_width()).max(4);
                let mut line = self.prefix_line(false);
                line.push(Span::plain("─".repeat(avail)));
                self.lines.push(line);
            }
            Event::TaskListMarker(checked) => {
                let style = self.style();
                let marker = if checked { "☑ " } else { "☐ " };
                self.buffer.push(Span::new(marker, style));
            }
            _ => {}
        }
    }

    fn handle_start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.start_block(),
            Tag::Heading { level, .. } => {
                self.start_block();
                let overlay = match level as usize {
                    1 => Style {
                        bold: true,
                        ..Style::default()
                    },
                    2 => Style {
                        bold: true,
                        underline: true,
                        ..Style::default()
                    },
                    3 => Style {
                        bold: true,
                        italic: true,
                        ..Style::default()
                    },
                    _ => Style {
                        bold: true,
                        ..Style::default()
                    },
                };
                self.push_style(overlay);
            }
            Tag::BlockQuote { .. } => {
                self.start_block();
                self.prefixes.push(Prefix::bar());
            }
            Tag::CodeBlock(_) => {
                self.start_block();
                self.code = Some(String::new());
            }
            Tag::List(start) => {
                let justify = self.justify;
                self.flush(justify);
                if self.lists.is_empty() {
                    self.start_block();
                } else {
                    self.prefixes.push(Prefix::indent());
                }
                self.lists.push(ListState { next_index: start });
            }
            Tag::Item => {
                let marker = match self.lists.last_mut().map(|s| &mut s.next_index) {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.prefixes.push(Prefix::marker(marker));
            }
            Tag::Emphasis => self.push_style(Style {
                italic: true,
                ..Style::default()
            }),
            Tag::Strong => self.push_style(Style {
                bold: true,
                ..Style::default()
            }),
            Tag::Strikethrough => self.push_style(Style {
                strikethrough: true,
                ..Style::default()
            }),
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.push_style(Style {
                    underline: true,
                    ..Style::default()
                });
                self.link_text_from = self.buffer.plain_text().len();
                self.link_dest = Some(dest_url.into_string());
            }
            _ => {}
        }
    }

    fn handle_end(&mut self, end: TagEnd) {
        match end {
            TagEnd::Paragraph => {
                let justify = self.justify;
                self.flush(justify);
            }
            TagEnd::Heading(level) => {
                let justify = if level as usize == 1 {
                    Justify::Center
                } else {
                    self.justify
                };
                self.flush(justify);
                self.pop_style();
            }
            TagEnd::BlockQuote { .. } => {
                let justify = self.justify;
                self.flush(justify);
                self.prefixes.pop();
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    let style = Style {
                        bg: Some(CODE_BG),
                        ..Style::default()
                    };
                    self.push_raw_block(&code, "    ", style);
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if !self.lists.is_empty() {
                    self.prefixes.pop();
                }
            }
            TagEnd::Item => {
                let justify = self.justify;
                self.flush(justify);
                self.prefixes.pop();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link | TagEnd::Image => {
                self.pop_style();
                if let Some(dest) = self.link_dest.take() {
                    // The offset is stale if the buffer was flushed
                    // mid-link (hard break inside the link text).
                    let text = self.buffer.plain_text();
                    let text_since = text.get(self.link_text_from..).unwrap_or_default();
                    if !dest.is_empty() && text_since != dest {
                        let style = Style {
                            dim: true,
                            ..Style::default()
                        };
                        self.buffer.push(Span::new(format!(" ({dest})"), style));
                    }
                }
            }
            _ => {}
        }
    }
}

/// Parses and lays out markdown into styled, uncolored lines.
fn layout(source: &str, width: usize, base: Style, justify: Justify, no_wrap: bool) -> Vec<Line> {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut builder = DocBuilder::new(width, base, justify, no_wrap);
    for event in Parser::new_ext(source, options) {
        builder.handle(event);
    }
    builder.flush(justify);
    builder.lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> Vec<Line> {
        layout(source, 40, Style::default(), Justify::Left, false)
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::plain_text).collect()
    }

    #[test]
    fn test_h1_is_bold_and_centered() {
        let lines = render("# Hello");
        assert_eq!(lines.len(), 1);
        let text = lines[0].plain_text();
        assert!(text.trim_start().starts_with("Hello"));
        assert!(text.starts_with(' '));
        assert!(lines[0].spans.iter().any(|s| s.style.bold));
    }

    #[test]
    fn test_h2_is_underlined() {
        let lines = render("## Section");
        assert!(
            lines[0]
                .spans
                .iter()
                .any(|s| s.style.underline && s.style.bold)
        );
    }

    #[test]
    fn test_blocks_are_separated_by_blank_lines() {
        let lines = render("# Title\n\nbody text");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].spans.is_empty());
        assert_eq!(lines[2].plain_text(), "body text");
    }

    #[test]
    fn test_paragraphs_wrap_at_the_width() {
        let lines = layout(
            "one two three four five six seven",
            12,
            Style::default(),
            Justify::Left,
            false,
        );
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width() <= 12));
    }

    #[test]
    fn test_no_wrap_keeps_long_paragraphs_whole() {
        let lines = layout(
            "one two three four five six seven",
            12,
            Style::default(),
            Justify::Left,
            true,
        );
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_bullet_list_markers() {
        let lines = render("- first\n- second");
        assert_eq!(texts(&lines), vec!["• first", "• second"]);
    }

    #[test]
    fn test_ordered_list_counts_up() {
        let lines = render("1. one\n2. two");
        assert_eq!(texts(&lines), vec!["1. one", "2. two"]);
    }

    #[test]
    fn test_wrapped_list_item_indents_continuations() {
        let lines = layout(
            "- a rather wordy item that wraps",
            14,
            Style::default(),
            Justify::Left,
            false,
        );
        assert!(lines.len() > 1);
        assert!(lines[0].plain_text().starts_with("• "));
        assert!(lines[1].plain_text().starts_with("  "));
        assert!(!lines[1].plain_text().starts_with("• "));
    }

    #[test]
    fn test_task_list_markers() {
        let lines = render("- [x] done\n- [ ] open");
        let all = texts(&lines).join("\n");
        assert!(all.contains('☑'));
        assert!(all.contains('☐'));
    }

    #[test]
    fn test_block_quote_gets_a_bar_prefix() {
        let lines = render("> quoted words");
        assert!(lines[0].plain_text().starts_with("│ "));
    }

    #[test]
    fn test_inline_code_keeps_its_background() {
        let lines = render("some `code` here");
        let code_span = lines[0]
            .spans
            .iter()
            .find(|s| s.text.contains("code"))
            .unwrap();
        assert_eq!(code_span.style.bg, Some(CODE_BG));
    }

    #[test]
    fn test_fenced_code_block_is_verbatim_and_indented() {
        let lines = render("```\nlet x = 1;\n```");
        assert_eq!(lines[0].plain_text(), "    let x = 1;");
    }

    #[test]
    fn test_thematic_break_becomes_a_rule_line() {
        let lines = render("above\n\n---\n\nbelow");
        let all = texts(&lines);
        assert!(all.iter().any(|l| l.starts_with("──")));
    }

    #[test]
    fn test_link_appends_destination() {
        let lines = render("[docs](https://example.com)");
        let text = lines[0].plain_text();
        assert!(text.contains("docs"));
        assert!(text.contains("(https://example.com)"));
    }

    #[test]
    fn test_autolink_does_not_repeat_itself() {
        let lines = render("<https://example.com>");
        let text = lines[0].plain_text();
        assert_eq!(text.matches("https://example.com").count(), 1);
    }

    #[test]
    fn test_gradient_markdown_colors_nonempty_lines() {
        let md = GradientMarkdown::new(MarkdownRequest {
            source: "# Top\n\nbody".to_string(),
            gradient: GradientSpec {
                colors: vec![Srgb::new(255, 0, 0), Srgb::new(0, 0, 255)],
                ..GradientSpec::default()
            },
            style: Style::default(),
            justify: Justify::Left,
            vertical_align: VerticalAlign::Top,
            no_wrap: false,
        });
        let lines = md.lines(30);
        let body = lines.last().unwrap();
        assert!(body.spans.iter().all(|s| s.style.fg.is_some()));
    }
}
