#![forbid(unsafe_code)]

//! The render layer: styled lines, gradients, and the renderables built
//! from them.
//!
//! Command handlers construct a request struct (`TextRequest`,
//! `PanelRequest`, ...) and hand the resulting renderable to the console,
//! the SVG exporter, or the animation loop. Everything renders to the same
//! intermediate form: a list of [`Line`]s holding styled [`Span`]s.
//!
//! The heavy lifting is delegated: color math to `palette`, ANSI escapes
//! to `owo-colors`, markdown parsing to `pulldown-cmark`, and terminal
//! control to `crossterm`.

pub mod animation;
pub mod gradient;
pub mod markdown;
pub mod panel;
pub mod rule;
pub mod style;
pub mod svg;
pub mod text;

use clap::ValueEnum;
use unicode_width::UnicodeWidthStr;

pub use gradient::{Gradient, GradientSpec, colorize_line};
pub use markdown::{GradientMarkdown, MarkdownRequest};
pub use panel::{BoxKind, GradientPanel, Padding, PanelRequest};
pub use rule::{GradientRule, RuleRequest};
pub use style::Style;
pub use text::{GradientText, TextRequest};

/// Horizontal alignment for text and embedded titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of content inside a fixed-height area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// What to do with lines that exceed the width once wrapping is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Overflow {
    Crop,
    #[default]
    Fold,
    Ellipsis,
}

/// A styled run of text. Spans never contain newlines.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Span {
            text: text.into(),
            style,
        }
    }

    /// A span with the default (empty) style.
    pub fn plain(text: impl Into<String>) -> Self {
        Span::new(text, Style::default())
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

/// One rendered terminal line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// A line holding a single plain span.
    pub fn from_plain(text: impl Into<String>) -> Self {
        let mut line = Line::default();
        line.push(Span::plain(text));
        line
    }

    /// Appends a span, merging it into the previous one when the styles
    /// match.
    pub fn push(&mut self, span: Span) {
        if span.text.is_empty() {
            return;
        }
        if let Some(last) = self.spans.last_mut() {
            if last.style == span.style {
                last.text.push_str(&span.text);
                return;
            }
        }
        self.spans.push(span);
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// The line's text with all styling dropped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Anything that can be rendered to styled lines at a target width.
///
/// `lines_at` is the phase-aware entry point the animation loop drives;
/// static rendering is the zero-phase case.
pub trait Renderable {
    /// Renders at the given width with a gradient phase in `0.0..1.0`.
    fn lines_at(&self, width: usize, phase: f32) -> Vec<Line>;

    /// Renders the static (zero-phase) frame.
    fn lines(&self, width: usize) -> Vec<Line> {
        self.lines_at(width, 0.0)
    }
}
