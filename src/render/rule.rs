#![forbid(unsafe_code)]

//! Gradient horizontal rules.

use super::gradient::colorize_line;
use super::style::Style;
use super::text::truncate_line;
use super::{Gradient, GradientSpec, Justify, Line, Renderable, Span};

/// Fill glyphs by thickness step: dashed, light, heavy, full block.
const THICKNESS_GLYPHS: [char; 4] = ['╌', '─', '━', '█'];

/// Options for the `rule` command's renderable.
#[derive(Debug, Clone)]
pub struct RuleRequest {
    pub title: Option<String>,
    pub title_style: Style,
    pub gradient: GradientSpec,
    pub thickness: u8,
    pub align: Justify,
}

/// A full-width rule with the gradient swept across it, title included.
pub struct GradientRule {
    request: RuleRequest,
    fg: Gradient,
    bg: Option<Gradient>,
}

impl GradientRule {
    pub fn new(request: RuleRequest) -> Self {
        let fg = request.gradient.foreground();
        let bg = request.gradient.background();
        GradientRule { request, fg, bg }
    }

    fn glyph(&self) -> char {
        let idx = usize::from(self.request.thickness).min(THICKNESS_GLYPHS.len() - 1);
        THICKNESS_GLYPHS[idx]
    }
}

impl Renderable for GradientRule {
    fn lines_at(&self, width: usize, phase: f32) -> Vec<Line> {
        let width = width.max(4);
        let glyph = self.glyph();
        let mut line = Line::default();
        match self.request.title.as_deref().filter(|t| !t.is_empty()) {
            None => {
                line.push(Span::plain(glyph.to_string().repeat(width)));
            }
            Some(title) => {
                let mut title_line = Line::default();
                title_line.push(Span::new(title, self.request.title_style));
                let title_line = truncate_line(&title_line, width - 4, true);
                let title_width = title_line.width();
                let fills = width - title_width - 2;
                match self.request.align {
                    Justify::Left => {
                        for span in title_line.spans {
                            line.push(span);
                        }
                        line.push(Span::plain(" "));
                        line.push(Span::plain(glyph.to_string().repeat(fills + 1)));
                    }
                    Justify::Right => {
                        line.push(Span::plain(glyph.to_string().repeat(fills + 1)));
                        line.push(Span::plain(" "));
                        for span in title_line.spans {
                            line.push(span);
                        }
                    }
                    Justify::Center => {
                        let left = fills / 2;
                        line.push(Span::plain(glyph.to_string().repeat(left)));
                        line.push(Span::plain(" "));
                        for span in title_line.spans {
                            line.push(span);
                        }
                        line.push(Span::plain(" "));
                        line.push(Span::plain(glyph.to_string().repeat(fills - left)));
                    }
                }
            }
        }
        vec![colorize_line(&line, Some(&self.fg), self.bg.as_ref(), phase)]
    }
}
