#![forbid(unsafe_code)]

//! Per-invocation terminal context.
//!
//! One [`Console`] is built in `main` from the live environment and passed
//! explicitly to every handler, renderer, and exporter; nothing in the
//! crate reaches for a shared global console.

use std::io::{self, IsTerminal, Write};

use crate::render::{Line, Renderable};

/// Width assumed when the terminal size cannot be queried.
const FALLBACK_WIDTH: usize = 80;

/// Color emission policy for stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color only when stdout is an interactive terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// Terminal context for a single invocation.
#[derive(Debug, Clone)]
pub struct Console {
    /// Render width in display cells.
    pub width: usize,
    pub color: ColorMode,
    pub stdout_tty: bool,
    pub stdin_tty: bool,
}

impl Console {
    /// Detects the live terminal environment. `NO_COLOR` (any value)
    /// disables color entirely. Piped stdout gets the `COLUMNS` variable
    /// or the 80-column fallback, never the controlling terminal's size.
    pub fn detect() -> Self {
        let stdout_tty = io::stdout().is_terminal();
        let width = if stdout_tty {
            crossterm::terminal::size()
                .map(|(cols, _)| usize::from(cols))
                .unwrap_or(FALLBACK_WIDTH)
        } else {
            columns_env(std::env::var_os("COLUMNS")).unwrap_or(FALLBACK_WIDTH)
        };
        Console {
            width,
            color: initial_color_mode(std::env::var_os("NO_COLOR").is_some()),
            stdout_tty,
            stdin_tty: io::stdin().is_terminal(),
        }
    }

    /// A console with a fixed width and color policy, for tests and for
    /// rendering that must not depend on the live terminal.
    pub fn fixed(width: usize, color: ColorMode) -> Self {
        Console {
            width,
            color,
            stdout_tty: false,
            stdin_tty: false,
        }
    }

    /// Help output is colored even when piped, the way the original
    /// recorded console behaved; `NO_COLOR` still wins.
    pub fn force_color(&self) -> Self {
        let color = match self.color {
            ColorMode::Never => ColorMode::Never,
            ColorMode::Auto | ColorMode::Always => ColorMode::Always,
        };
        Console {
            color,
            ..self.clone()
        }
    }

    /// Whether ANSI escapes should be emitted on stdout.
    pub fn colors_enabled(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => self.stdout_tty,
        }
    }

    /// Renders to stdout. `end` replaces the final newline; interior lines
    /// are separated by `\n`.
    pub fn print(&self, renderable: &dyn Renderable, end: &str) -> io::Result<()> {
        let lines = renderable.lines(self.width);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_lines(&mut out, &lines, end)?;
        out.flush()
    }

    /// Writes rendered lines to an arbitrary sink.
    pub fn write_lines(
        &self,
        out: &mut impl Write,
        lines: &[Line],
        end: &str,
    ) -> io::Result<()> {
        let colors = self.colors_enabled();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.write_all(b"\n")?;
            }
            for span in &line.spans {
                if colors && !span.style.is_plain() {
                    write!(out, "{}", span.style.paint(&span.text))?;
                } else {
                    out.write_all(span.text.as_bytes())?;
                }
            }
        }
        write!(out, "{end}")
    }

    /// Renders to an in-memory string, mostly for the help renderer and
    /// tests.
    pub fn render_to_string(&self, renderable: &dyn Renderable, end: &str) -> String {
        let lines = renderable.lines(self.width);
        self.lines_to_string(&lines, end)
    }

    /// Serializes already-rendered lines.
    pub fn lines_to_string(&self, lines: &[Line], end: &str) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.write_lines(&mut buf, lines, end);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn initial_color_mode(no_color: bool) -> ColorMode {
    if no_color {
        ColorMode::Never
    } else {
        ColorMode::Auto
    }
}

fn columns_env(raw: Option<std::ffi::OsString>) -> Option<usize> {
    raw?.to_str()?.trim().parse().ok().filter(|cols| *cols > 0)
}
