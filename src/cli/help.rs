#![forbid(unsafe_code)]

//! Styled help rendering.
//!
//! clap's generated help is disabled; this walks the live command model
//! and renders the layout the CLI always had: a gradient header, a colored
//! usage line, square-boxed Arguments/Options/Commands tables, and a
//! rainbow footer. Everything is introspected from clap, so new options
//! show up here without touching this module.

use std::io::{self, Write};

use clap::{Arg, ArgAction, Command, CommandFactory};
use palette::Srgb;
use unicode_width::UnicodeWidthStr;

use crate::cli::args::Cli;
use crate::console::Console;
use crate::render::gradient::colorize_line;
use crate::render::panel::BoxKind;
use crate::render::text::{justify_line, truncate_line, wrap_spans};
use crate::render::{Gradient, Justify, Line, Span, Style};

const BORDER: Srgb<u8> = Srgb::new(0x2a, 0x4f, 0xff);
const OPTION_NAME: Srgb<u8> = Srgb::new(0xff, 0xff, 0x00);
const METAVAR: Srgb<u8> = Srgb::new(0x99, 0xff, 0x00);
const PROG: Srgb<u8> = Srgb::new(0xaf, 0x00, 0xff);
const SUBCOMMAND: Srgb<u8> = Srgb::new(0x00, 0x99, 0xff);
const USAGE: Srgb<u8> = Srgb::new(0x00, 0xff, 0x00);
const WHITE: Srgb<u8> = Srgb::new(0xff, 0xff, 0xff);

/// Stops for the header gradient, orange through lime.
const HEADER_STOPS: [Srgb<u8>; 4] = [
    Srgb::new(0xff, 0x55, 0x00),
    Srgb::new(0xff, 0xa6, 0x00),
    Srgb::new(0xf9, 0xff, 0x00),
    Srgb::new(0xa9, 0xff, 0x00),
];

/// Renders and prints the top-level help.
pub fn print_top_level(console: &Console) -> io::Result<()> {
    write_help(&render(console, None))
}

/// Renders and prints the help of one subcommand.
pub fn print_command(console: &Console, name: &str) -> io::Result<()> {
    write_help(&render(console, Some(name)))
}

fn write_help(text: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Renders the help screen to a string. `command` selects a subcommand;
/// `None` is the top level.
pub fn render(console: &Console, command: Option<&str>) -> String {
    // Introspection (num_args, defaults) is only populated once the
    // command model is built.
    let mut root = Cli::command();
    root.build();
    let (cmd, path): (&Command, Vec<&str>) = match command {
        Some(name) => match root.find_subcommand(name) {
            Some(sub) => (sub, vec!["gradient", name]),
            None => (&root, vec!["gradient"]),
        },
        None => (&root, vec!["gradient"]),
    };
    let top_level = path.len() == 1;
    let width = console.width.clamp(40, 100);

    let mut lines = Vec::new();
    lines.push(header_line());
    lines.push(Line::default());
    lines.push(usage_line(cmd, &path));
    if let Some(about) = cmd.get_about() {
        lines.push(Line::default());
        lines.push(about_line(&about.to_string()));
    }
    lines.push(Line::default());

    let arguments = argument_rows(cmd);
    if !arguments.is_empty() {
        lines.extend(boxed("Arguments", arguments, width));
    }
    lines.extend(boxed("Options", option_rows(cmd, top_level), width));
    if top_level {
        lines.extend(boxed("Commands", command_rows(&root), width));
    }

    lines.push(Line::default());
    lines.push(footer_line(width));

    // Nothing may spill past the console, whatever the terminal width.
    let cap = console.width.max(20);
    let lines: Vec<Line> = lines.iter().map(|l| truncate_line(l, cap, false)).collect();
    console.force_color().lines_to_string(&lines, "\n")
}

fn bold(color: Srgb<u8>) -> Style {
    Style {
        bold: true,
        ..Style::fg(color)
    }
}

fn header_line() -> Line {
    let mut name = Line::default();
    name.push(Span::new(
        "gradient",
        Style {
            bold: true,
            ..Style::default()
        },
    ));
    let mut line = colorize_line(&name, Some(&Gradient::new(&HEADER_STOPS)), None, 0.0);
    line.push(Span::new(" CLI", bold(WHITE)));
    line
}

fn about_line(about: &str) -> Line {
    let mut line = Line::default();
    line.push(Span::new(about, Style::fg(WHITE)));
    line
}

fn usage_line(cmd: &Command, path: &[&str]) -> Line {
    let mut line = Line::default();
    line.push(Span::new("Usage:", bold(USAGE)));
    line.push(Span::plain(" "));
    line.push(Span::new(path[0], bold(PROG)));
    for part in &path[1..] {
        line.push(Span::plain(" "));
        line.push(Span::new(*part, bold(SUBCOMMAND)));
    }
    line.push(Span::new(" [OPTIONS]", Style::fg(WHITE)));
    if cmd.has_subcommands() {
        line.push(Span::new(" COMMAND [ARGS]...", Style::fg(WHITE)));
    }
    for arg in cmd.get_positionals() {
        let token = positional_token(arg);
        line.push(Span::new(format!(" {token}"), Style::fg(WHITE)));
    }
    line
}

fn positional_token(arg: &Arg) -> String {
    let metavar = metavar_of(arg);
    let mut token = if arg.is_required_set() {
        metavar
    } else {
        format!("[{metavar}]")
    };
    if matches!(arg.get_action(), ArgAction::Append) {
        token.push_str("...");
    }
    token
}

fn metavar_of(arg: &Arg) -> String {
    arg.get_value_names()
        .and_then(|names| names.first())
        .map(|n| n.to_string())
        .unwrap_or_else(|| arg.get_id().to_string().to_uppercase())
}

/// One table row: a name cell, a metavar cell, and wrappable help text.
struct HelpRow {
    name: Line,
    metavar: Line,
    help: String,
}

fn argument_rows(cmd: &Command) -> Vec<HelpRow> {
    cmd.get_positionals()
        .filter(|arg| !arg.is_hide_set())
        .map(|arg| {
            let mut name = Line::default();
            name.push(Span::new(arg.get_id().to_string(), bold(OPTION_NAME)));
            let mut metavar = Line::default();
            metavar.push(Span::new(positional_token(arg), bold(METAVAR)));
            HelpRow {
                name,
                metavar,
                help: help_text(arg),
            }
        })
        .collect()
}

fn option_rows(cmd: &Command, top_level: bool) -> Vec<HelpRow> {
    let mut rows: Vec<HelpRow> = cmd
        .get_arguments()
        .filter(|arg| !arg.is_positional() && !arg.is_hide_set())
        .map(|arg| {
            let mut name = Line::default();
            let rendered = match (arg.get_short(), arg.get_long()) {
                (Some(short), Some(long)) => format!("-{short}, --{long}"),
                (Some(short), None) => format!("-{short}"),
                (None, Some(long)) => format!("    --{long}"),
                (None, None) => arg.get_id().to_string(),
            };
            name.push(Span::new(rendered, bold(OPTION_NAME)));
            let mut metavar = Line::default();
            if takes_value(arg) {
                metavar.push(Span::new(metavar_of(arg), bold(METAVAR)));
            }
            HelpRow {
                name,
                metavar,
                help: help_text(arg),
            }
        })
        .collect();
    if top_level {
        // The router owns these switches; they exist on no clap command.
        rows.push(synthetic_row("-h, --help", "Show this message and exit."));
        rows.push(synthetic_row("    --version", "Show the version and exit."));
    }
    rows
}

fn synthetic_row(name: &str, help: &str) -> HelpRow {
    let mut line = Line::default();
    line.push(Span::new(name, bold(OPTION_NAME)));
    HelpRow {
        name: line,
        metavar: Line::default(),
        help: help.to_string(),
    }
}

fn command_rows(root: &Command) -> Vec<HelpRow> {
    root.get_subcommands()
        .map(|sub| {
            let mut name = Line::default();
            name.push(Span::new(sub.get_name(), bold(SUBCOMMAND)));
            let help = sub
                .get_about()
                .map(|about| about.to_string())
                .unwrap_or_default();
            HelpRow {
                name,
                metavar: Line::default(),
                help,
            }
        })
        .collect()
}

fn takes_value(arg: &Arg) -> bool {
    arg.get_num_args().is_some_and(|range| range.takes_values())
}

fn help_text(arg: &Arg) -> String {
    let mut help = arg
        .get_help()
        .map(|h| h.to_string())
        .unwrap_or_default();
    if takes_value(arg) {
        let defaults = arg.get_default_values();
        if let Some(default) = defaults.first() {
            let shown: String = default
                .to_string_lossy()
                .chars()
                .flat_map(|c| c.escape_default())
                .collect();
            if !shown.is_empty() {
                if !help.is_empty() {
                    help.push(' ');
                }
                help.push_str(&format!("[default: {shown}]"));
            }
        }
    }
    help
}

/// Lays rows out in aligned columns inside a square box with a left-hung
/// title.
fn boxed(title: &str, rows: Vec<HelpRow>, width: usize) -> Vec<Line> {
    let chars = BoxKind::Square.chars();
    let border_style = Style::fg(BORDER);
    let pad = 2usize;
    let inner = width.saturating_sub(2 + 2 * pad).max(10);

    let name_width = rows.iter().map(|r| r.name.width()).max().unwrap_or(0);
    let metavar_width = rows.iter().map(|r| r.metavar.width()).max().unwrap_or(0);
    let gap = 2usize;
    let metavar_slot = if metavar_width > 0 {
        metavar_width + gap
    } else {
        0
    };
    // When the columns leave no room for help text, stack the help under
    // the names instead of squeezing it.
    let stacked = name_width + gap + metavar_slot + 10 > inner;
    let help_width = if stacked {
        inner.saturating_sub(4).max(10)
    } else {
        inner - name_width - gap - metavar_slot
    };

    let mut body = Vec::new();
    for row in &rows {
        if stacked {
            let mut head = Line::default();
            for span in &row.name.spans {
                head.push(span.clone());
            }
            if row.metavar.width() > 0 {
                head.push(Span::plain(" ".repeat(gap)));
                for span in &row.metavar.spans {
                    head.push(span.clone());
                }
            }
            body.push(truncate_line(&head, inner, false));
            for help_line in
                wrap_spans(&[Span::new(row.help.clone(), Style::fg(WHITE))], help_width)
            {
                let mut line = Line::default();
                line.push(Span::plain("    "));
                for span in help_line.spans {
                    line.push(span);
                }
                body.push(line);
            }
            continue;
        }
        let help_lines = wrap_spans(&[Span::new(row.help.clone(), Style::fg(WHITE))], help_width);
        for (i, help_line) in help_lines.into_iter().enumerate() {
            let mut line = Line::default();
            if i == 0 {
                let name_fill = name_width - row.name.width();
                for span in &row.name.spans {
                    line.push(span.clone());
                }
                line.push(Span::plain(" ".repeat(name_fill + gap)));
                if metavar_slot > 0 {
                    let metavar_fill = metavar_width - row.metavar.width();
                    for span in &row.metavar.spans {
                        line.push(span.clone());
                    }
                    line.push(Span::plain(" ".repeat(metavar_fill + gap)));
                }
            } else {
                line.push(Span::plain(" ".repeat(name_width + gap + metavar_slot)));
            }
            for span in help_line.spans {
                line.push(span);
            }
            body.push(line);
        }
    }

    let mut out = Vec::new();
    let top_inner = width.saturating_sub(2);
    let title_width = UnicodeWidthStr::width(title);
    let mut top = Line::default();
    top.push(Span::new(chars.top_left.to_string(), border_style));
    top.push(Span::new(chars.top.to_string(), border_style));
    top.push(Span::new(format!(" {title} "), bold(WHITE)));
    let used = 1 + title_width + 2;
    top.push(Span::new(
        chars.top.to_string().repeat(top_inner.saturating_sub(used)),
        border_style,
    ));
    top.push(Span::new(chars.top_right.to_string(), border_style));
    out.push(top);

    for row in body {
        let mut line = Line::default();
        line.push(Span::new(chars.side.to_string(), border_style));
        line.push(Span::plain(" ".repeat(pad)));
        let fill = inner.saturating_sub(row.width());
        for span in row.spans {
            line.push(span);
        }
        line.push(Span::plain(" ".repeat(fill + pad)));
        line.push(Span::new(chars.side.to_string(), border_style));
        out.push(line);
    }

    let mut bottom = Line::default();
    bottom.push(Span::new(chars.bottom_left.to_string(), border_style));
    bottom.push(Span::new(
        chars.bottom.to_string().repeat(top_inner),
        border_style,
    ));
    bottom.push(Span::new(chars.bottom_right.to_string(), border_style));
    out.push(bottom);
    out
}

fn footer_line(width: usize) -> Line {
    let url = env!("CARGO_PKG_REPOSITORY");
    let mut line = Line::default();
    line.push(Span::plain(url));
    let colored = colorize_line(&line, Some(&Gradient::rainbow(12)), None, 0.0);
    justify_line(colored, width, Justify::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ColorMode;

    fn plain_console() -> Console {
        Console::fixed(80, ColorMode::Never)
    }

    #[test]
    fn test_top_level_help_lists_commands_and_globals() {
        let help = render(&plain_console(), None);
        assert!(help.contains("Usage:"));
        assert!(help.contains("gradient"));
        for name in ["print", "panel", "rule", "markdown"] {
            assert!(help.contains(name), "missing {name}");
        }
        assert!(help.contains("--version"));
        assert!(help.contains("Commands"));
    }

    #[test]
    fn test_command_help_shows_its_options_and_positional() {
        let help = render(&plain_console(), Some("print"));
        assert!(help.contains("[TEXT]..."));
        assert!(help.contains("-c, --colors"));
        assert!(help.contains("--no-wrap"));
        assert!(!help.contains("Commands"));
    }

    #[test]
    fn test_value_options_carry_metavars_and_defaults() {
        let help = render(&plain_console(), Some("print"));
        // Metavar column for value-taking options, nothing for flags.
        assert!(help.contains("HUES"));
        assert!(help.contains("COLORS"));
        assert!(help.contains("[default: 7]"));
        let top = render(&plain_console(), None);
        assert!(!top.contains("[default:"));
    }

    #[test]
    fn test_panel_help_documents_the_box_choices() {
        let help = render(&plain_console(), Some("panel"));
        assert!(help.contains("--box"));
        assert!(help.contains("ROUNDED"));
        assert!(help.contains("--border-style"));
    }

    #[test]
    fn test_no_color_console_renders_plain_text() {
        let help = render(&plain_console(), None);
        assert!(!help.contains('\u{1b}'));
    }

    #[test]
    fn test_color_console_renders_escapes_even_for_pipes() {
        // Auto mode without a tty still forces color for help output.
        let help = render(&Console::fixed(80, ColorMode::Auto), None);
        assert!(help.contains('\u{1b}'));
    }

    #[test]
    fn test_help_lines_fit_the_console_width() {
        let console = Console::fixed(44, ColorMode::Never);
        let help = render(&console, Some("panel"));
        for line in help.lines() {
            assert!(
                UnicodeWidthStr::width(line) <= 44,
                "line too wide: {line:?}"
            );
        }
    }

    #[test]
    fn test_unknown_command_falls_back_to_top_level() {
        let help = render(&plain_console(), Some("bogus"));
        assert!(help.contains("Commands"));
    }
}
