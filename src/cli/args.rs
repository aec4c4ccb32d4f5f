#![forbid(unsafe_code)]

//! The clap argument surface.
//!
//! Every command owns an enumerated args struct; nothing is forwarded as
//! loose key/value pairs. clap's own help and version machinery is
//! disabled: the router resolves `--help`/`--version` at the top level and
//! each command carries an explicit `--help` flag so `print` can keep `-h`
//! for `--hues`.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::render::{BoxKind, Justify, Overflow, VerticalAlign};

/// Create gradient-colored text, panels, rules, and markdown in the
/// terminal.
#[derive(Debug, Parser)]
#[command(
    name = "gradient",
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print text in gradient color to the console.
    Print(PrintArgs),
    /// Print a gradient panel to the console.
    Panel(PanelArgs),
    /// Print a gradient rule to the console.
    Rule(RuleArgs),
    /// Print gradient markdown to the console.
    Markdown(MarkdownArgs),
}

/// The names clap knows as subcommands, introspected so the router never
/// maintains its own list.
pub fn registered_names() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .map(|c| c.get_name().to_string())
        .collect()
}

#[derive(Debug, Args)]
#[command(disable_help_flag = true)]
pub struct PrintArgs {
    /// Text to print. Joined with spaces when given as multiple words;
    /// read from stdin when omitted or when the sole argument is `-`.
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Comma-separated colors for the gradient (names or hex codes).
    /// Random stops are generated when omitted.
    #[arg(short = 'c', long, value_name = "COLORS")]
    pub colors: Option<String>,

    /// Use rainbow colors for the gradient.
    #[arg(short = 'r', long)]
    pub rainbow: bool,

    /// Number of hues in a random gradient.
    #[arg(short = 'h', long, value_name = "HUES", default_value_t = 7)]
    pub hues: usize,

    /// Style of the text. Only non-color styles survive, since the
    /// gradient overrides colors.
    #[arg(long, value_name = "STYLE")]
    pub style: Option<String>,

    /// Justification of the text. (left, center, right)
    #[arg(
        short = 'j',
        long,
        value_enum,
        value_name = "JUSTIFY",
        default_value_t = Justify::Left,
        ignore_case = true
    )]
    pub justify: Justify,

    /// Overflow handling when wrapping is disabled. (crop, fold, ellipsis)
    #[arg(
        long,
        value_enum,
        value_name = "OVERFLOW",
        default_value_t = Overflow::Fold,
        ignore_case = true
    )]
    pub overflow: Overflow,

    /// Disable wrapping of text.
    #[arg(long)]
    pub no_wrap: bool,

    /// String printed after the text, replacing the final newline.
    #[arg(long, value_name = "END", default_value = "\n")]
    pub end: String,

    /// Comma-separated background colors; the background stays transparent
    /// when omitted.
    #[arg(long, value_name = "BGCOLORS")]
    pub bgcolors: Option<String>,

    /// Save the output as an SVG file at the given path.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Show this message and exit.
    #[arg(long)]
    pub help: bool,
}

#[derive(Debug, Args)]
#[command(disable_help_flag = true)]
pub struct PanelArgs {
    /// Panel content; use `-` to read standard input. Required, but
    /// enforced by the handler so a bare `--help` still parses.
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Title of the panel.
    #[arg(short = 't', long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Style of the panel title text.
    #[arg(long, value_name = "TITLE_STYLE", default_value = "bold")]
    pub title_style: String,

    /// Alignment of the panel title. (left, center, right)
    #[arg(
        long,
        value_enum,
        value_name = "TITLE_ALIGN",
        default_value_t = Justify::Center,
        ignore_case = true
    )]
    pub title_align: Justify,

    /// Subtitle of the panel.
    #[arg(short = 's', long, value_name = "SUBTITLE")]
    pub subtitle: Option<String>,

    /// Style of the panel subtitle text.
    #[arg(long, value_name = "SUBTITLE_STYLE")]
    pub subtitle_style: Option<String>,

    /// Alignment of the panel subtitle. (left, center, right)
    #[arg(
        long,
        value_enum,
        value_name = "SUBTITLE_ALIGN",
        default_value_t = Justify::Right,
        ignore_case = true
    )]
    pub subtitle_align: Justify,

    /// Comma-separated colors for the border gradient.
    #[arg(short = 'c', long, value_name = "COLORS")]
    pub colors: Option<String>,

    /// Comma-separated background colors filling the panel.
    #[arg(long, value_name = "BGCOLORS")]
    pub bgcolors: Option<String>,

    /// Use rainbow colors for the gradient.
    #[arg(short = 'r', long)]
    pub rainbow: bool,

    /// Number of hues in a random gradient.
    #[arg(long, value_name = "HUES", default_value_t = 5)]
    pub hues: usize,

    /// Style of the panel content.
    #[arg(long, value_name = "STYLE")]
    pub style: Option<String>,

    /// Style of the panel border. Only non-color styles survive, since the
    /// gradient overrides colors.
    #[arg(long, value_name = "BORDER_STYLE")]
    pub border_style: Option<String>,

    /// Padding inside the panel: 1, 2, or 4 comma-separated integers.
    #[arg(short = 'p', long, value_name = "PADDING", default_value = "0,1")]
    pub padding: String,

    /// Vertical placement of the content in a fixed-height panel.
    /// (top, middle, bottom)
    #[arg(
        short = 'V',
        long,
        value_enum,
        value_name = "VERTICAL_JUSTIFY",
        default_value_t = VerticalAlign::Top,
        ignore_case = true
    )]
    pub vertical_justify: VerticalAlign,

    /// Justification of the text inside the panel. (left, center, right)
    #[arg(
        short = 'J',
        long,
        value_enum,
        value_name = "TEXT_JUSTIFY",
        default_value_t = Justify::Left,
        ignore_case = true
    )]
    pub text_justify: Justify,

    /// Placement of the panel itself in the console. (left, center, right)
    #[arg(
        short = 'j',
        long,
        value_enum,
        value_name = "JUSTIFY",
        default_value_t = Justify::Left,
        ignore_case = true
    )]
    pub justify: Justify,

    /// Expand the panel to the full console width (the default).
    #[arg(long, overrides_with = "no_expand")]
    pub expand: bool,

    /// Size the panel to its content instead of the console width.
    #[arg(long, overrides_with = "expand")]
    pub no_expand: bool,

    /// Fixed width of the panel; takes effect with --no-expand.
    #[arg(long, value_name = "WIDTH")]
    pub width: Option<usize>,

    /// Fixed height of the panel, borders included.
    #[arg(long, value_name = "HEIGHT")]
    pub height: Option<usize>,

    /// String printed after the panel, replacing the final newline.
    #[arg(long, value_name = "END", default_value = "\n")]
    pub end: String,

    /// Box style of the border. (SQUARE, ROUNDED, HEAVY, DOUBLE, ASCII)
    #[arg(
        long = "box",
        value_enum,
        value_name = "BOX",
        default_value_t = BoxKind::Rounded,
        ignore_case = true
    )]
    pub box_kind: BoxKind,

    /// Animate the panel gradient.
    #[arg(short = 'a', long)]
    pub animate: bool,

    /// Duration of the animation in seconds.
    #[arg(short = 'd', long, value_name = "DURATION", default_value_t = 5.0)]
    pub duration: f64,

    /// Save the output as an SVG file at the given path.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Show this message and exit.
    #[arg(short = 'h', long)]
    pub help: bool,
}

impl PanelArgs {
    /// `--expand` is the default; `--no-expand` turns it off, last flag
    /// wins.
    pub fn expands(&self) -> bool {
        !self.no_expand
    }
}

#[derive(Debug, Args)]
#[command(disable_help_flag = true)]
pub struct RuleArgs {
    /// Title of the rule.
    #[arg(short = 't', long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Style of the rule title text. Only non-color styles survive, since
    /// the gradient overrides colors.
    #[arg(short = 's', long, value_name = "TITLE_STYLE", default_value = "bold")]
    pub title_style: String,

    /// Comma-separated colors for the gradient.
    #[arg(short = 'c', long, value_name = "COLORS")]
    pub colors: Option<String>,

    /// Comma-separated background colors.
    #[arg(long, value_name = "BGCOLORS")]
    pub bgcolors: Option<String>,

    /// Use rainbow colors for the gradient.
    #[arg(short = 'r', long)]
    pub rainbow: bool,

    /// Number of hues in a random gradient.
    #[arg(long, value_name = "HUES", default_value_t = 10)]
    pub hues: usize,

    /// String printed after the rule, replacing the final newline.
    #[arg(long, value_name = "END", default_value = "\n")]
    pub end: String,

    /// Thickness of the rule line, from dashed to full block.
    #[arg(
        short = 'T',
        long,
        value_name = "THICKNESS",
        default_value_t = 2,
        value_parser = clap::value_parser!(u8).range(0..=3)
    )]
    pub thickness: u8,

    /// Alignment of the rule title. (left, center, right)
    #[arg(
        short = 'a',
        long,
        value_enum,
        value_name = "ALIGN",
        default_value_t = Justify::Center,
        ignore_case = true
    )]
    pub align: Justify,

    /// Save the output as an SVG file at the given path.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Show this message and exit.
    #[arg(short = 'h', long)]
    pub help: bool,
}

#[derive(Debug, Args)]
#[command(disable_help_flag = true)]
pub struct MarkdownArgs {
    /// Markdown content; use `-` to read standard input. Required, but
    /// enforced by the handler so a bare `--help` still parses.
    #[arg(value_name = "MARKDOWN")]
    pub markdown: Option<String>,

    /// Comma-separated colors for the gradient.
    #[arg(short = 'c', long, value_name = "COLORS")]
    pub colors: Option<String>,

    /// Comma-separated background colors.
    #[arg(long, value_name = "BGCOLORS")]
    pub bgcolors: Option<String>,

    /// Use rainbow colors for the gradient.
    #[arg(short = 'r', long)]
    pub rainbow: bool,

    /// Number of hues in a random gradient.
    #[arg(long, value_name = "HUES", default_value_t = 7)]
    pub hues: usize,

    /// Style of the markdown body text.
    #[arg(long, value_name = "STYLE")]
    pub style: Option<String>,

    /// Justification of the markdown text. (left, center, right)
    #[arg(
        short = 'j',
        long,
        value_enum,
        value_name = "JUSTIFY",
        default_value_t = Justify::Left,
        ignore_case = true
    )]
    pub justify: Justify,

    /// Vertical placement during full-screen animation. (top, middle,
    /// bottom)
    #[arg(
        long,
        value_enum,
        value_name = "VERTICAL_JUSTIFY",
        default_value_t = VerticalAlign::Top,
        ignore_case = true
    )]
    pub vertical_justify: VerticalAlign,

    /// Disable wrapping of markdown text.
    #[arg(long)]
    pub no_wrap: bool,

    /// String printed after the markdown, replacing the final newline.
    #[arg(long, value_name = "END", default_value = "\n")]
    pub end: String,

    /// Animate the markdown gradient in the terminal.
    #[arg(long)]
    pub animate: bool,

    /// Duration of the animation in seconds.
    #[arg(short = 'd', long, value_name = "DURATION", default_value_t = 5.0)]
    pub duration: f64,

    /// Save the output as an SVG file at the given path.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Show this message and exit.
    #[arg(short = 'h', long)]
    pub help: bool,
}
