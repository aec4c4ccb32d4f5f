#![forbid(unsafe_code)]

//! The `markdown` command: markdown laid out for the terminal.

use crate::cli::MarkdownArgs;
use crate::cli::help;
use crate::commands::options;
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::render::animation::{self, AnimationOptions};
use crate::render::svg;
use crate::render::{GradientMarkdown, MarkdownRequest};

pub fn run(args: &MarkdownArgs, console: &Console) -> CliResult<()> {
    if args.help {
        help::print_command(console, "markdown")?;
        return Ok(());
    }
    if args.animate && args.svg.is_some() {
        return Err(CliError::usage("--svg is not supported with --animate."));
    }
    let source = options::resolve_content(args.markdown.as_deref(), "markdown")?;
    let markdown = GradientMarkdown::new(request(args, source)?);
    if let Some(path) = &args.svg {
        return svg::export(&markdown, path, &args.end);
    }
    if args.animate && console.stdout_tty {
        // Markdown animates full-screen, honoring the vertical placement.
        animation::run(
            console,
            &markdown,
            &AnimationOptions {
                duration: args.duration,
                clear_screen: true,
                vertical_align: markdown.vertical_align(),
            },
        )?;
        return Ok(());
    }
    console.print(&markdown, &args.end)?;
    Ok(())
}

fn request(args: &MarkdownArgs, source: String) -> CliResult<MarkdownRequest> {
    Ok(MarkdownRequest {
        source,
        gradient: options::gradient_spec(
            args.colors.as_deref(),
            args.bgcolors.as_deref(),
            args.rainbow,
            args.hues,
        )?,
        style: options::parse_style(args.style.as_deref())?,
        justify: args.justify,
        vertical_align: args.vertical_justify,
        no_wrap: args.no_wrap,
    })
}

#[cfg(test)]
fn request_from_argv(argv: &[&str]) -> CliResult<MarkdownRequest> {
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    let cli = Cli::try_parse_from(argv)?;
    match cli.command {
        Commands::Markdown(args) => {
            let source = args.markdown.clone().unwrap_or_default();
            request(&args, source)
        }
        _ => unreachable!("argv selects markdown"),
    }
}
