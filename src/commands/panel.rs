#![forbid(unsafe_code)]

//! The `panel` command: content framed by a gradient border.

use crate::cli::PanelArgs;
use crate::cli::help;
use crate::commands::options;
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::render::animation::{self, AnimationOptions};
use crate::render::svg;
use crate::render::{GradientPanel, PanelRequest, VerticalAlign};

pub fn run(args: &PanelArgs, console: &Console) -> CliResult<()> {
    if args.help {
        help::print_command(console, "panel")?;
        return Ok(());
    }
    if args.animate && args.svg.is_some() {
        return Err(CliError::usage("--svg is not supported with --animate."));
    }
    let content = options::resolve_content(args.text.as_deref(), "text")?;
    let panel = GradientPanel::new(request(args, content)?);
    if let Some(path) = &args.svg {
        return svg::export(&panel, path, &args.end);
    }
    if args.animate && console.stdout_tty {
        animation::run(
            console,
            &panel,
            &AnimationOptions {
                duration: args.duration,
                clear_screen: false,
                vertical_align: VerticalAlign::Top,
            },
        )?;
        return Ok(());
    }
    console.print(&panel, &args.end)?;
    Ok(())
}

fn request(args: &PanelArgs, content: String) -> CliResult<PanelRequest> {
    Ok(PanelRequest {
        content,
        gradient: options::gradient_spec(
            args.colors.as_deref(),
            args.bgcolors.as_deref(),
            args.rainbow,
            args.hues,
        )?,
        title: args.title.clone(),
        title_style: options::parse_style(Some(&args.title_style))?,
        title_align: args.title_align,
        subtitle: args.subtitle.clone(),
        subtitle_style: options::parse_style(args.subtitle_style.as_deref())?,
        subtitle_align: args.subtitle_align,
        style: options::parse_style(args.style.as_deref())?,
        border_style: options::parse_style(args.border_style.as_deref())?,
        padding: options::parse_padding(&args.padding)?,
        text_justify: args.text_justify,
        vertical_align: args.vertical_justify,
        justify: args.justify,
        expand: args.expands(),
        width: args.width,
        height: args.height,
        box_kind: args.box_kind,
    })
}

#[cfg(test)]
fn request_from_argv(argv: &[&str]) -> CliResult<PanelRequest> {
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    let cli = Cli::try_parse_from(argv)?;
    match cli.command {
        Commands::Panel(args) => {
            let content = args.text.clone().unwrap_or_default();
            request(&args, content)
        }
        _ => unreachable!("argv selects panel"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BoxKind, Justify, Padding};

    #[test]
    fn test_request_translates_the_full_surface() {
        let request = request_from_argv(&[
            "gradient",
            "panel",
            "body",
            "-t",
            "Title",
            "--title-align",
            "left",
            "-s",
            "sub",
            "-p",
            "1,2",
            "--box",
            "DOUBLE",
            "--no-expand",
            "--width",
            "30",
        ])
        .unwrap();
        assert_eq!(request.content, "body");
        assert_eq!(request.title.as_deref(), Some("Title"));
        assert!(request.title_style.bold);
        assert_eq!(request.title_align, Justify::Left);
        assert_eq!(request.subtitle.as_deref(), Some("sub"));
        assert_eq!(request.padding, Padding::symmetric(1, 2));
        assert_eq!(request.box_kind, BoxKind::Double);
        assert!(!request.expand);
        assert_eq!(request.width, Some(30));
    }

    #[test]
    fn test_default_padding_is_one_column() {
        let request = request_from_argv(&["gradient", "panel", "body"]).unwrap();
        assert_eq!(request.padding, Padding::symmetric(0, 1));
        assert!(request.expand);
        assert!(request.subtitle_style.is_plain());
    }

    #[test]
    fn test_bad_padding_is_a_usage_error() {
        let err = request_from_argv(&["gradient", "panel", "body", "-p", "1,2,3"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
