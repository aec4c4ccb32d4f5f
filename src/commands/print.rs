#![forbid(unsafe_code)]

//! The `print` command: gradient-colored text.

use crate::cli::PrintArgs;
use crate::cli::help;
use crate::commands::options;
use crate::console::Console;
use crate::error::CliResult;
use crate::render::svg;
use crate::render::{GradientText, TextRequest};

pub fn run(args: &PrintArgs, console: &Console) -> CliResult<()> {
    if args.help {
        help::print_command(console, "print")?;
        return Ok(());
    }
    let content = options::resolve_words(&args.text, console.stdin_tty)?;
    let text = GradientText::new(request(args, content)?);
    if let Some(path) = &args.svg {
        return svg::export(&text, path, &args.end);
    }
    console.print(&text, &args.end)?;
    Ok(())
}

fn request(args: &PrintArgs, content: String) -> CliResult<TextRequest> {
    Ok(TextRequest {
        content,
        gradient: options::gradient_spec(
            args.colors.as_deref(),
            args.bgcolors.as_deref(),
            args.rainbow,
            args.hues,
        )?,
        style: options::parse_style(args.style.as_deref())?,
        justify: args.justify,
        overflow: args.overflow,
        no_wrap: args.no_wrap,
    })
}

/// Parses a full `print` invocation into its request; test seam shared
/// with the unit tests below.
#[cfg(test)]
fn request_from_argv(argv: &[&str]) -> CliResult<TextRequest> {
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    let cli = Cli::try_parse_from(argv)?;
    match cli.command {
        Commands::Print(args) => {
            let content = args.text.join(" ");
            request(&args, content)
        }
        _ => unreachable!("argv selects print"),
    }
}

#[cfg(test)]
mod tests {
    use palette::Srgb;

    use super::*;
    use crate::render::{Justify, Overflow};

    #[test]
    fn test_request_translates_the_full_surface() {
        let request = request_from_argv(&[
            "gradient", "print", "hello", "world", "-c", "red,blue", "--style", "bold", "-j",
            "center", "--no-wrap", "--overflow", "ellipsis",
        ])
        .unwrap();
        assert_eq!(request.content, "hello world");
        assert_eq!(
            request.gradient.colors,
            vec![Srgb::new(255, 0, 0), Srgb::new(0, 0, 255)]
        );
        assert!(request.style.bold);
        assert_eq!(request.justify, Justify::Center);
        assert_eq!(request.overflow, Overflow::Ellipsis);
        assert!(request.no_wrap);
    }

    #[test]
    fn test_request_defaults() {
        let request = request_from_argv(&["gradient", "print", "hi"]).unwrap();
        assert!(request.gradient.colors.is_empty());
        assert!(!request.gradient.rainbow);
        assert_eq!(request.gradient.hues, 7);
        assert!(request.style.is_plain());
        assert_eq!(request.overflow, Overflow::Fold);
    }

    #[test]
    fn test_bad_color_is_a_usage_error() {
        let err = request_from_argv(&["gradient", "print", "hi", "-c", "notacolor"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("notacolor"));
    }

    #[test]
    fn test_bad_style_is_a_usage_error() {
        let err = request_from_argv(&["gradient", "print", "hi", "--style", "blod"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
