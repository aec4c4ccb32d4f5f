#![forbid(unsafe_code)]

//! The `rule` command: a horizontal divider with an optional title.

use crate::cli::RuleArgs;
use crate::cli::help;
use crate::commands::options;
use crate::console::Console;
use crate::error::CliResult;
use crate::render::svg;
use crate::render::{GradientRule, RuleRequest};

pub fn run(args: &RuleArgs, console: &Console) -> CliResult<()> {
    if args.help {
        help::print_command(console, "rule")?;
        return Ok(());
    }
    let rule = GradientRule::new(request(args)?);
    if let Some(path) = &args.svg {
        return svg::export(&rule, path, &args.end);
    }
    console.print(&rule, &args.end)?;
    Ok(())
}

fn request(args: &RuleArgs) -> CliResult<RuleRequest> {
    Ok(RuleRequest {
        title: args.title.clone(),
        title_style: options::parse_style(Some(&args.title_style))?,
        gradient: options::gradient_spec(
            args.colors.as_deref(),
            args.bgcolors.as_deref(),
            args.rainbow,
            args.hues,
        )?,
        thickness: args.thickness,
        align: args.align,
    })
}

#[cfg(test)]
fn request_from_argv(argv: &[&str]) -> CliResult<RuleRequest> {
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    let cli = Cli::try_parse_from(argv)?;
    match cli.command {
        Commands::Rule(args) => request(&args),
        _ => unreachable!("argv selects rule"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Justify;

    #[test]
    fn test_request_translates_the_full_surface() {
        let request = request_from_argv(&[
            "gradient", "rule", "-t", "Section", "-T", "3", "-a", "left", "-r",
        ])
        .unwrap();
        assert_eq!(request.title.as_deref(), Some("Section"));
        assert!(request.title_style.bold);
        assert_eq!(request.thickness, 3);
        assert_eq!(request.align, Justify::Left);
        assert!(request.gradient.rainbow);
        assert_eq!(request.gradient.hues, 10);
    }

    #[test]
    fn test_untitled_rule_needs_no_arguments() {
        let request = request_from_argv(&["gradient", "rule"]).unwrap();
        assert!(request.title.is_none());
        assert_eq!(request.thickness, 2);
    }
}
