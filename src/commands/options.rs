#![forbid(unsafe_code)]

//! Option translation shared by the command handlers.
//!
//! Raw CLI strings (comma lists, style strings, padding shorthand, the
//! `-` stdin sentinel) become structured values here; every failure is a
//! usage error carrying a message for stderr.

use std::io::{self, Read};

use palette::Srgb;

use crate::error::{CliError, CliResult};
use crate::render::{GradientSpec, Padding, Style, style};

/// Splits a comma-separated list into trimmed, non-empty tokens.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses an optional comma-separated color list. Absent input is an
/// empty list, which later means "generate stops automatically".
pub fn parse_colors(raw: Option<&str>) -> CliResult<Vec<Srgb<u8>>> {
    match raw {
        None => Ok(Vec::new()),
        Some(raw) => parse_list(raw)
            .iter()
            .map(|token| style::parse_color(token))
            .collect(),
    }
}

/// Parses an optional style string; absent means no styling.
pub fn parse_style(raw: Option<&str>) -> CliResult<Style> {
    match raw {
        None => Ok(Style::default()),
        Some(raw) => Style::parse(raw),
    }
}

/// Bundles one command's color options into a gradient spec.
pub fn gradient_spec(
    colors: Option<&str>,
    bgcolors: Option<&str>,
    rainbow: bool,
    hues: usize,
) -> CliResult<GradientSpec> {
    Ok(GradientSpec {
        colors: parse_colors(colors)?,
        bg_colors: parse_colors(bgcolors)?,
        rainbow,
        hues,
    })
}

/// Parses the padding shorthand: one value for all sides, two for
/// vertical/horizontal, four for top/right/bottom/left.
pub fn parse_padding(raw: &str) -> CliResult<Padding> {
    let values: Vec<usize> = parse_list(raw)
        .iter()
        .map(|token| {
            token.parse::<usize>().map_err(|_| {
                CliError::usage(format!(
                    "invalid padding '{raw}': '{token}' is not a non-negative integer"
                ))
            })
        })
        .collect::<CliResult<_>>()?;
    match values[..] {
        [all] => Ok(Padding::uniform(all)),
        [vertical, horizontal] => Ok(Padding::symmetric(vertical, horizontal)),
        [top, right, bottom, left] => Ok(Padding::new(top, right, bottom, left)),
        _ => Err(CliError::usage(format!(
            "invalid padding '{raw}': expected 1, 2, or 4 comma-separated integers"
        ))),
    }
}

/// Reads all of stdin, dropping trailing newlines.
pub fn read_stdin() -> CliResult<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim_end_matches('\n').to_string())
}

/// Resolves a required content argument that supports the `-` stdin
/// sentinel. The positional is optional at the parser so a bare `--help`
/// can reach the handler; absence is rejected here instead. `what` names
/// the argument in the error message.
pub fn resolve_content(value: Option<&str>, what: &str) -> CliResult<String> {
    let value = value.ok_or_else(|| missing(what))?;
    if value != "-" {
        return Ok(value.to_string());
    }
    let content = read_stdin()?;
    if content.is_empty() {
        return Err(missing(what));
    }
    Ok(content)
}

/// Resolves `print`'s variadic positional: words join with spaces, a sole
/// `-` reads stdin, and no words at all fall back to stdin when it is
/// piped.
pub fn resolve_words(words: &[String], stdin_tty: bool) -> CliResult<String> {
    if words.len() == 1 && words[0] == "-" {
        return resolve_content(Some("-"), "text");
    }
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    if stdin_tty {
        return Err(missing("text"));
    }
    let content = read_stdin()?;
    if content.is_empty() {
        return Err(missing("text"));
    }
    Ok(content)
}

fn missing(what: &str) -> CliError {
    CliError::usage(format!("Missing {what} argument."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_drops_empty_tokens() {
        assert_eq!(
            parse_list(" red , , #ff9900 ,yellow,"),
            vec!["red", "#ff9900", "yellow"]
        );
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ,, ").is_empty());
    }

    #[test]
    fn test_parse_list_is_idempotent_after_rejoining() {
        let once = parse_list(" a , b ,, c ");
        let again = parse_list(&once.join(","));
        assert_eq!(once, again);
    }

    #[test]
    fn test_parse_colors_mixes_names_and_hex() {
        let colors = parse_colors(Some("red, #00ff00")).unwrap();
        assert_eq!(
            colors,
            vec![Srgb::new(255, 0, 0), Srgb::new(0, 255, 0)]
        );
        assert!(parse_colors(None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_colors_surfaces_the_bad_token() {
        let err = parse_colors(Some("red,mauvelous")).unwrap_err();
        assert!(err.to_string().contains("mauvelous"));
    }

    #[test]
    fn test_parse_style_absent_is_plain() {
        assert!(parse_style(None).unwrap().is_plain());
        assert!(parse_style(Some("bold")).unwrap().bold);
    }

    #[test]
    fn test_padding_shorthand_forms() {
        assert_eq!(parse_padding("2").unwrap(), Padding::uniform(2));
        assert_eq!(parse_padding("1,3").unwrap(), Padding::symmetric(1, 3));
        assert_eq!(
            parse_padding("1,2,3,4").unwrap(),
            Padding::new(1, 2, 3, 4)
        );
        // Sloppy spacing and empty tokens behave like the list parser.
        assert_eq!(parse_padding(" 0 , 1 ").unwrap(), Padding::symmetric(0, 1));
        assert_eq!(parse_padding("1,,2").unwrap(), Padding::symmetric(1, 2));
    }

    #[test]
    fn test_padding_rejects_three_values() {
        let err = parse_padding("1,2,3").unwrap_err();
        assert!(err.to_string().contains("expected 1, 2, or 4"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_padding_rejects_non_integers() {
        for raw in ["one", "1,-2", "1,2.5"] {
            let err = parse_padding(raw).unwrap_err();
            assert!(err.to_string().contains("not a non-negative integer"));
        }
    }

    #[test]
    fn test_resolve_words_joins_with_spaces() {
        let words = vec!["hello".to_string(), "world".to_string()];
        assert_eq!(resolve_words(&words, true).unwrap(), "hello world");
    }

    #[test]
    fn test_resolve_words_empty_on_a_tty_is_a_usage_error() {
        let err = resolve_words(&[], true).unwrap_err();
        assert_eq!(err.to_string(), "Missing text argument.");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_resolve_content_passes_plain_values_through() {
        assert_eq!(resolve_content(Some("body"), "text").unwrap(), "body");
    }

    #[test]
    fn test_resolve_content_missing_positional_is_a_usage_error() {
        let err = resolve_content(None, "markdown").unwrap_err();
        assert_eq!(err.to_string(), "Missing markdown argument.");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_gradient_spec_carries_all_color_options() {
        let spec = gradient_spec(Some("red"), Some("black"), true, 9).unwrap();
        assert_eq!(spec.colors, vec![Srgb::new(255, 0, 0)]);
        assert_eq!(spec.bg_colors, vec![Srgb::new(0, 0, 0)]);
        assert!(spec.rainbow);
        assert_eq!(spec.hues, 9);
    }
}
