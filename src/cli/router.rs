#![forbid(unsafe_code)]

//! Default-command routing.
//!
//! Runs before clap ever sees the arguments: an invocation whose first
//! token is not a registered subcommand is treated as `print` input, so
//! `gradient "hello world"` and `gradient -r hello` both work. Only the
//! very first token can reach the global help and version switches;
//! everywhere else `-h`/`--help` belong to the addressed command.

use std::ffi::OsString;

/// Subcommand prepended when no registered name leads the arguments.
pub const DEFAULT_COMMAND: &str = "print";

/// Routing decision for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Render the top-level help.
    Help,
    /// Print the version line.
    Version,
    /// Hand these tokens to the argument parser.
    Dispatch(Vec<OsString>),
}

/// Routes raw arguments (program name excluded).
///
/// First-token rules, in order: no tokens at all renders help on an
/// interactive stdin and otherwise falls through to `print` reading the
/// pipe; exactly `-h`/`--help`/`--version` hit the global switches; a
/// registered name dispatches unchanged; anything else gets the default
/// command prepended.
pub fn route(args: Vec<OsString>, registered: &[String], stdin_is_tty: bool) -> Route {
    if args.is_empty() {
        return if stdin_is_tty {
            Route::Help
        } else {
            Route::Dispatch(vec![OsString::from(DEFAULT_COMMAND)])
        };
    }
    match args[0].to_str() {
        Some("-h") | Some("--help") => Route::Help,
        Some("--version") => Route::Version,
        Some(first) if !first.starts_with('-') && registered.iter().any(|n| n == first) => {
            Route::Dispatch(args)
        }
        // Unregistered token, an option, or a non-UTF-8 first argument
        // (which no registered name can equal): print input.
        _ => prepend_default(args),
    }
}

fn prepend_default(args: Vec<OsString>) -> Route {
    let mut routed = Vec::with_capacity(args.len() + 1);
    routed.push(OsString::from(DEFAULT_COMMAND));
    routed.extend(args);
    Route::Dispatch(routed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["print", "panel", "rule", "markdown"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_registered_first_token_dispatches_unchanged() {
        let route = route(os(&["panel", "hello"]), &names(), true);
        assert_eq!(route, Route::Dispatch(os(&["panel", "hello"])));
    }

    #[test]
    fn test_unknown_first_token_routes_to_print() {
        let route = route(os(&["hello", "world"]), &names(), true);
        assert_eq!(route, Route::Dispatch(os(&["print", "hello", "world"])));
    }

    #[test]
    fn test_leading_option_routes_to_print() {
        let route = route(os(&["-r", "hello"]), &names(), true);
        assert_eq!(route, Route::Dispatch(os(&["print", "-r", "hello"])));
    }

    #[test]
    fn test_empty_args_on_a_tty_show_help() {
        assert_eq!(route(Vec::new(), &names(), true), Route::Help);
    }

    #[test]
    fn test_empty_args_with_piped_stdin_print_the_pipe() {
        assert_eq!(
            route(Vec::new(), &names(), false),
            Route::Dispatch(os(&["print"]))
        );
    }

    #[test]
    fn test_global_help_only_at_position_zero() {
        assert_eq!(route(os(&["--help"]), &names(), true), Route::Help);
        assert_eq!(route(os(&["-h"]), &names(), true), Route::Help);
        // Later positions belong to the routed command.
        assert_eq!(
            route(os(&["panel", "--help"]), &names(), true),
            Route::Dispatch(os(&["panel", "--help"]))
        );
    }

    #[test]
    fn test_version_switch() {
        assert_eq!(route(os(&["--version"]), &names(), true), Route::Version);
        // Not at position zero: routed like any other token.
        assert_eq!(
            route(os(&["rule", "--version"]), &names(), true),
            Route::Dispatch(os(&["rule", "--version"]))
        );
    }

    #[test]
    fn test_help_is_not_a_registered_command() {
        // `gradient help` prints the word itself, it is not a subcommand.
        let route = route(os(&["help"]), &names(), true);
        assert_eq!(route, Route::Dispatch(os(&["print", "help"])));
    }

    #[test]
    fn test_command_name_later_is_plain_text() {
        let route = route(os(&["hello", "panel"]), &names(), true);
        assert_eq!(route, Route::Dispatch(os(&["print", "hello", "panel"])));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_first_token_routes_to_print() {
        use std::os::unix::ffi::OsStringExt;
        let raw = OsString::from_vec(vec![0x66, 0x6f, 0x80]);
        let route = route(vec![raw.clone()], &names(), true);
        match route {
            Route::Dispatch(tokens) => {
                assert_eq!(tokens[0], OsString::from("print"));
                assert_eq!(tokens[1], raw);
            }
            other => panic!("expected dispatch, got {other:?}"),
        }
    }
}
