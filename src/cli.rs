#![forbid(unsafe_code)]

//! The CLI surface: argument definitions, the default-command router, and
//! the styled help renderer.
//!
//! [`run`] is the whole control flow of one invocation: route the raw
//! arguments, parse them with clap, and dispatch to a command handler.

pub mod args;
pub mod help;
pub mod router;

use std::ffi::OsString;

pub use args::{Cli, Commands, MarkdownArgs, PanelArgs, PrintArgs, RuleArgs};
use clap::Parser;
use router::Route;

use crate::commands;
use crate::console::Console;
use crate::error::CliResult;

/// The `--version` output.
pub fn version_line() -> String {
    format!("gradient version {}", env!("CARGO_PKG_VERSION"))
}

/// Runs one invocation. `argv` is the raw argument list with the program
/// name already stripped.
pub fn run(argv: Vec<OsString>, console: &Console) -> CliResult<()> {
    match router::route(argv, &args::registered_names(), console.stdin_tty) {
        Route::Help => {
            help::print_top_level(console)?;
            Ok(())
        }
        Route::Version => {
            println!("{}", version_line());
            Ok(())
        }
        Route::Dispatch(tokens) => dispatch(tokens, console),
    }
}

fn dispatch(tokens: Vec<OsString>, console: &Console) -> CliResult<()> {
    let mut argv = Vec::with_capacity(tokens.len() + 1);
    argv.push(OsString::from("gradient"));
    argv.extend(tokens);
    let cli = Cli::try_parse_from(argv)?;
    match cli.command {
        Commands::Print(args) => commands::print::run(&args, console),
        Commands::Panel(args) => commands::panel::run(&args, console),
        Commands::Rule(args) => commands::rule::run(&args, console),
        Commands::Markdown(args) => commands::markdown::run(&args, console),
    }
}
