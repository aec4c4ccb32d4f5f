#![forbid(unsafe_code)]

//! Binary entry point: detect the console, run the CLI, map the outcome
//! to an exit code.

use std::env;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use gradient_cli::cli;
use gradient_cli::console::Console;
use gradient_cli::error::CliError;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn main() -> ExitCode {
    let console = Console::detect();
    let argv: Vec<_> = env::args_os().skip(1).collect();
    match cli::run(argv, &console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Prints the failure to stderr. clap errors arrive fully rendered,
/// usage line included; everything else gets an `error:` prefix.
fn report(err: &CliError) {
    if let CliError::Parse(parse) = err {
        let _ = parse.print();
        return;
    }
    let choice = if std::io::stderr().is_terminal() && env::var_os("NO_COLOR").is_none() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(stderr, "error:");
    let _ = stderr.reset();
    let _ = writeln!(stderr, " {err}");
}
