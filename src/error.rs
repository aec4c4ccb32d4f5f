#![forbid(unsafe_code)]

//! Error taxonomy for the CLI.
//!
//! Every failure aborts the invocation. Usage errors (bad option values,
//! conflicting flags, missing input) exit with code 2; I/O failures exit
//! with code 1.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit code for malformed invocations.
pub const EXIT_USAGE: i32 = 2;

/// Exit code for runtime failures (I/O, export).
pub const EXIT_FAILURE: i32 = 1;

/// Errors surfaced by the router, the option translators, and the render
/// layer.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid invocation detected after argument parsing: bad option
    /// values, rejected flag combinations, or missing input.
    #[error("{0}")]
    Usage(String),

    /// Invalid invocation detected by the argument parser itself. The
    /// message is already fully rendered, including the usage line.
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// Failed to write an SVG export file.
    #[error("failed to write SVG to '{}': {source}", path.display())]
    SvgWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Terminal or standard stream I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Builds a usage error from any displayable message.
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    /// The process exit code this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) | CliError::Parse(_) => EXIT_USAGE,
            CliError::SvgWrite { .. } | CliError::Io(_) => EXIT_FAILURE,
        }
    }
}

/// Crate-wide result alias.
pub type CliResult<T> = Result<T, CliError>;
