#![forbid(unsafe_code)]

//! Command handlers: one module per subcommand, plus the shared option
//! translation.

pub mod markdown;
pub mod options;
pub mod panel;
pub mod print;
pub mod rule;
