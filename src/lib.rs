#![forbid(unsafe_code)]

//! gradient: gradient-colored text, panels, rules, and markdown for the
//! terminal.
//!
//! The binary is a thin wrapper around [`cli::run`]; everything else lives
//! here so the behavior is testable without spawning a process.

pub mod cli;
pub mod commands;
pub mod console;
pub mod error;
pub mod render;
