//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, Command, LanguageArg};

use crate::assistant::AssistantError;
use crate::workbench::WorkbenchError;

/// Maps a failed command to a sysexits-style process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<AssistantError>().is_some() {
        exitcode::UNAVAILABLE
    } else if err.downcast_ref::<toml::de::Error>().is_some() {
        exitcode::CONFIG
    } else if err.downcast_ref::<std::io::Error>().is_some() {
        exitcode::IOERR
    } else if err.downcast_ref::<WorkbenchError>().is_some() {
        exitcode::TEMPFAIL
    } else {
        exitcode::USAGE
    }
}
