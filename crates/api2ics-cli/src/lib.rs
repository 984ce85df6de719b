//! CLI flags and console reporting for the `api2ics` binary.

pub mod cli;
pub mod reporter;

pub use cli::{Cli, CliError};
pub use reporter::ConsoleReporter;
