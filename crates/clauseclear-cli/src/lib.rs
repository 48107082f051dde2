//! ClauseClear CLI library.
//!
//! This library provides the core functionality for the ClauseClear command-line interface,
//! including configuration management, document loading, command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use extract::TextPageExtractor;
pub use output::Formatter;
