//! CLI layer for taxfetch.
//!
//! Provides the command-line interface using clap, with commands for the
//! full retrieval run, a search-only lookup, and filtering a local GenBank
//! file.

pub mod commands;
pub mod output;
pub mod parser;
pub mod prompt;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
