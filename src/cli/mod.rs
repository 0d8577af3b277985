//! CLI module
//!
//! Command-line interface for dispatching operations.
//!
//! # Commands
//!
//! - `call` - Run an operation and print every page merged
//! - `operations` - List operations and their URL templates
//! - `links` - Parse a Link header value

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
