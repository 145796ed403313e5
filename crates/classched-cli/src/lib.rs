//! CLI argument surface for the `classched` binary, exposed as a library so
//! the parsing logic is testable without spawning processes.

pub mod cli_args;

pub use cli_args::Cli;
