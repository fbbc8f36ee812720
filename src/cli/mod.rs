// CLI module
// Command-line interface: argument parsing and the interactive menu shim

mod args;
pub mod menu;

pub use args::CliArgs;
pub use menu::{run_enrollment, run_session};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or the
/// --help flag), clap displays an error message or help text and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
