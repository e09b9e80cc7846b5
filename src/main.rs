use std::process::ExitCode;

use schema_lint::cli;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    // stdout carries the report; logs go to stderr
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let command_line_interface = cli::CommandLineInterface::load();
    init_tracing(command_line_interface.verbose());
    command_line_interface.run()
}
