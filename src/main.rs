//! `taxfetch` command-line entry point.

#![allow(clippy::print_stderr)]

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use taxfetch::Error;
use taxfetch::cli::output::{OutputFormat, format_error};
use taxfetch::cli::{Cli, execute};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = OutputFormat::parse(&cli.format);
    execute(&cli).map_or_else(|e| report_failure(&e, format), |out| print_report(&out))
}

/// Stderr logging; `RUST_LOG` overrides `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "taxfetch=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Writes command output. A reader that closes early (`| head`) is not a
/// failure.
fn print_report(output: &str) -> ExitCode {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(output.as_bytes()).and_then(|()| stdout.flush()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: cannot write to stdout: {e}");
            ExitCode::FAILURE
        }
    }
}

/// JSON errors go to stdout so scripts read one stream; text errors go to
/// stderr.
fn report_failure(error: &Error, format: OutputFormat) -> ExitCode {
    tracing::debug!(error = ?error, "command failed");
    let rendered = format_error(error, format);
    match format {
        OutputFormat::Json => {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{rendered}");
        }
        OutputFormat::Text => eprintln!("Error: {rendered}"),
    }
    ExitCode::FAILURE
}
