//! golem - instantiate concrete Go types from generic definitions
//!
//! Usage from a Go package:
//!
//! ```text
//! //go:generate golem -type Foo -generic github.com/fogfish/golem/stream/stream.go
//! ```

mod cli;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> ExitCode {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::from(cli::exit_code(&err))
        }
    }
}
