#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! civo — manage Civo cloud resources from the command line.

mod api;
mod cli;
mod cloud;
mod commands;
mod config;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

/// Filter used with `--debug`: this crate at debug, dependencies at warn.
const DEBUG_FILTER: &str = "warn,civo=debug";

fn main() {
    // Usage errors exit with 1 like every other failure; help and version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(i32::from(err.use_stderr()));
        }
    };
    init_tracing(cli.debug);

    let result = OutputCtx::new(cli.output, cli.fields.as_deref(), cli.pretty, cli.no_header)
        .and_then(|ctx| commands::dispatch(&cli, &ctx));

    if let Err(err) = result {
        tracing::debug!(error = ?err, "command failed");
        write_error(&ErrorOutput::from_cloud_error(&err), cli.output);
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
