// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nomad-run: start a task's container from inside a Nomad raw_exec task.
//!
//! Reads the allocation's `NOMAD_*` variables, derives the runtime flags,
//! prints the final command and replaces itself with it.

mod args;
mod color;
mod exit_error;
mod launch;

use args::Cli;
use exit_error::ExitError;
use tracing_subscriber::EnvFilter;

/// Log filter variable; defaults to `warn`.
const LOG_ENV: &str = "NOMAD_RUN_LOG";

fn main() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = Cli::parse_args(std::env::args_os())
        .map_err(anyhow::Error::from)
        .and_then(launch::run);

    if let Err(err) = result {
        let (code, message) = ExitError::resolve(&err);
        if let Some(message) = message {
            eprintln!("{}", message);
        }
        std::process::exit(code);
    }
}
