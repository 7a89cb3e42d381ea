// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build the runtime invocation and hand the process over to it.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use nr_core::{EnvOverlay, Environment, Launch, ServicesDb};

use crate::args::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let image = cli.image.as_deref().context("missing image")?;

    let env = Environment::capture();
    let services = ServicesDb::load_or_empty(&cli.services_file);
    let launch = Launch::build(&env, &cli.launch_options(), &services);
    let argv = launch.command(image, &cli.args);

    print_argv(&mut std::io::stdout().lock(), &argv)?;

    if cli.dry_run {
        return Ok(());
    }

    tracing::info!(
        runtime = %launch.runtime,
        %image,
        "replacing process with container runtime"
    );
    exec(&argv, &launch.overlay)
}

/// Print the command one argument per line, for the task log.
///
/// Arguments are written as raw bytes so non-UTF-8 values aren't mangled.
pub fn print_argv(out: &mut impl Write, argv: &[OsString]) -> std::io::Result<()> {
    for arg in argv {
        out.write_all(arg.as_encoded_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// The child inherits this process's environment with the overlay applied.
fn command(argv: &[OsString], overlay: &EnvOverlay) -> Result<Command> {
    let (program, args) = argv.split_first().context("empty command")?;
    let mut cmd = Command::new(program);
    cmd.args(args).envs(overlay.iter());
    Ok(cmd)
}

fn program(argv: &[OsString]) -> std::path::Display<'_> {
    argv.first().map(Path::new).unwrap_or_else(|| Path::new("")).display()
}

/// Replace the current process. Only returns on failure.
#[cfg(unix)]
fn exec(argv: &[OsString], overlay: &EnvOverlay) -> Result<()> {
    use std::os::unix::process::CommandExt;

    let err = command(argv, overlay)?.exec();
    Err(err).with_context(|| format!("failed to exec {}", program(argv)))
}

/// No exec on this platform: run the runtime and forward its exit status.
#[cfg(not(unix))]
fn exec(argv: &[OsString], overlay: &EnvOverlay) -> Result<()> {
    use crate::exit_error::ExitError;

    let status = command(argv, overlay)?
        .status()
        .with_context(|| format!("failed to run {}", program(argv)))?;
    match status.code() {
        Some(0) => Ok(()),
        code => Err(ExitError::new(code.unwrap_or(1), String::new()).into()),
    }
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
