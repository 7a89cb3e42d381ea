// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command line surface: `nomad-run [OPTIONS] <IMAGE> [-- <ARGS>...]`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use nr_core::{LaunchOptions, PortSpec, DEFAULT_NETWORK, DEFAULT_RUNTIME, SYSTEM_SERVICES};

use crate::exit_error::ExitError;

/// Version reported by `--version`
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

#[derive(Debug, Parser)]
#[command(
    name = "nomad-run",
    version = VERSION,
    about = "Run a container for the current Nomad allocation",
    override_usage = "nomad-run [OPTIONS] <IMAGE> [-- <ARGS>...]",
    styles = crate::color::styles(),
)]
pub struct Cli {
    /// Additional network alias
    #[arg(long = "alias", value_name = "NAME")]
    pub aliases: Vec<String>,

    /// Networking mode
    #[arg(long, value_name = "MODE", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Port to expose, format name[:number]
    ///
    /// If number is not supplied, it will be derived from the name,
    /// e.g. `--port http` is equivalent to `--port http:80`.
    #[arg(long = "port", value_name = "NAME[:NUMBER]")]
    pub ports: Vec<PortSpec>,

    /// Enable host networking, privileged mode, and host PID
    #[arg(long)]
    pub system: bool,

    /// Additional volume binding
    #[arg(long = "volume", value_name = "DEFINITION")]
    pub volumes: Vec<String>,

    /// Container runtime binary
    #[arg(
        long,
        value_name = "PATH",
        env = "NOMAD_RUN_RUNTIME",
        default_value = DEFAULT_RUNTIME
    )]
    pub runtime: String,

    /// Services database used to resolve port names
    #[arg(
        long,
        value_name = "PATH",
        env = "NOMAD_RUN_SERVICES_FILE",
        default_value = SYSTEM_SERVICES
    )]
    pub services_file: PathBuf,

    /// Print the command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Container image
    pub image: Option<String>,

    /// Arguments passed to the container entrypoint
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse arguments, printing usage on failure.
    ///
    /// Help and usage errors (including a missing image) exit with status 1.
    /// `--version` exits with status 0.
    pub fn parse_args<I, T>(args: I) -> Result<Self, ExitError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) if cli.image.is_some() => Ok(cli),
            Ok(_) => {
                let _ = Self::command().print_help();
                Err(ExitError::usage())
            }
            Err(e) => {
                let _ = e.print();
                match e.kind() {
                    ErrorKind::DisplayVersion => Err(ExitError::new(0, String::new())),
                    _ => Err(ExitError::usage()),
                }
            }
        }
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            network: self.network.clone(),
            system: self.system,
            ports: self.ports.clone(),
            aliases: self.aliases.clone(),
            volumes: self.volumes.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
