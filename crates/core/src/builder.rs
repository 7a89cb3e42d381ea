// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the container-runtime `run` invocation for the current allocation.
//!
//! Options are appended in a fixed order. Runtimes let later occurrences of a
//! repeatable flag override earlier ones, so the order is part of the output
//! contract:
//!
//! 1. `--name`, then the `/alloc` and `/local` bind mounts
//! 2. `--privileged` and `--pid=host` in system mode
//! 3. `--network`
//! 4. `--cpu-shares` / `--memory` when they differ from the scheduler defaults
//! 5. `--env` for every forwarded variable
//! 6. `--publish=<host>:<container>` for each resolvable port
//! 7. `--network-alias` on user-defined networks
//! 8. user `--volume` definitions

use std::ffi::{OsStr, OsString};

use crate::alloc::AllocIdentity;
use crate::env::{self, EnvOverlay, Environment};
use crate::port::PortSpec;
use crate::services::ServiceLookup;

pub const DEFAULT_NETWORK: &str = "overlay";
pub const DEFAULT_RUNTIME: &str = "/usr/bin/docker";

/// Scheduler CPU limit applied when the job doesn't set one.
pub const DEFAULT_CPU_LIMIT: &str = "100";
/// Scheduler memory limit applied when the job doesn't set one.
pub const DEFAULT_MEMORY_LIMIT: &str = "10";

/// Network modes built into the runtime; these don't support aliases.
pub const BUILTIN_NETWORKS: [&str; 3] = ["host", "bridged", "none"];

/// User-selected launch settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub network: String,
    /// Host networking, privileged mode and host PID namespace.
    pub system: bool,
    pub ports: Vec<PortSpec>,
    pub aliases: Vec<String>,
    pub volumes: Vec<String>,
    pub runtime: String,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            system: false,
            ports: Vec::new(),
            aliases: Vec::new(),
            volumes: Vec::new(),
            runtime: DEFAULT_RUNTIME.to_string(),
        }
    }
}

impl LaunchOptions {
    /// Network mode after system mode is applied.
    pub fn effective_network(&self) -> &str {
        if self.system {
            "host"
        } else {
            &self.network
        }
    }
}

/// A fully derived launch: runtime options plus the child environment.
///
/// Options are OS strings because forwarded variables may not be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub runtime: String,
    pub options: Vec<OsString>,
    /// Environment the options were derived from, including written-back variables.
    pub env: Environment,
    /// Variables to set on top of the inherited process environment.
    pub overlay: EnvOverlay,
    pub identity: AllocIdentity,
}

impl Launch {
    pub fn build(env: &Environment, opts: &LaunchOptions, services: &dyn ServiceLookup) -> Self {
        let task = env.get_or_empty(env::TASK_NAME);
        let alloc_id = env.get_or_empty(env::ALLOC_ID);
        let mut options: Vec<OsString> = vec![
            // Match the scheduler's own container naming
            format!("--name={}-{}", task, alloc_id).into(),
            format!("--volume={}:/alloc", env.get_or_empty(env::ALLOC_DIR)).into(),
            format!("--volume={}:/local", env.get_or_empty(env::TASK_DIR)).into(),
        ];

        if opts.system {
            options.push("--privileged".into());
            options.push("--pid=host".into());
        }

        let network = opts.effective_network();
        options.push(format!("--network={}", network).into());

        let cpu = env.get_or_empty(env::CPU_LIMIT);
        if cpu != DEFAULT_CPU_LIMIT {
            options.push(format!("--cpu-shares={}", cpu).into());
        }
        let memory = env.get_or_empty(env::MEMORY_LIMIT);
        if memory != DEFAULT_MEMORY_LIMIT {
            options.push(format!("--memory={}m", memory).into());
        }

        let identity = AllocIdentity::from_env(env);
        let overlay = identity.overlay();
        let env = env.merged(&overlay);

        for (key, value) in env.forwarded() {
            options.push("--env".into());
            options.push(env_pair(key, value));
        }

        for port in &opts.ports {
            if let Some(mapping) = port.publish(&env, services) {
                options.push(format!("--publish={}", mapping).into());
            }
        }

        if BUILTIN_NETWORKS.contains(&network) {
            if !opts.aliases.is_empty() {
                tracing::debug!(network, "ignoring aliases on built-in network");
            }
        } else {
            let aliases = identity.aliases().into_iter().chain(opts.aliases.iter().cloned());
            options.extend(
                aliases.map(|alias| OsString::from(format!("--network-alias={}", alias))),
            );
        }

        options.extend(opts.volumes.iter().map(|v| OsString::from(format!("--volume={}", v))));

        tracing::debug!(
            job = %identity.job,
            group = %identity.group,
            task = %identity.task,
            options = options.len(),
            "built launch options"
        );

        Self { runtime: opts.runtime.clone(), options, env, overlay, identity }
    }

    /// Final argument vector: `runtime run --rm <options> <image> <args>`.
    pub fn command(&self, image: &str, args: &[String]) -> Vec<OsString> {
        let mut argv: Vec<OsString> = Vec::with_capacity(self.options.len() + args.len() + 4);
        argv.push(self.runtime.as_str().into());
        argv.push("run".into());
        argv.push("--rm".into());
        argv.extend(self.options.iter().cloned());
        argv.push(image.into());
        argv.extend(args.iter().map(OsString::from));
        argv
    }
}

/// `KEY=VALUE`, byte for byte.
fn env_pair(key: &OsStr, value: &OsStr) -> OsString {
    let mut pair = OsString::with_capacity(key.len() + value.len() + 1);
    pair.push(key);
    pair.push("=");
    pair.push(value);
    pair
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
