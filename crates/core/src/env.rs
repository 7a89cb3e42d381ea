// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot of the scheduler-provided process environment.
//!
//! The launcher never mutates the live process environment. It captures an
//! [`Environment`] once, derives an [`EnvOverlay`] of variables to write
//! back, and merges the two into the environment handed to the child.
//!
//! Entries are kept as raw OS strings so values that aren't UTF-8 still
//! reach the container untouched.

use std::ffi::{OsStr, OsString};

use indexmap::IndexMap;

/// Name of the task within its group.
pub const TASK_NAME: &str = "NOMAD_TASK_NAME";
/// Unique allocation id.
pub const ALLOC_ID: &str = "NOMAD_ALLOC_ID";
/// Shared allocation directory on the host.
pub const ALLOC_DIR: &str = "NOMAD_ALLOC_DIR";
/// Task-local directory on the host.
pub const TASK_DIR: &str = "NOMAD_TASK_DIR";
/// CPU limit in MHz.
pub const CPU_LIMIT: &str = "NOMAD_CPU_LIMIT";
/// Memory limit in megabytes.
pub const MEMORY_LIMIT: &str = "NOMAD_MEMORY_LIMIT";
/// Allocation name, formatted `job.group[index]`.
pub const ALLOC_NAME: &str = "NOMAD_ALLOC_NAME";
/// Allocation index within the group.
pub const ALLOC_INDEX: &str = "NOMAD_ALLOC_INDEX";
/// Prefix of the per-label assigned port variables.
pub const PORT_PREFIX: &str = "NOMAD_PORT_";

/// Written back for the child: job name parsed from the allocation name.
pub const JOB_NAME: &str = "NOMAD_JOB_NAME";
/// Written back for the child: group name parsed from the allocation name.
pub const GROUP_NAME: &str = "NOMAD_GROUP_NAME";

/// Variables never forwarded into the container.
pub const EXCLUDED: [&str; 2] = ["PATH", "LANG"];

/// Insertion-ordered snapshot of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: IndexMap<OsString, OsString>,
}

impl Environment {
    /// Snapshot the current process environment, in the order the OS reports it.
    pub fn capture() -> Self {
        std::env::vars_os().collect()
    }

    /// UTF-8 value of a variable. Non-UTF-8 values read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_os(key).and_then(OsStr::to_str)
    }

    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }

    /// Like [`get`](Self::get), but absent variables read as the empty string.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Variables forwarded into the container, skipping [`EXCLUDED`].
    pub fn forwarded(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.iter().filter(|(key, _)| !EXCLUDED.iter().any(|ex| *key == OsStr::new(ex)))
    }

    /// Apply an overlay, returning a new snapshot.
    ///
    /// Existing keys keep their position and take the overlay value; new keys
    /// are appended in overlay order.
    pub fn merged(&self, overlay: &EnvOverlay) -> Self {
        let mut vars = self.vars.clone();
        for (key, value) in overlay.iter() {
            vars.insert(key.into(), value.into());
        }
        Self { vars }
    }
}

impl<K: Into<OsString>, V: Into<OsString>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Variables derived during the build and written back for the child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    vars: Vec<(String, String)>,
}

impl EnvOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.vars.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.vars.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
