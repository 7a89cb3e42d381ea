// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Allocation identity derived from the scheduler's naming variables.

use crate::env::{self, EnvOverlay, Environment};

/// Job, group, task and index of the running allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocIdentity {
    pub job: String,
    pub group: String,
    pub task: String,
    pub index: String,
}

impl AllocIdentity {
    /// Parse an allocation name of the form `job.group[index]`.
    ///
    /// The job is everything before the first `.`; the group runs from there
    /// up to the next `.` or the first `[`. Missing segments come out empty.
    pub fn parse(alloc_name: &str, task: &str, index: &str) -> Self {
        let mut segments = alloc_name.split('.');
        let job = segments.next().unwrap_or_default();
        let group = segments.next().unwrap_or_default();
        let group = group.split('[').next().unwrap_or_default();

        Self {
            job: job.to_string(),
            group: group.to_string(),
            task: task.to_string(),
            index: index.to_string(),
        }
    }

    pub fn from_env(env: &Environment) -> Self {
        for key in [env::ALLOC_NAME, env::TASK_NAME, env::ALLOC_INDEX] {
            if env.get(key).is_none() {
                tracing::warn!(variable = key, "scheduler variable not set, using empty value");
            }
        }
        Self::parse(
            env.get_or_empty(env::ALLOC_NAME),
            env.get_or_empty(env::TASK_NAME),
            env.get_or_empty(env::ALLOC_INDEX),
        )
    }

    /// Variables written back so the child sees the parsed job and group.
    pub fn overlay(&self) -> EnvOverlay {
        let mut overlay = EnvOverlay::new();
        overlay.set(env::JOB_NAME, &self.job);
        overlay.set(env::GROUP_NAME, &self.group);
        overlay
    }

    /// Hierarchical network aliases, least specific first:
    /// `job`, `group.job`, `task.group.job`, `n<index>.task.group.job`.
    pub fn aliases(&self) -> Vec<String> {
        let node = format!("n{}", self.index);
        let parts = [self.job.as_str(), self.group.as_str(), self.task.as_str(), node.as_str()];

        (1..=parts.len())
            .map(|depth| {
                let mut names = parts[..depth].to_vec();
                names.reverse();
                names.join(".")
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "alloc_tests.rs"]
mod tests;
