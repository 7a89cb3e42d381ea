// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! The run path returns `ExitError` instead of calling `std::process::exit()`
//! so `main()` owns process termination. An empty message means the output
//! was already printed.

use std::fmt;

/// Exit status for usage errors, including `--help`.
pub const USAGE_EXIT_CODE: i32 = 1;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Usage was already printed; exit with [`USAGE_EXIT_CODE`].
    pub fn usage() -> Self {
        Self::new(USAGE_EXIT_CODE, String::new())
    }

    /// Resolve the exit code and message for any error from the run path.
    pub fn resolve(err: &anyhow::Error) -> (i32, Option<String>) {
        match err.downcast_ref::<ExitError>() {
            Some(exit) if exit.message.is_empty() => (exit.code, None),
            Some(exit) => (exit.code, Some(exit.message.clone())),
            None => (1, Some(format!("Error: {:#}", err))),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
