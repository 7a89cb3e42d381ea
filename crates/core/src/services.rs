// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service-name to port resolution backed by an `/etc/services` database.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default location of the system services database.
pub const SYSTEM_SERVICES: &str = "/etc/services";

/// Resolves symbolic TCP service names to port numbers.
pub trait ServiceLookup {
    fn port_by_name(&self, name: &str) -> Option<u16>;
}

#[derive(Debug, Error)]
pub enum ServicesError {
    #[error("failed to read services database {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ServiceEntry {
    names: Vec<String>,
    port: u16,
}

/// Parsed services database, TCP entries only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicesDb {
    entries: Vec<ServiceEntry>,
}

impl ServicesDb {
    /// Parse `name port/proto [aliases...]` lines.
    ///
    /// Comments start at `#`. Malformed lines and non-TCP entries are dropped.
    pub fn parse(text: &str) -> Self {
        let entries = text.lines().filter_map(parse_line).collect();
        Self { entries }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServicesError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ServicesError::Read { path: path.to_path_buf(), source })?;
        let db = Self::parse(&text);
        tracing::debug!(path = %path.display(), entries = db.len(), "loaded services database");
        Ok(db)
    }

    /// Load a database, falling back to an empty one when it can't be read.
    ///
    /// Named ports then go unresolved and are skipped rather than failing
    /// the launch.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(db) => db,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "services database unavailable, named ports will not resolve"
                );
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ServiceLookup for ServicesDb {
    fn port_by_name(&self, name: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|entry| entry.names.iter().any(|n| n == name))
            .map(|entry| entry.port)
            // Bare numbers resolve to themselves
            .or_else(|| name.parse().ok())
    }
}

fn parse_line(line: &str) -> Option<ServiceEntry> {
    let line = line.split('#').next().unwrap_or_default();
    let mut fields = line.split_whitespace();
    let name = fields.next()?;
    let (port, proto) = fields.next()?.split_once('/')?;
    if proto != "tcp" {
        return None;
    }
    let port = port.parse().ok()?;

    let mut names = vec![name.to_string()];
    names.extend(fields.map(str::to_string));
    Some(ServiceEntry { names, port })
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod tests;
