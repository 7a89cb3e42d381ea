// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Port publish requests (`--port name[:number]`).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::env::{self, Environment};
use crate::services::ServiceLookup;

/// A port label and the optional container port it maps to.
///
/// Without a number, the container port is resolved from the label through
/// the services database (`http` becomes 80). A spec with an empty name is
/// accepted but never has an assigned port, so it is always skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub name: String,
    pub number: Option<String>,
}

impl PortSpec {
    /// The host port the scheduler assigned to this label, if any.
    pub fn assigned<'a>(&self, env: &'a Environment) -> Option<&'a str> {
        if self.name.is_empty() {
            return None;
        }
        env.get(&format!("{}{}", env::PORT_PREFIX, self.name)).filter(|v| !v.is_empty())
    }

    /// The `<host>:<container>` mapping to publish, or `None` to skip.
    pub fn publish(&self, env: &Environment, services: &dyn ServiceLookup) -> Option<String> {
        let Some(external) = self.assigned(env) else {
            tracing::debug!(port = %self.name, "no assigned port, skipping");
            return None;
        };

        let internal = match &self.number {
            Some(number) => number.clone(),
            None => match services.port_by_name(&self.name) {
                Some(port) => port.to_string(),
                None => {
                    tracing::debug!(port = %self.name, "unknown service name, skipping");
                    return None;
                }
            },
        };

        Some(format!("{}:{}", external, internal))
    }
}

impl FromStr for PortSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split(':');
        let name = segments.next().unwrap_or_default();
        let number = segments.next().filter(|n| !n.is_empty()).map(str::to_string);
        Ok(Self { name: name.to_string(), number })
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.number {
            Some(number) => write!(f, "{}:{}", self.name, number),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
#[path = "port_tests.rs"]
mod tests;
