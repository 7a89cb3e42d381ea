// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nr-core: derives a container-runtime `run` invocation from the
//! environment a Nomad task is started with.

pub mod alloc;
pub mod builder;
pub mod env;
pub mod port;
pub mod services;

pub use alloc::AllocIdentity;
pub use builder::{Launch, LaunchOptions, BUILTIN_NETWORKS, DEFAULT_NETWORK, DEFAULT_RUNTIME};
pub use env::{EnvOverlay, Environment};
pub use port::PortSpec;
pub use services::{ServiceLookup, ServicesDb, ServicesError, SYSTEM_SERVICES};
