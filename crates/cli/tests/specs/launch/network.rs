// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Naming, mounts, networking and resource limits.

use crate::prelude::*;

#[test]
fn command_shape() {
    let run = launcher().dry_run(&["nginx:1.25", "--", "nginx", "-g", "daemon off;"]).passes();
    let argv = run.argv();

    assert_eq!(&argv[..6], &[
        "/usr/bin/docker",
        "run",
        "--rm",
        "--name=server-5e1f0c2a",
        "--volume=/var/nomad/alloc/5e1f0c2a/alloc:/alloc",
        "--volume=/var/nomad/alloc/5e1f0c2a/server/local:/local",
    ]);
    assert_eq!(argv[6], "--network=overlay");
    assert_eq!(&argv[argv.len() - 4..], &["nginx:1.25", "nginx", "-g", "daemon off;"]);
}

#[test]
fn hierarchical_aliases_on_overlay() {
    let run = launcher().dry_run(&["--alias", "frontend", "nginx"]).passes();

    similar_asserts::assert_eq!(
        run.flags("--network-alias="),
        vec![
            "--network-alias=web",
            "--network-alias=api.web",
            "--network-alias=server.api.web",
            "--network-alias=n2.server.api.web",
            "--network-alias=frontend",
        ]
    );
}

#[test]
fn system_mode_overrides_network() {
    let run = launcher()
        .dry_run(&["--network", "custom", "--system", "--alias", "x", "agent"])
        .passes();
    let argv = run.argv();

    assert_eq!(&argv[6..9], &["--privileged", "--pid=host", "--network=host"]);
    assert!(!argv.iter().any(|a| a == "--network=custom"));
    assert!(run.flags("--network-alias=").is_empty());
}

#[test]
fn host_network_has_no_aliases() {
    let run = launcher().dry_run(&["--network", "host", "--alias", "frontend", "nginx"]).passes();
    assert!(run.argv().contains(&"--network=host".to_string()));
    assert!(run.flags("--network-alias=").is_empty());
}

#[test]
fn default_limits_are_omitted() {
    let run = launcher().dry_run(&["nginx"]).passes();
    assert!(run.flags("--cpu-shares=").is_empty());
    assert!(run.flags("--memory=").is_empty());
}

#[test]
fn custom_limits_are_emitted() {
    let run = launcher()
        .env("NOMAD_CPU_LIMIT", "500")
        .env("NOMAD_MEMORY_LIMIT", "256")
        .dry_run(&["nginx"])
        .passes();
    assert_eq!(run.flags("--cpu-shares="), vec!["--cpu-shares=500"]);
    assert_eq!(run.flags("--memory="), vec!["--memory=256m"]);
}

#[test]
fn volumes_come_last_before_image() {
    let run = launcher()
        .dry_run(&["--volume", "/srv/data:/data:ro", "--volume", "scratch:/tmp", "nginx"])
        .passes();
    let argv = run.argv();
    assert_eq!(
        &argv[argv.len() - 3..],
        &["--volume=/srv/data:/data:ro", "--volume=scratch:/tmp", "nginx"]
    );
}

#[test]
fn runtime_can_be_overridden() {
    let run = launcher().env("NOMAD_RUN_RUNTIME", "/usr/bin/podman").dry_run(&["nginx"]).passes();
    assert_eq!(run.argv()[0], "/usr/bin/podman");

    let run = launcher().dry_run(&["--runtime", "/opt/bin/nerdctl", "nginx"]).passes();
    assert_eq!(run.argv()[0], "/opt/bin/nerdctl");
}

#[test]
fn missing_scheduler_variables_are_tolerated() {
    let run = Launcher::bare().dry_run(&["nginx"]).passes();
    let argv = run.argv();
    assert_eq!(argv[3], "--name=-");
    assert_eq!(argv[4], "--volume=:/alloc");
}
