// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process replacement.

use std::path::{Path, PathBuf};

use crate::prelude::*;

#[test]
#[cfg(unix)]
fn replaces_process_with_runtime() {
    if !Path::new("/bin/echo").exists() {
        return;
    }

    let run = launcher().args(&["--runtime", "/bin/echo", "alpine", "--", "true"]).run().passes();
    let lines = run.argv();

    // Printed vector first, then whatever the runtime wrote
    assert_eq!(lines[0], "/bin/echo");
    let echoed = lines.last().unwrap();
    assert!(echoed.starts_with("run --rm --name=server-5e1f0c2a "), "{}", echoed);
    assert!(echoed.ends_with(" alpine true"), "{}", echoed);
}

#[test]
fn exec_failure_exits_one() {
    launcher()
        .args(&["--runtime", "/nonexistent/docker", "alpine"])
        .run()
        .exits_with(1)
        .stdout_has("/nonexistent/docker")
        .stderr_has("failed to exec /nonexistent/docker");
}

/// Write an executable runtime that dumps its environment instead of
/// starting a container.
#[cfg(unix)]
fn env_dumping_runtime(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("runtime");
    std::fs::write(&script, "#!/bin/sh\nexec /usr/bin/env\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[test]
#[cfg(unix)]
fn runtime_inherits_environment_with_overlay() {
    use std::os::unix::ffi::OsStrExt;

    if !Path::new("/usr/bin/env").exists() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let runtime = env_dumping_runtime(dir.path());

    let run = launcher()
        .env("NOMAD_JOB_NAME", "stale")
        .env_os("LATIN1", std::ffi::OsStr::from_bytes(b"caf\xe9"))
        .args(&["--runtime", runtime.to_str().unwrap(), "alpine"])
        .run()
        .passes();
    let lines = run.lines_bytes();

    // Printed vector: forwarded as a single `--env` value
    let forwarded = lines.iter().position(|l| *l == b"LATIN1=caf\xe9").unwrap();
    assert_eq!(lines[forwarded - 1], b"--env");

    // Child environment follows the image line
    let image = lines.iter().rposition(|l| *l == b"alpine").unwrap();
    let child = &lines[image + 1..];
    assert!(child.contains(&&b"LATIN1=caf\xe9"[..]));
    assert!(child.contains(&&b"NOMAD_TASK_NAME=server"[..]));
    assert!(child.contains(&&b"NOMAD_JOB_NAME=web"[..]));
    assert!(child.contains(&&b"NOMAD_GROUP_NAME=api"[..]));
    assert!(!child.contains(&&b"NOMAD_JOB_NAME=stale"[..]));
}
