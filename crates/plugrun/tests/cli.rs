// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests that run the `plugrun` binary.
//!
//! Each test works in its own temporary directory and clears the
//! environment, so no user or system configuration leaks in.

use std::process::{Command, Output};

use plugrun_test_utils::{UnitDir, units};

fn plugrun(dir: &UnitDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plugrun"))
        .args(args)
        .current_dir(dir.path())
        .env_clear()
        .output()
        .expect("failed to spawn plugrun")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---- Success ----

#[test]
fn greeter_prints_hello_and_exits_zero() {
    let dir = UnitDir::new();
    dir.add_wat("Greeter", units::GREETER);

    let out = plugrun(&dir, &["--dir", "./", "--unit", "Greeter", "--entry", "greet"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "hello\n");
}

#[test]
fn wasi_greeter_writes_to_inherited_stdout() {
    let dir = UnitDir::new();
    dir.add_wat("Greeter", units::WASI_GREETER);

    let out = plugrun(&dir, &["--unit", "Greeter", "--entry", "greet"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("hello"));
}

#[test]
fn compiled_defaults_run_hello_world_plugin() {
    let dir = UnitDir::new();
    dir.add_wat(
        "HelloWorldPlugin",
        &units::GREETER.replace(r#"(export "greet")"#, r#"(export "execute")"#),
    );

    let out = plugrun(&dir, &[]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "hello\n");
}

#[test]
fn local_config_file_selects_unit() {
    let dir = UnitDir::new();
    dir.add_wat("Greeter", units::GREETER);
    std::fs::write(
        dir.path().join("plugrun.toml"),
        "[unit]\nname = \"Greeter\"\nentry = \"greet\"\n",
    )
    .unwrap();

    let out = plugrun(&dir, &[]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "hello\n");
}

#[test]
fn environment_selects_unit() {
    let dir = UnitDir::new();
    dir.add_wat("Greeter", units::GREETER);

    let out = Command::new(env!("CARGO_BIN_EXE_plugrun"))
        .current_dir(dir.path())
        .env_clear()
        .env("PLUGRUN_UNIT_NAME", "Greeter")
        .env("PLUGRUN_UNIT_ENTRY", "greet")
        .output()
        .expect("failed to spawn plugrun");
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "hello\n");
}

// ---- Failures ----

#[test]
fn missing_unit_exits_nonzero_with_diagnostic() {
    let dir = UnitDir::new();

    let out = plugrun(&dir, &["--unit", "Missing", "--entry", "greet"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).is_empty());
    let err = stderr(&out);
    assert!(err.contains("Missing"), "stderr: {err}");
    assert!(err.contains("could not be read"), "stderr: {err}");
}

#[test]
fn malformed_unit_exits_nonzero() {
    let dir = UnitDir::new();
    dir.add_bytes("Broken", b"this is not a module");

    let out = plugrun(&dir, &["--unit", "Broken"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("not a valid WebAssembly module"));
}

#[test]
fn bad_signature_exits_nonzero() {
    let dir = UnitDir::new();
    dir.add_wat("BadSig", units::BAD_SIG);

    let out = plugrun(&dir, &["--unit", "BadSig", "--entry", "greet"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).contains("zero-argument entry operation"));
}

#[test]
fn trap_in_entry_exits_nonzero_after_partial_output() {
    let dir = UnitDir::new();
    dir.add_wat("Crashy", units::TRAPPING_ENTRY);

    let out = plugrun(&dir, &["--unit", "Crashy", "--entry", "greet"]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(stdout(&out), "before\n");
    assert!(stderr(&out).contains("failed"));
}

#[test]
fn unknown_config_key_exits_with_config_status() {
    let dir = UnitDir::new();
    std::fs::write(dir.path().join("plugrun.toml"), "[unit]\nnmae = \"Greeter\"\n").unwrap();

    let out = plugrun(&dir, &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("nmae"));
}

#[test]
fn missing_config_file_exits_with_config_status() {
    let dir = UnitDir::new();
    dir.add_wat(
        "HelloWorldPlugin",
        &units::GREETER.replace(r#"(export "greet")"#, r#"(export "execute")"#),
    );

    let out = plugrun(&dir, &["--config", "nowhere.toml"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty(), "the default unit must not run");
    assert!(stderr(&out).contains("nowhere.toml"));
}

#[test]
fn empty_unit_flag_is_rejected() {
    let dir = UnitDir::new();

    let out = plugrun(&dir, &["--unit", ""]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unit.name"));
}
