// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

use std::process::{Command, Output};

use mymath_fixtures::{DEPENDENT_MODULE, RUNTIME, STANDALONE_MODULE};

fn call_mymath(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_call-mymath"))
        .args(args)
        .env_remove("MYMATH_RUNTIME")
        .env_remove("MYMATH_MODULE")
        .env_remove("RUST_LOG")
        .output()
        .expect("call-mymath should execute")
}

#[test]
fn reports_results_and_exits_zero() {
    let output = call_mymath(&["--runtime", RUNTIME, "--module", DEPENDENT_MODULE]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout,
        "C_add_int(2, 3) = 5\n\
         C_add_double(1.5, 2.5) = 4\n\
         C_dot([1, 2, 3], [4, 5, 6]) = 32\n"
    );
}

#[test]
fn module_without_dot_still_succeeds() {
    let output = call_mymath(&["--no-runtime", "--module", STANDALONE_MODULE]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("C_add_int(2, 3) = 5"), "{stdout}");
    assert!(!stdout.contains("C_dot"), "{stdout}");
}

#[test]
fn missing_module_exits_with_one() {
    let output = call_mymath(&["--no-runtime", "--module", "/nonexistent/libmymath.so"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load '/nonexistent/libmymath.so'"), "{stderr}");
}

#[test]
fn missing_runtime_exits_with_one() {
    let output = call_mymath(&[
        "--runtime",
        "/nonexistent/libpython3.12.so",
        "--module",
        STANDALONE_MODULE,
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("libpython3.12.so"), "{stderr}");
}

#[test]
fn missing_symbol_exits_with_one() {
    let output = call_mymath(&["--no-runtime", "--module", RUNTIME]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("symbol 'C_add_int' not found"), "{stderr}");
}

#[test]
fn dependent_module_without_runtime_fails_at_load() {
    let output = call_mymath(&["--no-runtime", "--module", DEPENDENT_MODULE]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("mymath_rt_"), "{stderr}");
}
