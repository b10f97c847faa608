// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::path::{Path, PathBuf};

/// (library stem, source file, env var exporting the built path)
const FIXTURES: &[(&str, &str, &str)] = &[
    ("mymath_rt", "csrc/mymath_rt.c", "MYMATH_FIXTURE_RUNTIME"),
    ("mymath_dep", "csrc/mymath_dep.c", "MYMATH_FIXTURE_DEPENDENT"),
    (
        "mymath_standalone",
        "csrc/mymath_standalone.c",
        "MYMATH_FIXTURE_STANDALONE",
    ),
];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let include_dir = Path::new(mymath_sys::HEADER_PATH)
        .parent()
        .expect("header path has a parent directory");
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    for (stem, source, env_key) in FIXTURES {
        let source = manifest_dir.join(source);
        let output = out_dir.join(format!("lib{stem}.so"));
        println!("cargo:rerun-if-changed={}", source.display());

        let compiler = cc::Build::new().pic(true).get_compiler();
        let mut cmd = compiler.to_command();
        cmd.arg("-shared").arg("-fPIC");
        if target_os == "macos" {
            // mymath_dep leaves its runtime symbols undefined on purpose.
            cmd.arg("-undefined").arg("dynamic_lookup");
        }
        cmd.arg("-I").arg(include_dir).arg("-o").arg(&output).arg(&source);

        let status = cmd
            .status()
            .unwrap_or_else(|e| panic!("failed to spawn C compiler for {stem}: {e}"));
        assert!(status.success(), "building fixture {stem} failed: {status}");

        println!("cargo:rustc-env={env_key}={}", output.display());
    }
    println!("cargo:rerun-if-changed={}", mymath_sys::HEADER_PATH);
}
