// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

//! Shared libraries standing in for a compiled extension module and its runtime.
//!
//! They are built from `csrc/` by the build script, so tests never need the
//! real interpreter toolchain.

/// Runtime library exporting `mymath_rt_long_add` and `mymath_rt_float_add`.
pub const RUNTIME: &str = env!("MYMATH_FIXTURE_RUNTIME");

/// Module exporting `C_add_int`, `C_add_double` and `C_dot`. Its arithmetic
/// calls into [`RUNTIME`], which must be loaded with global visibility first.
pub const DEPENDENT_MODULE: &str = env!("MYMATH_FIXTURE_DEPENDENT");

/// Module exporting only `C_add_int` and `C_add_double`, with no dependencies.
pub const STANDALONE_MODULE: &str = env!("MYMATH_FIXTURE_STANDALONE");
