// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

//! Raw declarations of the C API exported by a compiled `mymath` extension module.
//!
//! Nothing here links against the module. The declarations are only read by
//! `mymath-proc-macro`, which turns them into a runtime-loaded function table.

#![allow(non_snake_case)]

/// Absolute path of the declarations file, read at macro expansion time.
pub const BINDINGS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/bindings.rs");

/// Path of the C header the declarations mirror.
pub const HEADER_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/include/mymath_c_api.h");

include!("bindings.rs");
