// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

//! Load a compiled `mymath` extension module and call its C API.
//!
//! ```no_run
//! use mymath::{Loader, MymathModule};
//!
//! let loader = Loader::new();
//! let _runtime = loader.open_prerequisite("libpython3.12.so")?;
//! let library = loader.open_module("./mymath.cpython-312-x86_64-linux-gnu.so")?;
//! {
//!     let module = MymathModule::resolve(&library)?;
//!     assert_eq!(module.add_int(2, 3), 5);
//! }
//! library.close()?;
//! # Ok::<(), mymath::Error>(())
//! ```

#[cfg(not(unix))]
compile_error!("mymath relies on the dlfcn loader and only builds on unix targets");

pub mod api;
mod error;
mod loader;
pub mod module;
mod symbol;
mod sys;

pub use error::{Error, Result};
pub use loader::{Binding, Library, LoadOptions, Loader, Runtime, Visibility, loaded_runtimes};
pub use module::MymathModule;
pub use symbol::Symbol;
