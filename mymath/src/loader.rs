// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

use std::ffi::{OsStr, c_int};
use std::mem::ManuallyDrop;
use std::path::Path;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::sys::{self, Handle};
use crate::{Error, Result};

/// Names of the runtimes opened with global visibility by this process.
static GLOBAL_RUNTIMES: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// When the loader resolves a library's own undefined references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// On first call. Missing dependencies only show up when the function runs.
    Lazy,
    /// While opening. Missing dependencies make the open fail.
    Now,
}

/// Whether a library's exports can satisfy libraries opened after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Local,
    /// Exports join the process-wide symbol table until the process exits.
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub binding: Binding,
    pub visibility: Visibility,
}

impl LoadOptions {
    /// Immediate and global, so the module opened next can link against it.
    pub const PREREQUISITE: Self = Self {
        binding: Binding::Now,
        visibility: Visibility::Global,
    };

    /// Immediate and local, so load errors surface at open time.
    pub const MODULE: Self = Self {
        binding: Binding::Now,
        visibility: Visibility::Local,
    };

    pub fn flags(self) -> c_int {
        let binding = match self.binding {
            Binding::Lazy => libc::RTLD_LAZY,
            Binding::Now => libc::RTLD_NOW,
        };
        let visibility = match self.visibility {
            Visibility::Local => libc::RTLD_LOCAL,
            Visibility::Global => libc::RTLD_GLOBAL,
        };
        binding | visibility
    }
}

/// Opens a prerequisite runtime and then an extension module against it.
///
/// Opening a runtime with [`Visibility::Global`] changes process-wide state:
/// its exports stay visible to every library opened afterwards, for the rest
/// of the process. Two global runtimes exporting the same names leave it to
/// the platform linker to pick one, so a process is expected to open one.
#[derive(Debug, Clone)]
pub struct Loader {
    prerequisite: LoadOptions,
    module: LoadOptions,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self {
            prerequisite: LoadOptions::PREREQUISITE,
            module: LoadOptions::MODULE,
        }
    }

    pub fn with_prerequisite_options(mut self, options: LoadOptions) -> Self {
        self.prerequisite = options;
        self
    }

    pub fn with_module_options(mut self, options: LoadOptions) -> Self {
        self.module = options;
        self
    }

    pub fn prerequisite_options(&self) -> LoadOptions {
        self.prerequisite
    }

    pub fn module_options(&self) -> LoadOptions {
        self.module
    }

    /// Open the runtime a module depends on, e.g. `libpython3.12.so`.
    ///
    /// `name` goes through the platform's library search path. The returned
    /// [`Runtime`] never closes its handle.
    pub fn open_prerequisite(&self, name: impl AsRef<OsStr>) -> Result<Runtime> {
        let handle = open_handle(name.as_ref(), self.prerequisite)?;
        let runtime = Runtime {
            name: name.as_ref().to_string_lossy().into_owned(),
            _handle: handle,
        };
        if self.prerequisite.visibility == Visibility::Global {
            register_global(&runtime.name);
        }
        Ok(runtime)
    }

    /// Open the extension module itself.
    ///
    /// A bare file name is looked up on the search path like any library;
    /// use `./name.so` for the working directory.
    pub fn open_module(&self, path: impl AsRef<Path>) -> Result<Library> {
        let name = path.as_ref().as_os_str();
        let handle = open_handle(name, self.module)?;
        Ok(Library {
            handle,
            name: name.to_string_lossy().into_owned(),
        })
    }
}

fn open_handle(name: &OsStr, options: LoadOptions) -> Result<Handle> {
    let c_name = sys::c_name(name)?;
    let handle = sys::open(&c_name, options.flags()).map_err(|message| Error::Load {
        name: name.to_string_lossy().into_owned(),
        message,
    })?;
    debug!(library = %name.to_string_lossy(), ?options, "opened library");
    Ok(handle)
}

/// Runtimes are told apart by the name they were opened with, not by file:
/// `libpython3.12.so` and `/usr/lib/libpython3.12.so` count as two and the
/// second one logs a collision warning.
fn register_global(name: &str) {
    let mut runtimes = GLOBAL_RUNTIMES.lock();
    if runtimes.iter().any(|loaded| loaded == name) {
        debug!(runtime = name, "runtime already globally visible");
        return;
    }
    if !runtimes.is_empty() {
        warn!(
            runtime = name,
            loaded = ?runtimes.as_slice(),
            "several global runtimes loaded; colliding symbols resolve to whichever the linker finds first"
        );
    }
    runtimes.push(name.to_owned());
}

/// Names of the runtimes opened with global visibility so far, in load order.
///
/// Entries are the names as passed to [`Loader::open_prerequisite`], so one
/// file opened under two spellings appears twice.
pub fn loaded_runtimes() -> Vec<String> {
    GLOBAL_RUNTIMES.lock().clone()
}

/// A prerequisite runtime held open for the life of the process.
///
/// Dropping it does not close the library: modules opened after it may still
/// call into it, and process exit reclaims the handle.
#[derive(Debug)]
pub struct Runtime {
    name: String,
    _handle: Handle,
}

impl Runtime {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An open extension module.
///
/// Closed exactly once, either by [`Library::close`] or on drop. Symbols
/// resolved from it borrow it, so none can outlive the handle.
#[derive(Debug)]
pub struct Library {
    handle: Handle,
    name: String,
}

impl Library {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn handle(&self) -> Handle {
        self.handle
    }

    /// Release the handle and report whether the platform accepted it.
    pub fn close(self) -> Result<()> {
        let mut this = ManuallyDrop::new(self);
        let name = std::mem::take(&mut this.name);
        sys::close(this.handle).map_err(|message| Error::Release {
            name: name.clone(),
            message,
        })?;
        debug!(library = %name, "released library");
        Ok(())
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        match sys::close(self.handle) {
            Ok(()) => debug!(library = %self.name, "released library on drop"),
            Err(message) => warn!(library = %self.name, %message, "failed to release library"),
        }
    }
}
