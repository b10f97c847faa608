// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

//! Thin layer over `dlopen`/`dlsym`/`dlclose`.
//!
//! The platform keeps a single error indicator that every dl* call may set
//! and `dlerror` clears on read. Each function here reads it while holding
//! [`DLERROR_LOCK`], so a diagnostic always belongs to the call that caused it.

use std::ffi::{CStr, CString, OsStr, c_int, c_void};
use std::os::unix::ffi::OsStrExt;
use std::ptr::NonNull;

use parking_lot::Mutex;

use crate::{Error, Result};

static DLERROR_LOCK: Mutex<()> = Mutex::new(());

pub(crate) type Handle = NonNull<c_void>;

/// Take the pending error message, if any. Must be called with the lock held.
unsafe fn take_error() -> Option<String> {
    let message = unsafe { libc::dlerror() };
    if message.is_null() {
        None
    } else {
        Some(
            unsafe { CStr::from_ptr(message) }
                .to_string_lossy()
                .into_owned(),
        )
    }
}

fn unknown_error() -> String {
    "dynamic loader reported no diagnostic".to_owned()
}

/// Validate a library or symbol name and turn it into a C string.
pub(crate) fn c_name(name: &OsStr) -> Result<CString> {
    if name.is_empty() {
        return Err(Error::InvalidName {
            name: String::new(),
            reason: "name is empty",
        });
    }
    CString::new(name.as_bytes()).map_err(|_| Error::InvalidName {
        name: name.to_string_lossy().into_owned(),
        reason: "name contains a NUL byte",
    })
}

/// Open a library; on failure returns the loader's diagnostic.
pub(crate) fn open(name: &CStr, flags: c_int) -> std::result::Result<Handle, String> {
    let _guard = DLERROR_LOCK.lock();
    // Safety: running the library's initializers is what the caller asked for.
    let handle = unsafe { libc::dlopen(name.as_ptr(), flags) };
    match NonNull::new(handle) {
        Some(handle) => Ok(handle),
        None => Err(unsafe { take_error() }.unwrap_or_else(unknown_error)),
    }
}

/// Clear, look up, check. A pending error after the lookup is a failure even
/// when `dlsym` returned an address; a null address without an error is a
/// legitimate value.
pub(crate) fn lookup(handle: Handle, symbol: &CStr) -> std::result::Result<*mut c_void, String> {
    let _guard = DLERROR_LOCK.lock();
    unsafe {
        let _stale = take_error();
        let address = libc::dlsym(handle.as_ptr(), symbol.as_ptr());
        match take_error() {
            Some(message) => Err(message),
            None => Ok(address),
        }
    }
}

pub(crate) fn close(handle: Handle) -> std::result::Result<(), String> {
    let _guard = DLERROR_LOCK.lock();
    unsafe {
        if libc::dlclose(handle.as_ptr()) == 0 {
            Ok(())
        } else {
            Err(take_error().unwrap_or_else(unknown_error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_invalid() {
        let err = c_name(OsStr::new("")).unwrap_err();
        assert!(matches!(err, Error::InvalidName { reason: "name is empty", .. }));
    }

    #[test]
    fn interior_nul_is_invalid() {
        let err = c_name(OsStr::new("C_add\0int")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidName { reason: "name contains a NUL byte", .. }
        ));
    }

    #[test]
    fn plain_name_round_trips() {
        assert_eq!(c_name(OsStr::new("C_dot")).unwrap().as_bytes(), b"C_dot");
    }

    #[test]
    fn lookup_ignores_a_pending_error() {
        let module = c_name(OsStr::new(mymath_fixtures::STANDALONE_MODULE)).unwrap();
        let handle = open(&module, libc::RTLD_NOW | libc::RTLD_LOCAL).unwrap();

        {
            let _guard = DLERROR_LOCK.lock();
            let missing = c_name(OsStr::new("/nonexistent/libmymath_stale.so")).unwrap();
            // The failure is left unread, so the indicator is still set.
            assert!(unsafe { libc::dlopen(missing.as_ptr(), libc::RTLD_NOW) }.is_null());
        }

        let symbol = c_name(OsStr::new("C_add_int")).unwrap();
        let address = lookup(handle, &symbol).unwrap();
        assert!(!address.is_null());
        close(handle).unwrap();
    }

    #[test]
    fn missing_file_reports_loader_diagnostic() {
        let name = c_name(OsStr::new("/nonexistent/libmymath_missing.so")).unwrap();
        let message = open(&name, libc::RTLD_NOW).unwrap_err();
        assert!(message.contains("libmymath_missing.so"), "{message}");
    }
}
