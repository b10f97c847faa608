// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

use std::ffi::{OsStr, c_void};
use std::fmt;
use std::marker::PhantomData;
use std::mem::size_of;
use std::ops::Deref;

use tracing::debug;

use crate::loader::Library;
use crate::sys;
use crate::{Error, Result};

/// A function resolved from a [`Library`], typed by the caller.
///
/// Only [`Library::get`] creates one, so holding a `Symbol` means the lookup
/// succeeded. Dereference it to call the function.
///
/// The borrow keeps the `Symbol` from outliving its library, but not a copy of
/// the function pointer taken out of it with `*symbol`.
pub struct Symbol<'lib, F> {
    func: F,
    name: String,
    _library: PhantomData<&'lib Library>,
}

impl<F> Symbol<'_, F> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<F> Deref for Symbol<'_, F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.func
    }
}

impl<F> fmt::Debug for Symbol<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol").field("name", &self.name).finish()
    }
}

impl Library {
    /// Address of an exported symbol. Null is a valid answer here: only the
    /// loader's error indicator decides whether the lookup failed.
    pub fn symbol_address(&self, name: &str) -> Result<*mut c_void> {
        let c_name = sys::c_name(OsStr::new(name))?;
        sys::lookup(self.handle(), &c_name).map_err(|message| Error::SymbolNotFound {
            name: name.to_owned(),
            message,
        })
    }

    /// Resolve `name` as a function of type `F`.
    ///
    /// # Safety
    ///
    /// `F` must be an `extern "C"` function pointer type matching the exported
    /// function's real signature. Nothing checks this; calling through a
    /// mismatched type is undefined behaviour.
    ///
    /// A function pointer copied out of the returned [`Symbol`] is not tied to
    /// the library's lifetime and must not be called after the library is
    /// closed.
    pub unsafe fn get<F: Copy>(&self, name: &str) -> Result<Symbol<'_, F>> {
        if size_of::<F>() != size_of::<*mut c_void>() {
            return Err(Error::IncompatibleSymbolType {
                name: name.to_owned(),
                size: size_of::<F>(),
            });
        }

        let address = self.symbol_address(name)?;
        if address.is_null() {
            return Err(Error::NullSymbol {
                name: name.to_owned(),
            });
        }
        debug!(library = self.name(), symbol = name, ?address, "resolved symbol");

        // Safety: F is pointer-sized and the caller vouches for its signature.
        let func = unsafe { std::mem::transmute_copy::<*mut c_void, F>(&address) };
        Ok(Symbol {
            func,
            name: name.to_owned(),
            _library: PhantomData,
        })
    }

    /// Like [`Library::get`], but an unexported symbol is `Ok(None)`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Library::get`].
    pub unsafe fn get_optional<F: Copy>(&self, name: &str) -> Result<Option<Symbol<'_, F>>> {
        match unsafe { self.get(name) } {
            Ok(symbol) => Ok(Some(symbol)),
            Err(err) if err.is_symbol_not_found() => {
                debug!(library = self.name(), symbol = name, "optional symbol not exported");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
