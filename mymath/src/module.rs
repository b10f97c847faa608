// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

//! Typed access to the C API of a compiled `mymath` module.

use std::ffi::c_int;

use crate::loader::Library;
use crate::symbol::Symbol;
use crate::{Error, Result};

pub const ADD_INT: &str = "C_add_int";
pub const ADD_DOUBLE: &str = "C_add_double";
pub const DOT: &str = "C_dot";

pub type AddIntFn = unsafe extern "C" fn(c_int, c_int) -> c_int;
pub type AddDoubleFn = unsafe extern "C" fn(f64, f64) -> f64;
pub type DotFn = unsafe extern "C" fn(*mut f64, *mut f64, c_int) -> f64;

/// The module's functions, resolved from one open [`Library`].
///
/// `C_add_int` and `C_add_double` are required. `C_dot` is declared by the
/// header but not every build of the module exports it.
#[derive(Debug)]
pub struct MymathModule<'lib> {
    add_int: Symbol<'lib, AddIntFn>,
    add_double: Symbol<'lib, AddDoubleFn>,
    dot: Option<Symbol<'lib, DotFn>>,
}

impl<'lib> MymathModule<'lib> {
    /// Resolve every function up front; any required symbol missing fails the
    /// whole resolution before anything is called.
    pub fn resolve(library: &'lib Library) -> Result<Self> {
        // Safety: the types mirror mymath_c_api.h.
        let (add_int, add_double, dot) = unsafe {
            (
                library.get::<AddIntFn>(ADD_INT)?,
                library.get::<AddDoubleFn>(ADD_DOUBLE)?,
                library.get_optional::<DotFn>(DOT)?,
            )
        };
        Ok(Self {
            add_int,
            add_double,
            dot,
        })
    }

    pub fn add_int(&self, a: i32, b: i32) -> i32 {
        unsafe { (*self.add_int)(a, b) }
    }

    pub fn add_double(&self, a: f64, b: f64) -> f64 {
        unsafe { (*self.add_double)(a, b) }
    }

    pub fn has_dot(&self) -> bool {
        self.dot.is_some()
    }

    /// Dot product of two equally long buffers, or `None` without `C_dot`.
    pub fn dot(&self, x: &[f64], y: &[f64]) -> Result<Option<f64>> {
        let Some(dot) = &self.dot else {
            return Ok(None);
        };
        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let length = c_int::try_from(x.len()).map_err(|_| Error::LengthOverflow(x.len()))?;
        // Safety: both buffers hold `length` elements and C_dot only reads them.
        Ok(Some(unsafe {
            (**dot)(x.as_ptr().cast_mut(), y.as_ptr().cast_mut(), length)
        }))
    }

    /// Call `C_dot` with an explicit count, exactly as the C API takes it.
    ///
    /// # Safety
    ///
    /// `x` and `y` must each point to at least `length` readable elements.
    pub unsafe fn dot_raw(&self, x: *const f64, y: *const f64, length: c_int) -> Option<f64> {
        let dot = self.dot.as_ref()?;
        Some(unsafe { (**dot)(x.cast_mut(), y.cast_mut(), length) })
    }
}
