// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

// Declarations for include/mymath_c_api.h, in bindgen's output layout.

unsafe extern "C" {
    pub fn C_add_int(a: ::std::os::raw::c_int, b: ::std::os::raw::c_int) -> ::std::os::raw::c_int;
}
unsafe extern "C" {
    pub fn C_add_double(a: f64, b: f64) -> f64;
}
unsafe extern "C" {
    pub fn C_dot(x: *mut f64, y: *mut f64, length: ::std::os::raw::c_int) -> f64;
}
