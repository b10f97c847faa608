// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod dlopen;

/// Expands to the `MymathApi` function table, one field per exported `C_*` function.
#[proc_macro]
pub fn mymath_dlopen2_api(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input);
    dlopen::generate_api(input).into()
}
