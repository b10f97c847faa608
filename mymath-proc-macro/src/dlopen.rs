// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

use proc_macro2::TokenStream;
use syn::{ForeignItem, ForeignItemFn, Item, Visibility};

/// Prefix shared by every symbol of the extension's C API.
const SYMBOL_PREFIX: &str = "C_";

/// Generate the MymathApi struct from the declarations in mymath-sys' bindings.rs.
/// It has the form
///
/// use mymath_sys::*;
///
/// pub struct MymathApi {
///     #[dlopen2_name = "C_add_int"]
///     add_int: unsafe extern "C" fn(a: c_int, b: c_int) -> c_int,
/// }
pub fn generate_api(_input: TokenStream) -> TokenStream {
    let content = std::fs::read_to_string(mymath_sys::BINDINGS_PATH)
        .expect("Failed to read mymath-sys bindings file");
    let functions = bindings_get_functions(&content);

    let mut api_fields = vec![];

    for func in functions {
        let symbol = func.sig.ident.to_string();
        let func_inputs = &func.sig.inputs;
        let func_output = &func.sig.output;

        let field_name = quote::format_ident! {"{}", convert_to_field_name(&symbol)};

        api_fields.push(quote::quote! {
            #[dlopen2_name = #symbol]
            #field_name: unsafe extern "C" fn(#func_inputs) #func_output,
        });
    }

    quote::quote! {
        #[allow(unused_imports)]
        use mymath_sys::*;
        #[derive(dlopen2::wrapper::WrapperApi)]
        pub struct MymathApi {
            #(#api_fields)*
        }
    }
}

/// Extract the public foreign functions of a bindings file
pub fn bindings_get_functions(content: &str) -> Vec<ForeignItemFn> {
    let mut functions = vec![];

    let ast = syn::parse_file(content).expect("Failed to parse bindings file");
    for item in ast.items {
        if let Item::ForeignMod(extern_block) = item {
            for foreign_item in extern_block.items {
                if let ForeignItem::Fn(func) = foreign_item
                    && let Visibility::Public(_) = func.vis
                {
                    functions.push(func);
                }
            }
        }
    }
    functions
}

/// `C_add_int` becomes `add_int`, `C_addDouble` becomes `add_double`.
fn convert_to_field_name(symbol: &str) -> String {
    let stripped = symbol.strip_prefix(SYMBOL_PREFIX).unwrap_or(symbol);
    to_snake_case(stripped)
}

/// Convert a CamelCase (or already snake_case) string to snake_case
fn to_snake_case(s: &str) -> String {
    let mut out = String::new();

    for c in s.chars() {
        if c.is_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
