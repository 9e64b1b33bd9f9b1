//! Procedural macros for `static-fn-traits`
//!
//! Rust fn items have unnameable types,
//! so `#[function_traits]` generates a nameable marker type for each function,
//! carrying the same signature information as its function pointer.
extern crate proc_macro;

mod internals;

use syn::{parse_macro_input, Item};

/// Generate a marker type implementing `FunctionTraits` for a function.
///
/// Accepts a free `fn`, an inherent `impl` block (one marker per method)
/// or an `extern "C"` block (one marker per foreign function).
///
/// Markers are named `_FN_<function>`, or `_FN_<Type>_<method>` inside impls.
/// Use `#[function_traits(name = Custom)]` to pick another name,
/// and `#[function_traits(skip)]` on an item inside a block to ignore it.
///
/// ```
/// use static_fn_traits::{FunctionTraits, ResultOf, assert_type_eq};
/// use static_fn_traits_derive::function_traits;
///
/// #[function_traits]
/// fn greet(name: &'static str) -> String {
///     format!("Hello {}", name)
/// }
///
/// assert_type_eq!(ResultOf<_FN_greet>, String);
/// assert_eq!(<_FN_greet as FunctionTraits>::ARGUMENTS_COUNT, 1);
/// assert_eq!((_FN_greet::POINTER)("world"), "Hello world");
/// ```
///
/// Borrowed arguments need a `'static` lifetime.
/// Written references and lifetimes are rejected by the macro itself,
/// while lifetimes hidden inside a path are reported by the compiler
/// at the offending argument:
///
/// ```compile_fail
/// use std::borrow::Cow;
/// use static_fn_traits_derive::function_traits;
///
/// #[function_traits]
/// fn first(text: Cow<str>) -> usize {
///     text.len()
/// }
/// ```
#[proc_macro_attribute]
pub fn function_traits(
    args: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let input: Item = parse_macro_input!(input as Item);
    let args = parse_macro_input!(args as internals::func::FuncArgs);
    match internals::derive_function_traits(args, &input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.into_compile_error().into(),
    }
}
