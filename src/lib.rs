//! Static signature information for callable types.
//!
//! Given a function pointer, a method pointer or a boxed `dyn Fn`,
//! this crate exposes its return type, argument types, argument count,
//! owning object and qualifiers, all resolved by the compiler.
//! None of this has any runtime cost!
//!
//! ```
//! use static_fn_traits::{FunctionTraits, MethodTraits, Method, GetArgument, assert_type_eq};
//!
//! struct Counter(u32);
//!
//! type Add = fn(u32, u64) -> u64;
//! assert_type_eq!(<Add as FunctionTraits>::Output, u64);
//! assert_type_eq!(GetArgument<Add, 1>, u64);
//! const _: () = assert!(<Add as FunctionTraits>::ARGUMENTS_COUNT == 2);
//!
//! type Get = Method<extern "C" fn(&Counter) -> u32>;
//! assert_type_eq!(<Get as MethodTraits>::Object, Counter);
//! const _: () = assert!(<Get as MethodTraits>::IS_CONST);
//! const _: () = assert!(<Get as FunctionTraits>::IS_NOTHROW);
//! ```
//!
//! Types that don't have a recognized shape simply don't implement [FunctionTraits].
//! The [Classify] probe (or the [is_valid!] macro) turns that into a flag:
//!
//! ```
//! use static_fn_traits::is_valid;
//!
//! struct NotCallable;
//! const _: () = assert!(is_valid!(fn(u8) -> bool));
//! const _: () = assert!(!is_valid!(NotCallable));
//! ```
//!
//! Asking for the signature of something that isn't callable is a compile error:
//!
//! ```compile_fail,E0277
//! use static_fn_traits::ResultOf;
//!
//! struct NotCallable;
//! let _: Option<ResultOf<NotCallable>> = None;
//! ```
//!
//! So is asking for an argument that doesn't exist:
//!
//! ```compile_fail,E0277
//! use static_fn_traits::GetArgument;
//!
//! let _: Option<GetArgument<fn(u8, u16), 2>> = None;
//! ```
//!
//! Free functions have no owning object:
//!
//! ```compile_fail,E0277
//! use static_fn_traits::ObjectOf;
//!
//! let _: Option<ObjectOf<fn(u8)>> = None;
//! ```
//!
//! Fn items (and their methods) have unnameable types.
//! The `static-fn-traits-derive` crate generates nameable stand-ins for them.
#![deny(missing_docs)]

mod macros;
#[cfg(feature = "builtins")]
pub mod builtins;
pub mod classify;
pub mod funcs;
pub mod methods;
pub mod types;

mod core;

pub use crate::classify::Classify;
pub use crate::funcs::{CallingConvention, Shape, SignatureDef};
pub use crate::methods::Method;

use crate::types::{ArgumentList, TupleElement};

/// The trait for callable types whose signature is known statically.
///
/// This is implemented for every recognized callable shape:
/// function pointers (`fn`, `extern "C" fn` and their `unsafe` variants),
/// [Method] pointers and (with the `builtins` feature) `Box<dyn Fn(..) -> R>`.
/// Any other type is not callable as far as this crate is concerned.
///
/// Most of the qualifiers have a default of `false`,
/// and are only overridden by the implementations that carry them.
///
/// ## Borrowed arguments
/// An elided lifetime in an argument makes the pointer higher-ranked
/// (`fn(&str)` is `for<'a> fn(&'a str)`), and a higher-ranked argument
/// can't be named by [FunctionTraits::Arguments]. Such pointers are not recognized.
/// Spell out `'static` instead. The receiver of a [Method] is exempt.
///
/// ```
/// use static_fn_traits::{is_valid, Method};
///
/// const _: () = assert!(!is_valid!(fn(&str) -> usize));
/// const _: () = assert!(is_valid!(fn(&'static str) -> usize));
/// const _: () = assert!(is_valid!(Method<fn(&str) -> usize>));
/// ```
pub trait FunctionTraits: Sized {
    /// The return type of the callable
    type Output;
    /// The ordered tuple of argument types
    ///
    /// For methods, this excludes the receiver.
    type Arguments: ArgumentList;
    /// The normalized function pointer type
    ///
    /// This is `Self` for function pointers,
    /// the plain `fn` pointer for boxed callables
    /// and the wrapped pointer for methods.
    type FunctionPtr: Copy;
    /// The shape of the callable
    ///
    /// This is never [Shape::NoMatch].
    const SHAPE: Shape;
    /// The number of arguments (excluding any receiver)
    const ARGUMENTS_COUNT: usize = <Self::Arguments as ArgumentList>::COUNT;
    /// If the callable is guaranteed not to unwind
    ///
    /// Only `extern "C"` functions qualify,
    /// since a panic escaping them aborts the process.
    const IS_NOTHROW: bool = false;
    /// If calling this requires `unsafe`
    const IS_UNSAFE: bool = false;
    /// The calling convention of the underlying function
    const CALLING_CONVENTION: CallingConvention = CallingConvention::Rust;
}

/// Signature information specific to methods
///
/// This is only implemented by the [Shape::MemberFunction] shape.
pub trait MethodTraits: FunctionTraits {
    /// The type that owns the method (the type of `self`)
    ///
    /// This may be unsized, as in `Method<fn(&str) -> usize>`.
    type Object: ?Sized;
    /// If the method only borrows its receiver immutably (`&self`)
    const IS_CONST: bool = false;
}

/// The return type of the callable `F`
pub type ResultOf<F> = <F as FunctionTraits>::Output;
/// The tuple of argument types of the callable `F`
pub type ArgumentsOf<F> = <F as FunctionTraits>::Arguments;
/// The type of the argument at (zero-based) `INDEX`
///
/// Using an index past the end is a compile error.
pub type GetArgument<F, const INDEX: usize> = <ArgumentsOf<F> as TupleElement<INDEX>>::Type;
/// The type that owns the method `F`
pub type ObjectOf<F> = <F as MethodTraits>::Object;

/// Everything needed to classify types,
/// including the traits that drive [Classify].
pub mod prelude {
    pub use crate::classify::{Classify, ClassifyFallback, ViaFallback, ViaFunctionTraits};
    pub use crate::types::{ArgumentList, TupleElement};
    pub use crate::{FunctionTraits, Method, MethodTraits, Shape};
}
