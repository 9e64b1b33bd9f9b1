//! Runtime descriptions of statically known signatures
//!
//! Everything in this crate is resolved at compile time.
//! A [SignatureDef] copies those facts into a plain value,
//! for diagnostics, logging or shipping to another process.
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::types::ArgumentList;
use crate::{FunctionTraits, MethodTraits};

/// The syntactic category of a type
///
/// Every type has exactly one shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Shape {
    /// The type isn't a recognized callable
    NoMatch,
    /// A free function (or something that behaves like one)
    FreeFunction,
    /// A method, with an owning object type
    MemberFunction,
}
impl Shape {
    /// If this is a recognized callable shape
    #[inline]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Shape::NoMatch)
    }
}

/// The convention used to call code.
///
/// Only the Rust and C conventions are recognized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum CallingConvention {
    /// The (unstable) Rust ABI
    ///
    /// This is the default calling convention.
    /// Functions using it may unwind.
    Rust,
    /// Matches the target's C calling convention `extern "C"`
    ///
    /// A panic can't unwind out of these functions,
    /// it aborts the process instead.
    C,
}
impl CallingConvention {
    /// If a function with this calling convention can unwind into its caller
    #[inline]
    pub const fn may_unwind(self) -> bool {
        matches!(self, CallingConvention::Rust)
    }
}
impl Default for CallingConvention {
    #[inline]
    fn default() -> Self {
        CallingConvention::Rust
    }
}

/// The definition of a callable's signature
///
/// Includes its argument types, return type, qualifiers and calling convention.
/// Type names are only meant for humans,
/// since [std::any::type_name] makes no stability guarantees.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SignatureDef {
    /// The shape of the callable
    pub shape: Shape,
    /// The name of the return type
    pub result_type: Cow<'static, str>,
    /// The names of the argument types, in order
    ///
    /// For methods, this excludes the receiver.
    pub argument_types: Vec<Cow<'static, str>>,
    /// The name of the owning type, for methods only
    pub object_type: Option<Cow<'static, str>>,
    /// If the callable can't unwind
    pub is_nothrow: bool,
    /// If the method only borrows its receiver immutably
    ///
    /// Always false for free functions.
    pub is_const: bool,
    /// If calling this is unsafe
    pub is_unsafe: bool,
    /// The calling convention
    pub calling_convention: CallingConvention,
}
impl SignatureDef {
    /// Describe the callable `F`
    ///
    /// This doesn't know the owning object of a method,
    /// so member functions must use [SignatureDef::of_method] instead.
    /// Debug builds panic if `F` is a [Shape::MemberFunction].
    pub fn of<F: FunctionTraits>() -> SignatureDef {
        debug_assert!(
            F::SHAPE != Shape::MemberFunction,
            "Use SignatureDef::of_method to describe {}",
            std::any::type_name::<F>()
        );
        SignatureDef::describe::<F>()
    }
    fn describe<F: FunctionTraits>() -> SignatureDef {
        SignatureDef {
            shape: F::SHAPE,
            result_type: Cow::Borrowed(std::any::type_name::<F::Output>()),
            argument_types: <F::Arguments as ArgumentList>::type_names()
                .into_iter()
                .map(Cow::Borrowed)
                .collect(),
            object_type: None,
            is_nothrow: F::IS_NOTHROW,
            is_const: false,
            is_unsafe: F::IS_UNSAFE,
            calling_convention: F::CALLING_CONVENTION,
        }
    }
    /// Describe the method `F`, including its owning object
    pub fn of_method<F: MethodTraits>() -> SignatureDef {
        SignatureDef {
            object_type: Some(Cow::Borrowed(std::any::type_name::<F::Object>())),
            is_const: F::IS_CONST,
            ..SignatureDef::describe::<F>()
        }
    }
    /// The number of arguments (excluding any receiver)
    #[inline]
    pub fn arguments_count(&self) -> usize {
        self.argument_types.len()
    }
    /// The name of the argument type at the specified (zero-based) index
    pub fn argument(&self, index: usize) -> Result<&str, ArgumentIndexError> {
        self.argument_types.get(index)
            .map(|name| &**name)
            .ok_or(ArgumentIndexError { index, count: self.arguments_count() })
    }
}
/// Renders the signature like a Rust function pointer,
/// with the receiver written out for methods.
impl Display for SignatureDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_unsafe {
            f.write_str("unsafe ")?;
        }
        if self.calling_convention == CallingConvention::C {
            f.write_str("extern \"C\" ")?;
        }
        f.write_str("fn(")?;
        let mut first = true;
        if let Some(ref object) = self.object_type {
            f.write_str(if self.is_const { "&" } else { "&mut " })?;
            f.write_str(object)?;
            first = false;
        }
        for arg in &self.argument_types {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(arg)?;
            first = false;
        }
        f.write_str(")")?;
        if self.result_type != "()" {
            write!(f, " -> {}", self.result_type)?;
        }
        Ok(())
    }
}

/// An error indicating that an argument index is out of range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentIndexError {
    /// The index that was requested
    pub index: usize,
    /// The number of arguments the signature actually has
    pub count: usize,
}
impl Display for ArgumentIndexError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Invalid argument index {} (only {} arguments)", self.index, self.count)
    }
}
impl std::error::Error for ArgumentIndexError {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Method;

    struct Counter;

    #[test]
    fn free_function() {
        let def = SignatureDef::of::<extern "C" fn(u32, bool) -> i64>();
        assert_eq!(def.shape, Shape::FreeFunction);
        assert_eq!(def.arguments_count(), 2);
        assert_eq!(def.argument(0), Ok("u32"));
        assert_eq!(def.argument(1), Ok("bool"));
        assert_eq!(def.argument(2), Err(ArgumentIndexError { index: 2, count: 2 }));
        assert!(def.is_nothrow);
        assert!(!def.is_const);
        assert_eq!(def.object_type, None);
        assert_eq!(def.to_string(), "extern \"C\" fn(u32, bool) -> i64");
    }

    #[test]
    fn method() {
        let def = SignatureDef::of_method::<Method<unsafe fn(&Counter, u8)>>();
        assert_eq!(def.shape, Shape::MemberFunction);
        assert!(def.is_const);
        assert!(def.is_unsafe);
        assert!(!def.is_nothrow);
        assert_eq!(def.calling_convention, CallingConvention::Rust);
        let object = std::any::type_name::<Counter>();
        assert_eq!(def.object_type.as_deref(), Some(object));
        assert_eq!(def.to_string(), format!("unsafe fn(&{}, u8)", object));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "of_method")]
    fn method_without_object() {
        let _ = SignatureDef::of::<Method<fn(&Counter, u8)>>();
    }

    #[test]
    fn nullary() {
        let def = SignatureDef::of::<fn()>();
        assert_eq!(def.arguments_count(), 0);
        assert_eq!(def.to_string(), "fn()");
        assert_eq!(
            def.argument(0).unwrap_err().to_string(),
            "Invalid argument index 0 (only 0 arguments)"
        );
    }

    #[test]
    fn shapes_and_conventions() {
        assert!(!Shape::NoMatch.is_valid());
        assert!(Shape::FreeFunction.is_valid());
        assert!(CallingConvention::default().may_unwind());
        assert!(!CallingConvention::C.may_unwind());
    }
}
