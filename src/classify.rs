//! Total classification of arbitrary types
//!
//! [FunctionTraits] is only implemented by recognized callables,
//! so a type that isn't one has no signature to ask about.
//! The [Classify] probe answers the question "is this callable at all?"
//! for *any* concrete type, without failing to compile.
//!
//! ## How it works
//! For type-based probing, `Classify<T>` has an inherent `IS_VALID = true`
//! whenever `T: FunctionTraits`. Otherwise path resolution falls back to the
//! [ClassifyFallback] trait, where `IS_VALID = false`.
//!
//! For value-based probing (useful for unnameable types like closures),
//! [ViaFunctionTraits] takes the probe by value while [ViaFallback] takes it
//! by reference, so method resolution only reaches the fallback
//! when the first doesn't apply.
//!
//! ## Limitation
//! Both forms only work for **concrete types** known at the use site.
//! Inside `fn foo<T>()` the fallback always wins;
//! generic code should bound on [FunctionTraits] instead.
use std::marker::PhantomData;

use educe::Educe;

use crate::{FunctionTraits, Shape};

/// A zero-sized probe for classifying the type `T`
///
/// ```
/// use static_fn_traits::prelude::*;
///
/// struct Plain;
/// assert!(Classify::<fn(i32) -> i32>::IS_VALID);
/// assert_eq!(Classify::<Method<fn(&Plain)>>::SHAPE, Shape::MemberFunction);
/// assert!(!Classify::<Plain>::IS_VALID);
/// assert_eq!(Classify::<str>::SHAPE, Shape::NoMatch);
///
/// // Closures never have a recognized shape
/// let closure = |x: i32| x + 1;
/// assert!(!Classify::of_val(&closure).is_valid());
/// let ptr: fn(i32) -> i32 = closure;
/// assert!(Classify::of_val(&ptr).is_valid());
/// ```
#[derive(Educe)]
#[educe(Debug, Clone, Copy, Default)]
pub struct Classify<T: ?Sized>(PhantomData<fn(&T)>);
impl<T: ?Sized> Classify<T> {
    /// Create a new probe for the type `T`
    #[inline]
    pub const fn new() -> Self {
        Classify(PhantomData)
    }
    /// Create a probe for the type of the specified value
    #[inline]
    pub const fn of_val(_value: &T) -> Self {
        Classify(PhantomData)
    }
}
impl<T: FunctionTraits> Classify<T> {
    /// The type has a recognized callable shape
    pub const IS_VALID: bool = true;
    /// The shape of the callable
    pub const SHAPE: Shape = T::SHAPE;
}

/// The fallback for types with no recognized callable shape
///
/// This has to be in scope for `Classify::<T>::IS_VALID` to resolve
/// when `T` isn't callable.
pub trait ClassifyFallback {
    /// The type has no recognized callable shape
    const IS_VALID: bool = false;
    /// Always [Shape::NoMatch]
    const SHAPE: Shape = Shape::NoMatch;
}
impl<T: ?Sized> ClassifyFallback for Classify<T> {}

/// Value-based classification of callable types
pub trait ViaFunctionTraits: Sized {
    /// The type has a recognized callable shape
    fn is_valid(self) -> bool;
    /// The shape of the callable
    fn shape(self) -> Shape;
}
impl<T: FunctionTraits> ViaFunctionTraits for Classify<T> {
    #[inline]
    fn is_valid(self) -> bool {
        true
    }
    #[inline]
    fn shape(self) -> Shape {
        T::SHAPE
    }
}

/// Value-based classification of everything else
pub trait ViaFallback {
    /// The type has no recognized callable shape
    #[inline]
    fn is_valid(&self) -> bool {
        false
    }
    /// Always [Shape::NoMatch]
    #[inline]
    fn shape(&self) -> Shape {
        Shape::NoMatch
    }
}
impl<T: ?Sized> ViaFallback for Classify<T> {}
