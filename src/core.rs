//! Implementations of [FunctionTraits] for function pointers
//!
//! Each arity gets the four pointer flavors:
//! `fn`, `unsafe fn`, `extern "C" fn` and `unsafe extern "C" fn`.
use crate::{FunctionTraits, CallingConvention, Shape};

macro_rules! impl_free_fn {
    ([$($qual:tt)*] { $($override:tt)* } $($arg:ident),*) => {
        impl<R, $($arg),*> FunctionTraits for $($qual)* fn($($arg),*) -> R {
            type Output = R;
            type Arguments = ($($arg,)*);
            type FunctionPtr = Self;
            const SHAPE: Shape = Shape::FreeFunction;
            $($override)*
        }
    };
}
macro_rules! impl_free_fns {
    ($($arg:ident),*) => {
        impl_free_fn!([] {} $($arg),*);
        impl_free_fn!([unsafe] {
            const IS_UNSAFE: bool = true;
        } $($arg),*);
        impl_free_fn!([extern "C"] {
            const IS_NOTHROW: bool = true;
            const CALLING_CONVENTION: CallingConvention = CallingConvention::C;
        } $($arg),*);
        impl_free_fn!([unsafe extern "C"] {
            const IS_NOTHROW: bool = true;
            const IS_UNSAFE: bool = true;
            const CALLING_CONVENTION: CallingConvention = CallingConvention::C;
        } $($arg),*);
    };
}
impl_free_fns!();
impl_free_fns!(A0);
impl_free_fns!(A0, A1);
impl_free_fns!(A0, A1, A2);
impl_free_fns!(A0, A1, A2, A3);
impl_free_fns!(A0, A1, A2, A3, A4);
impl_free_fns!(A0, A1, A2, A3, A4, A5);
impl_free_fns!(A0, A1, A2, A3, A4, A5, A6);
impl_free_fns!(A0, A1, A2, A3, A4, A5, A6, A7);
impl_free_fns!(A0, A1, A2, A3, A4, A5, A6, A7, A8);
impl_free_fns!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_free_fns!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_free_fns!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);

#[cfg(test)]
mod test {
    use crate::{FunctionTraits, CallingConvention, Shape, GetArgument, assert_type_eq};

    type Plain = fn(u8, i64) -> bool;
    type Nothrow = extern "C" fn(u8, i64) -> bool;
    type Unsafe = unsafe fn(u8, i64) -> bool;
    type UnsafeNothrow = unsafe extern "C" fn(u8, i64) -> bool;

    assert_type_eq!(<Plain as FunctionTraits>::Output, bool);
    assert_type_eq!(<Plain as FunctionTraits>::Arguments, (u8, i64));
    assert_type_eq!(<Plain as FunctionTraits>::FunctionPtr, Plain);
    assert_type_eq!(GetArgument<Plain, 0>, u8);
    assert_type_eq!(GetArgument<Plain, 1>, i64);
    assert_type_eq!(<Nothrow as FunctionTraits>::Arguments, (u8, i64));
    assert_type_eq!(<Nothrow as FunctionTraits>::FunctionPtr, Nothrow);
    assert_type_eq!(<UnsafeNothrow as FunctionTraits>::Output, bool);

    #[test]
    fn qualifiers() {
        assert!(!Plain::IS_NOTHROW);
        assert!(!Plain::IS_UNSAFE);
        assert!(Nothrow::IS_NOTHROW);
        assert!(!Nothrow::IS_UNSAFE);
        assert!(!Unsafe::IS_NOTHROW);
        assert!(Unsafe::IS_UNSAFE);
        assert!(UnsafeNothrow::IS_NOTHROW);
        assert!(UnsafeNothrow::IS_UNSAFE);
    }

    #[test]
    fn shared_facts() {
        assert_eq!(Plain::SHAPE, Shape::FreeFunction);
        assert_eq!(UnsafeNothrow::SHAPE, Shape::FreeFunction);
        assert_eq!(Plain::ARGUMENTS_COUNT, 2);
        assert_eq!(Nothrow::ARGUMENTS_COUNT, 2);
        assert_eq!(Plain::CALLING_CONVENTION, CallingConvention::Rust);
        assert_eq!(Unsafe::CALLING_CONVENTION, CallingConvention::Rust);
        assert_eq!(Nothrow::CALLING_CONVENTION, CallingConvention::C);
    }

    #[test]
    fn nullary() {
        assert_eq!(<fn() as FunctionTraits>::ARGUMENTS_COUNT, 0);
        assert_eq!(
            <fn(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) -> u8 as FunctionTraits>::ARGUMENTS_COUNT,
            12
        );
    }
    assert_type_eq!(<fn() as FunctionTraits>::Output, ());
    assert_type_eq!(<fn() as FunctionTraits>::Arguments, ());
}
