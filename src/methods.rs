//! Method pointers
//!
//! Rust has no dedicated pointer-to-member type,
//! a method is just a function whose first argument is the receiver.
//! Wrapping the pointer in [Method] marks that first argument as the receiver,
//! so `Method<fn(&Counter, u32) -> bool>` is a method of `Counter`
//! taking a single `u32`.
use crate::{FunctionTraits, MethodTraits, CallingConvention, Shape};

/// A pointer to a method of some object type
///
/// The wrapped pointer must take the receiver as its first argument,
/// either as `&Object` (a const method) or as `&mut Object`.
/// Any other first argument doesn't form a recognized method.
///
/// ```
/// use static_fn_traits::{Method, MethodTraits};
///
/// struct Counter(u32);
/// impl Counter {
///     fn get(&self) -> u32 { self.0 }
///     fn bump(&mut self, by: u32) { self.0 += by }
/// }
///
/// let get = Method::<fn(&Counter) -> u32>::new(Counter::get);
/// let bump = Method::<fn(&mut Counter, u32)>::new(Counter::bump);
/// let mut counter = Counter(1);
/// (bump.0)(&mut counter, 2);
/// assert_eq!((get.0)(&counter), 3);
/// assert!(<Method<fn(&Counter) -> u32> as MethodTraits>::IS_CONST);
/// assert!(!<Method<fn(&mut Counter, u32)> as MethodTraits>::IS_CONST);
/// ```
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct Method<F>(pub F);
impl<F> Method<F> {
    /// Wrap the specified pointer
    #[inline]
    pub const fn new(ptr: F) -> Self {
        Method(ptr)
    }
    /// The underlying function pointer
    #[inline]
    pub fn into_inner(self) -> F {
        self.0
    }
}

macro_rules! impl_method {
    ([$($qual:tt)*] [$($recv:tt)*] { $($override:tt)* } $($arg:ident),*) => {
        impl<R, O: ?Sized, $($arg),*> FunctionTraits for Method<$($qual)* fn($($recv)* O, $($arg),*) -> R> {
            type Output = R;
            type Arguments = ($($arg,)*);
            type FunctionPtr = $($qual)* fn($($recv)* O, $($arg),*) -> R;
            const SHAPE: Shape = Shape::MemberFunction;
            $($override)*
        }
    };
}
macro_rules! impl_method_traits {
    ([$($recv:tt)*] { $($override:tt)* } $($arg:ident),*) => {
        impl<R, O: ?Sized, $($arg),*> MethodTraits for Method<fn($($recv)* O, $($arg),*) -> R> {
            type Object = O;
            $($override)*
        }
        impl<R, O: ?Sized, $($arg),*> MethodTraits for Method<unsafe fn($($recv)* O, $($arg),*) -> R> {
            type Object = O;
            $($override)*
        }
        impl<R, O: ?Sized, $($arg),*> MethodTraits for Method<extern "C" fn($($recv)* O, $($arg),*) -> R> {
            type Object = O;
            $($override)*
        }
        impl<R, O: ?Sized, $($arg),*> MethodTraits for Method<unsafe extern "C" fn($($recv)* O, $($arg),*) -> R> {
            type Object = O;
            $($override)*
        }
    };
}
macro_rules! impl_methods {
    ($($arg:ident),*) => {
        impl_methods!(@receiver [&mut] {} $($arg),*);
        impl_methods!(@receiver [&] {
            const IS_CONST: bool = true;
        } $($arg),*);
    };
    (@receiver $recv:tt $is_const:tt $($arg:ident),*) => {
        impl_method!([] $recv {} $($arg),*);
        impl_method!([unsafe] $recv {
            const IS_UNSAFE: bool = true;
        } $($arg),*);
        impl_method!([extern "C"] $recv {
            const IS_NOTHROW: bool = true;
            const CALLING_CONVENTION: CallingConvention = CallingConvention::C;
        } $($arg),*);
        impl_method!([unsafe extern "C"] $recv {
            const IS_NOTHROW: bool = true;
            const IS_UNSAFE: bool = true;
            const CALLING_CONVENTION: CallingConvention = CallingConvention::C;
        } $($arg),*);
        impl_method_traits!($recv $is_const $($arg),*);
    };
}

impl_methods!();
impl_methods!(A0);
impl_methods!(A0, A1);
impl_methods!(A0, A1, A2);
impl_methods!(A0, A1, A2, A3);
impl_methods!(A0, A1, A2, A3, A4);
impl_methods!(A0, A1, A2, A3, A4, A5);
impl_methods!(A0, A1, A2, A3, A4, A5, A6);
impl_methods!(A0, A1, A2, A3, A4, A5, A6, A7);
impl_methods!(A0, A1, A2, A3, A4, A5, A6, A7, A8);
impl_methods!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_methods!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_methods!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);

#[cfg(test)]
mod test {
    use crate::{FunctionTraits, MethodTraits, Method, Shape, ObjectOf, ResultOf, ArgumentsOf, assert_type_eq};

    struct Widget;

    type Mutating = Method<fn(&mut Widget, u8, &'static str) -> i32>;
    type Nothrow = Method<extern "C" fn(&mut Widget, u8, *const u8) -> i32>;
    type Const = Method<fn(&Widget, u8, &'static str) -> i32>;
    type ConstNothrow = Method<extern "C" fn(&Widget, u8, *const u8) -> i32>;

    assert_type_eq!(ObjectOf<Mutating>, Widget);
    assert_type_eq!(ObjectOf<ConstNothrow>, Widget);
    assert_type_eq!(ResultOf<Const>, i32);
    assert_type_eq!(ArgumentsOf<Const>, (u8, &'static str));
    assert_type_eq!(ArgumentsOf<Nothrow>, (u8, *const u8));
    assert_type_eq!(<Const as FunctionTraits>::FunctionPtr, fn(&Widget, u8, &'static str) -> i32);

    #[test]
    fn qualifier_crossing() {
        assert_eq!(
            (Mutating::IS_CONST, Mutating::IS_NOTHROW),
            (false, false)
        );
        assert_eq!(
            (Nothrow::IS_CONST, Nothrow::IS_NOTHROW),
            (false, true)
        );
        assert_eq!(
            (Const::IS_CONST, Const::IS_NOTHROW),
            (true, false)
        );
        assert_eq!(
            (ConstNothrow::IS_CONST, ConstNothrow::IS_NOTHROW),
            (true, true)
        );
    }

    #[test]
    fn receiver_is_not_an_argument() {
        assert_eq!(Mutating::ARGUMENTS_COUNT, 2);
        assert_eq!(<Method<fn(&Widget)> as FunctionTraits>::ARGUMENTS_COUNT, 0);
        assert_eq!(Const::SHAPE, Shape::MemberFunction);
    }

    assert_type_eq!(ObjectOf<Method<fn(&str) -> usize>>, str);
    assert_type_eq!(ObjectOf<Method<fn(&mut [u8], u8)>>, [u8]);

    #[test]
    fn unsized_receivers() {
        type Len = Method<fn(&str) -> usize>;
        type Fill = Method<fn(&mut [u8], u8)>;
        assert!(Len::IS_CONST);
        assert_eq!(Len::ARGUMENTS_COUNT, 0);
        assert!(!Fill::IS_CONST);
        assert_eq!(Fill::ARGUMENTS_COUNT, 1);
        let len = Len::new(str::len);
        assert_eq!((len.0)("four"), 4);
        let fill = Fill::new(<[u8]>::fill);
        let mut buffer = [0u8; 3];
        (fill.0)(&mut buffer, 7);
        assert_eq!(buffer, [7, 7, 7]);
    }

    #[test]
    fn unsafe_methods() {
        type Raw = Method<unsafe extern "C" fn(&Widget) -> *const u8>;
        assert!(Raw::IS_UNSAFE);
        assert!(Raw::IS_NOTHROW);
        assert!(Raw::IS_CONST);
        assert!(!Const::IS_UNSAFE);
    }
}
