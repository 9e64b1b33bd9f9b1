//! Support for the builtin callable wrapper, `Box<dyn Fn(..) -> R>`
//!
//! Only the exact trait object type is recognized.
//! Boxes holding a concrete closure, `dyn FnMut`/`dyn FnOnce`
//! or trait objects with extra bounds (`+ Send`) have no statically
//! known signature as far as this crate is concerned.
use crate::{FunctionTraits, Shape};

macro_rules! impl_boxed_fn {
    ($($arg:ident),*) => {
        impl<R, $($arg),*> FunctionTraits for Box<dyn Fn($($arg),*) -> R> {
            type Output = R;
            type Arguments = ($($arg,)*);
            /// Boxed callables are normalized to a plain function pointer
            type FunctionPtr = fn($($arg),*) -> R;
            const SHAPE: Shape = Shape::FreeFunction;
        }
    };
}

impl_boxed_fn!();
impl_boxed_fn!(A0);
impl_boxed_fn!(A0, A1);
impl_boxed_fn!(A0, A1, A2);
impl_boxed_fn!(A0, A1, A2, A3);
impl_boxed_fn!(A0, A1, A2, A3, A4);
impl_boxed_fn!(A0, A1, A2, A3, A4, A5);
impl_boxed_fn!(A0, A1, A2, A3, A4, A5, A6);
impl_boxed_fn!(A0, A1, A2, A3, A4, A5, A6, A7);
impl_boxed_fn!(A0, A1, A2, A3, A4, A5, A6, A7, A8);
impl_boxed_fn!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_boxed_fn!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_boxed_fn!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);

#[cfg(test)]
mod test {
    use crate::{FunctionTraits, Shape, GetArgument, assert_type_eq};
    use crate::classify::{Classify, ClassifyFallback};

    type Boxed = Box<dyn Fn(u32, String) -> Vec<u8>>;

    assert_type_eq!(<Boxed as FunctionTraits>::FunctionPtr, fn(u32, String) -> Vec<u8>);
    assert_type_eq!(<Boxed as FunctionTraits>::Output, Vec<u8>);
    assert_type_eq!(GetArgument<Boxed, 1>, String);

    #[test]
    fn matches_like_a_plain_pointer() {
        assert_eq!(Boxed::SHAPE, Shape::FreeFunction);
        assert_eq!(Boxed::ARGUMENTS_COUNT, 2);
        assert!(!Boxed::IS_NOTHROW);
        assert!(!Boxed::IS_UNSAFE);
    }

    #[test]
    fn only_the_exact_wrapper() {
        assert!(Classify::<Box<dyn Fn(u32) -> u32>>::IS_VALID);
        assert!(!Classify::<Box<dyn FnMut(u32) -> u32>>::IS_VALID);
        assert!(!Classify::<Box<dyn Fn(u32) -> u32 + Send>>::IS_VALID);
        assert!(!Classify::<Box<u32>>::IS_VALID);
        assert!(!Classify::<std::rc::Rc<dyn Fn(u32) -> u32>>::IS_VALID);
    }
}
