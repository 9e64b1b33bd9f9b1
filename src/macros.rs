/// Check if the specified type has a recognized callable shape
///
/// This is usable in `const` contexts,
/// but only for concrete types (see [Classify](crate::Classify)).
///
/// ```
/// use static_fn_traits::{is_valid, Method};
///
/// struct Foo;
/// const _: () = assert!(is_valid!(Method<fn(&Foo) -> u32>));
/// const _: () = assert!(!is_valid!(Foo));
/// ```
#[macro_export]
macro_rules! is_valid {
    ($target:ty) => {{
        #[allow(unused_imports)]
        use $crate::classify::ClassifyFallback as _;
        <$crate::Classify<$target>>::IS_VALID
    }};
}

/// Statically assert that two types are identical
///
/// This expands to an item, so it can be used anywhere items can.
///
/// ```
/// use static_fn_traits::{assert_type_eq, ResultOf};
///
/// assert_type_eq!(ResultOf<fn() -> u8>, u8);
/// ```
///
/// ```compile_fail,E0308
/// use static_fn_traits::{assert_type_eq, ResultOf};
///
/// assert_type_eq!(ResultOf<fn() -> u8>, u16);
/// ```
#[macro_export]
macro_rules! assert_type_eq {
    ($left:ty, $right:ty $(,)?) => {
        const _: fn() = || {
            fn same<T: ?Sized>(
                _left: ::core::marker::PhantomData<T>,
                _right: ::core::marker::PhantomData<T>
            ) {}
            same(
                ::core::marker::PhantomData::<$left>,
                ::core::marker::PhantomData::<$right>
            );
        };
    };
}
