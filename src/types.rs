//! Argument lists, represented as ordered tuples of types
//!
//! Every tuple of up to twelve elements is an [ArgumentList],
//! and every element of such a tuple can be looked up by position
//! via [TupleElement].

/// An ordered, fixed-length list of argument types
///
/// This is implemented for `()` and every tuple up to twelve elements.
pub trait ArgumentList {
    /// The number of elements
    const COUNT: usize;
    /// The names of the element types, in order
    ///
    /// These come from [std::any::type_name],
    /// so they are only meant for diagnostics.
    fn type_names() -> Vec<&'static str>;
}

/// Positional access to the type of a tuple element
///
/// Only implemented for `INDEX < COUNT`,
/// so asking for an element past the end fails to compile.
pub trait TupleElement<const INDEX: usize> {
    /// The type of the element at `INDEX`
    type Type;
}

macro_rules! impl_argument_lists {
    ($(($($idx:tt: $elem:ident),*)),* $(,)?) => {
        $(impl_argument_lists!(@list [$($elem),*] $($idx: $elem),*);)*
    };
    (@list $all:tt $($idx:tt: $elem:ident),*) => {
        impl_argument_lists!(@count $all);
        $(impl_argument_lists!(@element $all $idx $elem);)*
    };
    (@count [$($elem:ident),*]) => {
        impl<$($elem),*> ArgumentList for ($($elem,)*) {
            const COUNT: usize = 0 $(+ impl_argument_lists!(@one $elem))*;
            fn type_names() -> Vec<&'static str> {
                vec![$(std::any::type_name::<$elem>()),*]
            }
        }
    };
    (@one $elem:ident) => { 1 };
    (@element [$($elem:ident),*] $idx:tt $target:ident) => {
        impl<$($elem),*> TupleElement<$idx> for ($($elem,)*) {
            type Type = $target;
        }
    };
}

impl_argument_lists! {
    (),
    (0: A0),
    (0: A0, 1: A1),
    (0: A0, 1: A1, 2: A2),
    (0: A0, 1: A1, 2: A2, 3: A3),
    (0: A0, 1: A1, 2: A2, 3: A3, 4: A4),
    (0: A0, 1: A1, 2: A2, 3: A3, 4: A4, 5: A5),
    (0: A0, 1: A1, 2: A2, 3: A3, 4: A4, 5: A5, 6: A6),
    (0: A0, 1: A1, 2: A2, 3: A3, 4: A4, 5: A5, 6: A6, 7: A7),
    (0: A0, 1: A1, 2: A2, 3: A3, 4: A4, 5: A5, 6: A6, 7: A7, 8: A8),
    (0: A0, 1: A1, 2: A2, 3: A3, 4: A4, 5: A5, 6: A6, 7: A7, 8: A8, 9: A9),
    (0: A0, 1: A1, 2: A2, 3: A3, 4: A4, 5: A5, 6: A6, 7: A7, 8: A8, 9: A9, 10: A10),
    (0: A0, 1: A1, 2: A2, 3: A3, 4: A4, 5: A5, 6: A6, 7: A7, 8: A8, 9: A9, 10: A10, 11: A11),
}

#[cfg(test)]
mod test {
    use super::*;

    fn element<T: TupleElement<I>, const I: usize>() -> &'static str {
        std::any::type_name::<T::Type>()
    }

    #[test]
    fn counts() {
        assert_eq!(<() as ArgumentList>::COUNT, 0);
        assert_eq!(<(u8,) as ArgumentList>::COUNT, 1);
        assert_eq!(<(u8, u16, u32) as ArgumentList>::COUNT, 3);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as ArgumentList>::COUNT,
            12
        );
    }

    #[test]
    fn elements_follow_declaration_order() {
        assert_eq!(element::<(u8, String, bool), 0>(), "u8");
        assert_eq!(element::<(u8, String, bool), 1>(), std::any::type_name::<String>());
        assert_eq!(element::<(u8, String, bool), 2>(), "bool");
    }

    #[test]
    fn type_names() {
        assert!(<() as ArgumentList>::type_names().is_empty());
        assert_eq!(<(i32, f64) as ArgumentList>::type_names(), vec!["i32", "f64"]);
    }
}
