//! Run-time type tags for collection elements.
//!
//! A collection may carry a type constraint: a tag that every newly inserted
//! element has to report. The check is a plain comparison of discriminants,
//! so elements only need to tell which tag they carry.

use std::any::type_name;
use std::collections::VecDeque;
use std::fmt;

use serde_json::Value;

/// An element that can report a small run-time discriminant describing its shape.
pub trait Typed {
    type Tag: Copy + Eq + fmt::Debug;

    fn type_tag(&self) -> Self::Tag;
}

/// The shape of a JSON value.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Typed for Value {
    type Tag = ValueKind;

    fn type_tag(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

/// Tag of a statically typed element: the name of its Rust type.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeName(pub &'static str);

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

macro_rules! impl_typed_by_name {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Typed for $ty {
                type Tag = TypeName;

                #[inline]
                fn type_tag(&self) -> TypeName {
                    TypeName(stringify!($ty))
                }
            }
        )*
    };
}

impl_typed_by_name! {
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str,
}

/// Container and tuple elements are tagged with their full type name, so a
/// constraint never distinguishes between values of the same type.
macro_rules! impl_typed_by_type_name {
    ($(impl<$($param:ident),*> for $ty:ty;)*) => {
        $(
            impl<$($param),*> Typed for $ty {
                type Tag = TypeName;

                #[inline]
                fn type_tag(&self) -> TypeName {
                    TypeName(type_name::<Self>())
                }
            }
        )*
    };
}

impl_typed_by_type_name! {
    impl<> for ();
    impl<T> for Vec<T>;
    impl<T> for VecDeque<T>;
    impl<T> for Option<T>;
    impl<A, B> for (A, B);
    impl<A, B, C> for (A, B, C);
    impl<A, B, C, D> for (A, B, C, D);
}

impl<T: ?Sized> Typed for Box<T> {
    type Tag = TypeName;

    #[inline]
    fn type_tag(&self) -> TypeName {
        TypeName(type_name::<Self>())
    }
}

impl<T, const N: usize> Typed for [T; N] {
    type Tag = TypeName;

    #[inline]
    fn type_tag(&self) -> TypeName {
        TypeName(type_name::<Self>())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_values_report_their_kind() {
        assert_eq!(json!(null).type_tag(), ValueKind::Null);
        assert_eq!(json!(true).type_tag(), ValueKind::Bool);
        assert_eq!(json!(1.5).type_tag(), ValueKind::Number);
        assert_eq!(json!("x").type_tag(), ValueKind::String);
        assert_eq!(json!([1, 2]).type_tag(), ValueKind::Array);
        assert_eq!(json!({"a": 1}).type_tag(), ValueKind::Object);
    }

    #[test]
    fn containers_report_their_type_name() {
        assert_eq!(vec![1u8].type_tag(), Vec::<u8>::new().type_tag());
        assert_ne!(vec![1u8].type_tag(), vec![1u16].type_tag());
        assert_eq!(Some((1, 'a')).type_tag(), None::<(i32, char)>.type_tag());
        let boxed: Box<str> = "x".into();
        assert_eq!(boxed.type_tag(), TypeName(type_name::<Box<str>>()));
    }

    #[test]
    fn scalars_report_their_type_name() {
        assert_eq!(5u32.type_tag(), TypeName("u32"));
        assert_eq!(String::from("a").type_tag().to_string(), "String");
    }
}
