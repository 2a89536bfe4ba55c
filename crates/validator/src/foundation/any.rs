//! Runtime type dispatch
//!
//! Union validators receive values as `&dyn Any` and must find out which of
//! their candidates can handle them. [`AnyInput`] tells a validator how to
//! recognize its input type behind `dyn Any`; [`AnyValidator`] is the
//! object-safe view of a validator that performs that check itself.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use super::result::ValidationResult;
use super::traits::Validate;

// ============================================================================
// ANY INPUT
// ============================================================================

/// A validator input type that can be recovered from `&dyn Any`.
///
/// Implement it for your own types with [`any_input!`](crate::any_input).
///
/// ```
/// use std::any::Any;
/// use tessera_validator::foundation::AnyInput;
///
/// let owned = String::from("hello");
/// let value: &dyn Any = &owned;
/// assert_eq!(<str as AnyInput>::from_any(value), Some("hello"));
/// assert_eq!(<str as AnyInput>::type_name(), "str");
/// ```
pub trait AnyInput: 'static {
    /// Human-readable type name used in union reports.
    fn type_name() -> Cow<'static, str>;

    /// Downcasts an erased value, or returns `None` on a type mismatch.
    fn from_any(value: &dyn Any) -> Option<&Self>;
}

crate::any_input! {
    bool => "bool",
    char => "char",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    f32 => "f32",
    f64 => "f64",
    String => "String",
    rust_decimal::Decimal => "Decimal",
    chrono::DateTime<chrono::Utc> => "DateTime<Utc>",
    chrono::NaiveDate => "NaiveDate",
    serde_json::Value => "JSON value",
}

impl AnyInput for str {
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("str")
    }

    fn from_any(value: &dyn Any) -> Option<&Self> {
        if let Some(s) = value.downcast_ref::<String>() {
            Some(s.as_str())
        } else if let Some(s) = value.downcast_ref::<&'static str>() {
            Some(*s)
        } else if let Some(s) = value.downcast_ref::<Box<str>>() {
            Some(&**s)
        } else {
            value.downcast_ref::<Cow<'static, str>>().map(|s| &**s)
        }
    }
}

impl<T: AnyInput> AnyInput for [T] {
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("[{}]", T::type_name()))
    }

    fn from_any(value: &dyn Any) -> Option<&Self> {
        if let Some(v) = value.downcast_ref::<Vec<T>>() {
            Some(v.as_slice())
        } else {
            value.downcast_ref::<Box<[T]>>().map(|b| &**b)
        }
    }
}

impl<T: AnyInput> AnyInput for Vec<T> {
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("Vec<{}>", T::type_name()))
    }

    fn from_any(value: &dyn Any) -> Option<&Self> {
        value.downcast_ref::<Self>()
    }
}

// ============================================================================
// ANY VALIDATOR
// ============================================================================

/// An object-safe validator over erased values.
pub trait AnyValidator: Send + Sync {
    /// Name of the type this validator accepts.
    fn accepted_type(&self) -> Cow<'static, str>;

    /// Validates `value`, or returns `None` when it is not of the accepted
    /// type. A null value is always accepted.
    fn validate_any(&self, value: Option<&dyn Any>) -> Option<ValidationResult>;
}

/// Adapts a typed validator to [`AnyValidator`].
#[derive(Clone)]
pub struct Typed<V> {
    inner: V,
}

impl<V> Typed<V> {
    /// Wraps `inner`.
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    /// Returns a reference to the inner validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V> AnyValidator for Typed<V>
where
    V: Validate + Send + Sync,
    V::Input: AnyInput,
{
    fn accepted_type(&self) -> Cow<'static, str> {
        <V::Input as AnyInput>::type_name()
    }

    fn validate_any(&self, value: Option<&dyn Any>) -> Option<ValidationResult> {
        match value {
            None => Some(self.inner.validate_nullable(None)),
            Some(value) => {
                <V::Input as AnyInput>::from_any(value).map(|input| self.inner.validate(input))
            }
        }
    }
}

impl<V> fmt::Debug for Typed<V>
where
    V: Validate,
    V::Input: AnyInput,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("accepts", &<V::Input as AnyInput>::type_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
    }

    crate::any_input!(Point);

    #[test]
    fn str_accepts_owned_and_borrowed() {
        let owned = String::from("a");
        let borrowed: &'static str = "b";
        let boxed: Box<str> = "c".into();

        assert_eq!(<str as AnyInput>::from_any(&owned), Some("a"));
        assert_eq!(<str as AnyInput>::from_any(&borrowed), Some("b"));
        assert_eq!(<str as AnyInput>::from_any(&boxed), Some("c"));
        assert_eq!(<str as AnyInput>::from_any(&5_i32), None);
    }

    #[test]
    fn numbers_do_not_coerce() {
        assert_eq!(i32::from_any(&5_i32), Some(&5));
        assert_eq!(i32::from_any(&5_i64), None);
        assert_eq!(f64::from_any(&5_i32), None);
    }

    #[test]
    fn slices_accept_vectors() {
        let values = vec![1_u8, 2, 3];
        assert_eq!(<[u8] as AnyInput>::from_any(&values), Some(&[1_u8, 2, 3][..]));
        assert_eq!(<[u8] as AnyInput>::type_name(), "[u8]");
    }

    #[test]
    fn custom_types_via_macro() {
        let point = Point { x: 1 };
        assert_eq!(Point::from_any(&point), Some(&Point { x: 1 }));
        assert_eq!(Point::type_name(), "Point");
    }
}
