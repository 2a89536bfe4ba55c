//! OPTIONAL combinators - null handling
//!
//! [`Optional`] lets a null value through without running the inner
//! validator, so even `not_null` rules are skipped. [`Nullable`] adapts a
//! validator to `Option<T>` inputs, mapping `None` onto a null value.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationResult};

/// Treats a null value as valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optional<V> {
    pub(crate) inner: V,
}

impl<V> Optional<V> {
    /// Wraps `inner`.
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    /// Returns a reference to the inner validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Extracts the inner validator.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: Validate> Validate for Optional<V> {
    type Input = V::Input;

    fn check(&self, input: Option<&Self::Input>) -> ValidationResult {
        match input {
            None => ValidationResult::success(),
            Some(value) => self.inner.validate(value),
        }
    }
}

/// Creates an `Optional` combinator.
pub fn optional<V: Validate>(validator: V) -> Optional<V> {
    Optional::new(validator)
}

// ============================================================================
// NULLABLE
// ============================================================================

/// Validates `Option<T>` with a validator over `T`'s borrowed form.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// let nickname = string().not_null().min_length(2).nullable::<String>();
/// assert!(nickname.validate(&Some("neo".to_owned())).is_valid());
/// assert_eq!(
///     nickname.validate(&None).error_message(),
///     Some("value cannot be null")
/// );
/// ```
pub struct Nullable<V, T> {
    inner: V,
    _value: PhantomData<fn(&T)>,
}

impl<V, T> Nullable<V, T> {
    /// Wraps `inner`.
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            _value: PhantomData,
        }
    }

    /// Returns a reference to the inner validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Extracts the inner validator.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V, T> Validate for Nullable<V, T>
where
    V: Validate,
    T: Borrow<V::Input>,
{
    type Input = Option<T>;

    fn check(&self, input: Option<&Option<T>>) -> ValidationResult {
        let value = input
            .and_then(Option::as_ref)
            .map(<T as Borrow<V::Input>>::borrow);
        self.inner.validate_nullable(value)
    }
}

impl<V: Clone, T> Clone for Nullable<V, T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<V: fmt::Debug, T> fmt::Debug for Nullable<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nullable")
            .field("inner", &self.inner)
            .finish()
    }
}

/// Creates a `Nullable` combinator.
pub fn nullable<V, T>(validator: V) -> Nullable<V, T>
where
    V: Validate,
    T: Borrow<V::Input>,
{
    Nullable::new(validator)
}
