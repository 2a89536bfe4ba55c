//! TRANSFORM combinator - validate a derived value
//!
//! [`Transform`] converts the input and validates the converted value with
//! an inner validator. [`TryTransform`] does the same with a fallible
//! conversion. A conversion that returns `Err` or panics is reported as a
//! `transform_failed` error instead of escaping.
//!
//! A null input is not converted; the inner validator receives null.
//!
//! # Examples
//!
//! ```
//! use tessera_validator::prelude::*;
//!
//! let port = try_transform(|s: &str| s.parse::<u16>(), number::<u16>().greater_than(1023));
//! assert!(port.validate("8080").is_valid());
//! assert_eq!(port.validate("80").error_message(), Some("must be greater than 1023"));
//! assert_eq!(
//!     port.validate("http").error_message(),
//!     Some("transformation failed: invalid digit found in string")
//! );
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;

use crate::foundation::guard::guarded;
use crate::foundation::{Validate, ValidationError, ValidationResult, codes};

fn transform_failed(detail: impl fmt::Display) -> ValidationResult {
    ValidationError::new(format!("transformation failed: {detail}"))
        .with_code(codes::TRANSFORM_FAILED)
        .into()
}

// ============================================================================
// TRANSFORM
// ============================================================================

/// Validates `convert(input)` with an inner validator.
///
/// # Type Parameters
///
/// * `F` - The conversion (`Fn(&S) -> O`)
/// * `V` - The validator for the converted value
/// * `S` - The source input type
/// * `O` - The converted type, borrowable as `V::Input`
pub struct Transform<F, V, S: ?Sized, O> {
    convert: F,
    inner: V,
    _types: PhantomData<fn(&S) -> O>,
}

impl<F, V, S: ?Sized, O> Transform<F, V, S, O> {
    /// Creates a new `Transform` combinator.
    pub fn new(convert: F, inner: V) -> Self {
        Self {
            convert,
            inner,
            _types: PhantomData,
        }
    }

    /// Returns a reference to the inner validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<F, V, S, O> Validate for Transform<F, V, S, O>
where
    F: Fn(&S) -> O,
    V: Validate,
    S: ?Sized,
    O: Borrow<V::Input>,
{
    type Input = S;

    fn check(&self, input: Option<&S>) -> ValidationResult {
        let Some(value) = input else {
            return self.inner.validate_nullable(None);
        };
        match guarded(|| (self.convert)(value)) {
            Ok(converted) => self.inner.validate(converted.borrow()),
            Err(fault) => {
                tracing::warn!(fault = %fault, "transform faulted during validation");
                transform_failed(fault)
            }
        }
    }
}

impl<F: Clone, V: Clone, S: ?Sized, O> Clone for Transform<F, V, S, O> {
    fn clone(&self) -> Self {
        Self::new(self.convert.clone(), self.inner.clone())
    }
}

impl<F, V: fmt::Debug, S: ?Sized, O> fmt::Debug for Transform<F, V, S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Creates a `Transform` combinator.
pub fn transform<F, V, S, O>(convert: F, inner: V) -> Transform<F, V, S, O>
where
    F: Fn(&S) -> O,
    V: Validate,
    S: ?Sized,
    O: Borrow<V::Input>,
{
    Transform::new(convert, inner)
}

// ============================================================================
// TRY TRANSFORM
// ============================================================================

/// Validates the value produced by a fallible conversion.
///
/// An `Err` from the conversion becomes a `transform_failed` error carrying
/// the error's text.
pub struct TryTransform<F, V, S: ?Sized, O, E> {
    convert: F,
    inner: V,
    _types: PhantomData<fn(&S) -> Result<O, E>>,
}

impl<F, V, S: ?Sized, O, E> TryTransform<F, V, S, O, E> {
    /// Creates a new `TryTransform` combinator.
    pub fn new(convert: F, inner: V) -> Self {
        Self {
            convert,
            inner,
            _types: PhantomData,
        }
    }

    /// Returns a reference to the inner validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<F, V, S, O, E> Validate for TryTransform<F, V, S, O, E>
where
    F: Fn(&S) -> Result<O, E>,
    V: Validate,
    S: ?Sized,
    O: Borrow<V::Input>,
    E: fmt::Display,
{
    type Input = S;

    fn check(&self, input: Option<&S>) -> ValidationResult {
        let Some(value) = input else {
            return self.inner.validate_nullable(None);
        };
        match guarded(|| (self.convert)(value)) {
            Ok(Ok(converted)) => self.inner.validate(converted.borrow()),
            Ok(Err(error)) => transform_failed(error),
            Err(fault) => {
                tracing::warn!(fault = %fault, "transform faulted during validation");
                transform_failed(fault)
            }
        }
    }
}

impl<F: Clone, V: Clone, S: ?Sized, O, E> Clone for TryTransform<F, V, S, O, E> {
    fn clone(&self) -> Self {
        Self::new(self.convert.clone(), self.inner.clone())
    }
}

impl<F, V: fmt::Debug, S: ?Sized, O, E> fmt::Debug for TryTransform<F, V, S, O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryTransform")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Creates a `TryTransform` combinator.
pub fn try_transform<F, V, S, O, E>(convert: F, inner: V) -> TryTransform<F, V, S, O, E>
where
    F: Fn(&S) -> Result<O, E>,
    V: Validate,
    S: ?Sized,
    O: Borrow<V::Input>,
    E: fmt::Display,
{
    TryTransform::new(convert, inner)
}
