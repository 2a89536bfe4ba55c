//! Validator combinators
//!
//! Generic adapters that wrap validators to add behavior without changing
//! them. Most are also reachable as methods on
//! [`ValidateExt`](crate::foundation::ValidateExt).
//!
//! # Logical
//!
//! - [`And`] / [`All`]: every validator runs, errors are combined
//! - [`Or`] / [`AnyOf`]: first success wins, otherwise errors are combined
//! - [`Not`]: inverts a validator
//!
//! # Conditional
//!
//! - [`When`]: runs a second validator if (or unless) a condition holds
//!
//! # Shaping
//!
//! - [`WithMessage`], [`WithMessageFn`], [`WithCode`]: rewrite errors
//! - [`Transform`], [`TryTransform`]: validate a derived value
//! - [`Optional`], [`Nullable`]: null handling

pub mod and;
pub mod message;
pub mod not;
pub mod optional;
pub mod or;
pub mod transform;
pub mod when;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use and::{All, And, all, and};
pub use message::{WithCode, WithMessage, WithMessageFn, with_code, with_message, with_message_fn};
pub use not::{Not, not};
pub use optional::{Nullable, Optional, nullable, optional};
pub use or::{AnyOf, Or, any, or};
pub use transform::{Transform, TryTransform, transform, try_transform};
pub use when::{When, unless, when};
