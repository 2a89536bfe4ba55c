//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation system:
//!
//! - **Traits**: [`Validate`], [`ValidateExt`], [`RuleBuilder`]
//! - **Results**: [`ValidationError`], [`ValidationResult`], [`ValidationException`]
//! - **Rules**: [`Rule`], [`RuleSet`]
//! - **Options**: [`ValidationOptions`], [`CascadeMode`]
//! - **Runtime dispatch**: [`AnyInput`], [`AnyValidator`]
//!
//! # Architecture
//!
//! ## 1. Nullable pipeline
//!
//! Validators see `Option<&Input>`. `None` models a null or absent value and
//! every rule decides what it means; most rules pass it so that nullability is
//! enforced in exactly one place (`not_null`).
//!
//! ## 2. Exhaustive results
//!
//! Every rule runs and every error is reported in registration order, unless
//! the validator opts into [`CascadeMode::Stop`].
//!
//! ## 3. Paths
//!
//! Object and collection validators rewrite the paths of nested errors
//! (`Address.Street`, `Tags.[1]`) so a report locates each error in the
//! original structure.
//!
//! ```
//! use tessera_validator::foundation::ValidationError;
//!
//! let error = ValidationError::new("must be at least 3 characters long")
//!     .with_code("min_length")
//!     .with_path("[1]")
//!     .nested_under("Tags");
//!
//! assert_eq!(error.to_string(), "[Tags.[1]] min_length: must be at least 3 characters long");
//! ```
//!
//! ## 4. Fault isolation
//!
//! User closures run behind a panic guard. A fault becomes a `custom_fault`
//! error rather than unwinding out of `validate`.

mod any;
mod config;
mod error;
pub(crate) mod guard;
mod result;
mod rule;
mod traits;

pub use any::{AnyInput, AnyValidator, Typed};
pub use config::{CascadeMode, ValidationOptions};
pub use error::{BuildError, ValidationError, codes};
pub use result::{ValidationException, ValidationResult};
pub use rule::{Rule, RuleBuilder, RuleSet};
pub(crate) use rule::apply_overrides;
pub use traits::{BoxedValidator, SharedValidator, Validate, ValidateExt};
