//! Prelude module for convenient imports.
//!
//! Provides a single `use tessera_validator::prelude::*;` import that brings
//! in the traits, result types, validator factories and combinators.
//!
//! # Examples
//!
//! ```
//! use tessera_validator::prelude::*;
//!
//! let username = string().not_empty().min_length(3).max_length(20).alphanumeric();
//! let age = int().between(18, 100);
//! let tags = list_of::<String>().min_count(1).max_count(10);
//!
//! assert!(username.validate("alice").is_valid());
//! assert!(age.validate(&30).is_valid());
//! assert!(!tags.validate(&Vec::new()).is_valid());
//! ```

// ============================================================================
// FOUNDATION: Core traits, results, options
// ============================================================================

pub use crate::foundation::{
    AnyInput, BuildError, CascadeMode, RuleBuilder, SharedValidator, Validate, ValidateExt,
    ValidationError, ValidationException, ValidationOptions, ValidationResult, codes,
};

// ============================================================================
// VALIDATORS: Factories and builder types
// ============================================================================

pub use crate::validators::{
    BoolValidator, CollectionValidator, CustomValidator, DateTimeValidator, EnumValidator,
    NumberValidator, ObjectValidator, StringValidator, Union2, UnionValidator, array_of, boolean,
    byte, collection_of, custom, datetime, decimal, double, enumerable_of, enumeration, float,
    int, list_of, long, number, object, short, string, union,
};

// ============================================================================
// COMBINATORS: Composition functions
// ============================================================================

pub use crate::combinators::{
    all, and, any, not, nullable, optional, or, transform, try_transform, unless, when,
    with_code, with_message, with_message_fn,
};
