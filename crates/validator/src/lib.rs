//! # tessera-validator
//!
//! A composable validation engine. Validators are built from small reusable
//! rules, chained, nested and combined conditionally, and produce a
//! structured report of path-annotated errors.
//!
//! ## Quick Start
//!
//! ```
//! use tessera_validator::prelude::*;
//!
//! struct Signup {
//!     name: String,
//!     age: i32,
//!     tags: Vec<String>,
//! }
//!
//! let signup = object::<Signup>()
//!     .rule_for("Name", |s| s.name.as_str(), string().not_empty().max_length(40))
//!     .rule_for("Age", |s| &s.age, int().between(13, 130))
//!     .rule_for(
//!         "Tags",
//!         |s| s.tags.as_slice(),
//!         array_of::<String>().for_each(string().min_length(3)),
//!     );
//!
//! let result = signup.validate(&Signup {
//!     name: String::new(),
//!     age: 7,
//!     tags: vec!["rust".into(), "ok".into()],
//! });
//!
//! let paths: Vec<_> = result.errors().iter().map(|e| e.property_path()).collect();
//! assert_eq!(paths, [Some("Name"), Some("Age"), Some("Tags.[1]")]);
//! ```
//!
//! ## Creating Validators
//!
//! Start from a factory in [`validators`] and chain rules, wrap any
//! validator with the adapters in [`combinators`], or implement
//! [`Validate`](foundation::Validate) directly. The [`validator!`] macro
//! covers single-rule validators.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! Pipeline runs are traced at `TRACE`, union rejections and
//! `validate_and_throw` failures at `DEBUG`, and faults in user-supplied
//! functions at `WARN`.

// Nested combinators (And<Or<Not<...>, ...>, ...>) produce long types.
#![allow(clippy::type_complexity)]

mod macros;

pub mod combinators;
pub mod foundation;
pub mod prelude;
pub mod validators;
