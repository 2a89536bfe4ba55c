//! Built-in validators
//!
//! Every validator here is a rule list plus kind-specific state, built by
//! chaining methods that consume and return the builder. The shared grammar
//! (`must`, `rule`, `message`, `code`, `cascade`) comes from
//! [`RuleBuilder`](crate::foundation::RuleBuilder).
//!
//! # Categories
//!
//! - **Scalar**: [`string`], [`number`] and its width aliases, [`boolean`],
//!   [`datetime`], [`enumeration`]
//! - **Collection**: [`array_of`], [`list_of`], [`collection_of`],
//!   [`enumerable_of`]
//! - **Structural**: [`object`], [`union`]
//! - **Escape hatch**: [`custom`]
//!
//! # Examples
//!
//! ```
//! use tessera_validator::prelude::*;
//!
//! let username = string().not_empty().min_length(3).max_length(20).alphanumeric();
//! assert!(username.validate("alice42").is_valid());
//!
//! let age = int().between(18, 130);
//! assert!(!age.validate(&7).is_valid());
//!
//! let tags = list_of::<String>().max_count(10).for_each(string().lowercase());
//! assert!(tags.validate(&vec!["rust".to_owned()]).is_valid());
//! ```

pub mod boolean;
pub mod collection;
pub mod custom;
pub mod datetime;
pub mod enumeration;
pub mod numeric;
pub mod object;
pub mod string;
pub mod union;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use boolean::{BoolValidator, boolean};
pub use collection::{CollectionValidator, array_of, collection_of, enumerable_of, list_of};
pub use custom::{CustomValidator, custom};
pub use datetime::{DateTimeValidator, datetime};
pub use enumeration::{EnumValidator, EnumValue, enumeration};
pub use numeric::{
    Number, NumberValidator, byte, decimal, double, float, int, long, number, short,
};
pub use object::{ObjectValidator, object};
pub use string::{StringValidator, string};
pub use union::{Union2, UnionValidator, union};
