//! Macros for extending the validator with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`validator!`] — Create a single-rule validator (struct + `Validate` impl + factory fn)
//! - [`any_input!`] — Make a type usable as a union candidate input
//!
//! # Examples
//!
//! ```
//! use tessera_validator::validator;
//! use tessera_validator::foundation::{Validate, ValidationError};
//!
//! validator! {
//!     pub Even for i64;
//!     rule(input) { input % 2 == 0 }
//!     error(input) { ValidationError::new(format!("{input} is not even")).with_code("even") }
//!     fn even();
//! }
//!
//! assert!(even().validate(&4).is_valid());
//! assert_eq!(even().validate(&3).error_message(), Some("3 is not even"));
//! ```

// ============================================================================
// VALIDATOR MACRO
// ============================================================================

/// Creates a single-rule validator: struct definition, `Validate`
/// implementation, constructor, and factory function.
///
/// The rule only sees present values; a null input passes, as with the
/// built-in rules.
///
/// # Variants
///
/// **Unit validator** (zero-sized, no fields):
/// ```
/// # use tessera_validator::validator;
/// # use tessera_validator::foundation::ValidationError;
/// validator! {
///     pub Trimmed for str;
///     rule(input) { input.trim() == input }
///     error(input) { ValidationError::new("must not have surrounding whitespace") }
///     fn trimmed();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```
/// # use tessera_validator::validator;
/// # use tessera_validator::foundation::ValidationError;
/// validator! {
///     pub MaxBytes { max: usize } for str;
///     rule(self, input) { input.len() <= self.max }
///     error(self, input) {
///         ValidationError::new(format!("must be at most {} bytes", self.max))
///             .with_param("max", self.max.to_string())
///     }
///     fn max_bytes(max: usize);
/// }
/// ```
#[macro_export]
macro_rules! validator {
    // ── Unit validator + factory fn ──────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn check(&self, input: Option<&Self::Input>) -> $crate::foundation::ValidationResult {
                match input {
                    Some($inp) if !$rule => {
                        let $einp = $inp;
                        $crate::foundation::ValidationResult::from_error($err)
                    }
                    _ => $crate::foundation::ValidationResult::success(),
                }
            }
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Struct with fields + auto new + factory fn ───────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn check(&$self_, input: Option<&Self::Input>) -> $crate::foundation::ValidationResult {
                match input {
                    Some($inp) if !$rule => {
                        let $einp = $inp;
                        $crate::foundation::ValidationResult::from_error($err)
                    }
                    _ => $crate::foundation::ValidationResult::success(),
                }
            }
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };
}

// ============================================================================
// ANY INPUT MACRO
// ============================================================================

/// Implements [`AnyInput`](crate::foundation::AnyInput) by plain downcasting.
///
/// The reported type name defaults to the type as written; give an explicit
/// one with `Type => "name"`.
///
/// ```
/// use tessera_validator::any_input;
/// use tessera_validator::foundation::AnyInput;
///
/// struct Celsius(f64);
/// struct Kelvin(f64);
///
/// any_input!(Celsius, Kelvin => "kelvin");
///
/// assert_eq!(Celsius::type_name(), "Celsius");
/// assert_eq!(Kelvin::type_name(), "kelvin");
/// ```
#[macro_export]
macro_rules! any_input {
    (@name $ty:ty, $name:expr) => { $name };
    (@name $ty:ty) => { stringify!($ty) };
    ($($ty:ty $(=> $name:expr)?),+ $(,)?) => {
        $(
            impl $crate::foundation::AnyInput for $ty {
                fn type_name() -> ::std::borrow::Cow<'static, str> {
                    ::std::borrow::Cow::Borrowed($crate::any_input!(@name $ty $(, $name)?))
                }

                fn from_any(value: &dyn ::std::any::Any) -> ::std::option::Option<&Self> {
                    value.downcast_ref::<Self>()
                }
            }
        )+
    };
}
