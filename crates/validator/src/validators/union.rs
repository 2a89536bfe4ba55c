//! Union validator
//!
//! Accepts a value if any candidate validator accepts it. Values arrive as
//! `&dyn Any`; each candidate knows its own input type through
//! [`AnyInput`] and reports a mismatch instead of validating a value of the
//! wrong type.
//!
//! Candidates are tried in order and the first success wins. When every
//! candidate rejects the value, a single `union_mismatch` error lists each
//! tried type and why it was rejected.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::foundation::guard::guarded;
use crate::foundation::{
    AnyInput, AnyValidator, BuildError, Typed, Validate, ValidationError, ValidationResult, codes,
};

fn rejection_reason(result: &ValidationResult) -> String {
    result
        .errors()
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs candidates in order, returning success at the first acceptance.
fn resolve<'c, C>(
    candidates: impl IntoIterator<Item = &'c C>,
    input: Option<&dyn Any>,
) -> ValidationResult
where
    C: AnyValidator + ?Sized + 'c,
{
    let mut rejections: Vec<(Cow<'static, str>, String)> = Vec::new();

    for candidate in candidates {
        let accepted = candidate.accepted_type();
        let reason = match guarded(|| candidate.validate_any(input)) {
            Ok(Some(result)) if result.is_valid() => return ValidationResult::success(),
            Ok(Some(result)) => rejection_reason(&result),
            Ok(None) => format!("type mismatch: expected {accepted}"),
            Err(fault) => {
                tracing::warn!(candidate = %accepted, fault = %fault, "union candidate faulted");
                format!("custom validation failed: {fault}")
            }
        };
        tracing::debug!(candidate = %accepted, reason = %reason, "union candidate rejected value");
        rejections.push((accepted, reason));
    }

    let summary = rejections
        .iter()
        .map(|(accepted, reason)| format!("{accepted} ({reason})"))
        .collect::<Vec<_>>()
        .join("; ");
    let types = rejections
        .iter()
        .map(|(accepted, _)| accepted.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    let context = serde_json::Value::Array(
        rejections
            .iter()
            .map(|(accepted, reason)| serde_json::json!({ "type": accepted, "reason": reason }))
            .collect(),
    );

    ValidationError::new(format!("value did not match any allowed type: {summary}"))
        .with_code(codes::UNION_MISMATCH)
        .with_param("types", types)
        .with_context(context)
        .into()
}

// ============================================================================
// UNION VALIDATOR
// ============================================================================

/// Validates a value against an ordered list of typed candidates.
///
/// # Examples
///
/// ```
/// use tessera_validator::prelude::*;
///
/// let id = union(string().guid()).or(int().positive());
///
/// assert!(id.validate(&42_i32).is_valid());
/// assert!(id.validate(&String::from("67e55044-10b1-426f-9247-bb680e5fe0c8")).is_valid());
///
/// let result = id.validate(&1.5_f64);
/// let message = result.error_message().unwrap();
/// assert!(message.contains("str"));
/// assert!(message.contains("i32"));
/// ```
#[derive(Clone)]
pub struct UnionValidator {
    candidates: Vec<Arc<dyn AnyValidator>>,
}

impl UnionValidator {
    /// A union with a single candidate.
    pub fn new<V>(first: V) -> Self
    where
        V: Validate + Send + Sync + 'static,
        V::Input: AnyInput,
    {
        Self {
            candidates: vec![Arc::new(Typed::new(first))],
        }
    }

    /// A union over pre-erased candidates.
    ///
    /// Fails with [`BuildError::EmptyUnion`] when `candidates` is empty.
    pub fn try_from_candidates(
        candidates: Vec<Arc<dyn AnyValidator>>,
    ) -> Result<Self, BuildError> {
        if candidates.is_empty() {
            return Err(BuildError::EmptyUnion);
        }
        Ok(Self { candidates })
    }

    /// Appends a candidate.
    pub fn or<V>(mut self, candidate: V) -> Self
    where
        V: Validate + Send + Sync + 'static,
        V::Input: AnyInput,
    {
        self.candidates.push(Arc::new(Typed::new(candidate)));
        self
    }

    /// Returns a new union with one more candidate, leaving `self` as it is.
    #[must_use]
    pub fn extended<V>(&self, candidate: V) -> Self
    where
        V: Validate + Send + Sync + 'static,
        V::Input: AnyInput,
    {
        self.clone().or(candidate)
    }

    /// Accepted type names in candidate order.
    pub fn candidate_types(&self) -> Vec<Cow<'static, str>> {
        self.candidates
            .iter()
            .map(|candidate| candidate.accepted_type())
            .collect()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always `false`; a union has at least one candidate.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl Validate for UnionValidator {
    type Input = dyn Any;

    fn check(&self, input: Option<&dyn Any>) -> ValidationResult {
        resolve(self.candidates.iter().map(|c| &**c), input)
    }
}

impl fmt::Debug for UnionValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionValidator")
            .field("candidates", &self.candidate_types())
            .finish()
    }
}

/// Creates a [`UnionValidator`] starting with `first`.
pub fn union<V>(first: V) -> UnionValidator
where
    V: Validate + Send + Sync + 'static,
    V::Input: AnyInput,
{
    UnionValidator::new(first)
}

// ============================================================================
// UNION2
// ============================================================================

/// A two-candidate union whose candidate types are known statically.
#[derive(Clone)]
pub struct Union2<A, B> {
    first: Typed<A>,
    second: Typed<B>,
}

impl<A, B> Union2<A, B> {
    /// Creates the union.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first: Typed::new(first),
            second: Typed::new(second),
        }
    }

    /// Returns the first candidate.
    pub fn first(&self) -> &A {
        self.first.inner()
    }

    /// Returns the second candidate.
    pub fn second(&self) -> &B {
        self.second.inner()
    }
}

impl<A, B> Validate for Union2<A, B>
where
    A: Validate + Send + Sync,
    A::Input: AnyInput,
    B: Validate + Send + Sync,
    B::Input: AnyInput,
{
    type Input = dyn Any;

    fn check(&self, input: Option<&dyn Any>) -> ValidationResult {
        let candidates: [&dyn AnyValidator; 2] = [&self.first, &self.second];
        resolve(candidates, input)
    }
}

impl<A, B> fmt::Debug for Union2<A, B>
where
    A: Validate,
    A::Input: AnyInput,
    B: Validate,
    B::Input: AnyInput,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Union2")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}
