//! Validation options
//!
//! Options are plain serde values so a host application can load them from
//! whatever configuration format it already uses.

use serde::{Deserialize, Serialize};

/// Whether a rule list keeps running after the first failing rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeMode {
    /// Run every rule and report every error.
    #[default]
    Continue,
    /// Stop at the first failing rule.
    Stop,
}

impl CascadeMode {
    /// `true` for [`CascadeMode::Stop`].
    pub const fn stops_on_failure(self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Options applied to a validator's rule list.
///
/// ```
/// use tessera_validator::foundation::{CascadeMode, ValidationOptions};
///
/// let options = ValidationOptions::from_json_str(r#"{ "cascade": "stop" }"#).unwrap();
/// assert_eq!(options.cascade, CascadeMode::Stop);
/// assert_eq!(options.element_cascade, CascadeMode::Continue);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Cascade mode for the validator's own rules.
    pub cascade: CascadeMode,
    /// Cascade mode used by `for_each` across collection elements.
    pub element_cascade: CascadeMode,
}

impl ValidationOptions {
    /// Options with every mode set to [`CascadeMode::Continue`].
    pub const fn new() -> Self {
        Self {
            cascade: CascadeMode::Continue,
            element_cascade: CascadeMode::Continue,
        }
    }

    /// Options that stop at the first failure everywhere.
    pub const fn fail_fast() -> Self {
        Self {
            cascade: CascadeMode::Stop,
            element_cascade: CascadeMode::Stop,
        }
    }

    /// Sets the rule cascade mode.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_cascade(mut self, cascade: CascadeMode) -> Self {
        self.cascade = cascade;
        self
    }

    /// Sets the element cascade mode.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_element_cascade(mut self, cascade: CascadeMode) -> Self {
        self.element_cascade = cascade;
        self
    }

    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
