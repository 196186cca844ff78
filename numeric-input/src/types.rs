//! Core configuration and result types.
//!
//! `NumericConfig` is shared by the gatekeeper and the validator. It
//! serializes with the camelCase keys hosts already use (`acceptFloat`,
//! `minDecimals`, ...). `Verdict` and `Decision` are what the engine hands
//! back to the host.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{NumericInputError, Result};

/// Constraints for a single numeric field. Immutable per field instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NumericConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub accept_float: bool,
    #[serde(default)]
    pub min_decimals: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_decimals: Option<usize>,
    /// Text the field starts out holding. Sources may give it as a number.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "text_or_number"
    )]
    pub value: Option<String>,
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Integer(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }),
    )
}

impl NumericConfig {
    /// An unbounded, integer-only configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Permit decimal points and exponents.
    pub fn accepting_float(mut self) -> Self {
        self.accept_float = true;
        self
    }

    /// Set the inclusive decimal-digit range. Only meaningful with `accept_float`.
    pub fn with_decimals(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_decimals = min;
        self.max_decimals = max;
        self
    }

    /// Seed the field's current text.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Whether the bound configuration leaves room for negative values.
    ///
    /// Only a defined, non-negative `min` rules the sign out. A negative
    /// `max` alone never does.
    pub fn permits_negative(&self) -> bool {
        !matches!(self.min, Some(min) if min >= 0.0)
    }

    /// Parse a configuration from YAML.
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Parse a configuration from JSON.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Report contract violations in the configuration.
    ///
    /// The engine evaluates whatever it is given and never calls this; a
    /// misconfigured field just reports every value INVALID. Hosts that load
    /// configuration from files can use it to fail early.
    pub fn check(&self) -> Result<()> {
        for (name, bound) in [("min", self.min), ("max", self.max)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(NumericInputError::NonFiniteBound { name, value });
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(NumericInputError::InvertedBounds { min, max });
            }
        }
        if let Some(max) = self.max_decimals {
            if self.min_decimals > max {
                return Err(NumericInputError::InvertedDecimals {
                    min: self.min_decimals,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Outcome of the value check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Validity {
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        matches!(self, Validity::Valid)
    }
}

impl From<bool> for Validity {
    fn from(ok: bool) -> Self {
        if ok {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }
}

/// Result of validating the full field text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    /// Parsed value, `None` when the field holds no number yet.
    pub value: Option<f64>,
    /// True when the field is empty (or holds a numeral with no digits yet).
    pub pristine: bool,
    pub valid: Validity,
}

impl Verdict {
    /// The verdict for an untouched field: no value, always valid.
    pub fn pristine() -> Self {
        Self {
            value: None,
            pristine: true,
            valid: Validity::Valid,
        }
    }

    /// A verdict for a parsed value.
    pub fn parsed(value: f64, valid: impl Into<Validity>) -> Self {
        Self {
            value: Some(value),
            pristine: false,
            valid: valid.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid.is_valid()
    }
}

/// Gatekeeper answer for a keystroke or paste intent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}
