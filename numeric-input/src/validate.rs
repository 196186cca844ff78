//! Value validation.
//!
//! Runs on the full field text after every accepted change and produces a
//! [`Verdict`]. Total over its inputs: malformed text yields an INVALID
//! verdict, never an error.
//!
//! The validator does not consult the gatekeeper's grammar. Text set by the
//! host is read through its longest numeral prefix, so `"1e-5"` and `"12abc"`
//! are judged as 0.00001 and 12.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::shape::{leading_numeral, Numeral};
use crate::types::{NumericConfig, Validity, Verdict};

/// A single failed constraint, for hosts that want to say why a value is
/// INVALID.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Violation {
    /// The text does not start with a number.
    Malformed,
    /// The number is beyond the range of `f64`.
    Overflow,
    BelowMin { min: f64 },
    AboveMax { max: f64 },
    TooFewDecimals { min: usize, actual: usize },
    TooManyDecimals { max: usize, actual: usize },
    /// Integer-only field holding a fractional part.
    FractionNotAllowed,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Malformed => write!(f, "not a number"),
            Violation::Overflow => write!(f, "too large to represent"),
            Violation::BelowMin { min } => write!(f, "must be at least {}", min),
            Violation::AboveMax { max } => write!(f, "must be at most {}", max),
            Violation::TooFewDecimals { min, actual } => {
                write!(f, "needs at least {} decimals, has {}", min, actual)
            }
            Violation::TooManyDecimals { max, actual } => {
                write!(f, "allows at most {} decimals, has {}", max, actual)
            }
            Violation::FractionNotAllowed => write!(f, "must be a whole number"),
        }
    }
}

/// What the validator makes of a piece of text before any constraint runs.
enum Reading {
    /// Empty, or numeral symbols with no mantissa digit yet (`"-"`, `"."`).
    Incomplete,
    /// No numeral prefix and characters that can never start one.
    Malformed,
    /// A numeral prefix whose value does not fit in an `f64`.
    Overflow,
    Number(Numeral),
}

fn read(text: &str) -> Reading {
    match leading_numeral(text) {
        Some(numeral) if numeral.value.is_finite() => Reading::Number(numeral),
        Some(_) => Reading::Overflow,
        None if text.chars().all(is_numeral_char) => Reading::Incomplete,
        None => Reading::Malformed,
    }
}

fn is_numeral_char(c: char) -> bool {
    matches!(c, '0'..='9' | '-' | '+' | '.' | 'e' | 'E')
}

/// Validate the field's full text after a change.
///
/// - Empty text is pristine and valid.
/// - A numeral with no digits yet (`"-"`, `"."`) is treated like an empty
///   field.
/// - Otherwise the longest numeral prefix is checked against every active
///   constraint; bounds are inclusive. Anything after the prefix is ignored.
/// - Text with no numeral prefix, or one that overflows `f64`, is INVALID
///   and carries no value.
pub fn on_value_changed(new_text: &str, config: &NumericConfig) -> Verdict {
    let numeral = match read(new_text) {
        Reading::Incomplete => {
            trace!(text = new_text, "numeral has no digits yet");
            return Verdict::pristine();
        }
        Reading::Malformed | Reading::Overflow => {
            debug!(text = new_text, "text does not hold a representable number");
            return Verdict {
                value: None,
                pristine: false,
                valid: Validity::Invalid,
            };
        }
        Reading::Number(numeral) => numeral,
    };

    let violations = constraint_violations(&numeral, config);
    let verdict = Verdict::parsed(numeral.value, violations.is_empty());
    debug!(
        text = new_text,
        value = numeral.value,
        decimals = numeral.decimals,
        valid = verdict.is_valid(),
        "value validated"
    );
    verdict
}

/// Every constraint `text` fails. Empty when [`on_value_changed`] would report
/// VALID.
pub fn explain(text: &str, config: &NumericConfig) -> Vec<Violation> {
    match read(text) {
        Reading::Incomplete => Vec::new(),
        Reading::Malformed => vec![Violation::Malformed],
        Reading::Overflow => vec![Violation::Overflow],
        Reading::Number(numeral) => constraint_violations(&numeral, config),
    }
}

fn constraint_violations(numeral: &Numeral, config: &NumericConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    let value = numeral.value;
    let decimals = numeral.decimals;

    if let Some(min) = config.min {
        if value < min {
            violations.push(Violation::BelowMin { min });
        }
    }
    if let Some(max) = config.max {
        if value > max {
            violations.push(Violation::AboveMax { max });
        }
    }

    if config.accept_float {
        if decimals < config.min_decimals {
            violations.push(Violation::TooFewDecimals {
                min: config.min_decimals,
                actual: decimals,
            });
        }
        if let Some(max) = config.max_decimals {
            if decimals > max {
                violations.push(Violation::TooManyDecimals {
                    max,
                    actual: decimals,
                });
            }
        }
    } else if decimals != 0 {
        violations.push(Violation::FractionNotAllowed);
    }

    violations
}
