//! Numeric text field validation
//!
//! `numeric-input` decides, for a text field that should hold a number, which
//! edits may happen and whether the resulting text is an acceptable value. It
//! knows nothing about rendering. Hosts forward raw events and act on the
//! answers.
//!
//! # Architecture
//!
//! - **Gatekeeper** ([`gate`]): allow/deny for keystroke and paste intents,
//!   judged on the shape of the text the edit would produce
//! - **Validator** ([`validate`]): parses the full text after each change and
//!   returns a [`Verdict`]
//! - **Shape** ([`shape`]): the gatekeeper's grammar and the numeral scanner
//!   the validator reads values with
//! - **Pure**: no I/O, no state between calls; [`NumericField`] is an optional
//!   stateful host built on the pure entry points
//!
//! ```rust
//! use numeric_input::{on_key_intent, on_value_changed, Decision, NumericConfig, Validity};
//!
//! let config = NumericConfig::new().with_min(5.0);
//! assert_eq!(on_key_intent('-', "", &config), Decision::Deny);
//!
//! let verdict = on_value_changed("4", &config);
//! assert_eq!(verdict.value, Some(4.0));
//! assert_eq!(verdict.valid, Validity::Invalid);
//! ```

pub mod error;
pub mod field;
pub mod gate;
pub mod shape;
pub mod types;
pub mod validate;

pub use error::{NumericInputError, Result};
pub use field::NumericField;
pub use gate::{allow_edit, apply_edit, on_key_intent, on_paste_intent};
pub use types::{Decision, NumericConfig, Validity, Verdict};
pub use validate::{explain, on_value_changed, Violation};
