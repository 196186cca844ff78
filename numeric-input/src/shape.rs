//! The numeric shape grammar and numeral scanning.
//!
//! A field's text is *shaped* like a number when it matches
//!
//! ```text
//! sign? digit* ( "." digit* )? ( [eE] "+"? digit* )?
//! ```
//!
//! where the sign is present only when the configuration permits negatives and
//! the fractional and exponent parts only when it accepts floats. Every part is
//! optional so that numbers still being typed (`"-"`, `"1."`, `"1e"`) match.
//! Digits are ASCII only.
//!
//! [`leading_numeral`] is looser: it also reads a `-` exponent sign, since the
//! validator judges text the host set without passing the gate.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::NumericConfig;

static UNSIGNED_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*$").expect("integer grammar compiles"));
static SIGNED_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]*$").expect("integer grammar compiles"));
static UNSIGNED_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]*(?:\.[0-9]*)?(?:[eE]\+?[0-9]*)?$").expect("float grammar compiles")
});
static SIGNED_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[0-9]*(?:\.[0-9]*)?(?:[eE]\+?[0-9]*)?$").expect("float grammar compiles")
});

/// The grammar the gatekeeper matches proposed text against.
pub fn grammar(config: &NumericConfig) -> &'static Regex {
    match (config.accept_float, config.permits_negative()) {
        (false, false) => &*UNSIGNED_INTEGER,
        (false, true) => &*SIGNED_INTEGER,
        (true, false) => &*UNSIGNED_FLOAT,
        (true, true) => &*SIGNED_FLOAT,
    }
}

/// Whether `text` is a complete or in-progress number under `config`.
pub fn is_numeric_shape(text: &str, config: &NumericConfig) -> bool {
    grammar(config).is_match(text)
}

/// The longest valid numeral at the start of some text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeral {
    pub value: f64,
    /// Digits after the decimal point, up to any exponent marker.
    pub decimals: usize,
    /// Whether an exponent took part in `value`.
    pub has_exponent: bool,
}

/// Scan the longest numeral prefix of `text`.
///
/// An in-progress tail is dropped rather than rejected: `"1."` and `"1e+"`
/// both scan as `1`, `".5"` as `0.5`. Returns `None` when the mantissa has no
/// digits at all (`"-"`, `"."`, `"e5"`).
pub fn leading_numeral(text: &str) -> Option<Numeral> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    let negative = bytes.first() == Some(&b'-');
    if negative {
        pos += 1;
    }

    let int_start = pos;
    pos += count_digits(&bytes[pos..]);
    let int_digits = &text[int_start..pos];

    let mut frac_digits = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let frac_len = count_digits(&bytes[frac_start..]);
        frac_digits = &text[frac_start..frac_start + frac_len];
        pos = frac_start + frac_len;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent = None;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        let exp_sign = match bytes.get(exp_pos) {
            Some(b'+') => Some('+'),
            Some(b'-') => Some('-'),
            _ => None,
        };
        if exp_sign.is_some() {
            exp_pos += 1;
        }
        let exp_len = count_digits(&bytes[exp_pos..]);
        if exp_len > 0 {
            exponent = Some((exp_sign, &text[exp_pos..exp_pos + exp_len]));
        }
    }

    let mut literal = String::with_capacity(text.len() + 1);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(frac_digits);
    }
    if let Some((sign, digits)) = exponent {
        literal.push('e');
        if let Some(sign) = sign {
            literal.push(sign);
        }
        literal.push_str(digits);
    }

    let value = literal.parse::<f64>().ok()?;
    Some(Numeral {
        value,
        decimals: frac_digits.len(),
        has_exponent: exponent.is_some(),
    })
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn float() -> NumericConfig {
        NumericConfig::new().accepting_float()
    }

    #[rstest]
    #[case("", true)]
    #[case("12", true)]
    #[case("-12", true)]
    #[case("-", true)]
    #[case("1.", false)]
    #[case("1e3", false)]
    #[case("1-", false)]
    #[case("١٢", false)]
    fn integer_grammar(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_numeric_shape(text, &NumericConfig::new()), expected);
    }

    #[rstest]
    #[case("1.25", true)]
    #[case(".5", true)]
    #[case("1.", true)]
    #[case("1e", true)]
    #[case("1E+", true)]
    #[case("1.5e+10", true)]
    #[case("e", true)]
    #[case("1e-5", false)]
    #[case("1..2", false)]
    #[case("1e5.2", false)]
    #[case("e123e123", false)]
    #[case("+1", false)]
    #[case("1e++2", false)]
    #[case("1 ", false)]
    fn float_grammar(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_numeric_shape(text, &float()), expected);
    }

    #[test]
    fn sign_follows_bounds() {
        assert!(!is_numeric_shape("-1", &NumericConfig::new().with_min(0.0)));
        assert!(is_numeric_shape("-1", &NumericConfig::new().with_max(-5.0)));
        assert!(!is_numeric_shape("-1.5", &float().with_min(1.0)));
    }

    #[rstest]
    #[case("10", 10.0, 0)]
    #[case("-4", -4.0, 0)]
    #[case("1.12345", 1.12345, 5)]
    #[case("1.", 1.0, 0)]
    #[case(".5", 0.5, 1)]
    #[case("-.25", -0.25, 2)]
    #[case("1e", 1.0, 0)]
    #[case("1e+", 1.0, 0)]
    #[case("2e3", 2000.0, 0)]
    #[case("1.50E+2", 150.0, 2)]
    #[case("12abc", 12.0, 0)]
    fn scans_longest_prefix(#[case] text: &str, #[case] value: f64, #[case] decimals: usize) {
        let numeral = leading_numeral(text).unwrap();
        assert_eq!(numeral.value, value);
        assert_eq!(numeral.decimals, decimals);
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case(".")]
    #[case("-.")]
    #[case("e5")]
    #[case("abc")]
    fn no_numeral_without_mantissa_digits(#[case] text: &str) {
        assert!(leading_numeral(text).is_none());
    }

    #[test]
    fn exponent_is_reported() {
        assert!(leading_numeral("1e2").unwrap().has_exponent);
        assert!(!leading_numeral("1e").unwrap().has_exponent);
    }
}
