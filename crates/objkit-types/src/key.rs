//! Path segment keys.
//!
//! A segment is looked up by name, except when it addresses an array with a
//! leading `-`: it is then rewritten to a numeric position counted from the
//! end of that array (`len - N`).

use std::fmt;

/// A single path segment, ready for lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Key {
    /// A property name, or a decimal array index in textual form.
    Name(String),
    /// A numeric position produced by negative-offset rewriting.
    ///
    /// The arithmetic is plain subtraction, so the value may be negative,
    /// fractional, or `NaN`; such keys simply never resolve.
    Index(f64),
}

impl Key {
    /// Rewrite a negative-offset segment (`"-N"`) against an array of `len`
    /// elements.
    ///
    /// The remainder after the `-` is coerced with [`parse_number`].
    pub fn from_end(len: usize, segment: &str) -> Self {
        let offset = parse_number(segment.strip_prefix('-').unwrap_or(segment));
        Key::Index(len as f64 - offset)
    }

    /// The array position a name spells out, if it is a canonical decimal
    /// index.
    pub fn name_index(&self) -> Option<usize> {
        match self {
            Key::Name(name) => canonical_index(name),
            Key::Index(_) => None,
        }
    }

    /// The array position this key addresses in an array of `len` elements,
    /// or `None` if it does not name an existing element.
    pub fn array_index(&self, len: usize) -> Option<usize> {
        let index = match self {
            Key::Name(name) => canonical_index(name)?,
            Key::Index(n) => {
                if !(n.is_finite() && n.fract() == 0.0 && *n >= 0.0) {
                    return None;
                }
                *n as usize
            }
        };
        (index < len).then_some(index)
    }

    /// The property name this key addresses in an object's property table.
    pub fn property_name(&self) -> String {
        match self {
            Key::Name(name) => name.clone(),
            Key::Index(n) => format_number(*n),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(n) => f.write_str(&format_number(*n)),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

/// Parse a canonical decimal array index: `"0"` or digits without a leading
/// zero.
fn canonical_index(name: &str) -> Option<usize> {
    let bytes = name.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    name.parse().ok()
}

/// Coerce text to a number the way a numeric string conversion does.
///
/// - Surrounding whitespace is ignored; empty text is `0`.
/// - `0x`, `0o` and `0b` prefixes select hex, octal and binary digits.
/// - `Infinity` with an optional sign is accepted; `inf` and `nan` are not.
/// - Otherwise only decimal notation with an optional sign, fraction and
///   exponent is accepted.
///
/// Anything else is `NaN`.
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u128::from_str_radix(&text[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    let decimal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Format a number the way it reads in messages.
///
/// Integral values print without a fractional part, `-0` prints as `0`, and
/// non-finite values print as `NaN`, `Infinity`, or `-Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".into()
    } else if n == f64::INFINITY {
        "Infinity".into()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".into()
    } else if n == 0.0 {
        "0".into()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn from_end_is_length_minus_offset() {
        assert_eq!(Key::from_end(4, "-2"), Key::Index(2.0));
        assert_eq!(Key::from_end(4, "-1"), Key::Index(3.0));
        assert_eq!(Key::from_end(4, "-4"), Key::Index(0.0));
        assert_eq!(Key::from_end(4, "-5"), Key::Index(-1.0));
    }

    #[test]
    fn from_end_empty_offset_counts_as_zero() {
        assert_eq!(Key::from_end(3, "-"), Key::Index(3.0));
        assert_eq!(Key::from_end(3, "- 1 "), Key::Index(2.0));
    }

    #[test]
    fn from_end_garbage_is_nan() {
        match Key::from_end(3, "-abc") {
            Key::Index(n) => assert!(n.is_nan()),
            other => panic!("expected Index, got {:?}", other),
        }
    }

    #[test]
    fn from_end_coerces_like_numeric_strings() {
        assert_eq!(Key::from_end(4, "-0x1"), Key::Index(3.0));
        assert_eq!(Key::from_end(4, "-0b10"), Key::Index(2.0));
        assert_eq!(Key::from_end(4, "-1e0"), Key::Index(3.0));
        assert_eq!(Key::from_end(4, "--1"), Key::Index(5.0));
        assert_eq!(Key::from_end(4, "-Infinity"), Key::Index(f64::NEG_INFINITY));
    }

    #[test]
    fn parse_number_rejects_rust_only_spellings() {
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("nan").is_nan());
        assert!(parse_number("infinity").is_nan());
        assert!(parse_number("0x").is_nan());
        assert!(parse_number("1_000").is_nan());
        assert_eq!(parse_number(" 42 "), 42.0);
        assert_eq!(parse_number("0o17"), 15.0);
        assert_eq!(parse_number(".5"), 0.5);
    }

    #[test]
    fn name_index_only_for_canonical_names() {
        assert_eq!(Key::from("2").name_index(), Some(2));
        assert_eq!(Key::from("02").name_index(), None);
        assert_eq!(Key::from("x").name_index(), None);
        assert_eq!(Key::Index(2.0).name_index(), None);
    }

    #[test]
    fn array_index_bounds() {
        assert_eq!(Key::Index(0.0).array_index(2), Some(0));
        assert_eq!(Key::Index(2.0).array_index(2), None);
        assert_eq!(Key::Index(-1.0).array_index(2), None);
        assert_eq!(Key::Index(0.5).array_index(2), None);
        assert_eq!(Key::Index(f64::NAN).array_index(2), None);
    }

    #[test]
    fn array_index_requires_canonical_names() {
        assert_eq!(Key::from("1").array_index(4), Some(1));
        assert_eq!(Key::from("0").array_index(4), Some(0));
        assert_eq!(Key::from("01").array_index(4), None);
        assert_eq!(Key::from("+1").array_index(4), None);
        assert_eq!(Key::from("length").array_index(4), None);
        assert_eq!(Key::from("").array_index(4), None);
    }

    #[test]
    fn display_matches_message_format() {
        assert_eq!(Key::from("o").to_string(), "o");
        assert_eq!(Key::Index(2.0).to_string(), "2");
        assert_eq!(Key::Index(-1.0).to_string(), "-1");
        assert_eq!(Key::Index(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn format_number_cases() {
        assert_eq!(format_number(3321232.0), "3321232");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    proptest! {
        #[test]
        fn integral_numbers_format_as_integers(n in -1_000_000_000_000i64..1_000_000_000_000) {
            prop_assert_eq!(format_number(n as f64), n.to_string());
        }

        #[test]
        fn canonical_names_index_like_positions(i in 0usize..10_000, extra in 1usize..100) {
            prop_assert_eq!(Key::Name(i.to_string()).array_index(i + extra), Some(i));
            prop_assert_eq!(Key::Index(i as f64).array_index(i + extra), Some(i));
        }
    }
}
