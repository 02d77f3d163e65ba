//! Permissive scalar coercions. Neither function fails: anything that is not
//! exactly `"true"` is `false`, anything that is not a number is NaN.

/// `true` only for the exact, case-sensitive text `"true"`.
pub fn to_bool(text: &str) -> bool {
    text == "true"
}

/// Parse `text` as a number the way a JavaScript unary `+` does.
///
/// Surrounding whitespace is ignored and blank text is zero. Accepts decimal
/// and exponent forms, `Infinity` with an optional sign, and unsigned `0x`,
/// `0o`, `0b` integer literals. Everything else is NaN.
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(n) = parse_radix(trimmed) {
        return n;
    }

    // Rust also accepts "inf" and "nan" spellings; those are not numbers here.
    let body = trimmed.trim_start_matches(['+', '-']);
    if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(text: &str) -> Option<f64> {
    let (radix, digits) = match text.get(..2)? {
        "0x" | "0X" => (16, &text[2..]),
        "0o" | "0O" => (8, &text[2..]),
        "0b" | "0B" => (2, &text[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let mut value = 0.0_f64;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            return Some(f64::NAN);
        };
        value = value * f64::from(radix) + f64::from(d);
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_exact_match_only() {
        assert!(to_bool("true"));
        assert!(!to_bool("TRUE"));
        assert!(!to_bool("True"));
        assert!(!to_bool("1"));
        assert!(!to_bool("yes"));
        assert!(!to_bool(" true"));
        assert!(!to_bool("not a boolean"));
    }

    #[test]
    fn number_decimal_and_exponent() {
        assert_eq!(to_number("1e6"), 1_000_000.0);
        assert_eq!(to_number("98.2"), 98.2);
        assert_eq!(to_number("-5"), -5.0);
        assert_eq!(to_number("+7"), 7.0);
        assert_eq!(to_number(".5"), 0.5);
        assert_eq!(to_number("5."), 5.0);
        assert_eq!(to_number("2.5E-3"), 0.0025);
    }

    #[test]
    fn number_whitespace_and_blank() {
        assert_eq!(to_number("  42\n"), 42.0);
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number("   "), 0.0);
    }

    #[test]
    fn number_infinity_spellings() {
        assert_eq!(to_number("Infinity"), f64::INFINITY);
        assert_eq!(to_number("-Infinity"), f64::NEG_INFINITY);
        assert!(to_number("inf").is_nan());
        assert!(to_number("infinity").is_nan());
        assert!(to_number("NaN").is_nan());
    }

    #[test]
    fn number_radix_literals() {
        assert_eq!(to_number("0x1F"), 31.0);
        assert_eq!(to_number("0o17"), 15.0);
        assert_eq!(to_number("0b101"), 5.0);
        assert!(to_number("0x").is_nan());
        assert!(to_number("0xZZ").is_nan());
    }

    #[test]
    fn number_garbage_is_nan() {
        assert!(to_number("not a number").is_nan());
        assert!(to_number("12abc").is_nan());
        assert!(to_number("1_000").is_nan());
        assert!(to_number("--1").is_nan());
    }
}
