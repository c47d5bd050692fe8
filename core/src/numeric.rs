//! Numeric helpers shared by the goal engine and the log.

/// Round to `precision` decimal places, half away from zero on positive
/// values (`0.25` at one decimal rounds to `0.3`).
#[must_use]
pub fn round_to(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

/// Round to one decimal place, the precision used for all stored macros.
#[must_use]
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Parse a free-form string into a number, never failing.
///
/// Takes the longest leading float prefix (sign, digits, one decimal point,
/// optional exponent), so `"400 kcal"` is 400 and `"12.3.4"` is 12.3.
/// Unparseable input is 0.
#[must_use]
pub fn coerce(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if matches!(bytes.first(), Some(&(b'+' | b'-'))) {
        end += 1;
    }
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return 0.0;
    }

    // Optional exponent, only kept when it carries digits of its own.
    if matches!(bytes.get(end), Some(&(b'e' | b'E'))) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(&(b'+' | b'-'))) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert!((round_to(1.25, 1) - 1.3).abs() < f64::EPSILON);
        assert!((round_to(1.24, 1) - 1.2).abs() < f64::EPSILON);
        assert!((round_to(2672.2, 0) - 2672.0).abs() < f64::EPSILON);
        assert!((round1(112.04) - 112.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coerce_plain_numbers() {
        assert!((coerce("400") - 400.0).abs() < f64::EPSILON);
        assert!((coerce("2.5") - 2.5).abs() < f64::EPSILON);
        assert!((coerce("-3.1") - -3.1).abs() < f64::EPSILON);
        assert!((coerce(".5") - 0.5).abs() < f64::EPSILON);
        assert!((coerce("  70 ") - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coerce_leading_prefix() {
        assert!((coerce("400 kcal") - 400.0).abs() < f64::EPSILON);
        assert!((coerce("12.3.4") - 12.3).abs() < f64::EPSILON);
        assert!((coerce("1e2") - 100.0).abs() < f64::EPSILON);
        assert!((coerce("1e") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coerce_unparseable_is_zero() {
        assert!(coerce("").abs() < f64::EPSILON);
        assert!(coerce("abc").abs() < f64::EPSILON);
        assert!(coerce("-").abs() < f64::EPSILON);
        assert!(coerce("g200").abs() < f64::EPSILON);
    }
}
