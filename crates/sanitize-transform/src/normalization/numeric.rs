//! Numeric rounding.

/// Round half away from zero to `digits` fractional digits.
///
/// Negative `digits` round to tens, hundreds, and so on; a value smaller than
/// half the rounding unit becomes zero. Values that would overflow the
/// scaling step for positive `digits` are returned unchanged.
pub fn round_float(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // 10^400 is already infinite as an f64.
    let digits = digits.clamp(-MAX_FLOAT_DIGITS, MAX_FLOAT_DIGITS);
    let factor = 10f64.powi(digits.abs());
    if digits >= 0 {
        let rounded = (value * factor).round() / factor;
        return if rounded.is_finite() { rounded } else { value };
    }
    if !factor.is_finite() || value.abs() < factor / 2.0 {
        return 0f64.copysign(value);
    }
    (value / factor).round() * factor
}

const MAX_FLOAT_DIGITS: i32 = 400;

/// Round an integer to `digits` places.
///
/// Non-negative `digits` leave the integer unchanged. Negative `digits` round
/// half away from zero to the nearest power of ten.
pub fn round_integer(value: i64, digits: i32) -> i64 {
    if digits >= 0 {
        return value;
    }
    let Some(factor) = 10i128.checked_pow(digits.unsigned_abs()) else {
        return 0;
    };
    let value = i128::from(value);
    let remainder = value % factor;
    let base = value - remainder;
    let rounded = if remainder.abs() * 2 >= factor {
        base + remainder.signum() * factor
    } else {
        base
    };
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_fractional_digits() {
        assert_eq!(round_float(12345.7777777, 2), 12345.78);
        assert_eq!(round_float(2.5, 0), 3.0);
        assert_eq!(round_float(-2.5, 0), -3.0);
        assert_eq!(round_float(1234.5, -2), 1200.0);
    }

    #[test]
    fn extreme_precisions_do_not_overflow() {
        assert_eq!(round_float(1234.5, i32::MIN), 0.0);
        assert_eq!(round_float(1234.5, -400), 0.0);
        assert_eq!(round_float(1234.5, -309), 0.0);
        assert_eq!(round_float(1234.5, -4), 0.0);
        assert_eq!(round_float(5000.0, -4), 10000.0);
        assert!(round_float(-1234.5, -400).is_sign_negative());
        assert_eq!(round_float(1234.5, i32::MAX), 1234.5);
        assert_eq!(round_float(1e300, 20), 1e300);
        assert_eq!(round_integer(1234, i32::MIN), 0);
    }

    #[test]
    fn rounds_integers_to_tens() {
        assert_eq!(round_integer(1234, 2), 1234);
        assert_eq!(round_integer(1235, -1), 1240);
        assert_eq!(round_integer(-1235, -1), -1240);
        assert_eq!(round_integer(1234, -1), 1230);
        assert_eq!(round_integer(15, -40), 0);
    }
}
