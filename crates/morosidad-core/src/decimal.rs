#![forbid(unsafe_code)]

//! Fixed-point rendering of floats for display labels.

/// Render `value` with exactly `digits` decimals.
///
/// Rounds to the nearest representable decimal; an exact tie rounds away
/// from zero (`6.25` → `6.3`), matching what browsers show for the same
/// number. `{:.N}` alone would round ties to even.
#[must_use]
pub fn to_fixed(value: f64, digits: usize) -> String {
    if is_exact_tie(value, digits) {
        // The next float away from zero is above the tie, so it rounds up.
        let nudged = f64::from_bits(value.to_bits() + 1);
        return format!("{nudged:.digits$}");
    }
    format!("{value:.digits$}")
}

/// Whether `value * 10^digits` has a fractional part of exactly one half.
///
/// With `value = m * 2^e` and `m` odd, `value * 10^digits` equals
/// `(m * 5^digits) * 2^(e + digits)` whose first factor is odd, so the
/// fraction is exactly `.5` iff `e + digits == -1`.
fn is_exact_tie(value: f64, digits: usize) -> bool {
    if !value.is_finite() || value == 0.0 {
        return false;
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1_u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1_u64 << 52), biased - 1075)
    };
    let exponent = exponent + i64::from(mantissa.trailing_zeros());
    i64::try_from(digits).is_ok_and(|digits| exponent + digits == -1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(to_fixed(6.25, 1), "6.3");
        assert_eq!(to_fixed(93.75, 1), "93.8");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-6.25, 1), "-6.3");
    }

    #[test]
    fn non_ties_round_to_nearest() {
        assert_eq!(to_fixed(80.0, 1), "80.0");
        assert_eq!(to_fixed(23.0, 2), "23.00");
        // 1.005 is stored slightly below the tie.
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(1.04, 1), "1.0");
        assert_eq!(to_fixed(0.0, 1), "0.0");
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 1), "inf");
    }
}
