// ============================================================================
// Full-Precision Multiply-Divide
// floor(x × y ÷ denominator) through a 512-bit intermediate product
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::fixed_point::{range_error, Fixed59x18};
use ethnum::{i256, u256};

/// Calculates `floor(x × y ÷ denominator)` with full precision.
///
/// The product may exceed 256 bits; only the quotient has to fit.
///
/// # Errors
/// - `DivisionByZero` if `denominator` is zero
/// - `Overflow` if the quotient does not fit in 256 bits
pub fn mul_div(x: u256, y: u256, denominator: u256) -> NumericResult<u256> {
    if denominator == u256::ZERO {
        return Err(NumericError::DivisionByZero);
    }

    let (high, low) = wide_mul(x, y);
    if high == u256::ZERO {
        return Ok(low / denominator);
    }
    if high >= denominator {
        tracing::trace!(%x, %y, %denominator, "mul_div quotient exceeds 256 bits");
        return Err(NumericError::Overflow);
    }

    // Shift-subtract long division of [high, low] by the denominator.
    // The running remainder stays below the denominator, so the quotient
    // fits in 256 bits.
    let mut remainder = high;
    let mut quotient = u256::ZERO;
    for bit in (0..256u32).rev() {
        let carry = remainder >> 255u32 != u256::ZERO;
        remainder = (remainder << 1u32) | ((low >> bit) & u256::ONE);
        quotient = quotient << 1u32;
        if carry || remainder >= denominator {
            remainder = remainder.wrapping_sub(denominator);
            quotient = quotient | u256::ONE;
        }
    }

    Ok(quotient)
}

/// 512-bit product of two 256-bit values as `(high, low)` words.
fn wide_mul(x: u256, y: u256) -> (u256, u256) {
    let (x1, x0) = x.into_words();
    let (y1, y0) = y.into_words();

    // 128 × 128 partial products never exceed 256 bits
    let p00 = u256::from(x0) * u256::from(y0);
    let p01 = u256::from(x0) * u256::from(y1);
    let p10 = u256::from(x1) * u256::from(y0);
    let p11 = u256::from(x1) * u256::from(y1);

    let (middle, middle_carry) = p01.overflowing_add(p10);
    let (middle_high, middle_low) = middle.into_words();

    let (low, low_carry) = p00.overflowing_add(u256::from_words(middle_low, 0));

    let mut high = p11 + u256::from(middle_high);
    if middle_carry {
        high += u256::ONE << 128u32;
    }
    if low_carry {
        high += u256::ONE;
    }

    (high, low)
}

impl Fixed59x18 {
    /// Full-precision `self × y ÷ denominator`, truncated toward zero.
    ///
    /// Unlike chaining [`checked_mul`](Self::checked_mul) and
    /// [`checked_div`](Self::checked_div), the intermediate product may exceed
    /// the 256-bit width and is never rounded.
    ///
    /// # Errors
    /// - `DivisionByZero` if `denominator` is zero
    /// - `Overflow` or `Underflow` if the result does not fit
    pub fn checked_mul_div(self, y: Self, denominator: Self) -> NumericResult<Self> {
        let negative = (self.is_negative() != y.is_negative()) != denominator.is_negative();
        let err = range_error(negative);

        let magnitude = mul_div(
            self.raw_value().unsigned_abs(),
            y.raw_value().unsigned_abs(),
            denominator.raw_value().unsigned_abs(),
        )
        .map_err(|e| match e {
            NumericError::Overflow => err,
            other => other,
        })?;

        // |MIN| is one past MAX, so negative results get one extra step of room
        let limit = if negative {
            i256::MIN.unsigned_abs()
        } else {
            i256::MAX.unsigned_abs()
        };
        if magnitude > limit {
            return Err(err);
        }

        let (high, low) = magnitude.into_words();
        let raw = i256::from_words(high as i128, low as i128);
        Ok(Self::from_raw(if negative { raw.wrapping_neg() } else { raw }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type F = Fixed59x18;

    fn u(value: u128) -> u256 {
        u256::new(value)
    }

    #[test]
    fn test_mul_div_small() {
        assert_eq!(mul_div(u(6), u(7), u(2)), Ok(u(21)));
        assert_eq!(mul_div(u(10), u(10), u(3)), Ok(u(33)));
        assert_eq!(mul_div(u256::ZERO, u(10), u(3)), Ok(u256::ZERO));
    }

    #[test]
    fn test_mul_div_phantom_overflow() {
        // MAX * 2 / 4 overflows the product but not the quotient
        assert_eq!(mul_div(u256::MAX, u(2), u(4)), Ok(u256::MAX >> 1u32));
        assert_eq!(mul_div(u256::MAX, u256::MAX, u256::MAX), Ok(u256::MAX));

        let big = u256::ONE << 200u32;
        assert_eq!(mul_div(big, big, big), Ok(big));
        assert_eq!(mul_div(big, big, u256::ONE << 150u32), Ok(u256::ONE << 250u32));
    }

    #[test]
    fn test_mul_div_floors() {
        // (2^255 + 1) * 3 / 2 = 3 * 2^254 + 1 (remainder 1 dropped)
        let x = (u256::ONE << 255u32) + u256::ONE;
        let expected = u(3) * (u256::ONE << 254u32) + u256::ONE;
        assert_eq!(mul_div(x, u(3), u(2)), Ok(expected));
    }

    #[test]
    fn test_mul_div_errors() {
        assert_eq!(mul_div(u(1), u(1), u256::ZERO), Err(NumericError::DivisionByZero));
        assert_eq!(mul_div(u256::MAX, u(2), u(1)), Err(NumericError::Overflow));
        assert_eq!(mul_div(u256::MAX, u256::MAX, u256::MAX - u256::ONE), Err(NumericError::Overflow));
    }

    #[test]
    fn test_wide_mul() {
        assert_eq!(wide_mul(u256::MAX, u(2)), (u256::ONE, u256::MAX - u256::ONE));
        assert_eq!(
            wide_mul(u256::MAX, u256::MAX),
            (u256::MAX - u256::ONE, u256::ONE)
        );
        assert_eq!(wide_mul(u256::ONE << 128u32, u256::ONE << 128u32), (u256::ONE, u256::ZERO));
    }

    #[test]
    fn test_checked_mul_div() {
        let two = F::from_integer(2).unwrap();
        let three = F::from_integer(3).unwrap();
        let four = F::from_integer(4).unwrap();

        assert_eq!(two.checked_mul_div(three, four).unwrap().to_string(), "1.500000000000000000");
        assert_eq!(
            (-two).checked_mul_div(three, four).unwrap().to_string(),
            "-1.500000000000000000"
        );
        assert_eq!(
            (-two).checked_mul_div(-three, four).unwrap().to_string(),
            "1.500000000000000000"
        );
        assert_eq!(
            two.checked_mul_div(three, -four).unwrap().to_string(),
            "-1.500000000000000000"
        );
    }

    #[test]
    fn test_checked_mul_div_beyond_checked_mul() {
        // MAX * 2 overflows checked_mul, but MAX * 2 / 2 fits
        assert_eq!(F::MAX.checked_mul(F::TWICE_UNIT), Err(NumericError::Overflow));
        assert_eq!(F::MAX.checked_mul_div(F::TWICE_UNIT, F::TWICE_UNIT), Ok(F::MAX));
        assert_eq!(F::MIN.checked_mul_div(F::UNIT, F::UNIT), Ok(F::MIN));
    }

    #[test]
    fn test_checked_mul_div_errors() {
        assert_eq!(
            F::UNIT.checked_mul_div(F::UNIT, F::ZERO),
            Err(NumericError::DivisionByZero)
        );
        assert_eq!(
            F::MAX.checked_mul_div(F::TWICE_UNIT, F::UNIT),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            F::MAX.checked_mul_div(-F::TWICE_UNIT, F::UNIT),
            Err(NumericError::Underflow)
        );
        assert_eq!(
            F::MIN.checked_mul_div(-F::UNIT, F::UNIT),
            Err(NumericError::Overflow)
        );
    }
}
