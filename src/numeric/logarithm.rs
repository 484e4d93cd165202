// ============================================================================
// Logarithms
// Iterative binary logarithm and the natural logarithm derived from it
// ============================================================================
//
// Results are accurate to the fixed-point resolution but not bit-exact: the
// last few digits may differ from the true value because every squaring step
// truncates.

use super::bits::most_significant_bit;
use super::errors::{NumericError, NumericResult};
use super::fixed_point::{Fixed59x18, HALF_SCALE, SCALE, TWICE_SCALE};
use ethnum::i256;

impl Fixed59x18 {
    /// Binary logarithm.
    ///
    /// The integer part comes from the most significant bit of `x / 1.0`; the
    /// fraction is expanded one bit at a time by repeated squaring (59 steps).
    /// Inputs below 1.0 are folded into the reciprocal and the sign flipped.
    ///
    /// # Errors
    /// Returns `NotPositive` when `self <= 0`.
    pub fn log2(self) -> NumericResult<Self> {
        if self.raw_value() <= i256::ZERO {
            tracing::trace!(input = %self, "log2 of non-positive value");
            return Err(NumericError::NotPositive);
        }

        let (sign, x) = if self.raw_value() < SCALE {
            (-i256::ONE, Self::UNIT.checked_div(self)?.raw_value())
        } else {
            (i256::ONE, self.raw_value())
        };

        // x >= 1.0 here, so the quotient is positive
        let n = most_significant_bit((x / SCALE).unsigned_abs());
        let mut result = i256::from(n) * SCALE * sign;

        let mut y = x >> n;
        if y == SCALE {
            return Ok(Self::from_raw(result));
        }

        let mut delta = HALF_SCALE;
        while delta > i256::ZERO {
            // y stays in [1.0, 2.0), so y * y cannot exceed the width
            y = y * y / SCALE;
            if y >= TWICE_SCALE {
                result += delta * sign;
                y = y >> 1u32;
            }
            delta = delta >> 1u32;
        }

        Ok(Self::from_raw(result))
    }

    /// Natural logarithm, computed as `log2(x) × ln(2)`.
    ///
    /// # Errors
    /// Returns `NotPositive` when `self <= 0`.
    pub fn ln(self) -> NumericResult<Self> {
        self.log2()?.checked_mul(Self::LN2)
    }
}
