// ============================================================================
// Exponentials
// Binary and natural exponentials, the inverses of log2 and ln
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::fixed_point::{Fixed59x18, HALF_SCALE, SCALE};
use ethnum::i256;

/// 10^36, the working precision of the series evaluation
const SCALE_36: i256 = i256::new(1_000_000_000_000_000_000_000_000_000_000_000_000);

/// ln(2) to 36 digits
const LN2_36: i256 = i256::new(693_147_180_559_945_309_417_232_121_458_176_568);

/// exp2 of anything at or above 192 exceeds the width
const EXP2_MAX_INPUT: i256 = i256::new(192_000_000_000_000_000_000);

/// exp2 of anything below this rounds to zero
const EXP2_MIN_INPUT: i256 = i256::new(-59_794_705_707_972_522_261);

/// ln of the largest value reachable through exp2
const EXP_MAX_INPUT: i256 = i256::new(133_084_258_667_509_499_440);

/// exp of anything below this rounds to zero
const EXP_MIN_INPUT: i256 = i256::new(-41_446_531_673_892_822_322);

impl Fixed59x18 {
    /// Binary exponential, `2^x`.
    ///
    /// The whole part of `x` becomes a left shift; the fraction `f` is evaluated as
    /// `e^(f·ln 2)` by Taylor series at 36 digits and rounded back to 18. Negative
    /// inputs use `1 / 2^-x`. Approximate in the last digits.
    ///
    /// # Errors
    /// Returns `Overflow` when `self >= 192`.
    pub fn exp2(self) -> NumericResult<Self> {
        let x = self.raw_value();

        if x < i256::ZERO {
            if x < EXP2_MIN_INPUT {
                return Ok(Self::ZERO);
            }
            // -x cannot overflow: x >= EXP2_MIN_INPUT
            let inverse = Self::from_raw(-x).exp2()?;
            return Self::UNIT.checked_div(inverse);
        }

        if x >= EXP2_MAX_INPUT {
            tracing::trace!(input = %self, "exp2 input out of range");
            return Err(NumericError::Overflow);
        }

        // n < 192, so it fits the low word and the shift is in range
        let (_, n) = (x / SCALE).into_words();
        let n = n as u32;
        let fraction = x % SCALE;

        let z = fraction * LN2_36 / SCALE;
        let mut sum = SCALE_36;
        let mut term = SCALE_36;
        let mut k = i256::ONE;
        loop {
            // z < 0.7, so every term is smaller than the last and the loop ends
            term = term * z / (k * SCALE_36);
            if term == i256::ZERO {
                break;
            }
            sum += term;
            k += i256::ONE;
        }

        // 2^f < 2.0 and n < 192 keep the shifted result below 2^192 × 10^18
        let fractional_power = (sum + HALF_SCALE) / SCALE;
        Ok(Self::from_raw(fractional_power << n))
    }

    /// Natural exponential, `e^x`, computed as `exp2(x × log2(e))`.
    ///
    /// # Errors
    /// Returns `Overflow` when `self > 133.084258667509499440`.
    pub fn exp(self) -> NumericResult<Self> {
        let x = self.raw_value();

        if x < EXP_MIN_INPUT {
            return Ok(Self::ZERO);
        }
        if x > EXP_MAX_INPUT {
            tracing::trace!(input = %self, "exp input out of range");
            return Err(NumericError::Overflow);
        }

        self.checked_mul(Self::LOG2_E)?.exp2()
    }
}
