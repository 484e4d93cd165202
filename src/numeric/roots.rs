// ============================================================================
// Square Root
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::fixed_point::{Fixed59x18, SCALE};
use ethnum::i256;

impl Fixed59x18 {
    /// Square root, truncated to 18 fractional digits.
    ///
    /// Computes `floor(sqrt(x × 10^18))` with Newton's method, which is exact for
    /// perfect squares.
    ///
    /// # Errors
    /// - `Negative` when `self < 0`
    /// - `Overflow` when `self × 10^18` exceeds the 256-bit width
    pub fn sqrt(self) -> NumericResult<Self> {
        let x = self.raw_value();
        if x < i256::ZERO {
            tracing::trace!(input = %self, "sqrt of negative value");
            return Err(NumericError::Negative);
        }

        let scaled = x.checked_mul(SCALE).ok_or(NumericError::Overflow)?;
        Ok(Self::from_raw(integer_sqrt(scaled)))
    }
}

/// Floor square root of a non-negative integer.
fn integer_sqrt(n: i256) -> i256 {
    if n == i256::ZERO {
        return i256::ZERO;
    }

    // Seed with a power of two at or above the root; the iteration then
    // decreases monotonically until it settles on the floor
    let bits = 256 - n.leading_zeros();
    let mut x = i256::ONE << ((bits + 1) / 2);
    loop {
        let next = (x + n / x) >> 1u32;
        if next >= x {
            return x;
        }
        x = next;
    }
}
