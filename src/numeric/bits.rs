// ============================================================================
// Bit Primitives
// Constant-time bit inspection over unsigned 256-bit integers
// ============================================================================

use super::errors::{NumericError, NumericResult};
use ethnum::u256;

/// Shift amounts probed by [`most_significant_bit`], halving the search space each step.
const MSB_PROBES: [u32; 8] = [128, 64, 32, 16, 8, 4, 2, 1];

/// Shift amounts used to smear the highest set bit into every lower position.
const SPREAD_SHIFTS: [u32; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

/// Zero-based index of the highest set bit of `x`.
///
/// Binary search over the 256-bit width in eight fixed steps, so the cost does not
/// depend on the magnitude of `x`. Returns 0 for both `x == 0` and `x == 1`.
///
/// # Example
/// ```
/// use ethnum::u256;
/// use fixed_point_engine::numeric::most_significant_bit;
///
/// assert_eq!(most_significant_bit(u256::new(255)), 7);
/// ```
#[inline]
pub fn most_significant_bit(x: u256) -> u32 {
    let mut x = x;
    let mut msb = 0;
    for shift in MSB_PROBES {
        if x >= u256::ONE << shift {
            x = x >> shift;
            msb += shift;
        }
    }
    msb
}

/// Whether `x` has exactly one bit set.
///
/// # Errors
/// Returns `Zero` when `x == 0`.
#[inline]
pub fn is_power_of_two(x: u256) -> NumericResult<bool> {
    if x == u256::ZERO {
        return Err(NumericError::Zero);
    }
    Ok((x & (x - u256::ONE)) == u256::ZERO)
}

/// Smallest power of two greater than or equal to `x`.
///
/// Inputs above `2^255` have no representable answer and wrap to zero; callers must
/// keep `x` within half of the unsigned range.
///
/// # Errors
/// Returns `Zero` when `x == 0`.
#[inline]
pub fn next_power_of_two(x: u256) -> NumericResult<u256> {
    if x == u256::ZERO {
        return Err(NumericError::Zero);
    }
    let mut v = x - u256::ONE;
    for shift in SPREAD_SHIFTS {
        v = v | (v >> shift);
    }
    Ok(v.wrapping_add(u256::ONE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_small_values() {
        assert_eq!(most_significant_bit(u256::ZERO), 0);
        assert_eq!(most_significant_bit(u256::ONE), 0);
        assert_eq!(most_significant_bit(u256::new(2)), 1);
        assert_eq!(most_significant_bit(u256::new(3)), 1);
        assert_eq!(most_significant_bit(u256::new(255)), 7);
        assert_eq!(most_significant_bit(u256::new(256)), 8);
    }

    #[test]
    fn test_msb_every_power_of_two() {
        for k in 0..256u32 {
            assert_eq!(most_significant_bit(u256::ONE << k), k, "2^{}", k);
        }
    }

    #[test]
    fn test_msb_max() {
        assert_eq!(most_significant_bit(u256::MAX), 255);
    }

    #[test]
    fn test_is_power_of_two() {
        assert_eq!(is_power_of_two(u256::ONE), Ok(true));
        assert_eq!(is_power_of_two(u256::new(64)), Ok(true));
        assert_eq!(is_power_of_two(u256::ONE << 255u32), Ok(true));
        assert_eq!(is_power_of_two(u256::new(6)), Ok(false));
        assert_eq!(is_power_of_two(u256::MAX), Ok(false));
    }

    #[test]
    fn test_is_power_of_two_zero() {
        assert_eq!(is_power_of_two(u256::ZERO), Err(NumericError::Zero));
    }

    #[test]
    fn test_next_power_of_two() {
        assert_eq!(next_power_of_two(u256::ONE), Ok(u256::ONE));
        assert_eq!(next_power_of_two(u256::new(2)), Ok(u256::new(2)));
        assert_eq!(next_power_of_two(u256::new(5)), Ok(u256::new(8)));
        assert_eq!(next_power_of_two(u256::new(1000)), Ok(u256::new(1024)));
        assert_eq!(
            next_power_of_two((u256::ONE << 200u32) + u256::ONE),
            Ok(u256::ONE << 201u32)
        );
        assert_eq!(next_power_of_two(u256::ONE << 255u32), Ok(u256::ONE << 255u32));
    }

    #[test]
    fn test_next_power_of_two_wraps_above_half_range() {
        let x = (u256::ONE << 255u32) + u256::ONE;
        assert_eq!(next_power_of_two(x), Ok(u256::ZERO));
    }

    #[test]
    fn test_next_power_of_two_zero() {
        assert_eq!(next_power_of_two(u256::ZERO), Err(NumericError::Zero));
    }

    #[test]
    fn test_quickcheck_against_builtin_bit_counts() {
        fn prop(hi: u128, lo: u128) -> bool {
            let x = u256::from_words(hi, lo);
            if x == u256::ZERO {
                return most_significant_bit(x) == 0;
            }
            let msb_matches = most_significant_bit(x) == 255 - x.leading_zeros();
            let pow2_matches = is_power_of_two(x) == Ok(x.count_ones() == 1);
            msb_matches && pow2_matches
        }
        quickcheck::quickcheck(prop as fn(u128, u128) -> bool);
    }

    #[test]
    fn test_quickcheck_next_power_of_two_bounds() {
        fn prop(hi: u128, lo: u128) -> bool {
            // keep within the non-wrapping half of the range
            let x = u256::from_words(hi >> 1, lo);
            if x == u256::ZERO {
                return true;
            }
            match next_power_of_two(x) {
                Ok(p) => p >= x && p.count_ones() == 1 && (p == x) == (x.count_ones() == 1),
                Err(_) => false,
            }
        }
        quickcheck::quickcheck(prop as fn(u128, u128) -> bool);
    }
}
