// ============================================================================
// Fixed-Point Engine Library
// Deterministic signed 59.18 fixed-point arithmetic on 256-bit integers
// ============================================================================

//! # Fixed-Point Engine
//!
//! Pure, stateless fixed-point arithmetic for environments where floating point
//! is unavailable or unsafe to use.
//!
//! ## Features
//!
//! - **59.18 representation**: `i256` raw values scaled by 10^18
//! - **Explicit rounding rules** for multiply, divide, floor, ceil and frac
//! - **Logarithms and exponentials** (`log2`, `ln`, `exp2`, `exp`) and `sqrt`
//! - **Bit primitives** over `u256` (`most_significant_bit`, power-of-two helpers)
//! - **Full-precision `mul_div`** with a 512-bit intermediate product
//! - **No panics, no wraparound**: every fallible operation returns [`NumericResult`]
//!
//! [`NumericResult`]: numeric::NumericResult
//!
//! ## Example
//!
//! ```rust
//! use fixed_point_engine::prelude::*;
//!
//! let x: Fixed59x18 = "2.5".parse().unwrap();
//!
//! assert_eq!(x.floor().unwrap().to_string(), "2.000000000000000000");
//! assert_eq!(x.ceil().unwrap().to_string(), "3.000000000000000000");
//!
//! let quarter = Fixed59x18::UNIT
//!     .checked_div(Fixed59x18::from_integer(4).unwrap())
//!     .unwrap();
//! assert_eq!(quarter.to_string(), "0.250000000000000000");
//!
//! // log2 is approximate in the last digits
//! let log = Fixed59x18::from_integer(8).unwrap().log2().unwrap();
//! assert_eq!(log, Fixed59x18::from_integer(3).unwrap());
//! ```

pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::numeric::{
        is_power_of_two, most_significant_bit, mul_div, next_power_of_two, ErrorKind,
        Fixed59x18, NumericError, NumericResult,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use ethnum::{i256, u256};

    fn fx(raw: i128) -> Fixed59x18 {
        Fixed59x18::from_raw(i256::new(raw))
    }

    #[test]
    fn test_concrete_scenarios() {
        assert_eq!(
            fx(2_500_000_000_000_000_000).floor().unwrap(),
            fx(2_000_000_000_000_000_000)
        );
        assert_eq!(
            fx(2_500_000_000_000_000_000).ceil().unwrap(),
            fx(3_000_000_000_000_000_000)
        );
        assert_eq!(
            fx(-2_500_000_000_000_000_000).floor().unwrap(),
            fx(-3_000_000_000_000_000_000)
        );
        assert_eq!(
            fx(2_000_000_000_000_000_000)
                .checked_mul(fx(3_000_000_000_000_000_000))
                .unwrap(),
            fx(6_000_000_000_000_000_000)
        );
        assert_eq!(
            fx(1_000_000_000_000_000_000)
                .checked_div(fx(4_000_000_000_000_000_000))
                .unwrap(),
            fx(250_000_000_000_000_000)
        );
        assert_eq!(most_significant_bit(u256::new(255)), 7);
    }

    #[test]
    fn test_logarithm_sanity() {
        assert_eq!(Fixed59x18::unit().log2().unwrap(), Fixed59x18::ZERO);
        assert_eq!(
            Fixed59x18::unit().checked_mul_int(2).unwrap().log2().unwrap(),
            Fixed59x18::unit()
        );

        let ln_e = Fixed59x18::e().ln().unwrap();
        let diff = Fixed59x18::unit().checked_sub(ln_e).unwrap().abs().unwrap();
        assert!(diff < fx(100), "ln(e) = {}", ln_e);
    }

    #[test]
    fn test_error_kinds_surface() {
        let domain = Fixed59x18::ZERO.ln().unwrap_err();
        assert_eq!(domain.kind(), ErrorKind::Domain);

        let range = Fixed59x18::MIN.abs().unwrap_err();
        assert_eq!(range.kind(), ErrorKind::Range);

        let zero = is_power_of_two(u256::ZERO).unwrap_err();
        assert_eq!(zero, NumericError::Zero);
    }
}
