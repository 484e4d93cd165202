// ============================================================================
// Numeric Module
// Signed 59.18 fixed-point arithmetic on 256-bit integers
// ============================================================================
//
// This module provides:
// - Fixed59x18: fixed-point decimal with 18 fractional digits
// - Rounding, scaled multiply/divide, logarithms, exponentials, square root
// - Bit primitives and full-precision multiply-divide over u256
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics, no silent wraparound)
// - Bounded, input-independent iteration counts
// - Pure functions; nothing is shared between calls

mod bits;
mod errors;
mod exponential;
mod fixed_point;
mod full_math;
mod logarithm;
mod roots;

pub use bits::{is_power_of_two, most_significant_bit, next_power_of_two};
pub use errors::{ErrorKind, NumericError, NumericResult};
pub use fixed_point::{Fixed59x18, DECIMALS};
pub use full_math::mul_div;
