// ============================================================================
// Fixed-Point 59.18
// Signed 256-bit fixed-point arithmetic with 18 fractional digits
// ============================================================================

use super::errors::{NumericError, NumericResult};
use ethnum::i256;
use std::fmt;
use std::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Signed fixed-point number with 59 integer digits and 18 fractional digits.
///
/// Internally stores `value × 10^18` as an `i256`.
///
/// # Value Range
/// - Minimum: -57896044618658097711785492504343953926634992332820282019728.792003956564819968
/// - Maximum: +57896044618658097711785492504343953926634992332820282019728.792003956564819967
/// - Precision: 0.000000000000000001
///
/// # Rounding conventions
/// - `floor`/`ceil`/`frac` use truncating remainders (the sign follows the dividend).
/// - [`checked_div`](Self::checked_div) truncates toward zero.
/// - [`checked_mul`](Self::checked_mul) rounds half away from zero on the sign of the
///   *left* operand, not of the product.
///
/// # Example
/// ```
/// use fixed_point_engine::numeric::Fixed59x18;
///
/// let a: Fixed59x18 = "2".parse().unwrap();
/// let b: Fixed59x18 = "3".parse().unwrap();
/// assert_eq!(a.checked_mul(b).unwrap().to_string(), "6.000000000000000000");
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Fixed59x18(i256);

// ============================================================================
// Scale Constants
// ============================================================================

/// Number of fractional decimal digits
pub const DECIMALS: u32 = 18;

/// 10^18 as a raw value
pub(crate) const SCALE: i256 = i256::new(1_000_000_000_000_000_000);

/// 5 × 10^17 as a raw value
pub(crate) const HALF_SCALE: i256 = i256::new(500_000_000_000_000_000);

/// 2 × 10^18 as a raw value
pub(crate) const TWICE_SCALE: i256 = i256::new(2_000_000_000_000_000_000);

/// Largest multiple of 10^18 not exceeding `i256::MAX`
const MAX_WHOLE_RAW: i256 = i256::from_words(i128::MAX, -792_003_956_564_819_968);

/// Smallest multiple of 10^18 not below `i256::MIN`
const MIN_WHOLE_RAW: i256 = i256::from_words(i128::MIN, 792_003_956_564_819_968);

/// Compute 10^n at compile time
const fn pow10(n: u32) -> i128 {
    let mut result: i128 = 1;
    let mut i = 0;
    while i < n {
        result *= 10;
        i += 1;
    }
    result
}

/// Range error matching the sign of the value that failed to fit.
#[inline]
pub(crate) const fn range_error(negative: bool) -> NumericError {
    if negative {
        NumericError::Underflow
    } else {
        NumericError::Overflow
    }
}

impl Fixed59x18 {
    /// One (1.0)
    pub const UNIT: Self = Self(SCALE);

    /// One half (0.5), used for rounding
    pub const HALF_UNIT: Self = Self(HALF_SCALE);

    /// Two (2.0)
    pub const TWICE_UNIT: Self = Self(TWICE_SCALE);

    /// Zero value
    pub const ZERO: Self = Self(i256::ZERO);

    /// One (1.0), alias of [`UNIT`](Self::UNIT)
    pub const ONE: Self = Self(SCALE);

    /// Maximum representable value
    pub const MAX: Self = Self(i256::MAX);

    /// Minimum representable value
    pub const MIN: Self = Self(i256::MIN);

    /// Largest whole number; upper bound for [`ceil`](Self::ceil)
    pub const MAX_WHOLE: Self = Self(MAX_WHOLE_RAW);

    /// Smallest whole number; lower bound for [`floor`](Self::floor)
    pub const MIN_WHOLE: Self = Self(MIN_WHOLE_RAW);

    /// Euler's number
    pub const E: Self = Self(i256::new(2_718_281_828_459_045_235));

    /// Archimedes' constant
    pub const PI: Self = Self(i256::new(3_141_592_653_589_793_238));

    /// Natural logarithm of 2
    pub const LN2: Self = Self(i256::new(693_147_180_559_945_309));

    /// Binary logarithm of e
    pub const LOG2_E: Self = Self(i256::new(1_442_695_040_888_963_407));

    /// The scale factor as a fixed-point value (1.0).
    #[inline]
    pub const fn unit() -> Self {
        Self::UNIT
    }

    /// Euler's number as a fixed-point value.
    #[inline]
    pub const fn e() -> Self {
        Self::E
    }

    /// π as a fixed-point value.
    #[inline]
    pub const fn pi() -> Self {
        Self::PI
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw internal representation (`value × 10^18`).
    #[inline]
    pub const fn from_raw(raw: i256) -> Self {
        Self(raw)
    }

    /// Create from an integer value.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the scaled value does not fit.
    #[inline]
    pub fn from_integer(value: impl Into<i256>) -> NumericResult<Self> {
        let value = value.into();
        value
            .checked_mul(SCALE)
            .map(Self)
            .ok_or(range_error(value < i256::ZERO))
    }

    /// Create from integer and fractional parts.
    ///
    /// # Arguments
    /// - `integer`: The integer part (can be negative)
    /// - `fraction`: The fractional part in units of 10^-18 (must be < 10^18)
    ///
    /// The fraction takes the sign of `integer`, so `from_parts(-5, 500_000_000_000_000_000)`
    /// is -5.5.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the fraction is out of range, or a range error if the
    /// result does not fit.
    pub fn from_parts(integer: impl Into<i256>, fraction: u64) -> NumericResult<Self> {
        let integer = integer.into();
        compose(integer < i256::ZERO, integer, fraction)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (scaled by 10^18).
    #[inline]
    pub const fn raw_value(self) -> i256 {
        self.0
    }

    /// Get the integer part (truncated toward zero).
    #[inline]
    pub fn integer_part(self) -> i256 {
        self.0 / SCALE
    }

    /// Get the magnitude of the fractional part in units of 10^-18.
    #[inline]
    pub fn fractional_part(self) -> u64 {
        let (_, low) = (self.0 % SCALE).unsigned_abs().into_words();
        // the remainder is below 10^18 and always fits
        low as u64
    }

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == i256::ZERO
    }

    /// Check if value is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > i256::ZERO
    }

    /// Check if value is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < i256::ZERO
    }

    /// Check if value has no fractional part.
    #[inline]
    pub fn is_integer(self) -> bool {
        self.0 % SCALE == i256::ZERO
    }

    // ========================================================================
    // Rounding & Decomposition
    // ========================================================================

    /// Get absolute value.
    ///
    /// # Errors
    /// Returns `Overflow` for [`MIN`](Self::MIN), whose magnitude is not representable.
    #[inline]
    pub fn abs(self) -> NumericResult<Self> {
        if self.0 == i256::MIN {
            Err(NumericError::Overflow)
        } else if self.0 < i256::ZERO {
            Ok(Self(-self.0))
        } else {
            Ok(self)
        }
    }

    /// Round down to the nearest whole number (toward negative infinity).
    ///
    /// # Errors
    /// Returns `Underflow` when `self < MIN_WHOLE`, since the result would not fit.
    pub fn floor(self) -> NumericResult<Self> {
        if self.0 < MIN_WHOLE_RAW {
            return Err(NumericError::Underflow);
        }

        let remainder = self.0 % SCALE;
        if remainder == i256::ZERO {
            return Ok(self);
        }

        let truncated = self.0 - remainder;
        if self.0 < i256::ZERO {
            Ok(Self(truncated - SCALE))
        } else {
            Ok(Self(truncated))
        }
    }

    /// Round up to the nearest whole number (toward positive infinity).
    ///
    /// # Errors
    /// Returns `Overflow` when `self > MAX_WHOLE`, since the result would not fit.
    pub fn ceil(self) -> NumericResult<Self> {
        if self.0 > MAX_WHOLE_RAW {
            return Err(NumericError::Overflow);
        }

        let remainder = self.0 % SCALE;
        if remainder == i256::ZERO {
            return Ok(self);
        }

        let truncated = self.0 - remainder;
        if self.0 > i256::ZERO {
            Ok(Self(truncated + SCALE))
        } else {
            Ok(Self(truncated))
        }
    }

    /// Truncating remainder modulo 1.0.
    ///
    /// For non-negative values this equals `self - floor(self)`. For negative values the
    /// result is negative (or zero): `frac(-2.5) == -0.5`.
    #[inline]
    pub fn frac(self) -> Self {
        Self(self.0 % SCALE)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(range_error(rhs.0 < i256::ZERO))
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(range_error(rhs.0 > i256::ZERO))
    }

    /// Checked fixed-point multiplication.
    ///
    /// Computes the double-scaled product, adds half a unit when `self > 0` (subtracts it
    /// otherwise) and divides by 10^18 truncating toward zero. The rounding direction is
    /// taken from `self` alone, so `(-0.5e-18) × 1e-18` rounds to `-1e-18` while
    /// `1e-18 × (-0.5e-18)` rounds to zero.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if `self × rhs` exceeds the 256-bit width.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        let negative = (self.0 < i256::ZERO) != (rhs.0 < i256::ZERO);
        let product = self
            .0
            .checked_mul(rhs.0)
            .ok_or(range_error(negative))?;

        let rounded = if self.0 > i256::ZERO {
            product.checked_add(HALF_SCALE)
        } else {
            product.checked_sub(HALF_SCALE)
        }
        .ok_or(range_error(self.0 <= i256::ZERO))?;

        Ok(Self(rounded / SCALE))
    }

    /// Checked fixed-point division, truncating toward zero.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `Overflow` or `Underflow` if `self × 10^18` exceeds the 256-bit width
    #[inline]
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs.0 == i256::ZERO {
            return Err(NumericError::DivisionByZero);
        }

        let scaled = self
            .0
            .checked_mul(SCALE)
            .ok_or(range_error(self.0 < i256::ZERO))?;

        scaled
            .checked_div(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Multiply by an integer (no scaling needed).
    #[inline]
    pub fn checked_mul_int(self, rhs: impl Into<i256>) -> NumericResult<Self> {
        let rhs = rhs.into();
        self.0
            .checked_mul(rhs)
            .map(Self)
            .ok_or(range_error((self.0 < i256::ZERO) != (rhs < i256::ZERO)))
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Returns the minimum of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Returns the maximum of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

/// Build a value from a signed integer part and fractional digits carrying `negative`'s sign.
fn compose(negative: bool, integer: i256, fraction: u64) -> NumericResult<Fixed59x18> {
    if i256::from(fraction) >= SCALE {
        return Err(NumericError::InvalidInput);
    }

    // accumulate toward the sign so that MIN stays reachable
    let fraction = if negative {
        -i256::from(fraction)
    } else {
        i256::from(fraction)
    };

    integer
        .checked_mul(SCALE)
        .and_then(|scaled| scaled.checked_add(fraction))
        .map(Fixed59x18)
        .ok_or(range_error(negative))
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Fixed59x18 {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Fixed59x18 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Fixed59x18 {}

impl PartialOrd for Fixed59x18 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fixed59x18 {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::hash::Hash for Fixed59x18 {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Neg for Fixed59x18 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

// Infallible Add/Sub for ergonomics (panics on overflow - use checked_* in production)
impl Add for Fixed59x18 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("Fixed59x18 addition overflow")
    }
}

impl Sub for Fixed59x18 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("Fixed59x18 subtraction overflow")
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Fixed59x18 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed59x18({}, raw={})", self, self.0)
    }
}

impl fmt::Display for Fixed59x18 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int_part = self.integer_part();
        let frac_part = self.fractional_part();

        if self.0 < i256::ZERO && int_part == i256::ZERO {
            // Handle -0.xxx case
            write!(f, "-0.{:0>width$}", frac_part, width = DECIMALS as usize)
        } else {
            write!(f, "{}.{:0>width$}", int_part, frac_part, width = DECIMALS as usize)
        }
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl Fixed59x18 {
    /// Convert from rust_decimal::Decimal.
    ///
    /// Every `Decimal` fits the integer range; only scales above 18 can fail.
    ///
    /// # Errors
    /// - `PrecisionLoss` if significant digits below 10^-18 would be lost
    pub fn from_decimal(d: rust_decimal::Decimal) -> NumericResult<Self> {
        let mantissa = i256::from(d.mantissa());
        let scale = d.scale();

        if scale <= DECIMALS {
            let multiplier = i256::from(pow10(DECIMALS - scale));
            return mantissa
                .checked_mul(multiplier)
                .map(Self)
                .ok_or(range_error(d.is_sign_negative()));
        }

        let divisor = i256::from(pow10(scale - DECIMALS));
        if mantissa % divisor != i256::ZERO {
            return Err(NumericError::PrecisionLoss);
        }
        Ok(Self(mantissa / divisor))
    }

    /// Convert to rust_decimal::Decimal with scale 18.
    ///
    /// # Errors
    /// Returns a range error when the raw value exceeds the 96-bit `Decimal` mantissa.
    pub fn to_decimal(self) -> NumericResult<rust_decimal::Decimal> {
        let err = range_error(self.0 < i256::ZERO);
        if self.0 > i256::from(i128::MAX) || self.0 < i256::from(i128::MIN) {
            return Err(err);
        }
        let (_, raw) = self.0.into_words();
        rust_decimal::Decimal::try_from_i128_with_scale(raw, DECIMALS).map_err(|_| err)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for Fixed59x18 {
    type Err = NumericError;

    /// Parse from a decimal string.
    ///
    /// # Examples
    /// - "123" -> 123.000000000000000000
    /// - "123.456" -> 123.456000000000000000
    /// - "-0.001" -> -0.001000000000000000
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        // Check for sign
        let (is_negative, s) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else {
            (false, s)
        };

        // Split on decimal point
        let (int_str, frac_str) = match s.split_once('.') {
            Some((int_str, frac_str)) => (int_str, frac_str),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        let no_digits = int_str.is_empty() && frac_str.is_empty();
        if no_digits || !all_digits(int_str) || !all_digits(frac_str) {
            return Err(NumericError::InvalidInput);
        }

        // Parse integer part; digits only, so a failure means it is too large
        let int_val = if int_str.is_empty() {
            i256::ZERO
        } else {
            i256::from_str_radix(int_str, 10).map_err(|_| range_error(is_negative))?
        };

        // Parse fractional part
        let frac_val: u64 = if frac_str.is_empty() {
            0
        } else if frac_str.len() > DECIMALS as usize {
            return Err(NumericError::PrecisionLoss);
        } else {
            // Pad with zeros to reach DECIMALS length
            let padded = format!("{:0<width$}", frac_str, width = DECIMALS as usize);
            padded.parse().map_err(|_| NumericError::InvalidInput)?
        };

        let int_val = if is_negative { -int_val } else { int_val };
        compose(is_negative, int_val, frac_val)
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for Fixed59x18 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Fixed59x18 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
