// ============================================================================
// Fixed-Point Decimal
// Scaled-integer decimal with compile-time precision and storage width
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::raw::{div_round_half_even, pow10, RawInt};
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg, Sub};

/// Fixed-point decimal number with compile-time precision.
///
/// Internally stores `value × 10^DECIMALS` in the storage integer `R`.
///
/// # Type Parameters
/// - `DECIMALS`: Number of decimal places (0-38, bounded by `R`).
/// - `R`: Storage integer (`i32`, `i64` or `i128`). Default is `i64`.
///
/// # Value Range
/// With DECIMALS=2 and the default `i64` storage:
/// - Minimum: -92,233,720,368,547,758.08
/// - Maximum: +92,233,720,368,547,758.07
/// - Precision: 0.01 (one cent)
///
/// # Rounding
/// Every operation that has to drop digits rounds half to even.
///
/// # Example
/// ```ignore
/// use cash_positions::numeric::FixedDecimal;
///
/// let price = FixedDecimal::<2>::from_integer(100)?;  // 100.00
/// let qty = "2.5".parse::<FixedDecimal<2>>()?;        // 2.50
/// let total = price.checked_mul(qty)?;                // 250.00
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct FixedDecimal<const DECIMALS: u8, R = i64>(R);

/// Fixed-point decimal stored in 128 bits.
pub type WideDecimal<const DECIMALS: u8> = FixedDecimal<DECIMALS, i128>;

/// Fixed-point decimal stored in 32 bits.
pub type CompactDecimal<const DECIMALS: u8> = FixedDecimal<DECIMALS, i32>;

const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

impl<const D: u8, R: RawInt> FixedDecimal<D, R> {
    /// The scale factor (10^DECIMALS)
    pub const SCALE: i128 = pow10(D as u32);

    /// Zero value
    pub const ZERO: Self = Self(R::ZERO);

    /// Maximum representable value
    pub const MAX: Self = Self(R::MAX);

    /// Minimum representable value
    pub const MIN: Self = Self(R::MIN);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw internal representation.
    ///
    /// Use this when you already have a scaled value.
    #[inline]
    pub const fn from_raw(raw: R) -> Self {
        Self(raw)
    }

    /// Narrow a scaled `i128` into the storage type.
    #[inline]
    fn from_wide(raw: i128) -> NumericResult<Self> {
        R::from_wide(raw).map(Self).ok_or(if raw < 0 {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        })
    }

    /// Create from an integer value.
    ///
    /// # Errors
    /// Returns `Overflow` if the value is too large to represent.
    #[inline]
    pub fn from_integer(value: i64) -> NumericResult<Self> {
        (value as i128)
            .checked_mul(Self::SCALE)
            .ok_or(NumericError::Overflow)
            .and_then(Self::from_wide)
    }

    /// One (1.0) at this scale.
    ///
    /// # Errors
    /// Returns `Overflow` when 10^DECIMALS does not fit the storage type.
    #[inline]
    pub fn one() -> NumericResult<Self> {
        Self::from_wide(Self::SCALE)
    }

    /// Create from integer and fractional parts.
    ///
    /// # Arguments
    /// - `integer`: The integer part (can be negative)
    /// - `fraction`: The fractional part (must be < SCALE, always positive)
    ///
    /// # Example
    /// ```ignore
    /// // Create 123.45 with 2 decimals
    /// let x = FixedDecimal::<2>::from_parts(123, 45)?;
    /// ```
    #[inline]
    pub fn from_parts(integer: i128, fraction: u128) -> NumericResult<Self> {
        if fraction >= Self::SCALE as u128 {
            return Err(NumericError::InvalidInput);
        }

        let int_scaled = integer
            .checked_mul(Self::SCALE)
            .ok_or(NumericError::Overflow)?;

        let frac_signed = if integer < 0 {
            -(fraction as i128)
        } else {
            fraction as i128
        };

        int_scaled
            .checked_add(frac_signed)
            .ok_or(NumericError::Overflow)
            .and_then(Self::from_wide)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (scaled).
    ///
    /// This is the value × 10^DECIMALS.
    #[inline]
    pub fn raw_value(self) -> R {
        self.0
    }

    /// Get the integer part (truncated toward zero).
    #[inline]
    pub fn integer_part(self) -> i128 {
        self.0.widen() / Self::SCALE
    }

    /// Get the fractional part as a positive value.
    #[inline]
    pub fn fractional_part(self) -> u128 {
        (self.0.widen() % Self::SCALE).unsigned_abs()
    }

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == R::ZERO
    }

    /// Check if value is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > R::ZERO
    }

    /// Check if value is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < R::ZERO
    }

    /// Get absolute value.
    #[inline]
    pub fn abs(self) -> NumericResult<Self> {
        if self.is_negative() {
            self.checked_neg()
        } else {
            Ok(self)
        }
    }

    /// Checked negation.
    ///
    /// # Errors
    /// Returns `Overflow` when negating the minimum value.
    #[inline]
    pub fn checked_neg(self) -> NumericResult<Self> {
        self.0.checked_neg().map(Self).ok_or(NumericError::Overflow)
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
        self.0.checked_add(rhs.0).map(Self).ok_or_else(|| {
            if rhs.0 > R::ZERO {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_sub(rhs.0).map(Self).ok_or_else(|| {
            if rhs.0 < R::ZERO {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    /// Checked multiplication with round half-to-even.
    ///
    /// Uses an i128 intermediate, then rounds and scales back to `R`.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        let product = self
            .0
            .widen()
            .checked_mul(rhs.0.widen())
            .ok_or(NumericError::Overflow)?;

        div_round_half_even(product, Self::SCALE)
            .ok_or(NumericError::Overflow)
            .and_then(Self::from_wide)
    }

    /// Checked division with round half-to-even.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero divisor, `Overflow` or
    /// `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        let numerator = self
            .0
            .widen()
            .checked_mul(Self::SCALE)
            .ok_or(NumericError::Overflow)?;

        div_round_half_even(numerator, rhs.0.widen())
            .ok_or(NumericError::Overflow)
            .and_then(Self::from_wide)
    }

    /// Multiply by an integer (no scaling needed).
    ///
    /// More efficient than `checked_mul` when multiplying by a whole number.
    #[inline]
    pub fn checked_mul_int(self, rhs: i64) -> NumericResult<Self> {
        self.0
            .widen()
            .checked_mul(rhs as i128)
            .ok_or(NumericError::Overflow)
            .and_then(Self::from_wide)
    }

    // ========================================================================
    // Storage Conversion
    // ========================================================================

    /// Move to a storage type that holds every value of `R`.
    #[inline]
    pub fn widen<W: RawInt + From<R>>(self) -> FixedDecimal<D, W> {
        FixedDecimal(W::from(self.0))
    }

    /// Move to an arbitrary storage type, failing if the value does not fit.
    #[inline]
    pub fn narrow<N: RawInt>(self) -> NumericResult<FixedDecimal<D, N>> {
        FixedDecimal::<D, N>::from_wide(self.0.widen())
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<const D: u8, R: RawInt> Default for FixedDecimal<D, R> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const D: u8, R: RawInt> PartialEq for FixedDecimal<D, R> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<const D: u8, R: RawInt> Eq for FixedDecimal<D, R> {}

impl<const D: u8, R: RawInt> PartialOrd for FixedDecimal<D, R> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const D: u8, R: RawInt> Ord for FixedDecimal<D, R> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<const D: u8, R: RawInt> Hash for FixedDecimal<D, R> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<const D: u8, R: RawInt> Neg for FixedDecimal<D, R> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

// Infallible Add/Sub for ergonomics (panics on overflow - use checked_* in production)
impl<const D: u8, R: RawInt> Add for FixedDecimal<D, R> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("FixedDecimal addition overflow")
    }
}

impl<const D: u8, R: RawInt> Sub for FixedDecimal<D, R> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("FixedDecimal subtraction overflow")
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<const D: u8, R: RawInt> fmt::Debug for FixedDecimal<D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FixedDecimal<{}, {}>({}, raw={})",
            D,
            R::NAME,
            self,
            self.0
        )
    }
}

impl<const D: u8, R: RawInt> fmt::Display for FixedDecimal<D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int_part = self.integer_part();
        let frac_part = self.fractional_part();

        if D == 0 {
            write!(f, "{}", int_part)
        } else if self.is_negative() && int_part == 0 {
            // Handle -0.xxx case
            write!(f, "-0.{:0>width$}", frac_part, width = D as usize)
        } else {
            write!(f, "{}.{:0>width$}", int_part, frac_part, width = D as usize)
        }
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl<const D: u8, R: RawInt> FixedDecimal<D, R> {
    /// Scale a decimal to DECIMALS places, rounding half to even.
    fn scaled_mantissa(d: Decimal) -> NumericResult<(i128, Decimal)> {
        let target = D as u32;
        let rounded = if d.scale() > target {
            d.round_dp_with_strategy(target, ROUNDING)
        } else {
            d
        };

        let shift = target - rounded.scale();
        let raw = rounded
            .mantissa()
            .checked_mul(pow10(shift))
            .ok_or(NumericError::Overflow)?;

        Ok((raw, rounded))
    }

    /// Convert from rust_decimal::Decimal without rounding.
    ///
    /// # Errors
    /// - `PrecisionLoss` if significant digits would be lost
    /// - `Overflow` / `Underflow` if the value is out of range
    pub fn from_decimal(d: Decimal) -> NumericResult<Self> {
        let (raw, rounded) = Self::scaled_mantissa(d)?;
        if rounded != d {
            return Err(NumericError::PrecisionLoss);
        }
        Self::from_wide(raw)
    }

    /// Convert from rust_decimal::Decimal, rounding half to even.
    ///
    /// # Errors
    /// Returns `Overflow` / `Underflow` if the value is out of range.
    pub fn from_decimal_rounded(d: Decimal) -> NumericResult<Self> {
        let (raw, _) = Self::scaled_mantissa(d)?;
        Self::from_wide(raw)
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// # Errors
    /// Returns `Overflow` when the raw value exceeds the 96-bit decimal
    /// mantissa or DECIMALS exceeds 28.
    pub fn to_decimal(self) -> NumericResult<Decimal> {
        Decimal::try_from_i128_with_scale(self.0.widen(), D as u32)
            .map_err(|_| NumericError::Overflow)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl<const D: u8, R: RawInt> std::str::FromStr for FixedDecimal<D, R> {
    type Err = NumericError;

    /// Parse from a decimal string.
    ///
    /// # Examples
    /// - "123" -> 123.00
    /// - "123.45" -> 123.45
    /// - "-0.01" -> -0.01
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumericError::InvalidInput);
        }

        let (is_negative, s) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else {
            (false, s)
        };

        if s.is_empty() || s == "." {
            return Err(NumericError::InvalidInput);
        }

        let (int_str, frac_str) = if let Some(pos) = s.find('.') {
            (&s[..pos], Some(&s[pos + 1..]))
        } else {
            (s, None)
        };

        if int_str.starts_with(['+', '-']) {
            return Err(NumericError::InvalidInput);
        }

        let int_val: i128 = if int_str.is_empty() {
            0
        } else {
            int_str.parse().map_err(|_| NumericError::InvalidInput)?
        };

        let frac_val: u128 = match frac_str {
            None | Some("") => 0,
            Some(frac) if !frac.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(NumericError::InvalidInput);
            },
            Some(frac) if frac.len() > D as usize => {
                return Err(NumericError::PrecisionLoss);
            },
            Some(frac) => {
                // Pad with zeros to reach DECIMALS length
                let padded = format!("{:0<width$}", frac, width = D as usize);
                padded.parse().map_err(|_| NumericError::InvalidInput)?
            },
        };

        let mut result = Self::from_parts(int_val, frac_val)?;
        if is_negative {
            result = result.checked_neg()?;
        }

        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    type FD2 = FixedDecimal<2>;
    type FD9 = FixedDecimal<9>;

    #[test]
    fn test_constants() {
        assert_eq!(FD9::SCALE, 1_000_000_000);
        assert_eq!(FD9::ZERO.raw_value(), 0);
        assert_eq!(FD9::one().unwrap().raw_value(), 1_000_000_000);
        assert_eq!(FixedDecimal::<0>::SCALE, 1);
    }

    #[test]
    fn test_one_overflows_narrow_storage() {
        assert_eq!(CompactDecimal::<10>::one(), Err(NumericError::Overflow));
    }

    #[test]
    fn test_from_integer() {
        let x = FD2::from_integer(100).unwrap();
        assert_eq!(x.raw_value(), 10_000);
        assert_eq!(x.integer_part(), 100);
        assert_eq!(x.fractional_part(), 0);
    }

    #[test]
    fn test_from_parts() {
        let x = FD9::from_parts(123, 456_000_000).unwrap();
        assert_eq!(x.integer_part(), 123);
        assert_eq!(x.fractional_part(), 456_000_000);
        assert_eq!(x.to_string(), "123.456000000");

        let y = FD2::from_parts(-5, 50).unwrap();
        assert_eq!(y.integer_part(), -5);
        assert_eq!(y.fractional_part(), 50);
        assert!(y.is_negative());
    }

    #[test]
    fn test_from_parts_invalid() {
        assert_eq!(FD2::from_parts(1, 100), Err(NumericError::InvalidInput));
    }

    #[test]
    fn test_checked_add() {
        let a = FD2::from_integer(100).unwrap();
        let b = FD2::from_integer(50).unwrap();
        assert_eq!(a.checked_add(b).unwrap().integer_part(), 150);

        let result = FD2::MAX.checked_add(FD2::from_raw(1));
        assert_eq!(result, Err(NumericError::Overflow));
    }

    #[test]
    fn test_checked_sub() {
        let a = FD2::from_integer(100).unwrap();
        let b = FD2::from_integer(30).unwrap();
        assert_eq!(a.checked_sub(b).unwrap().integer_part(), 70);
        assert_eq!(b.checked_sub(a).unwrap().integer_part(), -70);

        let result = FD2::MIN.checked_sub(FD2::from_raw(1));
        assert_eq!(result, Err(NumericError::Underflow));
    }

    #[test]
    fn test_checked_mul() {
        // 2.5 * 4.0 = 10.0
        let a = FD9::from_parts(2, 500_000_000).unwrap();
        let b = FD9::from_integer(4).unwrap();
        let c = a.checked_mul(b).unwrap();
        assert_eq!(c.integer_part(), 10);
        assert_eq!(c.fractional_part(), 0);

        // 1.5 * 1.5 = 2.25
        let x = FD2::from_parts(1, 50).unwrap();
        assert_eq!(x.checked_mul(x).unwrap().to_string(), "2.25");
    }

    #[test]
    fn test_checked_mul_rounds_half_even() {
        // 0.05 * 0.50 = 0.025 -> 0.02
        let a: FD2 = "0.05".parse().unwrap();
        let b: FD2 = "0.50".parse().unwrap();
        assert_eq!(a.checked_mul(b).unwrap().raw_value(), 2);

        // 0.15 * 0.50 = 0.075 -> 0.08
        let c: FD2 = "0.15".parse().unwrap();
        assert_eq!(c.checked_mul(b).unwrap().raw_value(), 8);
    }

    #[test]
    fn test_checked_mul_overflow() {
        let large = FD9::from_integer(1_000_000_000).unwrap();
        assert_eq!(large.checked_mul(large), Err(NumericError::Overflow));
    }

    #[test]
    fn test_checked_div() {
        let ten = FD2::from_integer(10).unwrap();
        let four = FD2::from_integer(4).unwrap();
        assert_eq!(ten.checked_div(four).unwrap().to_string(), "2.50");

        let three = FD2::from_integer(3).unwrap();
        assert_eq!(ten.checked_div(three).unwrap().to_string(), "3.33");

        assert_eq!(ten.checked_div(FD2::ZERO), Err(NumericError::DivisionByZero));
    }

    #[test]
    fn test_comparison() {
        let a = FD2::from_integer(100).unwrap();
        let b = FD2::from_integer(50).unwrap();

        assert!(a > b);
        assert!(b < a);
        assert_eq!(a.min(b), b);
        assert_eq!(a.max(b), a);
    }

    #[test]
    fn test_display() {
        assert_eq!(FD9::from_parts(123, 456_000_000).unwrap().to_string(), "123.456000000");
        assert_eq!(FD2::ZERO.to_string(), "0.00");
        assert_eq!((-FD2::from_parts(0, 10).unwrap()).to_string(), "-0.10");
        assert_eq!(FixedDecimal::<0>::from_integer(100).unwrap().to_string(), "100");
    }

    #[test]
    fn test_debug_names_storage() {
        let x = WideDecimal::<2>::from_integer(1).unwrap();
        assert_eq!(format!("{:?}", x), "FixedDecimal<2, i128>(1.00, raw=100)");
    }

    #[test]
    fn test_from_str() {
        let x: FD9 = "123.456".parse().unwrap();
        assert_eq!(x.integer_part(), 123);
        assert_eq!(x.fractional_part(), 456_000_000);

        let y: FD2 = "-0.01".parse().unwrap();
        assert!(y.is_negative());
        assert_eq!(y.raw_value(), -1);

        let z: FD2 = "42".parse().unwrap();
        assert_eq!(z.raw_value(), 4_200);
    }

    #[test]
    fn test_from_str_invalid() {
        assert_eq!("not_a_number".parse::<FD2>(), Err(NumericError::InvalidInput));
        assert_eq!("1.2x".parse::<FD2>(), Err(NumericError::InvalidInput));
        assert_eq!("--1".parse::<FD2>(), Err(NumericError::InvalidInput));
        assert_eq!("1.123".parse::<FD2>(), Err(NumericError::PrecisionLoss));
    }

    #[test]
    fn test_from_decimal() {
        let x = FD2::from_decimal(dec!(123.45)).unwrap();
        assert_eq!(x.raw_value(), 12_345);

        let padded = FD9::from_decimal(dec!(123.45)).unwrap();
        assert_eq!(padded.fractional_part(), 450_000_000);

        assert_eq!(FD2::from_decimal(dec!(1.005)), Err(NumericError::PrecisionLoss));
    }

    #[test]
    fn test_from_decimal_rounded() {
        assert_eq!(FD2::from_decimal_rounded(dec!(1.005)).unwrap().raw_value(), 100);
        assert_eq!(FD2::from_decimal_rounded(dec!(1.015)).unwrap().raw_value(), 102);
        assert_eq!(FD2::from_decimal_rounded(dec!(-1.015)).unwrap().raw_value(), -102);
        assert_eq!(FD2::from_decimal_rounded(dec!(1.0149)).unwrap().raw_value(), 101);
    }

    #[test]
    fn test_from_decimal_out_of_range() {
        let huge = dec!(100000000000);
        assert_eq!(
            CompactDecimal::<2>::from_decimal(huge),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            CompactDecimal::<2>::from_decimal(-huge),
            Err(NumericError::Underflow)
        );
    }

    #[test]
    fn test_to_decimal() {
        let x = FD9::from_parts(123, 456_000_000).unwrap();
        assert_eq!(x.to_decimal().unwrap().to_string(), "123.456000000");
    }

    #[test]
    fn test_negation_and_abs() {
        let x = FD2::from_integer(100).unwrap();
        assert_eq!((-x).integer_part(), -100);
        assert_eq!((-x).abs().unwrap(), x);
        assert_eq!(FD2::MIN.abs(), Err(NumericError::Overflow));
    }

    #[test]
    fn test_widen_and_narrow() {
        let x = CompactDecimal::<2>::from_integer(12).unwrap();
        let wide: WideDecimal<2> = x.widen();
        assert_eq!(wide.raw_value(), 1_200);

        let back: CompactDecimal<2> = wide.narrow().unwrap();
        assert_eq!(back, x);

        let too_big = WideDecimal::<2>::from_raw(i64::MAX as i128 * 4);
        assert_eq!(too_big.narrow::<i64>(), Err(NumericError::Overflow));
    }

    #[test]
    fn test_zero_operations() {
        let zero = FD2::ZERO;
        let one = FD2::one().unwrap();

        assert_eq!(zero.checked_add(one).unwrap(), one);
        assert_eq!(one.checked_sub(one).unwrap(), zero);
        assert_eq!(zero.checked_mul(one).unwrap(), zero);
    }

    mod quickcheck_props {
        use super::*;
        use quickcheck::quickcheck;

        quickcheck! {
            fn rounding_matches_rust_decimal(mantissa: i64, scale: u8) -> bool {
                let d = Decimal::new(mantissa, u32::from(scale % 10));
                let expected = d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
                FD2::from_decimal_rounded(d)
                    .map(|x| x.to_decimal().unwrap() == expected)
                    .unwrap_or(true)
            }
        }
    }
}
