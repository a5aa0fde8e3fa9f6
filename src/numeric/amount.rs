// ============================================================================
// Amount Representations
// Numeric contract shared by every type a Position amount can be stored in
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::fixed_decimal::FixedDecimal;
use super::raw::{div_round_half_even, pow10, RawInt};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::hash::Hash;

/// Largest scale a `rust_decimal::Decimal` can carry.
pub const MAX_DECIMAL_SCALE: u8 = 28;

/// A fixed-scale numeric representation for monetary amounts.
///
/// Implemented by every [`FixedDecimal`] (scale fixed by the type) and by
/// `rust_decimal::Decimal` (scale carried by the value). Every method that
/// has to drop digits rounds half to even.
pub trait AmountRepr:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Decimal places fixed by the type, `None` when the value carries them.
    const DECIMALS: Option<u8>;

    /// Bring `value` to `scale` decimal places, rounding half to even.
    fn from_decimal_rounded(value: Decimal, scale: u8) -> NumericResult<Self>;

    /// Bring `value` to `scale` decimal places, failing with `PrecisionLoss`
    /// instead of rounding.
    fn from_decimal_exact(value: Decimal, scale: u8) -> NumericResult<Self>;

    fn to_decimal(self) -> NumericResult<Decimal>;

    fn zero(scale: u8) -> NumericResult<Self>;

    fn one(scale: u8) -> NumericResult<Self>;

    /// Decimal places this value is held at.
    fn scale(&self) -> u8;

    fn is_zero(&self) -> bool;

    /// Exact same-scale addition.
    fn try_add(self, rhs: Self) -> NumericResult<Self>;

    /// Exact same-scale subtraction.
    fn try_sub(self, rhs: Self) -> NumericResult<Self>;

    fn try_neg(self) -> NumericResult<Self>;

    /// Multiply by a dimensionless scalar, keeping the scale.
    fn try_mul_scalar(self, scalar: Decimal) -> NumericResult<Self>;

    /// Divide by a dimensionless scalar, keeping the scale.
    fn try_div_scalar(self, scalar: Decimal) -> NumericResult<Self>;

    /// Dimensionless ratio of two same-scale amounts.
    fn try_ratio(self, rhs: Self) -> NumericResult<Decimal>;
}

fn check_decimal_scale(scale: u8) -> NumericResult<u32> {
    if scale > MAX_DECIMAL_SCALE {
        Err(NumericError::ScaleMismatch)
    } else {
        Ok(u32::from(scale))
    }
}

fn ratio_of(numerator: i128, denominator: i128) -> NumericResult<Decimal> {
    if denominator == 0 {
        return Err(NumericError::DivisionByZero);
    }

    let numerator =
        Decimal::try_from_i128_with_scale(numerator, 0).map_err(|_| NumericError::Overflow)?;
    let denominator =
        Decimal::try_from_i128_with_scale(denominator, 0).map_err(|_| NumericError::Overflow)?;

    numerator
        .checked_div(denominator)
        .map(|ratio| ratio.normalize())
        .ok_or(NumericError::Overflow)
}

// ============================================================================
// FixedDecimal
// ============================================================================

impl<const D: u8, R: RawInt> FixedDecimal<D, R> {
    #[inline]
    fn expect_scale(scale: u8) -> NumericResult<()> {
        if scale == D {
            Ok(())
        } else {
            Err(NumericError::ScaleMismatch)
        }
    }

    /// `numerator / denominator` rounded half to even, narrowed to `R`.
    fn narrow_rounded(numerator: i128, denominator: i128) -> NumericResult<Self> {
        let raw = div_round_half_even(numerator, denominator).ok_or(NumericError::Overflow)?;
        R::from_wide(raw).map(Self::from_raw).ok_or(if raw < 0 {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        })
    }
}

impl<const D: u8, R: RawInt> AmountRepr for FixedDecimal<D, R> {
    const DECIMALS: Option<u8> = Some(D);

    fn from_decimal_rounded(value: Decimal, scale: u8) -> NumericResult<Self> {
        Self::expect_scale(scale)?;
        FixedDecimal::<D, R>::from_decimal_rounded(value)
    }

    fn from_decimal_exact(value: Decimal, scale: u8) -> NumericResult<Self> {
        Self::expect_scale(scale)?;
        FixedDecimal::<D, R>::from_decimal(value)
    }

    fn to_decimal(self) -> NumericResult<Decimal> {
        FixedDecimal::<D, R>::to_decimal(self)
    }

    fn zero(scale: u8) -> NumericResult<Self> {
        Self::expect_scale(scale)?;
        Ok(Self::ZERO)
    }

    fn one(scale: u8) -> NumericResult<Self> {
        Self::expect_scale(scale)?;
        FixedDecimal::<D, R>::one()
    }

    #[inline]
    fn scale(&self) -> u8 {
        D
    }

    #[inline]
    fn is_zero(&self) -> bool {
        FixedDecimal::<D, R>::is_zero(*self)
    }

    #[inline]
    fn try_add(self, rhs: Self) -> NumericResult<Self> {
        self.checked_add(rhs)
    }

    #[inline]
    fn try_sub(self, rhs: Self) -> NumericResult<Self> {
        self.checked_sub(rhs)
    }

    #[inline]
    fn try_neg(self) -> NumericResult<Self> {
        self.checked_neg()
    }

    fn try_mul_scalar(self, scalar: Decimal) -> NumericResult<Self> {
        let scalar = scalar.normalize();
        match self.raw_value().widen().checked_mul(scalar.mantissa()) {
            Some(product) => Self::narrow_rounded(product, pow10(scalar.scale())),
            // Scalar too precise for an i128 product; let Decimal trim it
            None => self
                .to_decimal()?
                .checked_mul(scalar)
                .ok_or(NumericError::Overflow)
                .and_then(FixedDecimal::<D, R>::from_decimal_rounded),
        }
    }

    fn try_div_scalar(self, scalar: Decimal) -> NumericResult<Self> {
        if scalar.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        let scalar = scalar.normalize();
        match self.raw_value().widen().checked_mul(pow10(scalar.scale())) {
            Some(numerator) => Self::narrow_rounded(numerator, scalar.mantissa()),
            None => self
                .to_decimal()?
                .checked_div(scalar)
                .ok_or(NumericError::Overflow)
                .and_then(FixedDecimal::<D, R>::from_decimal_rounded),
        }
    }

    fn try_ratio(self, rhs: Self) -> NumericResult<Decimal> {
        ratio_of(self.raw_value().widen(), rhs.raw_value().widen())
    }
}

// ============================================================================
// rust_decimal::Decimal
// ============================================================================

/// Round to `scale` places and pad so the value carries exactly `scale`.
fn rescale_decimal(value: Decimal, scale: u8) -> NumericResult<Decimal> {
    let target = check_decimal_scale(scale)?;
    let mut scaled = value.round_dp_with_strategy(target, RoundingStrategy::MidpointNearestEven);
    scaled.rescale(target);
    if scaled.scale() != target {
        // Padding ran out of mantissa digits
        return Err(NumericError::Overflow);
    }
    if scaled.is_zero() {
        scaled.set_sign_positive(true);
    }
    Ok(scaled)
}

/// `rust_decimal` sheds fractional digits instead of overflowing; treat a
/// result that lost scale as out of range.
fn keep_scale(result: Decimal, operand: Decimal) -> NumericResult<Decimal> {
    if result.scale() == operand.scale() {
        Ok(result)
    } else if result.is_sign_negative() {
        Err(NumericError::Underflow)
    } else {
        Err(NumericError::Overflow)
    }
}

impl AmountRepr for Decimal {
    const DECIMALS: Option<u8> = None;

    fn from_decimal_rounded(value: Decimal, scale: u8) -> NumericResult<Self> {
        rescale_decimal(value, scale)
    }

    fn from_decimal_exact(value: Decimal, scale: u8) -> NumericResult<Self> {
        let scaled = rescale_decimal(value, scale)?;
        if scaled != value {
            return Err(NumericError::PrecisionLoss);
        }
        Ok(scaled)
    }

    fn to_decimal(self) -> NumericResult<Decimal> {
        Ok(self)
    }

    fn zero(scale: u8) -> NumericResult<Self> {
        rescale_decimal(Decimal::ZERO, scale)
    }

    fn one(scale: u8) -> NumericResult<Self> {
        rescale_decimal(Decimal::ONE, scale)
    }

    #[inline]
    fn scale(&self) -> u8 {
        Decimal::scale(self) as u8
    }

    #[inline]
    fn is_zero(&self) -> bool {
        Decimal::is_zero(self)
    }

    fn try_add(self, rhs: Self) -> NumericResult<Self> {
        if Decimal::scale(&self) != Decimal::scale(&rhs) {
            return Err(NumericError::ScaleMismatch);
        }
        let sum = Decimal::checked_add(self, rhs).ok_or(NumericError::Overflow)?;
        keep_scale(sum, self)
    }

    fn try_sub(self, rhs: Self) -> NumericResult<Self> {
        if Decimal::scale(&self) != Decimal::scale(&rhs) {
            return Err(NumericError::ScaleMismatch);
        }
        let difference = Decimal::checked_sub(self, rhs).ok_or(NumericError::Overflow)?;
        keep_scale(difference, self)
    }

    fn try_neg(self) -> NumericResult<Self> {
        if self.is_zero() {
            return Ok(self);
        }
        Ok(-self)
    }

    fn try_mul_scalar(self, scalar: Decimal) -> NumericResult<Self> {
        let product = Decimal::checked_mul(self, scalar).ok_or(NumericError::Overflow)?;
        rescale_decimal(product, AmountRepr::scale(&self))
    }

    fn try_div_scalar(self, scalar: Decimal) -> NumericResult<Self> {
        if scalar.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let quotient = Decimal::checked_div(self, scalar).ok_or(NumericError::Overflow)?;
        rescale_decimal(quotient, AmountRepr::scale(&self))
    }

    fn try_ratio(self, rhs: Self) -> NumericResult<Decimal> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Decimal::checked_div(self, rhs)
            .map(|ratio| ratio.normalize())
            .ok_or(NumericError::Overflow)
    }
}
