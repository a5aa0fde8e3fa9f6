// ============================================================================
// Raw Storage Integers
// Signed integer widths a fixed-point decimal can be stored in
// ============================================================================

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::ops::Neg;

/// Signed integer used as the scaled storage of a [`FixedDecimal`].
///
/// All intermediate arithmetic is carried out in `i128`; `widen` and
/// `from_wide` move values in and out of that domain.
///
/// [`FixedDecimal`]: super::FixedDecimal
pub trait RawInt:
    Copy
    + Eq
    + Ord
    + Hash
    + Default
    + fmt::Debug
    + fmt::Display
    + Neg<Output = Self>
    + Into<i128>
    + TryFrom<i128>
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;
    const MIN: Self;
    const MAX: Self;

    /// Short type name used in `Debug` output.
    const NAME: &'static str;

    fn checked_add(self, rhs: Self) -> Option<Self>;

    fn checked_sub(self, rhs: Self) -> Option<Self>;

    fn checked_mul(self, rhs: Self) -> Option<Self>;

    fn checked_neg(self) -> Option<Self>;

    #[inline]
    fn widen(self) -> i128 {
        self.into()
    }

    #[inline]
    fn from_wide(value: i128) -> Option<Self> {
        Self::try_from(value).ok()
    }
}

macro_rules! impl_raw_int {
    ($($t:ty),*) => {
        $(
            impl RawInt for $t {
                const ZERO: Self = 0;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
                const NAME: &'static str = stringify!($t);

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                #[inline]
                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_sub(self, rhs)
                }

                #[inline]
                fn checked_mul(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_mul(self, rhs)
                }

                #[inline]
                fn checked_neg(self) -> Option<Self> {
                    <$t>::checked_neg(self)
                }
            }
        )*
    };
}

impl_raw_int!(i32, i64, i128);

/// Compute 10^n at compile time. Fails const evaluation above 10^38.
pub(crate) const fn pow10(n: u32) -> i128 {
    let mut result: i128 = 1;
    let mut i = 0;
    while i < n {
        result *= 10;
        i += 1;
    }
    result
}

/// Divide with round-half-to-even on the quotient.
///
/// Returns `None` on a zero divisor or when the rounding step overflows.
pub(crate) fn div_round_half_even(numerator: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }

    let quotient = numerator.checked_div(denominator)?;
    let remainder = numerator % denominator;
    if remainder == 0 {
        return Some(quotient);
    }

    // Exact result is negative when the signs differ
    let step = if (numerator < 0) != (denominator < 0) {
        -1
    } else {
        1
    };

    // |remainder| < |denominator| <= 2^127, so doubling fits in u128
    let twice_remainder = remainder.unsigned_abs() * 2;
    match twice_remainder.cmp(&denominator.unsigned_abs()) {
        Ordering::Less => Some(quotient),
        Ordering::Greater => quotient.checked_add(step),
        Ordering::Equal if quotient % 2 == 0 => Some(quotient),
        Ordering::Equal => quotient.checked_add(step),
    }
}
