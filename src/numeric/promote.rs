// ============================================================================
// Numeric Promotion
// Common representation for two amounts before they are combined
// ============================================================================

use super::amount::AmountRepr;
use super::errors::NumericResult;
use super::fixed_decimal::FixedDecimal;
use rust_decimal::Decimal;

/// Promotion of two amount representations to a common one.
///
/// The output holds every value of both inputs at the same scale, so
/// promoting is lossless. Promotion only changes the storage type, never
/// the scale.
///
/// | Self | Rhs | Output |
/// |---|---|---|
/// | `FixedDecimal<D, A>` | `FixedDecimal<D, B>` | `FixedDecimal<D, wider of A, B>` |
/// | `FixedDecimal<D, i32 \| i64>` | `Decimal` | `Decimal` |
/// | `Decimal` | `FixedDecimal<D, i32 \| i64>` | `Decimal` |
/// | `Decimal` | `Decimal` | `Decimal` |
pub trait Promote<Rhs: AmountRepr>: AmountRepr {
    type Output: AmountRepr;

    fn promote_lhs(self) -> NumericResult<Self::Output>;

    fn promote_rhs(rhs: Rhs) -> NumericResult<Self::Output>;
}

macro_rules! promote_fixed {
    ($(($lhs:ty, $rhs:ty) => $out:ty),* $(,)?) => {
        $(
            impl<const D: u8> Promote<FixedDecimal<D, $rhs>> for FixedDecimal<D, $lhs> {
                type Output = FixedDecimal<D, $out>;

                #[inline]
                fn promote_lhs(self) -> NumericResult<Self::Output> {
                    Ok(self.widen())
                }

                #[inline]
                fn promote_rhs(rhs: FixedDecimal<D, $rhs>) -> NumericResult<Self::Output> {
                    Ok(rhs.widen())
                }
            }
        )*
    };
}

promote_fixed! {
    (i32, i32) => i32,
    (i32, i64) => i64,
    (i32, i128) => i128,
    (i64, i32) => i64,
    (i64, i64) => i64,
    (i64, i128) => i128,
    (i128, i32) => i128,
    (i128, i64) => i128,
    (i128, i128) => i128,
}

macro_rules! promote_to_decimal {
    ($($raw:ty),*) => {
        $(
            impl<const D: u8> Promote<Decimal> for FixedDecimal<D, $raw> {
                type Output = Decimal;

                #[inline]
                fn promote_lhs(self) -> NumericResult<Decimal> {
                    self.to_decimal()
                }

                #[inline]
                fn promote_rhs(rhs: Decimal) -> NumericResult<Decimal> {
                    Ok(rhs)
                }
            }

            impl<const D: u8> Promote<FixedDecimal<D, $raw>> for Decimal {
                type Output = Decimal;

                #[inline]
                fn promote_lhs(self) -> NumericResult<Decimal> {
                    Ok(self)
                }

                #[inline]
                fn promote_rhs(rhs: FixedDecimal<D, $raw>) -> NumericResult<Decimal> {
                    rhs.to_decimal()
                }
            }
        )*
    };
}

promote_to_decimal!(i32, i64);

impl Promote<Decimal> for Decimal {
    type Output = Decimal;

    #[inline]
    fn promote_lhs(self) -> NumericResult<Decimal> {
        Ok(self)
    }

    #[inline]
    fn promote_rhs(rhs: Decimal) -> NumericResult<Decimal> {
        Ok(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{CompactDecimal, WideDecimal};
    use rust_decimal_macros::dec;

    fn promoted_sum<A, B>(a: A, b: B) -> A::Output
    where
        A: Promote<B>,
        B: AmountRepr,
    {
        let lhs = a.promote_lhs().unwrap();
        let rhs = A::promote_rhs(b).unwrap();
        lhs.try_add(rhs).unwrap()
    }

    #[test]
    fn test_narrow_and_default_promote_to_default() {
        let a = CompactDecimal::<2>::from_integer(10).unwrap();
        let b = FixedDecimal::<2>::from_integer(i32::MAX as i64).unwrap();
        let sum: FixedDecimal<2> = promoted_sum(a, b);
        assert_eq!(sum.integer_part(), i32::MAX as i128 + 10);
    }

    #[test]
    fn test_default_and_wide_promote_to_wide() {
        let a = FixedDecimal::<2>::MAX;
        let b = WideDecimal::<2>::from_raw(1);
        let sum: WideDecimal<2> = promoted_sum(a, b);
        assert_eq!(sum.raw_value(), i64::MAX as i128 + 1);

        let sum: WideDecimal<2> = promoted_sum(b, a);
        assert_eq!(sum.raw_value(), i64::MAX as i128 + 1);
    }

    #[test]
    fn test_fixed_and_decimal_promote_to_decimal() {
        let a = FixedDecimal::<2>::from_decimal(dec!(1.25)).unwrap();
        let b = dec!(2.50);
        let sum: Decimal = promoted_sum(a, b);
        assert_eq!(sum.to_string(), "3.75");
    }
}
