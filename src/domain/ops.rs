// ============================================================================
// Operator Overloads
// Arithmetic operators for positions in static instruments
// ============================================================================
//
// Instruments fixed by type cannot mismatch, so the only failures left are
// overflow and division by zero; the operators panic on those the way
// integer operators do. Runtime instruments use the checked_* methods.

use super::cash::Cash;
use super::position::Position;
use crate::currency::CurrencyTag;
use crate::interfaces::StaticInstrument;
use crate::numeric::{AmountRepr, Promote};
use rust_decimal::Decimal;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

impl<I, A, B> Add<Position<I, B>> for Position<I, A>
where
    I: StaticInstrument,
    A: Promote<B>,
    B: AmountRepr,
{
    type Output = Position<I, A::Output>;

    fn add(self, rhs: Position<I, B>) -> Self::Output {
        self.checked_add(&rhs).expect("Position addition overflow")
    }
}

impl<I, A, B> Sub<Position<I, B>> for Position<I, A>
where
    I: StaticInstrument,
    A: Promote<B>,
    B: AmountRepr,
{
    type Output = Position<I, A::Output>;

    fn sub(self, rhs: Position<I, B>) -> Self::Output {
        self.checked_sub(&rhs).expect("Position subtraction overflow")
    }
}

impl<I: StaticInstrument, A: AmountRepr> Neg for Position<I, A> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.checked_neg().expect("Position negation overflow")
    }
}

/// Dividing two positions yields a plain number.
impl<I, A, B> Div<Position<I, B>> for Position<I, A>
where
    I: StaticInstrument,
    A: Promote<B>,
    B: AmountRepr,
{
    type Output = Decimal;

    fn div(self, rhs: Position<I, B>) -> Self::Output {
        self.ratio(&rhs).expect("Position division failed")
    }
}

// ============================================================================
// Scalars
// ============================================================================

macro_rules! impl_scalar_ops {
    ($($scalar:ty),*) => {
        $(
            impl<I: StaticInstrument, A: AmountRepr> Mul<$scalar> for Position<I, A> {
                type Output = Self;

                fn mul(self, rhs: $scalar) -> Self::Output {
                    self.checked_mul(rhs).expect("Position multiplication overflow")
                }
            }

            impl<I: StaticInstrument, A: AmountRepr> Mul<Position<I, A>> for $scalar {
                type Output = Position<I, A>;

                fn mul(self, rhs: Position<I, A>) -> Self::Output {
                    rhs * self
                }
            }

            impl<I: StaticInstrument, A: AmountRepr> Div<$scalar> for Position<I, A> {
                type Output = Self;

                fn div(self, rhs: $scalar) -> Self::Output {
                    self.checked_div(rhs).expect("Position division failed")
                }
            }

            /// `2 * Cash::new(USD)` is a position of two dollars.
            impl<C: CurrencyTag> Mul<Cash<C>> for $scalar {
                type Output = Position<Cash<C>>;

                fn mul(self, rhs: Cash<C>) -> Self::Output {
                    rhs.position(self).expect("amount out of range for the currency")
                }
            }
        )*
    };
}

impl_scalar_ops!(Decimal, i64);

// ============================================================================
// Summation
// ============================================================================

impl<I, A> Sum for Position<I, A>
where
    I: StaticInstrument,
    A: Promote<A, Output = A>,
{
    fn sum<It: Iterator<Item = Self>>(iter: It) -> Self {
        iter.fold(Self::default(), |total, position| total + position)
    }
}

impl<'a, I, A> Sum<&'a Position<I, A>> for Position<I, A>
where
    I: StaticInstrument,
    A: Promote<A, Output = A>,
{
    fn sum<It: Iterator<Item = &'a Position<I, A>>>(iter: It) -> Self {
        iter.fold(Self::default(), |total, position| total + *position)
    }
}

#[cfg(test)]
mod tests {
    use crate::currency::iso4217::{JPY, USD};
    use crate::domain::{Cash, Position};
    use crate::numeric::{FixedDecimal, WideDecimal};
    use rust_decimal_macros::dec;

    fn usd(value: rust_decimal::Decimal) -> Position<Cash<USD>> {
        Position::new(Cash::new(USD), value).unwrap()
    }

    #[test]
    fn test_add_sub_neg() {
        assert_eq!(usd(dec!(10)) + usd(dec!(5)), usd(dec!(15)));
        assert_eq!(usd(dec!(10)) - usd(dec!(15)), usd(dec!(-5)));
        assert_eq!(-usd(dec!(2.50)), usd(dec!(-2.50)));
    }

    #[test]
    fn test_mixed_storage_add() {
        let wide: Position<Cash<USD>, WideDecimal<2>> = usd(dec!(1)).convert().unwrap();
        let sum = usd(dec!(2)) + wide;
        assert_eq!(sum.amount(), WideDecimal::<2>::from_raw(300));
    }

    #[test]
    fn test_scalar_operators() {
        assert_eq!(usd(dec!(10)) * 3i64, usd(dec!(30)));
        assert_eq!(3i64 * usd(dec!(10)), usd(dec!(30)));
        assert_eq!(dec!(0.5) * usd(dec!(10)), usd(dec!(5)));
        assert_eq!(usd(dec!(10)) / 4i64, usd(dec!(2.50)));
        assert_eq!(usd(dec!(15)) / usd(dec!(10)), dec!(1.5));
    }

    #[test]
    fn test_scalar_times_cash() {
        let yen = 1500i64 * Cash::new(JPY);
        assert_eq!(yen.to_string(), "1500JPY");
        assert_eq!(dec!(12.345) * Cash::new(USD), usd(dec!(12.34)));
    }

    #[test]
    fn test_default_and_sum() {
        let zero: Position<Cash<USD>> = Position::default();
        assert_eq!(zero.amount(), FixedDecimal::<2>::ZERO);

        let positions = vec![usd(dec!(1.25)), usd(dec!(2.75)), usd(dec!(-1))];
        let by_ref: Position<Cash<USD>> = positions.iter().sum();
        let owned: Position<Cash<USD>> = positions.into_iter().sum();
        assert_eq!(by_ref, usd(dec!(3)));
        assert_eq!(owned, by_ref);

        let empty: Position<Cash<USD>> = Vec::<Position<Cash<USD>>>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    #[should_panic(expected = "Position division failed")]
    fn test_division_by_zero_panics() {
        let _ = usd(dec!(1)) / 0i64;
    }

    #[test]
    #[should_panic(expected = "Position addition overflow")]
    fn test_overflow_panics() {
        let max = Position::from_amount(Cash::new(USD), FixedDecimal::<2>::MAX).unwrap();
        let _ = max + usd(dec!(0.01));
    }
}
