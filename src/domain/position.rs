// ============================================================================
// Position
// A quantity of a financial instrument
// ============================================================================

use super::cash::Cash;
use super::errors::{MoneyError, MoneyResult};
use crate::currency::{Currency, CurrencyTag};
use crate::interfaces::{scales_agree, Denomination, FinancialInstrument, StaticInstrument};
use crate::numeric::{AmountRepr, NumericError, Promote};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An amount of instrument `I`, held in representation `A`.
///
/// The amount always carries exactly the instrument's scale: `Position<Cash<USD>>`
/// stores a `FixedDecimal<2>`, and a runtime `Position<Cash<Currency>>` stores a
/// `Decimal` rescaled to the currency's minor unit. Positions are immutable;
/// every operation returns a new one.
///
/// # Example
/// ```
/// use cash_positions::prelude::*;
/// use cash_positions::currency::iso4217::USD;
///
/// let a = Position::new(Cash::new(USD), 10).unwrap();
/// let b = Position::new(Cash::new(USD), 5).unwrap();
/// assert_eq!((a + b).to_string(), "15.00USD");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position<I: FinancialInstrument, A: AmountRepr = <I as FinancialInstrument>::Amount> {
    instrument: I,
    amount: A,
}

impl<I: FinancialInstrument, A: AmountRepr> Position<I, A> {
    fn check_scale(instrument: &I, amount: &A) -> MoneyResult<()> {
        const {
            assert!(
                scales_agree(I::STATIC_SCALE, A::DECIMALS),
                "amount representation does not carry the instrument's scale"
            )
        };

        let expected = instrument.scale();
        let found = amount.scale();
        if expected != found {
            return Err(MoneyError::ScaleMismatch {
                instrument: instrument.to_string(),
                expected,
                found,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Construction in any representation
    // ========================================================================

    /// Wrap an amount already held at the instrument's scale.
    pub fn from_amount(instrument: I, amount: A) -> MoneyResult<Self> {
        Self::check_scale(&instrument, &amount)?;
        Ok(Self { instrument, amount })
    }

    /// Position of `value` in representation `A`, rounded half to even.
    pub fn from_decimal(instrument: I, value: Decimal) -> MoneyResult<Self> {
        let amount = A::from_decimal_rounded(value, instrument.scale())?;
        Self::from_amount(instrument, amount)
    }

    /// Position of `value` in representation `A`, failing with
    /// `PrecisionLoss` rather than rounding.
    pub fn from_decimal_exact(instrument: I, value: Decimal) -> MoneyResult<Self> {
        let amount = A::from_decimal_exact(value, instrument.scale())?;
        Self::from_amount(instrument, amount)
    }

    fn zero_in(instrument: I) -> MoneyResult<Self> {
        let amount = A::zero(instrument.scale())?;
        Self::from_amount(instrument, amount)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn instrument(&self) -> &I {
        &self.instrument
    }

    /// Alias of [`instrument`](Self::instrument) for cash positions.
    pub fn cash(&self) -> &I {
        &self.instrument
    }

    pub fn amount(&self) -> A {
        self.amount
    }

    pub fn scale(&self) -> u8 {
        self.amount.scale()
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn into_parts(self) -> (I, A) {
        (self.instrument, self.amount)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    fn ensure_same_instrument<B: AmountRepr>(&self, rhs: &Position<I, B>) -> MoneyResult<()> {
        if self.instrument != rhs.instrument {
            return Err(MoneyError::incompatible(&self.instrument, &rhs.instrument));
        }
        Ok(())
    }

    /// Sum of two positions in the same instrument, promoted to a common
    /// representation.
    pub fn checked_add<B>(&self, rhs: &Position<I, B>) -> MoneyResult<Position<I, A::Output>>
    where
        A: Promote<B>,
        B: AmountRepr,
    {
        self.ensure_same_instrument(rhs)?;
        let amount = self.amount.promote_lhs()?.try_add(A::promote_rhs(rhs.amount)?)?;
        Position::from_amount(self.instrument.clone(), amount)
    }

    pub fn checked_sub<B>(&self, rhs: &Position<I, B>) -> MoneyResult<Position<I, A::Output>>
    where
        A: Promote<B>,
        B: AmountRepr,
    {
        self.ensure_same_instrument(rhs)?;
        let amount = self.amount.promote_lhs()?.try_sub(A::promote_rhs(rhs.amount)?)?;
        Position::from_amount(self.instrument.clone(), amount)
    }

    /// Dimensionless ratio of two positions in the same instrument.
    pub fn ratio<B>(&self, rhs: &Position<I, B>) -> MoneyResult<Decimal>
    where
        A: Promote<B>,
        B: AmountRepr,
    {
        self.ensure_same_instrument(rhs)?;
        let ratio = self.amount.promote_lhs()?.try_ratio(A::promote_rhs(rhs.amount)?)?;
        Ok(ratio)
    }

    /// Scale by a dimensionless factor, rounding half to even.
    pub fn checked_mul(&self, scalar: impl Into<Decimal>) -> MoneyResult<Self> {
        let amount = self.amount.try_mul_scalar(scalar.into())?;
        Self::from_amount(self.instrument.clone(), amount)
    }

    /// Divide by a dimensionless factor, rounding half to even.
    pub fn checked_div(&self, scalar: impl Into<Decimal>) -> MoneyResult<Self> {
        let amount = self.amount.try_div_scalar(scalar.into())?;
        Self::from_amount(self.instrument.clone(), amount)
    }

    pub fn checked_neg(&self) -> MoneyResult<Self> {
        let amount = self.amount.try_neg()?;
        Self::from_amount(self.instrument.clone(), amount)
    }

    /// The same position held in representation `B`.
    pub fn convert<B>(&self) -> MoneyResult<Position<I, B>>
    where
        A: Promote<B, Output = B>,
        B: AmountRepr,
    {
        let amount = self.amount.promote_lhs()?;
        Position::from_amount(self.instrument.clone(), amount)
    }
}

impl<I: FinancialInstrument> Position<I> {
    /// Position of `value`, rounded half to even to the instrument's scale.
    pub fn new(instrument: I, value: impl Into<Decimal>) -> MoneyResult<Self> {
        Self::from_decimal(instrument, value.into())
    }

    /// Position of `value`, failing with `PrecisionLoss` rather than rounding.
    pub fn new_exact(instrument: I, value: impl Into<Decimal>) -> MoneyResult<Self> {
        Self::from_decimal_exact(instrument, value.into())
    }

    /// Parse a decimal string exactly, e.g. `"12.50"`.
    pub fn parse(instrument: I, value: &str) -> MoneyResult<Self> {
        let value = Decimal::from_str(value.trim()).map_err(|_| NumericError::InvalidInput)?;
        Self::new_exact(instrument, value)
    }

    pub fn zero(instrument: I) -> MoneyResult<Self> {
        Self::zero_in(instrument)
    }

    pub fn one(instrument: I) -> MoneyResult<Self> {
        let amount = I::Amount::one(instrument.scale())?;
        Self::from_amount(instrument, amount)
    }

    /// Sum of `positions`, starting from zero in `instrument`.
    pub fn checked_sum<'a, It>(instrument: I, positions: It) -> MoneyResult<Self>
    where
        It: IntoIterator<Item = &'a Self>,
        I::Amount: Promote<I::Amount, Output = I::Amount>,
    {
        positions
            .into_iter()
            .try_fold(Self::zero(instrument)?, |total, position| {
                total.checked_add(position)
            })
    }
}

impl<I: StaticInstrument> Position<I> {
    /// Position in the static instrument named by the type.
    ///
    /// ```
    /// use cash_positions::prelude::*;
    /// use cash_positions::currency::iso4217::JPY;
    ///
    /// let yen = Position::<Cash<JPY>>::of(1500).unwrap();
    /// assert_eq!(yen.to_string(), "1500JPY");
    /// ```
    pub fn of(value: impl Into<Decimal>) -> MoneyResult<Self> {
        Self::new(I::default(), value)
    }
}

// ============================================================================
// Static and Runtime Bridges
// ============================================================================

impl<C: CurrencyTag> Position<Cash<C>> {
    /// The same position in a runtime currency handle, with a `Decimal` amount.
    pub fn into_dynamic(self) -> MoneyResult<Position<Cash<Currency>>> {
        let cash = self.instrument.to_dynamic()?;
        let amount = AmountRepr::to_decimal(self.amount)?;
        Position::new_exact(cash, amount)
    }
}

impl Position<Cash<Currency>> {
    /// Recover the static type of a runtime cash position.
    ///
    /// Fails with `IncompatibleInstrument` when the handle does not match `C`.
    pub fn downcast<C: CurrencyTag>(self) -> MoneyResult<Position<Cash<C>>> {
        let target = Cash::new(C::default());
        if self.instrument.currency() != C::IDENTIFIER || self.instrument.unit() != C::UNIT {
            return Err(MoneyError::incompatible(&self.instrument, &target));
        }
        Position::new_exact(target, self.amount)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<I: StaticInstrument, A: AmountRepr> Default for Position<I, A> {
    fn default() -> Self {
        Self::zero_in(I::default()).expect("zero always fits the instrument's scale")
    }
}

// Positions in different instruments are unordered
impl<I: FinancialInstrument, A: AmountRepr> PartialOrd for Position<I, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.instrument == other.instrument).then(|| self.amount.cmp(&other.amount))
    }
}

impl<I: FinancialInstrument, A: AmountRepr> fmt::Display for Position<I, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.instrument)
    }
}
