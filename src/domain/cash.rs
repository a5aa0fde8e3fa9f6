// ============================================================================
// Cash Instrument
// A currency held as an asset
// ============================================================================

use super::errors::MoneyResult;
use super::position::Position;
use crate::currency::{Currency, CurrencyRegistry, CurrencyTag};
use crate::interfaces::{Denomination, FinancialInstrument, StaticInstrument};
use rust_decimal::Decimal;
use std::fmt;

/// Cash denominated in `C`.
///
/// `C` is either a static tag such as [`iso4217::USD`](crate::currency::iso4217::USD),
/// making `Cash<USD>` a zero-sized type, or a runtime [`Currency`] handle.
/// Cash carries no quantity; wrap it in a [`Position`] for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cash<C>(C);

impl<C> Cash<C> {
    pub const fn new(currency: C) -> Self {
        Self(currency)
    }

    /// The currency this cash is denominated in.
    pub fn denomination(&self) -> &C {
        &self.0
    }

    pub fn into_inner(self) -> C {
        self.0
    }
}

impl Cash<Currency> {
    /// Cash in the currency registered under `identifier` in the global registry.
    ///
    /// # Example
    /// ```
    /// use cash_positions::prelude::*;
    ///
    /// let usd = Cash::of("USD").unwrap();
    /// assert_eq!(usd.unit(), 2);
    /// assert!(Cash::of("NOPE").is_err());
    /// ```
    pub fn of(identifier: &str) -> MoneyResult<Self> {
        Currency::of(identifier).map(Self)
    }

    /// Cash in the currency registered under `identifier` in `registry`.
    pub fn in_registry(registry: &CurrencyRegistry, identifier: &str) -> MoneyResult<Self> {
        registry.currency(identifier).map(Self)
    }
}

impl<C: CurrencyTag> Cash<C> {
    /// The same cash instrument as a runtime handle from the global registry.
    pub fn to_dynamic(&self) -> MoneyResult<Cash<Currency>> {
        C::handle().map(Cash)
    }
}

impl<C> Cash<C>
where
    Self: FinancialInstrument,
{
    /// A position of `value` in this cash, rounded half to even to its scale.
    pub fn position(&self, value: impl Into<Decimal>) -> MoneyResult<Position<Self>> {
        Position::new(self.clone(), value)
    }
}

impl<C: Denomination> Denomination for Cash<C> {
    fn currency(&self) -> &str {
        self.0.currency()
    }

    fn unit(&self) -> u8 {
        self.0.unit()
    }

    fn code(&self) -> &str {
        self.0.code()
    }

    fn name(&self) -> &str {
        self.0.name()
    }
}

impl<C: Denomination> fmt::Display for Cash<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.currency())
    }
}

// ============================================================================
// Instrument Implementations
// ============================================================================

impl<C: CurrencyTag> FinancialInstrument for Cash<C> {
    type Amount = C::Amount;

    const STATIC_SCALE: Option<u8> = Some(C::UNIT);

    fn scale(&self) -> u8 {
        C::UNIT
    }
}

impl<C: CurrencyTag> StaticInstrument for Cash<C> {}

impl FinancialInstrument for Cash<Currency> {
    type Amount = Decimal;

    fn scale(&self) -> u8 {
        self.0.unit()
    }
}
