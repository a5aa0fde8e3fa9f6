// ============================================================================
// Static Currency Tags
// Zero-sized types naming a currency at compile time
// ============================================================================

use super::handle::Currency;
use super::record::CurrencyRecord;
use crate::domain::MoneyResult;
use crate::interfaces::Denomination;
use crate::numeric::AmountRepr;
use std::fmt;
use std::hash::Hash;

/// A currency encoded as a type.
///
/// Each tag is a zero-sized unit struct carrying the currency metadata as
/// associated constants, and fixes the representation (and therefore the
/// decimal scale) of amounts held in it. Declare tags with
/// [`currency_tag!`](crate::currency_tag) rather than by hand so the
/// amount type and the minor unit come from the same token.
pub trait CurrencyTag:
    Denomination
    + Copy
    + Default
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
{
    const IDENTIFIER: &'static str;
    const UNIT: u8;
    const CODE: &'static str;
    const NAME: &'static str;

    /// Amount representation at `UNIT` decimal places
    type Amount: AmountRepr;

    /// The metadata record this tag stands for.
    fn record() -> CurrencyRecord {
        CurrencyRecord::new(Self::IDENTIFIER, Self::UNIT, Self::CODE, Self::NAME)
    }

    /// Runtime handle for this tag in the process-wide registry.
    fn handle() -> MoneyResult<Currency> {
        Currency::of(Self::IDENTIFIER)
    }
}

/// Declare a zero-sized currency tag.
///
/// ```
/// use cash_positions::currency::CurrencyTag;
/// use cash_positions::currency_tag;
///
/// currency_tag!(
///     /// Bitcoin, quoted to the satoshi
///     pub BTC, 8, "XBT", "Bitcoin"
/// );
///
/// assert_eq!(BTC::UNIT, 8);
/// assert_eq!(BTC.to_string(), "BTC");
/// ```
#[macro_export]
macro_rules! currency_tag {
    ($(#[$meta:meta])* $vis:vis $tag:ident, $unit:literal, $code:expr, $name:expr) => {
        $(#[$meta])*
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        $vis struct $tag;

        impl $crate::currency::CurrencyTag for $tag {
            const IDENTIFIER: &'static str = stringify!($tag);
            const UNIT: u8 = $unit;
            const CODE: &'static str = $code;
            const NAME: &'static str = $name;

            type Amount = $crate::numeric::FixedDecimal<$unit>;
        }

        impl $crate::interfaces::Denomination for $tag {
            fn currency(&self) -> &str {
                <Self as $crate::currency::CurrencyTag>::IDENTIFIER
            }

            fn unit(&self) -> u8 {
                <Self as $crate::currency::CurrencyTag>::UNIT
            }

            fn code(&self) -> &str {
                <Self as $crate::currency::CurrencyTag>::CODE
            }

            fn name(&self) -> &str {
                <Self as $crate::currency::CurrencyTag>::NAME
            }
        }

        impl ::std::fmt::Display for $tag {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(stringify!($tag))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::iso4217::{JPY, USD};
    use crate::domain::MoneyError;

    crate::currency_tag!(
        /// Test-only tag never registered anywhere
        ZZZ, 3, "ZZZ", "Unregistered"
    );

    #[test]
    fn test_tag_constants() {
        assert_eq!(USD::IDENTIFIER, "USD");
        assert_eq!(USD::UNIT, 2);
        assert_eq!(JPY::UNIT, 0);
        assert_eq!(std::mem::size_of::<USD>(), 0);
    }

    #[test]
    fn test_tag_matches_registry() {
        let handle = USD::handle().unwrap();
        assert_eq!(handle.record(), &USD::record());
        assert_eq!(USD.unit(), handle.unit());
        assert_eq!(USD.name(), "US Dollar");
    }

    #[test]
    fn test_unregistered_tag_has_no_handle() {
        assert_eq!(ZZZ.to_string(), "ZZZ");
        assert!(matches!(ZZZ::handle(), Err(MoneyError::UnknownCurrency { .. })));
    }
}
