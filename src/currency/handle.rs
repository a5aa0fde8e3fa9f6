// ============================================================================
// Currency Handle
// Interned, shareable reference to a registered currency
// ============================================================================

use super::record::CurrencyRecord;
use super::registry;
use crate::domain::MoneyResult;
use crate::interfaces::Denomination;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Canonical handle for a registered currency.
///
/// The registry creates exactly one handle per identifier and every lookup
/// returns a clone of it, so handles for the same identifier share one
/// record. Cloning is a reference-count bump.
#[derive(Clone)]
pub struct Currency {
    record: Arc<CurrencyRecord>,
}

impl Currency {
    pub(crate) fn from_record(record: CurrencyRecord) -> Self {
        Self {
            record: Arc::new(record),
        }
    }

    /// Canonical handle for `identifier` in the process-wide registry.
    ///
    /// # Errors
    /// Returns `UnknownCurrency` if the identifier was never registered.
    ///
    /// # Example
    /// ```
    /// use cash_positions::currency::Currency;
    /// use cash_positions::interfaces::Denomination;
    ///
    /// let usd = Currency::of("USD").unwrap();
    /// assert_eq!(usd.unit(), 2);
    /// assert_eq!(usd, Currency::of("USD").unwrap());
    /// ```
    pub fn of(identifier: &str) -> MoneyResult<Self> {
        registry::global().currency(identifier)
    }

    /// The registry record backing this handle.
    pub fn record(&self) -> &CurrencyRecord {
        &self.record
    }

    /// True when both handles point at the same registry entry.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.record, &other.record)
    }
}

impl Denomination for Currency {
    fn currency(&self) -> &str {
        self.record.identifier()
    }

    fn unit(&self) -> u8 {
        self.record.minor_unit()
    }

    fn code(&self) -> &str {
        self.record.iso_code()
    }

    fn name(&self) -> &str {
        self.record.name()
    }
}

// Handles from isolated registries compare equal when their records match
impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.record == other.record
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.record.identifier().hash(state);
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.record.identifier())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MoneyError;

    #[test]
    fn test_of_returns_canonical_handle() {
        let a = Currency::of("EUR").unwrap();
        let b = Currency::of("EUR").unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_accessors_delegate_to_record() {
        let jpy = Currency::of("JPY").unwrap();
        assert_eq!(jpy.currency(), "JPY");
        assert_eq!(jpy.unit(), 0);
        assert_eq!(jpy.code(), "JPY");
        assert_eq!(jpy.name(), "Yen");
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(
            Currency::of("NOPE").unwrap_err(),
            MoneyError::UnknownCurrency {
                identifier: "NOPE".to_string()
            }
        );
    }

    #[test]
    fn test_display_and_debug() {
        let gbp = Currency::of("GBP").unwrap();
        assert_eq!(gbp.to_string(), "GBP");
        assert_eq!(format!("{:?}", gbp), "Currency(GBP)");
    }

    #[test]
    fn test_distinct_currencies_differ() {
        assert_ne!(Currency::of("USD").unwrap(), Currency::of("EUR").unwrap());
    }
}
