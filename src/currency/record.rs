// ============================================================================
// Currency Record
// Immutable metadata the registry holds for one currency identifier
// ============================================================================

use crate::domain::{MoneyError, MoneyResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Metadata for one currency: `(identifier, minor unit digits, ISO code, name)`.
///
/// Records are frozen once registered; the registry hands out shared
/// references only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrencyRecord {
    /// Symbolic code the currency is registered under (e.g., "USD")
    identifier: String,

    /// Number of fractional digits of the smallest denomination
    minor_unit: u8,

    /// Three-letter ISO 4217 code
    iso_code: String,

    /// Human-readable name
    name: String,
}

impl CurrencyRecord {
    pub fn new(
        identifier: impl Into<String>,
        minor_unit: u8,
        iso_code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            minor_unit,
            iso_code: iso_code.into(),
            name: name.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn minor_unit(&self) -> u8 {
        self.minor_unit
    }

    pub fn iso_code(&self) -> &str {
        &self.iso_code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate the record against the registry's limits.
    pub fn validate(&self, max_minor_unit: u8) -> MoneyResult<()> {
        let invalid = |reason: String| MoneyError::InvalidCurrency {
            identifier: self.identifier.clone(),
            reason,
        };

        if self.identifier.is_empty() {
            return Err(invalid("identifier cannot be empty".to_string()));
        }

        if !self.identifier.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(invalid("identifier must be ASCII alphanumeric".to_string()));
        }

        if self.iso_code.len() != 3 || !self.iso_code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(invalid(format!(
                "ISO code '{}' must be three uppercase ASCII letters",
                self.iso_code
            )));
        }

        if self.minor_unit > max_minor_unit {
            return Err(invalid(format!(
                "minor unit {} exceeds the maximum of {}",
                self.minor_unit, max_minor_unit
            )));
        }

        Ok(())
    }
}

impl fmt::Display for CurrencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} minor digits, {})",
            self.identifier, self.iso_code, self.minor_unit, self.name
        )
    }
}

impl<'a> From<(&'a str, u8, &'a str, &'a str)> for CurrencyRecord {
    fn from((identifier, minor_unit, iso_code, name): (&'a str, u8, &'a str, &'a str)) -> Self {
        Self::new(identifier, minor_unit, iso_code, name)
    }
}
