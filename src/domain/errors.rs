// ============================================================================
// Domain Errors
// Failures surfaced by the registry, instruments and positions
// ============================================================================

use crate::currency::CurrencyRecord;
use crate::numeric::NumericError;
use thiserror::Error;

/// Errors raised by currency lookup, registration and position arithmetic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Lookup of an identifier that was never registered
    #[error("unknown currency: {identifier}")]
    UnknownCurrency { identifier: String },

    /// Registration of an identifier already bound to different metadata
    #[error(
        "currency {identifier} is already registered as {existing}, refusing to replace it with {attempted}"
    )]
    DuplicateCurrency {
        identifier: String,
        existing: Box<CurrencyRecord>,
        attempted: Box<CurrencyRecord>,
    },

    /// Currency record that fails validation
    #[error("invalid currency record {identifier}: {reason}")]
    InvalidCurrency { identifier: String, reason: String },

    /// Arithmetic across two different instruments
    #[error("incompatible instruments: cannot combine {left} with {right}")]
    IncompatibleInstrument { left: String, right: String },

    /// Amount held at a scale other than the one its instrument mandates
    #[error("scale mismatch for {instrument}: expected {expected} decimal places, found {found}")]
    ScaleMismatch {
        instrument: String,
        expected: u8,
        found: u8,
    },

    /// Registry configuration that fails validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Numeric(#[from] NumericError),
}

impl MoneyError {
    pub(crate) fn incompatible(left: &impl ToString, right: &impl ToString) -> Self {
        MoneyError::IncompatibleInstrument {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

/// Result type alias for registry and position operations
pub type MoneyResult<T> = Result<T, MoneyError>;
