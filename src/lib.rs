// ============================================================================
// Cash Positions Library
// Type-safe monetary positions over a thread-safe currency registry
// ============================================================================

//! # Cash Positions
//!
//! Quantities of money that cannot be silently mixed across currencies or
//! silently lose precision.
//!
//! ## Features
//!
//! - **Currency registry** seeded with ISO 4217, safe for concurrent use
//! - **Static currencies** (`Cash<USD>`): zero-sized, mismatches are compile errors
//! - **Runtime currencies** (`Cash<Currency>`): any registered identifier, mismatches are `Err`
//! - **Fixed-point amounts** at exactly the currency's minor unit, rounded half to even
//! - **Lossless promotion** when positions with different storage are combined
//!
//! ## Example
//!
//! ```rust
//! use cash_positions::prelude::*;
//! use cash_positions::currency::iso4217::{EUR, USD};
//! use rust_decimal::Decimal;
//!
//! // Static: the currency is part of the type
//! let price = Position::new(Cash::new(USD), 10).unwrap();
//! let fee = Position::new(Cash::new(USD), Decimal::new(125, 2)).unwrap();
//! assert_eq!((price + fee).to_string(), "11.25USD");
//!
//! // Runtime: the currency comes from the registry
//! let eur = Position::new(Cash::of("EUR").unwrap(), 7).unwrap();
//! let usd = Position::new(Cash::of("USD").unwrap(), 7).unwrap();
//! assert!(eur.checked_add(&usd).is_err());
//!
//! // Bridge between the two
//! let typed: Position<Cash<EUR>> = eur.downcast().unwrap();
//! assert_eq!(typed.to_string(), "7.00EUR");
//! ```

pub mod currency;
pub mod domain;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::currency::{
        create_from_config, global, Currency, CurrencyRecord, CurrencyRegistry,
        CurrencyRegistryBuilder, CurrencyTag,
    };
    pub use crate::domain::{
        Cash, DuplicatePolicy, MoneyError, MoneyResult, Position, RegistryConfig,
    };
    pub use crate::interfaces::{
        Denomination, EventHandler, FinancialInstrument, LoggingEventHandler, NoOpEventHandler,
        RegistryEvent, StaticInstrument,
    };
    pub use crate::numeric::{AmountRepr, FixedDecimal, NumericError};
}
