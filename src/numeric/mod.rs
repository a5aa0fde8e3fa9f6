// ============================================================================
// Numeric Module
// Fixed-point arithmetic for monetary amounts
// ============================================================================
//
// This module provides:
// - FixedDecimal<D, R>: Fixed-point decimal with compile-time precision
// - RawInt: Storage integers a FixedDecimal can use (i32, i64, i128)
// - AmountRepr: Contract every Position amount representation satisfies
// - Promote: Lossless promotion of two representations to a common one
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - No floating-point operations
// - All checked arithmetic returns Result
// - Round half to even wherever digits are dropped
// - Compile-time configurable precision via const generics

mod amount;
mod errors;
mod fixed_decimal;
mod promote;
mod raw;

pub use amount::{AmountRepr, MAX_DECIMAL_SCALE};
pub use errors::{NumericError, NumericResult};
pub use fixed_decimal::{CompactDecimal, FixedDecimal, WideDecimal};
pub use promote::Promote;
pub use raw::RawInt;
