// ============================================================================
// Financial Instrument Interface
// Tags describing what a Position holds
// ============================================================================

use crate::numeric::AmountRepr;
use std::fmt;
use std::hash::Hash;

/// What a Position holds, and the numeric representation its amounts use.
///
/// Instruments are tags: they carry no quantity. Two positions may only be
/// combined when their instruments compare equal. `Cash<C>` is the one
/// instrument shipped here; other asset classes implement the same trait.
pub trait FinancialInstrument:
    Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Default amount representation for positions in this instrument
    type Amount: AmountRepr;

    /// Decimal places fixed at the type level, `None` when only known at runtime.
    const STATIC_SCALE: Option<u8> = None;

    /// Decimal places every amount in this instrument is held at.
    fn scale(&self) -> u8;
}

/// Instruments whose identity is fully carried by their type.
///
/// Two values of a static instrument type are always equal, so combining
/// positions of different instruments is a type error rather than a
/// runtime one. Operator overloads are only provided for these.
pub trait StaticInstrument: FinancialInstrument + Copy + Default {}

/// Whether an instrument's type-level scale admits an amount type's.
///
/// Only two known scales can disagree; a `None` on either side defers the
/// check to the values at runtime.
pub const fn scales_agree(instrument: Option<u8>, amount: Option<u8>) -> bool {
    match (instrument, amount) {
        (Some(expected), Some(found)) => expected == found,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_agree() {
        assert!(scales_agree(Some(2), Some(2)));
        assert!(!scales_agree(Some(2), Some(0)));
        assert!(scales_agree(Some(2), None));
        assert!(scales_agree(None, Some(4)));
        assert!(scales_agree(None, None));
    }
}
