// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod denomination;
mod event_handler;
mod financial_instrument;

pub use denomination::Denomination;
pub use event_handler::{EventHandler, LoggingEventHandler, NoOpEventHandler, RegistryEvent};
pub use financial_instrument::{scales_agree, FinancialInstrument, StaticInstrument};
