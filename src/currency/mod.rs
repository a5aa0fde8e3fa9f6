// ============================================================================
// Currency Module
// Currency metadata, the registry that owns it, and static currency tags
// ============================================================================
//
// Two ways to name a currency:
// - Currency: runtime handle interned by the registry, any identifier
// - CurrencyTag types (iso4217::USD, ...): zero-sized, checked at compile time

mod factory;
mod handle;
pub mod iso4217;
mod record;
mod registry;
mod tags;

pub use factory::{create_from_config, CurrencyRegistryBuilder};
pub use handle::Currency;
pub use iso4217::ISO_4217;
pub use record::CurrencyRecord;
pub use registry::{global, CurrencyRegistry};
pub use tags::CurrencyTag;
