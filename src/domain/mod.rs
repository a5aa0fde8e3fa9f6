// ============================================================================
// Domain Models Module
// Contains the instruments, positions and registry policies
// ============================================================================

mod cash;
pub mod config;
mod errors;
mod ops;
mod position;

pub use cash::Cash;
pub use config::{DuplicatePolicy, RegistryConfig, MAX_MINOR_UNIT};
pub use errors::{MoneyError, MoneyResult};
pub use position::Position;
