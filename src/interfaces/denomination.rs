// ============================================================================
// Denomination Interface
// Read access to the metadata of whatever currency a value is held in
// ============================================================================

/// Anything that names a currency: static tags, runtime handles and the
/// cash instruments wrapping either.
pub trait Denomination {
    /// Symbolic identifier (e.g., "USD")
    fn currency(&self) -> &str;

    /// Minor unit digits (e.g., 2 for USD, 0 for JPY)
    fn unit(&self) -> u8;

    /// Three-letter ISO 4217 code
    fn code(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;
}
