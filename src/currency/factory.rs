// ============================================================================
// Registry Factory
// Creates currency registries with proper configuration
// ============================================================================

use super::record::CurrencyRecord;
use super::registry::CurrencyRegistry;
use super::tags::CurrencyTag;
use crate::domain::{DuplicatePolicy, MoneyResult, RegistryConfig};
use crate::interfaces::EventHandler;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a currency registry from configuration
///
/// # Arguments
/// * `config` - Registry configuration
/// * `event_handler` - Event handler for registration events
///
/// # Example
/// ```
/// use cash_positions::prelude::*;
/// use cash_positions::currency::create_from_config;
/// use std::sync::Arc;
///
/// let registry =
///     create_from_config(RegistryConfig::strict(), Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(registry.lookup("EUR").unwrap().minor_unit(), 2);
/// ```
pub fn create_from_config(
    config: RegistryConfig,
    event_handler: Arc<dyn EventHandler>,
) -> MoneyResult<CurrencyRegistry> {
    config.validate()?;

    let seed = config.seed_iso_4217;
    let registry = CurrencyRegistry::new(config, event_handler);
    if seed {
        registry.seed_iso_4217()?;
    }

    Ok(registry)
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating currency registries with fluent API
///
/// # Example
/// ```
/// use cash_positions::prelude::*;
/// use cash_positions::currency::CurrencyRegistryBuilder;
/// use std::sync::Arc;
///
/// let registry = CurrencyRegistryBuilder::new()
///     .without_iso_4217()
///     .with_currency(("BTC", 8u8, "XBT", "Bitcoin"))
///     .build(Arc::new(NoOpEventHandler))
///     .unwrap();
///
/// assert_eq!(registry.identifiers(), vec!["BTC".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistryBuilder {
    config: RegistryConfig,
    currencies: Vec<CurrencyRecord>,
}

impl CurrencyRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: RegistryConfig) -> Self {
        Self {
            config,
            currencies: Vec::new(),
        }
    }

    /// Keep the first record when an identifier is registered twice
    pub fn keep_existing_duplicates(mut self) -> Self {
        self.config.duplicate_policy = DuplicatePolicy::KeepExisting;
        self
    }

    /// Fail when an identifier is registered twice with different metadata (default)
    pub fn reject_duplicates(mut self) -> Self {
        self.config.duplicate_policy = DuplicatePolicy::Reject;
        self
    }

    pub fn max_minor_unit(mut self, max_minor_unit: u8) -> Self {
        self.config.max_minor_unit = max_minor_unit;
        self
    }

    /// Do not seed the bundled ISO 4217 dataset
    pub fn without_iso_4217(mut self) -> Self {
        self.config.seed_iso_4217 = false;
        self
    }

    /// Register an extra currency after seeding
    pub fn with_currency(mut self, record: impl Into<CurrencyRecord>) -> Self {
        self.currencies.push(record.into());
        self
    }

    /// Register the currency a static tag stands for
    pub fn with_tag<C: CurrencyTag>(self) -> Self {
        self.with_currency(C::record())
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Build the registry
    pub fn build(self, event_handler: Arc<dyn EventHandler>) -> MoneyResult<CurrencyRegistry> {
        let registry = create_from_config(self.config, event_handler)?;
        if !self.currencies.is_empty() {
            registry.load(self.currencies)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::iso4217::{ISO_4217, JPY};
    use crate::domain::MoneyError;
    use crate::interfaces::NoOpEventHandler;

    #[test]
    fn test_create_seeded_registry() {
        let registry =
            create_from_config(RegistryConfig::strict(), Arc::new(NoOpEventHandler)).unwrap();
        assert_eq!(registry.len(), ISO_4217.len());
        assert_eq!(registry.lookup("KWD").unwrap().minor_unit(), 3);
    }

    #[test]
    fn test_create_empty_registry() {
        let registry =
            create_from_config(RegistryConfig::empty(), Arc::new(NoOpEventHandler)).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RegistryConfig::new().with_max_minor_unit(30);
        assert!(matches!(
            create_from_config(config, Arc::new(NoOpEventHandler)),
            Err(MoneyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_narrow_limit_rejects_seed_entries() {
        // CLF and UYW carry four minor digits
        let config = RegistryConfig::new().with_max_minor_unit(3);
        assert!(matches!(
            create_from_config(config, Arc::new(NoOpEventHandler)),
            Err(MoneyError::InvalidCurrency { .. })
        ));
    }

    #[test]
    fn test_builder() {
        let registry = CurrencyRegistryBuilder::new()
            .without_iso_4217()
            .with_tag::<JPY>()
            .with_currency(("BTC", 8u8, "XBT", "Bitcoin"))
            .build(Arc::new(NoOpEventHandler))
            .unwrap();

        assert_eq!(registry.identifiers(), vec!["BTC".to_string(), "JPY".to_string()]);
    }

    #[test]
    fn test_builder_duplicate_policy() {
        let registry = CurrencyRegistryBuilder::new()
            .keep_existing_duplicates()
            .with_currency(("USD", 4u8, "USD", "Overridden Dollar"))
            .build(Arc::new(NoOpEventHandler))
            .unwrap();
        assert_eq!(registry.lookup("USD").unwrap().minor_unit(), 2);

        let result = CurrencyRegistryBuilder::new()
            .reject_duplicates()
            .with_currency(("USD", 4u8, "USD", "Overridden Dollar"))
            .build(Arc::new(NoOpEventHandler));
        assert!(matches!(result, Err(MoneyError::DuplicateCurrency { .. })));
    }
}
