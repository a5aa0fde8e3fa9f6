// ============================================================================
// Currency Registry
// Process-wide, thread-safe table of currency metadata
// ============================================================================

use super::handle::Currency;
use super::iso4217::ISO_4217;
use super::record::CurrencyRecord;
use super::tags::CurrencyTag;
use crate::domain::{DuplicatePolicy, MoneyError, MoneyResult, RegistryConfig};
use crate::interfaces::{EventHandler, LoggingEventHandler, NoOpEventHandler, RegistryEvent};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Table from identifier to canonical [`Currency`] handle.
///
/// Lookups take a shared read lock; registration checks and inserts under a
/// single write lock so concurrent registrations of one identifier resolve
/// to exactly one record. Events are dispatched after the lock is released.
pub struct CurrencyRegistry {
    config: RegistryConfig,
    currencies: RwLock<HashMap<String, Currency>>,
    event_handler: Arc<dyn EventHandler>,
}

impl CurrencyRegistry {
    /// Create an empty registry. Use
    /// [`create_from_config`](super::factory::create_from_config) to honour
    /// `seed_iso_4217`.
    pub fn new(config: RegistryConfig, event_handler: Arc<dyn EventHandler>) -> Self {
        Self {
            config,
            currencies: RwLock::new(HashMap::new()),
            event_handler,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a currency and return its canonical handle.
    ///
    /// Registering metadata identical to the existing record returns the
    /// existing handle. Conflicting metadata is resolved by the configured
    /// [`DuplicatePolicy`].
    pub fn register(
        &self,
        identifier: &str,
        minor_unit: u8,
        iso_code: &str,
        name: &str,
    ) -> MoneyResult<Currency> {
        self.register_record(CurrencyRecord::new(identifier, minor_unit, iso_code, name))
    }

    pub fn register_record(&self, record: CurrencyRecord) -> MoneyResult<Currency> {
        self.insert(record).map(|(currency, _)| currency)
    }

    /// Register the record a static tag stands for.
    pub fn register_tag<C: CurrencyTag>(&self) -> MoneyResult<Currency> {
        self.register_record(C::record())
    }

    /// Register every record of a dataset, stopping at the first failure.
    ///
    /// Returns how many identifiers were newly inserted.
    pub fn load<I, T>(&self, dataset: I) -> MoneyResult<usize>
    where
        I: IntoIterator<Item = T>,
        T: Into<CurrencyRecord>,
    {
        let mut registered = 0;
        let mut total = 0;

        for record in dataset {
            total += 1;
            let (_, inserted) = self.insert(record.into())?;
            if inserted {
                registered += 1;
            }
        }

        self.event_handler
            .on_event(RegistryEvent::DatasetLoaded { registered, total });

        Ok(registered)
    }

    pub(crate) fn seed_iso_4217(&self) -> MoneyResult<usize> {
        self.load(ISO_4217.iter().copied())
    }

    fn insert(&self, record: CurrencyRecord) -> MoneyResult<(Currency, bool)> {
        record.validate(self.config.max_minor_unit)?;

        let mut currencies = self.currencies.write();
        if let Some(existing) = currencies.get(record.identifier()) {
            let existing = existing.clone();
            drop(currencies);
            return self
                .resolve_duplicate(existing, record)
                .map(|currency| (currency, false));
        }

        let currency = Currency::from_record(record);
        currencies.insert(currency.record().identifier().to_string(), currency.clone());
        drop(currencies);

        self.event_handler.on_event(RegistryEvent::CurrencyRegistered {
            identifier: currency.record().identifier().to_string(),
            minor_unit: currency.record().minor_unit(),
        });

        Ok((currency, true))
    }

    fn resolve_duplicate(
        &self,
        existing: Currency,
        attempted: CurrencyRecord,
    ) -> MoneyResult<Currency> {
        if existing.record() == &attempted {
            return Ok(existing);
        }

        match self.config.duplicate_policy {
            DuplicatePolicy::KeepExisting => {
                self.event_handler.on_event(RegistryEvent::DuplicateIgnored {
                    existing: existing.record().clone(),
                    attempted,
                });
                Ok(existing)
            }
            DuplicatePolicy::Reject => {
                self.event_handler.on_event(RegistryEvent::DuplicateRejected {
                    existing: existing.record().clone(),
                    attempted: attempted.clone(),
                });
                Err(MoneyError::DuplicateCurrency {
                    identifier: attempted.identifier().to_string(),
                    existing: Box::new(existing.record().clone()),
                    attempted: Box::new(attempted),
                })
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Canonical handle for `identifier`.
    pub fn currency(&self, identifier: &str) -> MoneyResult<Currency> {
        self.currencies
            .read()
            .get(identifier)
            .cloned()
            .ok_or_else(|| MoneyError::UnknownCurrency {
                identifier: identifier.to_string(),
            })
    }

    /// Metadata registered under `identifier`.
    pub fn lookup(&self, identifier: &str) -> MoneyResult<CurrencyRecord> {
        self.currency(identifier)
            .map(|currency| currency.record().clone())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.currencies.read().contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.currencies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.read().is_empty()
    }

    /// Registered identifiers in ascending order.
    pub fn identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.currencies.read().keys().cloned().collect();
        identifiers.sort_unstable();
        identifiers
    }
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::empty(), Arc::new(NoOpEventHandler))
    }
}

impl fmt::Debug for CurrencyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrencyRegistry")
            .field("config", &self.config)
            .field("currencies", &self.len())
            .finish()
    }
}

// ============================================================================
// Process-wide Registry
// ============================================================================

static GLOBAL: Lazy<CurrencyRegistry> = Lazy::new(|| {
    let registry = CurrencyRegistry::new(RegistryConfig::default(), Arc::new(LoggingEventHandler));
    if let Err(err) = registry.seed_iso_4217() {
        tracing::error!(%err, "failed to seed the global currency registry");
    }
    registry
});

/// The process-wide registry, seeded with [`ISO_4217`] on first use.
pub fn global() -> &'static CurrencyRegistry {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::iso4217::USD;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<RegistryEvent>>,
    }

    impl EventHandler for RecordingHandler {
        fn on_event(&self, event: RegistryEvent) {
            self.events.lock().push(event);
        }
    }

    fn registry(policy: DuplicatePolicy) -> (CurrencyRegistry, Arc<RecordingHandler>) {
        let handler = Arc::new(RecordingHandler::default());
        let config = RegistryConfig::empty().with_duplicate_policy(policy);
        (CurrencyRegistry::new(config, handler.clone()), handler)
    }

    #[test]
    fn test_register_and_lookup() {
        let (registry, handler) = registry(DuplicatePolicy::Reject);
        assert!(registry.is_empty());

        let btc = registry.register("BTC", 8, "XBT", "Bitcoin").unwrap();
        assert_eq!(btc.record().minor_unit(), 8);
        assert!(registry.contains("BTC"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("BTC").unwrap().iso_code(), "XBT");
        assert!(registry.currency("BTC").unwrap().ptr_eq(&btc));

        assert_eq!(
            handler.events.lock().as_slice(),
            &[RegistryEvent::CurrencyRegistered {
                identifier: "BTC".to_string(),
                minor_unit: 8
            }]
        );
    }

    #[test]
    fn test_unknown_lookup() {
        let registry = CurrencyRegistry::default();
        assert!(matches!(
            registry.lookup("USD"),
            Err(MoneyError::UnknownCurrency { .. })
        ));
    }

    #[test]
    fn test_identical_registration_is_idempotent() {
        let (registry, handler) = registry(DuplicatePolicy::Reject);
        let first = registry.register_tag::<USD>().unwrap();
        let second = registry.register("USD", 2, "USD", "US Dollar").unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(handler.events.lock().len(), 1);
    }

    #[test]
    fn test_conflicting_registration_rejected() {
        let (registry, handler) = registry(DuplicatePolicy::Reject);
        registry.register("USD", 2, "USD", "US Dollar").unwrap();

        let err = registry.register("USD", 3, "USD", "US Dollar").unwrap_err();
        assert!(matches!(
            err,
            MoneyError::DuplicateCurrency { ref identifier, .. } if identifier == "USD"
        ));
        assert_eq!(registry.lookup("USD").unwrap().minor_unit(), 2);
        assert!(matches!(
            handler.events.lock().last(),
            Some(RegistryEvent::DuplicateRejected { .. })
        ));
    }

    #[test]
    fn test_conflicting_registration_kept() {
        let (registry, handler) = registry(DuplicatePolicy::KeepExisting);
        let first = registry.register("USD", 2, "USD", "US Dollar").unwrap();
        let second = registry.register("USD", 3, "USD", "Other Dollar").unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(second.record().minor_unit(), 2);
        assert!(matches!(
            handler.events.lock().last(),
            Some(RegistryEvent::DuplicateIgnored { .. })
        ));
    }

    #[test]
    fn test_invalid_record_not_inserted() {
        let (registry, _) = registry(DuplicatePolicy::Reject);
        assert!(registry.register("BAD", 19, "BAD", "Too precise").is_err());
        assert!(registry.register("", 2, "USD", "Empty").is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_counts_new_records() {
        let (registry, handler) = registry(DuplicatePolicy::Reject);
        registry.register("USD", 2, "USD", "US Dollar").unwrap();

        let loaded = registry
            .load([("USD", 2u8, "USD", "US Dollar"), ("JPY", 0u8, "JPY", "Yen")])
            .unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(registry.identifiers(), vec!["JPY".to_string(), "USD".to_string()]);
        assert_eq!(
            handler.events.lock().last(),
            Some(&RegistryEvent::DatasetLoaded {
                registered: 1,
                total: 2
            })
        );
    }

    #[test]
    fn test_seed_iso_4217() {
        let registry = CurrencyRegistry::default();
        assert_eq!(registry.seed_iso_4217().unwrap(), ISO_4217.len());
        assert_eq!(registry.seed_iso_4217().unwrap(), 0);
        assert_eq!(registry.lookup("JPY").unwrap().minor_unit(), 0);
    }

    #[test]
    fn test_global_registry_is_seeded() {
        assert!(global().len() >= ISO_4217.len());
        assert!(global().currency("USD").unwrap().ptr_eq(&global().currency("USD").unwrap()));
    }

    #[test]
    fn test_concurrent_registration_single_winner() {
        let (registry, _) = registry(DuplicatePolicy::Reject);

        let results: Vec<MoneyResult<Currency>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8u8)
                .map(|unit| {
                    let registry = &registry;
                    scope.spawn(move || registry.register("XTS", unit, "XTS", "Testing Code"))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners: Vec<&Currency> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(registry.lookup("XTS").unwrap(), *winners[0].record());
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(MoneyError::DuplicateCurrency { .. })))
                .count(),
            7
        );
    }

    #[test]
    fn test_concurrent_lookup_shares_handle() {
        let handles: Vec<Currency> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| global().currency("EUR").unwrap()))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        assert!(handles.windows(2).all(|pair| pair[0].ptr_eq(&pair[1])));
    }
}
