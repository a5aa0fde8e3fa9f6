// ============================================================================
// Registry Configuration
// Policies governing how the currency registry accepts records
// ============================================================================

use super::errors::{MoneyError, MoneyResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Widest minor unit a default `FixedDecimal` (i64 storage) can hold.
pub const MAX_MINOR_UNIT: u8 = 18;

// ============================================================================
// Duplicate Policy
// ============================================================================

/// What the registry does when an identifier is registered again with
/// different metadata. Re-registering identical metadata is always accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateCurrency`
    #[default]
    Reject,

    /// Keep the first record and return its handle
    KeepExisting,
}

// ============================================================================
// Complete Registry Configuration
// ============================================================================

/// Configuration for creating a currency registry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    /// Handling of conflicting re-registrations
    pub duplicate_policy: DuplicatePolicy,

    /// Largest accepted minor unit digit count
    pub max_minor_unit: u8,

    /// Seed the registry with the bundled ISO 4217 dataset on creation
    pub seed_iso_4217: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            max_minor_unit: MAX_MINOR_UNIT,
            seed_iso_4217: true,
        }
    }
}

impl RegistryConfig {
    /// Create a configuration with the default policies
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set the duplicate policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Builder method: Set the largest accepted minor unit
    pub fn with_max_minor_unit(mut self, max_minor_unit: u8) -> Self {
        self.max_minor_unit = max_minor_unit;
        self
    }

    /// Builder method: Start from an empty registry
    pub fn without_iso_4217(mut self) -> Self {
        self.seed_iso_4217 = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> MoneyResult<()> {
        if self.max_minor_unit > MAX_MINOR_UNIT {
            return Err(MoneyError::InvalidConfig(format!(
                "max_minor_unit {} exceeds {}",
                self.max_minor_unit, MAX_MINOR_UNIT
            )));
        }

        Ok(())
    }

    /// Parse a configuration from JSON, falling back to defaults for
    /// missing fields.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> MoneyResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MoneyError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl RegistryConfig {
    /// ISO 4217 seeded, conflicting registrations are errors
    pub fn strict() -> Self {
        Self::default()
    }

    /// ISO 4217 seeded, first registration wins
    pub fn lenient() -> Self {
        Self::default().with_duplicate_policy(DuplicatePolicy::KeepExisting)
    }

    /// Empty registry with strict duplicate handling, for isolated tests
    pub fn empty() -> Self {
        Self::default().without_iso_4217()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = RegistryConfig::new();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.max_minor_unit, MAX_MINOR_UNIT);
        assert!(config.seed_iso_4217);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = RegistryConfig::new()
            .with_duplicate_policy(DuplicatePolicy::KeepExisting)
            .with_max_minor_unit(4)
            .without_iso_4217();

        assert_eq!(config.duplicate_policy, DuplicatePolicy::KeepExisting);
        assert_eq!(config.max_minor_unit, 4);
        assert!(!config.seed_iso_4217);
    }

    #[test]
    fn test_validation() {
        let config = RegistryConfig::new().with_max_minor_unit(19);
        assert!(matches!(config.validate(), Err(MoneyError::InvalidConfig(_))));
    }

    #[test]
    fn test_preset_configs() {
        assert_eq!(RegistryConfig::strict().duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(
            RegistryConfig::lenient().duplicate_policy,
            DuplicatePolicy::KeepExisting
        );
        assert!(!RegistryConfig::empty().seed_iso_4217);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let config =
            RegistryConfig::from_json(r#"{ "duplicate_policy": "KeepExisting" }"#).unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::KeepExisting);
        assert_eq!(config.max_minor_unit, MAX_MINOR_UNIT);

        assert!(RegistryConfig::from_json(r#"{ "max_minor_unit": 40 }"#).is_err());
        assert!(RegistryConfig::from_json("not json").is_err());
    }
}
