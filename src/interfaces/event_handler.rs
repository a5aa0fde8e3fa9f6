// ============================================================================
// Event Handler Interface
// Defines the contract for handling currency registry events
// ============================================================================

use crate::currency::CurrencyRecord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the currency registry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegistryEvent {
    /// New identifier inserted into the registry
    CurrencyRegistered { identifier: String, minor_unit: u8 },

    /// Conflicting registration dropped; the existing record was kept
    DuplicateIgnored {
        existing: CurrencyRecord,
        attempted: CurrencyRecord,
    },

    /// Conflicting registration refused with an error
    DuplicateRejected {
        existing: CurrencyRecord,
        attempted: CurrencyRecord,
    },

    /// A dataset was fed through the registry
    DatasetLoaded { registered: usize, total: usize },
}

/// Event handler trait for processing registry events
/// Implementations can handle logging, metrics, auditing, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a registry event
    fn on_event(&self, event: RegistryEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<RegistryEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: RegistryEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: RegistryEvent) {
        match event {
            RegistryEvent::CurrencyRegistered {
                identifier,
                minor_unit,
            } => {
                tracing::debug!(%identifier, minor_unit, "currency registered");
            },
            RegistryEvent::DuplicateIgnored {
                existing,
                attempted,
            } => {
                tracing::warn!(%existing, %attempted, "conflicting currency registration ignored");
            },
            RegistryEvent::DuplicateRejected {
                existing,
                attempted,
            } => {
                tracing::warn!(%existing, %attempted, "conflicting currency registration rejected");
            },
            RegistryEvent::DatasetLoaded { registered, total } => {
                tracing::info!(registered, total, "currency dataset loaded");
            },
        }
    }
}
