//! Observation sink for soft, non-error resolver signals.
//!
//! A missing override field or an empty search result is normal operation,
//! but operators want to see it. The resolver reports these through a
//! [`ResolutionObserver`] handed to it at construction time.

use crate::models::OverrideKey;

/// Receives informational signals from the resolver.
pub trait ResolutionObserver: Send + Sync {
    /// No config object matched the selector.
    fn no_overrides_found(&self, namespace: &str, label_selector: &str);

    /// The matched object has no data entry for `key`.
    fn field_missing(&self, key: OverrideKey, object: &str);
}

/// Default observer: emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ResolutionObserver for TracingObserver {
    fn no_overrides_found(&self, namespace: &str, label_selector: &str) {
        tracing::debug!(
            namespace,
            label_selector,
            "No keystone override secrets found with label"
        );
    }

    fn field_missing(&self, key: OverrideKey, object: &str) {
        tracing::info!(
            field = key.as_str(),
            secret = object,
            "Key not found in keystone overrides secret"
        );
    }
}
