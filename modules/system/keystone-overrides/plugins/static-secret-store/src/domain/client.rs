//! Client implementation for the static secret store.
//!
//! Implements `ConfigObjectStore` using the domain service.

use async_trait::async_trait;
use keystone_overrides_sdk::{ConfigObject, ConfigObjectStore, StoreError};

use super::service::Service;

#[async_trait]
impl ConfigObjectStore for Service {
    async fn list(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<ConfigObject>, StoreError> {
        let found = self.find(namespace, label_selector).map_err(|e| {
            StoreError::InvalidSelector {
                selector: e.selector,
                reason: e.reason,
            }
        })?;
        tracing::trace!(namespace, label_selector, matched = found.len(), "static store lookup");
        Ok(found)
    }
}
