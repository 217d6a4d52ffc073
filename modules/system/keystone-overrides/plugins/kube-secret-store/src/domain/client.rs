//! Client implementation for the Kubernetes secret store.

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
        self.list_secrets(namespace, label_selector).await
    }
}
