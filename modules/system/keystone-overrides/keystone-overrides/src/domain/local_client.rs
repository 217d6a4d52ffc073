//! Local (in-process) client for the Keystone overrides resolver.

use std::sync::Arc;

use async_trait::async_trait;
use keystone_overrides_sdk::{
    CallContext, KeystoneOverridesClient, KeystoneOverridesError, OverrideMap,
};

use super::{DomainError, Service};

/// Local client wrapping the service.
///
/// Handed to configuration-assembly code as `Arc<dyn KeystoneOverridesClient>`.
pub struct KeystoneOverridesLocalClient {
    svc: Arc<Service>,
}

impl KeystoneOverridesLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> KeystoneOverridesError {
    tracing::error!(operation = op, error = ?e, "keystone_overrides call failed");
    e.into()
}

#[async_trait]
impl KeystoneOverridesClient for KeystoneOverridesLocalClient {
    async fn resolve(
        &self,
        ctx: &CallContext,
        namespace: &str,
        label_selector: &str,
    ) -> Result<OverrideMap, KeystoneOverridesError> {
        self.svc
            .resolve(ctx, namespace, label_selector)
            .await
            .map_err(|e| log_and_convert("resolve", e))
    }
}
