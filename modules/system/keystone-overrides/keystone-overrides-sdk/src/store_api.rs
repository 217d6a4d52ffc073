//! Store API trait for config object backends.
//!
//! Backends (Kubernetes, static configuration) implement this trait. The
//! resolver depends only on the list-by-label capability, never on the
//! storage technology.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::ConfigObject;

/// Read-only access to labeled config objects.
#[async_trait]
pub trait ConfigObjectStore: Send + Sync {
    /// List every object in `namespace` whose labels match `label_selector`.
    ///
    /// Implementations must not retry internally. Dropping the returned
    /// future must abort any in-flight request.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller lacks permission to list objects
    /// - `InvalidSelector` if the backend rejects the selector
    /// - `Unavailable` if the backend could not be reached
    /// - `Backend` for any other backend failure
    async fn list(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<ConfigObject>, StoreError>;
}
