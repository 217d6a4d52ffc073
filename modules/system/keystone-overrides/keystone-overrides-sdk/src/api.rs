//! Public API trait for the Keystone overrides resolver.
//!
//! Configuration-assembly code uses this trait to look up optional
//! Keystone endpoint overrides before rendering service configuration.

use async_trait::async_trait;

use crate::call::CallContext;
use crate::error::KeystoneOverridesError;
use crate::models::OverrideMap;

/// Public API trait for the Keystone overrides resolver.
///
/// ```ignore
/// let overrides = client
///     .resolve(&CallContext::default(), "openstack", "keystone-override")
///     .await?;
///
/// // Absent keys mean "no override, keep the default".
/// let region = overrides.value_or(OverrideKey::Region, "regionOne");
/// ```
#[async_trait]
pub trait KeystoneOverridesClient: Send + Sync {
    /// Find the single override object labeled with `label_selector` in
    /// `namespace` and return its recognized, trimmed fields.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Cancellation token and optional deadline for this call
    /// * `namespace` - Namespace to search; must not be empty
    /// * `label_selector` - Selector, usually a bare label key (existence check)
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if `namespace` or `label_selector` is empty
    /// - `StoreQuery` if listing failed, was cancelled, or ran past the deadline
    /// - `AmbiguousConfiguration` if more than one object matched
    async fn resolve(
        &self,
        ctx: &CallContext,
        namespace: &str,
        label_selector: &str,
    ) -> Result<OverrideMap, KeystoneOverridesError>;
}
