//! Configuration for the Kubernetes secret store.

use serde::Deserialize;

/// Store configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KubeSecretStoreConfig {
    /// Kubeconfig context to use. When unset the configuration is inferred:
    /// in-cluster first, then the current kubeconfig context.
    pub context: Option<String>,
}
