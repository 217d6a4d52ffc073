//! Configuration for the static secret store.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Store configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticSecretStoreConfig {
    /// Secrets served by the store, in listing order.
    pub secrets: Vec<StaticSecretConfig>,
}

/// A single secret definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticSecretConfig {
    pub namespace: String,
    pub name: String,

    /// Labels matched against the selector.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Plain-text data entries (not base64).
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}
