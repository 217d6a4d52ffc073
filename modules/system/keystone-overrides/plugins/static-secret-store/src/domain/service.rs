//! Service implementation for the static secret store.

use keystone_overrides_sdk::{ConfigObject, LabelSelector, SelectorParseError};

use crate::config::{StaticSecretConfig, StaticSecretStoreConfig};

/// Static secret store service.
///
/// Holds the configured secrets as [`ConfigObject`]s and filters them by
/// namespace and label selector on each lookup.
pub struct Service {
    objects: Vec<ConfigObject>,
}

impl Service {
    /// Create a service from store configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticSecretStoreConfig) -> Self {
        Self::from_objects(cfg.secrets.iter().map(to_object).collect())
    }

    #[must_use]
    pub fn from_objects(objects: Vec<ConfigObject>) -> Self {
        Self { objects }
    }

    /// Secrets in `namespace` whose labels satisfy `label_selector`.
    ///
    /// # Errors
    ///
    /// Returns `SelectorParseError` if the selector is malformed.
    pub fn find(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<ConfigObject>, SelectorParseError> {
        let selector = LabelSelector::parse(label_selector)?;

        Ok(self
            .objects
            .iter()
            .filter(|o| o.namespace == namespace && selector.matches(&o.labels))
            .cloned()
            .collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

fn to_object(secret: &StaticSecretConfig) -> ConfigObject {
    ConfigObject {
        name: secret.name.clone(),
        namespace: secret.namespace.clone(),
        labels: secret.labels.clone(),
        data: secret
            .data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into_bytes()))
            .collect(),
    }
}
