//! Keystone overrides resolution service.

use std::sync::Arc;
use std::time::Duration;

use keystone_overrides_sdk::{
    CallContext, ConfigObject, ConfigObjectStore, OverrideKey, OverrideMap, ResolutionObserver,
};

use super::DomainError;
use crate::config::KeystoneOverridesConfig;

/// Recognized override keys paired with the secret field each is read from.
const OVERRIDE_FIELDS: [(OverrideKey, &str); 3] = [
    (OverrideKey::Region, OverrideKey::Region.source_field()),
    (OverrideKey::AuthUrl, OverrideKey::AuthUrl.source_field()),
    (
        OverrideKey::WwwAuthenticateUri,
        OverrideKey::WwwAuthenticateUri.source_field(),
    ),
];

/// Keystone overrides service.
///
/// Stateless: every call lists the store afresh and builds a new map.
pub struct Service {
    store: Arc<dyn ConfigObjectStore>,
    observer: Arc<dyn ResolutionObserver>,
    query_timeout: Option<Duration>,
}

impl Service {
    #[must_use]
    pub fn new(
        store: Arc<dyn ConfigObjectStore>,
        observer: Arc<dyn ResolutionObserver>,
        cfg: &KeystoneOverridesConfig,
    ) -> Self {
        Self {
            store,
            observer,
            query_timeout: cfg.query_timeout,
        }
    }

    /// Resolve overrides from the single secret matching `label_selector`.
    ///
    /// Zero matches is not an error: the result is an empty map.
    ///
    /// # Errors
    ///
    /// - `EmptyNamespace` for a blank namespace
    /// - `StoreQuery` when listing fails, is cancelled, or times out
    /// - `AmbiguousConfiguration` when more than one secret matches
    #[tracing::instrument(skip(self, ctx))]
    pub async fn resolve(
        &self,
        ctx: &CallContext,
        namespace: &str,
        label_selector: &str,
    ) -> Result<OverrideMap, DomainError> {
        if namespace.trim().is_empty() {
            return Err(DomainError::EmptyNamespace);
        }

        let ctx = match self.query_timeout {
            Some(timeout) => ctx.clone().with_timeout(timeout),
            None => ctx.clone(),
        };

        let objects = ctx
            .run(self.store.list(namespace, label_selector))
            .await
            .map_err(|source| DomainError::StoreQuery {
                namespace: namespace.to_owned(),
                label_selector: label_selector.to_owned(),
                source,
            })?;

        let object = match objects.as_slice() {
            [] => {
                self.observer.no_overrides_found(namespace, label_selector);
                return Ok(OverrideMap::new());
            }
            [object] => object,
            many => {
                return Err(DomainError::AmbiguousConfiguration {
                    label_selector: label_selector.to_owned(),
                    names: many.iter().map(ConfigObject::identity).collect(),
                });
            }
        };

        let overrides = extract_overrides(object, self.observer.as_ref());
        tracing::debug!(
            secret = %object.identity(),
            keys = overrides.len(),
            "Resolved keystone overrides"
        );
        Ok(overrides)
    }
}

/// Copy the recognized fields of `object` into a fresh map, trimming values.
///
/// Missing fields are reported to `observer` and left out of the map.
fn extract_overrides(object: &ConfigObject, observer: &dyn ResolutionObserver) -> OverrideMap {
    let mut overrides = OverrideMap::new();
    for (key, field) in OVERRIDE_FIELDS {
        match object.field(field) {
            Some(raw) => {
                overrides.insert(key, String::from_utf8_lossy(raw).trim().to_owned());
            }
            None => observer.field_missing(key, &object.identity()),
        }
    }
    overrides
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingObserver {
        missing: Mutex<Vec<(OverrideKey, String)>>,
    }

    impl ResolutionObserver for RecordingObserver {
        fn no_overrides_found(&self, _namespace: &str, _label_selector: &str) {}

        fn field_missing(&self, key: OverrideKey, object: &str) {
            self.missing.lock().unwrap().push((key, object.to_owned()));
        }
    }

    #[test]
    fn whitelist_covers_every_key_once() {
        let keys: Vec<OverrideKey> = OVERRIDE_FIELDS.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, OverrideKey::ALL);
    }

    #[test]
    fn extract_trims_and_skips_missing() {
        let obj = ConfigObject::new("openstack", "ks")
            .with_data("region", " regionOne ")
            .with_data("auth_url", "https://kc.example/v3\n")
            .with_data("password", "hunter2");
        let observer = RecordingObserver::default();

        let map = extract_overrides(&obj, &observer);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(OverrideKey::Region), Some("regionOne"));
        assert_eq!(map.get(OverrideKey::AuthUrl), Some("https://kc.example/v3"));
        assert!(!map.contains_key(OverrideKey::WwwAuthenticateUri));
        assert_eq!(
            *observer.missing.lock().unwrap(),
            vec![(OverrideKey::WwwAuthenticateUri, "openstack/ks".to_owned())]
        );
    }

    #[test]
    fn present_but_blank_field_is_kept() {
        let obj = ConfigObject::new("openstack", "ks").with_data("region", "   ");
        let observer = RecordingObserver::default();

        let map = extract_overrides(&obj, &observer);

        assert_eq!(map.get(OverrideKey::Region), Some(""));
        assert_eq!(observer.missing.lock().unwrap().len(), 2);
    }

    #[test]
    fn non_utf8_bytes_are_replaced() {
        let obj = ConfigObject::new("openstack", "ks").with_data("region", vec![b'r', 0xff, b'1']);
        let map = extract_overrides(&obj, &RecordingObserver::default());
        assert_eq!(map.get(OverrideKey::Region), Some("r\u{fffd}1"));
    }
}
