//! Domain models for the Keystone overrides module.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A labeled, namespaced key-value record read from the store.
///
/// In Kubernetes terms this is a `Secret`: `data` holds the raw
/// (already base64-decoded) bytes of each entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigObject {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub data: BTreeMap<String, Vec<u8>>,
}

impl ConfigObject {
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// `namespace/name`, used to identify the object in logs and errors.
    #[must_use]
    pub fn identity(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    /// Raw payload of a data field, if present.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }
}

/// Recognized override keys.
///
/// The set is closed: an [`OverrideMap`] can only ever hold these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideKey {
    /// Keystone region name.
    Region,
    /// Internal Keystone endpoint used for token validation.
    AuthUrl,
    /// Public Keystone endpoint advertised in `WWW-Authenticate` headers.
    WwwAuthenticateUri,
}

impl OverrideKey {
    /// Every recognized key, in extraction order.
    pub const ALL: [Self; 3] = [Self::Region, Self::AuthUrl, Self::WwwAuthenticateUri];

    /// Key name as it appears in the resolver output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::AuthUrl => "auth_url",
            Self::WwwAuthenticateUri => "www_authenticate_uri",
        }
    }

    /// Name of the data field this key is read from.
    #[must_use]
    pub const fn source_field(self) -> &'static str {
        // Output keys and secret fields share names today.
        self.as_str()
    }

    /// Look up a key by its output name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for OverrideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved overrides: recognized keys mapped to trimmed values.
///
/// A key that is absent means "no override, use the default". Keys are never
/// present with an empty placeholder for a missing source field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideMap(BTreeMap<OverrideKey, String>);

impl OverrideMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for this key.
    pub fn insert(&mut self, key: OverrideKey, value: String) -> Option<String> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: OverrideKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    /// Look up a value by output key name. Unknown names yield `None`.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        OverrideKey::from_name(name).and_then(|k| self.get(k))
    }

    #[must_use]
    pub fn contains_key(&self, key: OverrideKey) -> bool {
        self.0.contains_key(&key)
    }

    /// The override for `key`, or `default` when none is configured.
    #[must_use]
    pub fn value_or<'a>(&'a self, key: OverrideKey, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over present overrides in key order.
    pub fn iter(&self) -> impl Iterator<Item = (OverrideKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Plain string map for callers that merge into untyped configuration.
    #[must_use]
    pub fn to_string_map(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str().to_owned(), v.clone()))
            .collect()
    }
}

impl FromIterator<(OverrideKey, String)> for OverrideMap {
    fn from_iter<I: IntoIterator<Item = (OverrideKey, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn key_names_match_source_fields() {
        let names: Vec<&str> = OverrideKey::ALL.iter().map(|k| k.source_field()).collect();
        assert_eq!(names, ["region", "auth_url", "www_authenticate_uri"]);
        assert_eq!(OverrideKey::from_name("auth_url"), Some(OverrideKey::AuthUrl));
        assert_eq!(OverrideKey::from_name("password"), None);
    }

    #[test]
    fn map_serializes_with_snake_case_keys() {
        let map: OverrideMap = [
            (OverrideKey::Region, "regionOne".to_owned()),
            (OverrideKey::AuthUrl, "https://kc.example/v3".to_owned()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "region": "regionOne",
                "auth_url": "https://kc.example/v3",
            })
        );
    }

    #[test]
    fn unknown_keys_are_rejected_on_deserialize() {
        let res: Result<OverrideMap, _> =
            serde_json::from_str(r#"{"region":"r1","password":"x"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn value_or_falls_back_for_absent_keys() {
        let mut map = OverrideMap::new();
        map.insert(OverrideKey::Region, "regionTwo".to_owned());

        assert_eq!(map.value_or(OverrideKey::Region, "regionOne"), "regionTwo");
        assert_eq!(
            map.value_or(OverrideKey::AuthUrl, "http://keystone:5000"),
            "http://keystone:5000"
        );
        assert_eq!(map.get_by_name("region"), Some("regionTwo"));
        assert_eq!(map.get_by_name("unknown"), None);
    }

    #[test]
    fn config_object_identity_and_fields() {
        let obj = ConfigObject::new("openstack", "keystone-overrides")
            .with_label("keystone-override", "")
            .with_data("region", "regionOne");

        assert_eq!(obj.identity(), "openstack/keystone-overrides");
        assert_eq!(obj.field("region"), Some(b"regionOne".as_slice()));
        assert_eq!(obj.field("auth_url"), None);
    }
}
