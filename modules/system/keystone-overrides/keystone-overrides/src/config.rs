//! Configuration for the Keystone overrides resolver.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeystoneOverridesConfig {
    /// Upper bound for a single store query, as a humantime string
    /// (`"30s"`, `"2m"`). `null` leaves only the caller's deadline.
    ///
    /// Combined with the caller's deadline; the earlier one applies.
    #[serde(deserialize_with = "deserialize_opt_duration")]
    pub query_timeout: Option<Duration>,
}

impl Default for KeystoneOverridesConfig {
    fn default() -> Self {
        Self {
            query_timeout: Some(Duration::from_secs(30)),
        }
    }
}

fn deserialize_opt_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| humantime::parse_duration(raw.trim()).map_err(serde::de::Error::custom))
        .transpose()
}
