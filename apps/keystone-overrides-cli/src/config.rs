//! Application configuration.
//!
//! Layering, lowest to highest precedence: built-in defaults, YAML file,
//! `KEYSTONE_OVERRIDES__*` environment variables, command-line flags.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use keystone_overrides::KeystoneOverridesConfig;
use kube_secret_store::KubeSecretStoreConfig;
use serde::Deserialize;
use static_secret_store::StaticSecretStoreConfig;

/// Prefix for environment overrides, e.g. `KEYSTONE_OVERRIDES__NAMESPACE`.
pub const ENV_PREFIX: &str = "KEYSTONE_OVERRIDES__";

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Namespace searched for the override secret.
    pub namespace: String,

    /// Selector identifying the override secret.
    pub label_selector: String,

    pub resolver: KeystoneOverridesConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            namespace: "openstack".to_owned(),
            label_selector: "keystone-override".to_owned(),
            resolver: KeystoneOverridesConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Secret store backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    Kube(KubeSecretStoreConfig),
    Static(StaticSecretStoreConfig),
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Kube(KubeSecretStoreConfig::default())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Load configuration from an optional YAML file and the environment.
///
/// # Errors
///
/// Returns a figment error if the file cannot be parsed or a value has the
/// wrong shape.
pub fn load(path: Option<&Path>) -> Result<AppConfig, Box<figment::Error>> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        if !path.is_file() {
            return Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))));
        }
        figment = figment.merge(Yaml::file(path));
    }
    figment
        .merge(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .extract()
        .map_err(Box::new)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;

    const APP_ENV_VARS: [&str; 5] = [
        "KEYSTONE_OVERRIDES__NAMESPACE",
        "KEYSTONE_OVERRIDES__LABEL_SELECTOR",
        "KEYSTONE_OVERRIDES__STORE__KIND",
        "KEYSTONE_OVERRIDES__STORE__CONTEXT",
        "KEYSTONE_OVERRIDES__LOGGING__FORMAT",
    ];

    /// Run `f` with no app variables set, serialized with other env tests.
    fn with_clean_env<R>(f: impl FnOnce() -> R) -> R {
        temp_env::with_vars_unset(APP_ENV_VARS, f)
    }

    fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let cfg = with_clean_env(|| load(None)).unwrap();

        assert_eq!(cfg.namespace, "openstack");
        assert_eq!(cfg.label_selector, "keystone-override");
        assert!(matches!(cfg.store, StoreConfig::Kube(ref k) if k.context.is_none()));
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert_eq!(cfg.resolver.query_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn yaml_file_selects_static_store() {
        let file = write_yaml(
            r#"
namespace: openstack
label_selector: "keystone-override"
resolver:
  query_timeout: 5s
logging:
  format: json
store:
  kind: static
  secrets:
    - namespace: openstack
      name: keystone-overrides
      labels:
        keystone-override: ""
      data:
        region: regionTwo
"#,
        );

        let cfg = with_clean_env(|| load(Some(file.path()))).unwrap();

        assert_eq!(cfg.resolver.query_timeout, Some(Duration::from_secs(5)));
        assert_eq!(cfg.logging.format, LogFormat::Json);
        match cfg.store {
            StoreConfig::Static(store) => {
                assert_eq!(store.secrets.len(), 1);
                assert_eq!(store.secrets[0].data["region"], "regionTwo");
            }
            StoreConfig::Kube(_) => panic!("expected static store"),
        }
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_yaml("namespace: from-file\n");

        temp_env::with_vars(
            [
                ("KEYSTONE_OVERRIDES__NAMESPACE", Some("from-env")),
                ("KEYSTONE_OVERRIDES__STORE__KIND", Some("kube")),
                ("KEYSTONE_OVERRIDES__STORE__CONTEXT", Some("central")),
            ],
            || {
                let cfg = load(Some(file.path())).unwrap();
                assert_eq!(cfg.namespace, "from-env");
                assert!(
                    matches!(cfg.store, StoreConfig::Kube(ref k) if k.context.as_deref() == Some("central"))
                );
            },
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_yaml("namespace: openstack\nretries: 3\n");
        assert!(with_clean_env(|| load(Some(file.path()))).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/keystone-overrides.yaml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
