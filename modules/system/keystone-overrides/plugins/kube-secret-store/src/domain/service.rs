//! Service implementation for the Kubernetes secret store.

use k8s_openapi::api::core::v1::Secret;
use keystone_overrides_sdk::{ConfigObject, StoreError};
use kube::api::{Api, ListParams};
use kube::config::{InferConfigError, KubeConfigOptions, KubeconfigError};
use kube::{Client, Config};

use crate::config::KubeSecretStoreConfig;

/// Errors raised while building the Kubernetes client.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("failed to load kubeconfig context: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    #[error("failed to infer cluster configuration: {0}")]
    Infer(#[from] InferConfigError),

    #[error("failed to build kubernetes client: {0}")]
    Client(#[from] kube::Error),
}

/// Kubernetes secret store service.
pub struct Service {
    client: Client,
}

impl Service {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConnectError` if no usable cluster configuration is found.
    pub async fn connect(cfg: &KubeSecretStoreConfig) -> Result<Self, ConnectError> {
        let config = match &cfg.context {
            Some(context) => {
                let options = KubeConfigOptions {
                    context: Some(context.clone()),
                    ..KubeConfigOptions::default()
                };
                Config::from_kubeconfig(&options).await?
            }
            None => Config::infer().await?,
        };

        tracing::info!(
            cluster_url = %config.cluster_url,
            default_namespace = %config.default_namespace,
            "Connecting to kubernetes API"
        );
        Ok(Self::new(Client::try_from(config)?))
    }

    /// List secrets in `namespace` matching `label_selector`.
    ///
    /// # Errors
    ///
    /// Returns the API failure mapped onto `StoreError`.
    pub async fn list_secrets(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<ConfigObject>, StoreError> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let params = ListParams::default().labels(label_selector);

        let list = api
            .list(&params)
            .await
            .map_err(|e| map_kube_error(label_selector, e))?;

        Ok(list.items.into_iter().map(secret_to_object).collect())
    }
}

fn secret_to_object(secret: Secret) -> ConfigObject {
    let meta = secret.metadata;
    ConfigObject {
        name: meta.name.unwrap_or_default(),
        namespace: meta.namespace.unwrap_or_default(),
        labels: meta.labels.unwrap_or_default(),
        data: secret
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, v.0))
            .collect(),
    }
}

fn map_kube_error(label_selector: &str, err: kube::Error) -> StoreError {
    match err {
        kube::Error::Api(resp) => match resp.code {
            401 | 403 => StoreError::Forbidden(resp.message),
            400 => StoreError::InvalidSelector {
                selector: label_selector.to_owned(),
                reason: resp.message,
            },
            429 | 500..=599 => StoreError::Unavailable(resp.message),
            _ => StoreError::backend(kube::Error::Api(resp)),
        },
        err @ (kube::Error::HyperError(_) | kube::Error::Service(_)) => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::backend(other),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::BTreeMap;

    use k8s_openapi::ByteString;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use kube::core::ErrorResponse;

    use super::*;

    fn api_error(code: u16, message: &str) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_owned(),
            message: message.to_owned(),
            reason: String::new(),
            code,
        })
    }

    #[test]
    fn secret_is_converted_with_decoded_data() {
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some("keystone-overrides".to_owned()),
                namespace: Some("openstack".to_owned()),
                labels: Some(BTreeMap::from([(
                    "keystone-override".to_owned(),
                    String::new(),
                )])),
                ..ObjectMeta::default()
            },
            data: Some(BTreeMap::from([(
                "region".to_owned(),
                ByteString(b" regionOne ".to_vec()),
            )])),
            ..Secret::default()
        };

        let obj = secret_to_object(secret);

        assert_eq!(obj.identity(), "openstack/keystone-overrides");
        assert!(obj.labels.contains_key("keystone-override"));
        assert_eq!(obj.field("region"), Some(b" regionOne ".as_slice()));
    }

    #[test]
    fn secret_without_data_has_no_fields() {
        let obj = secret_to_object(Secret::default());
        assert!(obj.data.is_empty());
        assert!(obj.name.is_empty());
    }

    #[test]
    fn api_errors_are_classified() {
        assert!(matches!(
            map_kube_error("ks", api_error(403, "secrets is forbidden")),
            StoreError::Forbidden(msg) if msg == "secrets is forbidden"
        ));
        assert!(matches!(
            map_kube_error("ks", api_error(401, "Unauthorized")),
            StoreError::Forbidden(_)
        ));
        assert!(matches!(
            map_kube_error("a in (", api_error(400, "unable to parse requirement")),
            StoreError::InvalidSelector { selector, .. } if selector == "a in ("
        ));
        assert!(matches!(
            map_kube_error("ks", api_error(503, "etcdserver: leader changed")),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_kube_error("ks", api_error(404, "namespaces \"gone\" not found")),
            StoreError::Backend(_)
        ));
    }
}
