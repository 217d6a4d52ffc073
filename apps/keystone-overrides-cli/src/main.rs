//! `keystone-overrides` binary.
//!
//! Resolves the Keystone endpoint overrides for a namespace and prints them
//! as a JSON object. Absent keys mean the service keeps its defaults.

mod cli;
mod config;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use keystone_overrides::{KeystoneOverridesLocalClient, Service};
use keystone_overrides_sdk::{
    CallContext, ConfigObjectStore, KeystoneOverridesClient, TracingObserver,
};
use kube_secret_store::KubeSecretStore;
use static_secret_store::StaticSecretStore;
use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, Command};
use crate::config::{AppConfig, StoreConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_to(&mut cfg);
    logging::init(&cfg.logging);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling resolution");
                cancel.cancel();
            }
        }
    });

    match cli.command {
        Command::Resolve(args) => {
            let mut ctx = CallContext::new(cancel);
            if let Some(timeout) = args.timeout {
                ctx = ctx.with_timeout(timeout);
            }
            resolve(&cfg, &ctx).await
        }
    }
}

async fn resolve(cfg: &AppConfig, ctx: &CallContext) -> anyhow::Result<()> {
    let store = build_store(&cfg.store, ctx).await?;
    let svc = Arc::new(Service::new(store, Arc::new(TracingObserver), &cfg.resolver));
    let client: Arc<dyn KeystoneOverridesClient> = Arc::new(KeystoneOverridesLocalClient::new(svc));

    tracing::info!(
        namespace = %cfg.namespace,
        label_selector = %cfg.label_selector,
        "Resolving keystone overrides"
    );

    let overrides = client
        .resolve(ctx, &cfg.namespace, &cfg.label_selector)
        .await
        .with_context(|| {
            format!(
                "failed to resolve keystone overrides in namespace '{}'",
                cfg.namespace
            )
        })?;

    if overrides.is_empty() {
        tracing::info!("No keystone overrides configured; defaults apply");
    }

    let json = serde_json::to_string_pretty(&overrides).context("failed to encode overrides")?;
    println!("{json}");
    Ok(())
}

/// Build the configured backend. Connecting to the cluster is bounded by
/// the same cancellation token and deadline as the query.
async fn build_store(
    cfg: &StoreConfig,
    ctx: &CallContext,
) -> anyhow::Result<Arc<dyn ConfigObjectStore>> {
    match cfg {
        StoreConfig::Kube(kube_cfg) => {
            let connect = async {
                KubeSecretStore::connect(kube_cfg)
                    .await
                    .map_err(anyhow::Error::from)
            };
            let store = ctx
                .run(connect)
                .await
                .context("failed to connect to kubernetes")?;
            Ok(Arc::new(store))
        }
        StoreConfig::Static(static_cfg) => {
            let store = StaticSecretStore::from_config(static_cfg);
            if store.is_empty() {
                tracing::warn!("Static secret store has no secrets configured");
            } else {
                tracing::info!(secrets = store.len(), "Using static secret store");
            }
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use keystone_overrides_sdk::StoreError;
    use kube_secret_store::KubeSecretStoreConfig;
    use static_secret_store::StaticSecretStoreConfig;

    use super::*;

    #[tokio::test]
    async fn cancelled_call_skips_cluster_connect() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let ctx = CallContext::new(cancel);
        let cfg = StoreConfig::Kube(KubeSecretStoreConfig {
            context: Some("does-not-exist".to_owned()),
        });

        let Err(err) = build_store(&cfg, &ctx).await else {
            panic!("expected connect to be cancelled");
        };

        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn empty_static_store_is_usable() {
        let cfg = StoreConfig::Static(StaticSecretStoreConfig::default());
        let store = build_store(&cfg, &CallContext::default()).await.unwrap();

        let objects = store.list("openstack", "keystone-override").await.unwrap();
        assert!(objects.is_empty());
    }
}
