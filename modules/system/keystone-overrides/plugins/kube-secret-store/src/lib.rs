#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Kubernetes Secret Store
//!
//! A `ConfigObjectStore` that lists `Secret`s through the [`kube`] client,
//! using the ambient cluster configuration (in-cluster service account or
//! local kubeconfig).
//!
//! ## Configuration
//!
//! ```yaml
//! store:
//!   kind: kube
//!   context: central-cluster   # optional kubeconfig context
//! ```
//!
//! The service account needs `list` on `secrets` in the searched namespace.

pub mod config;
pub mod domain;

pub use config::KubeSecretStoreConfig;
pub use domain::{ConnectError, Service as KubeSecretStore};
