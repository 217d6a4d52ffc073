#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Secret Store
//!
//! A `ConfigObjectStore` backed by secrets declared in configuration. Used
//! for local development and tests where no cluster is available.
//!
//! ## Configuration
//!
//! ```yaml
//! store:
//!   kind: static
//!   secrets:
//!     - namespace: openstack
//!       name: keystone-overrides
//!       labels:
//!         keystone-override: ""
//!       data:
//!         region: regionTwo
//!         auth_url: https://keystone.central.example:5000/v3
//! ```

pub mod config;
pub mod domain;

pub use config::{StaticSecretConfig, StaticSecretStoreConfig};
pub use domain::Service as StaticSecretStore;
