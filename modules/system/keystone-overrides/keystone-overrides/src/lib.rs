//! Keystone Overrides Module
//!
//! Resolves optional Keystone endpoint overrides (`region`, `auth_url`,
//! `www_authenticate_uri`) from the single secret carrying a given label in
//! a namespace, so services can point at a central Keystone instance.
//!
//! Provides the `KeystoneOverridesClient` implementation
//! ([`KeystoneOverridesLocalClient`]) for consumption by configuration
//! assembly code. The secret store backend is injected as a
//! `ConfigObjectStore`.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::KeystoneOverridesConfig;
pub use domain::{DomainError, KeystoneOverridesLocalClient, Service};
